#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::SectionId;

pub type SymbolValue = i64;

/// The closed set of symbol categories.
/// Symbols store the raw code, anything outside of this list
/// is kept as-is and reported as an anomaly by consumers
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, PartialOrd, PartialEq, Ord, Eq, Copy, Clone, Debug)]
#[repr(u8)]
pub enum SymbolKind {
    #[default]
    None = 0,
    Function = 1,
    Object = 2,
    Section = 3,
}

impl SymbolKind {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Function),
            2 => Some(Self::Object),
            3 => Some(Self::Section),
            _ => None,
        }
    }
}

impl From<SymbolKind> for u8 {
    fn from(kind: SymbolKind) -> Self {
        kind.code()
    }
}

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    name: String,
    kind: u8,
    value: SymbolValue,
    section: Option<SectionId>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, value: SymbolValue) -> Self {
        Self::with_code(name, kind.code(), value)
    }

    /// Creates a symbol from a raw category code without validating it
    pub fn with_code(name: impl Into<String>, kind: u8, value: SymbolValue) -> Self {
        Self {
            name: name.into(),
            kind,
            value,
            section: None,
        }
    }

    pub fn in_section(mut self, section: SectionId) -> Self {
        self.section = Some(section);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// None if the raw code is not part of the known categories
    pub fn kind(&self) -> Option<SymbolKind> {
        SymbolKind::from_code(self.kind)
    }

    pub fn kind_code(&self) -> u8 {
        self.kind
    }

    pub fn value(&self) -> SymbolValue {
        self.value
    }

    pub fn section(&self) -> Option<SectionId> {
        self.section
    }
}

#[cfg(test)]
mod test {
    use super::{Symbol, SymbolKind};

    #[test]
    fn known_codes() {
        for kind in [
            SymbolKind::None,
            SymbolKind::Function,
            SymbolKind::Object,
            SymbolKind::Section,
        ] {
            assert_eq!(Some(kind), SymbolKind::from_code(kind.code()));
        }
    }

    #[test]
    fn unknown_code_is_kept() {
        let sym = Symbol::with_code("tls_var", 6, 0x10);
        assert_eq!(None, sym.kind());
        assert_eq!(6, sym.kind_code());
    }

    #[test]
    fn accessors() {
        let sym = Symbol::new("main", SymbolKind::Function, 0x401000);
        assert_eq!("main", sym.name());
        assert_eq!(Some(SymbolKind::Function), sym.kind());
        assert_eq!(0x401000, sym.value());
        assert_eq!(None, sym.section());
    }
}
