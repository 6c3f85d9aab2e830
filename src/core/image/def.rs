use serde::{Deserialize, Serialize};

use crate::prelude::{Error, SmResult};

use super::{Address, Image, Section, Symbol, SymbolKind, SymbolValue};

/// On-disk description of an image.
/// Symbols refer to their section by name
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct ImageDef {
    #[serde(default)]
    pub sections: Vec<SectionDef>,
    #[serde(default)]
    pub symbols: Vec<SymbolDef>,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct SectionDef {
    pub name: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub size: u64,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct SymbolDef {
    pub name: String,
    #[serde(default)]
    pub kind: SymbolKind,
    // raw category code, takes precedence over kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u8>,
    #[serde(default)]
    pub value: SymbolValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl ImageDef {
    pub fn from_ron(s: &str) -> SmResult<Self> {
        Ok(ron::from_str(s)?)
    }

    pub fn to_ron(&self) -> SmResult<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn build(&self) -> SmResult<Image> {
        let mut builder = Image::builder();
        for section in &self.sections {
            builder.section(Section::new(&section.name).with_range(section.address, section.size));
        }

        for def in &self.symbols {
            let code = def.code.unwrap_or_else(|| def.kind.code());
            let mut sym = Symbol::with_code(&def.name, code, def.value);
            if let Some(name) = &def.section {
                let id = builder
                    .find_section(name)
                    .ok_or_else(|| Error::UnknownSection(name.clone()))?;
                sym = sym.in_section(id);
            }
            builder.symbol(sym);
        }
        Ok(builder.finish())
    }
}

impl From<&Image> for ImageDef {
    fn from(image: &Image) -> Self {
        Self {
            sections: image
                .sections()
                .iter()
                .map(|x| SectionDef {
                    name: x.name().into(),
                    address: x.address(),
                    size: x.size(),
                })
                .collect(),
            symbols: image
                .symbols()
                .iter()
                .map(|x| SymbolDef {
                    name: x.name().into(),
                    kind: x.kind().unwrap_or_default(),
                    code: if x.kind().is_some() {
                        None
                    } else {
                        Some(x.kind_code())
                    },
                    value: x.value(),
                    section: image.section_of(x).map(|s| s.name().into()),
                })
                .collect(),
        }
    }
}

impl Image {
    pub fn from_ron(s: &str) -> SmResult<Self> {
        ImageDef::from_ron(s)?.build()
    }
}
