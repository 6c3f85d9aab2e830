#[cfg(feature = "serde")]
pub mod def;
#[cfg(feature = "elf")]
pub mod elf;
pub mod symbols;

pub use symbols::{Symbol, SymbolKind, SymbolValue};

pub type Address = u64;

/// Dense index into the section list of an image
#[derive(PartialOrd, PartialEq, Ord, Eq, Copy, Clone, Debug, Hash)]
pub struct SectionId(u32);

impl SectionId {
    pub fn from_index(index: usize) -> Self {
        assert!(
            index < u32::MAX as usize,
            "SectionId index exceeded u32::MAX range"
        );
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Section {
    name: String,
    address: Address,
    size: u64,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_range(mut self, address: Address, size: u64) -> Self {
        self.address = address;
        self.size = size;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// An immutable symbol table together with the sections its symbols live in.
/// Images are shared behind an `Arc` and never change after `finish`
#[derive(Default, Clone, Debug)]
pub struct Image {
    sections: Vec<Section>,
    symbols: Vec<Symbol>,
}

impl Image {
    pub fn builder() -> ImageBuilder {
        ImageBuilder::default()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.index())
    }

    pub fn section_of(&self, sym: &Symbol) -> Option<&Section> {
        self.section(sym.section()?)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[derive(Default)]
pub struct ImageBuilder {
    image: Image,
}

impl ImageBuilder {
    pub fn section(&mut self, section: Section) -> SectionId {
        let id = SectionId::from_index(self.image.sections.len());
        self.image.sections.push(section);
        id
    }

    pub fn find_section(&self, name: &str) -> Option<SectionId> {
        self.image
            .sections
            .iter()
            .position(|x| x.name == name)
            .map(SectionId::from_index)
    }

    pub fn symbol(&mut self, sym: Symbol) -> &mut Self {
        self.image.symbols.push(sym);
        self
    }

    pub fn finish(self) -> Image {
        self.image
    }
}

#[cfg(test)]
mod test {
    use super::{Image, Section, SectionId, Symbol, SymbolKind};

    #[test]
    fn builder() {
        let mut builder = Image::builder();
        let text = builder.section(Section::new(".text").with_range(0x401000, 0x200));
        builder
            .symbol(Symbol::new("main", SymbolKind::Function, 0x401000).in_section(text))
            .symbol(Symbol::new("g_buf", SymbolKind::Object, 0x404000));
        let image = builder.finish();

        assert_eq!(2, image.len());
        assert_eq!(".text", image.section_of(&image.symbols()[0]).unwrap().name());
        assert!(image.section_of(&image.symbols()[1]).is_none());
        assert_eq!(0x200, image.sections()[0].size());
    }

    #[test]
    fn dangling_section() {
        let image = Image::builder().finish();
        assert!(image.is_empty());
        assert!(image.section(SectionId::from_index(3)).is_none());
    }

    #[test]
    fn find_section() {
        let mut builder = Image::builder();
        builder.section(Section::new(".text"));
        let data = builder.section(Section::new(".data"));
        assert_eq!(Some(data), builder.find_section(".data"));
        assert_eq!(None, builder.find_section(".bss"));
    }
}
