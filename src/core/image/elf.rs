use goblin::elf::{sym, Elf};
use goblin::strtab::Strtab;

use crate::prelude::SmResult;

use super::{Image, Section, SectionId, Symbol, SymbolKind};

pub const ELF_MAGIC: &[u8] = b"\x7fELF";

pub fn is_elf(data: &[u8]) -> bool {
    data.starts_with(ELF_MAGIC)
}

/// Maps an ELF symbol type to a category code.
/// Types without a matching category are passed through unchanged,
/// they are all above the known range
pub fn kind_code(st_type: u8) -> u8 {
    match st_type {
        sym::STT_NOTYPE => SymbolKind::None.code(),
        sym::STT_FUNC => SymbolKind::Function.code(),
        sym::STT_OBJECT => SymbolKind::Object.code(),
        sym::STT_SECTION => SymbolKind::Section.code(),
        other => other,
    }
}

/// Reads the symbol table of an ELF object.
/// Falls back to the dynamic symbols for stripped objects
pub fn load(data: &[u8]) -> SmResult<Image> {
    let elf = Elf::parse(data)?;
    let mut builder = Image::builder();

    for header in &elf.section_headers {
        let name = elf.shdr_strtab.get_at(header.sh_name).unwrap_or("");
        builder.section(Section::new(name).with_range(header.sh_addr, header.sh_size));
    }

    let (syms, strtab): (Vec<sym::Sym>, &Strtab) = if elf.syms.is_empty() {
        log::info!("No .symtab found, using dynamic symbols");
        (elf.dynsyms.iter().collect(), &elf.dynstrtab)
    } else {
        (elf.syms.iter().collect(), &elf.strtab)
    };

    // the first entry is always the reserved null symbol
    for s in syms.iter().skip(1) {
        let section = if s.st_shndx > 0 && s.st_shndx < elf.section_headers.len() {
            Some(SectionId::from_index(s.st_shndx))
        } else {
            None
        };

        let mut name = strtab.get_at(s.st_name).unwrap_or("").to_string();
        if name.is_empty() && s.st_type() == sym::STT_SECTION {
            if let Some(header) = section.and_then(|id| elf.section_headers.get(id.index())) {
                name = elf.shdr_strtab.get_at(header.sh_name).unwrap_or("").into();
            }
        }

        let mut symbol = Symbol::with_code(name, kind_code(s.st_type()), s.st_value as i64);
        if let Some(id) = section {
            symbol = symbol.in_section(id);
        }
        builder.symbol(symbol);
    }

    let image = builder.finish();
    log::debug!(
        "Loaded {} symbols in {} sections",
        image.len(),
        image.sections().len()
    );
    Ok(image)
}

#[cfg(test)]
mod test {
    use goblin::elf::{sym, Elf};

    use crate::core::image::SymbolKind;

    use super::{is_elf, kind_code, load};

    #[test]
    fn maps_known_types() {
        assert_eq!(SymbolKind::Function.code(), kind_code(sym::STT_FUNC));
        assert_eq!(SymbolKind::Object.code(), kind_code(sym::STT_OBJECT));
        assert_eq!(SymbolKind::Section.code(), kind_code(sym::STT_SECTION));
        assert_eq!(SymbolKind::None.code(), kind_code(sym::STT_NOTYPE));
    }

    #[test]
    fn passes_unknown_types() {
        assert_eq!(sym::STT_TLS, kind_code(sym::STT_TLS));
        assert_eq!(None, SymbolKind::from_code(kind_code(sym::STT_FILE)));
    }

    #[cfg(target_os = "linux")]
    fn own_binary() -> Vec<u8> {
        std::fs::read(std::env::current_exe().unwrap()).unwrap()
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn loads_own_binary() {
        let data = own_binary();
        assert!(is_elf(&data));
        let elf = Elf::parse(&data).unwrap();
        let image = load(&data).unwrap();

        let table = if elf.syms.is_empty() {
            elf.dynsyms.len()
        } else {
            elf.syms.len()
        };
        // null symbol is dropped
        assert_eq!(table - 1, image.len());
        assert_eq!(elf.section_headers.len(), image.sections().len());

        assert!(image.symbols().iter().any(|s| image.section_of(s).is_some()));
        assert!(image
            .symbols()
            .iter()
            .any(|s| s.kind() == Some(SymbolKind::Function)));
        for s in image.symbols() {
            if s.kind() == Some(SymbolKind::Section) {
                if let Some(section) = image.section_of(s) {
                    assert_eq!(section.name(), s.name());
                }
            }
        }
    }

    #[test]
    #[cfg(all(target_os = "linux", feature = "serde"))]
    fn listing_keeps_sections() {
        use crate::core::image::def::ImageDef;

        let image = load(&own_binary()).unwrap();
        let rebuilt = ImageDef::from(&image).build().unwrap();
        assert_eq!(image.len(), rebuilt.len());
        for (a, b) in image.symbols().iter().zip(rebuilt.symbols()) {
            assert_eq!(a.name(), b.name());
            assert_eq!(a.kind_code(), b.kind_code());
            assert_eq!(
                image.section_of(a).map(|x| x.name()),
                rebuilt.section_of(b).map(|x| x.name())
            );
        }
    }

    #[test]
    fn rejects_garbage() {
        let data = b"not an elf file at all, just some bytes";
        assert!(!is_elf(data));
        assert!(load(data).is_err());
    }
}
