#[cfg(feature = "cli")]
pub use crate::core::config::*;
pub use crate::core::error::*;
pub use crate::core::image::{Image, Section, SectionId, Symbol, SymbolKind};
pub use crate::core::model::{
    CellValue, Column, ModelEvent, ModelIndex, ModelObserver, Orientation, Role, Row,
    SymbolsModel,
};
pub use crate::core::tr::{Catalog, Translate, Untranslated};
