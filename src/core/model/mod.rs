//! Table model exposing an image's symbols to a view.
//!
//! The model never owns or copies symbol data. It keeps a shared reference to
//! the installed [`Image`] and resolves cells on demand. Swapping the image is
//! announced to observers as a reset, there is no incremental update path.

use std::sync::Arc;

use crate::core::image::{Image, Symbol, SymbolKind};
use crate::core::tr::{Translate, Untranslated};
use crate::prelude::SmResult;

pub mod index;
pub mod observer;

pub use index::{checked_row_count, CellValue, Column, ModelIndex, Orientation, Role, Row};
pub use observer::{ModelEvent, ModelObserver, ObserverId};

pub struct SymbolsModel {
    source: Option<Arc<Image>>,
    rows: Row,
    generation: u64,
    observers: Vec<(ObserverId, Box<dyn ModelObserver>)>,
    next_observer: usize,
    tr: Box<dyn Translate>,
}

impl Default for SymbolsModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolsModel {
    pub fn new() -> Self {
        Self {
            source: None,
            rows: 0,
            generation: 0,
            observers: Vec::new(),
            next_observer: 0,
            tr: Box::new(Untranslated),
        }
    }

    pub fn with_translator(tr: impl Translate + 'static) -> Self {
        let mut model = Self::new();
        model.set_translator(tr);
        model
    }

    /// Replaces the text lookup. Already rendered text is not refreshed
    pub fn set_translator(&mut self, tr: impl Translate + 'static) {
        self.tr = Box::new(tr);
    }

    pub fn subscribe(&mut self, observer: impl ModelObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let len = self.observers.len();
        self.observers.retain(|(x, _)| *x != id);
        len != self.observers.len()
    }

    pub fn source(&self) -> Option<&Arc<Image>> {
        self.source.as_ref()
    }

    /// Installs a new source.
    /// Re-installing the currently installed image (by identity) does nothing.
    /// An image with more symbols than rows can address is rejected
    /// and the current source stays installed
    pub fn set_source(&mut self, source: Option<Arc<Image>>) -> SmResult<()> {
        let same = match (&self.source, &source) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if same {
            return Ok(());
        }

        let rows = match &source {
            Some(image) => checked_row_count(image.len())?,
            None => 0,
        };

        log::debug!("Installing source with {} symbols", rows);
        self.reset_with(move |model| {
            model.source = source;
            model.rows = rows;
        });
        Ok(())
    }

    /// Announces a full reset without changing the source
    pub fn reset_contents(&mut self) {
        self.reset_with(|_| ());
    }

    fn reset_with(&mut self, change: impl FnOnce(&mut Self)) {
        self.notify(ModelEvent::ResetBegin);
        change(self);
        self.generation = self.generation.wrapping_add(1);
        self.notify(ModelEvent::ResetEnd);
    }

    fn notify(&mut self, event: ModelEvent) {
        let mut observers = std::mem::take(&mut self.observers);
        for (_, observer) in observers.iter_mut() {
            (**observer).notify(self, event);
        }
        self.observers = observers;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn row_count(&self) -> Row {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        Column::COUNT
    }

    pub fn index(&self, row: Row, column: Column) -> Option<ModelIndex> {
        if row >= 0 && row < self.row_count() {
            Some(ModelIndex::new(row, column, self.generation))
        } else {
            None
        }
    }

    /// Same as `index` for hosts that address columns numerically
    pub fn index_at(&self, row: Row, column: usize) -> Option<ModelIndex> {
        self.index(row, Column::from_index(column)?)
    }

    /// The model is flat, every index is a top level index
    pub fn parent(&self, _index: &ModelIndex) -> Option<ModelIndex> {
        None
    }

    /// Resolves a handle to its symbol.
    /// Handles created before the last reset resolve to nothing
    pub fn symbol(&self, index: &ModelIndex) -> Option<&Symbol> {
        if index.generation() != self.generation || index.row() < 0 {
            return None;
        }
        self.source.as_ref()?.symbols().get(index.row() as usize)
    }

    pub fn data(&self, index: &ModelIndex, role: Role) -> Option<CellValue> {
        if !matches!(role, Role::Display | Role::Sort) {
            return None;
        }

        let image = self.source.as_ref()?;
        let sym = self.symbol(index)?;

        Some(match index.column() {
            Column::Name => CellValue::Text(sym.name().into()),
            Column::Type => match role {
                Role::Sort => CellValue::Int(sym.kind_code().into()),
                _ => CellValue::Text(self.kind_label(sym)),
            },
            Column::Value => match role {
                Role::Sort => CellValue::Int(sym.value()),
                _ => CellValue::Text(format!("{:x}", sym.value() as u64)),
            },
            Column::Section => CellValue::Text(
                image
                    .section_of(sym)
                    .map(|x| x.name().to_string())
                    .unwrap_or_default(),
            ),
        })
    }

    fn kind_label(&self, sym: &Symbol) -> String {
        let key = match sym.kind() {
            Some(SymbolKind::None) => "None",
            Some(SymbolKind::Function) => "Function",
            Some(SymbolKind::Object) => "Object",
            Some(SymbolKind::Section) => "Section",
            None => {
                log::warn!("Unknown symbol type: {}.", sym.kind_code());
                "Unknown"
            }
        };
        self.tr.tr(key)
    }

    /// Column titles for the horizontal header,
    /// 1-based row numbers for the vertical one
    pub fn header_data(
        &self,
        section: usize,
        orientation: Orientation,
        role: Role,
    ) -> Option<CellValue> {
        if role != Role::Display {
            return None;
        }

        match orientation {
            Orientation::Horizontal => {
                debug_assert!(
                    section < Column::COUNT,
                    "header section {} is not a column",
                    section
                );
                let column = Column::from_index(section)?;
                Some(CellValue::Text(self.tr.tr(column.title_key())))
            }
            Orientation::Vertical => Some(CellValue::Int(section as i64 + 1)),
        }
    }
}
