use super::SymbolsModel;

/// Structural notifications sent by the model.
/// During `ResetBegin` the model still reflects the old source,
/// during `ResetEnd` it reflects only the new one
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum ModelEvent {
    ResetBegin,
    ResetEnd,
}

pub trait ModelObserver {
    fn notify(&mut self, model: &SymbolsModel, event: ModelEvent);
}

impl<F> ModelObserver for F
where
    F: FnMut(&SymbolsModel, ModelEvent),
{
    fn notify(&mut self, model: &SymbolsModel, event: ModelEvent) {
        self(model, event)
    }
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub struct ObserverId(pub(super) usize);
