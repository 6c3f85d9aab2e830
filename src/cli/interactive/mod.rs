pub mod command;

use std::{cell::RefCell, rc::Rc};

use crate::{
    core::model::{ModelEvent, ModelObserver, SymbolsModel},
    prelude::{Config, SmResult},
};
use rustyline::error::ReadlineError;

use self::command::{default_actions, ActionList};
use super::view::TableView;

pub enum CallbackKind {
    None,
    Table,
    Error,
}

pub trait InteractiveCallback: FnMut(&str, CallbackKind) -> SmResult<()> {}

impl<T> InteractiveCallback for T where T: FnMut(&str, CallbackKind) -> SmResult<()> {}

pub fn default_interactive_callback(s: &str, kind: CallbackKind) -> SmResult<()> {
    match kind {
        CallbackKind::Error => eprint!("{}", s),
        CallbackKind::None | CallbackKind::Table => print!("{}", s),
    }
    Ok(())
}

/// Interactive browser state.
/// The view is shared with the model's observer list
pub struct Interactive {
    pub actions: ActionList,
    pub model: SymbolsModel,
    pub view: Rc<RefCell<TableView>>,
    pub running: bool,
}

impl Interactive {
    pub fn new(mut model: SymbolsModel) -> Self {
        let view = Rc::new(RefCell::new(TableView::new(&model)));
        let observer = view.clone();
        model.subscribe(move |model: &SymbolsModel, event: ModelEvent| {
            observer.borrow_mut().notify(model, event)
        });
        Self {
            actions: default_actions(),
            model,
            view,
            running: true,
        }
    }

    pub fn execute(&mut self, mut f: impl InteractiveCallback, line: &str) -> SmResult<()> {
        let cmd = self.actions.eval(line)?;
        cmd.execute(&mut f, self)
    }

    /// Runs one line and hands a failed command back as error output
    pub fn run_line(&mut self, mut f: impl InteractiveCallback, line: &str) -> SmResult<()> {
        match self.execute(&mut f, line) {
            Err(err) => f(&format!("{}\n", err), CallbackKind::Error),
            ok => ok,
        }
    }
}

pub fn command_line(_cfg: &Config, model: SymbolsModel) -> SmResult<()> {
    let mut rl = rustyline::DefaultEditor::new().map_err(anyhow::Error::from)?;
    let mut interactive = Interactive::new(model);
    while interactive.running {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                if let Err(err) = rl.add_history_entry(line.as_str()) {
                    log::warn!("History error: {}", err);
                }
                interactive.run_line(default_interactive_callback, &line)?;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(err) => eprintln!("{:?}", err),
        }
    }
    Ok(())
}
