pub mod interactive;
pub mod view;

use std::sync::Arc;

use crate::{
    core::{
        config::generate_completion,
        image::def::ImageDef,
        model::SymbolsModel,
    },
    prelude::{Commands, Config, InputArgs, ListCommand, SmResult},
};
use clap::CommandFactory;
use simple_logger::SimpleLogger;

use self::view::{SortOrder, TableView};

pub fn init(cfg: &Config) -> SmResult<()> {
    if let Some(shell) = cfg.completions {
        generate_completion(shell);
        return Ok(());
    }

    SimpleLogger::new().with_level(cfg.log_level()).init()?;

    let model = create_model(cfg)?;

    match &cfg.command {
        Some(Commands::List(l)) => list(cfg, l, model),
        Some(Commands::Dump(d)) => dump(cfg, d),
        Some(Commands::Browse(b)) => browse(cfg, b, model),
        None => {
            Config::command().print_help()?;
            Ok(())
        }
    }
}

pub fn create_model(cfg: &Config) -> SmResult<SymbolsModel> {
    Ok(match cfg.load_catalog()? {
        Some(catalog) => SymbolsModel::with_translator(catalog),
        None => SymbolsModel::new(),
    })
}

fn list(_cfg: &Config, list: &ListCommand, mut model: SymbolsModel) -> SmResult<()> {
    model.set_source(Some(Arc::new(list.input.load()?)))?;

    let mut view = TableView::new(&model).plain(list.plain);
    let order = if list.descending {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    view.set_sort(&model, list.sort.map(|column| (column, order)));

    print!("{}", view.render(&model));
    Ok(())
}

fn dump(_cfg: &Config, input: &InputArgs) -> SmResult<()> {
    let image = input.load()?;
    println!("{}", ImageDef::from(&image).to_ron()?);
    Ok(())
}

fn browse(cfg: &Config, input: &InputArgs, mut model: SymbolsModel) -> SmResult<()> {
    model.set_source(Some(Arc::new(input.load()?)))?;
    interactive::command_line(cfg, model)
}
