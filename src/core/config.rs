use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use super::image::{elf, Image};
use super::model::Column;
use super::tr::Catalog;
use crate::prelude::{Error, SmResult};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Generator, Shell};
use lazy_static::lazy_static;
use log::LevelFilter;

lazy_static! {
    pub static ref CFG: Config = Config::new();
}

#[derive(ValueEnum, Default, PartialOrd, PartialEq, Ord, Eq, Copy, Clone, Debug)]
pub enum InputFormat {
    /// Detect ELF objects by their magic, anything else is a listing
    #[default]
    Auto,
    Ron,
    Elf,
}

impl Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Auto => write!(f, "auto"),
            InputFormat::Ron => write!(f, "ron"),
            InputFormat::Elf => write!(f, "elf"),
        }
    }
}

impl InputFormat {
    pub fn parse(&self, data: &[u8]) -> SmResult<Image> {
        match self {
            InputFormat::Auto if elf::is_elf(data) => elf::load(data),
            InputFormat::Elf => elf::load(data),
            InputFormat::Auto | InputFormat::Ron => {
                let text = std::str::from_utf8(data)
                    .map_err(|_| Error::UnsupportedFormat("listing is not valid utf-8".into()))?;
                Image::from_ron(text)
            }
        }
    }
}

pub fn load_image(path: &Path, format: InputFormat) -> SmResult<Image> {
    let data = std::fs::read(path)?;
    let image = format.parse(&data)?;
    log::info!("Loaded {} symbols from {}", image.len(), path.display());
    Ok(image)
}

#[derive(Args, Clone, Debug, Default)]
pub struct InputArgs {
    pub input: PathBuf,

    #[arg(long, short, default_value_t)]
    pub format: InputFormat,
}

impl InputArgs {
    pub fn load(&self) -> SmResult<Image> {
        load_image(&self.input, self.format)
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct ListCommand {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(long, short)]
    pub sort: Option<Column>,

    #[arg(long, short)]
    pub descending: bool,

    /// Disable colored headers
    #[arg(long)]
    pub plain: bool,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Print the symbol table
    List(ListCommand),
    /// Print the loaded image as a listing
    Dump(InputArgs),
    /// Browse the symbol table interactively
    Browse(InputArgs),
}

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // text catalog used for labels and headers
    #[clap(long)]
    pub catalog: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[clap(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Config {
    pub fn new() -> Self {
        Self::parse()
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn load_catalog(&self) -> SmResult<Option<Catalog>> {
        match &self.catalog {
            Some(path) => Ok(Some(Catalog::from_ron(&std::fs::read_to_string(path)?)?)),
            None => Ok(None),
        }
    }
}

pub fn generate_completion<G: Generator>(gen: G) {
    generate(
        gen,
        &mut Config::command(),
        Config::command().get_name(),
        &mut std::io::stdout(),
    );
}
