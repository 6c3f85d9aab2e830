use std::{path::PathBuf, sync::Arc};

use crate::{
    cli::view::SortOrder,
    core::model::{Column, Orientation, Role, Row},
    prelude::{load_image, Error, InputFormat, SmResult},
};

use super::{CallbackKind, Interactive, InteractiveCallback};

pub fn default_actions() -> ActionList {
    ActionList {
        actions: vec![
            Action::new(
                "?",
                vec![Param::with_default("command", "")],
                help_parser,
                "Display help",
            ),
            Action::new("q", vec![], exit_parser, "Quit the program"),
            Action::new("ls", vec![], list_parser, "Print the symbol table"),
            Action::new(
                "sort",
                vec![Param::new("column"), Param::with_default("order", "asc")],
                sort_parser,
                "Sort by column (name, type, value, section or none)",
            ),
            Action::new("show", vec![Param::new("row")], show_parser, "Show a single row"),
            Action::new("load", vec![Param::new("path")], load_parser, "Load a symbol source"),
            Action::new("unload", vec![], unload_parser, "Remove the symbol source"),
        ],
    }
}

/// Command syntax:
/// An action name followed by a list of parameters
/// the full command could look like this:
/// sort value desc
pub struct ActionList {
    actions: Vec<Action>,
}

impl ActionList {
    pub fn eval(&self, input: &str) -> SmResult<Commands> {
        // tokenize the input
        let split = shell_words::split(input).map_err(anyhow::Error::from)?;
        let cmd = split.first().map(|x| x.as_str()).unwrap_or("");
        let args: Vec<&str> = split.iter().skip(1).map(|x| x.as_str()).collect();
        let action = self
            .actions
            .iter()
            .find(|x| x.name == cmd)
            .ok_or(Error::UnknownCommand(cmd.into()))?;

        action.eval(&args)
    }

    fn help(&self, f: &mut dyn InteractiveCallback, cmd: &str) -> SmResult<()> {
        let mut printed = false;
        for action in &self.actions {
            if action.name.starts_with(cmd) {
                printed = true;
                action.help(f)?;
            }
        }
        if printed {
            Ok(())
        } else {
            Err(Error::UnknownCommand(cmd.into()))
        }
    }
}

#[derive(Default)]
pub struct Param {
    name: String,
    default_value: Option<String>,
}

impl Param {
    fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            default_value: None,
        }
    }

    fn with_default(name: &str, default_value: &str) -> Self {
        Self {
            name: name.into(),
            default_value: Some(default_value.into()),
        }
    }
}

type CommandParser = fn(&[&str], &[Param]) -> SmResult<Commands>;

pub struct Action {
    help: String,
    name: String,
    params: Vec<Param>,
    parser: CommandParser,
}

impl Action {
    fn new(name: &str, params: Vec<Param>, parser: CommandParser, help: &str) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            params,
            parser,
        }
    }

    fn eval(&self, args: &[&str]) -> SmResult<Commands> {
        (self.parser)(args, &self.params)
    }

    fn help(&self, f: &mut dyn InteractiveCallback) -> SmResult<()> {
        f(&self.name, CallbackKind::None)?;
        self.params.iter().try_for_each(|x| {
            if let Some(default_value) = &x.default_value {
                f(
                    &format!(" [{}='{}']", x.name, default_value),
                    CallbackKind::None,
                )
            } else {
                f(&format!(" [{}]", x.name), CallbackKind::None)
            }
        })?;
        f(&format!(" {}\n", self.help), CallbackKind::None)?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Commands {
    Exit,
    Help(String),
    List,
    Sort(Option<(Column, SortOrder)>),
    Show(Row),
    Load(PathBuf),
    Unload,
}

impl Commands {
    pub fn execute(
        &self,
        f: &mut dyn InteractiveCallback,
        interactive: &mut Interactive,
    ) -> SmResult<()> {
        match self {
            Commands::Exit => {
                interactive.running = false;
                Ok(())
            }
            Commands::Help(cmd) => interactive.actions.help(f, cmd),
            Commands::List => {
                let table = interactive.view.borrow().render(&interactive.model);
                f(&table, CallbackKind::Table)
            }
            Commands::Sort(sort) => {
                interactive
                    .view
                    .borrow_mut()
                    .set_sort(&interactive.model, *sort);
                Ok(())
            }
            Commands::Show(row) => show(f, interactive, *row),
            Commands::Load(path) => {
                let image = load_image(path, InputFormat::Auto)?;
                interactive.model.set_source(Some(Arc::new(image)))
            }
            Commands::Unload => interactive.model.set_source(None),
        }
    }
}

fn show(f: &mut dyn InteractiveCallback, interactive: &Interactive, row: Row) -> SmResult<()> {
    let model = &interactive.model;
    if model.source().is_none() {
        return Err(Error::NoSource);
    }
    if model.index(row, Column::Name).is_none() {
        return Err(Error::InvalidRow((row + 1).to_string()));
    }

    let cells = interactive.view.borrow().cells(model, row);
    for (column, cell) in Column::ALL.iter().zip(cells) {
        let title = model
            .header_data(column.index(), Orientation::Horizontal, Role::Display)
            .map(|x| x.to_string())
            .unwrap_or_default();
        f(&format!("{}: {}\n", title, cell), CallbackKind::None)?;
    }
    Ok(())
}

/* Command parsers */

fn get_arg_or(args: &[&str], params: &[Param], index: usize) -> SmResult<String> {
    let param = params.get(index).ok_or(Error::InsufficientArguments)?;
    match (args.get(index), &param.default_value) {
        (Some(arg), _) => Ok(arg.to_string()),
        (None, Some(def)) => Ok(def.into()),
        (None, None) => Err(Error::InsufficientArguments),
    }
}

fn has_too_many_args(args: &[&str], params: &[Param]) -> SmResult<()> {
    if args.len() > params.len() {
        Err(Error::TooManyArguments)
    } else {
        Ok(())
    }
}

fn help_parser(args: &[&str], params: &[Param]) -> SmResult<Commands> {
    has_too_many_args(args, params)?;

    let cmd = get_arg_or(args, params, 0)?;

    Ok(Commands::Help(cmd))
}

fn exit_parser(args: &[&str], params: &[Param]) -> SmResult<Commands> {
    has_too_many_args(args, params)?;
    Ok(Commands::Exit)
}

fn list_parser(args: &[&str], params: &[Param]) -> SmResult<Commands> {
    has_too_many_args(args, params)?;
    Ok(Commands::List)
}

fn sort_parser(args: &[&str], params: &[Param]) -> SmResult<Commands> {
    has_too_many_args(args, params)?;

    let column = get_arg_or(args, params, 0)?;
    if column == "none" {
        return Ok(Commands::Sort(None));
    }
    let column: Column = column.parse()?;
    let order = match get_arg_or(args, params, 1)?.as_str() {
        "asc" => SortOrder::Ascending,
        "desc" => SortOrder::Descending,
        other => {
            return Err(Error::Other(anyhow::anyhow!(
                "Unknown sort order '{}'",
                other
            )))
        }
    };
    Ok(Commands::Sort(Some((column, order))))
}

fn show_parser(args: &[&str], params: &[Param]) -> SmResult<Commands> {
    has_too_many_args(args, params)?;

    let arg = get_arg_or(args, params, 0)?;
    // rows are shown 1-based
    let row: Row = arg.parse().map_err(|_| Error::InvalidRow(arg.clone()))?;
    if row < 1 {
        return Err(Error::InvalidRow(arg));
    }
    Ok(Commands::Show(row - 1))
}

fn load_parser(args: &[&str], params: &[Param]) -> SmResult<Commands> {
    has_too_many_args(args, params)?;

    let path = get_arg_or(args, params, 0)?;
    Ok(Commands::Load(PathBuf::from(
        shellexpand::tilde(&path).into_owned(),
    )))
}

fn unload_parser(args: &[&str], params: &[Param]) -> SmResult<Commands> {
    has_too_many_args(args, params)?;
    Ok(Commands::Unload)
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        cli::{interactive::Interactive, view::SortOrder},
        core::{
            image::{Image, Section, Symbol, SymbolKind},
            model::{Column, SymbolsModel},
        },
        prelude::{Error, SmResult},
    };

    use super::{default_actions, CallbackKind, Commands};

    fn interactive() -> Interactive {
        let mut builder = Image::builder();
        let text = builder.section(Section::new(".text"));
        builder
            .symbol(Symbol::new("main", SymbolKind::Function, 0x401000).in_section(text))
            .symbol(Symbol::new("g_buf", SymbolKind::Object, 0x404000));
        let mut model = SymbolsModel::new();
        model.set_source(Some(Arc::new(builder.finish()))).unwrap();
        Interactive::new(model)
    }

    fn run(interactive: &mut Interactive, line: &str) -> SmResult<String> {
        let mut out = String::new();
        interactive.execute(
            |s: &str, _: CallbackKind| -> SmResult<()> {
                out.push_str(s);
                Ok(())
            },
            line,
        )?;
        Ok(out)
    }

    #[test]
    fn parse_commands() {
        let actions = default_actions();
        assert_eq!(Commands::Exit, actions.eval("q").unwrap());
        assert_eq!(Commands::List, actions.eval("ls").unwrap());
        assert_eq!(Commands::Help("".into()), actions.eval("?").unwrap());
        assert_eq!(
            Commands::Sort(Some((Column::Value, SortOrder::Ascending))),
            actions.eval("sort value").unwrap()
        );
        assert_eq!(
            Commands::Sort(Some((Column::Name, SortOrder::Descending))),
            actions.eval("sort name desc").unwrap()
        );
        assert_eq!(Commands::Sort(None), actions.eval("sort none").unwrap());
        assert_eq!(Commands::Show(0), actions.eval("show 1").unwrap());
        assert_eq!(
            Commands::Load("my syms.ron".into()),
            actions.eval("load 'my syms.ron'").unwrap()
        );
    }

    #[test]
    fn parse_errors() {
        let actions = default_actions();
        assert!(matches!(actions.eval("frob"), Err(Error::UnknownCommand(_))));
        assert!(matches!(actions.eval("q now"), Err(Error::TooManyArguments)));
        assert!(matches!(actions.eval("show"), Err(Error::InsufficientArguments)));
        assert!(matches!(actions.eval("show 0"), Err(Error::InvalidRow(_))));
        assert!(matches!(actions.eval("show x"), Err(Error::InvalidRow(_))));
        assert!(actions.eval("sort size").is_err());
        assert!(actions.eval("sort name sideways").is_err());
    }

    #[test]
    fn help() {
        let mut interactive = interactive();
        let out = run(&mut interactive, "? so").unwrap();
        assert_eq!(
            "sort [column] [order='asc'] Sort by column (name, type, value, section or none)\n",
            out
        );
    }

    #[test]
    fn sort_and_list() {
        let mut interactive = interactive();
        run(&mut interactive, "sort value desc").unwrap();
        assert_eq!(&[1, 0], interactive.view.borrow().rows());

        let out = run(&mut interactive, "ls").unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(3, lines.len());
        assert!(lines[1].contains("g_buf"));
        assert!(lines[2].contains("main"));
    }

    #[test]
    fn show() {
        let mut interactive = interactive();
        let out = run(&mut interactive, "show 1").unwrap();
        assert_eq!(
            "Name: main\nType: Function\nValue: 401000\nSection: .text\n",
            out
        );
        assert!(matches!(
            run(&mut interactive, "show 3"),
            Err(Error::InvalidRow(_))
        ));
    }

    #[test]
    fn unload_resets_view() {
        let mut interactive = interactive();
        run(&mut interactive, "unload").unwrap();
        assert!(interactive.view.borrow().rows().is_empty());
        assert_eq!(0, interactive.model.row_count());
        assert!(matches!(run(&mut interactive, "show 1"), Err(Error::NoSource)));
    }

    #[test]
    fn load_missing_file() {
        let mut interactive = interactive();
        assert!(matches!(
            run(&mut interactive, "load /nonexistent/litesym/syms.ron"),
            Err(Error::Io(_))
        ));
        assert_eq!(2, interactive.model.row_count());
    }

    #[test]
    fn load_listing() {
        let path = std::env::temp_dir().join(format!("litesym-{}.ron", std::process::id()));
        std::fs::write(
            &path,
            r#"(symbols: [(name: "start", kind: Function, value: 0x10)])"#,
        )
        .unwrap();

        let mut interactive = interactive();
        let res = run(&mut interactive, &format!("load '{}'", path.display()));
        std::fs::remove_file(&path).unwrap();
        res.unwrap();

        assert_eq!(1, interactive.model.row_count());
        assert_eq!(&[0], interactive.view.borrow().rows());
    }

    #[test]
    fn errors_go_to_error_output() {
        let mut interactive = interactive();
        let mut out = String::new();
        let mut err = String::new();
        interactive
            .run_line(
                |s: &str, kind: CallbackKind| -> SmResult<()> {
                    match kind {
                        CallbackKind::Error => err.push_str(s),
                        CallbackKind::None | CallbackKind::Table => out.push_str(s),
                    }
                    Ok(())
                },
                "show 9",
            )
            .unwrap();
        assert!(out.is_empty());
        assert_eq!("Invalid row: 9\n", err);
    }

    #[test]
    fn exit() {
        let mut interactive = interactive();
        assert!(interactive.running);
        run(&mut interactive, "q").unwrap();
        assert!(!interactive.running);
    }
}
