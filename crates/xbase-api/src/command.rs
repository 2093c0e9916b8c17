//! Command-line parsing for the interpreter.
//!
//! The first word selects the command (case-insensitive); the arguments are
//! split shell-style, so values with spaces can be quoted. LIST receives its
//! argument text untouched because the filter after `FOR` keeps its quotes.

use std::fmt;
use xbase_core::query::ListOptions;
use xbase_core::words::{self, WordsError};

const USAGE_CREATE: &str = "Invalid CREATE command. Use 'CREATE <table_name>'.";
const USAGE_USE: &str = "Invalid USE command. Use 'USE <table_name>'.";
const USAGE_ADD: &str = "Invalid ADD command. Use 'ADD FIELD ...' or 'ADD RECORD ...'.";
const USAGE_ADD_FIELD: &str =
    "Invalid ADD FIELD command. Use 'ADD FIELD <name> <type> <width> [<decimals>]'.";
const USAGE_SET: &str = "Invalid SET command. Use 'SET <option> <value>'.";
const USAGE_SET_RELATION: &str =
    "Invalid SET RELATION command. Use 'SET RELATION TO <field> INTO <table>'.";

/// A parsed interpreter command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `CREATE <table>`
    Create(String),
    /// `USE <table>`
    Use(String),
    /// `ADD FIELD <name> <type> <width> [<decimals>]`
    AddField {
        /// Field name as typed
        name: String,
        /// Upper-cased type tag
        field_type: String,
        /// Display width
        width: usize,
        /// Decimal places
        decimals: usize,
    },
    /// `ADD RECORD <v1> <v2> ...`
    AddRecord(Vec<String>),
    /// `SET RECORD ON|OFF`
    SetRecord(bool),
    /// `SET RELATION TO <field> INTO <table>`
    SetRelation {
        /// Key field of the selected table
        field: String,
        /// Table searched for matches
        table: String,
    },
    /// `LIST [options]`
    List(ListOptions),
    /// `SAVE`
    Save,
    /// `HELP [command]` or `?`
    Help(Option<String>),
    /// `QUIT` or `EXIT`
    Quit,
}

/// Why a line could not be turned into a [`Command`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Known command with malformed arguments; holds the usage message
    Usage(&'static str),
    /// `SET` with an option other than RECORD or RELATION
    UnknownOption(String),
    /// Unrecognized command word; holds the whole line
    Unknown(String),
    /// Unbalanced quotes or a dangling escape
    Words(WordsError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Usage(usage) => write!(f, "{}", usage),
            CommandError::UnknownOption(option) => write!(f, "Unknown option: {}", option),
            CommandError::Unknown(line) => write!(f, "Unknown command: {}", line),
            CommandError::Words(e) => write!(f, "Invalid arguments: {}", e),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<WordsError> for CommandError {
    fn from(err: WordsError) -> Self {
        CommandError::Words(err)
    }
}

impl Command {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let command = match head.to_uppercase().as_str() {
            "CREATE" => Command::Create(required(rest, USAGE_CREATE)?),
            "USE" => Command::Use(required(rest, USAGE_USE)?),
            "ADD" => {
                let (sub, args) = match rest.split_once(char::is_whitespace) {
                    Some((sub, args)) => (sub, args),
                    None => (rest, ""),
                };
                match sub.to_uppercase().as_str() {
                    "FIELD" => parse_add_field(args)?,
                    "RECORD" => Command::AddRecord(words::split(args)?),
                    _ => return Err(CommandError::Usage(USAGE_ADD)),
                }
            }
            "ADD_FIELD" => parse_add_field(rest)?,
            "ADD_RECORD" => Command::AddRecord(words::split(rest)?),
            "SET" => parse_set(rest)?,
            "LIST" => Command::List(ListOptions::parse(rest)),
            "SAVE" => Command::Save,
            "HELP" | "?" => Command::Help((!rest.is_empty()).then(|| rest.to_uppercase())),
            "QUIT" | "EXIT" => Command::Quit,
            _ => return Err(CommandError::Unknown(line.to_string())),
        };

        Ok(Some(command))
    }
}

fn required(arg: &str, usage: &'static str) -> Result<String, CommandError> {
    if arg.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(arg.to_string())
    }
}

fn parse_add_field(args: &str) -> Result<Command, CommandError> {
    let args = words::split(args)?;
    if args.len() < 3 {
        return Err(CommandError::Usage(USAGE_ADD_FIELD));
    }

    let number = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| CommandError::Usage(USAGE_ADD_FIELD))
    };
    let width = number(&args[2])?;
    let decimals = match args.get(3) {
        Some(d) => number(d)?,
        None => 0,
    };

    Ok(Command::AddField {
        name: args[0].clone(),
        field_type: args[1].to_uppercase(),
        width,
        decimals,
    })
}

fn parse_set(args: &str) -> Result<Command, CommandError> {
    let args = words::split(args)?;
    if args.len() < 2 {
        return Err(CommandError::Usage(USAGE_SET));
    }

    match args[0].to_uppercase().as_str() {
        "RECORD" => Ok(Command::SetRecord(
            args[1..].join(" ").eq_ignore_ascii_case("ON"),
        )),
        "RELATION" => {
            let rest = &args[1..];
            if rest.len() < 4
                || !rest[0].eq_ignore_ascii_case("TO")
                || !rest[2].eq_ignore_ascii_case("INTO")
            {
                return Err(CommandError::Usage(USAGE_SET_RELATION));
            }
            Ok(Command::SetRelation {
                field: rest[1].clone(),
                table: rest[3].clone(),
            })
        }
        _ => Err(CommandError::UnknownOption(args[0].clone())),
    }
}

/// Help text, either the command summary or the entry for one command
pub fn help(topic: Option<&str>) -> Vec<String> {
    const ENTRIES: &[(&str, &str)] = &[
        ("CREATE", "CREATE <table_name>: Create a new table"),
        ("USE", "USE <table_name>: Open a table, creating it if needed"),
        (
            "ADD",
            "ADD FIELD <name> <type> <width> [<decimals>]: Add a field to the current table",
        ),
        (
            "ADD",
            "ADD RECORD <value1> <value2> ...: Add a record to the current table",
        ),
        ("SET", "SET RECORD ON|OFF: Show or hide record numbers in listings"),
        (
            "SET",
            "SET RELATION TO <field> INTO <table>: Link the current table to another",
        ),
        (
            "LIST",
            "LIST [ALL] [NEXT n] [REST] [FIELDS f1, f2] [FOR <expr>]: List records",
        ),
        ("LIST", "LIST STRUCTURE: Show the fields of the current table"),
        ("SAVE", "SAVE: Save the current database state"),
        ("HELP", "HELP [command]: Show help"),
        ("QUIT", "QUIT: Save and leave"),
    ];

    let topic = topic.map(|t| match t.trim().to_uppercase().as_str() {
        "ADD_FIELD" | "ADD_RECORD" => "ADD".to_string(),
        "EXIT" => "QUIT".to_string(),
        "?" => "HELP".to_string(),
        other => other.to_string(),
    });

    match topic {
        None => {
            let mut lines = vec!["Documented commands (type help <topic>):".to_string()];
            lines.extend(ENTRIES.iter().map(|(_, text)| format!("  {}", text)));
            lines
        }
        Some(topic) => {
            let lines: Vec<String> = ENTRIES
                .iter()
                .filter(|(name, _)| *name == topic)
                .map(|(_, text)| text.to_string())
                .collect();
            if lines.is_empty() {
                vec![format!("*** No help on {}", topic.to_lowercase())]
            } else {
                lines
            }
        }
    }
}
