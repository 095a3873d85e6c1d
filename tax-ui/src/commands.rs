//! Line-oriented commands accepted by the interactive calculator.

use tax_core::{ItemField, ItemId, ItemList};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  show                                     print both lists and the summary
  add <income|expense>                     append a blank item
  set <income|expense> <id> <field> <value>
                                           field: amount, multiplier, description
  rm <income|expense> <id>                 remove an item (the last one stays)
  log <level>                              change the log filter, e.g. debug
  help                                     show this text
  quit                                     leave (also: exit, end of input)";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Add(ItemList),
    Set {
        list: ItemList,
        id: ItemId,
        field: ItemField,
        value: String,
    },
    Remove {
        list: ItemList,
        id: ItemId,
    },
    LogLevel(String),
    Help,
    Quit,
}

impl Command {
    /// Whether the command changes the item lists.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Add(_) | Self::Set { .. } | Self::Remove { .. })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown list '{0}', expected income or expense")]
    List(String),

    #[error("invalid item id '{0}'")]
    Id(String),

    #[error("unknown field '{0}', expected amount, multiplier or description")]
    Field(String),
}

const ADD_USAGE: &str = "add <income|expense>";
const SET_USAGE: &str = "set <income|expense> <id> <field> <value>";
const RM_USAGE: &str = "rm <income|expense> <id>";
const LOG_USAGE: &str = "log <level>";

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// The value of `set` is the rest of the line, so descriptions may contain
/// spaces.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    let Some((verb, rest)) = split_word(line) else {
        return Ok(None);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "show" | "summary" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "add" => {
            let (list, _) = split_word(rest).ok_or(CommandError::Usage(ADD_USAGE))?;
            Command::Add(parse_list(list)?)
        }
        "set" => {
            let (list, rest) = split_word(rest).ok_or(CommandError::Usage(SET_USAGE))?;
            let (id, rest) = split_word(rest).ok_or(CommandError::Usage(SET_USAGE))?;
            let (field, value) = split_word(rest).ok_or(CommandError::Usage(SET_USAGE))?;
            Command::Set {
                list: parse_list(list)?,
                id: parse_id(id)?,
                field: ItemField::parse(&field.to_ascii_lowercase())
                    .ok_or_else(|| CommandError::Field(field.to_string()))?,
                value: value.to_string(),
            }
        }
        "rm" | "remove" | "del" => {
            let (list, rest) = split_word(rest).ok_or(CommandError::Usage(RM_USAGE))?;
            let (id, _) = split_word(rest).ok_or(CommandError::Usage(RM_USAGE))?;
            Command::Remove {
                list: parse_list(list)?,
                id: parse_id(id)?,
            }
        }
        "log" => {
            let (level, _) = split_word(rest).ok_or(CommandError::Usage(LOG_USAGE))?;
            Command::LogLevel(level.to_string())
        }
        _ => return Err(CommandError::Unknown(verb.to_string())),
    };
    Ok(Some(command))
}

/// Splits off the first whitespace-separated word.
fn split_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => Some((word, rest.trim_start())),
        None => Some((s, "")),
    }
}

fn parse_list(s: &str) -> Result<ItemList, CommandError> {
    ItemList::parse(&s.to_ascii_lowercase()).ok_or_else(|| CommandError::List(s.to_string()))
}

fn parse_id(s: &str) -> Result<ItemId, CommandError> {
    s.parse().map_err(|_| CommandError::Id(s.to_string()))
}
