//! Line-oriented command language read by `tasklist run`.

use std::str::FromStr;

use tasklist_app::ListView;
use tasklist_core::{FilterMode, ParseFilterModeError, ParseTaskIdError, TaskId};
use thiserror::Error;

/// Reason a script line could not be parsed or resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("'{command}' takes no arguments")]
    UnexpectedArgument { command: &'static str },
    #[error(transparent)]
    Filter(#[from] ParseFilterModeError),
    #[error(transparent)]
    TaskId(#[from] ParseTaskIdError),
    #[error("invalid row reference '{0}'")]
    BadRow(String),
    #[error("no row #{position} in the {mode} view")]
    NoSuchRow { position: usize, mode: FilterMode },
}

/// Reference to a task: a raw id, or a 1-based row of the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskRef {
    Id(TaskId),
    Row(usize),
}

impl TaskRef {
    /// Resolve against the view shown at the time the line runs.
    pub fn resolve(self, view: &ListView) -> Result<TaskId, ScriptError> {
        match self {
            Self::Id(id) => Ok(id),
            Self::Row(position) => view
                .row(position)
                .map(|row| row.id)
                .ok_or(ScriptError::NoSuchRow {
                    position,
                    mode: view.filter,
                }),
        }
    }
}

impl FromStr for TaskRef {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(position) = s.strip_prefix('#') {
            return match position.parse::<usize>() {
                Ok(position) if position > 0 => Ok(Self::Row(position)),
                _ => Err(ScriptError::BadRow(s.to_owned())),
            };
        }
        Ok(Self::Id(s.parse()?))
    }
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Add(String),
    Edit(TaskRef, String),
    Check(TaskRef),
    Uncheck(TaskRef),
    Toggle(TaskRef),
    Remove(TaskRef),
    Restore(TaskRef),
    Filter(FilterMode),
    Purge,
    List,
}

/// Parse a line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, ScriptError> {
    let line = line.trim_end_matches(['\r', '\n']).trim_start();
    if line.trim_end().is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (name, rest) = line.split_once(' ').unwrap_or((line, ""));
    let command = match name {
        // Text after the first space is kept exactly as typed.
        "add" => ScriptCommand::Add(rest.to_owned()),
        "edit" => {
            let (target, text) = rest
                .trim_start()
                .split_once(' ')
                .ok_or(ScriptError::MissingArgument {
                    command: "edit",
                    expected: "a task reference and text",
                })?;
            ScriptCommand::Edit(target.parse()?, text.to_owned())
        }
        "check" => ScriptCommand::Check(task_ref("check", rest)?),
        "uncheck" => ScriptCommand::Uncheck(task_ref("uncheck", rest)?),
        "toggle" => ScriptCommand::Toggle(task_ref("toggle", rest)?),
        "remove" => ScriptCommand::Remove(task_ref("remove", rest)?),
        "restore" => ScriptCommand::Restore(task_ref("restore", rest)?),
        "filter" => {
            let mode = rest.trim();
            if mode.is_empty() {
                return Err(ScriptError::MissingArgument {
                    command: "filter",
                    expected: "a mode",
                });
            }
            ScriptCommand::Filter(mode.parse()?)
        }
        "purge" => no_arguments("purge", rest, ScriptCommand::Purge)?,
        "list" => no_arguments("list", rest, ScriptCommand::List)?,
        other => return Err(ScriptError::UnknownCommand(other.to_owned())),
    };
    Ok(Some(command))
}

fn task_ref(command: &'static str, rest: &str) -> Result<TaskRef, ScriptError> {
    let target = rest.trim();
    if target.is_empty() {
        return Err(ScriptError::MissingArgument {
            command,
            expected: "a task reference",
        });
    }
    target.parse()
}

fn no_arguments(
    command: &'static str,
    rest: &str,
    parsed: ScriptCommand,
) -> Result<ScriptCommand, ScriptError> {
    if rest.trim().is_empty() {
        Ok(parsed)
    } else {
        Err(ScriptError::UnexpectedArgument { command })
    }
}
