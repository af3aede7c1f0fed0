use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::task::Task;

/// Display mode selecting which tasks are projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Every task not in the trash.
    #[default]
    All,
    /// Completed tasks not in the trash.
    Checked,
    /// Open tasks not in the trash.
    Unchecked,
    /// The trash.
    Removed,
}

impl FilterMode {
    /// Modes in selector order.
    pub const ALL: [Self; 4] = [Self::All, Self::Checked, Self::Unchecked, Self::Removed];

    /// Whether `task` belongs to this view.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => !task.removed,
            Self::Checked => task.checked && !task.removed,
            Self::Unchecked => !task.checked && !task.removed,
            Self::Removed => task.removed,
        }
    }

    /// Literal used on the command line and in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Checked => "checked",
            Self::Unchecked => "unchecked",
            Self::Removed => "removed",
        }
    }

    /// Label shown in the mode selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "全てのタスク",
            Self::Checked => "完了したタスク",
            Self::Unchecked => "現在のタスク",
            Self::Removed => "ゴミ箱",
        }
    }

    /// Next mode in selector order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Checked,
            Self::Checked => Self::Unchecked,
            Self::Unchecked => Self::Removed,
            Self::Removed => Self::All,
        }
    }

    /// Previous mode in selector order, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::All => Self::Removed,
            Self::Checked => Self::All,
            Self::Unchecked => Self::Checked,
            Self::Removed => Self::Unchecked,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for strings other than the four mode literals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid filter mode '{0}' (expected all, checked, unchecked or removed)")]
pub struct ParseFilterModeError(pub String);

impl FromStr for FilterMode {
    type Err = ParseFilterModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(Self::All),
            "checked" => Ok(Self::Checked),
            "unchecked" => Ok(Self::Unchecked),
            "removed" => Ok(Self::Removed),
            other => Err(ParseFilterModeError(other.to_owned())),
        }
    }
}

/// Number of tasks each mode would show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterCounts {
    /// Tasks visible under [`FilterMode::All`].
    pub all: usize,
    /// Tasks visible under [`FilterMode::Checked`].
    pub checked: usize,
    /// Tasks visible under [`FilterMode::Unchecked`].
    pub unchecked: usize,
    /// Tasks visible under [`FilterMode::Removed`].
    pub removed: usize,
}

impl FilterCounts {
    /// Count for a single mode.
    #[must_use]
    pub const fn get(&self, mode: FilterMode) -> usize {
        match mode {
            FilterMode::All => self.all,
            FilterMode::Checked => self.checked,
            FilterMode::Unchecked => self.unchecked,
            FilterMode::Removed => self.removed,
        }
    }

    /// Tally the given tasks.
    pub fn tally<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks.into_iter().fold(Self::default(), |mut acc, task| {
            for mode in FilterMode::ALL {
                if mode.matches(task) {
                    match mode {
                        FilterMode::All => acc.all += 1,
                        FilterMode::Checked => acc.checked += 1,
                        FilterMode::Unchecked => acc.unchecked += 1,
                        FilterMode::Removed => acc.removed += 1,
                    }
                }
            }
            acc
        })
    }
}
