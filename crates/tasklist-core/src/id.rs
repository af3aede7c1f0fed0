use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseIntError, str::FromStr};
use thiserror::Error;
use time::OffsetDateTime;

/// Identifier of a task: milliseconds since the Unix epoch at creation.
#[derive(
    Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Creation instant encoded in the identifier.
    #[must_use]
    pub fn created_at(self) -> Option<OffsetDateTime> {
        let nanos = i128::from(self.0).checked_mul(1_000_000)?;
        OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Error returned when a string is not a valid task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid task id '{input}': {source}")]
pub struct ParseTaskIdError {
    input: String,
    #[source]
    source: ParseIntError,
}

impl FromStr for TaskId {
    type Err = ParseTaskIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|source| ParseTaskIdError {
                input: trimmed.to_owned(),
                source,
            })
    }
}

/// Hands out time-derived identifiers that never repeat within one allocator.
///
/// Two allocations inside the same millisecond (or a clock that steps back)
/// still yield strictly increasing ids.
#[derive(Debug, Clone, Default)]
pub struct TaskIdAllocator {
    last: Option<TaskId>,
}

impl TaskIdAllocator {
    /// Create an allocator that has not issued any id yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Allocate an id from the current wall clock.
    pub fn next_id(&mut self) -> TaskId {
        self.next_at(OffsetDateTime::now_utc())
    }

    /// Allocate an id for the given instant.
    pub fn next_at(&mut self, now: OffsetDateTime) -> TaskId {
        let millis = now.unix_timestamp_nanos() / 1_000_000;
        let candidate = u64::try_from(millis).unwrap_or(0);
        let id = match self.last {
            Some(last) if candidate <= last.0 => TaskId(last.0.saturating_add(1)),
            _ => TaskId(candidate),
        };
        self.last = Some(id);
        id
    }

    /// Most recently issued id.
    #[must_use]
    pub const fn last(&self) -> Option<TaskId> {
        self.last
    }
}
