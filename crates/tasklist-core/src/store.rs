use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::filter::{FilterCounts, FilterMode};
use crate::id::{TaskId, TaskIdAllocator};
use crate::task::Task;

/// A single state transition of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Append a task with the given text.
    Add {
        /// Text as typed.
        text: String,
    },
    /// Switch the display mode.
    SetFilter {
        /// New mode.
        mode: FilterMode,
    },
    /// Overwrite a task's text.
    SetText {
        /// Target task.
        id: TaskId,
        /// New text.
        text: String,
    },
    /// Overwrite a task's completion flag.
    SetChecked {
        /// Target task.
        id: TaskId,
        /// New flag value.
        checked: bool,
    },
    /// Move a task into or out of the trash.
    SetRemoved {
        /// Target task.
        id: TaskId,
        /// New flag value.
        removed: bool,
    },
    /// Drop every trashed task.
    Purge,
}

/// Result of applying an [`Action`] in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A task was appended.
    Added(TaskId),
    /// The filter mode was replaced.
    FilterSet,
    /// A field update; `false` when no task had the id.
    Updated(bool),
    /// Number of tasks erased by a purge.
    Purged(usize),
}

/// Ordered task collection plus the selected filter mode.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    filter: FilterMode,
    ids: TaskIdAllocator,
}

impl PartialEq for TaskList {
    fn eq(&self, other: &Self) -> bool {
        self.tasks == other.tasks && self.filter == other.filter
    }
}

impl Eq for TaskList {}

impl TaskList {
    /// Empty list showing [`FilterMode::All`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty list starting in the given mode.
    #[must_use]
    pub fn with_filter(filter: FilterMode) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// All tasks in insertion order, trashed ones included.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Currently selected mode.
    #[must_use]
    pub const fn filter(&self) -> FilterMode {
        self.filter
    }

    /// Number of stored tasks, trashed ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when no task is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Look up a task by id.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// True when at least one task sits in the trash.
    #[must_use]
    pub fn has_removed(&self) -> bool {
        self.tasks.iter().any(|task| task.removed)
    }

    /// Tasks matching the current mode, in insertion order.
    pub fn visible(&self) -> impl Iterator<Item = &Task> + '_ {
        self.visible_in(self.filter)
    }

    /// Tasks matching `mode`, in insertion order.
    pub fn visible_in(&self, mode: FilterMode) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(move |task| mode.matches(task))
    }

    /// Per-mode counts.
    #[must_use]
    pub fn counts(&self) -> FilterCounts {
        FilterCounts::tally(&self.tasks)
    }

    /// Append a new task.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyText`] when `text` is blank; nothing is changed then.
    pub fn add(&mut self, text: impl Into<String>) -> Result<TaskId, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let id = self.ids.next_id();
        self.tasks.push(Task::new(id, text));
        Ok(id)
    }

    /// Replace the display mode.
    pub const fn set_filter(&mut self, mode: FilterMode) {
        self.filter = mode;
    }

    /// Overwrite the text of task `id`. Returns false when no task matched.
    pub fn set_text(&mut self, id: TaskId, text: impl Into<String>) -> bool {
        let text = text.into();
        self.replace(id, |task| task.with_text(text))
    }

    /// Overwrite the completion flag of task `id`. Returns false when no task matched.
    pub fn set_checked(&mut self, id: TaskId, checked: bool) -> bool {
        self.replace(id, |task| task.with_checked(checked))
    }

    /// Overwrite the trash flag of task `id`. Returns false when no task matched.
    pub fn set_removed(&mut self, id: TaskId, removed: bool) -> bool {
        self.replace(id, |task| task.with_removed(removed))
    }

    /// Erase every trashed task and return how many were dropped.
    pub fn purge(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.removed);
        before - self.tasks.len()
    }

    /// Apply an action in place.
    ///
    /// # Errors
    /// Only [`Action::Add`] can fail, with [`ValidationError::EmptyText`].
    pub fn apply(&mut self, action: Action) -> Result<Applied, ValidationError> {
        let applied = match action {
            Action::Add { text } => Applied::Added(self.add(text)?),
            Action::SetFilter { mode } => {
                self.set_filter(mode);
                Applied::FilterSet
            }
            Action::SetText { id, text } => Applied::Updated(self.set_text(id, text)),
            Action::SetChecked { id, checked } => Applied::Updated(self.set_checked(id, checked)),
            Action::SetRemoved { id, removed } => Applied::Updated(self.set_removed(id, removed)),
            Action::Purge => Applied::Purged(self.purge()),
        };
        Ok(applied)
    }

    fn replace<F>(&mut self, id: TaskId, update: F) -> bool
    where
        F: FnOnce(&Task) -> Task,
    {
        let Some(slot) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return false;
        };
        *slot = update(slot);
        true
    }
}

/// Pure transition: the list that results from applying `action` to `state`.
///
/// # Errors
/// Returns [`ValidationError::EmptyText`] for a blank [`Action::Add`]; `state` is untouched either way.
pub fn reduce(state: &TaskList, action: Action) -> Result<TaskList, ValidationError> {
    let mut next = state.clone();
    next.apply(action)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok<T, E: std::fmt::Display>(result: Result<T, E>, context: &str) -> T {
        result.unwrap_or_else(|err| panic!("{context}: {err}"))
    }

    fn texts<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<&'a str> {
        tasks.map(|task| task.text.as_str()).collect()
    }

    #[test]
    fn add_appends_fresh_task_with_untrimmed_text() {
        let mut list = TaskList::new();
        let id = ok(list.add("  buy milk "), "add");
        assert_eq!(
            list.tasks(),
            &[Task {
                id,
                text: "  buy milk ".into(),
                checked: false,
                removed: false,
            }]
        );
    }

    #[test]
    fn add_rejects_blank_text_without_mutation() {
        let mut list = TaskList::new();
        ok(list.add("keep"), "add");
        let before = list.clone();
        for blank in ["", "   ", "\t\n"] {
            assert_eq!(list.add(blank), Err(ValidationError::EmptyText));
        }
        assert_eq!(list, before);
    }

    #[test]
    fn updates_on_unknown_id_are_noops() {
        let mut list = TaskList::new();
        ok(list.add("a"), "add");
        let before = list.clone();
        let missing = TaskId(0);
        assert!(!list.set_text(missing, "x"));
        assert!(!list.set_checked(missing, true));
        assert!(!list.set_removed(missing, true));
        assert_eq!(list, before);
    }

    #[test]
    fn update_touches_only_the_target() {
        let mut list = TaskList::new();
        let a = ok(list.add("a"), "add a");
        let b = ok(list.add("b"), "add b");
        assert!(list.set_text(b, "bee"));
        assert!(list.set_checked(a, true));
        assert_eq!(texts(list.tasks().iter()), vec!["a", "bee"]);
        assert_eq!(list.get(a).map(|t| t.checked), Some(true));
        assert_eq!(list.get(b).map(|t| t.checked), Some(false));
    }

    #[test]
    fn store_applies_checked_even_when_removed() {
        let mut list = TaskList::new();
        let id = ok(list.add("a"), "add");
        list.set_removed(id, true);
        assert!(list.set_checked(id, true));
        assert_eq!(
            list.get(id).map(|t| (t.checked, t.removed)),
            Some((true, true))
        );
    }

    #[test]
    fn purge_keeps_relative_order_and_is_idempotent() {
        let mut list = TaskList::new();
        let ids: Vec<TaskId> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|text| ok(list.add(text), "add"))
            .collect();
        list.set_removed(ids[0], true);
        list.set_removed(ids[2], true);
        assert!(list.has_removed());

        assert_eq!(list.purge(), 2);
        let once = list.clone();
        assert_eq!(list.purge(), 0);
        assert_eq!(list, once);
        assert_eq!(texts(list.tasks().iter()), vec!["b", "d"]);
        assert!(!list.has_removed());
    }

    #[test]
    fn visible_follows_mode() {
        let mut list = TaskList::new();
        let a = ok(list.add("a"), "add a");
        let b = ok(list.add("b"), "add b");
        ok(list.add("c"), "add c");
        list.set_checked(a, true);
        list.set_removed(b, true);

        assert_eq!(texts(list.visible()), vec!["a", "c"]);
        list.set_filter(FilterMode::Checked);
        assert_eq!(texts(list.visible()), vec!["a"]);
        list.set_filter(FilterMode::Unchecked);
        assert_eq!(texts(list.visible()), vec!["c"]);
        list.set_filter(FilterMode::Removed);
        assert_eq!(texts(list.visible()), vec!["b"]);
    }

    #[test]
    fn apply_reports_outcome() {
        let mut list = TaskList::new();
        let Applied::Added(id) = ok(list.apply(Action::Add { text: "a".into() }), "add") else {
            panic!("add must report the new id");
        };
        assert_eq!(
            list.apply(Action::SetRemoved { id, removed: true }),
            Ok(Applied::Updated(true))
        );
        assert_eq!(
            list.apply(Action::SetChecked {
                id: TaskId(1),
                checked: true
            }),
            Ok(Applied::Updated(false))
        );
        assert_eq!(
            list.apply(Action::SetFilter {
                mode: FilterMode::Removed
            }),
            Ok(Applied::FilterSet)
        );
        assert_eq!(list.apply(Action::Purge), Ok(Applied::Purged(1)));
        assert!(list.is_empty());
    }

    #[test]
    fn reduce_leaves_input_untouched() {
        let empty = TaskList::new();
        let next = ok(reduce(&empty, Action::Add { text: "a".into() }), "reduce");
        assert!(empty.is_empty());
        assert_eq!(next.len(), 1);

        assert_eq!(
            reduce(&next, Action::Add { text: " ".into() }),
            Err(ValidationError::EmptyText)
        );
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn action_serializes_with_type_tag() {
        let json = serde_json::to_value(Action::SetChecked {
            id: TaskId(7),
            checked: true,
        })
        .unwrap_or_else(|err| panic!("serialize: {err}"));
        assert_eq!(
            json,
            serde_json::json!({"type": "setChecked", "id": 7, "checked": true})
        );
    }
}
