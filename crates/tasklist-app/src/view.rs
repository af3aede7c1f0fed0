//! Presentation rules shared by the front ends.
//!
//! Which controls are shown or enabled is decided here, from the task flags
//! and the current mode, so the script runner and the TUI cannot drift apart.

use serde::Serialize;
use tasklist_core::{FilterCounts, FilterMode, Task, TaskId, TaskList};

/// Label of the row action that trashes a task.
pub const DELETE_LABEL: &str = "削除";
/// Label of the row action that takes a task out of the trash.
pub const RESTORE_LABEL: &str = "復元";
/// Label of the add form submit control.
pub const ADD_LABEL: &str = "追加";
/// Label of the purge control.
pub const PURGE_LABEL: &str = "ゴミ箱を空にする";
/// Blocking notice shown when an empty task is submitted.
pub const EMPTY_TEXT_NOTICE: &str = "タスクを入力してください";

/// One rendered task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub id: TaskId,
    pub text: String,
    pub checked: bool,
    pub removed: bool,
    /// The text field accepts edits.
    pub text_editable: bool,
    /// The checkbox accepts toggles.
    pub checkbox_enabled: bool,
    /// Caption of the delete/restore control.
    pub action_label: &'static str,
}

impl RowView {
    /// Build the row for `task`.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            text: task.text.clone(),
            checked: task.checked,
            removed: task.removed,
            text_editable: !task.checked && !task.removed,
            checkbox_enabled: !task.removed,
            action_label: if task.removed { RESTORE_LABEL } else { DELETE_LABEL },
        }
    }
}

/// Everything a front end needs to draw the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub filter: FilterMode,
    pub filter_label: &'static str,
    pub rows: Vec<RowView>,
    pub counts: FilterCounts,
    /// The add form is visible.
    pub show_add_form: bool,
    /// The purge control is visible.
    pub show_purge: bool,
    /// The purge control is enabled.
    pub purge_enabled: bool,
}

impl ListView {
    /// Project `list` through its current mode.
    #[must_use]
    pub fn build(list: &TaskList) -> Self {
        let filter = list.filter();
        Self {
            filter,
            filter_label: filter.label(),
            rows: list.visible().map(RowView::from_task).collect(),
            counts: list.counts(),
            show_add_form: shows_add_form(filter),
            show_purge: filter == FilterMode::Removed,
            purge_enabled: filter == FilterMode::Removed && list.has_removed(),
        }
    }

    /// Row at a 1-based position, as referenced by `#N`.
    #[must_use]
    pub fn row(&self, position: usize) -> Option<&RowView> {
        position.checked_sub(1).and_then(|index| self.rows.get(index))
    }
}

/// The add form is offered in the modes where a new (unchecked, live) task would be visible.
#[must_use]
pub const fn shows_add_form(mode: FilterMode) -> bool {
    matches!(mode, FilterMode::All | FilterMode::Unchecked)
}
