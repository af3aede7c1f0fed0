use tasklist_core::{Action, Applied, FilterMode, TaskId, TaskList, ValidationError};
use tracing::{debug, info};

use crate::view::{EMPTY_TEXT_NOTICE, ListView};

/// Owner of every piece of mutable session state.
///
/// Front ends hold one controller and route user input through it; nothing
/// else touches the task list.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    list: TaskList,
    input: String,
    notice: Option<&'static str>,
}

impl Controller {
    /// Start an empty session in `filter` mode.
    #[must_use]
    pub fn new(filter: FilterMode) -> Self {
        Self {
            list: TaskList::with_filter(filter),
            input: String::new(),
            notice: None,
        }
    }

    /// Underlying task list.
    #[must_use]
    pub const fn list(&self) -> &TaskList {
        &self.list
    }

    /// Current mode.
    #[must_use]
    pub const fn filter(&self) -> FilterMode {
        self.list.filter()
    }

    /// Pending text of the add form.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the pending text.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Append a character to the pending text.
    pub fn push_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Drop the last character of the pending text.
    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Blocking notice raised by the last failed submit, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    /// Acknowledge and clear the notice.
    pub const fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Add a task from the pending text and clear it.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyText`] when the pending text is blank. The
    /// pending text and the list are kept as they were and the notice is raised.
    pub fn submit(&mut self) -> Result<TaskId, ValidationError> {
        let id = self.add(self.input.clone())?;
        self.input.clear();
        Ok(id)
    }

    /// Add a task directly, bypassing the pending text.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyText`] when `text` is blank.
    pub fn add(&mut self, text: impl Into<String>) -> Result<TaskId, ValidationError> {
        match self.list.add(text) {
            Ok(id) => {
                self.log_applied(Applied::Added(id));
                Ok(id)
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Switch the display mode.
    pub fn set_filter(&mut self, mode: FilterMode) {
        self.dispatch_total(Action::SetFilter { mode });
    }

    /// Overwrite the text of a task. Returns false for an unknown id.
    pub fn edit_text(&mut self, id: TaskId, text: impl Into<String>) -> bool {
        updated(self.dispatch_total(Action::SetText {
            id,
            text: text.into(),
        }))
    }

    /// Set the completion flag of a task. Returns false for an unknown id.
    pub fn set_checked(&mut self, id: TaskId, checked: bool) -> bool {
        updated(self.dispatch_total(Action::SetChecked { id, checked }))
    }

    /// Move a task into or out of the trash. Returns false for an unknown id.
    pub fn set_removed(&mut self, id: TaskId, removed: bool) -> bool {
        updated(self.dispatch_total(Action::SetRemoved { id, removed }))
    }

    /// Flip the completion flag, as the row checkbox does.
    pub fn toggle_checked(&mut self, id: TaskId) -> bool {
        let Some(checked) = self.list.get(id).map(|task| task.checked) else {
            debug!(%id, "toggle_checked on unknown task");
            return false;
        };
        self.set_checked(id, !checked)
    }

    /// Flip the trash flag, as the delete/restore control does.
    pub fn toggle_removed(&mut self, id: TaskId) -> bool {
        let Some(removed) = self.list.get(id).map(|task| task.removed) else {
            debug!(%id, "toggle_removed on unknown task");
            return false;
        };
        self.set_removed(id, !removed)
    }

    /// Erase the trash. Returns the number of tasks dropped.
    pub fn purge(&mut self) -> usize {
        match self.dispatch_total(Action::Purge) {
            Applied::Purged(count) => count,
            _ => 0,
        }
    }

    /// Snapshot of what the page should display.
    #[must_use]
    pub fn view(&self) -> ListView {
        ListView::build(&self.list)
    }

    /// Apply any action, recording the notice on validation failure.
    ///
    /// # Errors
    /// Propagates [`ValidationError`] from the list.
    pub fn dispatch(&mut self, action: Action) -> Result<Applied, ValidationError> {
        debug!(?action, "dispatch");
        match self.list.apply(action) {
            Ok(applied) => {
                self.log_applied(applied);
                Ok(applied)
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    fn reject(&mut self, err: ValidationError) -> ValidationError {
        debug!(%err, "action rejected");
        self.notice = Some(EMPTY_TEXT_NOTICE);
        err
    }

    fn dispatch_total(&mut self, action: Action) -> Applied {
        // Only `Add` can fail, and it never goes through here.
        self.dispatch(action).unwrap_or(Applied::Updated(false))
    }

    fn log_applied(&mut self, applied: Applied) {
        match applied {
            Applied::Added(id) => {
                self.notice = None;
                debug!(%id, total = self.list.len(), "task added");
            }
            Applied::FilterSet => debug!(filter = %self.list.filter(), "filter changed"),
            Applied::Updated(false) => debug!("update matched no task"),
            Applied::Updated(true) => {}
            Applied::Purged(count) => info!(count, remaining = self.list.len(), "trash purged"),
        }
    }
}

const fn updated(applied: Applied) -> bool {
    matches!(applied, Applied::Updated(true))
}
