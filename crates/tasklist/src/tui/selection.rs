use tasklist_app::ListView;
use tasklist_core::TaskId;

/// Cursor over the rows of the current view, independent of IO.
#[derive(Debug, Default)]
pub(super) struct Selection {
    visible: Vec<TaskId>,
    selected: usize,
}

#[allow(clippy::missing_const_for_fn)]
impl Selection {
    /// Track the rows of `view`, keeping `preferred` selected when it is still shown.
    pub(super) fn rebuild(&mut self, view: &ListView, preferred: Option<TaskId>) {
        self.visible = view.rows.iter().map(|row| row.id).collect();
        self.selected = self.resolve_selection(preferred);
    }

    fn resolve_selection(&self, preferred: Option<TaskId>) -> usize {
        if self.visible.is_empty() {
            return 0;
        }
        if let Some(id) = preferred
            && let Some(index) = self.visible.iter().position(|&visible| visible == id)
        {
            return index;
        }
        self.selected.min(self.visible.len() - 1)
    }

    pub(super) fn has_visible_tasks(&self) -> bool {
        !self.visible.is_empty()
    }

    pub(super) fn selected_index(&self) -> usize {
        self.selected
    }

    pub(super) fn selected_id(&self) -> Option<TaskId> {
        self.visible.get(self.selected).copied()
    }

    pub(super) fn select_next(&mut self) {
        if self.selected + 1 < self.visible.len() {
            self.selected += 1;
        }
    }

    pub(super) fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_core::TaskList;

    fn list_of(texts: &[&str]) -> (TaskList, Vec<TaskId>) {
        let mut list = TaskList::new();
        let ids = texts
            .iter()
            .map(|text| list.add(*text).unwrap_or_else(|err| panic!("add: {err}")))
            .collect();
        (list, ids)
    }

    #[test]
    fn movement_is_clamped() {
        let (list, ids) = list_of(&["a", "b"]);
        let mut selection = Selection::default();
        selection.rebuild(&ListView::build(&list), None);

        selection.select_prev();
        assert_eq!(selection.selected_id(), Some(ids[0]));
        selection.select_next();
        selection.select_next();
        assert_eq!(selection.selected_index(), 1);
        assert_eq!(selection.selected_id(), Some(ids[1]));
    }

    #[test]
    fn rebuild_follows_preferred_task() {
        let (mut list, ids) = list_of(&["a", "b", "c"]);
        let mut selection = Selection::default();
        selection.rebuild(&ListView::build(&list), Some(ids[2]));
        assert_eq!(selection.selected_index(), 2);

        list.set_removed(ids[0], true);
        selection.rebuild(&ListView::build(&list), Some(ids[2]));
        assert_eq!(selection.selected_index(), 1);
    }

    #[test]
    fn rebuild_clamps_when_selected_task_leaves() {
        let (mut list, ids) = list_of(&["a", "b"]);
        let mut selection = Selection::default();
        selection.rebuild(&ListView::build(&list), Some(ids[1]));

        list.set_removed(ids[1], true);
        selection.rebuild(&ListView::build(&list), Some(ids[1]));
        assert_eq!(selection.selected_id(), Some(ids[0]));

        list.set_removed(ids[0], true);
        selection.rebuild(&ListView::build(&list), None);
        assert!(!selection.has_visible_tasks());
        assert_eq!(selection.selected_id(), None);
    }
}
