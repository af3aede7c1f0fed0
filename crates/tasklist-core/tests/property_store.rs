#![cfg(feature = "property-tests")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;

use tasklist_core::{FilterMode, TaskId, TaskList, ValidationError};

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Check(usize, bool),
    Remove(usize, bool),
    Edit(usize, String),
    Purge,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(Op::Add),
        (0usize..16, any::<bool>()).prop_map(|(i, v)| Op::Check(i, v)),
        (0usize..16, any::<bool>()).prop_map(|(i, v)| Op::Remove(i, v)),
        (0usize..16, "[a-z]{1,8}").prop_map(|(i, t)| Op::Edit(i, t)),
        Just(Op::Purge),
    ]
}

fn mode_strategy() -> impl Strategy<Value = FilterMode> {
    prop_oneof![
        Just(FilterMode::All),
        Just(FilterMode::Checked),
        Just(FilterMode::Unchecked),
        Just(FilterMode::Removed),
    ]
}

fn pick(list: &TaskList, index: usize) -> TaskId {
    list.tasks()
        .get(index)
        .map_or(TaskId(u64::MAX), |task| task.id)
}

fn run(ops: &[Op]) -> TaskList {
    let mut list = TaskList::new();
    for op in ops {
        match op {
            Op::Add(text) => {
                let _ = list.add(text.clone());
            }
            Op::Check(i, v) => {
                list.set_checked(pick(&list, *i), *v);
            }
            Op::Remove(i, v) => {
                list.set_removed(pick(&list, *i), *v);
            }
            Op::Edit(i, text) => {
                list.set_text(pick(&list, *i), text.clone());
            }
            Op::Purge => {
                list.purge();
            }
        }
    }
    list
}

proptest! {
    #[test]
    fn add_appends_exactly_one_task(ops in prop::collection::vec(op_strategy(), 0..32), text in "[a-z]{1,6}( [a-z]{1,6}){0,3}") {
        let mut list = run(&ops);
        let before = list.tasks().to_vec();
        let id = list.add(text.clone()).unwrap();

        prop_assert_eq!(list.len(), before.len() + 1);
        prop_assert_eq!(&list.tasks()[..before.len()], &before[..]);
        let added = list.tasks().last().unwrap();
        prop_assert_eq!(added.id, id);
        prop_assert_eq!(&added.text, &text);
        prop_assert!(!added.checked && !added.removed);
        prop_assert!(before.iter().all(|task| task.id != id));
    }

    #[test]
    fn blank_add_is_rejected(ops in prop::collection::vec(op_strategy(), 0..32), blank in "[ \t\n]{0,6}") {
        let mut list = run(&ops);
        let before = list.clone();
        prop_assert_eq!(list.add(blank), Err(ValidationError::EmptyText));
        prop_assert_eq!(list, before);
    }

    #[test]
    fn purge_is_idempotent(ops in prop::collection::vec(op_strategy(), 0..48)) {
        let mut once = run(&ops);
        once.purge();
        let mut twice = once.clone();
        twice.purge();
        prop_assert_eq!(once.tasks(), twice.tasks());
        prop_assert!(!once.has_removed());
    }

    #[test]
    fn ids_stay_unique(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let list = run(&ops);
        let mut ids: Vec<TaskId> = list.tasks().iter().map(|task| task.id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }

    #[test]
    fn projection_matches_manual_filter(ops in prop::collection::vec(op_strategy(), 0..48), mode in mode_strategy()) {
        let mut list = run(&ops);
        list.set_filter(mode);
        let expected: Vec<TaskId> = list
            .tasks()
            .iter()
            .filter(|task| match mode {
                FilterMode::All => !task.removed,
                FilterMode::Checked => task.checked && !task.removed,
                FilterMode::Unchecked => !task.checked && !task.removed,
                FilterMode::Removed => task.removed,
            })
            .map(|task| task.id)
            .collect();
        let actual: Vec<TaskId> = list.visible().map(|task| task.id).collect();
        prop_assert_eq!(actual, expected);
    }
}
