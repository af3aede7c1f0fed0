pub(super) mod header;
pub(super) mod popups;
pub(super) mod status_bar;
pub(super) mod task_list;
pub(super) mod util;
