use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tasklist_core::FilterMode;

use super::view::{InputMode, Ui};
use crate::config::{Action, ViewType};

impl Ui {
    pub(in crate::tui) fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // The notice blocks everything else until acknowledged.
        if self.controller.notice().is_some() {
            self.controller.dismiss_notice();
            return;
        }

        match self.mode {
            InputMode::Browse => self.handle_browse_key(&key),
            InputMode::AddTask | InputMode::EditTask(_) => self.handle_input_key(&key),
        }
    }

    fn handle_browse_key(&mut self, key: &KeyEvent) {
        let bound = |ui: &Self, action: Action| ui.keybindings.matches(ViewType::Browse, action, key);

        if bound(self, Action::Quit) {
            self.should_quit = true;
        } else if bound(self, Action::Down) {
            self.selection.select_next();
        } else if bound(self, Action::Up) {
            self.selection.select_prev();
        } else if bound(self, Action::Add) {
            self.open_add_form();
        } else if bound(self, Action::Edit) {
            self.start_edit();
        } else if bound(self, Action::ToggleChecked) {
            self.toggle_checked();
        } else if bound(self, Action::ToggleRemoved) {
            self.toggle_removed();
        } else if bound(self, Action::NextFilter) {
            self.switch_filter(self.controller.filter().next());
        } else if bound(self, Action::PrevFilter) {
            self.switch_filter(self.controller.filter().prev());
        } else if bound(self, Action::Purge) {
            self.purge();
        }
    }

    fn handle_input_key(&mut self, key: &KeyEvent) {
        if self.keybindings.matches(ViewType::Input, Action::Submit, key) {
            self.submit_input();
            return;
        }

        if self.keybindings.matches(ViewType::Input, Action::Cancel, key) {
            self.mode = InputMode::Browse;
            self.edit_buffer.clear();
            return;
        }

        if self.keybindings.matches(ViewType::Input, Action::DeleteChar, key) {
            match self.mode {
                InputMode::AddTask => self.controller.pop_char(),
                InputMode::EditTask(_) => {
                    self.edit_buffer.pop();
                }
                InputMode::Browse => {}
            }
            return;
        }

        if let KeyCode::Char(ch) = key.code
            && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            match self.mode {
                InputMode::AddTask => self.controller.push_char(ch),
                InputMode::EditTask(_) => self.edit_buffer.push(ch),
                InputMode::Browse => {}
            }
        }
    }

    fn open_add_form(&mut self) {
        if self.view.show_add_form {
            self.mode = InputMode::AddTask;
        } else {
            self.error(format!("「{}」ではタスクを追加できません", self.view.filter_label));
        }
    }

    fn start_edit(&mut self) {
        let Some((id, text, editable)) = self
            .selected_row()
            .map(|row| (row.id, row.text.clone(), row.text_editable))
        else {
            self.error("編集対象のタスクが選択されていません");
            return;
        };
        if !editable {
            self.error("完了済みまたはゴミ箱内のタスクは編集できません");
            return;
        }
        self.edit_buffer = text;
        self.mode = InputMode::EditTask(id);
    }

    fn submit_input(&mut self) {
        match self.mode {
            InputMode::AddTask => {
                // A blank submit raises the controller notice, drawn as a popup.
                if let Ok(id) = self.controller.submit() {
                    self.refresh(Some(id));
                    self.info("タスクを追加しました");
                }
            }
            InputMode::EditTask(id) => {
                let text = std::mem::take(&mut self.edit_buffer);
                self.mode = InputMode::Browse;
                if self.controller.edit_text(id, text) {
                    self.refresh(Some(id));
                    self.info("タスクを更新しました");
                } else {
                    self.error("編集対象のタスクが見つかりません");
                }
            }
            InputMode::Browse => {}
        }
    }

    fn toggle_checked(&mut self) {
        let Some((id, enabled)) = self.selected_row().map(|row| (row.id, row.checkbox_enabled)) else {
            return;
        };
        if !enabled {
            self.error("ゴミ箱内のタスクは完了状態を変更できません");
            return;
        }
        if self.controller.toggle_checked(id) {
            self.refresh(Some(id));
        }
    }

    fn toggle_removed(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let (id, label) = (row.id, row.action_label);
        if self.controller.toggle_removed(id) {
            self.refresh(Some(id));
            self.info(format!("{label}しました"));
        }
    }

    fn switch_filter(&mut self, mode: FilterMode) {
        let keep = self.selected_task_id();
        self.controller.set_filter(mode);
        self.refresh(keep);
    }

    fn purge(&mut self) {
        if !self.view.show_purge {
            self.error("ゴミ箱の表示中のみ空にできます");
            return;
        }
        if !self.view.purge_enabled {
            self.error("ゴミ箱は空です");
            return;
        }
        let count = self.controller.purge();
        self.refresh(None);
        self.info(format!("{count} 件のタスクを完全に削除しました"));
    }
}
