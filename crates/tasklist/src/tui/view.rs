use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
};
use tasklist_app::{Controller, ListView, RowView};
use tasklist_core::TaskId;

use super::constants::UI_MESSAGE_TTL_SECS;
use super::selection::Selection;
use crate::config::KeyBindingsConfig;

/// What keystrokes currently feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum InputMode {
    /// Moving through the list.
    Browse,
    /// Typing into the add form.
    AddTask,
    /// Rewriting the text of one task.
    EditTask(TaskId),
}

pub(super) struct Ui {
    pub(super) controller: Controller,
    /// Snapshot of the page, refreshed after every change.
    pub(super) view: ListView,
    pub(super) selection: Selection,
    pub(super) mode: InputMode,
    pub(super) edit_buffer: String,
    pub(super) message: Option<Message>,
    pub(super) should_quit: bool,
    pub(super) keybindings: KeyBindingsConfig,
}

impl Ui {
    pub(super) const HEADER_HEIGHT: u16 = 3;
    pub(super) const FORM_HEIGHT: u16 = 3;
    pub(super) const MAIN_MIN_HEIGHT: u16 = 5;
    pub(super) const INSTRUCTIONS_HEIGHT: u16 = 3;
    pub(super) const STATUS_MESSAGE_MIN_HEIGHT: u16 = 3;
    pub(super) const STATUS_FOOTER_MIN_HEIGHT: u16 =
        Self::INSTRUCTIONS_HEIGHT + Self::STATUS_MESSAGE_MIN_HEIGHT;

    pub(super) fn new(controller: Controller, keybindings: KeyBindingsConfig) -> Self {
        let view = controller.view();
        let mut selection = Selection::default();
        selection.rebuild(&view, None);
        Self {
            controller,
            view,
            selection,
            mode: InputMode::Browse,
            edit_buffer: String::new(),
            message: None,
            should_quit: false,
            keybindings,
        }
    }

    /// Rebuild the page after a change, keeping `keep` selected if it is still shown.
    pub(super) fn refresh(&mut self, keep: Option<TaskId>) {
        self.view = self.controller.view();
        self.selection.rebuild(&self.view, keep);
    }

    pub(super) fn selected_row(&self) -> Option<&RowView> {
        self.view.rows.get(self.selection.selected_index())
    }

    pub(super) fn selected_task_id(&self) -> Option<TaskId> {
        self.selection.selected_id()
    }

    /// The second band holds the add form or the purge control, whichever this mode offers.
    pub(super) const fn has_form_band(&self) -> bool {
        self.view.show_add_form || self.view.show_purge
    }

    pub(super) fn draw(&self, f: &mut Frame<'_>) {
        let size = f.area();
        let form_height = if self.has_form_band() { Self::FORM_HEIGHT } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Self::HEADER_HEIGHT),
                Constraint::Length(form_height),
                Constraint::Min(Self::MAIN_MIN_HEIGHT),
                Constraint::Length(Self::STATUS_FOOTER_MIN_HEIGHT),
            ])
            .split(size);

        self.draw_mode_selector(f, chunks[0]);
        if self.view.show_add_form {
            self.draw_add_form(f, chunks[1]);
        } else if self.view.show_purge {
            self.draw_purge_control(f, chunks[1]);
        }
        self.draw_task_list(f, chunks[2]);
        self.draw_status(f, chunks[3]);

        if let Some(notice) = self.controller.notice() {
            Self::draw_notice_popup(f, notice);
        }
    }

    pub(super) fn info(&mut self, message: impl Into<String>) {
        self.message = Some(Message::info(message));
    }

    pub(super) fn error(&mut self, message: impl Into<String>) {
        self.message = Some(Message::error(message));
    }

    pub(super) fn tick(&mut self) {
        if let Some(msg) = &self.message
            && msg.is_expired(Duration::from_secs(UI_MESSAGE_TTL_SECS))
        {
            self.message = None;
        }
    }
}

pub(super) struct Message {
    pub(super) text: String,
    pub(super) level: MessageLevel,
    created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MessageLevel {
    Info,
    Error,
}

impl Message {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Info,
            created_at: Instant::now(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Error,
            created_at: Instant::now(),
        }
    }

    pub(super) fn style(&self) -> Style {
        match self.level {
            MessageLevel::Info => Style::default().fg(Color::Green),
            MessageLevel::Error => Style::default().fg(Color::Red),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}
