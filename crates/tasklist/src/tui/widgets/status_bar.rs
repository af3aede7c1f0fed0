use std::borrow::Cow;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::super::constants::STATUS_TASK_TEXT_MAX_GRAPHEMES;
use super::super::view::{InputMode, Message, Ui};
use super::util::{format_created_at, truncate_with_ellipsis};
use crate::config::ViewType;

impl Ui {
    pub(in crate::tui) fn draw_status(&self, f: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(Self::status_layout_constraints())
            .split(area);

        let instructions = Paragraph::new(self.instructions())
            .block(Block::default().title("操作").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(instructions, rows[0]);

        let message = Paragraph::new(self.status_text())
            .block(Block::default().title("ステータス").borders(Borders::ALL))
            .style(self.status_style());
        f.render_widget(message, rows[1]);
    }

    pub(in crate::tui) const fn status_layout_constraints() -> [Constraint; 2] {
        [
            Constraint::Length(Self::INSTRUCTIONS_HEIGHT),
            Constraint::Min(Self::STATUS_MESSAGE_MIN_HEIGHT),
        ]
    }

    pub(in crate::tui) fn instructions(&self) -> String {
        let view_type = match self.mode {
            InputMode::Browse => ViewType::Browse,
            InputMode::AddTask | InputMode::EditTask(_) => ViewType::Input,
        };
        self.keybindings.generate_help_text(view_type)
    }

    pub(in crate::tui) fn status_text(&self) -> Cow<'_, str> {
        if let Some(msg) = &self.message {
            return Cow::Borrowed(msg.text.as_str());
        }
        self.selected_row().map_or(
            Cow::Borrowed("ステータスメッセージはありません"),
            |row| {
                let text = truncate_with_ellipsis(&row.text, STATUS_TASK_TEXT_MAX_GRAPHEMES);
                let created = format_created_at(row.id).unwrap_or_else(|| row.id.to_string());
                Cow::Owned(format!("選択中: {text} (作成: {created})"))
            },
        )
    }

    fn status_style(&self) -> Style {
        self.message.as_ref().map_or_else(Style::default, Message::style)
    }
}
