use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tasklist_app::view::{ADD_LABEL, PURGE_LABEL};
use tasklist_core::FilterMode;

use super::super::view::{InputMode, Ui};

impl Ui {
    pub(in crate::tui) fn draw_mode_selector(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans = Vec::new();
        for mode in FilterMode::ALL {
            if !spans.is_empty() {
                spans.push(Span::raw(" | "));
            }
            let text = format!(" {} ({}) ", mode.label(), self.view.counts.get(mode));
            let style = if mode == self.view.filter {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(text, style));
        }

        let selector = Paragraph::new(Line::from(spans))
            .block(Block::default().title("表示").borders(Borders::ALL));
        f.render_widget(selector, area);
    }

    pub(in crate::tui) fn draw_add_form(&self, f: &mut Frame<'_>, area: Rect) {
        let focused = self.mode == InputMode::AddTask;
        let input = self.controller.input();
        let mut spans = vec![Span::raw("> ")];
        if input.is_empty() && !focused {
            spans.push(Span::styled(
                "タスクを入力",
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::raw(input));
        }
        if focused {
            spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
        }
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("[{ADD_LABEL}]"),
            Style::default().add_modifier(Modifier::BOLD),
        ));

        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let form = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title("新しいタスク")
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        f.render_widget(form, area);
    }

    pub(in crate::tui) fn draw_purge_control(&self, f: &mut Frame<'_>, area: Rect) {
        let style = if self.view.purge_enabled {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let control = Paragraph::new(Line::from(Span::styled(format!("[{PURGE_LABEL}]"), style)))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(control, area);
    }
}
