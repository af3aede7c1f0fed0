use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use tasklist_app::RowView;

use super::super::constants::TASK_LIST_HIGHLIGHT_SYMBOL;
use super::super::view::{InputMode, Ui};
use super::util::checkbox_marker;

impl Ui {
    pub(in crate::tui) fn draw_task_list(&self, f: &mut Frame<'_>, area: Rect) {
        let items = if self.selection.has_visible_tasks() {
            self.view.rows.iter().map(|row| self.row_item(row)).collect()
        } else {
            vec![ListItem::new(Line::from(Span::styled(
                "タスクがありません",
                Style::default().fg(Color::DarkGray),
            )))]
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .title(self.view.filter_label)
                    .borders(Borders::ALL),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(TASK_LIST_HIGHLIGHT_SYMBOL);
        let mut state = ListState::default();
        if self.selection.has_visible_tasks() {
            state.select(Some(self.selection.selected_index()));
        }
        f.render_stateful_widget(list, area, &mut state);
    }

    fn row_item<'a>(&'a self, row: &'a RowView) -> ListItem<'a> {
        let checkbox_style = if row.checkbox_enabled {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let text = if self.mode == InputMode::EditTask(row.id) {
            Span::styled(
                format!("{}▏", self.edit_buffer),
                Style::default().fg(Color::Yellow),
            )
        } else if row.text_editable {
            Span::raw(row.text.as_str())
        } else {
            let mut style = Style::default().fg(Color::DarkGray);
            if row.checked {
                style = style.add_modifier(Modifier::CROSSED_OUT);
            }
            Span::styled(row.text.as_str(), style)
        };

        let action_style = if row.removed {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red)
        };

        ListItem::new(Line::from(vec![
            Span::styled(checkbox_marker(row.checked), checkbox_style),
            Span::raw(" "),
            text,
            Span::raw("  "),
            Span::styled(format!("({})", row.action_label), action_style),
        ]))
    }
}
