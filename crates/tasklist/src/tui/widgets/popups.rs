use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::super::constants::{
    NOTICE_POPUP_HEIGHT, NOTICE_POPUP_MIN_WIDTH, NOTICE_POPUP_WIDTH_PERCENT,
};
use super::super::view::Ui;

impl Ui {
    /// Modal notice; any key dismisses it.
    pub(in crate::tui) fn draw_notice_popup(f: &mut Frame<'_>, notice: &str) {
        let popup_area = Self::notice_popup_area(f.area());

        let block = Block::default()
            .title("お知らせ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .style(Style::default().bg(Color::Black));

        let paragraph = Paragraph::new(notice)
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true });

        f.render_widget(Clear, popup_area);
        f.render_widget(paragraph, popup_area);
    }

    pub(in crate::tui) fn notice_popup_area(area: Rect) -> Rect {
        let preferred = area.width.saturating_mul(NOTICE_POPUP_WIDTH_PERCENT) / 100;
        let width = preferred.max(NOTICE_POPUP_MIN_WIDTH).min(area.width);
        let height = NOTICE_POPUP_HEIGHT.min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }
}
