use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn render(frame: &mut Frame, state: &AppState) {
    let Some(ref notice) = state.checkout_notice else {
        return;
    };

    let area = frame.area();
    let popup_w = 44u16.min(area.width.saturating_sub(4));
    let popup_h = 8u16.min(area.height.saturating_sub(2));
    let popup_x = (area.width.saturating_sub(popup_w)) / 2;
    let popup_y = (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Checkout ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Style::default().fg(Theme::ACCENT_GREEN))
        .style(Style::default().bg(Theme::BG_SURFACE));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Checkout successful!",
            Style::default()
                .fg(Theme::ACCENT_GREEN)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(Span::styled(
            format!(
                "{} {} cleared for {}",
                notice.line_count,
                if notice.line_count == 1 { "line" } else { "lines" },
                state.format_price(notice.total)
            ),
            Theme::help_text(),
        ))
        .centered(),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Theme::help_key()),
            Span::styled(" Close", Theme::help_text()),
        ])
        .centered(),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
