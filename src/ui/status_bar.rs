use crate::app::state::{AppState, FocusPanel};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    parts.push(Span::styled(
        " [crabcart] ",
        Style::default().fg(Theme::ACCENT_TEAL).bg(Color::DarkGray),
    ));

    // Transient status message wins over the summary
    let summary = match state.status_message {
        Some(ref msg) => format!(" {} ", msg),
        None => {
            if state.cart.is_empty() {
                format!(" Products: {} ", state.products.len())
            } else {
                format!(
                    " Products: {} | Cart: {} items ({}) ",
                    state.products.len(),
                    state.cart_item_count(),
                    state.format_price(state.cart_total()),
                )
            }
        }
    };
    parts.push(Span::styled(summary, Theme::status_bar()));

    // Focus indicator
    let focus_name = match state.focus {
        FocusPanel::Catalog => "CATALOG",
        FocusPanel::Cart => "CART",
    };
    // Pad to fill remaining space
    let used: usize = parts
        .iter()
        .map(|s| UnicodeWidthStr::width(s.content.as_ref()))
        .sum();
    let remaining = (area.width as usize).saturating_sub(used + focus_name.len() + 3);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        format!(" [{}] ", focus_name),
        Style::default().fg(Theme::ACCENT_TEAL).bg(Color::DarkGray),
    ));

    let line = Line::from(parts);
    let paragraph = Paragraph::new(line);
    frame.render_widget(paragraph, area);
}
