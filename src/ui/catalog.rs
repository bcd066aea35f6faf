use crate::app::state::{AppState, FocusPanel, SortOption};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const PRICE_COL: usize = 12;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Catalog;
    let (border_style, border_type) = if focused {
        (Theme::border_focused(), Theme::border_type_focused())
    } else {
        (Theme::border(), Theme::border_type())
    };

    let title = match state.catalog.sort {
        SortOption::Unsorted => format!(" Products ({}) ", state.products.len()),
        sort => format!(" Products ({}) · {} ", state.products.len(), sort.label()),
    };

    let block = Block::default()
        .title(title)
        .title_style(if focused { Theme::title() } else { Theme::border() })
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 3 || inner.width < 16 {
        return;
    }

    // Bottom two rows: separator + selected product description
    let list_h = (inner.height as usize).saturating_sub(2);
    let list_area = Rect::new(inner.x, inner.y, inner.width.saturating_sub(1), list_h as u16);

    if state.products.is_empty() {
        frame.render_widget(Paragraph::new(Span::styled(" —", Theme::muted())), list_area);
    } else {
        let start = state.catalog.scroll_offset;
        let end = (start + list_h).min(state.products.len());
        let name_w = (list_area.width as usize).saturating_sub(PRICE_COL + 3);

        let mut lines: Vec<Line> = Vec::new();
        for (i, product) in state.products.iter().enumerate().take(end).skip(start) {
            let is_selected = i == state.catalog.selected;
            let name = truncate_to_width(&product.name, name_w);
            let price = state.format_price(product.price);
            let pad = (list_area.width as usize)
                .saturating_sub(2 + UnicodeWidthStr::width(name.as_str()) + PRICE_COL);

            if is_selected {
                let text = format!(
                    " {}{}{:>width$} ",
                    name,
                    " ".repeat(pad),
                    price,
                    width = PRICE_COL
                );
                let style = if focused {
                    Theme::selection()
                } else {
                    Style::default()
                        .fg(Theme::ACCENT_TEAL)
                        .add_modifier(Modifier::BOLD)
                };
                lines.push(Line::from(Span::styled(text, style)));
            } else {
                lines.push(Line::from(vec![
                    Span::styled(format!(" {}", name), Theme::text()),
                    Span::raw(" ".repeat(pad)),
                    Span::styled(format!("{:>width$} ", price, width = PRICE_COL), Theme::price()),
                ]));
            }
        }
        frame.render_widget(Paragraph::new(lines), list_area);

        // Scrollbar
        if state.products.len() > list_h {
            let scrollbar_area = Rect::new(
                inner.x + inner.width.saturating_sub(1),
                inner.y,
                1,
                list_h as u16,
            );
            let mut scrollbar_state =
                ScrollbarState::new(state.products.len().saturating_sub(list_h))
                    .position(state.catalog.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                scrollbar_area,
                &mut scrollbar_state,
            );
        }
    }

    // Separator
    let sep_area = Rect::new(inner.x, inner.y + list_h as u16, inner.width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(
            "─".repeat(inner.width as usize),
            Style::default().fg(Theme::BORDER_DIM),
        )),
        sep_area,
    );

    // Selected product description
    let desc_area = Rect::new(inner.x, inner.y + list_h as u16 + 1, inner.width, 1);
    let desc = state
        .selected_product()
        .map(|p| truncate_to_width(&p.description, (inner.width as usize).saturating_sub(2)))
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {}", desc), Theme::help_text())),
        desc_area,
    );
}

/// Truncate to a display width, appending an ellipsis when the text was
/// cut.
fn truncate_to_width(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    let mut width = 0usize;
    let mut out = String::new();
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate_to_width("espresso", 20), "espresso");
        assert_eq!(truncate_to_width("espresso machine", 9), "espresso…");
        assert_eq!(truncate_to_width("ラテマシン", 5), "ラテ…");
    }
}
