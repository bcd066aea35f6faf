use crate::app::state::{AppState, FocusPanel};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == FocusPanel::Cart;
    let (border_style, border_type) = if focused {
        (Theme::border_focused(), Theme::border_type_focused())
    } else {
        (Theme::border(), Theme::border_type())
    };

    let title = if state.cart.is_empty() {
        " Cart ".to_string()
    } else {
        format!(" Cart ({} items) ", state.cart_item_count())
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

    if state.cart.is_empty() {
        // No lines, no total.
        frame.render_widget(
            Paragraph::new(Span::styled(" Your cart is empty", Theme::muted())),
            inner,
        );
        return;
    }

    // Lines | separator | total | help
    let list_h = (inner.height as usize).saturating_sub(3);
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor: Option<(u16, u16)> = None;

    for (i, line) in state.cart.iter().enumerate().take(list_h) {
        let is_selected = i == state.cart_view.selected;
        let editing = focused && is_selected;

        let qty_text = if editing {
            state.cart_view.qty_input.clone()
        } else {
            line.quantity.to_string()
        };
        let qty_span = Span::styled(
            format!(" {:>4} ", qty_text),
            if editing { Theme::qty_field() } else { Theme::text() },
        );
        if editing {
            // Cursor sits after the quantity digits
            let qty_w = UnicodeWidthStr::width(qty_text.as_str()).max(4) as u16;
            let x = (inner.x + 1 + qty_w).min(inner.right().saturating_sub(1));
            cursor = Some((x, inner.y + i as u16));
        }

        let total_text = state.format_price(line.line_total());
        let name_w = (inner.width as usize)
            .saturating_sub(6 + 3 + UnicodeWidthStr::width(total_text.as_str()) + 2);
        let name: String = if UnicodeWidthStr::width(line.product.name.as_str()) > name_w {
            line.product.name.chars().take(name_w).collect()
        } else {
            line.product.name.clone()
        };
        let pad = (inner.width as usize).saturating_sub(
            6 + 3
                + UnicodeWidthStr::width(name.as_str())
                + UnicodeWidthStr::width(total_text.as_str())
                + 1,
        );

        let name_style = if is_selected {
            Style::default()
                .fg(Theme::ACCENT_TEAL)
                .add_modifier(Modifier::BOLD)
        } else {
            Theme::text()
        };

        lines.push(Line::from(vec![
            qty_span,
            Span::styled("x ", Theme::help_text()),
            Span::styled(name, name_style),
            Span::raw(" ".repeat(pad)),
            Span::styled(total_text, Theme::price()),
        ]));
    }

    let list_area = Rect::new(inner.x, inner.y, inner.width, list_h as u16);
    frame.render_widget(Paragraph::new(lines), list_area);

    if let Some((x, y)) = cursor {
        frame.set_cursor_position((x, y));
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

    // Total, right-aligned
    let total_text = format!("Total: {} ", state.format_price(state.cart_total()));
    let total_area = Rect::new(inner.x, inner.y + list_h as u16 + 1, inner.width, 1);
    let pad = (inner.width as usize).saturating_sub(UnicodeWidthStr::width(total_text.as_str()));
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" ".repeat(pad)),
            Span::styled(total_text, Theme::total()),
        ])),
        total_area,
    );

    // Keybinding help
    let help_area = Rect::new(inner.x, inner.y + list_h as u16 + 2, inner.width, 1);
    let help = Line::from(vec![
        Span::styled(" 0-9", Theme::help_key()),
        Span::styled(" Quantity  ", Theme::help_text()),
        Span::styled("Enter", Theme::help_key()),
        Span::styled(" Checkout", Theme::help_text()),
    ]);
    frame.render_widget(Paragraph::new(help), help_area);
}
