use crate::app::state::{AppState, SortOption};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn render(frame: &mut Frame, state: &AppState) {
    if !state.sort_menu.visible {
        return;
    }

    let area = frame.area();
    let popup_w = 40u16.min(area.width.saturating_sub(4));
    let popup_h = (SortOption::ALL.len() as u16 + 4).min(area.height.saturating_sub(2));
    let popup_x = (area.width.saturating_sub(popup_w)) / 2;
    let popup_y = (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Sort ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Style::default().fg(Theme::ACCENT_TEAL))
        .style(Style::default().bg(Theme::BG_SURFACE));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines: Vec<Line> = Vec::new();
    for (i, option) in SortOption::ALL.iter().enumerate() {
        let marker = if *option == state.catalog.sort { "● " } else { "  " };
        let text = format!(" {}{}", marker, option.label());
        let pad = (inner.width as usize).saturating_sub(text.chars().count());
        let style = if i == state.sort_menu.selected {
            Theme::selection()
        } else {
            Theme::text()
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", text, " ".repeat(pad)),
            style,
        )));
    }
    let list_area = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    frame.render_widget(Paragraph::new(lines), list_area);

    // Keybinding help
    let help_area = Rect::new(
        inner.x,
        inner.y + inner.height.saturating_sub(1),
        inner.width,
        1,
    );
    let help = Line::from(vec![
        Span::styled(" ↑↓", Theme::help_key()),
        Span::styled(" Navigate  ", Theme::help_text()),
        Span::styled("Enter", Theme::help_key()),
        Span::styled(" Apply  ", Theme::help_text()),
        Span::styled("Esc", Theme::help_key()),
        Span::styled(" Close", Theme::help_text()),
    ]);
    frame.render_widget(Paragraph::new(help), help_area);
}
