use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub catalog: Rect,
    pub cart: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: content | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let content = main_chunks[0];
    let status_bar = main_chunks[1];

    // Horizontal: catalog | gap | cart
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([
            Constraint::Percentage(58), // Product catalog
            Constraint::Min(32),        // Cart
        ])
        .split(content);

    AppLayout {
        catalog: h_chunks[0],
        cart: h_chunks[1],
        status_bar,
    }
}
