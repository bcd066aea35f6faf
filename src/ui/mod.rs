mod cart;
mod catalog;
mod checkout_dialog;
mod layout;
mod sort_menu;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    catalog::render(frame, app_layout.catalog, state);
    cart::render(frame, app_layout.cart, state);
    status_bar::render(frame, app_layout.status_bar, state);

    // Modals draw over the panels and capture input while visible
    sort_menu::render(frame, state);
    checkout_dialog::render(frame, state);
}
