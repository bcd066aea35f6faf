use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::*;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Rows assumed visible in the catalog list when adjusting scroll.
const CATALOG_VIEWPORT: usize = 20;

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::ProductsLoaded(products) => {
            tracing::debug!(count = products.len(), "product listing loaded");
            state.set_products(products);
            vec![]
        }
        AppEvent::ProductsFetchFailed { error } => {
            // The catalog stays empty and nothing is shown to the user.
            tracing::warn!(%error, "product fetch failed; catalog left empty");
            vec![]
        }
        AppEvent::Tick => {
            state.expire_status(Instant::now());
            vec![]
        }
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) => handle_key(state, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    // The checkout dialog captures all input when visible
    if state.checkout_notice.is_some() {
        return handle_checkout_dialog_key(state, key);
    }

    // The sort menu captures all input when visible
    if state.sort_menu.visible {
        return handle_sort_menu_key(state, key);
    }

    // F2 to open the sort menu from anywhere
    if key.code == KeyCode::F(2) {
        state.sort_menu.open(state.catalog.sort);
        return vec![];
    }

    if key.code == KeyCode::Tab {
        state.cycle_focus();
        return vec![];
    }

    match state.focus {
        FocusPanel::Catalog => handle_catalog_key(state, key),
        FocusPanel::Cart => handle_cart_key(state, key),
    }
}

fn handle_sort_menu_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Esc => {
            state.sort_menu.visible = false;
            vec![]
        }
        KeyCode::Up => {
            state.sort_menu.move_up();
            vec![]
        }
        KeyCode::Down => {
            state.sort_menu.move_down();
            vec![]
        }
        KeyCode::Enter => {
            let option = SortOption::ALL[state.sort_menu.selected];
            state.sort_menu.visible = false;
            state.apply_sort(option);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_checkout_dialog_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            state.checkout_notice = None;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_catalog_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let total = state.products.len();
    match key.code {
        KeyCode::Up => {
            state.catalog.move_up();
            state.catalog.ensure_visible(CATALOG_VIEWPORT);
            vec![]
        }
        KeyCode::Down => {
            state.catalog.move_down(total);
            state.catalog.ensure_visible(CATALOG_VIEWPORT);
            vec![]
        }
        KeyCode::PageUp => {
            for _ in 0..state.config.ui.page_jump {
                state.catalog.move_up();
            }
            state.catalog.ensure_visible(CATALOG_VIEWPORT);
            vec![]
        }
        KeyCode::PageDown => {
            for _ in 0..state.config.ui.page_jump {
                state.catalog.move_down(total);
            }
            state.catalog.ensure_visible(CATALOG_VIEWPORT);
            vec![]
        }
        KeyCode::Home => {
            state.catalog.selected = 0;
            state.catalog.scroll_offset = 0;
            vec![]
        }
        KeyCode::End => {
            if total > 0 {
                state.catalog.selected = total - 1;
                state.catalog.ensure_visible(CATALOG_VIEWPORT);
            }
            vec![]
        }
        KeyCode::Enter | KeyCode::Char('a') => {
            if let Some(product) = state.selected_product().cloned() {
                state.add_to_cart(&product);
                state.set_status(format!("Added {} to cart", product.name));
            }
            vec![]
        }
        KeyCode::Char('s') => {
            state.sort_menu.open(state.catalog.sort);
            vec![]
        }
        KeyCode::Char('q') => vec![Action::Quit],
        _ => vec![],
    }
}

fn handle_cart_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Up => {
            state.cart_view.selected = state.cart_view.selected.saturating_sub(1);
            state.sync_cart_selection();
            vec![]
        }
        KeyCode::Down => {
            if !state.cart.is_empty() && state.cart_view.selected + 1 < state.cart.len() {
                state.cart_view.selected += 1;
            }
            state.sync_cart_selection();
            vec![]
        }
        // Quantity editing: every keystroke re-parses the buffer and
        // applies it verbatim. An unparseable buffer applies 0.
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
            state.cart_view.qty_input.push(c);
            apply_qty_input(state);
            vec![]
        }
        KeyCode::Backspace => {
            state.cart_view.qty_input.pop();
            apply_qty_input(state);
            vec![]
        }
        KeyCode::Enter | KeyCode::Char('c') => {
            if state.cart.is_empty() {
                return vec![];
            }
            let total = state.cart_total();
            let lines = state.checkout();
            vec![Action::RecordCheckout { lines, total }]
        }
        KeyCode::Char('q') => vec![Action::Quit],
        _ => vec![],
    }
}

fn apply_qty_input(state: &mut AppState) {
    let Some(line) = state.selected_cart_line() else {
        return;
    };
    let id = line.product.id;
    let quantity = state.cart_view.qty_input.parse::<i64>().unwrap_or(0);
    state.update_quantity(id, quantity);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use rust_decimal::Decimal;

    fn product(id: ProductId, name: &str, price_cents: i64) -> Product {
        Product {
            id,
            name: name.into(),
            description: String::new(),
            price: Decimal::new(price_cents, 2),
        }
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn loaded_state() -> AppState {
        let mut st = AppState::new(AppConfig::default());
        handle_event(
            &mut st,
            AppEvent::ProductsLoaded(vec![
                product(1, "mug", 3000),
                product(2, "kettle", 1000),
                product(3, "grinder", 2000),
            ]),
        );
        st
    }

    #[test]
    fn products_loaded_replaces_the_catalog() {
        let st = loaded_state();
        assert_eq!(st.products.len(), 3);
    }

    #[test]
    fn fetch_failure_leaves_the_catalog_empty() {
        let mut st = AppState::new(AppConfig::default());
        let actions = handle_event(
            &mut st,
            AppEvent::ProductsFetchFailed {
                error: "connection refused".into(),
            },
        );
        assert!(actions.is_empty());
        assert!(st.products.is_empty());
        assert!(st.status_message.is_none());
    }

    #[test]
    fn add_key_puts_the_selected_product_in_the_cart() {
        let mut st = loaded_state();
        handle_event(&mut st, key(KeyCode::Char('a')));
        handle_event(&mut st, key(KeyCode::Char('a')));
        assert_eq!(st.cart.len(), 1);
        assert_eq!(st.cart[0].quantity, 2);
        assert_eq!(st.status_message.as_deref(), Some("Added mug to cart"));
    }

    #[test]
    fn tab_cycles_focus_between_panels() {
        let mut st = loaded_state();
        assert_eq!(st.focus, FocusPanel::Catalog);
        handle_event(&mut st, key(KeyCode::Tab));
        assert_eq!(st.focus, FocusPanel::Cart);
        handle_event(&mut st, key(KeyCode::Tab));
        assert_eq!(st.focus, FocusPanel::Catalog);
    }

    #[test]
    fn sort_menu_applies_the_chosen_order() {
        let mut st = loaded_state();
        handle_event(&mut st, key(KeyCode::Char('s')));
        assert!(st.sort_menu.visible);
        handle_event(&mut st, key(KeyCode::Down));
        handle_event(&mut st, key(KeyCode::Down));
        handle_event(&mut st, key(KeyCode::Enter));
        assert!(!st.sort_menu.visible);
        assert_eq!(st.catalog.sort, SortOption::PriceDesc);
        let ids: Vec<ProductId> = st.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn sort_menu_esc_changes_nothing() {
        let mut st = loaded_state();
        handle_event(&mut st, key(KeyCode::Char('s')));
        handle_event(&mut st, key(KeyCode::Down));
        handle_event(&mut st, key(KeyCode::Esc));
        assert!(!st.sort_menu.visible);
        assert_eq!(st.catalog.sort, SortOption::Unsorted);
        let ids: Vec<ProductId> = st.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn quantity_keystrokes_edit_the_selected_line() {
        let mut st = loaded_state();
        handle_event(&mut st, key(KeyCode::Char('a')));
        handle_event(&mut st, key(KeyCode::Tab));
        assert_eq!(st.cart_view.qty_input, "1");

        handle_event(&mut st, key(KeyCode::Char('3')));
        assert_eq!(st.cart[0].quantity, 13);

        // Clearing the field applies 0 — the value is taken verbatim.
        handle_event(&mut st, key(KeyCode::Backspace));
        handle_event(&mut st, key(KeyCode::Backspace));
        assert_eq!(st.cart[0].quantity, 0);

        handle_event(&mut st, key(KeyCode::Char('-')));
        handle_event(&mut st, key(KeyCode::Char('4')));
        assert_eq!(st.cart[0].quantity, -4);
    }

    #[test]
    fn checkout_clears_the_cart_and_records_it() {
        let mut st = loaded_state();
        handle_event(&mut st, key(KeyCode::Char('a')));
        handle_event(&mut st, key(KeyCode::Tab));
        let actions = handle_event(&mut st, key(KeyCode::Char('c')));

        assert!(st.cart.is_empty());
        assert!(st.checkout_notice.is_some());
        match actions.as_slice() {
            [Action::RecordCheckout { lines, total }] => {
                assert_eq!(lines.len(), 1);
                assert_eq!(format_amount(*total), "30.00");
            }
            other => panic!("unexpected actions: {other:?}"),
        }

        // The dialog captures input until dismissed.
        let actions = handle_event(&mut st, key(KeyCode::Char('a')));
        assert!(actions.is_empty());
        assert!(st.checkout_notice.is_some());
        handle_event(&mut st, key(KeyCode::Enter));
        assert!(st.checkout_notice.is_none());
    }

    #[test]
    fn checkout_key_is_ignored_on_an_empty_cart() {
        let mut st = loaded_state();
        handle_event(&mut st, key(KeyCode::Tab));
        let actions = handle_event(&mut st, key(KeyCode::Enter));
        assert!(actions.is_empty());
        assert!(st.checkout_notice.is_none());
    }

    #[test]
    fn ctrl_c_requests_quit() {
        let mut st = loaded_state();
        let actions = handle_event(
            &mut st,
            AppEvent::Terminal(CEvent::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(matches!(actions.as_slice(), [Action::Quit]));
    }
}
