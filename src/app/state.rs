use crate::config::AppConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub type ProductId = u64;

/// A catalog entry as served by the product listing endpoint. Immutable
/// once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
}

/// A cart entry pairing a product with a quantity. At most one line per
/// product id; the quantity is whatever the user last entered, including
/// zero or negative values.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i64,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    Unsorted,
    PriceAsc,
    PriceDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 3] = [
        SortOption::Unsorted,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::Unsorted => "Sort by",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPanel {
    Catalog,
    Cart,
}

/// Catalog-local view state: list selection plus the active sort choice.
#[derive(Debug, Default)]
pub struct CatalogViewState {
    pub selected: usize,
    pub scroll_offset: usize,
    pub sort: SortOption,
}

impl CatalogViewState {
    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self, total: usize) {
        if total > 0 && self.selected + 1 < total {
            self.selected += 1;
        }
    }

    pub fn ensure_visible(&mut self, viewport: usize) {
        if viewport == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + viewport {
            self.scroll_offset = self.selected + 1 - viewport;
        }
    }
}

/// Cart-local view state: line selection plus the quantity edit buffer
/// for the selected line.
#[derive(Debug, Default)]
pub struct CartViewState {
    pub selected: usize,
    pub qty_input: String,
}

#[derive(Debug, Default)]
pub struct SortMenuState {
    pub visible: bool,
    pub selected: usize,
}

impl SortMenuState {
    pub fn open(&mut self, current: SortOption) {
        self.visible = true;
        self.selected = SortOption::ALL
            .iter()
            .position(|o| *o == current)
            .unwrap_or(0);
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < SortOption::ALL.len() {
            self.selected += 1;
        }
    }
}

/// What the checkout acknowledgment dialog shows. Present while the
/// dialog is up; it captures all input until dismissed.
#[derive(Debug, Clone)]
pub struct CheckoutNotice {
    pub line_count: usize,
    pub total: Decimal,
}

const STATUS_MESSAGE_TTL: Duration = Duration::from_millis(2500);

pub struct AppState {
    pub config: AppConfig,
    pub products: Vec<Product>,
    pub cart: Vec<CartLine>,
    pub focus: FocusPanel,
    pub catalog: CatalogViewState,
    pub cart_view: CartViewState,
    pub sort_menu: SortMenuState,
    pub checkout_notice: Option<CheckoutNotice>,
    pub status_message: Option<String>,
    pub status_expires_at: Option<Instant>,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            products: Vec::new(),
            cart: Vec::new(),
            focus: FocusPanel::Catalog,
            catalog: CatalogViewState::default(),
            cart_view: CartViewState::default(),
            sort_menu: SortMenuState::default(),
            checkout_notice: None,
            status_message: None,
            status_expires_at: None,
            should_quit: false,
            dirty: true,
        }
    }

    /// Replace the catalog with a freshly fetched listing.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
        if self.catalog.selected >= self.products.len() {
            self.catalog.selected = self.products.len().saturating_sub(1);
        }
        self.dirty = true;
    }

    /// Add a product to the cart: bump the quantity of an existing line,
    /// or append a new line with quantity 1. The cart is replaced with a
    /// new snapshot rather than mutated in place.
    pub fn add_to_cart(&mut self, product: &Product) {
        let mut next: Vec<CartLine> = Vec::with_capacity(self.cart.len() + 1);
        let mut found = false;
        for line in &self.cart {
            if line.product.id == product.id {
                next.push(CartLine {
                    product: line.product.clone(),
                    quantity: line.quantity + 1,
                });
                found = true;
            } else {
                next.push(line.clone());
            }
        }
        if !found {
            next.push(CartLine {
                product: product.clone(),
                quantity: 1,
            });
        }
        self.cart = next;
        self.dirty = true;
    }

    /// Set the matching line's quantity to the given value verbatim.
    /// No bounds check; a no-op when no line matches.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        let next: Vec<CartLine> = self
            .cart
            .iter()
            .map(|line| {
                if line.product.id == id {
                    CartLine {
                        product: line.product.clone(),
                        quantity,
                    }
                } else {
                    line.clone()
                }
            })
            .collect();
        self.cart = next;
        self.dirty = true;
    }

    /// Clear the cart unconditionally and raise the acknowledgment
    /// dialog. Returns the cleared lines so the caller can record them.
    pub fn checkout(&mut self) -> Vec<CartLine> {
        let total = self.cart_total();
        let lines = std::mem::take(&mut self.cart);
        self.checkout_notice = Some(CheckoutNotice {
            line_count: lines.len(),
            total,
        });
        self.cart_view.selected = 0;
        self.cart_view.qty_input.clear();
        self.dirty = true;
        lines
    }

    /// Reorder the catalog by price, or leave it untouched for
    /// `Unsorted`. The sort is stable, so equal prices keep their
    /// relative order. The pre-sort order is not kept anywhere.
    pub fn apply_sort(&mut self, option: SortOption) {
        let mut sorted = self.products.clone();
        match option {
            SortOption::PriceAsc => sorted.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOption::PriceDesc => sorted.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOption::Unsorted => {}
        }
        self.products = sorted;
        self.catalog.sort = option;
        self.dirty = true;
    }

    pub fn cart_total(&self) -> Decimal {
        self.cart.iter().map(CartLine::line_total).sum()
    }

    pub fn cart_item_count(&self) -> i64 {
        self.cart.iter().map(|l| l.quantity).sum()
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.products.get(self.catalog.selected)
    }

    pub fn selected_cart_line(&self) -> Option<&CartLine> {
        self.cart.get(self.cart_view.selected)
    }

    /// Keep the cart selection on a real line and mirror its quantity
    /// into the edit buffer.
    pub fn sync_cart_selection(&mut self) {
        if self.cart_view.selected >= self.cart.len() {
            self.cart_view.selected = self.cart.len().saturating_sub(1);
        }
        self.cart_view.qty_input = self
            .selected_cart_line()
            .map(|l| l.quantity.to_string())
            .unwrap_or_default();
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Catalog => FocusPanel::Cart,
            FocusPanel::Cart => FocusPanel::Catalog,
        };
        if self.focus == FocusPanel::Cart {
            self.sync_cart_selection();
        }
        self.dirty = true;
    }

    pub fn set_status(&mut self, text: String) {
        self.status_message = Some(text);
        self.status_expires_at = Some(Instant::now() + STATUS_MESSAGE_TTL);
        self.dirty = true;
    }

    /// Drop the transient status message once its time is up. Returns
    /// true when something changed.
    pub fn expire_status(&mut self, now: Instant) -> bool {
        match self.status_expires_at {
            Some(at) if now >= at => {
                self.status_message = None;
                self.status_expires_at = None;
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    /// Render a money amount with the configured currency symbol, always
    /// to two decimal places.
    pub fn format_price(&self, amount: Decimal) -> String {
        format!("{}{}", self.config.ui.currency, format_amount(amount))
    }
}

pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: ProductId, name: &str, price_cents: i64) -> Product {
        Product {
            id,
            name: name.into(),
            description: format!("{name} description"),
            price: Decimal::new(price_cents, 2),
        }
    }

    fn state() -> AppState {
        AppState::new(AppConfig::default())
    }

    #[test]
    fn adding_same_product_twice_merges_into_one_line() {
        let mut st = state();
        let p = product(1, "mug", 1000);
        st.add_to_cart(&p);
        st.add_to_cart(&p);
        assert_eq!(st.cart.len(), 1);
        assert_eq!(st.cart[0].quantity, 2);
    }

    #[test]
    fn adding_distinct_products_appends_in_order() {
        let mut st = state();
        st.add_to_cart(&product(1, "mug", 1000));
        st.add_to_cart(&product(2, "kettle", 2500));
        assert_eq!(st.cart.len(), 2);
        assert_eq!(st.cart[0].product.id, 1);
        assert_eq!(st.cart[1].product.id, 2);
    }

    #[test]
    fn update_quantity_sets_value_verbatim() {
        let mut st = state();
        st.add_to_cart(&product(1, "mug", 1000));
        st.update_quantity(1, 7);
        assert_eq!(st.cart[0].quantity, 7);
        // Zero and negative values are accepted as entered.
        st.update_quantity(1, 0);
        assert_eq!(st.cart[0].quantity, 0);
        st.update_quantity(1, -3);
        assert_eq!(st.cart[0].quantity, -3);
    }

    #[test]
    fn update_quantity_on_unknown_id_is_a_noop() {
        let mut st = state();
        st.add_to_cart(&product(1, "mug", 1000));
        st.update_quantity(99, 5);
        assert_eq!(st.cart.len(), 1);
        assert_eq!(st.cart[0].quantity, 1);
    }

    #[test]
    fn checkout_empties_the_cart_and_reports_the_total() {
        let mut st = state();
        st.add_to_cart(&product(1, "mug", 1000));
        st.add_to_cart(&product(1, "mug", 1000));
        st.add_to_cart(&product(2, "kettle", 500));
        st.update_quantity(2, 3);

        let lines = st.checkout();
        assert_eq!(lines.len(), 2);
        assert!(st.cart.is_empty());
        let notice = st.checkout_notice.expect("dialog raised");
        assert_eq!(notice.line_count, 2);
        assert_eq!(format_amount(notice.total), "35.00");
    }

    #[test]
    fn checkout_on_empty_cart_is_harmless() {
        let mut st = state();
        let lines = st.checkout();
        assert!(lines.is_empty());
        assert!(st.cart.is_empty());
        assert_eq!(format_amount(st.checkout_notice.unwrap().total), "0.00");
    }

    #[test]
    fn sort_orders_by_price_both_ways() {
        let mut st = state();
        st.set_products(vec![
            product(1, "a", 3000),
            product(2, "b", 1000),
            product(3, "c", 2000),
        ]);

        st.apply_sort(SortOption::PriceAsc);
        let asc: Vec<ProductId> = st.products.iter().map(|p| p.id).collect();
        assert_eq!(asc, vec![2, 3, 1]);

        st.apply_sort(SortOption::PriceDesc);
        let desc: Vec<ProductId> = st.products.iter().map(|p| p.id).collect();
        assert_eq!(desc, vec![1, 3, 2]);
    }

    #[test]
    fn unsorted_leaves_current_order_untouched() {
        let mut st = state();
        st.set_products(vec![
            product(1, "a", 3000),
            product(2, "b", 1000),
            product(3, "c", 2000),
        ]);
        st.apply_sort(SortOption::PriceAsc);
        st.apply_sort(SortOption::Unsorted);
        let ids: Vec<ProductId> = st.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn sort_is_stable_for_equal_prices() {
        let mut st = state();
        st.set_products(vec![
            product(1, "a", 1000),
            product(2, "b", 1000),
            product(3, "c", 500),
        ]);
        st.apply_sort(SortOption::PriceAsc);
        let ids: Vec<ProductId> = st.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn cart_total_formats_to_two_decimals() {
        let mut st = state();
        st.add_to_cart(&product(1, "mug", 1000));
        st.update_quantity(1, 2);
        st.add_to_cart(&product(2, "kettle", 500));
        st.update_quantity(2, 3);
        assert_eq!(format_amount(st.cart_total()), "35.00");
        assert_eq!(st.format_price(st.cart_total()), "$35.00");
    }

    #[test]
    fn mutations_replace_the_cart_snapshot() {
        let mut st = state();
        st.add_to_cart(&product(1, "mug", 1000));
        let before = st.cart.as_ptr();
        st.add_to_cart(&product(1, "mug", 1000));
        assert_ne!(before, st.cart.as_ptr());
    }
}
