use crate::app::state::CartLine;
use rust_decimal::Decimal;

/// Side effects the main loop performs after the handler has mutated
/// state.
#[derive(Debug)]
pub enum Action {
    RecordCheckout { lines: Vec<CartLine>, total: Decimal },
    Quit,
}
