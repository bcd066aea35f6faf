use crate::app::state::Product;
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// The startup product fetch finished successfully
    ProductsLoaded(Vec<Product>),

    /// The startup product fetch failed. The catalog stays empty; the
    /// failure is recorded in the trace log only.
    ProductsFetchFailed { error: String },

    /// Tick for UI refresh
    Tick,
}
