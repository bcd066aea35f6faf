//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use serde::{Deserialize, Serialize};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub receipts: ReceiptConfig,
}

/// Where the product listing lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_products_path")]
    pub products_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            products_path: default_products_path(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".into()
}

fn default_products_path() -> String {
    "/api/products".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Symbol prefixed to every rendered price.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Rows jumped by PageUp/PageDown in the catalog.
    #[serde(default = "default_page_jump")]
    pub page_jump: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            page_jump: default_page_jump(),
        }
    }
}

fn default_currency() -> String {
    "$".into()
}

fn default_page_jump() -> usize {
    10
}

/// Checkout receipt logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Directory for receipt files and the diagnostic log. A leading
    /// `~` expands to the home directory.
    #[serde(default = "default_receipt_dir")]
    pub dir: String,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            dir: default_receipt_dir(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_receipt_dir() -> String {
    "~/.local/share/crabcart".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(cfg.api.products_path, "/api/products");
        assert_eq!(cfg.ui.currency, "$");
        assert!(cfg.receipts.enabled);
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://shop.example.com"

            [ui]
            currency = "€"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.api.base_url, "https://shop.example.com");
        assert_eq!(cfg.api.products_path, "/api/products");
        assert_eq!(cfg.ui.currency, "€");
        assert_eq!(cfg.ui.page_jump, 10);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = AppConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.receipts.dir, cfg.receipts.dir);
    }
}
