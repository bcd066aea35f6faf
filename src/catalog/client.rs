use crate::app::event::AppEvent;
use crate::app::state::Product;
use crate::config::ApiConfig;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed product listing: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Fetches the product listing and reports the outcome on the event
/// channel. The listing is read once at startup; there is no retry,
/// timeout, or cancellation.
pub struct CatalogClient {
    event_tx: UnboundedSender<AppEvent>,
    products_url: String,
}

impl CatalogClient {
    pub fn new(event_tx: UnboundedSender<AppEvent>, config: &ApiConfig) -> Self {
        let products_url = format!(
            "{}{}",
            config.base_url.trim_end_matches('/'),
            config.products_path
        );
        Self {
            event_tx,
            products_url,
        }
    }

    /// Spawn the startup fetch. The UI keeps running while it is in
    /// flight; completion arrives as an `AppEvent`.
    pub fn spawn_fetch(&self) {
        let url = self.products_url.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let event = match fetch_products(&url).await {
                Ok(products) => AppEvent::ProductsLoaded(products),
                Err(e) => AppEvent::ProductsFetchFailed {
                    error: e.to_string(),
                },
            };
            let _ = tx.send(event);
        });
    }
}

async fn fetch_products(url: &str) -> Result<Vec<Product>, CatalogError> {
    let client = reqwest::Client::new();
    let resp = client.get(url).send().await?;

    if !resp.status().is_success() {
        return Err(CatalogError::Status(resp.status()));
    }

    // The body is trusted as-is: whatever decodes as the documented
    // array shape becomes the catalog.
    let body = resp.text().await?;
    let products: Vec<Product> = serde_json::from_str(&body)?;
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn listing_payload_decodes() {
        let body = r#"[
            {"id": 1, "name": "Mug", "description": "Stoneware mug", "price": 12.5},
            {"id": 2, "name": "Kettle", "description": "1.7L kettle", "price": 40}
        ]"#;
        let products: Vec<Product> = serde_json::from_str(body).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].price, Decimal::new(125, 1));
        assert_eq!(products[1].price, Decimal::from(40));
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let err = serde_json::from_str::<Vec<Product>>(r#"{"not": "an array"}"#)
            .map_err(CatalogError::from)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[test]
    fn url_joins_base_and_path() {
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let client = CatalogClient::new(
            tx,
            &ApiConfig {
                base_url: "http://shop.local/".into(),
                products_path: "/api/products".into(),
            },
        );
        assert_eq!(client.products_url, "http://shop.local/api/products");
    }
}
