//! Checkout receipts and diagnostic tracing.
//!
//! Each checkout appends a receipt block to a daily file named
//! `receipts_<date>.log` in the configured directory (default:
//! `~/.local/share/crabcart/`). The same directory holds the diagnostic
//! trace log, since stdout belongs to the terminal UI.

use crate::app::state::{format_amount, CartLine};
use crate::config::ReceiptConfig;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Appends checkout receipts to daily files.
///
/// File handles are cached for the lifetime of the logger to avoid
/// repeated opens. Falls back to `/dev/null` if a receipt file cannot be
/// created.
pub struct ReceiptLogger {
    enabled: bool,
    dir: String,
    file_handles: HashMap<String, fs::File>,
}

impl ReceiptLogger {
    pub fn new(config: &ReceiptConfig) -> Self {
        Self {
            enabled: config.enabled,
            dir: config.dir.clone(),
            file_handles: HashMap::new(),
        }
    }

    /// Write a receipt block for one checkout. No-op when receipts are
    /// disabled.
    pub fn log_checkout(&mut self, lines: &[CartLine], total: Decimal) {
        if !self.enabled {
            return;
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let mut block = format!("[{}] checkout: {} lines\n", timestamp, lines.len());
        for line in lines {
            block.push_str(&format!(
                "  {} x {} @ {} = {}\n",
                line.quantity,
                line.product.name,
                format_amount(line.product.price),
                format_amount(line.line_total()),
            ));
        }
        block.push_str(&format!("  total: {}\n", format_amount(total)));

        let dir = expand_tilde(&self.dir);
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let filename = format!("receipts_{}.log", date);
        let filepath = dir.join(&filename);

        let handle = self.file_handles.entry(filename).or_insert_with(|| {
            let _ = fs::create_dir_all(&dir);
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&filepath)
                .unwrap_or_else(|_| {
                    // Fallback: a handle that goes nowhere
                    OpenOptions::new()
                        .write(true)
                        .open(if cfg!(unix) { "/dev/null" } else { "NUL" })
                        .unwrap()
                })
        });

        let _ = handle.write_all(block.as_bytes());
    }
}

/// Route `tracing` diagnostics to a file in the receipt directory,
/// filtered by `RUST_LOG` (default `info`).
pub fn init_tracing(dir: &str) -> Result<()> {
    let dir = expand_tilde(dir);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = dir.join("crabcart.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open trace log {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn expand_tilde(dir: &str) -> PathBuf {
    if dir.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(dir.trim_start_matches('~').trim_start_matches('/'));
        }
    }
    PathBuf::from(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::Product;

    fn line(name: &str, price_cents: i64, quantity: i64) -> CartLine {
        CartLine {
            product: Product {
                id: 1,
                name: name.into(),
                description: String::new(),
                price: Decimal::new(price_cents, 2),
            },
            quantity,
        }
    }

    #[test]
    fn receipt_block_lands_in_the_daily_file() {
        let dir = std::env::temp_dir().join(format!("crabcart-test-{}", std::process::id()));
        let mut logger = ReceiptLogger::new(&ReceiptConfig {
            enabled: true,
            dir: dir.to_string_lossy().into_owned(),
        });

        logger.log_checkout(&[line("Mug", 1000, 2)], Decimal::new(2000, 2));

        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let contents = fs::read_to_string(dir.join(format!("receipts_{}.log", date))).unwrap();
        assert!(contents.contains("checkout: 1 lines"));
        assert!(contents.contains("2 x Mug @ 10.00 = 20.00"));
        assert!(contents.contains("total: 20.00"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn disabled_logger_writes_nothing() {
        let dir = std::env::temp_dir().join(format!("crabcart-off-{}", std::process::id()));
        let mut logger = ReceiptLogger::new(&ReceiptConfig {
            enabled: false,
            dir: dir.to_string_lossy().into_owned(),
        });
        logger.log_checkout(&[line("Mug", 1000, 1)], Decimal::new(1000, 2));
        assert!(!dir.exists());
    }
}
