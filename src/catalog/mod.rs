//! The one outward-facing piece: a read-only client for the product
//! listing endpoint.

pub mod client;

pub use client::CatalogClient;
