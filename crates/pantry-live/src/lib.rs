//! # pantry-live
//!
//! Live nutrition database lookup for the pantry food search engine.
//!
//! The search engine falls back to a [`LiveProvider`](pantry_core::LiveProvider)
//! when the local index is unpopulated or yields nothing. This crate provides
//! one backed by USDA FoodData Central.
//!
//! # Example
//!
//! ```rust,no_run
//! use pantry_live::{UsdaConfig, UsdaFoodDataClient};
//!
//! # fn main() -> pantry_core::Result<()> {
//! // From USDA_* environment variables
//! let client = UsdaFoodDataClient::from_env()?;
//!
//! // Or restricted to curated data
//! let client = UsdaFoodDataClient::new(
//!     UsdaConfig::default().with_data_types(["Foundation", "SR Legacy"]),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod usda;

pub use config::UsdaConfig;
pub use usda::{page_size_for, UsdaFoodDataClient, PROVIDER_NAME};
