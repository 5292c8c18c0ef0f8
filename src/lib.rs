pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::HttpListingSource;
pub use config::{builtin::builtin_registry, cli::LocalStorage, toml_config::VariantsFile, CliConfig};
pub use core::{etl::ScrapeEngine, registry::VariantRegistry, scanner::ListingScanner};
pub use utils::error::{Result, ScrapeError};
