pub mod builtin;
pub mod cli;
pub mod toml_config;

use crate::adapters::http::DEFAULT_BASE_URL;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "dip-variant-stats")]
#[command(about = "Scrape finished games per variant and join them with precomputed country statistics")]
pub struct CliConfig {
    /// Root of the game listing site
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory receiving one <variant>.csv per variant
    #[arg(long, default_value = ".")]
    pub output_path: String,

    /// TOML file with variant tables, replacing the built-in ones
    #[arg(long)]
    pub variants_file: Option<String>,

    /// Only run these variants (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    #[arg(long, help = "Print a progress line per scraped game")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn variants_file(&self) -> Option<&str> {
        self.variants_file.as_deref()
    }

    fn only_variants(&self) -> &[String] {
        &self.only
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_path("output_path", &self.output_path)?;
        if let Some(path) = &self.variants_file {
            validation::validate_path("variants_file", path)?;
        }
        for name in &self.only {
            validation::validate_non_empty_string("only", name)?;
        }
        Ok(())
    }
}
