use crate::utils::error::Result;
use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;

/// Where listing pages come from. The remote service answers every page
/// request with a success status, so callers look at the body, not the status.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// The finished-games listing page that carries the variant selector.
    async fn fetch_listing(&self) -> Result<String>;

    /// One page of search results for a variant identifier, starting at 1.
    async fn fetch_page(&self, variant_id: &str, page: u32) -> Result<String>;
}

pub trait Storage: Send + Sync {
    type Writer: Write;

    /// Creates or truncates the named output and returns its location.
    fn create(&self, file_name: &str) -> Result<(PathBuf, Self::Writer)>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn variants_file(&self) -> Option<&str>;
    fn only_variants(&self) -> &[String];
}
