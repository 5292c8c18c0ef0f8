use crate::domain::ports::ListingSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "https://vdiplomacy.com";
pub const LISTING_PATH: &str = "/gamelistings.php";

/// Press types included in the search. Gunboat (no-press) games are left out.
pub const PRESS_TYPES: &[&str] = &["PublicPressOnly", "Regular", "RulebookPress"];

pub struct HttpListingSource {
    client: Client,
    base_url: String,
}

impl HttpListingSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn listing_url(&self) -> String {
        format!("{}{}", self.base_url, LISTING_PATH)
    }
}

/// Search form fields for one variant. The press-type filter repeats its key,
/// which is why this is a list of pairs rather than a map.
pub fn search_form(variant_id: &str) -> Vec<(&'static str, String)> {
    let mut form = vec![("search[chooseVariant]", variant_id.to_string())];
    form.extend(
        PRESS_TYPES
            .iter()
            .map(|press| ("search[pressType][]", press.to_string())),
    );
    form
}

#[async_trait]
impl ListingSource for HttpListingSource {
    async fn fetch_listing(&self) -> Result<String> {
        let url = self.listing_url();
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("page-games", "1"),
                ("gamelistType", "Finished"),
                ("searchOn", "on"),
            ])
            .send()
            .await?;
        tracing::debug!("Listing response status: {}", response.status());
        Ok(response.text().await?)
    }

    async fn fetch_page(&self, variant_id: &str, page: u32) -> Result<String> {
        let url = self.listing_url();
        tracing::debug!("POST {} (variant {}, page {})", url, variant_id, page);
        let response = self
            .client
            .post(&url)
            .query(&[
                ("gamelistType", "Finished".to_string()),
                ("page-games", page.to_string()),
            ])
            .form(&search_form(variant_id))
            .send()
            .await?;
        tracing::debug!("Page {} response status: {}", page, response.status());
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_search_form_repeats_press_key() {
        let form = search_form("15");
        assert_eq!(
            form,
            vec![
                ("search[chooseVariant]", "15".to_string()),
                ("search[pressType][]", "PublicPressOnly".to_string()),
                ("search[pressType][]", "Regular".to_string()),
                ("search[pressType][]", "RulebookPress".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_listing_query() {
        let server = MockServer::start_async().await;
        let listing_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/gamelistings.php")
                    .query_param("page-games", "1")
                    .query_param("gamelistType", "Finished")
                    .query_param("searchOn", "on");
                then.status(200).body("<option value=\"1\">Classic</option>");
            })
            .await;

        let source = HttpListingSource::new(server.base_url());
        let body = source.fetch_listing().await.unwrap();

        listing_mock.assert_async().await;
        assert!(body.contains("Classic"));
    }

    #[tokio::test]
    async fn test_fetch_page_posts_repeated_press_types() {
        let server = MockServer::start_async().await;
        let page_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/gamelistings.php")
                    .query_param("gamelistType", "Finished")
                    .query_param("page-games", "3")
                    .body_contains("search%5BchooseVariant%5D=15")
                    .body_contains("search%5BpressType%5D%5B%5D=PublicPressOnly")
                    .body_contains("search%5BpressType%5D%5B%5D=Regular")
                    .body_contains("search%5BpressType%5D%5B%5D=RulebookPress");
                then.status(200).body("page three");
            })
            .await;

        let source = HttpListingSource::new(format!("{}/", server.base_url()));
        let body = source.fetch_page("15", 3).await.unwrap();

        page_mock.assert_async().await;
        assert_eq!(body, "page three");
    }

    #[tokio::test]
    async fn test_transport_failure_is_error() {
        // Nothing listens on port 9 of localhost in the test environment.
        let source = HttpListingSource::new("http://127.0.0.1:9");
        let err = source.fetch_listing().await.unwrap_err();
        assert!(matches!(err, crate::utils::error::ScrapeError::Transport(_)));
    }
}
