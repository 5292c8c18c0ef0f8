//! Walks the finished-games listing for one variant.
//!
//! The listing service answers out-of-range pages with a success status, so
//! the only end-of-results signal is the completion sentence in the body.

use crate::domain::model::{GameRecord, MemberRecord, SupplyCenters};
use crate::domain::ports::ListingSource;
use crate::utils::error::{Result, ScrapeError};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

pub const COMPLETION_SENTINEL: &str = "The set of returned games has finished";

static GAME_PANEL: LazyLock<Selector> = LazyLock::new(|| selector(".gamePanel"));
static MEMBERS_LIST: LazyLock<Selector> = LazyLock::new(|| selector(".membersList"));
static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table"));
static MEMBER: LazyLock<Selector> = LazyLock::new(|| selector(".member"));
static COUNTRY_NAME: LazyLock<Selector> = LazyLock::new(|| selector(".memberCountryName"));
static GAME_DETAIL: LazyLock<Selector> = LazyLock::new(|| selector(".memberGameDetail"));

static GAME_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gameID=(\d+)").expect("game id pattern"));
static SUPPLY_CENTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) supply-centers").expect("supply-center pattern"));
static DEFEATED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdefeated\b").expect("defeat pattern"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Result of inspecting one results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Games(Vec<GameRecord>),
    Exhausted,
}

pub struct ListingScanner<S: ListingSource> {
    source: S,
}

impl<S: ListingSource> ListingScanner<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn resolve_variant_id(&self, variant_name: &str) -> Result<String> {
        tracing::debug!("Resolving listing identifier for variant '{}'", variant_name);
        let body = self.source.fetch_listing().await?;
        let id = find_variant_id(&body, variant_name).ok_or_else(|| {
            ScrapeError::VariantNotListed {
                variant: variant_name.to_string(),
            }
        })?;
        tracing::debug!("Variant '{}' has listing identifier {}", variant_name, id);
        Ok(id)
    }

    pub async fn fetch_page(&self, variant_id: &str, page: u32) -> Result<String> {
        self.source.fetch_page(variant_id, page).await
    }

    /// Fetches a page and either extracts its games or reports the end of
    /// the result set.
    pub async fn scan_page(&self, variant_id: &str, page: u32) -> Result<PageOutcome> {
        let body = self.fetch_page(variant_id, page).await?;
        if is_exhausted(&body) {
            tracing::debug!("Page {} reports the result set has finished", page);
            return Ok(PageOutcome::Exhausted);
        }
        Ok(PageOutcome::Games(extract_games(&body)?))
    }
}

pub fn is_exhausted(body: &str) -> bool {
    body.contains(COMPLETION_SENTINEL)
}

/// Finds a text node equal to `variant_name` and returns the `value`
/// attribute of the element holding it.
pub fn find_variant_id(body: &str, variant_name: &str) -> Option<String> {
    let document = Html::parse_document(body);
    document
        .tree
        .nodes()
        .filter(|node| {
            node.value()
                .as_text()
                .is_some_and(|text| &**text == variant_name)
        })
        .filter_map(|node| node.parent().and_then(ElementRef::wrap))
        .find_map(|parent| parent.value().attr("value").map(str::to_string))
}

pub fn extract_games(body: &str) -> Result<Vec<GameRecord>> {
    let document = Html::parse_document(body);
    document.select(&GAME_PANEL).map(extract_game).collect()
}

fn extract_game(panel: ElementRef<'_>) -> Result<GameRecord> {
    let markup = panel.html();
    let game_id = GAME_ID
        .captures(&markup)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ScrapeError::page("game panel without a gameID link"))?;

    let members_list = panel
        .select(&MEMBERS_LIST)
        .next()
        .ok_or_else(|| ScrapeError::page(format!("game {} has no members list", game_id)))?;

    // Later tables (civil disorders) repeat members already listed in the first one.
    let member_table = members_list
        .select(&TABLE)
        .next()
        .ok_or_else(|| ScrapeError::page(format!("game {} has no member table", game_id)))?;

    let members = member_table
        .select(&MEMBER)
        .map(|row| extract_member(row, &game_id))
        .collect::<Result<Vec<_>>>()?;

    Ok(GameRecord { game_id, members })
}

fn extract_member(row: ElementRef<'_>, game_id: &str) -> Result<MemberRecord> {
    let country = row
        .select(&COUNTRY_NAME)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .ok_or_else(|| {
            ScrapeError::page(format!("member row without a country name in game {}", game_id))
        })?;

    let supply_centers = match row.select(&GAME_DETAIL).next() {
        Some(detail) => parse_supply_centers(&detail.text().collect::<String>()),
        None => SupplyCenters::Unparseable,
    };

    Ok(MemberRecord {
        country,
        supply_centers,
    })
}

pub fn parse_supply_centers(detail: &str) -> SupplyCenters {
    if let Some(count) = SUPPLY_CENTERS
        .captures(detail)
        .and_then(|caps| caps[1].parse::<u32>().ok())
    {
        SupplyCenters::Held(count)
    } else if DEFEATED.is_match(detail) {
        SupplyCenters::Eliminated
    } else {
        SupplyCenters::Unparseable
    }
}
