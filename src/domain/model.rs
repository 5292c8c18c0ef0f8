use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Precomputed statistics for one country, in header column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRow {
    pub values: Vec<String>,
}

impl CountryRow {
    pub fn to_csv(&self) -> String {
        self.values.join(",")
    }
}

/// A variant's precomputed lookup table. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct VariantTable {
    pub name: String,
    pub supply_centers: u32,
    pub columns: Vec<String>,
    pub(crate) countries: HashMap<String, CountryRow>,
    pub(crate) country_order: Vec<String>,
}

impl VariantTable {
    /// Comma-joined header columns.
    pub fn header(&self) -> String {
        self.columns.join(",")
    }

    pub fn row(&self, country: &str) -> Option<&CountryRow> {
        self.countries.get(country)
    }

    /// Country names in the order they appeared in the pasted table.
    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.country_order.iter().map(String::as_str)
    }

    pub fn country_count(&self) -> usize {
        self.country_order.len()
    }
}

/// What the listing said about a country's supply centers at game end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplyCenters {
    Held(u32),
    /// The member detail reports the country as defeated.
    Eliminated,
    /// Neither a center count nor a defeat notice could be found.
    Unparseable,
}

impl SupplyCenters {
    pub fn held(&self) -> u32 {
        match self {
            SupplyCenters::Held(n) => *n,
            SupplyCenters::Eliminated | SupplyCenters::Unparseable => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    pub country: String,
    pub supply_centers: SupplyCenters,
}

/// One finished game as scraped from a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub game_id: String,
    pub members: Vec<MemberRecord>,
}

impl GameRecord {
    pub fn player_count(&self) -> usize {
        self.members.len()
    }
}

/// Share of the variant's supply centers held at game end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SupplyShare {
    Fraction(f64),
    /// Written as a literal `0`, matching the historic output for members
    /// without a center count.
    Absent,
}

impl SupplyShare {
    pub fn from_centers(centers: SupplyCenters, total: u32) -> Self {
        match centers {
            SupplyCenters::Held(n) => SupplyShare::Fraction(f64::from(n) / f64::from(total)),
            SupplyCenters::Eliminated | SupplyCenters::Unparseable => SupplyShare::Absent,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            SupplyShare::Fraction(f) => *f,
            SupplyShare::Absent => 0.0,
        }
    }
}

impl fmt::Display for SupplyShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupplyShare::Fraction(v) => write!(f, "{}", v),
            SupplyShare::Absent => f.write_str("0"),
        }
    }
}

/// A single (game, country) line of the output file.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow<'a> {
    pub game_id: &'a str,
    pub precomputed: &'a CountryRow,
    pub player_count: usize,
    pub share: SupplyShare,
}

impl OutputRow<'_> {
    pub fn fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(self.precomputed.values.len() + 3);
        fields.push(self.game_id.to_string());
        fields.extend(self.precomputed.values.iter().cloned());
        fields.push(self.player_count.to_string());
        fields.push(self.share.to_string());
        fields
    }
}

/// Outcome of one variant's run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantReport {
    pub variant: String,
    pub path: PathBuf,
    pub pages: u32,
    pub games: usize,
    pub rows: usize,
    pub unparseable: usize,
}
