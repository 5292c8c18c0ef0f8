//! Parser for variant statistics pasted straight out of a spreadsheet.
//!
//! Accepted shape: optional blank lines, then a header line of tab separated
//! column names (optionally preceded by an empty cell), then one line per
//! country: the country name followed by one value per column. Blank lines
//! after the header are skipped. Country names may carry a disposable marker
//! prefix, stored without it.

use crate::domain::model::{CountryRow, VariantTable};
use crate::utils::error::{Result, ScrapeError};
use std::collections::HashMap;

pub const DEFAULT_MARKER: &str = "Sample ";

pub fn parse(name: &str, supply_centers: u32, text: &str) -> Result<VariantTable> {
    parse_with_marker(name, supply_centers, text, DEFAULT_MARKER)
}

pub fn parse_with_marker(
    name: &str,
    supply_centers: u32,
    text: &str,
    marker: &str,
) -> Result<VariantTable> {
    let mut lines = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !is_blank(line));

    let (header_no, header_line) = lines.next().ok_or_else(|| {
        ScrapeError::format(
            text.split('\n').count(),
            format!("table for '{}' has no header line", name),
        )
    })?;
    let columns = parse_header(header_line);
    if columns.is_empty() {
        return Err(ScrapeError::format(header_no, "header line has no column names"));
    }

    let mut countries = HashMap::new();
    let mut country_order = Vec::new();

    for (line_no, line) in lines {
        let mut cells = line.split('\t');
        let raw_country = cells.next().unwrap_or_default().trim();
        let country = raw_country
            .strip_prefix(marker)
            .unwrap_or(raw_country)
            .trim();
        if country.is_empty() {
            return Err(ScrapeError::format(line_no, "data line has no country name"));
        }

        let values: Vec<String> = cells.map(str::to_string).collect();
        if values.len() != columns.len() {
            return Err(ScrapeError::format(
                line_no,
                format!(
                    "'{}' has {} values but the header names {} columns",
                    country,
                    values.len(),
                    columns.len()
                ),
            ));
        }

        if countries
            .insert(country.to_string(), CountryRow { values })
            .is_some()
        {
            return Err(ScrapeError::format(
                line_no,
                format!("'{}' appears more than once", country),
            ));
        }
        country_order.push(country.to_string());
    }

    tracing::debug!(
        "Parsed variant table '{}': {} columns, {} countries",
        name,
        columns.len(),
        country_order.len()
    );

    Ok(VariantTable {
        name: name.to_string(),
        supply_centers,
        columns,
        countries,
        country_order,
    })
}

// A line made only of whitespace (tabs included) is the single empty token case.
fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn parse_header(line: &str) -> Vec<String> {
    let mut cells: Vec<&str> = line.split('\t').collect();
    if cells.first().is_some_and(|c| c.trim().is_empty()) {
        cells.remove(0);
    }

    let last = cells.len().saturating_sub(1);
    cells
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let cell = if idx == 0 { cell.trim_start() } else { cell };
            let cell = if idx == last { cell.trim_end() } else { cell };
            cell.to_string()
        })
        .collect()
}
