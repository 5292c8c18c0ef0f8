use crate::core::variant_table;
use crate::domain::model::VariantTable;
use crate::utils::error::{Result, ScrapeError};

/// Ordered collection of variant tables, built once by the caller and then
/// only read.
#[derive(Debug, Clone, Default)]
pub struct VariantRegistry {
    variants: Vec<VariantTable>,
}

impl VariantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a pasted table and appends it. Variant names must be unique.
    pub fn add(&mut self, name: &str, supply_centers: u32, text: &str) -> Result<&VariantTable> {
        let table = variant_table::parse(name, supply_centers, text)?;
        self.insert(table)
    }

    pub fn insert(&mut self, table: VariantTable) -> Result<&VariantTable> {
        if self.get(&table.name).is_some() {
            return Err(ScrapeError::Config {
                message: format!("variant '{}' is registered twice", table.name),
            });
        }
        self.variants.push(table);
        Ok(&self.variants[self.variants.len() - 1])
    }

    pub fn get(&self, name: &str) -> Option<&VariantTable> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariantTable> {
        self.variants.iter()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Keeps only the named variants, in registry order. Every name must exist.
    pub fn retain_named(&mut self, names: &[String]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }
        if let Some(missing) = names.iter().find(|n| self.get(n).is_none()) {
            return Err(ScrapeError::InvalidConfigValue {
                field: "only".to_string(),
                value: missing.clone(),
                reason: format!(
                    "Unknown variant. Known variants: {}",
                    self.variants
                        .iter()
                        .map(|v| v.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            });
        }
        self.variants.retain(|v| names.contains(&v.name));
        Ok(())
    }
}
