use crate::core::registry::VariantRegistry;
use crate::core::variant_table::{self, DEFAULT_MARKER};
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A file of pasted variant tables:
///
/// ```toml
/// [[variants]]
/// name = "Classic"
/// supply_centers = 34
/// table = '''
/// <tab separated block>
/// '''
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantsFile {
    pub variants: Vec<VariantDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantDef {
    pub name: String,
    pub supply_centers: u32,
    pub marker: Option<String>,
    pub table: String,
}

impl VariantsFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ScrapeError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Parses every table, in file order.
    pub fn into_registry(self) -> Result<VariantRegistry> {
        self.validate()?;
        let mut registry = VariantRegistry::new();
        for def in self.variants {
            let marker = def.marker.as_deref().unwrap_or(DEFAULT_MARKER);
            let table =
                variant_table::parse_with_marker(&def.name, def.supply_centers, &def.table, marker)?;
            registry.insert(table)?;
        }
        Ok(registry)
    }
}

impl Validate for VariantsFile {
    fn validate(&self) -> Result<()> {
        if self.variants.is_empty() {
            return Err(ScrapeError::MissingConfig {
                field: "variants".to_string(),
            });
        }
        for def in &self.variants {
            def.validate()?;
        }
        Ok(())
    }
}

impl Validate for VariantDef {
    fn validate(&self) -> Result<()> {
        validation::validate_file_stem("variants.name", &self.name)?;
        validation::validate_positive_number("variants.supply_centers", self.supply_centers, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: &str = r#"
[[variants]]
name = "TreatyOfVerdun"
supply_centers = 15
table = '''
	a	b
West Francia	0	0.707106781
Middle Francia	0	-1.414213562
'''

[[variants]]
name = "Custom"
supply_centers = 10
marker = "X "
table = '''
	a
X North	1
'''
"#;

    #[test]
    fn test_variants_file_into_registry() {
        let registry = VariantsFile::from_toml_str(FILE)
            .unwrap()
            .into_registry()
            .unwrap();

        assert_eq!(registry.len(), 2);
        let verdun = registry.get("TreatyOfVerdun").unwrap();
        assert_eq!(verdun.supply_centers, 15);
        assert_eq!(verdun.row("Middle Francia").unwrap().to_csv(), "0,-1.414213562");
        assert!(registry.get("Custom").unwrap().row("North").is_some());
    }

    #[test]
    fn test_zero_supply_centers_rejected() {
        let file = VariantsFile::from_toml_str(
            "[[variants]]\nname = \"Broken\"\nsupply_centers = 0\ntable = \"\\ta\\nX\\t1\"\n",
        )
        .unwrap();
        assert!(matches!(
            file.into_registry().unwrap_err(),
            ScrapeError::InvalidConfigValue { .. }
        ));
    }

    #[test]
    fn test_empty_file_rejected() {
        let file = VariantsFile::from_toml_str("variants = []").unwrap();
        assert!(matches!(
            file.validate().unwrap_err(),
            ScrapeError::MissingConfig { .. }
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let err = VariantsFile::from_toml_str("[[variants]\nname=").unwrap_err();
        assert!(matches!(err, ScrapeError::Config { .. }));
    }

    #[test]
    fn test_table_errors_propagate() {
        let file = VariantsFile::from_toml_str(
            "[[variants]]\nname = \"Broken\"\nsupply_centers = 3\ntable = \"\\ta\\tb\\nX\\t1\"\n",
        )
        .unwrap();
        assert!(matches!(
            file.into_registry().unwrap_err(),
            ScrapeError::Format { line: 2, .. }
        ));
    }
}
