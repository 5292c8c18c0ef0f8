use crate::core::emitter::CsvEmitter;
use crate::core::registry::VariantRegistry;
use crate::core::scanner::{ListingScanner, PageOutcome};
use crate::core::{ListingSource, Storage, VariantReport, VariantTable};
use crate::utils::error::Result;

/// Runs every registered variant, one after another, into `<name>.csv`.
pub struct ScrapeEngine<S: ListingSource, T: Storage> {
    scanner: ListingScanner<S>,
    storage: T,
    registry: VariantRegistry,
}

impl<S: ListingSource, T: Storage> ScrapeEngine<S, T> {
    pub fn new(source: S, storage: T, registry: VariantRegistry) -> Self {
        Self {
            scanner: ListingScanner::new(source),
            storage,
            registry,
        }
    }

    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    /// Stops at the first error; files already written stay on disk.
    pub async fn run(&self) -> Result<Vec<VariantReport>> {
        tracing::info!("Starting scrape of {} variants", self.registry.len());
        let mut reports = Vec::with_capacity(self.registry.len());
        for variant in self.registry.iter() {
            reports.push(self.run_variant(variant).await?);
        }
        Ok(reports)
    }

    pub async fn run_variant(&self, variant: &VariantTable) -> Result<VariantReport> {
        let (path, writer) = self.storage.create(&format!("{}.csv", variant.name))?;
        tracing::info!("Variant {} -> {}", variant.name, path.display());

        let mut emitter = CsvEmitter::new(writer, variant);
        let variant_id = self.scanner.resolve_variant_id(&variant.name).await?;
        emitter.write_header()?;

        let mut page = 1;
        let mut games = 0;
        loop {
            let found = match self.scanner.scan_page(&variant_id, page).await? {
                PageOutcome::Exhausted => break,
                PageOutcome::Games(found) => found,
            };
            for game in &found {
                tracing::debug!(
                    "Variant: {}, Page: {}, Game ID: {}",
                    variant.name,
                    page,
                    game.game_id
                );
                emitter.emit_game(game)?;
            }
            games += found.len();
            emitter.flush()?;
            page += 1;
        }
        emitter.flush()?;

        let report = VariantReport {
            variant: variant.name.clone(),
            path,
            pages: page - 1,
            games,
            rows: emitter.rows_written(),
            unparseable: emitter.unparseable(),
        };
        tracing::info!(
            "Variant {} done: {} pages, {} games, {} rows",
            report.variant,
            report.pages,
            report.games,
            report.rows
        );
        if report.unparseable > 0 {
            tracing::warn!(
                "Variant {}: {} members had no readable supply-center count",
                report.variant,
                report.unparseable
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scanner::COMPLETION_SENTINEL;
    use crate::utils::error::ScrapeError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MemoryStorage {
        files: Arc<Mutex<HashMap<String, Arc<Mutex<Vec<u8>>>>>>,
    }

    struct MemoryWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for MemoryWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl MemoryStorage {
        fn contents(&self, name: &str) -> Option<String> {
            let files = self.files.lock().unwrap();
            files
                .get(name)
                .map(|buf| String::from_utf8(buf.lock().unwrap().clone()).unwrap())
        }
    }

    impl Storage for MemoryStorage {
        type Writer = MemoryWriter;

        fn create(&self, file_name: &str) -> Result<(PathBuf, MemoryWriter)> {
            let buf = Arc::new(Mutex::new(Vec::new()));
            self.files
                .lock()
                .unwrap()
                .insert(file_name.to_string(), buf.clone());
            Ok((PathBuf::from(file_name), MemoryWriter(buf)))
        }
    }

    /// Serves one variant ("Classic", id 1) with a fixed list of pages.
    struct FixtureSource {
        pages: Vec<String>,
    }

    #[async_trait]
    impl ListingSource for FixtureSource {
        async fn fetch_listing(&self) -> Result<String> {
            Ok(r#"<select><option value="1">Classic</option></select>"#.to_string())
        }

        async fn fetch_page(&self, variant_id: &str, page: u32) -> Result<String> {
            assert_eq!(variant_id, "1");
            Ok(self
                .pages
                .get(page as usize - 1)
                .cloned()
                .unwrap_or_else(|| format!("<p>{}</p>", COMPLETION_SENTINEL)))
        }
    }

    fn panel(game_id: &str, members: &[(&str, &str)]) -> String {
        let rows: String = members
            .iter()
            .map(|(country, detail)| {
                format!(
                    r#"<tr class="member"><td class="memberCountryName">{}</td><td class="memberGameDetail">{}</td></tr>"#,
                    country, detail
                )
            })
            .collect();
        format!(
            r#"<div class="gamePanel"><a href="board.php?gameID={}">x</a><div class="membersList"><table>{}</table></div></div>"#,
            game_id, rows
        )
    }

    fn registry() -> VariantRegistry {
        let mut registry = VariantRegistry::new();
        registry
            .add(
                "Classic",
                34,
                "\n\tA\tB\tC\tD\nSample France\t-0.38\t-0.30\t-1.52\t0.19\nSample Germany\t-0.38\t1.80\t0.53\t1.23\n",
            )
            .unwrap();
        registry
    }

    #[tokio::test]
    async fn test_run_joins_games_with_table() {
        let source = FixtureSource {
            pages: vec![
                panel("12345", &[("France", "10 supply-centers"), ("Germany", "")]),
                panel("12346", &[("Germany", "34 supply-centers")]),
            ],
        };
        let storage = MemoryStorage::default();
        let engine = ScrapeEngine::new(source, storage.clone(), registry());

        let reports = engine.run().await.unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].pages, 2);
        assert_eq!(reports[0].games, 2);
        assert_eq!(reports[0].rows, 3);
        assert_eq!(reports[0].unparseable, 1);
        assert_eq!(
            storage.contents("Classic.csv").unwrap(),
            "Game ID,Country,A,B,C,D,Number of players,% Supply Centers at game end\n\
             12345,-0.38,-0.30,-1.52,0.19,2,0.29411764705882354\n\
             12345,-0.38,1.80,0.53,1.23,2,0\n\
             12346,-0.38,1.80,0.53,1.23,1,1\n"
        );
    }

    #[tokio::test]
    async fn test_unlisted_variant_leaves_empty_file() {
        let mut registry = VariantRegistry::new();
        registry.add("WWII", 74, "\ta\nItaly\t1\n").unwrap();
        let storage = MemoryStorage::default();
        let engine = ScrapeEngine::new(FixtureSource { pages: vec![] }, storage.clone(), registry);

        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, ScrapeError::VariantNotListed { .. }));
        assert_eq!(storage.contents("WWII.csv").unwrap(), "");
    }

    #[tokio::test]
    async fn test_unknown_country_aborts_run() {
        let source = FixtureSource {
            pages: vec![
                panel("1", &[("France", "17 supply-centers")]),
                panel("2", &[("Prussia", "3 supply-centers")]),
            ],
        };
        let storage = MemoryStorage::default();
        let engine = ScrapeEngine::new(source, storage.clone(), registry());

        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, ScrapeError::UnknownCountry { .. }));
        let written = storage.contents("Classic.csv").unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(!written.contains("\n2,"));
    }

    #[tokio::test]
    async fn test_empty_result_set_writes_header_only() {
        let storage = MemoryStorage::default();
        let engine = ScrapeEngine::new(FixtureSource { pages: vec![] }, storage.clone(), registry());

        let reports = engine.run().await.unwrap();

        assert_eq!(reports[0].pages, 0);
        assert_eq!(reports[0].rows, 0);
        assert_eq!(storage.contents("Classic.csv").unwrap().lines().count(), 1);
    }
}
