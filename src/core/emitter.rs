use crate::domain::model::{GameRecord, OutputRow, SupplyCenters, SupplyShare, VariantTable};
use crate::utils::error::{Result, ScrapeError};
use std::io::Write;

/// Joins scraped games against a variant table and writes CSV lines.
pub struct CsvEmitter<'t, W: Write> {
    writer: csv::Writer<W>,
    table: &'t VariantTable,
    rows: usize,
    unparseable: usize,
}

impl<'t, W: Write> CsvEmitter<'t, W> {
    pub fn new(inner: W, table: &'t VariantTable) -> Self {
        // Data lines carry no country cell, so they are one field shorter than the header.
        let writer = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(inner);
        Self {
            writer,
            table,
            rows: 0,
            unparseable: 0,
        }
    }

    pub fn write_header(&mut self) -> Result<()> {
        let mut header = vec!["Game ID", "Country"];
        header.extend(self.table.columns.iter().map(String::as_str));
        header.push("Number of players");
        header.push("% Supply Centers at game end");
        self.writer.write_record(&header)?;
        Ok(())
    }

    /// Every member is looked up before anything is written, so a game with
    /// an unknown country leaves no partial rows behind.
    pub fn rows_for<'g>(&self, game: &'g GameRecord) -> Result<Vec<OutputRow<'g>>>
    where
        't: 'g,
    {
        let table: &'t VariantTable = self.table;
        let player_count = game.player_count();
        game.members
            .iter()
            .map(|member| {
                let precomputed = table.row(&member.country).ok_or_else(|| {
                    ScrapeError::UnknownCountry {
                        variant: table.name.clone(),
                        country: member.country.clone(),
                        game_id: game.game_id.clone(),
                    }
                })?;
                Ok(OutputRow {
                    game_id: &game.game_id,
                    precomputed,
                    player_count,
                    share: SupplyShare::from_centers(member.supply_centers, table.supply_centers),
                })
            })
            .collect()
    }

    pub fn emit_game(&mut self, game: &GameRecord) -> Result<usize> {
        let rows = self.rows_for(game)?;
        for row in &rows {
            self.writer.write_record(row.fields())?;
        }

        for member in &game.members {
            if member.supply_centers == SupplyCenters::Unparseable {
                self.unparseable += 1;
                tracing::warn!(
                    "Game {}: no supply-center count or defeat notice for {}, writing 0",
                    game.game_id,
                    member.country
                );
            }
        }

        self.rows += rows.len();
        Ok(rows.len())
    }

    pub fn rows_written(&self) -> usize {
        self.rows
    }

    pub fn unparseable(&self) -> usize {
        self.unparseable
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| ScrapeError::Io(e.into_error()))
    }
}
