//! Printing a token table for humans or for other programs.
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use strum::EnumString;
use tokenbin::{Entry, TokenTable};

/// Which count to rank tokens by in a report
#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumString, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ReportOrder {
    /// Most frequent tokens first
    Frequency,

    /// Tokens found in the most documents first
    Documents,
}

impl ReportOrder {
    /// The first `top` entries of the table in this order
    pub fn top(self, table: &TokenTable, top: usize) -> Vec<Arc<Entry>> {
        let mut entries = match self {
            ReportOrder::Frequency => table.by_frequency_descending(),
            ReportOrder::Documents => table.by_document_count_descending(),
        };
        entries.truncate(top);
        entries
    }
}

/// The summary of a table that `tokbin count` prints
#[derive(Debug, Serialize)]
pub struct Report {
    pub total_documents: u64,
    pub total_tokens: u64,
    pub distinct_tokens: usize,
    pub order: String,
    pub entries: Vec<Arc<Entry>>,
}

impl Report {
    pub fn new(table: &TokenTable, order: ReportOrder, top: usize) -> Self {
        Self {
            total_documents: table.total_documents(),
            total_tokens: table.total_tokens(),
            distinct_tokens: table.len(),
            order: order.to_string(),
            entries: order.top(table, top),
        }
    }

    /// Write the report as an aligned plain text table
    pub fn write_text(&self, mut out: impl Write) -> std::io::Result<()> {
        writeln!(out, "documents:       {}", self.total_documents)?;
        writeln!(out, "tokens:          {}", self.total_tokens)?;
        writeln!(out, "distinct tokens: {}", self.distinct_tokens)?;

        if self.entries.is_empty() {
            return Ok(());
        }

        let width = self
            .entries
            .iter()
            .map(|entry| entry.name().chars().count())
            .max()
            .unwrap_or(0)
            .max("token".len());

        writeln!(out)?;
        writeln!(out, "{:<width$}  {:>10}  {:>10}", "token", "frequency", "documents")?;
        for entry in &self.entries {
            writeln!(
                out,
                "{:<width$}  {:>10}  {:>10}",
                entry.name(),
                entry.frequency(),
                entry.document_count()
            )?;
        }

        Ok(())
    }

    pub fn write_json(&self, mut out: impl Write) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut out, self)?;
        writeln!(out)?;
        Ok(())
    }
}
