//! Extraction of typing results from chat exports.
//!  The basic idea is:
//!   - Exports are numbered html pages, read one after another until one is missing.
//!   - Each `text` element of a page is checked for a result tag.
//!   - A tag becomes a [entities::Sample] once the date of its message is found.

pub mod document;
pub mod entities;
pub mod export_source;
pub mod tag;

use anyhow::Result;
use futures::StreamExt;
use tracing::{debug, instrument};

use document::{extract_document, MessageOutcome};
use entities::Sample;
use export_source::{discover_exports, ExportSource};
use tag::TagPattern;

/// Samples from every export, in file then document order.
#[derive(Debug, Default)]
pub struct Extraction {
    pub samples: Vec<Sample>,
    /// Export name with the number of matched tags in it.
    pub files: Vec<(String, usize)>,
}

/// Processes exports one at a time. `report` is called for every file with its name and outcomes
/// before the next file is read.
#[instrument(skip(source, report))]
pub async fn extract_all(
    source: impl ExportSource + 'static,
    pattern: &TagPattern,
    mut report: impl FnMut(&str, &[MessageOutcome]) -> Result<()>,
) -> Result<Extraction> {
    let mut exports = std::pin::pin!(discover_exports(source));
    let mut extraction = Extraction::default();

    while let Some(export) = exports.next().await.transpose()? {
        let outcomes = extract_document(&export.content, pattern)?;
        report(&export.name, &outcomes)?;

        let matches = outcomes.iter().filter(|v| v.is_match()).count();
        debug!("{} matches in {}", matches, export.name);

        extraction
            .samples
            .extend(outcomes.iter().filter_map(|v| v.sample()).copied());
        extraction.files.push((export.name, matches));
    }

    Ok(extraction)
}
