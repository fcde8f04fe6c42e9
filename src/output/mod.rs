//! Output module for crawl results
//!
//! This module handles:
//! - Ranking the word tally into the popular-words list
//! - The `CrawlResult` type returned by a crawl
//! - Writing results as JSON

mod ranking;
mod result;

pub use ranking::{compare_popularity, rank};
pub use result::CrawlResult;

use crate::CrawlerError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a crawl result as pretty-printed JSON
///
/// # Arguments
///
/// * `result` - The result to write
/// * `writer` - Destination for the JSON document
pub fn write_result<W: Write>(result: &CrawlResult, writer: &mut W) -> Result<(), CrawlerError> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Writes a crawl result to a file, replacing any previous contents
///
/// # Example
///
/// ```no_run
/// use parcrawl::output::{write_result_to_path, CrawlResult};
/// use std::path::Path;
///
/// let result = CrawlResult::new(vec![("rust".to_string(), 12)], 4, 0);
/// write_result_to_path(&result, Path::new("result.json")).unwrap();
/// ```
pub fn write_result_to_path(result: &CrawlResult, path: &Path) -> Result<(), CrawlerError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_result(result, &mut writer)?;
    tracing::info!("Wrote crawl result to {}", path.display());
    Ok(())
}
