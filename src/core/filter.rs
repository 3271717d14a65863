/// Streaming catalog filter: one line in, at most one payload line out
use crate::bio::catalog::{parse_record, CatalogSchema};
use crate::core::whitelist::Whitelist;
use crate::TaxFilterError;
use indicatif::ProgressBar;
use serde::Serialize;
use std::io::{self, BufRead, Write};

/// Lines between progress updates while scanning a catalog
pub const DEFAULT_FILTER_PROGRESS_INTERVAL: u64 = 1_000_000;

#[derive(Debug, Clone)]
pub struct FilterOptions {
    pub schema: CatalogSchema,
    /// Stop after this many lines; `None` scans the whole catalog
    pub limit: Option<u64>,
    pub progress_interval: u64,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            schema: CatalogSchema::default(),
            limit: None,
            progress_interval: DEFAULT_FILTER_PROGRESS_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    /// Catalog lines read
    pub processed: u64,
    /// Payload ids written
    pub matched: u64,
    /// Whether the line limit stopped the scan before end of input
    pub truncated: bool,
    /// Whether the reader of the output went away (e.g. `| head`) before the end
    pub output_closed: bool,
}

/// Scan `reader` and write the payload of every whitelisted record to `writer`.
///
/// Records are emitted in input order. The first malformed line aborts the
/// scan; nothing from that line or later is written. Lines are handled as
/// bytes: only the taxon and payload fields have to be valid UTF-8.
pub fn filter_records<R: BufRead, W: Write>(
    mut reader: R,
    whitelist: &Whitelist,
    mut writer: W,
    options: &FilterOptions,
    progress: &ProgressBar,
) -> Result<FilterSummary, TaxFilterError> {
    let interval = options.progress_interval.max(1);
    let mut summary = FilterSummary::default();
    let mut buf = Vec::new();

    loop {
        if let Some(limit) = options.limit {
            if summary.processed >= limit {
                // Anything past the cap is never considered, not even a read error
                summary.truncated = reader.fill_buf().map(|b| !b.is_empty()).unwrap_or(true);
                break;
            }
        }

        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| TaxFilterError::read_failure(summary.processed + 1, e))?;
        if read == 0 {
            break;
        }
        summary.processed += 1;

        let content = trim_line_end(&buf);
        let record = parse_record(content, options.schema).map_err(|reason| {
            TaxFilterError::MalformedRecord {
                line: summary.processed,
                content: String::from_utf8_lossy(content).into_owned(),
                reason,
            }
        })?;

        if whitelist.contains(record.taxon_id) {
            let written = writer
                .write_all(record.payload.as_bytes())
                .and_then(|_| writer.write_all(b"\n"));
            if output_closed(written)? {
                summary.output_closed = true;
                break;
            }
            summary.matched += 1;
        }

        if summary.processed % interval == 0 {
            progress.set_position(summary.processed);
            tracing::debug!(
                processed = summary.processed,
                matched = summary.matched,
                "catalog progress"
            );
        }
    }

    if !summary.output_closed && output_closed(writer.flush())? {
        summary.output_closed = true;
    }
    progress.set_position(summary.processed);

    if summary.truncated {
        tracing::info!("Stopped after the configured limit of {} lines", summary.processed);
    }
    if summary.output_closed {
        tracing::debug!("Output closed after {} lines", summary.processed);
    }
    Ok(summary)
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    while end > 0 && matches!(line[end - 1], b'\n' | b'\r') {
        end -= 1;
    }
    &line[..end]
}

/// `Ok(true)` when the write failed only because the output pipe was closed
fn output_closed(result: io::Result<()>) -> Result<bool, TaxFilterError> {
    match result {
        Ok(()) => Ok(false),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(true),
        Err(e) => Err(TaxFilterError::Io(e)),
    }
}
