/// Input/output helpers shared by the taxonomy loader and the catalog filter
use crate::TaxFilterError;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const READ_BUFFER_SIZE: usize = 1 << 20;

/// Whether a path should be read through the gzip decoder
pub fn is_gzipped(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("gz")
}

/// Open a line-oriented input, transparently decompressing `.gz` files.
///
/// Multi-member gzip streams (as produced by `cat a.gz b.gz`) are read to the end.
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>, TaxFilterError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TaxFilterError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    if is_gzipped(path) {
        let decoder = MultiGzDecoder::new(BufReader::new(file));
        Ok(Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, decoder)))
    } else {
        Ok(Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, file)))
    }
}

/// Open the primary output: a file when a path is given, stdout otherwise
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, TaxFilterError> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| TaxFilterError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
