/// Shared fixtures for taxfilter integration tests
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Miniature NCBI nodes.dmp: root, viruses, cellular organisms and a few leaves
pub const NODES_DMP: &str = "\
1\t|\t1\t|\tno rank\t|\t\t|\t8\t|\n\
10239\t|\t1\t|\tsuperkingdom\t|\t\t|\t9\t|\n\
131567\t|\t1\t|\tno rank\t|\t\t|\t8\t|\n\
2\t|\t131567\t|\tsuperkingdom\t|\t\t|\t0\t|\n\
2759\t|\t131567\t|\tsuperkingdom\t|\t\t|\t1\t|\n\
9606\t|\t2759\t|\tspecies\t|\tHS\t|\t5\t|\n\
10847\t|\t10239\t|\tspecies\t|\t\t|\t9\t|\n\
10860\t|\t10239\t|\tfamily\t|\t\t|\t9\t|\n\
10863\t|\t10860\t|\tspecies\t|\t\t|\t9\t|\n\
562\t|\t2\t|\tspecies\t|\tEC\t|\t0\t|\n";

/// RefSeq-style catalog rows: taxid, species, accession, GI, ...
pub const CATALOG: &str = "\
9606\tHomo sapiens\tNM_000014.6\t1000001\tcomplete\n\
10847\tEscherichia phage phiX174\tNC_001422.1\t9626372\tcomplete\n\
562\tEscherichia coli\tNZ_CP009072.1\t1000002\tcomplete\n\
10863\tPhage sp.\tNC_000001.1\t9626999\tcomplete\n\
10239\tViruses\tNC_000002.1\t1000003\tcomplete\n";

pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Fixture {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).expect("Failed to write fixture");
        path
    }

    pub fn write_gz(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        write_gzip(&path, contents);
        path
    }
}

pub fn write_gzip(path: &Path, contents: &str) {
    let file = File::create(path).expect("Failed to create gzip fixture");
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(contents.as_bytes())
        .expect("Failed to write gzip fixture");
    encoder.finish().expect("Failed to finish gzip fixture");
}
