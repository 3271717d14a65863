/// NCBI taxonomy parent/child graph and descendant closures
use crate::utils::io::open_input;
use crate::TaxFilterError;
use indicatif::ProgressBar;
use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::path::Path;

pub type TaxonId = u32;

/// All taxa transitively reachable from a root, root excluded
pub type DescendantSet = HashSet<TaxonId>;

/// Field separator used by the NCBI `*.dmp` dump files
pub const DMP_FIELD_SEPARATOR: &str = "\t|\t";

/// Lines between progress ticks while loading `nodes.dmp`
pub const DEFAULT_NODES_PROGRESS_INTERVAL: u64 = 100_000;

/// Parse one `nodes.dmp` line into `(taxon_id, parent_id)`.
///
/// Only the first two fields are used; the trailing `\t|` row marker and
/// line terminator are stripped before splitting.
pub fn parse_relation(line: &str) -> Result<(TaxonId, TaxonId), String> {
    let trimmed = line.trim_end_matches(['\n', '\r']);
    let trimmed = trimmed.trim_end_matches("\t|");

    let mut fields = trimmed.split(DMP_FIELD_SEPARATOR);
    let (taxon, parent) = match (fields.next(), fields.next()) {
        (Some(taxon), Some(parent)) => (taxon, parent),
        _ => return Err("expected at least 2 fields".to_string()),
    };

    let taxon_id = taxon
        .trim()
        .parse::<TaxonId>()
        .map_err(|_| format!("invalid taxon id {:?}", taxon))?;
    let parent_id = parent
        .trim()
        .parse::<TaxonId>()
        .map_err(|_| format!("invalid parent id {:?}", parent))?;

    Ok((taxon_id, parent_id))
}

/// Adjacency from each parent taxon to its immediate children.
///
/// Built once and read-only afterwards; share it by reference.
#[derive(Debug, Default, Clone)]
pub struct TaxonomyGraph {
    children: HashMap<TaxonId, Vec<TaxonId>>,
    edges: usize,
}

impl TaxonomyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `child` under `parent`, keeping children in insertion order.
    ///
    /// Self-edges mark the root in NCBI dumps and are not recorded.
    pub fn add_edge(&mut self, child: TaxonId, parent: TaxonId) {
        if child == parent {
            return;
        }
        self.children.entry(parent).or_default().push(child);
        self.edges += 1;
    }

    /// Build a graph from `(child, parent)` pairs
    pub fn from_pairs<I: IntoIterator<Item = (TaxonId, TaxonId)>>(pairs: I) -> Self {
        let mut graph = Self::new();
        for (child, parent) in pairs {
            graph.add_edge(child, parent);
        }
        graph
    }

    /// Parse a `nodes.dmp` stream, failing on the first malformed line
    pub fn from_reader<R: BufRead>(
        mut reader: R,
        progress: &ProgressBar,
        progress_interval: u64,
    ) -> Result<Self, TaxFilterError> {
        let interval = progress_interval.max(1);
        let mut graph = Self::new();
        let mut buf = Vec::new();
        let mut line_number: u64 = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| TaxFilterError::read_failure(line_number + 1, e))?;
            if read == 0 {
                break;
            }
            line_number += 1;

            // Only the two id fields must be valid; other columns may carry any bytes
            let line = String::from_utf8_lossy(&buf);
            let (child, parent) =
                parse_relation(&line).map_err(|reason| TaxFilterError::TaxonomyParse {
                    line: line_number,
                    content: line.trim_end_matches(['\n', '\r']).to_string(),
                    reason,
                })?;
            graph.add_edge(child, parent);

            if line_number % interval == 0 {
                progress.set_position(line_number);
            }
        }

        progress.set_position(line_number);
        tracing::debug!(
            lines = line_number,
            parents = graph.parent_count(),
            edges = graph.edge_count(),
            "taxonomy graph built"
        );
        Ok(graph)
    }

    /// Load `nodes.dmp` (optionally gzip-compressed) from disk
    pub fn load_nodes<P: AsRef<Path>>(
        path: P,
        progress: &ProgressBar,
        progress_interval: u64,
    ) -> Result<Self, TaxFilterError> {
        let path = path.as_ref();
        tracing::info!("Reading NCBI taxonomy from {}", path.display());
        let reader = open_input(path)?;
        Self::from_reader(reader, progress, progress_interval).map_err(|e| e.at_path(path))
    }

    /// Immediate children of a taxon, empty for leaves and unknown ids
    pub fn children(&self, taxon_id: TaxonId) -> &[TaxonId] {
        self.children
            .get(&taxon_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_children(&self, taxon_id: TaxonId) -> bool {
        self.children.contains_key(&taxon_id)
    }

    /// Number of distinct taxa with at least one child
    pub fn parent_count(&self) -> usize {
        self.children.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Every taxon reachable from `root` through child edges, `root` excluded.
    ///
    /// Iterative depth-first walk: stack usage does not grow with taxonomy
    /// depth, and a taxon is expanded at most once so cycles terminate.
    pub fn descendants(&self, root: TaxonId) -> DescendantSet {
        let mut result = DescendantSet::new();
        let mut stack: Vec<TaxonId> = self.children(root).iter().rev().copied().collect();

        while let Some(taxon_id) = stack.pop() {
            if taxon_id == root || !result.insert(taxon_id) {
                continue;
            }
            stack.extend(
                self.children(taxon_id)
                    .iter()
                    .rev()
                    .copied()
                    .filter(|child| *child != root && !result.contains(child)),
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Read};

    const R: TaxonId = 1;
    const A: TaxonId = 2;
    const B: TaxonId = 3;
    const C: TaxonId = 4;

    fn small_tree() -> TaxonomyGraph {
        TaxonomyGraph::from_pairs([(A, R), (B, R), (C, A)])
    }

    fn set(ids: &[TaxonId]) -> DescendantSet {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_parse_relation() {
        let line = "10239\t|\t1\t|\tsuperkingdom\t|\t\t|\t9\t|\n";
        assert_eq!(parse_relation(line), Ok((10239, 1)));
        assert_eq!(parse_relation("2\t|\t131567\t|\n"), Ok((2, 131567)));
        assert_eq!(parse_relation("2\t|\t131567\r\n"), Ok((2, 131567)));
    }

    #[test]
    fn test_parse_relation_rejects_malformed() {
        assert!(parse_relation("10239\n").is_err());
        assert!(parse_relation("").is_err());
        assert!(parse_relation("abc\t|\t1\t|\n").is_err());
        assert!(parse_relation("10\t|\t-1\t|\n").is_err());
    }

    #[test]
    fn test_children_keep_input_order() {
        let graph = TaxonomyGraph::from_pairs([(30, 1), (10, 1), (20, 1)]);
        assert_eq!(graph.children(1), &[30, 10, 20]);
        assert_eq!(graph.children(99), &[] as &[TaxonId]);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.parent_count(), 1);
    }

    #[test]
    fn test_self_edge_not_recorded() {
        let graph = TaxonomyGraph::from_pairs([(1, 1), (2, 1)]);
        assert_eq!(graph.children(1), &[2]);
        assert_eq!(graph.descendants(1), set(&[2]));
    }

    #[test]
    fn test_descendants_of_small_tree() {
        let graph = small_tree();
        assert_eq!(graph.descendants(R), set(&[A, B, C]));
        assert_eq!(graph.descendants(A), set(&[C]));
        assert_eq!(graph.descendants(B), set(&[]));
        assert_eq!(graph.descendants(12345), set(&[]));
    }

    #[test]
    fn test_descendants_terminate_on_cycle() {
        let graph = TaxonomyGraph::from_pairs([(20, 10), (10, 20), (30, 20)]);
        assert_eq!(graph.descendants(10), set(&[20, 30]));
        assert_eq!(graph.descendants(20), set(&[10, 30]));
    }

    #[test]
    fn test_descendants_of_deep_chain() {
        let depth: TaxonId = 200_000;
        let graph = TaxonomyGraph::from_pairs((1..depth).map(|id| (id + 1, id)));
        let descendants = graph.descendants(1);
        assert_eq!(descendants.len(), (depth - 1) as usize);
        assert!(descendants.contains(&depth));
        assert!(!descendants.contains(&1));
    }

    #[test]
    fn test_from_reader_reports_line() {
        let dump = "1\t|\t1\t|\tno rank\t|\n2\t|\t1\t|\tsuperkingdom\t|\nbroken line\n";
        let err = TaxonomyGraph::from_reader(Cursor::new(dump), &ProgressBar::hidden(), 1)
            .unwrap_err();
        match err {
            TaxFilterError::TaxonomyParse { line, content, .. } => {
                assert_eq!(line, 3);
                assert_eq!(content, "broken line");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_reader_ignores_bytes_outside_id_fields() {
        let dump: &[u8] = b"10239\t|\t1\t|\tsuperkingdom\t|\n\
                             10240\t|\t10239\t|\tfam\xe9lia\t|\n";
        let graph = TaxonomyGraph::from_reader(dump, &ProgressBar::hidden(), 1).unwrap();
        assert_eq!(graph.children(10239), &[10240]);
    }

    #[test]
    fn test_from_reader_read_failure_names_line() {
        let failing = Cursor::new(b"2\t|\t1\t|\n".to_vec())
            .chain(crate::utils::io::tests::FailingReader);
        let err = TaxonomyGraph::from_reader(
            std::io::BufReader::new(failing),
            &ProgressBar::hidden(),
            1,
        )
        .unwrap_err()
        .at_path("nodes.dmp.gz");

        match err {
            TaxFilterError::Read { path, line, .. } => {
                assert_eq!(path, std::path::PathBuf::from("nodes.dmp.gz"));
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_reader_builds_graph() {
        let dump = "1\t|\t1\t|\tno rank\t|\n\
                    10239\t|\t1\t|\tsuperkingdom\t|\n\
                    131567\t|\t1\t|\tno rank\t|\n\
                    2\t|\t131567\t|\tsuperkingdom\t|\n\
                    10240\t|\t10239\t|\tfamily\t|\n";
        let progress = ProgressBar::hidden();
        let graph = TaxonomyGraph::from_reader(Cursor::new(dump), &progress, 2).unwrap();

        assert_eq!(graph.children(1), &[10239, 131567]);
        assert_eq!(graph.descendants(10239), set(&[10240]));
        assert_eq!(graph.descendants(1), set(&[10239, 131567, 2, 10240]));
        assert_eq!(progress.position(), 5);
    }
}
