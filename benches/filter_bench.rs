use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use indicatif::ProgressBar;
use std::hint::black_box;
use std::io::Cursor;
use taxfilter::{filter_records, FilterOptions, TaxonomyGraph, Whitelist};

/// Balanced tree with `fanout` children per node, `levels` deep below root 1
fn generate_taxonomy(fanout: u32, levels: u32) -> TaxonomyGraph {
    let mut pairs = Vec::new();
    let mut frontier = vec![1u32];
    let mut next_id = 2u32;

    for _ in 0..levels {
        let mut next = Vec::with_capacity(frontier.len() * fanout as usize);
        for &parent in &frontier {
            for _ in 0..fanout {
                pairs.push((next_id, parent));
                next.push(next_id);
                next_id += 1;
            }
        }
        frontier = next;
    }

    TaxonomyGraph::from_pairs(pairs)
}

fn generate_catalog(lines: usize, max_taxid: u32) -> String {
    let mut content = String::with_capacity(lines * 40);
    for i in 0..lines {
        let taxid = (i as u32).wrapping_mul(2_654_435_761) % max_taxid + 1;
        content.push_str(&format!("{}\tSpecies {}\tNC_{:06}.1\t{}\tcomplete\n", taxid, i, i, i));
    }
    content
}

fn bench_descendants(c: &mut Criterion) {
    let mut group = c.benchmark_group("taxonomy/descendants");

    for levels in [4u32, 6, 8].iter() {
        let graph = generate_taxonomy(5, *levels);
        group.bench_with_input(BenchmarkId::from_parameter(levels), levels, |b, _| {
            b.iter(|| black_box(graph.descendants(1)));
        });
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog/filter");
    let graph = generate_taxonomy(5, 7);
    let (whitelist, _) = Whitelist::build(&graph, &[2], &[7]);

    for lines in [10_000usize, 100_000].iter() {
        let catalog = generate_catalog(*lines, 90_000);
        group.throughput(Throughput::Elements(*lines as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), lines, |b, _| {
            b.iter(|| {
                let summary = filter_records(
                    Cursor::new(catalog.as_bytes()),
                    &whitelist,
                    std::io::sink(),
                    &FilterOptions::default(),
                    &ProgressBar::hidden(),
                )
                .unwrap();
                black_box(summary);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_descendants, bench_filter);
criterion_main!(benches);
