use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dupsearch::duplicates::{DuplicateFinder, Grouper};
use dupsearch::scanner::{Hasher, Walker, WalkerConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Binary tree of directories, `files_per_dir` files at each level.
/// Every fourth file shares content with the others of its residue class.
fn populate(path: &Path, depth: usize, files_per_dir: usize) {
    fs::create_dir_all(path).unwrap();
    for i in 0..files_per_dir {
        fs::write(
            path.join(format!("file_{}.txt", i)),
            format!("content class {}", i % 4),
        )
        .unwrap();
    }
    if depth > 1 {
        for i in 0..2 {
            populate(&path.join(format!("dir_{}", i)), depth - 1, files_per_dir);
        }
    }
}

fn bench_walker(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    populate(temp_dir.path(), 4, 10);

    c.bench_function("walker_150_files", |b| {
        b.iter(|| {
            let walker = Walker::new(temp_dir.path(), WalkerConfig::default());
            black_box(walker.walk().count());
        })
    });
}

fn bench_hasher(c: &mut Criterion) {
    let mut group = c.benchmark_group("hasher");
    let temp_dir = TempDir::new().unwrap();
    let hasher = Hasher::new();

    for size_kb in [1usize, 1024, 10240] {
        let path = temp_dir.path().join(format!("{}kb.bin", size_kb));
        fs::write(&path, vec![0xA5u8; size_kb * 1024]).unwrap();

        group.throughput(Throughput::Bytes((size_kb * 1024) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size_kb), &path, |b, p| {
            b.iter(|| black_box(hasher.full_hash(p).unwrap()))
        });
    }
    group.finish();
}

fn bench_grouper(c: &mut Criterion) {
    let records: Vec<(PathBuf, [u8; 32])> = (0..10_000u32)
        .map(|i| {
            let mut hash = [0u8; 32];
            hash[..4].copy_from_slice(&(i % 2_500).to_le_bytes());
            (PathBuf::from(format!("/bench/{}", i)), hash)
        })
        .collect();

    c.bench_function("grouper_10k_records", |b| {
        b.iter(|| {
            let mut grouper = Grouper::new();
            for (path, hash) in &records {
                grouper.record(path.clone(), *hash);
            }
            black_box(grouper.into_groups())
        })
    });
}

fn bench_full_scan(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    populate(temp_dir.path(), 4, 10);
    let finder = DuplicateFinder::with_defaults();

    c.bench_function("full_scan_150_files", |b| {
        b.iter(|| black_box(finder.find_duplicates(temp_dir.path()).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_walker,
    bench_hasher,
    bench_grouper,
    bench_full_scan
);
criterion_main!(benches);
