use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use json_stash::Store;
use serde_json::json;
use std::hint::black_box;
use std::path::PathBuf;

fn bench_path(name: &str, size: usize) -> PathBuf {
    std::env::temp_dir().join(format!("json_stash_bench_{}_{}.json", name, size))
}

fn bench_set_get_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_get_delete");
    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("cached", size), &size, |b, &size| {
            let path = bench_path("sgd", size);
            let _ = std::fs::remove_file(&path);
            let db = Store::open(&path).unwrap();
            b.iter(|| {
                for i in 0..size {
                    db.set(format!("k{i}"), i).unwrap();
                }
                for i in 0..size {
                    black_box(db.get(&format!("k{i}")).unwrap());
                }
                for i in 0..size {
                    db.delete(&format!("k{i}")).unwrap();
                }
            });
            let _ = std::fs::remove_file(&path);
        });
    }
}

fn bench_get_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    for size in [100, 1000] {
        group.bench_with_input(BenchmarkId::new("cached", size), &size, |b, &size| {
            let path = bench_path("get_cached", size);
            let _ = std::fs::remove_file(&path);
            let db = Store::open(&path).unwrap();
            for i in 0..size {
                db.set(format!("k{i}"), i).unwrap();
            }
            b.iter(|| {
                for i in 0..size {
                    black_box(db.get(&format!("k{i}")).unwrap());
                }
            });
            let _ = std::fs::remove_file(&path);
        });
        group.bench_with_input(
            BenchmarkId::new("read_through", size),
            &size,
            |b, &size| {
                let path = bench_path("get_rt", size);
                let _ = std::fs::remove_file(&path);
                let db = Store::builder(&path).cache(false).build().unwrap();
                for i in 0..size {
                    db.set(format!("k{i}"), i).unwrap();
                }
                b.iter(|| {
                    for i in 0..size {
                        black_box(db.get(&format!("k{i}")).unwrap());
                    }
                });
                let _ = std::fs::remove_file(&path);
            },
        );
    }
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    for size in [100, 1000] {
        group.bench_with_input(BenchmarkId::new("cached", size), &size, |b, &size| {
            let path = bench_path("update", size);
            let _ = std::fs::remove_file(&path);
            let db = Store::open(&path).unwrap();
            for i in 0..size {
                db.set(format!("k{i}"), i).unwrap();
            }
            b.iter(|| {
                for i in 0..size {
                    db.update(&format!("k{i}"), |v| {
                        Ok(json!(v.as_i64().unwrap() + 1))
                    })
                    .unwrap();
                }
            });
            let _ = std::fs::remove_file(&path);
        });
    }
}

fn bench_erase(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase");
    group.sample_size(50);
    for size in [100, 1000] {
        group.bench_with_input(BenchmarkId::new("cached", size), &size, |b, &size| {
            let path = bench_path("erase", size);
            let _ = std::fs::remove_file(&path);
            let db = Store::open(&path).unwrap();
            b.iter(|| {
                for i in 0..size {
                    db.set(format!("k{i}"), i).unwrap();
                }
                db.erase().unwrap();
            });
            let _ = std::fs::remove_file(&path);
        });
    }
}

criterion_group!(
    benches,
    bench_set_get_delete,
    bench_get_modes,
    bench_update,
    bench_erase,
);
criterion_main!(benches);
