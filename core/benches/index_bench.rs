use criterion::{criterion_group, criterion_main, Criterion};
use movie_core::{Index, MovieRecord};

fn synthetic_catalog(n: usize) -> Vec<MovieRecord> {
    let genres = ["drama", "action", "crime", "comedy", "war", "romance"];
    (0..n)
        .map(|i| {
            MovieRecord::new(
                &format!("Movie {i}: The Sequel!"),
                [genres[i % genres.len()], genres[(i + 1) % genres.len()]],
                [format!("director {}", i % 37), format!("star {}", i % 101), format!("star {}", i % 53)],
            )
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let records = synthetic_catalog(1000);
    c.bench_function("build_1000", |b| b.iter(|| Index::build(records.clone())));
}

fn bench_search(c: &mut Criterion) {
    let (index, _) = Index::build(synthetic_catalog(1000));
    c.bench_function("search_three_terms", |b| b.iter(|| index.search("drama star 7")));
}

criterion_group!(benches, bench_build, bench_search);
criterion_main!(benches);
