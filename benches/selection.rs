#![forbid(unsafe_code)]
#![allow(missing_docs)]

use contagion::{NodeId, SubsetSelector, UserGraph};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const USER_COUNT: usize = 20_000;

fn random_graph(users: usize, edges: usize, seed: u64) -> UserGraph {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut graph = UserGraph::new();
    let ids: Vec<NodeId> = (0..users)
        .map(|i| graph.add_user(format!("u{i}"), 0).expect("add user"))
        .collect();
    for _ in 0..edges {
        let u = ids[rng.gen_range(0..users)];
        let v = ids[rng.gen_range(0..users)];
        graph.add_edge(u, v).expect("add edge");
    }
    graph
}

fn components(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph/components");
    group.sample_size(30);
    for edges in [USER_COUNT / 4, USER_COUNT / 2] {
        let mut graph = random_graph(USER_COUNT, edges, 7);
        group.throughput(Throughput::Elements(USER_COUNT as u64));
        group.bench_with_input(BenchmarkId::new("discover", edges), &edges, |b, _| {
            b.iter(|| black_box(graph.connected_components().len()));
        });
    }
    group.finish();
}

fn selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph/selection");
    group.sample_size(20);
    let mut graph = random_graph(USER_COUNT, USER_COUNT / 2, 11);
    let sizes: Vec<usize> = graph
        .connected_components()
        .iter()
        .map(|component| component.size)
        .collect();
    let selector = SubsetSelector::new();
    for budget in [100usize, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::new("maximize", budget), &budget, |b, &budget| {
            b.iter(|| black_box(selector.select_max(&sizes, budget).expect("select")));
        });
    }
    group.finish();
}

fn limited_infection(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph/limited_infection");
    group.sample_size(20);
    let mut graph = random_graph(USER_COUNT, USER_COUNT / 2, 13);
    let mut version = 0i64;
    group.bench_function("budget_1000", |b| {
        b.iter(|| {
            version += 1;
            black_box(graph.limited_infection(1_000, version).expect("infect"))
        });
    });
    group.finish();
}

criterion_group!(benches, components, selection, limited_infection);
criterion_main!(benches);
