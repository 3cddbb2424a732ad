use chain_hashmap::ChainMap;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_add(c: &mut Criterion) {
    c.bench_function("chain_map_add_10k", |b| {
        b.iter_batched(
            ChainMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.add_int(key(x), i as i32);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("chain_map_get_hit", |b| {
        let mut m: ChainMap<String, u64> = ChainMap::new();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            m.add_int(k.clone(), i as i32);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get_int(k.as_str()))
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("chain_map_get_miss", |b| {
        let mut m: ChainMap<String, u64> = ChainMap::new();
        for (i, x) in lcg(7).take(20_000).enumerate() {
            m.add_int(key(x), i as i32);
        }
        let misses: Vec<_> = lcg(99).take(4_096).map(|x| format!("m{x:016x}")).collect();
        let mut it = misses.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get_int(k.as_str()))
        })
    });
}

fn bench_replace_hot(c: &mut Criterion) {
    c.bench_function("chain_map_replace_hot_key", |b| {
        let mut m: ChainMap<String, u64> = ChainMap::new();
        m.add_int("hot".to_string(), 0);
        let mut n = 0i32;
        b.iter(|| {
            n = n.wrapping_add(1);
            black_box(m.replace_int("hot".to_string(), n))
        })
    });
}

fn bench_iterate(c: &mut Criterion) {
    c.bench_function("chain_map_iterate_10k", |b| {
        let mut m: ChainMap<String, u64> = ChainMap::new();
        for (i, x) in lcg(3).take(10_000).enumerate() {
            m.add_int(key(x), i as i32);
        }
        b.iter(|| {
            let mut acc = 0i64;
            for (_k, v) in m.iter() {
                if let Some(n) = v.as_int() {
                    acc += i64::from(n);
                }
            }
            black_box(acc)
        })
    });
}

fn benches(c: &mut Criterion) {
    bench_add(c);
    bench_get_hit(c);
    bench_get_miss(c);
    bench_replace_hot(c);
    bench_iterate(c);
}

criterion_group! {
    name = suite;
    config = Criterion::default().measurement_time(Duration::from_secs(3));
    targets = benches
}
criterion_main!(suite);
