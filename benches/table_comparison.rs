use std::collections::HashMap as StdHashMap;
use std::hash::BuildHasher;
use std::hash::Hash;
use std::hint::black_box;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap as HashbrownHashMap;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;
use symtab_hash::LinearProbingTable;
use symtab_hash::SeparateChainingTable;

#[derive(Clone, Copy, Default)]
struct SipHashBuilder;

impl BuildHasher for SipHashBuilder {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new()
    }
}

trait BenchKey: Clone + Eq + Hash {
    fn new(id: u64) -> Self;
}

impl BenchKey for u64 {
    fn new(id: u64) -> Self {
        black_box(id)
    }
}

impl BenchKey for String {
    fn new(id: u64) -> Self {
        black_box(format!("key_{:016X}", id))
    }
}

trait BenchMap<K> {
    const NAME: &'static str;

    fn empty() -> Self;
    fn preallocated(capacity: usize) -> Self;
    fn insert(&mut self, key: K, value: u64) -> Option<u64>;
    fn get(&self, key: &K) -> Option<&u64>;
    fn remove(&mut self, key: &K) -> Option<u64>;
}

impl<K> BenchMap<K> for LinearProbingTable<K, u64, SipHashBuilder>
where
    K: BenchKey,
{
    const NAME: &'static str = "linear_probing";

    fn empty() -> Self {
        LinearProbingTable::with_hasher(SipHashBuilder)
    }

    fn preallocated(capacity: usize) -> Self {
        LinearProbingTable::with_capacity_and_hasher(capacity, SipHashBuilder)
    }

    fn insert(&mut self, key: K, value: u64) -> Option<u64> {
        LinearProbingTable::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&u64> {
        LinearProbingTable::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<u64> {
        LinearProbingTable::remove(self, key)
    }
}

impl<K> BenchMap<K> for SeparateChainingTable<K, u64, SipHashBuilder>
where
    K: BenchKey,
{
    const NAME: &'static str = "separate_chaining";

    fn empty() -> Self {
        SeparateChainingTable::with_hasher(SipHashBuilder)
    }

    fn preallocated(capacity: usize) -> Self {
        SeparateChainingTable::with_capacity_and_hasher(capacity, SipHashBuilder)
    }

    fn insert(&mut self, key: K, value: u64) -> Option<u64> {
        SeparateChainingTable::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&u64> {
        SeparateChainingTable::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<u64> {
        SeparateChainingTable::remove(self, key)
    }
}

impl<K> BenchMap<K> for StdHashMap<K, u64, SipHashBuilder>
where
    K: BenchKey,
{
    const NAME: &'static str = "std_hash_map";

    fn empty() -> Self {
        StdHashMap::with_hasher(SipHashBuilder)
    }

    fn preallocated(capacity: usize) -> Self {
        StdHashMap::with_capacity_and_hasher(capacity, SipHashBuilder)
    }

    fn insert(&mut self, key: K, value: u64) -> Option<u64> {
        StdHashMap::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&u64> {
        StdHashMap::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<u64> {
        StdHashMap::remove(self, key)
    }
}

impl<K> BenchMap<K> for HashbrownHashMap<K, u64, SipHashBuilder>
where
    K: BenchKey,
{
    const NAME: &'static str = "hashbrown";

    fn empty() -> Self {
        HashbrownHashMap::with_hasher(SipHashBuilder)
    }

    fn preallocated(capacity: usize) -> Self {
        HashbrownHashMap::with_capacity_and_hasher(capacity, SipHashBuilder)
    }

    fn insert(&mut self, key: K, value: u64) -> Option<u64> {
        HashbrownHashMap::insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&u64> {
        HashbrownHashMap::get(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<u64> {
        HashbrownHashMap::remove(self, key)
    }
}

const SIZES: &[usize] = &[
    (1 << 10),
    (1 << 11),
    (1 << 12),
    (1 << 13),
    (1 << 14),
    (1 << 15),
    (1 << 16),
];

fn bench_insert<M, K>(c: &mut Criterion)
where
    M: BenchMap<K>,
    K: BenchKey,
{
    let mut group = c.benchmark_group(format!("insert_{}", std::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let pairs = (0..size as u64)
            .map(|id| (K::new(id), id))
            .collect::<Vec<(K, u64)>>();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new(M::NAME, size), &pairs, |b, pairs| {
            b.iter_batched(
                || {
                    let mut pairs = pairs.clone();
                    pairs.shuffle(&mut SmallRng::from_os_rng());
                    pairs
                },
                |pairs| {
                    let mut table = M::empty();
                    for (key, value) in pairs.into_iter() {
                        black_box(table.insert(key, value));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_insert_preallocated<M, K>(c: &mut Criterion)
where
    M: BenchMap<K>,
    K: BenchKey,
{
    let mut group = c.benchmark_group(format!(
        "insert_preallocated_{}",
        std::any::type_name::<K>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let pairs = (0..size as u64)
            .map(|id| (K::new(id), id))
            .collect::<Vec<(K, u64)>>();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new(M::NAME, size), &pairs, |b, pairs| {
            b.iter_batched(
                || {
                    let mut pairs = pairs.clone();
                    pairs.shuffle(&mut SmallRng::from_os_rng());
                    pairs
                },
                |pairs| {
                    let mut table = M::preallocated(size);
                    for (key, value) in pairs.into_iter() {
                        black_box(table.insert(key, value));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit<M, K>(c: &mut Criterion)
where
    M: BenchMap<K>,
    K: BenchKey,
{
    let mut group = c.benchmark_group(format!("find_hit_{}", std::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let keys = (0..size as u64).map(K::new).collect::<Vec<K>>();

        let mut table = M::preallocated(size);
        for (id, key) in keys.iter().cloned().enumerate() {
            table.insert(key, id as u64);
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new(M::NAME, size), &table, |b, table| {
            b.iter_batched(
                || {
                    let mut probes = keys.clone();
                    probes.shuffle(&mut SmallRng::from_os_rng());
                    probes
                },
                |probes| {
                    for key in probes.iter() {
                        black_box(table.get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_miss<M, K>(c: &mut Criterion)
where
    M: BenchMap<K>,
    K: BenchKey,
{
    let mut group = c.benchmark_group(format!("find_miss_{}", std::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        // Even ids are resident, odd ids are probed.
        let present = (0..2 * size as u64).step_by(2).map(K::new).collect::<Vec<K>>();
        let absent = (1..2 * size as u64).step_by(2).map(K::new).collect::<Vec<K>>();

        let mut table = M::preallocated(size);
        for (id, key) in present.iter().cloned().enumerate() {
            table.insert(key, id as u64);
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new(M::NAME, size), &table, |b, table| {
            b.iter_batched(
                || {
                    let mut probes = absent.clone();
                    probes.shuffle(&mut SmallRng::from_os_rng());
                    probes
                },
                |probes| {
                    for key in probes.iter() {
                        black_box(table.get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_zipf<M, K>(c: &mut Criterion)
where
    M: BenchMap<K>,
    K: BenchKey,
{
    let mut group = c.benchmark_group(format!("find_zipf_{}", std::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let mut table = M::preallocated(size);
        for id in 0..size as u64 {
            table.insert(K::new(id), id);
        }

        // Ids are drawn from twice the resident range, skewed toward the
        // low end. Hot ids hit, the tail misses.
        let distr = Zipf::new(2.0 * size as f32 - 1.0, 1.0).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new(M::NAME, size), &table, |b, table| {
            b.iter_batched(
                || {
                    let mut rng = SmallRng::from_os_rng();
                    (0..size)
                        .map(|_| K::new(rng.sample(distr) as u64 - 1))
                        .collect::<Vec<K>>()
                },
                |probes| {
                    for key in probes.iter() {
                        black_box(table.get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_remove<M, K>(c: &mut Criterion)
where
    M: BenchMap<K>,
    K: BenchKey,
{
    let mut group = c.benchmark_group(format!("remove_{}", std::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        let pairs = (0..size as u64)
            .map(|id| (K::new(id), id))
            .collect::<Vec<(K, u64)>>();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new(M::NAME, size), &pairs, |b, pairs| {
            b.iter_batched(
                || {
                    let mut pairs = pairs.clone();

                    let mut table = M::empty();
                    for (key, value) in pairs.iter().cloned() {
                        table.insert(key, value);
                    }

                    pairs.shuffle(&mut SmallRng::from_os_rng());
                    (table, pairs)
                },
                |(mut table, pairs)| {
                    for (key, _) in pairs.iter() {
                        black_box(table.remove(key));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_churn<M, K>(c: &mut Criterion)
where
    M: BenchMap<K>,
    K: BenchKey,
{
    let mut group = c.benchmark_group(format!("churn_{}", std::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES {
        // Every id appears twice in the shuffled stream. The first
        // occurrence of a key inserts it, the second removes it.
        let stream = (0..size as u64)
            .flat_map(|id| {
                let key = K::new(id);
                [(key.clone(), id), (key, id)]
            })
            .collect::<Vec<(K, u64)>>();

        group.throughput(Throughput::Elements(size as u64 * 2));
        group.bench_with_input(BenchmarkId::new(M::NAME, size), &stream, |b, stream| {
            b.iter_batched(
                || {
                    let mut stream = stream.clone();
                    stream.shuffle(&mut SmallRng::from_os_rng());
                    stream
                },
                |stream| {
                    let mut table = M::empty();
                    for (key, value) in stream.into_iter() {
                        if table.remove(&key).is_none() {
                            black_box(table.insert(key, value));
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

type ProbingMap<K> = LinearProbingTable<K, u64, SipHashBuilder>;
type ChainingMap<K> = SeparateChainingTable<K, u64, SipHashBuilder>;
type StdMap<K> = StdHashMap<K, u64, SipHashBuilder>;
type BrownMap<K> = HashbrownHashMap<K, u64, SipHashBuilder>;

criterion_group!(
    benches,
    bench_insert::<ProbingMap<u64>, u64>,
    bench_insert::<ChainingMap<u64>, u64>,
    bench_insert::<StdMap<u64>, u64>,
    bench_insert::<BrownMap<u64>, u64>,
    bench_insert::<ProbingMap<String>, String>,
    bench_insert::<ChainingMap<String>, String>,
    bench_insert::<StdMap<String>, String>,
    bench_insert::<BrownMap<String>, String>,
    bench_insert_preallocated::<ProbingMap<u64>, u64>,
    bench_insert_preallocated::<ChainingMap<u64>, u64>,
    bench_insert_preallocated::<StdMap<u64>, u64>,
    bench_insert_preallocated::<BrownMap<u64>, u64>,
    bench_insert_preallocated::<ProbingMap<String>, String>,
    bench_insert_preallocated::<ChainingMap<String>, String>,
    bench_insert_preallocated::<StdMap<String>, String>,
    bench_insert_preallocated::<BrownMap<String>, String>,
    bench_find_hit::<ProbingMap<u64>, u64>,
    bench_find_hit::<ChainingMap<u64>, u64>,
    bench_find_hit::<StdMap<u64>, u64>,
    bench_find_hit::<BrownMap<u64>, u64>,
    bench_find_hit::<ProbingMap<String>, String>,
    bench_find_hit::<ChainingMap<String>, String>,
    bench_find_hit::<StdMap<String>, String>,
    bench_find_hit::<BrownMap<String>, String>,
    bench_find_miss::<ProbingMap<u64>, u64>,
    bench_find_miss::<ChainingMap<u64>, u64>,
    bench_find_miss::<StdMap<u64>, u64>,
    bench_find_miss::<BrownMap<u64>, u64>,
    bench_find_miss::<ProbingMap<String>, String>,
    bench_find_miss::<ChainingMap<String>, String>,
    bench_find_miss::<StdMap<String>, String>,
    bench_find_miss::<BrownMap<String>, String>,
    bench_find_zipf::<ProbingMap<u64>, u64>,
    bench_find_zipf::<ChainingMap<u64>, u64>,
    bench_find_zipf::<StdMap<u64>, u64>,
    bench_find_zipf::<BrownMap<u64>, u64>,
    bench_find_zipf::<ProbingMap<String>, String>,
    bench_find_zipf::<ChainingMap<String>, String>,
    bench_find_zipf::<StdMap<String>, String>,
    bench_find_zipf::<BrownMap<String>, String>,
    bench_remove::<ProbingMap<u64>, u64>,
    bench_remove::<ChainingMap<u64>, u64>,
    bench_remove::<StdMap<u64>, u64>,
    bench_remove::<BrownMap<u64>, u64>,
    bench_remove::<ProbingMap<String>, String>,
    bench_remove::<ChainingMap<String>, String>,
    bench_remove::<StdMap<String>, String>,
    bench_remove::<BrownMap<String>, String>,
    bench_churn::<ProbingMap<u64>, u64>,
    bench_churn::<ChainingMap<u64>, u64>,
    bench_churn::<StdMap<u64>, u64>,
    bench_churn::<BrownMap<u64>, u64>,
    bench_churn::<ProbingMap<String>, String>,
    bench_churn::<ChainingMap<String>, String>,
    bench_churn::<StdMap<String>, String>,
    bench_churn::<BrownMap<String>, String>,
);
criterion_main!(benches);
