use core::hash::BuildHasherDefault;
use core::hash::Hash;
use core::hint::black_box;
use std::collections::HashSet as StdHashSet;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashSet as HashbrownSet;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use rh_set::RobinHoodSet;
use siphasher::sip::SipHasher;

type Sip = BuildHasherDefault<SipHasher>;

trait BenchKey: Clone + Hash + Eq {
    fn new(key: u64) -> Self;
}

#[derive(Clone, Hash, PartialEq, Eq)]
struct SmallKey(u64);

impl BenchKey for SmallKey {
    fn new(key: u64) -> Self {
        black_box(Self(key))
    }
}

#[derive(Clone, Hash, PartialEq, Eq)]
struct StringKey(String);

impl BenchKey for StringKey {
    fn new(key: u64) -> Self {
        black_box(Self(format!("key_{:016X}", key)))
    }
}

/// The operations every benchmarked set supports.
trait BenchSet<K> {
    fn create() -> Self;
    fn insert_key(&mut self, key: K) -> bool;
    fn contains_key(&self, key: &K) -> bool;
    fn remove_key(&mut self, key: &K) -> bool;
}

impl<K: Hash + Eq> BenchSet<K> for RobinHoodSet<K, Sip> {
    fn create() -> Self {
        RobinHoodSet::new()
    }

    fn insert_key(&mut self, key: K) -> bool {
        self.insert(key)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.contains(key)
    }

    fn remove_key(&mut self, key: &K) -> bool {
        self.remove(key)
    }
}

impl<K: Hash + Eq> BenchSet<K> for HashbrownSet<K, Sip> {
    fn create() -> Self {
        HashbrownSet::default()
    }

    fn insert_key(&mut self, key: K) -> bool {
        self.insert(key)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.contains(key)
    }

    fn remove_key(&mut self, key: &K) -> bool {
        self.remove(key)
    }
}

impl<K: Hash + Eq> BenchSet<K> for StdHashSet<K, Sip> {
    fn create() -> Self {
        StdHashSet::default()
    }

    fn insert_key(&mut self, key: K) -> bool {
        self.insert(key)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.contains(key)
    }

    fn remove_key(&mut self, key: &K) -> bool {
        self.remove(key)
    }
}

const SIZES: &[usize] = &[
    (1 << 10),
    (1 << 12),
    (1 << 14),
    (1 << 16),
    (1 << 18),
];

fn random_keys<K: BenchKey>(count: usize) -> Vec<K> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| K::new(rng.try_next_u64().unwrap()))
        .collect()
}

fn bench_insert_random<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("insert_random_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    fn run<K: BenchKey, S: BenchSet<K>>(
        group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
        name: &str,
        keys: &[K],
    ) {
        group.bench_function(name, |b| {
            b.iter_batched(
                || {
                    let mut keys = keys.to_vec();
                    keys.shuffle(&mut SmallRng::from_os_rng());
                    keys
                },
                |keys| {
                    let mut set = S::create();
                    for key in keys {
                        black_box(set.insert_key(key));
                    }
                    black_box(set)
                },
                BatchSize::SmallInput,
            )
        });
    }

    for &size in &SIZES[..=MAX_SIZE] {
        let keys = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));
        run::<K, RobinHoodSet<K, Sip>>(&mut group, &format!("rh_set/{size}"), &keys);
        run::<K, HashbrownSet<K, Sip>>(&mut group, &format!("hashbrown/{size}"), &keys);
        run::<K, StdHashSet<K, Sip>>(&mut group, &format!("std/{size}"), &keys);
    }

    group.finish();
}

fn bench_find_hit_miss<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_hit_miss_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    fn run<K: BenchKey, S: BenchSet<K>>(
        group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
        name: &str,
        present: &[K],
        probes: &[K],
    ) {
        let mut set = S::create();
        for key in present.iter().cloned() {
            set.insert_key(key);
        }

        group.bench_function(name, |b| {
            b.iter(|| {
                for key in probes {
                    black_box(set.contains_key(key));
                }
            })
        });
    }

    for &size in &SIZES[..=MAX_SIZE] {
        let present = random_keys::<K>(size);
        let mut probes = random_keys::<K>(size / 2);
        probes.extend(present.iter().take(size / 2).cloned());
        probes.shuffle(&mut SmallRng::from_os_rng());

        group.throughput(Throughput::Elements(probes.len() as u64));
        run::<K, RobinHoodSet<K, Sip>>(&mut group, &format!("rh_set/{size}"), &present, &probes);
        run::<K, HashbrownSet<K, Sip>>(
            &mut group,
            &format!("hashbrown/{size}"),
            &present,
            &probes,
        );
        run::<K, StdHashSet<K, Sip>>(&mut group, &format!("std/{size}"), &present, &probes);
    }

    group.finish();
}

fn bench_remove<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("remove_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    fn run<K: BenchKey, S: BenchSet<K>>(
        group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
        name: &str,
        keys: &[K],
    ) {
        group.bench_function(name, |b| {
            b.iter_batched(
                || {
                    let mut set = S::create();
                    for key in keys.iter().cloned() {
                        set.insert_key(key);
                    }
                    let mut order = keys.to_vec();
                    order.shuffle(&mut SmallRng::from_os_rng());
                    (set, order)
                },
                |(mut set, order)| {
                    for key in &order {
                        black_box(set.remove_key(key));
                    }
                    black_box(set)
                },
                BatchSize::LargeInput,
            )
        });
    }

    for &size in &SIZES[..=MAX_SIZE] {
        let keys = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));
        run::<K, RobinHoodSet<K, Sip>>(&mut group, &format!("rh_set/{size}"), &keys);
        run::<K, HashbrownSet<K, Sip>>(&mut group, &format!("hashbrown/{size}"), &keys);
        run::<K, StdHashSet<K, Sip>>(&mut group, &format!("std/{size}"), &keys);
    }

    group.finish();
}

#[derive(Clone, Copy)]
enum Operation {
    Insert(u64),
    Remove(u64),
    Find(u64),
}

fn bench_mixed_zipf<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("mixed_zipf_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    fn run<K: BenchKey, S: BenchSet<K>>(
        group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
        name: &str,
        operations: &[Operation],
    ) {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut set = S::create();
                for operation in operations {
                    match *operation {
                        Operation::Insert(key) => black_box(set.insert_key(K::new(key))),
                        Operation::Remove(key) => black_box(set.remove_key(&K::new(key))),
                        Operation::Find(key) => black_box(set.contains_key(&K::new(key))),
                    };
                }
                black_box(set)
            })
        });
    }

    for &size in &SIZES[..=MAX_SIZE] {
        let mut rng = SmallRng::from_os_rng();
        let keys = Zipf::new(size as f64 * 2.0, 1.0).unwrap();
        let operations = (0..size * 3)
            .map(|_| {
                let key = rng.sample(keys) as u64;
                match rng.random_range(0..10) {
                    0..=3 => Operation::Insert(key),
                    4..=5 => Operation::Remove(key),
                    _ => Operation::Find(key),
                }
            })
            .collect::<Vec<_>>();

        group.throughput(Throughput::Elements(operations.len() as u64));
        run::<K, RobinHoodSet<K, Sip>>(&mut group, &format!("rh_set/{size}"), &operations);
        run::<K, HashbrownSet<K, Sip>>(&mut group, &format!("hashbrown/{size}"), &operations);
        run::<K, StdHashSet<K, Sip>>(&mut group, &format!("std/{size}"), &operations);
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_random::<SmallKey, 4>,
    bench_insert_random::<StringKey, 3>,
    bench_find_hit_miss::<SmallKey, 4>,
    bench_find_hit_miss::<StringKey, 3>,
    bench_remove::<SmallKey, 4>,
    bench_remove::<StringKey, 3>,
    bench_mixed_zipf::<SmallKey, 4>,
    bench_mixed_zipf::<StringKey, 3>,
);

criterion_main!(benches);
