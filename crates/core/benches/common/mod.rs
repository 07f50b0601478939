use std::env;
use std::time::Duration;

use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, Criterion, Throughput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchTier {
    Quick,
    Full,
}

impl BenchTier {
    pub fn from_env() -> Self {
        match env::var("GLYPHFLOW_BENCH_TIER").as_deref() {
            Ok("full") => Self::Full,
            _ => Self::Quick,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupWeight {
    Light,
    Heavy,
}

#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub tier: BenchTier,
    pub seed: u64,
    pub sample_size_light: usize,
    pub sample_size_heavy: usize,
    pub measurement_light: Duration,
    pub measurement_heavy: Duration,
}

pub fn bench_config() -> BenchConfig {
    let tier = BenchTier::from_env();
    let seed = env::var("GLYPHFLOW_BENCH_SEED")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0xC0FFEE);
    let (sample_size_light, sample_size_heavy, measurement_light, measurement_heavy) = match tier {
        BenchTier::Quick => (20, 12, Duration::from_secs(3), Duration::from_secs(5)),
        BenchTier::Full => (30, 20, Duration::from_secs(5), Duration::from_secs(10)),
    };

    BenchConfig {
        tier,
        seed,
        sample_size_light,
        sample_size_heavy,
        measurement_light,
        measurement_heavy,
    }
}

pub fn configure_group<M: Measurement>(
    group: &mut BenchmarkGroup<'_, M>,
    cfg: &BenchConfig,
    weight: GroupWeight,
) {
    match weight {
        GroupWeight::Light => {
            group.sample_size(cfg.sample_size_light);
            group.measurement_time(cfg.measurement_light);
        }
        GroupWeight::Heavy => {
            group.sample_size(cfg.sample_size_heavy);
            group.measurement_time(cfg.measurement_heavy);
        }
    }
}

pub type BenchCriterion = Criterion;

pub fn bench_criterion() -> BenchCriterion {
    Criterion::default().configure_from_args()
}

pub fn runs_throughput(runs: usize) -> Throughput {
    Throughput::Elements(runs as u64)
}

#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    pub fn gen_f64(&mut self, min: f64, max: f64) -> f64 {
        let n = self.next_u64() as f64 / u64::MAX as f64;
        min + (max - min) * n
    }

    pub fn gen_range(&mut self, max: usize) -> usize {
        (self.next_u64() % max.max(1) as u64) as usize
    }
}
