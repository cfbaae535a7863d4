//! Common test utilities
#![allow(dead_code)]

use num_traits::NumCast;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Uniform;
use reducr::dtype::Element;
use reducr::ops::{BinaryOp, UnaryOp};
use reducr::reduction::Tolerance;
use reducr::runtime::Runtime;
use reducr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime, ParallelismConfig};

/// Element counts exercised by every dtype test: tiny, odd, and just past
/// a power-of-ten boundary.
pub const BOUNDARY_SIZES: [usize; 5] = [17, 999, 1, 5, 1001];

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (client, device)
}

/// CPU clients whose partitions differ from each other and from the default
pub fn partition_variants() -> Vec<(&'static str, CpuClient)> {
    let device = CpuDevice::new();
    let base = CpuRuntime::default_client(&device);
    vec![
        ("default", base.clone()),
        (
            "single unit",
            base.clone()
                .with_parallelism(ParallelismConfig::new(Some(1), None).with_work_units(1)),
        ),
        (
            "4 threads, chunk 16",
            base.clone()
                .with_parallelism(ParallelismConfig::new(Some(4), Some(16))),
        ),
        (
            "500 units, fan-in 3",
            base.with_parallelism(
                ParallelismConfig::new(Some(2), Some(1))
                    .with_work_units(500)
                    .with_combine_fan_in(3),
            ),
        ),
    ]
}

/// Combiner that faults when two partials of at least `threshold` meet.
///
/// Chunks of up to 256 elements fold one element at a time into a running
/// partial, so on unit inputs it can only fault in the global combine stage.
pub fn colliding_sum(threshold: f64) -> impl BinaryOp<f64> + Copy + 'static {
    reducr::ops::binary_fn(0.0f64, move |a: f64, b: f64| {
        if a >= threshold && b >= threshold {
            panic!("partials {} and {} collided", a, b);
        }
        a + b
    })
}

/// Client that reduces `work_units` chunks of at least one element
pub fn client_with_units(work_units: usize, fan_in: Option<usize>) -> CpuClient {
    let mut config = ParallelismConfig::new(Some(2), Some(1)).with_work_units(work_units);
    if let Some(fan_in) = fan_in {
        config = config.with_combine_fan_in(fan_in);
    }
    CpuRuntime::default_client(&CpuDevice::new()).with_parallelism(config)
}

/// Deterministic values drawn uniformly from `[lo, hi)`
pub fn fill_uniform<T: Element>(len: usize, lo: f64, hi: f64, seed: u64) -> Vec<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Uniform::new(lo, hi).expect("valid uniform range");
    (0..len)
        .map(|_| {
            let v: f64 = rng.sample(&dist);
            <T as NumCast>::from(v).expect("value fits element type")
        })
        .collect()
}

/// Sequential left fold from the identity, the reference every reduction is
/// checked against.
pub fn left_fold<T, B, U>(data: &[T], combine_op: &B, transform_op: &U) -> T
where
    T: Element,
    B: BinaryOp<T>,
    U: UnaryOp<T>,
{
    data.iter().fold(combine_op.identity(), |acc, &x| {
        combine_op.combine(acc, transform_op.apply(x))
    })
}

/// Assert a reduction result is within the dtype's default tolerance of the
/// sequential reference
pub fn assert_close<T: Element>(actual: T, expected: T, len: usize, msg: &str) {
    let actual = actual.to_f64().expect("finite cast");
    let expected = expected.to_f64().expect("finite cast");
    let tol = Tolerance::for_dtype(T::DTYPE);
    assert!(
        tol.is_close(actual, expected, len),
        "{}: dtype={}: {} vs {} (diff={:.2e}, tol={:.2e})",
        msg,
        T::DTYPE,
        actual,
        expected,
        (actual - expected).abs(),
        tol.bound(expected, len)
    );
}
