//! Global combine stage: folds per-chunk partials into one scalar

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::ops::BinaryOp;
use crate::runtime::{Runtime, RuntimeClient};

/// Fold all partial results into the final scalar.
///
/// Sets larger than `fan_in` are split into groups of `fan_in`, each group is
/// folded by one kernel invocation on `client`, and the stage repeats on the
/// group results until at most `fan_in` remain. The remaining partials are
/// folded linearly by a single final launch, so a faulting combiner fails
/// the stage with `DeviceExecution` at every level.
pub(crate) fn combine_partials<R, C, T, B>(
    client: &C,
    mut partials: Vec<T>,
    combine_op: &B,
    fan_in: usize,
) -> Result<T>
where
    R: Runtime,
    C: RuntimeClient<R>,
    T: Element,
    B: BinaryOp<T> + ?Sized,
{
    let fan_in = fan_in.max(2);
    let mut level = 0usize;
    while partials.len() > fan_in {
        let groups: Vec<&[T]> = partials.chunks(fan_in).collect();
        log::trace!(
            "combine level {level}: {} partials in {} groups",
            partials.len(),
            groups.len()
        );
        let next = client.launch(&groups, |group| fold_partials::<T, B>(group, combine_op))?;
        partials = next;
        level += 1;
    }
    let last = [partials.as_slice()];
    client
        .launch(&last, |group| fold_partials::<T, B>(group, combine_op))?
        .pop()
        .ok_or_else(|| Error::Internal("final combine launch returned no result".to_string()))
}

/// Linear fold of partials; a single partial is returned unchanged.
#[inline]
pub(crate) fn fold_partials<T, B>(partials: &[T], combine_op: &B) -> T
where
    T: Element,
    B: BinaryOp<T> + ?Sized,
{
    match partials {
        [] => combine_op.identity(),
        [first, rest @ ..] => rest
            .iter()
            .fold(*first, |acc, &p| combine_op.combine(acc, p)),
    }
}

#[cfg(all(test, feature = "cpu"))]
mod tests {
    use super::*;
    use crate::ops::{Max, Prod, Sum, binary_fn};
    use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};

    fn client() -> CpuClient {
        CpuClient::new(CpuDevice::new())
    }

    #[test]
    fn test_zero_partials_is_identity() {
        let out = combine_partials::<CpuRuntime, _, f64, _>(&client(), Vec::new(), &Prod, 4);
        assert_eq!(out.unwrap(), 1.0);
    }

    #[test]
    fn test_single_partial_unchanged() {
        let out = combine_partials::<CpuRuntime, _, _, _>(&client(), vec![-0.0f32], &Sum, 4);
        let out = out.unwrap();
        assert!(out == 0.0 && out.is_sign_negative());
    }

    #[test]
    fn test_hierarchical_matches_linear() {
        let partials: Vec<f64> = (1..=1000).map(|i| i as f64).collect();
        let linear = fold_partials(&partials, &Sum);
        let tree = combine_partials::<CpuRuntime, _, _, _>(&client(), partials.clone(), &Sum, 3);
        let tree = tree.unwrap();
        assert_eq!(tree, linear);
        assert_eq!(tree, 500_500.0);

        let max = combine_partials::<CpuRuntime, _, _, _>(&client(), partials, &Max, 2);
        assert_eq!(max.unwrap(), 1000.0);
    }

    #[test]
    fn test_final_fold_fault_is_device_execution() {
        let faulty = binary_fn(0.0f64, |a: f64, b: f64| {
            if a >= 2.0 && b >= 2.0 {
                panic!("partials collided");
            }
            a + b
        });
        for fan_in in [2, 64] {
            let result =
                combine_partials::<CpuRuntime, _, _, _>(&client(), vec![2.0; 4], &faulty, fan_in);
            match result.unwrap_err() {
                Error::DeviceExecution { reason, .. } => {
                    assert!(reason.contains("partials collided"), "{reason}")
                }
                other => panic!("expected DeviceExecution, got {:?}", other),
            }
        }
    }
}
