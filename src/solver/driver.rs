use tracing::trace;

use crate::convergence::IsConverged;
use crate::wrap::RealFnEval;
use crate::{Solution, Status, Step};

/// Runs an open iteration from `start` for at most `max_iter` steps.
///
/// `iterate` maps `(x, f(x))` to the next iterate, or to the `Status` that
/// makes the step undefined.  Every accepted iterate goes to `observe` and is
/// then tested against `finish`.
///
/// The returned `Solution` is `Converged` at the first iterate that passes
/// `finish`.  Otherwise it holds the last iterate a step was attempted from,
/// with the status from `iterate` or `IterationLimit`.
///
/// # Panics
/// If `start` is not finite.
pub fn iterative_root_find<F, I, C>(
    f: &F,
    iterate: &I,
    start: f64,
    finish: &C,
    max_iter: usize,
    observe: &mut dyn FnMut(&Step),
) -> Solution
where
    F: RealFnEval,
    I: Fn(&F, f64, f64) -> Result<f64, Status>,
    C: IsConverged,
{
    assert!(start.is_finite());

    let mut x_pre = start;
    let mut f_pre = f.eval_f(x_pre);

    // stay inside maximum iteration count
    for it in 1..=max_iter {
        // invoke iteration method
        let x_cur = match iterate(f, x_pre, f_pre) {
            Ok(x) => x,
            Err(status) => return Solution::stopped(x_pre, it - 1, status),
        };
        let f_cur = f.eval_f(x_cur);

        trace!(it, x = x_cur, fx = f_cur, "iterate");
        observe(&Step {
            iteration: it,
            x: x_cur,
            fx: f_cur,
            bracket: None,
        });

        // check convergence
        if finish.is_converged(x_pre, x_cur, f_cur) {
            return Solution::found(x_cur, it);
        }

        x_pre = x_cur;
        f_pre = f_cur;
    }
    Solution::stopped(x_pre, max_iter, Status::IterationLimit)
}
