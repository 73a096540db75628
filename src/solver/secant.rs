use tracing::trace;

use super::{is_negligible, report, Interval};
use crate::bracket::BracketSearch;
use crate::convergence::{residual_or_step, AnyOf, DeltaX, FnResidual, IsConverged};
use crate::{Solution, Solver, Status, Step};

/// Root finding using the secant method.
///
/// Starts from the two ends of the (possibly repaired) interval but does not
/// keep a bracket afterwards, so iterates may leave it.  Converges
/// superlinearly near a simple root.  Stops once `|f(x_n+1)| < tola` or
/// `|x_n+1 - x_n| < tol`.
///
/// # Panics
/// Construction panics if `tol` or `tola` is negative or not finite.
pub struct Secant<F>
where
    F: Fn(f64) -> f64,
{
    f: F,
    interval: Interval,
    finish: AnyOf<FnResidual, DeltaX>,
    max_it: usize,
}

impl<F> Secant<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(f: F, a: f64, b: f64, tol: f64, tola: f64, max_it: usize) -> Secant<F> {
        Secant::with_search(f, a, b, tol, tola, max_it, BracketSearch::default())
    }

    pub fn with_search(
        f: F,
        a: f64,
        b: f64,
        tol: f64,
        tola: f64,
        max_it: usize,
        search: BracketSearch,
    ) -> Secant<F> {
        let finish = residual_or_step(tol, tola);
        let interval = Interval::establish(&f, a, b, &search);
        Secant {
            f,
            interval,
            finish,
            max_it,
        }
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    fn run(&self, observe: &mut dyn FnMut(&Step)) -> Solution {
        let f = &self.f;
        let (start, f_a, f_b) = match self.interval.start(f, self.max_it) {
            Ok(start) => start,
            Err(done) => return done,
        };

        let (mut x_pre, mut f_pre) = (start.a(), f_a);
        let (mut x_cur, mut f_cur) = (start.b(), f_b);

        for it in 1..=self.max_it {
            let denom = f_cur - f_pre;
            if is_negligible(denom) {
                return Solution::stopped(x_cur, it - 1, Status::FlatSecant);
            }
            let x_new = x_cur - f_cur * (x_cur - x_pre) / denom;
            if !x_new.is_finite() {
                return Solution::stopped(x_cur, it - 1, Status::IteratedToNaN);
            }
            let f_new = f(x_new);

            trace!(it, x = x_new, fx = f_new, "secant");
            observe(&Step {
                iteration: it,
                x: x_new,
                fx: f_new,
                bracket: None,
            });

            if self.finish.is_converged(x_cur, x_new, f_new) {
                return Solution::found(x_new, it);
            }

            x_pre = x_cur;
            f_pre = f_cur;
            x_cur = x_new;
            f_cur = f_new;
        }
        Solution::stopped(x_cur, self.max_it, Status::IterationLimit)
    }
}

impl<F> Solver for Secant<F>
where
    F: Fn(f64) -> f64,
{
    fn solve_traced(&self, observe: &mut dyn FnMut(&Step)) -> Solution {
        report("secant", self.run(observe))
    }
}
