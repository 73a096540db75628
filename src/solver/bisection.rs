use tracing::trace;

use super::{report, Interval, DEFAULT_MAX_ITER};
use crate::bracket::{brackets_root, Bounds, BracketSearch};
use crate::{Solution, Solver, Status, Step};

/// Root finding via Bisection Method.
///
/// It always converges given a valid starting bracket, but the speed of
/// convergence is linear.  Stops once the bracket is narrower than `tol` and
/// returns its midpoint.
pub struct Bisection<F>
where
    F: Fn(f64) -> f64,
{
    f: F,
    interval: Interval,
    tol: f64,
    max_it: usize,
}

impl<F> Bisection<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(f: F, a: f64, b: f64, tol: f64) -> Bisection<F> {
        Bisection::with_search(f, a, b, tol, BracketSearch::default())
    }

    /// Like `new`, with explicit parameters for repairing `[a,b]`.
    pub fn with_search(f: F, a: f64, b: f64, tol: f64, search: BracketSearch) -> Bisection<F> {
        let interval = Interval::establish(&f, a, b, &search);
        Bisection {
            f,
            interval,
            tol,
            max_it: DEFAULT_MAX_ITER,
        }
    }

    pub fn max_iterations(self, max_it: usize) -> Bisection<F> {
        Bisection { max_it, ..self }
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    fn run(&self, observe: &mut dyn FnMut(&Step)) -> Solution {
        let f = &self.f;
        let (mut window, mut f_a, _) = match self.interval.start(f, self.max_it) {
            Ok(start) => start,
            Err(done) => return done,
        };

        for it in 1..=self.max_it {
            // convergence criteria
            if window.size() < self.tol {
                return Solution::found(window.middle(), it - 1);
            }

            let mid = window.middle();
            let f_mid = f(mid);
            if f_mid == 0.0 {
                return Solution::found(mid, it);
            }

            if brackets_root(f_a, f_mid) {
                window = Bounds::new(window.a(), mid);
            } else {
                window = Bounds::new(mid, window.b());
                f_a = f_mid;
            }

            trace!(it, a = window.a(), b = window.b(), "bisect");
            observe(&Step {
                iteration: it,
                x: mid,
                fx: f_mid,
                bracket: Some(window.clone()),
            });
        }

        if window.size() < self.tol {
            return Solution::found(window.middle(), self.max_it);
        }
        Solution::stopped(window.middle(), self.max_it, Status::IterationLimit)
    }
}

impl<F> Solver for Bisection<F>
where
    F: Fn(f64) -> f64,
{
    fn solve_traced(&self, observe: &mut dyn FnMut(&Step)) -> Solution {
        report("bisection", self.run(observe))
    }
}
