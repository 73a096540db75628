use tracing::trace;

use super::{report, Interval, DEFAULT_MAX_ITER};
use crate::bracket::{brackets_root, Bounds, BracketSearch};
use crate::{Solution, Solver, Status, Step};

/// Root finding via the method of false position.
///
/// Like bisection it keeps a sign-change bracket, but the trial point is where
/// the chord through both ends crosses zero.  Stops once `|f(c)| < tola`.
///
/// For functions strongly convex or concave near the root one end of the
/// bracket never moves and convergence drops to slow linear.  That is the
/// plain method; Brent is the remedy.
pub struct RegulaFalsi<F>
where
    F: Fn(f64) -> f64,
{
    f: F,
    interval: Interval,
    tola: f64,
    max_it: usize,
}

impl<F> RegulaFalsi<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(f: F, a: f64, b: f64, tola: f64) -> RegulaFalsi<F> {
        RegulaFalsi::with_search(f, a, b, tola, BracketSearch::default())
    }

    pub fn with_search(f: F, a: f64, b: f64, tola: f64, search: BracketSearch) -> RegulaFalsi<F> {
        let interval = Interval::establish(&f, a, b, &search);
        RegulaFalsi {
            f,
            interval,
            tola,
            max_it: DEFAULT_MAX_ITER,
        }
    }

    pub fn max_iterations(self, max_it: usize) -> RegulaFalsi<F> {
        RegulaFalsi { max_it, ..self }
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    fn run(&self, observe: &mut dyn FnMut(&Step)) -> Solution {
        let f = &self.f;
        let (mut window, mut f_a, mut f_b) = match self.interval.start(f, self.max_it) {
            Ok(start) => start,
            Err(done) => return done,
        };
        let mut c = window.middle();

        for it in 1..=self.max_it {
            let chord = (window.a() * f_b - window.b() * f_a) / (f_b - f_a);
            if !chord.is_finite() {
                return Solution::stopped(c, it - 1, Status::IteratedToNaN);
            }
            // rounding can leave the chord root a hair outside
            c = chord.max(window.a()).min(window.b());

            let f_c = f(c);
            if f_c == 0.0 || f_c.abs() < self.tola {
                return Solution::found(c, it);
            }

            if brackets_root(f_a, f_c) {
                window = Bounds::new(window.a(), c);
                f_b = f_c;
            } else {
                window = Bounds::new(c, window.b());
                f_a = f_c;
            }

            trace!(it, c, f_c, "false position");
            observe(&Step {
                iteration: it,
                x: c,
                fx: f_c,
                bracket: Some(window.clone()),
            });
        }
        Solution::stopped(c, self.max_it, Status::IterationLimit)
    }
}

impl<F> Solver for RegulaFalsi<F>
where
    F: Fn(f64) -> f64,
{
    fn solve_traced(&self, observe: &mut dyn FnMut(&Step)) -> Solution {
        report("regula falsi", self.run(observe))
    }
}
