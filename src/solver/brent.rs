use tracing::trace;

use super::{report, Interval};
use crate::bracket::{Bounds, BracketSearch};
use crate::{Solution, Solver, Status, Step};

/// Root finding using Brent's method.
///
/// Hybrid of bisection, secant and inverse quadratic interpolation.  Three
/// points are tracked:
///
/// * `b`, the best estimate so far, with `|f(b)| <= |f(c)|`
/// * `c`, the other end of the bracket, `f(c)` opposite in sign to `f(b)`
/// * `a`, the previous value of `b`
///
/// An interpolated step is taken only when it lands inside the bracket and
/// shrinks faster than half the step before last; otherwise the bracket is
/// bisected.  The bracket `[b, c]` therefore never widens, convergence is never
/// slower than bisection, and near a simple root it is superlinear.
///
/// Terminates when `f(b) == 0` or `|c - b| / 2 <= 2*eps*|b| + tol/2`.
///
/// *Brent, R. P. (1973). Algorithms for Minimization without Derivatives,
/// chapter 4.*
pub struct Brent<F>
where
    F: Fn(f64) -> f64,
{
    f: F,
    interval: Interval,
    tol: f64,
    max_it: usize,
}

/// Whether both values are strictly positive or both strictly negative.
fn same_sign(lhs: f64, rhs: f64) -> bool {
    (lhs > 0.0 && rhs > 0.0) || (lhs < 0.0 && rhs < 0.0)
}

impl<F> Brent<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(f: F, a: f64, b: f64, tol: f64, max_it: usize) -> Brent<F> {
        Brent::with_search(f, a, b, tol, max_it, BracketSearch::default())
    }

    pub fn with_search(
        f: F,
        a: f64,
        b: f64,
        tol: f64,
        max_it: usize,
        search: BracketSearch,
    ) -> Brent<F> {
        let interval = Interval::establish(&f, a, b, &search);
        Brent {
            f,
            interval,
            tol,
            max_it,
        }
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    fn run(&self, observe: &mut dyn FnMut(&Step)) -> Solution {
        let f = &self.f;
        let (start, f_lo, f_hi) = match self.interval.start(f, self.max_it) {
            Ok(start) => start,
            Err(done) => return done,
        };

        let (mut a, mut fa) = (start.a(), f_lo);
        let (mut b, mut fb) = (start.b(), f_hi);
        let (mut c, mut fc) = (b, fb);

        // d: current step, e: the step before it
        let mut d = 0.0;
        let mut e = 0.0;

        let mut it = 0;
        loop {
            // restore the sign change between b and c
            if same_sign(fb, fc) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            // keep b the better of the two ends
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            if it > 0 {
                observe(&Step {
                    iteration: it,
                    x: b,
                    fx: fb,
                    bracket: Some(Bounds::spanning(b, c)),
                });
            }

            let delta = 2.0 * f64::EPSILON * b.abs() + 0.5 * self.tol;
            let xm = 0.5 * (c - b);

            // convergence criteria
            if xm.abs() <= delta || fb == 0.0 {
                return Solution::found(b, it);
            }
            if it == self.max_it {
                return Solution::stopped(b, it, Status::IterationLimit);
            }

            if e.abs() >= delta && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    // only two distinct points: secant
                    (2.0 * xm * s, 1.0 - s)
                } else {
                    // inverse quadratic interpolation
                    let qa = fa / fc;
                    let r = fb / fc;
                    (
                        s * (2.0 * xm * qa * (qa - r) - (b - a) * (r - 1.0)),
                        (qa - 1.0) * (r - 1.0) * (s - 1.0),
                    )
                };
                if p > 0.0 {
                    q = -q;
                }
                p = p.abs();

                // inside the bracket and shrinking fast enough?
                let inside = 3.0 * xm * q - (delta * q).abs();
                let shrinking = (e * q).abs();
                if 2.0 * p < inside.min(shrinking) {
                    e = d;
                    d = p / q;
                    trace!(it, step = d, "interpolate");
                } else {
                    d = xm;
                    e = d;
                    trace!(it, step = d, "bisect, interpolation rejected");
                }
            } else {
                d = xm;
                e = d;
                trace!(it, step = d, "bisect");
            }

            it += 1;
            a = b;
            fa = fb;
            b += if d.abs() > delta { d } else { delta.copysign(xm) };
            fb = f(b);
            if fb.is_nan() {
                return Solution::stopped(a, it, Status::IteratedToNaN);
            }
        }
    }
}

impl<F> Solver for Brent<F>
where
    F: Fn(f64) -> f64,
{
    fn solve_traced(&self, observe: &mut dyn FnMut(&Step)) -> Solution {
        report("brent", self.run(observe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::brackets_root;
    use crate::solver::Bisection;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_same_sign() {
        assert!(same_sign(1.0, 2.0));
        assert!(same_sign(-1.0, -2.0));
        assert!(!same_sign(-1.0, 2.0));
        assert!(!same_sign(0.0, 2.0));
        assert!(!same_sign(0.0, -0.0));
    }

    #[test]
    fn test_brent_sqrt_two() {
        let f = |x: f64| x * x - 2.0;
        let sol = Brent::new(f, 0.0, 2.0, 1e-8, 100).solve();
        assert!(sol.converged());
        assert_abs_diff_eq!(sol.root, std::f64::consts::SQRT_2, epsilon = 1e-6);
    }

    #[test]
    fn test_brent_sin_near_pi() {
        let f = |x: f64| x.sin();
        let sol = Brent::new(f, 3.0, 4.0, 1e-14, 100).solve();
        assert!(sol.converged());
        assert_abs_diff_eq!(sol.root, std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn test_brent_bracket_narrows() {
        let f = |x: f64| x.cos() - x;
        let mut widths = vec![];
        let mut keeps_sign_change = true;
        let sol = Brent::new(f, 0.0, 1.0, 1e-12, 100).solve_traced(&mut |s: &Step| {
            let br = s.bracket.as_ref().expect("bracketed");
            keeps_sign_change &= brackets_root(f(br.a()), f(br.b()));
            widths.push(br.size());
        });
        assert!(sol.converged());
        assert!(keeps_sign_change);
        assert!(widths[0] <= 1.0);
        for w in widths.windows(2) {
            assert!(w[1] <= w[0], "bracket widened: {} -> {}", w[0], w[1]);
        }
    }

    #[test]
    fn test_brent_beats_bisection() {
        let f = |x: f64| x.cos() - x;
        let brent = Brent::new(f, 0.0, 1.0, 1e-10, 200).solve();
        let bisect = Bisection::new(f, 0.0, 1.0, 1e-10).solve();
        assert!(brent.converged() && bisect.converged());
        assert!(brent.iterations <= bisect.iterations);
        assert!(brent.iterations < 10);
        assert_abs_diff_eq!(brent.root, 0.7390851332151607, epsilon = 1e-9);
    }

    #[test]
    fn test_brent_flat_tail() {
        // nearly flat near the root, interpolation keeps being rejected
        let f = |x: f64| (x - 1.0).powi(9);
        let sol = Brent::new(f, 0.0, 1.5, 1e-10, 200).solve();
        assert!(sol.converged(), "{:?}", sol);
        assert!((sol.root - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_brent_zero_budget() {
        let f = |x: f64| x * x - 2.0;
        let sol = Brent::new(f, 0.0, 2.0, 1e-8, 0).solve();
        assert_eq!(sol, Solution::stopped(1.0, 0, Status::IterationLimit));
    }

    #[test]
    fn test_brent_budget_exhausted() {
        let f = |x: f64| x * x * x - x - 2.0;
        let sol = Brent::new(f, 1.0, 2.0, 1e-15, 2).solve();
        assert_eq!(sol.status, Status::IterationLimit);
        assert_eq!(sol.iterations, 2);
        assert!(sol.root > 1.0 && sol.root < 2.0);
    }

    #[test]
    fn test_brent_undefined_inside() {
        // first bisection lands on x=1 where f is NaN; b=2 was the last good point
        let g = |x: f64| if x == 0.0 || x == 2.0 { x - 1.0 } else { f64::NAN };
        let sol = Brent::new(g, 0.0, 2.0, 1e-12, 100).solve();
        assert_eq!(sol, Solution::stopped(2.0, 1, Status::IteratedToNaN));
        assert_eq!(
            sol.into_result(),
            Err(crate::RootError::IteratedToNaN { x: 2.0 })
        );
    }

    #[test]
    fn test_brent_repairs_interval() {
        let f = |x: f64| x * x - 4.0;
        let search = BracketSearch::default().growth(1.2);
        let solver = Brent::with_search(f, 10.0, 20.0, 1e-12, 100, search);
        let (lo, hi) = solver.interval().ends();
        assert!(lo <= 2.0 && 2.0 <= hi);

        let sol = solver.solve();
        assert!(sol.converged());
        assert_abs_diff_eq!(sol.root, 2.0, epsilon = 1e-9);
    }
}
