//! Root finding algorithms.
//!
//! Interval methods share the bracket validation and repair in `Interval`.
//! Open methods share the iteration driver.  Every method implements
//! `Solver`.

mod bisection;
mod brent;
pub mod driver;
mod interval;
mod newton;
mod regula_falsi;
mod secant;

pub use self::bisection::Bisection;
pub use self::brent::Brent;
pub use self::interval::{Interval, Repair};
pub use self::newton::{Newton, QuasiNewton};
pub use self::regula_falsi::RegulaFalsi;
pub use self::secant::Secant;

use tracing::debug;

use crate::Solution;

/// Iteration budget for constructors that do not take one.
pub const DEFAULT_MAX_ITER: usize = 200;

/// Zero or subnormal.  Dividing by such a value is treated as undefined.
fn is_negligible(v: f64) -> bool {
    v.abs() < f64::MIN_POSITIVE
}

fn report(method: &'static str, sol: Solution) -> Solution {
    debug!(
        method,
        root = sol.root,
        iterations = sol.iterations,
        status = ?sol.status,
        "solve finished"
    );
    sol
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::Bounds;
    use crate::Solver;
    use approx::assert_abs_diff_eq;

    struct RootTest {
        name: &'static str,
        f: fn(f64) -> f64,
        df: fn(f64) -> f64,
        roots: Vec<f64>,
        guesses: Vec<f64>,
        brackets: Vec<Bounds>,
        // one chord end sticks for wide brackets; regula falsi is skipped
        chord_stalls: bool,
    }

    fn make_root_tests() -> Vec<RootTest> {
        vec![
            RootTest {
                name: "Factored Parabola",
                f: |x| (x - 5.0) * (x - 4.0),
                df: |x| 2.0 * x - 9.0,
                roots: vec![5.0, 4.0],
                guesses: vec![5.8, 3.8],
                brackets: vec![Bounds::new(4.5, 100.0), Bounds::new(-100000.0, 4.01)],
                chord_stalls: true,
            },
            RootTest {
                name: "Wikipedia NR Parabola",
                f: |x| x * x - 612.0,
                df: |x| 2.0 * x,
                roots: vec![-24.7386337537, 24.7386337537],
                guesses: vec![-10.0, 10.0],
                brackets: vec![Bounds::new(-30.0, 10.0), Bounds::new(10.0, 30.0)],
                chord_stalls: false,
            },
            RootTest {
                name: "Wikipedia NR Trigonometry",
                f: |x| x.cos() - x * x * x,
                df: |x| -x.sin() - 3. * x * x,
                roots: vec![0.865474033102],
                guesses: vec![0.5],
                brackets: vec![Bounds::new(0.0, 1.0)],
                chord_stalls: false,
            },
            RootTest {
                name: "Wikipedia Bisection Cubic",
                f: |x| x * x * x - x - 2.0,
                df: |x| 3.0 * x * x - 1.0,
                roots: vec![1.52137970680457],
                guesses: vec![1.0],
                brackets: vec![Bounds::new(1.0, 2.0)],
                chord_stalls: false,
            },
            RootTest {
                name: "Isaac Newton's Secant Example",
                f: |x| x * x * x + 10.0 * x * x - 7.0 * x - 44.0,
                df: |x| 3.0 * x * x + 20.0 * x - 7.0,
                roots: vec![2.20681731724844],
                guesses: vec![2.2],
                brackets: vec![Bounds::new(2.0, 2.3)],
                chord_stalls: false,
            },
            RootTest {
                name: "Isaac Newton's NR Example",
                f: |x| x * x * x - 2.0 * x - 5.0,
                df: |x| 3.0 * x * x - 2.0,
                roots: vec![2.0945514815423265],
                guesses: vec![2.0],
                brackets: vec![Bounds::new(2.0, 3.0)],
                chord_stalls: false,
            },
            RootTest {
                name: "Thomas Simpson NR Example",
                f: |x| {
                    (1. - x).sqrt() + (1. - 2. * x * x).sqrt() + (1. - 3. * x * x * x).sqrt() - 2.
                },
                df: |x| {
                    -2. * x * (1. - 2. * x * x).sqrt().recip()
                        - 9. * x * x * (1. - 3. * x * x * x).sqrt().recip() / 2.
                        - 1. * (1. - x).sqrt().recip() / 2.
                },
                roots: vec![0.55158615249704711724768527],
                guesses: vec![0.5],
                brackets: vec![Bounds::new(0.0, 0.6)],
                chord_stalls: false,
            },
        ]
    }

    fn check(name: &str, method: &str, want: f64, sol: Solution) {
        assert!(
            sol.converged(),
            "{} via {}: {:?}",
            name,
            method,
            sol
        );
        assert!(
            (sol.root - want).abs() < 1e-9,
            "{} via {} root wanted={}, got={}",
            name,
            method,
            want,
            sol.root
        );
    }

    #[test]
    fn test_bisection_root_finding() {
        for t in make_root_tests() {
            for i in 0..t.roots.len() {
                let br = &t.brackets[i];
                let sol = Bisection::new(t.f, br.a(), br.b(), 1e-12).solve();
                check(t.name, "bisection", t.roots[i], sol);
            }
        }
    }

    #[test]
    fn test_regula_falsi_root_finding() {
        for t in make_root_tests().into_iter().filter(|t| !t.chord_stalls) {
            for i in 0..t.roots.len() {
                let br = &t.brackets[i];
                let sol = RegulaFalsi::new(t.f, br.a(), br.b(), 1e-12).solve();
                check(t.name, "regula falsi", t.roots[i], sol);
            }
        }
    }

    #[test]
    fn test_secant_root_finding() {
        for t in make_root_tests() {
            for i in 0..t.roots.len() {
                let br = &t.brackets[i];
                let sol = Secant::new(t.f, br.a(), br.b(), 1e-12, 1e-12, 100).solve();
                check(t.name, "secant", t.roots[i], sol);
            }
        }
    }

    #[test]
    fn test_brent_root_finding() {
        for t in make_root_tests() {
            for i in 0..t.roots.len() {
                let br = &t.brackets[i];
                let sol = Brent::new(t.f, br.a(), br.b(), 1e-12, 100).solve();
                check(t.name, "brent", t.roots[i], sol);
            }
        }
    }

    #[test]
    fn test_newton_root_finding() {
        for t in make_root_tests() {
            for i in 0..t.roots.len() {
                let sol = Newton::new(t.f, t.df, t.guesses[i], 1e-12, 1e-12, 100).solve();
                check(t.name, "newton", t.roots[i], sol);
            }
        }
    }

    #[test]
    fn test_quasi_newton_root_finding() {
        for t in make_root_tests() {
            for i in 0..t.roots.len() {
                let sol = QuasiNewton::new(t.f, t.guesses[i], 1e-5, 1e-12, 1e-12, 100)
                    .expect("valid step")
                    .solve();
                check(t.name, "quasi-newton", t.roots[i], sol);
            }
        }
    }

    #[test]
    fn test_dyn_solvers_agree() {
        let f = |x: f64| x.cos() - x;
        let solvers: Vec<Box<dyn Solver>> = vec![
            Box::new(Bisection::new(f, 0.0, 1.0, 1e-12)),
            Box::new(RegulaFalsi::new(f, 0.0, 1.0, 1e-13)),
            Box::new(Secant::new(f, 0.0, 1.0, 1e-12, 1e-13, 50)),
            Box::new(Brent::new(f, 0.0, 1.0, 1e-12, 50)),
            Box::new(Newton::new(f, |x: f64| -x.sin() - 1.0, 0.5, 1e-12, 1e-13, 50)),
        ];
        for s in &solvers {
            let sol = s.solve();
            assert!(sol.converged());
            assert_abs_diff_eq!(sol.root, 0.7390851332151607, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_is_negligible() {
        assert!(is_negligible(0.0));
        assert!(is_negligible(-0.0));
        assert!(is_negligible(1e-310));
        assert!(!is_negligible(1e-300));
        assert!(!is_negligible(f64::NAN));
    }
}
