//! Root finding for scalar functions of one real variable.
//!
//! Interval solvers (`Bisection`, `RegulaFalsi`, `Secant`, `Brent`) take a
//! bracket `[a,b]`.  If the supplied bracket does not straddle a sign change,
//! construction searches outward from its midpoint for one that does.  See
//! the `bracket` module for the search itself.
//!
//! Derivative solvers (`Newton`, `QuasiNewton`) take a single starting guess.
//!
//! Every solver implements `Solver` and reports a `Solution` carrying the
//! estimate, the iterations spent and whether it actually converged.
//!
//! # Examples
//! Using Brent's method on an interval that needs repair:
//!
//! ```
//! use zerofind::bracket::BracketSearch;
//! use zerofind::solver::Brent;
//! use zerofind::Solver;
//!
//! let f = |x: f64| x * x - 4.0;
//!
//! // [10, 20] holds no root, so a bracket is searched for around x=15
//! let search = BracketSearch::default().growth(1.2);
//! let brent = Brent::with_search(f, 10.0, 20.0, 1e-12, 100, search);
//!
//! let sol = brent.solve();
//! assert!(sol.converged());
//! assert!((sol.root - 2.0).abs() < 1e-9);
//! ```
//!
//! Using Newton-Raphson:
//!
//! ```
//! use zerofind::solver::Newton;
//! use zerofind::Solver;
//!
//! let f = |x: f64| -x * x + 2.0 * x + 1.0;
//! let df = |x: f64| -2.0 * x + 2.0;
//!
//! let root = Newton::new(f, df, 3.0, 1e-12, 1e-12, 20)
//!     .solve()
//!     .into_result()
//!     .expect("root");
//!
//! // root at x=1+sqrt(2)
//! assert!((root - 2.41421356237).abs() < 1e-9);
//! ```

pub mod bracket;
pub mod convergence;
pub mod solver;
pub mod wrap;

use bracket::Bounds;
use thiserror::Error;

/// Root finding error conditions.
///
/// To help with diagnostics, these errors return the last relevant `x`
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RootError {
    /// Derivative went to zero for method that depends on it to determine next
    /// step.
    #[error("derivative vanished at x={x}")]
    ZeroDerivative { x: f64 },

    /// Secant through the last two iterates is horizontal.
    #[error("secant step undefined at x={x}: f(x) equals f at the previous iterate")]
    FlatSecant { x: f64 },

    /// The solver computed a non-finite value for its next step.
    #[error("iteration left the finite reals from x={x}")]
    IteratedToNaN { x: f64 },

    /// Iteration limit was reached.
    #[error("iteration limit reached, last x={last_x}")]
    IterationLimit { last_x: f64 },

    /// No sign change could be located near the supplied interval.
    #[error("no bracket holding a root could be found")]
    NoBracket,
}

/// Why a solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Converged,
    IterationLimit,
    ZeroDerivative,
    FlatSecant,
    IteratedToNaN,
    NoBracket,
}

/// Outcome of a single `Solver::solve` call.
///
/// `root` is always the best available estimate: the converged value, the
/// last iterate when something went wrong, or NaN when there was never a
/// bracket to work with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub root: f64,
    pub iterations: usize,
    pub status: Status,
}

impl Solution {
    pub(crate) fn found(root: f64, iterations: usize) -> Solution {
        Solution {
            root,
            iterations,
            status: Status::Converged,
        }
    }

    pub(crate) fn stopped(root: f64, iterations: usize, status: Status) -> Solution {
        Solution {
            root,
            iterations,
            status,
        }
    }

    pub(crate) fn no_bracket() -> Solution {
        Solution {
            root: f64::NAN,
            iterations: 0,
            status: Status::NoBracket,
        }
    }

    /// Whether the convergence test was met.
    pub fn converged(&self) -> bool {
        self.status == Status::Converged
    }

    /// Collapse into the estimate, or the reason there is no trustworthy one.
    pub fn into_result(self) -> Result<f64, RootError> {
        let x = self.root;
        match self.status {
            Status::Converged => Ok(x),
            Status::IterationLimit => Err(RootError::IterationLimit { last_x: x }),
            Status::ZeroDerivative => Err(RootError::ZeroDerivative { x }),
            Status::FlatSecant => Err(RootError::FlatSecant { x }),
            Status::IteratedToNaN => Err(RootError::IteratedToNaN { x }),
            Status::NoBracket => Err(RootError::NoBracket),
        }
    }
}

/// One refinement step as seen by a trace observer.
///
/// `bracket` is the sign-change interval after the step for methods that
/// maintain one, `None` for open methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub iteration: usize,
    pub x: f64,
    pub fx: f64,
    pub bracket: Option<Bounds>,
}

/// A configured root finder.
///
/// Solving never mutates the solver; working state lives on the stack of the
/// call.
pub trait Solver {
    /// Run the method, handing every refinement step to `trace`.
    fn solve_traced(&self, trace: &mut dyn FnMut(&Step)) -> Solution;

    /// Run the method.
    fn solve(&self) -> Solution {
        self.solve_traced(&mut |_| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_into_result() {
        let sol = Solution::found(1.5, 4);
        assert!(sol.converged());
        assert_eq!(sol.into_result(), Ok(1.5));

        let sol = Solution::stopped(0.25, 0, Status::ZeroDerivative);
        assert!(!sol.converged());
        assert_eq!(sol.into_result(), Err(RootError::ZeroDerivative { x: 0.25 }));

        let sol = Solution::stopped(3.0, 200, Status::IterationLimit);
        assert_eq!(
            sol.into_result(),
            Err(RootError::IterationLimit { last_x: 3.0 })
        );
    }

    #[test]
    fn test_no_bracket_is_nan() {
        let sol = Solution::no_bracket();
        assert!(sol.root.is_nan());
        assert_eq!(sol.iterations, 0);
        assert_eq!(sol.into_result(), Err(RootError::NoBracket));
    }

    #[test]
    fn test_error_messages() {
        let e = RootError::ZeroDerivative { x: 0.0 };
        assert_eq!(e.to_string(), "derivative vanished at x=0");

        let e = RootError::NoBracket;
        assert_eq!(e.to_string(), "no bracket holding a root could be found");
    }
}
