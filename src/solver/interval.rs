use tracing::{debug, warn};

use crate::bracket::{brackets_root, find_bracket, Bounds, BracketError, BracketSearch};
use crate::{Solution, Status};

/// What happened to the caller's interval at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Repair {
    /// The interval already bracketed a root.
    NotNeeded,
    /// The interval was replaced by one found around its midpoint.
    Repaired { from: (f64, f64), probes: usize },
    /// No bracket could be located; solving yields `Status::NoBracket`.
    Failed(BracketError),
}

/// Validated bracket shared by the interval solvers.
///
/// Built once per solver.  When the supplied ends do not straddle a sign
/// change, an outward search is started from their midpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    bounds: Option<Bounds>,
    repair: Repair,
}

impl Interval {
    pub fn establish<F>(f: &F, a: f64, b: f64, search: &BracketSearch) -> Interval
    where
        F: Fn(f64) -> f64,
    {
        if a.is_finite() && b.is_finite() {
            let bounds = Bounds::spanning(a, b);
            if brackets_root(f(bounds.a()), f(bounds.b())) {
                return Interval {
                    bounds: Some(bounds),
                    repair: Repair::NotNeeded,
                };
            }
        }

        let x1 = (a + b) / 2.0;
        warn!(
            a,
            b,
            x1,
            h = search.step,
            "interval does not bracket a root, searching around midpoint"
        );

        match find_bracket(f, x1, search) {
            Ok(found) => {
                debug!(
                    a = found.bounds.a(),
                    b = found.bounds.b(),
                    probes = found.probes,
                    "bracket repaired"
                );
                Interval {
                    bounds: Some(found.bounds),
                    repair: Repair::Repaired {
                        from: (a, b),
                        probes: found.probes,
                    },
                }
            }
            Err(e) => {
                warn!(error = %e, "no bracket found, interval set to NaN");
                Interval {
                    bounds: None,
                    repair: Repair::Failed(e),
                }
            }
        }
    }

    /// The bracket the solver will work on, if any.
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    /// Bracket ends, both NaN when no bracket exists.
    pub fn ends(&self) -> (f64, f64) {
        match &self.bounds {
            Some(b) => (b.a(), b.b()),
            None => (f64::NAN, f64::NAN),
        }
    }

    pub fn repair(&self) -> &Repair {
        &self.repair
    }

    /// Checks shared by every interval method before it iterates.
    ///
    /// Returns the working bracket with its end values, or the final
    /// solution when there is nothing to iterate on: no bracket, no budget,
    /// or an end that is already an exact root.
    pub(crate) fn start<F>(&self, f: &F, max_it: usize) -> Result<(Bounds, f64, f64), Solution>
    where
        F: Fn(f64) -> f64,
    {
        let bounds = match &self.bounds {
            Some(b) => b.clone(),
            None => return Err(Solution::no_bracket()),
        };
        if max_it == 0 {
            return Err(Solution::stopped(bounds.middle(), 0, Status::IterationLimit));
        }

        let f_a = f(bounds.a());
        if f_a == 0.0 {
            return Err(Solution::found(bounds.a(), 0));
        }
        let f_b = f(bounds.b());
        if f_b == 0.0 {
            return Err(Solution::found(bounds.b(), 0));
        }
        Ok((bounds, f_a, f_b))
    }
}
