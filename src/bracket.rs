//! Brackets: intervals over which a function changes sign.
//!
//! For a continuous function the Intermediate Value Theorem guarantees that a
//! bracket contains at least one root.  Without a continuity guarantee, it
//! might be a singularity instead.

use thiserror::Error;

/// Bounds represents the closed interval [a,b].
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds {
    a: f64,
    b: f64,
}

impl Bounds {
    /// # Panics
    /// If `a > b` or either end is not finite.
    pub fn new(a: f64, b: f64) -> Bounds {
        assert!(a <= b);
        assert!(a.is_finite() && b.is_finite());
        Bounds { a, b }
    }

    /// Bounds over two points given in either order.
    pub fn spanning(x: f64, y: f64) -> Bounds {
        Bounds::new(x.min(y), x.max(y))
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn middle(&self) -> f64 {
        self.a + (self.b - self.a) / 2.0
    }

    pub fn size(&self) -> f64 {
        self.b - self.a
    }

    pub fn contains(&self, x: f64) -> bool {
        self.a <= x && x <= self.b
    }
}

/// Whether `f(lhs)` and `f(rhs)` values straddle a root.
///
/// An exact zero on either side counts.  Compares signs rather than the
/// product, which breaks under float underflow.  NaN never brackets.
pub fn brackets_root(f_lhs: f64, f_rhs: f64) -> bool {
    if f_lhs.is_nan() || f_rhs.is_nan() {
        return false;
    }
    f_lhs == 0.0 || f_rhs == 0.0 || (f_lhs < 0.0) != (f_rhs < 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BracketError {
    #[error("bracket search step must be finite and positive, got {h}")]
    InvalidStep { h: f64 },

    #[error("bracket search growth must be finite and >= 1, got {growth}")]
    InvalidGrowth { growth: f64 },

    #[error("bracket search seed must be finite, got {x}")]
    NonFiniteSeed { x: f64 },

    #[error("no sign change within {probes} probe pairs")]
    NotFound { probes: usize },
}

/// Parameters of the outward bracket search.
///
/// Probes sit at `x1 ± s_1`, `x1 ± (s_1 + s_2)`, ... where `s_1 = step` and
/// every following step is `growth` times the previous one.  The default is a
/// linear scan, `x1 ± k*step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketSearch {
    pub step: f64,
    pub max_iter: usize,
    pub growth: f64,
}

impl Default for BracketSearch {
    fn default() -> Self {
        BracketSearch {
            step: 0.01,
            max_iter: 200,
            growth: 1.0,
        }
    }
}

impl BracketSearch {
    pub fn new(step: f64, max_iter: usize) -> BracketSearch {
        BracketSearch {
            step,
            max_iter,
            ..BracketSearch::default()
        }
    }

    pub fn growth(self, growth: f64) -> BracketSearch {
        BracketSearch { growth, ..self }
    }

    fn validate(&self) -> Result<(), BracketError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(BracketError::InvalidStep { h: self.step });
        }
        if !(self.growth.is_finite() && self.growth >= 1.0) {
            return Err(BracketError::InvalidGrowth {
                growth: self.growth,
            });
        }
        Ok(())
    }
}

/// A bracket located by `find_bracket`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bracketed {
    pub bounds: Bounds,
    /// Probe pairs spent, zero when the seed itself was a root.
    pub probes: usize,
}

/// Searches outward from `x1` for two adjacent probes with a sign change.
///
/// Each probe pair steps once to the right and once to the left.  A new probe
/// is compared with the previous point on the same side, so the returned
/// bracket is always a single step wide.  Gives up after `search.max_iter`
/// pairs.
///
/// Parameters are validated before `f` is ever evaluated.
pub fn find_bracket<F>(f: &F, x1: f64, search: &BracketSearch) -> Result<Bracketed, BracketError>
where
    F: Fn(f64) -> f64,
{
    search.validate()?;
    if !x1.is_finite() {
        return Err(BracketError::NonFiniteSeed { x: x1 });
    }

    let f_1 = f(x1);
    if f_1 == 0.0 {
        return Ok(Bracketed {
            bounds: Bounds::new(x1, x1),
            probes: 0,
        });
    }

    let (mut x_lo, mut f_lo) = (x1, f_1);
    let (mut x_hi, mut f_hi) = (x1, f_1);
    let mut step = search.step;

    for probe in 1..=search.max_iter {
        let x_next = x_hi + step;
        let f_next = f(x_next);
        if x_next.is_finite() && brackets_root(f_hi, f_next) {
            return Ok(Bracketed {
                bounds: Bounds::new(x_hi, x_next),
                probes: probe,
            });
        }
        x_hi = x_next;
        f_hi = f_next;

        let x_next = x_lo - step;
        let f_next = f(x_next);
        if x_next.is_finite() && brackets_root(f_next, f_lo) {
            return Ok(Bracketed {
                bounds: Bounds::new(x_next, x_lo),
                probes: probe,
            });
        }
        x_lo = x_next;
        f_lo = f_next;

        step *= search.growth;
    }
    Err(BracketError::NotFound {
        probes: search.max_iter,
    })
}
