//! Function wrappers for the derivative based solvers.
//!
//! Newton-type methods need both f(x) and f'(x).  The wrappers below own the
//! callables and expose them through the evaluation traits, either from an
//! analytic derivative or a finite difference of f itself.

use thiserror::Error;

/// Trait evaluating: f(x) with x in R^1.
pub trait RealFnEval {
    fn eval_f(&self, x: f64) -> f64;
}

/// Trait evaluating the derivative: df(x) with x in R^1.
pub trait RealDfEval {
    fn eval_df(&self, x: f64) -> f64;
}

/// Wraps function to implement RealFnEval.
#[derive(Debug, Clone, Copy)]
pub struct RealFn<F>
where
    F: Fn(f64) -> f64,
{
    pub f: F,
}

impl<F> RealFn<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(f: F) -> RealFn<F> {
        RealFn { f }
    }
}

impl<F> RealFnEval for RealFn<F>
where
    F: Fn(f64) -> f64,
{
    fn eval_f(&self, x: f64) -> f64 {
        (self.f)(x)
    }
}

/// Wraps a function and its analytic derivative.
#[derive(Debug, Clone, Copy)]
pub struct RealFnAndFirst<F1, F2>
where
    F1: Fn(f64) -> f64,
    F2: Fn(f64) -> f64,
{
    pub f: F1,
    pub df: F2,
}

impl<F1, F2> RealFnAndFirst<F1, F2>
where
    F1: Fn(f64) -> f64,
    F2: Fn(f64) -> f64,
{
    pub fn new(f: F1, df: F2) -> RealFnAndFirst<F1, F2> {
        RealFnAndFirst { f, df }
    }
}

impl<F1, F2> RealFnEval for RealFnAndFirst<F1, F2>
where
    F1: Fn(f64) -> f64,
    F2: Fn(f64) -> f64,
{
    fn eval_f(&self, x: f64) -> f64 {
        (self.f)(x)
    }
}

impl<F1, F2> RealDfEval for RealFnAndFirst<F1, F2>
where
    F1: Fn(f64) -> f64,
    F2: Fn(f64) -> f64,
{
    fn eval_df(&self, x: f64) -> f64 {
        (self.df)(x)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("finite-difference step must be finite and non-zero, got {h}")]
pub struct StepError {
    pub h: f64,
}

/// Wraps a function and approximates its derivative by the centred difference
/// `(f(x+h) - f(x-h)) / 2h`.
///
/// The truncation error is O(h^2), on top of whatever rounding the
/// subtraction of nearby values costs for very small `h`.
#[derive(Debug, Clone, Copy)]
pub struct CentralDifference<F>
where
    F: Fn(f64) -> f64,
{
    f: F,
    h: f64,
}

impl<F> CentralDifference<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(f: F, h: f64) -> Result<CentralDifference<F>, StepError> {
        if h == 0.0 || !h.is_finite() {
            return Err(StepError { h });
        }
        Ok(CentralDifference { f, h })
    }

    pub fn step(&self) -> f64 {
        self.h
    }
}

impl<F> RealFnEval for CentralDifference<F>
where
    F: Fn(f64) -> f64,
{
    fn eval_f(&self, x: f64) -> f64 {
        (self.f)(x)
    }
}

impl<F> RealDfEval for CentralDifference<F>
where
    F: Fn(f64) -> f64,
{
    fn eval_df(&self, x: f64) -> f64 {
        ((self.f)(x + self.h) - (self.f)(x - self.h)) / (2.0 * self.h)
    }
}
