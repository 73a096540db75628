use super::driver::iterative_root_find;
use super::{is_negligible, report};
use crate::convergence::{residual_or_step, AnyOf, DeltaX, FnResidual};
use crate::wrap::{CentralDifference, RealDfEval, RealFnAndFirst, RealFnEval, StepError};
use crate::{Solution, Solver, Status, Step};

/// Root finding using Newton-Raphson.
///
/// The `x0` indicates the initial guess.  For guesses sufficiently close to
/// the root this algorithm has quadratic convergence.  Stops once
/// `|f(x_n+1)| < tola` or `|x_n+1 - x_n| < tol`.
///
/// This algorithm requires the first derivative of f(x).  If it is not
/// available analytically, consider `QuasiNewton` or Brent.
///
/// # Panics
/// Construction panics if `tol` or `tola` is negative or not finite.  Solving
/// panics if `x0` is not finite.
pub struct Newton<F>
where
    F: RealFnEval + RealDfEval,
{
    f: F,
    x0: f64,
    finish: AnyOf<FnResidual, DeltaX>,
    max_it: usize,
}

impl<F1, F2> Newton<RealFnAndFirst<F1, F2>>
where
    F1: Fn(f64) -> f64,
    F2: Fn(f64) -> f64,
{
    /// Newton over `f` and its analytic derivative `df`.
    pub fn new(f: F1, df: F2, x0: f64, tol: f64, tola: f64, max_it: usize) -> Self {
        Newton::wrapped(RealFnAndFirst::new(f, df), x0, tol, tola, max_it)
    }
}

impl<F> Newton<F>
where
    F: RealFnEval + RealDfEval,
{
    /// Newton over anything that evaluates both f(x) and f'(x).
    pub fn wrapped(f: F, x0: f64, tol: f64, tola: f64, max_it: usize) -> Newton<F> {
        Newton {
            f,
            x0,
            finish: residual_or_step(tol, tola),
            max_it,
        }
    }

    fn run(&self, observe: &mut dyn FnMut(&Step)) -> Solution {
        iterative_root_find(&self.f, &nr_iteration, self.x0, &self.finish, self.max_it, observe)
    }
}

/// Evaluate a single iteration for Newton's method.  Fails if the derivative
/// vanishes or the step leaves the finite reals.
fn nr_iteration<F>(f: &F, x: f64, f_x: f64) -> Result<f64, Status>
where
    F: RealFnEval + RealDfEval,
{
    let denom = f.eval_df(x);
    if is_negligible(denom) {
        return Err(Status::ZeroDerivative);
    }
    let x_new = x - f_x / denom;
    if !x_new.is_finite() {
        return Err(Status::IteratedToNaN);
    }
    Ok(x_new)
}

impl<F> Solver for Newton<F>
where
    F: RealFnEval + RealDfEval,
{
    fn solve_traced(&self, observe: &mut dyn FnMut(&Step)) -> Solution {
        report("newton", self.run(observe))
    }
}

/// Newton-Raphson with the derivative replaced by a centred finite
/// difference of step `h`.
///
/// The attainable accuracy is limited by the O(h^2) truncation error of the
/// difference on top of `tol`/`tola`.
pub struct QuasiNewton<F>
where
    F: Fn(f64) -> f64,
{
    newton: Newton<CentralDifference<F>>,
}

impl<F> QuasiNewton<F>
where
    F: Fn(f64) -> f64,
{
    /// Fails if `h` is zero or not finite.
    ///
    /// # Panics
    /// If `tol` or `tola` is negative or not finite.
    pub fn new(
        f: F,
        x0: f64,
        h: f64,
        tol: f64,
        tola: f64,
        max_it: usize,
    ) -> Result<QuasiNewton<F>, StepError> {
        let f = CentralDifference::new(f, h)?;
        Ok(QuasiNewton {
            newton: Newton::wrapped(f, x0, tol, tola, max_it),
        })
    }

    pub fn step(&self) -> f64 {
        self.newton.f.step()
    }
}

impl<F> Solver for QuasiNewton<F>
where
    F: Fn(f64) -> f64,
{
    fn solve_traced(&self, observe: &mut dyn FnMut(&Step)) -> Solution {
        report("quasi-newton", self.newton.run(observe))
    }
}
