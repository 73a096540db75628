//! Stopping criteria for the open iterations (Secant, Newton family).

pub trait IsConverged {
    fn is_converged(&self, x_pre: f64, x_cur: f64, f_cur: f64) -> bool;
}

/// Converged once successive iterates are closer than `epsilon_abs`.
#[derive(Debug, Clone, Copy)]
pub struct DeltaX {
    epsilon_abs: f64,
}

impl DeltaX {
    /// # Panics
    /// If `epsilon_abs` is negative or not finite.  Zero disables the test.
    pub fn new(epsilon_abs: f64) -> DeltaX {
        assert!(epsilon_abs >= 0.0);
        assert!(epsilon_abs.is_finite());
        DeltaX { epsilon_abs }
    }
}

impl IsConverged for DeltaX {
    fn is_converged(&self, x_pre: f64, x_cur: f64, _f_cur: f64) -> bool {
        (x_pre - x_cur).abs() < self.epsilon_abs
    }
}

/// Converged once |f(x)| drops below `epsilon_abs`.
#[derive(Debug, Clone, Copy)]
pub struct FnResidual {
    epsilon_abs: f64,
}

impl FnResidual {
    /// # Panics
    /// If `epsilon_abs` is negative or not finite.  Zero disables the test.
    pub fn new(epsilon_abs: f64) -> FnResidual {
        assert!(epsilon_abs >= 0.0);
        assert!(epsilon_abs.is_finite());
        FnResidual { epsilon_abs }
    }
}

impl IsConverged for FnResidual {
    fn is_converged(&self, _x_pre: f64, _x_cur: f64, f_cur: f64) -> bool {
        f_cur.abs() < self.epsilon_abs
    }
}

/// Converged as soon as either criterion is.
#[derive(Debug, Clone, Copy)]
pub struct AnyOf<A, B>(pub A, pub B);

impl<A, B> IsConverged for AnyOf<A, B>
where
    A: IsConverged,
    B: IsConverged,
{
    fn is_converged(&self, x_pre: f64, x_cur: f64, f_cur: f64) -> bool {
        self.0.is_converged(x_pre, x_cur, f_cur) || self.1.is_converged(x_pre, x_cur, f_cur)
    }
}

/// Residual below `tola` or step below `tol`, as used by Secant and Newton.
pub fn residual_or_step(tol: f64, tola: f64) -> AnyOf<FnResidual, DeltaX> {
    AnyOf(FnResidual::new(tola), DeltaX::new(tol))
}
