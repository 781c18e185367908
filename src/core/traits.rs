use ndarray::{Array, Dimension};

use crate::symbolic::Expr;

/// Element-wise symbolic operations on tensors of any rank
pub trait SymbolicTensor: Sized {
    /// Apply general simplification to every component
    fn simplified(&self) -> Self;

    /// Apply rational-term cancellation to every component
    fn cancelled(&self) -> Self;

    /// Apply Pythagorean normalisation to every component
    fn trig_simplified(&self) -> Self;

    /// Every component simplifies to zero
    fn is_zero_tensor(&self) -> bool;

    /// Same shape and every pair of components is symbolically equal
    fn equivalent_to(&self, other: &Self) -> bool;
}

impl<D: Dimension> SymbolicTensor for Array<Expr, D> {
    fn simplified(&self) -> Self {
        self.map(Expr::simplify)
    }

    fn cancelled(&self) -> Self {
        self.map(Expr::cancel)
    }

    fn trig_simplified(&self) -> Self {
        self.map(Expr::trigsimp)
    }

    fn is_zero_tensor(&self) -> bool {
        self.iter().all(|e| e.simplify().is_zero())
    }

    fn equivalent_to(&self, other: &Self) -> bool {
        self.shape() == other.shape()
            && self.iter().zip(other.iter()).all(|(a, b)| a.equivalent(b))
    }
}
