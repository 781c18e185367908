//! Exact symbolic algebra: symbols, undefined functions, polynomials over
//! function atoms, and rational expressions with factored denominators.

pub mod display;
pub mod expr;
pub mod function;
pub mod poly;
pub mod symbol;

pub use expr::Expr;
pub use function::{Applied, Function};
pub use poly::{Atom, Monomial, Poly};
pub use symbol::{symbols, Symbol};
