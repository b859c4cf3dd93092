//! Numerical primitives behind the trend curve

pub mod linear_solver;
pub mod polynomial;

pub use linear_solver::solve;
pub use polynomial::{evaluate, fit, TREND_DEGREE};
