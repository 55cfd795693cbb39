//! 희석/조제 계산 모듈 모음.

pub mod calculator;
pub mod dilution;
pub mod equation;
pub mod error;
pub mod prepare_solution;

pub use calculator::Calculator;
pub use dilution::*;
pub use equation::{parse_value, ProductEquation, Side, Solution, Term};
pub use error::CalcError;
pub use prepare_solution::*;
