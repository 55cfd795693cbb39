//! 희석 계산 핵심 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 쓴다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod format;
pub mod i18n;
pub mod logging;
pub mod quantity;
pub mod solver;
pub mod ui_cli;
pub mod units;

pub use quantity::QuantitySlot;
pub use solver::{
    compute_mass_from_volume, solve_mass_concentration_dilution, solve_molar_dilution,
    solve_prepare_solution, CalcError, DilutionRequest, PrepareSolutionRequest, Solution,
};
