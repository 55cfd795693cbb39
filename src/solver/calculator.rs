use serde::{Deserialize, Serialize};

use super::dilution::{MASS_CONCENTRATION_DILUTION, MOLAR_DILUTION};
use super::equation::{ProductEquation, Solution};
use super::prepare_solution::PREPARE_SOLUTION;
use super::CalcError;
use crate::quantity::QuantitySlot;

/// "한 칸을 비워 두고 나머지로 구하는" 계산기 목록.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Calculator {
    MolarDilution,
    MassConcentrationDilution,
    PrepareSolution,
}

impl Calculator {
    /// 메뉴 표시 순서. 첫 항목이 기본 화면이다.
    pub const ALL: [Calculator; 3] = [
        Calculator::MolarDilution,
        Calculator::MassConcentrationDilution,
        Calculator::PrepareSolution,
    ];

    pub fn equation(self) -> &'static ProductEquation {
        match self {
            Calculator::MolarDilution => &MOLAR_DILUTION,
            Calculator::MassConcentrationDilution => &MASS_CONCENTRATION_DILUTION,
            Calculator::PrepareSolution => &PREPARE_SOLUTION,
        }
    }

    /// 화면 이동용 경로.
    pub fn route(self) -> &'static str {
        match self {
            Calculator::MolarDilution => "/molarity",
            Calculator::MassConcentrationDilution => "/mass-concentration",
            Calculator::PrepareSolution => "/prepare-molar-solution",
        }
    }

    /// 경로에 해당하는 계산기. 모르는 경로는 첫 번째 계산기로 보낸다.
    pub fn from_route(path: &str) -> Calculator {
        Self::ALL
            .into_iter()
            .find(|c| c.route() == path)
            .unwrap_or(Self::ALL[0])
    }

    /// i18n 키 접두사.
    pub fn key(self) -> &'static str {
        match self {
            Calculator::MolarDilution => "molarity",
            Calculator::MassConcentrationDilution => "mass_concentration",
            Calculator::PrepareSolution => "prepare_solution",
        }
    }

    /// 기본(영문) 제목.
    pub fn title(self) -> &'static str {
        match self {
            Calculator::MolarDilution => "Dilute Molar Solution",
            Calculator::MassConcentrationDilution => "Dilute Solution",
            Calculator::PrepareSolution => "Prepare Molar Solution",
        }
    }

    pub fn solve(self, slots: &[QuantitySlot]) -> Result<Solution, CalcError> {
        self.equation().solve(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_resolve_and_unknown_falls_back_to_first() {
        for c in Calculator::ALL {
            assert_eq!(Calculator::from_route(c.route()), c);
        }
        assert_eq!(Calculator::from_route("/nope"), Calculator::MolarDilution);
        assert_eq!(Calculator::from_route(""), Calculator::MolarDilution);
    }

    #[test]
    fn every_calculator_has_four_slots() {
        for c in Calculator::ALL {
            assert_eq!(c.equation().len(), 4, "{:?}", c);
        }
    }
}
