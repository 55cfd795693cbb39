//! 몰 용액 조제 계산: 질량 = 농도 · 부피 · 몰 질량.

use tracing::debug;

use super::equation::{parse_value, ProductEquation, Side, Solution, Term};
use super::CalcError;
use crate::conversion::{from_base, to_base};
use crate::quantity::{QuantityKind, QuantitySlot, MOLAR_MASS_UNIT};

const CONCENTRATION: Term = Term {
    key: "concentration",
    label: "Concentration",
    kind: QuantityKind::MolarConcentration,
    side: Side::Left,
};

const VOLUME: Term = Term {
    key: "volume",
    label: "Volume",
    kind: QuantityKind::Volume,
    side: Side::Left,
};

const MASS: Term = Term {
    key: "mass",
    label: "Mass",
    kind: QuantityKind::Mass,
    side: Side::Right,
};

const MOLAR_MASS: Term = Term {
    key: "molar_mass",
    label: "Molar Mass",
    kind: QuantityKind::MolarMass,
    side: Side::Left,
};

/// 농도·부피·질량·몰 질량 중 하나를 구하는 등식. 입력 칸 순서도 이와 같다.
pub const PREPARE_SOLUTION: ProductEquation = ProductEquation {
    name: "prepare_solution",
    terms: &[CONCENTRATION, VOLUME, MASS, MOLAR_MASS],
};

/// 용액 조제 입력. 네 칸 중 정확히 하나를 비워 둔다.
///
/// 몰 질량은 항상 g/mol 이므로 단위 없이 값만 받는다.
#[derive(Debug, Clone, Default)]
pub struct PrepareSolutionRequest {
    pub concentration: QuantitySlot,
    pub volume: QuantitySlot,
    pub mass: QuantitySlot,
    pub molar_mass: Option<String>,
}

/// 농도·부피·질량·몰 질량 중 비어 있는 값을 구한다. 몰 질량 결과는 g/mol로 표시한다.
pub fn solve_prepare_solution(request: &PrepareSolutionRequest) -> Result<Solution, CalcError> {
    let molar_mass = QuantitySlot {
        value: request.molar_mass.clone(),
        unit: MOLAR_MASS_UNIT.to_string(),
    };
    PREPARE_SOLUTION.solve(&[
        &request.concentration,
        &request.volume,
        &request.mass,
        &molar_mass,
    ])
}

/// 농도와 부피, 몰 질량으로 필요한 질량을 계산한다. 모든 값이 필수이다.
pub fn compute_mass_from_volume(
    concentration: &str,
    concentration_unit: &str,
    volume: &str,
    volume_unit: &str,
    molar_mass: &str,
    mass_unit: &str,
) -> Result<Solution, CalcError> {
    let conc = parse_value(CONCENTRATION.label, Some(concentration))?;
    let vol = parse_value(VOLUME.label, Some(volume))?;
    let mm = parse_value(MOLAR_MASS.label, Some(molar_mass))?;

    let conc_base = to_base(QuantityKind::MolarConcentration, conc, concentration_unit)?;
    let vol_base = to_base(QuantityKind::Volume, vol, volume_unit)?;
    let value = from_base(QuantityKind::Mass, conc_base * vol_base * mm, mass_unit)?;
    debug!(equation = "mass_from_volume", value, unit = mass_unit, "solved");
    Ok(Solution {
        term: MASS,
        value,
        unit: mass_unit.to_string(),
    })
}
