//! C1·V1 = C2·V2 희석 계산 (몰 농도 / 질량 농도).

use super::equation::{ProductEquation, Side, Solution, Term};
use super::CalcError;
use crate::quantity::{QuantityKind, QuantitySlot};

const fn concentration(
    key: &'static str,
    label: &'static str,
    kind: QuantityKind,
    side: Side,
) -> Term {
    Term {
        key,
        label,
        kind,
        side,
    }
}

const fn volume(key: &'static str, label: &'static str, side: Side) -> Term {
    Term {
        key,
        label,
        kind: QuantityKind::Volume,
        side,
    }
}

/// 몰 농도 희석식.
pub const MOLAR_DILUTION: ProductEquation = ProductEquation {
    name: "molar_dilution",
    terms: &[
        concentration("c1", "C1", QuantityKind::MolarConcentration, Side::Left),
        volume("v1", "V1", Side::Left),
        concentration("c2", "C2", QuantityKind::MolarConcentration, Side::Right),
        volume("v2", "V2", Side::Right),
    ],
};

/// 질량 농도(mg/ml 기준) 희석식.
pub const MASS_CONCENTRATION_DILUTION: ProductEquation = ProductEquation {
    name: "mass_concentration_dilution",
    terms: &[
        concentration("c1", "C1", QuantityKind::MassConcentration, Side::Left),
        volume("v1", "V1", Side::Left),
        concentration("c2", "C2", QuantityKind::MassConcentration, Side::Right),
        volume("v2", "V2", Side::Right),
    ],
};

/// 희석 계산 입력. 네 칸 중 정확히 하나를 비워 둔다.
#[derive(Debug, Clone, Default)]
pub struct DilutionRequest {
    pub c1: QuantitySlot,
    pub v1: QuantitySlot,
    pub c2: QuantitySlot,
    pub v2: QuantitySlot,
}

impl DilutionRequest {
    fn slots(&self) -> [&QuantitySlot; 4] {
        [&self.c1, &self.v1, &self.c2, &self.v2]
    }
}

/// 몰 농도 단위로 C1·V1 = C2·V2 를 푼다.
pub fn solve_molar_dilution(request: &DilutionRequest) -> Result<Solution, CalcError> {
    MOLAR_DILUTION.solve(&request.slots())
}

/// 질량 농도 단위로 C1·V1 = C2·V2 를 푼다.
pub fn solve_mass_concentration_dilution(
    request: &DilutionRequest,
) -> Result<Solution, CalcError> {
    MASS_CONCENTRATION_DILUTION.solve(&request.slots())
}
