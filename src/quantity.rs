use serde::{Deserialize, Serialize};

use crate::units::{self, MassConcentrationUnit, MassUnit, MolarConcentrationUnit, VolumeUnit};

/// 몰 질량의 고정 단위. 다른 단위 체계는 두지 않는다.
pub const MOLAR_MASS_UNIT: &str = "g/mol";

/// 다루는 물리량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityKind {
    MolarConcentration,
    Volume,
    Mass,
    MassConcentration,
    MolarMass,
}

impl QuantityKind {
    /// 단위 변환기에서 선택 가능한 물리량.
    pub const CONVERTIBLE: [QuantityKind; 4] = [
        QuantityKind::MolarConcentration,
        QuantityKind::Volume,
        QuantityKind::Mass,
        QuantityKind::MassConcentration,
    ];

    /// 이 물리량에 쓸 수 있는 단위 기호 목록. 첫 항목이 기준 단위이다.
    pub fn unit_symbols(self) -> Vec<&'static str> {
        match self {
            QuantityKind::MolarConcentration => units::symbols::<MolarConcentrationUnit>(),
            QuantityKind::Volume => units::symbols::<VolumeUnit>(),
            QuantityKind::Mass => units::symbols::<MassUnit>(),
            QuantityKind::MassConcentration => units::symbols::<MassConcentrationUnit>(),
            QuantityKind::MolarMass => vec![MOLAR_MASS_UNIT],
        }
    }

    /// i18n 키 이름.
    pub fn key(self) -> &'static str {
        match self {
            QuantityKind::MolarConcentration => "molar_concentration",
            QuantityKind::Volume => "volume",
            QuantityKind::Mass => "mass",
            QuantityKind::MassConcentration => "mass_concentration",
            QuantityKind::MolarMass => "molar_mass",
        }
    }
}

impl std::fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// 계산 요청 하나의 입력 칸. 값이 비어 있으면 풀이 대상이 된다.
///
/// 값은 사용자가 입력한 문자열 그대로 보관하고, 숫자 해석은 풀이 단계에서 한다.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuantitySlot {
    pub value: Option<String>,
    pub unit: String,
}

impl QuantitySlot {
    pub fn given(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            unit: unit.into(),
        }
    }

    pub fn empty(unit: impl Into<String>) -> Self {
        Self {
            value: None,
            unit: unit.into(),
        }
    }

    /// 값 입력란이 비어 있는지 확인한다. 공백만 있는 경우도 비어 있는 것으로 본다.
    pub fn is_empty(&self) -> bool {
        self.value
            .as_deref()
            .map(|v| v.trim().is_empty())
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_missing_values_are_empty() {
        assert!(QuantitySlot::empty("ml").is_empty());
        assert!(QuantitySlot::given("", "ml").is_empty());
        assert!(QuantitySlot::given(" \t", "ml").is_empty());
        assert!(!QuantitySlot::given("0", "ml").is_empty());
    }

    #[test]
    fn first_symbol_is_base_unit() {
        assert_eq!(QuantityKind::Volume.unit_symbols()[0], "L");
        assert_eq!(QuantityKind::MolarConcentration.unit_symbols()[0], "mol/L");
        assert_eq!(QuantityKind::Mass.unit_symbols()[0], "g");
        assert_eq!(QuantityKind::MassConcentration.unit_symbols()[0], "mg/ml");
        assert_eq!(QuantityKind::MolarMass.unit_symbols(), vec![MOLAR_MASS_UNIT]);
    }
}
