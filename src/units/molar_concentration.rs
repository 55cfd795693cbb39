use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Unit;
use crate::conversion::ConversionError;
use crate::quantity::QuantityKind;

/// 몰 농도 단위. 내부 기준은 mol/L이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MolarConcentrationUnit {
    MolPerLiter,
    MillimolPerLiter,
    MicromolPerLiter,
    NanomolPerLiter,
}

impl Unit for MolarConcentrationUnit {
    const ALL: &'static [Self] = &[
        MolarConcentrationUnit::MolPerLiter,
        MolarConcentrationUnit::MillimolPerLiter,
        MolarConcentrationUnit::MicromolPerLiter,
        MolarConcentrationUnit::NanomolPerLiter,
    ];

    fn symbol(self) -> &'static str {
        match self {
            MolarConcentrationUnit::MolPerLiter => "mol/L",
            MolarConcentrationUnit::MillimolPerLiter => "mmol/L",
            MolarConcentrationUnit::MicromolPerLiter => "umol/L",
            MolarConcentrationUnit::NanomolPerLiter => "nmol/L",
        }
    }

    fn factor(self) -> f64 {
        match self {
            MolarConcentrationUnit::MolPerLiter => 1.0,
            MolarConcentrationUnit::MillimolPerLiter => 1e-3,
            MolarConcentrationUnit::MicromolPerLiter => 1e-6,
            MolarConcentrationUnit::NanomolPerLiter => 1e-9,
        }
    }
}

impl FromStr for MolarConcentrationUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| ConversionError::UnknownUnit {
            kind: QuantityKind::MolarConcentration,
            unit: s.to_string(),
        })
    }
}

/// 몰 농도를 변환한다.
pub fn convert_molar_concentration(
    value: f64,
    from: MolarConcentrationUnit,
    to: MolarConcentrationUnit,
) -> f64 {
    to.from_base(from.to_base(value))
}
