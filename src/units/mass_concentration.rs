use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Unit;
use crate::conversion::ConversionError;
use crate::quantity::QuantityKind;

/// 질량 농도 단위. 내부 기준은 mg/ml이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassConcentrationUnit {
    MilligramPerMilliliter,
    MicrogramPerMilliliter,
    NanogramPerMilliliter,
}

impl Unit for MassConcentrationUnit {
    const ALL: &'static [Self] = &[
        MassConcentrationUnit::MilligramPerMilliliter,
        MassConcentrationUnit::MicrogramPerMilliliter,
        MassConcentrationUnit::NanogramPerMilliliter,
    ];

    fn symbol(self) -> &'static str {
        match self {
            MassConcentrationUnit::MilligramPerMilliliter => "mg/ml",
            MassConcentrationUnit::MicrogramPerMilliliter => "ug/ml",
            MassConcentrationUnit::NanogramPerMilliliter => "ng/ml",
        }
    }

    fn factor(self) -> f64 {
        match self {
            MassConcentrationUnit::MilligramPerMilliliter => 1.0,
            MassConcentrationUnit::MicrogramPerMilliliter => 1e-3,
            MassConcentrationUnit::NanogramPerMilliliter => 1e-6,
        }
    }
}

impl FromStr for MassConcentrationUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| ConversionError::UnknownUnit {
            kind: QuantityKind::MassConcentration,
            unit: s.to_string(),
        })
    }
}

/// 질량 농도를 변환한다.
pub fn convert_mass_concentration(
    value: f64,
    from: MassConcentrationUnit,
    to: MassConcentrationUnit,
) -> f64 {
    to.from_base(from.to_base(value))
}
