use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Unit;
use crate::conversion::ConversionError;
use crate::quantity::QuantityKind;

/// 질량 단위. 내부 기준은 g이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MassUnit {
    Gram,
    Milligram,
    Microgram,
    Nanogram,
}

impl Unit for MassUnit {
    const ALL: &'static [Self] = &[
        MassUnit::Gram,
        MassUnit::Milligram,
        MassUnit::Microgram,
        MassUnit::Nanogram,
    ];

    fn symbol(self) -> &'static str {
        match self {
            MassUnit::Gram => "g",
            MassUnit::Milligram => "mg",
            MassUnit::Microgram => "ug",
            MassUnit::Nanogram => "ng",
        }
    }

    fn factor(self) -> f64 {
        match self {
            MassUnit::Gram => 1.0,
            MassUnit::Milligram => 1e-3,
            MassUnit::Microgram => 1e-6,
            MassUnit::Nanogram => 1e-9,
        }
    }
}

impl FromStr for MassUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| ConversionError::UnknownUnit {
            kind: QuantityKind::Mass,
            unit: s.to_string(),
        })
    }
}

/// 질량을 변환한다.
pub fn convert_mass(value: f64, from: MassUnit, to: MassUnit) -> f64 {
    to.from_base(from.to_base(value))
}
