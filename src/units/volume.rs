use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Unit;
use crate::conversion::ConversionError;
use crate::quantity::QuantityKind;

/// 체적 단위. 내부 기준은 리터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeUnit {
    Liter,
    Milliliter,
    Microliter,
}

impl Unit for VolumeUnit {
    const ALL: &'static [Self] = &[
        VolumeUnit::Liter,
        VolumeUnit::Milliliter,
        VolumeUnit::Microliter,
    ];

    fn symbol(self) -> &'static str {
        match self {
            VolumeUnit::Liter => "L",
            VolumeUnit::Milliliter => "ml",
            VolumeUnit::Microliter => "ul",
        }
    }

    fn factor(self) -> f64 {
        match self {
            VolumeUnit::Liter => 1.0,
            VolumeUnit::Milliliter => 1e-3,
            VolumeUnit::Microliter => 1e-6,
        }
    }
}

impl FromStr for VolumeUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| ConversionError::UnknownUnit {
            kind: QuantityKind::Volume,
            unit: s.to_string(),
        })
    }
}

/// 체적을 변환한다.
pub fn convert_volume(value: f64, from: VolumeUnit, to: VolumeUnit) -> f64 {
    to.from_base(from.to_base(value))
}
