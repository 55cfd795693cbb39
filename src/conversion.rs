use thiserror::Error;

use crate::quantity::{QuantityKind, MOLAR_MASS_UNIT};
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// 해당 물리량 표에 없는 단위 문자열
    #[error("알 수 없는 단위: {unit} ({kind})")]
    UnknownUnit { kind: QuantityKind, unit: String },
}

/// 단위 기호의 기준 단위 대비 배율을 조회한다.
///
/// 몰 질량은 g/mol 하나만 허용하며 배율은 1이다.
pub fn scale_factor(kind: QuantityKind, unit: &str) -> Result<f64, ConversionError> {
    match kind {
        QuantityKind::MolarConcentration => {
            unit.parse::<MolarConcentrationUnit>().map(Unit::factor)
        }
        QuantityKind::Volume => unit.parse::<VolumeUnit>().map(Unit::factor),
        QuantityKind::Mass => unit.parse::<MassUnit>().map(Unit::factor),
        QuantityKind::MassConcentration => {
            unit.parse::<MassConcentrationUnit>().map(Unit::factor)
        }
        QuantityKind::MolarMass if unit == MOLAR_MASS_UNIT => Ok(1.0),
        QuantityKind::MolarMass => Err(ConversionError::UnknownUnit {
            kind,
            unit: unit.to_string(),
        }),
    }
}

/// 값을 기준 단위로 환산한다.
pub fn to_base(kind: QuantityKind, value: f64, unit: &str) -> Result<f64, ConversionError> {
    Ok(value * scale_factor(kind, unit)?)
}

/// 기준 단위 값을 지정한 단위로 환산한다.
pub fn from_base(kind: QuantityKind, value: f64, unit: &str) -> Result<f64, ConversionError> {
    Ok(value / scale_factor(kind, unit)?)
}

/// 문자열로 전달된 단위를 같은 물리량 안에서 환산한다.
///
/// 단위 문자열 예시는 `mmol/L`, `ul`, `mg`, `ug/ml` 등을 사용할 수 있다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    let base = to_base(kind, value, from_unit_str)?;
    from_base(kind, base, to_unit_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unknown_symbol_reports_kind() {
        let err = scale_factor(QuantityKind::Volume, "gal").unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnknownUnit {
                kind: QuantityKind::Volume,
                unit: "gal".into()
            }
        );
    }

    #[test]
    fn molar_mass_accepts_only_grams_per_mole() {
        assert_eq!(scale_factor(QuantityKind::MolarMass, "g/mol"), Ok(1.0));
        assert!(scale_factor(QuantityKind::MolarMass, "kg/mol").is_err());
    }

    #[test]
    fn convert_ul_to_ml() {
        let v = convert(QuantityKind::Volume, 250.0, "ul", "ml").unwrap();
        assert_relative_eq!(v, 0.25, max_relative = 1e-12);
    }
}
