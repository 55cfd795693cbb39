//! 단위 표 및 변환 테스트.
use approx::assert_relative_eq;
use dilution_calculator::{
    conversion::{self, ConversionError},
    quantity::{QuantityKind, MOLAR_MASS_UNIT},
    units::{
        convert_mass, convert_mass_concentration, convert_molar_concentration, convert_volume,
        MassConcentrationUnit, MassUnit, MolarConcentrationUnit, VolumeUnit,
    },
};

#[test]
fn volume_round_trip_through_base() {
    let liters = conversion::to_base(QuantityKind::Volume, 5.0, "ml").expect("to base");
    assert_relative_eq!(liters, 0.005, max_relative = 1e-15);
    let back = conversion::from_base(QuantityKind::Volume, liters, "ml").expect("from base");
    assert_relative_eq!(back, 5.0, max_relative = 1e-12);
}

#[test]
fn typed_and_string_conversions_agree() {
    let typed = convert_volume(250.0, VolumeUnit::Microliter, VolumeUnit::Milliliter);
    let by_symbol = conversion::convert(QuantityKind::Volume, 250.0, "ul", "ml").expect("convert");
    assert_relative_eq!(typed, by_symbol);
    assert_relative_eq!(typed, 0.25, max_relative = 1e-12);
}

#[test]
fn each_table_converts_within_its_kind() {
    let cases = [
        (QuantityKind::MolarConcentration, 1.0, "mol/L", "nmol/L", 1e9),
        (QuantityKind::Mass, 2.0, "mg", "ug", 2000.0),
        (QuantityKind::MassConcentration, 3.0, "ug/ml", "ng/ml", 3000.0),
        (QuantityKind::Volume, 1.0, "L", "ul", 1e6),
    ];
    for (kind, value, from, to, expected) in cases {
        let got = conversion::convert(kind, value, from, to).expect("convert");
        assert_relative_eq!(got, expected, max_relative = 1e-12);
    }
}

#[test]
fn symbols_are_case_sensitive_and_kind_specific() {
    assert!(conversion::scale_factor(QuantityKind::Volume, "l").is_err());
    assert!(conversion::scale_factor(QuantityKind::Volume, "mg").is_err());
    assert_eq!(
        conversion::convert(QuantityKind::Mass, 1.0, "g", "ml"),
        Err(ConversionError::UnknownUnit {
            kind: QuantityKind::Mass,
            unit: "ml".into()
        })
    );
}

#[test]
fn molar_mass_only_accepts_grams_per_mole() {
    assert_eq!(
        conversion::scale_factor(QuantityKind::MolarMass, MOLAR_MASS_UNIT),
        Ok(1.0)
    );
    assert!(conversion::scale_factor(QuantityKind::MolarMass, "kg/mol").is_err());
}

#[test]
fn typed_helpers_convert_every_table() {
    assert_relative_eq!(
        convert_mass(1.5, MassUnit::Gram, MassUnit::Microgram),
        1.5e6,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        convert_molar_concentration(
            250.0,
            MolarConcentrationUnit::MicromolPerLiter,
            MolarConcentrationUnit::MillimolPerLiter
        ),
        0.25,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        convert_mass_concentration(
            2.0,
            MassConcentrationUnit::MilligramPerMilliliter,
            MassConcentrationUnit::NanogramPerMilliliter
        ),
        2e6,
        max_relative = 1e-12
    );
}

#[test]
fn unit_symbols_parse_into_typed_units() {
    assert_eq!("ul".parse::<VolumeUnit>(), Ok(VolumeUnit::Microliter));
    assert_eq!("ng".parse::<MassUnit>(), Ok(MassUnit::Nanogram));
    assert_eq!(
        "umol/L".parse::<MolarConcentrationUnit>(),
        Ok(MolarConcentrationUnit::MicromolPerLiter)
    );
    assert_eq!(
        "ug/ml".parse::<MassConcentrationUnit>(),
        Ok(MassConcentrationUnit::MicrogramPerMilliliter)
    );
}

#[test]
fn unknown_symbols_fail_to_parse_with_their_kind() {
    assert_eq!(
        "mL".parse::<VolumeUnit>(),
        Err(ConversionError::UnknownUnit {
            kind: QuantityKind::Volume,
            unit: "mL".into()
        })
    );
    assert_eq!(
        "mM".parse::<MolarConcentrationUnit>(),
        Err(ConversionError::UnknownUnit {
            kind: QuantityKind::MolarConcentration,
            unit: "mM".into()
        })
    );
    assert!("kg".parse::<MassUnit>().is_err());
    assert!("mg/L".parse::<MassConcentrationUnit>().is_err());
}
