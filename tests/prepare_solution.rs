//! 몰 용액 조제와 농도·부피 기반 질량 계산 테스트.
use approx::assert_relative_eq;
use dilution_calculator::{
    compute_mass_from_volume, conversion::ConversionError, quantity::QuantitySlot,
    solve_prepare_solution, CalcError, PrepareSolutionRequest,
};

/// 1 mmol/L, 10 ml, 5 mg, 500 g/mol 중 `blank` 번째 칸을 비운다.
fn request(blank: usize) -> PrepareSolutionRequest {
    let values = ["1", "10", "5", "500"];
    let v = |i: usize| (i != blank).then(|| values[i].to_string());
    PrepareSolutionRequest {
        concentration: QuantitySlot {
            value: v(0),
            unit: "mmol/L".into(),
        },
        volume: QuantitySlot {
            value: v(1),
            unit: "ml".into(),
        },
        mass: QuantitySlot {
            value: v(2),
            unit: "mg".into(),
        },
        molar_mass: v(3),
    }
}

#[test]
fn solves_concentration() {
    let solution = solve_prepare_solution(&request(0)).expect("solve concentration");
    assert_relative_eq!(solution.value, 1.0, max_relative = 1e-12);
    assert_eq!(solution.to_string(), "Concentration = 1 mmol/L");
}

#[test]
fn solves_each_remaining_slot() {
    let volume = solve_prepare_solution(&request(1)).expect("volume");
    assert_relative_eq!(volume.value, 10.0, max_relative = 1e-12);
    assert_eq!(volume.unit, "ml");

    let mass = solve_prepare_solution(&request(2)).expect("mass");
    assert_relative_eq!(mass.value, 5.0, max_relative = 1e-12);
    assert_eq!(mass.unit, "mg");

    let molar_mass = solve_prepare_solution(&request(3)).expect("molar mass");
    assert_relative_eq!(molar_mass.value, 500.0, max_relative = 1e-12);
    assert_eq!(molar_mass.to_string(), "Molar Mass = 500 g/mol");
}

#[test]
fn selection_must_leave_exactly_one_blank() {
    let full = PrepareSolutionRequest {
        molar_mass: Some("500".into()),
        ..request(3)
    };
    assert_eq!(
        solve_prepare_solution(&full),
        Err(CalcError::InvalidSelection { empty: 0 })
    );
    assert_eq!(
        solve_prepare_solution(&PrepareSolutionRequest::default()),
        Err(CalcError::InvalidSelection { empty: 4 })
    );

    let mut two_blank = request(2);
    two_blank.molar_mass = None;
    assert_eq!(
        solve_prepare_solution(&two_blank),
        Err(CalcError::InvalidSelection { empty: 2 })
    );
}

#[test]
fn zero_divisor_is_rejected() {
    let mut req = request(0);
    req.volume.value = Some("0".into());
    assert_eq!(
        solve_prepare_solution(&req),
        Err(CalcError::DivisionByZero {
            solving: "Concentration"
        })
    );

    let mut req = request(3);
    req.concentration.value = Some("0".into());
    assert_eq!(
        solve_prepare_solution(&req),
        Err(CalcError::DivisionByZero {
            solving: "Molar Mass"
        })
    );
}

#[test]
fn bad_inputs_are_reported() {
    let mut req = request(0);
    req.molar_mass = Some("five hundred".into());
    assert!(matches!(
        solve_prepare_solution(&req),
        Err(CalcError::InvalidNumber {
            field: "Molar Mass",
            ..
        })
    ));

    let mut req = request(0);
    req.mass.unit = "kg".into();
    assert!(matches!(
        solve_prepare_solution(&req),
        Err(CalcError::UnknownUnit(ConversionError::UnknownUnit { .. }))
    ));
}

#[test]
fn mass_from_volume_multiplies_all_inputs() {
    let solution =
        compute_mass_from_volume("10", "mmol/L", "100", "ml", "58.44", "mg").expect("mass");
    // 0.01 mol/L * 0.1 L * 58.44 g/mol = 0.05844 g
    assert_relative_eq!(solution.value, 58.44, max_relative = 1e-12);
    assert_eq!(solution.to_string(), "Mass = 58.44 mg");

    let in_grams = compute_mass_from_volume("1", "mol/L", "1", "L", "180.16", "g").expect("mass");
    assert_eq!(in_grams.formatted_value(), "180.16");
}

#[test]
fn mass_from_volume_requires_every_value() {
    assert!(matches!(
        compute_mass_from_volume("", "mmol/L", "100", "ml", "58.44", "mg"),
        Err(CalcError::InvalidNumber {
            field: "Concentration",
            ..
        })
    ));
    assert!(matches!(
        compute_mass_from_volume("10", "mmol/L", "100", "ml", "x", "mg"),
        Err(CalcError::InvalidNumber {
            field: "Molar Mass",
            ..
        })
    ));
    assert!(matches!(
        compute_mass_from_volume("10", "mmol/L", "100", "ml", "58.44", "lb"),
        Err(CalcError::UnknownUnit(_))
    ));
}

#[test]
fn zero_inputs_give_zero_mass() {
    let solution =
        compute_mass_from_volume("0", "mmol/L", "100", "ml", "58.44", "mg").expect("mass");
    assert_eq!(solution.formatted_value(), "0");
}
