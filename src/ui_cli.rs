use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::conversion;
use crate::format::format_general;
use crate::i18n::{keys, Translator};
use crate::quantity::{QuantityKind, QuantitySlot};
use crate::solver::{self, CalcError, Calculator};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculator(Calculator),
    MassFromVolume,
    UnitConversion,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
/// 입력이 끝나면(EOF) 종료를 선택한 것으로 본다.
pub fn main_menu(tr: &Translator, input: &mut impl BufRead) -> Result<MenuChoice, AppError> {
    println!("\n=== {} ===", tr.t(keys::APP_TITLE));
    for key in [
        keys::MAIN_MENU_MOLARITY,
        keys::MAIN_MENU_MASS_CONCENTRATION,
        keys::MAIN_MENU_PREPARE_SOLUTION,
        keys::MAIN_MENU_MASS_FROM_VOLUME,
        keys::MAIN_MENU_UNIT_CONVERSION,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = match read_line(input, &tr.t(keys::PROMPT_MENU_SELECT)) {
            Err(err) if is_eof(&err) => return Ok(MenuChoice::Exit),
            other => other?,
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::Calculator(Calculator::MolarDilution)),
            "2" => return Ok(MenuChoice::Calculator(Calculator::MassConcentrationDilution)),
            "3" => return Ok(MenuChoice::Calculator(Calculator::PrepareSolution)),
            "4" => return Ok(MenuChoice::MassFromVolume),
            "5" => return Ok(MenuChoice::UnitConversion),
            "6" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 한 칸을 비워 두는 계산기 메뉴를 처리한다. 계산 오류는 안내만 하고 메뉴로 돌아간다.
pub fn handle_calculator(
    tr: &Translator,
    cfg: &mut Config,
    calculator: Calculator,
    input: &mut impl BufRead,
) -> Result<(), AppError> {
    println!("\n-- {} --", tr.calculator_title(calculator));
    println!("{}", tr.calculator_description(calculator));
    let defaults = cfg.default_units.symbols_for(calculator);
    let mut slots = Vec::with_capacity(defaults.len());
    for (term, default_unit) in calculator.equation().terms.iter().zip(defaults) {
        let label = tr.term_label(term);
        let prompt = tr.tf(keys::PROMPT_SLOT_VALUE, &[("label", label.clone())]);
        let value = read_line(input, &prompt)?;
        let unit = read_unit(input, tr, &label, term.kind, default_unit)?;
        let value = value.trim();
        slots.push(QuantitySlot {
            value: (!value.is_empty()).then(|| value.to_string()),
            unit,
        });
    }
    match calculator.solve(&slots) {
        Ok(solution) => {
            println!("{}", tr.solution(&solution));
            let units: Vec<String> = slots.into_iter().map(|s| s.unit).collect();
            cfg.default_units.remember(calculator, &units);
            cfg.last_calculator = calculator;
        }
        Err(err) => println!("{}", tr.calc_error(&err)),
    }
    Ok(())
}

/// 농도·부피·몰 질량으로 질량을 계산하는 메뉴를 처리한다.
pub fn handle_mass_from_volume(
    tr: &Translator,
    cfg: &Config,
    input: &mut impl BufRead,
) -> Result<(), AppError> {
    println!("\n-- {} --", tr.t(keys::MASS_FROM_VOLUME_TITLE));
    println!("{}", tr.t(keys::MASS_FROM_VOLUME_DESCRIPTION));
    let d = cfg.default_units.symbols_for(Calculator::PrepareSolution);
    // 입력 칸 순서: 농도, 부피, 질량, 몰 질량
    let terms = solver::PREPARE_SOLUTION.terms;
    let (conc_term, vol_term, mass_term, mm_term) = (&terms[0], &terms[1], &terms[2], &terms[3]);

    let conc_label = tr.term_label(conc_term);
    let conc = read_required(input, tr, &conc_label)?;
    let conc_unit = read_unit(input, tr, &conc_label, QuantityKind::MolarConcentration, d[0])?;
    let vol_label = tr.term_label(vol_term);
    let vol = read_required(input, tr, &vol_label)?;
    let vol_unit = read_unit(input, tr, &vol_label, QuantityKind::Volume, d[1])?;
    let mm = read_required(input, tr, &tr.term_label(mm_term))?;
    let mass_label = tr.term_label(mass_term);
    let mass_unit = read_unit(input, tr, &mass_label, QuantityKind::Mass, d[2])?;

    match solver::compute_mass_from_volume(&conc, &conc_unit, &vol, &vol_unit, &mm, &mass_unit) {
        Ok(solution) => println!("{}", tr.solution(&solution)),
        Err(err) => println!("{}", tr.calc_error(&err)),
    }
    Ok(())
}

/// 단위 변환 메뉴를 처리한다.
pub fn handle_unit_conversion(tr: &Translator, input: &mut impl BufRead) -> Result<(), AppError> {
    println!("{}", tr.t(keys::UNIT_CONVERSION_HEADING));
    let options: Vec<String> = QuantityKind::CONVERTIBLE
        .iter()
        .enumerate()
        .map(|(i, kind)| format!("{}) {}", i + 1, tr.quantity_name(*kind)))
        .collect();
    println!("{}", options.join("  "));
    let kind = loop {
        let sel = read_line(input, &tr.t(keys::UNIT_CONVERSION_PROMPT_KIND))?;
        if let Some(kind) = sel
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| QuantityKind::CONVERTIBLE.get(i))
        {
            break *kind;
        }
        println!("{}", tr.t(keys::UNIT_CONVERSION_UNSUPPORTED));
    };
    println!("{}", kind.unit_symbols().join(", "));
    let value = read_f64(input, tr, &tr.t(keys::UNIT_CONVERSION_PROMPT_VALUE))?;
    let from_unit = read_line(input, &tr.t(keys::UNIT_CONVERSION_PROMPT_FROM_UNIT))?;
    let to_unit = read_line(input, &tr.t(keys::UNIT_CONVERSION_PROMPT_TO_UNIT))?;
    match conversion::convert(kind, value, from_unit.trim(), to_unit.trim()) {
        Ok(result) => println!(
            "{} {} {}",
            tr.t(keys::UNIT_CONVERSION_RESULT),
            format_general(result),
            to_unit.trim()
        ),
        Err(err) => println!("{}", tr.calc_error(&CalcError::from(err))),
    }
    Ok(())
}

/// 설정 메뉴를 처리한다. 언어 변경은 다음 실행부터 적용된다.
pub fn handle_settings(
    tr: &Translator,
    cfg: &mut Config,
    input: &mut impl BufRead,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(input, &tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    cfg.language = match sel.trim() {
        "1" => "auto".into(),
        "2" => "ko".into(),
        "3" => "en".into(),
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    };
    Ok(())
}

/// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝나면 `UnexpectedEof` 오류를 돌려준다.
fn read_line(input: &mut impl BufRead, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "입력이 끝났습니다").into());
    }
    Ok(buf)
}

/// 입력 스트림이 끝나서 생긴 오류인지 확인한다.
pub fn is_eof(err: &AppError) -> bool {
    matches!(err, AppError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}

fn read_f64(input: &mut impl BufRead, tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(input, prompt)?;
        match solver::parse_value("Value", Some(&s)) {
            Ok(v) => return Ok(v),
            Err(err) => println!("{}", tr.calc_error(&err)),
        }
    }
}

/// 비워 둘 수 없는 값을 문자열 그대로 읽는다. 숫자 검사는 계산 단계에서 한다.
fn read_required(
    input: &mut impl BufRead,
    tr: &Translator,
    label: &str,
) -> Result<String, AppError> {
    let prompt = tr.tf(keys::PROMPT_REQUIRED_VALUE, &[("label", label.to_string())]);
    let s = read_line(input, &prompt)?;
    Ok(s.trim().to_string())
}

/// 단위를 읽는다. 몰 질량은 g/mol 고정이라 묻지 않는다. 빈 입력은 기본 단위.
fn read_unit(
    input: &mut impl BufRead,
    tr: &Translator,
    label: &str,
    kind: QuantityKind,
    default_unit: &str,
) -> Result<String, AppError> {
    if kind == QuantityKind::MolarMass {
        return Ok(default_unit.to_string());
    }
    let prompt = tr.tf(
        keys::PROMPT_UNIT,
        &[
            ("label", label.to_string()),
            ("options", kind.unit_symbols().join("/")),
            ("default", default_unit.to_string()),
        ],
    );
    let s = read_line(input, &prompt)?;
    let s = s.trim();
    Ok(if s.is_empty() { default_unit } else { s }.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn en() -> Translator {
        Translator::new("en")
    }

    #[test]
    fn main_menu_treats_end_of_input_as_exit() {
        let mut input = Cursor::new(Vec::<u8>::new());
        assert_eq!(main_menu(&en(), &mut input).expect("menu"), MenuChoice::Exit);
    }

    #[test]
    fn main_menu_retries_until_valid_choice() {
        let mut input = Cursor::new("9\nx\n3\n".as_bytes());
        assert_eq!(
            main_menu(&en(), &mut input).expect("menu"),
            MenuChoice::Calculator(Calculator::PrepareSolution)
        );
    }

    #[test]
    fn converter_rejects_non_finite_value() {
        let mut input = Cursor::new("2\ninf\n5\nml\nL\n".as_bytes());
        handle_unit_conversion(&en(), &mut input).expect("convert");

        // inf 뒤에 다시 값을 묻고, 입력이 끝나면 EOF 오류가 된다.
        let mut input = Cursor::new("2\ninf\n".as_bytes());
        let err = handle_unit_conversion(&en(), &mut input).unwrap_err();
        assert!(is_eof(&err));
    }
}
