use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::{debug, warn};

use crate::conversion::ConversionError;
use crate::quantity::QuantityKind;
use crate::solver::{CalcError, Calculator, Solution, Term};

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_TITLE: &str = "general.app_title";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const RESULT_PREFIX: &str = "general.result_prefix";

    pub const MAIN_MENU_MOLARITY: &str = "main_menu.molarity";
    pub const MAIN_MENU_MASS_CONCENTRATION: &str = "main_menu.mass_concentration";
    pub const MAIN_MENU_PREPARE_SOLUTION: &str = "main_menu.prepare_solution";
    pub const MAIN_MENU_MASS_FROM_VOLUME: &str = "main_menu.mass_from_volume";
    pub const MAIN_MENU_UNIT_CONVERSION: &str = "main_menu.unit_conversion";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SLOT_VALUE: &str = "prompt.slot_value";
    pub const PROMPT_REQUIRED_VALUE: &str = "prompt.required_value";
    pub const PROMPT_UNIT: &str = "prompt.unit";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const ERROR_INVALID_SELECTION: &str = "error.invalid_selection";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_UNKNOWN_UNIT: &str = "error.unknown_unit";
    pub const ERROR_DIVISION_BY_ZERO: &str = "error.division_by_zero";

    pub const MASS_FROM_VOLUME_TITLE: &str = "calc.mass_from_volume.title";
    pub const MASS_FROM_VOLUME_DESCRIPTION: &str = "calc.mass_from_volume.description";

    pub const UNIT_CONVERSION_HEADING: &str = "unit_conversion.heading";
    pub const UNIT_CONVERSION_PROMPT_KIND: &str = "unit_conversion.prompt_kind";
    pub const UNIT_CONVERSION_PROMPT_VALUE: &str = "unit_conversion.prompt_value";
    pub const UNIT_CONVERSION_PROMPT_FROM_UNIT: &str = "unit_conversion.prompt_from_unit";
    pub const UNIT_CONVERSION_PROMPT_TO_UNIT: &str = "unit_conversion.prompt_to_unit";
    pub const UNIT_CONVERSION_RESULT: &str = "unit_conversion.result";
    pub const UNIT_CONVERSION_UNSUPPORTED: &str = "unit_conversion.unsupported";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const SETTINGS_SAVE_UNITS: &str = "settings.save_units";
    pub const SETTINGS_LANGUAGE: &str = "settings.language";

    pub const GUI_NAV_HEADING: &str = "gui.nav.heading";
    pub const GUI_CALCULATE: &str = "gui.calculate";
    pub const GUI_CLEAR: &str = "gui.clear";
    pub const GUI_CONVERT: &str = "gui.convert";
    pub const GUI_SETTINGS: &str = "gui.settings";
    pub const GUI_CLOSE: &str = "gui.close";
    pub const GUI_FONT_MISSING: &str = "gui.font_missing";
    pub const GUI_SAVE: &str = "gui.save";
    pub const GUI_UNIT_CONVERTER: &str = "gui.unit_converter";
    pub const GUI_QUANTITY: &str = "gui.quantity";
    pub const GUI_VALUE: &str = "gui.value";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 → 현재 언어 → 영어 → 키 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return Cow::Borrowed(v.as_str());
        }
        let builtin = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        match builtin {
            Some(s) => Cow::Borrowed(s),
            None => {
                debug!(key, "번역 키 없음");
                Cow::Borrowed(key)
            }
        }
    }

    /// `{name}` 자리표시자를 채운 번역을 돌려준다.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }

    pub fn calculator_title(&self, calculator: Calculator) -> String {
        let key = format!("calc.{}.title", calculator.key());
        self.lookup_or(&key, calculator.title())
    }

    pub fn calculator_description(&self, calculator: Calculator) -> String {
        let key = format!("calc.{}.description", calculator.key());
        self.t(&key).into_owned()
    }

    pub fn term_label(&self, term: &Term) -> String {
        let key = format!("slot.{}", term.key);
        self.lookup_or(&key, term.label)
    }

    pub fn quantity_name(&self, kind: QuantityKind) -> String {
        let key = format!("quantity.{}", kind.key());
        self.t(&key).into_owned()
    }

    /// `결과: C2 = 100 umol/L` 형태의 결과 문장.
    pub fn solution(&self, solution: &Solution) -> String {
        format!(
            "{}: {} = {} {}",
            self.t(keys::RESULT_PREFIX),
            self.term_label(&solution.term),
            solution.formatted_value(),
            solution.unit
        )
    }

    /// 계산 오류를 사용자용 문장으로 만든다.
    pub fn calc_error(&self, err: &CalcError) -> String {
        let vars = match err {
            CalcError::InvalidSelection { empty } => vec![("empty", empty.to_string())],
            CalcError::InvalidNumber { field, input } => {
                vec![("field", field.to_string()), ("input", input.clone())]
            }
            CalcError::UnknownUnit(ConversionError::UnknownUnit { kind, unit }) => {
                vec![("unit", unit.clone()), ("kind", self.quantity_name(*kind))]
            }
            CalcError::DivisionByZero { solving } => vec![("field", solving.to_string())],
        };
        format!(
            "{}: {}",
            self.t(keys::ERROR_PREFIX),
            self.tf(err.message_key(), &vars)
        )
    }

    fn lookup_or(&self, key: &str, fallback: &str) -> String {
        let s = self.t(key);
        if s == key {
            fallback.to_string()
        } else {
            s.into_owned()
        }
    }
}

fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫/중첩 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(&path).ok()?;
    let map = parse_toml_to_map(&content);
    if map.is_none() {
        warn!(path = %path.display(), "언어팩을 읽을 수 없음");
    }
    map
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_TITLE => "희석 계산기",
        APP_EXIT => "프로그램을 종료합니다.",
        ERROR_PREFIX => "오류",
        RESULT_PREFIX => "결과",
        MAIN_MENU_MOLARITY => "1) 몰 농도 희석 (C1V1 = C2V2)",
        MAIN_MENU_MASS_CONCENTRATION => "2) 질량 농도 희석 (C1V1 = C2V2)",
        MAIN_MENU_PREPARE_SOLUTION => "3) 몰 용액 조제",
        MAIN_MENU_MASS_FROM_VOLUME => "4) 농도·부피로 질량 계산",
        MAIN_MENU_UNIT_CONVERSION => "5) 단위 변환기",
        MAIN_MENU_SETTINGS => "6) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SLOT_VALUE => "{label} 값 (계산할 칸은 비워 두세요): ",
        PROMPT_REQUIRED_VALUE => "{label} 값: ",
        PROMPT_UNIT => "{label} 단위 [{options}] (엔터 = {default}): ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_SELECTION => "정확히 한 칸만 비워 두어야 합니다. (현재 빈 칸 {empty}개)",
        ERROR_INVALID_NUMBER => "{field} 값이 올바른 숫자가 아닙니다: \"{input}\"",
        ERROR_UNKNOWN_UNIT => "{kind}에 없는 단위입니다: {unit}",
        ERROR_DIVISION_BY_ZERO => "0으로 나눌 수 없습니다. 입력값을 확인하세요. ({field} 계산)",
        "calc.molarity.title" => "몰 농도 희석",
        "calc.molarity.description" => "세 값을 입력하면 나머지 하나를 계산합니다.",
        "calc.mass_concentration.title" => "질량 농도 희석",
        "calc.mass_concentration.description" => {
            "세 값을 입력하면 나머지 하나를 계산합니다. 질량/부피 단위를 사용합니다."
        }
        "calc.prepare_solution.title" => "몰 용액 조제",
        "calc.prepare_solution.description" => "네 값 중 세 값을 입력하면 나머지 하나를 계산합니다.",
        MASS_FROM_VOLUME_TITLE => "농도·부피로 질량 계산",
        MASS_FROM_VOLUME_DESCRIPTION => "목표 농도와 부피, 몰 질량으로 필요한 질량을 계산합니다.",
        "slot.concentration" => "농도",
        "slot.volume" => "부피",
        "slot.mass" => "질량",
        "slot.molar_mass" => "몰 질량 (g/mol)",
        "quantity.molar_concentration" => "몰 농도",
        "quantity.volume" => "부피",
        "quantity.mass" => "질량",
        "quantity.mass_concentration" => "질량 농도",
        "quantity.molar_mass" => "몰 질량",
        UNIT_CONVERSION_HEADING => "\n-- 단위 변환 --",
        UNIT_CONVERSION_PROMPT_KIND => "항목 번호를 입력: ",
        UNIT_CONVERSION_PROMPT_VALUE => "값 입력: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "입력 단위(ex: mmol/L, ul, mg): ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "변환 단위(ex: umol/L, ml, ug): ",
        UNIT_CONVERSION_RESULT => "변환 결과:",
        UNIT_CONVERSION_UNSUPPORTED => "지원하지 않는 번호입니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_OPTIONS => "1) 자동  2) 한국어  3) English",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        SETTINGS_SAVE_UNITS => "현재 단위를 기본값으로 저장",
        SETTINGS_LANGUAGE => "언어",
        GUI_NAV_HEADING => "계산기",
        GUI_CALCULATE => "계산",
        GUI_CLEAR => "지우기",
        GUI_CONVERT => "변환",
        GUI_SETTINGS => "설정",
        GUI_CLOSE => "닫기",
        GUI_FONT_MISSING => "한글 글꼴을 찾지 못했습니다.",
        GUI_SAVE => "저장",
        GUI_UNIT_CONVERTER => "단위 변환기",
        GUI_QUANTITY => "물리량",
        GUI_VALUE => "값",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_TITLE => "Scientific Calculator Dashboard",
        APP_EXIT => "Exiting the program.",
        ERROR_PREFIX => "Error",
        RESULT_PREFIX => "Result",
        MAIN_MENU_MOLARITY => "1) Dilute by molarity (C1V1 = C2V2)",
        MAIN_MENU_MASS_CONCENTRATION => "2) Dilute by mass concentration (C1V1 = C2V2)",
        MAIN_MENU_PREPARE_SOLUTION => "3) Prepare molar solution",
        MAIN_MENU_MASS_FROM_VOLUME => "4) Mass from concentration and volume",
        MAIN_MENU_UNIT_CONVERSION => "5) Unit converter",
        MAIN_MENU_SETTINGS => "6) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SLOT_VALUE => "{label} value (leave blank to solve for it): ",
        PROMPT_REQUIRED_VALUE => "{label} value: ",
        PROMPT_UNIT => "{label} unit [{options}] (enter = {default}): ",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        ERROR_INVALID_SELECTION => {
            "Please leave exactly one field empty to solve for. ({empty} empty)"
        }
        ERROR_INVALID_NUMBER => "{field} is not a valid number: \"{input}\"",
        ERROR_UNKNOWN_UNIT => "Unknown {kind} unit: {unit}",
        ERROR_DIVISION_BY_ZERO => "Cannot divide by zero. Check your inputs. (solving {field})",
        "calc.molarity.title" => "Dilute by Molarity (C1V1 = C2V2)",
        "calc.molarity.description" => "Enter three values to calculate the fourth.",
        "calc.mass_concentration.title" => "Dilute by concentration",
        "calc.mass_concentration.description" => {
            "Enter three values to calculate the fourth. Uses mass/volume units."
        }
        "calc.prepare_solution.title" => "Prepare Molar Solution",
        "calc.prepare_solution.description" => "Enter any three values to calculate the fourth.",
        MASS_FROM_VOLUME_TITLE => "Mass from Concentration and Volume",
        MASS_FROM_VOLUME_DESCRIPTION => {
            "Enter the target concentration, volume and molar mass to get the mass to weigh."
        }
        "slot.molar_mass" => "Molar Mass (g/mol)",
        "quantity.molar_concentration" => "molar concentration",
        "quantity.volume" => "volume",
        "quantity.mass" => "mass",
        "quantity.mass_concentration" => "mass concentration",
        "quantity.molar_mass" => "molar mass",
        UNIT_CONVERSION_HEADING => "\n-- Unit Conversion --",
        UNIT_CONVERSION_PROMPT_KIND => "Enter quantity number: ",
        UNIT_CONVERSION_PROMPT_VALUE => "Value: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "From unit (ex: mmol/L, ul, mg): ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "To unit (ex: umol/L, ml, ug): ",
        UNIT_CONVERSION_RESULT => "Converted:",
        UNIT_CONVERSION_UNSUPPORTED => "Unsupported number.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) Auto  2) 한국어  3) English",
        SETTINGS_PROMPT_CHANGE => "Number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; nothing changed.",
        SETTINGS_SAVED => "Settings saved.",
        SETTINGS_SAVE_UNITS => "Save current units as defaults",
        SETTINGS_LANGUAGE => "Language",
        GUI_NAV_HEADING => "Calculators",
        GUI_CALCULATE => "Calculate",
        GUI_CLEAR => "Clear",
        GUI_CONVERT => "Convert",
        GUI_SETTINGS => "Settings",
        GUI_CLOSE => "Close",
        GUI_FONT_MISSING => "No Korean font found.",
        GUI_SAVE => "Save",
        GUI_UNIT_CONVERTER => "Unit Converter",
        GUI_QUANTITY => "Quantity",
        GUI_VALUE => "Value",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::dilution::MOLAR_DILUTION;

    #[test]
    fn korean_falls_back_to_english_then_key() {
        let tr = Translator::new("ko-KR");
        assert_eq!(tr.language(), Language::Ko);
        assert_eq!(tr.t(keys::GUI_CALCULATE), "계산");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn term_label_uses_default_when_untranslated() {
        let tr = Translator::new("en");
        assert_eq!(tr.term_label(&MOLAR_DILUTION.terms[0]), "C1");
        assert_eq!(
            tr.calculator_title(Calculator::PrepareSolution),
            "Prepare Molar Solution"
        );
    }

    #[test]
    fn calc_error_fills_placeholders() {
        let tr = Translator::new("en");
        let msg = tr.calc_error(&CalcError::InvalidSelection { empty: 2 });
        assert_eq!(
            msg,
            "Error: Please leave exactly one field empty to solve for. (2 empty)"
        );
    }

    #[test]
    fn language_resolution_prefers_cli_then_config() {
        assert_eq!(resolve_language("ko", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-US")), "en");
    }

    #[test]
    fn nested_toml_pack_is_flattened() {
        let map = parse_toml_to_map("[gui]\ncalculate = \"Go\"\n").expect("map");
        assert_eq!(map.get("gui.calculate").map(String::as_str), Some("Go"));
    }
}
