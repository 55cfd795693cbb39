use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::solver::Calculator;
use crate::units::*;

/// 기본 설정 파일 이름.
pub const CONFIG_FILE: &str = "config.toml";

/// C1·V1 = C2·V2 계산기 하나의 기본 단위.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DilutionUnits<C> {
    pub c1: C,
    pub v1: VolumeUnit,
    pub c2: C,
    pub v2: VolumeUnit,
}

impl<C: Unit> DilutionUnits<C> {
    fn symbols(&self) -> [&'static str; 4] {
        [
            self.c1.symbol(),
            self.v1.symbol(),
            self.c2.symbol(),
            self.v2.symbol(),
        ]
    }
}

/// 용액 조제 계산기의 기본 단위. 몰 질량은 g/mol 고정이다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareUnits {
    pub concentration: MolarConcentrationUnit,
    pub volume: VolumeUnit,
    pub mass: MassUnit,
}

/// 각 계산기 입력 칸의 기본 단위 설정을 담는다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultUnits {
    pub molarity: DilutionUnits<MolarConcentrationUnit>,
    pub mass_concentration: DilutionUnits<MassConcentrationUnit>,
    pub prepare_solution: PrepareUnits,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        Self {
            molarity: DilutionUnits {
                c1: MolarConcentrationUnit::MillimolPerLiter,
                v1: VolumeUnit::Microliter,
                c2: MolarConcentrationUnit::MicromolPerLiter,
                v2: VolumeUnit::Milliliter,
            },
            mass_concentration: DilutionUnits {
                c1: MassConcentrationUnit::MilligramPerMilliliter,
                v1: VolumeUnit::Microliter,
                c2: MassConcentrationUnit::MicrogramPerMilliliter,
                v2: VolumeUnit::Milliliter,
            },
            prepare_solution: PrepareUnits {
                concentration: MolarConcentrationUnit::MillimolPerLiter,
                volume: VolumeUnit::Microliter,
                mass: MassUnit::Milligram,
            },
        }
    }
}

impl DefaultUnits {
    /// 계산기 입력 칸 순서대로 기본 단위 기호를 돌려준다.
    pub fn symbols_for(&self, calculator: Calculator) -> [&'static str; 4] {
        match calculator {
            Calculator::MolarDilution => self.molarity.symbols(),
            Calculator::MassConcentrationDilution => self.mass_concentration.symbols(),
            Calculator::PrepareSolution => [
                self.prepare_solution.concentration.symbol(),
                self.prepare_solution.volume.symbol(),
                self.prepare_solution.mass.symbol(),
                crate::quantity::MOLAR_MASS_UNIT,
            ],
        }
    }

    /// 입력 칸 단위 기호를 받아 기본 단위로 저장한다. 표에 없는 기호는 무시한다.
    pub fn remember(&mut self, calculator: Calculator, units: &[String]) {
        let pick = |i: usize| units.get(i).map(String::as_str).unwrap_or_default();
        match calculator {
            Calculator::MolarDilution => remember_dilution(&mut self.molarity, pick),
            Calculator::MassConcentrationDilution => {
                remember_dilution(&mut self.mass_concentration, pick)
            }
            Calculator::PrepareSolution => {
                let p = &mut self.prepare_solution;
                set_if_known(&mut p.concentration, pick(0));
                set_if_known(&mut p.volume, pick(1));
                set_if_known(&mut p.mass, pick(2));
            }
        }
    }
}

fn remember_dilution<'a, C: Unit>(units: &mut DilutionUnits<C>, pick: impl Fn(usize) -> &'a str) {
    set_if_known(&mut units.c1, pick(0));
    set_if_known(&mut units.v1, pick(1));
    set_if_known(&mut units.c2, pick(2));
    set_if_known(&mut units.v2, pick(3));
}

fn set_if_known<U: Unit>(target: &mut U, symbol: &str) {
    if let Some(u) = U::from_symbol(symbol) {
        *target = u;
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/ko/en)
    pub language: String,
    /// `RUST_LOG`가 없을 때 쓰는 로그 필터
    pub log_filter: String,
    /// 마지막으로 사용한 계산기
    pub last_calculator: Calculator,
    pub default_units: DefaultUnits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            log_filter: "dilution_calculator=info".into(),
            last_calculator: Calculator::MolarDilution,
            default_units: DefaultUnits::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 지정한 경로의 설정을 로드한다. 파일이 없으면 기본값으로 새로 만든다.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "설정 로드");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        info!(path = %path.display(), "기본 설정 생성");
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 지정한 경로에 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)?;
        info!(path = %path.display(), "설정 저장");
        Ok(())
    }
}

/// CLI 인자가 있으면 그 경로를, 없으면 기본 파일 경로를 쓴다.
pub fn resolve_path(cli_path: Option<&Path>) -> PathBuf {
    cli_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "dilution_calculator_{}_{name}.toml",
            std::process::id()
        ))
    }

    #[test]
    fn default_units_match_dashboard_defaults() {
        let units = DefaultUnits::default();
        assert_eq!(
            units.symbols_for(Calculator::MolarDilution),
            ["mmol/L", "ul", "umol/L", "ml"]
        );
        assert_eq!(
            units.symbols_for(Calculator::MassConcentrationDilution),
            ["mg/ml", "ul", "ug/ml", "ml"]
        );
        assert_eq!(
            units.symbols_for(Calculator::PrepareSolution),
            ["mmol/L", "ul", "mg", "g/mol"]
        );
    }

    #[test]
    fn missing_file_is_created_then_reloaded() {
        let path = temp_path("create");
        let _ = fs::remove_file(&path);
        let created = load_or_create(&path).expect("create config");
        assert!(path.exists());
        let loaded = load_or_create(&path).expect("reload config");
        assert_eq!(created, loaded);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn saved_units_survive_reload() {
        let path = temp_path("units");
        let mut cfg = Config::default();
        cfg.default_units.remember(
            Calculator::MolarDilution,
            &["mol/L".into(), "L".into(), "nmol/L".into(), "bogus".into()],
        );
        cfg.last_calculator = Calculator::PrepareSolution;
        cfg.save_to(&path).expect("save");
        let loaded = load_or_create(&path).expect("load");
        assert_eq!(
            loaded.default_units.symbols_for(Calculator::MolarDilution),
            ["mol/L", "L", "nmol/L", "ml"]
        );
        assert_eq!(loaded.last_calculator, Calculator::PrepareSolution);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let cfg: Config = toml::from_str("language = \"ko\"\n").expect("parse");
        assert_eq!(cfg.language, "ko");
        assert_eq!(cfg.default_units, DefaultUnits::default());
    }
}
