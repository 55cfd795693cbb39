use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::config::{Config, ConfigError, DefaultUnits};
use crate::conversion::{self, ConversionError};
use crate::format::format_general;
use crate::i18n::{self, Translator};
use crate::quantity::{QuantityKind, QuantitySlot};
use crate::solver::{self, CalcError, Calculator, DilutionRequest, PrepareSolutionRequest};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 단위 변환 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
    /// 계산 오류 (스크립트 실행에서만 밖으로 전달된다)
    #[error("계산 오류: {0}")]
    Calc(#[from] CalcError),
}

/// 희석 계산기 CLI.
#[derive(Debug, Parser)]
#[command(name = "dilution_calculator_cli", version, about)]
pub struct Cli {
    /// 언어 (auto/ko/en)
    #[arg(long, short = 'L', default_value = "auto")]
    pub lang: String,
    /// 설정 파일 경로 (기본: ./config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// 하위 명령이 없으면 대화형 메뉴를 실행한다.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 몰 농도 희석 (C1V1 = C2V2). 값을 하나 생략하면 그 값을 구한다.
    Molarity(DilutionArgs),
    /// 질량 농도 희석 (C1V1 = C2V2)
    MassConcentration(DilutionArgs),
    /// 몰 용액 조제 (질량 = 농도 · 부피 · 몰 질량)
    Prepare(PrepareArgs),
    /// 농도와 부피, 몰 질량으로 질량 계산
    Mass(MassArgs),
    /// 같은 물리량 안에서 단위 변환
    Convert(ConvertArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct DilutionArgs {
    #[arg(long)]
    pub c1: Option<String>,
    #[arg(long)]
    pub c1_unit: Option<String>,
    #[arg(long)]
    pub v1: Option<String>,
    #[arg(long)]
    pub v1_unit: Option<String>,
    #[arg(long)]
    pub c2: Option<String>,
    #[arg(long)]
    pub c2_unit: Option<String>,
    #[arg(long)]
    pub v2: Option<String>,
    #[arg(long)]
    pub v2_unit: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct PrepareArgs {
    #[arg(long)]
    pub concentration: Option<String>,
    #[arg(long)]
    pub concentration_unit: Option<String>,
    #[arg(long)]
    pub volume: Option<String>,
    #[arg(long)]
    pub volume_unit: Option<String>,
    #[arg(long)]
    pub mass: Option<String>,
    #[arg(long)]
    pub mass_unit: Option<String>,
    #[arg(long)]
    pub molar_mass: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct MassArgs {
    #[arg(long)]
    pub concentration: String,
    #[arg(long)]
    pub concentration_unit: Option<String>,
    #[arg(long)]
    pub volume: String,
    #[arg(long)]
    pub volume_unit: Option<String>,
    #[arg(long)]
    pub molar_mass: String,
    #[arg(long)]
    pub mass_unit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    MolarConcentration,
    Volume,
    Mass,
    MassConcentration,
}

impl From<KindArg> for QuantityKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::MolarConcentration => QuantityKind::MolarConcentration,
            KindArg::Volume => QuantityKind::Volume,
            KindArg::Mass => QuantityKind::Mass,
            KindArg::MassConcentration => QuantityKind::MassConcentration,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    #[arg(value_enum)]
    pub kind: KindArg,
    #[arg(allow_negative_numbers = true)]
    pub value: String,
    pub from: String,
    pub to: String,
}

fn slot(value: &Option<String>, unit: &Option<String>, default_unit: &str) -> QuantitySlot {
    QuantitySlot {
        value: value.clone(),
        unit: unit.clone().unwrap_or_else(|| default_unit.to_string()),
    }
}

fn dilution_request(args: &DilutionArgs, defaults: [&str; 4]) -> DilutionRequest {
    DilutionRequest {
        c1: slot(&args.c1, &args.c1_unit, defaults[0]),
        v1: slot(&args.v1, &args.v1_unit, defaults[1]),
        c2: slot(&args.c2, &args.c2_unit, defaults[2]),
        v2: slot(&args.v2, &args.v2_unit, defaults[3]),
    }
}

/// 하위 명령 하나를 실행하고 출력할 문장을 돌려준다.
///
/// 단위를 생략한 칸은 설정의 기본 단위를 쓴다.
pub fn run_command(
    command: &Command,
    units: &DefaultUnits,
    tr: &Translator,
) -> Result<String, AppError> {
    let solution = match command {
        Command::Molarity(args) => {
            let defaults = units.symbols_for(Calculator::MolarDilution);
            solver::solve_molar_dilution(&dilution_request(args, defaults))?
        }
        Command::MassConcentration(args) => {
            let defaults = units.symbols_for(Calculator::MassConcentrationDilution);
            solver::solve_mass_concentration_dilution(&dilution_request(args, defaults))?
        }
        Command::Prepare(args) => {
            let d = units.symbols_for(Calculator::PrepareSolution);
            solver::solve_prepare_solution(&PrepareSolutionRequest {
                concentration: slot(&args.concentration, &args.concentration_unit, d[0]),
                volume: slot(&args.volume, &args.volume_unit, d[1]),
                mass: slot(&args.mass, &args.mass_unit, d[2]),
                molar_mass: args.molar_mass.clone(),
            })?
        }
        Command::Mass(args) => {
            let d = units.symbols_for(Calculator::PrepareSolution);
            solver::compute_mass_from_volume(
                &args.concentration,
                args.concentration_unit.as_deref().unwrap_or(d[0]),
                &args.volume,
                args.volume_unit.as_deref().unwrap_or(d[1]),
                &args.molar_mass,
                args.mass_unit.as_deref().unwrap_or(d[2]),
            )?
        }
        Command::Convert(args) => {
            let value = solver::parse_value("Value", Some(&args.value))?;
            let result = conversion::convert(args.kind.into(), value, &args.from, &args.to)?;
            return Ok(format!(
                "{} {} {}",
                tr.t(i18n::keys::UNIT_CONVERSION_RESULT),
                format_general(result),
                args.to
            ));
        }
    };
    Ok(tr.solution(&solution))
}

/// CLI 애플리케이션을 실행한다. 하위 명령이 없으면 대화형 메뉴 루프를 돈다.
pub fn run(
    cli: &Cli,
    config: &mut Config,
    config_path: &Path,
    tr: &Translator,
) -> Result<(), AppError> {
    match &cli.command {
        Some(command) => {
            println!("{}", run_command(command, &config.default_units, tr)?);
            Ok(())
        }
        None => {
            let stdin = io::stdin();
            run_interactive(config, config_path, tr, &mut stdin.lock())
        }
    }
}

/// 대화형 메뉴 루프. 입력이 끝나면 설정을 저장하고 종료한다.
fn run_interactive(
    config: &mut Config,
    config_path: &Path,
    tr: &Translator,
    input: &mut impl BufRead,
) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr, input)? {
            MenuChoice::Calculator(calculator) => {
                ui_cli::handle_calculator(tr, config, calculator, input)?
            }
            MenuChoice::MassFromVolume => ui_cli::handle_mass_from_volume(tr, config, input)?,
            MenuChoice::UnitConversion => ui_cli::handle_unit_conversion(tr, input)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config, input)?;
                config.save_to(config_path)?;
                println!("{}", tr.t(i18n::keys::SETTINGS_SAVED));
            }
            MenuChoice::Exit => {
                config.save_to(config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> Translator {
        Translator::new("en")
    }

    #[test]
    fn cli_parses_dilution_subcommand() {
        let cli = Cli::try_parse_from([
            "dilution_calculator_cli",
            "molarity",
            "--c1",
            "10",
            "--c1-unit",
            "mmol/L",
            "--v1",
            "100",
        ])
        .expect("parse");
        match cli.command {
            Some(Command::Molarity(args)) => {
                assert_eq!(args.c1.as_deref(), Some("10"));
                assert_eq!(args.c1_unit.as_deref(), Some("mmol/L"));
                assert_eq!(args.c2, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn molarity_command_uses_default_units_for_missing_unit_flags() {
        let args = DilutionArgs {
            c1: Some("10".into()),
            c1_unit: Some("mmol/L".into()),
            v1: Some("100".into()),
            v1_unit: Some("ul".into()),
            c2: Some("1".into()),
            c2_unit: Some("mmol/L".into()),
            v2: None,
            v2_unit: Some("ul".into()),
        };
        let out = run_command(&Command::Molarity(args), &DefaultUnits::default(), &en())
            .expect("solve");
        assert_eq!(out, "Result: V2 = 1000 ul");
    }

    #[test]
    fn prepare_command_reports_molar_mass_in_g_per_mol() {
        let args = PrepareArgs {
            concentration: Some("1".into()),
            concentration_unit: Some("mmol/L".into()),
            volume: Some("10".into()),
            volume_unit: Some("ml".into()),
            mass: Some("5".into()),
            mass_unit: Some("mg".into()),
            molar_mass: None,
        };
        let out = run_command(&Command::Prepare(args), &DefaultUnits::default(), &en())
            .expect("solve");
        assert_eq!(out, "Result: Molar Mass = 500 g/mol");
    }

    #[test]
    fn calculation_errors_propagate_from_scripted_commands() {
        let err = run_command(
            &Command::Molarity(DilutionArgs::default()),
            &DefaultUnits::default(),
            &en(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Calc(CalcError::InvalidSelection { empty: 4 })
        ));
    }

    fn temp_config(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "dilution_calculator_app_{}_{name}.toml",
            std::process::id()
        ))
    }

    #[test]
    fn interactive_loop_exits_when_input_ends() {
        let path = temp_config("eof");
        let mut cfg = Config::default();
        let mut input = io::Cursor::new(Vec::<u8>::new());
        run_interactive(&mut cfg, &path, &en(), &mut input).expect("clean exit");
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn interactive_calculation_remembers_units() {
        let path = temp_config("session");
        let mut cfg = Config::default();
        // 질량 농도 희석: C1=1 mg/ml, V1=10 ul, C2=1 ug/ml, V2 빈 칸 (단위 L)
        let script = "2\n1\n\n10\n\n1\n\n\nL\n0\n";
        let mut input = io::Cursor::new(script.as_bytes());
        run_interactive(&mut cfg, &path, &en(), &mut input).expect("session");
        assert_eq!(cfg.last_calculator, Calculator::MassConcentrationDilution);
        assert_eq!(
            cfg.default_units
                .symbols_for(Calculator::MassConcentrationDilution)[3],
            "L"
        );
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unfinished_prompt_is_an_eof_error() {
        let mut cfg = Config::default();
        let mut input = io::Cursor::new("10\n".as_bytes());
        let err = ui_cli::handle_calculator(&en(), &mut cfg, Calculator::MolarDilution, &mut input)
            .unwrap_err();
        assert!(ui_cli::is_eof(&err));
    }

    #[test]
    fn convert_command_rejects_non_finite_value() {
        let cli = Cli::try_parse_from(["x", "convert", "volume", "inf", "ml", "L"]).expect("parse");
        let err = run_command(
            cli.command.as_ref().expect("command"),
            &DefaultUnits::default(),
            &en(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Calc(CalcError::InvalidNumber { field: "Value", .. })
        ));
    }

    #[test]
    fn convert_command_formats_result() {
        let cli = Cli::try_parse_from(["x", "convert", "volume", "5", "ml", "L"]).expect("parse");
        let out = run_command(
            cli.command.as_ref().expect("command"),
            &DefaultUnits::default(),
            &en(),
        )
        .expect("convert");
        assert_eq!(out, "Converted: 0.005 L");
    }
}
