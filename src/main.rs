use std::process::ExitCode;

use clap::Parser;
use dilution_calculator::{app, config, i18n, logging};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    match try_run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run() -> Result<(), app::AppError> {
    let cli = app::Cli::parse();
    let config_path = config::resolve_path(cli.config.as_deref());
    let mut cfg = config::load_or_create(&config_path)?;
    logging::init(&cfg.log_filter);
    let lang = i18n::resolve_language(&cli.lang, Some(&cfg.language));
    let tr = i18n::Translator::new_with_pack(&lang, None);
    tracing::debug!(lang = tr.language_code(), "CLI 시작");
    app::run(&cli, &mut cfg, &config_path, &tr)
}
