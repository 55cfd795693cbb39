use tracing_subscriber::EnvFilter;

/// 로그 출력을 초기화한다. `RUST_LOG`가 있으면 그것을, 없으면 설정의 필터를 쓴다.
///
/// 이미 초기화된 경우(테스트 등)에는 아무 것도 하지 않는다.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
