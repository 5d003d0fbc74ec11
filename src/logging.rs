use tracing_subscriber::EnvFilter;

/// `RUST_LOG`이 없을 때 쓰는 필터.
const DEFAULT_FILTER: &str = "rental_yield_calculator=warn";

/// stderr로 출력하는 tracing 구독자를 설치한다. 이미 설치되어 있으면 무시한다.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
