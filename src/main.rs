use clap::Parser;
use rental_yield_calculator::{app, logging, ui_cli::Cli};

/// 프로그램의 엔트리 포인트. 로깅을 설치하고 CLI 애플리케이션을 실행한다.
fn main() {
    logging::init();
    let cli = Cli::parse();
    if let Err(err) = app::run(&cli) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}
