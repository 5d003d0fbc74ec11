//! 임대 수익률 계산 엔진을 라이브러리로 분리하여 CLI 외의 소비자도 쓸 수 있게 한다.

pub mod app;
pub mod config;
pub mod dataset;
pub mod i18n;
pub mod logging;
pub mod ui_cli;
pub mod yield_calc;
