//! 임대 수익률(총수익률/순수익률) 계산 모듈 모음.

pub mod assumptions;
pub mod calculator;
pub mod record;
pub mod sample;

pub use assumptions::*;
pub use calculator::*;
pub use record::*;
