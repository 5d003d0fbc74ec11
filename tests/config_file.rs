//! config.toml 로드/저장 회귀 테스트.
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use rental_yield_calculator::app::RunContext;
use rental_yield_calculator::config::{load_or_default_at, ConfigError};
use rental_yield_calculator::ui_cli::Cli;
use rental_yield_calculator::yield_calc::CostAssumptions;

fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rental_yield_{}_{name}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    dir.join("config.toml")
}

#[test]
fn missing_file_is_created_with_defaults() {
    let path = temp_path("create");
    let _ = fs::remove_file(&path);
    let cfg = load_or_default_at(&path).expect("load");
    assert!(path.exists());
    assert_eq!(cfg.assumptions.vacancy_rate, 0.02);
    assert!(!cfg.assumptions.include_strata);
}

#[test]
fn saved_assumptions_are_read_back() {
    let path = temp_path("roundtrip");
    let _ = fs::remove_file(&path);
    let mut cfg = load_or_default_at(&path).expect("load");
    cfg.assumptions.management_fee_rate = 0.07;
    cfg.language = "ko".into();
    cfg.save().expect("save");
    let again = load_or_default_at(&path).expect("reload");
    assert_eq!(again.assumptions.management_fee_rate, 0.07);
    assert_eq!(again.language, "ko");
}

#[test]
fn out_of_range_rate_in_file_is_rejected() {
    let path = temp_path("invalid");
    fs::write(&path, "[assumptions]\nvacancy_rate = 4.0\n").expect("write");
    let err = load_or_default_at(&path).expect_err("must fail");
    assert!(matches!(err, ConfigError::Assumptions(_)));
}

#[test]
fn command_line_overrides_are_not_written_back() {
    let path = temp_path("overrides");
    let _ = fs::remove_file(&path);
    let cfg = load_or_default_at(&path).expect("load");
    let cli = Cli::parse_from([
        "rental_yield_calculator",
        "--vacancy",
        "9",
        "--sort",
        "--include-strata",
    ]);
    let ctx = RunContext::new(cfg, &cli).expect("context");
    assert!((ctx.assumptions.vacancy_rate - 0.09).abs() < 1e-12);
    assert!(ctx.assumptions.include_strata);
    assert!(ctx.sort_by_net_yield);

    // 종료 시 저장과 같은 경로
    ctx.config.save().expect("save");
    let reloaded = load_or_default_at(&path).expect("reload");
    assert_eq!(reloaded.assumptions, CostAssumptions::default());
    assert!(!reloaded.sort_by_net_yield);
}

#[test]
fn menu_edits_are_saved() {
    let path = temp_path("menu_edit");
    let _ = fs::remove_file(&path);
    let cfg = load_or_default_at(&path).expect("load");
    let mut ctx = RunContext::new(cfg, &Cli::parse_from(["rental_yield_calculator"])).expect("context");
    let edited = CostAssumptions {
        maintenance_rate: 0.015,
        ..ctx.assumptions.clone()
    };
    ctx.set_assumptions(edited.clone());
    ctx.config.save().expect("save");
    assert_eq!(load_or_default_at(&path).expect("reload").assumptions, edited);
}

#[test]
fn invalid_override_is_rejected() {
    let path = temp_path("bad_override");
    let _ = fs::remove_file(&path);
    let cfg = load_or_default_at(&path).expect("load");
    let cli = Cli::parse_from(["rental_yield_calculator", "--vacancy", "150"]);
    assert!(RunContext::new(cfg, &cli).is_err());
}
