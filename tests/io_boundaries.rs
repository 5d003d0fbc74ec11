//! CSV 입력/출력과 serde 경계를 거치는 배치 실행 회귀 테스트.
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use clap::Parser;
use rental_yield_calculator::app;
use rental_yield_calculator::config::load_or_default_at;
use rental_yield_calculator::ui_cli::Cli;
use rental_yield_calculator::yield_calc::{compute, CostAssumptions, PropertyRow};
use serde_json::{json, Value};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rental_yield_io_{}_{name}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    dir
}

const RICHMOND_CONFIG: &str = r#"
language = "en-us"

[assumptions]
vacancy_rate = 0.04
property_tax_rate = 0.005
maintenance_rate = 0.005
management_fee_rate = 0.05
insurance_cost = 1200.0
strata_fee = 0.0
include_strata = false
"#;

#[test]
fn json_rows_keep_typed_extras_through_results() {
    let rows: Vec<PropertyRow> = serde_json::from_value(json!([
        {"suburb": "Richmond", "price": 790000, "weekly_rent": 630, "bedrooms": 2, "agent": "Kay"},
        {"suburb": "Carlton", "price": 650000, "weekly_rent": null}
    ]))
    .expect("rows");
    let report = compute(&rows, &CostAssumptions::zero()).expect("compute");
    assert_eq!(report.results.len(), 1);

    let out = serde_json::to_value(&report.results[0]).expect("serialize");
    assert_eq!(out["suburb"], json!("Richmond"));
    assert_eq!(out["bedrooms"], json!(2));
    assert_eq!(out["agent"], json!("Kay"));
    assert_eq!(out["annual_rent"], json!(32760.0));
    assert_eq!(out["gross_yield"], out["net_yield"]);

    let back = report.results[0].to_row();
    assert_eq!(back.extra.get("bedrooms"), Some(&Value::from(2)));
}

#[test]
fn batch_run_reads_csv_and_exports_results() {
    let dir = temp_dir("batch");
    let config_path = dir.join("config.toml");
    let input_path = dir.join("properties.csv");
    let output_path = dir.join("results.csv");
    fs::write(&config_path, RICHMOND_CONFIG).expect("config");
    fs::write(
        &input_path,
        "Suburb,Price,Weekly_Rent,Bedrooms\n\
         Richmond,790000,630,2\n\
         Carlton,650000,,3\n\
         Nowhere,0,500,1\n\
         Footscray,670000,580,2\n",
    )
    .expect("input");
    let _ = fs::remove_file(&output_path);

    let args: Vec<OsString> = vec![
        "rental_yield_calculator".into(),
        "--config".into(),
        config_path.clone().into_os_string(),
        "--input".into(),
        input_path.into_os_string(),
        "--output".into(),
        output_path.clone().into_os_string(),
        "--batch".into(),
        "--sort".into(),
    ];
    let cli = Cli::parse_from(args);
    app::run(&cli).expect("batch run");

    let mut reader = csv::Reader::from_path(&output_path).expect("results csv");
    let rows: Vec<BTreeMap<String, String>> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .expect("rows");
    let suburbs: Vec<&str> = rows.iter().map(|r| r["suburb"].as_str()).collect();
    // Footscray가 순수익률이 더 높아 정렬 후 먼저 온다
    assert_eq!(suburbs, ["Footscray", "Richmond"]);

    let richmond = &rows[1];
    assert_eq!(richmond["Bedrooms"], "2");
    let net_rent: f64 = richmond["net_rent"].parse().expect("net_rent");
    let net_yield: f64 = richmond["net_yield"].parse().expect("net_yield");
    assert_relative_eq!(net_rent, 20_711.6, epsilon = 1e-6);
    assert_relative_eq!(net_yield, 2.622, epsilon = 1e-3);

    // 실행 후에도 설정 파일의 가정은 그대로
    let cfg = load_or_default_at(&config_path).expect("reload");
    assert_eq!(cfg.assumptions.vacancy_rate, 0.04);
    assert!(!cfg.sort_by_net_yield);
}

#[test]
fn batch_run_with_missing_input_fails() {
    let dir = temp_dir("missing");
    let config_path = dir.join("config.toml");
    fs::write(&config_path, RICHMOND_CONFIG).expect("config");
    let args: Vec<OsString> = vec![
        "rental_yield_calculator".into(),
        "--config".into(),
        config_path.into_os_string(),
        "--input".into(),
        dir.join("nope.csv").into_os_string(),
        "--batch".into(),
    ];
    let cli = Cli::parse_from(args);
    assert!(matches!(app::run(&cli), Err(app::AppError::Dataset(_))));
}
