//! 매물 CSV 읽기와 계산 결과 CSV 내보내기.
//!
//! 필수 헤더는 `suburb`, `price`, `weekly_rent`(대소문자 무시)이고 나머지 컬럼은
//! 문자열 그대로 추가 컬럼으로 넘긴다. 빈 칸이나 숫자로 읽을 수 없는 값은
//! 누락으로 보고 계산 단계에서 제외된다.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::yield_calc::{PropertyRow, RequiredField, YieldResult};

/// 결과 파일 기본 이름.
pub const DEFAULT_EXPORT_PATH: &str = "rental_yield_results.csv";

/// 파생 컬럼 순서.
const DERIVED_COLUMNS: [&str; 10] = [
    "annual_rent",
    "gross_yield",
    "vacancy_cost",
    "property_tax",
    "maintenance_cost",
    "management_fee",
    "insurance_cost",
    "strata_fee",
    "net_rent",
    "net_yield",
];

/// CSV 입출력 오류.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// CSV 형식 오류
    #[error("CSV 오류: {0}")]
    Csv(#[from] csv::Error),
}

/// CSV에서 매물 행을 읽는다. 행 단위 값 오류로는 실패하지 않는다.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<PropertyRow>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        // 짧은 행의 빈 자리는 빈 칸으로 본다
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header, record.get(i).unwrap_or("")));
        rows.push(row_from_columns(columns));
    }
    debug!(rows = rows.len(), "read property csv");
    Ok(rows)
}

pub fn read_rows_from_path(path: &Path) -> Result<Vec<PropertyRow>, DatasetError> {
    let rows = read_rows(File::open(path)?)?;
    info!(path = %path.display(), rows = rows.len(), "loaded property data");
    Ok(rows)
}

fn row_from_columns<'a>(columns: impl Iterator<Item = (&'a str, &'a str)>) -> PropertyRow {
    let mut row = PropertyRow::default();
    for (header, cell) in columns {
        match RequiredField::from_header(header) {
            Some(RequiredField::Suburb) => {
                row.suburb = (!cell.is_empty()).then(|| cell.to_string());
            }
            Some(RequiredField::Price) => row.price = parse_number(header, cell),
            Some(RequiredField::WeeklyRent) => row.weekly_rent = parse_number(header, cell),
            None => {
                row.extra.insert(header.to_string(), Value::from(cell));
            }
        }
    }
    row
}

fn parse_number(header: &str, cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            debug!(column = header, value = cell, "not a number, treated as missing");
            None
        }
    }
}

/// 계산 결과를 CSV로 쓴다. 추가 컬럼은 필수 컬럼과 파생 컬럼 사이에 놓는다.
pub fn write_results<W: Write>(writer: W, results: &[YieldResult]) -> Result<(), DatasetError> {
    let extra_headers: Vec<&str> = {
        let mut seen: Vec<&str> = Vec::new();
        for key in results.iter().flat_map(|r| r.record.extra.keys()) {
            if !seen.contains(&key.as_str()) {
                seen.push(key);
            }
        }
        seen
    };

    let mut wtr = csv::Writer::from_writer(writer);
    let header = ["suburb", "price", "weekly_rent"]
        .into_iter()
        .chain(extra_headers.iter().copied())
        .chain(DERIVED_COLUMNS);
    wtr.write_record(header)?;

    for r in results {
        let mut fields = vec![
            r.record.suburb.clone(),
            r.record.price.to_string(),
            r.record.weekly_rent.to_string(),
        ];
        fields.extend(
            extra_headers
                .iter()
                .map(|key| r.record.extra.get(*key).map(cell_text).unwrap_or_default()),
        );
        fields.extend(
            [
                r.annual_rent,
                r.gross_yield,
                r.vacancy_cost,
                r.property_tax,
                r.maintenance_cost,
                r.management_fee,
                r.insurance_cost,
                r.strata_fee,
                r.net_rent,
                r.net_yield,
            ]
            .iter()
            .map(f64::to_string),
        );
        wtr.write_record(&fields)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_results_to_path(path: &Path, results: &[YieldResult]) -> Result<(), DatasetError> {
    write_results(File::create(path)?, results)?;
    info!(path = %path.display(), rows = results.len(), "exported results");
    Ok(())
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
