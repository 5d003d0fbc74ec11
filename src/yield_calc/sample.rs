//! 입력 파일이 없을 때 쓰는 내장 샘플 데이터(멜버른 5개 지역).

use super::record::PropertyRow;

/// (지역, 매입가, 주간 임대료)
const SAMPLE: [(&str, f64, f64); 5] = [
    ("Hawthorn", 850_000.0, 650.0),
    ("Richmond", 790_000.0, 630.0),
    ("Brunswick", 710_000.0, 600.0),
    ("Footscray", 670_000.0, 580.0),
    ("Southbank", 910_000.0, 700.0),
];

pub fn sample_rows() -> Vec<PropertyRow> {
    SAMPLE
        .iter()
        .map(|&(suburb, price, rent)| PropertyRow::new(suburb, price, rent))
        .collect()
}
