use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 계산에 쓰지 않는 추가 컬럼. 값의 타입은 공급자가 준 그대로 둔다.
pub type ExtraColumns = BTreeMap<String, Value>;

/// 필수 컬럼 이름.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequiredField {
    Suburb,
    Price,
    WeeklyRent,
}

impl RequiredField {
    pub fn column_name(&self) -> &'static str {
        match self {
            RequiredField::Suburb => "suburb",
            RequiredField::Price => "price",
            RequiredField::WeeklyRent => "weekly_rent",
        }
    }

    /// 헤더 이름이 이 컬럼을 가리키는지 확인한다. 대소문자와 앞뒤 공백은 무시한다.
    pub fn from_header(header: &str) -> Option<Self> {
        [
            RequiredField::Suburb,
            RequiredField::Price,
            RequiredField::WeeklyRent,
        ]
        .into_iter()
        .find(|f| header.trim().eq_ignore_ascii_case(f.column_name()))
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

/// 입력 공급자가 넘겨주는 원시 행. 필수 값이 비어 있을 수 있다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRow {
    #[serde(default)]
    pub suburb: Option<String>,
    /// 매입가 [$]
    #[serde(default)]
    pub price: Option<f64>,
    /// 주간 임대료 [$/week]
    #[serde(default)]
    pub weekly_rent: Option<f64>,
    /// 추가 컬럼. 계산에는 쓰지 않고 그대로 전달한다.
    #[serde(flatten)]
    pub extra: ExtraColumns,
}

impl PropertyRow {
    /// 필수 값이 모두 채워진 행을 만든다.
    pub fn new(suburb: impl Into<String>, price: f64, weekly_rent: f64) -> Self {
        Self {
            suburb: Some(suburb.into()),
            price: Some(price),
            weekly_rent: Some(weekly_rent),
            extra: ExtraColumns::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// 비어 있는 첫 번째 필수 컬럼을 찾는다. 공백뿐인 suburb도 비어 있는 것으로 본다.
    pub fn missing_field(&self) -> Option<RequiredField> {
        match &self.suburb {
            Some(s) if !s.trim().is_empty() => {}
            _ => return Some(RequiredField::Suburb),
        }
        if self.price.is_none() {
            return Some(RequiredField::Price);
        }
        if self.weekly_rent.is_none() {
            return Some(RequiredField::WeeklyRent);
        }
        None
    }
}

/// 필수 값 검증을 통과한 매물 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub suburb: String,
    /// 매입가 [$], 0보다 크다.
    pub price: f64,
    /// 주간 임대료 [$/week], 0 이상.
    pub weekly_rent: f64,
    #[serde(flatten)]
    pub extra: ExtraColumns,
}

impl From<PropertyRecord> for PropertyRow {
    fn from(record: PropertyRecord) -> Self {
        Self {
            suburb: Some(record.suburb),
            price: Some(record.price),
            weekly_rent: Some(record.weekly_rent),
            extra: record.extra,
        }
    }
}
