use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use super::assumptions::{AssumptionError, CostAssumptions};
use super::record::{PropertyRecord, PropertyRow, RequiredField};

/// 연간 주 수.
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// 행이 계산에서 제외된 이유.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExclusionReason {
    /// 필수 컬럼이 비어 있음
    MissingField(RequiredField),
    /// 매입가가 0 이하이거나 유한하지 않음
    InvalidPrice(f64),
    /// 주간 임대료가 음수이거나 유한하지 않음
    InvalidRent(f64),
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExclusionReason::MissingField(field) => write!(f, "필수 값 누락: {field}"),
            ExclusionReason::InvalidPrice(v) => write!(f, "매입가 오류: {v}"),
            ExclusionReason::InvalidRent(v) => write!(f, "임대료 오류: {v}"),
        }
    }
}

/// 제외된 행 정보.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exclusion {
    /// 입력 순서상의 위치(0부터)
    pub index: usize,
    pub suburb: Option<String>,
    pub reason: ExclusionReason,
}

/// 매물 한 건의 수익률 계산 결과. 금액 단위는 모두 연간 [$], 수익률은 [%].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldResult {
    #[serde(flatten)]
    pub record: PropertyRecord,
    pub annual_rent: f64,
    pub gross_yield: f64,
    pub vacancy_cost: f64,
    pub property_tax: f64,
    pub maintenance_cost: f64,
    pub management_fee: f64,
    pub insurance_cost: f64,
    pub strata_fee: f64,
    pub net_rent: f64,
    pub net_yield: f64,
}

impl YieldResult {
    /// 원래 입력 행으로 되돌린다. 파생 값은 버린다.
    pub fn to_row(&self) -> PropertyRow {
        PropertyRow::from(self.record.clone())
    }
}

/// 배치 계산 결과.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct YieldReport {
    /// 입력 순서를 유지한 계산 결과
    pub results: Vec<YieldResult>,
    pub excluded: Vec<Exclusion>,
}

impl YieldReport {
    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }
}

/// 행을 검증한다. 필수 값 누락, 0 이하 매입가, 음수 임대료는 제외 사유가 된다.
pub fn validate_row(row: &PropertyRow) -> Result<PropertyRecord, ExclusionReason> {
    let (suburb, price, weekly_rent) = match (&row.suburb, row.price, row.weekly_rent) {
        (Some(suburb), Some(price), Some(weekly_rent)) if !suburb.trim().is_empty() => {
            (suburb, price, weekly_rent)
        }
        _ => {
            let field = row.missing_field().unwrap_or(RequiredField::Suburb);
            return Err(ExclusionReason::MissingField(field));
        }
    };
    if !price.is_finite() || price <= 0.0 {
        return Err(ExclusionReason::InvalidPrice(price));
    }
    if !weekly_rent.is_finite() || weekly_rent < 0.0 {
        return Err(ExclusionReason::InvalidRent(weekly_rent));
    }
    Ok(PropertyRecord {
        suburb: suburb.clone(),
        price,
        weekly_rent,
        extra: row.extra.clone(),
    })
}

/// 검증된 레코드 한 건의 수익률을 계산한다.
///
/// 공실/관리수수료는 연 임대료, 재산세/유지보수비는 매입가에 비율을 곱한다.
/// 보험료와 strata 비용은 고정 금액이다.
pub fn compute_record(record: PropertyRecord, assumptions: &CostAssumptions) -> YieldResult {
    let price = record.price;
    let annual_rent = record.weekly_rent * WEEKS_PER_YEAR;
    let gross_yield = (annual_rent / price) * 100.0;

    let vacancy_cost = assumptions.vacancy_rate * annual_rent;
    let property_tax = assumptions.property_tax_rate * price;
    let maintenance_cost = assumptions.maintenance_rate * price;
    let management_fee = assumptions.management_fee_rate * annual_rent;
    let insurance_cost = assumptions.insurance_cost;
    let strata_fee = assumptions.effective_strata_fee();

    let net_rent = annual_rent
        - vacancy_cost
        - property_tax
        - maintenance_cost
        - management_fee
        - insurance_cost
        - strata_fee;
    let net_yield = (net_rent / price) * 100.0;

    YieldResult {
        record,
        annual_rent,
        gross_yield,
        vacancy_cost,
        property_tax,
        maintenance_cost,
        management_fee,
        insurance_cost,
        strata_fee,
        net_rent,
        net_yield,
    }
}

/// 매물 목록 전체의 수익률을 계산한다.
///
/// 비용 가정이 잘못되면 어떤 행도 처리하지 않고 오류를 돌려준다. 잘못된 행은
/// 결과에서 빠지고 `excluded`에 기록될 뿐 나머지 행의 계산을 막지 않는다.
pub fn compute<'a, I>(rows: I, assumptions: &CostAssumptions) -> Result<YieldReport, AssumptionError>
where
    I: IntoIterator<Item = &'a PropertyRow>,
{
    assumptions.validate()?;
    let mut report = YieldReport::default();
    for (index, row) in rows.into_iter().enumerate() {
        match validate_row(row) {
            Ok(record) => report.results.push(compute_record(record, assumptions)),
            Err(reason) => {
                debug!(index, suburb = ?row.suburb, %reason, "row excluded");
                report.excluded.push(Exclusion {
                    index,
                    suburb: row.suburb.clone(),
                    reason,
                });
            }
        }
    }
    debug!(
        computed = report.results.len(),
        excluded = report.excluded.len(),
        "yield computation finished"
    );
    Ok(report)
}

/// 순수익률 내림차순으로 정렬한다. 같은 값이면 기존 순서를 유지한다.
pub fn sort_by_net_yield_desc(results: &mut [YieldResult]) {
    results.sort_by(|a, b| {
        b.net_yield
            .partial_cmp(&a.net_yield)
            .unwrap_or(Ordering::Equal)
    });
}
