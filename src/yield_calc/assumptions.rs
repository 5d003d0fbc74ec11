use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 비용 가정이 잘못된 경우. 모든 행에 영향을 주므로 계산 전체를 중단한다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssumptionError {
    /// 비율 값이 [0, 1] 범위를 벗어남
    #[error("{field} 비율은 0~1 범위여야 합니다 (입력값: {value})")]
    RateOutOfRange { field: &'static str, value: f64 },
    /// 고정 비용이 음수이거나 유한하지 않음
    #[error("{field} 금액은 0 이상의 유한한 값이어야 합니다 (입력값: {value})")]
    InvalidAmount { field: &'static str, value: f64 },
}

/// 모든 매물에 공통으로 적용하는 연간 비용 가정.
///
/// 비율 필드는 0~1 소수로 저장한다. 공실률과 관리수수료는 연 임대료 기준,
/// 재산세와 유지보수비는 매입가 기준이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostAssumptions {
    /// 공실률 (연 임대료 대비)
    pub vacancy_rate: f64,
    /// 재산세율 (매입가 대비)
    pub property_tax_rate: f64,
    /// 유지보수비율 (매입가 대비)
    pub maintenance_rate: f64,
    /// 관리수수료율 (연 임대료 대비)
    pub management_fee_rate: f64,
    /// 연간 보험료 [$]
    pub insurance_cost: f64,
    /// 연간 관리단(strata) 비용 [$]
    pub strata_fee: f64,
    /// false면 strata_fee를 0으로 계산한다.
    pub include_strata: bool,
}

impl Default for CostAssumptions {
    fn default() -> Self {
        Self {
            vacancy_rate: 0.02,
            property_tax_rate: 0.01,
            maintenance_rate: 0.01,
            management_fee_rate: 0.05,
            insurance_cost: 1200.0,
            strata_fee: 2500.0,
            include_strata: false,
        }
    }
}

impl CostAssumptions {
    /// 모든 비용이 0인 가정. 총수익률과 순수익률이 같아진다.
    pub fn zero() -> Self {
        Self {
            vacancy_rate: 0.0,
            property_tax_rate: 0.0,
            maintenance_rate: 0.0,
            management_fee_rate: 0.0,
            insurance_cost: 0.0,
            strata_fee: 0.0,
            include_strata: false,
        }
    }

    /// 실제로 적용되는 연간 strata 비용.
    pub fn effective_strata_fee(&self) -> f64 {
        if self.include_strata {
            self.strata_fee
        } else {
            0.0
        }
    }

    /// 비율과 금액 범위를 검사한다.
    pub fn validate(&self) -> Result<(), AssumptionError> {
        let rates = [
            ("vacancy_rate", self.vacancy_rate),
            ("property_tax_rate", self.property_tax_rate),
            ("maintenance_rate", self.maintenance_rate),
            ("management_fee_rate", self.management_fee_rate),
        ];
        for (field, value) in rates {
            // NaN은 범위 비교를 통과하지 못한다
            if !(0.0..=1.0).contains(&value) {
                return Err(AssumptionError::RateOutOfRange { field, value });
            }
        }
        let amounts = [
            ("insurance_cost", self.insurance_cost),
            ("strata_fee", self.strata_fee),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(AssumptionError::InvalidAmount { field, value });
            }
        }
        Ok(())
    }
}

/// 0~100 퍼센트 입력을 0~1 비율로 바꾼다.
pub fn percent_to_rate(percent: f64) -> f64 {
    percent / 100.0
}
