//! 수익률 계산 엔진의 배치 동작 회귀 테스트.
use approx::assert_relative_eq;
use rental_yield_calculator::yield_calc::{
    compute, sample::sample_rows, CostAssumptions, ExclusionReason, PropertyRow, RequiredField,
};

fn richmond_assumptions() -> CostAssumptions {
    CostAssumptions {
        vacancy_rate: 0.04,
        property_tax_rate: 0.005,
        maintenance_rate: 0.005,
        management_fee_rate: 0.05,
        insurance_cost: 1200.0,
        strata_fee: 0.0,
        include_strata: false,
    }
}

fn messy_rows() -> Vec<PropertyRow> {
    vec![
        PropertyRow::new("Hawthorn", 850_000.0, 650.0).with_extra("bedrooms", "3"),
        PropertyRow {
            weekly_rent: None,
            ..PropertyRow::new("Carlton", 650_000.0, 0.0)
        },
        PropertyRow::new("Nowhere", 0.0, 500.0),
        PropertyRow {
            suburb: None,
            ..PropertyRow::new("", 700_000.0, 550.0)
        },
        PropertyRow::new("Richmond", 790_000.0, 630.0),
    ]
}

#[test]
fn richmond_scenario() {
    let rows = vec![PropertyRow::new("Richmond", 790_000.0, 630.0)];
    let report = compute(&rows, &richmond_assumptions()).expect("compute");
    let r = &report.results[0];
    assert_eq!(r.annual_rent, 32_760.0);
    assert_relative_eq!(r.gross_yield, 4.146, epsilon = 1e-3);
    assert_relative_eq!(r.net_rent, 20_711.6, epsilon = 1e-6);
    assert_relative_eq!(r.net_yield, 2.622, epsilon = 1e-3);
    assert_eq!(r.strata_fee, 0.0);
}

#[test]
fn annual_rent_is_weekly_times_52() {
    let report = compute(&sample_rows(), &CostAssumptions::default()).expect("compute");
    for r in &report.results {
        assert_eq!(r.annual_rent, r.record.weekly_rent * 52.0);
    }
}

#[test]
fn zero_costs_make_net_equal_gross() {
    let report = compute(&sample_rows(), &CostAssumptions::zero()).expect("compute");
    for r in &report.results {
        assert_eq!(r.gross_yield, r.net_yield, "{}", r.record.suburb);
    }
}

#[test]
fn costs_never_raise_net_yield() {
    let mut a = CostAssumptions::default();
    a.include_strata = true;
    let report = compute(&sample_rows(), &a).expect("compute");
    assert_eq!(report.results.len(), 5);
    for r in &report.results {
        assert!(r.net_yield <= r.gross_yield, "{}", r.record.suburb);
    }
}

#[test]
fn bad_rows_are_excluded_and_order_is_kept() {
    let report = compute(&messy_rows(), &richmond_assumptions()).expect("compute");
    let suburbs: Vec<&str> = report
        .results
        .iter()
        .map(|r| r.record.suburb.as_str())
        .collect();
    assert_eq!(suburbs, ["Hawthorn", "Richmond"]);

    let reasons: Vec<(usize, ExclusionReason)> = report
        .excluded
        .iter()
        .map(|e| (e.index, e.reason.clone()))
        .collect();
    assert_eq!(
        reasons,
        [
            (1, ExclusionReason::MissingField(RequiredField::WeeklyRent)),
            (2, ExclusionReason::InvalidPrice(0.0)),
            (3, ExclusionReason::MissingField(RequiredField::Suburb)),
        ]
    );
}

#[test]
fn extra_columns_pass_through() {
    let report = compute(&messy_rows(), &richmond_assumptions()).expect("compute");
    assert_eq!(
        report.results[0].record.extra.get("bedrooms").and_then(|v| v.as_str()),
        Some("3")
    );
}

#[test]
fn filtering_is_idempotent() {
    let a = richmond_assumptions();
    let once = compute(&messy_rows(), &a).expect("compute");
    let refed: Vec<PropertyRow> = once.results.iter().map(|r| r.to_row()).collect();
    let twice = compute(&refed, &a).expect("compute");
    assert_eq!(once.results, twice.results);
    assert_eq!(twice.excluded_count(), 0);
}

#[test]
fn malformed_assumptions_fail_whole_batch() {
    let a = CostAssumptions {
        property_tax_rate: 1.5,
        ..richmond_assumptions()
    };
    assert!(compute(&sample_rows(), &a).is_err());
}
