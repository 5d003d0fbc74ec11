use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::app::AppError;
use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::dataset::DEFAULT_EXPORT_PATH;
use crate::i18n::{keys, Translator};
use crate::yield_calc::{percent_to_rate, CostAssumptions, PropertyRow, YieldReport};

/// 명령행 인자. 비율 값은 퍼센트(0~100)로 받아 내부에서 0~1로 바꾼다.
#[derive(Debug, Clone, Parser)]
#[command(name = "rental_yield_calculator", version, about = "Rental yield calculator")]
pub struct Cli {
    /// UI 언어 (auto, ko, en-us)
    #[arg(long, short = 'L')]
    pub lang: Option<String>,
    /// 설정 파일 경로
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// 매물 CSV (suburb, price, weekly_rent 헤더). 없으면 샘플 데이터를 쓴다.
    #[arg(long, short = 'i', value_name = "CSV")]
    pub input: Option<PathBuf>,
    /// 계산 결과를 저장할 CSV
    #[arg(long, short = 'o', value_name = "CSV")]
    pub output: Option<PathBuf>,
    /// 메뉴 없이 표만 출력하고 종료
    #[arg(long)]
    pub batch: bool,
    /// 순수익률 내림차순 정렬
    #[arg(long)]
    pub sort: bool,
    /// 공실률 [%]
    #[arg(long, value_name = "PERCENT")]
    pub vacancy: Option<f64>,
    /// 재산세율 [%]
    #[arg(long, value_name = "PERCENT")]
    pub property_tax: Option<f64>,
    /// 유지보수비율 [%]
    #[arg(long, value_name = "PERCENT")]
    pub maintenance: Option<f64>,
    /// 관리수수료율 [%]
    #[arg(long, value_name = "PERCENT")]
    pub management_fee: Option<f64>,
    /// 연간 보험료 [$]
    #[arg(long, value_name = "DOLLARS")]
    pub insurance: Option<f64>,
    /// 연간 strata 비용 [$]
    #[arg(long, value_name = "DOLLARS")]
    pub strata: Option<f64>,
    /// strata 비용 반영 여부. 값 없이 쓰면 true
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub include_strata: Option<bool>,
}

impl Cli {
    /// 설정 파일의 가정 위에 명령행 값을 덮어쓴 이번 실행용 가정을 만든다.
    /// 설정 파일 값은 건드리지 않는다.
    pub fn effective_assumptions(&self, base: &CostAssumptions) -> CostAssumptions {
        let mut a = base.clone();
        if let Some(v) = self.vacancy {
            a.vacancy_rate = percent_to_rate(v);
        }
        if let Some(v) = self.property_tax {
            a.property_tax_rate = percent_to_rate(v);
        }
        if let Some(v) = self.maintenance {
            a.maintenance_rate = percent_to_rate(v);
        }
        if let Some(v) = self.management_fee {
            a.management_fee_rate = percent_to_rate(v);
        }
        if let Some(v) = self.insurance {
            a.insurance_cost = v;
        }
        if let Some(v) = self.strata {
            a.strata_fee = v;
        }
        if let Some(on) = self.include_strata {
            a.include_strata = on;
        }
        a
    }
}

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ShowTable,
    AddProperty,
    ResetSample,
    Assumptions,
    Export,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_SHOW_TABLE,
        keys::MAIN_MENU_ADD_PROPERTY,
        keys::MAIN_MENU_RESET_SAMPLE,
        keys::MAIN_MENU_ASSUMPTIONS,
        keys::MAIN_MENU_EXPORT,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::ShowTable),
            "2" => return Ok(MenuChoice::AddProperty),
            "3" => return Ok(MenuChoice::ResetSample),
            "4" => return Ok(MenuChoice::Assumptions),
            "5" => return Ok(MenuChoice::Export),
            "6" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 매물 한 건을 입력받는다. 값 검증은 계산 단계에서 한다.
pub fn handle_add_property(tr: &Translator) -> Result<PropertyRow, AppError> {
    println!("{}", tr.t(keys::ADD_HEADING));
    let suburb = read_line(tr.t(keys::PROMPT_SUBURB))?;
    let price = read_f64(tr, tr.t(keys::PROMPT_PRICE))?;
    let weekly_rent = read_f64(tr, tr.t(keys::PROMPT_WEEKLY_RENT))?;
    Ok(PropertyRow::new(suburb.trim(), price, weekly_rent))
}

/// 비용 가정 메뉴를 처리한다. 잘못된 값이면 None을 돌려주고 기존 가정을 유지한다.
pub fn handle_assumptions(
    tr: &Translator,
    current: &CostAssumptions,
) -> Result<Option<CostAssumptions>, AppError> {
    println!("{}", tr.t(keys::ASSUMPTIONS_HEADING));
    println!("{}", tr.t(keys::ASSUMPTIONS_KEEP_HINT));
    let mut next = CostAssumptions {
        vacancy_rate: read_percent_or_keep(tr, keys::PROMPT_VACANCY, current.vacancy_rate)?,
        property_tax_rate: read_percent_or_keep(
            tr,
            keys::PROMPT_PROPERTY_TAX,
            current.property_tax_rate,
        )?,
        maintenance_rate: read_percent_or_keep(
            tr,
            keys::PROMPT_MAINTENANCE,
            current.maintenance_rate,
        )?,
        management_fee_rate: read_percent_or_keep(
            tr,
            keys::PROMPT_MANAGEMENT_FEE,
            current.management_fee_rate,
        )?,
        insurance_cost: read_f64_or_keep(tr, keys::PROMPT_INSURANCE, current.insurance_cost)?
            .unwrap_or(current.insurance_cost),
        ..current.clone()
    };
    let yn = if next.include_strata { "y" } else { "n" };
    let sel = read_line(&format!("{} [{yn}]: ", tr.t(keys::PROMPT_INCLUDE_STRATA)))?;
    match sel.trim().to_lowercase().as_str() {
        "y" | "yes" => next.include_strata = true,
        "n" | "no" => next.include_strata = false,
        _ => {}
    }
    if next.include_strata {
        if let Some(v) = read_f64_or_keep(tr, keys::PROMPT_STRATA, next.strata_fee)? {
            next.strata_fee = v;
        }
    }

    match next.validate() {
        Ok(()) => Ok(Some(next)),
        Err(e) => {
            println!("{}: {e}", tr.t(keys::ERROR_PREFIX));
            Ok(None)
        }
    }
}

/// 내보낼 파일 경로를 묻는다. 엔터면 `--output` 값이나 기본 파일 이름을 쓴다.
pub fn read_export_path(tr: &Translator, default: Option<&Path>) -> Result<PathBuf, AppError> {
    let default = default
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH));
    let s = read_line(&format!(
        "{} [{}]: ",
        tr.t(keys::PROMPT_EXPORT_PATH),
        default.display()
    ))?;
    let s = s.trim();
    Ok(if s.is_empty() { default } else { PathBuf::from(s) })
}

/// 설정 메뉴를 처리한다. 언어가 바뀌었으면 true.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let lang = match sel.trim() {
        "" => return Ok(false),
        "1" => "ko",
        "2" => "en-us",
        "3" => "auto",
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(false);
        }
    };
    cfg.language = lang.to_string();
    Ok(true)
}

/// 요약 표를 문자열로 만든다. 값은 표시용으로만 소수 둘째 자리에서 반올림한다.
pub fn render_report(tr: &Translator, report: &YieldReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tr.t(keys::TABLE_HEADING));
    if report.results.is_empty() {
        let _ = writeln!(out, "{}", tr.t(keys::TABLE_EMPTY));
    } else {
        let _ = writeln!(
            out,
            "{:<14} {:>12} {:>12} {:>12} {:>12}",
            tr.t(keys::TABLE_HEADER),
            "Price",
            "Weekly_Rent",
            "Gross_Yield",
            "Net_Yield"
        );
        for r in &report.results {
            let _ = writeln!(
                out,
                "{:<14} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
                r.record.suburb, r.record.price, r.record.weekly_rent, r.gross_yield, r.net_yield
            );
        }
    }
    if report.excluded_count() > 0 {
        let _ = writeln!(out, "{}", tr.tf(keys::TABLE_EXCLUDED, report.excluded_count()));
    }
    out
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 엔터만 누르면 None(현재 값 유지).
fn read_f64_or_keep(tr: &Translator, key: &str, current: f64) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(&format!("{} [{}]: ", tr.t(key), prompt_number(current)))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_percent_or_keep(tr: &Translator, key: &str, current_rate: f64) -> Result<f64, AppError> {
    Ok(read_f64_or_keep(tr, key, current_rate * 100.0)?
        .map(percent_to_rate)
        .unwrap_or(current_rate))
}

/// 프롬프트에 보여줄 현재 값. 소수 넷째 자리까지 쓰고 뒤쪽 0은 지운다.
fn prompt_number(value: f64) -> String {
    let text = format!("{value:.4}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
