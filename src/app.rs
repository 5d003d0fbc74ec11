use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{self, Config, ConfigError};
use crate::dataset::{self, DatasetError};
use crate::i18n::{self, Translator};
use crate::ui_cli::{self, Cli, MenuChoice};
use crate::yield_calc::{self, sample, AssumptionError, CostAssumptions, PropertyRow, YieldReport};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 비용 가정 오류
    #[error("비용 가정 오류: {0}")]
    Assumptions(#[from] AssumptionError),
    /// 매물/결과 CSV 오류
    #[error("데이터 파일 오류: {0}")]
    Dataset(#[from] DatasetError),
}

/// 현재 세션에서 다루는 매물 목록.
#[derive(Debug, Clone)]
pub struct Session {
    pub rows: Vec<PropertyRow>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            rows: sample::sample_rows(),
        }
    }
}

impl Session {
    /// 입력 파일이 있으면 읽고, 없으면 샘플 데이터를 쓴다.
    pub fn load(input: Option<&Path>) -> Result<Self, AppError> {
        match input {
            Some(path) => Ok(Self {
                rows: dataset::read_rows_from_path(path)?,
            }),
            None => Ok(Self::default()),
        }
    }
}

/// 실행 중 쓰는 값. `config`는 파일에 저장되는 값이고, `assumptions`와
/// `sort_by_net_yield`는 명령행 덮어쓰기가 반영된 이번 실행 전용 값이다.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: Config,
    pub assumptions: CostAssumptions,
    pub sort_by_net_yield: bool,
}

impl RunContext {
    pub fn new(config: Config, cli: &Cli) -> Result<Self, AppError> {
        let assumptions = cli.effective_assumptions(&config.assumptions);
        assumptions.validate()?;
        let sort_by_net_yield = cli.sort || config.sort_by_net_yield;
        Ok(Self {
            config,
            assumptions,
            sort_by_net_yield,
        })
    }

    /// 메뉴에서 바꾼 비용 가정은 이번 실행과 설정 파일 양쪽에 반영한다.
    pub fn set_assumptions(&mut self, assumptions: CostAssumptions) {
        self.config.assumptions = assumptions.clone();
        self.assumptions = assumptions;
    }

    pub fn compute(&self, rows: &[PropertyRow]) -> Result<YieldReport, AppError> {
        let mut report = yield_calc::compute(rows, &self.assumptions)?;
        if self.sort_by_net_yield {
            yield_calc::sort_by_net_yield_desc(&mut report.results);
        }
        Ok(report)
    }
}

/// 설정을 로드하고 CLI 애플리케이션을 실행한다.
pub fn run(cli: &Cli) -> Result<(), AppError> {
    let config = config::load_or_default_at(&cli.config)?;
    let mut ctx = RunContext::new(config, cli)?;

    let lang = i18n::resolve_language(cli.lang.as_deref(), Some(ctx.config.language.as_str()));
    let mut tr = Translator::new_with_pack(&lang, Some("locales"));
    info!(language = %lang, batch = cli.batch, "starting");
    debug!(assumptions = ?ctx.assumptions, "effective cost assumptions");

    let mut session = Session::load(cli.input.as_deref())?;
    if cli.batch {
        let report = ctx.compute(&session.rows)?;
        print!("{}", ui_cli::render_report(&tr, &report));
        if let Some(path) = &cli.output {
            dataset::write_results_to_path(path, &report.results)?;
        }
        return Ok(());
    }

    loop {
        match ui_cli::main_menu(&tr)? {
            MenuChoice::ShowTable => {
                let report = ctx.compute(&session.rows)?;
                print!("{}", ui_cli::render_report(&tr, &report));
            }
            MenuChoice::AddProperty => {
                let row = ui_cli::handle_add_property(&tr)?;
                session.rows.push(row);
                println!("{}", tr.t(i18n::keys::ADD_DONE));
            }
            MenuChoice::ResetSample => {
                session = Session::default();
                println!("{}", tr.t(i18n::keys::RESET_DONE));
            }
            MenuChoice::Assumptions => {
                if let Some(next) = ui_cli::handle_assumptions(&tr, &ctx.assumptions)? {
                    ctx.set_assumptions(next);
                    ctx.config.save()?;
                    println!("{}", tr.t(i18n::keys::ASSUMPTIONS_SAVED));
                }
            }
            MenuChoice::Export => {
                let path = ui_cli::read_export_path(&tr, cli.output.as_deref())?;
                let report = ctx.compute(&session.rows)?;
                dataset::write_results_to_path(&path, &report.results)?;
                println!("{}", tr.tf(i18n::keys::EXPORT_DONE, path.display()));
            }
            MenuChoice::Settings => {
                if ui_cli::handle_settings(&tr, &mut ctx.config)? {
                    let lang = i18n::resolve_language(None, Some(ctx.config.language.as_str()));
                    tr = Translator::new_with_pack(&lang, Some("locales"));
                    ctx.sort_by_net_yield = cli.sort || ctx.config.sort_by_net_yield;
                    ctx.config.save()?;
                    println!("{}", tr.t(i18n::keys::SETTINGS_SAVED));
                }
            }
            MenuChoice::Exit => {
                ctx.config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
