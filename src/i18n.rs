use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SHOW_TABLE: &str = "main_menu.show_table";
    pub const MAIN_MENU_ADD_PROPERTY: &str = "main_menu.add_property";
    pub const MAIN_MENU_RESET_SAMPLE: &str = "main_menu.reset_sample";
    pub const MAIN_MENU_ASSUMPTIONS: &str = "main_menu.assumptions";
    pub const MAIN_MENU_EXPORT: &str = "main_menu.export";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const TABLE_HEADING: &str = "table.heading";
    pub const TABLE_HEADER: &str = "table.header";
    pub const TABLE_EMPTY: &str = "table.empty";
    pub const TABLE_EXCLUDED: &str = "table.excluded";

    pub const ADD_HEADING: &str = "add.heading";
    pub const PROMPT_SUBURB: &str = "prompt.suburb";
    pub const PROMPT_PRICE: &str = "prompt.price";
    pub const PROMPT_WEEKLY_RENT: &str = "prompt.weekly_rent";
    pub const ADD_DONE: &str = "add.done";
    pub const RESET_DONE: &str = "reset.done";

    pub const PROMPT_EXPORT_PATH: &str = "prompt.export_path";
    pub const EXPORT_DONE: &str = "export.done";

    pub const ASSUMPTIONS_HEADING: &str = "assumptions.heading";
    pub const ASSUMPTIONS_KEEP_HINT: &str = "assumptions.keep_hint";
    pub const PROMPT_VACANCY: &str = "prompt.vacancy";
    pub const PROMPT_PROPERTY_TAX: &str = "prompt.property_tax";
    pub const PROMPT_MAINTENANCE: &str = "prompt.maintenance";
    pub const PROMPT_MANAGEMENT_FEE: &str = "prompt.management_fee";
    pub const PROMPT_INSURANCE: &str = "prompt.insurance";
    pub const PROMPT_INCLUDE_STRATA: &str = "prompt.include_strata";
    pub const PROMPT_STRATA: &str = "prompt.strata";
    pub const ASSUMPTIONS_SAVED: &str = "assumptions.saved";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir.and_then(|dir| load_overrides(dir, lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    /// 번역을 가져온다. 언어팩 값이 우선이고, 영어 번역이 없으면 한국어 문자열을 쓴다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }

    /// `{}` 자리에 값을 채워 넣는다.
    pub fn tf(&self, key: &str, value: impl std::fmt::Display) -> String {
        self.t(key).replacen("{}", &value.to_string(), 1)
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" | "ko-kr" => Some("ko".into()),
        "en" | "en-us" | "en-au" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|lang| normalize_locale_string(&lang))
}

/// 언어팩 디렉터리에서 `<code>.toml`을 찾고, 없으면 `<base>.toml`(ko-kr -> ko)을 쓴다.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let base = lang.split(['-', '_']).next().unwrap_or(lang);
    [lang, base]
        .into_iter()
        .map(|code| Path::new(dir).join(format!("{code}.toml")))
        .find_map(|path| fs::read_to_string(path).ok())
        .and_then(|src| flatten_pack(&src))
}

/// `[section] key = "..."` 표를 `section.key` 평면 맵으로 편다. 문자열이 아닌 값은 버린다.
fn flatten_pack(src: &str) -> Option<HashMap<String, String>> {
    let root: toml::Table = toml::from_str(src).ok()?;
    let mut out = HashMap::new();
    let mut pending = vec![(String::new(), root)];
    while let Some((prefix, table)) = pending.pop() {
        for (k, v) in table {
            let key = if prefix.is_empty() {
                k
            } else {
                format!("{prefix}.{k}")
            };
            match v {
                toml::Value::String(s) => {
                    out.insert(key, s);
                }
                toml::Value::Table(t) => pending.push((key, t)),
                _ => {}
            }
        }
    }
    (!out.is_empty()).then_some(out)
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 임대 수익률 계산기 ===",
        MAIN_MENU_SHOW_TABLE => "1) 수익률 표 보기",
        MAIN_MENU_ADD_PROPERTY => "2) 매물 추가",
        MAIN_MENU_RESET_SAMPLE => "3) 샘플 데이터로 초기화",
        MAIN_MENU_ASSUMPTIONS => "4) 비용 가정",
        MAIN_MENU_EXPORT => "5) 결과 CSV 내보내기",
        MAIN_MENU_SETTINGS => "6) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        TABLE_HEADING => "\n-- 임대 수익률 요약 --",
        TABLE_HEADER => "지역",
        TABLE_EMPTY => "계산할 매물이 없습니다.",
        TABLE_EXCLUDED => "{}개 행이 제외되었습니다.",
        ADD_HEADING => "\n-- 매물 추가 --",
        PROMPT_SUBURB => "지역 이름: ",
        PROMPT_PRICE => "매입가 [$]: ",
        PROMPT_WEEKLY_RENT => "주간 임대료 [$/week]: ",
        ADD_DONE => "매물을 추가했습니다.",
        RESET_DONE => "샘플 데이터로 초기화했습니다.",
        PROMPT_EXPORT_PATH => "저장할 파일",
        EXPORT_DONE => "{} 에 저장했습니다.",
        ASSUMPTIONS_HEADING => "\n-- 비용 가정 --",
        ASSUMPTIONS_KEEP_HINT => "엔터를 누르면 현재 값을 유지합니다.",
        PROMPT_VACANCY => "공실률 (%, 연 임대료 기준)",
        PROMPT_PROPERTY_TAX => "재산세 (%, 매입가 기준)",
        PROMPT_MAINTENANCE => "유지보수비 (%, 매입가 기준)",
        PROMPT_MANAGEMENT_FEE => "관리수수료 (%, 연 임대료 기준)",
        PROMPT_INSURANCE => "연간 보험료 [$]",
        PROMPT_INCLUDE_STRATA => "Strata 비용 포함 (y/n)",
        PROMPT_STRATA => "연간 Strata 비용 [$]",
        ASSUMPTIONS_SAVED => "비용 가정을 저장했습니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_OPTIONS => "1) 한국어  2) English  3) 자동",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        _ => "(알 수 없는 문자열)",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Rental Yield Calculator ===",
        MAIN_MENU_SHOW_TABLE => "1) Show yield table",
        MAIN_MENU_ADD_PROPERTY => "2) Add property",
        MAIN_MENU_RESET_SAMPLE => "3) Reset to sample data",
        MAIN_MENU_ASSUMPTIONS => "4) Cost assumptions",
        MAIN_MENU_EXPORT => "5) Export results CSV",
        MAIN_MENU_SETTINGS => "6) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        TABLE_HEADING => "\n-- Rental Yield Summary --",
        TABLE_HEADER => "Suburb",
        TABLE_EMPTY => "No properties to compute.",
        TABLE_EXCLUDED => "{} rows excluded.",
        ADD_HEADING => "\n-- Add Property --",
        PROMPT_SUBURB => "Suburb: ",
        PROMPT_PRICE => "Price [$]: ",
        PROMPT_WEEKLY_RENT => "Weekly rent [$/week]: ",
        ADD_DONE => "Property added.",
        RESET_DONE => "Reset to sample data.",
        PROMPT_EXPORT_PATH => "Save to",
        EXPORT_DONE => "Saved to {}.",
        ASSUMPTIONS_HEADING => "\n-- Cost Assumptions --",
        ASSUMPTIONS_KEEP_HINT => "Press Enter to keep the current value.",
        PROMPT_VACANCY => "Vacancy rate (%, of annual rent)",
        PROMPT_PROPERTY_TAX => "Property tax (%, of price)",
        PROMPT_MAINTENANCE => "Maintenance (%, of price)",
        PROMPT_MANAGEMENT_FEE => "Management fee (%, of annual rent)",
        PROMPT_INSURANCE => "Annual insurance [$]",
        PROMPT_INCLUDE_STRATA => "Include strata fees (y/n)",
        PROMPT_STRATA => "Annual strata [$]",
        ASSUMPTIONS_SAVED => "Cost assumptions saved.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) 한국어  2) English  3) Auto",
        SETTINGS_PROMPT_CHANGE => "Number to change (Enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; nothing changed.",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    })
}
