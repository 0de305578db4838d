use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use yuuka::derive_struct;

// Include translation TOML at compile time
const EN_US_TOML: &str = include_str!("../res/i18n/en_us.toml");
const RU_RU_TOML: &str = include_str!("../res/i18n/ru_ru.toml");

derive_struct! {
    #[derive(PartialEq, Serialize, Deserialize)]
    pub Lang {
        title: String = "title".to_string(),
        // port column
        port_list_label: String = "port_list_label".to_string(),
        port_input_label: String = "port_input_label".to_string(),
        port_input_placeholder: String = "port_input_placeholder".to_string(),
        no_ports: String = "no_ports".to_string(),
        // baud column
        baud_list_label: String = "baud_list_label".to_string(),
        baud_input_label: String = "baud_input_label".to_string(),
        baud_input_placeholder: String = "baud_input_placeholder".to_string(),
        confirm_button: String = "confirm_button".to_string(),
        // inline validation errors
        invalid_port: String = "invalid_port".to_string(),
        invalid_baud: String = "invalid_baud".to_string(),
        help_short: String = "help_short".to_string(),
        // launcher output
        selected_summary: String = "selected_summary".to_string(),
        nothing_selected: String = "nothing_selected".to_string(),
    }
}

static LANG_SELECTED: OnceCell<Lang> = OnceCell::new();
static LOCALE: OnceCell<String> = OnceCell::new();

fn parse_toml_to_lang(content: &str) -> Lang {
    match toml::from_str::<Lang>(content) {
        Ok(l) => l,
        Err(e) => {
            log::warn!(
                "i18n: failed to parse toml: {}\ncontent preview: {}",
                e,
                &content.chars().take(200).collect::<String>()
            );
            // Fallback: keys as values
            Lang::default()
        }
    }
}

/// Return a reference to the currently selected `Lang`.
/// Callers can access fields directly, e.g. `i18n::lang().title`.
pub fn lang() -> &'static Lang {
    LANG_SELECTED.get_or_init(|| parse_toml_to_lang(EN_US_TOML))
}

/// Pick the locale key matching the user's preference list, if any.
fn match_locale(prefs: &[String]) -> Option<&'static str> {
    for p in prefs {
        if p.starts_with("ru") {
            return Some("ru_ru");
        }
        if p.starts_with("en") {
            return Some("en_us");
        }
    }
    None
}

pub fn init_i18n() {
    let mut prefs: Vec<String> = Vec::new();
    if let Ok(v) = std::env::var("LANGUAGE") {
        prefs.extend(v.split(':').map(|s| s.to_lowercase()));
    }
    if let Ok(v) = std::env::var("LC_ALL") {
        prefs.push(v.to_lowercase());
    }
    if let Ok(v) = std::env::var("LANG") {
        prefs.push(v.to_lowercase());
    }
    // Windows common env
    if let Ok(v) = std::env::var("USERLANGUAGE") {
        prefs.push(v.to_lowercase());
    }

    let locale = match_locale(&prefs).unwrap_or("en_us");
    let content = match locale {
        "ru_ru" => RU_RU_TOML,
        _ => EN_US_TOML,
    };

    LOCALE.set(locale.to_string()).ok();
    if LANG_SELECTED.set(parse_toml_to_lang(content)).is_err() {
        log::debug!("i18n: language already initialized, keeping previous selection");
    }

    let user = whoami::username();
    log::info!(
        "i18n: user={} locale={}",
        user,
        LOCALE.get().map(|s| s.as_str()).unwrap_or("-")
    );
}
