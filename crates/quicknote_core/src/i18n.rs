//! Locale resolution and the backend string catalog.
//!
//! # Responsibility
//! - Map BCP-47-ish locale codes onto the supported locales.
//! - Detect the system locale from environment variables.
//! - Serve translated strings for host menus, errors and note file names.
//!
//! # Invariants
//! - Lookups never fail: missing locales fall back to English, missing keys
//!   fall back to the key itself.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Supported UI locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    PtBr,
    #[default]
    En,
}

impl Locale {
    /// Resolves a locale code by language prefix.
    ///
    /// Any `pt*` code maps to `PtBr`; everything else maps to `En`.
    pub fn parse(code: &str) -> Self {
        if code.trim().to_ascii_lowercase().starts_with("pt") {
            Self::PtBr
        } else {
            Self::En
        }
    }

    /// Stable code reported to the host.
    pub fn code(self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::En => "en",
        }
    }
}

/// Detects the locale from `LANG`, `LC_ALL` and `LC_MESSAGES`.
pub fn system_locale() -> Locale {
    locale_from_env(|name| std::env::var(name).ok())
}

fn locale_from_env(lookup: impl Fn(&str) -> Option<String>) -> Locale {
    let mut candidates = vec!["LANG", "LC_ALL", "LC_MESSAGES"];
    if cfg!(windows) {
        candidates.extend(["LANGUAGE", "LOCALE"]);
    }

    candidates
        .into_iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
        .map(|value| Locale::parse(&value))
        .unwrap_or_default()
}

pub const KEY_MENU_CONFIG_DIR: &str = "menu.config_dir";
pub const KEY_MENU_AUTOSTART: &str = "menu.autostart";
pub const KEY_MENU_MUTE_SOUND: &str = "menu.mute_sound";
pub const KEY_MENU_QUIT: &str = "menu.quit";
pub const KEY_ERROR_MONITOR_SIZE: &str = "error.monitor_size";
pub const KEY_ERROR_ICON_LOAD: &str = "error.icon_load";
pub const KEY_ERROR_SHORTCUT: &str = "error.shortcut";
pub const KEY_FILE_NOTE_PREFIX: &str = "file.note_prefix";

type Catalog = HashMap<&'static str, HashMap<Locale, &'static str>>;

static CATALOG: Lazy<Catalog> = Lazy::new(build_catalog);

fn autostart_labels() -> (&'static str, &'static str) {
    if cfg!(windows) {
        ("Iniciar com Windows", "Start with Windows")
    } else if cfg!(target_os = "macos") {
        ("Iniciar com macOS", "Start with macOS")
    } else {
        ("Iniciar com o sistema", "Start with system")
    }
}

fn build_catalog() -> Catalog {
    let (autostart_pt, autostart_en) = autostart_labels();
    let entries: [(&'static str, &'static str, &'static str); 8] = [
        (
            KEY_MENU_CONFIG_DIR,
            "Configurar diretório...",
            "Configure directory...",
        ),
        (KEY_MENU_AUTOSTART, autostart_pt, autostart_en),
        (KEY_MENU_MUTE_SOUND, "Mutar som", "Mute sound"),
        (KEY_MENU_QUIT, "Sair do QuickNote", "Quit QuickNote"),
        (
            KEY_ERROR_MONITOR_SIZE,
            "Não foi possível obter o tamanho do monitor",
            "Could not get monitor size",
        ),
        (
            KEY_ERROR_ICON_LOAD,
            "Não foi possível carregar o ícone padrão",
            "Could not load default icon",
        ),
        (
            KEY_ERROR_SHORTCUT,
            "Erro ao registrar atalho",
            "Error registering shortcut",
        ),
        (KEY_FILE_NOTE_PREFIX, "nota", "note"),
    ];

    entries
        .into_iter()
        .map(|(key, pt, en)| (key, HashMap::from([(Locale::PtBr, pt), (Locale::En, en)])))
        .collect()
}

/// Returns the translated string for `key`.
pub fn translate<'a>(locale: Locale, key: &'a str) -> &'a str {
    let Some(by_locale) = CATALOG.get(key) else {
        return key;
    };
    by_locale
        .get(&locale)
        .or_else(|| by_locale.get(&Locale::En))
        .copied()
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::{locale_from_env, translate, Locale, KEY_FILE_NOTE_PREFIX, KEY_MENU_MUTE_SOUND};

    #[test]
    fn parse_maps_portuguese_variants() {
        assert_eq!(Locale::parse("pt-BR"), Locale::PtBr);
        assert_eq!(Locale::parse("pt_PT.UTF-8"), Locale::PtBr);
        assert_eq!(Locale::parse("en-US"), Locale::En);
        assert_eq!(Locale::parse("de"), Locale::En);
        assert_eq!(Locale::parse(""), Locale::En);
    }

    #[test]
    fn env_detection_uses_first_present_variable() {
        let locale = locale_from_env(|name| match name {
            "LC_ALL" => Some("pt_BR.UTF-8".to_string()),
            _ => None,
        });
        assert_eq!(locale, Locale::PtBr);

        let fallback = locale_from_env(|_| None);
        assert_eq!(fallback, Locale::En);
    }

    #[test]
    fn translate_falls_back_to_key() {
        assert_eq!(translate(Locale::PtBr, KEY_FILE_NOTE_PREFIX), "nota");
        assert_eq!(translate(Locale::En, KEY_MENU_MUTE_SOUND), "Mute sound");
        assert_eq!(translate(Locale::PtBr, "menu.unknown"), "menu.unknown");
    }
}
