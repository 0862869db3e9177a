//! Light/dark colour theme.
//!
//! Stored as a bare string under [`keys::THEME`]. It is the only value kept in
//! sync across tabs: a storage event for another key is ignored.

use hb_storage::{JsonStore, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than `dark` reads as light.
    pub fn parse(value: &str) -> Self {
        if value == "dark" { Self::Dark } else { Self::Light }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Label of the toggle button.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☀",
            Self::Dark => "🌙",
        }
    }

    /// Class on `<body>` while this theme is active.
    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Self::Light => None,
            Self::Dark => Some("dark-mode"),
        }
    }
}

pub struct ThemeSettings {
    store: JsonStore,
}

impl ThemeSettings {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub fn current(&self) -> Theme {
        self.store
            .get_raw(keys::THEME)
            .map(|v| Theme::parse(&v))
            .unwrap_or_default()
    }

    pub fn set(&self, theme: Theme) {
        self.store.set_raw(keys::THEME, theme.as_str());
    }

    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next);
        next
    }
}

/// Theme to apply for a storage event raised by another tab, if any.
pub fn theme_from_storage_event(key: Option<&str>, new_value: Option<&str>) -> Option<Theme> {
    if key != Some(keys::THEME) {
        return None;
    }
    Some(new_value.map(Theme::parse).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_light_and_toggles() {
        let settings = ThemeSettings::new(JsonStore::in_memory());
        assert_eq!(settings.current(), Theme::Light);
        assert_eq!(settings.toggle(), Theme::Dark);
        assert_eq!(settings.current(), Theme::Dark);
        assert_eq!(settings.current().body_class(), Some("dark-mode"));
    }

    #[test]
    fn only_theme_key_events_apply() {
        assert_eq!(
            theme_from_storage_event(Some("theme"), Some("dark")),
            Some(Theme::Dark)
        );
        assert_eq!(theme_from_storage_event(Some("healthy_cart"), Some("[]")), None);
        assert_eq!(theme_from_storage_event(None, None), None);
    }
}
