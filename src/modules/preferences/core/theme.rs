use crate::shared::infrastructure::local_store::LocalStore;
use serde::{Deserialize, Serialize};

pub const THEME_KEY: &str = "studyTogetherTheme";

/// Stored as the bare word `light` or `dark`, not as JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn load(store: &dyn LocalStore) -> Self {
        match store.get(THEME_KEY) {
            None => Theme::default(),
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unknown stored theme, using light");
                Theme::default()
            }),
        }
    }

    pub fn save(self, store: &dyn LocalStore) -> anyhow::Result<()> {
        store.set(THEME_KEY, self.as_str().to_string())
    }
}
