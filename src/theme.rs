//! Visual themes
//!
//! A theme is one class on the document body. Exactly one theme class is
//! present after [`apply_theme`]; the choice is persisted by name under
//! [`THEME_KEY`](crate::storage::THEME_KEY).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::storage::{KeyValueStore, THEME_KEY};

/// Available themes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Ocean,
    Sunrise,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Default, Theme::Ocean, Theme::Sunrise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Ocean => "ocean",
            Theme::Sunrise => "sunrise",
        }
    }

    /// Button label in the header
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Default => "Aurora",
            Theme::Ocean => "Ocean",
            Theme::Sunrise => "Sunrise",
        }
    }

    /// Body class for this theme
    pub fn css_class(&self) -> &'static str {
        match self {
            Theme::Default => "theme-default",
            Theme::Ocean => "theme-ocean",
            Theme::Sunrise => "theme-sunrise",
        }
    }

    /// Parse a theme name, falling back to the baseline for anything unknown
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            // "aurora" is what the baseline theme used to be called
            "default" | "aurora" => Ok(Theme::Default),
            "ocean" => Ok(Theme::Ocean),
            "sunrise" => Ok(Theme::Sunrise),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

/// A set of CSS classes, e.g. `document.body.classList`
pub trait ClassList {
    fn add_class(&self, name: &str);
    fn remove_class(&self, name: &str);
}

/// Swap the body's theme class for `theme`'s
pub fn apply_theme(classes: &dyn ClassList, theme: Theme) {
    for t in Theme::ALL {
        classes.remove_class(t.css_class());
    }
    classes.add_class(theme.css_class());
}

/// Persist the theme name. Storage failures are ignored.
pub fn save_theme(store: &dyn KeyValueStore, theme: Theme) {
    if let Err(e) = store.set_item(THEME_KEY, theme.as_str()) {
        debug!("Theme not persisted: {}", e);
    }
}

/// Load the persisted theme, or the baseline when nothing usable is stored
pub fn load_theme(store: &dyn KeyValueStore) -> Theme {
    match store.get_item(THEME_KEY) {
        Ok(Some(name)) => Theme::from_name(&name),
        Ok(None) => Theme::Default,
        Err(e) => {
            debug!("Theme not restored: {}", e);
            Theme::Default
        }
    }
}
