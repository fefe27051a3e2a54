//! Page Header
//!
//! Navigation, theme switcher and the login form shared by every page.
//! The controller keeps the authenticated session in memory only; the theme
//! is the one piece of header state that survives a reload.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, error, info};

use crate::api::{ApiError, LoginRequest, VitalsApi};
use crate::notify::Notifier;
use crate::session::AuthSession;
use crate::storage::KeyValueStore;
use crate::theme::{apply_theme, load_theme, save_theme, ClassList, Theme};

pub const BRAND: &str = "CityCare — Indore";
pub const USER_PLACEHOLDER: &str = "User (e.g., USR_PAT_001)";
pub const PIN_PLACEHOLDER: &str = "PIN";

/// Navigation entries as (token, label, href)
const NAV: [(&str, &str, &str); 7] = [
    ("home", "Home", "/"),
    ("monitor", "Vitals", "/monitor"),
    ("map", "Map", "/map"),
    ("patients", "Patients", "/patients"),
    ("schedule", "Scheduling", "/schedule"),
    ("sharing", "Data Sharing", "/sharing"),
    ("alerts", "Alerts", "/alerts"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub token: &'static str,
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeButton {
    pub theme: Theme,
    pub label: &'static str,
    pub selected: bool,
}

/// Everything needed to draw the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderModel {
    pub brand: &'static str,
    pub links: Vec<NavLink>,
    pub themes: Vec<ThemeButton>,
    pub user_placeholder: &'static str,
    pub pin_placeholder: &'static str,
}

impl HeaderModel {
    /// Build the header with the link matching `active` highlighted.
    /// Unknown tokens highlight nothing.
    pub fn new(active: &str, theme: Theme) -> Self {
        let links = NAV
            .iter()
            .map(|&(token, label, href)| NavLink {
                token,
                label,
                href,
                active: token == active,
            })
            .collect();
        let themes = Theme::ALL
            .iter()
            .map(|&t| ThemeButton {
                theme: t,
                label: t.label(),
                selected: t == theme,
            })
            .collect();

        Self {
            brand: BRAND,
            links,
            themes,
            user_placeholder: USER_PLACEHOLDER,
            pin_placeholder: PIN_PLACEHOLDER,
        }
    }

    pub fn active_link(&self) -> Option<&NavLink> {
        self.links.iter().find(|l| l.active)
    }
}

/// Login failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoginError {
    #[error("Enter user & PIN")]
    MissingCredentials,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Header state: session, theme and the login action
pub struct HeaderController {
    api: Rc<dyn VitalsApi>,
    store: Rc<dyn KeyValueStore>,
    body: Rc<dyn ClassList>,
    notifier: Rc<dyn Notifier>,
    session: RefCell<Option<AuthSession>>,
    theme: Cell<Theme>,
}

impl HeaderController {
    pub fn new(
        api: Rc<dyn VitalsApi>,
        store: Rc<dyn KeyValueStore>,
        body: Rc<dyn ClassList>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            store,
            body,
            notifier,
            session: RefCell::new(None),
            theme: Cell::new(Theme::Default),
        }
    }

    /// Restore the saved theme and describe the header for `active`
    pub fn mount(&self, active: &str) -> HeaderModel {
        let theme = self.restore_theme();
        HeaderModel::new(active, theme)
    }

    /// Apply whatever theme storage holds, or the baseline
    pub fn restore_theme(&self) -> Theme {
        let theme = load_theme(&*self.store);
        apply_theme(&*self.body, theme);
        self.theme.set(theme);
        theme
    }

    /// Switch theme by name. Unknown names select the baseline.
    pub fn set_theme(&self, name: &str) -> Theme {
        let theme = Theme::from_name(name);
        apply_theme(&*self.body, theme);
        save_theme(&*self.store, theme);
        self.theme.set(theme);
        debug!("Theme set to {}", theme);
        theme
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    /// Current session, if a login succeeded
    pub fn session(&self) -> Option<AuthSession> {
        self.session.borrow().clone()
    }

    /// Alert audience of the logged-in user
    pub fn audience(&self) -> Option<String> {
        self.session.borrow().as_ref().map(AuthSession::alert_audience)
    }

    /// Authenticate against the backend.
    ///
    /// A failure never touches the session held from an earlier login.
    pub async fn login(&self, user: &str, pin: &str) -> Result<AuthSession, LoginError> {
        let user_id = user.trim();
        let pin = pin.trim();
        if user_id.is_empty() || pin.is_empty() {
            let err = LoginError::MissingCredentials;
            self.notifier.error(&err.to_string());
            return Err(err);
        }

        let request = LoginRequest {
            user_id: user_id.to_string(),
            pin: pin.to_string(),
        };
        match self.api.login(&request).await {
            Ok(session) => {
                let identity = session.display_identity();
                info!("Logged in as {}", identity);
                *self.session.borrow_mut() = Some(session.clone());
                self.notifier.info(&format!("Logged in as {}", identity));
                Ok(session)
            }
            Err(e) => {
                error!("Login for {} failed: {}", user_id, e);
                self.notifier.error(&format!(
                    "Login failed or backend unreachable. Check server at {}.",
                    self.api.base_url()
                ));
                Err(e.into())
            }
        }
    }
}
