//! Visitor preferences: colour theme and LGPD cookie consent.
//!
//! [`SiteContext`] is created per request (or per UI session) around a
//! [`PreferenceStore`] and passed explicitly to whoever needs it.

use serde::{Deserialize, Serialize};

use crate::ports::PreferenceStore;

pub const THEME_KEY: &str = "techub-theme";
pub const CONSENT_KEY: &str = "techub-consent";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Consent categories. `necessary` cannot be turned off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentPreferences {
    pub necessary: bool,
    pub analytics: bool,
    pub marketing: bool,
}

impl Default for ConsentPreferences {
    fn default() -> Self {
        Self {
            necessary: true,
            analytics: false,
            marketing: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentState {
    pub preferences: ConsentPreferences,
    pub has_consented: bool,
    pub show_banner: bool,
}

/// Partial update; absent categories keep their current value.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ConsentUpdate {
    pub analytics: Option<bool>,
    pub marketing: Option<bool>,
}

#[derive(Deserialize)]
struct StoredConsent {
    #[serde(default)]
    analytics: Option<bool>,
    #[serde(default)]
    marketing: Option<bool>,
}

pub struct SiteContext<S> {
    store: S,
    system_theme: Option<Theme>,
}

impl<S: PreferenceStore> SiteContext<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            system_theme: None,
        }
    }

    /// The platform's `prefers-color-scheme`, used when nothing is saved.
    pub fn with_system_theme(mut self, theme: Option<Theme>) -> Self {
        self.system_theme = theme;
        self
    }

    /// Saved theme, else the system preference, else dark.
    pub fn theme(&self) -> Theme {
        self.store
            .get(THEME_KEY)
            .and_then(|raw| Theme::parse(&raw))
            .or(self.system_theme)
            .unwrap_or_default()
    }

    pub fn is_dark(&self) -> bool {
        self.theme() == Theme::Dark
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.store.set(THEME_KEY, theme.as_str().to_string());
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.theme().toggled();
        self.set_theme(next);
        next
    }

    pub fn consent(&self) -> ConsentState {
        let Some(raw) = self.store.get(CONSENT_KEY) else {
            return Self::undecided();
        };

        match serde_json::from_str::<StoredConsent>(&raw) {
            Ok(stored) => ConsentState {
                preferences: ConsentPreferences {
                    necessary: true,
                    analytics: stored.analytics.unwrap_or(false),
                    marketing: stored.marketing.unwrap_or(false),
                },
                has_consented: true,
                show_banner: false,
            },
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring unreadable consent preferences");
                Self::undecided()
            }
        }
    }

    pub fn accept_all(&mut self) -> ConsentState {
        self.store_consent(ConsentPreferences {
            necessary: true,
            analytics: true,
            marketing: true,
        })
    }

    pub fn reject_non_essential(&mut self) -> ConsentState {
        self.store_consent(ConsentPreferences::default())
    }

    pub fn save_consent(&mut self, update: ConsentUpdate) -> ConsentState {
        let current = self.consent().preferences;
        self.store_consent(ConsentPreferences {
            necessary: true,
            analytics: update.analytics.unwrap_or(current.analytics),
            marketing: update.marketing.unwrap_or(current.marketing),
        })
    }

    pub fn reset_consent(&mut self) -> ConsentState {
        self.store.remove(CONSENT_KEY);
        Self::undecided()
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn store_consent(&mut self, preferences: ConsentPreferences) -> ConsentState {
        match serde_json::to_string(&preferences) {
            Ok(json) => self.store.set(CONSENT_KEY, json),
            Err(err) => tracing::warn!(error = %err, "Failed to persist consent preferences"),
        }
        tracing::debug!(
            analytics = preferences.analytics,
            marketing = preferences.marketing,
            "Consent preferences saved"
        );
        ConsentState {
            preferences,
            has_consented: true,
            show_banner: false,
        }
    }

    fn undecided() -> ConsentState {
        ConsentState {
            preferences: ConsentPreferences::default(),
            has_consented: false,
            show_banner: true,
        }
    }
}
