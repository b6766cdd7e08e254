//! Theme and cookie-consent preferences, persisted in cookies.

use std::collections::{BTreeSet, HashMap};

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, web};
use serde::Serialize;

use techhub_core::ports::PreferenceStore;
use techhub_core::preferences::{
    CONSENT_KEY, ConsentState, ConsentUpdate, SiteContext, THEME_KEY, Theme,
};
use techhub_shared::ApiResponse;
use techhub_shared::dto::{ConsentAction, ConsentRequest, ThemeRequest};

use crate::middleware::error::{AppError, AppResult};

/// Client hint carrying the browser's `prefers-color-scheme`.
const COLOR_SCHEME_HINT: &str = "Sec-CH-Prefers-Color-Scheme";

const COOKIE_MAX_AGE_DAYS: i64 = 365;

/// Request cookies as a [`PreferenceStore`]; remembers which keys changed.
#[derive(Default)]
struct CookieJar {
    values: HashMap<String, String>,
    dirty: BTreeSet<String>,
}

impl CookieJar {
    fn from_request(req: &HttpRequest) -> Self {
        let mut jar = Self::default();
        for key in [THEME_KEY, CONSENT_KEY] {
            let Some(cookie) = req.cookie(key) else {
                continue;
            };
            match urlencoding::decode(cookie.value()) {
                Ok(value) => {
                    jar.values.insert(key.to_string(), value.into_owned());
                }
                Err(e) => tracing::warn!(cookie = key, error = %e, "Ignoring undecodable cookie"),
            }
        }
        jar
    }

    /// Emit `Set-Cookie` headers for every changed key.
    fn write_to(&self, response: &mut HttpResponseBuilder) {
        for key in &self.dirty {
            let cookie = match self.values.get(key) {
                Some(value) => Cookie::build(key.clone(), urlencoding::encode(value).into_owned())
                    .path("/")
                    .max_age(Duration::days(COOKIE_MAX_AGE_DAYS))
                    .same_site(SameSite::Lax)
                    .finish(),
                None => {
                    let mut cookie = Cookie::build(key.clone(), "").path("/").finish();
                    cookie.make_removal();
                    cookie
                }
            };
            response.cookie(cookie);
        }
    }
}

impl PreferenceStore for CookieJar {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
        self.dirty.insert(key.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
        self.dirty.insert(key.to_string());
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PreferencesView {
    theme: Theme,
    is_dark: bool,
    consent: ConsentState,
}

fn context(req: &HttpRequest) -> SiteContext<CookieJar> {
    let system_theme = req
        .headers()
        .get(COLOR_SCHEME_HINT)
        .and_then(|v| v.to_str().ok())
        .and_then(Theme::parse);
    SiteContext::new(CookieJar::from_request(req)).with_system_theme(system_theme)
}

fn respond(ctx: SiteContext<CookieJar>, message: Option<&str>) -> HttpResponse {
    let view = PreferencesView {
        theme: ctx.theme(),
        is_dark: ctx.is_dark(),
        consent: ctx.consent(),
    };
    let body = match message {
        Some(message) => ApiResponse::ok_with_message(view, message),
        None => ApiResponse::ok(view),
    };

    let mut response = HttpResponse::Ok();
    ctx.into_store().write_to(&mut response);
    response.json(body)
}

/// GET /api/preferences
pub async fn get(req: HttpRequest) -> HttpResponse {
    respond(context(&req), None)
}

/// PUT /api/preferences/theme
pub async fn set_theme(req: HttpRequest, body: web::Json<ThemeRequest>) -> AppResult<HttpResponse> {
    let theme = Theme::parse(&body.theme).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unknown theme '{}', expected 'dark' or 'light'",
            body.theme
        ))
    })?;

    let mut ctx = context(&req);
    ctx.set_theme(theme);
    Ok(respond(ctx, None))
}

/// POST /api/preferences/theme/toggle
pub async fn toggle_theme(req: HttpRequest) -> HttpResponse {
    let mut ctx = context(&req);
    ctx.toggle_theme();
    respond(ctx, None)
}

/// POST /api/preferences/consent
pub async fn save_consent(req: HttpRequest, body: web::Json<ConsentRequest>) -> HttpResponse {
    let mut ctx = context(&req);
    match body.action {
        ConsentAction::AcceptAll => ctx.accept_all(),
        ConsentAction::RejectNonEssential => ctx.reject_non_essential(),
        ConsentAction::Save => ctx.save_consent(ConsentUpdate {
            analytics: body.analytics,
            marketing: body.marketing,
        }),
    };
    respond(ctx, Some("Consent preferences saved"))
}

/// DELETE /api/preferences/consent
pub async fn reset_consent(req: HttpRequest) -> HttpResponse {
    let mut ctx = context(&req);
    ctx.reset_consent();
    respond(ctx, None)
}
