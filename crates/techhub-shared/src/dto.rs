//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// `?limit=` on list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}

/// `?tag=` / `?category=` on collection endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionParams {
    pub tag: Option<String>,
    pub category: Option<String>,
}

/// `?page=&pageSize=&q=` on paginated endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    /// Case-insensitive title search.
    pub q: Option<String>,
}

/// Successful contact submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    /// Provider message id.
    pub id: String,
}

/// PUT /api/preferences/theme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeRequest {
    pub theme: String,
}

/// What a consent request does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentAction {
    AcceptAll,
    RejectNonEssential,
    /// Store the listed categories, keeping the others.
    Save,
}

/// POST /api/preferences/consent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentRequest {
    pub action: ConsentAction,
    #[serde(default)]
    pub analytics: Option<bool>,
    #[serde(default)]
    pub marketing: Option<bool>,
}

/// Acknowledgement for fire-and-forget operations such as view counting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedResponse {
    pub accepted: bool,
}
