//! Contact form endpoint.

use actix_web::{HttpRequest, HttpResponse, web};

use techhub_core::contact::ContactSubmission;
use techhub_shared::dto::ContactResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/contact
///
/// Order of checks: rate limit, honeypot and fields, then mail configuration.
pub async fn submit(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<ContactSubmission>,
) -> AppResult<HttpResponse> {
    if let Some(limiter) = &state.contact_limiter {
        let client = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        match limiter.check(&client).await {
            Ok(result) if !result.allowed => {
                tracing::warn!(client = %client, "Contact rate limit exceeded");
                return Err(AppError::TooManyRequests(result.retry_after));
            }
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "Rate limiter error, failing open"),
        }
    }

    let submission = body.into_inner();
    if let Err(err) = submission.validate() {
        tracing::info!(reason = %err, "Contact submission rejected");
        return Err(err.into());
    }

    let service = state
        .contact
        .as_ref()
        .ok_or(AppError::Misconfigured("RESEND_API_KEY"))?;

    let id = service.submit(&submission).await?;

    Ok(HttpResponse::Ok().json(ContactResponse { success: true, id }))
}
