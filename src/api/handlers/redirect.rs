//! Catch-all handler resolving request paths through the chain.

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::domain::chain::Resolution;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves any request path to a redirect or the terminal response.
///
/// # Endpoint
///
/// Installed as the router fallback, so it receives every method and path.
///
/// # Request Flow
///
/// 1. Strip query and fragment, percent-decode, map `/` to the configured
///    default path
/// 2. Walk the chain; the first table containing the path wins
/// 3. Hit: `302 Found` with `Location` set to the stored URL
/// 4. Miss: the terminal responder's status and body, verbatim
///
/// # Errors
///
/// Returns 500 if the stored URL cannot be encoded as a header value.
pub async fn redirect_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, AppError> {
    let raw_path = uri.path();

    match state.chain_service.resolve(raw_path) {
        Resolution::Redirect(url) => {
            let location = HeaderValue::from_str(url).map_err(|_| {
                error!(path = raw_path, url, "Stored redirect is not a valid header value");
                AppError::InvalidRedirect {
                    path: raw_path.to_string(),
                    url: url.to_string(),
                }
            })?;

            debug!(path = raw_path, url, "Redirecting");
            Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
        Resolution::Terminal(responder) => {
            Ok((responder.status, responder.body.clone()).into_response())
        }
    }
}
