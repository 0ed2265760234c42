use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, AuthUser};
use crate::error::ApiError;

/// Bearer authentication middleware for every protected route.
///
/// Runs before body extraction, so an unauthenticated request is rejected
/// before validation and before any adapter or datastore call. On success
/// the resolved [`AuthUser`] is injected as a request extension.
pub async fn require_auth(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let token = extract_bearer(request.headers())?;
    let user: AuthUser = auth::resolve_token(&token).await?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Extract the token from the Authorization header.
fn extract_bearer(headers: &HeaderMap) -> Result<String, ApiError> {
    let header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let value = header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        Some(_) => Err(ApiError::unauthorized("Empty bearer token")),
        None => Err(ApiError::unauthorized(
            "Authorization header must use Bearer token format",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).expect("header"));
        headers
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let err = extract_bearer(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn non_bearer_scheme_is_unauthorized() {
        let err = extract_bearer(&headers_with("Basic dXNlcjpwYXNz")).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn empty_token_is_unauthorized() {
        let err = extract_bearer(&headers_with("Bearer   ")).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn bearer_token_is_extracted() {
        let token = extract_bearer(&headers_with("Bearer abc123")).expect("token");
        assert_eq!(token, "abc123");
    }
}
