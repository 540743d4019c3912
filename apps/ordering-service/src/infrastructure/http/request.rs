//! HTTP request helpers.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use serde::Deserialize;

/// Header carrying a client-chosen retry key on `POST /orders`.
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

/// Query string for `GET /admin/orders`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOrdersQuery {
    /// `all`, `active` or one status value.
    #[serde(default)]
    pub status: Option<String>,
}

/// Extract the token from `Authorization: Bearer <token>`.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Non-blank `Idempotency-Key` header value.
#[must_use]
pub fn idempotency_key(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(IDEMPOTENCY_KEY_HEADER)?
        .to_str()
        .ok()
        .map(str::trim)
        .filter(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(name: &'static str, value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        let h = headers("authorization", "Bearer abc.def.ghi");
        assert_eq!(bearer_token(&h), Some("abc.def.ghi"));
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let h = headers("authorization", "bearer tok");
        assert_eq!(bearer_token(&h), Some("tok"));
    }

    #[test]
    fn other_schemes_are_ignored() {
        assert_eq!(bearer_token(&headers("authorization", "Basic dXNlcg==")), None);
        assert_eq!(bearer_token(&headers("authorization", "Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn blank_idempotency_key_is_none() {
        assert_eq!(idempotency_key(&headers("idempotency-key", "  ")), None);
        assert_eq!(
            idempotency_key(&headers("idempotency-key", "k-1")),
            Some("k-1")
        );
    }
}
