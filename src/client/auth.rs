//! Authentication: credentials and the derived request context
//!
//! Two modes, one tagged union. A static API key builds headers without any
//! network traffic. A username/password pair is exchanged for a bearer token
//! in two steps (login, then JWT retrieval) and switches the effective base
//! URL to the mobile API host. The exchange is never retried: any failure
//! aborts immediately.

use std::fmt;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;

use crate::error::{ApiError, Result};

/// Production API base URL (key-based auth)
pub const DEFAULT_API_BASE_URL: &str = "https://api.itglue.com";

/// Mobile API base URL used for bearer-token auth
pub const MOBILE_API_BASE_URL: &str = "https://api-mobile-prod.itglue.com/api";

/// How the client authenticates to the API.
#[derive(Clone)]
pub enum Credential {
    /// Static API key, sent as the `x-api-key` header
    ApiKey(String),
    /// Username/password pair, exchanged for a short-lived bearer token
    UserPassword { email: String, password: String },
}

// Secrets must never leak through Debug or logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::ApiKey(_) => f.write_str("Credential::ApiKey(<redacted>)"),
            Credential::UserPassword { email, .. } => f
                .debug_struct("Credential::UserPassword")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Immutable per-client request context: auth headers plus the effective
/// base URL. Built once, reused read-only for every request, never persisted.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub headers: HeaderMap,
    pub base_url: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Derive an [`AuthContext`] from a credential.
///
/// For [`Credential::UserPassword`] this performs exactly two network calls
/// before returning; for [`Credential::ApiKey`] it performs none.
pub async fn authenticate(
    http: &reqwest::Client,
    base_url: &str,
    credential: &Credential,
) -> Result<AuthContext> {
    match credential {
        Credential::ApiKey(key) => {
            let mut headers = HeaderMap::new();
            let mut value = HeaderValue::from_str(key)
                .map_err(|_| ApiError::Auth("API key contains invalid characters".to_string()))?;
            value.set_sensitive(true);
            headers.insert("x-api-key", value);
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/vnd.api+json"));

            Ok(AuthContext {
                headers,
                base_url: base_url.to_string(),
            })
        }
        Credential::UserPassword { email, password } => {
            // Step 1: login for a refresh token
            let login_url = format!("{base_url}/login?generate_jwt=1&sso_disabled=1");
            let login: LoginResponse = http
                .post(&login_url)
                .json(&json!({ "user": { "email": email, "password": password } }))
                .send()
                .await
                .map_err(|e| ApiError::Auth(format!("login request failed: {e}")))?
                .error_for_status()
                .map_err(|e| ApiError::Auth(format!("login rejected: {e}")))?
                .json()
                .await
                .map_err(|e| ApiError::Auth(format!("malformed login response: {e}")))?;

            // Step 2: exchange the refresh token for an access token
            let token_url = format!("{base_url}/jwt/token?refresh_token={}", login.token);
            let access: TokenResponse = http
                .get(&token_url)
                .send()
                .await
                .map_err(|e| ApiError::Auth(format!("token request failed: {e}")))?
                .error_for_status()
                .map_err(|e| ApiError::Auth(format!("token exchange rejected: {e}")))?
                .json()
                .await
                .map_err(|e| ApiError::Auth(format!("malformed token response: {e}")))?;

            let mut headers = HeaderMap::new();
            let mut value = HeaderValue::from_str(&format!("Bearer {}", access.token))
                .map_err(|_| ApiError::Auth("token contains invalid characters".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/vnd.api+json"));

            Ok(AuthContext {
                headers,
                base_url: mobile_base_for(base_url),
            })
        }
    }
}

/// Bearer-token requests go to the mobile API host. Custom hosts (dev,
/// test doubles) serve both flows, so only the production default switches.
fn mobile_base_for(base_url: &str) -> String {
    if base_url == DEFAULT_API_BASE_URL {
        MOBILE_API_BASE_URL.to_string()
    } else {
        base_url.to_string()
    }
}


#[cfg(all(test, feature = "http-tests"))]
mod http_tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_login_flow_makes_exactly_two_calls() {
        let mut server = mockito::Server::new_async().await;

        let login = server
            .mock("POST", "/login")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("generate_jwt".into(), "1".into()),
                Matcher::UrlEncoded("sso_disabled".into(), "1".into()),
            ]))
            .match_body(Matcher::PartialJson(serde_json::json!({
                "user": { "email": "ops@example.com" }
            })))
            .with_status(200)
            .with_body(r#"{ "token": "refresh-abc" }"#)
            .expect(1)
            .create_async()
            .await;

        let token = server
            .mock("GET", "/jwt/token")
            .match_query(Matcher::UrlEncoded(
                "refresh_token".into(),
                "refresh-abc".into(),
            ))
            .with_status(200)
            .with_body(r#"{ "token": "access-xyz" }"#)
            .expect(1)
            .create_async()
            .await;

        let http = reqwest::Client::new();
        let ctx = authenticate(
            &http,
            &server.url(),
            &Credential::UserPassword {
                email: "ops@example.com".to_string(),
                password: "hunter2".to_string(),
            },
        )
        .await
        .unwrap();

        login.assert_async().await;
        token.assert_async().await;

        // Custom hosts are not rewritten to the mobile base.
        assert_eq!(ctx.base_url, server.url());
        let bearer = ctx.headers.get(AUTHORIZATION).unwrap();
        assert!(bearer.is_sensitive());
    }

    #[tokio::test]
    async fn test_rejected_login_aborts_without_token_exchange() {
        let mut server = mockito::Server::new_async().await;

        let login = server
            .mock("POST", "/login")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{ "errors": [ { "detail": "bad password" } ] }"#)
            .expect(1)
            .create_async()
            .await;

        let token = server
            .mock("GET", "/jwt/token")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let http = reqwest::Client::new();
        let err = authenticate(
            &http,
            &server.url(),
            &Credential::UserPassword {
                email: "ops@example.com".to_string(),
                password: "wrong".to_string(),
            },
        )
        .await
        .unwrap_err();

        login.assert_async().await;
        token.assert_async().await;
        assert!(err.to_string().contains("login rejected"));
    }
}
