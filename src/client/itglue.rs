//! IT Glue API client implementation

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde_json::Value;

use super::ItGlueApi;
use super::auth::{self, AuthContext, Credential, DEFAULT_API_BASE_URL};
use super::models::Resource;
use super::pagination::{Document, PageQuery};
use super::paginator::{self, Page, PageFetcher, RetryPolicy};
use crate::error::{ApiError, Error, Result};

/// Client-side transport timeout. Long queries are cut off server-side well
/// before this; it only guards against dead connections.
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// IT Glue API client.
///
/// Holds one immutable [`AuthContext`] derived at construction and reused
/// read-only for every request of the client's lifetime.
pub struct ItGlueClient {
    http: HttpClient,
    auth: AuthContext,
    retry: RetryPolicy,
}

impl ItGlueClient {
    /// Build a client: derive the auth context from the credential, then
    /// keep it for the lifetime of the client.
    pub async fn connect(credential: &Credential, host_override: Option<&str>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = host_override.unwrap_or(DEFAULT_API_BASE_URL);
        let auth = auth::authenticate(&http, base_url, credential).await?;

        Ok(Self {
            http,
            auth,
            retry: RetryPolicy::default(),
        })
    }

    /// Override the default retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Effective base URL (differs between key-based and bearer-token auth).
    pub fn base_url(&self) -> &str {
        &self.auth.base_url
    }

    /// Issue exactly one request and classify the outcome.
    ///
    /// Never retries: for paginated reads the recovery action (halving the
    /// page size) requires rewriting the request, which only the paginator
    /// can do.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<String> {
        let url = format!("{}{}", self.auth.base_url, path);
        debug!("{method} {url}");

        let mut request = self
            .http
            .request(method, &url)
            .headers(self.auth.headers.clone())
            .query(query);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if status.is_success() {
            return Ok(text);
        }
        Err(classify_status(status, &text).into())
    }

    /// Bounded retry wrapper for write requests. Unlike reads, timeout
    /// recovery needs no page-size rewrite, so the loop lives here.
    async fn execute_with_retry(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<String> {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            match self.execute(method.clone(), path, &[], body).await {
                Err(Error::Api(err))
                    if err.is_retryable() && attempts < self.retry.max_attempts =>
                {
                    warn!(
                        "{method} {path} failed ({err}); retrying in {:?}",
                        self.retry.backoff
                    );
                    tokio::time::sleep(self.retry.backoff).await;
                }
                Err(Error::Api(err)) if err.is_retryable() => {
                    return Err(ApiError::RetryLimitReached.into());
                }
                other => return other,
            }
        }
    }

    /// Fetch every page of a collection endpoint.
    async fn fetch_collection(&self, path: &str, query: PageQuery) -> Result<Vec<Resource>> {
        let pager = EndpointPager { client: self, path };
        paginator::fetch_all(&pager, query, &self.retry).await
    }

    fn parse_record(body: &str) -> Result<Resource> {
        let doc: Document<Resource> = serde_json::from_str(body)
            .map_err(|e| ApiError::InvalidResponse(format!("failed to parse record: {e}")))?;
        Ok(doc.data)
    }
}

/// Adapter binding one collection endpoint to the paginated fetch engine.
struct EndpointPager<'a> {
    client: &'a ItGlueClient,
    path: &'a str,
}

#[async_trait]
impl PageFetcher<Resource> for EndpointPager<'_> {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page<Resource>> {
        let params = query.to_query_params();
        let body = self
            .client
            .execute(Method::GET, self.path, &params, None)
            .await?;

        let doc: Document<Vec<Resource>> = serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("failed to parse page: {e}")))?;

        Ok(Page {
            items: doc.data,
            total_count: doc.meta.and_then(|m| m.total_count),
        })
    }
}

#[async_trait]
impl ItGlueApi for ItGlueClient {
    async fn list_organizations(&self, query: PageQuery) -> Result<Vec<Resource>> {
        self.fetch_collection("/organizations", query).await
    }

    async fn list_configurations(&self, query: PageQuery) -> Result<Vec<Resource>> {
        self.fetch_collection("/configurations", query).await
    }

    async fn list_flexible_assets(&self, type_id: u64, query: PageQuery) -> Result<Vec<Resource>> {
        let query = query.filter("flexible_asset_type_id", type_id.to_string());
        self.fetch_collection("/flexible_assets", query).await
    }

    async fn get_flexible_asset(&self, id: u64) -> Result<Resource> {
        let body = self
            .execute(Method::GET, &format!("/flexible_assets/{id}"), &[], None)
            .await?;
        Self::parse_record(&body)
    }

    async fn create_flexible_asset(&self, body: &Value) -> Result<Resource> {
        let text = self
            .execute_with_retry(Method::POST, "/flexible_assets", Some(body))
            .await?;
        Self::parse_record(&text)
    }

    async fn update_flexible_asset(&self, id: u64, body: &Value) -> Result<Resource> {
        let text = self
            .execute_with_retry(Method::PATCH, &format!("/flexible_assets/{id}"), Some(body))
            .await?;
        Self::parse_record(&text)
    }

    async fn delete_flexible_asset(&self, id: u64) -> Result<()> {
        self.execute_with_retry(Method::DELETE, &format!("/flexible_assets/{id}"), None)
            .await?;
        Ok(())
    }
}

/// Map a non-success response to the error taxonomy.
///
/// 5xx bodies are inspected for the upstream timeout indicator; those become
/// retryable [`ApiError::Timeout`] errors that drive page-size back-off.
/// Detail text from the body is preserved verbatim for diagnostics.
pub(crate) fn classify_status(status: StatusCode, body: &str) -> ApiError {
    let detail = error_detail(status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Auth(detail),
        StatusCode::NOT_FOUND => ApiError::NotFound(detail),
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited(detail),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::BadRequest(detail),
        s if s.is_server_error() => {
            if is_timeout_detail(&detail) {
                ApiError::Timeout(detail)
            } else {
                ApiError::ServerError(detail)
            }
        }
        _ => ApiError::InvalidResponse(format!("unexpected status {status}: {detail}")),
    }
}

/// Extract human-readable detail from a JSON:API error body, falling back to
/// the raw body or the status line.
fn error_detail(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let candidates = [
            value.pointer("/errors/0/detail"),
            value.pointer("/errors/0/title"),
            value.get("detail"),
            value.get("message"),
        ];
        for candidate in candidates.into_iter().flatten() {
            if let Some(s) = candidate.as_str() {
                if !s.is_empty() {
                    return s.to_string();
                }
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.to_string()
    } else {
        trimmed.to_string()
    }
}

fn is_timeout_detail(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("timeout") || lower.contains("timed out")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_504_with_timeout_detail_is_retryable() {
        let body = r#"{ "errors": [ { "detail": "Your query took too long and timed out" } ] }"#;
        let err = classify_status(StatusCode::GATEWAY_TIMEOUT, body);
        assert!(matches!(err, ApiError::Timeout(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_500_without_timeout_detail_is_fatal() {
        let body = r#"{ "errors": [ { "detail": "internal error" } ] }"#;
        let err = classify_status(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert!(matches!(err, ApiError::ServerError(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_429_is_rate_limited() {
        let err = classify_status(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(matches!(err, ApiError::RateLimited(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_401_and_403_are_auth_failures() {
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Auth(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, ""),
            ApiError::Auth(_)
        ));
    }

    #[test]
    fn test_422_preserves_upstream_detail_verbatim() {
        let body = r#"{ "errors": [ { "detail": "traits is missing" } ] }"#;
        match classify_status(StatusCode::UNPROCESSABLE_ENTITY, body) {
            ApiError::BadRequest(detail) => assert_eq!(detail, "traits is missing"),
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_detail_falls_back_to_message_field() {
        let body = r#"{ "message": "Not found" }"#;
        match classify_status(StatusCode::NOT_FOUND, body) {
            ApiError::NotFound(detail) => assert_eq!(detail, "Not found"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_detail_falls_back_to_raw_body_then_status() {
        match classify_status(StatusCode::BAD_REQUEST, "plain text failure") {
            ApiError::BadRequest(detail) => assert_eq!(detail, "plain text failure"),
            other => panic!("expected BadRequest, got {other:?}"),
        }

        match classify_status(StatusCode::BAD_REQUEST, "  ") {
            ApiError::BadRequest(detail) => assert!(detail.contains("400")),
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_timeout_indicator_matching() {
        assert!(is_timeout_detail("Request Timeout"));
        assert!(is_timeout_detail("the query TIMED OUT"));
        assert!(!is_timeout_detail("internal server error"));
    }
}

#[cfg(all(test, feature = "http-tests"))]
mod http_tests {
    use super::*;
    use mockito::Matcher;

    async fn connect(server: &mockito::Server) -> ItGlueClient {
        ItGlueClient::connect(
            &Credential::ApiKey("ITG.test-key".to_string()),
            Some(&server.url()),
        )
        .await
        .unwrap()
        .with_retry(RetryPolicy {
            backoff: Duration::ZERO,
            max_attempts: 3,
        })
    }

    #[tokio::test]
    async fn test_timed_out_page_is_refetched_at_half_size() {
        let mut server = mockito::Server::new_async().await;

        // Size 100 times out; the retry at size 50 succeeds. The two
        // requests differ in page[size], so each gets its own mock.
        let full = server
            .mock("GET", "/organizations")
            .match_query(Matcher::UrlEncoded("page[size]".into(), "100".into()))
            .with_status(504)
            .with_body(r#"{ "errors": [ { "detail": "query timed out" } ] }"#)
            .expect(1)
            .create_async()
            .await;

        let halved = server
            .mock("GET", "/organizations")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page[size]".into(), "50".into()),
                Matcher::UrlEncoded("page[number]".into(), "1".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{
                    "data": [
                        { "id": "1", "type": "organizations", "attributes": { "name": "Acme" } }
                    ],
                    "meta": { "total-count": 1, "total-pages": 1 }
                }"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = connect(&server).await;
        let orgs = client
            .list_organizations(PageQuery::new(100))
            .await
            .unwrap();

        full.assert_async().await;
        halved.assert_async().await;
        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs[0].name(), Some("Acme"));
    }

    #[tokio::test]
    async fn test_auth_failure_aborts_pagination() {
        let mut server = mockito::Server::new_async().await;

        let denied = server
            .mock("GET", "/organizations")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{ "errors": [ { "detail": "invalid key" } ] }"#)
            .expect(1)
            .create_async()
            .await;

        let client = connect(&server).await;
        let err = client
            .list_organizations(PageQuery::new(100))
            .await
            .unwrap_err();

        denied.assert_async().await;
        assert!(matches!(err, Error::Api(ApiError::Auth(_))));
    }

    #[tokio::test]
    async fn test_create_sends_post_and_parses_record() {
        let mut server = mockito::Server::new_async().await;

        let create = server
            .mock("POST", "/flexible_assets")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "data": { "type": "flexible-assets" }
            })))
            .with_status(201)
            .with_body(
                r#"{ "data": { "id": "77", "type": "flexible-assets",
                               "attributes": { "name": "srv-01" } } }"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = connect(&server).await;
        let body = super::super::models::flexible_asset_create_body(
            42,
            7,
            &serde_json::json!({ "hostname": "srv-01" }),
        );
        let asset = client.create_flexible_asset(&body).await.unwrap();

        create.assert_async().await;
        assert_eq!(asset.id, "77");
    }

    #[tokio::test]
    async fn test_write_retries_on_rate_limit_then_gives_up() {
        let mut server = mockito::Server::new_async().await;

        let throttled = server
            .mock("DELETE", "/flexible_assets/9")
            .with_status(429)
            .with_body(r#"{ "errors": [ { "detail": "rate limited" } ] }"#)
            .expect(3)
            .create_async()
            .await;

        let client = connect(&server).await;
        let err = client.delete_flexible_asset(9).await.unwrap_err();

        throttled.assert_async().await;
        assert!(matches!(err, Error::Api(ApiError::RetryLimitReached)));
    }
}
