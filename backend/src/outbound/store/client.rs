//! Reqwest-backed client for the hosted tabular store.
//!
//! This adapter owns transport details only: header plumbing, equality
//! filters, ordering, limits, exact counts, and HTTP error mapping. It
//! speaks the PostgREST dialect the hosted store exposes: one path segment
//! per table, `column=eq.value` filters, `Prefer: return=representation` on
//! mutations, and `Prefer: count=exact` with a `Content-Range` reply for
//! counting.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_RANGE};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::ports::StoreError;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Query-string builder for one table request.
#[derive(Debug, Clone, Default)]
pub struct TableQuery {
    pairs: Vec<(String, String)>,
}

impl TableQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict returned columns.
    pub fn select(mut self, columns: &str) -> Self {
        self.pairs.push(("select".to_owned(), columns.to_owned()));
        self
    }

    /// Equality filter on one column.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.pairs
            .push((column.to_owned(), format!("eq.{}", value.to_string())));
        self
    }

    /// Order by one column, descending.
    pub fn order_desc(mut self, column: &str) -> Self {
        self.pairs
            .push(("order".to_owned(), format!("{column}.desc")));
        self
    }

    /// Cap the number of returned rows.
    pub fn limit(mut self, limit: u32) -> Self {
        self.pairs.push(("limit".to_owned(), limit.to_string()));
        self
    }

    fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// HTTP client for the hosted store, shared by every repository adapter.
pub struct StoreClient {
    client: Client,
    base: Url,
    api_key: String,
}

impl StoreClient {
    /// Build a client for the given endpoint and service key.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying reqwest client cannot be built.
    pub fn new(base: Url, api_key: String) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(|err| StoreError::transport(err.to_string()))?;
        Ok(Self {
            client,
            base,
            api_key,
        })
    }

    /// Fetch rows matching the query.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: TableQuery,
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .request(Method::GET, table, &query)?
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_rows(response).await
    }

    /// Insert one row and return its stored representation.
    pub async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        row: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .request(Method::POST, table, &TableQuery::new())?
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(map_transport_error)?;
        let mut rows: Vec<T> = decode_rows(response).await?;
        if rows.is_empty() {
            return Err(StoreError::query(format!(
                "insert into {table} returned no rows"
            )));
        }
        Ok(rows.swap_remove(0))
    }

    /// Apply a partial update to matching rows and return them.
    pub async fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        query: TableQuery,
        patch: &B,
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .request(Method::PATCH, table, &query)?
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_rows(response).await
    }

    /// Delete matching rows and return how many were removed.
    pub async fn delete(&self, table: &str, query: TableQuery) -> Result<u64, StoreError> {
        let response = self
            .request(Method::DELETE, table, &query)?
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(map_transport_error)?;
        let rows: Vec<serde_json::Value> = decode_rows(response).await?;
        Ok(rows.len() as u64)
    }

    /// Count rows matching the query without fetching them.
    pub async fn count(&self, table: &str, query: TableQuery) -> Result<u64, StoreError> {
        let query = query.select("id").limit(1);
        let response = self
            .request(Method::GET, table, &query)?
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(map_status_error(status, body.as_ref()));
        }
        let range = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| StoreError::decode("count reply missing Content-Range"))?;
        parse_content_range_total(range)
    }

    fn request(
        &self,
        method: Method,
        table: &str,
        query: &TableQuery,
    ) -> Result<reqwest::RequestBuilder, StoreError> {
        let url = self
            .base
            .join(table)
            .map_err(|err| StoreError::query(format!("invalid table url for {table}: {err}")))?;
        Ok(self
            .client
            .request(method, url)
            .headers(self.auth_headers())
            .query(query.pairs()))
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(key) = HeaderValue::from_str(&self.api_key) {
            headers.insert("apikey", key);
        }
        if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(reqwest::header::AUTHORIZATION, bearer);
        }
        headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );
        headers
    }
}

async fn decode_rows<T: DeserializeOwned>(response: reqwest::Response) -> Result<Vec<T>, StoreError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    serde_json::from_slice(body.as_ref())
        .map_err(|err| StoreError::decode(format!("invalid store payload: {err}")))
}

/// The total sits after the slash: `0-0/42`, or `*/0` for an empty table.
fn parse_content_range_total(range: &str) -> Result<u64, StoreError> {
    range
        .rsplit_once('/')
        .and_then(|(_, total)| total.parse().ok())
        .ok_or_else(|| StoreError::decode(format!("unparseable Content-Range: {range}")))
}

fn map_transport_error(error: reqwest::Error) -> StoreError {
    StoreError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> StoreError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };
    StoreError::query(message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network helpers.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0-0/42", 42)]
    #[case("*/0", 0)]
    #[case("0-24/3573", 3573)]
    fn content_range_totals_parse(#[case] range: &str, #[case] expected: u64) {
        assert_eq!(
            parse_content_range_total(range).expect("valid range"),
            expected
        );
    }

    #[test]
    fn malformed_content_range_is_a_decode_error() {
        let err = parse_content_range_total("bogus").expect_err("must fail");
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[test]
    fn queries_collect_filters_in_order() {
        let query = TableQuery::new()
            .select("id, question")
            .eq("status", "solved")
            .order_desc("created_at")
            .limit(3);
        assert_eq!(
            query.pairs(),
            &[
                ("select".to_owned(), "id, question".to_owned()),
                ("status".to_owned(), "eq.solved".to_owned()),
                ("order".to_owned(), "created_at.desc".to_owned()),
                ("limit".to_owned(), "3".to_owned()),
            ]
        );
    }

    #[test]
    fn status_errors_include_a_body_preview() {
        let err = map_status_error(StatusCode::BAD_REQUEST, b"{\"message\":\"bad filter\"}");
        assert!(err.to_string().contains("status 400"));
        assert!(err.to_string().contains("bad filter"));
    }
}
