//! REST client for the hosted database
//!
//! Wraps a pooled `reqwest::Client` configured with the project URL and
//! access key. Cloning is cheap; repositories each hold a clone.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_RANGE};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::DbError;
use super::query::Query;
use crate::config::{ConfigError, Credentials, DatabaseConfig};

/// Path of the REST API below the project URL
const REST_PATH: &str = "/rest/v1";

/// Rows requested per page by [`SupabaseClient::select_all`]; matches the
/// hosted service's default `max-rows`
pub const PAGE_SIZE: u64 = 1000;

/// Handle to the hosted database
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    rest_url: String,
}

impl SupabaseClient {
    /// Connect using the configured credentials, failing if any are missing.
    ///
    /// Use this when a half-configured process must not start. For builds
    /// that should proceed without live data see
    /// [`DataSource::from_config`](super::DataSource::from_config).
    pub fn connect(config: &DatabaseConfig) -> Result<Self, ConfigError> {
        let credentials = config.credentials()?;
        Self::new(&credentials, config)
    }

    /// Build a client from already validated credentials
    pub fn new(credentials: &Credentials, config: &DatabaseConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", sensitive_header_value(&credentials.anon_key)?);
        headers.insert(
            AUTHORIZATION,
            sensitive_header_value(&format!("Bearer {}", credentials.anon_key))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if config.schema != "public" {
            headers.insert("accept-profile", header_value(&config.schema)?);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                ConfigError::ValidationError(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::debug!(url = %credentials.url, schema = %config.schema, "Database client created");

        Ok(Self {
            http,
            rest_url: format!("{}{}", credentials.url, REST_PATH),
        })
    }

    /// Base URL of the REST API
    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    fn url_for(&self, query: &Query) -> String {
        format!(
            "{}/{}?{}",
            self.rest_url,
            query.table_name(),
            query.to_query_string()
        )
    }

    /// Run one GET and return the decoded rows plus the exact total, if the
    /// server reported one in `Content-Range`
    async fn fetch<T: DeserializeOwned>(
        &self,
        query: &Query,
        exact_count: bool,
    ) -> Result<(Vec<T>, Option<u64>), DbError> {
        let url = self.url_for(query);
        tracing::debug!(table = query.table_name(), "GET {}", url);

        let mut request = self.http.get(&url);
        if exact_count {
            request = request.header("prefer", "count=exact");
        }
        let response = request.send().await?;
        let status = response.status();
        let total = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(|range| parse_content_range_total(range).ok());
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DbError::from_status(status.as_u16(), &body));
        }

        let rows = serde_json::from_str(&body).map_err(|source| DbError::Decode {
            table: query.table_name().to_string(),
            source,
        })?;
        Ok((rows, total))
    }

    /// Fetch the rows matching the query.
    ///
    /// An unranged query asks for an exact count and fails with
    /// [`DbError::InvalidResponse`] if the server capped the result (its
    /// `max-rows` setting). Use [`SupabaseClient::select_all`] to page
    /// through large tables instead.
    pub async fn select<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, DbError> {
        let unranged = query.row_limit().is_none();
        let (rows, total) = self.fetch::<T>(query, unranged).await?;

        if let Some(total) = total.filter(|_| unranged) {
            let expected = total.saturating_sub(query.row_offset());
            if (rows.len() as u64) < expected {
                return Err(DbError::InvalidResponse(format!(
                    "'{}' returned {} of {} rows",
                    query.table_name(),
                    rows.len(),
                    expected
                )));
            }
        }
        Ok(rows)
    }

    /// Fetch every row matching the query, paging with `limit`/`offset`
    /// until the exact count has been read.
    ///
    /// The query should carry a total ordering so pages do not overlap.
    pub async fn select_all<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, DbError> {
        let mut rows: Vec<T> = Vec::new();

        loop {
            let page = query
                .clone()
                .limit(PAGE_SIZE)
                .offset(rows.len() as u64);
            let (mut batch, total) = self.fetch::<T>(&page, true).await?;
            let received = batch.len() as u64;
            rows.append(&mut batch);

            match total {
                Some(total) if (rows.len() as u64) >= total => break,
                Some(total) if received == 0 => {
                    return Err(DbError::InvalidResponse(format!(
                        "'{}' stopped after {} of {} rows",
                        query.table_name(),
                        rows.len(),
                        total
                    )));
                }
                Some(_) => {}
                None if received < PAGE_SIZE => break,
                None => {}
            }
        }

        tracing::debug!(table = query.table_name(), rows = rows.len(), "Fetched all rows");
        Ok(rows)
    }

    /// Fetch at most one row matching the query
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        query: &Query,
    ) -> Result<Option<T>, DbError> {
        let query = query.clone().limit(1);
        let rows: Vec<T> = self.select(&query).await?;
        Ok(rows.into_iter().next())
    }

    /// Count rows matching the query's filters
    pub async fn count(&self, query: &Query) -> Result<u64, DbError> {
        let query = query.clone().limit(0);
        let url = self.url_for(&query);
        tracing::debug!(table = query.table_name(), "COUNT {}", url);

        let response = self
            .http
            .get(&url)
            .header("prefer", "count=exact")
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            return Err(DbError::from_status(status.as_u16(), &body));
        }

        let range = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| DbError::InvalidResponse("missing Content-Range header".to_string()))?;
        parse_content_range_total(range)
    }

    /// Check that the REST endpoint answers with the current credentials
    pub async fn ping(&self) -> Result<(), DbError> {
        self.count(&Query::table("colleges").select("id")).await?;
        Ok(())
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|_| {
        ConfigError::ValidationError("credential contains characters not allowed in HTTP headers".to_string())
    })
}

/// Header value that `Debug` output masks
fn sensitive_header_value(value: &str) -> Result<HeaderValue, ConfigError> {
    let mut value = header_value(value)?;
    value.set_sensitive(true);
    Ok(value)
}

/// Extract the total from a `Content-Range` value such as `0-9/42` or `*/42`
fn parse_content_range_total(range: &str) -> Result<u64, DbError> {
    range
        .rsplit_once('/')
        .and_then(|(_, total)| total.trim().parse::<u64>().ok())
        .ok_or_else(|| DbError::InvalidResponse(format!("unusable Content-Range '{}'", range)))
}

#[cfg(test)]
pub(crate) mod test_support {
    //! In-process stand-in for the REST endpoint

    use super::*;
    use axum::extract::RawQuery;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::Value;
    use std::sync::Arc;

    /// Key every test client sends
    pub(crate) const TEST_KEY: &str = "test-anon-key";

    fn query_param(query: &str, key: &str) -> Option<usize> {
        let prefix = format!("{}=", key);
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix(&prefix))
            .and_then(|value| value.parse().ok())
    }

    /// Serve `rows` at `path` like an endpoint with `max-rows = cap`: each
    /// response honours `offset`/`limit`, returns at most `cap` rows and an
    /// exact `Content-Range`
    pub(crate) fn capped_route(path: &str, rows: Vec<Value>, cap: usize) -> Router {
        let rows = Arc::new(rows);
        Router::new().route(
            path,
            get(move |RawQuery(query): RawQuery| {
                let rows = rows.clone();
                async move {
                    let query = query.unwrap_or_default();
                    let offset = query_param(&query, "offset").unwrap_or(0);
                    let limit = query_param(&query, "limit").unwrap_or(usize::MAX);
                    let start = offset.min(rows.len());
                    let end = start + limit.min(cap).min(rows.len() - start);
                    let range = if start == end {
                        format!("*/{}", rows.len())
                    } else {
                        format!("{}-{}/{}", start, end - 1, rows.len())
                    };
                    (
                        [("content-range", range)],
                        Json(Value::Array(rows[start..end].to_vec())),
                    )
                }
            }),
        )
    }

    /// Serve `router` on a random local port and return a client pointed at it
    pub(crate) async fn spawn_test_server(router: Router) -> SupabaseClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Test server failed");
        });

        let config = DatabaseConfig::new(format!("http://{}", addr), TEST_KEY);
        SupabaseClient::connect(&config).expect("Failed to create test client")
    }
}
