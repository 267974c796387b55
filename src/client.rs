use std::time::Instant;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{RedmineError, Result};
use crate::filter::{Filter, UserByIdFilter, UsersFilter};
use crate::responses::{ErrorsEnvelope, TotalCountEnvelope, UserEnvelope, UsersEnvelope, UsersPage};
use crate::types::{StatusUpdate, User};

/// Page size used when aggregating every user.
pub const PAGE_SIZE: u32 = 100;

const API_KEY_HEADER: &str = "X-Redmine-API-Key";
const USERS_PATH: &str = "/users.json";

/// Offset/limit window for one list request. Zero fields are left out of
/// the query so the server applies its defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u32,
    pub limit: u32,
}

impl Pagination {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// The window immediately after this one. The offset saturates at
    /// `u32::MAX`.
    pub fn next(self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
        }
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if self.offset > 0 {
            pairs.push(("offset", self.offset.to_string()));
        }
        if self.limit > 0 {
            pairs.push(("limit", self.limit.to_string()));
        }
        pairs
    }
}

/// Where the API key travels. Redmine accepts both; deployments behind some
/// proxies only see one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// `key=<api key>` query parameter.
    Query,
    /// `X-Redmine-API-Key` request header.
    Header,
}

/// Client for the Redmine users resource.
///
/// Holds no per-call state, so one instance can be cloned and shared across
/// concurrent tasks.
#[derive(Clone)]
pub struct RedmineClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl RedmineClient {
    pub fn new(endpoint: &str, api_key: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("redmine-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_http_client(http, endpoint, api_key)
    }

    /// Use a preconfigured `reqwest::Client` (proxies, timeouts, TLS).
    pub fn with_http_client(
        http: Client,
        endpoint: &str,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let parsed = Url::parse(endpoint).map_err(|e| RedmineError::InvalidUrl(format!("{endpoint}: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(RedmineError::InvalidUrl(format!(
                "{endpoint}: scheme must be http or https"
            )));
        }

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One page of users, authenticated with the `key` query parameter.
    pub async fn list_users(&self, page: Pagination) -> Result<Vec<User>> {
        let envelope: UsersEnvelope = self
            .fetch(USERS_PATH, page.query_pairs(), AuthMode::Query)
            .await?;
        Ok(envelope.users)
    }

    /// One page of users together with the server's `total_count`.
    pub async fn list_users_page(&self, page: Pagination) -> Result<UsersPage> {
        self.fetch(USERS_PATH, page.query_pairs(), AuthMode::Query).await
    }

    pub async fn total_user_count(&self) -> Result<u32> {
        let envelope: TotalCountEnvelope = self
            .fetch(USERS_PATH, Pagination::default().query_pairs(), AuthMode::Query)
            .await?;
        Ok(envelope.total_count)
    }

    /// Every user, fetched in pages of [`PAGE_SIZE`] and concatenated in
    /// server order. The first page also carries the total count, so `N`
    /// users cost `max(1, ceil(N / PAGE_SIZE))` requests. Any page error
    /// aborts the whole aggregation.
    pub async fn list_all_users(&self) -> Result<Vec<User>> {
        let mut page = Pagination::new(0, PAGE_SIZE);
        let first = self.list_users_page(page).await?;
        let total = first.total_count;
        let mut users = first.users;

        page = page.next();
        while page.offset < total {
            let batch = self.list_users(page).await?;
            users.extend(batch);
            page = page.next();
        }

        debug!(total, fetched = users.len(), "Aggregated user pages");
        Ok(users)
    }

    /// Users matching `filter`, authenticated with the API key header.
    pub async fn list_users_filtered(&self, filter: &UsersFilter) -> Result<Vec<User>> {
        let envelope: UsersEnvelope = self
            .fetch(USERS_PATH, filter_pairs(filter.as_filter()), AuthMode::Header)
            .await?;
        Ok(envelope.users)
    }

    pub async fn get_user(&self, id: u32) -> Result<User> {
        let envelope: UserEnvelope = self
            .fetch(&user_path(id), Vec::new(), AuthMode::Query)
            .await?;
        Ok(envelope.user)
    }

    /// Single user with the related data requested by `filter`, authenticated
    /// with the API key header.
    pub async fn get_user_filtered(&self, id: u32, filter: &UserByIdFilter) -> Result<User> {
        let envelope: UserEnvelope = self
            .fetch(&user_path(id), filter_pairs(filter.as_filter()), AuthMode::Header)
            .await?;
        Ok(envelope.user)
    }

    /// Change the account status of user `id`.
    ///
    /// Redmine answers 204 No Content. Some older servers answer 201 Created
    /// for the same update; that is accepted too.
    pub async fn set_user_status(&self, status: StatusUpdate, id: u32) -> Result<()> {
        let body = serde_json::to_string(&status).map_err(RedmineError::Serialize)?;
        self.execute(
            Method::PUT,
            &user_path(id),
            Vec::new(),
            AuthMode::Query,
            Some(body),
            &[StatusCode::NO_CONTENT, StatusCode::CREATED],
        )
        .await?;
        Ok(())
    }

    /// GET `path` and decode a 200 response as `T`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(&str, String)>,
        auth: AuthMode,
    ) -> Result<T> {
        let body = self
            .execute(Method::GET, path, query, auth, None, &[StatusCode::OK])
            .await?;
        serde_json::from_str(&body).map_err(RedmineError::Decode)
    }

    /// Send one request and return the body of an accepted response. Any other
    /// status is turned into an error from the `{"errors": [...]}` envelope.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Vec<(&str, String)>,
        auth: AuthMode,
        body: Option<String>,
        accepted: &[StatusCode],
    ) -> Result<String> {
        let url = self.build_url(path, &query, auth)?;

        let mut request = self.http.request(method.clone(), url);
        if auth == AuthMode::Header {
            request = request.header(API_KEY_HEADER, &self.api_key);
        }
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        debug!(method = %method, path, ?auth, "Sending request");
        let start = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(
            method = %method,
            path,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            bytes = text.len(),
            "Received response"
        );

        if accepted.contains(&status) {
            Ok(text)
        } else {
            Err(error_from_body(status, &text))
        }
    }

    /// Compose `<endpoint><path>?<query>`. In query mode the API key comes
    /// first as `key`.
    pub(crate) fn build_url(
        &self,
        path: &str,
        query: &[(&str, String)],
        auth: AuthMode,
    ) -> Result<Url> {
        let raw = format!("{}{}", self.endpoint, path);
        let mut url = Url::parse(&raw).map_err(|e| RedmineError::InvalidUrl(format!("{raw}: {e}")))?;

        if auth == AuthMode::Query || !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            if auth == AuthMode::Query {
                pairs.append_pair("key", &self.api_key);
            }
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

fn user_path(id: u32) -> String {
    format!("/users/{id}.json")
}

fn filter_pairs(filter: &Filter) -> Vec<(&str, String)> {
    filter.pairs().map(|(k, v)| (k, v.to_string())).collect()
}

fn error_from_body(status: StatusCode, body: &str) -> RedmineError {
    match serde_json::from_str::<ErrorsEnvelope>(body) {
        Ok(envelope) => RedmineError::Server {
            status: status.as_u16(),
            messages: envelope.errors,
        },
        Err(e) => RedmineError::Decode(e),
    }
}
