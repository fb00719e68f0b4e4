// Hand-crafted async HTTP client for the directory's batched query API.
//
// Single endpoint, POST only. Request body: {"query": ..., "variables": ...}
// Response body: {"data": ..., "errors": [...]}
// Auth: Authorization bearer credential, injected as a default header.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::Error;
use crate::types::{AccountResponse, CountsResponse};

// ── Response envelope ────────────────────────────────────────────────

#[derive(Deserialize)]
struct QueryEnvelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<QueryErrorBody>,
}

#[derive(Deserialize)]
struct QueryErrorBody {
    #[serde(default)]
    message: String,
}

// ── Per-shape `data` wrappers ────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountsData {
    #[serde(default)]
    equipment_counts: CountsResponse,
}

#[derive(Deserialize)]
struct AccountListData {
    #[serde(default)]
    accounts: AccountBatch,
}

#[derive(Deserialize, Default)]
struct AccountBatch {
    #[serde(default)]
    entities: Vec<AccountResponse>,
}

#[derive(Deserialize)]
struct AccountLookupData {
    #[serde(default)]
    account: Option<AccountResponse>,
}

// ── Query shapes ─────────────────────────────────────────────────────
//
// The query language itself is an opaque contract: these strings are sent
// verbatim and only their variables and response shapes matter here.

const EQUIPMENT_COUNTS_QUERY: &str = "\
query EquipmentCounts($company: String, $status: String) {
  equipmentCounts(company: $company, status: $status) {
    good warning down uninventoried total
  }
}";

const DOWN_ACCOUNTS_QUERY: &str = "\
query DownAccounts($limit: Int!) {
  accounts(status: DOWN, first: $limit) {
    entities {
      id name
      addresses { line1 city subdivision zip }
      ipAssignments { subnet }
    }
  }
}";

const WARNING_ACCOUNTS_QUERY: &str = "\
query WarningAccounts($limit: Int!) {
  accounts(status: WARNING, first: $limit) {
    entities {
      id name
      addresses { line1 city subdivision zip }
      ipAssignments { subnet }
    }
  }
}";

const ACCOUNT_BY_ID_QUERY: &str = "\
query AccountById($id: ID!) {
  account(id: $id) {
    id name
    addresses { line1 city subdivision zip }
    ipAssignments { subnet }
  }
}";

// ── Filters ──────────────────────────────────────────────────────────

/// Optional filters for the aggregate counts query.
#[derive(Debug, Clone, Default)]
pub struct CountsFilter {
    /// Restrict counts to a single company scope.
    pub company: Option<String>,
    /// Restrict counts to a single status.
    pub status: Option<String>,
}

impl CountsFilter {
    /// Counts scoped to one company, all statuses.
    pub fn company(name: impl Into<String>) -> Self {
        Self {
            company: Some(name.into()),
            status: None,
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the upstream directory.
///
/// Holds a `reqwest::Client` with the credential pre-installed as a
/// sensitive default header, and issues every query against the one
/// configured endpoint. No retries, no caching — callers own both.
pub struct DirectoryClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl DirectoryClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an endpoint URL, credential, and transport config.
    ///
    /// Injects `Authorization: Bearer <credential>` as a default header
    /// on every request, marked sensitive so it never appears in logs.
    pub fn new(
        endpoint: &str,
        credential: &secrecy::SecretString,
        transport: &crate::TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut auth_value =
            HeaderValue::from_str(&format!("Bearer {}", credential.expose_secret())).map_err(
                |e| Error::Authentication {
                    message: format!("credential is not a valid header value: {e}"),
                },
            )?;
        auth_value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth_value);

        let http = transport.build_client(headers)?;
        let endpoint = Url::parse(endpoint)?;

        Ok(Self { http, endpoint })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(endpoint: Url, http: reqwest::Client) -> Self {
        Self { http, endpoint }
    }

    /// The configured directory endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    // ── Query transport ──────────────────────────────────────────────

    /// POST one query and unwrap the `{data, errors}` envelope.
    async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T, Error> {
        debug!(endpoint = %self.endpoint, "POST directory query");

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        let envelope: QueryEnvelope<T> =
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })?;

        if !envelope.errors.is_empty() {
            let message = envelope
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::Query { message });
        }

        envelope.data.ok_or_else(|| Error::Query {
            message: "response envelope contained neither data nor errors".into(),
        })
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Error::Authentication {
                message: if raw.is_empty() {
                    "credential rejected by directory".into()
                } else {
                    raw
                },
            };
        }

        Error::Status {
            status: status.as_u16(),
            message: if raw.is_empty() {
                status.to_string()
            } else {
                raw
            },
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Aggregate equipment counts by category, optionally filtered by
    /// company and/or status. Counts are raw (pre-suppression).
    pub async fn equipment_counts(&self, filter: &CountsFilter) -> Result<CountsResponse, Error> {
        let data: CountsData = self
            .query(
                EQUIPMENT_COUNTS_QUERY,
                json!({ "company": filter.company, "status": filter.status }),
            )
            .await?;
        Ok(data.equipment_counts)
    }

    /// Accounts currently reporting down equipment. One bounded page —
    /// the directory caps results at `limit`, so the list may undercount
    /// relative to the aggregate query.
    pub async fn list_down_accounts(&self, limit: i64) -> Result<Vec<AccountResponse>, Error> {
        let data: AccountListData = self
            .query(DOWN_ACCOUNTS_QUERY, json!({ "limit": limit }))
            .await?;
        Ok(data.accounts.entities)
    }

    /// Accounts currently reporting warning-state equipment. One bounded
    /// page, same caveat as [`list_down_accounts`](Self::list_down_accounts).
    pub async fn list_warning_accounts(&self, limit: i64) -> Result<Vec<AccountResponse>, Error> {
        let data: AccountListData = self
            .query(WARNING_ACCOUNTS_QUERY, json!({ "limit": limit }))
            .await?;
        Ok(data.accounts.entities)
    }

    /// Look up a single account by identifier. `None` if the directory
    /// has no such account.
    pub async fn account_by_id(&self, id: &str) -> Result<Option<AccountResponse>, Error> {
        let data: AccountLookupData = self
            .query(ACCOUNT_BY_ID_QUERY, json!({ "id": id }))
            .await?;
        Ok(data.account)
    }
}
