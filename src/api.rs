//! Remote API client
//!
//! Translates the closed set of logical operations (login, register, category
//! and transaction management, finance overview, chat) into HTTP requests
//! against the configured base URL, and normalizes JSON responses into typed
//! results or error signals.
//!
//! Local preconditions (empty fields, non-numeric amounts, missing token) are
//! checked before any network I/O and fail fast with `Error::Validation` or
//! `Error::Auth`. All failures are terminal for the triggering action; the
//! client never retries on its own.

use crate::config::Config;
use crate::models::{today_iso, Category, ExpenseSlice, FinanceOverview, FlowKind, Transaction};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Registration form, validated locally before any request is made
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterForm {
    /// Account name (the original clients use the email address here)
    pub username: String,
    /// Password
    pub password: String,
    /// Password confirmation, must match `password`
    pub confirm_password: String,
    /// Whether the terms checkbox was ticked
    pub terms_accepted: bool,
}

/// Check registration preconditions without touching the network
///
/// Each violation names the failing field so the screen can surface it.
pub fn validate_registration(form: &RegisterForm) -> Result<()> {
    if form.username.trim().is_empty() {
        return Err(Error::Validation("Username is required".to_string()));
    }
    if form.password.is_empty() {
        return Err(Error::Validation("Password is required".to_string()));
    }
    if form.confirm_password.is_empty() {
        return Err(Error::Validation("Password confirmation is required".to_string()));
    }
    if form.password != form.confirm_password {
        return Err(Error::Validation("Passwords do not match".to_string()));
    }
    if !form.terms_accepted {
        return Err(Error::Validation(
            "You must accept the terms and conditions".to_string(),
        ));
    }
    Ok(())
}

/// User input for a new transaction, as typed on the add-transaction screen
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    /// Amount as typed (validated to parse as a finite number)
    pub amount: String,
    /// Income or expense
    pub kind: FlowKind,
    /// Selected category id (integer string)
    pub category_id: String,
    /// Free-form description
    pub description: String,
}

/// Wire payload for `transactions/create/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTransaction {
    /// Parsed amount
    pub amount: f64,
    /// Income or expense
    #[serde(rename = "type")]
    pub kind: FlowKind,
    /// Numeric category id
    pub category_id: i64,
    /// ISO date, set by the client to the current day
    pub date: String,
    /// Free-form description
    pub description: String,
}

/// Validate user input and build the transaction payload
///
/// The amount must parse as a finite number and the category id must be a
/// non-empty integer string; both are rejected locally, before transmission.
pub fn build_transaction_payload(input: &TransactionInput) -> Result<NewTransaction> {
    let amount: f64 = input
        .amount
        .trim()
        .parse()
        .map_err(|_| Error::Validation("Amount must be a number".to_string()))?;

    if !amount.is_finite() {
        return Err(Error::Validation("Amount must be a finite number".to_string()));
    }

    if input.category_id.trim().is_empty() {
        return Err(Error::Validation("A category must be selected".to_string()));
    }

    let category_id: i64 = input
        .category_id
        .trim()
        .parse()
        .map_err(|_| Error::Validation("Invalid category id".to_string()))?;

    Ok(NewTransaction {
        amount,
        kind: input.kind,
        category_id,
        date: today_iso(),
        description: input.description.clone(),
    })
}

/// Reply from the chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    /// Assistant message body
    pub text: String,
    /// Server-side timestamp for display
    pub time: String,
}

/// Everything the home dashboard needs, fetched as one batch
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    /// Balance / income / expense aggregate
    pub overview: FinanceOverview,
    /// Transaction history, newest first as served
    pub transactions: Vec<Transaction>,
    /// Expense breakdown for the chart
    pub slices: Vec<ExpenseSlice>,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct NewCategory<'a> {
    name: &'a str,
    color: &'a str,
    #[serde(rename = "type")]
    kind: FlowKind,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the Finbook API
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the configured base URL
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fail with `Auth` before any network call when no token is stored
    fn require_token(token: Option<&str>) -> Result<&str> {
        token.ok_or_else(|| Error::Auth("not logged in".to_string()))
    }

    /// Log in and return the bearer token issued by the server
    ///
    /// A non-success status fails with `Auth` carrying the server-provided
    /// `error` message verbatim, or a generic fallback when the body has none.
    /// A success response without a `token` field is a `Protocol` error.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        info!("Logging in as {}", username);

        let response = self
            .client
            .post(self.endpoint("login/"))
            .json(&Credentials { username, password })
            .send()
            .await
            .map_err(|e| Error::Network(format!("Login request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("Login rejected with status {}", status);
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("Login failed (status {})", status));
            return Err(Error::Auth(message));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Protocol(format!("Malformed login response: {}", e)))?;

        body.token
            .ok_or_else(|| Error::Protocol("Login response missing token field".to_string()))
    }

    /// Register a new account
    ///
    /// All form preconditions are checked locally first; a violation fails
    /// fast with `Validation` and no request is made.
    pub async fn register(&self, form: &RegisterForm) -> Result<()> {
        validate_registration(form)?;

        info!("Registering account {}", form.username);

        let response = self
            .client
            .post(self.endpoint("register/"))
            .json(&Credentials {
                username: &form.username,
                password: &form.password,
            })
            .send()
            .await
            .map_err(|e| Error::Network(format!("Registration request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("Registration rejected with status {}", status);
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("Registration failed (status {})", status));
            return Err(Error::Auth(message));
        }

        Ok(())
    }

    /// List categories of the given kind
    pub async fn list_categories(
        &self,
        token: Option<&str>,
        kind: FlowKind,
    ) -> Result<Vec<Category>> {
        let token = Self::require_token(token)?;
        let url = format!("{}?type={}", self.endpoint("categories/"), kind.as_str());
        self.get_json(token, &url).await
    }

    /// Create a category; the name must be non-empty
    pub async fn create_category(
        &self,
        token: Option<&str>,
        name: &str,
        color: &str,
        kind: FlowKind,
    ) -> Result<Category> {
        if name.trim().is_empty() {
            return Err(Error::Validation("Category name cannot be empty".to_string()));
        }
        let token = Self::require_token(token)?;

        info!("Creating {} category {:?}", kind.as_str(), name);

        let response = self
            .client
            .post(self.endpoint("categories/create/"))
            .header("Authorization", format!("Token {}", token))
            .json(&NewCategory { name, color, kind })
            .send()
            .await
            .map_err(|e| Error::Network(format!("Create category request failed: {}", e)))?;

        Self::json_or_failure(response).await
    }

    /// Create a transaction from validated user input
    ///
    /// The payload is built (and the input rejected) locally before any
    /// network call; the date is set to the current day.
    pub async fn create_transaction(
        &self,
        token: Option<&str>,
        input: &TransactionInput,
    ) -> Result<Transaction> {
        let payload = build_transaction_payload(input)?;
        let token = Self::require_token(token)?;

        info!(
            "Creating {} transaction of {} in category {}",
            payload.kind.as_str(),
            payload.amount,
            payload.category_id
        );

        let response = self
            .client
            .post(self.endpoint("transactions/create/"))
            .header("Authorization", format!("Token {}", token))
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Create transaction request failed: {}", e)))?;

        Self::json_or_failure(response).await
    }

    /// Fetch the balance / income / expense aggregate
    pub async fn fetch_overview(&self, token: Option<&str>) -> Result<FinanceOverview> {
        let token = Self::require_token(token)?;
        self.get_json(token, &self.endpoint("finance-overview/")).await
    }

    /// Fetch the transaction history
    pub async fn fetch_transactions(&self, token: Option<&str>) -> Result<Vec<Transaction>> {
        let token = Self::require_token(token)?;
        self.get_json(token, &self.endpoint("transactions/")).await
    }

    /// Fetch the expense breakdown for the dashboard chart
    pub async fn fetch_expense_categories(&self, token: Option<&str>) -> Result<Vec<ExpenseSlice>> {
        let token = Self::require_token(token)?;
        self.get_json(token, &self.endpoint("expense-categories/")).await
    }

    /// Fetch everything the dashboard renders, as one batch
    ///
    /// The three GETs run concurrently; if any of them fails the whole batch
    /// fails and no partial data is returned.
    pub async fn fetch_dashboard(&self, token: Option<&str>) -> Result<DashboardData> {
        let token = Self::require_token(token)?;

        info!("Fetching dashboard batch");

        let (overview, transactions, slices) = tokio::try_join!(
            self.fetch_overview(Some(token)),
            self.fetch_transactions(Some(token)),
            self.fetch_expense_categories(Some(token)),
        )?;

        Ok(DashboardData {
            overview,
            transactions,
            slices,
        })
    }

    /// Send a chat message to the advisor endpoint
    ///
    /// Callers (the advice screen) substitute a canned local reply on failure
    /// rather than surfacing the raw error.
    pub async fn send_chat_message(&self, token: Option<&str>, text: &str) -> Result<ChatReply> {
        if text.trim().is_empty() {
            return Err(Error::Validation("Message cannot be empty".to_string()));
        }
        let token = Self::require_token(token)?;

        debug!("Sending chat message ({} chars)", text.len());

        let response = self
            .client
            .post(self.endpoint("chat/"))
            .header("Authorization", format!("Token {}", token))
            .json(&ChatRequest { message: text })
            .send()
            .await
            .map_err(|e| Error::Network(format!("Chat request failed: {}", e)))?;

        Self::json_or_failure(response).await
    }

    /// GET an authenticated endpoint and parse the JSON body
    async fn get_json<T: DeserializeOwned>(&self, token: &str, url: &str) -> Result<T> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Token {}", token))
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request failed: {}", e)))?;

        Self::json_or_failure(response).await
    }

    /// Parse a success body, or classify a non-success response
    ///
    /// 401/403 are `Auth`; other non-success statuses are `Network`, carrying
    /// the server's `error` message when the body has one. A success body
    /// that doesn't match the expected shape is a `Protocol` error.
    async fn json_or_failure<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            warn!("Request failed with status {}", status);
            let message = response.json::<ErrorBody>().await.ok().map(|body| body.error);

            return Err(if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                Error::Auth(message.unwrap_or_else(|| "Invalid or expired token".to_string()))
            } else {
                Error::Network(
                    message.unwrap_or_else(|| format!("Request failed with status {}", status)),
                )
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::Protocol(format!("Malformed response: {}", e)))
    }
}
