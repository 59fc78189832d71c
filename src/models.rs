//! Domain data types shared by the API client and the screens

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Direction of a money flow, for both categories and transactions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    /// Money going out
    Expense,
    /// Money coming in
    Income,
}

impl FlowKind {
    /// Wire/query-string value (`expense` or `income`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
        }
    }

    /// Flip between expense and income
    pub fn toggle(&self) -> Self {
        match self {
            Self::Expense => Self::Income,
            Self::Income => Self::Expense,
        }
    }
}

/// A transaction category
///
/// Created through the API and immutable on the client afterwards. The list
/// held by a screen is transient and scoped to that screen visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Server-assigned identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Display color (`#rrggbb`)
    pub color: String,
    /// Whether the category groups expenses or income
    #[serde(rename = "type")]
    pub kind: FlowKind,
}

/// A single ledger entry fetched from the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Server-assigned identifier
    pub id: String,
    /// ISO date string (`YYYY-MM-DD`)
    pub date: String,
    /// Free-form description
    pub description: String,
    /// Amount in the account currency
    pub amount: f64,
    /// Income or expense
    #[serde(rename = "type")]
    pub kind: FlowKind,
    /// Category name, when the server provides one
    #[serde(default)]
    pub category: Option<String>,
}

/// Server-computed aggregate of the user's finances
///
/// Read-only display value; fields the server omits default to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FinanceOverview {
    /// Current balance
    #[serde(default)]
    pub balance: f64,
    /// Total income
    #[serde(default)]
    pub income: f64,
    /// Total expense
    #[serde(default)]
    pub expense: f64,
}

/// One slice of the dashboard expense breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseSlice {
    /// Category name
    pub name: String,
    /// Total spent in the category
    pub amount: f64,
    /// Display color, when the server provides one
    #[serde(default)]
    pub color: Option<String>,
}

impl ExpenseSlice {
    /// Display color, falling back to a random `#rrggbb` value when the
    /// server did not assign one
    pub fn display_color(&self) -> String {
        match &self.color {
            Some(color) => color.clone(),
            None => random_color(),
        }
    }
}

/// Generate a random `#rrggbb` color for chart slices without one
pub fn random_color() -> String {
    let mut rng = rand::thread_rng();
    format!("#{:06x}", rng.gen_range(0..0x1000000))
}

/// A chat message on the advice screen
///
/// In-memory only: messages live for the duration of the screen visit and are
/// discarded on navigation away.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Message identifier (client timestamp for user messages)
    pub id: String,
    /// Message body
    pub text: String,
    /// Display time (`HH:MM`)
    pub time: String,
    /// Whether the message was authored by the assistant
    pub is_ai: bool,
}

impl ChatMessage {
    /// Create a user-authored message; the id is the client timestamp
    pub fn from_user(text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis().to_string(),
            text: text.into(),
            time: now.format("%H:%M").to_string(),
            is_ai: false,
        }
    }

    /// Create an assistant-authored message with a server-provided time
    pub fn from_assistant(text: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            time: time.into(),
            is_ai: true,
        }
    }
}

/// Today's date as an ISO `YYYY-MM-DD` string (transaction creation date)
pub fn today_iso() -> String {
    Utc::now().date_naive().to_string()
}
