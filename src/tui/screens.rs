//! Screen state structures
//!
//! Each screen controller owns its form buffers, a loading flag and a status
//! message. Network outcomes are fed back through `apply_*` methods so the
//! state transitions stay pure and testable.

use crate::api::{
    build_transaction_payload, validate_registration, ChatReply, DashboardData, RegisterForm,
    TransactionInput,
};
use crate::models::{Category, ChatMessage, FinanceOverview, FlowKind, Transaction};
use crate::tui::types::ProfileItem;

/// Canned assistant reply used when the chat endpoint is unreachable
pub const FALLBACK_REPLY: &str =
    "Sorry, I can't reach the advisor right now. Please try again in a moment.";

/// One onboarding slide
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    /// Headline
    pub title: &'static str,
    /// Supporting text
    pub description: &'static str,
}

/// Onboarding screen state: a fixed slide deck with next/skip
#[derive(Debug)]
pub struct OnboardingScreen {
    /// Slides in display order
    pub slides: Vec<Slide>,
    /// Currently visible slide
    pub current_index: usize,
}

impl OnboardingScreen {
    /// Create the onboarding deck
    pub fn new() -> Self {
        Self {
            slides: vec![
                Slide {
                    title: "Take control of your spending",
                    description: "Track every expense and start saving today",
                },
                Slide {
                    title: "Your AI advisor",
                    description: "A companion for every money question you have",
                },
                Slide {
                    title: "And much more",
                    description: "Let's explore it together!",
                },
            ],
            current_index: 0,
        }
    }

    /// Whether the last slide is showing
    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.slides.len()
    }

    /// Advance one slide; returns true when the deck is finished
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            true
        } else {
            self.current_index += 1;
            false
        }
    }
}

impl Default for OnboardingScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Focusable fields on the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    /// Username / email input
    Username,
    /// Password input
    Password,
}

/// Login screen state
#[derive(Debug)]
pub struct LoginScreen {
    /// Username / email buffer
    pub username: String,
    /// Password buffer
    pub password: String,
    /// Whether the password is masked
    pub secure: bool,
    /// Field with input focus
    pub focus: LoginField,
    /// Whether a sign-in request is in flight
    pub loading: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Whether the status is an error
    pub is_error: bool,
}

impl LoginScreen {
    /// Create a new login screen
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            secure: true,
            focus: LoginField::Username,
            loading: false,
            status_message: None,
            is_error: false,
        }
    }

    /// Create a login screen with a success notice (e.g. after registration)
    pub fn with_notice(message: String) -> Self {
        let mut screen = Self::new();
        screen.status_message = Some(message);
        screen
    }

    /// Add a character to the focused field
    pub fn add_char(&mut self, c: char) {
        match self.focus {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    /// Remove the last character from the focused field
    pub fn backspace(&mut self) {
        match self.focus {
            LoginField::Username => {
                self.username.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }

    /// Move focus to the next field
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    /// Toggle password masking
    pub fn toggle_secure(&mut self) {
        self.secure = !self.secure;
    }

    /// Check the form locally; surfaces a message and returns false on failure
    pub fn validate(&mut self) -> bool {
        if self.username.trim().is_empty() {
            self.status_message = Some("Email is required".to_string());
            self.is_error = true;
            return false;
        }
        if self.password.is_empty() {
            self.status_message = Some("Password is required".to_string());
            self.is_error = true;
            return false;
        }
        true
    }

    /// Enter the loading state for a submit
    pub fn start_submit(&mut self) {
        self.loading = true;
        self.is_error = false;
        self.status_message = Some("Signing in...".to_string());
    }

    /// Apply a successful sign-in
    pub fn apply_success(&mut self) {
        self.loading = false;
        self.is_error = false;
        self.status_message = Some("Signed in!".to_string());
    }

    /// Apply a failed sign-in, surfacing the error message verbatim
    pub fn apply_failure(&mut self, message: String) {
        self.loading = false;
        self.is_error = true;
        self.status_message = Some(message);
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Focusable fields on the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    /// Username / email input
    Username,
    /// Password input
    Password,
    /// Password confirmation input
    Confirm,
}

/// Registration screen state
#[derive(Debug)]
pub struct RegisterScreen {
    /// Username / email buffer
    pub username: String,
    /// Password buffer
    pub password: String,
    /// Password confirmation buffer
    pub confirm_password: String,
    /// Terms & conditions checkbox
    pub terms_accepted: bool,
    /// Field with input focus
    pub focus: RegisterField,
    /// Whether a registration request is in flight
    pub loading: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Whether the status is an error
    pub is_error: bool,
}

impl RegisterScreen {
    /// Create a new registration screen
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            terms_accepted: false,
            focus: RegisterField::Username,
            loading: false,
            status_message: None,
            is_error: false,
        }
    }

    /// Add a character to the focused field
    pub fn add_char(&mut self, c: char) {
        match self.focus {
            RegisterField::Username => self.username.push(c),
            RegisterField::Password => self.password.push(c),
            RegisterField::Confirm => self.confirm_password.push(c),
        }
    }

    /// Remove the last character from the focused field
    pub fn backspace(&mut self) {
        match self.focus {
            RegisterField::Username => {
                self.username.pop();
            }
            RegisterField::Password => {
                self.password.pop();
            }
            RegisterField::Confirm => {
                self.confirm_password.pop();
            }
        }
    }

    /// Move focus to the next field
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            RegisterField::Username => RegisterField::Password,
            RegisterField::Password => RegisterField::Confirm,
            RegisterField::Confirm => RegisterField::Username,
        };
    }

    /// Toggle the terms checkbox
    pub fn toggle_terms(&mut self) {
        self.terms_accepted = !self.terms_accepted;
    }

    /// The form as submitted to the API client
    pub fn form(&self) -> RegisterForm {
        RegisterForm {
            username: self.username.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
            terms_accepted: self.terms_accepted,
        }
    }

    /// Check preconditions locally; surfaces the failing field on error
    pub fn validate(&mut self) -> bool {
        match validate_registration(&self.form()) {
            Ok(()) => true,
            Err(e) => {
                self.status_message = Some(e.to_string());
                self.is_error = true;
                false
            }
        }
    }

    /// Enter the loading state for a submit
    pub fn start_submit(&mut self) {
        self.loading = true;
        self.is_error = false;
        self.status_message = Some("Creating account...".to_string());
    }

    /// Apply a failed registration
    pub fn apply_failure(&mut self, message: String) {
        self.loading = false;
        self.is_error = true;
        self.status_message = Some(message);
    }
}

impl Default for RegisterScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// One resolved slice of the dashboard expense chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartEntry {
    /// Category name
    pub name: String,
    /// Total spent
    pub amount: f64,
    /// Resolved display color (server-provided or random fallback)
    pub color: String,
}

/// Home dashboard screen state
///
/// Pure display state over the server's finance overview; replaced wholesale
/// by `apply_data`, never partially updated.
#[derive(Debug)]
pub struct DashboardScreen {
    /// Balance / income / expense aggregate
    pub overview: FinanceOverview,
    /// Full transaction history as served
    pub transactions: Vec<Transaction>,
    /// Expense breakdown with resolved colors
    pub chart: Vec<ChartEntry>,
    /// Whether the initial fetch batch is in flight
    pub loading: bool,
    /// Whether a manual refresh is in flight
    pub refreshing: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Whether the status is an error
    pub is_error: bool,
}

impl DashboardScreen {
    /// Create an empty dashboard
    pub fn new() -> Self {
        Self {
            overview: FinanceOverview::default(),
            transactions: Vec::new(),
            chart: Vec::new(),
            loading: false,
            refreshing: false,
            status_message: None,
            is_error: false,
        }
    }

    /// Enter the loading state for the initial fetch batch
    pub fn start_loading(&mut self) {
        self.loading = true;
        self.is_error = false;
        self.status_message = None;
    }

    /// Enter the refreshing state for a manual refresh
    pub fn start_refresh(&mut self) {
        self.refreshing = true;
        self.is_error = false;
        self.status_message = None;
    }

    /// Replace the view state with a fetched batch
    pub fn apply_data(&mut self, data: DashboardData) {
        self.overview = data.overview;
        self.transactions = data.transactions;
        self.chart = data
            .slices
            .iter()
            .map(|slice| ChartEntry {
                name: slice.name.clone(),
                amount: slice.amount,
                color: slice.display_color(),
            })
            .collect();
        self.loading = false;
        self.refreshing = false;
        self.is_error = false;
        self.status_message = None;
    }

    /// Surface a failed fetch batch; prior data is left untouched
    pub fn apply_failure(&mut self, message: String) {
        self.loading = false;
        self.refreshing = false;
        self.is_error = true;
        self.status_message = Some(message);
    }

    /// Surface a message without entering a loading state
    pub fn set_status(&mut self, message: String, is_error: bool) {
        self.status_message = Some(message);
        self.is_error = is_error;
    }

    /// The five most recent transactions, for the summary list
    pub fn recent_transactions(&self) -> &[Transaction] {
        let count = self.transactions.len().min(5);
        &self.transactions[..count]
    }
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Focusable fields on the add-transaction form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionField {
    /// Amount input
    Amount,
    /// Description input
    Description,
}

/// Add-transaction screen state
#[derive(Debug)]
pub struct AddTransactionScreen {
    /// Amount buffer (validated to parse as a finite number on submit)
    pub amount_input: String,
    /// Description buffer
    pub description_input: String,
    /// Income or expense
    pub kind: FlowKind,
    /// Categories of the current kind, fetched on entry
    pub categories: Vec<Category>,
    /// Index of the selected category
    pub selected_category: usize,
    /// Field with input focus
    pub focus: TransactionField,
    /// Whether the category list is being fetched
    pub loading_categories: bool,
    /// Whether a create request is in flight
    pub loading: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Whether the status is an error
    pub is_error: bool,
}

impl AddTransactionScreen {
    /// Create a new add-transaction screen (expense by default)
    pub fn new() -> Self {
        Self {
            amount_input: String::new(),
            description_input: String::new(),
            kind: FlowKind::Expense,
            categories: Vec::new(),
            selected_category: 0,
            focus: TransactionField::Amount,
            loading_categories: false,
            loading: false,
            status_message: None,
            is_error: false,
        }
    }

    /// Add a character to the focused field
    ///
    /// The amount field only accepts digits, a dot and a leading minus.
    pub fn add_char(&mut self, c: char) {
        match self.focus {
            TransactionField::Amount => {
                if c.is_ascii_digit() || c == '.' || (c == '-' && self.amount_input.is_empty()) {
                    self.amount_input.push(c);
                }
            }
            TransactionField::Description => self.description_input.push(c),
        }
    }

    /// Remove the last character from the focused field
    pub fn backspace(&mut self) {
        match self.focus {
            TransactionField::Amount => {
                self.amount_input.pop();
            }
            TransactionField::Description => {
                self.description_input.pop();
            }
        }
    }

    /// Move focus to the next field
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            TransactionField::Amount => TransactionField::Description,
            TransactionField::Description => TransactionField::Amount,
        };
    }

    /// Flip between expense and income; the category list must be reloaded
    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggle();
        self.categories.clear();
        self.selected_category = 0;
    }

    /// Select the next category
    pub fn next_category(&mut self) {
        if !self.categories.is_empty() {
            self.selected_category = (self.selected_category + 1) % self.categories.len();
        }
    }

    /// Select the previous category
    pub fn previous_category(&mut self) {
        if !self.categories.is_empty() {
            if self.selected_category > 0 {
                self.selected_category -= 1;
            } else {
                self.selected_category = self.categories.len() - 1;
            }
        }
    }

    /// Id of the selected category, if any
    pub fn selected_category_id(&self) -> Option<&str> {
        self.categories
            .get(self.selected_category)
            .map(|c| c.id.as_str())
    }

    /// The form as submitted to the API client
    pub fn input(&self) -> TransactionInput {
        TransactionInput {
            amount: self.amount_input.clone(),
            kind: self.kind,
            category_id: self.selected_category_id().unwrap_or("").to_string(),
            description: self.description_input.clone(),
        }
    }

    /// Check the form locally; surfaces a message and returns false on failure
    pub fn validate(&mut self) -> bool {
        match build_transaction_payload(&self.input()) {
            Ok(_) => true,
            Err(e) => {
                self.status_message = Some(e.to_string());
                self.is_error = true;
                false
            }
        }
    }

    /// Enter the loading state for a submit
    pub fn start_submit(&mut self) {
        self.loading = true;
        self.is_error = false;
        self.status_message = Some("Saving...".to_string());
    }

    /// Enter the loading state for the category fetch
    pub fn start_loading_categories(&mut self) {
        self.loading_categories = true;
    }

    /// Apply a fetched category list
    pub fn apply_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
        self.selected_category = 0;
        self.loading_categories = false;
    }

    /// Surface a failed category fetch
    pub fn apply_categories_failure(&mut self, message: String) {
        self.loading_categories = false;
        self.is_error = true;
        self.status_message = Some(message);
    }

    /// Apply a created transaction: clear the form, keep the category list
    pub fn apply_success(&mut self, transaction: &Transaction) {
        self.amount_input.clear();
        self.description_input.clear();
        self.loading = false;
        self.is_error = false;
        self.status_message = Some(format!("✓ Saved {} transaction", transaction.kind.as_str()));
    }

    /// Apply a failed create
    pub fn apply_failure(&mut self, message: String) {
        self.loading = false;
        self.is_error = true;
        self.status_message = Some(message);
    }
}

impl Default for AddTransactionScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Focusable fields on the add-category form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    /// Name input
    Name,
    /// Color input
    Color,
}

/// Add-category screen state
#[derive(Debug)]
pub struct AddCategoryScreen {
    /// Name buffer
    pub name_input: String,
    /// Color buffer (`#rrggbb`)
    pub color_input: String,
    /// Income or expense
    pub kind: FlowKind,
    /// Field with input focus
    pub focus: CategoryField,
    /// Whether a create request is in flight
    pub loading: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Whether the status is an error
    pub is_error: bool,
}

impl AddCategoryScreen {
    /// Create a new add-category screen
    pub fn new() -> Self {
        Self {
            name_input: String::new(),
            color_input: "#ff6600".to_string(),
            kind: FlowKind::Expense,
            focus: CategoryField::Name,
            loading: false,
            status_message: None,
            is_error: false,
        }
    }

    /// Add a character to the focused field
    pub fn add_char(&mut self, c: char) {
        match self.focus {
            CategoryField::Name => self.name_input.push(c),
            CategoryField::Color => self.color_input.push(c),
        }
    }

    /// Remove the last character from the focused field
    pub fn backspace(&mut self) {
        match self.focus {
            CategoryField::Name => {
                self.name_input.pop();
            }
            CategoryField::Color => {
                self.color_input.pop();
            }
        }
    }

    /// Move focus to the next field
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            CategoryField::Name => CategoryField::Color,
            CategoryField::Color => CategoryField::Name,
        };
    }

    /// Flip between expense and income
    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggle();
    }

    /// Check the form locally; the name must be non-empty
    pub fn validate(&mut self) -> bool {
        if self.name_input.trim().is_empty() {
            self.status_message = Some("Category name cannot be empty".to_string());
            self.is_error = true;
            return false;
        }
        true
    }

    /// Enter the loading state for a submit
    pub fn start_submit(&mut self) {
        self.loading = true;
        self.is_error = false;
        self.status_message = Some("Saving...".to_string());
    }

    /// Apply a created category: clear the name, keep kind and color
    pub fn apply_success(&mut self, category: &Category) {
        self.name_input.clear();
        self.loading = false;
        self.is_error = false;
        self.status_message = Some(format!("✓ Created category {}", category.name));
    }

    /// Apply a failed create
    pub fn apply_failure(&mut self, message: String) {
        self.loading = false;
        self.is_error = true;
        self.status_message = Some(message);
    }
}

impl Default for AddCategoryScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Advice (chat) screen state
///
/// Messages are in-memory only and discarded on navigation away.
#[derive(Debug)]
pub struct AdviceScreen {
    /// Input buffer for message composition
    pub input: String,
    /// Conversation so far, oldest first
    pub messages: Vec<ChatMessage>,
    /// Scroll offset for the message history
    pub scroll_offset: usize,
    /// Whether a send is in flight
    pub loading: bool,
}

impl AdviceScreen {
    /// Create a new advice screen with the assistant's greeting
    pub fn new() -> Self {
        Self {
            input: String::new(),
            messages: vec![ChatMessage::from_assistant(
                "Hi! Ask me anything about your finances.",
                chrono::Utc::now().format("%H:%M").to_string(),
            )],
            scroll_offset: 0,
            loading: false,
        }
    }

    /// Add a character to the input buffer
    pub fn add_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Remove the last character from the input buffer
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Scroll the history up
    pub fn scroll_up(&mut self) {
        if self.scroll_offset > 0 {
            self.scroll_offset -= 1;
        }
    }

    /// Scroll the history down
    pub fn scroll_down(&mut self, max_offset: usize) {
        if self.scroll_offset < max_offset {
            self.scroll_offset += 1;
        }
    }

    /// Append the typed message, clear the input and enter the loading state
    ///
    /// Returns the message text to send, or `None` when the input is blank.
    pub fn push_user_message(&mut self) -> Option<String> {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::from_user(text.clone()));
        self.input.clear();
        self.loading = true;
        Some(text)
    }

    /// Apply a reply from the advisor endpoint
    pub fn apply_reply(&mut self, reply: ChatReply) {
        self.messages
            .push(ChatMessage::from_assistant(reply.text, reply.time));
        self.loading = false;
    }

    /// Apply a failed send: substitute the canned local reply
    pub fn apply_failure(&mut self) {
        self.messages.push(ChatMessage::from_assistant(
            FALLBACK_REPLY,
            chrono::Utc::now().format("%H:%M").to_string(),
        ));
        self.loading = false;
    }
}

impl Default for AdviceScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Profile screen state
#[derive(Debug)]
pub struct ProfileScreen {
    /// Menu entries
    pub items: Vec<ProfileItem>,
    /// Currently selected entry
    pub selected_index: usize,
    /// Status message
    pub status_message: Option<String>,
}

impl ProfileScreen {
    /// Create a new profile screen
    pub fn new() -> Self {
        Self {
            items: ProfileItem::all(),
            selected_index: 0,
            status_message: None,
        }
    }

    /// Move to the next entry
    pub fn next(&mut self) {
        self.selected_index = (self.selected_index + 1) % self.items.len();
    }

    /// Move to the previous entry
    pub fn previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else {
            self.selected_index = self.items.len() - 1;
        }
    }

    /// The currently selected entry
    pub fn selected_item(&self) -> ProfileItem {
        self.items[self.selected_index]
    }

    /// Set the status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}

impl Default for ProfileScreen {
    fn default() -> Self {
        Self::new()
    }
}
