//! Main application state and orchestration
//!
//! `App` owns the navigation state, the token store and the API client. API
//! calls run on a background thread with its own tokio runtime; the event
//! loop polls `poll_pending()` every tick and the completion is applied to
//! whichever screen triggered it. The loading flag of the triggering screen
//! is cleared on every completion path, success or failure.

use crate::api::{ApiClient, ChatReply, DashboardData};
use crate::config::Config;
use crate::models::{Category, Transaction};
use crate::storage::TokenStore;
use crate::tui::screens::*;
use crate::tui::types::{ProfileItem, Screen, Tab};
use crate::Result;
use std::future::Future;
use std::thread::JoinHandle;

/// The single in-flight background request, tagged by the triggering action
pub enum PendingRequest {
    /// Sign-in; carries the issued token on success
    Login(JoinHandle<Result<String>>),
    /// Account creation
    Register(JoinHandle<Result<()>>),
    /// Dashboard fetch batch
    Dashboard(JoinHandle<Result<DashboardData>>),
    /// Category list for the add-transaction screen
    Categories(JoinHandle<Result<Vec<Category>>>),
    /// Category creation
    CreateCategory(JoinHandle<Result<Category>>),
    /// Transaction creation
    CreateTransaction(JoinHandle<Result<Transaction>>),
    /// Chat message send
    Chat(JoinHandle<Result<ChatReply>>),
}

/// Application state
pub struct App {
    /// Current screen
    pub current_screen: Screen,
    /// Active tab of the nested tab set
    pub active_tab: Tab,
    /// Client configuration, read once at startup
    pub config: Config,
    /// Should quit
    pub should_quit: bool,
    /// Onboarding screen (when active)
    pub onboarding_screen: Option<OnboardingScreen>,
    /// Login screen (when active)
    pub login_screen: Option<LoginScreen>,
    /// Register screen (when active)
    pub register_screen: Option<RegisterScreen>,
    /// Home dashboard screen (when active)
    pub dashboard_screen: Option<DashboardScreen>,
    /// Add-transaction screen (when active)
    pub add_transaction_screen: Option<AddTransactionScreen>,
    /// Add-category screen (when active)
    pub add_category_screen: Option<AddCategoryScreen>,
    /// Advice chat screen (when active)
    pub advice_screen: Option<AdviceScreen>,
    /// Profile screen (when active)
    pub profile_screen: Option<ProfileScreen>,
    /// API client
    api: ApiClient,
    /// Persisted token store
    token_store: TokenStore,
    /// In-flight background request, at most one at a time
    pending: Option<PendingRequest>,
}

impl App {
    /// Create the application with production configuration and storage
    ///
    /// Loads `config.json` (defaults when missing) and opens the token
    /// database under `./app_data/`.
    pub fn new() -> Result<Self> {
        let config = Config::load("config.json")?;
        let token_store = TokenStore::new_with_default_path()?;
        Self::with_parts(config, token_store)
    }

    /// Create the application from explicit parts (used by tests)
    pub fn with_parts(config: Config, token_store: TokenStore) -> Result<Self> {
        let api = ApiClient::new(&config);
        let has_token = token_store.get()?.is_some();

        let mut app = Self {
            current_screen: Screen::Onboarding,
            active_tab: Tab::Home,
            config,
            should_quit: false,
            onboarding_screen: None,
            login_screen: None,
            register_screen: None,
            dashboard_screen: None,
            add_transaction_screen: None,
            add_category_screen: None,
            advice_screen: None,
            profile_screen: None,
            api,
            token_store,
            pending: None,
        };

        // A stored token skips straight to the dashboard; otherwise the
        // onboarding deck leads into the login form.
        if has_token {
            app.show_home();
        } else {
            app.show_onboarding();
        }

        Ok(app)
    }

    /// Access the token store (read-only view for callers and tests)
    pub fn token_store(&self) -> &TokenStore {
        &self.token_store
    }

    /// Whether a background request is in flight
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    // ========== Navigation ==========

    /// Show the onboarding deck
    pub fn show_onboarding(&mut self) {
        self.onboarding_screen = Some(OnboardingScreen::new());
        self.current_screen = Screen::Onboarding;
    }

    /// Show the login form
    pub fn show_login(&mut self) {
        self.show_login_with(LoginScreen::new());
    }

    fn show_login_with(&mut self, screen: LoginScreen) {
        self.login_screen = Some(screen);
        self.register_screen = None;
        self.dashboard_screen = None;
        self.add_transaction_screen = None;
        self.add_category_screen = None;
        self.advice_screen = None;
        self.profile_screen = None;
        self.current_screen = Screen::Login;
    }

    /// Show the registration form
    pub fn show_register(&mut self) {
        self.register_screen = Some(RegisterScreen::new());
        self.current_screen = Screen::Register;
    }

    /// Show the home dashboard and trigger the fetch batch
    pub fn show_home(&mut self) {
        if self.dashboard_screen.is_none() {
            self.dashboard_screen = Some(DashboardScreen::new());
        }
        self.current_screen = Screen::Home;
        self.active_tab = Tab::Home;
        self.fetch_dashboard(false);
    }

    /// Show the advice chat screen
    pub fn show_advice(&mut self) {
        // Chat history is screen-scoped: a fresh visit starts a fresh session
        self.advice_screen = Some(AdviceScreen::new());
        self.current_screen = Screen::Advice;
        self.active_tab = Tab::Advice;
    }

    /// Show the profile screen
    pub fn show_profile(&mut self) {
        if self.profile_screen.is_none() {
            self.profile_screen = Some(ProfileScreen::new());
        }
        self.current_screen = Screen::Profile;
        self.active_tab = Tab::Profile;
    }

    /// Show the add-transaction form and load the category picker
    pub fn show_add_transaction(&mut self) {
        self.add_transaction_screen = Some(AddTransactionScreen::new());
        self.current_screen = Screen::AddTransaction;
        self.active_tab = Tab::AddNew;
        self.load_categories();
    }

    /// Show the add-category form
    pub fn show_add_category(&mut self) {
        self.add_category_screen = Some(AddCategoryScreen::new());
        self.current_screen = Screen::AddCategory;
    }

    /// Switch to a tab
    pub fn select_tab(&mut self, tab: Tab) {
        match tab {
            Tab::Home => self.show_home(),
            Tab::Advice => self.show_advice(),
            Tab::AddNew => self.show_add_transaction(),
            Tab::Profile => self.show_profile(),
        }
    }

    /// Leave a modal form back to the home dashboard
    pub fn back_to_home(&mut self) {
        self.add_transaction_screen = None;
        self.add_category_screen = None;
        self.show_home();
    }

    // ========== Actions ==========

    /// Advance the onboarding deck; finishing routes to the login form
    pub fn advance_onboarding(&mut self) {
        let done = match &mut self.onboarding_screen {
            Some(screen) => screen.next(),
            None => true,
        };
        if done {
            self.onboarding_screen = None;
            self.show_login();
        }
    }

    /// Skip onboarding straight to the login form
    pub fn skip_onboarding(&mut self) {
        self.onboarding_screen = None;
        self.show_login();
    }

    /// Submit the login form
    pub fn submit_login(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let Some(screen) = &mut self.login_screen else {
            return;
        };
        if !screen.validate() {
            return;
        }
        screen.start_submit();

        let api = self.api.clone();
        let username = screen.username.clone();
        let password = screen.password.clone();
        self.pending = Some(PendingRequest::Login(spawn_request(async move {
            api.login(&username, &password).await
        })));
    }

    /// Submit the registration form
    pub fn submit_register(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let Some(screen) = &mut self.register_screen else {
            return;
        };
        if !screen.validate() {
            return;
        }
        screen.start_submit();

        let api = self.api.clone();
        let form = screen.form();
        self.pending = Some(PendingRequest::Register(spawn_request(async move {
            api.register(&form).await
        })));
    }

    /// Fetch or refresh the dashboard batch
    ///
    /// With no stored token this performs zero network calls and leaves the
    /// prior view state untouched; a storage fault is surfaced distinctly.
    pub fn fetch_dashboard(&mut self, manual_refresh: bool) {
        if self.pending.is_some() {
            return;
        }
        let Some(screen) = &mut self.dashboard_screen else {
            return;
        };

        let token = match self.token_store.get() {
            Ok(Some(token)) => token,
            Ok(None) => {
                screen.set_status("You need to sign in to load your data".to_string(), true);
                return;
            }
            Err(e) => {
                screen.set_status(e.to_string(), true);
                return;
            }
        };

        if manual_refresh {
            screen.start_refresh();
        } else {
            screen.start_loading();
        }

        let api = self.api.clone();
        self.pending = Some(PendingRequest::Dashboard(spawn_request(async move {
            api.fetch_dashboard(Some(&token)).await
        })));
    }

    /// Load the category picker for the add-transaction screen
    ///
    /// If another request holds the slot, the screen stays in its loading
    /// state and the fetch is retried from `poll_pending` once the slot
    /// frees up.
    pub fn load_categories(&mut self) {
        let Some(screen) = &mut self.add_transaction_screen else {
            return;
        };
        screen.start_loading_categories();

        if self.pending.is_some() {
            return;
        }

        let kind = screen.kind;
        let token = self.read_token();
        let api = self.api.clone();
        self.pending = Some(PendingRequest::Categories(spawn_request(async move {
            api.list_categories(token.as_deref(), kind).await
        })));
    }

    /// Flip the transaction kind and reload matching categories
    pub fn toggle_transaction_kind(&mut self) {
        if let Some(screen) = &mut self.add_transaction_screen {
            screen.toggle_kind();
        }
        self.load_categories();
    }

    /// Submit the add-transaction form
    pub fn submit_transaction(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let Some(screen) = &mut self.add_transaction_screen else {
            return;
        };
        if !screen.validate() {
            return;
        }
        screen.start_submit();

        let input = screen.input();
        let token = self.read_token();
        let api = self.api.clone();
        self.pending = Some(PendingRequest::CreateTransaction(spawn_request(
            async move { api.create_transaction(token.as_deref(), &input).await },
        )));
    }

    /// Submit the add-category form
    pub fn submit_category(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let Some(screen) = &mut self.add_category_screen else {
            return;
        };
        if !screen.validate() {
            return;
        }
        screen.start_submit();

        let name = screen.name_input.clone();
        let color = screen.color_input.clone();
        let kind = screen.kind;
        let token = self.read_token();
        let api = self.api.clone();
        self.pending = Some(PendingRequest::CreateCategory(spawn_request(async move {
            api.create_category(token.as_deref(), &name, &color, kind).await
        })));
    }

    /// Send the typed chat message
    pub fn send_chat_message(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let Some(screen) = &mut self.advice_screen else {
            return;
        };
        let Some(text) = screen.push_user_message() else {
            return;
        };

        let token = self.read_token();
        let api = self.api.clone();
        self.pending = Some(PendingRequest::Chat(spawn_request(async move {
            api.send_chat_message(token.as_deref(), &text).await
        })));
    }

    /// Activate the selected profile menu entry
    pub fn select_profile_item(&mut self) {
        let Some(screen) = &mut self.profile_screen else {
            return;
        };
        match screen.selected_item() {
            ProfileItem::Logout => self.logout(),
            item => {
                screen.set_status(format!("{} is not available yet", item.label()));
            }
        }
    }

    /// Clear the stored token and return to the login form
    pub fn logout(&mut self) {
        match self.token_store.clear() {
            Ok(()) => {
                tracing::info!("Cleared stored session token");
                self.show_login_with(LoginScreen::with_notice("Signed out".to_string()));
            }
            Err(e) => {
                if let Some(screen) = &mut self.profile_screen {
                    screen.set_status(e.to_string());
                }
            }
        }
    }

    // ========== Background request completion ==========

    /// Poll the in-flight request and apply its outcome (non-blocking)
    ///
    /// Returns true if a request completed this call. Every completion path
    /// clears the triggering screen's loading flag.
    pub fn poll_pending(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };

        match pending {
            PendingRequest::Login(handle) => {
                if !handle.is_finished() {
                    self.pending = Some(PendingRequest::Login(handle));
                    return false;
                }
                match join_outcome(handle) {
                    Ok(token) => self.complete_login(token),
                    Err(message) => {
                        if let Some(screen) = &mut self.login_screen {
                            screen.apply_failure(message);
                        }
                    }
                }
            }
            PendingRequest::Register(handle) => {
                if !handle.is_finished() {
                    self.pending = Some(PendingRequest::Register(handle));
                    return false;
                }
                match join_outcome(handle) {
                    Ok(()) => {
                        self.show_login_with(LoginScreen::with_notice(
                            "Account created, you can sign in now".to_string(),
                        ));
                    }
                    Err(message) => {
                        if let Some(screen) = &mut self.register_screen {
                            screen.apply_failure(message);
                        }
                    }
                }
            }
            PendingRequest::Dashboard(handle) => {
                if !handle.is_finished() {
                    self.pending = Some(PendingRequest::Dashboard(handle));
                    return false;
                }
                let outcome = join_outcome(handle);
                if let Some(screen) = &mut self.dashboard_screen {
                    match outcome {
                        Ok(data) => screen.apply_data(data),
                        // One generic notice, never partial data
                        Err(message) => {
                            tracing::warn!("Dashboard fetch failed: {}", message);
                            screen.apply_failure("Could not load your data".to_string());
                        }
                    }
                }
            }
            PendingRequest::Categories(handle) => {
                if !handle.is_finished() {
                    self.pending = Some(PendingRequest::Categories(handle));
                    return false;
                }
                let outcome = join_outcome(handle);
                if let Some(screen) = &mut self.add_transaction_screen {
                    match outcome {
                        Ok(categories) => screen.apply_categories(categories),
                        Err(message) => screen.apply_categories_failure(message),
                    }
                }
            }
            PendingRequest::CreateCategory(handle) => {
                if !handle.is_finished() {
                    self.pending = Some(PendingRequest::CreateCategory(handle));
                    return false;
                }
                let outcome = join_outcome(handle);
                if let Some(screen) = &mut self.add_category_screen {
                    match outcome {
                        Ok(category) => screen.apply_success(&category),
                        Err(message) => screen.apply_failure(message),
                    }
                }
            }
            PendingRequest::CreateTransaction(handle) => {
                if !handle.is_finished() {
                    self.pending = Some(PendingRequest::CreateTransaction(handle));
                    return false;
                }
                let outcome = join_outcome(handle);
                if let Some(screen) = &mut self.add_transaction_screen {
                    match outcome {
                        Ok(transaction) => screen.apply_success(&transaction),
                        Err(message) => screen.apply_failure(message),
                    }
                }
            }
            PendingRequest::Chat(handle) => {
                if !handle.is_finished() {
                    self.pending = Some(PendingRequest::Chat(handle));
                    return false;
                }
                let outcome = join_outcome(handle);
                if let Some(screen) = &mut self.advice_screen {
                    match outcome {
                        Ok(reply) => screen.apply_reply(reply),
                        // Substitute the canned local reply, never the raw error
                        Err(message) => {
                            tracing::warn!("Chat send failed: {}", message);
                            screen.apply_failure();
                        }
                    }
                }
            }
        }

        // Run a deferred category fetch now that the slot is free
        if self.pending.is_none()
            && self
                .add_transaction_screen
                .as_ref()
                .is_some_and(|screen| screen.loading_categories)
        {
            self.load_categories();
        }

        true
    }

    /// Persist the issued token and advance to the dashboard
    pub(crate) fn complete_login(&mut self, token: String) {
        if let Err(e) = self.token_store.set(&token) {
            if let Some(screen) = &mut self.login_screen {
                screen.apply_failure(e.to_string());
            }
            return;
        }
        if let Some(screen) = &mut self.login_screen {
            screen.apply_success();
        }
        self.login_screen = None;
        self.show_home();
    }

    /// Read the stored token, treating a storage fault as "absent" with a log
    ///
    /// Used on paths where the API client's own "not logged in" error is the
    /// right user-facing outcome either way. Paths that must distinguish the
    /// two (dashboard refresh) read the store directly.
    fn read_token(&self) -> Option<String> {
        match self.token_store.get() {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("Token store read failed: {}", e);
                None
            }
        }
    }
}

/// Run an API future on a background thread with its own tokio runtime
fn spawn_request<T, F>(fut: F) -> JoinHandle<Result<T>>
where
    T: Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
{
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
        rt.block_on(fut)
    })
}

/// Join a finished request, folding panics into an error message
fn join_outcome<T>(handle: JoinHandle<Result<T>>) -> std::result::Result<T, String> {
    match handle.join() {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("Request worker panicked".to_string()),
    }
}
