//! Navigation types: screens, tabs, profile menu entries

/// Application screens
///
/// One stack with a nested tab set: `Home`, `Advice` and `Profile` are tab
/// roots, `AddTransaction` is opened from the tab bar's center button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Intro slide deck shown before first login
    Onboarding,
    /// Sign-in form
    Login,
    /// Account creation form
    Register,
    /// Home dashboard: balance, chart, recent transactions
    Home,
    /// New transaction form (modal over the tabs)
    AddTransaction,
    /// New category form
    AddCategory,
    /// Chatbot-style advice screen
    Advice,
    /// Account / profile screen
    Profile,
}

/// Entries of the bottom tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Home dashboard
    Home,
    /// Advice chat
    Advice,
    /// Center "+" button opening the add-transaction form
    AddNew,
    /// Profile screen
    Profile,
}

impl Tab {
    /// All tabs in display order
    pub fn all() -> Vec<Self> {
        vec![Self::Home, Self::Advice, Self::AddNew, Self::Profile]
    }

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            Self::Home => "Home",
            Self::Advice => "Advice",
            Self::AddNew => "+",
            Self::Profile => "Profile",
        }
    }

    /// The screen this tab routes to
    pub fn screen(&self) -> Screen {
        match self {
            Self::Home => Screen::Home,
            Self::Advice => Screen::Advice,
            Self::AddNew => Screen::AddTransaction,
            Self::Profile => Screen::Profile,
        }
    }
}

/// Entries of the profile screen menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileItem {
    /// Linked accounts and wallets
    Wallet,
    /// Transaction history
    History,
    /// Account settings
    Settings,
    /// Support and feedback
    Help,
    /// Sign out and clear the stored token
    Logout,
}

impl ProfileItem {
    /// All menu entries in display order
    pub fn all() -> Vec<Self> {
        vec![
            Self::Wallet,
            Self::History,
            Self::Settings,
            Self::Help,
            Self::Logout,
        ]
    }

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            Self::Wallet => "Wallet",
            Self::History => "Order history",
            Self::Settings => "Settings",
            Self::Help => "Help",
            Self::Logout => "Log out",
        }
    }

    /// Secondary description line
    pub fn description(&self) -> &str {
        match self {
            Self::Wallet => "Manage linked bank accounts",
            Self::History => "Your past transactions",
            Self::Settings => "Account settings",
            Self::Help => "Support and feedback",
            Self::Logout => "Sign out of your account",
        }
    }
}
