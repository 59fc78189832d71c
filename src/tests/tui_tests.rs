use crate::api::{ChatReply, DashboardData};
use crate::config::Config;
use crate::models::{ExpenseSlice, FinanceOverview, FlowKind, Transaction};
use crate::storage::TokenStore;
use crate::tui::app::App;
use crate::tui::screens::*;
use crate::tui::types::{ProfileItem, Screen, Tab};

fn offline_config() -> Config {
    Config {
        base_url: "http://127.0.0.1:1/api/".to_string(),
    }
}

fn sample_transaction(id: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: "2024-05-01".to_string(),
        description: "Lunch".to_string(),
        amount: 12.5,
        kind: FlowKind::Expense,
        category: Some("Food".to_string()),
    }
}

fn sample_data(transaction_count: usize) -> DashboardData {
    DashboardData {
        overview: FinanceOverview {
            balance: 100.0,
            income: 250.0,
            expense: 150.0,
        },
        transactions: (0..transaction_count)
            .map(|i| sample_transaction(&i.to_string()))
            .collect(),
        slices: vec![ExpenseSlice {
            name: "Food".to_string(),
            amount: 150.0,
            color: None,
        }],
    }
}

// ========== Onboarding ==========

#[test]
fn test_onboarding_has_three_slides() {
    let screen = OnboardingScreen::new();
    assert_eq!(screen.slides.len(), 3);
    assert_eq!(screen.current_index, 0);
}

#[test]
fn test_onboarding_next_finishes_on_last_slide() {
    let mut screen = OnboardingScreen::new();

    assert!(!screen.next());
    assert!(!screen.next());
    assert!(screen.is_last());
    assert!(screen.next());
}

// ========== Login screen ==========

#[test]
fn test_login_screen_input_editing() {
    let mut screen = LoginScreen::new();

    screen.add_char('m');
    screen.add_char('e');
    assert_eq!(screen.username, "me");

    screen.next_field();
    screen.add_char('p');
    screen.add_char('w');
    screen.backspace();
    assert_eq!(screen.password, "p");
}

#[test]
fn test_login_screen_validate_requires_both_fields() {
    let mut screen = LoginScreen::new();
    assert!(!screen.validate());
    assert!(screen.is_error);

    screen.username = "user@example.com".to_string();
    assert!(!screen.validate());

    screen.password = "secret".to_string();
    assert!(screen.validate());
}

#[test]
fn test_login_screen_loading_cleared_on_success() {
    let mut screen = LoginScreen::new();
    screen.start_submit();
    assert!(screen.loading);

    screen.apply_success();
    assert!(!screen.loading);
    assert!(!screen.is_error);
}

#[test]
fn test_login_screen_loading_cleared_on_failure() {
    let mut screen = LoginScreen::new();
    screen.start_submit();

    screen.apply_failure("bad credentials".to_string());
    assert!(!screen.loading);
    assert!(screen.is_error);
    assert_eq!(screen.status_message.as_deref(), Some("bad credentials"));
}

#[test]
fn test_login_screen_with_notice() {
    let screen = LoginScreen::with_notice("Account created".to_string());
    assert_eq!(screen.status_message.as_deref(), Some("Account created"));
    assert!(!screen.is_error);
}

// ========== Register screen ==========

#[test]
fn test_register_screen_mismatch_fails_validation_without_loading() {
    let mut screen = RegisterScreen::new();
    screen.username = "user@example.com".to_string();
    screen.password = "one".to_string();
    screen.confirm_password = "two".to_string();
    screen.terms_accepted = true;

    assert!(!screen.validate());
    assert!(!screen.loading);
    assert_eq!(screen.status_message.as_deref(), Some("Passwords do not match"));
}

#[test]
fn test_register_screen_valid_form_passes() {
    let mut screen = RegisterScreen::new();
    screen.username = "user@example.com".to_string();
    screen.password = "secret".to_string();
    screen.confirm_password = "secret".to_string();
    screen.toggle_terms();

    assert!(screen.validate());
}

#[test]
fn test_register_screen_failure_clears_loading() {
    let mut screen = RegisterScreen::new();
    screen.start_submit();

    screen.apply_failure("username taken".to_string());
    assert!(!screen.loading);
    assert!(screen.is_error);
}

// ========== Dashboard screen ==========

#[test]
fn test_dashboard_apply_data_replaces_state_wholesale() {
    let mut screen = DashboardScreen::new();
    screen.start_loading();
    assert!(screen.loading);

    screen.apply_data(sample_data(2));

    assert!(!screen.loading);
    assert_eq!(screen.overview.balance, 100.0);
    assert_eq!(screen.transactions.len(), 2);
    assert_eq!(screen.chart.len(), 1);
    // Missing server color gets a generated fallback
    assert!(screen.chart[0].color.starts_with('#'));
}

#[test]
fn test_dashboard_failure_keeps_prior_data() {
    let mut screen = DashboardScreen::new();
    screen.apply_data(sample_data(2));

    screen.start_refresh();
    screen.apply_failure("Could not load your data".to_string());

    assert!(!screen.refreshing);
    assert!(screen.is_error);
    assert_eq!(screen.transactions.len(), 2);
    assert_eq!(screen.overview.balance, 100.0);
}

#[test]
fn test_dashboard_recent_transactions_caps_at_five() {
    let mut screen = DashboardScreen::new();
    screen.apply_data(sample_data(8));

    let recent = screen.recent_transactions();
    assert_eq!(recent.len(), 5);
    // Server order is preserved, so these are the newest entries
    assert_eq!(recent[0].id, "0");
}

// ========== Add-transaction screen ==========

#[test]
fn test_add_transaction_amount_rejects_letters() {
    let mut screen = AddTransactionScreen::new();

    for c in "12a.5x".chars() {
        screen.add_char(c);
    }
    assert_eq!(screen.amount_input, "12.5");
}

#[test]
fn test_add_transaction_minus_only_leading() {
    let mut screen = AddTransactionScreen::new();

    screen.add_char('-');
    screen.add_char('5');
    screen.add_char('-');
    assert_eq!(screen.amount_input, "-5");
}

#[test]
fn test_add_transaction_toggle_kind_clears_categories() {
    let mut screen = AddTransactionScreen::new();
    screen.apply_categories(vec![crate::models::Category {
        id: "3".to_string(),
        name: "Food".to_string(),
        color: "#ff6600".to_string(),
        kind: FlowKind::Expense,
    }]);
    assert_eq!(screen.selected_category_id(), Some("3"));

    screen.toggle_kind();
    assert_eq!(screen.kind, FlowKind::Income);
    assert!(screen.categories.is_empty());
    assert_eq!(screen.selected_category_id(), None);
}

#[test]
fn test_add_transaction_validate_requires_numeric_amount() {
    let mut screen = AddTransactionScreen::new();
    screen.amount_input = "abc".to_string();

    assert!(!screen.validate());
    assert!(screen.is_error);
    assert!(!screen.loading);
}

#[test]
fn test_add_transaction_success_clears_form_keeps_categories() {
    let mut screen = AddTransactionScreen::new();
    screen.apply_categories(vec![crate::models::Category {
        id: "3".to_string(),
        name: "Food".to_string(),
        color: "#ff6600".to_string(),
        kind: FlowKind::Expense,
    }]);
    screen.amount_input = "12.5".to_string();
    screen.description_input = "Lunch".to_string();
    screen.start_submit();

    screen.apply_success(&sample_transaction("9"));

    assert!(!screen.loading);
    assert!(screen.amount_input.is_empty());
    assert!(screen.description_input.is_empty());
    assert_eq!(screen.categories.len(), 1);
}

#[test]
fn test_add_transaction_failure_clears_loading() {
    let mut screen = AddTransactionScreen::new();
    screen.start_submit();

    screen.apply_failure("Request failed".to_string());
    assert!(!screen.loading);
    assert!(screen.is_error);
}

#[test]
fn test_add_transaction_category_selection_wraps() {
    let mut screen = AddTransactionScreen::new();
    let category = |id: &str| crate::models::Category {
        id: id.to_string(),
        name: id.to_string(),
        color: "#ff6600".to_string(),
        kind: FlowKind::Expense,
    };
    screen.apply_categories(vec![category("1"), category("2")]);

    screen.next_category();
    assert_eq!(screen.selected_category_id(), Some("2"));
    screen.next_category();
    assert_eq!(screen.selected_category_id(), Some("1"));
    screen.previous_category();
    assert_eq!(screen.selected_category_id(), Some("2"));
}

// ========== Add-category screen ==========

#[test]
fn test_add_category_validate_requires_name() {
    let mut screen = AddCategoryScreen::new();
    assert!(!screen.validate());

    screen.name_input = "Food".to_string();
    assert!(screen.validate());
}

#[test]
fn test_add_category_success_clears_name_keeps_color() {
    let mut screen = AddCategoryScreen::new();
    screen.name_input = "Food".to_string();
    screen.start_submit();

    screen.apply_success(&crate::models::Category {
        id: "3".to_string(),
        name: "Food".to_string(),
        color: "#ff6600".to_string(),
        kind: FlowKind::Expense,
    });

    assert!(!screen.loading);
    assert!(screen.name_input.is_empty());
    assert_eq!(screen.color_input, "#ff6600");
}

// ========== Advice screen ==========

#[test]
fn test_advice_screen_opens_with_greeting() {
    let screen = AdviceScreen::new();
    assert_eq!(screen.messages.len(), 1);
    assert!(screen.messages[0].is_ai);
}

#[test]
fn test_advice_blank_input_is_not_sent() {
    let mut screen = AdviceScreen::new();
    screen.input = "   ".to_string();

    assert_eq!(screen.push_user_message(), None);
    assert_eq!(screen.messages.len(), 1);
    assert!(!screen.loading);
}

#[test]
fn test_advice_push_user_message_and_reply() {
    let mut screen = AdviceScreen::new();
    screen.input = "How much did I spend?".to_string();

    let sent = screen.push_user_message().unwrap();
    assert_eq!(sent, "How much did I spend?");
    assert!(screen.loading);
    assert!(screen.input.is_empty());

    screen.apply_reply(ChatReply {
        text: "150 this month.".to_string(),
        time: "10:00".to_string(),
    });
    assert!(!screen.loading);
    assert_eq!(screen.messages.len(), 3);
    assert!(screen.messages[2].is_ai);
}

#[test]
fn test_advice_failure_substitutes_fallback_reply() {
    let mut screen = AdviceScreen::new();
    screen.input = "hello".to_string();
    screen.push_user_message().unwrap();

    screen.apply_failure();

    assert!(!screen.loading);
    let last = screen.messages.last().unwrap();
    assert!(last.is_ai);
    assert_eq!(last.text, FALLBACK_REPLY);
}

// ========== Profile screen ==========

#[test]
fn test_profile_navigation_wraps() {
    let mut screen = ProfileScreen::new();
    assert_eq!(screen.selected_item(), ProfileItem::Wallet);

    screen.previous();
    assert_eq!(screen.selected_item(), ProfileItem::Logout);
    screen.next();
    assert_eq!(screen.selected_item(), ProfileItem::Wallet);
}

// ========== Navigation types ==========

#[test]
fn test_tab_order_and_routing() {
    let tabs = Tab::all();
    assert_eq!(tabs, vec![Tab::Home, Tab::Advice, Tab::AddNew, Tab::Profile]);
    assert_eq!(Tab::AddNew.screen(), Screen::AddTransaction);
    assert_eq!(Tab::AddNew.label(), "+");
}

// ========== App orchestration ==========

#[test]
fn test_app_starts_on_onboarding_without_token() {
    let store = TokenStore::new_in_memory().unwrap();
    let app = App::with_parts(offline_config(), store).unwrap();

    assert_eq!(app.current_screen, Screen::Onboarding);
    assert!(app.onboarding_screen.is_some());
}

#[test]
fn test_app_starts_on_home_with_stored_token() {
    let store = TokenStore::new_in_memory().unwrap();
    store.set("stored-token").unwrap();

    let app = App::with_parts(offline_config(), store).unwrap();
    assert_eq!(app.current_screen, Screen::Home);
    assert!(app.dashboard_screen.is_some());
}

#[test]
fn test_app_onboarding_flow_ends_at_login() {
    let store = TokenStore::new_in_memory().unwrap();
    let mut app = App::with_parts(offline_config(), store).unwrap();

    app.advance_onboarding();
    app.advance_onboarding();
    app.advance_onboarding();

    assert_eq!(app.current_screen, Screen::Login);
    assert!(app.login_screen.is_some());
    assert!(app.onboarding_screen.is_none());
}

#[test]
fn test_app_skip_onboarding_goes_to_login() {
    let store = TokenStore::new_in_memory().unwrap();
    let mut app = App::with_parts(offline_config(), store).unwrap();

    app.skip_onboarding();
    assert_eq!(app.current_screen, Screen::Login);
}

#[test]
fn test_app_submit_login_with_invalid_form_stays_local() {
    let store = TokenStore::new_in_memory().unwrap();
    let mut app = App::with_parts(offline_config(), store).unwrap();
    app.skip_onboarding();

    app.submit_login();

    assert!(!app.has_pending());
    let screen = app.login_screen.as_ref().unwrap();
    assert!(!screen.loading);
    assert!(screen.is_error);
}

#[test]
fn test_app_dashboard_fetch_without_token_makes_no_request() {
    let store = TokenStore::new_in_memory().unwrap();
    let mut app = App::with_parts(offline_config(), store).unwrap();

    app.show_home();

    // No token stored: nothing in flight, view state untouched, just a notice
    assert!(!app.has_pending());
    let screen = app.dashboard_screen.as_ref().unwrap();
    assert!(!screen.loading);
    assert!(!screen.refreshing);
    assert!(screen.transactions.is_empty());
    assert!(screen.status_message.is_some());
}

#[test]
fn test_app_complete_login_stores_token_and_routes_home() {
    let store = TokenStore::new_in_memory().unwrap();
    let mut app = App::with_parts(offline_config(), store).unwrap();
    app.skip_onboarding();

    app.complete_login("abc".to_string());

    assert_eq!(app.token_store().get().unwrap(), Some("abc".to_string()));
    assert_eq!(app.current_screen, Screen::Home);
    assert!(app.login_screen.is_none());
}

#[test]
fn test_app_category_fetch_deferred_while_another_request_is_in_flight() {
    let store = TokenStore::new_in_memory().unwrap();
    store.set("stored-token").unwrap();
    // Startup fetches the dashboard, occupying the request slot
    let mut app = App::with_parts(offline_config(), store).unwrap();
    assert!(app.has_pending());

    app.show_add_transaction();
    assert!(app.add_transaction_screen.as_ref().unwrap().loading_categories);

    // Once the dashboard request completes, the category fetch takes the slot
    let mut completed = false;
    for _ in 0..200 {
        if app.poll_pending() {
            completed = true;
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }
    assert!(completed);
    assert!(app.has_pending());
    assert!(app.add_transaction_screen.as_ref().unwrap().loading_categories);
}

#[test]
fn test_app_logout_clears_token_and_returns_to_login() {
    let store = TokenStore::new_in_memory().unwrap();
    store.set("stored-token").unwrap();
    let mut app = App::with_parts(offline_config(), store).unwrap();

    app.logout();

    assert_eq!(app.token_store().get().unwrap(), None);
    assert_eq!(app.current_screen, Screen::Login);
}

#[test]
fn test_app_select_tab_routes_to_screen() {
    let store = TokenStore::new_in_memory().unwrap();
    let mut app = App::with_parts(offline_config(), store).unwrap();

    app.select_tab(Tab::Advice);
    assert_eq!(app.current_screen, Screen::Advice);
    assert_eq!(app.active_tab, Tab::Advice);

    app.select_tab(Tab::Profile);
    assert_eq!(app.current_screen, Screen::Profile);
}

#[test]
fn test_app_send_blank_chat_message_makes_no_request() {
    let store = TokenStore::new_in_memory().unwrap();
    let mut app = App::with_parts(offline_config(), store).unwrap();
    app.select_tab(Tab::Advice);

    app.send_chat_message();

    assert!(!app.has_pending());
    assert_eq!(app.advice_screen.as_ref().unwrap().messages.len(), 1);
}

// ========== Rendering helpers ==========

#[test]
fn test_hex_color_parses_rgb() {
    use crate::tui::ui::hex_color;
    use ratatui::style::Color;

    assert_eq!(hex_color("#ff6600"), Color::Rgb(255, 102, 0));
    assert_eq!(hex_color("336699"), Color::Rgb(51, 102, 153));
}

#[test]
fn test_hex_color_rejects_malformed_input() {
    use crate::tui::ui::hex_color;
    use ratatui::style::Color;

    assert_eq!(hex_color(""), Color::Gray);
    assert_eq!(hex_color("#ff660"), Color::Gray);
    assert_eq!(hex_color("#zzzzzz"), Color::Gray);
    // Multibyte input can be typed into the color field; it must not
    // be sliced at byte offsets
    assert_eq!(hex_color("アア"), Color::Gray);
    assert_eq!(hex_color("#アア"), Color::Gray);
}
