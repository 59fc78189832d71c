use crate::api::*;
use crate::config::Config;
use crate::models::{today_iso, FlowKind};
use crate::Error;
use serde_json::json;
use std::io::{Read, Write};
use std::net::TcpListener;

fn valid_form() -> RegisterForm {
    RegisterForm {
        username: "user@example.com".to_string(),
        password: "hunter22".to_string(),
        confirm_password: "hunter22".to_string(),
        terms_accepted: true,
    }
}

// Client against an unroutable port; every test here must fail (or succeed)
// before any request is actually sent.
fn offline_client() -> ApiClient {
    ApiClient::new(&Config {
        base_url: "http://127.0.0.1:1/api/".to_string(),
    })
}

#[test]
fn test_validate_registration_accepts_valid_form() {
    assert!(validate_registration(&valid_form()).is_ok());
}

#[test]
fn test_validate_registration_empty_username() {
    let mut form = valid_form();
    form.username = "   ".to_string();

    let err = validate_registration(&form).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(err.to_string(), "Username is required");
}

#[test]
fn test_validate_registration_empty_password() {
    let mut form = valid_form();
    form.password = String::new();

    assert!(matches!(
        validate_registration(&form),
        Err(Error::Validation(_))
    ));
}

#[test]
fn test_validate_registration_password_mismatch() {
    let mut form = valid_form();
    form.confirm_password = "different".to_string();

    let err = validate_registration(&form).unwrap_err();
    assert_eq!(err.to_string(), "Passwords do not match");
}

#[test]
fn test_validate_registration_terms_not_accepted() {
    let mut form = valid_form();
    form.terms_accepted = false;

    assert!(matches!(
        validate_registration(&form),
        Err(Error::Validation(_))
    ));
}

fn sample_input() -> TransactionInput {
    TransactionInput {
        amount: "12.5".to_string(),
        kind: FlowKind::Expense,
        category_id: "3".to_string(),
        description: "Lunch".to_string(),
    }
}

#[test]
fn test_build_transaction_payload() {
    let payload = build_transaction_payload(&sample_input()).unwrap();

    assert_eq!(payload.amount, 12.5);
    assert_eq!(payload.kind, FlowKind::Expense);
    assert_eq!(payload.category_id, 3);
    assert_eq!(payload.date, today_iso());
    assert_eq!(payload.description, "Lunch");
}

#[test]
fn test_build_transaction_payload_serializes_type_field() {
    let payload = build_transaction_payload(&sample_input()).unwrap();
    let value = serde_json::to_value(&payload).unwrap();

    assert_eq!(value["type"], json!("expense"));
    assert_eq!(value["amount"], json!(12.5));
    assert_eq!(value["category_id"], json!(3));
}

#[test]
fn test_build_transaction_payload_rejects_non_numeric_amount() {
    let mut input = sample_input();
    input.amount = "abc".to_string();

    assert!(matches!(
        build_transaction_payload(&input),
        Err(Error::Validation(_))
    ));
}

#[test]
fn test_build_transaction_payload_rejects_non_finite_amount() {
    // "NaN" and "inf" parse as f64 but must not reach the wire
    for amount in ["NaN", "inf", "-inf"] {
        let mut input = sample_input();
        input.amount = amount.to_string();

        assert!(
            matches!(build_transaction_payload(&input), Err(Error::Validation(_))),
            "amount {:?} should be rejected",
            amount
        );
    }
}

#[test]
fn test_build_transaction_payload_rejects_missing_category() {
    let mut input = sample_input();
    input.category_id = String::new();

    assert!(matches!(
        build_transaction_payload(&input),
        Err(Error::Validation(_))
    ));
}

#[test]
fn test_build_transaction_payload_rejects_non_integer_category() {
    let mut input = sample_input();
    input.category_id = "food".to_string();

    assert!(matches!(
        build_transaction_payload(&input),
        Err(Error::Validation(_))
    ));
}

#[test]
fn test_register_invalid_form_fails_before_network() {
    let client = offline_client();
    let mut form = valid_form();
    form.confirm_password = "mismatch".to_string();

    let result = tokio_test::block_on(client.register(&form));
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_list_categories_without_token_fails_before_network() {
    let client = offline_client();

    let result = tokio_test::block_on(client.list_categories(None, FlowKind::Expense));
    match result {
        Err(Error::Auth(message)) => assert_eq!(message, "not logged in"),
        other => panic!("expected Auth error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_fetch_dashboard_without_token_fails_before_network() {
    let client = offline_client();

    let result = tokio_test::block_on(client.fetch_dashboard(None));
    assert!(matches!(result, Err(Error::Auth(_))));
}

#[test]
fn test_create_category_rejects_empty_name() {
    let client = offline_client();

    let result =
        tokio_test::block_on(client.create_category(Some("tok"), "  ", "#ff6600", FlowKind::Expense));
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_create_transaction_invalid_input_fails_before_network() {
    let client = offline_client();
    let mut input = sample_input();
    input.amount = "not a number".to_string();

    let result = tokio_test::block_on(client.create_transaction(Some("tok"), &input));
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_send_chat_message_rejects_blank_text() {
    let client = offline_client();

    let result = tokio_test::block_on(client.send_chat_message(Some("tok"), "   "));
    assert!(matches!(result, Err(Error::Validation(_))));
}

// One-shot HTTP server answering the next request with a canned response,
// returning the base URL to point a client at
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{}/api/", addr)
}

#[test]
fn test_login_success_returns_issued_token() {
    let base_url = serve_once("200 OK", "{\"token\":\"abc\"}");
    let client = ApiClient::new(&Config { base_url });

    let token = tokio_test::block_on(client.login("user@example.com", "pw")).unwrap();
    assert_eq!(token, "abc");
}

#[test]
fn test_login_rejected_surfaces_server_error_verbatim() {
    let base_url = serve_once("400 Bad Request", "{\"error\":\"bad credentials\"}");
    let client = ApiClient::new(&Config { base_url });

    match tokio_test::block_on(client.login("user@example.com", "pw")) {
        Err(Error::Auth(message)) => assert_eq!(message, "bad credentials"),
        other => panic!("expected Auth error, got {:?}", other),
    }
}

#[test]
fn test_login_success_without_token_is_protocol_error() {
    let base_url = serve_once("200 OK", "{}");
    let client = ApiClient::new(&Config { base_url });

    let result = tokio_test::block_on(client.login("user@example.com", "pw"));
    assert!(matches!(result, Err(Error::Protocol(_))));
}

#[test]
fn test_auth_error_displays_message_verbatim() {
    let err = Error::Auth("bad credentials".to_string());
    assert_eq!(err.to_string(), "bad credentials");
}

#[test]
fn test_validation_error_displays_message_verbatim() {
    let err = Error::Validation("Amount must be a number".to_string());
    assert_eq!(err.to_string(), "Amount must be a number");
}
