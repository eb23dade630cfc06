use user_registration::config::UserRegistrationConfig;
use user_registration::contract::{error::UserRegistrationError, model::*};
use user_registration::domain::error::DomainError;
// Note: internal module imports are only for testing.
// External consumers should only use the `contract` module.

#[test]
fn test_contract_models() {
    let user = User {
        id: 1,
        name: None,
        born_date: "01.01.2000".to_string(),
        age: 26,
        email: "test@example.com".to_string(),
        new_status: Status::Offline,
        old_status: Status::Online,
    };
    assert_eq!(user.current_status(), Status::Offline);

    let new_user = NewUser::default();
    assert_eq!(new_user.name, None);
    assert_eq!(new_user.born_date, None);
    assert!(new_user.email.is_empty());

    let query = StatisticsQuery::default();
    assert_eq!(query.status, None);
    assert_eq!(query.is_adult, None);

    assert_eq!(Status::default(), Status::Undefined);
}

#[test]
fn test_contract_errors() {
    match UserRegistrationError::not_found(5) {
        UserRegistrationError::NotFound { id } => assert_eq!(id, 5),
        _ => panic!("Expected NotFound error"),
    }

    match UserRegistrationError::conflict("test@example.com") {
        UserRegistrationError::Conflict { email } => assert_eq!(email, "test@example.com"),
        _ => panic!("Expected Conflict error"),
    }

    let error = UserRegistrationError::validation("Invalid input");
    assert_eq!(error.to_string(), "Validation error: Invalid input");
    assert_eq!(UserRegistrationError::internal().to_string(), "Internal error");
}

#[test]
fn test_domain_to_contract_error_conversion() {
    let contract: UserRegistrationError = DomainError::user_not_found(3).into();
    assert_eq!(contract, UserRegistrationError::not_found(3));

    let contract: UserRegistrationError = DomainError::email_already_exists("x@y.io").into();
    assert_eq!(contract, UserRegistrationError::conflict("x@y.io"));

    let domain = DomainError::invalid_birth_date("2000-01-01");
    let message = domain.to_string();
    let contract: UserRegistrationError = domain.into();
    assert_eq!(contract, UserRegistrationError::validation(message));

    let contract: UserRegistrationError = DomainError::invalid_status_filter("Bad").into();
    assert!(matches!(contract, UserRegistrationError::Validation { .. }));

    let contract: UserRegistrationError = DomainError::database("disk full").into();
    assert_eq!(contract, UserRegistrationError::Internal);
}

#[test]
fn test_domain_error_messages() {
    assert_eq!(
        DomainError::user_not_found(4).to_string(),
        "User not found: 4"
    );
    assert_eq!(
        DomainError::email_already_exists("a@b.io").to_string(),
        "User with email 'a@b.io' already exists"
    );
    assert_eq!(
        DomainError::missing_birth_date().to_string(),
        "Birth date is missing"
    );
    assert_eq!(
        DomainError::invalid_status_filter("X").to_string(),
        "Invalid status filter 'X'. Expected ONLINE or OFFLINE"
    );
}

#[test]
fn test_module_config_defaults() {
    let cfg = UserRegistrationConfig::default();
    assert!(cfg.enable_docs);
    assert!(!cfg.cors_enabled);
    assert_eq!(cfg.request_timeout_sec, 30);
    assert_eq!(cfg.body_limit_bytes, 1024 * 1024);

    let partial: UserRegistrationConfig =
        serde_json::from_value(serde_json::json!({"cors_enabled": true})).unwrap();
    assert!(partial.cors_enabled);
    assert_eq!(partial.request_timeout_sec, 30);
}
