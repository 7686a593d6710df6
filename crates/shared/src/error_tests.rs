use super::*;
use rstest::rstest;

#[rstest]
#[case(AppError::Unauthorized("test".into()), "UNAUTHORIZED")]
#[case(AppError::Forbidden("test".into()), "FORBIDDEN")]
#[case(AppError::NotFound("test".into()), "NOT_FOUND")]
#[case(AppError::Validation("test".into()), "VALIDATION_ERROR")]
#[case(AppError::Conflict("test".into()), "CONFLICT")]
#[case(AppError::Storage("test".into()), "STORAGE_ERROR")]
#[case(AppError::Internal("test".into()), "INTERNAL_ERROR")]
fn test_app_error_error_codes(#[case] error: AppError, #[case] code: &str) {
    assert_eq!(error.error_code(), code);
}

#[test]
fn test_alert_message_is_raw() {
    let err = AppError::Conflict("Duplicate payment id: pay_1".into());
    assert_eq!(err.alert_message(), "Duplicate payment id: pay_1");
    assert_eq!(err.to_string(), "Conflict: Duplicate payment id: pay_1");
}

#[test]
fn test_error_display() {
    assert_eq!(
        AppError::Unauthorized("msg".into()).to_string(),
        "Authentication failed: msg"
    );
    assert_eq!(
        AppError::Forbidden("msg".into()).to_string(),
        "Access denied: msg"
    );
    assert_eq!(AppError::NotFound("msg".into()).to_string(), "Not found: msg");
    assert_eq!(
        AppError::Validation("msg".into()).to_string(),
        "Validation error: msg"
    );
    assert_eq!(
        AppError::Storage("msg".into()).to_string(),
        "Storage error: msg"
    );
}
