use formguard_validation::*;
use serde_json::json;

#[test]
fn test_empty_configs_accept_plain_input() {
    assert_eq!(is_string(Some("anything"), &StringConfig::new()), ValidationResult::valid());
    assert_eq!(is_number(Some("42"), &NumberConfig::new()), ValidationResult::valid());
    assert_eq!(is_number(Some(" 0x1F "), &NumberConfig::new()), ValidationResult::valid());
}

#[test]
fn test_string_rules() {
    assert_eq!(
        is_string(Some(""), &StringConfig::new().required(true)),
        ValidationResult::invalid("The string cannot be empty.")
    );

    let config = StringConfig::new().min_length(3);
    assert_eq!(
        is_string(Some("ab"), &config).error_message(),
        Some("The string must be at least 3 characters long.")
    );
    assert!(is_string(Some("abc"), &config).is_valid());
}

#[test]
fn test_number_rules() {
    assert_eq!(
        is_number(Some("abc"), &NumberConfig::new()).error_message(),
        Some("The value must be a valid number.")
    );

    let integer = NumberConfig::new().integer(true);
    assert!(is_number(Some("4"), &integer).is_valid());
    assert!(is_number(Some("4.5"), &integer).is_invalid());

    assert!(is_number(Some("-1"), &NumberConfig::new().positive(true)).is_invalid());
    assert_eq!(
        is_number(Some("3"), &NumberConfig::new().range(5.0, 10.0)).error_message(),
        Some("The value must be greater than or equal to 5.")
    );
}

#[test]
fn test_email_rules() {
    let corporate = EmailConfig::corporate();
    assert_eq!(
        is_email(Some("user@gmail.com"), &corporate).error_message(),
        Some(
            "The email must be associated with your company domain. Personal email providers such as Gmail, Yahoo, or Outlook are not permitted"
        )
    );
    assert!(is_email(Some("user@acme.com"), &corporate).is_valid());

    assert_eq!(
        is_email(Some("not-an-email"), &corporate).error_message(),
        Some("Please enter a valid email address")
    );
}

#[test]
fn test_group_rules() {
    let checkbox = CheckboxConfig::new().min_required(1);
    assert!(is_checkbox_group(&[false, false], &checkbox).is_invalid());
    assert!(is_checkbox_group(&[true, false], &checkbox).is_valid());

    let radio = RadioConfig::new();
    assert!(is_radio_group(&[false, false], &radio).is_invalid());
    assert!(is_radio_group(&[false, true], &radio).is_valid());
}

#[test]
fn test_file_rules() {
    assert_eq!(
        is_file(None, &FileConfig::new().required(true)).error_message(),
        Some("Please select a file.")
    );

    let text = FileInfo::new("notes.txt", "text/plain", 10);
    assert_eq!(
        is_file(Some(&text), &FileConfig::new().allow_type("image/png")).error_message(),
        Some("Invalid file type. Please upload a valid file format.")
    );

    let large = FileInfo::new("photo.png", "image/png", 2_000_000);
    let message = is_file(Some(&large), &FileConfig::new().max_size(1_048_576))
        .into_error_message()
        .unwrap();
    assert!(message.contains("1MB"));
}

#[test]
fn test_repeated_calls_are_identical() {
    let config = StringConfig::new()
        .required(true)
        .max_length(4)
        .message(Rule::MaxLength, "Too long.");
    let first = is_string(Some("too long"), &config);
    let second = is_string(Some("too long"), &config);
    assert_eq!(first, second);
    assert_eq!(first.error_message(), Some("Too long."));
}

#[test]
fn test_custom_hook_runs_only_after_builtin_rules() {
    let hook = CustomValidation::ends_with(".dev", "Only .dev hosts are accepted.");
    let config = StringConfig::new().min_length(5).custom_validation(hook);

    assert_eq!(
        is_string(Some("a.io"), &config).error_message(),
        Some("The string must be at least 5 characters long.")
    );
    assert_eq!(
        is_string(Some("rust.io"), &config).error_message(),
        Some("Only .dev hosts are accepted.")
    );
    assert!(is_string(Some("rust.dev"), &config).is_valid());
}

#[test]
fn test_registry_validates_json_configs() {
    let registry = ValidatorRegistry::with_defaults();
    let validator = registry.resolve(&"isString".into()).unwrap();
    let config = validator
        .parse_config(json!({
            "required": true,
            "pattern": "^[a-z]+$",
            "customMessage": { "pattern": "Lowercase letters only." }
        }))
        .unwrap();

    assert!(validator.accepts(&config));
    assert_eq!(
        validator
            .validate(&FieldValue::text("Hello"), &config)
            .error_message(),
        Some("Lowercase letters only.")
    );
    assert!(validator.validate(&FieldValue::text("hello"), &config).is_valid());
}

#[test]
fn test_registry_rejects_bad_pattern() {
    let validator = ValidatorRegistry::with_defaults().get("isString").unwrap();
    let error = validator
        .parse_config(json!({ "pattern": "([unclosed" }))
        .unwrap_err();
    assert!(matches!(error, ConfigError::InvalidConfig { .. }));
}

#[test]
fn test_result_serializes_with_camel_case_keys() {
    let value = serde_json::to_value(ValidationResult::invalid("Nope.")).unwrap();
    assert_eq!(value, json!({ "isValid": false, "errorMessage": "Nope." }));

    let value = serde_json::to_value(ValidationResult::valid()).unwrap();
    assert_eq!(value, json!({ "isValid": true, "errorMessage": null }));
}
