use todo_agent::infrastructure::observability::sanitize_prompt;

#[test]
fn given_empty_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt(""), "[EMPTY]");
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_message_when_sanitizing_then_returns_trimmed_unchanged() {
    assert_eq!(sanitize_prompt("  add buy milk  "), "add buy milk");
}

#[test]
fn given_long_message_when_sanitizing_then_truncates_with_length() {
    let prompt = "a".repeat(150);
    let result = sanitize_prompt(&prompt);
    assert!(result.starts_with(&"a".repeat(100)));
    assert!(result.ends_with("... (150 chars total)"));
}

#[test]
fn given_multibyte_message_when_truncating_then_cuts_on_char_boundary() {
    let prompt = "é".repeat(120);
    let result = sanitize_prompt(&prompt);
    assert!(result.starts_with(&"é".repeat(100)));
    assert!(result.contains("(120 chars total)"));
}

#[test]
fn given_bearer_token_when_sanitizing_then_redacts_token() {
    let result = sanitize_prompt("Authorization: Bearer sk-abc123xyz please");
    assert_eq!(result, "Authorization: Bearer [REDACTED] please");
}

#[test]
fn given_repeated_credentials_when_sanitizing_then_redacts_every_occurrence() {
    let result = sanitize_prompt("token=one and token=two&password=hunter2");
    assert!(!result.contains("one"));
    assert!(!result.contains("two"));
    assert!(!result.contains("hunter2"));
    assert_eq!(result.matches("token=[REDACTED]").count(), 2);
}
