use nl2sql::{
    config::SafetyConfig,
    error::error_message,
    safety::{SafetyPolicy, clean_sql}
};

#[test]
fn test_clean_strips_sql_fence() {
    assert_eq!(clean_sql("```sql\nSELECT 1\n```"), "SELECT 1");
}

#[test]
fn test_clean_strips_bare_fence() {
    assert_eq!(clean_sql("```\nSELECT 1\n```"), "SELECT 1");
}

#[test]
fn test_clean_trims_plain_text() {
    assert_eq!(clean_sql("  SELECT 1  "), "SELECT 1");
}

#[test]
fn test_clean_ignores_surrounding_prose() {
    let text = "Here is your query:\n```sql\nSELECT name FROM users\n```\nHope that helps!";
    assert_eq!(clean_sql(text), "SELECT name FROM users");
}

#[test]
fn test_clean_is_idempotent() {
    let once = clean_sql("```sql\nSELECT 1\n```");
    assert_eq!(clean_sql(&once), once);

    let plain = clean_sql("  SELECT id FROM orders  ");
    assert_eq!(clean_sql(&plain), plain);
}

#[test]
fn test_clean_unclosed_fence() {
    assert_eq!(clean_sql("```sql\nSELECT 1"), "SELECT 1");
}

#[test]
fn test_safe_select() {
    let policy = SafetyPolicy::default();
    assert!(policy.is_safe("SELECT id FROM users"));
    assert!(policy.is_safe("select id from users"));
}

#[test]
fn test_rejects_non_select_prefix() {
    let policy = SafetyPolicy::default();
    assert!(!policy.is_safe("WITH t AS (SELECT 1) SELECT * FROM t"));
    assert!(!policy.is_safe("EXPLAIN SELECT 1"));
    assert!(!policy.is_safe(""));
}

#[test]
fn test_rejects_every_forbidden_keyword_anywhere() {
    let policy = SafetyPolicy::default();
    for keyword in [
        "DROP", "DELETE", "TRUNCATE", "UPDATE", "INSERT", "ALTER", "CREATE", "EXEC"
    ] {
        let upper = format!("SELECT * FROM t WHERE c = '{}'", keyword);
        let lower = format!("SELECT * FROM t WHERE c = '{}'", keyword.to_lowercase());
        assert!(!policy.is_safe(&upper), "should reject {}", keyword);
        assert!(!policy.is_safe(&lower), "should reject lowercase {}", keyword);
    }
}

#[test]
fn test_substring_match_is_deliberately_coarse() {
    let policy = SafetyPolicy::default();
    // "created_at" contains CREATE; over-rejection is the accepted tradeoff
    assert!(!policy.is_safe("SELECT created_at FROM users"));
}

#[test]
fn test_validate_accepts_plain_select() {
    let policy = SafetyPolicy::default();
    assert!(policy.validate("SELECT id, name FROM users WHERE id = 1").is_ok());
}

#[test]
fn test_validate_rejects_update() {
    let policy = SafetyPolicy::default();
    let err = policy.validate("UPDATE users SET name = 'x'").unwrap_err();
    assert!(error_message(&err).contains("Unsafe or invalid query"));
}

#[test]
fn test_validate_rejects_empty() {
    let policy = SafetyPolicy::default();
    assert!(policy.validate("").is_err());
    assert!(policy.validate("   ").is_err());
}

#[test]
fn test_validate_rejects_multiple_statements() {
    let policy = SafetyPolicy::default();
    assert!(policy.validate("SELECT 1; SELECT 2").is_err());
}

#[test]
fn test_validate_rejects_unparseable() {
    let policy = SafetyPolicy::default();
    assert!(policy.validate("SELECT FROM WHERE").is_err());
}

#[test]
fn test_custom_forbidden_keywords() {
    let policy = SafetyPolicy::new(&SafetyConfig {
        forbidden_keywords: vec![String::from("grant")]
    });
    assert!(!policy.is_safe("SELECT * FROM grants"));
    // The default list no longer applies
    assert!(policy.is_safe("SELECT updated_at FROM users"));
}
