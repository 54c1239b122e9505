#![allow(clippy::unwrap_used)]

use super::util::*;

fn args(s: &[&str]) -> Vec<String> {
    s.iter().map(|a| a.to_string()).collect()
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount() {
    assert_eq!(format_amount(0.0), "0.00");
    assert_eq!(format_amount(12.5), "12.50");
    assert_eq!(format_amount(1234567.891), "1,234,567.89");
    assert_eq!(format_amount(-42.0), "-42.00");
    assert_eq!(format_amount(999.999), "1,000.00");
}

#[test]
fn test_format_amount_tiny_negative() {
    assert_eq!(format_amount(-0.001), "0.00");
}

// ── pad ───────────────────────────────────────────────────────

#[test]
fn test_pad() {
    assert_eq!(pad("ab", 4), "ab  ");
    assert_eq!(pad("abcdef", 4), "abcdef");
    assert_eq!(pad("é", 2), "é ");
}

// ── argument helpers ──────────────────────────────────────────

#[test]
fn test_flag() {
    let a = args(&["--date", "2024-01-05", "--amount", "3"]);
    assert_eq!(flag(&a, "--date"), Some("2024-01-05"));
    assert_eq!(flag(&a, "--amount"), Some("3"));
    assert_eq!(flag(&a, "--desc"), None);
}

#[test]
fn test_flag_without_value() {
    let a = args(&["--date"]);
    assert_eq!(flag(&a, "--date"), None);
}

#[test]
fn test_positional_skips_flag_values() {
    let a = args(&["--amount", "3", "17", "--desc", "x"]);
    assert_eq!(positional(&a), Some("17"));
    assert_eq!(positional(&args(&["--yes", "4"])), Some("4"));
    assert_eq!(positional(&args(&["--desc", "x"])), None);
}

#[test]
fn test_has_switch() {
    assert!(has_switch(&args(&["4", "--yes"]), "--yes"));
    assert!(!has_switch(&args(&["4"]), "--yes"));
}

#[test]
fn test_without_flag() {
    let a = args(&["category", "--user", "sam", "Eating", "Out"]);
    assert_eq!(without_flag(&a, "--user"), args(&["category", "Eating", "Out"]));
    assert_eq!(without_flag(&args(&["list", "--user"]), "--user"), args(&["list"]));
}

#[test]
fn test_split_line_plain() {
    assert_eq!(split_line("  add  --amount 3 "), args(&["add", "--amount", "3"]));
    assert!(split_line("   ").is_empty());
}

#[test]
fn test_split_line_quotes() {
    assert_eq!(
        split_line(r#"add --desc "bus pass" --category Travel"#),
        args(&["add", "--desc", "bus pass", "--category", "Travel"])
    );
    assert_eq!(split_line(r#"add --desc """#), args(&["add", "--desc", ""]));
}

// ── bar ───────────────────────────────────────────────────────

#[test]
fn test_bar() {
    assert_eq!(bar(10.0, 10.0, 4), "████");
    assert_eq!(bar(5.0, 10.0, 4), "██");
    assert_eq!(bar(0.01, 10.0, 4), "█");
    assert_eq!(bar(0.0, 10.0, 4), "");
    assert_eq!(bar(-3.0, 10.0, 4), "");
}
