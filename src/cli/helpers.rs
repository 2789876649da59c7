//! Shared helper functions for CLI commands

use chrono::NaiveDate;
use miette::{miette, Result};
use std::path::PathBuf;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, ProjectStore};

/// Open the store at the resolved database path
pub fn open_store(global: &GlobalOpts) -> Result<ProjectStore> {
    let path = database_path(global);
    ProjectStore::open(&path).map_err(|e| miette!("{}", e))
}

/// Resolve the database path from flag, environment, and config
pub fn database_path(global: &GlobalOpts) -> PathBuf {
    Config::load().database_path(global.db.as_ref())
}

/// Effective output format: the flag wins, then the config file default
pub fn effective_format(global: &GlobalOpts) -> OutputFormat {
    resolve_format(global.format, &Config::load())
}

fn resolve_format(flag: OutputFormat, config: &Config) -> OutputFormat {
    if flag != OutputFormat::Auto {
        return flag;
    }
    match config.default_format.as_deref() {
        Some("tsv") => OutputFormat::Tsv,
        Some("json") => OutputFormat::Json,
        Some("csv") => OutputFormat::Csv,
        _ => OutputFormat::Auto,
    }
}

/// Parse a user-supplied `YYYY-MM-DD` date
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| miette!("invalid date {:?}, expected YYYY-MM-DD", text))
}

/// Truncate a string to max_len, adding "..." if truncated
///
/// The cut is moved back to a char boundary so multi-byte text never
/// splits mid-character.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut cut = max_len.saturating_sub(3);
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(
            parse_date(" 2024-12-31 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
        assert!(parse_date("31-12-2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_truncate_str_multibyte_boundary() {
        // The cut index lands inside 'é'; the cut must step back to a
        // char boundary instead of panicking.
        assert_eq!(
            truncate_str("aaaaaaaaaaaaaaaaaaaéxxxx", 23),
            "aaaaaaaaaaaaaaaaaaa..."
        );
        assert_eq!(truncate_str("Café Río Architects SA", 10), "Café R...");
        assert_eq!(truncate_str("日本語の住所テスト", 8), "日...");
    }

    #[test]
    fn test_resolve_format_prefers_flag_then_config() {
        let config = Config {
            database: None,
            default_format: Some("json".to_string()),
        };
        assert_eq!(
            resolve_format(OutputFormat::Csv, &config),
            OutputFormat::Csv
        );
        assert_eq!(
            resolve_format(OutputFormat::Auto, &config),
            OutputFormat::Json
        );

        let empty = Config::default();
        assert_eq!(
            resolve_format(OutputFormat::Auto, &empty),
            OutputFormat::Auto
        );
        let bad = Config {
            database: None,
            default_format: Some("xml".to_string()),
        };
        assert_eq!(resolve_format(OutputFormat::Auto, &bad), OutputFormat::Auto);
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv("with\nnewline"), "\"with\nnewline\"");
    }
}
