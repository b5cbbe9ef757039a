//! Project `.env` reader. Produces a key-value map; applying it to the process env happens in lib.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// `.env` in `override_dir` when given, else in the current directory. `None` when no such file.
fn dotenv_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = match override_dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir().ok()?,
    };
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Strips one layer of matching quotes. Double quotes honour `\"`; single quotes are literal.
fn unquote(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return raw[1..raw.len() - 1].replace("\\\"", "\"");
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }
    raw.to_string()
}

/// One `KEY=VALUE` line, optionally prefixed with `export `. Comments, blanks and
/// malformed lines yield `None`.
fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), unquote(value.trim())))
}

/// Later lines win when a key repeats.
fn parse_dotenv(content: &str) -> HashMap<String, String> {
    content.lines().filter_map(parse_line).collect()
}

/// Reads `.env` from `override_dir` or the current directory. A missing file is an empty map.
pub fn load_env_map(override_dir: Option<&Path>) -> std::io::Result<HashMap<String, String>> {
    match dotenv_path(override_dir) {
        Some(path) => Ok(parse_dotenv(&std::fs::read_to_string(path)?)),
        None => Ok(HashMap::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_plain_pairs() {
        let m = parse_dotenv("REDIS_URL=redis://cache:6379/1\nENV=staging\n");
        assert_eq!(m.get("REDIS_URL").map(String::as_str), Some("redis://cache:6379/1"));
        assert_eq!(m.get("ENV").map(String::as_str), Some("staging"));
    }

    #[test]
    fn comments_blanks_and_malformed_lines_are_ignored() {
        let m = parse_dotenv("\n# origins for local dev\nCORS_ORIGINS=a,b\n  \nNO_EQUALS\n=orphan\n");
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("CORS_ORIGINS").map(String::as_str), Some("a,b"));
    }

    #[test]
    fn hash_inside_value_is_kept() {
        let m = parse_dotenv("LLM_API_KEY=abc#def");
        assert_eq!(m.get("LLM_API_KEY").map(String::as_str), Some("abc#def"));
    }

    #[test]
    fn quotes_are_stripped() {
        let m = parse_dotenv("A=\"two words\"\nB='single'\nC=\"say \\\"hi\\\"\"\nD=\"\"\n");
        assert_eq!(m.get("A").map(String::as_str), Some("two words"));
        assert_eq!(m.get("B").map(String::as_str), Some("single"));
        assert_eq!(m.get("C").map(String::as_str), Some("say \"hi\""));
        assert_eq!(m.get("D").map(String::as_str), Some(""));
    }

    #[test]
    fn export_prefix_is_accepted() {
        let m = parse_dotenv("export LOG_LEVEL=debug");
        assert_eq!(m.get("LOG_LEVEL").map(String::as_str), Some("debug"));
    }

    #[test]
    fn repeated_key_keeps_last() {
        let m = parse_dotenv("PORT=1\nPORT=2\n");
        assert_eq!(m.get("PORT").map(String::as_str), Some("2"));
    }

    #[test]
    fn missing_file_is_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_map(Some(dir.path())).unwrap().is_empty());
    }

    #[test]
    fn reads_file_from_override_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "SESSION_TTL_SECONDS=60\n").unwrap();
        let m = load_env_map(Some(dir.path())).unwrap();
        assert_eq!(m.get("SESSION_TTL_SECONDS").map(String::as_str), Some("60"));
    }
}
