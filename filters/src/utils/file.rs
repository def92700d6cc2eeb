//! File utility functions

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Expand a path string to an absolute path.
///
/// Handles:
/// - Tilde expansion: `~` or `~/path` -> home directory
/// - Relative paths: `.`, `..`, `./path`, `../path` -> absolute path
/// - Bare names: `state.json` -> absolute path in current directory
/// - Absolute paths: passed through unchanged
/// - Empty input: the current directory
///
/// ```text
/// expand_path("~/filters/state.json") // -> /home/user/filters/state.json
/// expand_path("../state.json")        // -> /current/state.json
/// expand_path("state.json")           // -> /current/dir/state.json
/// expand_path("/tmp/state.json")      // -> /tmp/state.json
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = if path == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(path))
    } else if let Some(rest) = path.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        }
    } else {
        PathBuf::from(path)
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

/// Whether a CLI input argument means stdin
pub fn is_stdin(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == "-")
}

/// Read a UTF-8 document from `path` (or stdin), refusing more than `max_bytes`.
pub fn read_input(path: Option<&Path>, max_bytes: usize) -> Result<String> {
    match path {
        Some(p) if !is_stdin(Some(p)) => {
            let expanded = expand_path(&p.to_string_lossy());
            let file = File::open(&expanded)
                .with_context(|| format!("Failed to open input file: {}", expanded.display()))?;
            read_limited(file, max_bytes)
                .with_context(|| format!("Failed to read input file: {}", expanded.display()))
        }
        _ => read_limited(io::stdin().lock(), max_bytes).context("Failed to read stdin"),
    }
}

/// Read everything from `reader`, failing once more than `max_bytes` arrive
pub fn read_limited<R: Read>(reader: R, max_bytes: usize) -> Result<String> {
    let mut buf = Vec::new();
    reader.take((max_bytes as u64).saturating_add(1)).read_to_end(&mut buf)?;

    if buf.len() > max_bytes {
        anyhow::bail!("Input exceeds maximum size of {} bytes", max_bytes);
    }

    String::from_utf8(buf).context("Input is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_expand_path_absolute_unchanged() {
        assert_eq!(expand_path("/etc/config"), PathBuf::from("/etc/config"));
    }

    #[test]
    fn test_expand_path_relative() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("data"), cwd.join("data"));
        assert_eq!(expand_path("  data  "), cwd.join("data"));
        assert_eq!(expand_path("./data"), cwd.join("./data"));
        assert_eq!(expand_path(""), cwd);
    }

    #[test]
    fn test_expand_path_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
            assert_eq!(expand_path("~/x.json"), home.join("x.json"));
        }
    }

    #[test]
    fn test_is_stdin() {
        assert!(is_stdin(None));
        assert!(is_stdin(Some(Path::new("-"))));
        assert!(!is_stdin(Some(Path::new("state.json"))));
    }

    #[test]
    fn test_read_limited_within_limit() {
        let text = read_limited("{}".as_bytes(), 2).unwrap();
        assert_eq!(text, "{}");
    }

    #[test]
    fn test_read_limited_over_limit() {
        let err = read_limited("{ }".as_bytes(), 2).unwrap_err();
        assert_eq!(err.to_string(), "Input exceeds maximum size of 2 bytes");
    }

    #[test]
    fn test_read_limited_unbounded_limit() {
        let text = read_limited("{}".as_bytes(), usize::MAX).unwrap();
        assert_eq!(text, "{}");
    }

    #[test]
    fn test_read_limited_invalid_utf8() {
        let err = read_limited(&[0xff, 0xfe][..], 16).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": {{}}}}"#).unwrap();
        let text = read_input(Some(file.path()), 1024).unwrap();
        assert_eq!(text, r#"{"name": {}}"#);
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/state.json")), 1024).unwrap_err();
        assert!(err.to_string().contains("Failed to open input file"));
    }
}
