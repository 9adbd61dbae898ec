//! Plain-text sample reader for the command line.

use anyhow::{Context, Result, bail};
use std::path::Path;

/// Parses numbers separated by whitespace and/or commas.
///
/// `#` starts a comment that runs to the end of the line.
///
/// # Errors
///
/// Returns an error naming the offending token and its 1-based line number
/// if a token is not a number.
pub fn parse_samples(text: &str) -> Result<Vec<f64>> {
    let mut samples = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let content = match line.split_once('#') {
            Some((before, _comment)) => before,
            None => line,
        };

        for token in content.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            match token.parse::<f64>() {
                Ok(v) => samples.push(v),
                Err(_) => bail!("line {}: not a number: {:?}", line_no + 1, token),
            }
        }
    }

    Ok(samples)
}

/// Reads a file and parses its contents with [`parse_samples`].
pub fn read_samples(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading samples from {}", path.display()))?;
    parse_samples(&text).with_context(|| format!("parsing samples in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_separators() {
        let samples = parse_samples("1, 2 3\n4.5,\t-6\n").unwrap();
        assert_eq!(samples, vec![1.0, 2.0, 3.0, 4.5, -6.0]);
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let samples = parse_samples("# speeds\n\n86 87 # first two\n88\n").unwrap();
        assert_eq!(samples, vec![86.0, 87.0, 88.0]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_samples("").unwrap().is_empty());
        assert!(parse_samples(" ,, \n# nothing").unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_token_reports_line() {
        let err = parse_samples("1 2\n3 abc\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 2"), "{msg}");
        assert!(msg.contains("abc"), "{msg}");
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_samples("/nonexistent/sample_stats/none.txt");
        assert!(result.is_err());
    }
}
