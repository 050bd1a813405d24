use crate::core::normalizer::{is_valid_domain, normalize};
use crate::domain::model::Domain;
use crate::utils::error::{Result, UserError};
use std::path::Path;

/// Splits uploaded file content into raw domain strings: one per line,
/// trimmed, blank lines dropped.
pub fn parse_domain_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn read_domain_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let text = String::from_utf8_lossy(&bytes);
    let domains = parse_domain_list(&text);
    tracing::debug!("Read {} domains from {}", domains.len(), path.display());
    Ok(domains)
}

/// All-or-nothing gate in front of generation.
///
/// Either every candidate normalizes, and the domains come back in input
/// order, or the error names every offending raw string.
pub fn validate_candidates(candidates: &[String]) -> std::result::Result<Vec<Domain>, UserError> {
    if candidates.is_empty() {
        return Err(UserError::EmptyInput);
    }

    let invalid: Vec<String> = candidates
        .iter()
        .filter(|c| !is_valid_domain(c))
        .cloned()
        .collect();
    if !invalid.is_empty() {
        return Err(UserError::InvalidDomains(invalid));
    }

    Ok(candidates.iter().filter_map(|c| normalize(c)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_domain_list_drops_blank_lines() {
        assert_eq!(parse_domain_list("a.com\n\nb.org\n "), vec!["a.com", "b.org"]);
    }

    #[test]
    fn test_parse_domain_list_handles_crlf_and_padding() {
        assert_eq!(
            parse_domain_list("  a.com \r\n\t\r\nhttps://b.org/jobs\r\n"),
            vec!["a.com", "https://b.org/jobs"]
        );
        assert!(parse_domain_list("").is_empty());
        assert!(parse_domain_list("\n \n\t").is_empty());
    }

    #[test]
    fn test_validate_candidates_reports_every_offender() {
        let candidates = vec![
            "a.com".to_string(),
            "nope".to_string(),
            "b.org".to_string(),
            "bad.".to_string(),
        ];
        assert_eq!(
            validate_candidates(&candidates),
            Err(UserError::InvalidDomains(vec!["nope".to_string(), "bad.".to_string()]))
        );
    }

    #[test]
    fn test_validate_candidates_empty() {
        assert_eq!(validate_candidates(&[]), Err(UserError::EmptyInput));
    }

    #[test]
    fn test_validate_candidates_normalizes_in_order() {
        let candidates = vec!["https://www.B.org/x".to_string(), "a.com".to_string()];
        let domains = validate_candidates(&candidates).unwrap();
        let names: Vec<&str> = domains.iter().map(Domain::as_str).collect();
        assert_eq!(names, vec!["b.org", "a.com"]);
    }

    #[tokio::test]
    async fn test_read_domain_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a.com\n\nb.org\n ").unwrap();

        let domains = read_domain_file(file.path()).await.unwrap();
        assert_eq!(domains, vec!["a.com", "b.org"]);
    }

    #[test]
    fn test_read_domain_file_with_crlf() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a.com\r\n\r\nwww.b.org\r\n").unwrap();

        let domains = tokio_test::block_on(read_domain_file(file.path())).unwrap();
        assert_eq!(domains, vec!["a.com", "www.b.org"]);
    }

    #[tokio::test]
    async fn test_read_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_domain_file(dir.path().join("missing.txt")).await.is_err());
    }
}
