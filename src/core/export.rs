use crate::domain::model::GeneratedBatch;
use crate::utils::error::{ExportKind, UserError};
use url::Url;

pub const DOWNLOAD_FILENAME: &str = "generated_emails.txt";
pub const GMAIL_COMPOSE_URL: &str = "https://mail.google.com/mail/";

/// Newline-joined emails for the clipboard and the download file.
pub fn export_text(batch: &GeneratedBatch, kind: ExportKind) -> Result<String, UserError> {
    let text = batch.flattened().collect::<Vec<_>>().join("\n");
    if text.trim().is_empty() {
        return Err(UserError::NothingToExport(kind));
    }
    Ok(text)
}

/// Mail-compose deep link with every distinct address in `bcc`.
///
/// `base_url` is the compose endpoint; `view=cm&fs=1` opens a full-screen
/// compose window in Gmail.
pub fn compose_link(batch: &GeneratedBatch, base_url: &str) -> Result<String, UserError> {
    let recipients = batch.distinct();
    if recipients.is_empty() {
        return Err(UserError::NothingToExport(ExportKind::Compose));
    }

    let mut url = Url::parse(base_url).unwrap_or_else(|e| {
        tracing::warn!("Invalid compose URL '{}' ({}), using Gmail", base_url, e);
        Url::parse(GMAIL_COMPOSE_URL).expect("default compose URL is valid")
    });
    url.query_pairs_mut()
        .append_pair("view", "cm")
        .append_pair("fs", "1")
        .append_pair("bcc", &recipients.join(","));
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generator::generate;
    use crate::domain::model::Domain;

    fn batch_of(domains: &[&str]) -> GeneratedBatch {
        let mut batch = GeneratedBatch::new();
        for d in domains {
            let domain = Domain::parse(d).unwrap();
            let emails = generate(&domain);
            batch.insert(domain, emails);
        }
        batch
    }

    #[test]
    fn test_export_text_flattens_in_domain_then_catalog_order() {
        let batch = batch_of(&["b.org", "a.com"]);
        let text = export_text(&batch, ExportKind::Copy).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), batch.email_count());
        assert_eq!(lines[0], "hr@b.org");
        assert_eq!(lines[1], "careers@b.org");
        assert_eq!(lines[lines.len() / 2], "hr@a.com");
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_export_text_empty_batch() {
        let batch = GeneratedBatch::new();
        assert_eq!(
            export_text(&batch, ExportKind::Download),
            Err(UserError::NothingToExport(ExportKind::Download))
        );
    }

    #[test]
    fn test_compose_link_lists_each_address_once() {
        let mut batch = batch_of(&["a.com", "b.com"]);
        // hr@a.com listed under a second domain too
        batch.insert(
            Domain::parse("c.com").unwrap(),
            vec!["hr@a.com".to_string(), "hr@c.com".to_string()],
        );

        let link = compose_link(&batch, GMAIL_COMPOSE_URL).unwrap();
        assert!(link.starts_with("https://mail.google.com/mail/?view=cm&fs=1&bcc="));

        let bcc = link.split("bcc=").nth(1).unwrap();
        assert!(!bcc.contains('@'));
        assert!(!bcc.contains(','));
        assert_eq!(bcc.matches("hr%40a.com%2C").count(), 1);
        assert_eq!(bcc.matches("hr%40b.com").count(), 1);
        assert!(bcc.ends_with("hr%40c.com"));

        let url = Url::parse(&link).unwrap();
        let (_, decoded) = url.query_pairs().find(|(k, _)| k == "bcc").unwrap();
        let addresses: Vec<&str> = decoded.split(',').collect();
        assert_eq!(addresses.len(), batch.distinct().len());
        assert_eq!(addresses.iter().filter(|a| **a == "hr@a.com").count(), 1);
    }

    #[test]
    fn test_compose_link_empty_batch() {
        assert_eq!(
            compose_link(&GeneratedBatch::new(), GMAIL_COMPOSE_URL),
            Err(UserError::NothingToExport(ExportKind::Compose))
        );
    }

    #[test]
    fn test_compose_link_custom_base() {
        let batch = batch_of(&["a.com"]);
        let link = compose_link(&batch, "https://mail.example.net/compose").unwrap();
        assert!(link.starts_with("https://mail.example.net/compose?view=cm&fs=1&bcc=hr%40a.com%2Ccareers%40a.com"));
    }
}
