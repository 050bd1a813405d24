use crate::app::runtime::Output;
use crate::domain::model::{GeneratedBatch, Notification, NotificationKind};
use std::fmt::Write;

pub fn render_notification(notification: &Notification) -> String {
    match notification.kind {
        NotificationKind::Success => format!("✅ {}", notification.message),
        NotificationKind::Error => format!("❌ {}", notification.message),
    }
}

pub fn render_output(output: &Output) -> String {
    match output {
        Output::Notify(notification) => render_notification(notification),
        Output::Link(link) => format!("📧 {}", link),
    }
}

/// Emails grouped under their domain, followed by the total.
pub fn render_batch(batch: &GeneratedBatch) -> String {
    if batch.domain_count() == 0 {
        return "Generated emails will appear here.".to_string();
    }

    let mut out = String::new();
    for (domain, emails) in batch.iter() {
        let _ = writeln!(out, "{}", domain);
        for email in emails {
            let _ = writeln!(out, "  {}", email);
        }
        out.push('\n');
    }
    let _ = write!(out, "Generated {} emails.", batch.email_count());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Domain;

    #[test]
    fn test_render_empty_batch() {
        assert_eq!(render_batch(&GeneratedBatch::new()), "Generated emails will appear here.");
    }

    #[test]
    fn test_render_batch_groups_by_domain() {
        let mut batch = GeneratedBatch::new();
        batch.insert(Domain::parse("a.com").unwrap(), vec!["hr@a.com".into(), "jobs@a.com".into()]);
        batch.insert(Domain::parse("b.org").unwrap(), vec!["hr@b.org".into()]);

        assert_eq!(
            render_batch(&batch),
            "a.com\n  hr@a.com\n  jobs@a.com\n\nb.org\n  hr@b.org\n\nGenerated 3 emails."
        );
    }

    #[test]
    fn test_render_notification() {
        let ok = Notification { id: 1, kind: NotificationKind::Success, message: "done".into() };
        let err = Notification { id: 2, kind: NotificationKind::Error, message: "nope".into() };
        assert_eq!(render_notification(&ok), "✅ done");
        assert_eq!(render_notification(&err), "❌ nope");
    }
}
