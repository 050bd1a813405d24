use crate::core::normalizer::normalize;
use crate::domain::model::Domain;
use std::collections::HashSet;

/// Local parts tried for every domain, in output order.
///
/// `recruiter` appears twice; generation keeps the first occurrence.
pub const PREFIX_CATALOG: &[&str] = &[
    // Standard HR
    "hr",
    // Careers and jobs
    "careers",
    "career",
    "jobs",
    "job",
    "employment",
    "work",
    "workwithus",
    // Recruitment
    "recruiting",
    "recruiter",
    "recruitment",
    "recruit",
    "hiring",
    "hiringteam",
    "apply",
    "application",
    "applications",
    // Talent acquisition
    "talent",
    "talentacquisition",
    "talent.acquisition",
    "talents",
    // HR personnel
    "hr-manager",
    "hrmanager",
    "hr-team",
    "hrteam",
    "hrdepartment",
    // Recruitment personnel
    "recruiter",
    "recruiters",
    "recruitmentteam",
    "talentmanager",
    // Applications
    "apply-jobs",
    "applyjobs",
    "jobapplication",
    "job-application",
    "jobapplications",
    "job-applications",
    "resume",
    "resumes",
    "cv",
    "cvs",
    // Internships
    "internship",
    "internships",
    "intern",
    "interns",
    // Combinations
    "jobs-careers",
    "careers-jobs",
    "join-us",
    "joinus",
    "join-team",
    "jointeam",
    "join",
    // Opportunities
    "opportunities",
    "opportunity",
    "career-opportunities",
    "careeropportunities",
];

/// Every catalog prefix joined to `domain`, catalog order, no duplicates.
pub fn generate(domain: &Domain) -> Vec<String> {
    let mut seen = HashSet::with_capacity(PREFIX_CATALOG.len());
    PREFIX_CATALOG
        .iter()
        .map(|prefix| format!("{}@{}", prefix, domain))
        .filter(|email| seen.insert(email.clone()))
        .collect()
}

/// Normalizes `input` and generates its emails; empty when the input is not a domain.
pub fn generate_corporate_emails(input: &str) -> Vec<String> {
    match normalize(input) {
        Some(domain) => generate(&domain),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    const DISTINCT_PREFIXES: usize = 54;

    fn example() -> Domain {
        Domain::parse("example.com").unwrap()
    }

    #[test]
    fn test_generate_shape() {
        let emails = generate(&example());
        let pattern = Regex::new(r"^[^@]+@example\.com$").unwrap();

        assert!(!emails.is_empty());
        assert!(emails.iter().all(|e| pattern.is_match(e)));
        assert_eq!(emails[0], "hr@example.com");
        assert_eq!(emails.last().unwrap(), "careeropportunities@example.com");
    }

    #[test]
    fn test_generate_has_no_duplicates() {
        let emails = generate(&example());
        let unique: HashSet<&String> = emails.iter().collect();
        assert_eq!(unique.len(), emails.len());
        assert_eq!(emails.len(), DISTINCT_PREFIXES);
        assert_eq!(emails.iter().filter(|e| *e == "recruiter@example.com").count(), 1);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let first = generate(&example());
        for _ in 0..5 {
            assert_eq!(generate(&example()), first);
        }
    }

    #[test]
    fn test_catalog_order_is_preserved() {
        let emails = generate(&example());
        let position = |e: &str| emails.iter().position(|x| x == e).unwrap();
        assert!(position("careers@example.com") < position("jobs@example.com"));
        // The second "recruiter" entry does not move the first one.
        assert_eq!(position("recruiter@example.com"), 9);
        assert_eq!(emails[10], "recruitment@example.com");
    }

    #[test]
    fn test_generate_corporate_emails_normalizes_input() {
        let from_url = generate_corporate_emails("https://www.Example.COM/careers");
        assert_eq!(from_url, generate(&example()));
    }

    #[test]
    fn test_generate_corporate_emails_invalid_input_is_empty() {
        assert!(generate_corporate_emails("").is_empty());
        assert!(generate_corporate_emails("not a domain").is_empty());
        assert!(generate_corporate_emails("example.").is_empty());
    }
}
