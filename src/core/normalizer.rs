//! Turns free-form user input into a canonical [`Domain`].
//!
//! Accepted shapes are bare hosts (`Example.com`), `www.` hosts and URLs with
//! any scheme (`https://www.example.com/careers?x=1`). Anything else resolves
//! to `None`; the normalizer never errors and never panics.

use crate::domain::model::Domain;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const MAX_DOMAIN_LEN: usize = 253;

/// Labels of `[a-z0-9-]` (1..=63 chars, no leading/trailing hyphen) ending in
/// an alphabetic top-level label of at least two characters.
static DOMAIN_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$")
        .expect("domain shape pattern is valid")
});

static REPEATED_SLASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^:]/)/+").expect("slash pattern is valid"));

static TRAILING_PORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":\d+$").expect("port pattern is valid"));

/// Last resort when the URL parser rejects the input outright.
static LENIENT_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?([a-z0-9-]+\.[a-z0-9.-]+)")
        .expect("lenient host pattern is valid")
});

pub fn normalize(input: &str) -> Option<Domain> {
    let clean = input.trim().to_lowercase();
    if clean.is_empty() {
        return None;
    }

    let host = if let Some((_, rest)) = clean.split_once("://") {
        // The URL parser punycodes non-ASCII hosts; only the host must be ASCII.
        if !cut_path(rest).is_ascii() {
            return None;
        }
        let collapsed = REPEATED_SLASHES.replace_all(&clean, "${1}");
        match Url::parse(&collapsed) {
            Ok(url) => url.host_str().map(strip_www).unwrap_or_default().to_string(),
            Err(e) => {
                tracing::debug!("URL parse failed for '{}': {}, trying lenient match", clean, e);
                return lenient_host(&clean);
            }
        }
    } else {
        strip_www(&clean).to_string()
    };

    let host = strip_port(cut_path(&host));
    accept(host)
}

/// Accepts `host` only if it is already in canonical form, with no
/// `www.`/URL/port stripping. Used when reading persisted domains back.
pub fn canonical(host: &str) -> Option<Domain> {
    accept(host)
}

/// True iff [`normalize`] produces a domain.
pub fn is_valid_domain(input: &str) -> bool {
    normalize(input).is_some()
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

fn cut_path(host: &str) -> &str {
    host.split(['/', '?', '#']).next().unwrap_or_default()
}

fn strip_port(host: &str) -> &str {
    match TRAILING_PORT.find(host) {
        Some(m) => &host[..m.start()],
        None => host,
    }
}

fn lenient_host(clean: &str) -> Option<Domain> {
    let captures = LENIENT_HOST.captures(clean)?;
    accept(captures.get(1)?.as_str())
}

fn accept(host: &str) -> Option<Domain> {
    if !host.contains('.') || host.ends_with('.') || host.len() > MAX_DOMAIN_LEN {
        return None;
    }
    if !DOMAIN_SHAPE.is_match(host) {
        return None;
    }
    Some(Domain::from_canonical(host.to_string()))
}
