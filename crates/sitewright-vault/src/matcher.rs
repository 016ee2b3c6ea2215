//! Fuzzy domain matching for vault records.
//!
//! Stored entries label their site differently depending on who created them:
//! a product title ("Linear"), a bare domain ("linear.app"), a full login URL
//! ("https://linear.app/login"), or a label with the dots replaced
//! ("linear_app"). Matching therefore works on normalized signatures: a
//! record matches when one of its signatures (title or any site URL hostname)
//! equals or contains a signature derived from the lookup domain.
//!
//! Containment is deliberately one-sided. A record for `app.linear.app`
//! matches a lookup for `linear.app`, but a record for `linear.app` does not
//! match a lookup for `app.linear.app`: the subdomain names a different
//! registrable structure and may belong to a different account.

use url::Url;

/// Minimum length for a root-label candidate, so single-letter hosts don't
/// match every record containing that letter.
const MIN_ROOT_LABEL_LEN: usize = 3;

/// Normalized signature: lowercased with everything non-alphanumeric
/// stripped.
pub fn signature(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Extract a lowercase hostname from a domain, URL, or host:port string.
fn hostname(input: &str) -> String {
    let trimmed = input.trim();
    if let Ok(url) = Url::parse(trimmed) {
        if let Some(host) = url.host_str() {
            return host.to_lowercase();
        }
    }
    let without_scheme = trimmed
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(trimmed);
    without_scheme
        .split(['/', ':', '?', '#'])
        .next()
        .unwrap_or("")
        .to_lowercase()
}

/// Expand a lookup domain into the candidate labels a stored record might
/// have used: the domain itself, a dots-to-underscores variant, the bare
/// hostname, the hostname without a `www.` prefix, and (for two-label
/// registrable names) the root label.
pub fn domain_candidates(domain: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    let mut push = |candidate: String, candidates: &mut Vec<String>| {
        if !candidate.is_empty() && !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    };

    let exact = domain.trim().to_lowercase();
    push(exact.clone(), &mut candidates);

    let host = hostname(domain);
    push(host.clone(), &mut candidates);
    push(host.replace('.', "_"), &mut candidates);

    let without_www = host.strip_prefix("www.").unwrap_or(&host).to_string();
    push(without_www.clone(), &mut candidates);

    if without_www.split('.').count() == 2 {
        let root = without_www.split('.').next().unwrap_or("");
        if root.len() >= MIN_ROOT_LABEL_LEN {
            push(root.to_string(), &mut candidates);
        }
    }

    candidates
}

/// Whether a stored record (title plus associated site URLs) matches a lookup
/// domain under the signature rule.
pub fn record_matches(title: &str, urls: &[String], domain: &str) -> bool {
    let candidate_sigs: Vec<String> = domain_candidates(domain)
        .iter()
        .map(|c| signature(c))
        .filter(|s| !s.is_empty())
        .collect();

    let mut record_sigs = vec![signature(title)];
    record_sigs.extend(urls.iter().map(|u| signature(&hostname(u))));

    record_sigs
        .iter()
        .filter(|r| !r.is_empty())
        .any(|r| candidate_sigs.iter().any(|c| r == c || r.contains(c.as_str())))
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
