//! Link and image source validation.
//!
//! Only schemes that survive the common mail clients' sanitizers are
//! accepted. Anything else is an [`InvalidLink`], which the compiler treats
//! as "no link" rather than failing the render.

use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid link {url:?}: {reason}")]
pub struct InvalidLink {
    pub url: String,
    pub reason: &'static str,
}

/// A validated hyperlink target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// The target as the user wrote it (trimmed), not yet HTML-escaped
    pub href: String,
    /// http(s) links open in a new tab; mailto/tel do not
    pub external: bool,
}

fn invalid(url: &str, reason: &'static str) -> InvalidLink {
    InvalidLink {
        url: url.to_string(),
        reason,
    }
}

fn parse(raw: &str) -> Result<(String, Url), InvalidLink> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid(raw, "empty"));
    }
    if trimmed.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(invalid(raw, "contains whitespace or control characters"));
    }

    let parsed = Url::parse(trimmed).map_err(|_| invalid(raw, "not an absolute URL"))?;
    Ok((trimmed.to_string(), parsed))
}

/// Validate a hyperlink target: absolute http(s) with a host, `mailto:` or `tel:`
pub fn validate_link(raw: &str) -> Result<Link, InvalidLink> {
    let (href, parsed) = parse(raw)?;

    match parsed.scheme() {
        "http" | "https" => {
            if parsed.host_str().map_or(true, str::is_empty) {
                return Err(invalid(raw, "missing host"));
            }
            Ok(Link {
                href,
                external: true,
            })
        }
        "mailto" => {
            if !parsed.path().contains('@') {
                return Err(invalid(raw, "mailto without an address"));
            }
            Ok(Link {
                href,
                external: false,
            })
        }
        "tel" => {
            let number = parsed.path();
            let valid = number.chars().any(|c| c.is_ascii_digit())
                && number
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.'));
            if !valid {
                return Err(invalid(raw, "tel without a phone number"));
            }
            Ok(Link {
                href,
                external: false,
            })
        }
        _ => Err(invalid(raw, "unsupported scheme")),
    }
}

/// Validate an image source: absolute http(s) only
pub fn validate_image_src(raw: &str) -> Result<String, InvalidLink> {
    let (src, parsed) = parse(raw)?;

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().map_or(false, |h| !h.is_empty()) => Ok(src),
        _ => Err(invalid(raw, "images must be served over http(s)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_supported_schemes() {
        assert!(validate_link("https://example.com/about?x=1&y=2").unwrap().external);
        assert!(!validate_link("mailto:jane@example.com").unwrap().external);
        assert!(validate_link("tel:+1-555-0100").is_ok());
        assert_eq!(
            validate_link("  https://example.com  ").unwrap().href,
            "https://example.com"
        );
    }

    #[test]
    fn test_rejects_dangerous_or_malformed() {
        for bad in [
            "javascript:alert(1)",
            "JavaScript:alert(1)",
            "data:text/html,<script>",
            "vbscript:msgbox",
            "example.com",
            "/relative/path",
            "https://",
            "mailto:",
            "tel:call-me",
            "https://exa mple.com",
            "",
        ] {
            assert!(validate_link(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_image_sources() {
        assert!(validate_image_src("https://cdn.example.com/logo.png").is_ok());
        assert!(validate_image_src("mailto:jane@example.com").is_err());
        assert!(validate_image_src("data:image/png;base64,AAAA").is_err());
    }
}
