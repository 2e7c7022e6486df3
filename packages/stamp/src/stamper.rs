use crate::hasher::{ContentHasher, Sha256Hasher};
use crate::StampError;
use chrono::{DateTime, Utc};
use signet_compiler_html::escape_html;
use tracing::{debug, instrument, warn};

/// Display format of the capture time
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Number of digest characters shown in the short form
pub const SHORT_HASH_LEN: usize = 12;

/// Attribute carrying `{algorithm}:{digest}` on the appended block
pub const STAMP_ATTRIBUTE: &str = "data-signet-stamp";

const ANONYMOUS: &str = "Anonymous";

const BLOCK_STYLE: &str = "margin-top:8px;font-family:Arial, Helvetica, sans-serif;\
font-size:10px;line-height:1.4;color:#9ca3af";

/// Result of stamping an HTML fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    /// Hex digest of the unstamped HTML
    pub hash: String,
    pub short_hash: String,
    pub captured_at: DateTime<Utc>,
    /// `captured_at` formatted for display
    pub timestamp: String,
    pub message: String,
    /// The original HTML followed by the stamp block
    pub augmented_html: String,
}

/// Outcome of checking a stamped fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Content still hashes to the recorded digest
    Valid { hash: String },
    /// Content changed after stamping
    Tampered { recorded: String, actual: String },
    /// No stamp block found
    Unstamped,
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid { .. })
    }
}

/// Computes integrity stamps with a pluggable hashing primitive
#[derive(Debug, Clone, Default)]
pub struct Stamper<H = Sha256Hasher> {
    hasher: H,
}

impl Stamper<Sha256Hasher> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: ContentHasher> Stamper<H> {
    pub fn with_hasher(hasher: H) -> Self {
        Self { hasher }
    }

    /// Stamp `html` with the current time
    pub fn stamp(&self, html: &str, author: &str) -> Result<Stamp, StampError> {
        self.stamp_at(html, author, Utc::now())
    }

    /// Stamp `html` as captured at `captured_at`.
    ///
    /// The digest covers `html` exactly as given; the block is appended
    /// afterwards.
    #[instrument(skip(self, html), fields(bytes = html.len()))]
    pub fn stamp_at(
        &self,
        html: &str,
        author: &str,
        captured_at: DateTime<Utc>,
    ) -> Result<Stamp, StampError> {
        let hash = self.digest(html)?;
        Ok(self.assemble(html, author, hash, captured_at))
    }

    /// Check that a stamped fragment still matches its recorded digest
    pub fn verify(&self, stamped_html: &str) -> Result<Verification, StampError> {
        let marker = format!("<div {STAMP_ATTRIBUTE}=\"");
        let Some(start) = stamped_html.rfind(&marker) else {
            return Ok(Verification::Unstamped);
        };

        let content = &stamped_html[..start];
        let rest = &stamped_html[start + marker.len()..];
        let value = rest
            .split('"')
            .next()
            .filter(|_| rest.contains('"'))
            .ok_or_else(|| StampError::MalformedStamp("unterminated attribute".to_string()))?;

        let (algorithm, recorded) = value
            .split_once(':')
            .ok_or_else(|| StampError::MalformedStamp(format!("missing algorithm in {value:?}")))?;
        if algorithm != self.hasher.algorithm() {
            return Err(StampError::UnsupportedAlgorithm(algorithm.to_string()));
        }

        let actual = self.digest(content)?;
        if actual == recorded {
            Ok(Verification::Valid { hash: actual })
        } else {
            warn!(recorded, actual = %actual, "Stamped content does not match its digest");
            Ok(Verification::Tampered {
                recorded: recorded.to_string(),
                actual,
            })
        }
    }

    fn digest(&self, content: &str) -> Result<String, StampError> {
        let hash = self.hasher.hash_hex(content.as_bytes())?;
        check_digest(&hash)?;
        Ok(hash)
    }

    fn assemble(
        &self,
        html: &str,
        author: &str,
        hash: String,
        captured_at: DateTime<Utc>,
    ) -> Stamp {
        let timestamp = captured_at.format(TIMESTAMP_FORMAT).to_string();
        let author = match author.trim() {
            "" => ANONYMOUS,
            trimmed => trimmed,
        };
        let message = format!("Signed by {author} on {timestamp}");
        let short_hash: String = hash.chars().take(SHORT_HASH_LEN).collect();

        let block = format!(
            r#"<div {STAMP_ATTRIBUTE}="{algorithm}:{hash}" style="{BLOCK_STYLE}">{message} &middot; {short_hash}<br /><span style="font-family:monospace;font-size:9px">{hash}</span></div>"#,
            algorithm = self.hasher.algorithm(),
            message = escape_html(&message),
        );

        debug!(short_hash = %short_hash, "Stamp computed");

        Stamp {
            augmented_html: format!("{html}{block}"),
            hash,
            short_hash,
            captured_at,
            timestamp,
            message,
        }
    }
}

#[cfg(feature = "async")]
impl<H: ContentHasher + Clone + 'static> Stamper<H> {
    /// Stamp with the hash computed on the blocking thread pool
    pub async fn stamp_async(&self, html: String, author: &str) -> Result<Stamp, StampError> {
        let hasher = self.hasher.clone();
        let content = html.clone();

        let hash = tokio::task::spawn_blocking(move || hasher.hash_hex(content.as_bytes()))
            .await
            .map_err(|e| StampError::HashComputationFailure(e.to_string()))??;
        check_digest(&hash)?;

        Ok(self.assemble(&html, author, hash, Utc::now()))
    }
}

/// A digest must be non-empty lowercase hex, otherwise no stamp is produced
fn check_digest(hash: &str) -> Result<(), StampError> {
    if hash.is_empty() || !hash.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')) {
        return Err(StampError::HashComputationFailure(format!(
            "hasher returned an invalid digest {hash:?}"
        )));
    }
    Ok(())
}
