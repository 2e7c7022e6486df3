//! # Signet Stamp
//!
//! Appends a provenance block to exported signature HTML: who exported it,
//! when, and the SHA-256 digest of the content as it was before the block
//! was added.
//!
//! ```
//! use signet_stamp::Stamper;
//!
//! let stamper = Stamper::new();
//! let stamp = stamper.stamp("<table></table>", "Jane Doe").unwrap();
//!
//! assert_eq!(stamp.hash.len(), 64);
//! assert!(stamp.augmented_html.starts_with("<table></table>"));
//! assert!(stamper.verify(&stamp.augmented_html).unwrap().is_valid());
//! ```

mod error;
mod hasher;
mod stamper;

pub use error::StampError;
pub use hasher::{sha256_hex, ContentHasher, Sha256Hasher};
pub use stamper::{
    Stamp, Stamper, Verification, SHORT_HASH_LEN, STAMP_ATTRIBUTE, TIMESTAMP_FORMAT,
};

/// Stamp with SHA-256 and the current time
pub fn stamp(html: &str, author: &str) -> Result<Stamp, StampError> {
    Stamper::new().stamp(html, author)
}
