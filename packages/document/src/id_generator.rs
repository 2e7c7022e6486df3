use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

/// Generate a document seed from its name using CRC32
pub fn get_document_seed(name: &str) -> String {
    let mut buff = String::from(name);
    if !name.starts_with("signet://") {
        buff = format!("signet://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for rows, columns and elements within a document.
///
/// The generator lives inside the document so snapshots and saved documents
/// keep handing out fresh ids after a reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IDGenerator {
    seed: String, // Document seed (CRC32)
    count: u64,   // Sequential counter
}

impl IDGenerator {
    pub fn new(name: &str) -> Self {
        Self {
            seed: get_document_seed(name),
            count: 0,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Get document seed
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of ids handed out so far
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Make sure future ids never collide with `id`, which was produced by
    /// this generator's seed (used when loading saved documents).
    pub(crate) fn observe(&mut self, id: &str) {
        let counter = id
            .strip_prefix(self.seed.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|n| n.parse::<u64>().ok());

        if let Some(n) = counter {
            self.count = self.count.max(n);
        }
    }
}
