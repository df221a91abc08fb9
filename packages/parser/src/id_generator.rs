use crate::ast::SectionId;
use crc32fast::Hasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static GENERATOR_NONCE: AtomicU64 = AtomicU64::new(0);

/// Generate a stable seed from a project key using CRC32
pub fn get_project_seed(key: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for sections within a project
#[derive(Debug, Clone)]
pub struct IDGenerator {
    seed: String, // Project seed (CRC32)
    count: u64,   // Sequential counter
}

impl IDGenerator {
    pub fn new(key: &str) -> Self {
        Self {
            seed: get_project_seed(key),
            count: 0,
        }
    }

    /// Generator whose seed differs from every other fresh generator in this process
    pub fn fresh() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let nonce = GENERATOR_NONCE.fetch_add(1, Ordering::Relaxed);
        Self::new(&format!("{}:{}:{}", std::process::id(), nanos, nonce))
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> SectionId {
        self.count += 1;
        SectionId::new(format!("{}-{}", self.seed, self.count))
    }

    /// Get project seed
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of ids issued so far
    pub fn issued(&self) -> u64 {
        self.count
    }
}

impl Default for IDGenerator {
    fn default() -> Self {
        Self::fresh()
    }
}
