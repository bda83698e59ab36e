use sha2::{Digest, Sha256};
use std::collections::HashSet;
use tokio::sync::Mutex;

/// Hex-encoded SHA-256 of the given bytes
pub fn content_digest(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Process-local set of content digests already accepted (or in flight).
///
/// Entries live for the lifetime of the process and are never evicted.
#[derive(Default)]
pub struct ContentHashCache {
    digests: Mutex<HashSet<String>>,
}

impl ContentHashCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a digest. Returns `false` if it is already present.
    ///
    /// Check and insert happen under one lock, so two concurrent uploads of
    /// the same content cannot both succeed.
    pub async fn reserve(&self, digest: &str) -> bool {
        self.digests.lock().await.insert(digest.to_string())
    }

    /// Drop a reservation made for an upload that did not complete
    pub async fn release(&self, digest: &str) {
        self.digests.lock().await.remove(digest);
    }

    #[cfg(test)]
    pub async fn contains(&self, digest: &str) -> bool {
        self.digests.lock().await.contains(digest)
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.digests.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_content_digest_is_sha256_hex() {
        assert_eq!(
            content_digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(content_digest(b"abc").len(), 64);
        assert_ne!(content_digest(b"abc"), content_digest(b"abd"));
    }

    #[tokio::test]
    async fn test_reserve_and_release() {
        let cache = ContentHashCache::new();

        assert!(cache.reserve("abc").await);
        assert!(!cache.reserve("abc").await);
        assert!(cache.contains("abc").await);

        cache.release("abc").await;
        assert!(!cache.contains("abc").await);
        assert!(cache.reserve("abc").await);
    }

    #[tokio::test]
    async fn test_concurrent_reservations_admit_one() {
        let cache = Arc::new(ContentHashCache::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.reserve("same-digest").await })
            })
            .collect();

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }

        assert_eq!(admitted, 1);
        assert_eq!(cache.len().await, 1);
    }
}
