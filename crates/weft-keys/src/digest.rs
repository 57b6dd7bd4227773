use weft_types::StorageKey;

/// Domain-separated BLAKE3 digest down to key width.
///
/// Each digest carries a domain tag that is prepended to every hash
/// computation, so a key digested under one domain can never collide with
/// a key digested under another even for identical input text. This is the
/// explicit path for names longer than the fixed key width; [`crate::KeyCodec`]
/// never invokes it on the caller's behalf.
pub struct KeyDigest {
    domain: &'static str,
}

impl KeyDigest {
    /// Digest for ordinary storage record names.
    pub const STORAGE: Self = Self {
        domain: "weft-key-v1",
    };

    /// Create a digest with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Digest key text into a [`StorageKey`].
    pub fn digest(&self, raw: &str) -> StorageKey {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(raw.as_bytes());
        StorageKey::from_bytes(*hasher.finalize().as_bytes())
    }

    /// The domain tag used by this digest.
    pub fn domain(&self) -> &str {
        self.domain
    }
}
