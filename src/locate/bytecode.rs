use std::num::NonZeroUsize;

use alloy::primitives::Bytes;
use lru::LruCache;
use parking_lot::Mutex;

pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Decides whether deployed code is the disperse contract.
///
/// Observed code matches when it equals the expected runtime bytecode or
/// starts with it (immutable constructor metadata may follow). Comparison
/// ignores case and an optional `0x` prefix. Decisions are memoized per
/// observed code string in a bounded LRU cache.
pub struct BytecodeMatcher {
    expected: String,
    cache: Mutex<LruCache<String, bool>>,
}

impl BytecodeMatcher {
    pub fn new(runtime: &str, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        BytecodeMatcher {
            expected: normalize(runtime),
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Empty code (`""` or `"0x"`) never matches and is not cached.
    pub fn is_disperse_contract(&self, code: Option<&str>) -> bool {
        let Some(code) = code else {
            return false;
        };
        if is_empty_code(code) {
            return false;
        }

        if let Some(hit) = self.cache.lock().get(code) {
            return *hit;
        }

        let observed = normalize(code);
        let verdict = !self.expected.is_empty() && observed.starts_with(&self.expected);
        self.cache.lock().put(code.to_string(), verdict);
        verdict
    }

    pub fn matches_bytes(&self, code: &Bytes) -> bool {
        if code.is_empty() {
            return false;
        }
        self.is_disperse_contract(Some(&code.to_string()))
    }

    /// Previously computed decision for this exact code string.
    pub fn cached(&self, code: &str) -> Option<bool> {
        self.cache.lock().peek(code).copied()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }
}

fn is_empty_code(code: &str) -> bool {
    code.is_empty() || code == "0x"
}

fn normalize(code: &str) -> String {
    let stripped = code
        .strip_prefix("0x")
        .or_else(|| code.strip_prefix("0X"))
        .unwrap_or(code);
    stripped.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUNTIME: &str = "0x608060405234801561001057600080fd5b50";

    fn matcher() -> BytecodeMatcher {
        BytecodeMatcher::new(RUNTIME, DEFAULT_CACHE_CAPACITY)
    }

    #[test]
    fn test_empty_code() {
        let m = matcher();
        assert!(!m.is_disperse_contract(None));
        assert!(!m.is_disperse_contract(Some("")));
        assert!(!m.is_disperse_contract(Some("0x")));
        assert_eq!(m.cache_len(), 0);
    }

    #[test]
    fn test_exact_and_prefix_match() {
        let m = matcher();
        assert!(m.is_disperse_contract(Some(RUNTIME)));
        assert!(m.is_disperse_contract(Some(&format!("{RUNTIME}deadbeef"))));
        assert!(m.is_disperse_contract(Some("608060405234801561001057600080fd5b50")));
        assert!(m.is_disperse_contract(Some("0x608060405234801561001057600080FD5B50")));
    }

    #[test]
    fn test_mismatch() {
        let m = matcher();
        assert!(!m.is_disperse_contract(Some("0xdeadbeef")));
        assert!(!m.is_disperse_contract(Some("0x608060405234801561001057600080fd5b99")));
        // Shorter than the expected code is not a match either.
        assert!(!m.is_disperse_contract(Some("0x6080604052")));
    }

    #[test]
    fn test_cache() {
        let m = matcher();
        assert_eq!(m.cached(RUNTIME), None);
        assert!(m.is_disperse_contract(Some(RUNTIME)));
        assert_eq!(m.cached(RUNTIME), Some(true));
        assert!(!m.is_disperse_contract(Some("0xdeadbeef")));
        assert_eq!(m.cached("0xdeadbeef"), Some(false));
        assert_eq!(m.cache_len(), 2);
        m.clear_cache();
        assert_eq!(m.cache_len(), 0);
    }

    #[test]
    fn test_cache_eviction() {
        let m = BytecodeMatcher::new(RUNTIME, 2);
        m.is_disperse_contract(Some("0xaa"));
        m.is_disperse_contract(Some("0xbb"));
        m.is_disperse_contract(Some("0xcc"));
        assert_eq!(m.cache_len(), 2);
        assert_eq!(m.cached("0xaa"), None);
        assert_eq!(m.cached("0xcc"), Some(false));
    }

    #[test]
    fn test_matches_bytes() {
        let m = matcher();
        let code: Bytes = RUNTIME.parse().unwrap();
        assert!(m.matches_bytes(&code));
        assert!(!m.matches_bytes(&Bytes::new()));
    }
}
