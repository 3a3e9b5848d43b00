/// How the router interacts with the cache for a quote.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, strum::Display)]
pub enum CacheMode {
    /// The cache is neither read nor written.
    #[default]
    Darkmode,
    /// Cached routes are served when present and refreshed after a live
    /// computation.
    Livemode,
    /// The quote is always computed live. The cache is read and written only
    /// to compare against the live result, never to serve it.
    Tapcompare,
}

impl CacheMode {
    pub fn reads(self) -> bool {
        !matches!(self, CacheMode::Darkmode)
    }

    pub fn writes(self) -> bool {
        !matches!(self, CacheMode::Darkmode)
    }

    pub fn serves(self) -> bool {
        matches!(self, CacheMode::Livemode)
    }
}

/// A range of trade amounts sharing a caching policy. The range starts at
/// `threshold` whole token units and ends at the next bucket's threshold.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bucket {
    pub threshold: u64,
    pub blocks_to_live: u64,
    pub cache_mode: CacheMode,
    /// Upper bound on split routes stored for this bucket.
    pub max_splits: Option<usize>,
}

impl Bucket {
    pub fn new(threshold: u64, blocks_to_live: u64, cache_mode: CacheMode) -> Self {
        Self {
            threshold,
            blocks_to_live,
            cache_mode,
            max_splits: None,
        }
    }

    pub fn with_max_splits(mut self, max_splits: usize) -> Self {
        self.max_splits = Some(max_splits);
        self
    }

    /// Identifier of the bucket within its strategy, used in storage keys.
    pub fn id(&self) -> u64 {
        self.threshold
    }

    pub fn accepts_splits(&self, splits: usize) -> bool {
        self.max_splits.is_none_or(|max| splits <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_capabilities() {
        assert!(!CacheMode::Darkmode.reads());
        assert!(!CacheMode::Darkmode.writes());
        assert!(CacheMode::Livemode.serves());
        assert!(CacheMode::Tapcompare.reads());
        assert!(CacheMode::Tapcompare.writes());
        assert!(!CacheMode::Tapcompare.serves());
        assert_eq!(CacheMode::default(), CacheMode::Darkmode);
    }

    #[test]
    fn split_limits() {
        let bucket = Bucket::new(1, 2, CacheMode::Livemode);
        assert!(bucket.accepts_splits(7));
        let bucket = bucket.with_max_splits(2);
        assert!(bucket.accepts_splits(2));
        assert!(!bucket.accepts_splits(3));
    }
}
