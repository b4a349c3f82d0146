use dashmap::DashSet;
use crawl_frontier_core::request::Request;

/// Index of request identities that have already been seen
pub trait DuplicateRemover: Send + Sync + 'static {
    /// Record the request's identity.
    ///
    /// Returns `true` if it had not been seen before. The test and the record
    /// happen as one atomic step, so two concurrent callers with the same
    /// identity never both get `true`.
    fn is_new_and_record(&self, request: &Request) -> bool;

    /// Forget all recorded identities
    fn clear(&self);

    /// Number of distinct identities recorded since the last clear
    fn count(&self) -> u64;
}

/// In-memory duplicate index keyed on request fingerprints
#[derive(Debug, Default)]
pub struct HashSetDuplicateRemover {
    seen: DashSet<String>,
}

impl HashSetDuplicateRemover {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index sized for `capacity` identities
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: DashSet::with_capacity(capacity),
        }
    }

    /// Check whether a request has been seen without recording it
    pub fn contains(&self, request: &Request) -> bool {
        self.seen.contains(&request.fingerprint())
    }
}

impl DuplicateRemover for HashSetDuplicateRemover {
    fn is_new_and_record(&self, request: &Request) -> bool {
        self.seen.insert(request.fingerprint())
    }

    fn clear(&self) {
        self.seen.clear();
    }

    fn count(&self) -> u64 {
        self.seen.len() as u64
    }
}
