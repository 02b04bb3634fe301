//! Stale response protection for view state.
//!
//! Rapid re-filtering can leave an older request resolving after a newer
//! one. Each fetch takes a generation number from its slot; a response is
//! applied only if its generation is still current.

/// Holds one piece of fetched view state plus the generation counter that
/// decides whether an arriving response may replace it.
#[derive(Debug)]
pub struct FetchSlot<T> {
    generation: u64,
    value: Option<T>,
}

impl<T> FetchSlot<T> {
    pub fn new() -> FetchSlot<T> {
        FetchSlot {
            generation: 0,
            value: None,
        }
    }

    /// Start a new request, superseding all in-flight ones. Returns the
    /// generation to pass back to [`FetchSlot::complete`].
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Apply a finished request's result. Returns false (and drops the
    /// value) when a newer request has started since `generation` was
    /// issued.
    pub fn complete(&mut self, generation: u64, value: T) -> bool {
        if generation != self.generation {
            log::debug!(
                "Discarding stale response generation={generation} current={current}",
                current = self.generation
            );
            return false;
        }
        self.value = Some(value);
        true
    }

    /// The most recent non-superseded result, if any.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_response_is_applied() {
        let mut slot = FetchSlot::new();
        let generation = slot.begin();
        assert!(slot.complete(generation, "first"));
        assert_eq!(slot.get(), Some(&"first"));
    }

    #[test]
    fn test_superseded_response_is_discarded() {
        let mut slot = FetchSlot::new();
        let old = slot.begin();
        let new = slot.begin();
        assert!(slot.complete(new, "new"));
        // Older request resolves after the newer one already landed
        assert!(!slot.complete(old, "old"));
        assert_eq!(slot.get(), Some(&"new"));
    }

    #[test]
    fn test_out_of_order_arrival_keeps_latest_request() {
        let mut slot: FetchSlot<&str> = FetchSlot::new();
        let old = slot.begin();
        let new = slot.begin();
        assert!(!slot.complete(old, "old"));
        assert_eq!(slot.get(), None, "Stale result must not appear at all");
        assert!(slot.complete(new, "new"));
        assert_eq!(slot.get(), Some(&"new"));
    }
}
