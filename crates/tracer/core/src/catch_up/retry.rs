use std::collections::{BTreeMap, BTreeSet};

/// What happened to a block after a failed retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStatus {
    /// The block stays queued for another attempt.
    Pending {
        /// Failed retries so far.
        attempts: u32,
    },
    /// The block ran out of retries and was removed from the queue.
    DeadLettered {
        /// Failed retries in total.
        attempts: u32,
    },
}

/// Ordered set of skipped block numbers with their failed retry counts.
///
/// A dead-lettered block is never queued again, even if a later pass skips it
/// once more. Lives in memory only; a restart forgets every entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryQueue {
    pending: BTreeMap<u64, u32>,
    dead_lettered: BTreeSet<u64>,
    max_retries: u32,
}

impl RetryQueue {
    /// Creates a queue giving each block `max_retries` retries. `0` disables the queue.
    pub const fn new(max_retries: u32) -> Self {
        Self { pending: BTreeMap::new(), dead_lettered: BTreeSet::new(), max_retries }
    }

    /// Returns `true` if skipped blocks are tracked at all.
    pub const fn is_enabled(&self) -> bool {
        self.max_retries > 0
    }

    /// Queues a block skipped during a catch-up pass.
    ///
    /// A block that is already queued keeps its retry count. Returns `true` if
    /// the block is queued after the call.
    pub fn schedule(&mut self, block_number: u64) -> bool {
        if !self.is_enabled() || self.dead_lettered.contains(&block_number) {
            return false;
        }
        self.pending.entry(block_number).or_insert(0);
        true
    }

    /// Removes a block that has been processed. Returns `true` if it was queued.
    pub fn resolve(&mut self, block_number: u64) -> bool {
        self.dead_lettered.remove(&block_number);
        self.pending.remove(&block_number).is_some()
    }

    /// Records a failed retry of a queued block.
    pub fn record_failure(&mut self, block_number: u64) -> RetryStatus {
        let attempts = self.pending.get(&block_number).map_or(1, |attempts| attempts + 1);
        if attempts >= self.max_retries {
            self.pending.remove(&block_number);
            self.dead_lettered.insert(block_number);
            return RetryStatus::DeadLettered { attempts };
        }

        self.pending.insert(block_number, attempts);
        RetryStatus::Pending { attempts }
    }

    /// Returns the queued block numbers in ascending order.
    pub fn pending(&self) -> Vec<u64> {
        self.pending.keys().copied().collect()
    }

    /// Returns `true` if the block ran out of retries.
    pub fn is_dead_lettered(&self, block_number: u64) -> bool {
        self.dead_lettered.contains(&block_number)
    }

    /// Returns `true` if the block is queued.
    pub fn contains(&self, block_number: u64) -> bool {
        self.pending.contains_key(&block_number)
    }

    /// Number of queued blocks.
    pub const fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is queued.
    pub const fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_queue_tracks_nothing() {
        let mut queue = RetryQueue::new(0);
        assert!(!queue.schedule(101));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_pending_is_ascending() {
        let mut queue = RetryQueue::new(3);
        queue.schedule(105);
        queue.schedule(101);
        queue.schedule(103);
        queue.schedule(101);
        assert_eq!(queue.pending(), vec![101, 103, 105]);
    }

    #[test]
    fn test_dead_letter_after_max_retries() {
        let mut queue = RetryQueue::new(2);
        queue.schedule(101);

        assert_eq!(queue.record_failure(101), RetryStatus::Pending { attempts: 1 });
        // Skipping it again in a later pass keeps the count.
        queue.schedule(101);
        assert_eq!(queue.record_failure(101), RetryStatus::DeadLettered { attempts: 2 });
        assert!(!queue.contains(101));
    }

    #[test]
    fn test_dead_lettered_block_is_not_queued_again() {
        let mut queue = RetryQueue::new(1);
        queue.schedule(101);
        assert_eq!(queue.record_failure(101), RetryStatus::DeadLettered { attempts: 1 });

        assert!(!queue.schedule(101));
        assert!(queue.is_empty());
        assert!(queue.is_dead_lettered(101));

        // Processing it in a later pass clears the mark.
        queue.resolve(101);
        assert!(!queue.is_dead_lettered(101));
        assert!(queue.schedule(101));
    }

    #[test]
    fn test_resolve() {
        let mut queue = RetryQueue::new(3);
        queue.schedule(101);
        queue.record_failure(101);

        assert!(queue.resolve(101));
        assert!(!queue.resolve(101));
        assert!(queue.is_empty());
    }
}
