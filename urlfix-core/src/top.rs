//! Bounded selection of the highest-count records.
//!
//! Ranking is by count, highest first, with ties going to the
//! lexicographically smaller URL. The tie rule makes the result independent
//! of input order, so a parallel scan that merges per-segment results
//! agrees exactly with a single sequential pass.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::{Record, RecordRef};

/// Heap entry; `Greater` means ranked higher.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Ranked(Record);

impl Ranked {
    /// How a candidate `(url, count)` ranks against this entry.
    fn candidate_cmp(&self, url: &str, count: u64) -> Ordering {
        count
            .cmp(&self.0.count)
            .then_with(|| self.0.url.as_str().cmp(url))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .count
            .cmp(&other.0.count)
            .then_with(|| other.0.url.cmp(&self.0.url))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Keeps the `k` highest-ranked records seen so far.
///
/// Internally a min-heap of size `k`: the root is the weakest kept record
/// and is replaced whenever something stronger arrives.
#[derive(Debug, Clone)]
pub struct TopK {
    k: usize,
    heap: BinaryHeap<Reverse<Ranked>>,
}

impl TopK {
    pub fn new(k: usize) -> Self {
        TopK {
            k,
            heap: BinaryHeap::with_capacity(k.min(1024)),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Offer a borrowed record. The URL is only copied if the record is kept.
    pub fn offer(&mut self, record: RecordRef<'_>) {
        if self.k == 0 {
            return;
        }

        if self.heap.len() < self.k {
            self.heap.push(Reverse(Ranked(record.to_record())));
            return;
        }

        if let Some(mut weakest) = self.heap.peek_mut() {
            if weakest.0.candidate_cmp(record.url, record.count) == Ordering::Greater {
                *weakest = Reverse(Ranked(record.to_record()));
            }
        }
    }

    /// Offer an owned record.
    pub fn push(&mut self, record: Record) {
        if self.k == 0 {
            return;
        }

        let entry = Reverse(Ranked(record));
        if self.heap.len() < self.k {
            self.heap.push(entry);
        } else if let Some(mut weakest) = self.heap.peek_mut() {
            // Reverse flips the order: smaller means ranked higher
            if entry < *weakest {
                *weakest = entry;
            }
        }
    }

    /// Fold another selection into this one.
    pub fn merge(mut self, other: TopK) -> TopK {
        for Reverse(Ranked(record)) in other.heap {
            self.push(record);
        }
        self
    }

    /// The kept records, highest ranked first.
    pub fn into_sorted_vec(self) -> Vec<Record> {
        // Ascending in Reverse order is descending in rank
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(Ranked(record))| record)
            .collect()
    }
}
