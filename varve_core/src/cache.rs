// Copyright 2026 the Varve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded associative cache with self-organizing eviction.
//!
//! [`SlotCache`] maps `u32` keys to fixed backing-store slots of `T`. The
//! capacity is fixed at construction and every operation is a full linear
//! scan, which is fine at the intended scale: capacities are tens of
//! entries and lookups happen per *glyph*, not per pixel.
//!
//! Eviction is pseudo-LRU. Each record carries an access stamp from a
//! global counter; a hit swaps the hit record with the lowest-stamp record
//! seen earlier in the same scan, so hot entries migrate toward the front
//! of the record array over time. This is a partial, self-organizing sort,
//! deliberately not an exact LRU list. Record identity and backing slot are
//! decoupled: promotion swaps record entries only, payload bytes never
//! move, so a slot reference stays valid for as long as its key stays
//! cached.
//!
//! The access counter is a `u64`; at per-glyph call rates it cannot wrap
//! within a device lifetime, which closes the wraparound question the
//! narrower counter of the original design left open.

use alloc::vec::Vec;

/// Backing storage could not be obtained.
///
/// Fallible constructors return this instead of aborting; nothing is
/// partially constructed when it is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocError;

impl core::fmt::Display for AllocError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("backing storage allocation failed")
    }
}

impl core::error::Error for AllocError {}

/// One cache record: a key, its immutable backing-slot index, and the
/// stamp of its most recent access. `stamp == 0` marks a never-written
/// record.
#[derive(Clone, Copy, Debug)]
struct Record {
    key: u32,
    slot: u32,
    stamp: u64,
}

/// A fixed-capacity key-to-slot cache.
pub struct SlotCache<T> {
    records: Vec<Record>,
    slots: Vec<T>,
    counter: u64,
}

impl<T> core::fmt::Debug for SlotCache<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SlotCache")
            .field("capacity", &self.records.len())
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}

impl<T: Default> SlotCache<T> {
    /// Creates a cache with `capacity` slots, each holding `T::default()`.
    ///
    /// Fails atomically: both allocations are reserved before the cache is
    /// assembled, so an error leaves nothing behind.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, AllocError> {
        assert!(capacity > 0, "cache capacity must be nonzero");

        let mut records: Vec<Record> = Vec::new();
        records.try_reserve_exact(capacity).map_err(|_| AllocError)?;
        let mut slots: Vec<T> = Vec::new();
        slots.try_reserve_exact(capacity).map_err(|_| AllocError)?;

        #[expect(
            clippy::cast_possible_truncation,
            reason = "a capacity beyond u32::MAX slots would exhaust try_reserve first"
        )]
        for i in 0..capacity {
            records.push(Record {
                key: 0,
                slot: i as u32,
                stamp: 0,
            });
            slots.push(T::default());
        }

        Ok(Self {
            records,
            slots,
            counter: 0,
        })
    }
}

impl<T> SlotCache<T> {
    /// Returns the fixed capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    /// Looks up `key`, returning its backing slot and whether it was
    /// already cached.
    ///
    /// On a miss the least-recently-stamped record is repurposed for `key`
    /// and its (stale) slot contents are returned; the caller is expected
    /// to overwrite them.
    pub fn get(&mut self, key: u32) -> (&mut T, bool) {
        self.counter += 1;

        let mut coldest = 0;
        for i in 0..self.records.len() {
            let record = self.records[i];
            if record.stamp != 0 && record.key == key {
                self.records[i].stamp = self.counter;
                // Promote: trade places with the coldest record scanned so
                // far. Slots stay put.
                self.records.swap(i, coldest);
                let slot = self.records[coldest].slot as usize;
                return (&mut self.slots[slot], true);
            }
            if record.stamp < self.records[coldest].stamp {
                coldest = i;
            }
        }

        let record = &mut self.records[coldest];
        record.key = key;
        record.stamp = self.counter;
        let slot = record.slot as usize;
        (&mut self.slots[slot], false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_lookup_misses_then_hits() {
        let mut cache = SlotCache::<u32>::new(8).unwrap();
        let (slot, found) = cache.get(b'A'.into());
        assert!(!found);
        *slot = 11;
        let (slot, found) = cache.get(b'A'.into());
        assert!(found);
        assert_eq!(*slot, 11);
    }

    #[test]
    fn distinct_keys_keep_distinct_slots() {
        let mut cache = SlotCache::<u32>::new(4).unwrap();
        for (i, key) in [10, 20, 30, 40].into_iter().enumerate() {
            let (slot, found) = cache.get(key);
            assert!(!found);
            *slot = i as u32;
        }
        for (i, key) in [10, 20, 30, 40].into_iter().enumerate() {
            let (slot, found) = cache.get(key);
            assert!(found, "key {key} should still be cached");
            assert_eq!(*slot, i as u32);
        }
    }

    #[test]
    fn eviction_takes_least_recently_touched() {
        let mut cache = SlotCache::<u32>::new(2).unwrap();
        *cache.get(1).0 = 100; // A
        *cache.get(2).0 = 200; // B
        let (slot, found) = cache.get(3); // C evicts A
        assert!(!found);
        *slot = 300;

        let (slot, found) = cache.get(2);
        assert!(found, "B was touched more recently than A");
        assert_eq!(*slot, 200);

        let (_, found) = cache.get(1);
        assert!(!found, "A must have been evicted");
    }

    #[test]
    fn hit_refreshes_recency() {
        let mut cache = SlotCache::<u32>::new(2).unwrap();
        *cache.get(1).0 = 100;
        *cache.get(2).0 = 200;
        // Touch 1 so that 2 becomes the eviction candidate.
        assert!(cache.get(1).1);
        let (_, found) = cache.get(3);
        assert!(!found);
        let (slot, found) = cache.get(1);
        assert!(found);
        assert_eq!(*slot, 100);
        assert!(!cache.get(2).1, "2 was the coldest record");
    }

    #[test]
    fn key_zero_is_a_real_key() {
        // Records start zeroed; an unwritten record must not masquerade as
        // a cached key 0.
        let mut cache = SlotCache::<u32>::new(4).unwrap();
        let (slot, found) = cache.get(0);
        assert!(!found);
        *slot = 7;
        let (slot, found) = cache.get(0);
        assert!(found);
        assert_eq!(*slot, 7);
    }

    #[test]
    fn slot_contents_survive_promotion() {
        let mut cache = SlotCache::<u32>::new(4).unwrap();
        for key in 1..=4 {
            *cache.get(key).0 = key * 10;
        }
        // Hammer one key so promotion swaps records repeatedly.
        for _ in 0..16 {
            assert_eq!(*cache.get(3).0, 30);
        }
        for key in 1..=4 {
            assert_eq!(*cache.get(key).0, key * 10, "payload for key {key} moved");
        }
    }

    #[test]
    fn oversized_capacity_fails_cleanly() {
        assert_eq!(
            SlotCache::<u64>::new(usize::MAX / 2).err(),
            Some(AllocError)
        );
    }

    #[test]
    #[should_panic(expected = "cache capacity must be nonzero")]
    fn zero_capacity_panics() {
        let _ = SlotCache::<u32>::new(0);
    }
}
