// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Bounded bundle registry.
//!
//! Fixed-capacity store mapping bundle identifiers to bundle records.
//! Capacity is [`MAX_BUNDLES`]; there is no allocator and no growth.
//! Each slot moves through `Empty → Registered → Empty` with no
//! intermediate states, and every operation either fully succeeds or
//! leaves the store exactly as it was.

use brant_abi::{Bundle, BundleId, BundleIdList, MAX_BUNDLES, RegistryError};
use log::{debug, info, trace};


/// One occupied registry slot.
#[derive(Clone, Copy, Debug)]
struct Entry {
    id: BundleId,
    bundle: Bundle,
}

/// Bounded, unique-keyed store of bundle records.
///
/// The registry exclusively owns record storage: callers receive copies,
/// never references into the store. Identifiers are unique across
/// occupied slots, and a freed identifier may be reused immediately.
pub struct BundleRegistry {
    /// Registered bundles; `None` slots are free.
    slots: [Option<Entry>; MAX_BUNDLES],
    /// Number of occupied slots.
    len: usize,
}

impl BundleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [None; MAX_BUNDLES],
            len: 0,
        }
    }

    /// Number of registered bundles.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if no bundles are registered.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Checks if every slot is occupied.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == MAX_BUNDLES
    }

    /// Number of free slots.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        MAX_BUNDLES - self.len
    }

    /// Registers `bundle` under `id`.
    ///
    /// The record is copied into the first free slot. Nothing is mutated
    /// on any failure path.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::InvalidIdentifier`] if `id` is the vacant marker
    /// - [`RegistryError::DuplicateIdentifier`] if `id` is already present
    /// - [`RegistryError::RegistryFull`] if all slots are occupied
    pub fn register(&mut self, id: BundleId, bundle: Bundle) -> Result<(), RegistryError> {
        if id.is_vacant() {
            debug!("register: vacant identifier rejected");
            return Err(RegistryError::InvalidIdentifier);
        }
        if self.find(&id).is_some() {
            debug!("register {id}: duplicate identifier");
            return Err(RegistryError::DuplicateIdentifier);
        }
        if self.len == MAX_BUNDLES {
            debug!("register {id}: registry full");
            return Err(RegistryError::RegistryFull);
        }
        for slot in &mut self.slots {
            if slot.is_none() {
                *slot = Some(Entry { id, bundle });
                self.len += 1;
                info!("registered {id} ({} of {MAX_BUNDLES} slots used)", self.len);
                return Ok(());
            }
        }
        // Unreachable while `len` tracks occupied slots.
        Err(RegistryError::RegistryFull)
    }

    /// Removes the record registered under `id`, freeing its slot.
    ///
    /// The slot and the identifier become reusable immediately.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if `id` is not present; the
    /// store is unchanged.
    pub fn unregister(&mut self, id: &BundleId) -> Result<(), RegistryError> {
        for slot in &mut self.slots {
            if matches!(slot, Some(entry) if entry.id == *id) {
                *slot = None;
                self.len -= 1;
                info!("unregistered {id}");
                return Ok(());
            }
        }
        debug!("unregister {id}: not found");
        Err(RegistryError::NotFound)
    }

    /// Fetches a copy of the record registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if `id` is not present.
    pub fn lookup(&self, id: &BundleId) -> Result<Bundle, RegistryError> {
        match self.find(id) {
            Some(entry) => Ok(entry.bundle),
            None => {
                trace!("lookup {id}: not found");
                Err(RegistryError::NotFound)
            }
        }
    }

    /// Snapshot of all registered identifiers, in slot order.
    ///
    /// The result is a point-in-time copy: later mutations do not affect
    /// it. No duplicates, no omissions relative to the store at the
    /// instant of the call.
    #[must_use]
    pub fn enumerate(&self) -> BundleIdList {
        let mut list = BundleIdList::new();
        for entry in self.slots.iter().flatten() {
            // The store and the list share MAX_BUNDLES capacity.
            let _ = list.push(entry.id);
        }
        list
    }

    /// Finds the occupied slot holding `id`.
    fn find(&self, id: &BundleId) -> Option<&Entry> {
        self.slots.iter().flatten().find(|entry| entry.id == *id)
    }
}

impl Default for BundleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
