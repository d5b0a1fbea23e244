// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Enumeration snapshot containers: the raw C boundary array and the
//! logical bounded list.
//!
//! Inside the system, enumeration results are always a [`BundleIdList`]:
//! an ordered sequence with an explicit length that iterates over live
//! entries only. The count-less [`BundleIdArray`] exists solely for the
//! raw C boundary and is produced from a list right at that boundary,
//! never used as storage.

use crate::error::RegistryError;
use crate::types::id::{BundleId, MAX_BUNDLE_ID_SIZE};
use core::fmt;
use core::slice;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use static_assertions::const_assert_eq;

/// Maximum number of bundles resident at any time.
///
/// Part of the frozen boundary contract, like the identifier width.
pub const MAX_BUNDLES: usize = 10;

// =============================================================================
// Raw boundary layout
// =============================================================================

/// Raw fixed-width identifier array for the C boundary.
///
/// Exactly [`MAX_BUNDLES`] identifier slots and **no count field**: the
/// live count travels out of band, and vacant slots hold
/// [`BundleId::VACANT`]. The layout is preserved bit for bit across the
/// boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct BundleIdArray {
    /// Identifier slots; indexes below the live count hold registered
    /// identifiers, the rest hold the vacant marker.
    pub ids: [BundleId; MAX_BUNDLES],
}

impl BundleIdArray {
    /// An array with every slot vacant.
    pub const VACANT: Self = Self {
        ids: [BundleId::VACANT; MAX_BUNDLES],
    };
}

impl Default for BundleIdArray {
    fn default() -> Self {
        Self::VACANT
    }
}

// =============================================================================
// Logical snapshot
// =============================================================================

/// Bounded, ordered snapshot of bundle identifiers.
///
/// An immutable point-in-time copy: mutating the registry after taking a
/// snapshot does not affect it. The order is the registry's slot order at
/// query time; there are no duplicates and no omissions relative to the
/// store at the instant of the call.
///
/// Invariant: slots at and beyond `len` always hold the vacant marker, so
/// [`BundleIdList::to_raw`] is a plain copy.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BundleIdList {
    ids: [BundleId; MAX_BUNDLES],
    len: usize,
}

impl BundleIdList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ids: [BundleId::VACANT; MAX_BUNDLES],
            len: 0,
        }
    }

    /// Number of live identifiers.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if the list holds no identifiers.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Checks if no further identifier fits.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == MAX_BUNDLES
    }

    /// Appends an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RegistryFull`] when the list already holds
    /// [`MAX_BUNDLES`] identifiers.
    pub const fn push(&mut self, id: BundleId) -> Result<(), RegistryError> {
        if self.len == MAX_BUNDLES {
            return Err(RegistryError::RegistryFull);
        }
        self.ids[self.len] = id;
        self.len += 1;
        Ok(())
    }

    /// Returns the identifier at `index` among live entries.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&BundleId> {
        self.as_slice().get(index)
    }

    /// Live identifiers as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[BundleId] {
        &self.ids[..self.len]
    }

    /// Iterates over live identifiers.
    pub fn iter(&self) -> slice::Iter<'_, BundleId> {
        self.as_slice().iter()
    }

    /// Checks if `id` is present.
    #[must_use]
    pub fn contains(&self, id: &BundleId) -> bool {
        self.as_slice().contains(id)
    }

    /// Converts to the raw boundary layout plus its out-of-band count.
    ///
    /// Vacant tail slots are zero-filled by the list invariant.
    #[must_use]
    pub const fn to_raw(&self) -> (BundleIdArray, usize) {
        (BundleIdArray { ids: self.ids }, self.len)
    }

    /// Rebuilds a list from the raw boundary layout and its count.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RegistryFull`] if `count` exceeds
    /// [`MAX_BUNDLES`] and [`RegistryError::InvalidIdentifier`] if a
    /// vacant marker appears inside the live prefix.
    pub fn from_raw(raw: &BundleIdArray, count: usize) -> Result<Self, RegistryError> {
        if count > MAX_BUNDLES {
            return Err(RegistryError::RegistryFull);
        }
        let mut ids = [BundleId::VACANT; MAX_BUNDLES];
        for (slot, id) in ids.iter_mut().zip(&raw.ids[..count]) {
            if id.is_vacant() {
                return Err(RegistryError::InvalidIdentifier);
            }
            *slot = *id;
        }
        Ok(Self { ids, len: count })
    }
}

impl Default for BundleIdList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BundleIdList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a BundleIdList {
    type Item = &'a BundleId;
    type IntoIter = slice::Iter<'a, BundleId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// The wire form is a length-prefixed sequence of the live identifiers,
// not the raw fixed array. Serialization to the fixed form happens only
// through `to_raw` at the C boundary.
impl Serialize for BundleIdList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for id in self {
            seq.serialize_element(id)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for BundleIdList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ListVisitor;

        impl<'de> Visitor<'de> for ListVisitor {
            type Value = BundleIdList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a sequence of at most {MAX_BUNDLES} bundle identifiers")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut list = BundleIdList::new();
                while let Some(id) = seq.next_element::<BundleId>()? {
                    if list.push(id).is_err() {
                        return Err(de::Error::invalid_length(MAX_BUNDLES + 1, &self));
                    }
                }
                Ok(list)
            }
        }

        deserializer.deserialize_seq(ListVisitor)
    }
}

// 10 identifiers of 32 bytes, nothing else.
const_assert_eq!(
    core::mem::size_of::<BundleIdArray>(),
    MAX_BUNDLES * MAX_BUNDLE_ID_SIZE
);
const_assert_eq!(core::mem::align_of::<BundleIdArray>(), 1);
