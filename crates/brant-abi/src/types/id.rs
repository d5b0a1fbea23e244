// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Fixed-width bundle identifiers.

use crate::error::RegistryError;
use core::fmt;
use core::hash::{Hash, Hasher};
use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

/// Width of a bundle identifier in bytes.
///
/// Part of the frozen boundary contract; changing it breaks every client.
pub const MAX_BUNDLE_ID_SIZE: usize = 32;

/// Unique identifier for an application bundle.
///
/// Identifiers are opaque bit patterns exactly [`MAX_BUNDLE_ID_SIZE`] bytes
/// wide. Shorter input is zero-padded on construction, so equality is
/// defined over the full width and two identifiers that differ only in
/// trailing zero bytes are the same identifier.
///
/// The all-zero value is reserved as the *vacant marker* for unoccupied
/// slots in the raw array layout and is never a valid identifier;
/// [`BundleId::new`] rejects input without content.
///
/// Because identifiers may double as security tokens, comparison always
/// examines all bytes (see [`BundleId::ct_eq`]).
#[derive(Clone, Copy, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct BundleId {
    id: [u8; MAX_BUNDLE_ID_SIZE],
}

impl BundleId {
    /// The reserved all-zero vacant marker.
    pub const VACANT: Self = Self {
        id: [0; MAX_BUNDLE_ID_SIZE],
    };

    /// Creates an identifier from `bytes`, zero-padding to the full width.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidIdentifier`] if `bytes` is empty,
    /// longer than [`MAX_BUNDLE_ID_SIZE`], or all zeros (the reserved
    /// vacant marker).
    #[inline]
    pub const fn new(bytes: &[u8]) -> Result<Self, RegistryError> {
        if bytes.is_empty() || bytes.len() > MAX_BUNDLE_ID_SIZE {
            return Err(RegistryError::InvalidIdentifier);
        }
        let mut id = [0u8; MAX_BUNDLE_ID_SIZE];
        let mut nonzero = false;
        let mut i = 0;
        while i < bytes.len() {
            id[i] = bytes[i];
            nonzero = nonzero || bytes[i] != 0;
            i += 1;
        }
        if !nonzero {
            return Err(RegistryError::InvalidIdentifier);
        }
        Ok(Self { id })
    }

    /// Creates an identifier from a textual bundle name.
    ///
    /// # Errors
    ///
    /// Same contract as [`BundleId::new`].
    #[inline]
    pub const fn from_name(name: &str) -> Result<Self, RegistryError> {
        Self::new(name.as_bytes())
    }

    /// Adopts a full-width value verbatim.
    ///
    /// No validation: the result may be the vacant marker. This is the
    /// import path for values that already crossed the raw boundary.
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; MAX_BUNDLE_ID_SIZE]) -> Self {
        Self { id: bytes }
    }

    /// Returns the full fixed-width value, padding included.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; MAX_BUNDLE_ID_SIZE] {
        &self.id
    }

    /// Checks if this is the reserved all-zero vacant marker.
    #[inline]
    #[must_use]
    pub const fn is_vacant(&self) -> bool {
        let mut i = 0;
        while i < MAX_BUNDLE_ID_SIZE {
            if self.id[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Compares two identifiers over the full width without early exit.
    ///
    /// Every byte contributes to the result regardless of where the first
    /// difference occurs, so comparison time does not leak the position of
    /// a mismatch. `PartialEq` routes through this.
    #[inline]
    #[must_use]
    pub const fn ct_eq(&self, other: &Self) -> bool {
        let mut diff = 0u8;
        let mut i = 0;
        while i < MAX_BUNDLE_ID_SIZE {
            diff |= self.id[i] ^ other.id[i];
            i += 1;
        }
        diff == 0
    }

    /// Bytes up to and including the last nonzero byte (at least one).
    ///
    /// Trailing zero bytes are canonical padding, so this is the shortest
    /// input that reconstructs the identifier.
    fn content_len(&self) -> usize {
        let mut len = MAX_BUNDLE_ID_SIZE;
        while len > 1 && self.id[len - 1] == 0 {
            len -= 1;
        }
        len
    }
}

impl PartialEq for BundleId {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other)
    }
}

impl Eq for BundleId {}

impl Hash for BundleId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BundleId(")?;
        for byte in &self.id {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.id[..self.content_len()] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

// The raw layout crosses the C boundary: exactly the identifier bytes.
const_assert_eq!(core::mem::size_of::<BundleId>(), MAX_BUNDLE_ID_SIZE);
const_assert_eq!(core::mem::align_of::<BundleId>(), 1);
