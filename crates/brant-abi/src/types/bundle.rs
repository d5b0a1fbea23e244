// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Bundle records and the opaque image handle.

use core::fmt;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

/// Opaque reference to a bundle's loadable image resources.
///
/// Issued by the privileged loader when bundle contents are deposited.
/// The registry stores and returns it without interpreting it; only the
/// loader and the kernel glue give it meaning. Zero is the null handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ImageHandle(u32);

impl ImageHandle {
    /// The null/invalid image handle.
    pub const NULL: Self = Self(0);

    /// Creates a handle from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Checks if this is the null handle.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageHandle({})", self.0)
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image:{}", self.0)
    }
}

/// Record for one installed application bundle.
///
/// Exactly the C boundary layout: a single opaque 32-bit field. The record
/// deliberately carries no identifier; it only ever exists as the value of
/// a registry slot, keyed by its [`BundleId`](crate::BundleId).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(C)]
pub struct Bundle {
    /// Opaque handle to the bundle's process image resources.
    pub image: ImageHandle,
}

impl Bundle {
    /// Creates a record referencing `image`.
    #[inline]
    #[must_use]
    pub const fn new(image: ImageHandle) -> Self {
        Self { image }
    }
}

const_assert_eq!(core::mem::size_of::<ImageHandle>(), 4);
const_assert_eq!(core::mem::size_of::<Bundle>(), 4);
const_assert_eq!(core::mem::align_of::<Bundle>(), 4);
