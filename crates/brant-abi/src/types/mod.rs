// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Core type definitions for bundle identifiers, records, and snapshots.
//!
//! These types form the data half of the boundary contract; their layouts
//! are frozen with compile-time assertions where they cross the C boundary.

mod array;
mod bundle;
mod id;


pub use array::{BundleIdArray, BundleIdList, MAX_BUNDLES};
pub use bundle::{Bundle, ImageHandle};
pub use id::{BundleId, MAX_BUNDLE_ID_SIZE};
