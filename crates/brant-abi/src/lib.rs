// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Shared contract between the Brant Process Manager and its privileged clients.
//!
//! This crate defines everything that crosses the process manager's boundary:
//! - Identifier and record types (`BundleId`, `Bundle`, `ImageHandle`)
//! - Enumeration snapshots: the logical `BundleIdList` and the raw C-layout
//!   `BundleIdArray`
//! - The error contract (`RegistryError`, `ProcManagerError`)
//! - The request/reply wire protocol and its frame codec
//!
//! # Design Principles
//!
//! - **No kernel bindings**: pure data types and codecs, 100% host-testable
//! - **Stable layout**: boundary types use `#[repr(C)]` and their sizes are
//!   frozen with compile-time assertions
//! - **Fixed capacity**: no allocator; every container is bounded by
//!   [`MAX_BUNDLES`]
//!
//! # Modules
//!
//! - [`types`]: identifiers, records, and snapshot containers
//! - [`error`]: registry and manager error enums
//! - [`wire`]: request/reply enums and the postcard frame codec

#![cfg_attr(not(test), no_std)]

pub mod error;
pub mod types;
pub mod wire;

// Re-export commonly used types at crate root
pub use error::{ProcManagerError, RegistryError};
pub use types::{
    Bundle, BundleId, BundleIdArray, BundleIdList, ImageHandle, MAX_BUNDLES, MAX_BUNDLE_ID_SIZE,
};
pub use wire::{FRAME_CAPACITY, ProcReply, ProcRequest, WireError};
