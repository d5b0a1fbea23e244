// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # Brant Process Manager
//!
//! Userland process manager for the Brant system: owns the bundle
//! registry and supervises process lifecycles over it.
//!
//! This crate is deliberately kernel-free. It:
//! - Tracks installed bundles in a bounded, unique-keyed registry
//! - Starts and stops bundle processes through an injected kernel primitive
//! - Serves the request/reply protocol defined in `brant-abi`
//!
//! The seL4 glue that owns endpoints and process resources lives outside
//! this crate and plugs in through [`manager::ProcessControl`] and
//! [`service::Transport`]. Everything here is host-testable.

#![cfg_attr(not(test), no_std)]

pub mod manager;
pub mod registry;
pub mod service;

pub use manager::{ProcessControl, ProcessManager, RunHandle};
pub use registry::BundleRegistry;
pub use service::{ProcService, Transport};

/// Crate version.
pub const VERSION: &str = match option_env!("BRANT_VERSION") {
    Some(v) => v,
    None => "unknown",
};
