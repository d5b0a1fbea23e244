// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Error contract of the bundle registry and the process manager.
//!
//! Two layers, matching the two API surfaces:
//! - [`RegistryError`] is the store-level contract: every registry operation
//!   either fully succeeds or fails with one of these kinds and leaves the
//!   store unchanged.
//! - [`ProcManagerError`] is the manager-level superset: it wraps the store
//!   contract and adds lifecycle and protocol failures. This is the error
//!   that travels in reply frames.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Error from a bundle registry operation.
///
/// Failed operations never mutate the store and never partially apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryError {
    /// The identifier is empty, longer than the fixed width, or the
    /// reserved all-zero vacant marker.
    InvalidIdentifier,
    /// A bundle is already registered under this identifier.
    DuplicateIdentifier,
    /// The store already holds the maximum number of bundles.
    RegistryFull,
    /// No bundle is registered under this identifier.
    NotFound,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIdentifier => write!(f, "identifier is empty, oversized, or reserved"),
            Self::DuplicateIdentifier => write!(f, "identifier is already registered"),
            Self::RegistryFull => write!(f, "registry is at capacity"),
            Self::NotFound => write!(f, "no bundle registered under this identifier"),
        }
    }
}

/// Error from a process manager operation.
///
/// Registry failures pass through unchanged in the [`Registry`] variant;
/// the remaining kinds cover process lifecycle and request decoding.
///
/// [`Registry`]: ProcManagerError::Registry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcManagerError {
    /// The underlying registry operation failed.
    Registry(RegistryError),
    /// The bundle already has a running process.
    AlreadyRunning,
    /// The bundle has no running process.
    NotRunning,
    /// The bundle must be stopped before it can be unregistered.
    StillRunning,
    /// The kernel refused to create the process.
    SpawnFailed,
    /// The request frame could not be decoded.
    MalformedRequest,
}

impl From<RegistryError> for ProcManagerError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}

impl fmt::Display for ProcManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry(err) => write!(f, "{err}"),
            Self::AlreadyRunning => write!(f, "bundle already has a running process"),
            Self::NotRunning => write!(f, "bundle has no running process"),
            Self::StillRunning => write!(f, "bundle must be stopped before unregistering"),
            Self::SpawnFailed => write!(f, "kernel refused to create the process"),
            Self::MalformedRequest => write!(f, "request frame could not be decoded"),
        }
    }
}
