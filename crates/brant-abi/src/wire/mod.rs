// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Request/reply protocol between privileged clients and the process manager.
//!
//! One request per frame, one reply per frame. Frames are the postcard
//! encoding of [`ProcRequest`] / [`ProcReply`], written into the caller's
//! IPC buffer; [`FRAME_CAPACITY`] bounds the encoded size in either
//! direction. A frame must decode exactly: trailing bytes are an error.
//!
//! The codec layer knows nothing about the store. Decoding failures are
//! reported as [`WireError`] and never reach registry state.

use crate::error::ProcManagerError;
use crate::types::{Bundle, BundleId, BundleIdList};
use core::fmt;
use serde::{Deserialize, Serialize};


/// Maximum encoded size in bytes of one request or reply frame.
///
/// Sized for the worst case, an enumeration reply carrying
/// [`MAX_BUNDLES`](crate::MAX_BUNDLES) full-width identifiers
/// (322 bytes), with headroom for protocol growth.
pub const FRAME_CAPACITY: usize = 512;

// =============================================================================
// Requests and replies
// =============================================================================

/// Request sent by a privileged client to the process manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcRequest {
    /// Install `bundle` under `id`.
    Register {
        /// Identifier to register under.
        id: BundleId,
        /// Record to store.
        bundle: Bundle,
    },
    /// Remove the record registered under `id`.
    Unregister {
        /// Identifier to remove.
        id: BundleId,
    },
    /// Fetch a copy of the record registered under `id`.
    Lookup {
        /// Identifier to look up.
        id: BundleId,
    },
    /// Snapshot the identifiers of all registered bundles.
    Enumerate,
    /// Launch the process image of the bundle registered under `id`.
    Start {
        /// Identifier of the bundle to start.
        id: BundleId,
    },
    /// Halt the running process of the bundle registered under `id`.
    Stop {
        /// Identifier of the bundle to stop.
        id: BundleId,
    },
    /// Snapshot the identifiers of all currently running bundles.
    RunningBundles,
}

/// Reply sent by the process manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcReply {
    /// The operation completed with nothing to return.
    Complete,
    /// Record copy answering a lookup.
    Bundle(Bundle),
    /// Identifier snapshot answering an enumeration.
    Ids(BundleIdList),
    /// The operation failed.
    Failed(ProcManagerError),
}

impl ProcReply {
    /// Checks if this reply reports success.
    #[inline]
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

// =============================================================================
// Frame codec
// =============================================================================

/// Error from frame encoding or decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireError {
    /// The encoded frame does not fit the provided buffer.
    BufferTooSmall,
    /// The frame is not a valid encoding or has trailing bytes.
    Malformed,
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "frame does not fit the buffer"),
            Self::Malformed => write!(f, "frame is not a valid encoding"),
        }
    }
}

/// Encodes `request` into `buf`, returning the used prefix.
///
/// # Errors
///
/// Returns [`WireError::BufferTooSmall`] if the encoding does not fit.
pub fn encode_request<'a>(request: &ProcRequest, buf: &'a mut [u8]) -> Result<&'a [u8], WireError> {
    postcard::to_slice(request, buf)
        .map(|frame| &*frame)
        .map_err(|_| WireError::BufferTooSmall)
}

/// Decodes one request frame.
///
/// # Errors
///
/// Returns [`WireError::Malformed`] if the frame is not exactly one
/// encoded request.
pub fn decode_request(frame: &[u8]) -> Result<ProcRequest, WireError> {
    let (request, rest) = postcard::take_from_bytes(frame).map_err(|_| WireError::Malformed)?;
    if rest.is_empty() {
        Ok(request)
    } else {
        Err(WireError::Malformed)
    }
}

/// Encodes `reply` into `buf`, returning the used prefix.
///
/// # Errors
///
/// Returns [`WireError::BufferTooSmall`] if the encoding does not fit.
pub fn encode_reply<'a>(reply: &ProcReply, buf: &'a mut [u8]) -> Result<&'a [u8], WireError> {
    postcard::to_slice(reply, buf)
        .map(|frame| &*frame)
        .map_err(|_| WireError::BufferTooSmall)
}

/// Decodes one reply frame.
///
/// # Errors
///
/// Returns [`WireError::Malformed`] if the frame is not exactly one
/// encoded reply.
pub fn decode_reply(frame: &[u8]) -> Result<ProcReply, WireError> {
    let (reply, rest) = postcard::take_from_bytes(frame).map_err(|_| WireError::Malformed)?;
    if rest.is_empty() {
        Ok(reply)
    } else {
        Err(WireError::Malformed)
    }
}
