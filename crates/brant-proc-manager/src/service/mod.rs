// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Request/reply loop that exposes the process manager over a transport.
//!
//! Every client operation enters through [`ProcService::serve`]: one frame
//! in, one frame out, handled to completion before the next frame is
//! received. Because the loop is the only code path that touches the
//! manager, the registry needs no further synchronization.

use crate::manager::{ProcessControl, ProcessManager};
use brant_abi::wire::{decode_request, encode_reply};
use brant_abi::{FRAME_CAPACITY, ProcManagerError, ProcReply, ProcRequest};
use log::{debug, error, warn};


/// Frame-oriented endpoint the service loop pumps.
///
/// Implemented over whatever IPC primitive the platform provides; tests
/// use an in-memory queue.
pub trait Transport {
    /// Receives the next request frame into `buf` and returns its length.
    ///
    /// Returns `None` once the peer is gone, which ends the serve loop.
    fn recv(&mut self, buf: &mut [u8]) -> Option<usize>;

    /// Transmits one reply frame.
    fn send(&mut self, frame: &[u8]);
}

/// Serves bundle registry and lifecycle requests over a [`Transport`].
pub struct ProcService<C> {
    manager: ProcessManager<C>,
}

impl<C: ProcessControl> ProcService<C> {
    /// Creates a service around a fresh manager driven by `control`.
    #[must_use]
    pub const fn new(control: C) -> Self {
        Self {
            manager: ProcessManager::new(control),
        }
    }

    /// The managed state behind the service.
    #[must_use]
    pub const fn manager(&self) -> &ProcessManager<C> {
        &self.manager
    }

    /// Receives, executes and answers requests until the transport closes.
    ///
    /// Every received frame is answered with exactly one reply frame,
    /// malformed input included. Only a reply that fails to encode goes
    /// unanswered, which cannot happen while replies fit
    /// [`FRAME_CAPACITY`].
    pub fn serve<T: Transport>(&mut self, transport: &mut T) {
        let mut rx = [0u8; FRAME_CAPACITY];
        let mut tx = [0u8; FRAME_CAPACITY];

        while let Some(len) = transport.recv(&mut rx) {
            let reply = match rx.get(..len) {
                Some(frame) => self.handle_frame(frame),
                None => {
                    warn!("transport claims a {len} byte frame, capacity is {FRAME_CAPACITY}");
                    ProcReply::Failed(ProcManagerError::MalformedRequest)
                }
            };
            match encode_reply(&reply, &mut tx) {
                Ok(frame) => transport.send(frame),
                Err(err) => error!("reply {reply:?} does not encode: {err}"),
            }
        }
        debug!("transport closed, leaving serve loop");
    }

    /// Executes a single already-received request frame.
    pub fn handle_frame(&mut self, frame: &[u8]) -> ProcReply {
        match decode_request(frame) {
            Ok(request) => self.dispatch(request),
            Err(err) => {
                warn!("rejecting request frame: {err}");
                ProcReply::Failed(ProcManagerError::MalformedRequest)
            }
        }
    }

    fn dispatch(&mut self, request: ProcRequest) -> ProcReply {
        match request {
            ProcRequest::Register { id, bundle } => completion(self.manager.register(id, bundle)),
            ProcRequest::Unregister { id } => completion(self.manager.unregister(&id)),
            ProcRequest::Lookup { id } => match self.manager.lookup(&id) {
                Ok(bundle) => ProcReply::Bundle(bundle),
                Err(err) => ProcReply::Failed(err),
            },
            ProcRequest::Enumerate => ProcReply::Ids(self.manager.enumerate()),
            ProcRequest::Start { id } => completion(self.manager.start(&id)),
            ProcRequest::Stop { id } => completion(self.manager.stop(&id)),
            ProcRequest::RunningBundles => ProcReply::Ids(self.manager.running_bundles()),
        }
    }
}

const fn completion(result: Result<(), ProcManagerError>) -> ProcReply {
    match result {
        Ok(()) => ProcReply::Complete,
        Err(err) => ProcReply::Failed(err),
    }
}
