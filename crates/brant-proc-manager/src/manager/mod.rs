// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Process lifecycle management over the bundle registry.
//!
//! The manager supervises which bundles have a live process. It never
//! touches process resources itself: creation and teardown are delegated
//! to the kernel glue through [`ProcessControl`], and the manager tracks
//! only the opaque handles it gets back. The registry stays the single
//! source of truth for what is installed; the running set is always a
//! subset of it.

use crate::registry::BundleRegistry;
use brant_abi::{Bundle, BundleId, BundleIdList, MAX_BUNDLES, ProcManagerError, RegistryError};
use core::fmt;
use log::{debug, info};

#[cfg(test)]
mod manager_test;

/// Opaque handle to a running process.
///
/// Issued by the kernel glue on spawn and handed back on halt. Never
/// crosses the client wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct RunHandle(u32);

impl RunHandle {
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
}

impl fmt::Debug for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RunHandle({})", self.0)
    }
}

/// Kernel process-creation primitive, consumed opaquely.
///
/// Implemented by the privileged glue that owns the kernel interface;
/// tests drive the manager with a mock.
pub trait ProcessControl {
    /// Launches the process image of `bundle`.
    ///
    /// # Errors
    ///
    /// Returns [`ProcManagerError::SpawnFailed`] if the kernel refuses
    /// to create the process.
    fn spawn(&mut self, id: &BundleId, bundle: &Bundle) -> Result<RunHandle, ProcManagerError>;

    /// Halts the process behind `handle` and releases its resources.
    ///
    /// # Errors
    ///
    /// Returns an error if the kernel cannot tear the process down; the
    /// manager then keeps the bundle marked running.
    fn halt(&mut self, handle: RunHandle) -> Result<(), ProcManagerError>;
}

/// One running bundle.
#[derive(Clone, Copy, Debug)]
struct Running {
    id: BundleId,
    handle: RunHandle,
}

/// The bundle registry plus start/stop supervision.
///
/// Owns the registry and the running set outright; the kernel primitive
/// is injected at construction and reachable through
/// [`ProcessManager::control`]. Dropping the manager does not halt
/// running processes - teardown ordering belongs to the privileged glue.
pub struct ProcessManager<C> {
    registry: BundleRegistry,
    /// Live processes; `None` slots are free.
    running: [Option<Running>; MAX_BUNDLES],
    control: C,
}

impl<C: ProcessControl> ProcessManager<C> {
    /// Creates a manager around the injected kernel primitive.
    #[must_use]
    pub const fn new(control: C) -> Self {
        Self {
            registry: BundleRegistry::new(),
            running: [None; MAX_BUNDLES],
            control,
        }
    }

    /// Read access to the underlying registry.
    #[must_use]
    pub const fn registry(&self) -> &BundleRegistry {
        &self.registry
    }

    /// Read access to the kernel primitive.
    #[must_use]
    pub const fn control(&self) -> &C {
        &self.control
    }

    /// Mutable access to the kernel primitive.
    pub const fn control_mut(&mut self) -> &mut C {
        &mut self.control
    }

    /// Installs `bundle` under `id`.
    ///
    /// # Errors
    ///
    /// Propagates the registry contract unchanged.
    pub fn register(&mut self, id: BundleId, bundle: Bundle) -> Result<(), ProcManagerError> {
        self.registry.register(id, bundle)?;
        Ok(())
    }

    /// Removes the bundle registered under `id`.
    ///
    /// # Errors
    ///
    /// Fails with [`ProcManagerError::StillRunning`] while the bundle has
    /// a live process; stop it first. Otherwise propagates the registry
    /// contract.
    pub fn unregister(&mut self, id: &BundleId) -> Result<(), ProcManagerError> {
        if self.running_position(id).is_some() {
            debug!("unregister {id}: still running");
            return Err(ProcManagerError::StillRunning);
        }
        self.registry.unregister(id)?;
        Ok(())
    }

    /// Fetches a copy of the record registered under `id`.
    ///
    /// # Errors
    ///
    /// Propagates the registry contract unchanged.
    pub fn lookup(&self, id: &BundleId) -> Result<Bundle, ProcManagerError> {
        Ok(self.registry.lookup(id)?)
    }

    /// Snapshot of all registered bundle identifiers.
    #[must_use]
    pub fn enumerate(&self) -> BundleIdList {
        self.registry.enumerate()
    }

    /// Launches the process image of the bundle registered under `id`.
    ///
    /// State changes only after the kernel accepted the spawn.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotFound`] (wrapped) if `id` is not installed
    /// - [`ProcManagerError::AlreadyRunning`] if it has a live process
    /// - whatever the kernel primitive reports for the spawn itself
    pub fn start(&mut self, id: &BundleId) -> Result<(), ProcManagerError> {
        let bundle = self.registry.lookup(id)?;
        if self.running_position(id).is_some() {
            debug!("start {id}: already running");
            return Err(ProcManagerError::AlreadyRunning);
        }
        let Some(free) = self.running.iter().position(Option::is_none) else {
            // Unreachable: running bundles are a subset of registered ones.
            return Err(ProcManagerError::Registry(RegistryError::RegistryFull));
        };
        let handle = self.control.spawn(id, &bundle)?;
        self.running[free] = Some(Running { id: *id, handle });
        info!("started {id}");
        Ok(())
    }

    /// Halts the running process of the bundle registered under `id`.
    ///
    /// The running slot is freed only after the kernel accepted the halt.
    ///
    /// # Errors
    ///
    /// Returns [`ProcManagerError::NotRunning`] if no live process
    /// exists, or whatever the kernel primitive reports for the halt.
    pub fn stop(&mut self, id: &BundleId) -> Result<(), ProcManagerError> {
        for slot in &mut self.running {
            if let Some(entry) = slot {
                if entry.id == *id {
                    let handle = entry.handle;
                    self.control.halt(handle)?;
                    *slot = None;
                    info!("stopped {id}");
                    return Ok(());
                }
            }
        }
        debug!("stop {id}: not running");
        Err(ProcManagerError::NotRunning)
    }

    /// Snapshot of the currently running bundle identifiers.
    #[must_use]
    pub fn running_bundles(&self) -> BundleIdList {
        let mut list = BundleIdList::new();
        for entry in self.running.iter().flatten() {
            // The running set and the list share MAX_BUNDLES capacity.
            let _ = list.push(entry.id);
        }
        list
    }

    /// Checks if the bundle registered under `id` has a live process.
    #[must_use]
    pub fn is_running(&self, id: &BundleId) -> bool {
        self.running_position(id).is_some()
    }

    /// Finds the running slot holding `id`.
    fn running_position(&self, id: &BundleId) -> Option<usize> {
        self.running
            .iter()
            .position(|slot| matches!(slot, Some(entry) if entry.id == *id))
    }
}
