// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the process manager.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use brant_abi::ImageHandle;
use proptest::prelude::*;
use std::collections::HashSet;

fn id(byte: u8) -> BundleId {
    BundleId::new(&[byte]).unwrap()
}

fn bundle(raw: u32) -> Bundle {
    Bundle::new(ImageHandle::new(raw))
}

/// Records spawn/halt calls and can be told to refuse spawns.
struct MockControl {
    next_handle: u32,
    spawned: Vec<(BundleId, RunHandle)>,
    halted: Vec<RunHandle>,
    refuse_spawn: bool,
}

impl MockControl {
    fn new() -> Self {
        Self {
            next_handle: 1,
            spawned: Vec::new(),
            halted: Vec::new(),
            refuse_spawn: false,
        }
    }
}

impl ProcessControl for MockControl {
    fn spawn(&mut self, id: &BundleId, _bundle: &Bundle) -> Result<RunHandle, ProcManagerError> {
        if self.refuse_spawn {
            return Err(ProcManagerError::SpawnFailed);
        }
        let handle = RunHandle::new(self.next_handle);
        self.next_handle += 1;
        self.spawned.push((*id, handle));
        Ok(handle)
    }

    fn halt(&mut self, handle: RunHandle) -> Result<(), ProcManagerError> {
        self.halted.push(handle);
        Ok(())
    }
}

fn manager() -> ProcessManager<MockControl> {
    ProcessManager::new(MockControl::new())
}

#[test]
fn start_marks_bundle_running() {
    let mut mgr = manager();
    mgr.register(id(1), bundle(7)).unwrap();
    mgr.start(&id(1)).unwrap();

    assert!(mgr.is_running(&id(1)));
    let running = mgr.running_bundles();
    assert_eq!(running.len(), 1);
    assert!(running.contains(&id(1)));
    assert_eq!(mgr.control().spawned, vec![(id(1), RunHandle::new(1))]);
}

#[test]
fn start_unknown_bundle_fails() {
    let mut mgr = manager();
    assert_eq!(
        mgr.start(&id(1)),
        Err(ProcManagerError::Registry(RegistryError::NotFound))
    );
    assert!(mgr.control().spawned.is_empty());
}

#[test]
fn double_start_fails() {
    let mut mgr = manager();
    mgr.register(id(1), bundle(0)).unwrap();
    mgr.start(&id(1)).unwrap();
    assert_eq!(mgr.start(&id(1)), Err(ProcManagerError::AlreadyRunning));
    assert_eq!(mgr.control().spawned.len(), 1);
}

#[test]
fn stop_halts_and_frees_the_slot() {
    let mut mgr = manager();
    mgr.register(id(1), bundle(0)).unwrap();
    mgr.start(&id(1)).unwrap();
    mgr.stop(&id(1)).unwrap();

    assert!(!mgr.is_running(&id(1)));
    assert_eq!(mgr.control().halted, vec![RunHandle::new(1)]);

    // The bundle stays installed and can be started again.
    mgr.start(&id(1)).unwrap();
    assert_eq!(mgr.control().spawned.len(), 2);
}

#[test]
fn stop_without_running_process_fails() {
    let mut mgr = manager();
    assert_eq!(mgr.stop(&id(1)), Err(ProcManagerError::NotRunning));

    mgr.register(id(1), bundle(0)).unwrap();
    // Registered but never started.
    assert_eq!(mgr.stop(&id(1)), Err(ProcManagerError::NotRunning));
}

#[test]
fn unregister_requires_stop_first() {
    let mut mgr = manager();
    mgr.register(id(1), bundle(0)).unwrap();
    mgr.start(&id(1)).unwrap();

    assert_eq!(mgr.unregister(&id(1)), Err(ProcManagerError::StillRunning));
    assert_eq!(mgr.lookup(&id(1)), Ok(bundle(0)));

    mgr.stop(&id(1)).unwrap();
    mgr.unregister(&id(1)).unwrap();
    assert_eq!(
        mgr.lookup(&id(1)),
        Err(ProcManagerError::Registry(RegistryError::NotFound))
    );
}

#[test]
fn refused_spawn_leaves_no_running_entry() {
    let mut mgr = manager();
    mgr.register(id(1), bundle(0)).unwrap();
    mgr.control_mut().refuse_spawn = true;

    assert_eq!(mgr.start(&id(1)), Err(ProcManagerError::SpawnFailed));
    assert!(!mgr.is_running(&id(1)));
    assert!(mgr.running_bundles().is_empty());

    mgr.control_mut().refuse_spawn = false;
    mgr.start(&id(1)).unwrap();
    assert!(mgr.is_running(&id(1)));
}

#[test]
fn registry_contract_passes_through() {
    let mut mgr = manager();
    mgr.register(id(1), bundle(1)).unwrap();
    assert_eq!(
        mgr.register(id(1), bundle(2)),
        Err(ProcManagerError::Registry(RegistryError::DuplicateIdentifier))
    );
    assert_eq!(mgr.lookup(&id(1)), Ok(bundle(1)));
    assert_eq!(mgr.enumerate().len(), 1);
    assert_eq!(mgr.registry().len(), 1);
}

#[test]
fn every_registered_bundle_can_run_at_once() {
    let mut mgr = manager();
    for n in 1..=MAX_BUNDLES {
        mgr.register(id(n as u8), bundle(0)).unwrap();
        mgr.start(&id(n as u8)).unwrap();
    }
    assert_eq!(mgr.running_bundles().len(), MAX_BUNDLES);
}

#[derive(Clone, Copy, Debug)]
enum Op {
    Register(u8),
    Unregister(u8),
    Start(u8),
    Stop(u8),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u8..=6).prop_map(Op::Register),
        (1u8..=6).prop_map(Op::Unregister),
        (1u8..=6).prop_map(Op::Start),
        (1u8..=6).prop_map(Op::Stop),
    ]
}

proptest! {
    /// Under arbitrary lifecycle interleavings the running set stays a
    /// duplicate-free subset of the registered set.
    #[test]
    fn prop_running_is_subset_of_registered(ops in proptest::collection::vec(arb_op(), 0..48)) {
        let mut mgr = manager();

        for op in ops {
            let result = match op {
                Op::Register(key) => mgr.register(id(key), bundle(u32::from(key))),
                Op::Unregister(key) => mgr.unregister(&id(key)),
                Op::Start(key) => mgr.start(&id(key)),
                Op::Stop(key) => mgr.stop(&id(key)),
            };
            // Individual operations may fail; the invariants must not.
            let _ = result;

            let registered = mgr.enumerate();
            let running = mgr.running_bundles();
            prop_assert!(running.len() <= registered.len());
            for live in &running {
                prop_assert!(registered.contains(live));
            }
            let unique: HashSet<_> = running.iter().copied().collect();
            prop_assert_eq!(unique.len(), running.len());
        }
    }
}
