// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Tag generator and signature tests

use super::super::*;
use crate::core::machine::{MachineConfig, SimulatedMachine};
use crate::core::memory::MemoryBus;
use proptest::prelude::*;

const SENTINELS: [u16; 2] = [0xE000, 0xF000];

#[test]
fn test_tag_values() {
    assert_eq!(tag_byte(0, 0), TAG_BASE);
    assert_eq!(tag_byte(0, 1), TAG_BASE.wrapping_add(TAG_STRIDE));
    assert_eq!(tag_byte(0x5A, 0), 0x00);
    assert_eq!(tag_byte(3, 1), 0x6D ^ 0x03);
}

#[test]
fn test_tag_is_not_constant() {
    let tags: std::collections::HashSet<u8> = (0..=u8::MAX).map(|s| tag_byte(s, 0)).collect();
    assert_eq!(tags.len(), 256);
}

#[test]
fn test_signature_round_trip() {
    let mut machine = SimulatedMachine::new(MachineConfig::with_banks(2)).unwrap();

    machine.select(1);
    write_signature(&mut machine, &SENTINELS, 1);
    assert!(verify_signature(&machine, &SENTINELS, 1));
    assert!(!verify_signature(&machine, &SENTINELS, 0));

    assert_eq!(machine.read8(0xE000), tag_byte(1, 0));
    assert_eq!(machine.read8(0xE001), !tag_byte(1, 0));
    assert_eq!(machine.read8(0xF000), tag_byte(1, 1));
    assert_eq!(machine.read8(0xF001), !tag_byte(1, 1));
}

#[test]
fn test_signature_rejects_stuck_window() {
    let mut machine = SimulatedMachine::new(MachineConfig::with_banks(1)).unwrap();

    // All-ones window can never hold (tag, !tag)
    for address in [0xE000u16, 0xE001, 0xF000, 0xF001] {
        machine.inject(crate::core::machine::StuckBits {
            bank: Some(0),
            address,
            high: 0xFF,
            low: 0x00,
        });
    }

    write_signature(&mut machine, &SENTINELS, 0);
    assert!(!verify_signature(&machine, &SENTINELS, 0));
}

#[test]
fn test_empty_sentinel_list_verifies_trivially() {
    let machine = SimulatedMachine::new(MachineConfig::default()).unwrap();
    assert!(verify_signature(&machine, &[], 7));
}

proptest! {
    #[test]
    fn prop_sentinel_tags_differ(selector in any::<u8>()) {
        prop_assert_ne!(tag_byte(selector, 0), tag_byte(selector, 1));
    }

    #[test]
    fn prop_distinct_selectors_distinct_tags(a in any::<u8>(), b in any::<u8>(), index in 0u8..2) {
        prop_assume!(a != b);
        prop_assert_ne!(tag_byte(a, index), tag_byte(b, index));
    }

    #[test]
    fn prop_tag_never_equals_complement(selector in any::<u8>(), index in any::<u8>()) {
        let tag = tag_byte(selector, index);
        prop_assert_ne!(tag, !tag);
    }
}
