// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Shadow detection tests
//!
//! Hardware models here map the window onto fixed RAM once the physical
//! banks run out.

use super::super::*;
use crate::core::machine::{BeyondPolicy, MachineConfig, SimulatedMachine};
use crate::core::memory::{MemoryBus, MemoryLayout};

fn shadow_machine(banks: u16, target: u16) -> SimulatedMachine {
    let config = MachineConfig {
        physical_banks: banks,
        beyond: BeyondPolicy::Shadow { target },
        ..MachineConfig::default()
    };
    SimulatedMachine::new(config).unwrap()
}

/// Fill fixed high RAM with an address-derived pattern
fn fill_high_ram(machine: &mut SimulatedMachine) {
    for address in 0xA000u16..0xE000 {
        machine.write8(address, (address >> 3) as u8 ^ 0xC3);
    }
}

#[test]
fn test_shadow_stops_enumeration() {
    for target in [0xA000u16, 0xC000] {
        let mut machine = shadow_machine(6, target);
        let enumeration = BankEnumerator::new(&MemoryLayout::default()).run(&mut machine);

        assert_eq!(enumeration.bank_count(), 6, "shadow target 0x{target:04X}");
        assert_eq!(enumeration.stop, StopReason::Shadow { selector: 6 });
    }
}

#[test]
fn test_shadow_restores_fixed_memory() {
    let mut machine = shadow_machine(6, 0xA000);
    fill_high_ram(&mut machine);
    let before = machine.fixed().to_vec();

    let enumeration = BankEnumerator::new(&MemoryLayout::default()).run(&mut machine);

    assert_eq!(enumeration.bank_count(), 6);
    assert_eq!(machine.fixed(), before.as_slice());
}

#[test]
fn test_shadow_at_first_selector() {
    let mut machine = shadow_machine(0, 0xC000);
    fill_high_ram(&mut machine);
    let before = machine.fixed().to_vec();

    let enumeration = BankEnumerator::new(&MemoryLayout::default()).run(&mut machine);

    assert_eq!(enumeration.bank_count(), 0);
    assert_eq!(enumeration.stop, StopReason::Shadow { selector: 0 });
    assert_eq!(machine.fixed(), before.as_slice());
}

#[test]
fn test_stale_fixed_memory_cannot_fake_shadow() {
    let mut machine = SimulatedMachine::new(MachineConfig::with_banks(6)).unwrap();

    // Plant candidate signatures where the shadow check looks
    let layout = MemoryLayout::default();
    machine.write8(0xA000, tag_byte(3, 0));
    machine.write8(0xA001, !tag_byte(3, 0));
    machine.write8(0xD000, tag_byte(4, 1));
    machine.write8(0xD001, !tag_byte(4, 1));
    let before = machine.fixed().to_vec();

    let enumeration = BankEnumerator::new(&layout).run(&mut machine);

    assert_eq!(enumeration.bank_count(), 6);
    assert_eq!(machine.fixed(), before.as_slice());
}

#[test]
fn test_banks_before_shadow_keep_signatures() {
    let mut machine = shadow_machine(4, 0xA000);
    let layout = MemoryLayout::default();

    let enumeration = BankEnumerator::new(&layout).run(&mut machine);
    assert_eq!(enumeration.bank_count(), 4);

    for bank in enumeration.banks.iter() {
        machine.select(bank);
        assert!(verify_signature(&machine, &layout.sentinels, bank));
    }
}

#[test]
fn test_unaligned_shadow_counts_one_extra_bank() {
    let mut machine = shadow_machine(6, 0xB000);
    let enumeration = BankEnumerator::new(&MemoryLayout::default()).run(&mut machine);

    assert_eq!(enumeration.bank_count(), 7);
    assert_eq!(
        enumeration.stop,
        StopReason::Alias {
            selector: 7,
            aliases: 6
        }
    );
}

#[test]
fn test_sentinel_below_window_has_no_shadow_watch() {
    let layout = MemoryLayout {
        sentinels: vec![0xD000],
        ..MemoryLayout::default()
    };
    let enumerator = BankEnumerator::new(&layout);
    assert_eq!(enumerator.sentinels(), &[0xD000]);
}
