// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Bank enumeration tests
//!
//! Hardware models here wrap around onto existing banks past the last
//! physical one, so every run ends with an alias (or exhaustion at 256).

use super::super::*;
use crate::core::machine::{BeyondPolicy, MachineConfig, SimulatedMachine};
use crate::core::memory::MemoryLayout;

fn enumerate(config: MachineConfig) -> (Enumeration, SimulatedMachine) {
    let mut machine = SimulatedMachine::new(config).unwrap();
    let enumeration = BankEnumerator::new(&MemoryLayout::default()).run(&mut machine);
    (enumeration, machine)
}

#[test]
fn test_known_expansion_sizes() {
    for banks in [1u16, 6, 14, 30, 46, 62, 128] {
        let (enumeration, _) = enumerate(MachineConfig::with_banks(banks));

        assert_eq!(enumeration.bank_count(), usize::from(banks), "{banks} banks");
        assert_eq!(
            enumeration.stop,
            StopReason::Alias {
                selector: banks as u8,
                aliases: 0
            }
        );
    }
}

#[test]
fn test_no_expansion() {
    let (enumeration, _) = enumerate(MachineConfig::with_banks(0));

    assert_eq!(enumeration.bank_count(), 0);
    assert!(enumeration.banks.is_empty());
    assert_eq!(enumeration.stop, StopReason::Shadow { selector: 0 });
    assert_eq!(enumeration.topology(), ExpansionTopology::Kib16);
}

#[test]
fn test_full_selector_space() {
    let (enumeration, _) = enumerate(MachineConfig::with_banks(256));

    assert_eq!(enumeration.bank_count(), 256);
    assert_eq!(enumeration.stop, StopReason::Exhausted);
    assert_eq!(enumeration.topology(), ExpansionTopology::Kib2080);
}

#[test]
fn test_banks_in_discovery_order() {
    let (enumeration, _) = enumerate(MachineConfig::with_banks(6));

    assert_eq!(enumeration.banks.as_slice(), &[0, 1, 2, 3, 4, 5]);
    assert!(enumeration.banks.contains(5));
    assert!(!enumeration.banks.contains(6));
}

#[test]
fn test_narrow_register_aliasing() {
    let config = MachineConfig {
        physical_banks: 16,
        register_bits: 3,
        ..MachineConfig::default()
    };
    let (enumeration, _) = enumerate(config);

    assert_eq!(enumeration.bank_count(), 8);
    assert_eq!(
        enumeration.stop,
        StopReason::Alias {
            selector: 8,
            aliases: 0
        }
    );
}

#[test]
fn test_missing_banks_stop_enumeration() {
    let config = MachineConfig {
        physical_banks: 3,
        beyond: BeyondPolicy::OpenBus,
        ..MachineConfig::default()
    };
    let (enumeration, _) = enumerate(config);

    assert_eq!(enumeration.bank_count(), 3);
    assert_eq!(enumeration.stop, StopReason::Shadow { selector: 3 });
    assert_eq!(enumeration.topology(), ExpansionTopology::Unknown);
}

#[test]
fn test_selector_returns_to_bank_zero() {
    for banks in [0u16, 6, 256] {
        let (_, machine) = enumerate(MachineConfig::with_banks(banks));
        assert_eq!(machine.latch(), 0);
    }
}

#[test]
fn test_aliased_bank_signature_restored() {
    let (enumeration, mut machine) = enumerate(MachineConfig::with_banks(6));
    let layout = MemoryLayout::default();

    // Probing selector 6 overwrote bank 0 before the alias was found
    for bank in enumeration.banks.iter() {
        machine.select(bank);
        assert!(verify_signature(&machine, &layout.sentinels, bank));
    }
}

#[test]
fn test_readback_mismatch_is_recorded_not_fatal() {
    let config = MachineConfig {
        physical_banks: 30,
        readback_bits: 0x0F,
        ..MachineConfig::default()
    };
    let (enumeration, _) = enumerate(config);

    assert_eq!(enumeration.bank_count(), 30);

    let selected: Vec<u8> = enumeration
        .readback_mismatches
        .iter()
        .map(|mismatch| mismatch.selected)
        .collect();
    assert_eq!(selected, (16..=30).collect::<Vec<u8>>());
    assert_eq!(enumeration.readback_mismatches[0].read_back, 0);
}

#[test]
fn test_enumeration_is_repeatable() {
    let mut machine = SimulatedMachine::new(MachineConfig::with_banks(14)).unwrap();
    let enumerator = BankEnumerator::new(&MemoryLayout::default());

    let first = enumerator.run(&mut machine);
    let second = enumerator.run(&mut machine);
    assert_eq!(first, second);
}
