// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut

//! Diagnostic driver tests
//!
//! Tests cover:
//! - Full runs on fault-free machines of several sizes
//! - Failures confined to the faulty bank or range
//! - Skipped enumeration
//! - Reporter call order

use super::*;
use crate::core::bank::ExpansionTopology;
use crate::core::machine::{MachineConfig, SimulatedMachine, StuckBits};
use crate::core::report::TextReporter;

fn run(config: &DiagnosticConfig) -> (DiagnosticReport, SimulatedMachine, String) {
    let mut machine = SimulatedMachine::new(config.machine.clone()).unwrap();
    let mut reporter = TextReporter::new(Vec::new());
    let report = Diagnostic::new(config).run(&mut machine, &mut reporter);
    let text = String::from_utf8(reporter.into_inner().unwrap()).unwrap();
    (report, machine, text)
}

fn config_with(machine: MachineConfig) -> DiagnosticConfig {
    DiagnosticConfig {
        machine,
        ..DiagnosticConfig::default()
    }
}

#[test]
fn test_six_bank_expansion_passes() {
    let (report, machine, _) = run(&DiagnosticConfig::default());

    assert!(report.passed());
    assert_eq!(report.bank_count, 6);
    assert_eq!(report.topology, ExpansionTopology::Kib64);
    assert_eq!(report.phases.len(), 2 + 1 + 6 + 1);
    assert_eq!(machine.latch(), 0);

    let selectors: Vec<u8> = report.bank_results().map(|(selector, _)| selector).collect();
    assert_eq!(selectors, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_bank_switching_leaves_bank_index_in_each_bank() {
    let (report, machine, _) = run(&DiagnosticConfig::default());

    let Some(PhaseResult::BankSwitching { banks }) = report.phases.last() else {
        panic!("last phase should be bank switching");
    };
    assert_eq!(banks.len(), 6);
    for (index, bank) in banks.iter().enumerate() {
        assert_eq!(bank.value, index as u8);
        assert!(bank.mismatch.passed());
        assert!(machine.bank(index).unwrap().iter().all(|&b| b == index as u8));
    }
}

#[test]
fn test_fixed_memory_tested_under_two_selectors() {
    let (report, _, _) = run(&DiagnosticConfig::default());

    let PhaseResult::LowMemory { runs } = &report.phases[0] else {
        panic!("first phase should be low memory");
    };
    let selectors: Vec<u8> = runs.iter().map(|run| run.selector).collect();
    assert_eq!(selectors, FIXED_TEST_SELECTORS.to_vec());
    assert_eq!(runs[0].result.outcomes.len(), 8);
}

#[test]
fn test_no_expansion() {
    let (report, _, text) = run(&config_with(MachineConfig::with_banks(0)));

    assert!(report.passed());
    assert_eq!(report.bank_count, 0);
    assert_eq!(report.topology, ExpansionTopology::Kib16);
    assert_eq!(report.bank_results().count(), 0);
    assert!(text.contains("Banks found: 0 (16KiB), shadow at selector 0"));
}

#[test]
fn test_faulty_bank_fails_alone() {
    let mut machine = MachineConfig::with_banks(6);
    machine.faults.push(StuckBits {
        bank: Some(3),
        address: 0xE010,
        high: 0x00,
        low: 0x01,
    });
    let (report, _, text) = run(&config_with(machine));

    assert!(!report.passed());
    assert_eq!(report.bank_count, 6);

    for (selector, result) in report.bank_results() {
        assert_eq!(result.passed(), selector != 3, "bank {selector}");
    }

    let bank3 = report
        .bank_results()
        .find(|(selector, _)| *selector == 3)
        .map(|(_, result)| result.clone())
        .unwrap();
    assert_eq!(bank3.failed_patterns(), vec![0x01, 0x55, 0xFF]);
    assert_eq!(bank3.failing_span(), Some((0x10, 0x10)));

    let failed: Vec<&str> = report.failed_phases().map(PhaseResult::name).collect();
    assert_eq!(failed, vec!["Bankable memory", "Bank switching test"]);

    assert!(text.contains("Bankable memory (3: 0xE000-0xFFFF): FAIL"));
    assert!(text.contains("  bank 3 (value 0x03): 1 byte(s), offsets 0x0010-0x0010, bits D0"));
    assert!(text.ends_with("TESTS COMPLETED\n2 PHASE(S) FAILED\n"));
}

#[test]
fn test_fixed_memory_fault_fails_under_both_selectors() {
    let mut machine = MachineConfig::with_banks(1);
    machine.faults.push(StuckBits {
        bank: None,
        address: 0xB000,
        high: 0x80,
        low: 0x00,
    });
    let (report, _, text) = run(&config_with(machine));

    let PhaseResult::HighMemory { runs } = &report.phases[1] else {
        panic!("second phase should be high memory");
    };
    assert!(runs.iter().all(|run| !run.result.passed()));
    assert!(report.phases[0].passed());
    assert!(text.contains("Upper memory (0xA000-0xDFFF): FAIL"));
    assert!(text.contains("  with bank 1 selected:"));
}

#[test]
fn test_skip_banks() {
    let config = DiagnosticConfig {
        skip_banks: true,
        ..DiagnosticConfig::default()
    };
    let (report, _, _) = run(&config);

    assert!(report.passed());
    assert_eq!(report.phases.len(), 2);
    assert_eq!(report.bank_count, 0);
    assert_eq!(report.topology, ExpansionTopology::None);
}

#[test]
fn test_reporter_sees_phases_in_order() {
    let (_, _, text) = run(&config_with(MachineConfig::with_banks(1)));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Low memory (0x6200-0x9EFF): PASS",
            "Upper memory (0xA000-0xDFFF): PASS",
            "Banks found: 1 (24KiB), selector 1 aliases bank 0",
            "Bankable memory (0: 0xE000-0xFFFF): PASS",
            "Bank switching test: PASS",
            "TESTS COMPLETED",
            "ALL TESTS PASSED",
        ]
    );
}
