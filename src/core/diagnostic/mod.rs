// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Diagnostic driver
//!
//! Sequences the test phases of one diagnostic run and owns bank iteration.
//!
//! ## Phases
//!
//! ```text
//! # | Phase            | Range         | Banks
//! --|------------------|---------------|-------------------------------
//! 1 | Low memory       | layout.low    | under selector 0, then 1
//! 2 | High memory      | layout.high   | under selector 0, then 1
//! 3 | Enumeration      | sentinels     | probes selectors from 0 upward
//! 4 | Bankable memory  | layout.window | each detected bank
//! 5 | Bank switching   | layout.window | all detected banks, fill then check
//! ```
//!
//! Phases 1 and 2 run twice to confirm fixed RAM does not depend on the bank
//! register. Phase 5 fills every bank with its own index before checking any
//! of them, so a bank switch that disturbs another bank shows up.
//!
//! A failing phase never stops the run. Each result is handed to the
//! reporter as soon as it is known; the full report is returned at the end.

mod phase;

#[cfg(test)]
mod tests;

pub use phase::{BankRetention, DiagnosticReport, PhaseResult, SelectedRun};

use crate::core::bank::{BankEnumerator, BankSet, BankedMachine};
use crate::core::config::DiagnosticConfig;
use crate::core::memory::{AddressRange, MemoryLayout};
use crate::core::pattern;
use crate::core::report::Reporter;
use log::{info, warn};

/// Selectors fixed memory is tested under
pub const FIXED_TEST_SELECTORS: [u8; 2] = [0, 1];

/// One diagnostic run context
///
/// # Example
///
/// ```
/// use ramtester::core::config::DiagnosticConfig;
/// use ramtester::core::diagnostic::Diagnostic;
/// use ramtester::core::machine::SimulatedMachine;
/// use ramtester::core::report::LogReporter;
/// use ramtester::core::ExpansionTopology;
///
/// let config = DiagnosticConfig::default();
/// let mut machine = SimulatedMachine::new(config.machine.clone()).unwrap();
///
/// let report = Diagnostic::new(&config).run(&mut machine, &mut LogReporter);
/// assert!(report.passed());
/// assert_eq!(report.topology, ExpansionTopology::Kib64);
/// ```
pub struct Diagnostic {
    layout: MemoryLayout,
    enumerator: BankEnumerator,
    fixed_patterns: Vec<u8>,
    banked_patterns: Vec<u8>,
    skip_banks: bool,
}

impl Diagnostic {
    /// Create a run context from a configuration
    pub fn new(config: &DiagnosticConfig) -> Self {
        Self {
            layout: config.layout.clone(),
            enumerator: BankEnumerator::new(&config.layout),
            fixed_patterns: config.patterns.fixed.patterns(),
            banked_patterns: config.patterns.banked.patterns(),
            skip_banks: config.skip_banks,
        }
    }

    /// Run every phase against `machine`
    ///
    /// Bank 0 is selected on return.
    pub fn run<M, R>(&self, machine: &mut M, reporter: &mut R) -> DiagnosticReport
    where
        M: BankedMachine + ?Sized,
        R: Reporter + ?Sized,
    {
        let mut report = DiagnosticReport::default();
        let mut record = |report: &mut DiagnosticReport, phase: PhaseResult| {
            if !phase.passed() {
                warn!("{} failed", phase.name());
            }
            reporter.phase(&phase);
            report.phases.push(phase);
        };

        info!("Testing lower memory...");
        let low = self.test_fixed(machine, &self.layout.low);
        record(&mut report, PhaseResult::LowMemory { runs: low });

        info!("Testing upper memory...");
        let high = self.test_fixed(machine, &self.layout.high);
        record(&mut report, PhaseResult::HighMemory { runs: high });

        if self.skip_banks {
            info!("Skipping bank enumeration and banked tests");
        } else {
            info!("Counting banks...");
            let enumeration = self.enumerator.run(machine);
            let banks = enumeration.banks.clone();
            report.bank_count = banks.len();
            report.topology = enumeration.topology();
            record(&mut report, PhaseResult::Enumeration { enumeration });

            info!("Testing bankable memory...");
            for (index, selector) in banks.iter().enumerate() {
                let result = self.test_bank(machine, selector);
                record(
                    &mut report,
                    PhaseResult::BankableMemory {
                        index,
                        selector,
                        result,
                    },
                );
            }

            info!("Testing bank switching...");
            let retention = self.test_bank_switching(machine, &banks);
            record(&mut report, PhaseResult::BankSwitching { banks: retention });
        }

        machine.select(0);
        reporter.finish(&report);

        info!(
            "Diagnostic finished: {} ({} bank(s), {})",
            if report.passed() { "PASS" } else { "FAIL" },
            report.bank_count,
            report.topology
        );

        report
    }

    /// Pattern-test a fixed range once under each of `FIXED_TEST_SELECTORS`
    pub fn test_fixed<M: BankedMachine + ?Sized>(
        &self,
        machine: &mut M,
        range: &AddressRange,
    ) -> Vec<SelectedRun> {
        let mut runs = Vec::with_capacity(FIXED_TEST_SELECTORS.len());

        for selector in FIXED_TEST_SELECTORS {
            machine.select(selector);
            let result = pattern::test_range(machine, range, &self.fixed_patterns);
            runs.push(SelectedRun { selector, result });
        }

        runs
    }

    /// Select `selector` and pattern-test the bank window
    pub fn test_bank<M: BankedMachine + ?Sized>(
        &self,
        machine: &mut M,
        selector: u8,
    ) -> pattern::PatternTestResult {
        machine.select(selector);
        pattern::test_range(machine, &self.layout.window, &self.banked_patterns)
    }

    /// Fill every bank with its index, then check every bank
    pub fn test_bank_switching<M: BankedMachine + ?Sized>(
        &self,
        machine: &mut M,
        banks: &BankSet,
    ) -> Vec<BankRetention> {
        for (index, selector) in banks.iter().enumerate() {
            machine.select(selector);
            pattern::write(machine, &self.layout.window, index as u8);
        }

        let mut retention = Vec::with_capacity(banks.len());

        for (index, selector) in banks.iter().enumerate() {
            machine.select(selector);
            let value = index as u8;
            let mismatch = pattern::verify(machine, &self.layout.window, value);
            retention.push(BankRetention {
                selector,
                value,
                mismatch,
            });
        }

        retention
    }
}

impl Default for Diagnostic {
    fn default() -> Self {
        Self::new(&DiagnosticConfig::default())
    }
}

