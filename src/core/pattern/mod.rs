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

//! Pattern verification engine
//!
//! Writes a byte pattern across an address range, reads the whole range
//! back and tallies every byte that differs. The engine has no notion of
//! banks: callers select the bank first and run the engine once per bank.
//!
//! ## Pattern Sets
//!
//! ```text
//! Set          | Patterns                         | Catches
//! -------------|----------------------------------|---------------------------
//! WalkingOnes  | 0x01 0x02 0x04 ... 0x80          | single data line faults
//! Checkerboard | 0x55 0xAA                        | adjacent bit coupling
//! StuckAt      | 0x00 0xFF                        | lines fixed at 0 or 1
//! Full         | all of the above, in that order  |
//! ```
//!
//! # Example
//!
//! ```
//! use ramtester::core::machine::{MachineConfig, SimulatedMachine};
//! use ramtester::core::memory::{AddressRange, MemoryBus};
//! use ramtester::core::pattern::{self, PatternSet};
//!
//! let mut machine = SimulatedMachine::new(MachineConfig::default()).unwrap();
//! let range = AddressRange::new(0x6200, 0x6300).unwrap();
//!
//! pattern::write(&mut machine, &range, 0xAA);
//! machine.write8(0x6210, 0xAB);
//!
//! let report = pattern::verify(&machine, &range, 0xAA);
//! assert_eq!(report.count, 1);
//! assert_eq!(report.first_offset, Some(0x10));
//! assert_eq!(report.last_offset, Some(0x10));
//!
//! let result = pattern::test_range(&mut machine, &range, &PatternSet::Full.patterns());
//! assert!(result.passed());
//! ```

mod bits;
mod set;


pub use bits::DataBits;
pub use set::PatternSet;

use crate::core::memory::{AddressRange, MemoryBus};
use log::debug;
use serde::Serialize;

/// Mismatches found by one verify pass
///
/// Offsets are relative to the range start and `None` while `count` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MismatchReport {
    /// Number of bytes that did not read back as expected
    pub count: u32,

    /// Offset of the first mismatching byte
    pub first_offset: Option<u32>,

    /// Offset of the last mismatching byte
    pub last_offset: Option<u32>,

    /// Data bits that differed in at least one byte
    pub bad_bits: DataBits,
}

impl MismatchReport {
    /// True if every byte matched
    pub fn passed(&self) -> bool {
        self.count == 0
    }

    fn record(&mut self, offset: u32, expected: u8, actual: u8) {
        self.count += 1;
        self.first_offset.get_or_insert(offset);
        self.last_offset = Some(offset);
        self.bad_bits |= DataBits::from_bits_retain(expected ^ actual);
    }
}

/// Result of verifying one pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatternOutcome {
    /// Pattern written and expected back
    pub pattern: u8,
    /// What the read-back pass found
    pub mismatch: MismatchReport,
}

/// Result of testing one range against a list of patterns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternTestResult {
    /// Range tested
    pub range: AddressRange,
    /// One outcome per pattern, in test order
    pub outcomes: Vec<PatternOutcome>,
}

impl PatternTestResult {
    /// True if every pattern read back without mismatches
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.mismatch.passed())
    }

    /// Patterns with at least one mismatching byte
    pub fn failed_patterns(&self) -> Vec<u8> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.mismatch.passed())
            .map(|outcome| outcome.pattern)
            .collect()
    }

    /// Mismatching bytes summed over all patterns
    pub fn total_mismatches(&self) -> u64 {
        self.outcomes
            .iter()
            .map(|outcome| u64::from(outcome.mismatch.count))
            .sum()
    }

    /// Data bits that failed under any pattern
    pub fn bad_bits(&self) -> DataBits {
        self.outcomes
            .iter()
            .fold(DataBits::empty(), |bits, outcome| bits | outcome.mismatch.bad_bits)
    }

    /// Lowest and highest failing offset over all patterns
    pub fn failing_span(&self) -> Option<(u32, u32)> {
        let first = self.outcomes.iter().filter_map(|o| o.mismatch.first_offset).min()?;
        let last = self.outcomes.iter().filter_map(|o| o.mismatch.last_offset).max()?;
        Some((first, last))
    }
}

/// Fill every byte of `range` with `pattern`
pub fn write<M: MemoryBus + ?Sized>(bus: &mut M, range: &AddressRange, pattern: u8) {
    for address in range.addresses() {
        bus.write8(address, pattern);
    }
}

/// Read every byte of `range` and report those not equal to `pattern`
///
/// The whole range is always read; an empty range reports no mismatches.
pub fn verify<M: MemoryBus + ?Sized>(bus: &M, range: &AddressRange, pattern: u8) -> MismatchReport {
    let mut report = MismatchReport::default();

    for (offset, address) in (0u32..).zip(range.addresses()) {
        let actual = bus.read8(address);
        if actual != pattern {
            report.record(offset, pattern, actual);
        }
    }

    report
}

/// Write then verify `range` once per pattern
///
/// Failures never stop the run: every pattern is exercised.
pub fn test_range<M: MemoryBus + ?Sized>(
    bus: &mut M,
    range: &AddressRange,
    patterns: &[u8],
) -> PatternTestResult {
    let mut outcomes = Vec::with_capacity(patterns.len());

    for &pattern in patterns {
        write(bus, range, pattern);
        let mismatch = verify(bus, range, pattern);

        debug!(
            "Pattern 0x{:02X} over {}: {} mismatch(es)",
            pattern, range, mismatch.count
        );

        outcomes.push(PatternOutcome { pattern, mismatch });
    }

    PatternTestResult {
        range: *range,
        outcomes,
    }
}
