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

//! Phase results and the run report

use crate::core::bank::{Enumeration, ExpansionTopology};
use crate::core::pattern::{MismatchReport, PatternTestResult};
use serde::Serialize;

/// Pattern test of a fixed range under one bank selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedRun {
    /// Selector active during the test
    pub selector: u8,
    /// Pattern test outcome
    pub result: PatternTestResult,
}

/// Retention check of one bank in the bank-switching phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BankRetention {
    /// Bank selector
    pub selector: u8,
    /// Value the bank was filled with (its index)
    pub value: u8,
    /// Bytes that no longer held the value
    pub mismatch: MismatchReport,
}

/// Outcome of one diagnostic phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PhaseResult {
    /// Low RAM under each test selector
    LowMemory { runs: Vec<SelectedRun> },

    /// High RAM under each test selector
    HighMemory { runs: Vec<SelectedRun> },

    /// Bank enumeration (informational, always passes)
    Enumeration { enumeration: Enumeration },

    /// Pattern test of one detected bank
    BankableMemory {
        index: usize,
        selector: u8,
        result: PatternTestResult,
    },

    /// Data retention across bank switches
    BankSwitching { banks: Vec<BankRetention> },
}

impl PhaseResult {
    /// Short phase name
    pub fn name(&self) -> &'static str {
        match self {
            Self::LowMemory { .. } => "Low memory",
            Self::HighMemory { .. } => "Upper memory",
            Self::Enumeration { .. } => "Bank enumeration",
            Self::BankableMemory { .. } => "Bankable memory",
            Self::BankSwitching { .. } => "Bank switching test",
        }
    }

    /// True if the phase found no data-integrity failure
    pub fn passed(&self) -> bool {
        match self {
            Self::LowMemory { runs } | Self::HighMemory { runs } => {
                runs.iter().all(|run| run.result.passed())
            }
            Self::Enumeration { .. } => true,
            Self::BankableMemory { result, .. } => result.passed(),
            Self::BankSwitching { banks } => banks.iter().all(|bank| bank.mismatch.passed()),
        }
    }
}

/// Everything one diagnostic run found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    /// Phase results in execution order
    pub phases: Vec<PhaseResult>,

    /// Distinct banks found (0 when enumeration was skipped)
    pub bank_count: usize,

    /// Expansion size (`None` when enumeration was skipped)
    pub topology: ExpansionTopology,
}

impl DiagnosticReport {
    /// True if every phase passed
    pub fn passed(&self) -> bool {
        self.phases.iter().all(PhaseResult::passed)
    }

    /// Phases that failed, in execution order
    pub fn failed_phases(&self) -> impl Iterator<Item = &PhaseResult> {
        self.phases.iter().filter(|phase| !phase.passed())
    }

    /// Pattern results of every detected bank, in bank order
    pub fn bank_results(&self) -> impl Iterator<Item = (u8, &PatternTestResult)> {
        self.phases.iter().filter_map(|phase| match phase {
            PhaseResult::BankableMemory {
                selector, result, ..
            } => Some((*selector, result)),
            _ => None,
        })
    }
}
