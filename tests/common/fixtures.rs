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

//! Test fixtures for common diagnostic scenarios

use ramtester::core::machine::{BeyondPolicy, MachineConfig, SimulatedMachine};
use ramtester::core::report::TextReporter;
use ramtester::core::{Diagnostic, DiagnosticConfig, DiagnosticReport};

/// Machine with `banks` physical banks that alias past the last one
#[allow(dead_code)]
pub fn aliasing_machine(banks: u16) -> SimulatedMachine {
    SimulatedMachine::new(MachineConfig::with_banks(banks)).expect("valid machine")
}

/// Machine whose window shows fixed RAM at `target` past the last bank
#[allow(dead_code)]
pub fn shadowing_machine(banks: u16, target: u16) -> SimulatedMachine {
    let config = MachineConfig {
        beyond: BeyondPolicy::Shadow { target },
        ..MachineConfig::with_banks(banks)
    };
    SimulatedMachine::new(config).expect("valid machine")
}

/// Run the full diagnostic and return the report with the rendered text
#[allow(dead_code)]
pub fn run_diagnostic(config: &DiagnosticConfig) -> (DiagnosticReport, String) {
    let mut machine = SimulatedMachine::new(config.machine.clone()).expect("valid machine");
    let mut reporter = TextReporter::new(Vec::new());
    let report = Diagnostic::new(config).run(&mut machine, &mut reporter);
    let output = reporter.into_inner().expect("in-memory writer");
    (report, String::from_utf8(output).expect("report is UTF-8"))
}
