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

//! Plain-text rendering
//!
//! Renders the lines the firmware shows on screen, one per phase, followed
//! by indented detail lines for failures.

use super::Reporter;
use crate::core::bank::StopReason;
use crate::core::diagnostic::{DiagnosticReport, PhaseResult, SelectedRun};
use crate::core::pattern::{DataBits, MismatchReport, PatternTestResult};
use std::io::{self, Write};

fn verdict(passed: bool) -> &'static str {
    if passed {
        "PASS"
    } else {
        "FAIL"
    }
}

fn describe_bits(bits: DataBits) -> String {
    bits.positions()
        .map(|bit| format!("D{bit}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe_mismatch(report: &MismatchReport) -> String {
    match (report.first_offset, report.last_offset) {
        (Some(first), Some(last)) => format!(
            "{} byte(s), offsets 0x{:04X}-0x{:04X}, bits {}",
            report.count,
            first,
            last,
            describe_bits(report.bad_bits)
        ),
        _ => "no mismatches".to_string(),
    }
}

fn describe_patterns(result: &PatternTestResult) -> Vec<String> {
    result
        .outcomes
        .iter()
        .filter(|outcome| !outcome.mismatch.passed())
        .map(|outcome| {
            format!(
                "  pattern 0x{:02X}: {}",
                outcome.pattern,
                describe_mismatch(&outcome.mismatch)
            )
        })
        .collect()
}

fn describe_runs(runs: &[SelectedRun]) -> Vec<String> {
    runs.iter()
        .filter(|run| !run.result.passed())
        .flat_map(|run| {
            std::iter::once(format!("  with bank {} selected:", run.selector))
                .chain(describe_patterns(&run.result))
        })
        .collect()
}

/// Lines describing one phase result
///
/// # Example
///
/// ```
/// use ramtester::core::diagnostic::PhaseResult;
/// use ramtester::core::report::render_phase;
///
/// let phase = PhaseResult::BankSwitching { banks: Vec::new() };
/// assert_eq!(render_phase(&phase), vec!["Bank switching test: PASS"]);
/// ```
pub fn render_phase(result: &PhaseResult) -> Vec<String> {
    let passed = result.passed();

    match result {
        PhaseResult::LowMemory { runs } | PhaseResult::HighMemory { runs } => {
            let range = runs
                .first()
                .map(|run| run.result.range.to_string())
                .unwrap_or_default();
            let mut lines = vec![format!("{} ({}): {}", result.name(), range, verdict(passed))];
            lines.extend(describe_runs(runs));
            lines
        }
        PhaseResult::Enumeration { enumeration } => {
            let stop = match enumeration.stop {
                StopReason::Exhausted => "all selectors used".to_string(),
                StopReason::Shadow { selector } => format!("shadow at selector {selector}"),
                StopReason::Alias { selector, aliases } => {
                    format!("selector {selector} aliases bank {aliases}")
                }
            };
            let mut lines = vec![format!(
                "Banks found: {} ({}), {}",
                enumeration.bank_count(),
                enumeration.topology(),
                stop
            )];
            lines.extend(enumeration.readback_mismatches.iter().map(|mismatch| {
                format!(
                    "  register readback: selected {}, read {}",
                    mismatch.selected, mismatch.read_back
                )
            }));
            lines
        }
        PhaseResult::BankableMemory {
            selector,
            result: bank,
            ..
        } => {
            let mut lines = vec![format!(
                "{} ({}: {}): {}",
                result.name(),
                selector,
                bank.range,
                verdict(passed)
            )];
            lines.extend(describe_patterns(bank));
            lines
        }
        PhaseResult::BankSwitching { banks } => {
            let mut lines = vec![format!("{}: {}", result.name(), verdict(passed))];
            lines.extend(
                banks
                    .iter()
                    .filter(|bank| !bank.mismatch.passed())
                    .map(|bank| {
                        format!(
                            "  bank {} (value 0x{:02X}): {}",
                            bank.selector,
                            bank.value,
                            describe_mismatch(&bank.mismatch)
                        )
                    }),
            );
            lines
        }
    }
}

/// Closing lines of a run
pub fn render_summary(report: &DiagnosticReport) -> Vec<String> {
    let failed = report.failed_phases().count();
    let verdict = if failed == 0 {
        "ALL TESTS PASSED".to_string()
    } else {
        format!("{failed} PHASE(S) FAILED")
    };
    vec!["TESTS COMPLETED".to_string(), verdict]
}

/// Reporter writing rendered lines to any `Write`
///
/// The first write error is kept and returned by `into_inner`; later output
/// is dropped.
///
/// # Example
///
/// ```
/// use ramtester::core::diagnostic::PhaseResult;
/// use ramtester::core::report::{Reporter, TextReporter};
///
/// let mut reporter = TextReporter::new(Vec::new());
/// reporter.phase(&PhaseResult::BankSwitching { banks: Vec::new() });
///
/// let output = String::from_utf8(reporter.into_inner().unwrap()).unwrap();
/// assert_eq!(output, "Bank switching test: PASS\n");
/// ```
pub struct TextReporter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TextReporter<W> {
    /// Create a reporter writing to `out`
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Return the writer, or the first write error
    pub fn into_inner(self) -> io::Result<W> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.out),
        }
    }

    fn emit(&mut self, lines: Vec<String>) {
        if self.error.is_some() {
            return;
        }
        for line in lines {
            if let Err(e) = writeln!(self.out, "{line}") {
                log::warn!("Failed to write report: {}", e);
                self.error = Some(e);
                return;
            }
        }
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn phase(&mut self, result: &PhaseResult) {
        self.emit(render_phase(result));
    }

    fn finish(&mut self, report: &DiagnosticReport) {
        self.emit(render_summary(report));
        if let Err(e) = self.out.flush() {
            log::warn!("Failed to flush report: {}", e);
            self.error.get_or_insert(e);
        }
    }
}

/// Reporter sending rendered lines to the `log` facade
///
/// Passing phases log at `info`, failing ones at `warn`.
pub struct LogReporter;

impl Reporter for LogReporter {
    fn phase(&mut self, result: &PhaseResult) {
        let level = if result.passed() {
            log::Level::Info
        } else {
            log::Level::Warn
        };
        for line in render_phase(result) {
            log::log!(level, "{}", line);
        }
    }

    fn finish(&mut self, report: &DiagnosticReport) {
        for line in render_summary(report) {
            log::info!("{}", line);
        }
    }
}
