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

//! Result reporting
//!
//! Reporters consume phase results as the diagnostic produces them. The
//! diagnostic core never formats text itself; everything user-facing is
//! rendered here.

mod text;

pub use text::{render_phase, render_summary, LogReporter, TextReporter};

use crate::core::diagnostic::{DiagnosticReport, PhaseResult};

/// Consumer of diagnostic results
///
/// Reporting is a side channel: implementations must not fail the run, so
/// both methods are infallible.
pub trait Reporter {
    /// Called once per phase, as soon as its result is known
    fn phase(&mut self, result: &PhaseResult);

    /// Called once after the last phase
    fn finish(&mut self, report: &DiagnosticReport);
}
