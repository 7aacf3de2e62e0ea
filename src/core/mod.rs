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

//! Core diagnostic components
//!
//! This module contains all diagnostic components, leaves first:
//! - Memory (address-space contract, bus trait, address ranges)
//! - Bank (selector, sentinel tags, enumerator, topology classifier)
//! - Pattern verification engine
//! - Simulated machine (host-side hardware model)
//! - Diagnostic driver and reporting

pub mod bank;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod machine;
pub mod memory;
pub mod pattern;
pub mod report;

// Re-export commonly used types
pub use bank::{classify, BankEnumerator, BankSelector, BankSet, ExpansionTopology};
pub use config::DiagnosticConfig;
pub use diagnostic::{Diagnostic, DiagnosticReport};
pub use error::{RamTestError, Result};
pub use machine::{MachineConfig, SimulatedMachine};
pub use memory::{AddressRange, MemoryBus, MemoryLayout};
pub use pattern::{MismatchReport, PatternSet, PatternTestResult};
pub use report::{Reporter, TextReporter};
