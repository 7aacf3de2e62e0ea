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

//! Bank-switched RAM expansion diagnostic library
//!
//! This library provides the core of a memory diagnostic for an 8-bit computer
//! with a bank-switched RAM expansion behind a single 8-bit bank-select register:
//! bank enumeration (alias and shadow disambiguation), expansion size
//! classification and pattern-based memory verification. A simulated machine
//! makes the whole diagnostic runnable and testable on the host.
//!
//! # Example
//!
//! ```
//! use ramtester::core::bank::{classify, BankEnumerator, ExpansionTopology};
//! use ramtester::core::machine::{MachineConfig, SimulatedMachine};
//! use ramtester::core::memory::MemoryLayout;
//!
//! let mut machine = SimulatedMachine::new(MachineConfig::with_banks(6)).unwrap();
//! let enumerator = BankEnumerator::new(&MemoryLayout::default());
//!
//! let enumeration = enumerator.run(&mut machine);
//! assert_eq!(enumeration.banks.len(), 6);
//! assert_eq!(classify(enumeration.banks.len()), ExpansionTopology::Kib64);
//! ```

pub mod core;
