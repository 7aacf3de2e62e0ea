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

//! Bank detection
//!
//! The expansion multiplexes up to 256 physical 8KB banks into a fixed window
//! behind one 8-bit bank-select register. Nothing tells software how many of
//! those selector values address real, distinct storage, so the bank count is
//! discovered by probing:
//!
//! - `selector`: the bank-select register abstraction
//! - `tag`: per-(selector, sentinel) signature bytes
//! - `enumerator`: the probing algorithm with shadow and alias disambiguation
//! - `topology`: bank count to expansion size lookup
//!
//! ## Failure modes the enumerator tells apart
//!
//! ```text
//! Condition  | What the hardware does                    | Detected by
//! -----------|-------------------------------------------|---------------------
//! Exhaustion | window maps onto fixed RAM                | shadow check
//! Aliasing   | narrow register, two selectors, one bank  | alias check
//! Missing    | window reads open bus / fixed value       | signature readback
//! ```

mod enumerator;
mod selector;
mod tag;
mod topology;

#[cfg(test)]
mod tests;

pub use enumerator::{BankEnumerator, BankSet, Enumeration, ReadbackMismatch, StopReason};
pub use selector::{BankSelector, BankedMachine, BANK_SELECT_PORT, SELECTOR_COUNT};
pub use tag::{tag_byte, verify_signature, write_signature, TAG_BASE, TAG_STRIDE};
pub use topology::{classify, ExpansionTopology};
