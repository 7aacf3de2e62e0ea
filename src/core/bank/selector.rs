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

//! Bank-select register abstraction

use crate::core::memory::MemoryBus;

/// I/O port of the bank-select register on the real machine
pub const BANK_SELECT_PORT: u8 = 0x94;

/// Number of distinct selector values (8-bit register)
pub const SELECTOR_COUNT: usize = 256;

/// Bank-select register
///
/// Writing a selector maps the corresponding physical bank into the bank
/// window. Selection cannot fail from software's point of view: a register
/// that ignores some bits is only visible through what the window shows
/// afterwards.
///
/// Every `select()` changes the contents of the whole bank window. Data in
/// the window must never be assumed to survive a selection; memory outside
/// the window is unaffected.
pub trait BankSelector {
    /// Map bank `selector` into the window
    ///
    /// Idempotent: selecting the active bank again changes nothing.
    fn select(&mut self, selector: u8);

    /// Selector value reported by the register's own readback
    ///
    /// May differ from the last `select()` value when the hardware does not
    /// read back all bits. That difference is a test outcome, not an error.
    fn current(&self) -> u8;
}

/// A machine with both a memory bus and a bank-select register
///
/// Bank enumeration and the diagnostic driver need both; anything
/// implementing the two traits qualifies.
pub trait BankedMachine: MemoryBus + BankSelector {}

impl<T: MemoryBus + BankSelector + ?Sized> BankedMachine for T {}
