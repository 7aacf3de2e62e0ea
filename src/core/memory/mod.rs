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

//! Address-space contract for the diagnostic
//!
//! The machine under test exposes a flat 16-bit address space. Only part of it
//! is memory the diagnostic may touch:
//!
//! # Memory Map
//!
//! | Address Range   | Region       | Size    | Banked |
//! |-----------------|--------------|---------|--------|
//! | 0x0000-0x61FF   | System       | 24.5KB  | no     |
//! | 0x6200-0x9EFF   | Low RAM      | 15.25KB | no     |
//! | 0x9F00-0x9FFF   | Stack        | 256B    | no     |
//! | 0xA000-0xDFFF   | High RAM     | 16KB    | no     |
//! | 0xE000-0xFFFF   | Bank window  | 8KB     | yes    |
//!
//! The system area holds ROM, video and key memory and the program's own
//! variables; the stack sits right below high RAM. Both are excluded from
//! testing. The bank window shows whichever physical bank the bank-select
//! register currently points at.
//!
//! # Example
//!
//! ```
//! use ramtester::core::memory::{MemoryLayout, MemoryRegion};
//!
//! let layout = MemoryLayout::default();
//!
//! assert_eq!(layout.identify(0x7000), MemoryRegion::Low);
//! assert_eq!(layout.identify(0xE000), MemoryRegion::Banked);
//! assert_eq!(layout.window.len(), 0x2000);
//! ```

mod range;
mod region;


pub use range::AddressRange;
pub use region::{MemoryLayout, MemoryRegion};

/// Size of the full address space (64KB)
pub const ADDRESS_SPACE: u32 = 0x1_0000;

/// First address of the bank window
pub const BANK_WINDOW_START: u16 = 0xE000;

/// Bytes per bank (8KB)
pub const BANK_BYTES: usize = 0x2000;

/// Byte-wide access to the machine's address space
///
/// Every read and write goes to whatever is currently mapped at the address;
/// for addresses inside the bank window that depends on the last bank
/// selection. Accesses never fail: a write that silently does not stick is
/// exactly what the diagnostic is looking for.
pub trait MemoryBus {
    /// Read the byte at `address`
    fn read8(&self, address: u16) -> u8;

    /// Write `value` to `address`
    fn write8(&mut self, address: u16, value: u8);
}
