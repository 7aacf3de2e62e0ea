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

//! Simulated bank-switched machine
//!
//! A host-side model of the address space and bank-select register, so the
//! enumerator and the pattern engine can run without real hardware. The model
//! is behavioural, not timing accurate.
//!
//! # Bank Window Mapping
//!
//! The selector written to the register is first masked to the register's
//! width. A masked selector below the number of physical banks maps that
//! bank; anything above is decided by the `BeyondPolicy`:
//!
//! ```text
//! Policy  | Window shows
//! --------|-------------------------------------------------
//! Alias   | physical bank (masked % physical_banks)
//! Shadow  | fixed RAM starting at `target`
//! OpenBus | 0xFF on every read, writes are dropped
//! ```
//!
//! # Example
//!
//! ```
//! use ramtester::core::bank::BankSelector;
//! use ramtester::core::machine::{MachineConfig, SimulatedMachine};
//! use ramtester::core::memory::MemoryBus;
//!
//! let mut machine = SimulatedMachine::new(MachineConfig::with_banks(2)).unwrap();
//!
//! machine.select(0);
//! machine.write8(0xE000, 0x11);
//! machine.select(1);
//! machine.write8(0xE000, 0x22);
//!
//! machine.select(0);
//! assert_eq!(machine.read8(0xE000), 0x11);
//!
//! // Selector 2 wraps around onto bank 0
//! machine.select(2);
//! assert_eq!(machine.read8(0xE000), 0x11);
//! ```

mod config;
mod fault;

pub use config::{BeyondPolicy, MachineConfig};
pub use fault::StuckBits;

use crate::core::bank::BankSelector;
use crate::core::error::Result;
use crate::core::memory::{MemoryBus, BANK_BYTES, BANK_WINDOW_START};

/// Value read from an address nothing drives
const OPEN_BUS: u8 = 0xFF;

/// Physical storage an address resolves to under the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    /// Fixed (unbanked) RAM at this address
    Fixed(u16),
    /// Physical bank and offset inside it
    Bank(usize, usize),
    /// Nothing responds
    OpenBus,
}

/// Simulated machine with fixed RAM below the bank window and up to 256
/// physical banks behind it
pub struct SimulatedMachine {
    /// Fixed RAM, 0x0000 up to the bank window
    fixed: Vec<u8>,

    /// Physical banks, 8KB each
    banks: Vec<Vec<u8>>,

    /// Last value written to the bank-select register
    latch: u8,

    /// Hardware model
    config: MachineConfig,
}

impl SimulatedMachine {
    /// Create a machine from a validated configuration
    ///
    /// All memory starts zeroed and bank 0 is selected.
    pub fn new(config: MachineConfig) -> Result<Self> {
        config.validate()?;

        log::debug!(
            "Simulated machine: {} physical bank(s), {}-bit register, beyond: {:?}",
            config.physical_banks,
            config.register_bits,
            config.beyond
        );

        Ok(Self {
            fixed: vec![0u8; usize::from(BANK_WINDOW_START)],
            banks: vec![vec![0u8; BANK_BYTES]; usize::from(config.physical_banks)],
            latch: 0,
            config,
        })
    }

    /// Hardware model in use
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Last value written to the bank-select register, before masking
    pub fn latch(&self) -> u8 {
        self.latch
    }

    /// Raw contents of physical bank `index`, bypassing the register
    pub fn bank(&self, index: usize) -> Option<&[u8]> {
        self.banks.get(index).map(Vec::as_slice)
    }

    /// Raw contents of fixed RAM, bypassing faults
    pub fn fixed(&self) -> &[u8] {
        &self.fixed
    }

    /// Add a stuck-bit fault
    pub fn inject(&mut self, fault: StuckBits) {
        self.config.faults.push(fault);
    }

    /// Resolve an address under the current bank selection
    fn locate(&self, address: u16) -> Location {
        if address < BANK_WINDOW_START {
            return Location::Fixed(address);
        }

        let offset = usize::from(address - BANK_WINDOW_START);
        let masked = usize::from(self.latch & self.config.register_mask());
        let physical = self.banks.len();

        if masked < physical {
            return Location::Bank(masked, offset);
        }

        match self.config.beyond {
            BeyondPolicy::Alias if physical > 0 => Location::Bank(masked % physical, offset),
            BeyondPolicy::Alias | BeyondPolicy::OpenBus => Location::OpenBus,
            BeyondPolicy::Shadow { target } => Location::Fixed(target + offset as u16),
        }
    }

    /// Apply every fault matching `location` to a raw value
    fn apply_faults(&self, location: Location, value: u8) -> u8 {
        self.config
            .faults
            .iter()
            .filter(|fault| match (location, fault.bank) {
                (Location::Fixed(address), None) => fault.address == address,
                (Location::Bank(bank, offset), Some(fault_bank)) => {
                    usize::from(fault_bank) == bank
                        && usize::from(fault.address) == usize::from(BANK_WINDOW_START) + offset
                }
                _ => false,
            })
            .fold(value, |value, fault| fault.apply(value))
    }
}

impl MemoryBus for SimulatedMachine {
    fn read8(&self, address: u16) -> u8 {
        let location = self.locate(address);
        let raw = match location {
            Location::Fixed(address) => self.fixed[usize::from(address)],
            Location::Bank(bank, offset) => self.banks[bank][offset],
            Location::OpenBus => return OPEN_BUS,
        };
        self.apply_faults(location, raw)
    }

    fn write8(&mut self, address: u16, value: u8) {
        match self.locate(address) {
            Location::Fixed(address) => self.fixed[usize::from(address)] = value,
            Location::Bank(bank, offset) => self.banks[bank][offset] = value,
            Location::OpenBus => {}
        }
    }
}

impl BankSelector for SimulatedMachine {
    fn select(&mut self, selector: u8) {
        self.latch = selector;
    }

    fn current(&self) -> u8 {
        self.latch & self.config.readback_bits
    }
}
