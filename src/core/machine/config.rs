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

//! Hardware model configuration for the simulated machine

use super::StuckBits;
use crate::core::error::{RamTestError, Result};
use crate::core::memory::{BANK_BYTES, BANK_WINDOW_START};
use serde::{Deserialize, Serialize};

/// What the window shows for selectors past the last physical bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BeyondPolicy {
    /// Wrap around onto an existing bank
    #[default]
    Alias,
    /// Map onto fixed RAM starting at `target`
    Shadow { target: u16 },
    /// Nothing responds
    OpenBus,
}

/// Simulated hardware model
///
/// # Example
///
/// ```
/// use ramtester::core::machine::{BeyondPolicy, MachineConfig};
///
/// let config: MachineConfig = toml::from_str(r#"
///     physical_banks = 14
///     beyond = { kind = "shadow", target = 0xA000 }
/// "#).unwrap();
///
/// assert_eq!(config.physical_banks, 14);
/// assert_eq!(config.register_bits, 8);
/// assert_eq!(config.beyond, BeyondPolicy::Shadow { target: 0xA000 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Number of physical 8KB banks (0-256)
    pub physical_banks: u16,

    /// Number of selector bits the register decodes (1-8)
    pub register_bits: u8,

    /// Window behaviour past the last physical bank
    pub beyond: BeyondPolicy,

    /// Bits the register reports back on readback
    pub readback_bits: u8,

    /// Stuck-bit faults applied on read
    pub faults: Vec<StuckBits>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            physical_banks: 6,
            register_bits: 8,
            beyond: BeyondPolicy::Alias,
            readback_bits: 0xFF,
            faults: Vec::new(),
        }
    }
}

impl MachineConfig {
    /// Default model with `physical_banks` banks
    pub fn with_banks(physical_banks: u16) -> Self {
        Self {
            physical_banks,
            ..Self::default()
        }
    }

    /// Mask applied to selector values by the register
    pub fn register_mask(&self) -> u8 {
        match self.register_bits {
            bits @ 1..=7 => (1u8 << bits) - 1,
            _ => 0xFF,
        }
    }

    /// Check the model for values the machine cannot represent
    ///
    /// # Errors
    ///
    /// Returns `RamTestError::InvalidMachine` if:
    /// - more than 256 physical banks are requested
    /// - the register width is outside 1-8 bits
    /// - a shadow target does not leave room for a whole window in fixed RAM
    /// - a fault names a bank that does not exist or an address in the
    ///   wrong region
    pub fn validate(&self) -> Result<()> {
        if self.physical_banks > 256 {
            return Err(RamTestError::InvalidMachine(format!(
                "{} physical banks requested, at most 256 are addressable",
                self.physical_banks
            )));
        }

        if !(1..=8).contains(&self.register_bits) {
            return Err(RamTestError::InvalidMachine(format!(
                "register width must be 1-8 bits, got {}",
                self.register_bits
            )));
        }

        if let BeyondPolicy::Shadow { target } = self.beyond {
            if usize::from(target) + BANK_BYTES > usize::from(BANK_WINDOW_START) {
                return Err(RamTestError::InvalidMachine(format!(
                    "shadow target 0x{target:04X} leaves no room for an 8KB window below 0x{BANK_WINDOW_START:04X}"
                )));
            }
        }

        for fault in &self.faults {
            match fault.bank {
                Some(bank) if u16::from(bank) >= self.physical_banks => {
                    return Err(RamTestError::InvalidMachine(format!(
                        "fault names bank {bank}, only {} exist",
                        self.physical_banks
                    )));
                }
                Some(_) if fault.address < BANK_WINDOW_START => {
                    return Err(RamTestError::InvalidMachine(format!(
                        "banked fault address 0x{:04X} is outside the bank window",
                        fault.address
                    )));
                }
                None if fault.address >= BANK_WINDOW_START => {
                    return Err(RamTestError::InvalidMachine(format!(
                        "fixed fault address 0x{:04X} is inside the bank window",
                        fault.address
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }
}
