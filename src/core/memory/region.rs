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

//! Memory region identification and the diagnostic's view of the address space

use super::{AddressRange, ADDRESS_SPACE, BANK_WINDOW_START};
use crate::core::error::{RamTestError, Result};
use serde::{Deserialize, Serialize};

/// Memory region identification
///
/// Used to identify which region of the address space an address belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemoryRegion {
    /// ROM, video/key memory and program variables (never tested)
    System,
    /// Low RAM, not affected by the bank register
    Low,
    /// Stack area between low and high RAM (never tested)
    Stack,
    /// High RAM, not affected by the bank register
    High,
    /// Bank window, contents depend on the selected bank
    Banked,
    /// Anything between the ranges above
    Unmapped,
}

/// Address-space contract consumed from the platform
///
/// Describes which ranges the diagnostic tests, where the bank window sits,
/// where the enumeration sentinels live, and which fixed-memory bases the
/// bank window would shadow if the bank register had no effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryLayout {
    /// Low RAM tested under two bank selections
    pub low: AddressRange,

    /// High RAM tested under two bank selections
    pub high: AddressRange,

    /// Bank window
    pub window: AddressRange,

    /// Sentinel addresses inside the window, two bytes each
    pub sentinels: Vec<u16>,

    /// Fixed-memory bases compared against the window during shadow checks
    ///
    /// A sentinel at window offset `off` is mirrored at `base + off` for
    /// every base listed here.
    pub shadow_sources: Vec<u16>,
}

impl Default for MemoryLayout {
    fn default() -> Self {
        Self {
            low: AddressRange::from_raw(0x6200, 0x9F00),
            high: AddressRange::from_raw(0xA000, u32::from(BANK_WINDOW_START)),
            window: AddressRange::from_raw(u32::from(BANK_WINDOW_START), ADDRESS_SPACE),
            sentinels: vec![0xE000, 0xF000],
            shadow_sources: vec![0xA000, 0xC000],
        }
    }
}

impl MemoryLayout {
    /// Identify memory region for an address
    ///
    /// # Example
    ///
    /// ```
    /// use ramtester::core::memory::{MemoryLayout, MemoryRegion};
    ///
    /// let layout = MemoryLayout::default();
    ///
    /// assert_eq!(layout.identify(0x0000), MemoryRegion::System);
    /// assert_eq!(layout.identify(0x9F80), MemoryRegion::Stack);
    /// assert_eq!(layout.identify(0xA000), MemoryRegion::High);
    /// assert_eq!(layout.identify(0xFFFF), MemoryRegion::Banked);
    /// ```
    pub fn identify(&self, address: u16) -> MemoryRegion {
        let addr = u32::from(address);

        if self.window.contains(address) {
            MemoryRegion::Banked
        } else if self.high.contains(address) {
            MemoryRegion::High
        } else if self.low.contains(address) {
            MemoryRegion::Low
        } else if addr < self.low.start() {
            MemoryRegion::System
        } else if addr >= self.low.stop() && addr < self.high.start() {
            MemoryRegion::Stack
        } else {
            MemoryRegion::Unmapped
        }
    }

    /// Fixed-memory addresses that mirror `sentinel` if the window shadows
    /// fixed RAM, one per shadow source
    ///
    /// A sentinel below the window start has no shadow locations. Shadows of
    /// fixed RAM from a base not listed in `shadow_sources` go unnoticed.
    pub fn shadow_locations(&self, sentinel: u16) -> impl Iterator<Item = u16> + '_ {
        let offset = self.window.offset_of(sentinel);
        self.shadow_sources
            .iter()
            .filter_map(move |&base| offset.map(|offset| (u32::from(base) + offset) as u16))
    }

    /// Check the layout for internal consistency
    ///
    /// # Errors
    ///
    /// Returns `RamTestError::InvalidLayout` if:
    /// - a tested range is empty, or the ranges overlap or are out of order
    /// - there are no sentinels, a sentinel's two bytes leave the window, or
    ///   two sentinels share a byte
    /// - a shadow location falls outside fixed memory
    pub fn validate(&self) -> Result<()> {
        for (name, range) in [("low", &self.low), ("high", &self.high), ("window", &self.window)] {
            if range.is_empty() {
                return Err(RamTestError::InvalidLayout(format!("{name} range is empty")));
            }
        }

        if self.low.stop() > self.high.start() || self.high.stop() > self.window.start() {
            return Err(RamTestError::InvalidLayout(format!(
                "ranges must be ordered low < high < window (low {}, high {}, window {})",
                self.low, self.high, self.window
            )));
        }

        if self.sentinels.is_empty() {
            return Err(RamTestError::InvalidLayout("no sentinels".to_string()));
        }

        if self.shadow_sources.is_empty() {
            return Err(RamTestError::InvalidLayout("no shadow sources".to_string()));
        }

        for &sentinel in &self.sentinels {
            let second = u32::from(sentinel) + 1;
            if !self.window.contains(sentinel) || second >= self.window.stop() {
                return Err(RamTestError::InvalidLayout(format!(
                    "sentinel 0x{sentinel:04X} must have both bytes inside window {}",
                    self.window
                )));
            }

            let offset = u32::from(sentinel) - self.window.start();
            for &base in &self.shadow_sources {
                let location = u32::from(base) + offset;
                if location + 1 >= self.window.start() {
                    return Err(RamTestError::InvalidLayout(format!(
                        "shadow location 0x{location:04X} for sentinel 0x{sentinel:04X} is not in fixed memory"
                    )));
                }
            }
        }

        let mut sorted = self.sentinels.clone();
        sorted.sort_unstable();
        if let Some(pair) = sorted.windows(2).find(|pair| pair[1] - pair[0] < 2) {
            return Err(RamTestError::InvalidLayout(format!(
                "sentinels 0x{:04X} and 0x{:04X} overlap; signatures need two bytes each",
                pair[0], pair[1]
            )));
        }

        Ok(())
    }
}
