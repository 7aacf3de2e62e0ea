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

//! Half-open address ranges over the 16-bit address space

use super::ADDRESS_SPACE;
use crate::core::error::{RamTestError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open address range `[start, stop)`
///
/// `stop` may be `0x10000` so that a range can reach the last byte of the
/// address space. Offsets reported against a range are relative to `start`.
///
/// # Example
///
/// ```
/// use ramtester::core::memory::AddressRange;
///
/// let range = AddressRange::new(0xE000, 0x10000).unwrap();
/// assert_eq!(range.len(), 0x2000);
/// assert_eq!(range.to_string(), "0xE000-0xFFFF");
///
/// assert!(AddressRange::new(0x9000, 0x8000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct AddressRange {
    start: u32,
    stop: u32,
}

/// Raw `{ start, stop }` table as written in a config file
#[derive(Deserialize)]
struct RawRange {
    start: u32,
    stop: u32,
}

impl TryFrom<RawRange> for AddressRange {
    type Error = RamTestError;

    fn try_from(raw: RawRange) -> Result<Self> {
        Self::new(raw.start, raw.stop)
    }
}

impl AddressRange {
    /// Create a range, rejecting reversed bounds and bounds past 64KB
    pub fn new(start: u32, stop: u32) -> Result<Self> {
        if start > stop || stop > ADDRESS_SPACE {
            return Err(RamTestError::InvalidRange { start, stop });
        }
        Ok(Self { start, stop })
    }

    /// Create a range of `len` bytes starting at `start`
    pub fn with_len(start: u16, len: u32) -> Result<Self> {
        let start = u32::from(start);
        Self::new(start, start.saturating_add(len))
    }

    /// Create a range whose bounds are known to be valid
    pub(crate) const fn from_raw(start: u32, stop: u32) -> Self {
        Self { start, stop }
    }

    /// First address of the range
    pub const fn start(&self) -> u32 {
        self.start
    }

    /// One past the last address of the range
    pub const fn stop(&self) -> u32 {
        self.stop
    }

    /// Number of bytes covered
    pub const fn len(&self) -> u32 {
        self.stop - self.start
    }

    /// True for `start == stop`
    pub const fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    /// True if `address` lies inside the range
    pub fn contains(&self, address: u16) -> bool {
        (self.start..self.stop).contains(&u32::from(address))
    }

    /// True if the two ranges share at least one address
    pub fn overlaps(&self, other: &AddressRange) -> bool {
        self.start < other.stop && other.start < self.stop
    }

    /// Every address in the range, in ascending order
    pub fn addresses(&self) -> impl Iterator<Item = u16> {
        // stop <= 0x10000, so every yielded value fits in 16 bits
        (self.start..self.stop).map(|address| address as u16)
    }

    /// Offset of `address` from the range start, `None` below the start
    pub fn offset_of(&self, address: u16) -> Option<u32> {
        u32::from(address).checked_sub(self.start)
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "0x{:04X} (empty)", self.start)
        } else {
            write!(f, "0x{:04X}-0x{:04X}", self.start, self.stop - 1)
        }
    }
}
