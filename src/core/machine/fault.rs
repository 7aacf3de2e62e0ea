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

//! Stuck-bit faults

use crate::core::error::RamTestError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Data bits of one byte forced to a fixed level on read
///
/// `bank: None` targets fixed RAM at `address`; `bank: Some(n)` targets
/// physical bank `n` at window address `address`.
///
/// Parsed from `ADDRESS:HIGH:LOW[@BANK]`, all numbers hex with an optional
/// `0x` prefix except the decimal bank:
///
/// ```
/// use ramtester::core::machine::StuckBits;
///
/// let fault: StuckBits = "0xE010:01:80@3".parse().unwrap();
/// assert_eq!(fault.address, 0xE010);
/// assert_eq!(fault.high, 0x01);
/// assert_eq!(fault.low, 0x80);
/// assert_eq!(fault.bank, Some(3));
/// assert_eq!(fault.apply(0xF0), 0x71);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StuckBits {
    /// Physical bank, or `None` for fixed RAM
    #[serde(default)]
    pub bank: Option<u8>,

    /// Address as seen by the CPU
    pub address: u16,

    /// Bits stuck at 1
    #[serde(default)]
    pub high: u8,

    /// Bits stuck at 0
    #[serde(default)]
    pub low: u8,
}

impl StuckBits {
    /// Value actually read when `value` is stored
    pub fn apply(&self, value: u8) -> u8 {
        (value | self.high) & !self.low
    }
}

fn parse_hex<T>(text: &str) -> Result<T, RamTestError>
where
    T: TryFrom<u32>,
{
    let digits = text
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(|value| T::try_from(value).ok())
        .ok_or_else(|| RamTestError::InvalidFault(format!("bad hex value '{text}'")))
}

impl FromStr for StuckBits {
    type Err = RamTestError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (fields, bank) = match text.split_once('@') {
            Some((fields, bank)) => {
                let bank = bank
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| RamTestError::InvalidFault(format!("bad bank '{bank}'")))?;
                (fields, Some(bank))
            }
            None => (text, None),
        };

        let parts: Vec<&str> = fields.split(':').collect();
        let [address, high, low] = parts.as_slice() else {
            return Err(RamTestError::InvalidFault(format!(
                "expected ADDRESS:HIGH:LOW[@BANK], got '{text}'"
            )));
        };

        Ok(Self {
            bank,
            address: parse_hex(address)?,
            high: parse_hex(high)?,
            low: parse_hex(low)?,
        })
    }
}
