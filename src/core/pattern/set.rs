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

//! Named pattern sets

use crate::core::error::RamTestError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Walking-ones patterns: one data bit set at a time
pub const WALKING_ONES: [u8; 8] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80];

/// Checkerboard patterns
pub const CHECKERBOARD: [u8; 2] = [0x55, 0xAA];

/// Stuck-at patterns
pub const STUCK_AT: [u8; 2] = [0x00, 0xFF];

/// Named list of byte patterns
///
/// Config files use the kebab-case names (`"walking-ones"`, `"full"`) or
/// `{ custom = [0x12, 0x34] }`. The CLI additionally accepts a
/// comma-separated hex list:
///
/// ```
/// use ramtester::core::pattern::PatternSet;
///
/// assert_eq!(PatternSet::Checkerboard.patterns(), vec![0x55, 0xAA]);
/// assert_eq!("full".parse::<PatternSet>().unwrap().patterns().len(), 12);
/// assert_eq!(
///     "0x12,34".parse::<PatternSet>().unwrap(),
///     PatternSet::Custom(vec![0x12, 0x34])
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternSet {
    #[default]
    WalkingOnes,
    Checkerboard,
    StuckAt,
    Full,
    Custom(Vec<u8>),
}

impl PatternSet {
    /// Patterns in test order
    pub fn patterns(&self) -> Vec<u8> {
        match self {
            Self::WalkingOnes => WALKING_ONES.to_vec(),
            Self::Checkerboard => CHECKERBOARD.to_vec(),
            Self::StuckAt => STUCK_AT.to_vec(),
            Self::Full => WALKING_ONES
                .iter()
                .chain(&CHECKERBOARD)
                .chain(&STUCK_AT)
                .copied()
                .collect(),
            Self::Custom(patterns) => patterns.clone(),
        }
    }
}

impl FromStr for PatternSet {
    type Err = RamTestError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim() {
            "walking-ones" => Ok(Self::WalkingOnes),
            "checkerboard" => Ok(Self::Checkerboard),
            "stuck-at" => Ok(Self::StuckAt),
            "full" => Ok(Self::Full),
            list => list
                .split(',')
                .map(|item| {
                    let digits = item.trim().trim_start_matches("0x").trim_start_matches("0X");
                    u8::from_str_radix(digits, 16).map_err(|_| {
                        RamTestError::InvalidPattern(format!("unknown pattern set or byte '{item}'"))
                    })
                })
                .collect::<Result<Vec<u8>, _>>()
                .map(Self::Custom),
        }
    }
}
