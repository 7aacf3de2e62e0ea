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

//! Expansion size classification
//!
//! ```text
//! Banks | Total memory
//! ------|-------------
//!   0   | 16KiB   (no expansion)
//!   1   | 24KiB
//!   6   | 64KiB
//!  14   | 128KiB
//!  30   | 256KiB
//!  46   | 384KiB
//!  62   | 512KiB
//! 128   | 1056KiB
//! 256   | 2080KiB
//! ```

use serde::Serialize;
use std::fmt;

/// Known expansion sizes, named by total machine memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ExpansionTopology {
    /// Bank enumeration was not performed
    #[default]
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "16KiB")]
    Kib16,
    #[serde(rename = "24KiB")]
    Kib24,
    #[serde(rename = "64KiB")]
    Kib64,
    #[serde(rename = "128KiB")]
    Kib128,
    #[serde(rename = "256KiB")]
    Kib256,
    #[serde(rename = "384KiB")]
    Kib384,
    #[serde(rename = "512KiB")]
    Kib512,
    #[serde(rename = "1056KiB")]
    Kib1056,
    #[serde(rename = "2080KiB")]
    Kib2080,
    /// Bank count matches no known expansion
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

const TOPOLOGY_TABLE: [(usize, ExpansionTopology); 9] = [
    (0, ExpansionTopology::Kib16),
    (1, ExpansionTopology::Kib24),
    (6, ExpansionTopology::Kib64),
    (14, ExpansionTopology::Kib128),
    (30, ExpansionTopology::Kib256),
    (46, ExpansionTopology::Kib384),
    (62, ExpansionTopology::Kib512),
    (128, ExpansionTopology::Kib1056),
    (256, ExpansionTopology::Kib2080),
];

/// Map a bank count to its expansion size
///
/// # Example
///
/// ```
/// use ramtester::core::bank::{classify, ExpansionTopology};
///
/// assert_eq!(classify(0), ExpansionTopology::Kib16);
/// assert_eq!(classify(14), ExpansionTopology::Kib128);
/// assert_eq!(classify(200), ExpansionTopology::Unknown);
/// ```
pub fn classify(bank_count: usize) -> ExpansionTopology {
    TOPOLOGY_TABLE
        .iter()
        .find(|(count, _)| *count == bank_count)
        .map_or(ExpansionTopology::Unknown, |&(_, topology)| topology)
}

impl ExpansionTopology {
    /// Total machine memory in KiB, if known
    pub fn total_kib(self) -> Option<u32> {
        match self {
            Self::None | Self::Unknown => None,
            Self::Kib16 => Some(16),
            Self::Kib24 => Some(24),
            Self::Kib64 => Some(64),
            Self::Kib128 => Some(128),
            Self::Kib256 => Some(256),
            Self::Kib384 => Some(384),
            Self::Kib512 => Some(512),
            Self::Kib1056 => Some(1056),
            Self::Kib2080 => Some(2080),
        }
    }

    /// Bank count this topology is classified from, if any
    pub fn bank_count(self) -> Option<usize> {
        TOPOLOGY_TABLE
            .iter()
            .find(|(_, topology)| *topology == self)
            .map(|&(count, _)| count)
    }
}

impl fmt::Display for ExpansionTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Unknown => write!(f, "UNKNOWN"),
            other => match other.total_kib() {
                Some(kib) => write!(f, "{kib}KiB"),
                None => write!(f, "UNKNOWN"),
            },
        }
    }
}
