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

//! Diagnostic configuration
//!
//! Configuration is read from a TOML file. Every section and key is optional;
//! missing values fall back to the defaults of the original machine (16KB
//! base RAM, 8KB bank window at 0xE000, six-bank expansion in simulation).
//!
//! # Format
//!
//! ```toml
//! skip_banks = false
//!
//! [layout]
//! low = { start = 0x6200, stop = 0x9F00 }
//! high = { start = 0xA000, stop = 0xE000 }
//! window = { start = 0xE000, stop = 0x10000 }
//! sentinels = [0xE000, 0xF000]
//! shadow_sources = [0xA000, 0xC000]
//!
//! [patterns]
//! fixed = "walking-ones"
//! banked = "full"
//!
//! [machine]
//! physical_banks = 14
//! register_bits = 8
//! readback_bits = 0xFF
//! beyond = { kind = "shadow", target = 0xA000 }
//!
//! [[machine.faults]]
//! bank = 3
//! address = 0xE010
//! high = 0x01
//! ```

use crate::core::error::{RamTestError, Result};
use crate::core::machine::MachineConfig;
use crate::core::memory::{MemoryLayout, BANK_BYTES, BANK_WINDOW_START};
use crate::core::pattern::PatternSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "RAMTESTER_CONFIG";

/// Pattern sets per memory class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Patterns for low and high RAM
    pub fixed: PatternSet,

    /// Patterns for every detected bank
    pub banked: PatternSet,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            fixed: PatternSet::WalkingOnes,
            banked: PatternSet::Full,
        }
    }
}

/// Complete diagnostic configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticConfig {
    /// Address-space contract
    pub layout: MemoryLayout,

    /// Pattern sets
    pub patterns: PatternConfig,

    /// Simulated hardware model
    pub machine: MachineConfig,

    /// Skip enumeration and all banked phases
    pub skip_banks: bool,
}

impl DiagnosticConfig {
    /// Parse and validate a TOML document
    ///
    /// # Example
    ///
    /// ```
    /// use ramtester::core::config::DiagnosticConfig;
    ///
    /// let config = DiagnosticConfig::parse("[machine]\nphysical_banks = 30").unwrap();
    /// assert_eq!(config.machine.physical_banks, 30);
    /// assert_eq!(config.layout.sentinels, vec![0xE000, 0xF000]);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading config from: {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Validate the layout and the machine model
    ///
    /// The layout window must be the window the simulated machine decodes.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;

        let window = &self.layout.window;
        if window.start() != u32::from(BANK_WINDOW_START) || window.len() != BANK_BYTES as u32 {
            return Err(RamTestError::InvalidLayout(format!(
                "window {} does not match the bank window 0x{:04X}-0x{:04X}",
                window,
                BANK_WINDOW_START,
                u32::from(BANK_WINDOW_START) + BANK_BYTES as u32 - 1
            )));
        }

        self.machine.validate()
    }
}
