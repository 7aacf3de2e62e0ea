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

/// Diagnostic error types
///
/// Hardware anomalies (missing banks, aliasing, shadowing, mismatching bytes)
/// are test outcomes and never show up here. These errors only cover the
/// edges: configuration, address arithmetic and machine setup.
use thiserror::Error;

/// Result type for diagnostic operations
pub type Result<T> = std::result::Result<T, RamTestError>;

/// Main error type for the diagnostic
#[derive(Error, Debug)]
pub enum RamTestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Report serialization error: {0}")]
    ReportSerialize(#[from] serde_json::Error),

    #[error("Invalid address range: 0x{start:04X}-0x{stop:05X}")]
    InvalidRange { start: u32, stop: u32 },

    #[error("Invalid memory layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid machine configuration: {0}")]
    InvalidMachine(String),

    #[error("Invalid pattern set: {0}")]
    InvalidPattern(String),

    #[error("Invalid stuck-bit fault: {0}")]
    InvalidFault(String),
}
