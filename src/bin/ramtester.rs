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

//! Bank-switched RAM diagnostic
//!
//! Runs the full diagnostic against a simulated machine described by a TOML
//! file and command line overrides, printing the report to stdout.

use clap::{Parser, ValueEnum};
use log::{error, info};
use ramtester::core::config::CONFIG_ENV;
use ramtester::core::machine::{BeyondPolicy, StuckBits};
use ramtester::core::pattern::PatternSet;
use ramtester::core::report::LogReporter;
use ramtester::core::{Diagnostic, DiagnosticConfig, Result, SimulatedMachine, TextReporter};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Behaviour of selectors past the last physical bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Beyond {
    Alias,
    Shadow,
    OpenBus,
}

/// Bank-switched RAM expansion diagnostic
#[derive(Parser)]
#[command(name = "ramtester")]
#[command(version, about = "Bank-switched RAM expansion diagnostic", long_about = None)]
struct Args {
    /// Path to a TOML configuration file (falls back to $RAMTESTER_CONFIG)
    config: Option<PathBuf>,

    /// Number of physical 8KB banks in the simulated expansion
    #[arg(short = 'b', long)]
    banks: Option<u16>,

    /// Selector bits decoded by the bank register
    #[arg(long)]
    register_bits: Option<u8>,

    /// What selectors past the last bank map to
    #[arg(long, value_enum)]
    beyond: Option<Beyond>,

    /// Fixed RAM address used when --beyond shadow
    #[arg(long, value_parser = parse_hex_u16, default_value = "0xA000")]
    shadow_target: u16,

    /// Mask of bank register bits that read back (hex)
    #[arg(long, value_parser = parse_hex_u8)]
    readback_bits: Option<u8>,

    /// Inject a stuck-bit fault, ADDR:HIGH:LOW[@BANK] (repeatable)
    #[arg(long = "stuck")]
    stuck: Vec<StuckBits>,

    /// Patterns for low and high RAM (set name or hex list)
    #[arg(short = 'p', long)]
    patterns: Option<PatternSet>,

    /// Patterns for every detected bank (set name or hex list)
    #[arg(long)]
    bank_patterns: Option<PatternSet>,

    /// Skip enumeration and all banked phases
    #[arg(long)]
    skip_banks: bool,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn parse_hex_u16(text: &str) -> std::result::Result<u16, String> {
    let digits = text.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid address '{text}': {e}"))
}

fn parse_hex_u8(text: &str) -> std::result::Result<u8, String> {
    let digits = text.trim_start_matches("0x").trim_start_matches("0X");
    u8::from_str_radix(digits, 16).map_err(|e| format!("invalid byte '{text}': {e}"))
}

impl Args {
    fn config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    /// Apply command line overrides on top of a loaded configuration
    fn apply(&self, config: &mut DiagnosticConfig) -> Result<()> {
        let machine = &mut config.machine;
        if let Some(banks) = self.banks {
            machine.physical_banks = banks;
        }
        if let Some(bits) = self.register_bits {
            machine.register_bits = bits;
        }
        if let Some(beyond) = self.beyond {
            machine.beyond = match beyond {
                Beyond::Alias => BeyondPolicy::Alias,
                Beyond::Shadow => BeyondPolicy::Shadow {
                    target: self.shadow_target,
                },
                Beyond::OpenBus => BeyondPolicy::OpenBus,
            };
        }
        if let Some(mask) = self.readback_bits {
            machine.readback_bits = mask;
        }
        machine.faults.extend(self.stuck.iter().copied());

        if let Some(patterns) = &self.patterns {
            config.patterns.fixed = patterns.clone();
        }
        if let Some(patterns) = &self.bank_patterns {
            config.patterns.banked = patterns.clone();
        }
        config.skip_banks |= self.skip_banks;

        config.validate()
    }
}

fn run(args: &Args) -> Result<bool> {
    let mut config = match args.config_path() {
        Some(path) => DiagnosticConfig::load(&path)?,
        None => DiagnosticConfig::default(),
    };
    args.apply(&mut config)?;

    info!(
        "Simulating {} bank(s), {} selector bit(s), beyond last bank: {:?}",
        config.machine.physical_banks, config.machine.register_bits, config.machine.beyond
    );

    let mut machine = SimulatedMachine::new(config.machine.clone())?;
    let diagnostic = Diagnostic::new(&config);

    let report = if args.json {
        let report = diagnostic.run(&mut machine, &mut LogReporter);
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
        report
    } else {
        let mut reporter = TextReporter::new(io::stdout().lock());
        let report = diagnostic.run(&mut machine, &mut reporter);
        let mut out = reporter.into_inner()?;
        out.flush()?;
        report
    };

    Ok(report.passed())
}

fn main() -> ExitCode {
    // A missing .env file is fine
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("ramtester v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}
