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

//! Bank enumeration
//!
//! Discovers how many distinct, independently addressable banks sit behind
//! the bank-select register, without any prior knowledge of the expansion.
//!
//! ## Probe sequence (per candidate selector `s`, from 0 upward)
//!
//! 1. Save the fixed-memory shadow locations, then pre-scrub them with the
//!    complement of `s`'s tags so stale data can never fake a shadow match.
//! 2. Select `s` and write its signature into the window.
//! 3. Shadow check: the signature must read back from the window, and must
//!    NOT show up in fixed memory. Either failure means the window no longer
//!    reaches new storage. The shadow locations are restored afterwards.
//! 4. Alias check: every bank accepted so far must still carry its own
//!    signature. If one was overwritten, `s` addresses that bank again; its
//!    signature is rewritten.
//! 5. Otherwise `s` is a new bank.
//!
//! Banks are assumed to be numbered without gaps, so the first shadow or
//! alias ends the scan. The register is left at bank 0 afterwards.
//!
//! ## Known limitation
//!
//! Tags are 8 bits wide. Two different selectors producing the same
//! `(tag, !tag)` pair at every sentinel would be reported as an alias. The
//! XOR construction keeps tags distinct per sentinel, but other tag schemes
//! must be checked for this before being swapped in.
//!
//! A shadow is only recognised where it lines up with a shadow source: the
//! window must mirror fixed RAM starting at one of `shadow_sources`, so the
//! sentinel lands at `source + offset`. A window mirroring fixed RAM from any
//! other base (0xB000 or 0x8000 with the default layout) leaves no trace at
//! the watched locations, and the mirrored selector is counted as one extra
//! bank before the next selector aliases it.

use super::selector::{BankedMachine, SELECTOR_COUNT};
use super::tag::{tag_byte, verify_signature, write_signature};
use super::topology::{classify, ExpansionTopology};
use crate::core::memory::MemoryLayout;
use log::{debug, info, warn};
use serde::Serialize;

/// Ordered set of selectors confirmed to address distinct physical banks
///
/// Built append-only during one enumeration run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BankSet {
    selectors: Vec<u8>,
}

impl BankSet {
    fn push(&mut self, selector: u8) {
        self.selectors.push(selector);
    }

    /// Number of distinct banks
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// True if no bank was found
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Confirmed selectors in discovery order
    pub fn as_slice(&self) -> &[u8] {
        &self.selectors
    }

    /// Iterate over confirmed selectors in discovery order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.selectors.iter().copied()
    }

    /// True if `selector` was confirmed as a distinct bank
    pub fn contains(&self, selector: u8) -> bool {
        self.selectors.contains(&selector)
    }
}

/// Why enumeration stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StopReason {
    /// All 256 selectors were distinct banks
    Exhausted,

    /// The window did not hold the signature, or mirrored fixed memory
    Shadow { selector: u8 },

    /// Selecting `selector` overwrote the already counted bank `aliases`
    Alias { selector: u8, aliases: u8 },
}

/// Register readback that disagreed with the selected value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadbackMismatch {
    /// Value written to the register
    pub selected: u8,
    /// Value the register reported back
    pub read_back: u8,
}

/// Outcome of one enumeration run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enumeration {
    /// Distinct banks in discovery order
    pub banks: BankSet,
    /// Condition that ended the scan
    pub stop: StopReason,
    /// Selections whose register readback differed from the written value
    pub readback_mismatches: Vec<ReadbackMismatch>,
}

impl Enumeration {
    /// Number of distinct banks found
    pub fn bank_count(&self) -> usize {
        self.banks.len()
    }

    /// Expansion size implied by the bank count
    pub fn topology(&self) -> ExpansionTopology {
        classify(self.banks.len())
    }
}

/// Bank enumerator
///
/// Holds the sentinel addresses and, per sentinel, the fixed-memory
/// locations the window would mirror if selection had no effect.
///
/// # Example
///
/// ```
/// use ramtester::core::bank::{BankEnumerator, StopReason};
/// use ramtester::core::machine::{MachineConfig, SimulatedMachine};
/// use ramtester::core::memory::MemoryLayout;
///
/// let mut machine = SimulatedMachine::new(MachineConfig::with_banks(14)).unwrap();
/// let enumeration = BankEnumerator::new(&MemoryLayout::default()).run(&mut machine);
///
/// assert_eq!(enumeration.bank_count(), 14);
/// assert_eq!(enumeration.stop, StopReason::Alias { selector: 14, aliases: 0 });
/// ```
#[derive(Debug, Clone)]
pub struct BankEnumerator {
    sentinels: Vec<u16>,
    shadow_locations: Vec<Vec<u16>>,
}

impl BankEnumerator {
    /// Create an enumerator for the sentinels and shadow sources of `layout`
    ///
    /// `layout` is expected to pass `MemoryLayout::validate`; a sentinel below
    /// the window gets no shadow locations.
    pub fn new(layout: &MemoryLayout) -> Self {
        let shadow_locations = layout
            .sentinels
            .iter()
            .map(|&sentinel| layout.shadow_locations(sentinel).collect())
            .collect();

        Self {
            sentinels: layout.sentinels.clone(),
            shadow_locations,
        }
    }

    /// Sentinel addresses used for signatures
    pub fn sentinels(&self) -> &[u16] {
        &self.sentinels
    }

    /// Count distinct banks
    ///
    /// Never fails: zero banks is a valid answer (no expansion). The
    /// register is set to bank 0 on return.
    pub fn run<M: BankedMachine + ?Sized>(&self, machine: &mut M) -> Enumeration {
        let mut banks = BankSet::default();
        let mut readback_mismatches = Vec::new();
        let mut stop = StopReason::Exhausted;

        machine.select(0);

        for candidate in (0..SELECTOR_COUNT).map(|s| s as u8) {
            debug!("Testing selector {:3}...", candidate);

            let saved = self.save_shadow_locations(machine);
            self.scrub_shadow_locations(machine, candidate);

            machine.select(candidate);
            let read_back = machine.current();
            if read_back != candidate {
                warn!(
                    "Bank register readback mismatch: selected {}, read back {}",
                    candidate, read_back
                );
                readback_mismatches.push(ReadbackMismatch {
                    selected: candidate,
                    read_back,
                });
            }

            write_signature(machine, &self.sentinels, candidate);

            let shadowed = self.is_shadowed(machine, candidate);
            restore_locations(machine, &saved);

            if shadowed {
                debug!(" -> SHADOW of fixed RAM; early exit");
                stop = StopReason::Shadow {
                    selector: candidate,
                };
                break;
            }

            if let Some(aliases) = self.find_alias(machine, &banks) {
                debug!(" -> ALIAS of selector {:3}; early exit", aliases);
                stop = StopReason::Alias {
                    selector: candidate,
                    aliases,
                };
                break;
            }

            banks.push(candidate);
            debug!(" -> NEW BANK, total so far: {}", banks.len());
        }

        machine.select(0);

        info!(
            "Bank enumeration: {} bank(s), stopped by {:?}",
            banks.len(),
            stop
        );

        Enumeration {
            banks,
            stop,
            readback_mismatches,
        }
    }

    /// Snapshot both bytes of every shadow location
    fn save_shadow_locations<M: BankedMachine + ?Sized>(&self, machine: &M) -> Vec<(u16, u8)> {
        self.shadow_locations
            .iter()
            .flatten()
            .flat_map(|&location| [location, location.wrapping_add(1)])
            .map(|address| (address, machine.read8(address)))
            .collect()
    }

    /// Fill every shadow location with the complement of `candidate`'s signature
    fn scrub_shadow_locations<M: BankedMachine + ?Sized>(&self, machine: &mut M, candidate: u8) {
        for (index, locations) in self.shadow_locations.iter().enumerate() {
            let scrub = !tag_byte(candidate, index as u8);
            for &location in locations {
                machine.write8(location, scrub);
                machine.write8(location.wrapping_add(1), scrub);
            }
        }
    }

    /// Shadow check for the currently selected `candidate`
    fn is_shadowed<M: BankedMachine + ?Sized>(&self, machine: &M, candidate: u8) -> bool {
        for (index, (&sentinel, locations)) in self
            .sentinels
            .iter()
            .zip(&self.shadow_locations)
            .enumerate()
        {
            let tag = tag_byte(candidate, index as u8);
            let first = machine.read8(sentinel);
            let second = machine.read8(sentinel.wrapping_add(1));

            if first != tag || second != !tag {
                debug!(
                    "Sentinel 0x{:04X} did not hold tag (read {:02X} {:02X})",
                    sentinel, first, second
                );
                return true;
            }

            let mirrored = locations.iter().any(|&location| {
                machine.read8(location) == first && machine.read8(location.wrapping_add(1)) == second
            });
            if mirrored {
                debug!("Sentinel 0x{:04X} mirrored in fixed memory", sentinel);
                return true;
            }
        }

        false
    }

    /// Alias check against every bank accepted so far
    ///
    /// Returns the first bank whose signature was destroyed, after rewriting
    /// that signature.
    fn find_alias<M: BankedMachine + ?Sized>(&self, machine: &mut M, banks: &BankSet) -> Option<u8> {
        for previous in banks.iter() {
            machine.select(previous);
            if !verify_signature(machine, &self.sentinels, previous) {
                machine.select(previous);
                write_signature(machine, &self.sentinels, previous);
                return Some(previous);
            }
        }
        None
    }
}

/// Write back a snapshot taken by `save_shadow_locations`
///
/// Restored last-to-first so overlapping locations end with their oldest value.
fn restore_locations<M: BankedMachine + ?Sized>(machine: &mut M, saved: &[(u16, u8)]) {
    for &(address, value) in saved.iter().rev() {
        machine.write8(address, value);
    }
}
