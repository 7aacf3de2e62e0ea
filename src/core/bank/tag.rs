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

//! Sentinel tags and bank signatures
//!
//! Each sentinel holds two bytes, `(tag, !tag)`. The complement rejects
//! windows stuck at all zeros or all ones, which would otherwise match any
//! tag that happens to equal the stuck value.

use crate::core::memory::MemoryBus;

/// Tag of sentinel 0 for selector 0
pub const TAG_BASE: u8 = 0x5A;

/// Tag increment between consecutive sentinels
pub const TAG_STRIDE: u8 = 0x13;

/// Tag byte for `selector` at sentinel `index`
///
/// `(0x5A + 0x13 * index) ^ selector`, all mod 256.
///
/// For a fixed `index` this is a bijection over selectors, so two selectors
/// never share a signature. A narrower or non-injective tag would let two
/// distinct banks compare equal and end enumeration with a false alias.
///
/// # Example
///
/// ```
/// use ramtester::core::bank::tag_byte;
///
/// assert_eq!(tag_byte(0, 0), 0x5A);
/// assert_eq!(tag_byte(0, 1), 0x6D);
/// assert_eq!(tag_byte(0xFF, 0), 0xA5);
/// ```
pub fn tag_byte(selector: u8, index: u8) -> u8 {
    TAG_BASE.wrapping_add(TAG_STRIDE.wrapping_mul(index)) ^ selector
}

/// Write `selector`'s signature into every sentinel
///
/// Writes land in whatever bank is currently mapped; the caller selects first.
pub fn write_signature<M: MemoryBus + ?Sized>(bus: &mut M, sentinels: &[u16], selector: u8) {
    for (index, &sentinel) in sentinels.iter().enumerate() {
        let tag = tag_byte(selector, index as u8);
        bus.write8(sentinel, tag);
        bus.write8(sentinel.wrapping_add(1), !tag);
    }
}

/// True if every sentinel still holds `selector`'s signature
pub fn verify_signature<M: MemoryBus + ?Sized>(bus: &M, sentinels: &[u16], selector: u8) -> bool {
    sentinels.iter().enumerate().all(|(index, &sentinel)| {
        let tag = tag_byte(selector, index as u8);
        bus.read8(sentinel) == tag && bus.read8(sentinel.wrapping_add(1)) == !tag
    })
}
