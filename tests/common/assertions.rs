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

//! Custom assertions for diagnostic testing

use ramtester::core::bank::{Enumeration, StopReason};
use ramtester::core::memory::{AddressRange, MemoryBus};

/// Assert enumeration found exactly `expected` banks, numbered from 0
#[allow(dead_code)]
pub fn assert_bank_count(enumeration: &Enumeration, expected: usize) {
    assert_eq!(
        enumeration.bank_count(),
        expected,
        "bank count mismatch (stopped with {:?})",
        enumeration.stop
    );
    let expected_selectors: Vec<u8> = (0..expected).map(|s| s as u8).collect();
    assert_eq!(enumeration.banks.as_slice(), expected_selectors.as_slice());
}

/// Assert enumeration stopped because selector `selector` shadowed fixed RAM
#[allow(dead_code)]
pub fn assert_shadow_stop(enumeration: &Enumeration, selector: u8) {
    assert_eq!(
        enumeration.stop,
        StopReason::Shadow { selector },
        "expected shadow stop at selector {}",
        selector
    );
}

/// Assert every byte of `range` holds `value`
#[allow(dead_code)]
pub fn assert_range_filled<M: MemoryBus + ?Sized>(bus: &M, range: &AddressRange, value: u8) {
    for address in range.addresses() {
        let actual = bus.read8(address);
        assert_eq!(
            actual, value,
            "Memory at 0x{:04X} mismatch: expected 0x{:02X}, got 0x{:02X}",
            address, value, actual
        );
    }
}
