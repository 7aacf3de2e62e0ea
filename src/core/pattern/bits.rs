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

//! Data bit flags for mismatch reporting

use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// Data lines of one byte
    ///
    /// A mismatch sets the bits where the read value differed from the
    /// written one, so the union over a range points at faulty data lines.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    #[serde(transparent)]
    pub struct DataBits: u8 {
        const D0 = 1 << 0;
        const D1 = 1 << 1;
        const D2 = 1 << 2;
        const D3 = 1 << 3;
        const D4 = 1 << 4;
        const D5 = 1 << 5;
        const D6 = 1 << 6;
        const D7 = 1 << 7;
    }
}

impl DataBits {
    /// Bit positions set, lowest first
    pub fn positions(self) -> impl Iterator<Item = u8> {
        (0..8u8).filter(move |bit| self.bits() & (1 << bit) != 0)
    }
}
