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

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ramtester::core::machine::{MachineConfig, SimulatedMachine};
use ramtester::core::memory::{AddressRange, BANK_BYTES, BANK_WINDOW_START};
use ramtester::core::pattern::{self, PatternSet};
use ramtester::core::{BankEnumerator, Diagnostic, DiagnosticConfig, MemoryLayout};
use std::hint::black_box;

fn window() -> AddressRange {
    AddressRange::with_len(BANK_WINDOW_START, BANK_BYTES as u32).unwrap()
}

fn pattern_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern");
    let range = window();

    group.bench_function("write_8k", |b| {
        let mut machine = SimulatedMachine::new(MachineConfig::default()).unwrap();
        b.iter(|| pattern::write(&mut machine, &range, black_box(0x55)));
    });

    group.bench_function("verify_8k", |b| {
        let mut machine = SimulatedMachine::new(MachineConfig::default()).unwrap();
        pattern::write(&mut machine, &range, 0x55);
        b.iter(|| black_box(pattern::verify(&machine, &range, black_box(0x55))));
    });

    for set in [PatternSet::WalkingOnes, PatternSet::Full] {
        let patterns = set.patterns();
        group.bench_with_input(
            BenchmarkId::new("test_range_8k", patterns.len()),
            &patterns,
            |b, patterns| {
                let mut machine = SimulatedMachine::new(MachineConfig::default()).unwrap();
                b.iter(|| black_box(pattern::test_range(&mut machine, &range, patterns)));
            },
        );
    }

    group.finish();
}

fn enumeration_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumeration");
    let enumerator = BankEnumerator::new(&MemoryLayout::default());

    for banks in [6u16, 62, 256] {
        group.bench_with_input(BenchmarkId::new("banks", banks), &banks, |b, &banks| {
            let mut machine = SimulatedMachine::new(MachineConfig::with_banks(banks)).unwrap();
            b.iter(|| black_box(enumerator.run(&mut machine)));
        });
    }

    group.finish();
}

fn diagnostic_benchmark(c: &mut Criterion) {
    c.bench_function("diagnostic_6_banks", |b| {
        let config = DiagnosticConfig::default();
        let diagnostic = Diagnostic::new(&config);
        let mut machine = SimulatedMachine::new(config.machine.clone()).unwrap();
        b.iter(|| {
            black_box(diagnostic.run(&mut machine, &mut ramtester::core::report::LogReporter));
        });
    });
}

criterion_group!(
    benches,
    pattern_benchmark,
    enumeration_benchmark,
    diagnostic_benchmark
);
criterion_main!(benches);
