/*
    TextVideo
    https://github.com/textvideo/textvideo

    Copyright 2025 The TextVideo Authors

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    benches::controller_bench.rs

    Benchmarks for the text mode controller.

*/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use textvideo_core::{
    controller::FRAME_TICKS,
    frame::FrameCapture,
    memory::DEFAULT_ATTRIBUTE,
    ControlInputs,
    ControllerState,
    DisplayMemory,
    TextModeController,
};

fn bench_memory() -> DisplayMemory {
    let mut mem = DisplayMemory::default();
    for (i, code) in (0..2000u16).zip((0..=255u8).cycle()) {
        mem.text.set_cell(
            i,
            textvideo_core::CharCell {
                code,
                attribute: DEFAULT_ATTRIBUTE,
            },
        );
    }
    mem
}

pub fn controller_tick_bench(c: &mut Criterion) {
    let mem = bench_memory();

    c.bench_function("controller_bench_tick", |b| {
        let mut controller = TextModeController::default();

        b.iter(|| {
            black_box(controller.tick(&mem));
        });
    });

    c.bench_function("controller_bench_state_step", |b| {
        let mut state = ControllerState::new();
        let inputs = ControlInputs::default();

        b.iter(|| {
            let (next, out) = state.step(&inputs, &mem);
            state = next;
            black_box(out);
        });
    });

    c.bench_function("controller_bench_frame", |b| {
        let mut controller = TextModeController::default();

        b.iter(|| {
            for _ in 0..FRAME_TICKS {
                black_box(controller.tick(&mem));
            }
        });
    });

    c.bench_function("controller_bench_frame_capture", |b| {
        let mut controller = TextModeController::default();
        let mut capture = FrameCapture::new();

        b.iter(|| {
            controller.run_frame(&mem, |out| capture.push(out));
        });
    });
}

criterion_group!(benches, controller_tick_bench);
criterion_main!(benches);
