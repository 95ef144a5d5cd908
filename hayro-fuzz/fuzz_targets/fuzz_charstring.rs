#![no_main]

use hayro_charstring::{
    Capabilities, GlyphSink, Matrix, MemorySource, ParseConfig, ParseFlags, StemFlags,
};
use libfuzzer_sys::fuzz_target;

/// A sink that accepts every callback and discards the output.
struct Sink(Capabilities);

impl GlyphSink for Sink {
    fn capabilities(&self) -> Capabilities {
        self.0
    }

    fn stem(&mut self, _flags: StemFlags, edge0: f32, edge1: f32) {
        std::hint::black_box((edge0, edge1));
    }
}

// Header layout (4 bytes):
// [0]     parse flags
// [1]     sink capabilities
// [2]     number of masters
// [3]     number of subroutines, each starting every 16 bytes after the header
// [4..]   charstring data, the glyph starts at offset 0

const HEADER_SIZE: usize = 4;

fuzz_target!(|data: &[u8]| {
    if data.len() < HEADER_SIZE {
        return;
    }

    let flags = ParseFlags::from_bits_truncate(data[0]);
    let caps = Capabilities::from_bits_truncate(u16::from(data[1]));
    let masters = usize::from(data[2] % 18);
    let body = &data[HEADER_SIZE..];

    let subrs = (0..u64::from(data[3]))
        .map(|i| i * 16)
        .filter(|offset| *offset < body.len() as u64)
        .collect::<Vec<_>>();
    let weight_vector = [0.5; 16];
    let lookup = |code: u8| Some(u64::from(code) * 8).filter(|o| *o < body.len() as u64);

    let config = ParseConfig {
        flags,
        subrs: &subrs,
        matrix: Matrix::from_row([0.5, 0.0, 0.1, 0.5, 3.0, -2.0]),
        masters,
        weight_vector: &weight_vector,
        normalized_design_vector: &[0.5; 4],
        user_design_vector: &[100.0; 4],
        seac_lookup: Some(&lookup),
    };

    let mut sink = Sink(caps);
    let _ = hayro_charstring::parse(&mut MemorySource::new(body), 0, &config, &mut sink);
    let mut sink = Sink(caps);
    let _ = hayro_charstring::parse(
        &mut MemorySource::with_chunk_len(body, 5),
        0,
        &config,
        &mut sink,
    );
});
