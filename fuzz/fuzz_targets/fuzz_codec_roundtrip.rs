//! Fuzz target for encoding random graphs.
//!
//! Builds a symmetric matrix from arbitrary edge bits and checks the encoded
//! length and the round trip.

#![no_main]

use arbitrary::Arbitrary;
use cliquenet_codec::GraphCodec;
use libfuzzer_sys::fuzz_target;

/// Fuzz input: node count and upper-triangle bits.
#[derive(Debug, Arbitrary)]
struct FuzzGraph {
    nodes: u8,
    bits: Vec<bool>,
}

fuzz_target!(|input: FuzzGraph| {
    let n = input.nodes as usize;
    let mut matrix = vec![vec![0u8; n]; n];
    let mut bits = input.bits.iter().copied().cycle();
    if !input.bits.is_empty() {
        for i in 0..n {
            for j in (i + 1)..n {
                if bits.next().unwrap_or(false) {
                    matrix[i][j] = 1;
                    matrix[j][i] = 1;
                }
            }
        }
    }

    let codec = GraphCodec::default();
    let encoded = codec.encode_matrix(&matrix).expect("valid matrix must encode");
    assert_eq!(encoded.len(), codec.encoded_length_for_n(n));
    assert_eq!(codec.decode_matrix(&encoded).expect("must decode"), matrix);
});
