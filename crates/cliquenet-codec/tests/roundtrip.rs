//! Wire-format round trips and rejection cases.

use cliquenet_codec::{
    adjacency_list_to_matrix, matrix_to_adjacency_list, AdjacencyMatrix, CodecError, GraphCodec,
    ALPHABET,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_matrix(n: usize, p: f64, seed: u64) -> AdjacencyMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut matrix = vec![vec![0u8; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen::<f64>() < p {
                matrix[i][j] = 1;
                matrix[j][i] = 1;
            }
        }
    }
    matrix
}

/// Empty, half-full and complete graphs survive encode then decode at boundary sizes.
#[test]
fn test_roundtrip_selected_sizes() {
    let codec = GraphCodec::default();
    for (seed, &n) in [0usize, 1, 2, 3, 50, 51, 300].iter().enumerate() {
        for &p in &[0.0, 0.5, 1.0] {
            let matrix = random_matrix(n, p, seed as u64);
            let encoded = codec.encode_matrix(&matrix).unwrap();

            assert_eq!(encoded.len(), codec.encoded_length_for_n(n), "n={}", n);
            assert!(encoded.bytes().all(|b| ALPHABET.contains(&b)));
            assert_eq!(codec.decode_matrix(&encoded).unwrap(), matrix, "n={} p={}", n, p);
        }
    }
}

/// Every full chunk takes 191 digits and only the tail is shortened.
#[test]
fn test_full_chunks_use_fixed_width() {
    let codec = GraphCodec::default();
    // 300 nodes: 44850 bits = 35 full chunks + 1240 bits
    let expected = 5 + 35 * 191 + codec.min_digits_for_bits(1240);
    assert_eq!(codec.encoded_length_for_n(300), expected);
}

/// Adjacency lists pass through matrix form and the wire format unchanged.
#[test]
fn test_list_matrix_conversions_agree_with_codec() {
    let codec = GraphCodec::default();
    let lists = vec![vec![1, 2], vec![0, 2], vec![0, 1, 3], vec![2], vec![]];

    let matrix = adjacency_list_to_matrix(&lists, 5).unwrap();
    let decoded = codec.decode_matrix(&codec.encode_matrix(&matrix).unwrap()).unwrap();
    assert_eq!(matrix_to_adjacency_list(&decoded), lists);
}

/// A payload one digit short fails the length check.
#[test]
fn test_truncated_payload_is_rejected() {
    let codec = GraphCodec::default();
    let mut encoded = codec.encode_matrix(&random_matrix(20, 0.3, 7)).unwrap();
    encoded.pop();

    assert!(matches!(
        codec.decode_matrix(&encoded),
        Err(CodecError::LengthMismatch { n: 20, .. })
    ));
}

/// Multi-byte characters are rejected and reported as themselves.
#[test]
fn test_non_ascii_input_is_rejected() {
    let codec = GraphCodec::default();
    // header for n = 2 followed by a two-byte character
    let result = codec.decode_matrix("    #é");
    assert!(matches!(result, Err(CodecError::LengthMismatch { .. })));

    let result = codec.decode_matrix("    é");
    assert!(matches!(
        result,
        Err(CodecError::InvalidChar {
            ch: 'é',
            position: 4
        })
    ));
}

proptest! {
    /// Random graphs round-trip and match the predicted length.
    #[test]
    fn roundtrip_random_graphs(n in 0usize..80, p in 0.0f64..=1.0, seed in any::<u64>()) {
        let codec = GraphCodec::default();
        let matrix = random_matrix(n, p, seed);

        let encoded = codec.encode_matrix(&matrix).unwrap();
        prop_assert_eq!(encoded.len(), codec.encoded_length_for_n(n));
        prop_assert_eq!(codec.decode_matrix(&encoded).unwrap(), matrix);
    }

    /// Arbitrary printable input yields a value or an error, never a panic.
    #[test]
    fn decode_never_panics(input in "[ -~]{0,64}") {
        let codec = GraphCodec::default();
        let _ = codec.decode_matrix(&input);
    }
}
