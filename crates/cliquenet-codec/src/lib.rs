//! Base-92 wire codec for CliqueNet graphs.
//!
//! Graphs travel between parties as a printable string:
//!
//! ```text
//! HEADER (hdr_digits base-92 digits encoding N)
//! PAYLOAD (strict upper triangle of the adjacency matrix, row-major,
//!          one bit per pair, cut into chunks of chunk_bits bits; each full
//!          chunk is chunk_digits digits, the final partial chunk uses the
//!          fewest digits that can hold it)
//! ```
//!
//! The alphabet is the 92 printable ASCII characters `0x20..=0x7E` minus
//! `"`, `'` and `\`, in code-point order.
//!
//! # Example
//!
//! ```
//! use cliquenet_codec::GraphCodec;
//!
//! let codec = GraphCodec::default();
//! let matrix = vec![vec![0, 1, 1], vec![1, 0, 0], vec![1, 0, 0]];
//!
//! let encoded = codec.encode_matrix(&matrix)?;
//! assert_eq!(encoded.len(), codec.encoded_length_for_n(3));
//! assert_eq!(codec.decode_matrix(&encoded)?, matrix);
//! # Ok::<(), cliquenet_codec::CodecError>(())
//! ```

pub mod alphabet;
pub mod chunk;
pub mod codec;
pub mod convert;

pub use alphabet::{ALPHABET, BASE};
pub use chunk::{BitAccumulator, ChunkValue};
pub use codec::{CodecConfig, GraphCodec};
pub use convert::{adjacency_list_to_matrix, matrix_to_adjacency_list, AdjacencyMatrix};

use cliquenet_graph::GraphError;

/// Codec error types.
///
/// Every failure is all-or-nothing: no partial matrix or string is returned.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Matrix rows do not all have length N.
    #[error("adjacency matrix must be n×n: row {row} has length {len}, expected {n}")]
    NotSquare { row: usize, len: usize, n: usize },

    /// Non-zero diagonal entry.
    #[error("diagonal must be all 0: entry ({0}, {0}) is set")]
    NonZeroDiagonal(usize),

    /// `M[i][j] != M[j][i]`.
    #[error("adjacency matrix must be symmetric: ({i}, {j}) differs from ({j}, {i})")]
    Asymmetric { i: usize, j: usize },

    /// Input shorter than the header.
    #[error("truncated header: need {expected} digits, got {got}")]
    TruncatedHeader { expected: usize, got: usize },

    /// Character outside the base-92 alphabet.
    #[error("invalid base92 char {ch:?} at position {position}")]
    InvalidChar { ch: char, position: usize },

    /// Encoded length disagrees with the header's node count.
    #[error("length mismatch: got {got}, expect {expected} for n={n}")]
    LengthMismatch { got: usize, expected: u128, n: u64 },

    /// Value does not fit in its fixed number of digits or bits.
    #[error("fixed-width overflow: value needs more than {width} {unit}")]
    Overflow { width: usize, unit: &'static str },

    /// Inconsistent codec parameters.
    #[error("invalid codec configuration: {0}")]
    InvalidConfig(String),

    /// Decoded matrix does not form a valid graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
