//! Graph encoder and decoder.

use serde::{Deserialize, Serialize};

use cliquenet_graph::Graph;

use crate::chunk::{min_digits_for_bits, BitAccumulator, ChunkValue};
use crate::convert::{adjacency_list_to_matrix, matrix_to_adjacency_list, AdjacencyMatrix};
use crate::{CodecError, Result};

/// Codec parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Digits in the node-count header.
    pub hdr_digits: usize,
    /// Payload bits per full chunk.
    pub chunk_bits: usize,
    /// Digits per full chunk.
    pub chunk_digits: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            hdr_digits: 5,
            chunk_bits: 1246,
            chunk_digits: 191,
        }
    }
}

impl CodecConfig {
    /// Create new codec configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set header width.
    pub fn with_hdr_digits(mut self, digits: usize) -> Self {
        self.hdr_digits = digits;
        self
    }

    /// Set chunk size in bits and digits.
    pub fn with_chunk(mut self, bits: usize, digits: usize) -> Self {
        self.chunk_bits = bits;
        self.chunk_digits = digits;
        self
    }

    /// Check that a full chunk fits its digit budget.
    pub fn validate(&self) -> Result<()> {
        if self.hdr_digits == 0 {
            return Err(CodecError::InvalidConfig(
                "hdr_digits must be at least 1".to_string(),
            ));
        }
        if self.chunk_bits == 0 {
            return Err(CodecError::InvalidConfig(
                "chunk_bits must be at least 1".to_string(),
            ));
        }
        let needed = min_digits_for_bits(self.chunk_bits);
        if self.chunk_digits < needed {
            return Err(CodecError::InvalidConfig(format!(
                "{} bits need at least {} digits, got {}",
                self.chunk_bits, needed, self.chunk_digits
            )));
        }
        Ok(())
    }
}

/// Encodes and decodes graphs to and from the base-92 wire format.
#[derive(Debug, Clone)]
pub struct GraphCodec {
    config: CodecConfig,
    /// Digits of a trailing partial chunk, indexed by its bit count.
    tail_digits: Vec<usize>,
}

impl Default for GraphCodec {
    fn default() -> Self {
        Self::from_valid_config(CodecConfig::default())
    }
}

impl GraphCodec {
    /// Create a codec, rejecting inconsistent parameters.
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: CodecConfig) -> Self {
        let tail_digits = (0..config.chunk_bits).map(min_digits_for_bits).collect();
        Self {
            config,
            tail_digits,
        }
    }

    /// Codec parameters.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Fewest digits that hold `bits` bits.
    pub fn min_digits_for_bits(&self, bits: usize) -> usize {
        self.tail_digits
            .get(bits)
            .copied()
            .unwrap_or_else(|| min_digits_for_bits(bits))
    }

    /// Exact encoded length for a graph of `n` nodes.
    pub fn encoded_length_for_n(&self, n: usize) -> usize {
        self.expected_length(n as u64) as usize
    }

    fn expected_length(&self, n: u64) -> u128 {
        let total_bits = total_bits(n);
        let chunk_bits = self.config.chunk_bits as u128;
        let full = total_bits / chunk_bits;
        let rem = (total_bits % chunk_bits) as usize;
        self.config.hdr_digits as u128
            + full * self.config.chunk_digits as u128
            + self.min_digits_for_bits(rem) as u128
    }

    /// Encode a symmetric 0/1 matrix with zero diagonal.
    ///
    /// Entries are read as bits (non-zero = edge).
    pub fn encode_matrix(&self, matrix: &[Vec<u8>]) -> Result<String> {
        let n = matrix.len();
        for (row, values) in matrix.iter().enumerate() {
            if values.len() != n {
                return Err(CodecError::NotSquare {
                    row,
                    len: values.len(),
                    n,
                });
            }
        }
        if let Some(i) = (0..n).find(|&i| matrix[i][i] != 0) {
            return Err(CodecError::NonZeroDiagonal(i));
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if matrix[i][j] != matrix[j][i] {
                    return Err(CodecError::Asymmetric { i, j });
                }
            }
        }

        let mut out = String::with_capacity(self.encoded_length_for_n(n));
        out.push_str(&ChunkValue::from_u64(n as u64).to_base92(self.config.hdr_digits)?);

        let mut acc = BitAccumulator::new();
        for i in 0..n {
            for j in (i + 1)..n {
                acc = acc.push(matrix[i][j] != 0);
                if acc.len() == self.config.chunk_bits {
                    let (digits, fresh) = acc.flush(self.config.chunk_digits)?;
                    out.push_str(&digits);
                    acc = fresh;
                }
            }
        }
        if !acc.is_empty() {
            let tail = self.min_digits_for_bits(acc.len());
            let (digits, _) = acc.flush(tail)?;
            out.push_str(&digits);
        }

        tracing::debug!(nodes = n, length = out.len(), "encoded adjacency matrix");
        Ok(out)
    }

    /// Decode a string produced by [`GraphCodec::encode_matrix`].
    pub fn decode_matrix(&self, encoded: &str) -> Result<AdjacencyMatrix> {
        let bytes = encoded.as_bytes();
        let hdr = self.config.hdr_digits;
        if bytes.len() < hdr {
            return Err(CodecError::TruncatedHeader {
                expected: hdr,
                got: bytes.len(),
            });
        }

        let n = read_digits(encoded, 0, hdr)?
            .to_u64()
            .ok_or(CodecError::Overflow {
                width: 64,
                unit: "bits",
            })?;

        let expected = self.expected_length(n);
        if bytes.len() as u128 != expected {
            return Err(CodecError::LengthMismatch {
                got: bytes.len(),
                expected,
                n,
            });
        }
        // The length check bounds n by the input size from here on
        let n = n as usize;

        let total = total_bits(n as u64) as usize;
        let mut bits = Vec::with_capacity(total);
        let mut pos = hdr;
        while bits.len() < total {
            let chunk_bits = (total - bits.len()).min(self.config.chunk_bits);
            let digits = if chunk_bits == self.config.chunk_bits {
                self.config.chunk_digits
            } else {
                self.min_digits_for_bits(chunk_bits)
            };

            let value = read_digits(encoded, pos, digits)?;
            if value.bit_length() > chunk_bits {
                return Err(CodecError::Overflow {
                    width: chunk_bits,
                    unit: "bits",
                });
            }
            bits.extend((0..chunk_bits).rev().map(|b| value.bit(b)));
            pos += digits;
        }

        let mut matrix = vec![vec![0u8; n]; n];
        let mut next = bits.into_iter();
        for i in 0..n {
            for j in (i + 1)..n {
                if next.next().unwrap_or(false) {
                    matrix[i][j] = 1;
                    matrix[j][i] = 1;
                }
            }
        }

        tracing::debug!(nodes = n, length = bytes.len(), "decoded adjacency matrix");
        Ok(matrix)
    }

    /// Encode a validated graph.
    pub fn encode_graph(&self, graph: &Graph) -> Result<String> {
        let matrix = adjacency_list_to_matrix(&graph.to_adjacency_list(), graph.num_nodes())?;
        self.encode_matrix(&matrix)
    }

    /// Decode straight into a validated graph.
    pub fn decode_graph(&self, encoded: &str) -> Result<Graph> {
        let matrix = self.decode_matrix(encoded)?;
        let lists = matrix_to_adjacency_list(&matrix);
        Ok(Graph::from_adjacency_list(matrix.len(), &lists)?)
    }
}

/// Parse `len` digits of `encoded` starting at byte `start`.
///
/// Digits are scanned left to right, so the first rejected byte always starts
/// a character and is reported as that character.
fn read_digits(encoded: &str, start: usize, len: usize) -> Result<ChunkValue> {
    ChunkValue::from_base92(&encoded.as_bytes()[start..start + len], start).map_err(|e| match e {
        CodecError::InvalidChar { ch, position } => CodecError::InvalidChar {
            ch: encoded
                .get(position..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or(ch),
            position,
        },
        other => other,
    })
}

/// Number of strict upper-triangle pairs of an `n × n` matrix.
fn total_bits(n: u64) -> u128 {
    let n = n as u128;
    if n < 2 {
        0
    } else {
        n * (n - 1) / 2
    }
}
