//! Conversions between adjacency lists and dense 0/1 matrices.

use cliquenet_graph::GraphError;

use crate::Result;

/// Dense adjacency matrix, one `0`/`1` byte per entry.
pub type AdjacencyMatrix = Vec<Vec<u8>>;

/// Build the dense matrix of an adjacency list over `n` nodes.
///
/// Each listed pair sets both `(u, v)` and `(v, u)`.
pub fn adjacency_list_to_matrix(lists: &[Vec<u32>], n: usize) -> Result<AdjacencyMatrix> {
    if lists.len() != n {
        return Err(GraphError::DimensionMismatch {
            expected: n,
            actual: lists.len(),
        }
        .into());
    }

    let mut matrix = vec![vec![0u8; n]; n];
    for (u, neighbors) in lists.iter().enumerate() {
        for &v in neighbors {
            let v_idx = v as usize;
            if v_idx >= n {
                return Err(GraphError::InvalidNodeId(v as u64).into());
            }
            if v_idx == u {
                return Err(GraphError::SelfLoop(v).into());
            }
            matrix[u][v_idx] = 1;
            matrix[v_idx][u] = 1;
        }
    }
    Ok(matrix)
}

/// Sorted neighbor lists of a dense matrix; any non-zero entry is an edge.
pub fn matrix_to_adjacency_list(matrix: &[Vec<u8>]) -> Vec<Vec<u32>> {
    matrix
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|(_, &bit)| bit != 0)
                .map(|(v, _)| v as u32)
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecError;

    #[test]
    fn test_list_to_matrix() {
        let matrix = adjacency_list_to_matrix(&[vec![1, 2], vec![0], vec![0]], 3).unwrap();
        assert_eq!(matrix, vec![vec![0, 1, 1], vec![1, 0, 0], vec![1, 0, 0]]);
    }

    #[test]
    fn test_list_to_matrix_symmetrizes() {
        let matrix = adjacency_list_to_matrix(&[vec![1], vec![]], 2).unwrap();
        assert_eq!(matrix, vec![vec![0, 1], vec![1, 0]]);
    }

    #[test]
    fn test_list_to_matrix_rejects_bad_input() {
        assert!(matches!(
            adjacency_list_to_matrix(&[vec![5], vec![]], 2),
            Err(CodecError::Graph(GraphError::InvalidNodeId(5)))
        ));
        assert!(matches!(
            adjacency_list_to_matrix(&[vec![0]], 1),
            Err(CodecError::Graph(GraphError::SelfLoop(0)))
        ));
        assert!(adjacency_list_to_matrix(&[vec![]], 2).is_err());
    }

    #[test]
    fn test_matrix_to_list() {
        let lists = matrix_to_adjacency_list(&[vec![0, 1, 1], vec![1, 0, 0], vec![1, 0, 0]]);
        assert_eq!(lists, vec![vec![1, 2], vec![0], vec![0]]);
    }
}
