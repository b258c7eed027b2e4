// The abstractions in this file were taken and modified from: https://github.com/EspressoSystems/jellyfish/blob/8f48813ca52d964090dbf0de62f07f5e0c7e22c6/primitives/src/toeplitz.rs#L1

use bls12_381::Scalar;

/// A Toeplitz matrix is a matrix in which each descending diagonal from left to right is constant.
/// "Constant" here means that all elements along any given diagonal have the same value.
///
/// For example, in the matrix:
/// ```text
/// [a b c d]
/// [e a b c]
/// [f e a b]
/// [g f e a]
/// ```
/// The main diagonal (top-left to bottom-right) is constant with value 'a'.
/// The diagonal above it is constant with value 'b', the one above that with 'c', and so on.
/// Similarly, the diagonal below the main one is constant with value 'e', the next with 'f', etc.
///
/// # Efficient Representation
///
/// Due to the constant diagonal property, a Toeplitz matrix is fully determined by its first row
/// and first column. This allows for an efficient representation using only these two vectors,
/// significantly reducing memory usage for large matrices.
///
/// - The first row contains all the elements that appear on or above the main diagonal.
/// - The first column (excluding the first element) contains all the elements below the main diagonal.
///
/// This structure leverages this property to store the entire matrix using only these two vectors.
///
/// # Examples
///
/// ```text
///
/// row = [1, 2, 3, 4];
/// col = [1, 5, 6, 7];
///
///  This efficiently represents the following 4x4 Toeplitz matrix:
///  [1 2 3 4]
///  [5 1 2 3]
///  [6 5 1 2]
///  [7 6 5 1]
/// ```
///
/// In this example, we only store 8 elements (4 in `row` and 4 in `col`) to represent
/// a 4x4 matrix that would normally require 16 elements.
#[derive(Debug, Clone)]
pub struct ToeplitzMatrix {
    /// A vector representing the first row of the matrix.
    row: Vec<Scalar>,
    ///  A vector representing the first column of the matrix, including the first element
    ///  (even though the first element is already included in the `row`).
    col: Vec<Scalar>,
}

impl ToeplitzMatrix {
    /// Constructs a Toeplitz matrix from its first row and column.
    ///
    /// A Toeplitz matrix is fully determined by its first row and column:
    /// - `row[0]` must equal `col[0]` (the shared top-left entry),
    /// - `row` defines the elements on and above the main diagonal,
    /// - `col` defines the elements below the main diagonal.
    ///
    /// # Panics
    /// Panics if either `row` or `col` is empty, or if `row[0] != col[0]`.
    pub fn new(row: Vec<Scalar>, col: Vec<Scalar>) -> Self {
        assert!(
            !row.is_empty() && !col.is_empty(),
            "row and col must be non-empty"
        );
        assert_eq!(
            row[0], col[0],
            "Toeplitz matrix must satisfy row[0] == col[0] (shared top-left entry)"
        );
        Self { row, col }
    }
}

/// A circulant matrix is a special kind of Toeplitz matrix where each row is rotated one
/// element to the right relative to the preceding row. This structure allows for an even
/// more efficient representation than a general Toeplitz matrix.
///
/// # Efficient Representation
///
/// Due to the circulant property, the entire matrix is fully determined by its first row alone.
/// Each subsequent row is a cyclic shift of the first row. This allows for an extremely
/// memory-efficient representation, storing only a single vector for the entire matrix.
///
/// For an n Ã— n circulant matrix, we only need to store n elements instead of n^2.
///
/// # Example
///
/// Given the first row [a, b, c, d], the full 4x4 circulant matrix would be:
/// ```text
/// [a b c d]
/// [d a b c]
/// [c d a b]
/// [b c d a]
/// ```
///
/// # Examples
///
/// ```text
/// use ekzg_multi_open::fk20::toeplitz::CirculantMatrix;
///
/// row = [1, 2, 3, 4]
///
/// This efficiently represents the following 4x4 circulant matrix:
///  [1 2 3 4]
///  [4 1 2 3]
///  [3 4 1 2]
///  [2 3 4 1]
/// ```
///
/// In this example, we only store 4 elements to represent a 4x4 matrix that would
/// normally require 16 elements.
///
/// # Properties
///
/// The main property of Circulant matrices that we leverage is that they are diagonalized by the Fourier
/// transform, which allows for efficient computations.
#[derive(Debug, Clone)]
pub(crate) struct CirculantMatrix {
    /// A vector representing the first row of the matrix. This single row defines
    /// the entire circulant matrix.
    pub(crate) row: Vec<Scalar>,
}

impl CirculantMatrix {
    /// This method takes a Toeplitz matrix and embeds it into a larger circulant matrix.
    /// The resulting circulant matrix has a dimension that is twice as large as the original
    /// Toeplitz matrix.
    pub(crate) fn from_toeplitz(tm: ToeplitzMatrix) -> Self {
        let mut extension_col = tm.row;
        extension_col.rotate_left(1);
        extension_col.reverse();

        Self {
            row: [tm.col, extension_col].concat(),
        }
    }
}
