pub use ::serialization::constants::*;

/// The factor by which we extend a blob.
///
/// Note: This is user defined; modifying this will change the number of proofs produced,
/// proof generation time and the rate of the reed-solomon code.
pub const EXPANSION_FACTOR: usize = 2;

/// The number of field elements needed to represent an extended blob.
pub const FIELD_ELEMENTS_PER_EXT_BLOB: usize = EXPANSION_FACTOR * FIELD_ELEMENTS_PER_BLOB;

/// The number of cells in an extension blob.
///
/// Note: A cell is simply a list of `FIELD_ELEMENTS_PER_CELL` field elements.
pub const CELLS_PER_EXT_BLOB: usize = FIELD_ELEMENTS_PER_EXT_BLOB / FIELD_ELEMENTS_PER_CELL;

/// The number of proofs for an extension blob.
///
/// Note: Each Cell comes with its own proof.
pub const NUM_PROOFS: usize = CELLS_PER_EXT_BLOB;

/// The recommended precomputation width to use if `UsePrecomp` is set to `Yes`.
///
/// This is based off of heuristics.
pub const RECOMMENDED_PRECOMP_WIDTH: usize = 8;
