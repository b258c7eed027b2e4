// Note: Any mention of field elements in this file and in general in the codebase
// refers to the scalar field.

/// The number of bytes needed to represent a field element.
///
/// Note: This is originally specified in the 4844 specs.
pub const BYTES_PER_FIELD_ELEMENT: usize = 32;

/// The number of field elements needed to represent a blob.
///
/// Note: This is originally specified in the 4844 specs.
pub const FIELD_ELEMENTS_PER_BLOB: usize = 4096;

/// The number of bytes needed to represent a blob.
pub const BYTES_PER_BLOB: usize = FIELD_ELEMENTS_PER_BLOB * BYTES_PER_FIELD_ELEMENT;

/// The number of field elements in a cell.
///
/// Note: This value must be a power of two between 1 and 64. The greatest value is 64
/// because there are only 65 G2 points in the trusted setup.
pub const FIELD_ELEMENTS_PER_CELL: usize = 64;

/// The number of bytes needed to represent a cell.
pub const BYTES_PER_CELL: usize = FIELD_ELEMENTS_PER_CELL * BYTES_PER_FIELD_ELEMENT;

/// The number of bytes needed to represent a G1 element.
pub const BYTES_PER_G1_POINT: usize = 48;

/// The number of bytes needed to represent a commitment.
///
/// Note: commitments are G1 elements.
pub const BYTES_PER_COMMITMENT: usize = BYTES_PER_G1_POINT;
