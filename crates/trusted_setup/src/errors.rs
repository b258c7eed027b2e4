/// Errors that can occur while loading or validating a trusted setup.
#[derive(Debug)]
pub enum Error {
    /// Failed to read the trusted setup from its underlying source.
    Io(std::io::Error),
    /// The input ended before all of the expected points were read.
    UnexpectedEndOfInput,
    /// A header count line could not be parsed as a decimal integer.
    InvalidHeaderCount {
        /// The raw line that failed to parse.
        line: String,
    },
    /// The header counts did not match what the caller expected.
    HeaderCountMismatch {
        /// Number of G1 points the caller expected, from its own configuration.
        expected_g1_points: usize,
        /// Number of G1 points declared by the file's own header line.
        found_g1_points: usize,
        /// Number of G2 points the caller expected, from its own configuration.
        expected_g2_points: usize,
        /// Number of G2 points declared by the file's own header line.
        found_g2_points: usize,
    },
    /// Failed to parse the trusted setup as JSON.
    Json(serde_json::Error),
    /// A line did not contain valid hex.
    Hex(hex::FromHexError),
    /// A decoded G1 point did not have the expected byte length.
    InvalidG1PointLength {
        /// Number of bytes that were decoded.
        length: usize,
    },
    /// A decoded G2 point did not have the expected byte length.
    InvalidG2PointLength {
        /// Number of bytes that were decoded.
        length: usize,
    },
    /// A G1 point was not a valid point on the curve, or was not in the correct subgroup.
    InvalidG1Point,
    /// A G2 point was not a valid point on the curve, or was not in the correct subgroup.
    InvalidG2Point,
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<hex::FromHexError> for Error {
    fn from(value: hex::FromHexError) -> Self {
        Self::Hex(value)
    }
}
