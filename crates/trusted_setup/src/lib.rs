use std::{
    io::{BufRead, BufReader},
    path::Path,
};

use bls12_381::{G1Point, G2Point};
use serde::{Deserialize, Serialize};

mod errors;
pub use errors::Error;

/// Whether to check that a deserialized point lies in the correct prime-order subgroup.
///
/// Subgroup checks are relatively expensive, so callers that already trust the source
/// of the setup (for example, a setup that was validated once and cached) can skip them.
#[derive(Debug, Copy, Clone)]
pub enum SubgroupCheck {
    /// Enforce subgroup membership checks during deserialization.
    Check,
    /// Skip subgroup checks. Only safe when the points are already trusted.
    NoCheck,
}

/// The Ethereum trusted setup used for KZG commitments on the BLS12-381 curve.
///
/// This struct holds hex-encoded group elements in G1 and G2, provided in monomial and
/// Lagrange bases. Call sites convert these into the commitment/verification key types
/// that their particular protocol needs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TrustedSetup {
    /// Uncompressed hex-encoded G1 points in monomial basis, `{ [tau^i]G1 }`.
    pub g1_monomial: Vec<String>,
    /// Uncompressed hex-encoded G1 points in Lagrange basis.
    ///
    /// These are what one gets from taking the inverse FFT of `g1_monomial`. The length
    /// of this vector is equal to the length of `g1_monomial`.
    pub g1_lagrange: Vec<String>,
    /// Uncompressed hex-encoded G2 points in monomial basis, `{ [tau^i]G2 }`.
    pub g2_monomial: Vec<String>,
}

impl TrustedSetup {
    /// Parses a JSON string in the format used by the Ethereum trusted setup ceremony, and
    /// checks that every point lies in the correct subgroup.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let setup = Self::from_json_unchecked(json)?;
        setup.validate_subgroup()?;
        Ok(setup)
    }

    /// Parses a JSON string in the format used by the Ethereum trusted setup ceremony,
    /// without checking subgroup membership.
    pub fn from_json_unchecked(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses the external wire format: a decimal line `n1` giving the number of G1
    /// points, a decimal line `n2` giving the number of G2 points, then `n1` monomial
    /// G1 hex lines, `n1` Lagrange G1 hex lines, and `n2` monomial G2 hex lines.
    /// `num_g1_points`/`num_g2_points` are the caller's expected counts; a header that
    /// disagrees with them is rejected before any points are read. Checks subgroup
    /// membership.
    pub fn from_hex_lines<R: BufRead>(
        reader: R,
        num_g1_points: usize,
        num_g2_points: usize,
    ) -> Result<Self, Error> {
        let setup = Self::from_hex_lines_unchecked(reader, num_g1_points, num_g2_points)?;
        setup.validate_subgroup()?;
        Ok(setup)
    }

    /// Parses the external wire format without checking subgroup membership.
    pub fn from_hex_lines_unchecked<R: BufRead>(
        reader: R,
        num_g1_points: usize,
        num_g2_points: usize,
    ) -> Result<Self, Error> {
        let mut lines = reader.lines();
        let mut read_count = || -> Result<usize, Error> {
            let line = lines.next().ok_or(Error::UnexpectedEndOfInput)??;
            line.trim()
                .parse()
                .map_err(|_| Error::InvalidHeaderCount { line })
        };

        let header_g1_points = read_count()?;
        let header_g2_points = read_count()?;
        if header_g1_points != num_g1_points || header_g2_points != num_g2_points {
            return Err(Error::HeaderCountMismatch {
                expected_g1_points: num_g1_points,
                found_g1_points: header_g1_points,
                expected_g2_points: num_g2_points,
                found_g2_points: header_g2_points,
            });
        }

        let mut read_n = |n: usize| -> Result<Vec<String>, Error> {
            let mut points = Vec::with_capacity(n);
            for _ in 0..n {
                let line = lines.next().ok_or(Error::UnexpectedEndOfInput)??;
                points.push(line.trim().to_owned());
            }
            Ok(points)
        };

        let g1_monomial = read_n(num_g1_points)?;
        let g1_lagrange = read_n(num_g1_points)?;
        let g2_monomial = read_n(num_g2_points)?;

        Ok(Self {
            g1_monomial,
            g1_lagrange,
            g2_monomial,
        })
    }

    /// Loads a trusted setup from a file containing the ASCII-hex-lines wire format.
    pub fn from_file(
        path: impl AsRef<Path>,
        num_g1_points: usize,
        num_g2_points: usize,
    ) -> Result<Self, Error> {
        let file = std::fs::File::open(path)?;
        Self::from_hex_lines(BufReader::new(file), num_g1_points, num_g2_points)
    }

    /// Checks that every point in the setup is on the curve and in the correct subgroup.
    fn validate_subgroup(&self) -> Result<(), Error> {
        deserialize_g1_points(&self.g1_monomial, SubgroupCheck::Check)?;
        deserialize_g1_points(&self.g1_lagrange, SubgroupCheck::Check)?;
        deserialize_g2_points(&self.g2_monomial, SubgroupCheck::Check)?;
        Ok(())
    }

    /// Deserializes the G1 monomial points.
    pub fn g1_monomial_points(&self, check: SubgroupCheck) -> Result<Vec<G1Point>, Error> {
        deserialize_g1_points(&self.g1_monomial, check)
    }

    /// Deserializes the G1 Lagrange points.
    pub fn g1_lagrange_points(&self, check: SubgroupCheck) -> Result<Vec<G1Point>, Error> {
        deserialize_g1_points(&self.g1_lagrange, check)
    }

    /// Deserializes the G2 monomial points.
    pub fn g2_monomial_points(&self, check: SubgroupCheck) -> Result<Vec<G2Point>, Error> {
        deserialize_g2_points(&self.g2_monomial, check)
    }
}

fn strip_0x(hex_str: &str) -> &str {
    hex_str.strip_prefix("0x").unwrap_or(hex_str)
}

/// Deserializes a list of hex-encoded G1 points.
fn deserialize_g1_points<T: AsRef<str>>(
    hex_strs: &[T],
    check: SubgroupCheck,
) -> Result<Vec<G1Point>, Error> {
    hex_strs
        .iter()
        .map(|hex_str| {
            let bytes = hex::decode(strip_0x(hex_str.as_ref()))?;
            let bytes: [u8; 48] = bytes
                .try_into()
                .map_err(|bytes: Vec<u8>| Error::InvalidG1PointLength { length: bytes.len() })?;

            let point = match check {
                SubgroupCheck::Check => G1Point::from_compressed(&bytes),
                SubgroupCheck::NoCheck => G1Point::from_compressed_unchecked(&bytes),
            };
            Option::from(point).ok_or(Error::InvalidG1Point)
        })
        .collect()
}

/// Deserializes a list of hex-encoded G2 points.
fn deserialize_g2_points<T: AsRef<str>>(
    hex_strs: &[T],
    check: SubgroupCheck,
) -> Result<Vec<G2Point>, Error> {
    hex_strs
        .iter()
        .map(|hex_str| {
            let bytes = hex::decode(strip_0x(hex_str.as_ref()))?;
            let bytes: [u8; 96] = bytes
                .try_into()
                .map_err(|bytes: Vec<u8>| Error::InvalidG2PointLength { length: bytes.len() })?;

            let point = match check {
                SubgroupCheck::Check => G2Point::from_compressed(&bytes),
                SubgroupCheck::NoCheck => G2Point::from_compressed_unchecked(&bytes),
            };
            Option::from(point).ok_or(Error::InvalidG2Point)
        })
        .collect()
}
