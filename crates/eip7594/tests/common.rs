/// Data from the test input could also be malformed,
/// so we use this type to represent that.
/// For example, although a proof should be 48 bytes, the test input
/// could give us 47.
pub type UnsafeBytes = Vec<u8>;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub fn collect_test_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_test_files_inner(dir, &mut files)?;
    assert!(!files.is_empty());
    Ok(files)
}

fn collect_test_files_inner<P: AsRef<Path>>(dir: P, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_test_files_inner(path, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

fn remove_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").map_or_else(
        || {
            panic!(
                "hex strings in ethereum are assumed to be prefixed with a 0x. If this is not the case, it is not a bug, however it is cause for concern, if there are discrepancies."
            );
        },
        |stripped| stripped,
    )
}

pub fn bytes_from_hex(bytes: &str) -> Vec<u8> {
    let bytes = remove_hex_prefix(bytes);
    hex::decode(bytes).unwrap()
}

/// Builds an insecure trusted setup for test purposes only.
///
/// This is not derived from a real KZG ceremony; since the consensus-spec test
/// vectors check against a real ceremony's ouput, any test driven by this setup
/// can only exercise the error paths, not assert a match against the expected values.
#[allow(dead_code)]
pub fn dummy_trusted_setup() -> rust_eth_kzg::TrustedSetup {
    use bls12_381::{traits::*, G1Point, G1Projective, G2Point, G2Projective, Scalar};
    use rust_eth_kzg::constants::FIELD_ELEMENTS_PER_BLOB;

    const NUM_G2_POINTS: usize = 65;

    let tau = Scalar::from(123456789_u64);
    let powers: Vec<_> = std::iter::successors(Some(Scalar::ONE), |p| Some(*p * tau))
        .take(FIELD_ELEMENTS_PER_BLOB)
        .collect();

    let g1_monomial: Vec<_> = powers
        .iter()
        .map(|p| hex::encode(G1Point::from(G1Projective::generator() * p).to_compressed()))
        .collect();
    let g2_monomial: Vec<_> = powers
        .iter()
        .take(NUM_G2_POINTS)
        .map(|p| hex::encode(G2Point::from(G2Projective::generator() * p).to_compressed()))
        .collect();

    rust_eth_kzg::TrustedSetup {
        g1_monomial: g1_monomial.clone(),
        g1_lagrange: g1_monomial,
        g2_monomial,
    }
}
