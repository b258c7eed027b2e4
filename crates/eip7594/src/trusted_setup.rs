pub use ::trusted_setup::TrustedSetup;
use trusted_setup::SubgroupCheck;

use kzg_multi_open::{commit_key::CommitKey, verification_key::VerificationKey};

use crate::constants::{FIELD_ELEMENTS_PER_BLOB, FIELD_ELEMENTS_PER_CELL};

/// Converts the G1 monomial points of the trusted setup into a `CommitKey`.
///
/// Subgroup membership is not checked here: the setup is assumed to have been
/// validated once, up front, when it was loaded.
pub(crate) fn commit_key_from_setup(setup: &TrustedSetup) -> CommitKey {
    let g1_points = setup
        .g1_monomial_points(SubgroupCheck::NoCheck)
        .expect("trusted setup should already have been validated before use");
    CommitKey::new(g1_points)
}

/// Converts G1 and G2 monomials from the trusted setup into a `VerificationKey`.
///
/// Uses only as many G1 points as there are G2 points, since the verifier needs
/// no more than that to commit to the remainder/interpolation polynomial.
pub(crate) fn verification_key_from_setup(setup: &TrustedSetup) -> VerificationKey {
    let g2_points = setup
        .g2_monomial_points(SubgroupCheck::NoCheck)
        .expect("trusted setup should already have been validated before use");
    let num_g2_points = g2_points.len();

    let g1_points = setup
        .g1_monomial_points(SubgroupCheck::NoCheck)
        .expect("trusted setup should already have been validated before use");

    VerificationKey::new(
        g1_points[..num_g2_points].to_vec(),
        g2_points,
        FIELD_ELEMENTS_PER_CELL,
        FIELD_ELEMENTS_PER_BLOB,
    )
}
