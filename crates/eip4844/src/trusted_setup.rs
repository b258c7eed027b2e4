use bls12_381::G2Prepared;
pub use ::trusted_setup::TrustedSetup;
use trusted_setup::SubgroupCheck;

use kzg_single_open::{prover::CommitKey, verifier::VerificationKey};

/// Converts the G1 monomial points of the trusted setup into a `CommitKey`.
///
/// Subgroup membership is not checked here: the setup is assumed to have been
/// validated once, up front, when it was loaded.
pub(crate) fn commit_key_from_setup(setup: &TrustedSetup) -> CommitKey {
    let g1s = setup
        .g1_monomial_points(SubgroupCheck::NoCheck)
        .expect("trusted setup should already have been validated before use");
    CommitKey::new(g1s)
}

/// Converts the generator and first two powers of tau into a `VerificationKey`.
pub(crate) fn verification_key_from_setup(setup: &TrustedSetup) -> VerificationKey {
    let g1s = setup
        .g1_monomial_points(SubgroupCheck::NoCheck)
        .expect("trusted setup should already have been validated before use");
    let g2s = setup
        .g2_monomial_points(SubgroupCheck::NoCheck)
        .expect("trusted setup should already have been validated before use");

    let gen_g1 = g1s[0];
    let gen_g2 = g2s[0];
    let tau_g2 = g2s[1];

    VerificationKey {
        gen_g1,
        gen_g2,
        tau_g2,
        gen_g2_prepared: G2Prepared::from(gen_g2),
        tau_g2_prepared: G2Prepared::from(tau_g2),
    }
}
