/// Errors that can occur when verifying a multi-opening proof.
#[derive(Debug)]
pub enum VerifierError {
    /// The proof failed verification.
    InvalidProof,
}
