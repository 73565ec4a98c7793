use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlockError {
    /// The header or transaction carries an all-zero signature, so no signer
    /// can be recovered from it.
    #[error("signer cannot be recovered from an unsigned artifact")]
    UnrecoverableSigner,
}
