use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("invalid key length: {0} bytes (expected 16, 24 or 32)")]
    InvalidKeyLength(usize),

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("ciphertext too short")]
    CiphertextTooShort,

    #[error("decrypted text is not valid utf-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
