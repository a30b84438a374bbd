pub mod aes_cfb_utils;
pub mod error;
pub mod hmac_utils;
pub mod random_utils;

pub use aes_cfb_utils::CredentialCipher;
pub use error::CryptoError;
