use base64::{engine::general_purpose::STANDARD, Engine as _};
use cfb_mode::cipher::{AsyncStreamCipher, KeyIvInit};
use rand::Rng;
use std::fmt;

use crate::error::CryptoError;

type Aes128CfbEnc = cfb_mode::Encryptor<aes::Aes128>;
type Aes128CfbDec = cfb_mode::Decryptor<aes::Aes128>;

type Aes192CfbEnc = cfb_mode::Encryptor<aes::Aes192>;
type Aes192CfbDec = cfb_mode::Decryptor<aes::Aes192>;

type Aes256CfbEnc = cfb_mode::Encryptor<aes::Aes256>;
type Aes256CfbDec = cfb_mode::Decryptor<aes::Aes256>;

const IV_LEN: usize = 16;

/// 住户密码的对称加解密
///
/// 存储格式: `base64(iv || AES-CFB(plaintext))`，每次加密随机生成 IV，密文与明文等长。
/// 密钥长度 16/24/32 字节分别对应 AES-128/192/256。
#[derive(Clone)]
pub struct CredentialCipher {
    key: Vec<u8>,
}

impl CredentialCipher {
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        match key.len() {
            16 | 24 | 32 => Ok(Self { key: key.to_vec() }),
            n => Err(CryptoError::InvalidKeyLength(n)),
        }
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let mut iv = [0u8; IV_LEN];
        rand::rng().fill(&mut iv);

        let mut buf = plaintext.as_bytes().to_vec();
        let key_error = |_| CryptoError::InvalidKeyLength(self.key.len());
        match self.key.len() {
            16 => Aes128CfbEnc::new_from_slices(&self.key, &iv).map_err(key_error)?.encrypt(&mut buf),
            24 => Aes192CfbEnc::new_from_slices(&self.key, &iv).map_err(key_error)?.encrypt(&mut buf),
            _ => Aes256CfbEnc::new_from_slices(&self.key, &iv).map_err(key_error)?.encrypt(&mut buf),
        }

        let mut out = Vec::with_capacity(IV_LEN + buf.len());
        out.extend_from_slice(&iv);
        out.extend_from_slice(&buf);
        Ok(STANDARD.encode(out))
    }

    pub fn decrypt(&self, encoded: &str) -> Result<String, CryptoError> {
        let data = STANDARD.decode(encoded)?;
        if data.len() < IV_LEN {
            return Err(CryptoError::CiphertextTooShort);
        }
        let (iv, ciphertext) = data.split_at(IV_LEN);

        let mut buf = ciphertext.to_vec();
        let key_error = |_| CryptoError::InvalidKeyLength(self.key.len());
        match self.key.len() {
            16 => Aes128CfbDec::new_from_slices(&self.key, iv).map_err(key_error)?.decrypt(&mut buf),
            24 => Aes192CfbDec::new_from_slices(&self.key, iv).map_err(key_error)?.decrypt(&mut buf),
            _ => Aes256CfbDec::new_from_slices(&self.key, iv).map_err(key_error)?.decrypt(&mut buf),
        }

        Ok(String::from_utf8(buf)?)
    }
}

impl fmt::Debug for CredentialCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialCipher")
            .field("key", &"<redacted>")
            .finish()
    }
}
