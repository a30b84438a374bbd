use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::CryptoError;

type HmacSha256 = Hmac<Sha256>;

fn keyed(key: &[u8], parts: &[&[u8]]) -> Result<HmacSha256, CryptoError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLength(key.len()))?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac)
}

/// HMAC-SHA256，按顺序把各段写入同一个哈希状态，结果 base64 编码
pub fn hmac_sha256_base64(key: &[u8], parts: &[&[u8]]) -> Result<String, CryptoError> {
    let mac = keyed(key, parts)?;
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// 常量时间比较签名，`expected` 为 base64 编码
pub fn verify_hmac_sha256_base64(key: &[u8], parts: &[&[u8]], expected: &str) -> bool {
    let Ok(expected) = STANDARD.decode(expected) else {
        return false;
    };
    match keyed(key, parts) {
        Ok(mac) => mac.verify_slice(&expected).is_ok(),
        Err(_) => false,
    }
}
