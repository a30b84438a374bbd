//! PayTR 签名
//!
//! 获取 token: `HMAC-SHA256(key, merchant_id + user_ip + merchant_oid + email +
//! payment_amount + user_basket + no_installment + max_installment + currency +
//! test_mode)`，随后把 salt 写入同一个哈希状态，结果 base64。
//!
//! 回调: `HMAC-SHA256(key, merchant_oid + salt + status + total_amount)`，结果 base64。
//! 任意字段顺序错误都只会导致网关拒单，不会在本地报错。

use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::hmac_utils::{hmac_sha256_base64, verify_hmac_sha256_base64};
use common::CryptoError;
use serde_json::Value;

use super::{CallbackNotification, TokenRequest};

/// 参与签名的字段按固定顺序拼接，无分隔符
pub fn token_hash_str(request: &TokenRequest) -> String {
    [
        request.merchant_id.as_str(),
        &request.user_ip,
        &request.merchant_oid,
        &request.email,
        &request.payment_amount,
        &request.user_basket,
        &request.no_installment,
        &request.max_installment,
        &request.currency,
        &request.test_mode,
    ]
    .concat()
}

pub fn sign_token_request(
    request: &TokenRequest,
    merchant_key: &str,
    merchant_salt: &str,
) -> Result<String, CryptoError> {
    let hash_str = token_hash_str(request);
    hmac_sha256_base64(
        merchant_key.as_bytes(),
        &[hash_str.as_bytes(), merchant_salt.as_bytes()],
    )
}

fn callback_hash_str(notification: &CallbackNotification, merchant_salt: &str) -> String {
    [
        notification.merchant_oid.as_str(),
        merchant_salt,
        &notification.status,
        &notification.total_amount,
    ]
    .concat()
}

/// 计算回调应携带的签名
pub fn callback_hash(
    notification: &CallbackNotification,
    merchant_key: &str,
    merchant_salt: &str,
) -> Result<String, CryptoError> {
    let hash_str = callback_hash_str(notification, merchant_salt);
    hmac_sha256_base64(merchant_key.as_bytes(), &[hash_str.as_bytes()])
}

/// 常量时间校验回调签名
pub fn verify_callback(
    notification: &CallbackNotification,
    merchant_key: &str,
    merchant_salt: &str,
) -> bool {
    let hash_str = callback_hash_str(notification, merchant_salt);
    verify_hmac_sha256_base64(
        merchant_key.as_bytes(),
        &[hash_str.as_bytes()],
        &notification.hash,
    )
}

/// 购物篮: `[[名称, 单价, 数量], ...]` 序列化为紧凑 JSON 后 base64
pub fn encode_basket(basket: &[Vec<Value>]) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(basket)?;
    Ok(STANDARD.encode(json))
}

/// 金额转为分，四舍五入避免 `12.34 * 100` 这类浮点误差
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0).round() as i64
}
