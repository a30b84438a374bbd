use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// 管理员令牌中的户号
pub const ADMIN_FLAT_NO: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    #[serde(rename = "flatNo")]
    pub flat_no: i32, // 户号，管理员为 -1
    pub role: Role,
    pub exp: usize, // 过期时间
    #[serde(default)]
    pub email: String, // 住户邮箱，管理员为空
}

pub fn generate_token(
    flat_no: i32,
    role: Role,
    email: &str,
    secret: &[u8],
    expiry_hours: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expires_at = OffsetDateTime::now_utc() + Duration::hours(expiry_hours as i64);

    let claims = Claims {
        flat_no,
        role,
        exp: expires_at.unix_timestamp() as usize,
        email: email.to_string(),
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
}

pub fn verify_token(token: &str, secret: &[u8]) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &Validation::default())?;

    Ok(token_data.claims)
}
