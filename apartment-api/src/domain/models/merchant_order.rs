use serde::{Deserialize, Serialize};

/// 支付订单号与住户邮箱的映射，回调时据此找到要销账的住户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MerchantOrder {
    pub merchant_id: String,
    pub email: String,
}
