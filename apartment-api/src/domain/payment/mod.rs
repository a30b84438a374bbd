pub mod signature;

use serde::{Deserialize, Serialize};

pub const NO_INSTALLMENT: &str = "1";
pub const MAX_INSTALLMENT: &str = "0";
pub const SUCCESS_STATUS: &str = "success";

pub const OK_RESPONSE: &str = "OK";
pub const BAD_HASH_RESPONSE: &str = "PAYTR notification failed: bad hash";

/// 提交给支付网关获取 token 的表单，字段名即网关的参数名
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenRequest {
    pub merchant_id: String,
    pub user_ip: String,
    pub merchant_oid: String,
    pub email: String,
    /// 以分为单位
    pub payment_amount: String,
    pub paytr_token: String,
    /// base64(JSON(购物篮))
    pub user_basket: String,
    pub debug_on: String,
    pub no_installment: String,
    pub max_installment: String,
    pub user_name: String,
    pub user_address: String,
    pub user_phone: String,
    pub merchant_ok_url: String,
    pub merchant_fail_url: String,
    pub timeout_limit: String,
    pub currency: String,
    pub test_mode: String,
}

/// 网关回调通知，缺失字段按空串处理，由签名校验拒绝
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CallbackNotification {
    pub merchant_oid: String,
    pub status: String,
    pub total_amount: String,
    pub hash: String,
}

/// 一次支付尝试的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentAttemptState {
    Requested,
    NotifiedSuccess,
    Settled,
    NotifiedFailure,
    NotifiedInvalid,
}

/// 回调处理结果，终态之一
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackOutcome {
    /// 签名正确且支付成功，已销账一期会费
    Settled,
    /// 重发的成功通知，订单早已销账，不再扣减
    AlreadySettled,
    /// 签名正确但支付未成功，原样返回状态
    NotSuccessful { status: String },
    /// 签名不符，不可信的输入
    InvalidSignature,
    /// 签名正确且支付成功，但销账失败
    SettlementFailed { message: String },
}

impl CallbackOutcome {
    pub fn state(&self) -> PaymentAttemptState {
        match self {
            CallbackOutcome::Settled | CallbackOutcome::AlreadySettled => PaymentAttemptState::Settled,
            CallbackOutcome::NotSuccessful { .. } => PaymentAttemptState::NotifiedFailure,
            CallbackOutcome::InvalidSignature => PaymentAttemptState::NotifiedInvalid,
            CallbackOutcome::SettlementFailed { .. } => PaymentAttemptState::NotifiedSuccess,
        }
    }

    /// 返回给网关的纯文本
    pub fn response_text(&self) -> String {
        match self {
            CallbackOutcome::Settled | CallbackOutcome::AlreadySettled => OK_RESPONSE.to_string(),
            CallbackOutcome::NotSuccessful { status } => status.clone(),
            CallbackOutcome::InvalidSignature => BAD_HASH_RESPONSE.to_string(),
            CallbackOutcome::SettlementFailed { message } => message.clone(),
        }
    }
}
