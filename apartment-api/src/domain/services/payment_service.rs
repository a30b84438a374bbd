use serde_json::Value;
use std::sync::Arc;

use common::random_utils::random_string;

use crate::domain::models::MerchantOrder;
use crate::domain::payment::signature::{encode_basket, sign_token_request, to_minor_units, verify_callback};
use crate::domain::payment::{
    CallbackNotification, CallbackOutcome, PaymentAttemptState, TokenRequest, MAX_INSTALLMENT,
    NO_INSTALLMENT, SUCCESS_STATUS,
};
use crate::domain::repositories::Settlement;
use crate::error::AppError;
use crate::server::AppState;

/// 商户订单号长度
const MERCHANT_OID_LEN: usize = 64;

/// 住户提交的支付信息
#[derive(Debug, Clone)]
pub struct PaymentDetails {
    pub user_name: String,
    pub user_address: String,
    pub user_phone: String,
    pub user_basket: Vec<Vec<Value>>,
    pub debug_on: String,
    pub test_mode: String,
}

pub struct PaymentService {
    state: Arc<AppState>,
}

impl PaymentService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// 向网关申请支付 token，成功后记录订单号与邮箱的映射
    pub async fn request_token(
        &self,
        email: &str,
        user_ip: &str,
        details: PaymentDetails,
    ) -> Result<String, AppError> {
        let payment = &self.state.config.payment;

        let user_basket = encode_basket(&details.user_basket)
            .map_err(|e| AppError::BadRequest(format!("invalid user basket: {}", e)))?;
        let payment_amount = to_minor_units(self.state.dues.price());

        let mut request = TokenRequest {
            merchant_id: payment.merchant_id.to_string(),
            user_ip: user_ip.to_string(),
            merchant_oid: random_string(MERCHANT_OID_LEN),
            email: email.to_string(),
            payment_amount: payment_amount.to_string(),
            paytr_token: String::new(),
            user_basket,
            debug_on: details.debug_on,
            no_installment: NO_INSTALLMENT.to_string(),
            max_installment: MAX_INSTALLMENT.to_string(),
            user_name: details.user_name,
            user_address: details.user_address,
            user_phone: details.user_phone,
            merchant_ok_url: payment.ok_url.clone(),
            merchant_fail_url: payment.fail_url.clone(),
            timeout_limit: payment.timeout_limit.clone(),
            currency: payment.currency.clone(),
            test_mode: details.test_mode,
        };
        request.paytr_token = sign_token_request(&request, &payment.merchant_key, &payment.merchant_salt)?;

        let token = self.state.payment_gateway.request_token(&request).await?;

        self.state
            .merchant_orders
            .create(&MerchantOrder {
                merchant_id: request.merchant_oid.clone(),
                email: request.email.clone(),
            })
            .await?;

        tracing::info!(
            merchant_oid = %request.merchant_oid,
            payment_amount = %request.payment_amount,
            state = ?PaymentAttemptState::Requested,
            "Payment token issued"
        );

        Ok(token)
    }

    /// 处理网关回调，签名不符时不做任何业务处理
    pub async fn handle_callback(&self, notification: &CallbackNotification) -> CallbackOutcome {
        let payment = &self.state.config.payment;

        let outcome = if !verify_callback(notification, &payment.merchant_key, &payment.merchant_salt) {
            CallbackOutcome::InvalidSignature
        } else if notification.status != SUCCESS_STATUS {
            CallbackOutcome::NotSuccessful {
                status: notification.status.clone(),
            }
        } else {
            match self.state.merchant_orders.settle(&notification.merchant_oid).await {
                Ok(Settlement::Settled) => CallbackOutcome::Settled,
                Ok(Settlement::AlreadySettled) => CallbackOutcome::AlreadySettled,
                Err(e) => CallbackOutcome::SettlementFailed { message: e.to_string() },
            }
        };

        match &outcome {
            CallbackOutcome::Settled => {
                tracing::info!(merchant_oid = %notification.merchant_oid, state = ?outcome.state(), "Payment settled")
            }
            CallbackOutcome::AlreadySettled => {
                tracing::info!(merchant_oid = %notification.merchant_oid, state = ?outcome.state(), "Payment notification replayed, already settled")
            }
            CallbackOutcome::InvalidSignature => {
                tracing::warn!(merchant_oid = %notification.merchant_oid, state = ?outcome.state(), "Payment notification has bad hash")
            }
            CallbackOutcome::NotSuccessful { status } => {
                tracing::info!(merchant_oid = %notification.merchant_oid, status = %status, state = ?outcome.state(), "Payment not completed")
            }
            CallbackOutcome::SettlementFailed { message } => {
                tracing::error!(merchant_oid = %notification.merchant_oid, error = %message, state = ?outcome.state(), "Payment settlement failed")
            }
        }

        outcome
    }
}
