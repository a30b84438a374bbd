use axum::{middleware, routing::get, Router};
use common::CredentialCipher;
use sqlx::MySqlPool;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::{announcements, auth, dues, flats, mail, payment, settings};
use crate::config::Config;
use crate::domain::models::DuesSettings;
use crate::domain::repositories::{
    AnnouncementRepository, FlatRepository, MerchantOrderRepository, MySqlAnnouncementRepository,
    MySqlFlatRepository, MySqlMerchantOrderRepository,
};
use crate::error::AppError;
use crate::infrastructure::build_http_client;
use crate::infrastructure::mail::{HttpMailSender, MailSender};
use crate::infrastructure::payment::{PaymentGateway, PaytrClient};
use crate::middleware::auth::{require_admin, require_member, require_user};

pub struct AppState {
    pub config: Config,
    pub flats: Arc<dyn FlatRepository>,
    pub announcements: Arc<dyn AnnouncementRepository>,
    pub merchant_orders: Arc<dyn MerchantOrderRepository>,
    pub mail_sender: Arc<dyn MailSender>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub cipher: CredentialCipher,
    pub dues: DuesSettings,
}

impl AppState {
    pub fn new(
        config: Config,
        flats: Arc<dyn FlatRepository>,
        announcements: Arc<dyn AnnouncementRepository>,
        merchant_orders: Arc<dyn MerchantOrderRepository>,
        mail_sender: Arc<dyn MailSender>,
        payment_gateway: Arc<dyn PaymentGateway>,
    ) -> Result<Self, AppError> {
        let cipher = CredentialCipher::new(config.auth.cipher_key.as_bytes())?;
        let dues = DuesSettings::new(config.dues.price, config.dues.pay_day)?;

        Ok(Self {
            config,
            flats,
            announcements,
            merchant_orders,
            mail_sender,
            payment_gateway,
            cipher,
            dues,
        })
    }

    /// 生产环境装配: MySQL 仓储 + HTTP 邮件中继 + PayTR 客户端
    pub fn from_pool(config: Config, pool: MySqlPool) -> Result<Self, AppError> {
        let http_client = build_http_client(&config.http)?;

        let flats = Arc::new(MySqlFlatRepository::new(pool.clone()));
        let announcements = Arc::new(MySqlAnnouncementRepository::new(pool.clone()));
        let merchant_orders = Arc::new(MySqlMerchantOrderRepository::new(pool));
        let mail_sender = Arc::new(HttpMailSender::new(http_client.clone(), &config.mail));
        let payment_gateway = Arc::new(PaytrClient::new(http_client, &config.payment));

        Self::new(
            config,
            flats,
            announcements,
            merchant_orders,
            mail_sender,
            payment_gateway,
        )
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    // 健康检查路由
    let health_route = Router::new().route("/health", get(|| async { "OK" }));

    // 无需登录
    let public_routes = Router::new()
        .merge(auth::routes())
        .merge(payment::callback_routes());

    // 仅管理员
    let admin_routes = Router::new()
        .merge(flats::routes())
        .merge(dues::routes())
        .merge(settings::admin_routes())
        .merge(announcements::admin_routes())
        .merge(mail::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    // 仅住户
    let user_routes = Router::new()
        .merge(payment::token_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    // 管理员或住户
    let member_routes = Router::new()
        .merge(settings::member_routes())
        .merge(announcements::member_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_member));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(user_routes)
        .merge(member_routes)
        .merge(health_route)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
