pub mod announcement_service;
pub mod auth_service;
pub mod dues_service;
pub mod flat_service;
pub mod mail_service;
pub mod payment_service;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::config::tests::test_config;
    use crate::config::Config;
    use crate::domain::repositories::announcement_repository::MockAnnouncementRepository;
    use crate::domain::repositories::flat_repository::MockFlatRepository;
    use crate::domain::repositories::merchant_order_repository::MockMerchantOrderRepository;
    use crate::infrastructure::mail::MockMailSender;
    use crate::infrastructure::payment::MockPaymentGateway;
    use crate::server::AppState;

    /// 每个测试只设置自己关心的 mock 期望
    #[derive(Default)]
    pub(crate) struct Mocks {
        pub flats: MockFlatRepository,
        pub announcements: MockAnnouncementRepository,
        pub merchant_orders: MockMerchantOrderRepository,
        pub mail_sender: MockMailSender,
        pub payment_gateway: MockPaymentGateway,
    }

    pub(crate) fn state(mocks: Mocks) -> Arc<AppState> {
        state_with_config(mocks, test_config())
    }

    pub(crate) fn state_with_config(mocks: Mocks, config: Config) -> Arc<AppState> {
        Arc::new(
            AppState::new(
                config,
                Arc::new(mocks.flats),
                Arc::new(mocks.announcements),
                Arc::new(mocks.merchant_orders),
                Arc::new(mocks.mail_sender),
                Arc::new(mocks.payment_gateway),
            )
            .unwrap(),
        )
    }
}
