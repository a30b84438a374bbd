pub mod announcement_repository;
pub mod flat_repository;
pub mod merchant_order_repository;

pub use announcement_repository::{AnnouncementRepository, MySqlAnnouncementRepository};
pub use flat_repository::{FlatRepository, MySqlFlatRepository};
pub use merchant_order_repository::{
    MerchantOrderRepository, MySqlMerchantOrderRepository, Settlement,
};

/// 唯一索引冲突
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.is_unique_violation(),
        _ => false,
    }
}
