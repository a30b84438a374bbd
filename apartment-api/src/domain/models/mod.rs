pub mod announcement;
pub mod dues_settings;
pub mod flat;
pub mod merchant_order;

pub use announcement::Announcement;
pub use dues_settings::{DuesSettings, DuesSnapshot};
pub use flat::{Flat, FlatOwner};
pub use merchant_order::MerchantOrder;
