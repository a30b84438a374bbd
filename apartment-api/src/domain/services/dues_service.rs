use std::sync::Arc;

use crate::domain::models::DuesSnapshot;
use crate::error::AppError;
use crate::server::AppState;

pub struct DuesService {
    state: Arc<AppState>,
}

impl DuesService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub fn settings(&self) -> DuesSnapshot {
        self.state.dues.snapshot()
    }

    pub fn change_price(&self, price: f64) -> Result<(), AppError> {
        self.state.dues.set_price(price)?;
        tracing::info!(price, "Dues price changed");
        Ok(())
    }

    pub fn change_pay_day(&self, pay_day: u32) -> Result<(), AppError> {
        self.state.dues.set_pay_day(pay_day)?;
        tracing::info!(pay_day, "Pay day changed");
        Ok(())
    }

    /// 当天是缴费日时给所有住户加一期会费，返回受影响户数
    pub async fn accrue_if_due(&self, day_of_month: u32) -> Result<Option<u64>, AppError> {
        // 先取出快照再访问数据库，锁不跨 await
        let pay_day = self.state.dues.pay_day();
        if day_of_month != pay_day {
            return Ok(None);
        }

        let affected = self.state.flats.add_dues_for_all().await?;
        tracing::info!(pay_day, affected, "Dues accrued for all flats");

        Ok(Some(affected))
    }
}
