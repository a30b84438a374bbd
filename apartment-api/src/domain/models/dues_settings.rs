use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::AppError;

pub const MIN_PAY_DAY: u32 = 1;
pub const MAX_PAY_DAY: u32 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DuesSnapshot {
    pub price: f64,
    pub pay_day: u32,
}

/// 会费单价和缴费日，两者共用一把锁
///
/// 只在读写期间持锁，不跨 `.await`。进程重启后恢复为配置中的初始值。
#[derive(Debug)]
pub struct DuesSettings {
    inner: Mutex<DuesSnapshot>,
}

impl DuesSettings {
    pub fn new(price: f64, pay_day: u32) -> Result<Self, AppError> {
        validate_price(price)?;
        validate_pay_day(pay_day)?;

        Ok(Self {
            inner: Mutex::new(DuesSnapshot { price, pay_day }),
        })
    }

    pub fn snapshot(&self) -> DuesSnapshot {
        *self.lock()
    }

    pub fn price(&self) -> f64 {
        self.lock().price
    }

    pub fn pay_day(&self) -> u32 {
        self.lock().pay_day
    }

    pub fn set_price(&self, price: f64) -> Result<(), AppError> {
        validate_price(price)?;
        self.lock().price = price;
        Ok(())
    }

    pub fn set_pay_day(&self, pay_day: u32) -> Result<(), AppError> {
        validate_pay_day(pay_day)?;
        self.lock().pay_day = pay_day;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, DuesSnapshot> {
        // 快照是纯数据，中毒后直接沿用
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::InvalidPrice);
    }
    Ok(())
}

fn validate_pay_day(pay_day: u32) -> Result<(), AppError> {
    if !(MIN_PAY_DAY..=MAX_PAY_DAY).contains(&pay_day) {
        return Err(AppError::PayDayRange);
    }
    Ok(())
}
