use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::domain::models::MerchantOrder;
use crate::error::{AppError, AppResult};

/// 销账结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// 本次回调扣减了一期会费
    Settled,
    /// 订单此前已销账，未做任何改动
    AlreadySettled,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MerchantOrderRepository: Send + Sync {
    async fn create(&self, order: &MerchantOrder) -> AppResult<()>;
    /// 标记订单已销账并扣减对应住户一期会费，二者同时成功或同时不生效。
    /// 每个订单最多扣减一次
    async fn settle(&self, merchant_id: &str) -> AppResult<Settlement>;
}

pub struct MySqlMerchantOrderRepository {
    pool: MySqlPool,
}

impl MySqlMerchantOrderRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MerchantOrderRepository for MySqlMerchantOrderRepository {
    async fn create(&self, order: &MerchantOrder) -> AppResult<()> {
        sqlx::query("INSERT INTO merchants (merchant_id, email) VALUES (?, ?)")
            .bind(&order.merchant_id)
            .bind(&order.email)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn settle(&self, merchant_id: &str) -> AppResult<Settlement> {
        // 出错返回时事务随 drop 回滚
        let mut tx = self.pool.begin().await?;

        // 条件更新同时加行锁，并发的重复回调在此串行
        let marked = sqlx::query("UPDATE merchants SET settled = 1 WHERE merchant_id = ? AND settled = 0")
            .bind(merchant_id)
            .execute(&mut *tx)
            .await?;

        let email: Option<(String,)> = sqlx::query_as("SELECT email FROM merchants WHERE merchant_id = ?")
            .bind(merchant_id)
            .fetch_optional(&mut *tx)
            .await?;
        let (email,) = email.ok_or(AppError::MerchantOrderNotFound)?;

        if marked.rows_affected() == 0 {
            tx.commit().await?;
            return Ok(Settlement::AlreadySettled);
        }

        let result = sqlx::query(
            "UPDATE apartments SET dues_count = dues_count - 1 WHERE mail = ? AND dues_count > 0",
        )
        .bind(&email)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let flat: Option<(i32,)> = sqlx::query_as("SELECT flat_no FROM apartments WHERE mail = ?")
                .bind(&email)
                .fetch_optional(&mut *tx)
                .await?;

            return match flat {
                Some(_) => Err(AppError::NoDues),
                None => Err(AppError::FlatNotFound),
            };
        }

        tx.commit().await?;
        Ok(Settlement::Settled)
    }
}
