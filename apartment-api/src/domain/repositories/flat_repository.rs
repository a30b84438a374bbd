use async_trait::async_trait;
use sqlx::MySqlPool;

use super::is_unique_violation;
use crate::domain::models::{Flat, FlatOwner};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlatRepository: Send + Sync {
    async fn create(&self, flat_no: i32) -> AppResult<()>;
    /// `encrypted_password` 已由调用方加密
    async fn update_owner(&self, owner: &FlatOwner, encrypted_password: &str) -> AppResult<()>;
    async fn delete(&self, flat_no: i32) -> AppResult<()>;
    async fn find_by_flat_no(&self, flat_no: i32) -> AppResult<Option<Flat>>;
    /// 列表不带密码列
    async fn find_all(&self) -> AppResult<Vec<Flat>>;
    async fn find_by_mail(&self, mail: &str) -> AppResult<Option<Flat>>;
    async fn add_dues(&self, flat_no: i32) -> AppResult<()>;
    /// 返回受影响的户数
    async fn add_dues_for_all(&self) -> AppResult<u64>;
    async fn delete_dues(&self, flat_no: i32) -> AppResult<()>;
}

pub struct MySqlFlatRepository {
    pool: MySqlPool,
}

impl MySqlFlatRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, flat_no: i32) -> AppResult<bool> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT flat_no FROM apartments WHERE flat_no = ?")
            .bind(flat_no)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }
}

#[async_trait]
impl FlatRepository for MySqlFlatRepository {
    async fn create(&self, flat_no: i32) -> AppResult<()> {
        let flat = Flat::new(flat_no);

        sqlx::query(
            r#"
            INSERT INTO apartments (flat_no, owner_name, owner_surname, mail, password, dues_count)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(flat.flat_no)
        .bind(&flat.owner_name)
        .bind(&flat.owner_surname)
        .bind(&flat.mail)
        .bind(&flat.password)
        .bind(flat.dues_count)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::FlatAlreadyExists
            } else {
                AppError::Database(e)
            }
        })?;

        Ok(())
    }

    async fn update_owner(&self, owner: &FlatOwner, encrypted_password: &str) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE apartments
            SET owner_name = ?, owner_surname = ?, mail = ?, password = ?,
                dues_count = COALESCE(?, dues_count)
            WHERE flat_no = ?
            "#,
        )
        .bind(&owner.owner_name)
        .bind(&owner.owner_surname)
        .bind(&owner.mail)
        .bind(encrypted_password)
        .bind(owner.dues_count)
        .bind(owner.flat_no)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::MailAlreadyInUse
            } else {
                AppError::Database(e)
            }
        })?;

        // 内容未变化时 MySQL 也可能返回 0
        if result.rows_affected() == 0 && !self.exists(owner.flat_no).await? {
            return Err(AppError::FlatNotFound);
        }

        Ok(())
    }

    async fn delete(&self, flat_no: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM apartments WHERE flat_no = ?")
            .bind(flat_no)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::FlatNotFound);
        }

        Ok(())
    }

    async fn find_by_flat_no(&self, flat_no: i32) -> AppResult<Option<Flat>> {
        let flat = sqlx::query_as::<_, Flat>(
            r#"
            SELECT flat_no, owner_name, owner_surname, mail, password, dues_count
            FROM apartments
            WHERE flat_no = ?
            "#,
        )
        .bind(flat_no)
        .fetch_optional(&self.pool)
        .await?;

        Ok(flat)
    }

    async fn find_all(&self) -> AppResult<Vec<Flat>> {
        let flats = sqlx::query_as::<_, Flat>(
            r#"
            SELECT flat_no, owner_name, owner_surname, mail, '' AS password, dues_count
            FROM apartments
            ORDER BY flat_no
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(flats)
    }

    async fn find_by_mail(&self, mail: &str) -> AppResult<Option<Flat>> {
        let flat = sqlx::query_as::<_, Flat>(
            r#"
            SELECT flat_no, owner_name, owner_surname, mail, password, dues_count
            FROM apartments
            WHERE mail = ?
            "#,
        )
        .bind(mail)
        .fetch_optional(&self.pool)
        .await?;

        Ok(flat)
    }

    async fn add_dues(&self, flat_no: i32) -> AppResult<()> {
        let result = sqlx::query("UPDATE apartments SET dues_count = dues_count + 1 WHERE flat_no = ?")
            .bind(flat_no)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::FlatNotFound);
        }

        Ok(())
    }

    async fn add_dues_for_all(&self) -> AppResult<u64> {
        let result = sqlx::query("UPDATE apartments SET dues_count = dues_count + 1")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_dues(&self, flat_no: i32) -> AppResult<()> {
        // 条件更新，检查与扣减在同一条语句内完成
        let result = sqlx::query(
            "UPDATE apartments SET dues_count = dues_count - 1 WHERE flat_no = ? AND dues_count > 0",
        )
        .bind(flat_no)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return if self.exists(flat_no).await? {
                Err(AppError::NoDues)
            } else {
                Err(AppError::FlatNotFound)
            };
        }

        Ok(())
    }
}
