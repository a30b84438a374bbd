use chrono::{Datelike, Utc};
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domain::services::dues_service::DuesService;
use crate::error::AppError;
use crate::server::AppState;

/// 每天 00:00 (UTC) 触发，是否记账由当时的缴费日决定
const DAILY_AT_MIDNIGHT: &str = "0 0 0 * * *";

/// 会费自动记账任务，独立于请求处理运行
pub struct DuesScheduler {
    scheduler: JobScheduler,
}

impl DuesScheduler {
    pub async fn start(state: Arc<AppState>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new().await?;

        scheduler
            .add(Job::new_async(DAILY_AT_MIDNIGHT, move |_uuid, _l| {
                let state = state.clone();
                Box::pin(async move {
                    run_accrual(state, Utc::now().day()).await;
                })
            })?)
            .await?;

        scheduler.start().await?;
        tracing::info!("Dues scheduler started, checking pay day daily at 00:00 (UTC)");

        Ok(Self { scheduler })
    }

    pub async fn shutdown(mut self) -> Result<(), AppError> {
        self.scheduler.shutdown().await?;
        tracing::info!("Dues scheduler stopped");
        Ok(())
    }
}

/// 执行一次检查，失败只记日志，不重试也不补记
pub async fn run_accrual(state: Arc<AppState>, day_of_month: u32) -> Option<u64> {
    match DuesService::new(state).accrue_if_due(day_of_month).await {
        Ok(affected) => affected,
        Err(e) => {
            tracing::error!(error = %e, day_of_month, "Dues accrual failed");
            None
        }
    }
}
