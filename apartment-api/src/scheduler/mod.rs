pub mod dues_job;

pub use dues_job::DuesScheduler;
