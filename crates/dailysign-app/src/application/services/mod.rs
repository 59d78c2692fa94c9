pub mod auth_service;
mod check_in_executor;
mod notification_service;

pub use check_in_executor::{get_form, submit, CheckInExecutor, ExecutorSettings};
pub use notification_service::NotificationService;
