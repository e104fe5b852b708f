pub mod auth;
pub mod batch;
pub mod dispatch;
pub mod experiment_log;
pub mod method;
pub mod notification;
pub mod report;
pub mod seedling;
pub mod shared;
pub mod task;
