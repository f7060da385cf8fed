pub mod logs;
pub mod overview;
pub mod performance;
pub mod processes;
pub mod record;
