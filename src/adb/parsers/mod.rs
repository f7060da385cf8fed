pub mod logcat;
pub mod meminfo;
pub mod top;
