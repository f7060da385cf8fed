pub mod dashboard;
pub mod device_picker;
