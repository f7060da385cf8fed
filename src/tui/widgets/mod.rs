pub mod confirmation_dialog;
pub mod error_screen;
pub mod filter_bar;
pub mod format_selector_dialog;
pub mod help_overlay;
pub mod loading_screen;
