pub mod screens;
pub mod terminal;
pub mod views;
pub mod widgets;
