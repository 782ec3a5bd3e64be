pub mod help_overlay;
pub mod log_panel;
pub mod query_bar;
pub mod result_panel;
