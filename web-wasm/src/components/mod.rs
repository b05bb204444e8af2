pub mod analyzing;
pub mod dashboard;
pub mod header;
pub mod history_list;
pub mod nav_bar;
pub mod result_view;
pub mod scanner_overlay;
pub mod settings_panel;
pub mod splash;
pub mod toast;
