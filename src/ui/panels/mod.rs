pub mod ai_panel;
pub mod downloader_panel;
pub mod settings_panel;
