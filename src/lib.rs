// Library exports for the Usra shell components
pub mod api;
pub mod app;
pub mod config;
pub mod conversation;
pub mod downloader;
pub mod error;
pub mod i18n;
pub mod keygate;
pub mod layout;
pub mod orb;
pub mod panels;
pub mod shield;
pub mod theme;
pub mod ui;
pub mod voice;

// Re-export commonly used types
pub use api::{GenerationClient, Generator};
pub use app::{App, AppState};
pub use config::Config;
pub use conversation::{ChatMode, ChatRole, ChatTurn, Conversation};
pub use error::{CredentialError, GenerationError};
pub use i18n::{strings, Language};
pub use keygate::{GateStatus, KeyGate};
pub use orb::OrbController;
pub use panels::{PanelId, Panels};
pub use theme::{palette_for, Palette, ThemeEngine, ThemeMode};
