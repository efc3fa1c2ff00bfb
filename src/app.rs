use crate::api::GenerationClient;
use crate::config::Config;
use crate::conversation::{ChatMode, Conversation};
use crate::downloader::Downloader;
use crate::i18n::{strings, Language, Strings};
use crate::keygate::{GateStatus, KeyGate};
use crate::orb::OrbController;
use crate::panels::{PanelId, Panels};
use crate::shield;
use crate::theme::{ThemeEngine, ThemeMode};
use crate::voice::Voice;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use log::{info, warn};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Branded splash duration before the key check runs.
pub const SPLASH_DURATION: Duration = Duration::from_secs(4);

/// Gating sequence: splash, then the credential gate, then the launch
/// screen, then the main shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Splash,
    KeyGate,
    Launch,
    Shell,
    Exiting,
}

pub struct App {
    pub config: Config,
    pub state: AppState,
    pub theme: ThemeEngine,
    pub orb: OrbController,
    pub panels: Panels,
    pub conversation: Conversation,
    pub downloader: Downloader,
    pub gate: KeyGate,
    pub voice: Voice,
    pub client: GenerationClient,
    /// Chat input buffer, owned by the AI panel.
    pub input: String,
    /// Credential entry buffer on the gate screen.
    pub key_input: String,
    pub gate_notice: bool,
    pub settings_row: usize,
    pub user_agent: &'static str,
    pub splash_started: Instant,
    /// Persistent handle; some hosts drop clipboard contents when the
    /// owner goes away too quickly.
    clipboard: Option<arboard::Clipboard>,
}

impl App {
    pub fn new() -> Result<Self> {
        Ok(Self::with_config(Config::load_or_default()?, true))
    }

    pub fn with_config(config: Config, voice_enabled: bool) -> Self {
        let client = GenerationClient::new(
            config.ai.api_url.clone(),
            config.ai.api_key.clone(),
            config.ai.model.clone(),
            config.ai.image_model.clone(),
        );
        let theme = ThemeEngine::new(config.theme);

        Self {
            config,
            state: AppState::Splash,
            theme,
            orb: OrbController::new(),
            panels: Panels::new(),
            conversation: Conversation::new(),
            downloader: Downloader::new(),
            gate: KeyGate::new(),
            voice: Voice::new(voice_enabled),
            client,
            input: String::new(),
            key_input: String::new(),
            gate_notice: false,
            settings_row: 0,
            user_agent: shield::pick_user_agent(),
            splash_started: Instant::now(),
            clipboard: arboard::Clipboard::new().ok(),
        }
    }

    pub fn strings(&self) -> &'static Strings {
        strings(self.config.language)
    }

    /// 0.0..=1.0 fill for the splash loading bar.
    pub fn splash_progress(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.splash_started);
        (elapsed.as_secs_f64() / SPLASH_DURATION.as_secs_f64()).min(1.0)
    }

    /// Periodic work driven by the shell's tick: splash expiry, theme
    /// rotation, downloader progress, and pending generation outcomes.
    pub fn update(&mut self, now: Instant) {
        match self.state {
            AppState::Splash => {
                if now.saturating_duration_since(self.splash_started) >= SPLASH_DURATION {
                    self.finish_splash();
                }
            }
            AppState::Shell => {
                self.theme.tick(now);

                let table = strings(self.config.language);
                let _ = self.conversation.poll(table);

                if self.panels.is_open(PanelId::Downloader) && self.downloader.tick() {
                    self.panels.close(PanelId::Downloader);
                }
            }
            AppState::KeyGate | AppState::Launch | AppState::Exiting => {}
        }
    }

    fn finish_splash(&mut self) {
        self.state = match self.gate.check(&self.config) {
            GateStatus::Active => AppState::Launch,
            _ => AppState::KeyGate,
        };
    }

    fn launch(&mut self) {
        info!("session initiated");
        self.state = AppState::Shell;
        self.voice.speak(self.strings().greeting);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.state {
            AppState::Splash => self.finish_splash(),
            AppState::KeyGate => self.handle_gate_key(key),
            AppState::Launch => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.launch();
                }
            }
            AppState::Shell => self.handle_shell_key(key),
            AppState::Exiting => {}
        }
    }

    fn handle_gate_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.key_input.push(c);
            }
            KeyCode::Backspace => {
                self.key_input.pop();
            }
            KeyCode::Enter => {
                let entered = self.key_input.clone();
                match self.gate.activate(&mut self.config, &entered) {
                    Ok(()) => {
                        self.key_input.clear();
                        self.gate_notice = false;
                        self.rebuild_client();
                        self.state = AppState::Launch;
                    }
                    Err(e) => {
                        warn!("credential activation failed: {e}");
                        self.gate_notice = true;
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_shell_key(&mut self, key: KeyEvent) {
        match self.panels.top() {
            Some(PanelId::Ai) => self.handle_ai_key(key),
            Some(PanelId::Settings) => self.handle_settings_key(key),
            Some(PanelId::Downloader) => self.handle_downloader_key(key),
            None => match key.code {
                KeyCode::Char('a') => self.panels.toggle(PanelId::Ai),
                KeyCode::Char('s') => self.panels.open(PanelId::Settings),
                KeyCode::Char('d') => self.panels.open(PanelId::Downloader),
                KeyCode::Char('q') => self.state = AppState::Exiting,
                _ => {}
            },
        }
    }

    fn handle_ai_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('y') => self.copy_last_reply(),
                KeyCode::Char('l') => self.listen_last_reply(),
                KeyCode::Char('s') => self.save_last_image(),
                _ => {}
            }
            return;
        }
        match key.code {
            KeyCode::Esc => self.panels.close(PanelId::Ai),
            KeyCode::Tab => {
                self.conversation.mode = match self.conversation.mode {
                    ChatMode::Text => ChatMode::Image,
                    ChatMode::Image => ChatMode::Text,
                };
            }
            KeyCode::Enter => {
                let prompt = self.input.clone();
                if self.conversation.submit(&prompt, &self.client) {
                    self.input.clear();
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        let total = Language::all().len() + ThemeMode::selectable().len();
        match key.code {
            KeyCode::Esc => self.panels.close(PanelId::Settings),
            KeyCode::Up => self.settings_row = (self.settings_row + total - 1) % total,
            KeyCode::Down => self.settings_row = (self.settings_row + 1) % total,
            KeyCode::Enter => self.apply_settings_row(),
            _ => {}
        }
    }

    fn handle_downloader_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                if self.downloader.can_close() {
                    self.downloader.reset();
                    self.panels.close(PanelId::Downloader);
                }
            }
            KeyCode::Up => self.downloader.select_prev(),
            KeyCode::Down => self.downloader.select_next(),
            KeyCode::Enter => self.downloader.start(),
            _ => {}
        }
    }

    fn apply_settings_row(&mut self) {
        let languages = Language::all();
        if self.settings_row < languages.len() {
            self.config.language = languages[self.settings_row];
        } else {
            let mode = ThemeMode::selectable()[self.settings_row - languages.len()];
            self.theme.set_mode(mode);
            self.config.theme = mode;
        }
        // Persisted once on exit, not on every keystroke.
    }

    /// Mouse routing for the orb gesture: press on the orb starts a
    /// drag, release ends it anywhere on screen, and only a motionless
    /// press-release toggles the AI panel.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.state != AppState::Shell {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !self.panels.fullscreen_active() && self.orb.hits(mouse.column, mouse.row) {
                    self.orb.on_drag_start(mouse.column, mouse.row);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.orb.on_drag_move(mouse.column, mouse.row);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.orb.on_drag_end() {
                    self.panels.toggle(PanelId::Ai);
                }
            }
            _ => {}
        }
    }

    fn rebuild_client(&mut self) {
        self.client = GenerationClient::new(
            self.config.ai.api_url.clone(),
            self.config.ai.api_key.clone(),
            self.config.ai.model.clone(),
            self.config.ai.image_model.clone(),
        );
    }

    fn copy_last_reply(&mut self) {
        let Some(turn) = self.conversation.last_model_turn() else {
            return;
        };
        let text = turn.text.clone();
        if let Some(clipboard) = &mut self.clipboard {
            if let Err(e) = clipboard.set_text(text) {
                warn!("clipboard copy failed: {e}");
            }
        }
    }

    fn listen_last_reply(&self) {
        if let Some(turn) = self.conversation.last_model_turn() {
            self.voice.speak(&turn.text);
        }
    }

    /// Fetches the latest generated image to the downloads folder.
    /// Fire-and-forget: outcomes are logged, never surfaced.
    fn save_last_image(&self) {
        let Some(url) = self
            .conversation
            .last_model_turn()
            .and_then(|t| t.image_url.clone())
        else {
            return;
        };
        tokio::spawn(async move {
            let saved: anyhow::Result<PathBuf> = async {
                let bytes = reqwest::get(&url).await?.error_for_status()?.bytes().await?;
                let path = dirs::download_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(format!("usra-ai-{}.png", chrono::Local::now().timestamp()));
                tokio::fs::write(&path, &bytes).await?;
                Ok(path)
            }
            .await;
            match saved {
                Ok(path) => info!("image saved to {}", path.display()),
                Err(e) => warn!("image save failed: {e}"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn test_app(api_key: &str) -> App {
        let mut config = Config::default();
        config.ai.api_key = api_key.to_string();
        App::with_config(config, false)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn splash_expires_into_the_key_gate_without_a_credential() {
        let mut app = test_app("");
        app.update(Instant::now() + SPLASH_DURATION + Duration::from_millis(1));
        assert_eq!(app.state, AppState::KeyGate);
    }

    #[test]
    fn splash_expires_into_launch_with_a_credential() {
        let mut app = test_app("sk-live");
        app.update(Instant::now() + SPLASH_DURATION + Duration::from_millis(1));
        assert_eq!(app.state, AppState::Launch);
    }

    #[test]
    fn any_key_skips_the_splash() {
        let mut app = test_app("sk-live");
        app.handle_key(press(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Launch);
    }

    #[tokio::test]
    async fn launch_enters_the_shell() {
        let mut app = test_app("sk-live");
        app.state = AppState::Launch;
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.state, AppState::Shell);
    }

    #[test]
    fn blank_gate_entry_shows_the_retry_notice() {
        let mut app = test_app("");
        app.state = AppState::KeyGate;
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.state, AppState::KeyGate);
        assert!(app.gate_notice);
    }

    #[test]
    fn orb_tap_toggles_the_ai_panel() {
        let mut app = test_app("sk-live");
        app.state = AppState::Shell;
        app.orb.place_default(80, 24);
        let (x, y) = app.orb.position();
        let (x, y) = (x as u16, y as u16);

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x, y));
        assert!(app.panels.is_open(PanelId::Ai));
    }

    #[test]
    fn orb_drag_moves_without_toggling() {
        let mut app = test_app("sk-live");
        app.state = AppState::Shell;
        app.orb.place_default(80, 24);
        let (ox, oy) = app.orb.position();
        let (x, y) = (ox as u16, oy as u16);

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), x - 5, y - 3));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x - 5, y - 3));

        assert!(!app.panels.is_open(PanelId::Ai));
        assert_eq!(app.orb.position(), (ox - 5, oy - 3));
    }

    #[test]
    fn tab_switches_the_chat_mode() {
        let mut app = test_app("sk-live");
        app.state = AppState::Shell;
        app.panels.open(PanelId::Ai);
        assert_eq!(app.conversation.mode, ChatMode::Text);
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.conversation.mode, ChatMode::Image);
    }

    #[test]
    fn settings_row_selects_a_language() {
        let mut app = test_app("sk-live");
        app.state = AppState::Shell;
        app.panels.open(PanelId::Settings);
        app.settings_row = 2; // EN
        app.apply_settings_row();
        assert_eq!(app.config.language, Language::En);
    }

    #[test]
    fn settings_row_selects_a_theme_mode() {
        let mut app = test_app("sk-live");
        app.state = AppState::Shell;
        app.settings_row = Language::all().len() + 2; // desert
        app.apply_settings_row();
        assert_eq!(app.theme.mode(), ThemeMode::Desert);
    }
}
