/// The three overlay surfaces of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelId {
    /// Full-screen AI chat curtain.
    Ai,
    /// Full-screen command center.
    Settings,
    /// Bottom-docked media downloader modal.
    Downloader,
}

/// Per-panel visibility flags.
///
/// The two full-screen panels are mutually exclusive: opening one
/// closes the other, so input priority is never ambiguous. The
/// downloader modal stacks independently.
#[derive(Debug, Default)]
pub struct Panels {
    ai: bool,
    settings: bool,
    downloader: bool,
}

impl Panels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, panel: PanelId) {
        match panel {
            PanelId::Ai => {
                self.ai = true;
                self.settings = false;
            }
            PanelId::Settings => {
                self.settings = true;
                self.ai = false;
            }
            PanelId::Downloader => self.downloader = true,
        }
    }

    pub fn close(&mut self, panel: PanelId) {
        match panel {
            PanelId::Ai => self.ai = false,
            PanelId::Settings => self.settings = false,
            PanelId::Downloader => self.downloader = false,
        }
    }

    pub fn toggle(&mut self, panel: PanelId) {
        if self.is_open(panel) {
            self.close(panel);
        } else {
            self.open(panel);
        }
    }

    pub fn is_open(&self, panel: PanelId) -> bool {
        match panel {
            PanelId::Ai => self.ai,
            PanelId::Settings => self.settings,
            PanelId::Downloader => self.downloader,
        }
    }

    /// Whether a full-screen panel currently captures input.
    pub fn fullscreen_active(&self) -> bool {
        self.ai || self.settings
    }

    /// The panel that should receive key input, topmost first.
    pub fn top(&self) -> Option<PanelId> {
        if self.ai {
            Some(PanelId::Ai)
        } else if self.settings {
            Some(PanelId::Settings)
        } else if self.downloader {
            Some(PanelId::Downloader)
        } else {
            None
        }
    }
}
