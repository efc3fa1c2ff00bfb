/// One selectable media quality.
#[derive(Debug, Clone, Copy)]
pub struct Quality {
    pub label: &'static str,
    pub value: &'static str,
    pub size: &'static str,
}

pub const QUALITIES: [Quality; 4] = [
    Quality { label: "4K Ultra HD", value: "4k", size: "124MB" },
    Quality { label: "1080p Full HD", value: "1080p", size: "45MB" },
    Quality { label: "720p HD", value: "720p", size: "18MB" },
    Quality { label: "SD Quality", value: "sd", size: "5MB" },
];

/// How many ticks the "saved" confirmation lingers before the panel
/// dismisses itself.
const COMPLETE_LINGER_TICKS: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPhase {
    PickQuality,
    Downloading,
    Complete,
}

/// Simulated media download: random progress increments on each tick,
/// a short confirmation linger, then auto-dismissal.
pub struct Downloader {
    phase: DownloadPhase,
    selected: usize,
    progress: f32,
    linger: u8,
}

impl Downloader {
    pub fn new() -> Self {
        Self {
            phase: DownloadPhase::PickQuality,
            selected: 1, // 1080p, the mobile default
            progress: 0.0,
            linger: 0,
        }
    }

    pub fn phase(&self) -> DownloadPhase {
        self.phase
    }

    pub fn progress(&self) -> u16 {
        self.progress.min(100.0) as u16
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_quality(&self) -> Quality {
        QUALITIES[self.selected]
    }

    pub fn select_next(&mut self) {
        if self.phase == DownloadPhase::PickQuality {
            self.selected = (self.selected + 1) % QUALITIES.len();
        }
    }

    pub fn select_prev(&mut self) {
        if self.phase == DownloadPhase::PickQuality {
            self.selected = (self.selected + QUALITIES.len() - 1) % QUALITIES.len();
        }
    }

    pub fn start(&mut self) {
        if self.phase == DownloadPhase::PickQuality {
            self.phase = DownloadPhase::Downloading;
            self.progress = 0.0;
        }
    }

    /// Closing is refused mid-download, matching the mobile modal.
    pub fn can_close(&self) -> bool {
        self.phase != DownloadPhase::Downloading
    }

    /// Advances the simulation one step. Returns true when the
    /// confirmation has lingered long enough and the owning panel
    /// should dismiss.
    pub fn tick(&mut self) -> bool {
        match self.phase {
            DownloadPhase::PickQuality => false,
            DownloadPhase::Downloading => {
                self.progress += fastrand::f32() * 15.0;
                if self.progress >= 100.0 {
                    self.progress = 100.0;
                    self.phase = DownloadPhase::Complete;
                    self.linger = COMPLETE_LINGER_TICKS;
                }
                false
            }
            DownloadPhase::Complete => {
                self.linger = self.linger.saturating_sub(1);
                if self.linger == 0 {
                    self.reset();
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.phase = DownloadPhase::PickQuality;
        self.progress = 0.0;
        self.linger = 0;
    }
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}
