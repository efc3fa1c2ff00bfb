use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// How long a palette stays active while the chameleon rotation runs.
pub const ROTATION_INTERVAL: Duration = Duration::from_secs(8);

/// Four-color set driving every themed surface in the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub id: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub glow: &'static str,
}

/// Fixed registry, populated at compile time and never mutated.
pub const PALETTES: [Palette; 7] = [
    Palette {
        id: "moonlight",
        primary: "#3b82f6",
        secondary: "#1d4ed8",
        accent: "#94a3b8",
        glow: "#1d417b",
    },
    Palette {
        id: "desert",
        primary: "#f59e0b",
        secondary: "#b45309",
        accent: "#fcd34d",
        glow: "#7a4f05",
    },
    Palette {
        id: "forest",
        primary: "#10b981",
        secondary: "#047857",
        accent: "#6ee7b7",
        glow: "#085c40",
    },
    Palette {
        id: "royal",
        primary: "#8b5cf6",
        secondary: "#6d28d9",
        accent: "#c4b5fd",
        glow: "#452e7b",
    },
    Palette {
        id: "aurora",
        primary: "#2dd4bf",
        secondary: "#0d9488",
        accent: "#99f6e4",
        glow: "#166a5f",
    },
    Palette {
        id: "neon",
        primary: "#f472b6",
        secondary: "#db2777",
        accent: "#f9a8d4",
        glow: "#7a395b",
    },
    Palette {
        id: "sunset",
        primary: "#ef4444",
        secondary: "#991b1b",
        accent: "#fca5a5",
        glow: "#772222",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Moonlight,
    Desert,
    Forest,
    Royal,
    Aurora,
    Neon,
    Sunset,
    /// Reserved for user-defined palettes; currently degrades to moonlight.
    Custom,
    /// Auto-rotates through the registry on a fixed interval.
    Chameleon,
}

impl ThemeMode {
    /// Registry index for fixed modes, None for chameleon/custom.
    fn registry_index(self) -> Option<usize> {
        match self {
            ThemeMode::Moonlight => Some(0),
            ThemeMode::Desert => Some(1),
            ThemeMode::Forest => Some(2),
            ThemeMode::Royal => Some(3),
            ThemeMode::Aurora => Some(4),
            ThemeMode::Neon => Some(5),
            ThemeMode::Sunset => Some(6),
            ThemeMode::Custom | ThemeMode::Chameleon => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Moonlight => "MOONLIGHT",
            ThemeMode::Desert => "DESERT",
            ThemeMode::Forest => "FOREST",
            ThemeMode::Royal => "ROYAL",
            ThemeMode::Aurora => "AURORA",
            ThemeMode::Neon => "NEON",
            ThemeMode::Sunset => "SUNSET",
            ThemeMode::Custom => "CUSTOM",
            ThemeMode::Chameleon => "CHAMELEON",
        }
    }

    /// Modes offered in the settings panel, chameleon first.
    pub fn selectable() -> [ThemeMode; 8] {
        [
            ThemeMode::Chameleon,
            ThemeMode::Moonlight,
            ThemeMode::Desert,
            ThemeMode::Forest,
            ThemeMode::Royal,
            ThemeMode::Aurora,
            ThemeMode::Neon,
            ThemeMode::Sunset,
        ]
    }
}

/// Pure lookup: fixed modes map to their registry entry, everything
/// else falls back to moonlight.
pub fn palette_for(mode: ThemeMode) -> Palette {
    match mode.registry_index() {
        Some(i) => PALETTES[i],
        None => PALETTES[0],
    }
}

/// Parses a `#rrggbb` string into a terminal color. Unparseable input
/// renders white rather than failing.
pub fn color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return Color::White;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).unwrap_or(0xff);
    Color::Rgb(channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6]))
}

/// Owns the current theme mode and the derived active palette.
///
/// Rotation is tick-driven off the shell's event loop: entering
/// chameleon arms a single deadline, `tick` advances the rotation when
/// it elapses, and leaving chameleon disarms it. There is never more
/// than one armed deadline per engine.
pub struct ThemeEngine {
    mode: ThemeMode,
    active: Palette,
    rotate_index: usize,
    next_rotation: Option<Instant>,
}

impl ThemeEngine {
    pub fn new(mode: ThemeMode) -> Self {
        let mut engine = Self {
            mode: ThemeMode::Moonlight,
            active: PALETTES[0],
            rotate_index: 0,
            next_rotation: None,
        };
        if mode != ThemeMode::Moonlight {
            engine.set_mode(mode);
        }
        engine
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Never fails: there is always a valid active palette, even
    /// transiently during mode switches.
    pub fn active_palette(&self) -> Palette {
        self.active
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        if mode == self.mode {
            // Re-entering chameleon must not rearm the deadline.
            return;
        }
        self.mode = mode;
        match mode.registry_index() {
            Some(i) => {
                self.active = PALETTES[i];
                self.rotate_index = i;
                self.next_rotation = None;
            }
            None if mode == ThemeMode::Chameleon => {
                // Keep the current palette until the first rotation lands.
                self.next_rotation = Some(Instant::now() + ROTATION_INTERVAL);
            }
            None => {
                self.active = palette_for(mode);
                self.rotate_index = 0;
                self.next_rotation = None;
            }
        }
    }

    /// Advances the chameleon rotation when its deadline has elapsed.
    /// A no-op in fixed modes.
    pub fn tick(&mut self, now: Instant) {
        let Some(deadline) = self.next_rotation else {
            return;
        };
        if now < deadline {
            return;
        }
        self.rotate_index = (self.rotate_index + 1) % PALETTES.len();
        self.active = PALETTES[self.rotate_index];
        self.next_rotation = Some(now + ROTATION_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fixed_mode_maps_to_registry_entry() {
        let mut engine = ThemeEngine::new(ThemeMode::Moonlight);
        engine.set_mode(ThemeMode::Desert);
        assert_eq!(engine.active_palette(), PALETTES[1]);
    }

    #[test]
    fn fixed_mode_round_trip_is_pure() {
        let mut engine = ThemeEngine::new(ThemeMode::Moonlight);
        let first = engine.active_palette();
        engine.set_mode(ThemeMode::Sunset);
        engine.set_mode(ThemeMode::Moonlight);
        assert_eq!(engine.active_palette(), first);
    }

    #[test]
    fn custom_mode_degrades_to_moonlight() {
        let mut engine = ThemeEngine::new(ThemeMode::Forest);
        engine.set_mode(ThemeMode::Custom);
        assert_eq!(engine.active_palette(), PALETTES[0]);
    }

    #[test]
    fn chameleon_rotates_after_interval() {
        let mut engine = ThemeEngine::new(ThemeMode::Moonlight);
        engine.set_mode(ThemeMode::Chameleon);
        let start = engine.active_palette();

        engine.tick(Instant::now());
        assert_eq!(engine.active_palette(), start, "no rotation before the interval");

        engine.tick(Instant::now() + ROTATION_INTERVAL + Duration::from_secs(1));
        assert_eq!(engine.active_palette(), PALETTES[1]);
    }

    #[test]
    fn rotation_wraps_around_the_registry() {
        let mut engine = ThemeEngine::new(ThemeMode::Sunset);
        engine.set_mode(ThemeMode::Chameleon);
        engine.tick(Instant::now() + ROTATION_INTERVAL + Duration::from_secs(1));
        assert_eq!(engine.active_palette(), PALETTES[0]);
    }

    #[test]
    fn leaving_chameleon_cancels_the_pending_rotation() {
        let mut engine = ThemeEngine::new(ThemeMode::Moonlight);
        engine.set_mode(ThemeMode::Chameleon);
        engine.set_mode(ThemeMode::Moonlight);

        // A late tick must not apply the canceled rotation step.
        engine.tick(Instant::now() + ROTATION_INTERVAL * 2);
        assert_eq!(engine.active_palette(), PALETTES[0]);
    }

    #[test]
    fn reentering_chameleon_is_idempotent() {
        let mut engine = ThemeEngine::new(ThemeMode::Moonlight);
        engine.set_mode(ThemeMode::Chameleon);
        engine.set_mode(ThemeMode::Chameleon);

        engine.tick(Instant::now() + ROTATION_INTERVAL + Duration::from_secs(1));
        assert_eq!(
            engine.active_palette(),
            PALETTES[1],
            "exactly one rotation step per elapsed interval"
        );
    }

    #[test]
    fn active_palette_is_always_a_registry_value() {
        let mut engine = ThemeEngine::new(ThemeMode::Moonlight);
        for mode in [
            ThemeMode::Chameleon,
            ThemeMode::Neon,
            ThemeMode::Custom,
            ThemeMode::Aurora,
            ThemeMode::Chameleon,
        ] {
            engine.set_mode(mode);
            assert!(PALETTES.contains(&engine.active_palette()));
        }
    }

    #[test]
    fn hex_colors_parse_to_rgb() {
        assert_eq!(color("#3b82f6"), Color::Rgb(0x3b, 0x82, 0xf6));
        assert_eq!(color("not-a-color"), Color::White);
    }
}
