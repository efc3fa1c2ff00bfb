use crate::app::{App, AppState};
use crate::orb::{ORB_HEIGHT, ORB_WIDTH};
use crate::panels::PanelId;
use crate::theme::color;
use crate::ui::panels::{ai_panel, downloader_panel, settings_panel};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Padding, Paragraph},
    Frame,
};
use std::time::Instant;

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Renders whichever screen the gating state machine is in, then the
/// overlay stack on top of the shell.
pub struct Layout {
    spinner_frame: usize,
}

impl Layout {
    pub fn new() -> Self {
        Self { spinner_frame: 0 }
    }

    pub fn render(&mut self, f: &mut Frame, app: &App, now: Instant) {
        f.render_widget(Clear, f.area());

        match app.state {
            AppState::Splash => self.splash(f, app, now),
            AppState::KeyGate => self.key_gate(f, app),
            AppState::Launch => self.launch(f, app),
            AppState::Shell | AppState::Exiting => self.shell(f, app),
        }

        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame]
    }

    fn splash(&self, f: &mut Frame, app: &App, now: Instant) {
        let palette = app.theme.active_palette();
        let area = centered(f.area(), 44, 9);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color(palette.primary)))
            .padding(Padding::horizontal(2));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("F ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                "NJADI™",
                Style::default()
                    .fg(color(palette.primary))
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(title, rows[0]);

        let subtitle = Paragraph::new("ALGERIAN SOUL • AI DRIVEN")
            .style(Style::default().fg(color(palette.accent)))
            .alignment(Alignment::Center);
        f.render_widget(subtitle, rows[1]);

        let bar = Gauge::default()
            .gauge_style(Style::default().fg(color(palette.primary)))
            .ratio(app.splash_progress(now))
            .label("");
        f.render_widget(bar, rows[2]);
    }

    fn key_gate(&self, f: &mut Frame, app: &App) {
        let palette = app.theme.active_palette();
        let area = centered(f.area(), 52, 10);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color(palette.primary)))
            .title(" SECURITY PROTOCOL ")
            .title_alignment(Alignment::Center)
            .padding(Padding::uniform(1));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let masked = "•".repeat(app.key_input.chars().count());
        let mut lines = vec![
            Line::from(app.strings().welcome),
            Line::from(""),
            Line::from(vec![
                Span::raw("API key: "),
                Span::styled(masked, Style::default().fg(color(palette.accent))),
                Span::styled("▏", Style::default().fg(color(palette.primary))),
            ]),
        ];
        if app.gate_notice {
            lines.push(Line::from(Span::styled(
                "A key is required to continue, try again",
                Style::default().fg(color(palette.secondary)),
            )));
        }
        lines.push(Line::from(Span::styled(
            "ENTER to activate",
            Style::default().fg(color(palette.glow)),
        )));

        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }

    fn launch(&self, f: &mut Frame, app: &App) {
        let palette = app.theme.active_palette();
        let area = centered(f.area(), 44, 8);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color(palette.glow)));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let body = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "A C C E S S   G R A N T E D",
                Style::default()
                    .fg(color(palette.primary))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "press ENTER to initiate session",
                Style::default().fg(color(palette.accent)),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(body, inner);
    }

    fn shell(&self, f: &mut Frame, app: &App) {
        let palette = app.theme.active_palette();

        // Dynamic border glow around the whole shell.
        let frame_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color(palette.primary)));
        let inner = frame_block.inner(f.area());
        f.render_widget(frame_block, f.area());

        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        self.top_bar(f, chunks[0], app);
        self.webview_placeholder(f, chunks[1], app);
        self.nav_bar(f, chunks[2], app);

        // Overlay stack, bottom-up.
        if app.panels.is_open(PanelId::Downloader) {
            downloader_panel::render(f, inner, app);
        }
        if app.panels.is_open(PanelId::Settings) {
            settings_panel::render(f, inner, app);
        }
        if app.panels.is_open(PanelId::Ai) {
            ai_panel::render(f, inner, app, self.spinner());
        }

        if !app.panels.fullscreen_active() {
            self.orb(f, app);
        }
    }

    fn top_bar(&self, f: &mut Frame, area: Rect, app: &App) {
        let palette = app.theme.active_palette();
        let tag = crate::shield::short_tag(app.user_agent);

        let bar = Paragraph::new(Line::from(vec![
            Span::styled("● ", Style::default().fg(color("#22c55e"))),
            Span::styled(
                "SHIELD ACTIVE",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  IP: MASKED • UA: "),
            Span::styled(tag, Style::default().fg(color(palette.accent))),
            Span::raw("   "),
            Span::styled(
                "F NJADI",
                Style::default()
                    .fg(color(palette.primary))
                    .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            ),
        ]));
        f.render_widget(bar, area);
    }

    fn webview_placeholder(&self, f: &mut Frame, area: Rect, app: &App) {
        let palette = app.theme.active_palette();
        let body = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Initializing secure bridge to the social hub...",
                Style::default().fg(color(palette.accent)),
            )),
            Line::from(Span::styled(
                "(embedded frame renders here in production builds)",
                Style::default().fg(color(palette.glow)),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(body, area);
    }

    fn nav_bar(&self, f: &mut Frame, area: Rect, app: &App) {
        let palette = app.theme.active_palette();
        let strings = app.strings();
        let bar = Paragraph::new(Line::from(vec![
            Span::styled("[a] ", Style::default().fg(color(palette.primary))),
            Span::raw(strings.ai_prompt),
            Span::styled("  [d] ", Style::default().fg(color(palette.primary))),
            Span::raw(strings.download),
            Span::styled("  [s] ", Style::default().fg(color(palette.primary))),
            Span::raw(strings.settings),
            Span::styled("  [q] ", Style::default().fg(color(palette.primary))),
            Span::raw("exit"),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(bar, area);
    }

    fn orb(&self, f: &mut Frame, app: &App) {
        let palette = app.theme.active_palette();
        let frame = f.area();
        let (ox, oy) = app.orb.position();

        // Clip the unclamped position to the visible frame.
        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (ox + i32::from(ORB_WIDTH)).min(i32::from(frame.width));
        let y1 = (oy + i32::from(ORB_HEIGHT)).min(i32::from(frame.height));
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        let area = Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16);

        let glyph = if app.conversation.is_loading() {
            self.spinner()
        } else {
            "✦"
        };
        let orb = Paragraph::new(Line::from(Span::styled(
            glyph,
            Style::default()
                .fg(color(palette.primary))
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color(palette.glow))),
        );
        f.render_widget(Clear, area);
        f.render_widget(orb, area);
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

/// A centered rect of at most the given size within `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside_the_area() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered(area, 44, 9);
        assert_eq!(rect.width, 44);
        assert_eq!(rect.height, 9);
        assert!(rect.x + rect.width <= 80);
        assert!(rect.y + rect.height <= 24);
    }

    #[test]
    fn centered_rect_clamps_to_small_areas() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered(area, 44, 9);
        assert_eq!((rect.width, rect.height), (20, 5));
    }
}
