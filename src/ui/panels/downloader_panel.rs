use crate::app::App;
use crate::downloader::{DownloadPhase, QUALITIES};
use crate::theme::color;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph},
    Frame,
};

/// Bottom-docked media downloader modal.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.theme.active_palette();
    let strings = app.strings();

    let height = 10.min(area.height);
    let width = 48.min(area.width);
    let modal = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + area.height - height,
        width,
        height,
    );

    f.render_widget(Clear, modal);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color(palette.primary)))
        .title(format!(" {} ", strings.dl_title))
        .title_alignment(Alignment::Center);
    let inner = block.inner(modal);
    f.render_widget(block, modal);

    match app.downloader.phase() {
        DownloadPhase::PickQuality => quality_list(f, inner, app),
        DownloadPhase::Downloading => progress(f, inner, app),
        DownloadPhase::Complete => done(f, inner, app),
    }
}

fn quality_list(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.theme.active_palette();
    let strings = app.strings();

    let mut items = vec![ListItem::new(Line::from(Span::styled(
        strings.dl_detect,
        Style::default().fg(color(palette.accent)),
    )))];
    for (i, quality) in QUALITIES.iter().enumerate() {
        let style = if app.downloader.selected() == i {
            Style::default()
                .fg(color(palette.primary))
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default()
        };
        items.push(ListItem::new(Line::from(Span::styled(
            format!("  {} ({})", quality.label, quality.size),
            style,
        ))));
    }
    items.push(ListItem::new(Line::from(Span::styled(
        format!("  ENTER {} • ESC {}", strings.dl_start, strings.dl_cancel),
        Style::default().fg(color(palette.glow)),
    ))));

    f.render_widget(List::new(items), area);
}

fn progress(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.theme.active_palette();
    let bar = Gauge::default()
        .gauge_style(Style::default().fg(color(palette.primary)))
        .percent(app.downloader.progress())
        .label(format!(
            "{} {}%",
            app.downloader.selected_quality().label,
            app.downloader.progress()
        ));
    f.render_widget(bar, area);
}

fn done(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.theme.active_palette();
    let body = Paragraph::new(Line::from(Span::styled(
        app.strings().dl_done,
        Style::default()
            .fg(color(palette.primary))
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(body, area);
}
