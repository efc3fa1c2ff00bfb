use crate::app::App;
use crate::i18n::Language;
use crate::theme::{color, ThemeMode};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding},
    Frame,
};

/// Full-screen command center: language grid and theme matrix, driven
/// by a single selection row.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.theme.active_palette();
    let strings = app.strings();

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color(palette.primary)))
        .title(" COMMAND CENTER ")
        .title_alignment(Alignment::Center)
        .padding(Padding::uniform(1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let selected = Style::default()
        .fg(color(palette.primary))
        .add_modifier(Modifier::BOLD | Modifier::REVERSED);
    let idle = Style::default();

    let languages = Language::all();
    let themes = ThemeMode::selectable();
    let mut items: Vec<ListItem> = Vec::new();

    items.push(section_header("LANGUAGE SOUL", palette.accent));
    for (i, lang) in languages.iter().enumerate() {
        let style = if app.settings_row == i { selected } else { idle };
        let marker = if app.config.language == *lang { "●" } else { "○" };
        items.push(ListItem::new(Line::from(Span::styled(
            format!("  {marker} {}", lang.label()),
            style,
        ))));
    }

    items.push(section_header("AESTHETIC MATRIX", palette.accent));
    for (i, mode) in themes.iter().enumerate() {
        let row = languages.len() + i;
        let style = if app.settings_row == row { selected } else { idle };
        let marker = if app.theme.mode() == *mode { "●" } else { "○" };
        let label = if *mode == ThemeMode::Chameleon {
            strings.chameleon
        } else {
            mode.label()
        };
        items.push(ListItem::new(Line::from(Span::styled(
            format!("  {marker} {label}"),
            style,
        ))));
    }

    items.push(ListItem::new(Line::from(Span::styled(
        "  ↑/↓ move • ENTER apply • ESC close",
        Style::default().fg(color(palette.glow)),
    ))));

    f.render_widget(List::new(items), inner);
}

fn section_header(title: &'static str, accent: &'static str) -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(
        title,
        Style::default()
            .fg(color(accent))
            .add_modifier(Modifier::BOLD),
    )))
}
