use crate::app::App;
use crate::conversation::{ChatMode, ChatRole};
use crate::theme::color;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

/// Full-screen AI chat curtain: transcript, loading indicator, mode
/// switch, and the input line.
pub fn render(f: &mut Frame, area: Rect, app: &App, spinner: &'static str) {
    let palette = app.theme.active_palette();

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color(palette.primary)))
        .title(" USRA AI SOUL ")
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(inner);

    transcript(f, chunks[0], app, spinner);
    mode_bar(f, chunks[1], app);
    input_line(f, chunks[2], app);
}

fn transcript(f: &mut Frame, area: Rect, app: &App, spinner: &'static str) {
    let palette = app.theme.active_palette();
    let strings = app.strings();

    let visible = area.height as usize;
    let mut items: Vec<ListItem> = app
        .conversation
        .turns
        .iter()
        .rev()
        .take(visible.saturating_sub(1))
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .map(|turn| {
            let timestamp = turn.timestamp.format("%H:%M:%S").to_string();
            let (badge, badge_color) = match turn.role {
                ChatRole::User => ("you", color(palette.accent)),
                ChatRole::Model => ("usra", color(palette.primary)),
            };
            let mut spans = vec![
                Span::styled(
                    format!("[{timestamp}] {badge} "),
                    Style::default().fg(badge_color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(turn.text.clone()),
            ];
            if let Some(url) = &turn.image_url {
                spans.push(Span::styled(
                    format!("  ⇩ {url}"),
                    Style::default().fg(color(palette.glow)),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    if app.conversation.is_loading() {
        items.push(ListItem::new(Line::from(Span::styled(
            format!("{spinner} {}", strings.thinking),
            Style::default()
                .fg(color(palette.glow))
                .add_modifier(Modifier::ITALIC),
        ))));
    }

    f.render_widget(List::new(items), area);
}

fn mode_bar(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.theme.active_palette();
    let selected = Style::default()
        .fg(color(palette.primary))
        .add_modifier(Modifier::BOLD | Modifier::REVERSED);
    let idle = Style::default().fg(color(palette.glow));
    let (text_style, image_style) = match app.conversation.mode {
        ChatMode::Text => (selected, idle),
        ChatMode::Image => (idle, selected),
    };

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(" TEXT ", text_style),
        Span::raw("  "),
        Span::styled(" ART ", image_style),
        Span::styled(
            "   TAB switch • ^Y copy • ^L listen • ^S save",
            Style::default().fg(color(palette.glow)),
        ),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(bar, area);
}

fn input_line(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.theme.active_palette();
    let strings = app.strings();

    let placeholder = match app.conversation.mode {
        ChatMode::Text => strings.ask_placeholder,
        ChatMode::Image => strings.imagine_placeholder,
    };
    let content = if app.input.is_empty() {
        Line::from(Span::styled(
            placeholder,
            Style::default().fg(color(palette.glow)),
        ))
    } else {
        Line::from(vec![
            Span::raw(app.input.clone()),
            Span::styled("▏", Style::default().fg(color(palette.primary))),
        ])
    };

    let input = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color(palette.secondary))),
    );
    f.render_widget(input, area);
}
