//! Rendering. Everything here reads `App`; nothing mutates it.

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph, Wrap},
};
use weather_core::{Rgb, ThemePreset, WeatherResult};

use crate::app::{App, Focus, Screen};

const ERROR_COLOR: Color = Color::LightRed;
const HELP: &str = "Enter search/save · Tab focus · Ctrl+F favorite · Del remove · Esc quit";

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.theme();
    let base = Style::default().bg(color(theme.background())).fg(color(theme.foreground()));
    frame.render_widget(Block::default().style(base), frame.area());

    let [title, inputs, body, status, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Line::from(format!(" Weather · theme: {theme}")).style(
            Style::default().fg(color(theme.accent())).add_modifier(Modifier::BOLD),
        ),
        title,
    );

    let [city_area, key_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(inputs);
    render_input(frame, app, city_area, Focus::City, "City", &app.city_input);
    let masked = "•".repeat(app.key_input.chars().count());
    render_input(frame, app, key_area, Focus::ApiKey, "API key", &masked);

    let [favorites_area, result_area] =
        Layout::horizontal([Constraint::Length(24), Constraint::Min(20)]).areas(body);
    render_favorites(frame, app, favorites_area);
    render_screen(frame, app, result_area);

    if let Some(message) = &app.status {
        frame.render_widget(Line::from(format!(" {message}")).italic(), status);
    }
    frame.render_widget(Line::from(format!(" {HELP}")).dim(), help);
}

fn panel<'a>(app: &App, focus: Focus, title: &'a str) -> Block<'a> {
    let theme = app.theme();
    let border = if app.focus == focus {
        Style::default().fg(color(theme.accent())).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    Block::bordered().title(format!(" {title} ")).border_style(border)
}

fn render_input(frame: &mut Frame, app: &App, area: Rect, focus: Focus, title: &str, text: &str) {
    frame.render_widget(Paragraph::new(text).block(panel(app, focus, title)), area);

    if app.focus == focus {
        let width = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(1).saturating_add(width).min(area.right().saturating_sub(2));
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn render_favorites(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> =
        app.config.favorites.iter().map(|city| ListItem::new(city.as_str())).collect();

    let block = panel(app, Focus::Favorites, "Favorites");
    if items.is_empty() {
        frame.render_widget(Paragraph::new("Ctrl+F adds a city").dim().block(block), area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(color(app.theme().accent())).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected_favorite));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_screen(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::bordered().title(" Current weather ");

    let lines = match &app.screen {
        Screen::Idle => vec![Line::from("Type a city and press Enter.")],
        Screen::Loading { city } => vec![Line::from(format!("Fetching weather for {city}…"))],
        Screen::Result { weather, theme, .. } => result_lines(weather, *theme),
        Screen::Error { message } => {
            vec![Line::from(Span::styled(message.as_str(), Style::default().fg(ERROR_COLOR)))]
        }
    };

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn result_lines(weather: &WeatherResult, theme: ThemePreset) -> Vec<Line<'static>> {
    let accent = Style::default().fg(color(theme.accent())).add_modifier(Modifier::BOLD);
    let observed = weather.observed_at.with_timezone(&Local).format("%H:%M");

    vec![
        Line::from(vec![
            Span::styled(format!("{} ", weather.icon_glyph()), accent),
            Span::styled(weather.location.clone(), accent),
        ]),
        Line::from(""),
        Line::from(format!("Temperature: {:.1} °C", weather.temperature)),
        Line::from(format!("Feels like:  {:.1} °C", weather.feels_like)),
        Line::from(format!("Conditions:  {}", weather.description)),
        Line::from(format!("Humidity:    {}%", weather.humidity)),
        Line::from(format!("Wind:        {:.1} m/s", weather.wind_speed)),
        Line::from(format!("Observed:    {observed}")).dim(),
        Line::from(format!("Icon:        {}", weather.icon_url())).dim(),
    ]
}
