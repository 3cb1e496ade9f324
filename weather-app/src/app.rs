//! UI state and the key-driven state machine.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{info, warn};
use weather_core::{Config, ConfigError, ThemePreset, WeatherError, WeatherResult, theme_for};

use crate::effect::Effect;

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Idle,
    Loading { city: String },
    Result { city: String, weather: WeatherResult, theme: ThemePreset },
    Error { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    City,
    ApiKey,
    Favorites,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::City => Focus::ApiKey,
            Focus::ApiKey => Focus::Favorites,
            Focus::Favorites => Focus::City,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::City => Focus::Favorites,
            Focus::ApiKey => Focus::City,
            Focus::Favorites => Focus::ApiKey,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub screen: Screen,
    pub focus: Focus,
    pub city_input: String,
    pub key_input: String,
    pub selected_favorite: usize,
    /// One-line feedback for config writes and startup problems.
    pub status: Option<String>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let key_input = config.api_key.clone();
        let focus = if config.api_key().is_some() { Focus::City } else { Focus::ApiKey };

        Self {
            config,
            screen: Screen::Idle,
            focus,
            city_input: String::new(),
            key_input,
            selected_favorite: 0,
            status: None,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.screen, Screen::Loading { .. })
    }

    pub fn theme(&self) -> ThemePreset {
        match &self.screen {
            Screen::Result { theme, .. } => *theme,
            _ => ThemePreset::Default,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Some(Effect::Quit),
            KeyCode::Char('c') if ctrl => return Some(Effect::Quit),
            KeyCode::Char('f') if ctrl => return self.favorite_current(),
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::City => match key.code {
                KeyCode::Enter => {
                    let city = self.city_input.clone();
                    self.submit_search(&city)
                }
                code => {
                    edit_text(&mut self.city_input, code, ctrl);
                    None
                }
            },
            Focus::ApiKey => match key.code {
                KeyCode::Enter => self.save_api_key(),
                code => {
                    edit_text(&mut self.key_input, code, ctrl);
                    None
                }
            },
            Focus::Favorites => self.handle_favorites_key(key.code),
        }
    }

    fn handle_favorites_key(&mut self, code: KeyCode) -> Option<Effect> {
        let len = self.config.favorites.len();
        match code {
            KeyCode::Up if self.selected_favorite > 0 => {
                self.selected_favorite -= 1;
                None
            }
            KeyCode::Down if self.selected_favorite + 1 < len => {
                self.selected_favorite += 1;
                None
            }
            KeyCode::Enter => {
                let city = self.config.favorites.get(self.selected_favorite)?.clone();
                self.city_input = city.clone();
                self.submit_search(&city)
            }
            KeyCode::Delete | KeyCode::Char('d') => self.remove_selected_favorite(),
            _ => None,
        }
    }

    /// Start a lookup, unless one is already running or the input can't be sent.
    pub fn submit_search(&mut self, city: &str) -> Option<Effect> {
        if self.is_loading() {
            return None;
        }

        let city = city.trim();
        if city.is_empty() {
            self.screen = Screen::Error { message: WeatherError::EmptyCity.to_string() };
            return None;
        }

        let Some(api_key) = self.config.api_key() else {
            warn!("search attempted without an API key");
            self.screen = Screen::Error { message: WeatherError::InvalidKey.to_string() };
            return None;
        };

        info!(city, "search submitted");
        let effect = Effect::Fetch { city: city.to_string(), api_key: api_key.to_string() };
        self.screen = Screen::Loading { city: city.to_string() };
        Some(effect)
    }

    pub fn on_fetch_complete(&mut self, result: Result<WeatherResult, WeatherError>) {
        let city = match &self.screen {
            Screen::Loading { city } => city.clone(),
            _ => return,
        };

        self.screen = match result {
            Ok(weather) => {
                let theme = theme_for(&weather.condition);
                Screen::Result { city, weather, theme }
            }
            Err(e) => {
                warn!(city = %city, error = %e, "search failed");
                Screen::Error { message: e.to_string() }
            }
        };
    }

    pub fn on_save_complete(&mut self, result: Result<(), ConfigError>) {
        match result {
            Ok(()) => self.set_status("Settings saved."),
            Err(e) => {
                warn!(error = %e, "config save failed");
                self.set_status(format!("Could not save settings: {e}"));
            }
        }
    }

    fn save_api_key(&mut self) -> Option<Effect> {
        if self.key_input.trim().is_empty() {
            self.key_input = self.config.api_key.clone();
            self.set_status("API key field is empty.");
            return None;
        }

        self.config.set_api_key(&self.key_input);
        self.key_input = self.config.api_key.clone();
        self.focus = Focus::City;

        Some(Effect::SaveConfig(self.config.clone()))
    }

    fn favorite_current(&mut self) -> Option<Effect> {
        let Screen::Result { city, weather, .. } = &self.screen else {
            self.set_status("Search for a city before adding it to favorites.");
            return None;
        };
        // Favorites hold the provider's city name, not the typed query.
        let city = if weather.city_name.trim().is_empty() { city } else { &weather.city_name };
        let city = city.clone();

        if !self.config.add_favorite(&city) {
            self.set_status(format!("{city} is already a favorite."));
            return None;
        }

        Some(Effect::SaveConfig(self.config.clone()))
    }

    fn remove_selected_favorite(&mut self) -> Option<Effect> {
        let city = self.config.favorites.get(self.selected_favorite)?.clone();
        self.config.remove_favorite(&city);

        let len = self.config.favorites.len();
        if self.selected_favorite >= len {
            self.selected_favorite = len.saturating_sub(1);
        }

        Some(Effect::SaveConfig(self.config.clone()))
    }
}

fn edit_text(buf: &mut String, code: KeyCode, ctrl: bool) {
    match code {
        KeyCode::Char(c) if !ctrl => buf.push(c),
        KeyCode::Char('u') if ctrl => buf.clear(),
        KeyCode::Backspace => {
            buf.pop();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            assert_eq!(app.handle_key(press(KeyCode::Char(c))), None);
        }
    }

    fn configured_app() -> App {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY");
        App::new(cfg)
    }

    fn paris() -> WeatherResult {
        WeatherResult {
            city_name: "Paris".into(),
            location: "Paris, FR".into(),
            temperature: 14.2,
            feels_like: 13.6,
            condition: "Rain".into(),
            description: "light rain".into(),
            icon_ref: "10d".into(),
            humidity: 82,
            wind_speed: 4.6,
            observed_at: Utc::now(),
        }
    }

    #[test]
    fn starts_on_key_input_without_key() {
        let app = App::new(Config::default());
        assert_eq!(app.focus, Focus::ApiKey);
        assert_eq!(app.screen, Screen::Idle);
        assert_eq!(configured_app().focus, Focus::City);
    }

    #[test]
    fn search_without_key_errors_without_fetch() {
        let mut app = App::new(Config::default());
        app.focus = Focus::City;
        type_text(&mut app, "Paris");

        assert_eq!(app.handle_key(press(KeyCode::Enter)), None);
        assert_eq!(
            app.screen,
            Screen::Error { message: WeatherError::InvalidKey.to_string() }
        );
    }

    #[test]
    fn blank_city_is_rejected() {
        let mut app = configured_app();
        type_text(&mut app, "   ");

        assert_eq!(app.handle_key(press(KeyCode::Enter)), None);
        assert!(matches!(app.screen, Screen::Error { .. }));
    }

    #[test]
    fn search_moves_to_loading_and_requests_fetch() {
        let mut app = configured_app();
        type_text(&mut app, " Paris ");

        let effect = app.handle_key(press(KeyCode::Enter));
        assert_eq!(
            effect,
            Some(Effect::Fetch { city: "Paris".into(), api_key: "KEY".into() })
        );
        assert_eq!(app.screen, Screen::Loading { city: "Paris".into() });
    }

    #[test]
    fn second_search_while_loading_is_ignored() {
        let mut app = configured_app();
        assert!(app.submit_search("Paris").is_some());
        assert!(app.submit_search("Oslo").is_none());
        assert_eq!(app.screen, Screen::Loading { city: "Paris".into() });
    }

    #[test]
    fn fetch_success_shows_result_with_theme() {
        let mut app = configured_app();
        app.submit_search("Paris");
        app.on_fetch_complete(Ok(paris()));

        assert_eq!(app.theme(), ThemePreset::Rain);
        assert!(matches!(&app.screen, Screen::Result { city, .. } if city == "Paris"));
    }

    #[test]
    fn fetch_failure_shows_message() {
        let mut app = configured_app();
        app.submit_search("Zzzzznotreal");
        app.on_fetch_complete(Err(WeatherError::CityNotFound("Zzzzznotreal".into())));

        assert_eq!(
            app.screen,
            Screen::Error { message: "City 'Zzzzznotreal' was not found.".into() }
        );
        assert_eq!(app.theme(), ThemePreset::Default);
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut app = configured_app();
        app.on_fetch_complete(Ok(paris()));
        assert_eq!(app.screen, Screen::Idle);
    }

    #[test]
    fn saving_key_persists_trimmed_key() {
        let mut app = App::new(Config::default());
        type_text(&mut app, " NEWKEY ");

        let effect = app.handle_key(press(KeyCode::Enter));
        let Some(Effect::SaveConfig(saved)) = effect else {
            panic!("expected save, got {effect:?}");
        };

        assert_eq!(saved.api_key(), Some("NEWKEY"));
        assert_eq!(app.focus, Focus::City);
    }

    #[test]
    fn empty_key_input_keeps_saved_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("GOODKEY");
        let mut app = App::new(cfg);
        app.focus = Focus::ApiKey;

        app.handle_key(ctrl('u'));
        assert_eq!(app.handle_key(press(KeyCode::Enter)), None);

        assert_eq!(app.config.api_key(), Some("GOODKEY"));
        assert_eq!(app.key_input, "GOODKEY");
        assert_eq!(app.status.as_deref(), Some("API key field is empty."));
    }

    #[test]
    fn favorite_current_result_once() {
        let mut app = configured_app();
        app.submit_search("Paris");
        app.on_fetch_complete(Ok(paris()));

        let effect = app.handle_key(ctrl('f'));
        assert!(matches!(effect, Some(Effect::SaveConfig(ref c)) if c.favorites == ["Paris"]));

        assert_eq!(app.handle_key(ctrl('f')), None);
        assert_eq!(app.config.favorites, vec!["Paris".to_string()]);
        assert!(app.status.as_deref().unwrap_or_default().contains("already"));
    }

    #[test]
    fn favorite_uses_resolved_city_name() {
        let mut app = configured_app();
        app.submit_search("paris,fr");
        app.on_fetch_complete(Ok(paris()));

        let effect = app.handle_key(ctrl('f'));
        assert!(matches!(effect, Some(Effect::SaveConfig(ref c)) if c.favorites == ["Paris"]));

        app.screen = Screen::Idle;
        app.submit_search("Paris");
        app.on_fetch_complete(Ok(paris()));

        assert_eq!(app.handle_key(ctrl('f')), None);
        assert_eq!(app.config.favorites, vec!["Paris".to_string()]);
    }

    #[test]
    fn favorite_requires_result() {
        let mut app = configured_app();
        assert_eq!(app.handle_key(ctrl('f')), None);
        assert!(app.config.favorites.is_empty());
    }

    #[test]
    fn favorites_navigation_search_and_remove() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY");
        cfg.add_favorite("Paris");
        cfg.add_favorite("Oslo");
        let mut app = App::new(cfg);

        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Favorites);

        app.handle_key(press(KeyCode::Down));
        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.selected_favorite, 1);

        let effect = app.handle_key(press(KeyCode::Enter));
        assert_eq!(effect, Some(Effect::Fetch { city: "Oslo".into(), api_key: "KEY".into() }));
        assert_eq!(app.city_input, "Oslo");

        let effect = app.handle_key(press(KeyCode::Delete));
        assert!(matches!(effect, Some(Effect::SaveConfig(ref c)) if c.favorites == ["Paris"]));
        assert_eq!(app.selected_favorite, 0);
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let mut app = configured_app();
        assert_eq!(app.handle_key(press(KeyCode::Esc)), Some(Effect::Quit));
        assert_eq!(app.handle_key(ctrl('c')), Some(Effect::Quit));
    }

    #[test]
    fn backspace_and_clear_edit_input() {
        let mut app = configured_app();
        type_text(&mut app, "Parisx");
        app.handle_key(press(KeyCode::Backspace));
        assert_eq!(app.city_input, "Paris");

        app.handle_key(ctrl('u'));
        assert!(app.city_input.is_empty());
    }

    #[test]
    fn save_failure_is_reported_in_status() {
        let mut app = configured_app();
        app.on_save_complete(Err(ConfigError::Io {
            path: "weather_app_config.json".into(),
            source: std::io::Error::other("disk full"),
        }));

        assert!(app.status.as_deref().unwrap_or_default().contains("Could not save"));
    }
}
