//! User configuration: navigator thresholds, page behaviour and key
//! bindings.
//!
//! Stored as TOML at `$XDG_CONFIG_HOME/market-nav/config.toml` (default
//! `~/.config/market-nav/config.toml`).  Every field is optional; missing
//! ones take their defaults.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::core::navigator::NavConfig;
use crate::error::ConfigError;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    PrevCategory,
    NextCategory,
    BarLeft,
    BarRight,
    Help,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help overlay).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::Top,
        Action::Bottom,
        Action::PrevCategory,
        Action::NextCategory,
        Action::BarLeft,
        Action::BarRight,
        Action::Help,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::ScrollUp => "Scroll Up",
            Action::ScrollDown => "Scroll Down",
            Action::PageUp => "Page Up",
            Action::PageDown => "Page Down",
            Action::Top => "Top of Page",
            Action::Bottom => "Bottom of Page",
            Action::PrevCategory => "Previous Market",
            Action::NextCategory => "Next Market",
            Action::BarLeft => "Scroll Bar Left",
            Action::BarRight => "Scroll Bar Right",
            Action::Help => "Toggle Help",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::PrevCategory => "prev_category",
            Action::NextCategory => "next_category",
            Action::BarLeft => "bar_left",
            Action::BarRight => "bar_right",
            Action::Help => "help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    const MASK: KeyModifiers = KeyModifiers::CONTROL
        .union(KeyModifiers::ALT)
        .union(KeyModifiers::SHIFT);

    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & Self::MASK) == (event.modifiers & Self::MASK)
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// User-friendly display string (e.g. `"Shift+→"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            _ => self.key_name(),
        };
        format!("{}{key}", self.modifier_prefix())
    }

    /// Serialise to config-file format (e.g. `"Shift+Right"`, `"q"`).
    fn to_config_string(&self) -> String {
        format!("{}{}", self.modifier_prefix(), self.key_name())
    }

    fn key_name(&self) -> String {
        match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// Parse a key string like `"Ctrl+c"`, `"Shift+Left"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── page ──────────────

/// Page scrolling and rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Rows moved per scroll key / wheel notch.
    pub scroll_step: f64,
    /// Ease-out damping for page scrolling, `0.05..=0.95`.
    pub smooth_speed: f64,
    /// Terminals narrower than this show the compact section headers.
    pub mobile_breakpoint: u16,
    /// Frame interval of the render loop.
    pub frame_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_step: 3.0,
            smooth_speed: 0.35,
            mobile_breakpoint: 100,
            frame_ms: 16,
        }
    }
}

// ───────────────────────────────────────── config ────────────

/// On-disk shape.  Key bindings stay strings until validated.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    navigator: NavConfig,
    page: PageConfig,
    keys: BTreeMap<String, Vec<String>>,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub navigator: NavConfig,
    pub page: PageConfig,
    pub bindings: HashMap<Action, Vec<KeyBind>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            navigator: NavConfig::default(),
            page: PageConfig::default(),
            bindings: Self::default_bindings(),
        }
    }
}

impl AppConfig {
    /// Built-in key bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n), KeyBind::new(Char('b'), n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(Top, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Bottom, vec![KeyBind::new(End, n)]);
        m.insert(PrevCategory, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(NextCategory, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(BarLeft, vec![KeyBind::new(Left, shift), KeyBind::new(Char(','), n)]);
        m.insert(BarRight, vec![KeyBind::new(Right, shift), KeyBind::new(Char('.'), n)]);
        m.insert(Help, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When several bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<(Action, u32)> = None;
        for (&action, binds) in &self.bindings {
            for bind in binds.iter().filter(|b| b.matches(event)) {
                let count = bind.modifiers.bits().count_ones();
                if best.map_or(true, |(_, c)| count > c) {
                    best = Some((action, count));
                }
            }
        }
        best.map(|(action, _)| action)
    }

    /// Format the binding list for a given action (e.g. `"↑/k"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Status-bar hint built from the current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}/{}: market | {}: help | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::PrevCategory),
            self.short_binding(Action::NextCategory),
            self.short_binding(Action::Help),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load from `path`, or from the default location.  A missing file at
    /// the default location yields the defaults; an explicit path must
    /// exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path(), false),
        };
        if !required && !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Self::parse(&text, &path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut bindings = Self::default_bindings();
        for (name, keys) in &file.keys {
            let Some(action) = Action::from_config_key(name) else {
                tracing::warn!("config: unknown action `{name}`");
                continue;
            };
            let parsed: Vec<KeyBind> = keys
                .iter()
                .filter_map(|k| {
                    let bind = KeyBind::parse(k.trim());
                    if bind.is_none() {
                        tracing::warn!("config: cannot parse key `{k}` for `{name}`");
                    }
                    bind
                })
                .collect();
            if !parsed.is_empty() {
                bindings.insert(action, parsed);
            }
        }

        Ok(Self {
            navigator: file.navigator,
            page: file.page,
            bindings,
        })
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        let keys = Action::ALL
            .iter()
            .filter_map(|&action| {
                let binds = self.bindings.get(&action)?;
                let keys = binds.iter().map(KeyBind::to_config_string).collect();
                Some((action.config_key().to_string(), keys))
            })
            .collect();
        let file = ConfigFile {
            navigator: self.navigator.clone(),
            page: self.page.clone(),
            keys,
        };
        Ok(toml::to_string_pretty(&file)?)
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/market-nav/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("market-nav").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::parse("", Path::new("test.toml")).unwrap();
        assert_eq!(config.navigator, NavConfig::default());
        assert_eq!(config.page, PageConfig::default());
        assert_eq!(config.bindings, AppConfig::default_bindings());
    }

    #[test]
    fn partial_sections_override_only_given_fields() {
        let text = r#"
            [navigator]
            throttle_ms = 80
            boundary_band = 4.5

            [page]
            mobile_breakpoint = 60

            [keys]
            quit = ["Ctrl+q"]
            next_category = ["Tab", "nonsense+x"]
            not_an_action = ["z"]
        "#;
        let config = AppConfig::parse(text, Path::new("test.toml")).unwrap();
        assert_eq!(config.navigator.throttle_ms, 80);
        assert_eq!(config.navigator.boundary_band, 4.5);
        assert_eq!(config.navigator.header_height, NavConfig::default().header_height);
        assert_eq!(config.page.mobile_breakpoint, 60);

        assert_eq!(
            config.match_key(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(config.match_key(key(KeyCode::Char('q'), KeyModifiers::NONE)), None);
        assert_eq!(
            config.match_key(key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Action::NextCategory)
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let err = AppConfig::parse("[navigator]\nthrottle_ms = \"fast\"", Path::new("bad.toml"));
        assert!(matches!(err, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn shift_arrow_beats_plain_arrow() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::Left, KeyModifiers::SHIFT)),
            Some(Action::BarLeft)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Left, KeyModifiers::NONE)),
            Some(Action::PrevCategory)
        );
    }

    #[test]
    fn key_strings_parse() {
        assert_eq!(
            KeyBind::parse("Ctrl+c"),
            Some(KeyBind::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            KeyBind::parse("shift+RIGHT"),
            Some(KeyBind::new(KeyCode::Right, KeyModifiers::SHIFT))
        );
        assert_eq!(KeyBind::parse("F5"), Some(KeyBind::new(KeyCode::F(5), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("?"), Some(KeyBind::new(KeyCode::Char('?'), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("Hyper+x"), None);
        assert_eq!(KeyBind::parse("banana"), None);
    }

    #[test]
    fn status_hint_reflects_rebound_keys() {
        assert_eq!(
            AppConfig::default().status_bar_hint(),
            "↑/↓: scroll | ←/→: market | ?: help | q: quit"
        );
        let config = AppConfig::parse("[keys]\nquit = [\"x\"]", Path::new("k.toml")).unwrap();
        assert!(config.status_bar_hint().ends_with("x: quit"));
    }

    #[test]
    fn effective_config_survives_toml_rendering() {
        let mut config = AppConfig::default();
        config.navigator.bar_height = 5.0;
        let text = config.to_toml().unwrap();
        let back = AppConfig::parse(&text, Path::new("x.toml")).unwrap();
        assert_eq!(back.navigator.bar_height, 5.0);
        assert_eq!(back.bindings, config.bindings);
    }
}
