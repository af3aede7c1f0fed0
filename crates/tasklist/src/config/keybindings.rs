//! Keybindings configuration for the TUI.

use anyhow::{Context, Result, anyhow, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

macro_rules! vec_of_strings {
    ($($s:expr),* $(,)?) => {
        vec![$($s.to_string()),*]
    };
}

/// Top-level user configuration for tasklist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// TUI configuration.
    pub tui: TuiConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Keybindings configuration.
    pub keybindings: KeyBindingsConfig,
}

/// Keybindings configuration for all TUI views.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyBindingsConfig {
    /// Keybindings while browsing the list.
    pub browse: BrowseKeyBindings,
    /// Keybindings while typing a new task or editing a task's text.
    pub input: InputKeyBindings,
}

/// Keybindings for the list view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseKeyBindings {
    /// Quit the application.
    pub quit: Vec<String>,
    /// Move down in the list.
    pub down: Vec<String>,
    /// Move up in the list.
    pub up: Vec<String>,
    /// Focus the add form.
    pub add: Vec<String>,
    /// Edit the selected task's text.
    pub edit: Vec<String>,
    /// Flip the selected task's checkbox.
    pub toggle_checked: Vec<String>,
    /// Move the selected task into or out of the trash.
    pub toggle_removed: Vec<String>,
    /// Select the next display mode.
    pub next_filter: Vec<String>,
    /// Select the previous display mode.
    pub prev_filter: Vec<String>,
    /// Empty the trash.
    pub purge: Vec<String>,
}

/// Keybindings for the text input line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputKeyBindings {
    /// Commit the typed text.
    pub submit: Vec<String>,
    /// Leave the input line without committing.
    pub cancel: Vec<String>,
    /// Delete the last character.
    pub delete_char: Vec<String>,
}

impl Default for BrowseKeyBindings {
    fn default() -> Self {
        Self {
            quit: vec_of_strings!["q", "Esc"],
            down: vec_of_strings!["j", "Down"],
            up: vec_of_strings!["k", "Up"],
            add: vec_of_strings!["a", "i"],
            edit: vec_of_strings!["e", "Enter"],
            toggle_checked: vec_of_strings!["Space", "x"],
            toggle_removed: vec_of_strings!["d", "Delete"],
            next_filter: vec_of_strings!["Tab", "f"],
            prev_filter: vec_of_strings!["BackTab", "F"],
            purge: vec_of_strings!["P"],
        }
    }
}

impl Default for InputKeyBindings {
    fn default() -> Self {
        Self {
            submit: vec_of_strings!["Enter"],
            cancel: vec_of_strings!["Esc"],
            delete_char: vec_of_strings!["Backspace"],
        }
    }
}

/// Returns the default configuration file path.
///
/// On Linux: `~/.config/tasklist/config.toml`
/// On macOS: `~/Library/Application Support/tasklist/config.toml`
/// On Windows: `%APPDATA%\tasklist\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tasklist").join("config.toml"))
}

/// Generate default configuration as TOML string.
pub fn generate_default_config_toml() -> Result<String> {
    let config = Config::default();

    let toml_str = toml::to_string_pretty(&config).context("デフォルト設定のシリアライズに失敗しました")?;

    let header = r#"# tasklist Configuration
#
# [tui.keybindings]
# Each action can have multiple key bindings.
#
# Supported key formats:
# - Single characters: "j", "k", "a", "1"
# - Special keys: "Enter", "Esc", "Tab", "BackTab", "Space", "Backspace", "Delete"
# - Arrow keys: "Up", "Down", "Left", "Right"
# - Navigation keys: "Home", "End", "PageUp", "PageDown"
# - Modified keys: "Ctrl+d", "Alt+k", "Shift+Up"
#
# Note: When this file exists, ALL default keybindings are disabled.
# Make sure to define all actions you need.

"#;

    Ok(format!("{header}{toml_str}"))
}

/// Load configuration from a TOML file.
///
/// - `Ok(Some(config))` if the file exists and was successfully parsed
/// - `Ok(None)` if the file does not exist, or no config directory is known
/// - `Err(_)` if there was an error reading or parsing the file
pub fn load_config(path: Option<&Path>) -> Result<Option<Config>> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => return Ok(None),
        },
    };

    if !config_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

    Ok(Some(config))
}

/// Load and validate the keybindings, falling back to the defaults when no file exists.
pub fn load_keybindings(path: Option<&Path>) -> Result<KeyBindingsConfig> {
    match load_config(path)? {
        Some(config) => {
            validate_tui_config(&config.tui)?;
            Ok(config.tui.keybindings)
        }
        None => Ok(KeyBindingsConfig::default()),
    }
}

/// Parse a key string into a `KeyEvent`.
///
/// # Examples
/// - "j" -> `KeyCode::Char('j')`
/// - "Enter" -> `KeyCode::Enter`
/// - "Ctrl+d" -> `KeyCode::Char('d')` with CONTROL modifier
pub fn parse_key(s: &str) -> Result<KeyEvent> {
    let parts: Vec<&str> = s.split('+').collect();

    let Some((&key_part, modifier_parts)) = parts.split_last() else {
        bail!("Empty key string");
    };

    let mut modifiers = KeyModifiers::NONE;
    for &modifier in modifier_parts {
        match modifier {
            "Ctrl" | "Control" => modifiers |= KeyModifiers::CONTROL,
            "Alt" => modifiers |= KeyModifiers::ALT,
            "Shift" => modifiers |= KeyModifiers::SHIFT,
            other => bail!("Unknown modifier: {other}"),
        }
    }

    let code = parse_key_code(key_part)?;

    Ok(KeyEvent::new(code, modifiers))
}

fn parse_key_code(s: &str) -> Result<KeyCode> {
    match s {
        "Enter" => Ok(KeyCode::Enter),
        "Esc" => Ok(KeyCode::Esc),
        "Backspace" => Ok(KeyCode::Backspace),
        "Left" => Ok(KeyCode::Left),
        "Right" => Ok(KeyCode::Right),
        "Up" => Ok(KeyCode::Up),
        "Down" => Ok(KeyCode::Down),
        "Home" => Ok(KeyCode::Home),
        "End" => Ok(KeyCode::End),
        "PageUp" => Ok(KeyCode::PageUp),
        "PageDown" => Ok(KeyCode::PageDown),
        "Tab" => Ok(KeyCode::Tab),
        "BackTab" => Ok(KeyCode::BackTab),
        "Space" => Ok(KeyCode::Char(' ')),
        "Delete" => Ok(KeyCode::Delete),
        "Insert" => Ok(KeyCode::Insert),
        s if s.chars().count() == 1 => {
            let ch = s.chars().next().ok_or_else(|| anyhow!("Empty char"))?;
            Ok(KeyCode::Char(ch))
        }
        other => bail!("Unknown key: {other}"),
    }
}

/// Validate the TUI configuration.
///
/// Checks for:
/// - Empty key bindings
/// - Invalid key expressions
/// - Key conflicts within each view
pub fn validate_tui_config(config: &TuiConfig) -> Result<()> {
    validate_keybindings_config(&config.keybindings)
}

/// Validate the keybindings configuration.
pub fn validate_keybindings_config(config: &KeyBindingsConfig) -> Result<()> {
    for (view, bindings) in collect_bindings(config) {
        validate_non_empty_bindings(view, &bindings)?;
        validate_key_expressions(view, &bindings)?;
        validate_view_keybindings(view, &bindings)?;
    }
    Ok(())
}

fn validate_non_empty_bindings(view: &str, bindings: &[(&str, &[String])]) -> Result<()> {
    for (action, keys) in bindings {
        if keys.is_empty() {
            bail!("{view}.{action} must have at least one key binding");
        }
    }
    Ok(())
}

fn validate_key_expressions(view: &str, bindings: &[(&str, &[String])]) -> Result<()> {
    for (action, keys) in bindings {
        for key in *keys {
            parse_key(key).with_context(|| format!("Invalid key '{key}' in {view}.{action}"))?;
        }
    }
    Ok(())
}

fn validate_view_keybindings(view: &str, bindings: &[(&str, &[String])]) -> Result<()> {
    let mut key_to_actions: HashMap<&str, Vec<&str>> = HashMap::new();

    for (action, keys) in bindings {
        for key in *keys {
            key_to_actions.entry(key.as_str()).or_default().push(*action);
        }
    }

    // 衝突をチェック
    let mut conflicts: Vec<_> = key_to_actions
        .into_iter()
        .filter(|(_, actions)| actions.len() > 1)
        .collect();
    conflicts.sort_unstable();
    if let Some((key, actions)) = conflicts.first() {
        bail!("Key '{key}' is bound to multiple actions in {view}: {actions:?}");
    }

    Ok(())
}

fn collect_bindings(config: &KeyBindingsConfig) -> [(&'static str, Vec<(&'static str, &[String])>); 2] {
    let browse = &config.browse;
    let input = &config.input;
    [
        (
            "browse",
            vec![
                ("quit", browse.quit.as_slice()),
                ("down", browse.down.as_slice()),
                ("up", browse.up.as_slice()),
                ("add", browse.add.as_slice()),
                ("edit", browse.edit.as_slice()),
                ("toggle_checked", browse.toggle_checked.as_slice()),
                ("toggle_removed", browse.toggle_removed.as_slice()),
                ("next_filter", browse.next_filter.as_slice()),
                ("prev_filter", browse.prev_filter.as_slice()),
                ("purge", browse.purge.as_slice()),
            ],
        ),
        (
            "input",
            vec![
                ("submit", input.submit.as_slice()),
                ("cancel", input.cancel.as_slice()),
                ("delete_char", input.delete_char.as_slice()),
            ],
        ),
    ]
}

/// View type for keybinding context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    /// Browsing the list.
    Browse,
    /// Typing into the input line.
    Input,
}

/// Action that can be performed in a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Browse
    /// Quit the application.
    Quit,
    /// Move down.
    Down,
    /// Move up.
    Up,
    /// Focus the add form.
    Add,
    /// Edit the selected task's text.
    Edit,
    /// Flip the checkbox.
    ToggleChecked,
    /// Trash or restore.
    ToggleRemoved,
    /// Next display mode.
    NextFilter,
    /// Previous display mode.
    PrevFilter,
    /// Empty the trash.
    Purge,

    // Input
    /// Commit the typed text.
    Submit,
    /// Leave the input line.
    Cancel,
    /// Delete the last character.
    DeleteChar,
}

impl KeyBindingsConfig {
    /// Generate help text for a specific view.
    pub fn generate_help_text(&self, view: ViewType) -> String {
        match view {
            ViewType::Browse => self.generate_browse_help(),
            ViewType::Input => self.generate_input_help(),
        }
    }

    fn generate_browse_help(&self) -> String {
        let browse = &self.browse;
        format!(
            "{}:移動 {}:追加 {}:編集 {}:完了切替 {}:削除/復元 {}:表示切替 {}:ゴミ箱を空にする {}:終了",
            format_key_pair(&browse.down, &browse.up),
            format_first_key(&browse.add),
            format_first_key(&browse.edit),
            format_first_key(&browse.toggle_checked),
            format_first_key(&browse.toggle_removed),
            format_key_pair(&browse.next_filter, &browse.prev_filter),
            format_first_key(&browse.purge),
            format_first_key(&browse.quit),
        )
    }

    fn generate_input_help(&self) -> String {
        format!(
            "{}:確定 {}:キャンセル {}:1文字削除",
            format_first_key(&self.input.submit),
            format_first_key(&self.input.cancel),
            format_first_key(&self.input.delete_char),
        )
    }

    /// Check if a key event matches a configured action in a view.
    pub fn matches(&self, view: ViewType, action: Action, key: &KeyEvent) -> bool {
        self.get_keys(view, action)
            .iter()
            .filter_map(|key_str| parse_key(key_str).ok())
            .any(|expected| key_event_matches(&expected, key))
    }

    fn get_keys(&self, view: ViewType, action: Action) -> &[String] {
        match (view, action) {
            (ViewType::Browse, Action::Quit) => &self.browse.quit,
            (ViewType::Browse, Action::Down) => &self.browse.down,
            (ViewType::Browse, Action::Up) => &self.browse.up,
            (ViewType::Browse, Action::Add) => &self.browse.add,
            (ViewType::Browse, Action::Edit) => &self.browse.edit,
            (ViewType::Browse, Action::ToggleChecked) => &self.browse.toggle_checked,
            (ViewType::Browse, Action::ToggleRemoved) => &self.browse.toggle_removed,
            (ViewType::Browse, Action::NextFilter) => &self.browse.next_filter,
            (ViewType::Browse, Action::PrevFilter) => &self.browse.prev_filter,
            (ViewType::Browse, Action::Purge) => &self.browse.purge,

            (ViewType::Input, Action::Submit) => &self.input.submit,
            (ViewType::Input, Action::Cancel) => &self.input.cancel,
            (ViewType::Input, Action::DeleteChar) => &self.input.delete_char,

            // Invalid combinations
            _ => &[],
        }
    }
}

/// Terminals report `Shift` alongside upper-case letters and `BackTab`; the
/// code alone identifies those keys.
fn key_event_matches(expected: &KeyEvent, actual: &KeyEvent) -> bool {
    if expected.code != actual.code {
        return false;
    }
    match actual.code {
        KeyCode::Char(_) | KeyCode::BackTab => {
            expected.modifiers.difference(KeyModifiers::SHIFT)
                == actual.modifiers.difference(KeyModifiers::SHIFT)
        }
        _ => expected.modifiers == actual.modifiers,
    }
}

/// Format the first key of a key binding list for display.
fn format_first_key(keys: &[String]) -> String {
    keys.first()
        .map_or_else(|| "?".to_string(), |k| format_key_display(k))
}

/// Format two keys as a pair (e.g., "j/k" for down/up).
fn format_key_pair(down: &[String], up: &[String]) -> String {
    format!("{}/{}", format_first_key(down), format_first_key(up))
}

/// Format a key for display, converting special keys to readable symbols.
fn format_key_display(key: &str) -> String {
    match key {
        "Enter" => "↵".to_string(),
        "Backspace" => "BS".to_string(),
        "Delete" => "Del".to_string(),
        "BackTab" => "S-Tab".to_string(),
        "Up" => "↑".to_string(),
        "Down" => "↓".to_string(),
        "Left" => "←".to_string(),
        "Right" => "→".to_string(),
        "PageUp" => "PgUp".to_string(),
        "PageDown" => "PgDn".to_string(),
        other if other.starts_with("Ctrl+") || other.starts_with("Alt+") => other.replace('+', "-"),
        other => other.to_string(),
    }
}
