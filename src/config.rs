use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::BaseDirs;
use serde::de::Deserializer;
use serde::Deserialize;

use crate::logging;
use crate::store::Category;

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_NAME: &str = "roster";

#[derive(Debug, Clone)]
pub struct Config {
    pub config_path: PathBuf,
    /// False when no file existed and built-in defaults are in use.
    pub loaded_from_file: bool,
    pub keys: Keys,
    pub ui: UiConfig,
    pub log: LogConfig,
    /// Non-fatal problems found while loading, reported once logging is up.
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(CONFIG_FILE_NAME),
            loaded_from_file: false,
            keys: Keys::default(),
            ui: UiFile::default().into(),
            log: LogConfig::default(),
            warnings: Vec::new(),
        }
    }
}

// =============================================================================
// Logging Configuration
// =============================================================================

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LEVEL.to_string(),
            dir: None,
        }
    }
}

impl LogConfig {
    /// Directory log files go to, falling back to the platform data dir.
    pub fn resolved_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.dir {
            return Ok(expand_tilde(dir));
        }
        let base = BaseDirs::new().context("unable to determine base directories")?;
        Ok(base.data_local_dir().join(APP_NAME).join("logs"))
    }
}

/// Expand ~ to home directory in paths
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = home::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

// =============================================================================
// UI Configuration
// =============================================================================

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors: UiColors,
    pub icons: UiIcons,
}

#[derive(Debug, Clone)]
pub struct UiColors {
    pub border: RgbColor,
    pub selection_bg: RgbColor,
    pub selection_fg: RgbColor,
    pub separator: RgbColor,
    pub status_fg: RgbColor,
    pub status_bg: RgbColor,
}

/// Labels drawn in front of each category.
#[derive(Debug, Clone)]
pub struct UiIcons {
    pub personal: String,
    pub work: String,
    pub family: String,
    pub unset: String,
}

impl UiIcons {
    pub fn for_category(&self, category: Option<Category>) -> &str {
        match category {
            Some(Category::Personal) => &self.personal,
            Some(Category::Work) => &self.work,
            Some(Category::Family) => &self.family,
            None => &self.unset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

// =============================================================================
// Key Bindings - Context-aware with multiple bindings per action
// =============================================================================

/// All key bindings organized by context
#[derive(Debug, Clone, Default)]
pub struct Keys {
    /// Global keys (work whenever no modal is open)
    pub global: GlobalKeys,
    /// Keys for the contact list
    pub list: ListKeys,
    /// Keys for the add/edit form
    pub form: FormKeys,
    /// Keys for confirm and help modals
    pub modal: ModalKeys,
}

#[derive(Debug, Clone)]
pub struct GlobalKeys {
    pub quit: Vec<String>,
    pub help: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ListKeys {
    pub next: Vec<String>,
    pub prev: Vec<String>,
    pub add: Vec<String>,
    pub edit: Vec<String>,
    pub delete: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FormKeys {
    pub cancel: Vec<String>,
    pub confirm: Vec<String>,
    pub next_field: Vec<String>,
    pub prev_field: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ModalKeys {
    pub cancel: Vec<String>,
    pub confirm: Vec<String>,
}

impl Default for GlobalKeys {
    fn default() -> Self {
        Self {
            quit: vec!["q".into()],
            help: vec!["F1".into(), "?".into()],
        }
    }
}

impl Default for ListKeys {
    fn default() -> Self {
        Self {
            next: vec!["j".into(), "Down".into()],
            prev: vec!["k".into(), "Up".into()],
            add: vec!["a".into(), "n".into()],
            edit: vec!["e".into(), "Enter".into()],
            delete: vec!["d".into(), "x".into()],
        }
    }
}

impl Default for FormKeys {
    fn default() -> Self {
        Self {
            cancel: vec!["Escape".into()],
            confirm: vec!["Enter".into()],
            next_field: vec!["Tab".into(), "Down".into()],
            prev_field: vec!["Backtab".into(), "Up".into()],
        }
    }
}

impl Default for ModalKeys {
    fn default() -> Self {
        Self {
            cancel: vec!["Escape".into(), "n".into()],
            confirm: vec!["Enter".into(), "y".into()],
        }
    }
}

// =============================================================================
// Serde deserialization types (support both single string and array)
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum KeyBinding {
    Single(String),
    Multiple(Vec<String>),
}

impl KeyBinding {
    fn into_vec(self) -> Vec<String> {
        match self {
            KeyBinding::Single(s) => vec![s],
            KeyBinding::Multiple(v) => v,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct KeysFile {
    global: GlobalKeysFile,
    list: ListKeysFile,
    form: FormKeysFile,
    modal: ModalKeysFile,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct GlobalKeysFile {
    quit: KeyBinding,
    help: KeyBinding,
}

impl Default for GlobalKeysFile {
    fn default() -> Self {
        let defaults = GlobalKeys::default();
        Self {
            quit: KeyBinding::Multiple(defaults.quit),
            help: KeyBinding::Multiple(defaults.help),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ListKeysFile {
    next: KeyBinding,
    prev: KeyBinding,
    add: KeyBinding,
    edit: KeyBinding,
    delete: KeyBinding,
}

impl Default for ListKeysFile {
    fn default() -> Self {
        let defaults = ListKeys::default();
        Self {
            next: KeyBinding::Multiple(defaults.next),
            prev: KeyBinding::Multiple(defaults.prev),
            add: KeyBinding::Multiple(defaults.add),
            edit: KeyBinding::Multiple(defaults.edit),
            delete: KeyBinding::Multiple(defaults.delete),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FormKeysFile {
    cancel: KeyBinding,
    confirm: KeyBinding,
    next_field: KeyBinding,
    prev_field: KeyBinding,
}

impl Default for FormKeysFile {
    fn default() -> Self {
        let defaults = FormKeys::default();
        Self {
            cancel: KeyBinding::Multiple(defaults.cancel),
            confirm: KeyBinding::Multiple(defaults.confirm),
            next_field: KeyBinding::Multiple(defaults.next_field),
            prev_field: KeyBinding::Multiple(defaults.prev_field),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ModalKeysFile {
    cancel: KeyBinding,
    confirm: KeyBinding,
}

impl Default for ModalKeysFile {
    fn default() -> Self {
        let defaults = ModalKeys::default();
        Self {
            cancel: KeyBinding::Multiple(defaults.cancel),
            confirm: KeyBinding::Multiple(defaults.confirm),
        }
    }
}

impl From<KeysFile> for Keys {
    fn from(file: KeysFile) -> Self {
        Self {
            global: GlobalKeys {
                quit: file.global.quit.into_vec(),
                help: file.global.help.into_vec(),
            },
            list: ListKeys {
                next: file.list.next.into_vec(),
                prev: file.list.prev.into_vec(),
                add: file.list.add.into_vec(),
                edit: file.list.edit.into_vec(),
                delete: file.list.delete.into_vec(),
            },
            form: FormKeys {
                cancel: file.form.cancel.into_vec(),
                confirm: file.form.confirm.into_vec(),
                next_field: file.form.next_field.into_vec(),
                prev_field: file.form.prev_field.into_vec(),
            },
            modal: ModalKeys {
                cancel: file.modal.cancel.into_vec(),
                confirm: file.modal.confirm.into_vec(),
            },
        }
    }
}

// =============================================================================
// Key binding validation
// =============================================================================

/// Normalize a key binding string to a canonical form for collision detection.
/// Single characters preserve case (since 'N' means Shift+n, different from 'n').
/// Multi-character key names are case-insensitive (Enter, ENTER, enter are the same).
fn normalize_binding(binding: &str) -> String {
    let trimmed = binding.trim();
    if trimmed.chars().count() == 1 {
        trimmed.to_string()
    } else {
        match trimmed.to_ascii_lowercase().as_str() {
            "esc" => "escape".to_string(),
            "shift+tab" => "backtab".to_string(),
            other => other.to_string(),
        }
    }
}

/// Check for collisions within a single context
fn check_context_collisions(bindings: &[(&str, &[String])], context_name: &str) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for (action_name, keys) in bindings {
        for key in *keys {
            let normalized = normalize_binding(key);
            if normalized.is_empty() {
                continue;
            }
            if let Some(existing_action) = seen.get(&normalized) {
                bail!(
                    "key binding collision in [keys.{}]: '{}' is bound to both '{}' and '{}'",
                    context_name,
                    key,
                    existing_action,
                    action_name
                );
            }
            seen.insert(normalized, action_name);
        }
    }

    Ok(())
}

/// Validate all key bindings for collisions within each context.
///
/// The list context also sees the global keys, since both are live while
/// the list has focus.
fn validate_key_bindings(keys: &Keys) -> Result<()> {
    check_context_collisions(
        &[
            ("quit", &keys.global.quit),
            ("help", &keys.global.help),
            ("next", &keys.list.next),
            ("prev", &keys.list.prev),
            ("add", &keys.list.add),
            ("edit", &keys.list.edit),
            ("delete", &keys.list.delete),
        ],
        "list",
    )?;

    check_context_collisions(
        &[
            ("cancel", &keys.form.cancel),
            ("confirm", &keys.form.confirm),
            ("next_field", &keys.form.next_field),
            ("prev_field", &keys.form.prev_field),
        ],
        "form",
    )?;

    check_context_collisions(
        &[
            ("cancel", &keys.modal.cancel),
            ("confirm", &keys.modal.confirm),
        ],
        "modal",
    )?;

    Ok(())
}

// =============================================================================
// Config file structure
// =============================================================================

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    keys: KeysFile,
    ui: UiFile,
    log: LogFile,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct LogFile {
    level: String,
    dir: Option<PathBuf>,
}

impl Default for LogFile {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LEVEL.to_string(),
            dir: None,
        }
    }
}

impl LogFile {
    fn into_config(self) -> Result<LogConfig> {
        let level = logging::normalize_level(&self.level)
            .with_context(|| "invalid log.level in configuration")?;
        Ok(LogConfig {
            level: level.to_string(),
            dir: self.dir,
        })
    }
}

fn config_root() -> Result<PathBuf> {
    let base = BaseDirs::new().context("unable to determine base directories")?;
    Ok(base.config_dir().join(APP_NAME))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_root()?.join(CONFIG_FILE_NAME))
}

/// Load the configuration from `path`, or from the default location.
///
/// A missing file yields the built-in defaults; a file that exists but does
/// not parse or validate is an error.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config_path()?,
    };

    if !path.exists() {
        return Ok(Config {
            config_path: path,
            ..Config::default()
        });
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read configuration file at {}", path.display()))?;

    let mut config = parse(&raw).with_context(|| format!("invalid configuration in {}", path.display()))?;
    config.config_path = path;
    config.loaded_from_file = true;
    Ok(config)
}

fn parse(raw: &str) -> Result<Config> {
    let value: toml::Value = toml::from_str(raw).context("failed to parse configuration as TOML")?;

    let mut warnings = Vec::new();
    warn_unknown_keys(&value, &mut warnings);

    let cfg_file: ConfigFile = value
        .try_into()
        .context("failed to deserialize configuration")?;

    let keys: Keys = cfg_file.keys.into();
    validate_key_bindings(&keys)?;

    Ok(Config {
        config_path: PathBuf::from(CONFIG_FILE_NAME),
        loaded_from_file: true,
        keys,
        ui: cfg_file.ui.into(),
        log: cfg_file.log.into_config()?,
        warnings,
    })
}

// =============================================================================
// Unknown key warnings
// =============================================================================

fn warn_unknown_keys(value: &toml::Value, warnings: &mut Vec<String>) {
    let Some(table) = value.as_table() else {
        return;
    };

    warn_unknown_in(table, "", &["keys", "ui", "log"], warnings);

    if let Some(keys) = table.get("keys").and_then(|v| v.as_table()) {
        warn_unknown_in(keys, "keys", &["global", "list", "form", "modal"], warnings);
        let contexts: [(&str, &[&str]); 4] = [
            ("global", &["quit", "help"]),
            ("list", &["next", "prev", "add", "edit", "delete"]),
            ("form", &["cancel", "confirm", "next_field", "prev_field"]),
            ("modal", &["cancel", "confirm"]),
        ];
        for (context, known) in contexts {
            if let Some(section) = keys.get(context).and_then(|v| v.as_table()) {
                warn_unknown_in(section, &format!("keys.{context}"), known, warnings);
            }
        }
    }

    if let Some(ui) = table.get("ui").and_then(|v| v.as_table()) {
        warn_unknown_in(ui, "ui", &["colors", "icons"], warnings);
        if let Some(colors) = ui.get("colors").and_then(|v| v.as_table()) {
            warn_unknown_in(
                colors,
                "ui.colors",
                &["border", "selection_bg", "selection_fg", "separator", "status_fg", "status_bg"],
                warnings,
            );
        }
        if let Some(icons) = ui.get("icons").and_then(|v| v.as_table()) {
            warn_unknown_in(icons, "ui.icons", &["personal", "work", "family", "unset"], warnings);
        }
    }

    if let Some(log) = table.get("log").and_then(|v| v.as_table()) {
        warn_unknown_in(log, "log", &["level", "dir"], warnings);
    }
}

fn warn_unknown_in(table: &toml::Table, context: &str, known: &[&str], warnings: &mut Vec<String>) {
    let known: HashSet<&str> = known.iter().copied().collect();
    for key in table.keys() {
        if !known.contains(key.as_str()) {
            if context.is_empty() {
                warnings.push(format!("unknown configuration key `{}`", key));
            } else {
                warnings.push(format!("unknown configuration key `{}` in [{}]", key, context));
            }
        }
    }
}

// =============================================================================
// UI config types
// =============================================================================

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct UiFile {
    colors: UiColorsFile,
    icons: UiIconsFile,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct UiColorsFile {
    border: RgbColor,
    selection_bg: RgbColor,
    selection_fg: RgbColor,
    separator: RgbColor,
    status_fg: RgbColor,
    status_bg: RgbColor,
}

impl Default for UiColorsFile {
    fn default() -> Self {
        Self {
            border: RgbColor::new(227, 6, 19),
            selection_bg: RgbColor::new(227, 6, 19),
            selection_fg: RgbColor::new(255, 255, 255),
            separator: RgbColor::new(227, 6, 19),
            status_fg: RgbColor::new(227, 6, 19),
            status_bg: RgbColor::new(0, 0, 0),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct UiIconsFile {
    personal: String,
    work: String,
    family: String,
    unset: String,
}

impl Default for UiIconsFile {
    fn default() -> Self {
        Self {
            personal: "[P]".to_string(),
            work: "[W]".to_string(),
            family: "[F]".to_string(),
            unset: "[ ]".to_string(),
        }
    }
}

impl From<UiFile> for UiConfig {
    fn from(file: UiFile) -> Self {
        Self {
            colors: UiColors {
                border: file.colors.border,
                selection_bg: file.colors.selection_bg,
                selection_fg: file.colors.selection_fg,
                separator: file.colors.separator,
                status_fg: file.colors.status_fg,
                status_bg: file.colors.status_bg,
            },
            icons: UiIcons {
                personal: file.icons.personal,
                work: file.icons.work,
                family: file.icons.family,
                unset: file.icons.unset,
            },
        }
    }
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl<'de> serde::Deserialize<'de> for RgbColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Array([u8; 3]),
            Map { r: u8, g: u8, b: u8 },
        }

        let helper = Helper::deserialize(deserializer)?;
        let (r, g, b) = match helper {
            Helper::Array(values) => (values[0], values[1], values[2]),
            Helper::Map { r, g, b } => (r, g, b),
        };
        Ok(RgbColor { r, g, b })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.keys.global.quit, vec!["q"]);
        assert_eq!(config.keys.list.add, vec!["a", "n"]);
        assert_eq!(config.log.level, "info");
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_single_string_and_array_bindings() {
        let config = parse(
            r#"
            [keys.list]
            add = "+"
            delete = ["Delete", "D"]
            "#,
        )
        .unwrap();
        assert_eq!(config.keys.list.add, vec!["+"]);
        assert_eq!(config.keys.list.delete, vec!["Delete", "D"]);
        // Untouched actions keep their defaults
        assert_eq!(config.keys.list.edit, vec!["e", "Enter"]);
    }

    #[test]
    fn test_collision_is_rejected() {
        let err = parse(
            r#"
            [keys.list]
            add = "d"
            "#,
        )
        .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("collision"), "{message}");
        assert!(message.contains("[keys.list]"), "{message}");
    }

    #[test]
    fn test_global_keys_collide_with_list_keys() {
        let err = parse(
            r#"
            [keys.global]
            quit = "j"
            "#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("'j'"));
    }

    #[test]
    fn test_named_keys_collide_case_insensitively() {
        let err = parse(
            r#"
            [keys.modal]
            cancel = "esc"
            confirm = "ESCAPE"
            "#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("[keys.modal]"));

        // Single characters keep their case
        parse(
            r#"
            [keys.list]
            add = "a"
            delete = "A"
            "#,
        )
        .unwrap();
    }

    #[test]
    fn test_colors_accept_array_and_table() {
        let config = parse(
            r#"
            [ui.colors]
            border = [1, 2, 3]
            status_bg = { r = 4, g = 5, b = 6 }
            "#,
        )
        .unwrap();
        assert_eq!(config.ui.colors.border, RgbColor::new(1, 2, 3));
        assert_eq!(config.ui.colors.status_bg, RgbColor::new(4, 5, 6));
    }

    #[test]
    fn test_category_icons() {
        let config = parse(
            r#"
            [ui.icons]
            work = "W:"
            "#,
        )
        .unwrap();
        let icons = &config.ui.icons;
        assert_eq!(icons.for_category(Some(Category::Work)), "W:");
        assert_eq!(icons.for_category(Some(Category::Family)), "[F]");
        assert_eq!(icons.for_category(None), "[ ]");
    }

    #[test]
    fn test_unknown_keys_are_warnings() {
        let config = parse(
            r#"
            vdir = "~/contacts"
            [keys.list]
            merge = "m"
            [ui.colors]
            accent = [0, 0, 0]
            "#,
        )
        .unwrap();
        assert_eq!(config.warnings.len(), 3);
        assert!(config.warnings[0].contains("`vdir`"));
        assert!(config.warnings.iter().any(|w| w.contains("`merge` in [keys.list]")));
        assert!(config.warnings.iter().any(|w| w.contains("`accent` in [ui.colors]")));
    }

    #[test]
    fn test_log_level_is_validated() {
        let config = parse("[log]\nlevel = \"DEBUG\"\n").unwrap();
        assert_eq!(config.log.level, "debug");

        let err = parse("[log]\nlevel = \"loud\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("log.level"));
    }

    #[test]
    fn test_log_dir_expands_tilde() {
        let log = LogConfig {
            level: "info".into(),
            dir: Some(PathBuf::from("/var/log/roster")),
        };
        assert_eq!(log.resolved_dir().unwrap(), PathBuf::from("/var/log/roster"));

        if let Some(home) = home::home_dir() {
            let log = LogConfig {
                level: "info".into(),
                dir: Some(PathBuf::from("~/logs")),
            };
            assert_eq!(log.resolved_dir().unwrap(), home.join("logs"));
        }
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = load(Some(&path)).unwrap();
        assert!(!config.loaded_from_file);
        assert_eq!(config.config_path, path);
        assert_eq!(config.keys.modal.confirm, vec!["Enter", "y"]);
    }

    #[test]
    fn test_load_reports_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "keys = [").unwrap();
        let err = load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains(&path.display().to_string()));
    }
}
