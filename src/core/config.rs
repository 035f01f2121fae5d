//! # Configuration
//!
//! A menu session is described by a [`MenuConfig`]: the resolved tree, the
//! string dictionary, chrome settings, the optional setup questions and the
//! action registry.
//!
//! Configs come from two places:
//! - a TOML document ([`MenuFile`]) read from disk, which is what the binary
//!   uses (default location `~/.menu-cli/menu.toml`, generated on first run);
//! - code, by filling in a [`MenuConfig`] directly. Only code can supply
//!   custom breadcrumb/information functions or a logo producer.
//!
//! A [`ConfigSource`] wraps either a fixed config or a producer that is
//! re-invoked on every reload, so a `reloadMenu` can pick up a changed file.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::action::ActionRegistry;
use crate::core::state::{Breadcrumbs, Information};
use crate::core::tree::MenuTree;

// ============================================================================
// File Structs (sparse TOML, everything optional)
// ============================================================================

/// One prompt in a question list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Question {
    /// Key the answer is stored under.
    pub id: String,
    /// Prompt shown to the user.
    pub text: String,
    /// Pre-supplied answer. When set the question is never prompted.
    pub value: Option<String>,
}

/// A menu entry as written in the config file, before variant resolution.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawNode {
    pub key: String,
    pub description: Option<String>,
    pub action: Option<String>,
    pub questions: Option<Vec<Question>>,
    pub submenu: Option<Vec<RawNode>>,
}

/// Questions asked once before the first menu is shown.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SetupConfig {
    pub name: String,
    pub action: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A shell-backed action declared in the config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CommandSpec {
    pub command: String,
}

/// The user-facing string dictionary.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Lang {
    #[serde(rename = "mainMenu", alias = "main_menu")]
    pub main_menu: String,
    pub instructions: String,
    #[serde(rename = "returnMessage", alias = "return_message")]
    pub return_message: String,
    #[serde(rename = "noDescription", alias = "no_description")]
    pub no_description: String,
    #[serde(rename = "executingAction", alias = "executing_action")]
    pub executing_action: String,
    #[serde(rename = "waitRun", alias = "wait_run")]
    pub wait_run: String,
    #[serde(rename = "pressAnyKey", alias = "press_any_key")]
    pub press_any_key: String,
    pub function_not_found: String,
    #[serde(rename = "submenuIndicator", alias = "submenu_indicator")]
    pub submenu_indicator: String,
    #[serde(rename = "menuActiveIndicator", alias = "menu_active_indicator")]
    pub menu_active_indicator: String,
    pub setup_instructions: String,
    pub questions_instructions: String,
    /// Fallback information line, used when no `information` is configured.
    pub information: String,
}

impl Default for Lang {
    fn default() -> Self {
        Self {
            main_menu: "Main Menu".to_string(),
            instructions:
                "Use arrow keys to navigate, Enter to select, Space for help, Esc to go back."
                    .to_string(),
            return_message: "Use Space or Esc to return".to_string(),
            no_description: "No description available.".to_string(),
            executing_action: "Executing".to_string(),
            wait_run: "Wait for it to complete.".to_string(),
            press_any_key: "Press any key to continue.".to_string(),
            function_not_found: "Action Function not found".to_string(),
            submenu_indicator: "▶".to_string(),
            menu_active_indicator: ">".to_string(),
            setup_instructions: "Before you start, you need to make some settings.".to_string(),
            questions_instructions: "Answer each question and press Enter.".to_string(),
            information: String::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// The on-disk config document.
#[derive(Debug, Deserialize, Serialize)]
pub struct MenuFile {
    #[serde(default)]
    pub menu: Vec<RawNode>,
    #[serde(default)]
    pub lang: Lang,
    pub logo: Option<String>,
    pub setup: Option<SetupConfig>,
    #[serde(default = "default_true")]
    pub show_interface: bool,
    #[serde(default)]
    pub breadcrumbs: Breadcrumbs,
    pub information: Option<String>,
    #[serde(default)]
    pub colors: HashMap<String, String>,
    #[serde(default = "default_true")]
    pub strict_actions: bool,
    #[serde(default)]
    pub actions: BTreeMap<String, CommandSpec>,
}

impl Default for MenuFile {
    fn default() -> Self {
        Self {
            menu: Vec::new(),
            lang: Lang::default(),
            logo: None,
            setup: None,
            show_interface: true,
            breadcrumbs: Breadcrumbs::default(),
            information: None,
            colors: HashMap::new(),
            strict_actions: true,
            actions: BTreeMap::new(),
        }
    }
}

// ============================================================================
// Resolved Config
// ============================================================================

/// Text printed above every frame.
#[derive(Clone)]
pub enum Logo {
    Static(String),
    /// Called on every redraw.
    Producer(Arc<dyn Fn() -> String + Send + Sync>),
}

impl Logo {
    pub fn text(&self) -> String {
        match self {
            Logo::Static(text) => text.clone(),
            Logo::Producer(produce) => produce(),
        }
    }
}

impl fmt::Debug for Logo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Logo::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Logo::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MenuConfig {
    pub menu: MenuTree,
    pub lang: Lang,
    pub logo: Option<Logo>,
    pub setup: Option<SetupConfig>,
    /// `false` hides all chrome and skips the post-action key gate.
    pub show_interface: bool,
    pub breadcrumbs: Breadcrumbs,
    pub information: Option<Information>,
    /// Role name → colour name or `#rrggbb`.
    pub colors: HashMap<String, String>,
    /// Reject trees that reference unregistered actions at load time.
    pub strict_actions: bool,
    pub actions: ActionRegistry,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            menu: MenuTree::default(),
            lang: Lang::default(),
            logo: None,
            setup: None,
            show_interface: true,
            breadcrumbs: Breadcrumbs::default(),
            information: None,
            colors: HashMap::new(),
            strict_actions: true,
            actions: ActionRegistry::new(),
        }
    }
}

impl MenuConfig {
    /// Resolve a file document into a runnable config with the given actions.
    pub fn from_file(file: MenuFile, actions: ActionRegistry) -> Result<Self, ConfigError> {
        let menu = MenuTree::from_raw(&file.menu)?;
        Ok(Self {
            menu,
            lang: file.lang,
            logo: file.logo.map(Logo::Static),
            setup: file.setup,
            show_interface: file.show_interface,
            breadcrumbs: file.breadcrumbs,
            information: file.information.map(Information::Static),
            colors: file.colors,
            strict_actions: file.strict_actions,
            actions,
        })
    }

    /// Load-time checks that need the action registry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.strict_actions {
            return Ok(());
        }
        self.menu.validate_actions(&self.actions)?;
        if let Some(setup) = &self.setup
            && !self.actions.contains(&setup.action)
        {
            return Err(ConfigError::UnknownAction {
                action: setup.action.clone(),
                node: setup.name.clone(),
            });
        }
        Ok(())
    }
}

/// Where a session gets its config from.
pub enum ConfigSource {
    Static(MenuConfig),
    /// Re-invoked on every reload.
    Producer(Box<dyn Fn() -> Result<MenuConfig, ConfigError> + Send + Sync>),
}

impl ConfigSource {
    pub fn producer<F>(produce: F) -> Self
    where
        F: Fn() -> Result<MenuConfig, ConfigError> + Send + Sync + 'static,
    {
        ConfigSource::Producer(Box::new(produce))
    }

    pub fn load(&self) -> Result<MenuConfig, ConfigError> {
        let config = match self {
            ConfigSource::Static(config) => config.clone(),
            ConfigSource::Producer(produce) => produce()?,
        };
        config.validate()?;
        Ok(config)
    }
}

impl From<MenuConfig> for ConfigSource {
    fn from(config: MenuConfig) -> Self {
        ConfigSource::Static(config)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// Two siblings share a display key.
    DuplicateKey(String),
    /// A node resolves to no variant (no action and no submenu).
    UnresolvedNode(String),
    /// A node references an action id missing from the registry.
    UnknownAction { action: String, node: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::DuplicateKey(key) => write!(f, "duplicate menu key: {key}"),
            ConfigError::UnresolvedNode(key) => {
                write!(f, "menu entry '{key}' has neither an action nor a submenu")
            }
            ConfigError::UnknownAction { action, node } => {
                write!(f, "menu entry '{node}' references unknown action '{action}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.menu-cli/menu.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".menu-cli").join("menu.toml"))
}

pub fn parse_config(contents: &str) -> Result<MenuFile, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Load a menu document from `path`.
///
/// If the file doesn't exist, a starter menu is written there first and
/// then loaded, so a fresh install has something to browse.
pub fn load_config(path: &Path) -> Result<MenuFile, ConfigError> {
    if !path.exists() {
        info!("No menu file found, generating default at {}", path.display());
        generate_default_config(path);
        return parse_config(DEFAULT_MENU);
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let file = parse_config(&contents)?;
    info!("Loaded menu from {}", path.display());
    debug!("Menu file: {:?}", file);
    Ok(file)
}

const DEFAULT_MENU: &str = r##"# menu-cli configuration
# Entries are shown in the order they are written.
# Reserved actions: "exit", "close_menu", "back".

logo = "menu-cli"
breadcrumbs = "line"        # "line" or "tree"
show_interface = true

[[menu]]
key = "Say hello"
description = "Prints a greeting."
action = "hello"

[[menu]]
key = "Greet someone"
description = "Asks for a name first."
action = "greet"
questions = [{ id = "name", text = "Who should be greeted?" }]

[[menu]]
key = "More"
description = "A nested menu."

[[menu.submenu]]
key = "Reload"
description = "Re-reads this file."
action = "reload"

[[menu.submenu]]
key = "Back"
action = "back"

[[menu]]
key = "Exit"
description = "Exit the program."
action = "exit"

[actions.hello]
command = "echo Hello"

[actions.greet]
command = "echo Hello, $MENU_ANSWER_NAME"

[actions.reload]
command = "echo reloadMenu"

# [lang]
# mainMenu = "Main Menu"
# submenuIndicator = "▶"

# [colors]
# breadcrumbs = "red"
# menuElementActive = "#ffaa00"
"##;

fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_MENU) {
        warn!("Failed to write default menu: {}", e);
    }
}
