use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;
use thiserror::Error;

/// Prompt used for the top-level action menu; the configured prompt override
/// replaces this one only, never the sub-prompts
pub const DEFAULT_PROMPT: &str = "Displays";

/// Error type for the menu module
#[derive(Error, Debug)]
pub enum MenuError {
    #[error("A selection was requested with no choices")]
    EmptyChoices,
    #[error("Selection `{0}` is not one of the offered choices")]
    InvalidSelection(String),
    #[error("Failed to launch the menu command `{command}`: {source}")]
    Launch {
        command: String,
        source: std::io::Error,
    },
    #[error("Failed to exchange data with the menu command")]
    Io(#[from] std::io::Error),
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

type Result<T = ()> = std::result::Result<T, MenuError>;

/// User configuration, read from `config.toml` in the tool's config directory
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub menu: MenuConfig,
}

/// Formatting overrides for the menu tool
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Menu program with its leading arguments, e.g. `["rofi"]`
    pub command: Vec<String>,
    /// Replacement for the default top-level prompt
    pub prompt: Option<String>,
    /// Extra arguments appended to every menu invocation
    pub args: Vec<String>,
}

impl Config {
    /// Loads the user configuration; a missing file or config directory is
    /// not an error, defaults apply
    pub fn load() -> Result<Config> {
        match dirs::config_dir() {
            Some(dir) => Self::load_from(&dir.join("xrandr-menu").join("config.toml")),
            None => Ok(Config::default()),
        }
    }

    fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| MenuError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| MenuError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl MenuConfig {
    /// Builds the menu invocation for a selection of `line_count` choices
    ///
    /// Defaults to `dmenu -i -l <n> -p <prompt>`; a configured command whose
    /// program is rofi needs `-dmenu -i -lines <n>` instead.
    pub fn command_line(&self, line_count: usize, prompt: &str) -> Vec<String> {
        let mut argv: Vec<String> = if self.command.is_empty() {
            vec!["dmenu".to_string()]
        } else {
            self.command.clone()
        };

        let prompt = match &self.prompt {
            Some(configured) if prompt == DEFAULT_PROMPT => configured.as_str(),
            _ => prompt,
        };

        let rofi = argv
            .first()
            .is_some_and(|program| program.contains("rofi"));
        if rofi {
            argv.extend(["-dmenu", "-i", "-lines"].map(str::to_string));
        } else {
            argv.extend(["-i", "-l"].map(str::to_string));
        }
        argv.push(line_count.to_string());
        argv.push("-p".to_string());
        argv.push(prompt.to_string());
        argv.extend(self.args.iter().cloned());

        argv
    }
}

/// Presents a list of choices and returns the one the user picked
///
/// `Ok(None)` is user cancellation (no input given); an empty choice list is
/// rejected rather than silently blocking on the prompt.
pub trait Selector {
    fn select(
        &self,
        prompt: &str,
        choices: &[String],
        line_count: usize,
    ) -> Result<Option<String>>;
}

/// Selector backed by a dmenu-compatible external process
pub struct DmenuSelector {
    config: MenuConfig,
}

impl DmenuSelector {
    pub fn new(config: MenuConfig) -> Self {
        Self { config }
    }
}

impl Selector for DmenuSelector {
    fn select(
        &self,
        prompt: &str,
        choices: &[String],
        line_count: usize,
    ) -> Result<Option<String>> {
        if choices.is_empty() {
            return Err(MenuError::EmptyChoices);
        }

        let argv = self.config.command_line(line_count, prompt);
        let command = argv.join(" ");
        log::debug!("Prompting via `{}`", command);

        // command_line always yields at least the program name
        let mut child = Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| MenuError::Launch { command, source })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(choices.join("\n").as_bytes())?;
        }

        let output = child.wait_with_output()?;
        let reply = String::from_utf8_lossy(&output.stdout).trim().to_string();
        resolve_reply(&reply, choices)
    }
}

/// Resolves the literal reply of a menu tool to the canonical choice string
///
/// Tools differ in what they print: the picked line, or its zero-based index.
/// An empty reply is cancellation; anything that is neither a valid index nor
/// a listed choice is rejected.
pub fn resolve_reply(reply: &str, choices: &[String]) -> Result<Option<String>> {
    if reply.is_empty() {
        return Ok(None);
    }

    if let Ok(index) = reply.parse::<usize>() {
        if let Some(choice) = choices.get(index) {
            return Ok(Some(choice.clone()));
        }
    }

    if choices.iter().any(|choice| choice == reply) {
        return Ok(Some(reply.to_string()));
    }

    Err(MenuError::InvalidSelection(reply.to_string()))
}
