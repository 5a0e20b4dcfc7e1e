//! Configuration-time errors. Anything reported here is fatal at setup.
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Read { path: String, message: String },
    Parse { path: String, message: String },
    MissingPromptKey { key: String },
    EmptyPrompt { trigger: String },
    MissingWidget { name: &'static str },
    UnknownTile { id: String },
    DuplicateTile { id: String },
    UnknownAction { name: String },
}

impl ConfigError {
    pub fn read(path: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::Read {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn parse(path: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "failed to read {}: {}", path, message),
            Self::Parse { path, message } => write!(f, "failed to parse {}: {}", path, message),
            Self::MissingPromptKey { key } => write!(f, "unknown prompt string key '{}'", key),
            Self::EmptyPrompt { trigger } => {
                write!(f, "prompt trigger '{}' has no messages", trigger)
            }
            Self::MissingWidget { name } => write!(f, "UI widget '{}' not found", name),
            Self::UnknownTile { id } => write!(f, "tile counterpart '{}' does not exist", id),
            Self::DuplicateTile { id } => write!(f, "tile id '{}' is declared twice", id),
            Self::UnknownAction { name } => write!(f, "unknown input action '{}'", name),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_item() {
        let missing = ConfigError::MissingPromptKey {
            key: "introSwap".into(),
        };
        assert!(missing.to_string().contains("introSwap"));

        let widget = ConfigError::MissingWidget { name: "Crafting" };
        assert_eq!(widget.to_string(), "UI widget 'Crafting' not found");

        let parse = ConfigError::parse("config/game.toml", "expected `=`");
        assert!(matches!(parse, ConfigError::Parse { .. }));
        assert!(parse.to_string().starts_with("failed to parse config/game.toml"));
    }
}
