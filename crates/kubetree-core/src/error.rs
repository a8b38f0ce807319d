use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failures while reading or rewriting the kubeconfig file. All of these are
/// fatal to the process.
#[derive(Debug)]
pub enum ConfigError {
    NoConfigPath,
    EmptyFile { path: PathBuf },
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_yaml::Error },
    Serialize(serde_yaml::Error),
    ContextNotFound(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoConfigPath => write!(f, "KUBECONFIG is not set and no home directory was found"),
            Self::EmptyFile { path } => write!(f, "empty configuration file: {}", path.display()),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Parse { path, source } => write!(f, "could not parse {}: {source}", path.display()),
            Self::Serialize(e) => write!(f, "could not encode kubeconfig: {e}"),
            Self::ContextNotFound(name) => write!(f, "context \"{name}\" not found in kubeconfig"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Serialize(e) => Some(e),
            _ => None,
        }
    }
}

/// Failures listing the namespaces of one context. These are shown inline on
/// the context's tree node, so `Display` yields the short label text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    ConfigInvalid(String),
    Unreachable,
    Api(String),
    Unknown(String),
}

impl ListError {
    /// Longer description including the underlying cause, for logging.
    pub fn detail(&self) -> String {
        match self {
            Self::ConfigInvalid(msg) => format!("invalid client configuration: {msg}"),
            Self::Unreachable => "cluster unreachable".to_string(),
            Self::Api(msg) => format!("api error: {msg}"),
            Self::Unknown(msg) => format!("unexpected error: {msg}"),
        }
    }
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigInvalid(_) => write!(f, "error in config file"),
            Self::Unreachable => write!(f, "unreachable"),
            Self::Api(msg) => write!(f, "error from api: {msg}"),
            Self::Unknown(_) => write!(f, "error"),
        }
    }
}

impl std::error::Error for ListError {}
