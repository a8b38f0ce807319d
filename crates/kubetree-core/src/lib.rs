pub mod config_store;
pub mod error;
pub mod lister;
pub mod quick_switch;
pub mod tree;

pub use config_store::{ConfigStore, Configuration, ContextEntry, SelectionTarget, KUBECONFIG_ENV};
pub use error::{ConfigError, ListError};
pub use lister::{KubeNamespaceLister, NamespaceLister, DEFAULT_LIST_TIMEOUT};
pub use tree::{
    ContextMarker, ContextNode, LoadState, NamespaceMarker, NamespaceNode, NodeRef, SelectionTree, SessionOutcome,
};
