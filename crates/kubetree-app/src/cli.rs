use std::path::PathBuf;

use clap::Parser;

/// Switch the current Kubernetes context and namespace.
///
/// Without arguments an interactive tree of contexts and their namespaces is
/// shown. With arguments the switch happens directly:
///
///   kubetree <namespace>              namespace in the current context
///   kubetree <context>/<namespace>
///   kubetree <context> <namespace>
#[derive(Debug, Parser)]
#[command(name = "kubetree", version, verbatim_doc_comment)]
pub struct Cli {
    /// Quick switch target; unrecognised shapes open the tree instead
    pub args: Vec<String>,

    /// Kubeconfig to read and rewrite (default: $KUBECONFIG, then ~/.kube/config)
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// kubetree settings file (default: <config dir>/kubetree/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print contexts and their recorded namespaces, then exit
    #[arg(long, short)]
    pub list: bool,
}
