pub mod context_tree;
pub mod status_bar;

pub use context_tree::ContextTreeWidget;
pub use status_bar::StatusBarWidget;
