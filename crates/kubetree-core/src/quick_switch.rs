use crate::config_store::{Configuration, SelectionTarget};

/// Splits `context/namespace` in a single argument.
pub const SEPARATOR: char = '/';

/// Interprets positional arguments as a switch target without going through
/// the tree.
///
/// Accepted shapes:
/// - `<namespace>` in the active context
/// - `<context>/<namespace>` when the context exists
/// - `<context> <namespace>` when the context exists
///
/// Anything else, including no arguments at all, yields `None` and the caller
/// falls back to interactive mode.
pub fn parse<S: AsRef<str>>(args: &[S], config: &Configuration) -> Option<SelectionTarget> {
    match args {
        [arg] => parse_single(arg.as_ref(), config),
        [context, namespace] => {
            let (context, namespace) = (context.as_ref(), namespace.as_ref());
            (config.context_exists(context) && !namespace.is_empty())
                .then(|| SelectionTarget::new(context, namespace))
        }
        _ => None,
    }
}

fn parse_single(arg: &str, config: &Configuration) -> Option<SelectionTarget> {
    if arg.is_empty() {
        return None;
    }
    let parts: Vec<&str> = arg.split(SEPARATOR).collect();
    match parts.as_slice() {
        [namespace] => Some(SelectionTarget::new(config.active_context(), *namespace)),
        [context, namespace] if !context.is_empty() && !namespace.is_empty() && config.context_exists(context) => {
            Some(SelectionTarget::new(*context, *namespace))
        }
        _ => None,
    }
}
