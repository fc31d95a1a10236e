//! Choosing which breakpoints a request is evaluated at.

use crate::{Breakpoint, BreakpointError, BreakpointRegistry};
use core::convert::Infallible;
use core::str::FromStr;

/// Which breakpoints a computation should be evaluated at.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BreakpointSelector {
    /// Only the unconditional default breakpoint.
    #[default]
    Default,
    /// Every registered breakpoint.
    All,
    /// The default breakpoint followed by the named one.
    Named(String),
}

impl FromStr for BreakpointSelector {
    type Err = Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(match text.trim() {
            "" => Self::Default,
            "all" => Self::All,
            name => Self::Named(name.to_owned()),
        })
    }
}

impl From<&str> for BreakpointSelector {
    fn from(text: &str) -> Self {
        match text.parse() {
            Ok(selector) => selector,
            Err(never) => match never {},
        }
    }
}

/// Resolve `selector` to the ordered breakpoints to evaluate.
///
/// Every sequence starts with the default breakpoint so the unconditional rule is always
/// produced first; a named default breakpoint is not repeated.
///
/// # Errors
/// Returns `BreakpointError::Unknown` when a named breakpoint is not registered.
pub fn resolve_breakpoints<'registry>(
    registry: &'registry BreakpointRegistry,
    selector: &BreakpointSelector,
) -> Result<Vec<&'registry Breakpoint>, BreakpointError> {
    let default = registry.default_breakpoint();
    let resolved = match selector {
        BreakpointSelector::Default => vec![default],
        BreakpointSelector::All => registry.all_in_order().iter().collect(),
        BreakpointSelector::Named(name) => {
            let named = registry
                .get(name)
                .ok_or_else(|| BreakpointError::Unknown {
                    operation: "resolve_breakpoints",
                    name: name.clone(),
                })?;
            if named.is_default() {
                vec![default]
            } else {
                vec![default, named]
            }
        }
    };
    log::trace!(
        "{selector:?} resolved to {:?}",
        resolved
            .iter()
            .map(|breakpoint| breakpoint.name.as_str())
            .collect::<Vec<_>>()
    );
    Ok(resolved)
}
