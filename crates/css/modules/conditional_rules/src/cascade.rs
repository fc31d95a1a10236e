//! Fallback resolution along the breakpoint axis.

use crate::{ConfigValue, ResolveError};
use core::fmt::Display;
use css_media_queries::{Breakpoint, BreakpointRegistry, DEFAULT_KEY};
use std::collections::BTreeMap;

/// Resolve the effective value of `value` at `breakpoint`.
///
/// 1. An exact key wins.
/// 2. A registered breakpoint inherits the nearest narrower breakpoint present in the table.
/// 3. Otherwise the `default` key, or the narrowest key present, is used. Unregistered
///    names therefore resolve to the first definition.
///
/// # Errors
/// Returns `ResolveError::NotAMap` when `value` is a scalar and `ResolveError::Empty`
/// when the table has no entries.
pub fn resolve<'value, T: Display>(
    value: &'value ConfigValue<T>,
    registry: &BreakpointRegistry,
    breakpoint: &str,
) -> Result<&'value T, ResolveError> {
    let map = match value {
        ConfigValue::Table(map) => map,
        ConfigValue::Scalar(scalar) => {
            return Err(ResolveError::NotAMap {
                operation: "resolve",
                value: scalar.to_string(),
            });
        }
    };
    if let Some(exact) = map.get(breakpoint) {
        return Ok(exact);
    }

    if let Some(target) = registry.get(breakpoint) {
        let inherited = registry
            .all_in_order()
            .iter()
            .take(target.order + 1)
            .rev()
            .find_map(|candidate| lookup(map, candidate));
        if let Some(found) = inherited {
            return Ok(found);
        }
    } else {
        log::debug!("`{breakpoint}` is not a registered breakpoint; using the first definition");
    }

    map.get(DEFAULT_KEY)
        .or_else(|| {
            registry
                .all_in_order()
                .iter()
                .find_map(|candidate| lookup(map, candidate))
        })
        .or_else(|| map.values().next())
        .ok_or(ResolveError::Empty {
            operation: "resolve",
        })
}

fn lookup<'value, T>(map: &'value BTreeMap<String, T>, breakpoint: &Breakpoint) -> Option<&'value T> {
    map.get(&breakpoint.name).or_else(|| {
        if breakpoint.is_default() {
            map.get(DEFAULT_KEY)
        } else {
            None
        }
    })
}
