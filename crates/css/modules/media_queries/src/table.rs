//! The ordered breakpoint table.

use crate::BreakpointError;
use css_values_units::{Length, UnitEnvironment, compute_length_px};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Map key that always addresses the narrowest (order 0) breakpoint.
pub const DEFAULT_KEY: &str = "default";

/// A breakpoint as declared in configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreakpointDefinition {
    pub name: String,
    pub min_width: Length,
}

impl BreakpointDefinition {
    pub fn new(name: impl Into<String>, min_width: Length) -> Self {
        Self {
            name: name.into(),
            min_width,
        }
    }
}

/// A registered breakpoint with its position on the width axis.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Breakpoint {
    pub name: String,
    pub min_width: Length,
    /// `min_width` resolved against the user agent's default font size.
    pub min_width_px: f64,
    /// Dense, zero-based position in ascending width order.
    pub order: usize,
}

impl Breakpoint {
    /// True for the unconditional, order 0 breakpoint.
    #[inline]
    pub const fn is_default(&self) -> bool {
        self.order == 0
    }
}

/// Immutable, ascending table of breakpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct BreakpointRegistry {
    breakpoints: Vec<Breakpoint>,
}

impl BreakpointRegistry {
    /// Build the table, ordering definitions by ascending `min_width`.
    ///
    /// Widths are compared in pixels; `em`/`rem` widths resolve against the user agent's
    /// default font size, as media queries do.
    ///
    /// # Errors
    /// Returns an error when the table is empty, a name or width is repeated, a breakpoint
    /// named `default` is not the narrowest one, or a width cannot be resolved to pixels.
    pub fn new(
        definitions: impl IntoIterator<Item = BreakpointDefinition>,
    ) -> Result<Self, BreakpointError> {
        let env = UnitEnvironment::default();
        let mut measured = definitions
            .into_iter()
            .map(|definition| {
                compute_length_px(definition.min_width, &env, None)
                    .map(|width_px| (width_px, definition))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if measured.is_empty() {
            return Err(BreakpointError::Empty);
        }
        measured.sort_by(|left, right| left.0.total_cmp(&right.0));

        let mut seen = HashSet::new();
        for (width_px, definition) in &measured {
            if !seen.insert(definition.name.as_str()) {
                return Err(BreakpointError::DuplicateName {
                    name: definition.name.clone(),
                });
            }
            log::trace!("breakpoint `{}` at {width_px}px", definition.name);
        }
        for pair in measured.windows(2) {
            if let [(lower_px, lower), (upper_px, upper)] = pair
                && (upper_px - lower_px).abs() < f64::EPSILON
            {
                return Err(BreakpointError::DuplicateWidth {
                    first: lower.name.clone(),
                    second: upper.name.clone(),
                });
            }
        }
        if let Some((_, misplaced)) = measured
            .iter()
            .skip(1)
            .find(|(_, definition)| definition.name == DEFAULT_KEY)
        {
            return Err(BreakpointError::MisplacedDefault {
                name: misplaced.name.clone(),
            });
        }

        let breakpoints: Vec<Breakpoint> = measured
            .into_iter()
            .enumerate()
            .map(|(order, (min_width_px, definition))| Breakpoint {
                name: definition.name,
                min_width: definition.min_width,
                min_width_px,
                order,
            })
            .collect();
        log::debug!(
            "registered {} breakpoints: {:?}",
            breakpoints.len(),
            breakpoints
                .iter()
                .map(|breakpoint| breakpoint.name.as_str())
                .collect::<Vec<_>>()
        );
        Ok(Self { breakpoints })
    }

    /// Position of `name` on the width axis. `default` is an alias for order 0.
    ///
    /// # Errors
    /// Returns `BreakpointError::Unknown` when `name` is not registered.
    pub fn order(&self, name: &str) -> Result<usize, BreakpointError> {
        self.get(name)
            .map(|breakpoint| breakpoint.order)
            .ok_or_else(|| BreakpointError::Unknown {
                operation: "order",
                name: name.to_owned(),
            })
    }

    /// Look up a breakpoint by name. `default` is an alias for order 0.
    pub fn get(&self, name: &str) -> Option<&Breakpoint> {
        if name == DEFAULT_KEY {
            return Some(self.default_breakpoint());
        }
        self.breakpoints
            .iter()
            .find(|breakpoint| breakpoint.name == name)
    }

    /// True when `name` is a registered breakpoint or the `default` alias.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Every breakpoint, ascending by `min_width`. The slice can be iterated any number of times.
    #[inline]
    pub fn all_in_order(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// The unconditional, narrowest breakpoint.
    #[inline]
    pub fn default_breakpoint(&self) -> &Breakpoint {
        // `new` rejects empty tables.
        &self.breakpoints[0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }
}
