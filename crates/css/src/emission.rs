//! Handing computed rules to a stylesheet writer.

use crate::types::{Declaration, EmittedRule, Property, RuleTarget};
use anyhow::Result;
use css_media_queries::{Breakpoint, BreakpointSelector};

/// Receives finished rules, narrowest breakpoint first.
pub trait RuleSink {
    /// # Errors
    /// Implementations report their own write failures.
    fn emit(&mut self, rule: &EmittedRule) -> Result<()>;
}

impl RuleSink for Vec<EmittedRule> {
    fn emit(&mut self, rule: &EmittedRule) -> Result<()> {
        self.push(rule.clone());
        Ok(())
    }
}

/// Build the rules for `target`. Under [`BreakpointSelector::All`] every breakpoint whose
/// declarations repeat the breakpoint before it is dropped; a named breakpoint is always
/// emitted.
pub(crate) fn pruned_rules(
    target: RuleTarget,
    selector: &BreakpointSelector,
    computed: Vec<(&Breakpoint, Vec<Declaration>)>,
) -> Vec<EmittedRule> {
    let prune = *selector == BreakpointSelector::All;
    let mut rules: Vec<EmittedRule> = Vec::with_capacity(computed.len());
    let mut previous: Option<Vec<Declaration>> = None;
    for (breakpoint, declarations) in computed {
        if prune && previous.as_ref() == Some(&declarations) {
            tracing::trace!(breakpoint = %breakpoint.name, "unchanged, skipped");
            continue;
        }
        previous = Some(declarations.clone());
        rules.push(EmittedRule {
            breakpoint: breakpoint.clone(),
            target,
            declarations,
        });
    }
    rules
}

/// Like [`pruned_rules`], but keeps only the properties whose declarations changed since
/// the previous breakpoint. A property's px fallback and its primary declaration change
/// together.
pub(crate) fn delta_rules(
    target: RuleTarget,
    computed: Vec<(&Breakpoint, Vec<Declaration>)>,
) -> Vec<EmittedRule> {
    let mut rules = Vec::new();
    let mut previous: Vec<Declaration> = Vec::new();
    for (breakpoint, declarations) in computed {
        let changed: Vec<Declaration> = declarations
            .iter()
            .filter(|declaration| {
                group(&previous, &declaration.property) != group(&declarations, &declaration.property)
            })
            .cloned()
            .collect();
        previous = declarations;
        if changed.is_empty() {
            tracing::trace!(breakpoint = %breakpoint.name, %target, "no changes, skipped");
            continue;
        }
        rules.push(EmittedRule {
            breakpoint: breakpoint.clone(),
            target,
            declarations: changed,
        });
    }
    rules
}

fn group<'list>(declarations: &'list [Declaration], property: &Property) -> Vec<&'list Declaration> {
    declarations
        .iter()
        .filter(|declaration| declaration.property == *property)
        .collect()
}

/// Send `rules` to `sink` in order and return how many were written.
///
/// # Errors
/// Returns the first sink failure; later rules are not sent.
pub(crate) fn emit_all(sink: &mut impl RuleSink, rules: &[EmittedRule]) -> Result<usize> {
    for rule in rules {
        sink.emit(rule)?;
    }
    Ok(rules.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_media_queries::{BreakpointDefinition, BreakpointError, BreakpointRegistry};
    use css_values_units::Length;

    fn registry() -> Result<BreakpointRegistry, BreakpointError> {
        BreakpointRegistry::new([
            BreakpointDefinition::new("default", Length::px(0.0)),
            BreakpointDefinition::new("tiny", Length::em(20.0)),
            BreakpointDefinition::new("small", Length::em(30.0)),
        ])
    }

    fn font_size(rem: f64) -> Declaration {
        Declaration::length(Property::FontSize, Length::rem(rem))
    }

    fn line_height(rem: f64) -> Declaration {
        Declaration::length(Property::LineHeight, Length::rem(rem))
    }

    #[test]
    /// # Panics
    /// Panics if repeated breakpoints are emitted.
    fn prunes_repeated_breakpoints() -> Result<()> {
        let table = registry()?;
        let [default, tiny, small] = table.all_in_order() else {
            return Ok(());
        };
        let computed = vec![
            (default, vec![font_size(3.0)]),
            (tiny, vec![font_size(2.5)]),
            (small, vec![font_size(2.5)]),
        ];
        let rules = pruned_rules(RuleTarget::Current, &BreakpointSelector::All, computed);
        let names: Vec<&str> = rules.iter().map(|rule| rule.breakpoint.name.as_str()).collect();
        assert_eq!(names, ["default", "tiny"]);
        Ok(())
    }

    #[test]
    /// # Panics
    /// Panics if a requested breakpoint is dropped for matching the default.
    fn keeps_named_breakpoints() -> Result<()> {
        let table = registry()?;
        let [default, _, small] = table.all_in_order() else {
            return Ok(());
        };
        let rules = pruned_rules(
            RuleTarget::Current,
            &BreakpointSelector::from("small"),
            vec![(default, vec![font_size(3.0)]), (small, vec![font_size(3.0)])],
        );
        let names: Vec<&str> = rules.iter().map(|rule| rule.breakpoint.name.as_str()).collect();
        assert_eq!(names, ["default", "small"]);
        Ok(())
    }

    #[test]
    /// # Panics
    /// Panics if unchanged properties are repeated in later breakpoints.
    fn emits_only_changed_properties() -> Result<()> {
        let table = registry()?;
        let [default, tiny, small] = table.all_in_order() else {
            return Ok(());
        };
        let rules = delta_rules(
            RuleTarget::Body,
            vec![
                (default, vec![font_size(2.0), line_height(4.0)]),
                (tiny, vec![font_size(2.5), line_height(4.0)]),
                (small, vec![font_size(2.5), line_height(4.0)]),
            ],
        );
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].declarations.len(), 2);
        assert_eq!(rules[1].declarations, [font_size(2.5)]);
        Ok(())
    }

    #[test]
    /// # Panics
    /// Panics if the vector sink does not keep rules in order.
    fn vector_sink_collects() -> Result<()> {
        let table = registry()?;
        let rules = pruned_rules(
            RuleTarget::Root,
            &BreakpointSelector::All,
            table
                .all_in_order()
                .iter()
                .zip([1.0, 2.0, 3.0])
                .map(|(breakpoint, rem)| (breakpoint, vec![font_size(rem)]))
                .collect(),
        );
        let mut sink: Vec<EmittedRule> = Vec::new();
        assert_eq!(emit_all(&mut sink, &rules)?, 3);
        assert_eq!(sink, rules);
        assert_eq!(sink[1].to_string(), "@media (min-width: 20em) html { font-size: 2rem; }");
        Ok(())
    }
}
