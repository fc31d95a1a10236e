//! Responsive vertical rhythm for stylesheets.
//!
//! [`TypographyEngine`] turns a [`TypographyConfig`] into font-size, line-height, border
//! and padding rules for every breakpoint and hands them to a [`RuleSink`]. Every value is
//! computed before the first rule is emitted, so a failing call writes nothing.

mod emission;
pub mod types;

pub use emission::RuleSink;
pub use types::{Declaration, EmittedRule, Property, RuleTarget};

pub use css_backgrounds_borders::{
    BorderBox, BorderCalculator, BorderError, BorderRules, BorderSides, BorderStyle, Edge,
};
pub use css_conditional_rules::{ConfigValue, ResolveError};
pub use css_fonts::{
    Baseline, FontSizePair, RhythmCalculator, RhythmConfig, RhythmError, SizeDefinition, SizeRef,
    Typography, TypographyConfig,
};
pub use css_media_queries::{BreakpointDefinition, BreakpointError, BreakpointSelector};
pub use css_values_units::{ComponentValue, ErrorKind, Ident, Length, LengthUnit, ValueError};

use anyhow::{Context as _, Error, Result};
use css_media_queries::resolve_breakpoints;
use css_values_units::parse_component_values;
use emission::{delta_rules, emit_all, pruned_rules};
use tracing::info_span;

/// The failure category behind an error returned by the engine, if it came from a
/// computation rather than a sink.
pub fn error_kind(err: &Error) -> Option<ErrorKind> {
    err.downcast_ref::<BorderError>()
        .map(BorderError::kind)
        .or_else(|| err.downcast_ref::<RhythmError>().map(RhythmError::kind))
        .or_else(|| err.downcast_ref::<BreakpointError>().map(BreakpointError::kind))
        .or_else(|| err.downcast_ref::<ResolveError>().map(ResolveError::kind))
        .or_else(|| err.downcast_ref::<ValueError>().map(ValueError::kind))
}

/// Owns a validated configuration and emits rhythm rules from it.
#[derive(Clone, Debug)]
pub struct TypographyEngine {
    typography: Typography,
}

impl TypographyEngine {
    /// # Errors
    /// Returns `RhythmError` when `config` does not validate.
    pub fn new(config: TypographyConfig) -> Result<Self, RhythmError> {
        Ok(Self::from_typography(Typography::new(config)?))
    }

    pub const fn from_typography(typography: Typography) -> Self {
        Self { typography }
    }

    pub const fn typography(&self) -> &Typography {
        &self.typography
    }

    pub const fn rhythm(&self) -> RhythmCalculator<'_> {
        RhythmCalculator::new(&self.typography)
    }

    pub const fn border_calculator(&self) -> BorderCalculator<'_> {
        BorderCalculator::new(&self.typography)
    }

    const fn px_fallback(&self) -> bool {
        self.typography.config().px_fallback
    }

    /// Root and body rules that establish the rhythm. Breakpoints only repeat the
    /// declarations that changed.
    ///
    /// # Errors
    /// Returns the computation error, or the first sink failure.
    pub fn set_baseline(&self, sink: &mut impl RuleSink) -> Result<usize> {
        let _span = info_span!("rhythm.set_baseline").entered();
        let rhythm = self.rhythm();
        let baselines = rhythm.set_baseline().context("set_baseline")?;
        let fallback = self.px_fallback();

        let root = baselines
            .iter()
            .map(|(breakpoint, baseline)| {
                (
                    *breakpoint,
                    vec![Declaration::length(Property::FontSize, baseline.html_font_size)],
                )
            })
            .collect();
        let body = baselines
            .iter()
            .map(|(breakpoint, baseline)| {
                let mut declarations = vec![Declaration::length(
                    Property::FontSize,
                    baseline.body_font_size,
                )];
                if fallback {
                    declarations.push(Declaration::length(
                        Property::LineHeight,
                        baseline.line_height_px,
                    ));
                }
                declarations.push(Declaration::length(Property::LineHeight, baseline.line_height));
                (*breakpoint, declarations)
            })
            .collect();

        let mut rules = delta_rules(RuleTarget::Root, root);
        rules.extend(delta_rules(RuleTarget::Body, body));
        rules.sort_by_key(|rule| rule.breakpoint.order);
        emit_all(sink, &rules)
    }

    /// `font-size` and `line-height` for `size` at the breakpoints `selector` covers.
    ///
    /// # Errors
    /// Returns the computation error, or the first sink failure.
    pub fn font_size(
        &self,
        sink: &mut impl RuleSink,
        size: &SizeRef,
        lines: Option<f64>,
        selector: &BreakpointSelector,
        unit: LengthUnit,
    ) -> Result<usize> {
        let _span = info_span!("rhythm.font_size", %size).entered();
        let rhythm = self.rhythm();
        let computed = rhythm
            .font_size(size, lines, selector, unit, self.px_fallback())
            .with_context(|| format!("font_size({size})"))?;
        let declarations = computed
            .into_iter()
            .map(|(breakpoint, pairs)| {
                let mut font_sizes = Vec::with_capacity(pairs.len());
                let mut line_heights = Vec::with_capacity(pairs.len());
                for pair in pairs {
                    font_sizes.push(Declaration::length(Property::FontSize, pair.font_size));
                    line_heights.push(Declaration::length(Property::LineHeight, pair.line_height));
                }
                font_sizes.extend(line_heights);
                (breakpoint, font_sizes)
            })
            .collect();
        emit_all(sink, &pruned_rules(RuleTarget::Current, selector, declarations))
    }

    /// `style` borders of `width` on `sides` with padding that completes the rhythm lines.
    ///
    /// # Errors
    /// Returns the computation error (a `RangeError` when the border does not fit in
    /// `lines`), or the first sink failure.
    pub fn border(
        &self,
        sink: &mut impl RuleSink,
        sides: &BorderSides,
        style: BorderStyle,
        width: &SizeRef,
        lines: Option<u32>,
        selector: &BreakpointSelector,
    ) -> Result<usize> {
        let _span = info_span!("rhythm.border", %width, %style).entered();
        let computed = self
            .border_calculator()
            .border(sides, style, width, lines, selector, self.px_fallback())
            .with_context(|| format!("border({width})"))?;
        let declarations = computed
            .into_iter()
            .map(|(breakpoint, rules)| (breakpoint, border_declarations(&rules)))
            .collect();
        emit_all(sink, &pruned_rules(RuleTarget::Current, selector, declarations))
    }

    /// A solid top border.
    ///
    /// # Errors
    /// See [`Self::border`].
    pub fn border_top(
        &self,
        sink: &mut impl RuleSink,
        width: &SizeRef,
        lines: Option<u32>,
        selector: &BreakpointSelector,
    ) -> Result<usize> {
        self.border(sink, &Edge::Top.into(), BorderStyle::Solid, width, lines, selector)
    }

    /// A solid bottom border.
    ///
    /// # Errors
    /// See [`Self::border`].
    pub fn border_bottom(
        &self,
        sink: &mut impl RuleSink,
        width: &SizeRef,
        lines: Option<u32>,
        selector: &BreakpointSelector,
    ) -> Result<usize> {
        self.border(sink, &Edge::Bottom.into(), BorderStyle::Solid, width, lines, selector)
    }

    /// Solid top and bottom borders.
    ///
    /// # Errors
    /// See [`Self::border`].
    pub fn border_horizontal(
        &self,
        sink: &mut impl RuleSink,
        width: &SizeRef,
        lines: Option<u32>,
        selector: &BreakpointSelector,
    ) -> Result<usize> {
        let sides = BorderSides::Edges(vec![Edge::Top, Edge::Bottom]);
        self.border(sink, &sides, BorderStyle::Solid, width, lines, selector)
    }

    /// Solid borders on every edge.
    ///
    /// # Errors
    /// See [`Self::border`].
    pub fn borders(
        &self,
        sink: &mut impl RuleSink,
        width: &SizeRef,
        lines: Option<u32>,
        selector: &BreakpointSelector,
    ) -> Result<usize> {
        self.border(sink, &BorderSides::All, BorderStyle::Solid, width, lines, selector)
    }

    /// `property: values` with every px length converted to rem. With px fallback the
    /// original value is declared first when it contains px lengths.
    ///
    /// # Errors
    /// Returns an error when `values` does not parse or a conversion fails, or the first
    /// sink failure.
    pub fn rem(
        &self,
        sink: &mut impl RuleSink,
        property: &str,
        values: &str,
        selector: &BreakpointSelector,
    ) -> Result<usize> {
        let _span = info_span!("rhythm.rem", property).entered();
        let parsed = parse_component_values(values).with_context(|| format!("rem({property})"))?;
        let has_px = parsed.iter().any(|value| {
            value
                .as_length()
                .is_some_and(|length| length.unit == LengthUnit::Pixels)
        });
        let fallback = self.px_fallback() && has_px;
        let name = Property::Other(property.to_owned());
        let calc = self.rhythm();

        let breakpoints = resolve_breakpoints(self.typography.registry(), selector)
            .with_context(|| format!("rem({property})"))?;
        let mut declarations = Vec::with_capacity(breakpoints.len());
        for breakpoint in breakpoints {
            let converted = calc
                .rem_values(&parsed, &breakpoint.name)
                .with_context(|| format!("rem({property})"))?;
            let mut list = Vec::with_capacity(2);
            if fallback {
                list.push(Declaration {
                    property: name.clone(),
                    values: parsed.clone(),
                });
            }
            list.push(Declaration {
                property: name.clone(),
                values: converted,
            });
            declarations.push((breakpoint, list));
        }
        emit_all(sink, &pruned_rules(RuleTarget::Current, selector, declarations))
    }
}

/// `border` then `padding` for each edge, box by box so a px fallback box precedes its
/// rem box.
fn border_declarations(rules: &BorderRules) -> Vec<Declaration> {
    let edges: Vec<Option<Edge>> = match &rules.sides {
        BorderSides::All => vec![None],
        BorderSides::Edges(edges) => edges.iter().copied().map(Some).collect(),
    };
    let style = ComponentValue::Keyword(Ident(rules.style.as_css().to_owned()));
    let mut declarations = Vec::with_capacity(rules.boxes.len() * edges.len() * 2);
    for border_box in &rules.boxes {
        for edge in &edges {
            declarations.push(Declaration {
                property: Property::Border(*edge),
                values: vec![ComponentValue::Length(border_box.border_width), style.clone()],
            });
            declarations.push(Declaration::length(Property::Padding(*edge), border_box.padding));
        }
    }
    declarations
}
