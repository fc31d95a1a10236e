//! CSS Backgrounds & Borders Level 3 — §4 Borders
//! Spec: <https://www.w3.org/TR/css-backgrounds-3/#borders>
//!
//! A border adds height to a box. Padding on the same edge absorbs the rest of the rhythm
//! lines so the border box always ends on the grid.

use crate::BorderError;
use core::fmt;
use css_fonts::{RhythmCalculator, RhythmError, SizeRef, Typography};
use css_media_queries::{Breakpoint, BreakpointSelector, resolve_breakpoints};
use css_values_units::{Length, LengthUnit};
use serde::Serialize;

/// Unit of every non-fallback border and padding width.
const TARGET_UNIT: LengthUnit = LengthUnit::RootEms;

/// A physical box edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_css())
    }
}

/// `border-style` keywords.
/// Spec: <https://www.w3.org/TR/css-backgrounds-3/#border-style>
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    None,
    Hidden,
    Dotted,
    Dashed,
    #[default]
    Solid,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
}

impl BorderStyle {
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Hidden => "hidden",
            Self::Dotted => "dotted",
            Self::Dashed => "dashed",
            Self::Solid => "solid",
            Self::Double => "double",
            Self::Groove => "groove",
            Self::Ridge => "ridge",
            Self::Inset => "inset",
            Self::Outset => "outset",
        }
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_css())
    }
}

/// Which edges a border applies to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum BorderSides {
    /// Every edge, written with the `border`/`padding` shorthands.
    All,
    Edges(Vec<Edge>),
}

impl BorderSides {
    /// The edges covered, in box order.
    pub fn edges(&self) -> Vec<Edge> {
        match self {
            Self::All => Edge::ALL.to_vec(),
            Self::Edges(edges) => edges.clone(),
        }
    }
}

impl From<Edge> for BorderSides {
    fn from(edge: Edge) -> Self {
        Self::Edges(vec![edge])
    }
}

/// Border width and the padding that completes its rhythm lines.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BorderBox {
    pub border_width: Length,
    pub padding: Length,
}

/// Border declarations for one breakpoint. With px fallback the px box comes first.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BorderRules {
    pub sides: BorderSides,
    pub style: BorderStyle,
    pub boxes: Vec<BorderBox>,
}

/// Border and padding computations bound to a [`Typography`].
#[derive(Clone, Copy, Debug)]
pub struct BorderCalculator<'cfg> {
    rhythm: RhythmCalculator<'cfg>,
}

impl<'cfg> BorderCalculator<'cfg> {
    pub const fn new(typography: &'cfg Typography) -> Self {
        Self {
            rhythm: RhythmCalculator::new(typography),
        }
    }

    /// Border width `width` plus padding filling `lines` rhythm lines, in `unit`.
    /// `lines` defaults to the lines `width` itself needs.
    ///
    /// # Errors
    /// Returns `BorderError::NegativePadding` when the border is taller than the lines and
    /// `BorderError::Rhythm` for lookup or conversion failures.
    pub fn border_at(
        &self,
        width: &SizeRef,
        lines: Option<u32>,
        unit: LengthUnit,
        breakpoint: &str,
    ) -> Result<BorderBox, BorderError> {
        let border_px = self.rhythm.size_px(width, breakpoint)?;
        let line_count = match lines {
            Some(count) => count,
            None => self.rhythm.lines_for_size(width, breakpoint)?,
        };
        let padding_px =
            f64::from(line_count).mul_add(self.rhythm.rhythm_unit_px(breakpoint)?, -border_px);
        if padding_px < 0.0 {
            return Err(BorderError::NegativePadding {
                width: width.to_string(),
                lines: line_count,
                padding_px,
            });
        }
        let border_width = self
            .rhythm
            .convert(Length::px(border_px), unit, None, None, breakpoint)?
            .rounded();
        let padding = self
            .rhythm
            .convert(Length::px(padding_px), unit, None, None, breakpoint)?
            .rounded();
        log::trace!("border_at({width}, {line_count}, {breakpoint}) = {border_width} + {padding}");
        Ok(BorderBox {
            border_width,
            padding,
        })
    }

    /// Border boxes for `sides` at every breakpoint `selector` covers.
    /// `lines` is a whole number so border plus padding stays on the grid.
    ///
    /// # Errors
    /// Returns `BorderError::Rhythm` for an unknown selector and the first computation
    /// error otherwise.
    pub fn border(
        &self,
        sides: &BorderSides,
        style: BorderStyle,
        width: &SizeRef,
        lines: Option<u32>,
        selector: &BreakpointSelector,
        px_fallback: bool,
    ) -> Result<Vec<(&'cfg Breakpoint, BorderRules)>, BorderError> {
        let registry = self.rhythm.typography().registry();
        let breakpoints = resolve_breakpoints(registry, selector).map_err(RhythmError::from)?;
        breakpoints
            .into_iter()
            .map(|breakpoint| {
                let mut boxes = Vec::with_capacity(2);
                if px_fallback {
                    boxes.push(self.border_at(width, lines, LengthUnit::Pixels, &breakpoint.name)?);
                }
                boxes.push(self.border_at(width, lines, TARGET_UNIT, &breakpoint.name)?);
                Ok((
                    breakpoint,
                    BorderRules {
                        sides: sides.clone(),
                        style,
                        boxes,
                    },
                ))
            })
            .collect()
    }

    /// A solid top border.
    ///
    /// # Errors
    /// See [`Self::border`].
    pub fn border_top(
        &self,
        width: &SizeRef,
        lines: Option<u32>,
        selector: &BreakpointSelector,
        px_fallback: bool,
    ) -> Result<Vec<(&'cfg Breakpoint, BorderRules)>, BorderError> {
        self.border(&Edge::Top.into(), BorderStyle::Solid, width, lines, selector, px_fallback)
    }

    /// A solid bottom border.
    ///
    /// # Errors
    /// See [`Self::border`].
    pub fn border_bottom(
        &self,
        width: &SizeRef,
        lines: Option<u32>,
        selector: &BreakpointSelector,
        px_fallback: bool,
    ) -> Result<Vec<(&'cfg Breakpoint, BorderRules)>, BorderError> {
        self.border(&Edge::Bottom.into(), BorderStyle::Solid, width, lines, selector, px_fallback)
    }

    /// Solid top and bottom borders.
    ///
    /// # Errors
    /// See [`Self::border`].
    pub fn border_horizontal(
        &self,
        width: &SizeRef,
        lines: Option<u32>,
        selector: &BreakpointSelector,
        px_fallback: bool,
    ) -> Result<Vec<(&'cfg Breakpoint, BorderRules)>, BorderError> {
        let sides = BorderSides::Edges(vec![Edge::Top, Edge::Bottom]);
        self.border(&sides, BorderStyle::Solid, width, lines, selector, px_fallback)
    }

    /// Solid borders on every edge.
    ///
    /// # Errors
    /// See [`Self::border`].
    pub fn borders(
        &self,
        width: &SizeRef,
        lines: Option<u32>,
        selector: &BreakpointSelector,
        px_fallback: bool,
    ) -> Result<Vec<(&'cfg Breakpoint, BorderRules)>, BorderError> {
        self.border(&BorderSides::All, BorderStyle::Solid, width, lines, selector, px_fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_fonts::TypographyConfig;
    use css_values_units::ErrorKind;

    fn typography() -> Result<Typography, ErrorKind> {
        let config: TypographyConfig = serde_json::from_str(
            r#"{
                "breakpoints": [
                    {"name": "default", "min_width": "0"},
                    {"name": "tiny", "min_width": "20em"}
                ],
                "rhythm": {
                    "rhythm_unit": {"default": "6px", "tiny": "7px"},
                    "body_font_size": {"default": "16px", "tiny": "18px"},
                    "minimum_leading": "4px"
                },
                "sizes": {"border": {"default": "3px"}}
            }"#,
        )
        .map_err(|_| ErrorKind::Type)?;
        Typography::new(config).map_err(|err| err.kind())
    }

    fn border_box(width: &str, lines: Option<u32>, unit: LengthUnit, breakpoint: &str) -> Result<BorderBox, ErrorKind> {
        let built = typography()?;
        BorderCalculator::new(&built)
            .border_at(&SizeRef::from(width), lines, unit, breakpoint)
            .map_err(|err| err.kind())
    }

    #[test]
    /// # Panics
    /// Panics if the padding does not complete the border's rhythm lines.
    fn padding_completes_the_line() {
        let thin = border_box("1px", None, LengthUnit::RootEms, "default");
        assert_eq!(
            thin.map(|found| (found.border_width.to_string(), found.padding.to_string())),
            Ok((".16667rem".to_owned(), ".83333rem".to_owned()))
        );
        let named = border_box("border", Some(2), LengthUnit::Pixels, "tiny");
        assert_eq!(
            named,
            Ok(BorderBox {
                border_width: Length::px(3.0),
                padding: Length::px(11.0),
            })
        );
    }

    #[test]
    /// # Panics
    /// Panics if border plus padding ever leaves the grid.
    fn border_box_is_a_whole_number_of_lines() {
        for (breakpoint, rhythm_px) in [("default", 6.0), ("tiny", 7.0)] {
            for tenth in 1..60 {
                let width = format!("{}px", f64::from(tenth) / 10.0);
                let Ok(found) = border_box(&width, None, LengthUnit::Pixels, breakpoint) else {
                    continue;
                };
                let total = found.border_width.value + found.padding.value;
                let lines = (total / rhythm_px).round();
                assert!((total - lines * rhythm_px).abs() < 1e-4, "{width} at {breakpoint}: {total}px");
                assert!(lines >= 1.0);
            }
        }
    }

    #[test]
    /// # Panics
    /// Panics if an explicit line count is not filled exactly.
    fn explicit_lines_fill_the_grid() {
        for (breakpoint, rhythm_px) in [("default", 6.0), ("tiny", 7.0)] {
            for lines in 1..5_u32 {
                let found = border_box("3px", Some(lines), LengthUnit::Pixels, breakpoint);
                let total = found.map(|found| found.border_width.value + found.padding.value);
                assert_eq!(total, Ok(f64::from(lines) * rhythm_px), "{lines} line(s) at {breakpoint}");
            }
        }
    }

    #[test]
    /// # Panics
    /// Panics if the border style is dropped or does not default to solid.
    fn rules_carry_the_style() {
        assert_eq!(BorderStyle::default(), BorderStyle::Solid);
        assert_eq!(BorderStyle::Dashed.to_string(), "dashed");
        let Ok(built) = typography() else {
            return;
        };
        let calc = BorderCalculator::new(&built);
        let width = SizeRef::from("1px");
        let styles = |found: Result<Vec<(&Breakpoint, BorderRules)>, BorderError>| {
            found.map(|rules| rules.into_iter().map(|(_, rule)| rule.style).collect::<Vec<_>>())
        };
        assert_eq!(
            styles(calc.border_top(&width, None, &BreakpointSelector::Default, false)),
            Ok(vec![BorderStyle::Solid])
        );
        assert_eq!(
            styles(calc.border(
                &BorderSides::All,
                BorderStyle::Dotted,
                &width,
                Some(1),
                &BreakpointSelector::from("tiny"),
                false,
            )),
            Ok(vec![BorderStyle::Dotted, BorderStyle::Dotted])
        );
    }

    #[test]
    /// # Panics
    /// Panics if a border taller than its lines is accepted.
    fn oversized_border_is_a_range_error() {
        assert_eq!(
            border_box("10px", Some(1), LengthUnit::RootEms, "default"),
            Err(ErrorKind::Range)
        );
        assert_eq!(
            border_box("bogus", None, LengthUnit::RootEms, "default"),
            Err(ErrorKind::Type)
        );
    }

    #[test]
    /// # Panics
    /// Panics if the side helpers cover the wrong edges.
    fn side_helpers() {
        assert_eq!(BorderSides::All.edges(), Edge::ALL);
        assert_eq!(BorderSides::from(Edge::Top).edges(), [Edge::Top]);
        let Ok(built) = typography() else {
            return;
        };
        let calc = BorderCalculator::new(&built);
        let width = SizeRef::from("1px");
        let horizontal = calc
            .border_horizontal(&width, None, &BreakpointSelector::Default, false)
            .map(|rules| rules.into_iter().map(|(_, rule)| rule.sides).collect::<Vec<_>>());
        assert_eq!(
            horizontal.map_err(|err| err.kind()),
            Ok(vec![BorderSides::Edges(vec![Edge::Top, Edge::Bottom])])
        );
    }
}
