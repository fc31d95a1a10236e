//! Font-size and line-height declarations across breakpoints.

use crate::{BODY_SIZE, RhythmCalculator, RhythmError, SizeRef};
use css_media_queries::{Breakpoint, BreakpointSelector, resolve_breakpoints};
use css_values_units::{Length, LengthUnit, round_to_precision};
use serde::Serialize;

/// The root and body settings that establish the rhythm at one breakpoint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Baseline {
    /// `html { font-size }`: the rhythm unit as a percentage of the browser font size.
    pub html_font_size: Length,
    /// `body { font-size }` in em of the rhythm unit.
    pub body_font_size: Length,
    /// `body { line-height }` in rem.
    pub line_height: Length,
    /// `body { line-height }` in px, for fallbacks.
    pub line_height_px: Length,
}

/// A `font-size` with the `line-height` that keeps it on the rhythm.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FontSizePair {
    pub font_size: Length,
    pub line_height: Length,
}

impl RhythmCalculator<'_> {
    /// # Errors
    /// Returns an error when the rhythm unit or body size cannot be resolved.
    pub fn baseline(&self, breakpoint: &str) -> Result<Baseline, RhythmError> {
        let rhythm_px = self.rhythm_unit_px(breakpoint)?;
        let body_px = self.body_font_size_px(breakpoint)?;
        let browser_px = self.typography().browser_font_size_px();
        let lines = f64::from(self.lines_for_size(&SizeRef::from(BODY_SIZE), breakpoint)?);
        Ok(Baseline {
            html_font_size: Length::percent(round_to_precision(rhythm_px / browser_px * 100.0)),
            body_font_size: Length::em(round_to_precision(body_px / rhythm_px)),
            line_height: self.rhythm(lines, None, LengthUnit::RootEms, breakpoint)?,
            line_height_px: self.rhythm(lines, None, LengthUnit::Pixels, breakpoint)?,
        })
    }

    /// The baseline at every registered breakpoint, narrowest first.
    ///
    /// # Errors
    /// Returns the first error raised at any breakpoint.
    pub fn set_baseline(&self) -> Result<Vec<(&Breakpoint, Baseline)>, RhythmError> {
        self.typography()
            .registry()
            .all_in_order()
            .iter()
            .map(|breakpoint| Ok((breakpoint, self.baseline(&breakpoint.name)?)))
            .collect()
    }

    /// `size` in `unit` with a line height of `lines` rhythm units, or as many as the size
    /// needs. The line height is in px when `unit` is px and in rem otherwise.
    ///
    /// # Errors
    /// Returns an error when the size is unknown or a conversion fails.
    pub fn font_size_at(
        &self,
        size: &SizeRef,
        lines: Option<f64>,
        unit: LengthUnit,
        breakpoint: &str,
    ) -> Result<FontSizePair, RhythmError> {
        let line_count = match lines {
            Some(count) => count,
            None => f64::from(self.lines_for_size(size, breakpoint)?),
        };
        let line_unit = if unit == LengthUnit::Pixels {
            LengthUnit::Pixels
        } else {
            LengthUnit::RootEms
        };
        Ok(FontSizePair {
            font_size: self.get_size(size, unit, breakpoint)?,
            line_height: self.rhythm(line_count, None, line_unit, breakpoint)?,
        })
    }

    /// Font-size pairs for every breakpoint `selector` covers. With `px_fallback` each
    /// breakpoint carries the px pair ahead of the `unit` pair.
    ///
    /// # Errors
    /// Returns `RhythmError::Breakpoint` for an unknown selector and the first
    /// computation error otherwise.
    pub fn font_size(
        &self,
        size: &SizeRef,
        lines: Option<f64>,
        selector: &BreakpointSelector,
        unit: LengthUnit,
        px_fallback: bool,
    ) -> Result<Vec<(&Breakpoint, Vec<FontSizePair>)>, RhythmError> {
        let breakpoints = resolve_breakpoints(self.typography().registry(), selector)?;
        breakpoints
            .into_iter()
            .map(|breakpoint| {
                let mut pairs = Vec::with_capacity(2);
                if px_fallback && unit != LengthUnit::Pixels {
                    pairs.push(self.font_size_at(size, lines, LengthUnit::Pixels, &breakpoint.name)?);
                }
                pairs.push(self.font_size_at(size, lines, unit, &breakpoint.name)?);
                Ok((breakpoint, pairs))
            })
            .collect()
    }
}
