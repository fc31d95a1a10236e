//! Rhythm arithmetic at a single breakpoint.
//! Spec: <https://www.w3.org/TR/css-rhythm-1/#line-height-step>

use crate::{BODY_SIZE, RHYTHM_UNIT_SIZE, RhythmError, SizeRef, Typography};
use css_conditional_rules::resolve;
use css_values_units::{
    ComponentValue, Length, LengthUnit, UnitEnvironment, compute_length_px, convert_length,
    round_to_precision,
};

/// Number of rhythm lines a `font_px` glyph box occupies.
///
/// Rounds up to whole lines, then adds one more when the space left over is smaller
/// than `leading_px`. Never less than one line.
pub fn lines_for(font_px: f64, rhythm_px: f64, leading_px: f64) -> u32 {
    let mut lines = round_to_precision(font_px / rhythm_px).ceil();
    if round_to_precision(lines.mul_add(rhythm_px, -font_px)) < leading_px {
        lines += 1.0;
    }
    lines.max(1.0) as u32
}

/// Size, line and unit computations bound to a [`Typography`].
#[derive(Clone, Copy, Debug)]
pub struct RhythmCalculator<'cfg> {
    typography: &'cfg Typography,
}

impl<'cfg> RhythmCalculator<'cfg> {
    pub const fn new(typography: &'cfg Typography) -> Self {
        Self { typography }
    }

    pub const fn typography(&self) -> &'cfg Typography {
        self.typography
    }

    /// The rhythm unit in effect at `breakpoint`.
    ///
    /// # Errors
    /// Returns `RhythmError::Resolve` when the configured table cannot be resolved.
    pub fn rhythm_unit(&self, breakpoint: &str) -> Result<Length, RhythmError> {
        let rhythm = &self.typography.config().rhythm;
        Ok(*resolve(&rhythm.rhythm_unit, self.typography.registry(), breakpoint)?)
    }

    /// The body font size in effect at `breakpoint`.
    ///
    /// # Errors
    /// Returns `RhythmError::Resolve` when the configured table cannot be resolved.
    pub fn body_font_size(&self, breakpoint: &str) -> Result<Length, RhythmError> {
        let rhythm = &self.typography.config().rhythm;
        Ok(*resolve(&rhythm.body_font_size, self.typography.registry(), breakpoint)?)
    }

    /// The rhythm unit in px. Relative units resolve against the browser font size.
    ///
    /// # Errors
    /// Returns an error when the rhythm unit cannot be resolved or measured.
    pub fn rhythm_unit_px(&self, breakpoint: &str) -> Result<f64, RhythmError> {
        let browser = self.typography.browser_font_size_px();
        let env = UnitEnvironment::new(browser, browser);
        Ok(compute_length_px(self.rhythm_unit(breakpoint)?, &env, None)?)
    }

    /// The body font size in px. Relative units resolve against the rhythm unit, which is
    /// the root element's font size.
    ///
    /// # Errors
    /// Returns an error when either size cannot be resolved or measured.
    pub fn body_font_size_px(&self, breakpoint: &str) -> Result<f64, RhythmError> {
        let rhythm_px = self.rhythm_unit_px(breakpoint)?;
        let env = UnitEnvironment::new(rhythm_px, rhythm_px);
        Ok(compute_length_px(self.body_font_size(breakpoint)?, &env, None)?)
    }

    /// Root font size is the rhythm unit, font size is the body size.
    ///
    /// # Errors
    /// Returns an error when either size cannot be resolved or measured.
    pub fn environment(&self, breakpoint: &str) -> Result<UnitEnvironment, RhythmError> {
        Ok(UnitEnvironment::new(
            self.rhythm_unit_px(breakpoint)?,
            self.body_font_size_px(breakpoint)?,
        ))
    }

    /// Look up `size` at `breakpoint`, computing scale sizes.
    ///
    /// # Errors
    /// Returns `RhythmError::UnknownSize` for a name that is neither a configured size nor
    /// `body` or `rhythm-unit`.
    pub fn size(&self, size: &SizeRef, breakpoint: &str) -> Result<Length, RhythmError> {
        let name = match size {
            SizeRef::Length(length) => return Ok(*length),
            SizeRef::Named(name) => name.as_str(),
        };
        let config = self.typography.config();
        if let Some(definition) = config.sizes.get(name) {
            let declared = resolve(definition, self.typography.registry(), breakpoint)?;
            return Ok(declared.compute(config.scale_ratio)?);
        }
        match name {
            BODY_SIZE => self.body_font_size(breakpoint),
            RHYTHM_UNIT_SIZE => self.rhythm_unit(breakpoint),
            _ => Err(RhythmError::UnknownSize {
                operation: "get_size",
                name: name.to_owned(),
            }),
        }
    }

    /// `size` measured in px at `breakpoint`.
    ///
    /// # Errors
    /// Returns an error when the size is unknown or cannot be measured.
    pub fn size_px(&self, size: &SizeRef, breakpoint: &str) -> Result<f64, RhythmError> {
        let env = self.environment(breakpoint)?;
        Ok(compute_length_px(self.size(size, breakpoint)?, &env, None)?)
    }

    /// `size` expressed in `unit` at `breakpoint`.
    ///
    /// # Errors
    /// Returns an error when the size is unknown or the conversion fails.
    pub fn get_size(
        &self,
        size: &SizeRef,
        unit: LengthUnit,
        breakpoint: &str,
    ) -> Result<Length, RhythmError> {
        let length = self.size(size, breakpoint)?;
        Ok(self.convert(length, unit, None, None, breakpoint)?.rounded())
    }

    /// Unit conversion in the environment of `breakpoint`.
    ///
    /// # Errors
    /// Returns `RhythmError::Value` when the conversion itself fails.
    pub fn convert(
        &self,
        value: Length,
        to_unit: LengthUnit,
        from_context: Option<Length>,
        to_context: Option<Length>,
        breakpoint: &str,
    ) -> Result<Length, RhythmError> {
        let env = self.environment(breakpoint)?;
        Ok(convert_length(value, to_unit, &env, from_context, to_context)?)
    }

    /// # Errors
    /// Returns an error when the minimum leading cannot be measured.
    pub fn minimum_leading_px(&self, breakpoint: &str) -> Result<f64, RhythmError> {
        let env = self.environment(breakpoint)?;
        let leading = self.typography.config().rhythm.minimum_leading;
        Ok(compute_length_px(leading, &env, None)?)
    }

    /// Whole rhythm lines needed to set `size` with at least the minimum leading.
    ///
    /// # Errors
    /// Returns `RhythmError::NonPositive` for a negative size, and any lookup error.
    pub fn lines_for_size(&self, size: &SizeRef, breakpoint: &str) -> Result<u32, RhythmError> {
        let font_px = self.size_px(size, breakpoint)?;
        if font_px < 0.0 {
            return Err(RhythmError::NonPositive {
                operation: "lines_for_size",
                value: size.to_string(),
            });
        }
        let lines = lines_for(
            font_px,
            self.rhythm_unit_px(breakpoint)?,
            self.minimum_leading_px(breakpoint)?,
        );
        log::trace!("lines_for_size({size}, {breakpoint}) = {lines}");
        Ok(lines)
    }

    /// The height of `lines` rhythm units, in `unit`.
    ///
    /// `context` is the reference for relative target units and defaults to the rhythm unit.
    ///
    /// # Errors
    /// Returns an error when the conversion fails.
    pub fn rhythm(
        &self,
        lines: f64,
        context: Option<Length>,
        unit: LengthUnit,
        breakpoint: &str,
    ) -> Result<Length, RhythmError> {
        let height = Length::px(lines * self.rhythm_unit_px(breakpoint)?);
        let reference = match context {
            Some(length) => length,
            None => Length::px(self.rhythm_unit_px(breakpoint)?),
        };
        Ok(self
            .convert(height, unit, None, Some(reference), breakpoint)?
            .rounded())
    }

    /// Convert every px length in `values` to rem. Everything else passes through.
    ///
    /// # Errors
    /// Returns an error when the environment at `breakpoint` cannot be built.
    pub fn rem_values(
        &self,
        values: &[ComponentValue],
        breakpoint: &str,
    ) -> Result<Vec<ComponentValue>, RhythmError> {
        let env = self.environment(breakpoint)?;
        values
            .iter()
            .map(|value| match value.as_length() {
                Some(length) if length.unit == LengthUnit::Pixels => {
                    convert_length(length, LengthUnit::RootEms, &env, None, None)
                        .map(ComponentValue::Length)
                        .map_err(RhythmError::from)
                }
                _ => Ok(value.clone()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RhythmConfig, SizeDefinition, TypographyConfig};
    use css_conditional_rules::ConfigValue;
    use css_media_queries::BreakpointDefinition;
    use css_values_units::ErrorKind;
    use std::collections::BTreeMap;

    fn typography() -> Result<Typography, RhythmError> {
        typography_with(ConfigValue::table([("default", Length::px(6.0)), ("tiny", Length::px(7.0))]))
    }

    fn typography_with(rhythm_unit: ConfigValue<Length>) -> Result<Typography, RhythmError> {
        let mut sizes = BTreeMap::new();
        sizes.insert(
            "number".to_owned(),
            ConfigValue::table([
                ("default", SizeDefinition::explicit(Length::px(12.0))),
                ("tiny", SizeDefinition::explicit(Length::px(14.0))),
            ]),
        );
        sizes.insert(
            "ratio".to_owned(),
            ConfigValue::table([(
                "default",
                SizeDefinition::scaled(Length::px(12.0), 2.0).with_ratio(2.0),
            )]),
        );
        Typography::new(TypographyConfig {
            breakpoints: vec![
                BreakpointDefinition::new("default", Length::px(0.0)),
                BreakpointDefinition::new("tiny", Length::em(20.0)),
                BreakpointDefinition::new("large", Length::em(64.0)),
            ],
            rhythm: RhythmConfig {
                rhythm_unit,
                body_font_size: ConfigValue::table([("default", Length::px(16.0)), ("tiny", Length::px(18.0))]),
                minimum_leading: Length::px(4.0),
            },
            sizes,
            scale_ratio: 1.25,
            browser_font_size: Length::px(16.0),
            px_fallback: false,
        })
    }

    fn with_calculator<T>(
        check: impl FnOnce(RhythmCalculator<'_>) -> Result<T, RhythmError>,
    ) -> Result<T, ErrorKind> {
        let built = typography().map_err(|err| err.kind())?;
        check(RhythmCalculator::new(&built)).map_err(|err| err.kind())
    }

    #[test]
    /// # Panics
    /// Panics if line counts ignore the minimum leading.
    fn counts_lines_with_leading() {
        assert_eq!(lines_for(12.0, 6.0, 4.0), 3);
        assert_eq!(lines_for(16.0, 6.0, 4.0), 4);
        assert_eq!(lines_for(12.0, 6.0, 0.0), 2);
        assert_eq!(lines_for(0.0, 6.0, 0.0), 1);
    }

    #[test]
    /// # Panics
    /// Panics if a larger font ever needs fewer lines.
    fn line_count_is_monotonic() {
        let mut previous = 0;
        for step in 0..400 {
            let font_px = f64::from(step) * 0.25;
            let lines = lines_for(font_px, 6.0, 4.0);
            assert!(lines >= previous, "{font_px}px needs {lines} lines, fewer than {previous}");
            assert!(f64::from(lines) * 6.0 >= font_px);
            previous = lines;
        }
    }

    #[test]
    /// # Panics
    /// Panics if named sizes resolve to the wrong lengths.
    fn resolves_sizes() {
        let number = SizeRef::from("number");
        assert_eq!(
            with_calculator(|calc| calc.get_size(&number, LengthUnit::RootEms, "default")),
            Ok(Length::rem(2.0))
        );
        assert_eq!(
            with_calculator(|calc| calc.get_size(&SizeRef::from("ratio"), LengthUnit::RootEms, "default")),
            Ok(Length::rem(8.0))
        );
        assert_eq!(
            with_calculator(|calc| calc.get_size(&SizeRef::from("body"), LengthUnit::Pixels, "large")),
            Ok(Length::px(18.0))
        );
        assert_eq!(
            with_calculator(|calc| calc.size(&SizeRef::from("bogus"), "default")),
            Err(ErrorKind::Type)
        );
    }

    #[test]
    /// # Panics
    /// Panics if the unknown-size message does not name the offending argument.
    fn unknown_size_message() {
        let message = typography().ok().and_then(|built| {
            RhythmCalculator::new(&built)
                .size(&SizeRef::from("bogus"), "default")
                .err()
                .map(|err| err.to_string())
        });
        assert_eq!(
            message.as_deref(),
            Some("get_size: `bogus` is a `string`, not a valid CSS length")
        );
    }

    #[test]
    /// # Panics
    /// Panics if rhythm heights are not converted against the rhythm unit.
    fn computes_rhythm_heights() {
        assert_eq!(
            with_calculator(|calc| calc.rhythm(1.0, None, LengthUnit::RootEms, "default")),
            Ok(Length::rem(1.0))
        );
        assert_eq!(
            with_calculator(|calc| calc.rhythm(2.0, None, LengthUnit::Pixels, "default")),
            Ok(Length::px(12.0))
        );
        assert_eq!(
            with_calculator(|calc| calc.rhythm(1.0, Some(Length::px(12.0)), LengthUnit::Ems, "default")),
            Ok(Length::em(0.5))
        );
        assert_eq!(
            with_calculator(|calc| calc.rhythm(1.5, None, LengthUnit::Pixels, "tiny")),
            Ok(Length::px(10.5))
        );
    }

    #[test]
    /// # Panics
    /// Panics if a rem rhythm unit measures rhythm heights differently from its px twin.
    fn rem_rhythm_unit_matches_px() -> Result<(), RhythmError> {
        let rem_built = typography_with(ConfigValue::table([("default", Length::rem(0.375))]))?;
        let px_built = typography_with(ConfigValue::table([("default", Length::px(6.0))]))?;
        for built in [&rem_built, &px_built] {
            let calc = RhythmCalculator::new(built);
            assert_eq!(Length::px(calc.rhythm_unit_px("default")?), Length::px(6.0));
            assert_eq!(calc.rhythm(1.0, None, LengthUnit::Ems, "default")?, Length::em(1.0));
            assert_eq!(calc.rhythm(1.0, None, LengthUnit::Percent, "default")?, Length::percent(100.0));
            assert_eq!(calc.rhythm(2.0, None, LengthUnit::Pixels, "default")?, Length::px(12.0));
        }
        Ok(())
    }

    #[test]
    /// # Panics
    /// Panics if negative sizes are given a line count.
    fn negative_sizes_have_no_lines() {
        let negative = SizeRef::Length(Length::px(-3.0));
        assert_eq!(
            with_calculator(|calc| calc.lines_for_size(&negative, "default")),
            Err(ErrorKind::Domain)
        );
    }

    #[test]
    /// # Panics
    /// Panics if px lengths are not converted or keywords are altered.
    fn converts_component_values_to_rem() {
        let values = [
            ComponentValue::Length(Length::px(24.0)),
            ComponentValue::Number(2.0),
            ComponentValue::Length(Length::percent(50.0)),
        ];
        let converted = with_calculator(|calc| calc.rem_values(&values, "tiny")).map(|list| {
            list.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
        });
        assert_eq!(converted, Ok("3.42857rem 2 50%".to_owned()));
    }
}
