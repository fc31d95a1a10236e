//! The declarative typography document and its validated form.

use crate::{BODY_SIZE, RHYTHM_UNIT_SIZE, RhythmError, SizeDefinition};
use css_conditional_rules::ConfigValue;
use css_media_queries::{BreakpointDefinition, BreakpointRegistry};
use css_values_units::{
    BROWSER_DEFAULT_FONT_SIZE_PX, Length, UnitEnvironment, compute_length_px,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const fn default_scale_ratio() -> f64 {
    1.25
}

const fn default_browser_font_size() -> Length {
    Length::px(BROWSER_DEFAULT_FONT_SIZE_PX)
}

const fn zero_leading() -> Length {
    Length::px(0.0)
}

/// Rhythm unit, body size and the smallest gap kept between a glyph box and its line box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RhythmConfig {
    pub rhythm_unit: ConfigValue<Length>,
    pub body_font_size: ConfigValue<Length>,
    #[serde(default = "zero_leading")]
    pub minimum_leading: Length,
}

/// Everything the engine needs, as written by the user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypographyConfig {
    pub breakpoints: Vec<BreakpointDefinition>,
    pub rhythm: RhythmConfig,
    #[serde(default)]
    pub sizes: BTreeMap<String, ConfigValue<SizeDefinition>>,
    /// Ratio for scale sizes that do not declare their own.
    #[serde(default = "default_scale_ratio")]
    pub scale_ratio: f64,
    /// Font size the user agent gives the root element.
    #[serde(default = "default_browser_font_size")]
    pub browser_font_size: Length,
    /// Emit a px declaration ahead of every relative one.
    #[serde(default)]
    pub px_fallback: bool,
}

/// A validated [`TypographyConfig`]. Immutable; calculators borrow it.
#[derive(Clone, Debug)]
pub struct Typography {
    config: TypographyConfig,
    registry: BreakpointRegistry,
    browser_font_size_px: f64,
}

impl Typography {
    /// Validate `config` and build its breakpoint registry.
    ///
    /// # Errors
    /// Returns `RhythmError::Breakpoint` for a malformed breakpoint table,
    /// `RhythmError::Resolve` when a rhythm or size value is not a non-empty table of
    /// registered breakpoints, `RhythmError::ReservedSize` when a size shadows `body` or
    /// `rhythm-unit` and `RhythmError::NonPositive` for a non-positive scale ratio,
    /// browser font size or rhythm unit.
    pub fn new(config: TypographyConfig) -> Result<Self, RhythmError> {
        let registry = BreakpointRegistry::new(config.breakpoints.iter().cloned())?;

        config.rhythm.rhythm_unit.validate(&registry, "rhythm_unit")?;
        config
            .rhythm
            .body_font_size
            .validate(&registry, "body_font_size")?;
        for (name, size) in &config.sizes {
            if name == BODY_SIZE || name == RHYTHM_UNIT_SIZE {
                return Err(RhythmError::ReservedSize { name: name.clone() });
            }
            size.validate(&registry, name)?;
        }

        if !(config.scale_ratio.is_finite() && config.scale_ratio > 0.0) {
            return Err(RhythmError::NonPositive {
                operation: "scale_ratio",
                value: config.scale_ratio.to_string(),
            });
        }
        let browser_font_size_px =
            compute_length_px(config.browser_font_size, &UnitEnvironment::default(), None)?;
        if browser_font_size_px <= 0.0 {
            return Err(RhythmError::NonPositive {
                operation: "browser_font_size",
                value: config.browser_font_size.to_string(),
            });
        }
        let mut units = config
            .rhythm
            .rhythm_unit
            .as_table()
            .into_iter()
            .flat_map(BTreeMap::values);
        if let Some(unit) = units.find(|unit| unit.value <= 0.0) {
            return Err(RhythmError::NonPositive {
                operation: "rhythm_unit",
                value: unit.to_string(),
            });
        }

        log::debug!(
            "typography: {} breakpoints, {} named sizes, ratio {}",
            registry.len(),
            config.sizes.len(),
            config.scale_ratio
        );
        Ok(Self {
            config,
            registry,
            browser_font_size_px,
        })
    }

    pub const fn config(&self) -> &TypographyConfig {
        &self.config
    }

    pub const fn registry(&self) -> &BreakpointRegistry {
        &self.registry
    }

    /// The user agent root font size in px.
    pub const fn browser_font_size_px(&self) -> f64 {
        self.browser_font_size_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_values_units::ErrorKind;

    fn config() -> TypographyConfig {
        TypographyConfig {
            breakpoints: vec![
                BreakpointDefinition::new("default", Length::px(0.0)),
                BreakpointDefinition::new("tiny", Length::em(20.0)),
            ],
            rhythm: RhythmConfig {
                rhythm_unit: ConfigValue::table([("default", Length::px(6.0))]),
                body_font_size: ConfigValue::table([("default", Length::px(16.0))]),
                minimum_leading: Length::px(4.0),
            },
            sizes: BTreeMap::new(),
            scale_ratio: 1.25,
            browser_font_size: Length::px(16.0),
            px_fallback: false,
        }
    }

    fn build(config: TypographyConfig) -> Result<(), ErrorKind> {
        Typography::new(config).map(|_| ()).map_err(|err| err.kind())
    }

    #[test]
    /// # Panics
    /// Panics if a well-formed document is rejected.
    fn accepts_valid_config() {
        assert_eq!(build(config()), Ok(()));
    }

    #[test]
    /// # Panics
    /// Panics if malformed tables pass validation.
    fn rejects_malformed_tables() {
        let mut scalar = config();
        scalar.rhythm.body_font_size = ConfigValue::Scalar(Length::px(16.0));
        assert_eq!(build(scalar), Err(ErrorKind::Type));

        let mut unknown = config();
        unknown.sizes.insert(
            "type1".to_owned(),
            ConfigValue::table([("huge", SizeDefinition::explicit(Length::px(18.0)))]),
        );
        assert_eq!(build(unknown), Err(ErrorKind::UnknownBreakpoint));
    }

    #[test]
    /// # Panics
    /// Panics if reserved names or non-positive scalars are accepted.
    fn rejects_reserved_and_non_positive() {
        let mut reserved = config();
        reserved.sizes.insert(
            "body".to_owned(),
            ConfigValue::table([("default", SizeDefinition::explicit(Length::px(18.0)))]),
        );
        assert_eq!(build(reserved), Err(ErrorKind::Type));

        let mut ratio = config();
        ratio.scale_ratio = 0.0;
        assert_eq!(build(ratio), Err(ErrorKind::Domain));

        let mut unit = config();
        unit.rhythm.rhythm_unit = ConfigValue::table([("default", Length::px(0.0))]);
        assert_eq!(build(unit), Err(ErrorKind::Domain));
    }

    #[test]
    /// # Panics
    /// Panics if optional fields do not take their defaults.
    fn fills_defaults_from_json() -> Result<(), serde_json::Error> {
        let document: TypographyConfig = serde_json::from_str(
            r#"{
                "breakpoints": [{"name": "default", "min_width": "0"}],
                "rhythm": {"rhythm_unit": {"default": "6px"}, "body_font_size": {"default": "16px"}}
            }"#,
        )?;
        assert!((document.scale_ratio - 1.25).abs() < 1e-9);
        assert_eq!(document.browser_font_size, Length::px(16.0));
        assert_eq!(document.rhythm.minimum_leading, Length::px(0.0));
        assert!(!document.px_fallback);
        Ok(())
    }
}
