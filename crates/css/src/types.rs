use core::fmt;
use css_backgrounds_borders::Edge;
use css_media_queries::Breakpoint;
use css_values_units::{ComponentValue, Length};
use serde::Serialize;

/// Element a rule applies to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum RuleTarget {
    /// The root (`html`) element.
    Root,
    Body,
    /// Whatever selector the caller is emitting into.
    Current,
}

impl fmt::Display for RuleTarget {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Root => "html",
            Self::Body => "body",
            Self::Current => "&",
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum Property {
    FontSize,
    LineHeight,
    /// The `border` shorthand, or `border-<edge>` for one edge.
    Border(Option<Edge>),
    Padding(Option<Edge>),
    /// Any other property, by name.
    Other(String),
}

impl fmt::Display for Property {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontSize => formatter.write_str("font-size"),
            Self::LineHeight => formatter.write_str("line-height"),
            Self::Border(None) => formatter.write_str("border"),
            Self::Border(Some(edge)) => write!(formatter, "border-{edge}"),
            Self::Padding(None) => formatter.write_str("padding"),
            Self::Padding(Some(edge)) => write!(formatter, "padding-{edge}"),
            Self::Other(name) => formatter.write_str(name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Declaration {
    pub property: Property,
    /// Space separated component values.
    pub values: Vec<ComponentValue>,
}

impl Declaration {
    pub fn length(property: Property, length: Length) -> Self {
        Self {
            property,
            values: vec![ComponentValue::Length(length)],
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:", self.property)?;
        for value in &self.values {
            write!(formatter, " {value}")?;
        }
        Ok(())
    }
}

/// Declarations for one target at one breakpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmittedRule {
    pub breakpoint: Breakpoint,
    pub target: RuleTarget,
    /// In emission order; a px fallback precedes the declaration it backs up.
    pub declarations: Vec<Declaration>,
}

impl fmt::Display for EmittedRule {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.breakpoint.is_default() {
            write!(formatter, "@media (min-width: {}) ", self.breakpoint.min_width)?;
        }
        write!(formatter, "{} {{", self.target)?;
        for declaration in &self.declarations {
            write!(formatter, " {declaration};")?;
        }
        formatter.write_str(" }")
    }
}
