//! Performance-data tokens in the format monitoring cores parse:
//! `'label'=value[UOM];[warn];[crit];[min];[max]`.

use std::fmt;

use serde_json::Number;

/// A single perfdata token.
///
/// Unset fields render empty but keep their `;` separators, per the
/// Monitoring Plugins Development Guidelines.
#[derive(Debug, Clone, PartialEq)]
pub struct PerfdataToken {
    label: String,
    value: Number,
    uom: Option<String>,
    warn: Option<i64>,
    crit: Option<i64>,
    min: Option<i64>,
    max: Option<i64>,
}

impl PerfdataToken {
    pub fn new(label: impl Into<String>, value: impl Into<Number>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            uom: None,
            warn: None,
            crit: None,
            min: None,
            max: None,
        }
    }

    /// Unit of measure, appended directly to the value (`s`, `%`, `B`, ...).
    #[must_use]
    pub fn with_uom(mut self, uom: impl Into<String>) -> Self {
        self.uom = Some(uom.into());
        self
    }

    #[must_use]
    pub fn with_warn(mut self, warn: i64) -> Self {
        self.warn = Some(warn);
        self
    }

    #[must_use]
    pub fn with_crit(mut self, crit: i64) -> Self {
        self.crit = Some(crit);
        self
    }

    #[must_use]
    pub fn with_min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }
}

impl fmt::Display for PerfdataToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'={}", self.label, self.value)?;
        if let Some(uom) = &self.uom {
            f.write_str(uom)?;
        }
        for field in [self.warn, self.crit, self.min, self.max] {
            f.write_str(";")?;
            if let Some(v) = field {
                write!(f, "{v}")?;
            }
        }
        Ok(())
    }
}

/// Join tokens into the space-separated string that follows the `|`
/// separator on the plugin's output line.
#[must_use]
pub fn render(tokens: &[PerfdataToken]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
