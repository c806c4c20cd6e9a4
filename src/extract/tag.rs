use anyhow::{Context, Result};
use regex::Regex;

use crate::utils::percentage::Percentage;

pub const DEFAULT_LAYOUT: &str = "colemak_DH";

/// Matches result tags such as `{layout=colemak_DH,wpm=87.5,accuracy=96%}`.
/// Numbers are integers or have exactly one decimal digit.
#[derive(Debug, Clone)]
pub struct TagPattern {
    regex: Regex,
}

impl TagPattern {
    pub fn new(layout: &str) -> Result<Self> {
        let regex = Regex::new(&format!(
            r"\{{layout={},wpm=(\d+(?:\.\d)?),accuracy=(\d+(?:\.\d)?)%\}}",
            regex::escape(layout)
        ))?;
        Ok(Self { regex })
    }

    /// Returns wpm and accuracy of the first tag in `text`. Tags with accuracy above 100% are
    /// not considered matches.
    pub fn parse(&self, text: &str) -> Result<Option<(f64, Percentage)>> {
        let Some(captures) = self.regex.captures(text) else {
            return Ok(None);
        };
        let wpm = captures[1]
            .parse::<f64>()
            .with_context(|| format!("Invalid wpm {}", &captures[1]))?;
        let accuracy = captures[2]
            .parse::<f64>()
            .with_context(|| format!("Invalid accuracy {}", &captures[2]))?;
        Ok(Percentage::new_opt(accuracy).map(|accuracy| (wpm, accuracy)))
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        Self::new(DEFAULT_LAYOUT).expect("Default layout is a valid pattern")
    }
}
