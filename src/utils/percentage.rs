use std::ops::Deref;

use serde::Serialize;

/// Accuracy of a typing test. Always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Percentage(f64);

impl Percentage {
    pub fn new_opt(value: f64) -> Option<Percentage> {
        if (0. ..=100.).contains(&value) {
            Some(Percentage(value))
        } else {
            None
        }
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
