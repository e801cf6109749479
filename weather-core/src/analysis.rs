use std::fmt;

use crate::model::Weather;

/// Warmest record. On ties the earliest one wins.
pub fn find_highest(records: &[Weather]) -> Option<&Weather> {
    records
        .iter()
        .reduce(|best, w| if w.temperature() > best.temperature() { w } else { best })
}

/// Coldest record. On ties the earliest one wins.
pub fn find_lowest(records: &[Weather]) -> Option<&Weather> {
    records
        .iter()
        .reduce(|best, w| if w.temperature() < best.temperature() { w } else { best })
}

/// Highest/lowest pair for a non-empty batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary<'a> {
    pub highest: &'a Weather,
    pub lowest: &'a Weather,
}

impl<'a> Summary<'a> {
    pub fn of(records: &'a [Weather]) -> Option<Self> {
        Some(Self { highest: find_highest(records)?, lowest: find_lowest(records)? })
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- City with the highest temperature: {} ({})",
            self.highest.city(),
            self.highest.temperature_with_unit()
        )?;
        writeln!(
            f,
            "- City with the lowest temperature: {} ({})",
            self.lowest.city(),
            self.lowest.temperature_with_unit()
        )
    }
}
