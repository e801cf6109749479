use std::{fmt, str::FromStr};

use crate::error::InputError;

/// Temperature scale requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Metric,
    Imperial,
    Standard,
}

impl Unit {
    /// Value of the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
            Unit::Standard => "standard",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Metric => "°C",
            Unit::Imperial => "°F",
            Unit::Standard => "K",
        }
    }

    pub const fn all() -> &'static [Unit] {
        &[Unit::Metric, Unit::Imperial, Unit::Standard]
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = InputError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "metric" => Ok(Unit::Metric),
            "imperial" => Ok(Unit::Imperial),
            "standard" => Ok(Unit::Standard),
            _ => Err(InputError::InvalidUnit(value.to_string())),
        }
    }
}

/// One successful observation for a city.
#[derive(Debug, Clone, PartialEq)]
pub struct Weather {
    city: String,
    temperature: f64,
    description: String,
    unit: Unit,
}

impl Weather {
    pub fn new(
        city: impl Into<String>,
        temperature: f64,
        description: impl Into<String>,
        unit: Unit,
    ) -> Self {
        Self { city: city.into(), temperature, description: description.into(), unit }
    }

    /// City name exactly as the user typed it (trimmed).
    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// e.g. `12.3°C`
    pub fn temperature_with_unit(&self) -> String {
        format!("{}{}", format_temperature(self.temperature), self.unit.symbol())
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "City: {}", self.city)?;
        writeln!(f, "Temperature: {}", self.temperature_with_unit())?;
        writeln!(f, "Description: {}", self.description)
    }
}

/// Render a value with exactly one decimal digit.
///
/// Rounds half-up on the shortest decimal form of the value, so `287.15`
/// gives `287.2` even though the nearest `f64` sits just below it.
pub fn format_temperature(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let shortest = value.abs().to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    if frac_part.len() <= 1 {
        return format!("{value:.1}");
    }

    let mut frac = frac_part.bytes();
    let tenths = frac.next().unwrap_or(b'0');
    let round_up = frac.next().is_some_and(|d| d >= b'5');

    let mut digits: Vec<u8> = int_part.bytes().chain(std::iter::once(tenths)).collect();
    if round_up {
        increment_decimal(&mut digits);
    }

    let split = digits.len() - 1;
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!(
        "{sign}{}.{}",
        String::from_utf8_lossy(&digits[..split]),
        digits[split] as char
    )
}

fn increment_decimal(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
