use anyhow::Result;
use std::io::{self, BufRead, Write};
use weather_core::{Unit, parse_cities};

pub const CITIES_PROMPT: &str = "Enter city names (separated by commas):";
pub const UNIT_PROMPT: &str =
    "Choose units (metric for Celsius, imperial for Fahrenheit, or standard for Kelvin):";

/// Line-oriented question/answer over any reader and writer.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one trimmed line. End of input reads as "".
    pub fn ask(&mut self, question: &str) -> io::Result<String> {
        writeln!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn answer_or_ask(&mut self, preset: Option<String>, question: &str) -> io::Result<String> {
        match preset {
            Some(answer) => Ok(answer),
            None => self.ask(question),
        }
    }
}

/// What the user asked for.
#[derive(Debug, PartialEq)]
pub struct Request {
    pub cities: Vec<String>,
    pub unit: Unit,
}

/// Gather and validate the city list, then the unit.
///
/// Values given on the command line skip their prompt. The unit is not asked
/// for when the city list is already invalid.
pub fn read_request<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    cities: Option<String>,
    unit: Option<String>,
) -> Result<Request> {
    let cities = parse_cities(&prompt.answer_or_ask(cities, CITIES_PROMPT)?)?;
    let unit: Unit = prompt.answer_or_ask(unit, UNIT_PROMPT)?.parse()?;

    Ok(Request { cities, unit })
}
