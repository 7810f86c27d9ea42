use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::AppError;

/// Lure categories offered in the numbered menu, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LureType {
    Jig,
    Spinner,
    Spoon,
    Crankbait,
    Fly,
    Swimbait,
    Popper,
    Jerkbait,
}

impl LureType {
    pub const ALL: [LureType; 8] = [
        LureType::Jig,
        LureType::Spinner,
        LureType::Spoon,
        LureType::Crankbait,
        LureType::Fly,
        LureType::Swimbait,
        LureType::Popper,
        LureType::Jerkbait,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LureType::Jig => "jig",
            LureType::Spinner => "spinner",
            LureType::Spoon => "spoon",
            LureType::Crankbait => "crankbait",
            LureType::Fly => "fly",
            LureType::Swimbait => "swimbait",
            LureType::Popper => "popper",
            LureType::Jerkbait => "jerkbait",
        }
    }

    /// Looks up a 1-based menu number.
    pub fn from_menu_index(index: usize) -> Option<LureType> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Everything the angler types in for one trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripFields {
    pub species: String,
    pub size: f64,
    pub water_clarity: String,
    pub retrieval_speed: String,
    pub lure_type: LureType,
    pub lure_colour: String,
}

/// Prompts on `output` and reads answers line by line from `input`.
///
/// Bad answers never produce an error: the prompter prints a correction and
/// asks again, with no retry limit. The only failures are I/O errors and the
/// input stream ending.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Runs every prompt in record order.
    pub fn collect_trip(&mut self) -> Result<TripFields, AppError> {
        let species = self.collect_species()?;
        let size = self.collect_size()?;
        let water_clarity = self.collect_yes_no("Is the water clear?", "clear", "turbid")?;
        let retrieval_speed = self.collect_yes_no("Was the retrieve fast?", "fast", "slow")?;
        let lure_type = self.collect_lure_type()?;
        let lure_colour = self.collect_lure_colour()?;

        Ok(TripFields {
            species,
            size,
            water_clarity,
            retrieval_speed,
            lure_type,
            lure_colour,
        })
    }

    pub fn collect_species(&mut self) -> Result<String, AppError> {
        loop {
            let answer = self.ask("Enter your fish species: ", "fish species")?;
            if answer.is_empty() {
                self.say("Please enter a species name.")?;
                continue;
            }
            self.say(&format!("Fish species: {}", answer))?;
            return Ok(answer);
        }
    }

    pub fn collect_size(&mut self) -> Result<f64, AppError> {
        loop {
            let answer = self.ask("Enter the fish size in cm: ", "fish size")?;
            match answer.parse::<f64>() {
                Ok(size) if size.is_finite() && size > 0.0 => {
                    self.say(&format!("Fish size: {} cm", size))?;
                    return Ok(size);
                }
                Ok(_) => self.say("Size must be a number greater than zero.")?,
                Err(e) => {
                    debug!("Rejected size {:?}: {}", answer, e);
                    self.say("Invalid size, please enter a number such as 32.5.")?;
                }
            }
        }
    }

    /// Asks a (y/n) question and maps the answer onto one of two values.
    pub fn collect_yes_no(
        &mut self,
        question: &str,
        true_value: &str,
        false_value: &str,
    ) -> Result<String, AppError> {
        let prompt = format!("{} (y/n): ", question);
        loop {
            let answer = self.ask(&prompt, question)?.to_lowercase();
            let value = match answer.as_str() {
                "y" => true_value,
                "n" => false_value,
                _ => {
                    self.say("Please answer 'y' or 'n'.")?;
                    continue;
                }
            };
            self.say(&format!("Recorded: {}", value))?;
            return Ok(value.to_string());
        }
    }

    pub fn collect_lure_type(&mut self) -> Result<LureType, AppError> {
        self.say("Lure types:")?;
        for (i, lure) in LureType::ALL.iter().enumerate() {
            self.say(&format!("  {}. {}", i + 1, lure.as_str()))?;
        }

        let prompt = format!("Select a lure type (1-{}): ", LureType::ALL.len());
        loop {
            let answer = self.ask(&prompt, "lure type")?;
            match answer.parse::<usize>().ok().and_then(LureType::from_menu_index) {
                Some(lure) => {
                    self.say(&format!("Lure type: {}", lure.as_str()))?;
                    return Ok(lure);
                }
                None => self.say(&format!(
                    "Please enter a number between 1 and {}.",
                    LureType::ALL.len()
                ))?,
            }
        }
    }

    pub fn collect_lure_colour(&mut self) -> Result<String, AppError> {
        loop {
            let answer = self.ask(
                "Enter the lure colour(s), separated by commas: ",
                "lure colour",
            )?;
            match normalize_colours(&answer) {
                Some(colours) => {
                    self.say(&format!("Lure colour: {}", colours))?;
                    return Ok(colours);
                }
                None => self.say("Colours may only contain letters and digits, e.g. red, green.")?,
            }
        }
    }

    fn ask(&mut self, prompt: &str, field: &str) -> Result<String, AppError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Err(AppError::InputClosed(field.to_string()));
        }
        Ok(buffer.trim().to_string())
    }

    fn say(&mut self, line: &str) -> Result<(), AppError> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }
}

/// Splits a comma-separated colour list into trimmed, lower-cased tokens.
/// Returns `None` if any token is empty or not purely alphanumeric, so text
/// such as `=SUM(A1)` never reaches the sheet.
pub fn normalize_colours(input: &str) -> Option<String> {
    let tokens: Vec<String> = input
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .collect();

    let valid = tokens
        .iter()
        .all(|t| !t.is_empty() && t.chars().all(char::is_alphanumeric));

    valid.then(|| tokens.join(","))
}
