use thiserror::Error;

/// One parsed input line: a station name and a temperature reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub station: String,
    pub temperature: f64,
}

/// Per-line failures. Always recoverable: the line is skipped and counted,
/// never aborting the scan.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("expected 2 fields, found {found}")]
    MalformedRow { found: usize },

    #[error("invalid temperature: '{raw}'")]
    InvalidNumber { raw: String },
}

/// Splits raw lines on a configured delimiter.
#[derive(Debug, Clone)]
pub struct MeasurementParser {
    delimiter: char,
}

impl MeasurementParser {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Parses `station<delim>temperature`. The station field is taken
    /// verbatim: case and whitespace sensitive, no normalization.
    pub fn parse(&self, line: &str) -> Result<Measurement, ParseError> {
        let fields: Vec<&str> = line.split(self.delimiter).collect();
        if fields.len() != 2 {
            return Err(ParseError::MalformedRow {
                found: fields.len(),
            });
        }

        let temperature = fields[1]
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidNumber {
                raw: fields[1].to_string(),
            })?;

        Ok(Measurement {
            station: fields[0].to_string(),
            temperature,
        })
    }
}
