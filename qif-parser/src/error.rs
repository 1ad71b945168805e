use std::error::Error;
use std::fmt;

use qif_core::Location;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A record had at least one field but lacked a mandatory one.
    MissingRequiredField {
        record: &'static str,
        field: &'static str,
    },
    /// A record's fields were not followed by a `^` line.
    MissingRecordTerminator { record: &'static str },
    /// A section's records were not followed by another section header or the end of input.
    MissingSectionTerminator { section: &'static str },
    /// No section could be read at this position.
    UnexpectedInput,
    /// A second account, category or tag list, or an account switch naming more than one
    /// account.
    DuplicateMasterSection { section: &'static str },
    /// A quoted price line that does not split into ticker, price and date.
    MalformedPriceQuote { line: String },
    /// The input is not UTF-8.
    InvalidEncoding,
}

#[derive(Debug)]
pub struct ParseError {
    /// The type of error.
    pub kind: ParseErrorKind,
    /// The (line, column) location of the error in the input.
    pub location: (usize, usize),
    /// The section being read when the error occurred, and the location of its header.
    pub section: Option<(&'static str, (usize, usize))>,
    source: Option<Box<dyn Error + 'static + Send + Sync>>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::MissingRequiredField { record, field } => {
                write!(f, "{}: missing field {:?}", record, field)?;
            }
            ParseErrorKind::MissingRecordTerminator { record } => {
                write!(f, "{}: missing record terminator", record)?;
            }
            ParseErrorKind::MissingSectionTerminator { section } => {
                write!(f, "{}: missing section terminator", section)?;
            }
            ParseErrorKind::UnexpectedInput => {
                write!(f, "unexpected input")?;
            }
            ParseErrorKind::DuplicateMasterSection { section } => {
                write!(f, "{}: list may only appear once", section)?;
            }
            ParseErrorKind::MalformedPriceQuote { line } => {
                write!(f, "malformed price quote {:?}", line)?;
            }
            ParseErrorKind::InvalidEncoding => {
                write!(f, "input is not valid UTF-8")?;
            }
        }
        write!(f, " at line {} column {}", self.location.0, self.location.1)?;
        if let Some((section, (line, _))) = self.section {
            write!(f, " (in {} section starting at line {})", section, line)?;
        }
        Ok(())
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl ParseError {
    fn new(kind: ParseErrorKind, location: Location) -> ParseError {
        ParseError {
            kind,
            location: location.line_col(),
            section: None,
            source: None,
        }
    }

    pub(crate) fn missing_field(
        record: &'static str,
        field: &'static str,
        location: Location,
    ) -> ParseError {
        ParseError::new(
            ParseErrorKind::MissingRequiredField { record, field },
            location,
        )
    }

    pub(crate) fn missing_record_terminator(record: &'static str, location: Location) -> ParseError {
        ParseError::new(ParseErrorKind::MissingRecordTerminator { record }, location)
    }

    pub(crate) fn missing_section_terminator(
        section: &'static str,
        location: Location,
    ) -> ParseError {
        ParseError::new(ParseErrorKind::MissingSectionTerminator { section }, location)
    }

    pub(crate) fn unexpected_input(location: Location) -> ParseError {
        ParseError::new(ParseErrorKind::UnexpectedInput, location)
    }

    pub(crate) fn duplicate_master_section(section: &'static str, location: Location) -> ParseError {
        ParseError::new(ParseErrorKind::DuplicateMasterSection { section }, location)
    }

    pub(crate) fn malformed_price_quote<T: ToString>(line: T, location: Location) -> ParseError {
        ParseError::new(
            ParseErrorKind::MalformedPriceQuote {
                line: line.to_string(),
            },
            location,
        )
    }

    pub(crate) fn invalid_encoding(err: std::str::Utf8Error, location: Location) -> ParseError {
        ParseError {
            source: Some(Box::new(err)),
            ..ParseError::new(ParseErrorKind::InvalidEncoding, location)
        }
    }

    /// Records the section an error was raised in, unless a section has already been recorded.
    pub(crate) fn in_section(mut self, section: &'static str, header: Location) -> ParseError {
        if self.section.is_none() {
            self.section = Some((section, header.line_col()));
        }
        self
    }
}
