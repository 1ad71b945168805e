//! Record and section framing shared by every record grammar.
//!
//! A record is a run of coded field lines closed by `^`.  A section is a header line followed
//! by any number of records, and ends where the next header (or the end of input) begins.

use qif_core::{Location, Section};

use crate::cursor::Cursor;
use crate::error::{ParseError, ParseResult};

/// One kind of QIF record.  Each grammar owns its own table of field codes.
pub(crate) trait Grammar<'i> {
    type Record;

    /// Name of the record kind, for diagnostics.
    const RECORD: &'static str;

    /// Tries the grammar's field codes against the line at `cursor`, in priority order.
    /// Returns the cursor past the line if one of them matched.
    fn field(&mut self, cursor: Cursor<'i>) -> ParseResult<Option<Cursor<'i>>>;

    /// The first required field that has not been seen, if any.
    fn missing_field(&self) -> Option<&'static str>;

    fn finish(self, location: Location) -> Self::Record;
}

/// Reads a single record.
///
/// Returns `Ok(None)` when not a single field matched, which is how the end of a section's
/// records is detected.
pub(crate) fn record<'i, G: Grammar<'i>>(
    cursor: Cursor<'i>,
    mut grammar: G,
) -> ParseResult<Option<(G::Record, Cursor<'i>)>> {
    let start = cursor.location();

    let mut cursor = cursor;
    let mut found = false;
    while let Some(next) = grammar.field(cursor)? {
        cursor = next;
        found = true;
    }
    if !found {
        return Ok(None);
    }

    if let Some(field) = grammar.missing_field() {
        return Err(ParseError::missing_field(G::RECORD, field, start));
    }

    let cursor = cursor
        .end_of_record()
        .ok_or_else(|| ParseError::missing_record_terminator(G::RECORD, cursor.location()))?;

    Ok(Some((grammar.finish(start), cursor)))
}

/// Reads a section introduced by `header`, creating a fresh grammar for every record.
///
/// Returns `Ok(None)` if the input does not start with `header`.
pub(crate) fn section<'i, G, F>(
    cursor: Cursor<'i>,
    header: &str,
    name: &'static str,
    grammar: F,
) -> ParseResult<Option<(Section<G::Record>, Cursor<'i>)>>
where
    G: Grammar<'i>,
    F: Fn() -> G,
{
    let location = cursor.location();
    let mut cursor = match cursor.header(header) {
        Some(cursor) => cursor,
        None => return Ok(None),
    };

    let mut section = Section::new(location);
    loop {
        let at = cursor.skip_blank_lines();
        match record(at, grammar()).map_err(|e| e.in_section(name, location))? {
            Some((record, next)) => {
                section.records.push(record);
                cursor = next;
            }
            None => break,
        }
    }

    let cursor = cursor.end_of_section().ok_or_else(|| {
        ParseError::missing_section_terminator(name, cursor.skip_blank_lines().location())
            .in_section(name, location)
    })?;

    Ok(Some((section, cursor)))
}
