use std::borrow::Cow;

use qif_core::{Location, Section, Tag};

use crate::cursor::Cursor;
use crate::error::ParseResult;
use crate::grammar::{self, Grammar};

pub(crate) const HEADER: &str = "!Type:Tag";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Code {
    Description,
    Name,
}

const CODES: [(Code, &str); 2] = [(Code::Description, "D"), (Code::Name, "N")];

#[derive(Debug, Default)]
pub(crate) struct TagGrammar<'i> {
    record: Tag<'i>,
    seen: Vec<Code>,
}

impl<'i> Grammar<'i> for TagGrammar<'i> {
    type Record = Tag<'i>;

    const RECORD: &'static str = "tag";

    fn field(&mut self, cursor: Cursor<'i>) -> ParseResult<Option<Cursor<'i>>> {
        for &(code, text) in CODES.iter() {
            if self.seen.contains(&code) {
                continue;
            }
            if let Some((value, next)) = cursor.field(text) {
                let value = Cow::Borrowed(value);
                match code {
                    Code::Description => self.record.description = value,
                    Code::Name => self.record.name = value,
                }
                self.seen.push(code);
                return Ok(Some(next));
            }
        }
        Ok(None)
    }

    fn missing_field(&self) -> Option<&'static str> {
        if self.seen.contains(&Code::Name) {
            None
        } else {
            Some("name")
        }
    }

    fn finish(self, location: Location) -> Tag<'i> {
        Tag {
            location,
            ..self.record
        }
    }
}

pub(crate) fn section(cursor: Cursor<'_>) -> ParseResult<Option<(Section<Tag<'_>>, Cursor<'_>)>> {
    grammar::section(cursor, HEADER, "tags", TagGrammar::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn tag_section() {
        let input = "!Type:Tag\nNVacation\nDTrips away from home\n^\nNBusiness\n^\n!Type:Bank\n";
        let (section, next) = section(Cursor::new(input)).unwrap().unwrap();
        assert_eq!(2, section.len());
        assert_eq!("Vacation", section.records[0].name);
        assert_eq!("Trips away from home", section.records[0].description);
        assert_eq!("", section.records[1].description);
        assert_eq!("!Type:Bank\n", next.rest());
    }

    #[test]
    fn missing_name() {
        let err = section(Cursor::new("!Type:Tag\nDNo name\n^\n")).unwrap_err();
        assert_eq!(
            ParseErrorKind::MissingRequiredField {
                record: "tag",
                field: "name"
            },
            err.kind
        );
    }

    #[test]
    fn name_appears_once() {
        let err = section(Cursor::new("!Type:Tag\nNVacation\nNWork\n^\n")).unwrap_err();
        assert_eq!(
            ParseErrorKind::MissingRecordTerminator { record: "tag" },
            err.kind
        );
        assert_eq!((3, 1), err.location);
    }
}
