use std::borrow::Cow;

use qif_core::{Location, Section, Security};

use crate::cursor::Cursor;
use crate::error::ParseResult;
use crate::grammar::{self, Grammar};

pub(crate) const HEADER: &str = "!Type:Security";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Code {
    Description,
    Name,
    Risk,
    Ticker,
    Type,
}

const CODES: [(Code, &str); 5] = [
    (Code::Description, "D"),
    (Code::Name, "N"),
    (Code::Risk, "G"),
    (Code::Ticker, "S"),
    (Code::Type, "T"),
];

#[derive(Debug, Default)]
pub(crate) struct SecurityGrammar<'i> {
    record: Security<'i>,
    seen: Vec<Code>,
}

impl<'i> Grammar<'i> for SecurityGrammar<'i> {
    type Record = Security<'i>;

    const RECORD: &'static str = "security";

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
                    Code::Risk => self.record.risk = value,
                    Code::Ticker => self.record.ticker = value,
                    Code::Type => self.record.ty = value,
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

    fn finish(self, location: Location) -> Security<'i> {
        Security {
            location,
            ..self.record
        }
    }
}

pub(crate) fn section(
    cursor: Cursor<'_>,
) -> ParseResult<Option<(Section<Security<'_>>, Cursor<'_>)>> {
    grammar::section(cursor, HEADER, "securities", SecurityGrammar::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use indoc::indoc;

    #[test]
    fn security_section() {
        let input = indoc!(
            "
            !Type:Security
            NApple Inc.
            SAAPL
            TStock
            GGrowth
            ^
            NVanguard Total Stock Market
            SVTSAX
            TMutual Fund
            DIndex fund
            ^
            "
        );
        let (section, next) = section(Cursor::new(input)).unwrap().unwrap();
        assert!(next.is_empty());
        assert_eq!(
            vec![
                Security::builder()
                    .location(Location::new(2, 1))
                    .name("Apple Inc.".into())
                    .ticker("AAPL".into())
                    .ty("Stock".into())
                    .risk("Growth".into())
                    .build(),
                Security::builder()
                    .location(Location::new(7, 1))
                    .name("Vanguard Total Stock Market".into())
                    .ticker("VTSAX".into())
                    .ty("Mutual Fund".into())
                    .description("Index fund".into())
                    .build(),
            ],
            section.records
        );
    }

    #[test]
    fn missing_name() {
        let err = section(Cursor::new("!Type:Security\nSAAPL\n^\n")).unwrap_err();
        assert_eq!(
            ParseErrorKind::MissingRequiredField {
                record: "security",
                field: "name"
            },
            err.kind
        );
        assert_eq!((2, 1), err.location);
        assert_eq!(Some(("securities", (1, 1))), err.section);
    }
}
