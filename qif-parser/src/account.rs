use std::borrow::Cow;

use qif_core::{Account, Location, Section};

use crate::cursor::Cursor;
use crate::error::ParseResult;
use crate::grammar::{self, Grammar};

pub(crate) const HEADER: &str = "!Account";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Code {
    CreditLimit,
    Description,
    Name,
    StatementBalance,
    StatementBalanceDate,
    Type,
}

const CODES: [(Code, &str); 6] = [
    (Code::CreditLimit, "L"),
    (Code::Description, "D"),
    (Code::Name, "N"),
    (Code::StatementBalance, "$"),
    (Code::StatementBalanceDate, "/"),
    (Code::Type, "T"),
];

#[derive(Debug, Default)]
pub(crate) struct AccountGrammar<'i> {
    record: Account<'i>,
    seen: Vec<Code>,
}

impl<'i> Grammar<'i> for AccountGrammar<'i> {
    type Record = Account<'i>;

    const RECORD: &'static str = "account";

    fn field(&mut self, cursor: Cursor<'i>) -> ParseResult<Option<Cursor<'i>>> {
        for &(code, text) in CODES.iter() {
            if self.seen.contains(&code) {
                continue;
            }
            let matched = match code {
                Code::StatementBalanceDate => cursor.date_field(text),
                _ => cursor.field(text),
            };
            if let Some((value, next)) = matched {
                let value = Cow::Borrowed(value);
                match code {
                    Code::CreditLimit => self.record.credit_limit = value,
                    Code::Description => self.record.description = value,
                    Code::Name => self.record.name = value,
                    Code::StatementBalance => self.record.statement_balance = value,
                    Code::StatementBalanceDate => self.record.statement_balance_date = value,
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

    fn finish(self, location: Location) -> Account<'i> {
        Account {
            location,
            ..self.record
        }
    }
}

pub(crate) fn section(
    cursor: Cursor<'_>,
) -> ParseResult<Option<(Section<Account<'_>>, Cursor<'_>)>> {
    grammar::section(cursor, HEADER, "accounts", AccountGrammar::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use crate::grammar::record;
    use indoc::indoc;

    #[test]
    fn account_record() {
        let input = indoc!(
            "
            NVisa
            TCCard
            DRewards card
            L5,000.00
            $-1,250.00
            /12/31'20
            ^
            "
        );
        let (account, next) = record(Cursor::new(input), AccountGrammar::default())
            .unwrap()
            .unwrap();
        assert!(next.is_empty());
        assert_eq!(
            Account::builder()
                .location(Location::new(1, 1))
                .name("Visa".into())
                .ty("CCard".into())
                .description("Rewards card".into())
                .credit_limit("5,000.00".into())
                .statement_balance("-1,250.00".into())
                .statement_balance_date("12/31'20".into())
                .build(),
            account
        );
    }

    #[test]
    fn no_record() {
        let cursor = Cursor::new("^\n");
        assert!(record(cursor, AccountGrammar::default()).unwrap().is_none());
        let cursor = Cursor::new("!Type:Bank\n");
        assert!(record(cursor, AccountGrammar::default()).unwrap().is_none());
    }

    #[test]
    fn missing_name() {
        let err = record(Cursor::new("TBank\n^\n"), AccountGrammar::default()).unwrap_err();
        assert_eq!(
            ParseErrorKind::MissingRequiredField {
                record: "account",
                field: "name"
            },
            err.kind
        );
        assert_eq!((1, 1), err.location);
    }

    #[test]
    fn missing_terminator() {
        // a repeated code ends the record
        let input = "NChecking\nTBank\nNSavings\n^\n";
        let err = record(Cursor::new(input), AccountGrammar::default()).unwrap_err();
        assert_eq!(
            ParseErrorKind::MissingRecordTerminator { record: "account" },
            err.kind
        );
        assert_eq!((3, 1), err.location);
    }

    #[test]
    fn account_section() {
        let input = indoc!(
            "
            !Account
            NChecking
            TBank
            ^
            NSavings
            TBank
            ^
            !Type:Cat
            "
        );
        let (section, next) = section(Cursor::new(input)).unwrap().unwrap();
        assert_eq!(Location::new(1, 1), section.location);
        let names: Vec<_> = section.records.iter().map(|a| &*a.name).collect();
        assert_eq!(vec!["Checking", "Savings"], names);
        assert_eq!(Location::new(5, 1), section.records[1].location);
        assert_eq!("!Type:Cat\n", next.rest());

        assert!(super::section(Cursor::new("!Type:Bank\n")).unwrap().is_none());
    }

    #[test]
    fn one_record_per_name_line() {
        let input = "!Account\nNA\n^\nNB\nD\n^\nNC\n$0\n^\n";
        let (section, _) = section(Cursor::new(input)).unwrap().unwrap();
        let name_lines = input.lines().filter(|l| l.starts_with('N')).count();
        assert_eq!(name_lines, section.records.len());
    }

    #[test]
    fn missing_section_terminator() {
        let input = "!Account\nNChecking\n^\nXjunk\n";
        let err = section(Cursor::new(input)).unwrap_err();
        assert_eq!(
            ParseErrorKind::MissingSectionTerminator { section: "accounts" },
            err.kind
        );
        assert_eq!((4, 1), err.location);
        assert_eq!(Some(("accounts", (1, 1))), err.section);
    }
}
