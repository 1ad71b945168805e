//! A parser for QIF (Quicken Interchange Format) files.
//!
//! ```
//! let doc = qif_parser::parse("!Type:Cat\nNGroceries\nE\n^\n").unwrap();
//! assert_eq!(1, doc.record_count());
//! ```

use log::{debug, trace};

use qif_core::{
    Account, ActiveAccount, Category, Document, Location, Section, Security, Tag, TransactionType,
};

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use normalize::normalize_splits;

pub mod cursor;
pub mod error;

mod account;
mod category;
mod grammar;
mod normalize;
mod security;
mod tag;
mod transaction;

/// Directives that may appear between sections and carry nothing of interest.
const IGNORED: [&str; 2] = ["!Option:AutoSwitch", "!Clear:AutoSwitch"];

#[derive(Debug, Default)]
struct ParseState<'i> {
    document: Document<'i>,
    /// The account transaction sections are currently read for.
    active: Option<ActiveAccount<'i>>,
}

impl<'i> ParseState<'i> {
    /// The first account list is the master list.  A later one-account list switches the
    /// account that following transaction sections belong to.
    fn accounts(&mut self, section: Section<Account<'i>>) -> ParseResult<()> {
        if section.is_empty() {
            return Ok(());
        }
        if self.document.accounts.is_none() {
            self.document.accounts = Some(section);
            return Ok(());
        }
        match section.records.as_slice() {
            [account] => {
                debug!(
                    "switching to account {:?} at line {}",
                    account.name, section.location.line
                );
                self.active = Some(ActiveAccount::from(account));
                Ok(())
            }
            _ => Err(ParseError::duplicate_master_section(
                "accounts",
                section.location,
            )),
        }
    }

    fn categories(&mut self, section: Section<Category<'i>>) -> ParseResult<()> {
        set_master(&mut self.document.categories, section, "categories")
    }

    fn tags(&mut self, section: Section<Tag<'i>>) -> ParseResult<()> {
        set_master(&mut self.document.tags, section, "tags")
    }

    fn securities(&mut self, section: Section<Security<'i>>) {
        if section.is_empty() {
            return;
        }
        match &mut self.document.securities {
            Some(securities) => securities.records.extend(section.records),
            None => self.document.securities = Some(section),
        }
    }

    /// Reads the section at `cursor`, returning the cursor past it.
    fn section(&mut self, cursor: Cursor<'i>) -> ParseResult<Cursor<'i>> {
        if let Some(next) = IGNORED.iter().find_map(|directive| cursor.header(directive)) {
            trace!("ignoring directive at line {}", cursor.location().line);
            return Ok(next);
        }

        if let Some((section, next)) = account::section(cursor)? {
            log_section("account", &section);
            self.accounts(section)?;
            return Ok(next);
        }
        if let Some((section, next)) = category::section(cursor)? {
            log_section("category", &section);
            self.categories(section)?;
            return Ok(next);
        }
        if let Some((section, next)) = security::section(cursor)? {
            log_section("security", &section);
            self.securities(section);
            return Ok(next);
        }
        if let Some((section, next)) = tag::section(cursor)? {
            log_section("tag", &section);
            self.tags(section)?;
            return Ok(next);
        }
        if let Some((section, next)) = transaction::account_section(cursor, self.active.as_ref())?
        {
            log_section("transaction", &section);
            self.document.transactions.extend(section.records);
            return Ok(next);
        }
        if let Some((section, next)) =
            transaction::section(cursor, TransactionType::Memorized, None)?
        {
            log_section("memorized transaction", &section);
            self.document.memorized.extend(section.records);
            return Ok(next);
        }
        if let Some((section, next)) = transaction::section(cursor, TransactionType::Prices, None)?
        {
            log_section("price", &section);
            self.document.prices.extend(section.records);
            return Ok(next);
        }

        Err(ParseError::unexpected_input(cursor.location()))
    }
}

fn set_master<R>(
    master: &mut Option<Section<R>>,
    section: Section<R>,
    name: &'static str,
) -> ParseResult<()> {
    if section.is_empty() {
        return Ok(());
    }
    if master.is_some() {
        return Err(ParseError::duplicate_master_section(name, section.location));
    }
    *master = Some(section);
    Ok(())
}

fn log_section<R>(kind: &str, section: &Section<R>) {
    debug!(
        "read {} section at line {} with {} records",
        kind,
        section.location.line,
        section.len()
    );
}

/// Parses a complete QIF document.
///
/// A leading byte order mark is skipped.  Parsing stops at the first error; no partial
/// document is returned.
pub fn parse(input: &str) -> ParseResult<Document<'_>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut state = ParseState::default();
    let mut cursor = Cursor::new(input).skip_blank_lines();
    while !cursor.is_empty() {
        cursor = state.section(cursor)?.skip_blank_lines();
    }

    debug!("read {} records", state.document.record_count());
    Ok(state.document)
}

/// Parses a QIF document held in a byte buffer, which must be UTF-8.
pub fn parse_bytes(input: &[u8]) -> ParseResult<Document<'_>> {
    match std::str::from_utf8(input) {
        Ok(input) => parse(input),
        Err(err) => {
            let valid = std::str::from_utf8(&input[..err.valid_up_to()]).unwrap_or_default();
            Err(ParseError::invalid_encoding(err, end_of(valid)))
        }
    }
}

/// The location just past the end of `text`.
fn end_of(text: &str) -> Location {
    let line = text.matches('\n').count() + 1;
    let column = text.rsplit('\n').next().map_or(0, |last| last.chars().count()) + 1;
    Location::new(line, column)
}
