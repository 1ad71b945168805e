use std::borrow::Cow;

use qif_core::{ActiveAccount, Location, Section, Split, Transaction, TransactionType};

use crate::cursor::Cursor;
use crate::error::{ParseError, ParseResult};
use crate::grammar::{self, Grammar};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Code {
    Address,
    ClearedStatus,
    Commission,
    Date,
    Interest,
    Memo,
    MemorizedFlag,
    Payee,
    PriceQuote,
    Quantity,
    RefNo,
    SplitAmount,
    SplitCategory,
    SplitMemo,
    AmountTCode,
    Ticker,
    AmountUCode,
    ToAccount,
    Category,
}

impl Code {
    /// Codes that may appear any number of times in a record.
    fn repeats(self) -> bool {
        matches!(
            self,
            Code::Address | Code::SplitAmount | Code::SplitCategory | Code::SplitMemo
        )
    }
}

// Order matters: `L[` must be tried before `L`.
const CODES: [(Code, &str); 19] = [
    (Code::Address, "A"),
    (Code::ClearedStatus, "C"),
    (Code::Commission, "O"),
    (Code::Date, "D"),
    (Code::Interest, "I"),
    (Code::Memo, "M"),
    (Code::MemorizedFlag, "K"),
    (Code::Payee, "P"),
    (Code::PriceQuote, "\""),
    (Code::Quantity, "Q"),
    (Code::RefNo, "N"),
    (Code::SplitAmount, "$"),
    (Code::SplitCategory, "S"),
    (Code::SplitMemo, "E"),
    (Code::AmountTCode, "T"),
    (Code::Ticker, "Y"),
    (Code::AmountUCode, "U"),
    (Code::ToAccount, "L["),
    (Code::Category, "L"),
];

/// Budget amount codes, read in memorized transactions only.
const BUDGET_CODES: [&str; 7] = ["1", "2", "3", "4", "5", "6", "7"];

#[derive(Debug)]
pub(crate) struct TransactionGrammar<'i> {
    record: Transaction<'i>,
    seen: Vec<Code>,
}

impl<'i> TransactionGrammar<'i> {
    pub(crate) fn new(ty: TransactionType, account: Option<ActiveAccount<'i>>) -> Self {
        TransactionGrammar {
            record: Transaction {
                ty,
                account,
                ..Transaction::default()
            },
            seen: Vec::new(),
        }
    }

    /// The split that `$` and `E` lines belong to: the most recently opened one, or a new one
    /// if the record has none yet.
    fn open_split(&mut self, location: Location) -> &mut Split<'i> {
        let splits = &mut self.record.splits;
        if splits.is_empty() {
            splits.push(Split {
                location,
                ..Split::default()
            });
        }
        let last = splits.len() - 1;
        &mut splits[last]
    }

    fn apply(&mut self, code: Code, value: &'i str, location: Location) -> ParseResult<()> {
        let record = &mut self.record;
        match code {
            Code::Address => record.address.push(value.into()),
            Code::ClearedStatus => record.cleared_status = value.into(),
            Code::Commission => record.commission = value.into(),
            Code::Date => record.date = value.into(),
            Code::Interest => record.interest = value.into(),
            Code::Memo => record.memo = value.into(),
            Code::MemorizedFlag => record.memorized_flag = value.into(),
            Code::Payee => record.payee = value.into(),
            Code::PriceQuote => {
                let (ticker, price, date) = price_quote(value)
                    .ok_or_else(|| ParseError::malformed_price_quote(value, location))?;
                record.ticker = ticker.into();
                record.price = price;
                record.date = date.into();
                // the quote stands in for the date, amount and ticker lines
                self.seen
                    .extend_from_slice(&[Code::Date, Code::AmountTCode, Code::Ticker]);
            }
            Code::Quantity => record.quantity = value.into(),
            Code::RefNo => record.ref_no = value.into(),
            Code::SplitAmount => self.open_split(location).amount = value.into(),
            Code::SplitCategory => {
                let mut split = Split {
                    location,
                    ..Split::default()
                };
                if value.starts_with('[') {
                    split.account = value.trim_matches(|c: char| c == '[' || c == ']').into();
                } else {
                    split.category = value.into();
                }
                record.splits.push(split);
            }
            Code::SplitMemo => self.open_split(location).memo = value.into(),
            Code::AmountTCode => record.amount_t_code = value.into(),
            Code::Ticker => record.ticker = value.into(),
            Code::AmountUCode => record.amount_u_code = value.into(),
            Code::ToAccount => record.to_account = value.trim_end_matches(']').into(),
            Code::Category => record.category = value.into(),
        }
        Ok(())
    }
}

impl<'i> Grammar<'i> for TransactionGrammar<'i> {
    type Record = Transaction<'i>;

    const RECORD: &'static str = "transaction";

    fn field(&mut self, cursor: Cursor<'i>) -> ParseResult<Option<Cursor<'i>>> {
        for &(code, text) in CODES.iter() {
            if self.seen.contains(&code) {
                continue;
            }
            let matched = match code {
                Code::Date => cursor.date_field(text),
                _ => cursor.field(text),
            };
            if let Some((value, next)) = matched {
                self.apply(code, value, cursor.location())?;
                if !code.repeats() {
                    self.seen.push(code);
                }
                return Ok(Some(next));
            }
        }

        if self.record.ty == TransactionType::Memorized {
            if let Some((value, next)) = BUDGET_CODES.iter().find_map(|code| cursor.field(code)) {
                self.record.budget_amounts.push(value.into());
                return Ok(Some(next));
            }
        }

        Ok(None)
    }

    fn missing_field(&self) -> Option<&'static str> {
        let (code, field) = match self.record.ty {
            TransactionType::Memorized => (Code::MemorizedFlag, "memorized"),
            _ => (Code::Date, "date"),
        };
        if self.seen.contains(&code) {
            None
        } else {
            Some(field)
        }
    }

    fn finish(self, location: Location) -> Transaction<'i> {
        Transaction {
            location,
            ..self.record
        }
    }
}

/// Splits the remainder of a quoted price line into ticker, price and date.
///
/// Quicken writes `"AAPL",1,234.50,"1/ 1'23"`; the bare form `"AAPL""150.25""1/ 1'23` is read
/// as well.  Commas are removed from the price, and the date must be a whole date token.
fn price_quote(value: &str) -> Option<(&str, Cow<'_, str>, &str)> {
    let mut pieces = value
        .split('"')
        .filter(|piece| !piece.chars().all(|c| c == ',' || c.is_whitespace()));
    let ticker = pieces.next()?;
    let price = pieces.next()?;
    let date = pieces.next()?;
    if pieces.next().is_some() {
        return None;
    }

    let date = date.trim();
    match Cursor::new(date).date('/') {
        Some((_, rest)) if rest.is_empty() => {}
        _ => return None,
    }

    let price = price.trim_matches(|c: char| c == ',' || c.is_whitespace());
    let price = if price.contains(',') {
        Cow::Owned(price.replace(',', ""))
    } else {
        Cow::Borrowed(price)
    };
    Some((ticker, price, date))
}

fn section_name(ty: TransactionType) -> &'static str {
    match ty {
        TransactionType::Memorized => "memorized",
        TransactionType::Prices => "prices",
        _ => "transactions",
    }
}

/// Reads a section of `ty` transactions, recording `account` as the account they belong to.
pub(crate) fn section<'i>(
    cursor: Cursor<'i>,
    ty: TransactionType,
    account: Option<&ActiveAccount<'i>>,
) -> ParseResult<Option<(Section<Transaction<'i>>, Cursor<'i>)>> {
    grammar::section(cursor, ty.header(), section_name(ty), || {
        TransactionGrammar::new(ty, account.cloned())
    })
}

/// Reads a section of account transactions (`!Type:Bank`, `!Type:CCard`, ...).
pub(crate) fn account_section<'i>(
    cursor: Cursor<'i>,
    account: Option<&ActiveAccount<'i>>,
) -> ParseResult<Option<(Section<Transaction<'i>>, Cursor<'i>)>> {
    for &ty in TransactionType::ACCOUNT_TYPES.iter() {
        if let Some(found) = section(cursor, ty, account)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}
