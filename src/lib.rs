//! Rust tooling surrounding QIF, the Quicken Interchange Format.
//!
//! This crate bundles the data model ([`qif_core`]), the parser ([`qif_parser`]) and the
//! renderer ([`qif_render`]).

pub use qif_core;
pub use qif_parser;
pub use qif_render;

pub use qif_core::Document;
pub use qif_parser::{normalize_splits, parse, parse_bytes, ParseError};

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn parse_normalize_render() {
        let input = indoc!(
            "
            !Account
            NChecking
            TBank
            ^
            !Type:Cat
            NGroceries
            E
            ^
            !Type:Bank
            D1/ 1'23
            T-42.17
            PCorner Market
            LGroceries
            ^
            "
        );
        let mut doc = parse(input).unwrap();
        doc.transactions = normalize_splits(doc.transactions);
        assert_eq!(3, doc.record_count());

        let split = &doc.transactions[0].splits[0];
        assert_eq!("Groceries", split.category);
        assert_eq!("-42.17", split.amount().unwrap().unwrap().to_string());

        let mut out = Vec::new();
        qif_render::render(&mut out, &doc).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        let again = parse(&rendered).unwrap();
        assert_eq!(doc.record_count(), again.record_count());
        assert_eq!(doc.accounts, again.accounts);
    }
}
