use typed_builder::TypedBuilder;

pub use account::{Account, AccountType, ActiveAccount, UnknownAccountType};
pub use category::Category;
pub use security::Security;
pub use tag::Tag;
pub use transaction::{Split, Transaction, TransactionType};

pub mod account;
pub mod amount;
pub mod category;
pub mod security;
pub mod tag;
pub mod transaction;

/// A (line, column) position in the QIF input.  Both are 1-based.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Location { line, column }
    }

    pub fn line_col(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}

/// A run of same-kind records introduced by a section header such as `!Account` or
/// `!Type:Cat`.  Records are kept in the order they appear in the input.
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct Section<R> {
    /// Position of the section header.
    #[builder(default)]
    pub location: Location,

    #[builder(default)]
    pub records: Vec<R>,
}

impl<R> Section<R> {
    pub fn new(location: Location) -> Self {
        Section {
            location,
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Represents a complete QIF file.
///
/// The master account, category and tag lists may each appear at most once.  Security lists
/// may repeat in the input (one per broker, for example) and are merged into a single section
/// here.  Transactions, memorized transactions and prices each keep their input order.
#[derive(Clone, Debug, Default, PartialEq, TypedBuilder)]
pub struct Document<'a> {
    #[builder(default)]
    pub accounts: Option<Section<Account<'a>>>,

    #[builder(default)]
    pub categories: Option<Section<Category<'a>>>,

    #[builder(default)]
    pub securities: Option<Section<Security<'a>>>,

    #[builder(default)]
    pub tags: Option<Section<Tag<'a>>>,

    #[builder(default)]
    pub transactions: Vec<Transaction<'a>>,

    /// Records from `!Type:Memorized` sections.
    #[builder(default)]
    pub memorized: Vec<Transaction<'a>>,

    /// Records from `!Type:Prices` sections.
    #[builder(default)]
    pub prices: Vec<Transaction<'a>>,
}

impl<'a> Document<'a> {
    /// Total number of records held by the document, across every bucket.
    pub fn record_count(&self) -> usize {
        self.accounts.as_ref().map_or(0, Section::len)
            + self.categories.as_ref().map_or(0, Section::len)
            + self.securities.as_ref().map_or(0, Section::len)
            + self.tags.as_ref().map_or(0, Section::len)
            + self.transactions.len()
            + self.memorized.len()
            + self.prices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_count() {
        let doc = Document::builder()
            .accounts(Some(
                Section::builder()
                    .records(vec![
                        Account::builder().name("Checking".into()).build(),
                        Account::builder().name("Savings".into()).build(),
                    ])
                    .build(),
            ))
            .tags(Some(Section::new(Location::new(9, 1))))
            .prices(vec![Transaction::builder().ty(TransactionType::Prices).build()])
            .build();
        assert_eq!(3, doc.record_count());
        assert_eq!(0, Document::default().record_count());
    }
}
