use std::borrow::Cow;
use std::convert::TryFrom;
use std::fmt;

use typed_builder::TypedBuilder;

use super::account::ActiveAccount;
use super::Location;

/// The `!Type:` a transaction section was declared with.
///
/// `Memorized` and `Prices` are not account types; QIF reuses the transaction layout for
/// memorized transactions and for security price quotes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum TransactionType {
    #[default]
    Bank,
    Cash,
    CreditCard,
    Investment,
    OtherAsset,
    OtherLiability,
    Memorized,
    Prices,
}

impl TransactionType {
    /// Types of sections that hold ordinary account transactions.
    pub const ACCOUNT_TYPES: [TransactionType; 6] = [
        TransactionType::Bank,
        TransactionType::Cash,
        TransactionType::CreditCard,
        TransactionType::Investment,
        TransactionType::OtherAsset,
        TransactionType::OtherLiability,
    ];

    pub fn code(self) -> &'static str {
        use TransactionType::*;
        match self {
            Bank => "Bank",
            Cash => "Cash",
            CreditCard => "CCard",
            Investment => "Invst",
            OtherAsset => "Oth A",
            OtherLiability => "Oth L",
            Memorized => "Memorized",
            Prices => "Prices",
        }
    }

    /// The section header introducing transactions of this type, e.g. `!Type:Bank`.
    pub fn header(self) -> &'static str {
        use TransactionType::*;
        match self {
            Bank => "!Type:Bank",
            Cash => "!Type:Cash",
            CreditCard => "!Type:CCard",
            Investment => "!Type:Invst",
            OtherAsset => "!Type:Oth A",
            OtherLiability => "!Type:Oth L",
            Memorized => "!Type:Memorized",
            Prices => "!Type:Prices",
        }
    }
}

impl TryFrom<&str> for TransactionType {
    type Error = ();

    fn try_from(code: &str) -> Result<Self, Self::Error> {
        use TransactionType::*;
        match code {
            "Bank" => Ok(Bank),
            "Cash" => Ok(Cash),
            "CCard" => Ok(CreditCard),
            "Invst" => Ok(Investment),
            "Oth A" => Ok(OtherAsset),
            "Oth L" => Ok(OtherLiability),
            "Memorized" => Ok(Memorized),
            "Prices" => Ok(Prices),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Represents a transaction record.
///
/// The same layout is used for account transactions, memorized transactions and price
/// quotes; which fields are meaningful depends on [`Transaction::ty`].
///
/// ```text
/// !Type:Bank
/// D1/ 1'23
/// T-1,500.00
/// PAcme Property Management
/// L[Savings]
/// ^
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, TypedBuilder)]
pub struct Transaction<'a> {
    #[builder(default)]
    pub location: Location,

    /// Type of the section the transaction was read from.
    #[builder(default)]
    pub ty: TransactionType,

    /// The account active when the transaction's section was read, if any.
    #[builder(default)]
    pub account: Option<ActiveAccount<'a>>,

    /// `A` address lines.  Up to five lines; a sixth line is an optional message.
    #[builder(default)]
    pub address: Vec<Cow<'a, str>>,

    /// `T` amount.
    #[builder(default)]
    pub amount_t_code: Cow<'a, str>,

    /// `U` amount, an alternate rendering of the `T` amount.
    #[builder(default)]
    pub amount_u_code: Cow<'a, str>,

    /// `1` through `7` budget amounts of a memorized transaction.
    #[builder(default)]
    pub budget_amounts: Vec<Cow<'a, str>>,

    /// `L` category (category, subcategory or class).
    #[builder(default)]
    pub category: Cow<'a, str>,

    /// `C` cleared status.
    #[builder(default)]
    pub cleared_status: Cow<'a, str>,

    /// `O` commission.
    #[builder(default)]
    pub commission: Cow<'a, str>,

    /// `D` date, exactly as written, e.g. `1/ 1'23`.
    #[builder(default)]
    pub date: Cow<'a, str>,

    /// `I` interest (or share price).
    #[builder(default)]
    pub interest: Cow<'a, str>,

    /// `M` memo.
    #[builder(default)]
    pub memo: Cow<'a, str>,

    /// `K` memorized transaction flag.
    #[builder(default)]
    pub memorized_flag: Cow<'a, str>,

    /// `Q` quantity of shares.
    #[builder(default)]
    pub quantity: Cow<'a, str>,

    /// `P` payee.
    #[builder(default)]
    pub payee: Cow<'a, str>,

    /// Price from a quoted price line, with thousands separators removed.
    #[builder(default)]
    pub price: Cow<'a, str>,

    /// `N` check or reference number.
    #[builder(default)]
    pub ref_no: Cow<'a, str>,

    #[builder(default)]
    pub splits: Vec<Split<'a>>,

    /// `Y` security ticker, or the ticker of a quoted price line.
    #[builder(default)]
    pub ticker: Cow<'a, str>,

    /// `L[...]` transfer account, brackets removed.
    #[builder(default)]
    pub to_account: Cow<'a, str>,
}

/// One leg of a split transaction.
///
/// A split is opened by `S` (category or `[transfer account]`) and filled in by the `$` amount
/// and `E` memo lines that follow it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, TypedBuilder)]
pub struct Split<'a> {
    #[builder(default)]
    pub location: Location,

    /// Transfer account, from an `S[...]` line.
    #[builder(default)]
    pub account: Cow<'a, str>,

    /// `$` amount.
    #[builder(default)]
    pub amount: Cow<'a, str>,

    /// `S` category.  Empty when the split is a transfer.
    #[builder(default)]
    pub category: Cow<'a, str>,

    /// `E` memo.
    #[builder(default)]
    pub memo: Cow<'a, str>,
}
