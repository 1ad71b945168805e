use std::borrow::Cow;
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;

use typed_builder::TypedBuilder;

use super::Location;

/// Represents an entry of the `!Account` list.
///
/// ```text
/// !Account
/// NChecking
/// TBank
/// DMain checking account
/// $1,024.00
/// /12/31'20
/// ^
/// ```
///
/// The account type is kept exactly as it appears in the file; use
/// [`Account::account_type`] to map it onto the known [`AccountType`]s.
#[derive(Clone, Debug, Default, Eq, PartialEq, TypedBuilder)]
pub struct Account<'a> {
    #[builder(default)]
    pub location: Location,

    /// `L` credit limit (credit card accounts only).
    #[builder(default)]
    pub credit_limit: Cow<'a, str>,

    /// `D` description.
    #[builder(default)]
    pub description: Cow<'a, str>,

    /// `N` name.
    #[builder(default)]
    pub name: Cow<'a, str>,

    /// `$` statement balance.
    #[builder(default)]
    pub statement_balance: Cow<'a, str>,

    /// `/` statement balance date.
    #[builder(default)]
    pub statement_balance_date: Cow<'a, str>,

    /// `T` account type code, e.g. `Bank` or `Oth A`.
    #[builder(default)]
    pub ty: Cow<'a, str>,
}

impl<'a> Account<'a> {
    pub fn account_type(&self) -> Result<AccountType, UnknownAccountType> {
        AccountType::try_from(self.ty.as_ref()).map_err(|_| UnknownAccountType {
            code: self.ty.to_string(),
            location: self.location,
        })
    }
}

/// Account types a QIF account list may declare.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AccountType {
    Bank,
    CreditCard,
    Cash,
    OtherAsset,
    OtherLiability,
    Brokerage,
    Retirement,
}

impl AccountType {
    /// The code used for this type in a QIF file.
    pub fn code(self) -> &'static str {
        use AccountType::*;
        match self {
            Bank => "Bank",
            CreditCard => "CCard",
            Cash => "Cash",
            OtherAsset => "Oth A",
            OtherLiability => "Oth L",
            Brokerage => "Port",
            Retirement => "401(k)/403(b)",
        }
    }

    /// The name this type goes by outside of QIF.
    pub fn default_name(self) -> &'static str {
        use AccountType::*;
        match self {
            Bank => "bank",
            CreditCard => "creditCard",
            Cash => "cash",
            OtherAsset => "asset",
            OtherLiability => "liability",
            Brokerage => "brokerage",
            Retirement => "retirement",
        }
    }
}

impl TryFrom<&str> for AccountType {
    type Error = ();

    fn try_from(code: &str) -> Result<Self, Self::Error> {
        use AccountType::*;
        match code {
            "Bank" => Ok(Bank),
            "CCard" => Ok(CreditCard),
            "Cash" => Ok(Cash),
            "Oth A" => Ok(OtherAsset),
            "Oth L" => Ok(OtherLiability),
            "Port" => Ok(Brokerage),
            "401(k)/403(b)" => Ok(Retirement),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An account record carried a type code outside the fixed set of [`AccountType`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownAccountType {
    pub code: String,
    pub location: Location,
}

impl fmt::Display for UnknownAccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown account type {:?} at line {} column {}",
            self.code, self.location.line, self.location.column
        )
    }
}

impl Error for UnknownAccountType {}

/// The account that transactions are currently being recorded against.
///
/// A single-record `!Account` section that follows the master account list switches the
/// active account; every transaction section after it belongs to that account until the next
/// switch.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, TypedBuilder)]
pub struct ActiveAccount<'a> {
    pub name: Cow<'a, str>,

    #[builder(default)]
    pub ty: Cow<'a, str>,
}

impl<'a> From<&Account<'a>> for ActiveAccount<'a> {
    fn from(account: &Account<'a>) -> Self {
        ActiveAccount {
            name: account.name.clone(),
            ty: account.ty.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_type_codes() {
        for ty in &[
            AccountType::Bank,
            AccountType::CreditCard,
            AccountType::Cash,
            AccountType::OtherAsset,
            AccountType::OtherLiability,
            AccountType::Brokerage,
            AccountType::Retirement,
        ] {
            assert_eq!(Ok(*ty), AccountType::try_from(ty.code()));
        }
        assert_eq!("creditCard", AccountType::CreditCard.default_name());
        assert_eq!("401(k)/403(b)", AccountType::Retirement.to_string());
    }

    #[test]
    fn unknown_account_type() {
        let account = Account::builder()
            .location(Location::new(4, 1))
            .name("Wallet".into())
            .ty("Invst".into())
            .build();
        let err = account.account_type().unwrap_err();
        assert_eq!("Invst", err.code);
        assert_eq!(Location::new(4, 1), err.location);
        assert_eq!(
            "unknown account type \"Invst\" at line 4 column 1",
            err.to_string()
        );
    }

    #[test]
    fn active_account_from_record() {
        let account = Account::builder()
            .name("Visa".into())
            .ty("CCard".into())
            .credit_limit("5,000.00".into())
            .build();
        assert_eq!(
            ActiveAccount::builder().name("Visa".into()).ty("CCard".into()).build(),
            ActiveAccount::from(&account)
        );
    }
}
