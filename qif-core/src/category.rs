use std::borrow::Cow;

use typed_builder::TypedBuilder;

use super::Location;

/// Represents an entry of the `!Type:Cat` category list.
///
/// Quicken assumes a category is an expense category unless it is flagged with `I`.
#[derive(Clone, Debug, Default, Eq, PartialEq, TypedBuilder)]
pub struct Category<'a> {
    #[builder(default)]
    pub location: Location,

    /// `B` budget amounts, in input order.
    #[builder(default)]
    pub budget_amounts: Vec<Cow<'a, str>>,

    /// `D` description.
    #[builder(default)]
    pub description: Cow<'a, str>,

    /// Set by `I`, cleared by `E`.
    #[builder(default)]
    pub is_income: bool,

    /// The `T` flag.  Note that the flag is recorded as `false` when present; see the
    /// category grammar in `qif-parser`.
    #[builder(default)]
    pub is_tax_related: bool,

    /// `N` name, which may include `:`-separated subcategories.
    #[builder(default)]
    pub name: Cow<'a, str>,

    /// `R` tax schedule.
    #[builder(default)]
    pub tax_schedule: Cow<'a, str>,
}
