use std::borrow::Cow;

use typed_builder::TypedBuilder;

use super::Location;

/// Represents an entry of a `!Type:Security` list.
#[derive(Clone, Debug, Default, Eq, PartialEq, TypedBuilder)]
pub struct Security<'a> {
    #[builder(default)]
    pub location: Location,

    /// `D` description.
    #[builder(default)]
    pub description: Cow<'a, str>,

    /// `N` name.
    #[builder(default)]
    pub name: Cow<'a, str>,

    /// `G` risk / goal.
    #[builder(default)]
    pub risk: Cow<'a, str>,

    /// `S` ticker symbol.
    #[builder(default)]
    pub ticker: Cow<'a, str>,

    /// `T` security type, e.g. `Stock` or `Mutual Fund`.
    #[builder(default)]
    pub ty: Cow<'a, str>,
}
