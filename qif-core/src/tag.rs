use std::borrow::Cow;

use typed_builder::TypedBuilder;

use super::Location;

/// Represents an entry of the `!Type:Tag` list.
#[derive(Clone, Debug, Default, Eq, PartialEq, TypedBuilder)]
pub struct Tag<'a> {
    #[builder(default)]
    pub location: Location,

    #[builder(default)]
    pub description: Cow<'a, str>,

    #[builder(default)]
    pub name: Cow<'a, str>,
}
