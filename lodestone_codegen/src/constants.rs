use crate::{field_type::FieldType, objects::GqlObjectField};

pub const MULTIPLE_SUBSCRIPTION_FIELDS_ERROR: &str = r#"
Multiple-field queries on the root subscription field are forbidden by the spec.

See: https://github.com/facebook/graphql/blob/master/spec/Section%205%20--%20Validation.md#subscription-operation-definitions
"#;

pub const SELECTION_SET_AT_ROOT: &str = r#"
Operations in a query document must be named.

Instead of this:

{
  user {
    name
  }
}

Write this:

query UserName {
  user {
    name
  }
}
"#;

pub(crate) fn typename_field() -> GqlObjectField<'static> {
    GqlObjectField {
        description: None,
        name: "__typename",
        type_: FieldType::new("String").nonnull(),
        deprecation: crate::deprecation::DeprecationStatus::Current
    }
}
