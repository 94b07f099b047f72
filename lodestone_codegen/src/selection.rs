use crate::shared::ArgumentValue;
use graphql_parser::query;
use std::collections::BTreeSet;

/// A selection set, aliased and with the arguments kept around so the
/// variable usage of the whole operation can be checked.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Selection<'query>(Vec<SelectionItem<'query>>);

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SelectionItem<'query> {
    Field(SelectionField<'query>),
    FragmentSpread(SelectionFragmentSpread<'query>),
    InlineFragment
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SelectionField<'query> {
    pub alias: Option<&'query str>,
    pub name: &'query str,
    pub arguments: Vec<(&'query str, ArgumentValue)>,
    pub fields: Selection<'query>
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SelectionFragmentSpread<'query> {
    pub fragment_name: &'query str
}

impl<'query> Selection<'query> {
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Every `$variable` referenced anywhere in this selection, through
    /// arguments (recursively through list and object values) and nested
    /// selections.
    pub(crate) fn collect_variables(&self, variables: &mut BTreeSet<String>) {
        for item in self {
            if let SelectionItem::Field(field) = item {
                for (_, value) in &field.arguments {
                    value.collect_variables(variables);
                }
                field.fields.collect_variables(variables);
            }
        }
    }
}

impl<'a, 'query> IntoIterator for &'a Selection<'query> {
    type Item = &'a SelectionItem<'query>;
    type IntoIter = std::slice::Iter<'a, SelectionItem<'query>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'query> std::convert::From<&'query query::SelectionSet> for Selection<'query> {
    fn from(selection_set: &'query query::SelectionSet) -> Selection<'query> {
        let items = selection_set
            .items
            .iter()
            .map(|item| match item {
                query::Selection::Field(field) => SelectionItem::Field(SelectionField {
                    alias: field.alias.as_deref(),
                    name: &field.name,
                    arguments: field
                        .arguments
                        .iter()
                        .map(|(name, value)| (name.as_str(), value.clone().into()))
                        .collect(),
                    fields: Selection::from(&field.selection_set)
                }),
                query::Selection::FragmentSpread(spread) => {
                    SelectionItem::FragmentSpread(SelectionFragmentSpread {
                        fragment_name: &spread.fragment_name
                    })
                }
                query::Selection::InlineFragment(_) => SelectionItem::InlineFragment
            })
            .collect();

        Selection(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_operation_selection(document: &query::Document) -> Selection<'_> {
        match &document.definitions[0] {
            query::Definition::Operation(query::OperationDefinition::Mutation(m)) => {
                Selection::from(&m.selection_set)
            }
            other => panic!("unexpected definition: {:?}", other)
        }
    }

    #[test]
    fn selection_from_graphql_parser_selection_set() {
        let query = r##"
        mutation AddTag($id: ID!, $tag: String!) {
            addTag(id: $id, tag: $tag) {
                id
                label: tag
            }
        }
        "##;
        let document = graphql_parser::parse_query(query).unwrap();
        let selection = first_operation_selection(&document);

        assert_eq!(selection.len(), 1);
        match (&selection).into_iter().next().unwrap() {
            SelectionItem::Field(field) => {
                assert_eq!(field.name, "addTag");
                assert_eq!(field.arguments.len(), 2);
                assert_eq!(field.fields.len(), 2);
                let subfields: Vec<_> = (&field.fields).into_iter().collect();
                match subfields[1] {
                    SelectionItem::Field(sub) => {
                        assert_eq!(sub.name, "tag");
                        assert_eq!(sub.alias, Some("label"));
                    }
                    other => panic!("unexpected item: {:?}", other)
                }
            }
            other => panic!("unexpected item: {:?}", other)
        }
    }

    #[test]
    fn variables_are_collected_through_nested_arguments() {
        let query = r##"
        query Things($first: Int, $filter: ThingFilter) {
            things(page: { first: $first, filter: $filter }) {
                edges(limit: 10) {
                    id
                }
            }
        }
        "##;
        let document = graphql_parser::parse_query(query).unwrap();
        let selection = match &document.definitions[0] {
            query::Definition::Operation(query::OperationDefinition::Query(q)) => {
                Selection::from(&q.selection_set)
            }
            other => panic!("unexpected definition: {:?}", other)
        };

        let mut variables = BTreeSet::new();
        selection.collect_variables(&mut variables);

        let variables: Vec<_> = variables.into_iter().collect();
        assert_eq!(variables, vec!["filter".to_string(), "first".to_string()]);
    }
}
