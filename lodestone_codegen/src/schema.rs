use crate::{enums::GqlEnum, enums::GqlEnumVariant, inputs::GqlInput, objects::GqlObject, scalars::Scalar};
use graphql_parser::schema;
use std::collections::{BTreeMap, BTreeSet};

pub(crate) const DEFAULT_SCALARS: &[&str] = &["ID", "String", "Int", "Float", "Boolean"];

/// Intermediate representation for a parsed SDL schema document.
///
/// Only the types actually reached from a selection or a variable get code
/// generated for them, tracked through the `is_required` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema<'schema> {
    pub enums: BTreeMap<&'schema str, GqlEnum<'schema>>,
    pub inputs: BTreeMap<&'schema str, GqlInput<'schema>>,
    pub interfaces: BTreeMap<&'schema str, GqlObject<'schema>>,
    pub objects: BTreeMap<&'schema str, GqlObject<'schema>>,
    pub scalars: BTreeMap<&'schema str, Scalar<'schema>>,
    pub unions: BTreeSet<&'schema str>,
    pub query_type: Option<&'schema str>,
    pub mutation_type: Option<&'schema str>,
    pub subscription_type: Option<&'schema str>
}

impl<'schema> Schema<'schema> {
    pub fn new() -> Schema<'schema> {
        Schema {
            enums: BTreeMap::new(),
            inputs: BTreeMap::new(),
            interfaces: BTreeMap::new(),
            objects: BTreeMap::new(),
            scalars: BTreeMap::new(),
            unions: BTreeSet::new(),
            query_type: None,
            mutation_type: None,
            subscription_type: None
        }
    }

    /// Mark a leaf or input type as used so its definition is emitted.
    ///
    /// Input objects pull in their own field types transitively. Object
    /// types are not handled here, they are expanded selection by
    /// selection instead.
    pub(crate) fn require(&self, typename_: &str) {
        if let Some(enm) = self.enums.get(typename_) {
            enm.is_required.set(true);
        } else if let Some(input) = self.inputs.get(typename_) {
            input.require(self);
        } else if let Some(scalar) = self.scalars.get(typename_) {
            scalar.is_required.set(true);
        }
    }

    pub(crate) fn contains_scalar(&self, type_name: &str) -> bool {
        DEFAULT_SCALARS.contains(&type_name) || self.scalars.contains_key(type_name)
    }
}

impl<'schema> std::convert::From<&'schema schema::Document> for Schema<'schema> {
    fn from(ast: &'schema schema::Document) -> Schema<'schema> {
        let mut schema = Schema::new();

        for definition in &ast.definitions {
            match definition {
                schema::Definition::TypeDefinition(schema::TypeDefinition::Object(obj)) => {
                    schema
                        .objects
                        .insert(&obj.name, GqlObject::from_graphql_parser_object(obj));
                }
                schema::Definition::TypeDefinition(schema::TypeDefinition::Interface(iface)) => {
                    schema
                        .interfaces
                        .insert(&iface.name, GqlObject::from_graphql_parser_interface(iface));
                }
                schema::Definition::TypeDefinition(schema::TypeDefinition::Enum(enm)) => {
                    schema.enums.insert(
                        &enm.name,
                        GqlEnum {
                            name: &enm.name,
                            description: enm.description.as_deref(),
                            variants: enm
                                .values
                                .iter()
                                .map(|v| GqlEnumVariant {
                                    name: &v.name,
                                    description: v.description.as_deref()
                                })
                                .collect(),
                            is_required: false.into()
                        }
                    );
                }
                schema::Definition::TypeDefinition(schema::TypeDefinition::Scalar(scalar)) => {
                    schema.scalars.insert(
                        &scalar.name,
                        Scalar {
                            name: &scalar.name,
                            description: scalar.description.as_deref(),
                            is_required: false.into()
                        }
                    );
                }
                schema::Definition::TypeDefinition(schema::TypeDefinition::InputObject(input)) => {
                    schema.inputs.insert(&input.name, GqlInput::from(input));
                }
                schema::Definition::TypeDefinition(schema::TypeDefinition::Union(union)) => {
                    schema.unions.insert(&union.name);
                }
                schema::Definition::SchemaDefinition(definition) => {
                    schema.query_type = definition.query.as_deref();
                    schema.mutation_type = definition.mutation.as_deref();
                    schema.subscription_type = definition.subscription.as_deref();
                }
                schema::Definition::DirectiveDefinition(_)
                | schema::Definition::TypeExtension(_) => ()
            }
        }

        schema
    }
}
