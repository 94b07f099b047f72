use crate::{
    constants::*,
    deprecation::{DeprecationStatus, DeprecationStrategy},
    field_type::FieldType,
    query::{ExpandedField, QueryContext},
    selection::{Selection, SelectionItem},
    shared::render_object_field,
    CodegenError
};
use graphql_parser::schema;
use heck::CamelCase;
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use std::{cell::Cell, collections::HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct GqlObject<'schema> {
    pub description: Option<&'schema str>,
    pub fields: Vec<GqlObjectField<'schema>>,
    pub name: &'schema str,
    pub is_required: Cell<bool>
}

#[derive(Clone, Debug, PartialEq)]
pub struct GqlObjectField<'schema> {
    pub description: Option<&'schema str>,
    pub name: &'schema str,
    pub type_: FieldType<'schema>,
    pub deprecation: DeprecationStatus
}

fn parse_deprecation_info(field: &schema::Field) -> DeprecationStatus {
    let deprecated = field
        .directives
        .iter()
        .find(|x| x.name.to_lowercase() == "deprecated");
    let reason = if let Some(d) = deprecated {
        if let Some((_, value)) = d.arguments.iter().find(|x| x.0.to_lowercase() == "reason") {
            match value {
                schema::Value::String(reason) => Some(reason.clone()),
                schema::Value::Null => None,
                _ => panic!("deprecation reason is not a string")
            }
        } else {
            None
        }
    } else {
        None
    };
    match deprecated {
        Some(_) => DeprecationStatus::Deprecated(reason),
        None => DeprecationStatus::Current
    }
}

impl<'schema> GqlObject<'schema> {
    pub fn new(name: &'schema str, description: Option<&'schema str>) -> GqlObject<'schema> {
        GqlObject {
            description,
            name,
            fields: vec![typename_field()],
            is_required: false.into()
        }
    }

    pub fn from_graphql_parser_object(obj: &'schema schema::ObjectType) -> Self {
        let description = obj.description.as_deref();
        let mut item = GqlObject::new(&obj.name, description);
        item.fields.extend(obj.fields.iter().map(|f| {
            let deprecation = parse_deprecation_info(&f);
            GqlObjectField {
                description: f.description.as_deref(),
                name: &f.name,
                type_: FieldType::from(&f.field_type),
                deprecation
            }
        }));
        item
    }

    pub fn from_graphql_parser_interface(iface: &'schema schema::InterfaceType) -> Self {
        let description = iface.description.as_deref();
        let mut item = GqlObject::new(&iface.name, description);
        item.fields.extend(iface.fields.iter().map(|f| {
            let deprecation = parse_deprecation_info(&f);
            GqlObjectField {
                description: f.description.as_deref(),
                name: &f.name,
                type_: FieldType::from(&f.field_type),
                deprecation
            }
        }));
        item
    }

    /// Expand one selection level on this type.
    ///
    /// Emits the struct for this level (preceded by the structs of all
    /// nested levels), pushes the matching def onto the context's shape
    /// arena and returns its index, so children always sit at lower
    /// indices than their parent.
    ///
    /// At the root the struct is named `ResponseData` and every field is
    /// forced nullable, matching the envelope contract.
    pub(crate) fn response_for_selection(
        &self,
        query_context: &QueryContext<'_>,
        selection: &Selection<'_>,
        prefix: &str,
        at_root: bool
    ) -> Result<(TokenStream, usize, HashSet<String>), CodegenError> {
        let mut child_defs: Vec<TokenStream> = Vec::new();
        let mut struct_fields: Vec<TokenStream> = Vec::new();
        let mut shape_fields: Vec<TokenStream> = Vec::new();
        let mut types: HashSet<String> = HashSet::new();

        for item in selection {
            let field = match item {
                SelectionItem::Field(field) => field,
                SelectionItem::FragmentSpread(spread) => {
                    return Err(CodegenError::UnimplementedError(format!(
                        "fragment spread `{}`",
                        spread.fragment_name
                    )))
                }
                SelectionItem::InlineFragment => {
                    return Err(CodegenError::UnimplementedError(
                        "inline fragment on object field".to_string()
                    ))
                }
            };

            let name = field.name;
            let alias = field.alias.unwrap_or(name);

            let schema_field = self
                .fields
                .iter()
                .find(|f| f.name == name)
                .ok_or_else(|| {
                    CodegenError::TypeError(format!(
                        "Could not find field `{}` on `{}`. Available fields: `{}`.",
                        name,
                        self.name,
                        self.fields
                            .iter()
                            .map(|field| field.name)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ))
                })?;

            // Denied fields are skipped before expansion, so no orphaned
            // defs land in the module or the arena.
            if let (DeprecationStatus::Deprecated(_), DeprecationStrategy::Deny) = (
                &schema_field.deprecation,
                &query_context.deprecation_strategy
            ) {
                continue;
            }

            let field_prefix = format!("{}{}", prefix.to_camel_case(), alias.to_camel_case());
            // Top-level fields are nullable independently of the schema
            // annotation, the server nulls them out when they error.
            let field_type = if at_root {
                schema_field.type_.as_nullable()
            } else {
                schema_field.type_.clone()
            };
            let inner = schema_field.type_.inner_name_str();

            let kind = match query_context.maybe_expand_field(inner, &field.fields, &field_prefix)? {
                ExpandedField::Scalar => quote!(::lodestone::codegen::FieldKind::Scalar(#inner)),
                ExpandedField::Enum => {
                    types.insert(inner.to_string());
                    let enm = &query_context.schema.enums[inner];
                    let variants = enm.variants.iter().map(|variant| variant.name);
                    let catch_all = query_context.unknown_enum_variants;
                    quote! {
                        ::lodestone::codegen::FieldKind::Enum {
                            name: #inner,
                            variants: &[#(#variants),*],
                            catch_all: #catch_all
                        }
                    }
                }
                ExpandedField::Object {
                    tokens,
                    shape_index,
                    types: used_types
                } => {
                    child_defs.push(tokens);
                    types.extend(used_types);
                    quote!(::lodestone::codegen::FieldKind::Object(#shape_index))
                }
            };

            let rendered = render_object_field(
                alias,
                &field_type.to_rust(query_context, &field_prefix),
                schema_field.description,
                &schema_field.deprecation,
                &query_context.deprecation_strategy
            );
            if let Some(struct_field) = rendered {
                let qualifiers = field_type.qualifier_tokens();
                shape_fields.push(quote! {
                    ::lodestone::codegen::FieldShape {
                        name: #alias,
                        qualifiers: #qualifiers,
                        kind: #kind
                    }
                });
                struct_fields.push(struct_field);
            }
        }

        let struct_name = if at_root { "ResponseData" } else { prefix };
        let name = Ident::new(struct_name, Span::call_site());
        let derives = query_context.response_derives();
        let description = self.description.map(|desc| quote!(#[doc = #desc]));

        let tokens = quote! {
            #(#child_defs)*

            #derives
            #description
            pub struct #name {
                #(#struct_fields,)*
            }
        };

        let shape_def = quote! {
            ::lodestone::codegen::ShapeDef {
                name: #struct_name,
                fields: &[#(#shape_fields),*]
            }
        };
        let index = query_context.push_shape_def(shape_def);

        Ok((tokens, index, types))
    }
}
