use crate::{
    deprecation::DeprecationStrategy, schema::Schema, selection::Selection, CodegenError
};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use std::{
    cell::RefCell,
    collections::{BTreeSet, HashSet}
};
use syn::Ident;

/// What a selected field expands to.
pub(crate) enum ExpandedField {
    /// A leaf decoded through the scalar codec registry.
    Scalar,
    /// Enums are emitted once per module, nothing to expand inline.
    Enum,
    /// A nested struct, together with its slot in the shape arena.
    Object {
        tokens: TokenStream,
        shape_index: usize,
        types: HashSet<String>
    }
}

/// This holds all the information we need during the code generation phase.
pub(crate) struct QueryContext<'schema> {
    pub schema: &'schema Schema<'schema>,
    pub deprecation_strategy: DeprecationStrategy,
    pub unknown_enum_variants: bool,
    /// The shape defs emitted so far, in child-before-parent order. The
    /// def pushed last is the root.
    shape_defs: RefCell<Vec<TokenStream>>,
    variables_derives: Vec<Ident>,
    response_derives: Vec<Ident>
}

impl<'schema> QueryContext<'schema> {
    /// Create a QueryContext with the given Schema.
    pub(crate) fn new(
        schema: &'schema Schema<'schema>,
        deprecation_strategy: DeprecationStrategy,
        unknown_enum_variants: bool
    ) -> QueryContext<'schema> {
        QueryContext {
            schema,
            deprecation_strategy,
            unknown_enum_variants,
            shape_defs: RefCell::new(Vec::new()),
            variables_derives: vec![
                Ident::new("Serialize", Span::call_site()),
                Ident::new("Clone", Span::call_site()),
            ],
            response_derives: vec![
                Ident::new("Deserialize", Span::call_site()),
                Ident::new("Clone", Span::call_site()),
            ]
        }
    }

    /// For testing only. creates an empty QueryContext with an empty Schema.
    #[cfg(test)]
    pub(crate) fn new_empty(schema: &'schema Schema<'_>) -> QueryContext<'schema> {
        QueryContext::new(schema, DeprecationStrategy::Allow, false)
    }

    pub(crate) fn is_scalar(&self, type_name: &str) -> bool {
        self.schema.contains_scalar(type_name)
    }

    pub(crate) fn is_enum(&self, type_name: &str) -> bool {
        self.schema.enums.contains_key(type_name)
    }

    /// Append a def to the shape arena and return its index.
    pub(crate) fn push_shape_def(&self, def: TokenStream) -> usize {
        let mut defs = self.shape_defs.borrow_mut();
        defs.push(def);
        defs.len() - 1
    }

    pub(crate) fn shape_defs(self) -> Vec<TokenStream> {
        self.shape_defs.into_inner()
    }

    /// Expand the deserialization data structures for the given field.
    pub(crate) fn maybe_expand_field(
        &self,
        ty: &str,
        selection: &Selection<'_>,
        prefix: &str
    ) -> Result<ExpandedField, CodegenError> {
        if self.schema.contains_scalar(ty) {
            if let Some(scalar) = self.schema.scalars.get(ty) {
                scalar.is_required.set(true);
            }
            Ok(ExpandedField::Scalar)
        } else if let Some(enm) = self.schema.enums.get(ty) {
            enm.is_required.set(true);
            // we already expand enums separately
            Ok(ExpandedField::Enum)
        } else if let Some(obj) = self.schema.objects.get(ty) {
            let (tokens, shape_index, mut types) =
                obj.response_for_selection(self, &selection, prefix, false)?;
            types.insert(ty.to_string());
            Ok(ExpandedField::Object {
                tokens,
                shape_index,
                types
            })
        } else if let Some(iface) = self.schema.interfaces.get(ty) {
            let (tokens, shape_index, mut types) =
                iface.response_for_selection(self, &selection, prefix, false)?;
            types.insert(ty.to_string());
            Ok(ExpandedField::Object {
                tokens,
                shape_index,
                types
            })
        } else if self.schema.unions.contains(ty) {
            Err(CodegenError::UnimplementedError(format!(
                "selection on union type `{}`",
                ty
            )))
        } else {
            Err(CodegenError::TypeError(format!("Unknown type: {}", ty)))
        }
    }

    pub(crate) fn ingest_response_derives(
        &mut self,
        attribute_value: &str
    ) -> Result<(), CodegenError> {
        if self.response_derives.len() > 2 {
            return Err(CodegenError::InternalError(format!(
                "ingest_response_derives should only be called once"
            )));
        }

        self.response_derives.extend(
            attribute_value
                .split(',')
                .map(str::trim)
                .map(|s| Ident::new(s, Span::call_site()))
        );
        Ok(())
    }

    pub(crate) fn ingest_variables_derives(
        &mut self,
        attribute_value: &str
    ) -> Result<(), CodegenError> {
        if self.variables_derives.len() > 2 {
            return Err(CodegenError::InternalError(format!(
                "ingest_variables_derives should only be called once"
            )));
        }

        self.variables_derives.extend(
            attribute_value
                .split(',')
                .map(str::trim)
                .map(|s| Ident::new(s, Span::call_site()))
        );
        Ok(())
    }

    pub(crate) fn variables_derives(&self) -> TokenStream {
        let derives: BTreeSet<&Ident> = self.variables_derives.iter().collect();
        let derives = derives.iter();

        quote! {
            #[derive( #(#derives),* )]
        }
    }

    pub(crate) fn response_derives(&self) -> TokenStream {
        let derives: BTreeSet<&Ident> = self.response_derives.iter().collect();
        let derives = derives.iter();
        quote! {
            #[derive( #(#derives),* )]
        }
    }

    pub(crate) fn response_enum_derives(&self) -> TokenStream {
        let always_derives = [
            Ident::new("Clone", Span::call_site()),
            Ident::new("Eq", Span::call_site()),
            Ident::new("PartialEq", Span::call_site()),
        ];
        let mut enum_derives: BTreeSet<_> = self
            .response_derives
            .iter()
            .filter(|derive| {
                // The enums have hand-written serde impls, and derives that
                // only make sense on structs are dropped.
                let derive = derive.to_string();
                derive != "Serialize" && derive != "Deserialize" && derive != "Default"
            })
            .collect();
        enum_derives.extend(always_derives.iter());
        quote! {
            #[derive( #(#enum_derives),* )]
        }
    }
}
