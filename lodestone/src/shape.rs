//! Static response-shape descriptors referenced by generated code.
//!
//! The generator emits one [`ShapeDef`] per selection level and stores them
//! in a flat arena on the operation's [`Shape`]. Nested object fields refer
//! to other defs by arena index instead of lexical nesting, so the runtime
//! decoder can walk a response without any reflection.

/// A type qualifier on a field or variable, ordered from outer to inner.
///
/// e.g. `[ID!]!` carries `[Required, List, Required]`, while `[ID]` carries
/// `[List]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    /// The value at this level must not be null.
    Required,
    /// The value at this level is an ordered sequence.
    List
}

/// What the innermost value of a field decodes as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A leaf value, decoded through the scalar codec registry under the
    /// given schema scalar name.
    Scalar(&'static str),
    /// A closed set of string variants. When `catch_all` is set the
    /// generated enum has an `Unknown` variant and undeclared values are
    /// admitted instead of failing the decode.
    Enum {
        name: &'static str,
        variants: &'static [&'static str],
        catch_all: bool
    },
    /// A nested selection, given as an index into [`Shape::defs`].
    Object(usize)
}

/// One selected field inside a [`ShapeDef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldShape {
    /// The wire name of the field (the alias when one was used).
    pub name: &'static str,
    pub qualifiers: &'static [Qualifier],
    pub kind: FieldKind
}

/// The shape of one selection level, named by the enclosing field path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDef {
    pub name: &'static str,
    pub fields: &'static [FieldShape]
}

/// The full response shape of one operation.
///
/// Shapes are generated once and immutable; two operations selecting the
/// same schema type with different sub-selections get independent arenas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    /// Index of the `ResponseData` def inside `defs`.
    pub root: usize,
    pub defs: &'static [ShapeDef]
}

impl Shape {
    pub fn root_def(&self) -> &'static ShapeDef {
        &self.defs[self.root]
    }
}

/// What the innermost value of a variable encodes as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// A leaf encoded through the scalar codec registry under the given
    /// schema scalar name.
    Scalar(&'static str),
    /// A leaf serde already serialized in wire form (enums, cycles).
    Opaque,
    /// An input object, encoded field by field.
    Object(&'static [InputFieldShape])
}

/// One field of an input object variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputFieldShape {
    /// The wire name of the field.
    pub name: &'static str,
    pub qualifiers: &'static [Qualifier],
    pub kind: VariableKind
}

/// One declared operation variable, used to validate and encode the
/// serialized variable map before the transport is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableShape {
    /// The wire name of the variable, without the `$` sigil.
    pub name: &'static str,
    pub qualifiers: &'static [Qualifier],
    pub kind: VariableKind
}

impl VariableShape {
    /// Whether the variable must be present and non-null.
    pub fn is_required(&self) -> bool {
        self.qualifiers.first() == Some(&Qualifier::Required)
    }
}
