pub struct AddServiceLinkMutation;
pub mod add_service_link_mutation {
    #![allow(dead_code)]
    use lodestone::codegen::{
        FieldKind, FieldShape, Qualifier, Shape, ShapeDef, VariableKind, VariableShape
    };
    use serde::{Deserialize, Serialize};
    pub const OPERATION_NAME: &str = "AddServiceLinkMutation";
    pub const QUERY: &str = "mutation AddServiceLinkMutation($id: ID!, $linkId: ID!) {\n  addServiceLink(id: $id, linkId: $linkId) {\n    id\n    name\n    externalId\n    customer {\n      id\n      name\n      externalId\n    }\n    terminationPoints {\n      id\n      name\n    }\n    links {\n      id\n    }\n  }\n}\n";
    #[allow(dead_code)]
    type Boolean = bool;
    #[allow(dead_code)]
    type Float = f64;
    #[allow(dead_code)]
    type Int = i64;
    #[allow(dead_code)]
    type ID = String;
    pub static SHAPE: Shape = Shape {
        root: 4,
        defs: &[
            ShapeDef {
                name: "AddServiceLinkMutationAddServiceLinkCustomer",
                fields: &[
                    FieldShape {
                        name: "id",
                        qualifiers: &[Qualifier::Required],
                        kind: FieldKind::Scalar("ID")
                    },
                    FieldShape {
                        name: "name",
                        qualifiers: &[Qualifier::Required],
                        kind: FieldKind::Scalar("String")
                    },
                    FieldShape {
                        name: "externalId",
                        qualifiers: &[],
                        kind: FieldKind::Scalar("String")
                    },
                ]
            },
            ShapeDef {
                name: "AddServiceLinkMutationAddServiceLinkTerminationPoints",
                fields: &[
                    FieldShape {
                        name: "id",
                        qualifiers: &[Qualifier::Required],
                        kind: FieldKind::Scalar("ID")
                    },
                    FieldShape {
                        name: "name",
                        qualifiers: &[Qualifier::Required],
                        kind: FieldKind::Scalar("String")
                    },
                ]
            },
            ShapeDef {
                name: "AddServiceLinkMutationAddServiceLinkLinks",
                fields: &[FieldShape {
                    name: "id",
                    qualifiers: &[Qualifier::Required],
                    kind: FieldKind::Scalar("ID")
                }]
            },
            ShapeDef {
                name: "AddServiceLinkMutationAddServiceLink",
                fields: &[
                    FieldShape {
                        name: "id",
                        qualifiers: &[Qualifier::Required],
                        kind: FieldKind::Scalar("ID")
                    },
                    FieldShape {
                        name: "name",
                        qualifiers: &[Qualifier::Required],
                        kind: FieldKind::Scalar("String")
                    },
                    FieldShape {
                        name: "externalId",
                        qualifiers: &[],
                        kind: FieldKind::Scalar("String")
                    },
                    FieldShape {
                        name: "customer",
                        qualifiers: &[],
                        kind: FieldKind::Object(0)
                    },
                    FieldShape {
                        name: "terminationPoints",
                        qualifiers: &[Qualifier::Required, Qualifier::List, Qualifier::Required],
                        kind: FieldKind::Object(1)
                    },
                    FieldShape {
                        name: "links",
                        qualifiers: &[Qualifier::Required, Qualifier::List, Qualifier::Required],
                        kind: FieldKind::Object(2)
                    },
                ]
            },
            ShapeDef {
                name: "ResponseData",
                fields: &[FieldShape {
                    name: "addServiceLink",
                    qualifiers: &[],
                    kind: FieldKind::Object(3)
                }]
            },
        ]
    };
    pub static VARIABLES: &[VariableShape] = &[
        VariableShape {
            name: "id",
            qualifiers: &[Qualifier::Required],
            kind: VariableKind::Scalar("ID")
        },
        VariableShape {
            name: "linkId",
            qualifiers: &[Qualifier::Required],
            kind: VariableKind::Scalar("ID")
        },
    ];
    #[derive(Deserialize, Clone, Debug)]
    pub struct AddServiceLinkMutationAddServiceLinkCustomer {
        pub id: ID,
        pub name: String,
        #[serde(rename = "externalId")]
        pub external_id: Option<String>
    }
    #[derive(Deserialize, Clone, Debug)]
    pub struct AddServiceLinkMutationAddServiceLinkTerminationPoints {
        pub id: ID,
        pub name: String
    }
    #[derive(Deserialize, Clone, Debug)]
    pub struct AddServiceLinkMutationAddServiceLinkLinks {
        pub id: ID
    }
    #[derive(Deserialize, Clone, Debug)]
    pub struct AddServiceLinkMutationAddServiceLink {
        pub id: ID,
        pub name: String,
        #[serde(rename = "externalId")]
        pub external_id: Option<String>,
        pub customer: Option<AddServiceLinkMutationAddServiceLinkCustomer>,
        #[serde(rename = "terminationPoints")]
        pub termination_points: Vec<AddServiceLinkMutationAddServiceLinkTerminationPoints>,
        pub links: Vec<AddServiceLinkMutationAddServiceLinkLinks>
    }
    #[derive(Serialize, Clone)]
    pub struct Variables {
        pub id: ID,
        #[serde(rename = "linkId")]
        pub link_id: ID
    }
    #[derive(Deserialize, Clone, Debug)]
    pub struct ResponseData {
        #[serde(rename = "addServiceLink")]
        pub add_service_link: Option<AddServiceLinkMutationAddServiceLink>
    }
}
impl lodestone::GraphQLOperation for AddServiceLinkMutation {
    type Variables = add_service_link_mutation::Variables;
    type ResponseData = add_service_link_mutation::ResponseData;

    fn build_request(
        variables: Self::Variables
    ) -> (
        lodestone::RequestBody<Self::Variables>,
        lodestone::OperationMeta
    ) {
        let meta = lodestone::OperationMeta {
            operation_name: add_service_link_mutation::OPERATION_NAME,
            operation_type: lodestone::OperationType::Mutation
        };
        let body = lodestone::RequestBody {
            variables,
            query: add_service_link_mutation::QUERY,
            operation_name: add_service_link_mutation::OPERATION_NAME
        };
        (body, meta)
    }

    fn shape() -> &'static lodestone::codegen::Shape {
        &add_service_link_mutation::SHAPE
    }

    fn variable_shapes() -> &'static [lodestone::codegen::VariableShape] {
        add_service_link_mutation::VARIABLES
    }
}
