//! Schema builder integration tests.

use gqla_schema::schema::{DispatchMode, MetaType};
use gqla_schema::{
    Callable, DeclarationSet, DeclaredType, EnumConstant, FieldCollisionPolicy, InputParameter,
    Manifest, MemberDeclaration, SchemaBuilder, SchemaBuilderConfig, SchemaError, TypeDeclaration,
    TypeKind,
};
use serde_json::{Value, json};

fn build(declarations: &DeclarationSet) -> Result<gqla_schema::SchemaGraph, SchemaError> {
    SchemaBuilder::default().build(declarations)
}

fn constant(value: Value) -> Callable {
    Callable::new(move |_| Ok(value.clone()))
}

fn echo() -> Callable {
    Callable::new(|inv| Ok(json!({ "receiver": inv.receiver, "args": inv.args })))
}

#[test]
fn test_forward_references_resolve_after_build() {
    // Post references Comment before Comment is declared
    let declarations = DeclarationSet::new()
        .with_type(TypeDeclaration::object("blog::Post"))
        .with_member(
            MemberDeclaration::property("blog::Post", "comments", DeclaredType::named("array"))
                .type_override("[blog::Comment!]!"),
        )
        .with_type(TypeDeclaration::object("blog::Comment"))
        .with_member(MemberDeclaration::property(
            "blog::Comment",
            "text",
            DeclaredType::named("string"),
        ));

    let graph = build(&declarations).unwrap();
    let comments = graph.field("Post", "comments").unwrap();
    assert_eq!(comments.field_type.to_string(), "[Comment!]!");
    let target = graph.lookup(&comments.field_type).unwrap();
    assert_eq!(target.name(), "Comment");
    assert_eq!(target.kind(), TypeKind::Object);
}

#[test]
fn test_input_field_referencing_later_type() {
    // input fields are parsed during type registration, before State exists
    let declarations = DeclarationSet::new()
        .with_type(TypeDeclaration::input_object(
            "blog::PostFilter",
            vec![InputParameter::new("state", "blog::State")],
        ))
        .with_type(TypeDeclaration::enumeration(
            "blog::State",
            vec![EnumConstant::new("DRAFT", "draft")],
        ));

    let graph = build(&declarations).unwrap();
    let Some(MetaType::InputObject(filter)) = graph.type_by_name("PostFilter") else {
        panic!("PostFilter should be an input object");
    };
    let state = &filter.codec.fields[0].field_type;
    assert!(state.is_deferred());
    assert_eq!(graph.lookup(state).unwrap().kind(), TypeKind::Enum);
}

#[test]
fn test_deferred_reference_to_undeclared_type() {
    let declarations = DeclarationSet::new().with_member(
        MemberDeclaration::query("ghost", constant(Value::Null)).type_override("Ghost"),
    );

    let graph = build(&declarations).unwrap();
    let field = graph.field("Query", "ghost").unwrap();
    let err = graph.lookup(&field.field_type).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownType { ref name, .. } if name == "Ghost"));

    let strict = SchemaBuilder::new(SchemaBuilderConfig {
        strict_references: true,
        ..SchemaBuilderConfig::default()
    });
    assert!(matches!(
        strict.build(&declarations).unwrap_err(),
        SchemaError::UnknownType { .. }
    ));
}

#[test]
fn test_extends_creates_missing_type() {
    let declarations = DeclarationSet::new().with_member(
        MemberDeclaration::function("extras::shout", echo())
            .extends("Announcement")
            .returns(DeclaredType::named("string"))
            .param("announcement", DeclaredType::named("Announcement")),
    );

    let graph = build(&declarations).unwrap();
    let Some(MetaType::Object(announcement)) = graph.type_by_name("Announcement") else {
        panic!("Announcement should have been created as an object");
    };
    assert_eq!(
        announcement.fields.keys().map(|k| k.as_str()).collect::<Vec<_>>(),
        vec!["shout"]
    );
}

#[test]
fn test_extends_without_implicit_types() {
    let declarations = DeclarationSet::new().with_member(
        MemberDeclaration::function("extras::shout", echo())
            .extends("Announcement")
            .returns(DeclaredType::named("string")),
    );
    let builder = SchemaBuilder::new(SchemaBuilderConfig {
        implicit_target_types: false,
        ..SchemaBuilderConfig::default()
    });

    assert_eq!(
        builder.build(&declarations).unwrap_err(),
        SchemaError::UnknownExtendsTarget {
            member: "extras::shout".into(),
            target: "Announcement".into(),
        }
    );
}

#[test]
fn test_free_function_needs_extends() {
    let declarations = DeclarationSet::new().with_member(
        MemberDeclaration::function("extras::shout", echo()).returns(DeclaredType::named("string")),
    );
    assert_eq!(
        build(&declarations).unwrap_err(),
        SchemaError::MissingExtendsTarget {
            member: "extras::shout".into()
        }
    );
}

#[test]
fn test_type_name_uniqueness() {
    let same_kind = DeclarationSet::new()
        .with_type(TypeDeclaration::object("a::Post"))
        .with_type(TypeDeclaration::object("b::Post").description("Second"));
    let graph = build(&same_kind).unwrap();
    assert_eq!(graph.type_by_name("Post").unwrap().description(), Some("Second"));
    assert_eq!(graph.type_by_name("a::Post").unwrap().name(), "Post");

    let different_kinds = DeclarationSet::new()
        .with_type(TypeDeclaration::object("a::Post"))
        .with_type(TypeDeclaration::enumeration(
            "b::Post",
            vec![EnumConstant::new("DRAFT", "draft")],
        ));
    assert_eq!(
        build(&different_kinds).unwrap_err(),
        SchemaError::DuplicateTypeName {
            name: "Post".into(),
            existing: TypeKind::Object,
            requested: TypeKind::Enum,
        }
    );
}

#[test]
fn test_host_scalar_alias_is_reserved() {
    let declarations = DeclarationSet::new()
        .with_type(TypeDeclaration::object("host::int"))
        .with_member(
            MemberDeclaration::query("count", constant(json!(1))).returns(DeclaredType::named("int")),
        );
    assert_eq!(
        build(&declarations).unwrap_err(),
        SchemaError::DuplicateTypeName {
            name: "int".into(),
            existing: TypeKind::Scalar,
            requested: TypeKind::Object,
        }
    );

    let extends_alias = DeclarationSet::new().with_member(
        MemberDeclaration::function("doubled", echo())
            .extends("int")
            .returns(DeclaredType::named("int")),
    );
    assert_eq!(
        build(&extends_alias).unwrap_err(),
        SchemaError::TypeKindMismatch {
            name: "Int".into(),
            existing: TypeKind::Scalar,
            requested: TypeKind::Object,
        }
    );
}

#[test]
fn test_field_on_enum_is_kind_mismatch() {
    let declarations = DeclarationSet::new()
        .with_type(TypeDeclaration::enumeration(
            "blog::State",
            vec![EnumConstant::new("DRAFT", "draft")],
        ))
        .with_member(
            MemberDeclaration::function("label", echo())
                .extends("blog::State")
                .returns(DeclaredType::named("string")),
        );

    assert_eq!(
        build(&declarations).unwrap_err(),
        SchemaError::TypeKindMismatch {
            name: "State".into(),
            existing: TypeKind::Enum,
            requested: TypeKind::Object,
        }
    );
}

#[test]
fn test_field_collision_policy() {
    let declarations = DeclarationSet::new()
        .with_member(
            MemberDeclaration::query("version", constant(json!(1)))
                .returns(DeclaredType::named("int")),
        )
        .with_member(
            MemberDeclaration::query("version", constant(json!(2)))
                .returns(DeclaredType::named("int")),
        );

    let graph = build(&declarations).unwrap();
    assert_eq!(
        graph
            .resolve_field("Query", "version", &Value::Null, vec![])
            .unwrap(),
        json!(2)
    );

    let rejecting = SchemaBuilder::new(SchemaBuilderConfig {
        field_collision: FieldCollisionPolicy::Reject,
        ..SchemaBuilderConfig::default()
    });
    assert_eq!(
        rejecting.build(&declarations).unwrap_err(),
        SchemaError::DuplicateField {
            type_name: "Query".into(),
            field: "version".into(),
        }
    );
}

#[test]
fn test_three_dispatch_modes() {
    let declarations = DeclarationSet::new()
        .with_type(TypeDeclaration::object("blog::User"))
        .with_member(
            MemberDeclaration::query("user", echo())
                .declared_on("blog::User")
                .returns(DeclaredType::named("blog::User"))
                .param("id", DeclaredType::named("int")),
        )
        .with_member(
            MemberDeclaration::method("blog::User", "add_id", echo())
                .returns(DeclaredType::named("int"))
                .param("n", DeclaredType::named("int")),
        )
        .with_member(
            MemberDeclaration::method("blog::Comment", "add_comment_id", echo())
                .extends("blog::User")
                .returns(DeclaredType::named("int"))
                .param("user", DeclaredType::named("blog::User"))
                .param("n", DeclaredType::named("int")),
        );

    let graph = build(&declarations).unwrap();
    let owner = json!({ "id": 1 });

    let user = graph.field("Query", "user").unwrap();
    assert_eq!(user.resolver.mode(), Some(DispatchMode::RootOperation));
    assert_eq!(
        user.resolve(&Value::Null, vec![json!(1)]).unwrap(),
        json!({ "receiver": null, "args": [1] })
    );

    let add_id = graph.field("User", "add_id").unwrap();
    assert_eq!(add_id.resolver.mode(), Some(DispatchMode::OwningMethod));
    assert_eq!(
        add_id.resolve(&owner, vec![json!(5)]).unwrap(),
        json!({ "receiver": { "id": 1 }, "args": [5] })
    );

    let add_comment_id = graph.field("User", "add_comment_id").unwrap();
    assert_eq!(add_comment_id.resolver.mode(), Some(DispatchMode::Extension));
    assert_eq!(
        add_comment_id
            .arguments
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>(),
        vec!["n"]
    );
    assert_eq!(
        add_comment_id.resolve(&owner, vec![json!(5)]).unwrap(),
        json!({ "receiver": null, "args": [{ "id": 1 }, 5] })
    );
}

#[test]
fn test_interface_claims() {
    let declarations = DeclarationSet::new()
        .with_type(TypeDeclaration::object("blog::Post").implements("Node"))
        .with_type(TypeDeclaration::interface("blog::Node"));
    let graph = build(&declarations).unwrap();
    let Some(MetaType::Object(post)) = graph.type_by_name("Post") else {
        panic!("Post should be an object");
    };
    assert_eq!(post.interface_names, vec!["Node".parse::<gqla_schema::Name>().unwrap()]);
    assert_eq!(graph.implementors("Node").len(), 1);

    let unknown =
        DeclarationSet::new().with_type(TypeDeclaration::object("Post").implements("Node"));
    assert!(matches!(
        build(&unknown).unwrap_err(),
        SchemaError::UnknownType { ref name, .. } if name == "Node"
    ));

    let not_interface = DeclarationSet::new()
        .with_type(TypeDeclaration::object("Post").implements("User"))
        .with_type(TypeDeclaration::object("User"));
    assert_eq!(
        build(&not_interface).unwrap_err(),
        SchemaError::NotAnInterface {
            object: "Post".into(),
            interface: "User".into(),
            actual: TypeKind::Object,
        }
    );
}

#[test]
fn test_enum_and_input_object_registration() {
    let declarations = DeclarationSet::new()
        .with_type(
            TypeDeclaration::enumeration(
                "blog::State",
                vec![
                    EnumConstant::new("DRAFT", "draft"),
                    EnumConstant::new("PUBLISHED", "published").deprecated("Use REVIEWED"),
                ],
            )
            .description("Publication state"),
        )
        .with_type(TypeDeclaration::input_object(
            "blog::CreateUserInputs",
            vec![
                InputParameter::new("username", "String!"),
                InputParameter::new("email", "String!").default_value("no@example.com"),
            ],
        ));

    let graph = build(&declarations).unwrap();
    let Some(MetaType::Enum(state)) = graph.type_by_name("State") else {
        panic!("State should be an enum");
    };
    assert_eq!(state.description.as_deref(), Some("Publication state"));
    assert_eq!(state.value_of("DRAFT"), Some(&json!("draft")));
    assert!(state.values[1].deprecation_status.is_deprecated());

    let Some(MetaType::InputObject(input)) = graph.type_by_name("CreateUserInputs") else {
        panic!("CreateUserInputs should be an input object");
    };
    let decoded = input
        .codec
        .decode(json!({ "username": "ada" }).as_object().cloned().unwrap())
        .unwrap();
    assert_eq!(decoded, json!({ "username": "ada", "email": "no@example.com" }));
}

#[test]
fn test_invalid_public_name() {
    let declarations =
        DeclarationSet::new().with_type(TypeDeclaration::object("blog::Post").name("Blog Post"));
    assert!(matches!(
        build(&declarations).unwrap_err(),
        SchemaError::InvalidName(_)
    ));
}

#[test]
fn test_manifest_with_bound_callables() {
    let manifest = Manifest::from_toml_str(
        r#"
        [[types]]
        identity = "blog::Post"
        kind = "object"

        [[members]]
        declaring_type = "blog::Post"
        member = "title"
        kind = "property"
        declared_type = { shape = "named", name = "string" }

        [[members]]
        declaring_type = "blog::Post"
        member = "search_posts"
        name = "posts"
        kind = "query"
        type = "[Post!]!"
        "#,
    )
    .unwrap();

    let mut declarations = manifest.into_declarations();
    assert!(matches!(
        build(&declarations).unwrap_err(),
        SchemaError::MissingCallable { .. }
    ));

    declarations
        .bind_callable(
            Some("blog::Post"),
            "search_posts",
            constant(json!([{ "title": "Hello world!" }])),
        )
        .unwrap();
    let graph = build(&declarations).unwrap();
    let posts = graph
        .resolve_field("Query", "posts", &Value::Null, vec![])
        .unwrap();
    let title = graph
        .resolve_field("Post", "title", &posts[0], vec![])
        .unwrap();
    assert_eq!(title, json!("Hello world!"));
}
