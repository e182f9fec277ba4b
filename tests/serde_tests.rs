#![cfg(feature = "serde")]

//! Serialization of schemas, plans and generator options.

use optica::plan::{AccessorPlan, Generator, GeneratorOptions};
use optica::schema::{CompositeType, FieldShape, MapKind, Schema, TypeRef};
use rstest::{fixture, rstest};

#[fixture]
fn schema() -> Schema {
    [
        CompositeType::builder("Entity")
            .field("id", TypeRef::scalar("u64"))
            .field(
                "offices",
                TypeRef::map(MapKind::BTree, TypeRef::scalar("String"), TypeRef::composite("Node")),
            )
            .build(),
        CompositeType::builder("Node")
            .field("value", TypeRef::scalar("String"))
            .field(
                "child",
                TypeRef::optional(TypeRef::boxed(TypeRef::composite("Node"))),
            )
            .build(),
    ]
    .into_iter()
    .collect()
}

#[rstest]
fn test_schema_json_roundtrip(schema: Schema) {
    let json = serde_json::to_string(&schema).unwrap();
    let restored: Schema = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, schema);
}

#[rstest]
fn test_plan_json_roundtrip(schema: Schema) {
    let plan = Generator::default().generate(&schema, "Entity").unwrap();

    let json = serde_json::to_string_pretty(&plan).unwrap();
    let restored: AccessorPlan = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, plan);
}

#[rstest]
fn test_field_shape_serializes_as_variant_name() {
    assert_eq!(
        serde_json::to_string(&FieldShape::RecursiveOptionalSelfRef).unwrap(),
        "\"RecursiveOptionalSelfRef\""
    );
}

#[rstest]
#[case(r#"{}"#, GeneratorOptions::default())]
#[case(
    r#"{"accessor_suffix": "Lenses"}"#,
    GeneratorOptions { accessor_suffix: "Lenses".to_string(), ..GeneratorOptions::default() }
)]
#[case(
    r#"{"optional_prefix": "Maybe", "crate_path": "crate"}"#,
    GeneratorOptions {
        optional_prefix: "Maybe".to_string(),
        crate_path: "crate".to_string(),
        ..GeneratorOptions::default()
    }
)]
fn test_options_fill_missing_fields(#[case] json: &str, #[case] expected: GeneratorOptions) {
    let options: GeneratorOptions = serde_json::from_str(json).unwrap();
    assert_eq!(options, expected);
}

#[rstest]
fn test_restored_options_drive_generation(schema: Schema) {
    let options: GeneratorOptions = serde_json::from_str(r#"{"accessor_suffix": "Lens"}"#).unwrap();

    let plan = Generator::new(options).generate(&schema, "Entity").unwrap();

    assert_eq!(plan.root_accessor(), "EntityLens");
    assert!(plan.unit("NodeLens").is_some());
}
