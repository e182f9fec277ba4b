//! Tests for reachable-type discovery and cycle detection.

use std::collections::BTreeSet;

use optica::discovery::{DiscoveredType, discover};
use optica::schema::{CompositeType, FieldShape, MapKind, Schema, SchemaError, TypeRef};
use rstest::rstest;

fn schema_of(types: impl IntoIterator<Item = CompositeType>) -> Schema {
    types.into_iter().collect()
}

fn names(types: &[DiscoveredType]) -> Vec<&str> {
    types.iter().map(DiscoveredType::name).collect()
}

fn node() -> CompositeType {
    CompositeType::builder("Node")
        .field("value", TypeRef::scalar("String"))
        .field("child", TypeRef::optional(TypeRef::composite("Node")))
        .build()
}

// =============================================================================
// Self-reference through Option
// =============================================================================

#[rstest]
fn test_optional_self_reference_is_visited_once() {
    let discovery = discover(&schema_of([node()]), "Node").unwrap();

    assert_eq!(discovery.len(), 1);
    assert_eq!(discovery.root().name(), "Node");
    assert!(discovery.is_recursive("Node"));

    let child = &discovery.root().fields()[1];
    assert_eq!(child.shape, FieldShape::RecursiveOptionalSelfRef);
    assert_eq!(child.target(), Some("Node"));
}

#[rstest]
fn test_boxed_self_reference_is_recursive() {
    let boxed = CompositeType::builder("Node")
        .field(
            "child",
            TypeRef::optional(TypeRef::boxed(TypeRef::composite("Node"))),
        )
        .build();

    let discovery = discover(&schema_of([boxed]), "Node").unwrap();
    assert!(discovery.is_recursive("Node"));
}

#[rstest]
fn test_recursive_type_behind_required_field() {
    let schema = schema_of([
        CompositeType::builder("Entity")
            .field("id", TypeRef::scalar("u64"))
            .field("tree", TypeRef::composite("Node"))
            .build(),
        node(),
    ]);

    let discovery = discover(&schema, "Entity").unwrap();

    assert_eq!(names(discovery.types()), ["Entity", "Node"]);
    let recursive: Vec<&str> = discovery.recursive_types().map(DiscoveredType::name).collect();
    assert_eq!(recursive, ["Node"]);
    assert!(!discovery.is_recursive("Entity"));
    assert_eq!(discovery.behind_optional(), BTreeSet::from(["Node".to_string()]));
}

// =============================================================================
// Rejected cycles
// =============================================================================

#[rstest]
fn test_mutual_recursion_reports_path() {
    let schema = schema_of([
        CompositeType::builder("A")
            .field("b", TypeRef::optional(TypeRef::composite("B")))
            .build(),
        CompositeType::builder("B")
            .field("a", TypeRef::optional(TypeRef::composite("A")))
            .build(),
    ]);

    let error = discover(&schema, "A").unwrap_err();

    assert_eq!(
        error,
        SchemaError::UnsupportedCycle {
            path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
        }
    );
    assert_eq!(error.to_string(), "unsupported cycle A -> B -> A");
}

#[rstest]
fn test_cycle_through_list_is_rejected() {
    let schema = schema_of([
        CompositeType::builder("Root")
            .field("team", TypeRef::composite("Team"))
            .build(),
        CompositeType::builder("Team")
            .field("members", TypeRef::list(TypeRef::composite("Member")))
            .build(),
        CompositeType::builder("Member")
            .field("team", TypeRef::composite("Team"))
            .build(),
    ]);

    assert_eq!(
        discover(&schema, "Root"),
        Err(SchemaError::UnsupportedCycle {
            path: vec!["Team".to_string(), "Member".to_string(), "Team".to_string()],
        })
    );
}

#[rstest]
#[case::required(TypeRef::composite("Node"))]
#[case::list(TypeRef::list(TypeRef::composite("Node")))]
#[case::map(TypeRef::map(MapKind::BTree, TypeRef::scalar("String"), TypeRef::composite("Node")))]
fn test_non_optional_self_reference_is_rejected(#[case] ty: TypeRef) {
    let schema = schema_of([CompositeType::builder("Node").field("next", ty).build()]);

    assert_eq!(
        discover(&schema, "Node"),
        Err(SchemaError::UnsupportedCycle {
            path: vec!["Node".to_string(), "Node".to_string()],
        })
    );
}

// =============================================================================
// Other failures
// =============================================================================

#[rstest]
fn test_unknown_root() {
    assert_eq!(
        discover(&Schema::new(), "Missing"),
        Err(SchemaError::UnknownType {
            name: "Missing".to_string(),
        })
    );
}

#[rstest]
fn test_unknown_referenced_type() {
    let schema = schema_of([CompositeType::builder("Root")
        .field("ghost", TypeRef::optional(TypeRef::composite("Ghost")))
        .build()]);

    assert_eq!(
        discover(&schema, "Root"),
        Err(SchemaError::UnknownType {
            name: "Ghost".to_string(),
        })
    );
}

#[rstest]
#[case::nested_list(TypeRef::list(TypeRef::list(TypeRef::scalar("u8"))))]
#[case::optional_list(TypeRef::optional(TypeRef::list(TypeRef::scalar("u8"))))]
#[case::composite_key(TypeRef::map(
    MapKind::Hash,
    TypeRef::composite("Key"),
    TypeRef::scalar("u8"),
))]
#[case::set(TypeRef::unsupported("HashSet", vec![TypeRef::scalar("u8")]))]
fn test_unsupported_field_shape_names_the_field(#[case] ty: TypeRef) {
    let schema = schema_of([CompositeType::builder("Root").field("bad", ty.clone()).build()]);

    assert_eq!(
        discover(&schema, "Root"),
        Err(SchemaError::UnsupportedShape {
            type_name: "Root".to_string(),
            field: "bad".to_string(),
            ty: ty.to_string(),
        })
    );
}

// =============================================================================
// Ordering and presence
// =============================================================================

#[rstest]
fn test_types_in_first_visit_order() {
    let schema = schema_of([
        CompositeType::builder("Root")
            .field("first", TypeRef::composite("First"))
            .field("second", TypeRef::list(TypeRef::composite("Second")))
            .field("again", TypeRef::optional(TypeRef::composite("First")))
            .build(),
        CompositeType::builder("First")
            .field("deep", TypeRef::composite("Deep"))
            .build(),
        CompositeType::builder("Second").build(),
        CompositeType::builder("Deep").build(),
        CompositeType::builder("Unreachable").build(),
    ]);

    let discovery = discover(&schema, "Root").unwrap();

    assert_eq!(names(discovery.types()), ["Root", "First", "Deep", "Second"]);
    assert!(!discovery.contains("Unreachable"));
    assert!(discovery.get("Deep").is_some());
}

#[rstest]
fn test_behind_optional_follows_required_fields() {
    let schema = schema_of([
        CompositeType::builder("Order")
            .field("gift", TypeRef::optional(TypeRef::composite("Wrap")))
            .field(
                "lines",
                TypeRef::map(MapKind::Hash, TypeRef::scalar("u32"), TypeRef::composite("Line")),
            )
            .field("customer", TypeRef::composite("Customer"))
            .build(),
        CompositeType::builder("Wrap")
            .field("note", TypeRef::composite("Note"))
            .build(),
        CompositeType::builder("Note")
            .field("text", TypeRef::scalar("String"))
            .build(),
        CompositeType::builder("Line")
            .field("qty", TypeRef::scalar("u32"))
            .build(),
        CompositeType::builder("Customer")
            .field("name", TypeRef::scalar("String"))
            .build(),
    ]);

    let discovery = discover(&schema, "Order").unwrap();

    let expected: BTreeSet<String> = ["Line", "Note", "Wrap"].into_iter().map(String::from).collect();
    assert_eq!(discovery.behind_optional(), expected);
}
