//! Tests for the accessors the renderer emitted for the fixture model.

use std::collections::{BTreeMap, HashMap};

use optica::mutation::Mutations;
use optica::optics::{Accessor, Lens, Lensed, OptionalAccessor};
use optica_fixtures::{
    Address, Contact, Entity, Gift, Kind, Node, NodeAccessor, OptionalAddressAccessor, Priority,
};
use rstest::{fixture, rstest};

// =============================================================================
// Fixtures
// =============================================================================

fn node(value: &str, kind: Kind, child: Option<Node>) -> Node {
    Node {
        value: value.to_string(),
        kind,
        child: child.map(Box::new),
    }
}

fn three_levels() -> Node {
    node(
        "root",
        Kind::Card,
        Some(node(
            "child",
            Kind::Wrap,
            Some(node("grandchild", Kind::Card, None)),
        )),
    )
}

fn address(city: &str) -> Address {
    Address {
        city: city.to_string(),
        zip: None,
        history: Vec::new(),
    }
}

fn contact(email: &str) -> Contact {
    Contact {
        email: email.to_string(),
        phones: Vec::new(),
    }
}

#[fixture]
fn entity() -> Entity {
    Entity {
        id: 7,
        nickname: None,
        address: address("Oslo"),
        billing: None,
        tags: vec!["new".to_string()],
        contacts: vec![contact("ada@example.com"), contact("bob@example.com")],
        labels: HashMap::from([("tier".to_string(), 1)]),
        offices: BTreeMap::from([("hq".to_string(), address("Bergen"))]),
        tree: Box::new(three_levels()),
        gift: None,
    }
}

fn is_accessor<A: Accessor<Entity, Node> + OptionalAccessor<Entity, Node>>(_: &A) {}

// =============================================================================
// Recursive chaining
// =============================================================================

#[rstest]
#[case(0, "root")]
#[case(1, "child")]
#[case(2, "grandchild")]
#[case(3, "")]
#[case(6, "")]
fn test_read_at_depth(#[case] depth: usize, #[case] expected: &str) {
    let accessor = (0..depth).fold(Node::lenses(), |accessor, _| accessor.child());
    assert_eq!(accessor.value().get(&three_levels()), expected);
}

#[rstest]
fn test_tree_chain_from_entity(entity: Entity) {
    let leaf = Entity::lenses().tree().child().child();

    assert_eq!(leaf.value().get(&entity), "grandchild");
    assert!(leaf.is_present(&entity));
    assert!(!leaf.child().is_present(&entity));
    is_accessor(&leaf);
}

#[rstest]
fn test_deep_write_changes_only_grandchild(entity: Entity) {
    let updated = Entity::lenses()
        .tree()
        .child()
        .child()
        .value()
        .set(entity.clone(), "X".to_string());

    let expected = Entity {
        tree: Box::new(node(
            "root",
            Kind::Card,
            Some(node("child", Kind::Wrap, Some(node("X", Kind::Card, None)))),
        )),
        ..entity.clone()
    };
    assert_eq!(updated, expected);
    assert_eq!(entity.tree.as_ref(), &three_levels());
}

#[rstest]
fn test_write_below_missing_child_is_ignored(entity: Entity) {
    let too_deep = Entity::lenses().tree().child().child().child().value();
    assert_eq!(too_deep.set(entity.clone(), "lost".to_string()), entity);
}

#[rstest]
fn test_child_attach_and_detach() {
    let leaf = node("leaf", Kind::Card, None);

    let grown = Node::lenses()
        .child()
        .set(leaf.clone(), Some(node("bud", Kind::Wrap, None)));
    assert_eq!(Node::lenses().child().value().get(&grown), "bud");

    let pruned = Node::lenses().child().set(grown, None);
    assert_eq!(pruned, leaf);
}

#[rstest]
fn test_required_anchor_ignores_none(entity: Entity) {
    assert_eq!(Entity::lenses().tree().set(entity.clone(), None), entity);
}

// =============================================================================
// Scalars without a default
// =============================================================================

#[rstest]
fn test_kind_reads_as_option_in_recursive_unit(entity: Entity) {
    let tree = Entity::lenses().tree();

    assert_eq!(tree.kind().get(&entity), Some(Kind::Card));
    assert_eq!(tree.child().kind().get(&entity), Some(Kind::Wrap));
    assert_eq!(tree.child().child().child().kind().get(&entity), None);
}

#[rstest]
fn test_kind_write_of_none_is_ignored(entity: Entity) {
    let kind = Entity::lenses().tree().child().kind();

    let updated = kind.set(entity.clone(), Some(Kind::Card));
    assert_eq!(kind.get(&updated), Some(Kind::Card));
    assert_eq!(kind.set(updated.clone(), None), updated);
}

#[rstest]
fn test_empty_gift_reads_unset_and_configured_defaults(entity: Entity) {
    let gift = Entity::lenses().gift();

    assert!(!gift.is_present(&entity));
    assert_eq!(gift.kind().get(&entity), None);
    assert_eq!(gift.priority().get(&entity), Priority::Low);
    assert_eq!(gift.note().get(&entity), None);
    assert_eq!(gift.priority().set(entity.clone(), Priority::High), entity);
}

#[rstest]
fn test_present_gift_round_trips(entity: Entity) {
    let gift = Entity::lenses().gift();
    let wrapped = gift.set(
        entity,
        Some(Gift {
            kind: Kind::Wrap,
            priority: Priority::High,
            note: None,
        }),
    );

    assert_eq!(gift.kind().get(&wrapped), Some(Kind::Wrap));
    assert_eq!(gift.priority().get(&wrapped), Priority::High);

    let noted = gift.note().set(wrapped, Some("thanks".to_string()));
    assert_eq!(
        noted.gift.and_then(|gift| gift.note),
        Some("thanks".to_string())
    );
}

// =============================================================================
// Collections
// =============================================================================

#[rstest]
fn test_contacts_at_index(entity: Entity) {
    let contacts = Entity::lenses().contacts();

    assert_eq!(contacts.len(&entity), 2);
    assert_eq!(contacts.at(1).email().get(&entity), "bob@example.com");

    let updated = contacts.at(0).phones().push(entity, "555".to_string());
    assert_eq!(updated.contacts[0].phones, ["555"]);
    assert!(updated.contacts[1].phones.is_empty());
}

#[rstest]
#[should_panic(expected = "index 5 out of range for sequence of length 2")]
fn test_contacts_out_of_range_panics(entity: Entity) {
    let _ = Entity::lenses().contacts().at(5).email().get(&entity);
}

#[rstest]
fn test_offices_at_key(entity: Entity) {
    let offices = Entity::lenses().offices();
    let hq: OptionalAddressAccessor<Entity> = offices.at("hq".to_string());

    assert_eq!(hq.city().get(&entity), "Bergen");
    assert_eq!(offices.at("branch".to_string()).city().get(&entity), "");
    assert!(!offices.at("branch".to_string()).is_present(&entity));

    let moved = hq.history().push(entity, "Oslo".to_string());
    assert_eq!(moved.offices["hq"].history, ["Oslo"]);
}

#[rstest]
fn test_offices_write_to_missing_key_is_ignored(entity: Entity) {
    let branch = Entity::lenses().offices().at("branch".to_string());
    assert_eq!(branch.city().set(entity.clone(), "Tromso".to_string()), entity);
}

#[rstest]
fn test_offices_entry_inserts(entity: Entity) {
    let offices = Entity::lenses().offices();

    let opened = offices
        .entry("branch".to_string())
        .set(entity, Some(address("Tromso")));
    assert_eq!(offices.at("branch".to_string()).city().get(&opened), "Tromso");
    assert_eq!(offices.get(&opened).len(), 2);
}

#[rstest]
fn test_labels_and_tags(entity: Entity) {
    let lenses = Entity::lenses();

    assert_eq!(lenses.labels().at("tier".to_string()).get(&entity), Some(1));
    let cleared = lenses.labels().at("tier".to_string()).set(entity, None);
    assert!(cleared.labels.is_empty());

    let tagged = lenses.tags().push(cleared, "vip".to_string());
    assert_eq!(tagged.tags, ["new", "vip"]);
}

// =============================================================================
// Optional composites
// =============================================================================

#[rstest]
fn test_empty_billing_uses_defaults(entity: Entity) {
    let billing = Entity::lenses().billing();

    assert_eq!(billing.city().get(&entity), "");
    assert_eq!(billing.zip().get(&entity), None);
    assert!(billing.history().is_empty(&entity));
    assert_eq!(billing.city().set(entity.clone(), "Oslo".to_string()), entity);
}

#[rstest]
fn test_billing_once_present(entity: Entity) {
    let billing = Entity::lenses().billing();
    let billed = billing.set(entity, Some(address("Stavanger")));

    let zipped = billing.zip().set(billed, Some("4006".to_string()));
    assert_eq!(
        zipped.billing.map(|billing| (billing.city, billing.zip)),
        Some(("Stavanger".to_string(), Some("4006".to_string())))
    );
}

// =============================================================================
// Batches
// =============================================================================

#[rstest]
fn test_batch_across_shapes(entity: Entity) {
    let lenses = Entity::lenses();
    let batch = Mutations::for_type()
        .set(lenses.id(), 8)
        .set(lenses.nickname(), Some("ace".to_string()))
        .modify(lenses.address().city(), |city: String| city.to_uppercase())
        .set(lenses.tree().child().child().value(), "deep".to_string())
        .set(lenses.offices().at("hq".to_string()).city(), "Bodo".to_string());

    let updated = batch.apply(entity);

    assert_eq!(updated.id, 8);
    assert_eq!(updated.nickname.as_deref(), Some("ace"));
    assert_eq!(updated.address.city, "OSLO");
    assert_eq!(lenses.tree().child().child().value().get(&updated), "deep");
    assert_eq!(updated.offices["hq"].city, "Bodo");
}

#[rstest]
fn test_bound_batch(entity: Entity) {
    let updated = entity
        .on()
        .set(Entity::lenses().tree().value(), "top".to_string())
        .set(Entity::lenses().contacts().at(1).email(), "eve@example.com".to_string())
        .apply();

    assert_eq!(updated.tree.value, "top");
    assert_eq!(updated.contacts[1].email, "eve@example.com");
}

#[rstest]
fn test_node_accessor_type_from_both_anchors() {
    let from_required: NodeAccessor<Entity> = Entity::lenses().tree();
    let from_optional: NodeAccessor<Entity> = from_required.child();
    is_accessor(&from_optional);
}
