//! Property-based tests for Lens laws.
//!
//! This module verifies that the Lens implementations satisfy the required laws:
//!
//! - **GetPut Law**: `lens.set(source.clone(), lens.get(&source)) == source`
//! - **PutGet Law**: `lens.get(&lens.set(source, value.clone())) == value`
//! - **PutPut Law**: `lens.set(lens.set(source, v1), v2) == lens.set(source, v2)`
//!
//! plus associativity of composition and neutrality of the identity lens.

use std::collections::BTreeMap;

use optica::lens;
use optica::optics::{BoxedLens, IdentityLens, IndexLens, KeyLens, Lens, OptionalLens};
use proptest::prelude::*;

// =============================================================================
// Test Structures
// =============================================================================

#[derive(Clone, PartialEq, Debug)]
struct Street {
    name: String,
    number: u16,
}

#[derive(Clone, PartialEq, Debug)]
struct Address {
    street: Street,
    city: String,
}

#[derive(Clone, PartialEq, Debug)]
struct Person {
    name: String,
    address: Address,
}

#[derive(Clone, PartialEq, Debug)]
struct Profile {
    nickname: String,
}

#[derive(Clone, PartialEq, Debug)]
struct User {
    profile: Option<Profile>,
}

fn street_strategy() -> impl Strategy<Value = Street> {
    ("[a-z]{0,8}", any::<u16>()).prop_map(|(name, number)| Street { name, number })
}

fn person_strategy() -> impl Strategy<Value = Person> {
    ("[a-z]{0,8}", street_strategy(), "[a-z]{0,8}").prop_map(|(name, street, city)| Person {
        name,
        address: Address { street, city },
    })
}

// =============================================================================
// Field and composed lenses
// =============================================================================

proptest! {
    /// GetPut Law for a three-level composed lens
    #[test]
    fn prop_composed_get_put_law(person in person_strategy()) {
        let number = lens!(Person, address)
            .compose(lens!(Address, street))
            .compose(lens!(Street, number));
        let value = number.get(&person);
        prop_assert_eq!(number.set(person.clone(), value), person);
    }

    /// PutGet Law for a three-level composed lens
    #[test]
    fn prop_composed_put_get_law(person in person_strategy(), value in any::<u16>()) {
        let number = lens!(Person, address)
            .compose(lens!(Address, street))
            .compose(lens!(Street, number));
        prop_assert_eq!(number.get(&number.set(person, value)), value);
    }

    /// PutPut Law for a three-level composed lens
    #[test]
    fn prop_composed_put_put_law(
        person in person_strategy(),
        first in any::<u16>(),
        second in any::<u16>()
    ) {
        let number = lens!(Person, address)
            .compose(lens!(Address, street))
            .compose(lens!(Street, number));
        let left = number.set(number.set(person.clone(), first), second);
        let right = number.set(person, second);
        prop_assert_eq!(left, right);
    }

    /// Composition is associative
    #[test]
    fn prop_composition_is_associative(person in person_strategy(), value in "[a-z]{0,8}") {
        let left = lens!(Person, address)
            .compose(lens!(Address, street))
            .compose(lens!(Street, name));
        let right = lens!(Person, address)
            .compose(lens!(Address, street).compose(lens!(Street, name)));

        prop_assert_eq!(left.get(&person), right.get(&person));
        prop_assert_eq!(left.set(person.clone(), value.clone()), right.set(person, value));
    }

    /// The identity lens is neutral on both sides
    #[test]
    fn prop_identity_is_neutral(person in person_strategy(), city in "[a-z]{0,8}") {
        let plain = lens!(Person, address).compose(lens!(Address, city));
        let left = IdentityLens::<Person>::new().compose(plain.clone());
        let right = plain.clone().compose(IdentityLens::<String>::new());

        prop_assert_eq!(left.get(&person), plain.get(&person));
        prop_assert_eq!(right.get(&person), plain.get(&person));
        prop_assert_eq!(
            left.set(person.clone(), city.clone()),
            plain.set(person.clone(), city.clone())
        );
        prop_assert_eq!(right.set(person.clone(), city.clone()), plain.set(person, city));
    }

    /// Setting never changes the caller's retained original
    #[test]
    fn prop_set_leaves_original_unchanged(person in person_strategy(), city in "[a-z]{0,8}") {
        let snapshot = person.clone();
        let city_lens = lens!(Person, address).compose(lens!(Address, city));
        let _updated = city_lens.set(person.clone(), city);
        prop_assert_eq!(person, snapshot);
    }
}

// =============================================================================
// Collection lenses
// =============================================================================

proptest! {
    /// IndexLens satisfies all three laws within range
    #[test]
    fn prop_index_lens_laws(
        list in prop::collection::vec(any::<i32>(), 1..16),
        index_seed in any::<usize>(),
        first in any::<i32>(),
        second in any::<i32>()
    ) {
        let index = index_seed % list.len();
        let lens = IndexLens::new(index);

        prop_assert_eq!(lens.set(list.clone(), lens.get(&list)), list.clone());
        prop_assert_eq!(lens.get(&lens.set(list.clone(), first)), first);
        prop_assert_eq!(
            lens.set(lens.set(list.clone(), first), second),
            lens.set(list, second)
        );
    }

    /// KeyLens satisfies all three laws over its optional focus
    #[test]
    fn prop_key_lens_laws(
        map in prop::collection::btree_map("[a-c]", any::<i32>(), 0..4),
        key in "[a-d]",
        first in proptest::option::of(any::<i32>()),
        second in proptest::option::of(any::<i32>())
    ) {
        let lens = KeyLens::new(key);

        prop_assert_eq!(lens.set(map.clone(), lens.get(&map)), map.clone());
        prop_assert_eq!(lens.get(&lens.set(map.clone(), first)), first);
        prop_assert_eq!(
            lens.set(lens.set(map.clone(), first), second),
            lens.set(map, second)
        );
    }

    /// Map upsert keeps every other entry
    #[test]
    fn prop_key_lens_upsert_keeps_other_entries(
        map in prop::collection::btree_map("[a-c]", any::<i32>(), 0..4),
        value in any::<i32>()
    ) {
        let updated = KeyLens::new("missing".to_string()).set(map.clone(), Some(value));

        let mut expected: BTreeMap<String, i32> = map;
        expected.insert("missing".to_string(), value);
        prop_assert_eq!(updated, expected);
    }
}

// =============================================================================
// Optional properties
// =============================================================================

fn nickname() -> BoxedLens<User, String> {
    OptionalLens::new(BoxedLens::new(
        |user: &User| user.profile.clone(),
        |_user: User, profile| User { profile },
    ))
    .property(
        |profile: &Profile| profile.nickname.clone(),
        |_profile, nickname| Profile { nickname },
        String::new(),
    )
}

proptest! {
    /// While present, an optional property is a lawful lens
    #[test]
    fn prop_present_property_laws(
        current in "[a-z]{0,8}",
        first in "[a-z]{0,8}",
        second in "[a-z]{0,8}"
    ) {
        let lens = nickname();
        let user = User { profile: Some(Profile { nickname: current }) };

        prop_assert_eq!(lens.set(user.clone(), lens.get(&user)), user.clone());
        prop_assert_eq!(lens.get(&lens.set(user.clone(), first.clone())), first.clone());
        prop_assert_eq!(
            lens.set(lens.set(user.clone(), first), second.clone()),
            lens.set(user, second)
        );
    }

    /// While empty, every write is ignored
    #[test]
    fn prop_empty_property_ignores_writes(value in "[a-z]{0,8}") {
        let lens = nickname();
        let anonymous = User { profile: None };
        prop_assert_eq!(lens.set(anonymous.clone(), value), anonymous);
    }
}
