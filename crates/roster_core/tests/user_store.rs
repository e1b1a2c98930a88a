use roster_core::{
    InMemoryUserStore, StoreError, UserFields, UserId, UserRecord, UserRepository,
};
use std::collections::HashSet;

fn user(id: u128, name: &str) -> UserRecord {
    UserRecord::with_id(
        UserId::from_u128(id),
        UserFields::new(name, 25, format!("https://x.com/{id}.png")),
    )
    .unwrap()
}

fn ids(store: &InMemoryUserStore) -> Vec<UserId> {
    store.list().iter().map(|user| user.id).collect()
}

#[test]
fn add_appends_in_order() {
    let mut store = InMemoryUserStore::new();
    store.add(user(7, "Gina")).unwrap();
    store.add(user(3, "Carl")).unwrap();

    assert_eq!(ids(&store), [UserId::from_u128(7), UserId::from_u128(3)]);
}

#[test]
fn add_duplicate_id_fails() {
    let mut store = InMemoryUserStore::with_records([user(1, "Alice")]).unwrap();
    let err = store.add(user(1, "Other")).unwrap_err();

    assert_eq!(err, StoreError::DuplicateId(UserId::from_u128(1)));
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].name, "Alice");
}

#[test]
fn edit_replaces_fields_in_place() {
    let mut store =
        InMemoryUserStore::with_records([user(3, "Carl"), user(5, "Bob"), user(7, "Gina")])
            .unwrap();
    store
        .edit(
            UserId::from_u128(5),
            UserFields::new("Bobby", 21, "https://x.com/new.png"),
        )
        .unwrap();

    let edited = store.get(UserId::from_u128(5)).unwrap();
    assert_eq!(edited.name, "Bobby");
    assert_eq!(edited.age, 21.0);
    assert_eq!(edited.avatar, "https://x.com/new.png");
    assert_eq!(
        ids(&store),
        [UserId::from_u128(3), UserId::from_u128(5), UserId::from_u128(7)]
    );
}

#[test]
fn edit_missing_id_is_not_found() {
    let mut store = InMemoryUserStore::new();
    let err = store
        .edit(UserId::from_u128(9), UserFields::new("Nine", 9, "https://x.com/9.png"))
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == UserId::from_u128(9)));
    assert_eq!(err.code(), "NOT_FOUND");
}

#[test]
fn remove_keeps_relative_order() {
    let mut store =
        InMemoryUserStore::with_records([user(3, "Carl"), user(5, "Bob"), user(7, "Gina")])
            .unwrap();
    let removed = store.remove(UserId::from_u128(5)).unwrap();

    assert_eq!(removed.name, "Bob");
    assert_eq!(ids(&store), [UserId::from_u128(3), UserId::from_u128(7)]);
}

#[test]
fn remove_twice_succeeds_once() {
    let mut store = InMemoryUserStore::with_records([user(5, "Bob")]).unwrap();

    store.remove(UserId::from_u128(5)).unwrap();
    let err = store.remove(UserId::from_u128(5)).unwrap_err();
    assert_eq!(err, StoreError::NotFound(UserId::from_u128(5)));
    assert!(store.is_empty());
}

#[test]
fn ids_stay_unique_across_mixed_operations() {
    let mut store = InMemoryUserStore::new();
    // Deterministic pseudo-random walk over a small id space so collisions
    // and misses both happen.
    let mut seed: u64 = 0x2545_f491;
    for step in 0..500u32 {
        seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        let id = u128::from((seed >> 33) % 16 + 1);
        let outcome = match (seed >> 20) % 3 {
            0 => store.add(user(id, "Someone")).map(|_| ()),
            1 => store
                .edit(
                    UserId::from_u128(id),
                    UserFields::new(format!("Edit{step}"), step + 1, "https://x.com/e.png"),
                )
                .map(|_| ()),
            _ => store.remove(UserId::from_u128(id)).map(|_| ()),
        };
        if let Err(err) = outcome {
            assert!(matches!(
                err,
                StoreError::DuplicateId(_) | StoreError::NotFound(_)
            ));
        }

        let unique: HashSet<UserId> = store.list().iter().map(|user| user.id).collect();
        assert_eq!(unique.len(), store.len(), "duplicate id after step {step}");
    }
}
