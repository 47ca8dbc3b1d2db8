//! `MemoryStore` and `RedbStore` must answer identically for any sequence of
//! writes.

use bourbon_core::{ActivityLevel, Diet, Gender, Goal, Training, UserData};
use bourbon_store::{MemoryStore, PasswordDigest, ProfileStore, RedbStore, StoredAccount};
use proptest::prelude::*;
use tempfile::tempdir;

const EMAILS: [&str; 3] = ["a@example.com", "b@example.com", "c@example.com"];

#[derive(Debug, Clone)]
enum Op {
    CreateAccount(usize),
    StoreData(usize, u8),
    SetSession(Option<usize>),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..EMAILS.len()).prop_map(Op::CreateAccount),
        (0..EMAILS.len(), 1u8..8).prop_map(|(i, meals)| Op::StoreData(i, meals)),
        proptest::option::of(0..EMAILS.len()).prop_map(Op::SetSession),
    ]
}

fn data(meals: u8) -> UserData {
    UserData {
        weight_kg: 70.0,
        height_cm: 170.0,
        gender: Gender::Other,
        age: 30,
        goal: Goal::MaintainWeight,
        target_weight_kg: None,
        training: Training::Mixed,
        activity_level: ActivityLevel::Active,
        diet: Diet::Vegan,
        meals_per_day: meals,
    }
}

fn apply<S: ProfileStore>(store: &S, op: &Op, digest: &PasswordDigest) -> Option<bool> {
    match op {
        Op::CreateAccount(i) => {
            let account = StoredAccount {
                uid: format!("uid-{i}"),
                email: EMAILS[*i].to_owned(),
                name: format!("user{i}"),
                password: digest.clone(),
            };
            Some(store.create_account(&account).unwrap())
        },
        Op::StoreData(i, meals) => {
            store.store_user_data(&format!("uid-{i}"), &data(*meals)).unwrap();
            None
        },
        Op::SetSession(i) => {
            store.store_session(i.map(|i| EMAILS[i])).unwrap();
            None
        },
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn stores_agree(ops in proptest::collection::vec(op(), 0..24)) {
        let dir = tempdir().unwrap();
        let redb = RedbStore::open(dir.path().join("equiv.redb")).unwrap();
        let memory = MemoryStore::new();
        let digest = PasswordDigest::new("secret1").unwrap();

        for op in &ops {
            prop_assert_eq!(apply(&memory, op, &digest), apply(&redb, op, &digest));
        }

        prop_assert_eq!(memory.load_session().unwrap(), redb.load_session().unwrap());
        for (i, email) in EMAILS.iter().enumerate() {
            prop_assert_eq!(memory.load_account(email).unwrap(), redb.load_account(email).unwrap());
            let uid = format!("uid-{i}");
            prop_assert_eq!(memory.load_user_data(&uid).unwrap(), redb.load_user_data(&uid).unwrap());
        }
    }
}
