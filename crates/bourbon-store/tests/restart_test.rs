//! Restart tests for `RedbStore`.
//!
//! Accounts, profiles, the session, and the backstack must all survive a
//! close and reopen of the database.

use bourbon_app::UserRepository;
use bourbon_core::{
    ActivityLevel, Diet, Gender, Goal, RoutePath, Router, RouterInput, Target, Training, UserData,
};
use bourbon_store::{LocalUserRepository, ProfileStore, RedbStore};
use tempfile::tempdir;

fn profile() -> UserData {
    UserData {
        weight_kg: 88.5,
        height_cm: 176.0,
        gender: Gender::Male,
        age: 44,
        goal: Goal::LoseWeight,
        target_weight_kg: Some(80.0),
        training: Training::Cardio,
        activity_level: ActivityLevel::Light,
        diet: Diet::Balanced,
        meals_per_day: 3,
    }
}

#[tokio::test]
async fn test_signed_in_user_survives_restart() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("bourbon.redb");

    let uid = {
        let repo = LocalUserRepository::new(RedbStore::open(&db_path).unwrap());
        let user = repo.sign_up_with_email("sam@example.com", "secret1").await.unwrap();
        repo.save_data(&user, &profile()).await.unwrap();
        user.uid
    };

    {
        let repo = LocalUserRepository::new(RedbStore::open(&db_path).unwrap());
        assert!(repo.is_logged_in().await.unwrap());

        let user = repo.load_user_fully().await.unwrap().unwrap();
        assert_eq!(user.uid, uid);
        assert_eq!(user.email, "sam@example.com");
        assert_eq!(user.data, Some(profile()));
    }
}

#[tokio::test]
async fn test_sign_out_survives_restart() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("bourbon.redb");

    {
        let repo = LocalUserRepository::new(RedbStore::open(&db_path).unwrap());
        repo.sign_up_with_email("sam@example.com", "secret1").await.unwrap();
        repo.sign_out().await.unwrap();
    }

    {
        let repo = LocalUserRepository::new(RedbStore::open(&db_path).unwrap());
        assert!(!repo.is_logged_in().await.unwrap());
        // The account itself remains and accepts its password.
        assert!(repo.exists("sam@example.com").await.unwrap());
        repo.sign_in_with_email("sam@example.com", "secret1").await.unwrap();
    }
}

#[test]
fn test_backstack_survives_restart() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("bourbon.redb");

    let mut router = Router::at(RoutePath::Home).unwrap();
    router.handle(RouterInput::GoToDestination(Target::Route(RoutePath::ExerciseList)));
    router.handle(RouterInput::GoToDestination(Target::Url("/ar/burpee".into())));
    let saved = router.backstack().clone();
    assert_eq!(saved.len(), 3);

    {
        let store = RedbStore::open(&db_path).unwrap();
        store.store_backstack(&saved).unwrap();
    }

    {
        let store = RedbStore::open(&db_path).unwrap();
        let loaded = store.load_backstack().unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.current().path(), "/ar/burpee");
    }
}
