use vibescout::error::ProfileError;
use vibescout::profile::ProfileStore;

fn store_in(dir: &tempfile::TempDir) -> ProfileStore {
    ProfileStore::open(dir.path().join("users.json")).expect("open profile store")
}

#[tokio::test]
async fn register_defaults_display_name_to_the_local_part() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);

    let profile = store
        .register("ana@example.com", "hunter2", None)
        .await
        .expect("register");

    assert_eq!(profile.display_name, "ana");
    assert_eq!(profile.taste_summary, "");
    assert!(store.contains("ana@example.com").await);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);

    store
        .register("ana@example.com", "hunter2", Some("Ana"))
        .await
        .expect("register");

    let err = store
        .register("ana@example.com", "other", None)
        .await
        .expect_err("duplicate should fail");
    assert!(matches!(err, ProfileError::AlreadyRegistered));
}

#[tokio::test]
async fn verify_accepts_only_the_matching_password() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);

    store
        .register("ana@example.com", "hunter2", Some("Ana"))
        .await
        .expect("register");

    let profile = store
        .verify("ana@example.com", "hunter2")
        .await
        .expect("login");
    assert_eq!(profile.display_name, "Ana");

    let wrong = store.verify("ana@example.com", "nope").await;
    assert!(matches!(wrong, Err(ProfileError::InvalidCredentials)));
    let unknown = store.verify("bob@example.com", "hunter2").await;
    assert!(matches!(unknown, Err(ProfileError::InvalidCredentials)));
}

#[tokio::test]
async fn taste_summary_is_a_full_overwrite() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);

    store
        .register("ana@example.com", "hunter2", None)
        .await
        .expect("register");

    store
        .set_taste_summary("ana@example.com", "Enjoys jazz.")
        .await
        .expect("first write");
    store
        .set_taste_summary("ana@example.com", "Enjoys techno.")
        .await
        .expect("second write");

    assert_eq!(
        store.taste_summary("ana@example.com").await.as_deref(),
        Some("Enjoys techno.")
    );
}

#[tokio::test]
async fn updating_an_unknown_user_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);

    let err = store
        .set_taste_summary("ghost@example.com", "anything")
        .await
        .expect_err("unknown user");
    assert!(matches!(err, ProfileError::UnknownUser));
}

#[tokio::test]
async fn profiles_survive_a_reload_from_the_same_path() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let store = store_in(&dir);
        store
            .register("ana@example.com", "hunter2", Some("Ana"))
            .await
            .expect("register");
        store
            .set_taste_summary("ana@example.com", "Enjoys quiet wine bars.")
            .await
            .expect("write summary");
    }

    let reloaded = store_in(&dir);
    assert_eq!(reloaded.count().await, 1);
    assert_eq!(
        reloaded.taste_summary("ana@example.com").await.as_deref(),
        Some("Enjoys quiet wine bars.")
    );
    let profile = reloaded
        .verify("ana@example.com", "hunter2")
        .await
        .expect("login after reload");
    assert_eq!(profile.display_name, "Ana");
}
