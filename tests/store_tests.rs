// tests/store_tests.rs

use connectsphere::{
    error::AppError,
    models::{
        like::LikeStatus,
        report::ReportStatus,
        profile::{COUNTRY_INDIA, DatingDetails, Gender, Location, ProfileDetails, ProfileKind},
        user::Sender,
    },
    store,
    utils::{format, validation::is_public_id},
};
use sqlx::SqlitePool;

async fn test_pool() -> SqlitePool {
    let pool = store::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    store::migrate(&pool).await.expect("Failed to migrate database");
    pool
}

fn sender(id: i64, first_name: &str) -> Sender {
    Sender {
        id,
        username: Some(first_name.to_lowercase()),
        first_name: first_name.to_string(),
        last_name: None,
    }
}

fn dating(name: &str, gender: Gender) -> DatingDetails {
    DatingDetails {
        name: name.to_string(),
        gender,
        age: 25,
        country: COUNTRY_INDIA.to_string(),
        custom_country: None,
        bio: None,
        location: Some(Location::City("Pune".to_string())),
        photos: vec![format!("{}_photo", name.to_lowercase())],
    }
}

async fn user_with_profile(pool: &SqlitePool, id: i64, name: &str, gender: Gender) {
    store::users::get_or_create_user(pool, &sender(id, name))
        .await
        .unwrap()
        .expect("user should exist");
    store::profiles::save_dating_profile(pool, id, &dating(name, gender))
        .await
        .unwrap();
}

#[tokio::test]
async fn first_contact_creates_user_and_refreshes_names() {
    let pool = test_pool().await;

    let user = store::users::get_or_create_user(&pool, &sender(1, "Alex"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.first_name, "Alex");
    assert!(!user.is_banned);

    let mut renamed = sender(1, "Alexander");
    renamed.username = None;
    let user = store::users::get_or_create_user(&pool, &renamed)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.first_name, "Alexander");
    assert_eq!(user.contact(), "tg://user?id=1");
}

#[tokio::test]
async fn banned_users_are_not_returned() {
    let pool = test_pool().await;
    store::users::get_or_create_user(&pool, &sender(7, "Sam")).await.unwrap();

    assert!(store::users::set_banned(&pool, 7, true).await.unwrap());
    assert!(store::users::get_or_create_user(&pool, &sender(7, "Sam")).await.unwrap().is_none());
    assert!(store::users::active_user_ids(&pool).await.unwrap().is_empty());

    assert!(store::users::set_banned(&pool, 7, false).await.unwrap());
    assert!(store::users::get_or_create_user(&pool, &sender(7, "Sam")).await.unwrap().is_some());
    assert!(!store::users::set_banned(&pool, 99, true).await.unwrap());
}

#[tokio::test]
async fn saved_dating_profile_gets_public_id_and_keeps_it_on_edit() {
    let pool = test_pool().await;
    store::users::get_or_create_user(&pool, &sender(1, "Alex")).await.unwrap();

    let created = store::profiles::save_dating_profile(&pool, 1, &dating("Alex", Gender::Male))
        .await
        .unwrap();
    assert!(is_public_id(&created.public_id));
    assert!(created.public_id.starts_with("D_"));
    assert_eq!(created.details.bio, None);
    assert!(created.updated_at.is_none());

    let mut changed = dating("Alex", Gender::Male);
    changed.bio = Some("Hiking on weekends".to_string());
    let edited = store::profiles::save_dating_profile(&pool, 1, &changed).await.unwrap();

    assert_eq!(edited.profile_id, created.profile_id);
    assert_eq!(edited.public_id, created.public_id);
    assert_eq!(edited.created_at, created.created_at);
    assert!(edited.updated_at.is_some());
    assert_eq!(edited.details.bio.as_deref(), Some("Hiking on weekends"));

    let loaded = store::profiles::get_dating_profile(&pool, 1).await.unwrap().unwrap();
    assert_eq!(loaded.details, changed);
}

#[tokio::test]
async fn stored_profile_card_reads_back_to_the_same_details() {
    let pool = test_pool().await;
    store::users::get_or_create_user(&pool, &sender(1, "Alex")).await.unwrap();
    let mut details = dating("Alex", Gender::Male);
    details.bio = Some("Coffee and books".to_string());
    details.custom_country = Some("Nepal".to_string());
    details.country = "Other".to_string();

    let saved = store::profiles::save_dating_profile(&pool, 1, &details).await.unwrap();
    let card = format::format_profile(&ProfileDetails::Dating(saved.details.clone()), Some(&saved.public_id));

    let parsed = format::parse_dating_card(&card).unwrap();
    let mut expected = details.clone();
    expected.photos.clear();
    assert_eq!(parsed, expected);
    assert_eq!(format::parse_card(&card).public_id.as_deref(), Some(saved.public_id.as_str()));
}

#[tokio::test]
async fn profiles_are_found_by_kind_and_public_id_and_deleted() {
    let pool = test_pool().await;
    user_with_profile(&pool, 1, "Alex", Gender::Male).await;

    assert_eq!(
        store::profiles::existing_kinds(&pool, 1).await.unwrap(),
        vec![ProfileKind::Dating]
    );
    let profile = store::profiles::get_profile(&pool, ProfileKind::Dating, 1)
        .await
        .unwrap()
        .unwrap();
    let by_id = store::profiles::get_profile_by_public_id(&pool, &profile.public_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_id.user_id, 1);
    assert!(store::profiles::get_profile(&pool, ProfileKind::Client, 1).await.unwrap().is_none());

    assert!(store::profiles::delete_profile(&pool, 1, ProfileKind::Dating).await.unwrap());
    assert!(store::profiles::get_dating_profile(&pool, 1).await.unwrap().is_none());
    assert!(!store::profiles::delete_profile(&pool, 1, ProfileKind::Dating).await.unwrap());
    assert!(store::profiles::existing_kinds(&pool, 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn likes_are_unique_per_pair_and_resolved_once_by_the_liked_user() {
    let pool = test_pool().await;
    user_with_profile(&pool, 1, "Alex", Gender::Male).await;
    user_with_profile(&pool, 2, "Bella", Gender::Female).await;

    let like = store::likes::create_like(&pool, 1, 2, Some("Hi!")).await.unwrap();
    assert_eq!(like.status, LikeStatus::Pending);
    assert_eq!(like.request_message.as_deref(), Some("Hi!"));

    let duplicate = store::likes::create_like(&pool, 1, 2, None).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let own = store::likes::create_like(&pool, 1, 1, None).await;
    assert!(matches!(own, Err(AppError::BadRequest(_))));

    // Only the liked user may answer.
    let wrong_user = store::likes::resolve_like(&pool, like.like_id, 1, LikeStatus::Accepted).await;
    assert!(matches!(wrong_user, Err(AppError::NotFound(_))));

    let accepted = store::likes::resolve_like(&pool, like.like_id, 2, LikeStatus::Accepted)
        .await
        .unwrap();
    assert_eq!(accepted.status, LikeStatus::Accepted);

    let again = store::likes::resolve_like(&pool, like.like_id, 2, LikeStatus::Rejected).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    let stored = store::likes::get_like(&pool, like.like_id).await.unwrap().unwrap();
    assert_eq!(stored.status, LikeStatus::Accepted);
}

#[tokio::test]
async fn browse_candidates_skip_self_liked_and_banned_profiles() {
    let pool = test_pool().await;
    user_with_profile(&pool, 1, "Alex", Gender::Male).await;
    user_with_profile(&pool, 2, "Bella", Gender::Female).await;
    user_with_profile(&pool, 3, "Chris", Gender::Male).await;
    user_with_profile(&pool, 4, "Dana", Gender::Female).await;

    let first = store::profiles::next_dating_candidate(&pool, 1, None, 0)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.user_id, 2);

    let women = store::profiles::next_dating_candidate(&pool, 1, Some(Gender::Female), first.profile_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(women.user_id, 4);

    store::likes::create_like(&pool, 1, 2, None).await.unwrap();
    store::users::set_banned(&pool, 3, true).await.unwrap();

    let next = store::profiles::next_dating_candidate(&pool, 1, None, 0)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(next.user_id, 4);

    let after_last = store::profiles::next_dating_candidate(&pool, 1, None, next.profile_id)
        .await
        .unwrap();
    assert!(after_last.is_none());
}

#[tokio::test]
async fn reports_are_listed_until_resolved() {
    let pool = test_pool().await;
    store::users::get_or_create_user(&pool, &sender(1, "Alex")).await.unwrap();

    let first = store::reports::create_report(&pool, 1, "Spam account", Some("D_1a2b3c4d"))
        .await
        .unwrap();
    let second = store::reports::create_report(&pool, 1, "Bot is slow", None).await.unwrap();
    assert_eq!(first.status, ReportStatus::New);
    assert_eq!(second.reported_public_id, None);

    let open = store::reports::list_new_reports(&pool, 10).await.unwrap();
    assert_eq!(open.len(), 2);
    assert_eq!(open[0].report_id, first.report_id);

    assert!(store::reports::resolve_report(&pool, first.report_id).await.unwrap());
    assert!(!store::reports::resolve_report(&pool, first.report_id).await.unwrap());

    let open = store::reports::list_new_reports(&pool, 10).await.unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].report_id, second.report_id);

    let stats = store::users::bot_stats(&pool).await.unwrap();
    assert_eq!(stats.users, 1);
    assert_eq!(stats.new_reports, 1);
}

#[tokio::test]
async fn repeat_contact_keeps_the_first_seen_time_and_skips_banned_users() {
    let pool = test_pool().await;

    let first = store::users::get_or_create_user(&pool, &sender(3, "Chris"))
        .await
        .unwrap()
        .unwrap();
    let again = store::users::get_or_create_user(&pool, &sender(3, "Christopher"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(again.created_at, first.created_at);
    assert_eq!(again.first_name, "Christopher");

    store::users::set_banned(&pool, 3, true).await.unwrap();
    assert!(store::users::get_or_create_user(&pool, &sender(3, "Renamed"))
        .await
        .unwrap()
        .is_none());

    let stored = store::users::get_user(&pool, 3).await.unwrap().unwrap();
    assert_eq!(stored.first_name, "Christopher");
    assert!(stored.is_banned);
}
