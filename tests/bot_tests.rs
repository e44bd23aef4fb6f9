// tests/bot_tests.rs

use std::time::Instant;

use connectsphere::{
    action::{Action, CountryChoice},
    config::Config,
    conversation::step::Step,
    handle_update,
    handlers::{dispatch::FAILURE_NOTICE, timeout},
    messenger::{Messenger, Outbox},
    models::{
        like::LikeStatus,
        profile::{COUNTRY_INDIA, DatingDetails, Gender, Location, ProfileKind},
        update::{Event, InboundUpdate, OutboundAction},
        user::Sender,
    },
    state::AppState,
    store,
};

const ADMIN_ID: i64 = 100;

fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        webhook_secret: "test_secret".to_string(),
        admin_user_id: Some(ADMIN_ID),
        max_profile_photos: 3,
        request_message_limit: 200,
        conversation_timeout_secs: 900,
        outbound_webhook_url: None,
        port: 0,
        rust_log: "error".to_string(),
    }
}

async fn state_with(config: Config) -> AppState {
    let pool = store::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    store::migrate(&pool).await.expect("Failed to migrate database");

    AppState::new(pool, config)
}

async fn test_state() -> AppState {
    state_with(test_config()).await
}

fn sender(id: i64, first_name: &str) -> Sender {
    Sender {
        id,
        username: Some(first_name.to_lowercase()),
        first_name: first_name.to_string(),
        last_name: None,
    }
}

fn text(t: &str) -> Event {
    Event::Text { text: t.to_string() }
}

fn button(action: Action) -> Event {
    Event::Button {
        data: action.to_string(),
        message_id: None,
        callback_id: None,
    }
}

async fn send(state: &AppState, from: &Sender, event: Event) -> Vec<OutboundAction> {
    let outbox = Outbox::new();
    handle_update(
        state,
        &outbox,
        InboundUpdate {
            from: from.clone(),
            event,
        },
    )
    .await
    .expect("update should be handled");
    outbox.into_actions()
}

fn last_text(actions: &[OutboundAction]) -> &str {
    actions
        .iter()
        .rev()
        .find_map(|a| a.text())
        .expect("expected at least one message")
}

fn accept_button(request: &OutboundAction) -> Action {
    request
        .menu()
        .expect("request should carry buttons")
        .buttons()
        .filter_map(|b| b.action.parse::<Action>().ok())
        .find(|a| matches!(a, Action::Accept(_)))
        .expect("accept button")
}

/// Walks a new dating profile up to the preview, one photo attached.
async fn fill_dating_draft(state: &AppState, who: &Sender) {
    send(state, who, button(Action::Create(ProfileKind::Dating))).await;
    send(state, who, text(&who.first_name)).await;
    send(state, who, button(Action::Gender(Gender::Male))).await;
    send(state, who, text("25")).await;
    send(state, who, button(Action::Country(CountryChoice::India))).await;
    send(state, who, text("/skip")).await;
    send(state, who, text("Pune")).await;
    send(
        state,
        who,
        Event::Photo {
            file_ids: vec!["photo".to_string()],
            caption: None,
        },
    )
    .await;
    send(state, who, text("/donephotos")).await;
}

async fn seed_dating_profile(state: &AppState, who: &Sender, gender: Gender) -> String {
    store::users::get_or_create_user(&state.pool, who).await.unwrap();
    let details = DatingDetails {
        name: who.first_name.clone(),
        gender,
        age: 27,
        country: COUNTRY_INDIA.to_string(),
        custom_country: None,
        bio: Some("Loves hiking".to_string()),
        location: Some(Location::City("Mumbai".to_string())),
        photos: vec![format!("{}_photo", who.first_name.to_lowercase())],
    };
    store::profiles::save_dating_profile(&state.pool, who.id, &details)
        .await
        .unwrap()
        .public_id
}

#[tokio::test]
async fn start_greets_user_with_main_menu() {
    let state = test_state().await;
    let alex = sender(1, "Alex");

    let actions = send(&state, &alex, text("/start")).await;

    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].chat_id(), Some(1));
    assert!(last_text(&actions).starts_with("Welcome to ConnectSphere Bot, Alex! 👋"));
    let menu = actions[0].menu().expect("main menu");
    assert!(menu.has_action(&Action::ProfileMenu.to_string()));
}

#[tokio::test]
async fn dating_profile_is_created_through_the_conversation() {
    let state = test_state().await;
    let alex = sender(1, "Alex");

    send(&state, &alex, text("/start")).await;
    let actions = send(&state, &alex, button(Action::Create(ProfileKind::Dating))).await;
    assert!(last_text(&actions).contains("your name"));

    send(&state, &alex, text("Alex")).await;
    send(&state, &alex, button(Action::Gender(Gender::Male))).await;
    send(&state, &alex, text("25")).await;
    send(&state, &alex, button(Action::Country(CountryChoice::India))).await;
    send(&state, &alex, text("/skip")).await;
    send(&state, &alex, text("pune")).await;

    let actions = send(
        &state,
        &alex,
        Event::Photo {
            file_ids: vec!["small".to_string(), "large".to_string()],
            caption: None,
        },
    )
    .await;
    assert_eq!(
        last_text(&actions),
        "Photo 1 received! You can add 2 more, or type /donephotos."
    );

    let actions = send(&state, &alex, text("/donephotos")).await;
    match actions.last() {
        Some(OutboundAction::SendPhoto { photo, caption, menu, .. }) => {
            assert_eq!(photo, "large");
            assert!(caption.starts_with("Looks great! Here's your profile preview:"));
            assert!(caption.contains("📍 Location: Pune"));
            assert!(menu.as_ref().unwrap().has_action(&Action::Save.to_string()));
        }
        other => panic!("expected a photo preview, got {:?}", other),
    }

    let actions = send(&state, &alex, button(Action::Save)).await;
    assert!(last_text(&actions).starts_with("✅ Your Dating Profile has been created successfully!"));

    let saved = store::profiles::get_dating_profile(&state.pool, 1)
        .await
        .unwrap()
        .expect("profile should be stored");
    assert_eq!(saved.details.name, "Alex");
    assert_eq!(saved.details.age, 25);
    assert_eq!(saved.details.bio, None);
    assert_eq!(saved.details.photos, vec!["large".to_string()]);
    assert!(last_text(&actions).contains(&saved.public_id));

    // The flow is over, plain text no longer feeds it.
    let actions = send(&state, &alex, text("hello")).await;
    assert!(last_text(&actions).starts_with("I didn't understand that."));
}

#[tokio::test]
async fn dating_profile_needs_at_least_one_photo() {
    let state = test_state().await;
    let alex = sender(1, "Alex");

    send(&state, &alex, button(Action::Create(ProfileKind::Dating))).await;
    send(&state, &alex, text("Alex")).await;
    send(&state, &alex, button(Action::Gender(Gender::Male))).await;
    send(&state, &alex, text("25")).await;
    send(&state, &alex, button(Action::Country(CountryChoice::India))).await;
    send(&state, &alex, text("/skip")).await;
    send(&state, &alex, text("Pune")).await;

    let actions = send(&state, &alex, text("/donephotos")).await;
    assert_eq!(
        last_text(&actions),
        "You haven't added any photos yet. Please send at least one photo."
    );

    let actions = send(&state, &alex, text("/skip")).await;
    assert!(!last_text(&actions).starts_with("Looks great!"));
    assert!(store::profiles::get_dating_profile(&state.pool, 1).await.unwrap().is_none());
}

#[tokio::test]
async fn cancel_discards_the_draft() {
    let state = test_state().await;
    let alex = sender(1, "Alex");

    send(&state, &alex, button(Action::Create(ProfileKind::Dating))).await;
    send(&state, &alex, text("Alex")).await;

    let actions = send(&state, &alex, text("/cancel")).await;
    assert_eq!(
        last_text(&actions),
        "Profile creation cancelled. What would you like to do?"
    );

    let actions = send(&state, &alex, text("/cancel")).await;
    assert_eq!(last_text(&actions), "There is nothing to cancel.");
}

#[tokio::test]
async fn banned_users_get_no_reply() {
    let state = test_state().await;
    let spammer = sender(5, "Spam");

    send(&state, &spammer, text("/start")).await;
    store::users::set_banned(&state.pool, 5, true).await.unwrap();

    let actions = send(&state, &spammer, text("/start")).await;
    assert!(actions.is_empty());
}

#[tokio::test]
async fn accepted_like_exchanges_contacts() {
    let state = test_state().await;
    let alex = sender(1, "Alex");
    let bella = sender(2, "Bella");
    seed_dating_profile(&state, &alex, Gender::Male).await;
    let bella_id = seed_dating_profile(&state, &bella, Gender::Female).await;

    send(&state, &alex, button(Action::BrowseStart)).await;
    let actions = send(&state, &alex, button(Action::BrowsePref(Some(Gender::Female)))).await;
    let shown = actions.last().unwrap();
    assert!(shown.text().unwrap().contains("👤 Name: Bella"));
    assert!(shown.menu().unwrap().has_action(&Action::Like(bella_id.clone()).to_string()));

    let actions = send(&state, &alex, button(Action::Like(bella_id.clone()))).await;
    assert!(last_text(&actions).starts_with("💌 Want to add a short message"));

    let actions = send(&state, &alex, text("Hi Bella!")).await;
    assert!(actions
        .iter()
        .any(|a| a.chat_id() == Some(1) && a.text() == Some("✅ Request sent! We'll let you know if they accept.")));

    let request = actions
        .iter()
        .find(|a| a.chat_id() == Some(2))
        .expect("Bella should be notified");
    let caption = request.text().unwrap();
    assert!(caption.starts_with("💖 Someone liked your profile!"));
    assert!(caption.contains("👤 Name: Alex"));
    assert!(caption.ends_with("💬 Message: Hi Bella!"));

    let accept = accept_button(request);

    let actions = send(
        &state,
        &bella,
        Event::Button {
            data: accept.to_string(),
            message_id: None,
            callback_id: Some("cb-1".to_string()),
        },
    )
    .await;

    assert!(actions.iter().any(|a| matches!(
        a,
        OutboundAction::AnswerCallback { callback_id, .. } if callback_id == "cb-1"
    )));
    assert!(actions.iter().any(|a| a.chat_id() == Some(2)
        && a.text().unwrap().contains("You can reach them at @alex")));
    assert!(actions.iter().any(|a| a.chat_id() == Some(1)
        && a.text().unwrap().starts_with("🎉 Bella accepted your request!")));

    // A second answer to the same request is refused.
    let actions = send(&state, &bella, button(accept)).await;
    assert!(!actions.iter().any(|a| a.chat_id() == Some(1)));
}

#[tokio::test]
async fn second_like_for_the_same_profile_is_refused() {
    let state = test_state().await;
    let alex = sender(1, "Alex");
    let bella = sender(2, "Bella");
    seed_dating_profile(&state, &alex, Gender::Male).await;
    let bella_id = seed_dating_profile(&state, &bella, Gender::Female).await;

    send(&state, &alex, button(Action::Like(bella_id.clone()))).await;
    send(&state, &alex, text("/skip")).await;

    send(&state, &alex, button(Action::Like(bella_id))).await;
    let actions = send(&state, &alex, text("/skip")).await;
    assert_eq!(last_text(&actions), "⚠️ You already sent a request to this user.");
    assert!(!actions.iter().any(|a| a.chat_id() == Some(2)));
}

#[tokio::test]
async fn reports_are_forwarded_to_the_admin() {
    let state = test_state().await;
    let alex = sender(1, "Alex");

    let actions = send(&state, &alex, text("/report D_1a2b3c4d sends spam")).await;

    assert!(actions
        .iter()
        .any(|a| a.chat_id() == Some(1) && a.text() == Some("✅ Thank you. Your report has been sent to the admin.")));
    let forwarded = actions
        .iter()
        .find(|a| a.chat_id() == Some(ADMIN_ID))
        .expect("admin should be notified");
    assert!(forwarded.text().unwrap().contains("sends spam"));

    let open = store::reports::list_new_reports(&state.pool, 10).await.unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].reported_public_id.as_deref(), Some("D_1a2b3c4d"));
}

#[tokio::test]
async fn admin_commands_are_refused_for_regular_users() {
    let state = test_state().await;
    let alex = sender(1, "Alex");

    let actions = send(&state, &alex, text("/ban 2")).await;
    assert_eq!(last_text(&actions), "⛔ This command is for admins only.");
}

#[tokio::test]
async fn admin_can_ban_a_user() {
    let state = test_state().await;
    let admin = sender(ADMIN_ID, "Root");
    let sam = sender(7, "Sam");
    send(&state, &sam, text("/start")).await;

    send(&state, &admin, text("/ban 7")).await;

    let sam_user = store::users::get_user(&state.pool, 7).await.unwrap().unwrap();
    assert!(sam_user.is_banned);
    assert!(send(&state, &sam, text("/start")).await.is_empty());
}

#[tokio::test]
async fn banned_liker_gets_no_contact_when_the_request_is_accepted() {
    let state = test_state().await;
    let admin = sender(ADMIN_ID, "Root");
    let alex = sender(1, "Alex");
    let bella = sender(2, "Bella");
    seed_dating_profile(&state, &alex, Gender::Male).await;
    let bella_id = seed_dating_profile(&state, &bella, Gender::Female).await;

    send(&state, &alex, button(Action::Like(bella_id))).await;
    let actions = send(&state, &alex, text("/skip")).await;
    let request = actions
        .iter()
        .find(|a| a.chat_id() == Some(2))
        .expect("Bella should be notified");
    let accept = accept_button(request);
    let Action::Accept(like_id) = &accept else {
        unreachable!()
    };
    let like_id = *like_id;

    send(&state, &admin, text("/ban 1")).await;

    let actions = send(
        &state,
        &bella,
        Event::Button {
            data: accept.to_string(),
            message_id: None,
            callback_id: Some("cb-2".to_string()),
        },
    )
    .await;

    assert!(!actions.iter().any(|a| a.chat_id() == Some(1)));
    assert!(!actions.iter().any(|a| a.text().is_some_and(|t| t.contains("@alex"))));
    assert!(actions.iter().any(|a| a.chat_id() == Some(2)
        && a.text() == Some("This request is no longer available.")));

    let stored = store::likes::get_like(&state.pool, like_id).await.unwrap().unwrap();
    assert_eq!(stored.status, LikeStatus::Rejected);
}

#[tokio::test]
async fn unreachable_store_still_answers_with_a_notice() {
    let state = test_state().await;
    let alex = sender(1, "Alex");
    send(&state, &alex, button(Action::Create(ProfileKind::Dating))).await;

    state.pool.close().await;
    let actions = send(&state, &alex, text("Alex")).await;

    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].chat_id(), Some(1));
    assert_eq!(actions[0].text(), Some(FAILURE_NOTICE));
    assert_eq!(state.sessions.len().await, 0);
}

#[tokio::test]
async fn failed_save_shows_a_generic_notice_without_database_text() {
    let state = test_state().await;
    let alex = sender(1, "Alex");
    fill_dating_draft(&state, &alex).await;

    // Any insert into dating_profiles now trips the users primary key.
    sqlx::query(
        "CREATE TRIGGER clash BEFORE INSERT ON dating_profiles BEGIN \
         INSERT INTO users (telegram_id, first_name, created_at) VALUES (1, 'dup', 'x'); END;",
    )
    .execute(&state.pool)
    .await
    .unwrap();

    let actions = send(&state, &alex, button(Action::Save)).await;

    assert_eq!(last_text(&actions), FAILURE_NOTICE);
    assert!(!actions
        .iter()
        .any(|a| a.text().is_some_and(|t| t.contains("UNIQUE") || t.contains("telegram_id"))));
    assert!(store::profiles::get_dating_profile(&state.pool, 1).await.unwrap().is_none());

    let actions = send(&state, &alex, text("/cancel")).await;
    assert_eq!(last_text(&actions), "There is nothing to cancel.");
}

#[tokio::test]
async fn idle_draft_is_dropped_on_the_next_update() {
    let state = state_with(Config {
        conversation_timeout_secs: 0,
        ..test_config()
    })
    .await;
    let alex = sender(1, "Alex");

    send(&state, &alex, button(Action::Create(ProfileKind::Dating))).await;
    let actions = send(&state, &alex, text("Alex")).await;

    assert_eq!(actions[0].text(), Some(timeout::TIMEOUT_NOTICE));
    assert!(!actions.iter().any(|a| a.text().is_some_and(|t| t.contains("gender"))));

    let actions = send(&state, &alex, text("/cancel")).await;
    assert_eq!(last_text(&actions), "There is nothing to cancel.");
}

#[tokio::test]
async fn sweep_discards_idle_drafts_and_notifies_owners() {
    let state = state_with(Config {
        conversation_timeout_secs: 0,
        ..test_config()
    })
    .await;
    let alex = sender(1, "Alex");
    let bella = sender(2, "Bella");

    send(&state, &alex, button(Action::Create(ProfileKind::Dating))).await;
    let outbox = Outbox::new();
    let discarded = timeout::sweep_once(&state, Some(&outbox as &dyn Messenger), Instant::now()).await;

    assert_eq!(discarded, 1);
    assert_eq!(state.sessions.len().await, 0);
    match outbox.into_actions().as_slice() {
        [OutboundAction::SendText { chat_id, text, .. }] => {
            assert_eq!(*chat_id, 1);
            assert_eq!(text, timeout::TIMEOUT_NOTICE);
        }
        other => panic!("expected one timeout notice, got {:?}", other),
    }

    // Without a messenger the draft is still dropped.
    send(&state, &bella, button(Action::Create(ProfileKind::Dating))).await;
    assert_eq!(timeout::sweep_once(&state, None, Instant::now()).await, 1);
    assert_eq!(timeout::sweep_once(&state, None, Instant::now()).await, 0);
}

#[tokio::test]
async fn editing_one_field_keeps_the_rest_and_the_public_id() {
    let state = test_state().await;
    let alex = sender(1, "Alex");
    let public_id = seed_dating_profile(&state, &alex, Gender::Male).await;

    let actions = send(&state, &alex, button(Action::Edit(ProfileKind::Dating))).await;
    let choices = actions.last().and_then(|a| a.menu()).expect("field choices");
    assert!(choices.has_action(&Action::EditField(Step::AskBio).to_string()));

    send(&state, &alex, button(Action::EditField(Step::AskBio))).await;
    let actions = send(&state, &alex, text("New bio")).await;
    let preview = actions.last().unwrap();
    assert!(preview.text().unwrap().contains("New bio"));
    assert!(preview.menu().unwrap().has_action(&Action::Save.to_string()));

    let actions = send(&state, &alex, button(Action::Save)).await;
    assert!(last_text(&actions).starts_with("✅ Your Dating Profile has been updated successfully!"));
    assert!(last_text(&actions).contains(&public_id));

    let saved = store::profiles::get_dating_profile(&state.pool, 1).await.unwrap().unwrap();
    assert_eq!(saved.public_id, public_id);
    assert!(saved.updated_at.is_some());
    assert_eq!(saved.details.bio.as_deref(), Some("New bio"));
    assert_eq!(saved.details.age, 27);
    assert_eq!(saved.details.location, Some(Location::City("Mumbai".to_string())));
    assert_eq!(saved.details.photos, vec!["alex_photo".to_string()]);
}
