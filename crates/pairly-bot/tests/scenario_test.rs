/// Integration test: two users onboard, find each other, match and chat,
/// driven entirely through `Bot::handle` with a recording transport.

use pairly_bot::Bot;
use pairly_bot::ledger::{MATCHED, SEARCHING, liked_back};
use pairly_bot::relay::relayed;
use pairly_bot::session::{ASK_BIO, ASK_PHOTO, PROFILE_COMPLETE, WELCOME};
use pairly_bot::transport::{Outbound, RecordingTransport};
use pairly_db::Database;
use pairly_types::events::InboundEvent;
use pairly_types::models::{Decision, OnboardingState};

const ALICE: i64 = 1001;
const BOB: i64 = 2002;

async fn onboard(bot: &Bot<RecordingTransport>, id: i64, name: &str, photo: &str, bio: &str) {
    bot.handle(InboundEvent::from_text(id, "/start")).await;
    bot.handle(InboundEvent::from_text(id, name)).await;
    bot.handle(InboundEvent::Photo { chat_id: id, file_id: photo.into() }).await;
    bot.handle(InboundEvent::from_text(id, bio)).await;
}

fn like(chat_id: i64, target: i64) -> InboundEvent {
    InboundEvent::Callback {
        chat_id,
        callback_id: format!("{chat_id}-{target}"),
        data: format!("like_{target}"),
    }
}

#[tokio::test]
async fn onboard_match_and_chat() {
    let bot = Bot::new(Database::open_in_memory().unwrap(), RecordingTransport::new());

    onboard(&bot, ALICE, "Alice", "P1", "Bio text").await;
    onboard(&bot, BOB, "Bob", "P2", "Bio2").await;

    let alice = bot.db().get_user(ALICE).unwrap().unwrap().to_profile().unwrap();
    assert_eq!(alice.name.as_deref(), Some("Alice"));
    assert_eq!(alice.photo_id.as_deref(), Some("P1"));
    assert_eq!(alice.bio.as_deref(), Some("Bio text"));
    assert_eq!(alice.state, OnboardingState::Onboarded);
    assert_eq!(
        bot.transport().texts_to(ALICE),
        vec![WELCOME, ASK_PHOTO, ASK_BIO, PROFILE_COMPLETE]
    );
    bot.transport().take();

    // Alice finds Bob and likes him: no match yet
    bot.handle(InboundEvent::from_text(ALICE, "/find")).await;
    let cards = bot.transport().photos_to(ALICE);
    assert!(matches!(&cards[..], [Outbound::Photo { photo_id, caption, .. }] if photo_id == "P2" && caption == "🌟 Bob\nBio2"));

    bot.handle(like(ALICE, BOB)).await;
    assert!(!bot.transport().texts_to(ALICE).iter().any(|t| t == MATCHED));
    assert!(bot.transport().texts_to(BOB).is_empty());
    bot.transport().take();

    // Bob likes Alice back: both hear about it
    bot.handle(InboundEvent::from_text(BOB, "/find")).await;
    bot.handle(like(BOB, ALICE)).await;
    assert_eq!(bot.transport().texts_to(ALICE), vec![liked_back("Bob")]);
    assert_eq!(
        bot.transport().texts_to(BOB)[..2],
        [MATCHED.to_string(), SEARCHING.to_string()]
    );
    bot.transport().take();

    // Alice says hi
    bot.handle(InboundEvent::from_text(ALICE, "hi")).await;
    assert_eq!(bot.transport().texts_to(BOB), vec![relayed("hi")]);

    let active = bot.db().active_match(ALICE).unwrap().unwrap();
    assert_eq!(active.partner_id, BOB);
    let log = bot.db().get_chat_messages(active.id, 10).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].sender_id, ALICE);
    assert_eq!(log[0].message, "hi");

    assert_eq!(bot.db().get_decision(ALICE, BOB).unwrap(), Some(Decision::Liked));
    assert_eq!(bot.db().get_decision(BOB, ALICE).unwrap(), Some(Decision::Liked));
}

#[tokio::test]
async fn repeated_presses_keep_one_decision() {
    let bot = Bot::new(Database::open_in_memory().unwrap(), RecordingTransport::new());
    onboard(&bot, ALICE, "Alice", "P1", "Bio text").await;
    onboard(&bot, BOB, "Bob", "P2", "Bio2").await;

    bot.handle(like(ALICE, BOB)).await;
    bot.handle(like(ALICE, BOB)).await;

    let rows: i64 = bot
        .db()
        .with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT COUNT(*) FROM decisions WHERE from_user = ?1 AND to_user = ?2",
                [ALICE, BOB],
                |r| r.get(0),
            )?)
        })
        .unwrap();
    assert_eq!(rows, 1);
}
