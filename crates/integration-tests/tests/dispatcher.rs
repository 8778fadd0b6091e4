//! Command routing through the dispatcher: localization, listings, and the
//! admin surface.

mod common;

use common::{test_app, ADMIN_ID};
use chat_adapters::ChatEvent;
use domains::models::TicketCategory;
use domains::ports::{BlockRegistry, SessionStore};

fn user_event(user_id: i64, text: &str) -> ChatEvent {
    ChatEvent {
        user_id,
        text: Some(text.to_string()),
        attachment: None,
        is_admin: false,
    }
}

fn admin_event(text: &str) -> ChatEvent {
    ChatEvent {
        user_id: ADMIN_ID,
        text: Some(text.to_string()),
        attachment: None,
        is_admin: true,
    }
}

#[tokio::test]
async fn start_prompts_for_language_until_one_is_picked() {
    let app = test_app();

    let reply = app.dispatcher.handle(user_event(1, "/start")).await.unwrap();
    assert!(reply.text.contains("/lang"));

    let reply = app.dispatcher.handle(user_event(1, "/lang uz")).await.unwrap();
    assert!(reply.text.contains("Assalomu alaykum"));

    // Subsequent /start greets in the chosen language.
    let reply = app.dispatcher.handle(user_event(1, "/start")).await.unwrap();
    assert!(reply.text.contains("Assalomu alaykum"));
}

#[tokio::test]
async fn category_selection_then_submission_replies_with_ticket_number() {
    let app = test_app();

    let reply = app.dispatcher.handle(user_event(2, "/complaint")).await.unwrap();
    assert!(reply.text.contains("жалоба"));

    let reply = app
        .dispatcher
        .handle(user_event(2, "лифт не работает"))
        .await
        .unwrap();
    assert!(reply.text.contains("-000001"), "{}", reply.text);
}

#[tokio::test]
async fn submission_without_category_reprompts() {
    let app = test_app();
    let reply = app.dispatcher.handle(user_event(3, "просто текст")).await.unwrap();
    assert!(reply.text.contains("/complaint"));
}

#[tokio::test]
async fn my_lists_recent_tickets_newest_first() {
    let app = test_app();
    let user = 4;
    app.sessions.set_category(user, TicketCategory::Suggestion).await.unwrap();

    let reply = app.dispatcher.handle(user_event(user, "/my")).await.unwrap();
    assert!(reply.text.contains("пока нет"));

    app.dispatcher.handle(user_event(user, "первое предложение")).await.unwrap();

    let reply = app.dispatcher.handle(user_event(user, "/my")).await.unwrap();
    assert!(reply.text.contains("-000001"));
    assert!(reply.text.contains("первое предложение"));
    assert!(reply.text.contains("new"));
}

#[tokio::test]
async fn admin_commands_from_non_admin_are_ignored() {
    let app = test_app();
    assert!(app.dispatcher.handle(user_event(5, "/block 6")).await.is_none());
    assert!(app.dispatcher.handle(user_event(5, "/unblock 6")).await.is_none());
    assert!(app
        .dispatcher
        .handle(user_event(5, "/setstatus 2026-000001 done"))
        .await
        .is_none());
    assert!(app.dispatcher.handle(user_event(5, "/blocked")).await.is_none());
}

#[tokio::test]
async fn block_and_unblock_round_trip() {
    let app = test_app();

    let reply = app.dispatcher.handle(admin_event("/block 6 спам")).await.unwrap();
    assert!(reply.text.contains('6'));
    assert!(app.blocks.is_blocked(6).await.unwrap());

    let reply = app.dispatcher.handle(admin_event("/blocked")).await.unwrap();
    assert!(reply.text.contains("спам"));

    let reply = app.dispatcher.handle(admin_event("/unblock 6")).await.unwrap();
    assert!(reply.text.contains('6'));
    assert!(!app.blocks.is_blocked(6).await.unwrap());

    let reply = app.dispatcher.handle(admin_event("/blocked")).await.unwrap();
    assert!(reply.text.contains("пуст"));
}

#[tokio::test]
async fn admins_cannot_block_each_other() {
    let app = test_app();
    let reply = app
        .dispatcher
        .handle(admin_event(&format!("/block {ADMIN_ID}")))
        .await
        .unwrap();
    assert!(reply.text.contains("Нельзя"));
    assert!(!app.blocks.is_blocked(ADMIN_ID).await.unwrap());
}

#[tokio::test]
async fn block_without_target_shows_usage() {
    let app = test_app();
    let reply = app.dispatcher.handle(admin_event("/block")).await.unwrap();
    assert!(reply.text.contains("/block <user_id>"));
}

#[tokio::test]
async fn setstatus_argument_and_not_found_paths() {
    let app = test_app();

    let reply = app.dispatcher.handle(admin_event("/setstatus")).await.unwrap();
    assert!(reply.text.contains("/setstatus <TICKET>"));

    let reply = app
        .dispatcher
        .handle(admin_event("/setstatus 1999-000042 done"))
        .await
        .unwrap();
    assert!(reply.text.contains("1999-000042"));
    assert!(reply.text.contains("не найдена"));
}

#[tokio::test]
async fn unknown_command_falls_back_to_menu() {
    let app = test_app();
    let reply = app.dispatcher.handle(user_event(7, "/frobnicate")).await.unwrap();
    assert!(reply.text.contains("/complaint"));
}
