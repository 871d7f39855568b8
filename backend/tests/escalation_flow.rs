//! Integration coverage for the escalation resolver: the solved and
//! reviewed-only paths, the chat backfill variants, and compensation when a
//! store call fails mid-sequence.

mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use backend::domain::chat::ChatStatus;
use backend::domain::faq::{FaqSource, FaqStatus};
use backend::domain::ports::Clock;
use backend::inbound::http;
use common::fixture;

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(http::configure),
        )
        .await
    };
}

/// Send a chat message so the store holds a linked queue entry and log row.
async fn ask<S>(app: &S, student_id: i64, query_text: &str)
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/student/chat")
            .set_json(json!({ "student_id": student_id, "query_text": query_text }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn solved_escalation_patches_the_linked_log_entry_in_place() {
    let (store, clock, state) = fixture();
    let app = init_app!(state);
    ask(&app, 7, "When is convocation?").await;

    let queued = store.unsolved_snapshot().remove(0);
    let log_before = store.chat_logs_snapshot().remove(0);
    clock.advance(chrono::Duration::minutes(30));

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/admin/unsolved/{}", queued.id))
            .set_json(json!({
                "reviewed": true,
                "solved": true,
                "answer": "Convocation is on July 12th."
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(
        body["message"],
        "Query solved, added to FAQs, and student chat updated."
    );
    assert_eq!(body["linked_to_student_chat"], true);

    // Exactly one FAQ minted, attributed to the system admin identity.
    let faqs = store.faqs_snapshot();
    assert_eq!(faqs.len(), 1);
    assert_eq!(faqs[0].question, "When is convocation?");
    assert_eq!(faqs[0].answer, "Convocation is on July 12th.");
    assert_eq!(faqs[0].status, FaqStatus::Solved);
    assert_eq!(faqs[0].source_type, FaqSource::Text);
    assert_eq!(faqs[0].created_by, 1);

    // The existing log row was patched in place, not duplicated.
    let logs = store.chat_logs_snapshot();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].id, log_before.id);
    assert_eq!(logs[0].bot_response, "Convocation is on July 12th.");
    assert_eq!(logs[0].status, ChatStatus::Solved);
    assert!(logs[0].updated_at.is_some());

    // The queue entry is gone.
    assert!(store.unsolved_snapshot().is_empty());
}

#[actix_web::test]
async fn solved_escalation_without_a_prior_log_inserts_one() {
    let (store, clock, state) = fixture();
    let queued = store.seed_unsolved(9, "Is the gym open on Sundays?", clock.now());
    let app = init_app!(state);

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/admin/unsolved/{}", queued.id))
            .set_json(json!({ "reviewed": true, "solved": true, "answer": "Yes, 8am to 2pm." }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let logs = store.chat_logs_snapshot();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].student_id, 9);
    assert_eq!(logs[0].query_text, "Is the gym open on Sundays?");
    assert_eq!(logs[0].bot_response, "Yes, 8am to 2pm.");
    assert_eq!(logs[0].status, ChatStatus::Solved);
    assert!(store.unsolved_snapshot().is_empty());
    assert_eq!(store.faqs_snapshot().len(), 1);
}

#[actix_web::test]
async fn missing_answer_falls_back_to_the_placeholder() {
    let (store, clock, state) = fixture();
    let queued = store.seed_unsolved(9, "Anyone there?", clock.now());
    let app = init_app!(state);

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/admin/unsolved/{}", queued.id))
            .set_json(json!({ "reviewed": true, "solved": true }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.faqs_snapshot()[0].answer, "Answer added by admin");
}

#[actix_web::test]
async fn reviewed_only_escalation_keeps_the_queue_entry() {
    let (store, clock, state) = fixture();
    let queued = store.seed_unsolved(9, "Still open?", clock.now());
    let app = init_app!(state);

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/admin/unsolved/{}", queued.id))
            .set_json(json!({ "reviewed": true }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Query marked as reviewed");
    assert_eq!(body["linked_to_student_chat"], false);

    let queue = store.unsolved_snapshot();
    assert_eq!(queue.len(), 1);
    assert!(queue[0].reviewed);
    assert!(store.faqs_snapshot().is_empty());
    assert!(store.chat_logs_snapshot().is_empty());
}

#[actix_web::test]
async fn escalating_an_unknown_id_is_404() {
    let (_store, _clock, state) = fixture();
    let app = init_app!(state);
    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/admin/unsolved/12345")
            .set_json(json!({ "reviewed": true, "solved": true }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["detail"], "Query not found");
}

#[actix_web::test]
async fn duplicate_queries_escalate_against_their_own_log_entry() {
    // Value matching on (student_id, query_text) is ambiguous for duplicate
    // questions; the explicit link pins the exact row even when a newer
    // identical entry exists.
    let (store, clock, state) = fixture();
    let app = init_app!(state);
    ask(&app, 7, "When is convocation?").await;
    clock.advance(chrono::Duration::minutes(5));
    ask(&app, 7, "When is convocation?").await;

    let queue = store.unsolved_snapshot();
    assert_eq!(queue.len(), 2);
    let first = &queue[0];
    let first_log_id = first.chat_log_id.expect("linked");

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/admin/unsolved/{}", first.id))
            .set_json(json!({ "reviewed": true, "solved": true, "answer": "July 12th." }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let logs = store.chat_logs_snapshot();
    let patched = logs.iter().find(|entry| entry.id == first_log_id).expect("entry");
    let untouched = logs.iter().find(|entry| entry.id != first_log_id).expect("entry");
    assert_eq!(patched.status, ChatStatus::Solved);
    assert_eq!(patched.bot_response, "July 12th.");
    assert_eq!(untouched.status, ChatStatus::Unsolved);
}

#[actix_web::test]
async fn backfill_failure_rolls_back_the_minted_faq() {
    let (store, clock, state) = fixture();
    let app = init_app!(state);
    ask(&app, 7, "When is convocation?").await;
    let queued = store.unsolved_snapshot().remove(0);
    let log_before = store.chat_logs_snapshot().remove(0);
    clock.advance(chrono::Duration::minutes(1));

    store.fail_once("chat_logs.backfill");
    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/admin/unsolved/{}", queued.id))
            .set_json(json!({ "reviewed": true, "solved": true, "answer": "July 12th." }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // The FAQ insert was compensated and nothing else moved.
    assert!(store.faqs_snapshot().is_empty());
    let logs = store.chat_logs_snapshot();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].bot_response, log_before.bot_response);
    assert_eq!(logs[0].status, ChatStatus::Unsolved);
    // The queue entry survives with the reviewed flag applied.
    let queue = store.unsolved_snapshot();
    assert_eq!(queue.len(), 1);
    assert!(queue[0].reviewed);
}

#[actix_web::test]
async fn delete_failure_restores_the_patched_log_and_faq() {
    let (store, clock, state) = fixture();
    let app = init_app!(state);
    ask(&app, 7, "When is convocation?").await;
    let queued = store.unsolved_snapshot().remove(0);
    let log_before = store.chat_logs_snapshot().remove(0);
    clock.advance(chrono::Duration::minutes(1));

    store.fail_once("unsolved.delete");
    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/admin/unsolved/{}", queued.id))
            .set_json(json!({ "reviewed": true, "solved": true, "answer": "July 12th." }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(response).await;
    assert!(body["detail"]
        .as_str()
        .is_some_and(|detail| detail.contains("injected failure: unsolved.delete")));

    assert!(store.faqs_snapshot().is_empty());
    let logs = store.chat_logs_snapshot();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].bot_response, log_before.bot_response);
    assert_eq!(logs[0].status, log_before.status);
    assert_eq!(logs[0].updated_at, log_before.updated_at);
    assert_eq!(store.unsolved_snapshot().len(), 1);
}

#[actix_web::test]
async fn insert_path_failure_removes_the_inserted_log() {
    let (store, clock, state) = fixture();
    let queued = store.seed_unsolved(9, "Is the gym open?", clock.now());
    let app = init_app!(state);

    store.fail_once("unsolved.delete");
    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/admin/unsolved/{}", queued.id))
            .set_json(json!({ "reviewed": true, "solved": true, "answer": "Yes." }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Both the minted FAQ and the freshly inserted log entry are gone.
    assert!(store.faqs_snapshot().is_empty());
    assert!(store.chat_logs_snapshot().is_empty());
    assert_eq!(store.unsolved_snapshot().len(), 1);
}
