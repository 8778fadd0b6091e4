//! Ticket numbers stay unique under concurrent submissions.

mod common;

use std::collections::HashSet;

use common::test_app;
use domains::models::TicketCategory;
use domains::ports::SessionStore;
use services::intake::Submission;
use services::SubmitOutcome;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_get_distinct_numbers() {
    let app = test_app();
    let users: Vec<i64> = (1..=32).collect();

    for &user in &users {
        app.sessions
            .set_category(user, TicketCategory::Complaint)
            .await
            .unwrap();
    }

    let mut handles = Vec::new();
    for &user in &users {
        let workflow = app.workflow.clone();
        handles.push(tokio::spawn(async move {
            let outcome = workflow
                .submit(Submission {
                    user_id: user,
                    text: format!("report from {user}"),
                    attachment: None,
                })
                .await
                .unwrap();
            match outcome {
                SubmitOutcome::Accepted(ticket) => ticket.ticket_no,
                other => panic!("expected acceptance, got {other:?}"),
            }
        }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        let ticket_no = handle.await.unwrap();
        assert!(seen.insert(ticket_no.clone()), "duplicate number {ticket_no}");
    }
    assert_eq!(seen.len(), users.len());
}
