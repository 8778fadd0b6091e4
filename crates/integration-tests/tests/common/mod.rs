//! Shared fixture: the full dispatcher stack on in-memory adapters with a
//! recording chat sender.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chat_adapters::{AppState, Dispatcher, Metrics};
use domains::error::Result;
use domains::models::Ticket;
use domains::ports::ChatSender;
use services::moderation::{ModerationNotifier, DEFAULT_SEND_TIMEOUT};
use services::{IntakeWorkflow, RateLimiter, StatusMachine};
use storage_adapters::memory::{
    MemoryBlockRegistry, MemoryRateLimitStore, MemorySessionStore, MemoryTicketRepo,
    MemoryTicketSequencer,
};

pub const MOD_CHAT_ID: i64 = 777;
pub const ADMIN_ID: i64 = 900;

/// Records every outbound message instead of delivering it.
#[derive(Default)]
pub struct RecordingChatSender {
    pub texts: Mutex<Vec<(i64, String)>>,
    pub forwards: Mutex<Vec<(i64, String)>>,
}

#[async_trait]
impl ChatSender for RecordingChatSender {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        self.texts.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }

    async fn forward_ticket(&self, chat_id: i64, ticket: &Ticket) -> Result<()> {
        self.forwards
            .lock()
            .unwrap()
            .push((chat_id, ticket.ticket_no.clone()));
        Ok(())
    }
}

pub struct TestApp {
    pub dispatcher: Arc<Dispatcher>,
    pub metrics: Arc<Metrics>,
    pub workflow: Arc<IntakeWorkflow>,
    pub status_machine: Arc<StatusMachine>,
    pub tickets: Arc<MemoryTicketRepo>,
    pub sessions: Arc<MemorySessionStore>,
    pub blocks: Arc<MemoryBlockRegistry>,
    pub rates: Arc<MemoryRateLimitStore>,
    pub sender: Arc<RecordingChatSender>,
}

impl TestApp {
    pub fn app_state(&self) -> AppState {
        AppState {
            dispatcher: self.dispatcher.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

pub fn test_app() -> TestApp {
    test_app_with_cooldown(Duration::from_secs(30))
}

pub fn test_app_with_cooldown(cooldown: Duration) -> TestApp {
    let tickets = Arc::new(MemoryTicketRepo::new());
    let sequencer = Arc::new(MemoryTicketSequencer::new());
    let sessions = Arc::new(MemorySessionStore::new());
    let blocks = Arc::new(MemoryBlockRegistry::new());
    let rates = Arc::new(MemoryRateLimitStore::new());
    let sender = Arc::new(RecordingChatSender::default());

    let notifier = ModerationNotifier::new(sender.clone(), MOD_CHAT_ID, DEFAULT_SEND_TIMEOUT);
    let rate_limiter = RateLimiter::new(rates.clone(), cooldown);

    let workflow = Arc::new(IntakeWorkflow::new(
        blocks.clone(),
        sessions.clone(),
        tickets.clone(),
        sequencer,
        rate_limiter,
        notifier.clone(),
        None,
    ));
    let status_machine = Arc::new(StatusMachine::new(
        tickets.clone(),
        sessions.clone(),
        notifier,
    ));

    let metrics = Arc::new(Metrics::new());
    let dispatcher = Arc::new(Dispatcher::new(
        workflow.clone(),
        status_machine.clone(),
        sessions.clone(),
        blocks.clone(),
        tickets.clone(),
        HashSet::from([ADMIN_ID]),
        metrics.clone(),
    ));

    TestApp {
        dispatcher,
        metrics,
        workflow,
        status_machine,
        tickets,
        sessions,
        blocks,
        rates,
        sender,
    }
}
