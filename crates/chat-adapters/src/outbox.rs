//! Default outbound sink.
//!
//! Outbound delivery belongs to the chat transport; deployments plug their
//! platform client in behind [`domains::ports::ChatSender`]. When nothing is
//! wired, this sender records every outbound message as a structured log
//! event so moderation forwards and notices stay observable.

use async_trait::async_trait;
use domains::error::Result;
use domains::models::Ticket;
use domains::ports::ChatSender;
use tracing::info;

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingChatSender;

#[async_trait]
impl ChatSender for TracingChatSender {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        info!(chat_id, text, "outbound message");
        Ok(())
    }

    async fn forward_ticket(&self, chat_id: i64, ticket: &Ticket) -> Result<()> {
        info!(
            chat_id,
            ticket_no = %ticket.ticket_no,
            category = ticket.category.as_str(),
            "outbound ticket forward"
        );
        Ok(())
    }
}
