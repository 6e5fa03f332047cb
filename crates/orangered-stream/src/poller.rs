//! The poll loops: cursor-driven streams for comments/submissions and
//! read-mark-driven streams for the inbox.
//!
//! One iteration of the cursor loop: check the stop token, list items newer
//! than the cursor, deliver them oldest-first, commit the new cursor, sleep.
//! Listing failures are logged, reported on the error channel and retried on
//! the next interval; they never kill the loop. The sleep is interruptible
//! by the stop token and by the consumer dropping the item channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use orangered_core::error::StreamError;
use orangered_core::types::{Message, StreamItem};

use crate::client::ListingClient;
use crate::listing::{PagedListing, newest_fullname};

// ─── Inbox filter ───────────────────────────────────────────────────

/// Which classification an inbox stream forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFilter {
    Replies,
    Mentions,
}

impl MessageFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Replies => "replies",
            Self::Mentions => "mentions",
        }
    }

    pub fn matches(self, message: &Message) -> bool {
        match self {
            Self::Replies => message.is_reply(),
            Self::Mentions => message.is_mention(),
        }
    }
}

// ─── Iteration pacing ───────────────────────────────────────────────

/// Sleep between iterations. Returns `true` if the loop should exit:
/// the stop token flipped (or every holder dropped it), or the consumer
/// dropped the item channel.
async fn pause_or_stop<T>(
    interval: Duration,
    stop: &mut watch::Receiver<bool>,
    tx: &mpsc::Sender<T>,
) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(interval) => false,
        changed = stop.changed() => changed.is_err() || *stop.borrow(),
        _ = tx.closed() => true,
    }
}

fn report(errors: &mpsc::Sender<StreamError>, err: StreamError) {
    // Non-blocking: a caller that never drains the error channel must not
    // stall polling.
    let _ = errors.try_send(err);
}

// ─── Cursor loop ────────────────────────────────────────────────────

/// Cursor-driven poll loop for comments and submissions.
///
/// `cursor` arrives seeded by the anchor fetch; empty means "no prior
/// observation", in which case the first listing returns the newest page and
/// everything in it is delivered.
pub(crate) async fn run_cursor_stream<L: PagedListing>(
    listing: L,
    label: &'static str,
    mut cursor: String,
    interval: Duration,
    page_size: u32,
    tx: mpsc::Sender<L::Item>,
    errors: mpsc::Sender<StreamError>,
    mut stop: watch::Receiver<bool>,
) {
    loop {
        if *stop.borrow() {
            break;
        }

        match listing.page_after(&cursor, page_size).await {
            Ok(batch) if !batch.is_empty() => {
                let mut batch = batch;
                batch.sort_by_key(|item| item.created_at());
                // Pending cursor is fixed before delivery: a slow consumer
                // backpressures the loop, it never skips items.
                let pending = newest_fullname(&batch);

                tracing::debug!(
                    stream = label,
                    batch_len = batch.len(),
                    cursor = %cursor,
                    "delivering new items"
                );

                let mut consumer_gone = false;
                for item in batch {
                    if tx.send(item).await.is_err() {
                        consumer_gone = true;
                        break;
                    }
                }
                if consumer_gone {
                    break;
                }
                if let Some(next) = pending {
                    cursor = next;
                }
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(
                    stream = label,
                    error = %err,
                    "listing failed; retrying next interval"
                );
                report(&errors, StreamError::Poll(err));
            }
        }

        if pause_or_stop(interval, &mut stop, &tx).await {
            break;
        }
    }
    tracing::debug!(stream = label, "stream stopped");
}

// ─── Inbox loop ─────────────────────────────────────────────────────

/// Inbox poll loop: no cursor. Every iteration lists all unread messages,
/// forwards the ones matching `filter` oldest-first, and marks each
/// forwarded message read at the source — the read-mark is the
/// de-duplication. Non-matching messages are left untouched for other
/// consumers.
pub(crate) async fn run_inbox_stream<C: ListingClient>(
    client: Arc<C>,
    filter: MessageFilter,
    interval: Duration,
    tx: mpsc::Sender<Message>,
    errors: mpsc::Sender<StreamError>,
    mut stop: watch::Receiver<bool>,
) {
    let label = filter.as_str();
    loop {
        if *stop.borrow() {
            break;
        }

        match client.unread_messages().await {
            Ok(unread) => {
                let mut matched: Vec<Message> =
                    unread.into_iter().filter(|m| filter.matches(m)).collect();
                matched.sort_by_key(|m| m.created_at);

                let mut consumer_gone = false;
                for message in matched {
                    let id = message.id.clone();
                    if tx.send(message).await.is_err() {
                        consumer_gone = true;
                        break;
                    }
                    // Mark after a successful hand-off. A failed mark means
                    // the message stays unread and will be delivered again
                    // next iteration; the error channel makes that visible.
                    if let Err(err) = client.mark_read(&id).await {
                        tracing::warn!(stream = label, id = %id, error = %err, "mark_read failed");
                        report(&errors, StreamError::MarkRead { id, source: err });
                    }
                }
                if consumer_gone {
                    break;
                }
            }
            Err(err) => {
                tracing::warn!(
                    stream = label,
                    error = %err,
                    "unread listing failed; retrying next interval"
                );
                report(&errors, StreamError::Poll(err));
            }
        }

        if pause_or_stop(interval, &mut stop, &tx).await {
            break;
        }
    }
    tracing::debug!(stream = label, "stream stopped");
}
