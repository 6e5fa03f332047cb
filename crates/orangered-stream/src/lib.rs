//! orangered-stream: polling-to-stream adapter for a pull-only listing API.
//!
//! The remote platform only supports paginated, newest-first listing calls;
//! this crate turns them into ordered, de-duplicated, cancellable push
//! streams. Callers supply the transport as a [`ListingClient`] and get back
//! [`StreamHandle`]s: a bounded item channel, an error channel, and a stop
//! token. Comment and submission streams advance a last-seen cursor;
//! reply and mention streams drain the unread inbox and mark delivered
//! messages read instead.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc};

use orangered_core::error::StreamError;
use orangered_core::types::{Comment, Message, Submission, TargetKind};

pub mod client;
pub mod handle;
pub mod resolver;

mod listing;
mod poller;
#[cfg(test)]
mod testutil;

pub use client::ListingClient;
pub use handle::{StopSignal, StreamHandle, StreamSet};
pub use orangered_core::config::StreamConfig;
pub use orangered_core::error::StreamError as Error;
pub use orangered_core::{config, error, types};
pub use poller::MessageFilter;

use listing::{CommentListing, PagedListing, SubmissionListing, newest_fullname};
use poller::{run_cursor_stream, run_inbox_stream};

/// Page size for comment `*_after` listings. Submissions use the configured
/// page size; comments always page by the platform's listing default.
const COMMENT_PAGE_LIMIT: u32 = 25;

/// Stream engine: one listing client, one configuration, a registry of the
/// stream instances started through it.
///
/// Instances are fully independent — each owns its cursor and channels — but
/// the engine remembers them so [`Streams::shutdown_all`] can tear the whole
/// set down and join every loop.
pub struct Streams<C> {
    client: Arc<C>,
    config: StreamConfig,
    registry: Mutex<StreamSet>,
}

impl<C: ListingClient> Streams<C> {
    pub fn new(client: C) -> Self {
        Self::with_config(client, StreamConfig::default())
    }

    pub fn with_config(client: C, config: StreamConfig) -> Self {
        Self {
            client: Arc::new(client),
            config,
            registry: Mutex::new(StreamSet::new()),
        }
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// The shared listing client (the same instance every stream polls).
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Stream new comments for `name` (board or author, resolved here).
    ///
    /// Resolution and the cursor-seeding anchor fetch happen before the loop
    /// spawns; their failures are returned synchronously and no stream
    /// instance exists on that path.
    pub async fn comments(&self, name: &str) -> Result<StreamHandle<Comment>, StreamError> {
        let target = resolver::resolve(self.client.as_ref(), name, &TargetKind::ALL).await?;
        let listing = CommentListing {
            client: Arc::clone(&self.client),
            target,
        };
        self.start_cursor_stream(listing, "comments", self.config.comment_interval, COMMENT_PAGE_LIMIT)
            .await
    }

    /// Stream new submissions for `name` (board or author, resolved here).
    pub async fn submissions(&self, name: &str) -> Result<StreamHandle<Submission>, StreamError> {
        let target = resolver::resolve(self.client.as_ref(), name, &TargetKind::ALL).await?;
        let listing = SubmissionListing {
            client: Arc::clone(&self.client),
            target,
        };
        self.start_cursor_stream(
            listing,
            "submissions",
            self.config.submission_interval,
            self.config.submission_page_size,
        )
        .await
    }

    /// Stream replies to the account's comments, marking each delivered
    /// reply as read at the source.
    pub async fn comment_replies(&self) -> StreamHandle<Message> {
        self.start_inbox_stream(MessageFilter::Replies).await
    }

    /// Stream username mentions, marking each delivered mention as read at
    /// the source.
    pub async fn mentions(&self) -> StreamHandle<Message> {
        self.start_inbox_stream(MessageFilter::Mentions).await
    }

    /// Number of stream instances started and not yet shut down.
    pub async fn active_streams(&self) -> usize {
        self.registry.lock().await.len()
    }

    /// Stop every registered stream instance and wait for each loop to exit.
    pub async fn shutdown_all(&self) {
        self.registry.lock().await.shutdown_all().await;
    }

    async fn start_cursor_stream<L: PagedListing>(
        &self,
        listing: L,
        label: &'static str,
        interval: Duration,
        page_size: u32,
    ) -> Result<StreamHandle<L::Item>, StreamError> {
        // Anchor fetch: seed the cursor with the single newest item, or with
        // "" for a target with no recent history (everything in the first
        // non-empty page is then new).
        let anchor = listing.page(1).await.map_err(StreamError::Bootstrap)?;
        let cursor = newest_fullname(&anchor).unwrap_or_default();
        tracing::info!(stream = label, cursor = %cursor, "stream starting");

        let (tx, items) = mpsc::channel(self.config.channel_capacity);
        let (err_tx, errors) = mpsc::channel(self.config.error_capacity);
        let (stop, stop_rx) = StopSignal::new();
        let task = tokio::spawn(run_cursor_stream(
            listing, label, cursor, interval, page_size, tx, err_tx, stop_rx,
        ));
        self.registry.lock().await.insert(label, stop.clone(), task);
        Ok(StreamHandle::new(items, errors, stop))
    }

    async fn start_inbox_stream(&self, filter: MessageFilter) -> StreamHandle<Message> {
        let label = filter.as_str();
        tracing::info!(stream = label, "stream starting");

        let (tx, items) = mpsc::channel(self.config.channel_capacity);
        let (err_tx, errors) = mpsc::channel(self.config.error_capacity);
        let (stop, stop_rx) = StopSignal::new();
        let task = tokio::spawn(run_inbox_stream(
            Arc::clone(&self.client),
            filter,
            self.config.comment_interval,
            tx,
            err_tx,
            stop_rx,
        ));
        self.registry.lock().await.insert(label, stop.clone(), task);
        StreamHandle::new(items, errors, stop)
    }
}
