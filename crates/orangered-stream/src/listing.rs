//! Paged-listing capability: the kind- and item-agnostic view of a resolved
//! target that the cursor loop consumes. Selecting a capability once at
//! stream creation is what keeps the loop free of comment/submission and
//! board/author branches.

use std::future::Future;
use std::sync::Arc;

use orangered_core::error::ClientError;
use orangered_core::types::{Comment, SortOrder, StreamItem, Submission, Target, TimeWindow};

use crate::client::ListingClient;

/// One resolved target's listing surface, parameterized by item type.
pub(crate) trait PagedListing: Send + Sync + 'static {
    type Item: StreamItem + Send + 'static;

    /// Bounded newest-first page (the anchor fetch uses `limit = 1`).
    fn page(&self, limit: u32) -> impl Future<Output = Result<Vec<Self::Item>, ClientError>> + Send;

    /// Items strictly newer than `cursor`, newest-first. An empty cursor
    /// returns the newest page unfiltered.
    fn page_after(
        &self,
        cursor: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Self::Item>, ClientError>> + Send;
}

/// Comment listings for one resolved target.
pub(crate) struct CommentListing<C> {
    pub client: Arc<C>,
    pub target: Target,
}

impl<C: ListingClient> PagedListing for CommentListing<C> {
    type Item = Comment;

    async fn page(&self, limit: u32) -> Result<Vec<Comment>, ClientError> {
        self.client
            .comments(&self.target, SortOrder::New, TimeWindow::Hour, limit)
            .await
    }

    async fn page_after(&self, cursor: &str, limit: u32) -> Result<Vec<Comment>, ClientError> {
        self.client
            .comments_after(&self.target, SortOrder::New, cursor, limit)
            .await
    }
}

/// Submission listings for one resolved target.
pub(crate) struct SubmissionListing<C> {
    pub client: Arc<C>,
    pub target: Target,
}

impl<C: ListingClient> PagedListing for SubmissionListing<C> {
    type Item = Submission;

    async fn page(&self, limit: u32) -> Result<Vec<Submission>, ClientError> {
        self.client
            .submissions(&self.target, SortOrder::New, TimeWindow::Hour, limit)
            .await
    }

    async fn page_after(&self, cursor: &str, limit: u32) -> Result<Vec<Submission>, ClientError> {
        self.client
            .submissions_after(&self.target, SortOrder::New, cursor, limit)
            .await
    }
}

/// Fullname of the most recently created item in a batch.
///
/// The cursor advances by creation time, not by listing position, so a page
/// that arrives unsorted or overlapping cannot regress the cursor.
pub(crate) fn newest_fullname<T: StreamItem>(batch: &[T]) -> Option<String> {
    batch
        .iter()
        .max_by_key(|item| item.created_at())
        .map(|item| item.fullname().to_string())
}
