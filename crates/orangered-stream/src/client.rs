//! The listing-client seam: the pull-based collaborator the poll loops are
//! built on. Authentication, request building and JSON decoding all live
//! behind this trait; the engine only depends on its listing contracts.

use std::future::Future;

use orangered_core::error::ClientError;
use orangered_core::types::{
    Comment, Message, SortOrder, Submission, Target, TargetKind, TimeWindow,
};

/// Pull-based listing operations against the remote platform.
///
/// Every listing is finite and newest-first. The `*_after` variants return
/// only items strictly newer than `last_id`; an empty `last_id` means "no
/// prior observation" and returns the newest page unfiltered, so a stream
/// bootstrapped against an empty history treats everything as new.
///
/// Methods take the already-resolved [`Target`], so one implementation (and
/// one poll loop) serves both board- and author-scoped streams.
pub trait ListingClient: Send + Sync + 'static {
    /// Remote existence check used by the resolver: does `name` denote an
    /// entity of `kind`?
    fn exists(
        &self,
        kind: TargetKind,
        name: &str,
    ) -> impl Future<Output = Result<bool, ClientError>> + Send;

    /// Bounded newest-first comment listing (the anchor fetch).
    fn comments(
        &self,
        target: &Target,
        sort: SortOrder,
        window: TimeWindow,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Comment>, ClientError>> + Send;

    /// Comments strictly newer than `last_id`, newest-first.
    fn comments_after(
        &self,
        target: &Target,
        sort: SortOrder,
        last_id: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Comment>, ClientError>> + Send;

    /// Bounded newest-first submission listing (the anchor fetch).
    fn submissions(
        &self,
        target: &Target,
        sort: SortOrder,
        window: TimeWindow,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Submission>, ClientError>> + Send;

    /// Submissions strictly newer than `last_id`, newest-first.
    fn submissions_after(
        &self,
        target: &Target,
        sort: SortOrder,
        last_id: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Submission>, ClientError>> + Send;

    /// All currently unread inbox messages.
    fn unread_messages(&self) -> impl Future<Output = Result<Vec<Message>, ClientError>> + Send;

    /// Mark one inbox message as read at the source. For inbox streams this
    /// is the de-duplication mechanism: read messages are never listed again.
    fn mark_read(&self, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send;
}
