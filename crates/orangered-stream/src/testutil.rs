//! Scripted in-memory listing client for tests.
//!
//! Batches are queued per call: each `*_after` invocation pops the next
//! scripted response (exhausted scripts return empty pages, like a quiet
//! target). Inbox state is live: `mark_read` removes from the unread set
//! unless scripted to fail.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};

use orangered_core::error::ClientError;
use orangered_core::types::{
    Comment, Message, MessageKind, SortOrder, Submission, Target, TargetKind, TimeWindow,
};

use crate::client::ListingClient;

const EPOCH: i64 = 1_750_000_000;

pub(crate) fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(EPOCH + secs, 0).unwrap()
}

pub(crate) fn comment(id: &str, secs: i64) -> Comment {
    Comment {
        id: id.to_string(),
        author: "author".to_string(),
        board: "bar".to_string(),
        body: format!("body of {id}"),
        permalink: format!("/c/{id}"),
        created_at: ts(secs),
    }
}

pub(crate) fn submission(id: &str, secs: i64) -> Submission {
    Submission {
        id: id.to_string(),
        author: "author".to_string(),
        board: "bar".to_string(),
        title: format!("title of {id}"),
        url: format!("https://example.com/{id}"),
        created_at: ts(secs),
    }
}

pub(crate) fn message(id: &str, kind: MessageKind, secs: i64) -> Message {
    Message {
        id: id.to_string(),
        author: "author".to_string(),
        subject: kind.as_str().to_string(),
        body: format!("body of {id}"),
        kind,
        created_at: ts(secs),
    }
}

#[derive(Default)]
pub(crate) struct FakeClient {
    board_exists: bool,
    author_exists: bool,
    exists_error: Option<ClientError>,
    comment_anchor: Option<Result<Vec<Comment>, ClientError>>,
    comment_batches: Mutex<VecDeque<Result<Vec<Comment>, ClientError>>>,
    comment_after_calls: Mutex<Vec<String>>,
    submission_anchor: Option<Result<Vec<Submission>, ClientError>>,
    submission_batches: Mutex<VecDeque<Result<Vec<Submission>, ClientError>>>,
    submission_after_calls: Mutex<Vec<(String, u32)>>,
    unread: Mutex<Vec<Message>>,
    unread_error: Option<ClientError>,
    read_ids: Mutex<Vec<String>>,
    mark_read_error: Option<ClientError>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self {
            board_exists: true,
            ..Self::default()
        }
    }

    pub fn with_board(mut self, exists: bool) -> Self {
        self.board_exists = exists;
        self
    }

    pub fn with_author(mut self, exists: bool) -> Self {
        self.author_exists = exists;
        self
    }

    pub fn with_exists_error(mut self, err: ClientError) -> Self {
        self.exists_error = Some(err);
        self
    }

    pub fn with_comment_anchor(mut self, anchor: Result<Vec<Comment>, ClientError>) -> Self {
        self.comment_anchor = Some(anchor);
        self
    }

    pub fn with_submission_anchor(mut self, anchor: Result<Vec<Submission>, ClientError>) -> Self {
        self.submission_anchor = Some(anchor);
        self
    }

    pub fn with_unread(self, messages: Vec<Message>) -> Self {
        *self.unread.lock().unwrap() = messages;
        self
    }

    pub fn with_unread_error(mut self, err: ClientError) -> Self {
        self.unread_error = Some(err);
        self
    }

    pub fn with_mark_read_error(mut self, err: ClientError) -> Self {
        self.mark_read_error = Some(err);
        self
    }

    pub fn push_comment_batch(&self, batch: Result<Vec<Comment>, ClientError>) {
        self.comment_batches.lock().unwrap().push_back(batch);
    }

    pub fn push_submission_batch(&self, batch: Result<Vec<Submission>, ClientError>) {
        self.submission_batches.lock().unwrap().push_back(batch);
    }

    pub fn comment_after_calls(&self) -> Vec<String> {
        self.comment_after_calls.lock().unwrap().clone()
    }

    pub fn submission_after_calls(&self) -> Vec<(String, u32)> {
        self.submission_after_calls.lock().unwrap().clone()
    }

    pub fn read_ids(&self) -> Vec<String> {
        self.read_ids.lock().unwrap().clone()
    }

    pub fn unread_len(&self) -> usize {
        self.unread.lock().unwrap().len()
    }
}

impl ListingClient for FakeClient {
    async fn exists(&self, kind: TargetKind, _name: &str) -> Result<bool, ClientError> {
        if let Some(err) = &self.exists_error {
            return Err(err.clone());
        }
        Ok(match kind {
            TargetKind::Board => self.board_exists,
            TargetKind::Author => self.author_exists,
        })
    }

    async fn comments(
        &self,
        _target: &Target,
        _sort: SortOrder,
        _window: TimeWindow,
        _limit: u32,
    ) -> Result<Vec<Comment>, ClientError> {
        self.comment_anchor.clone().unwrap_or(Ok(Vec::new()))
    }

    async fn comments_after(
        &self,
        _target: &Target,
        _sort: SortOrder,
        last_id: &str,
        _limit: u32,
    ) -> Result<Vec<Comment>, ClientError> {
        self.comment_after_calls
            .lock()
            .unwrap()
            .push(last_id.to_string());
        self.comment_batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Vec::new()))
    }

    async fn submissions(
        &self,
        _target: &Target,
        _sort: SortOrder,
        _window: TimeWindow,
        _limit: u32,
    ) -> Result<Vec<Submission>, ClientError> {
        self.submission_anchor.clone().unwrap_or(Ok(Vec::new()))
    }

    async fn submissions_after(
        &self,
        _target: &Target,
        _sort: SortOrder,
        last_id: &str,
        limit: u32,
    ) -> Result<Vec<Submission>, ClientError> {
        self.submission_after_calls
            .lock()
            .unwrap()
            .push((last_id.to_string(), limit));
        self.submission_batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Vec::new()))
    }

    async fn unread_messages(&self) -> Result<Vec<Message>, ClientError> {
        if let Some(err) = &self.unread_error {
            return Err(err.clone());
        }
        Ok(self.unread.lock().unwrap().clone())
    }

    async fn mark_read(&self, id: &str) -> Result<(), ClientError> {
        if let Some(err) = &self.mark_read_error {
            return Err(err.clone());
        }
        self.unread.lock().unwrap().retain(|m| m.id != id);
        self.read_ids.lock().unwrap().push(id.to_string());
        Ok(())
    }
}
