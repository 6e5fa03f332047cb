use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StreamError;

// ─── Target ───────────────────────────────────────────────────────

/// The two kinds of entity a stream can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// A named container of items (a board / topic channel).
    Board,
    /// An individual producer; the stream scopes to their output only.
    Author,
}

impl TargetKind {
    pub const ALL: [Self; 2] = [Self::Board, Self::Author];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::Author => "author",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "board" => Ok(Self::Board),
            "author" => Ok(Self::Author),
            _ => Err(StreamError::UnknownKind(s.to_string())),
        }
    }
}

/// A resolved target: kind plus the name the listing client addresses it by.
///
/// Resolution happens once, before a poll loop starts; the loop itself is
/// kind-agnostic and only ever sees this pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub kind: TargetKind,
    pub name: String,
}

impl Target {
    pub fn new(kind: TargetKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

// ─── Listing parameters ───────────────────────────────────────────

/// Sort order passed through to the listing client.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    New,
    Hot,
    Top,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Hot => "hot",
            Self::Top => "top",
        }
    }
}

/// Time window for bounded listings (the anchor fetch uses `Hour`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    Hour,
    Day,
    Week,
    All,
}

impl TimeWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::All => "all",
        }
    }
}

// ─── Items ────────────────────────────────────────────────────────

/// Common surface of cursor-streamed records.
///
/// `fullname` is the platform's stable unique identifier (`t1_*` for
/// comments, `t3_*` for submissions); `created_at` gives the recency
/// ordering the poll loop sorts and advances its cursor by.
pub trait StreamItem {
    fn fullname(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
}

/// A comment as returned by the listing API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Platform fullname, e.g. `t1_abc123`.
    pub id: String,
    pub author: String,
    pub board: String,
    pub body: String,
    pub permalink: String,
    pub created_at: DateTime<Utc>,
}

impl StreamItem for Comment {
    fn fullname(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A submission (post) as returned by the listing API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Platform fullname, e.g. `t3_abc123`.
    pub id: String,
    pub author: String,
    pub board: String,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl StreamItem for Submission {
    fn fullname(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// ─── Inbox messages ───────────────────────────────────────────────

/// Classification of an unread inbox message.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    CommentReply,
    Mention,
    /// Private messages and anything else the inbox carries.
    #[default]
    Other,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CommentReply => "comment_reply",
            Self::Mention => "mention",
            Self::Other => "other",
        }
    }
}

/// An unread inbox message.
///
/// Inbox streams have no cursor: marking a delivered message as read at the
/// source is what prevents re-delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Platform fullname, e.g. `t4_abc123` (or `t1_*` for comment replies).
    pub id: String,
    pub author: String,
    pub subject: String,
    pub body: String,
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// True if this message is a reply to one of the account's comments.
    pub fn is_reply(&self) -> bool {
        self.kind == MessageKind::CommentReply
    }

    /// True if this message is a username mention.
    pub fn is_mention(&self) -> bool {
        self.kind == MessageKind::Mention
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn target_kind_round_trips() {
        for kind in TargetKind::ALL {
            assert_eq!(kind.as_str().parse::<TargetKind>().unwrap(), kind);
        }
    }

    #[test]
    fn target_kind_rejects_unknown() {
        let err = "channel".parse::<TargetKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown target kind: channel");
    }

    #[test]
    fn target_display_includes_kind() {
        let target = Target::new(TargetKind::Board, "rustlang");
        assert_eq!(target.to_string(), "board/rustlang");
    }

    #[test]
    fn message_predicates_are_exclusive() {
        let mut msg = Message {
            id: "t4_1".to_string(),
            author: "someone".to_string(),
            subject: "comment reply".to_string(),
            body: "hi".to_string(),
            kind: MessageKind::CommentReply,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        };
        assert!(msg.is_reply());
        assert!(!msg.is_mention());

        msg.kind = MessageKind::Mention;
        assert!(msg.is_mention());
        assert!(!msg.is_reply());

        msg.kind = MessageKind::Other;
        assert!(!msg.is_reply());
        assert!(!msg.is_mention());
    }

    #[test]
    fn kinds_serialize_to_wire_names() {
        assert_eq!(
            serde_json::to_string(&MessageKind::CommentReply).unwrap(),
            "\"comment_reply\""
        );
        assert_eq!(serde_json::to_string(&TargetKind::Board).unwrap(), "\"board\"");
        assert_eq!(serde_json::to_string(&SortOrder::New).unwrap(), "\"new\"");
        assert_eq!(serde_json::to_string(&TimeWindow::Hour).unwrap(), "\"hour\"");
    }

    #[test]
    fn stream_item_exposes_fullname_and_recency() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let comment = Comment {
            id: "t1_9".to_string(),
            author: "a".to_string(),
            board: "b".to_string(),
            body: String::new(),
            permalink: String::new(),
            created_at: ts,
        };
        assert_eq!(comment.fullname(), "t1_9");
        assert_eq!(StreamItem::created_at(&comment), ts);
    }
}
