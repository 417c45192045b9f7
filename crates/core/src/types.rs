use std::fmt;

use serde::{Deserialize, Serialize};

/// All database primary keys are PostgreSQL BIGSERIAL.
///
/// This is the single canonical identifier type. Path parameters, token
/// claims, and storage keys are all converted to `DbId` once at the boundary;
/// comparisons (ownership checks in particular) happen only between `DbId`s.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The toggle-able actor-to-target association kinds.
///
/// Each kind targets exactly one entity table and maps to one denormalized
/// counter on it (see the toggle engine in `cliptube-db`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    VideoLike,
    CommentLike,
    TweetLike,
    Subscription,
}

impl RelationKind {
    /// Every kind, in a fixed order. Used by the reconciliation job.
    pub const ALL: [RelationKind; 4] = [
        RelationKind::VideoLike,
        RelationKind::CommentLike,
        RelationKind::TweetLike,
        RelationKind::Subscription,
    ];

    /// Stable string form stored in the `relations.kind` column.
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::VideoLike => "video_like",
            RelationKind::CommentLike => "comment_like",
            RelationKind::TweetLike => "tweet_like",
            RelationKind::Subscription => "subscription",
        }
    }

    /// Name of the entity kind a relation of this kind may target.
    pub fn target_entity(self) -> &'static str {
        match self {
            RelationKind::VideoLike => "Video",
            RelationKind::CommentLike => "Comment",
            RelationKind::TweetLike => "Tweet",
            RelationKind::Subscription => "Channel",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video_like" => Ok(RelationKind::VideoLike),
            "comment_like" => Ok(RelationKind::CommentLike),
            "tweet_like" => Ok(RelationKind::TweetLike),
            "subscription" => Ok(RelationKind::Subscription),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_string_roundtrip() {
        for kind in RelationKind::ALL {
            let parsed: RelationKind = kind.as_str().parse().expect("known kind should parse");
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!("playlist_like".parse::<RelationKind>().is_err());
        assert!("".parse::<RelationKind>().is_err());
    }

    #[test]
    fn test_target_entity_mapping() {
        assert_eq!(RelationKind::VideoLike.target_entity(), "Video");
        assert_eq!(RelationKind::Subscription.target_entity(), "Channel");
    }
}
