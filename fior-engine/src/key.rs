//! Field catalog
//!
//! The set of addressable item fields, each tagged with exactly one value
//! kind. The kind decides how raw values coerce and compare (see `coerce`).

use serde::{Deserialize, Serialize};

use crate::model::PlaylistItem;

/// An addressable item field, or the synthetic `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Position within the sequence currently being evaluated (0-based).
    /// Recomputed at every pipeline step; not the stored `position` field.
    Index,
    VideoId,
    Title,
    Description,
    Note,
    Position,
    ChannelTitle,
    ChannelId,
    Duration,
    AddedAt,
    PublishedAt,
}

/// Coercion/comparison family of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Number,
    Id,
    String,
    Duration,
    Date,
}

impl Key {
    /// Every key selectable in the editor, synthetic `index` included.
    pub const ALL: [Key; 11] = [
        Key::Index,
        Key::VideoId,
        Key::Title,
        Key::Description,
        Key::Note,
        Key::Position,
        Key::ChannelTitle,
        Key::ChannelId,
        Key::Duration,
        Key::AddedAt,
        Key::PublishedAt,
    ];

    /// The value kind this key belongs to.
    pub fn kind(self) -> ValueKind {
        match self {
            Key::Index | Key::Position => ValueKind::Number,
            Key::VideoId | Key::ChannelId => ValueKind::Id,
            Key::Title | Key::Description | Key::Note | Key::ChannelTitle => ValueKind::String,
            Key::Duration => ValueKind::Duration,
            Key::AddedAt | Key::PublishedAt => ValueKind::Date,
        }
    }

    /// Stringify the keyed field of `item`, with `index` standing in for
    /// the item's position in the sequence currently being evaluated.
    pub fn field_text(self, item: &PlaylistItem, index: usize) -> String {
        match self {
            Key::Index => index.to_string(),
            Key::VideoId => item.video_id.clone(),
            Key::Title => item.title.clone(),
            Key::Description => item.description.clone(),
            Key::Note => item.note.clone(),
            Key::Position => item.position.to_string(),
            Key::ChannelTitle => item.channel_title.clone(),
            Key::ChannelId => item.channel_id.clone(),
            Key::Duration => item.duration.clone(),
            Key::AddedAt => item.added_at.to_rfc3339(),
            Key::PublishedAt => item.published_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_of(kind: ValueKind) -> Vec<Key> {
        Key::ALL
            .iter()
            .copied()
            .filter(|key| key.kind() == kind)
            .collect()
    }

    #[test]
    fn every_key_has_exactly_one_kind() {
        assert_eq!(keys_of(ValueKind::Number), vec![Key::Index, Key::Position]);
        assert_eq!(keys_of(ValueKind::Id), vec![Key::VideoId, Key::ChannelId]);
        assert_eq!(
            keys_of(ValueKind::String),
            vec![Key::Title, Key::Description, Key::Note, Key::ChannelTitle]
        );
        assert_eq!(keys_of(ValueKind::Duration), vec![Key::Duration]);
        assert_eq!(
            keys_of(ValueKind::Date),
            vec![Key::AddedAt, Key::PublishedAt]
        );
        // the five kind buckets partition the catalog
        let counted: usize = [
            ValueKind::Number,
            ValueKind::Id,
            ValueKind::String,
            ValueKind::Duration,
            ValueKind::Date,
        ]
        .iter()
        .map(|kind| keys_of(*kind).len())
        .sum();
        assert_eq!(counted, Key::ALL.len());
    }

    #[test]
    fn keys_serialize_as_snake_case_field_names() {
        assert_eq!(serde_json::to_string(&Key::Index).unwrap(), "\"index\"");
        assert_eq!(serde_json::to_string(&Key::VideoId).unwrap(), "\"video_id\"");
        assert_eq!(
            serde_json::to_string(&Key::ChannelTitle).unwrap(),
            "\"channel_title\""
        );
        let key: Key = serde_json::from_str("\"added_at\"").unwrap();
        assert_eq!(key, Key::AddedAt);
    }
}
