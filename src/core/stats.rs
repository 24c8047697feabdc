//! Per-sender rankings and activity histograms over parsed messages.
//!
//! [`compute_stats`] is a pure function of its input. Filtering happens
//! upstream (see [`filter`](crate::core::filter)); this module only counts.
//!
//! System messages are left out of every figure: totals, distinct days,
//! rankings and histograms.
//!
//! # Example
//!
//! ```
//! use linestats::core::stats::compute_stats;
//! use linestats::parser::parse_line_chat;
//!
//! let result = parse_line_chat(
//!     "2024/05/20(Mon)\n13:30\tAlice\tHello\n13:31\tBob\t[Sticker]\n13:32\tAlice\t[Photo]\n",
//! );
//! let stats = compute_stats(&result.messages);
//!
//! assert_eq!(stats.total_messages, 3);
//! assert_eq!(stats.ranking[0].name, "Alice");
//! assert_eq!(stats.sticker_ranking[0].name, "Bob");
//! assert_eq!(stats.hourly_activity[13], 3);
//! assert_eq!(stats.weekday_activity[1], 3); // Monday
//! ```

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::message::MessageType;

/// A sender and how many messages they contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderCount {
    pub name: String,
    pub count: usize,
}

/// Media sent by one sender, split by type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaCount {
    pub name: String,
    pub images: usize,
    pub videos: usize,
    pub files: usize,
    /// `images + videos + files`
    pub total: usize,
}

/// Aggregated view of a message sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatStats {
    /// Non-system messages.
    pub total_messages: usize,
    /// Distinct calendar days with at least one non-system message.
    pub days_count: usize,
    /// All senders, most active first.
    pub ranking: Vec<SenderCount>,
    /// Senders with at least one sticker, most stickers first.
    pub sticker_ranking: Vec<SenderCount>,
    /// Senders with at least one image, video or file, most media first.
    pub media_ranking: Vec<MediaCount>,
    /// Messages per hour of day, index 0 is midnight.
    pub hourly_activity: [usize; 24],
    /// Messages per weekday, index 0 is Sunday.
    pub weekday_activity: [usize; 7],
    /// Distinct senders in first-appearance order.
    pub participants: Vec<String>,
    pub first_message: Option<NaiveDateTime>,
    pub last_message: Option<NaiveDateTime>,
}

impl Default for ChatStats {
    fn default() -> Self {
        Self {
            total_messages: 0,
            days_count: 0,
            ranking: Vec::new(),
            sticker_ranking: Vec::new(),
            media_ranking: Vec::new(),
            hourly_activity: [0; 24],
            weekday_activity: [0; 7],
            participants: Vec::new(),
            first_message: None,
            last_message: None,
        }
    }
}

impl ChatStats {
    /// Returns `true` if no non-system message was counted.
    pub fn is_empty(&self) -> bool {
        self.total_messages == 0
    }

    /// Hour of day with the most messages, earliest hour on ties.
    pub fn busiest_hour(&self) -> Option<usize> {
        busiest(&self.hourly_activity)
    }

    /// Weekday index (0 = Sunday) with the most messages.
    pub fn busiest_weekday(&self) -> Option<usize> {
        busiest(&self.weekday_activity)
    }

    /// Message count for a sender, 0 if absent.
    pub fn count_for(&self, sender: &str) -> usize {
        self.ranking
            .iter()
            .find(|entry| entry.name == sender)
            .map_or(0, |entry| entry.count)
    }
}

fn busiest(slots: &[usize]) -> Option<usize> {
    let max = *slots.iter().max()?;
    if max == 0 {
        return None;
    }
    slots.iter().position(|&n| n == max)
}

/// Running totals for one sender.
#[derive(Default)]
struct Tally {
    name: String,
    messages: usize,
    stickers: usize,
    images: usize,
    videos: usize,
    files: usize,
}

impl Tally {
    fn media(&self) -> usize {
        self.images + self.videos + self.files
    }
}

/// Computes statistics over `messages`.
///
/// Rankings are sorted by descending count with a stable sort, so senders
/// with equal counts keep the order in which they first appear.
pub fn compute_stats<'a, I>(messages: I) -> ChatStats
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut stats = ChatStats::default();
    let mut tallies: Vec<Tally> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut days = HashSet::new();

    for msg in messages {
        if msg.is_system() {
            continue;
        }

        stats.total_messages += 1;
        days.insert(msg.date());
        stats.hourly_activity[msg.hour() as usize] += 1;
        stats.weekday_activity[msg.weekday_index()] += 1;

        if stats.first_message.is_none_or(|first| msg.timestamp < first) {
            stats.first_message = Some(msg.timestamp);
        }
        if stats.last_message.is_none_or(|last| msg.timestamp > last) {
            stats.last_message = Some(msg.timestamp);
        }

        let slot = *index.entry(msg.sender.as_str()).or_insert_with(|| {
            tallies.push(Tally {
                name: msg.sender.clone(),
                ..Tally::default()
            });
            tallies.len() - 1
        });
        let tally = &mut tallies[slot];
        tally.messages += 1;
        match msg.kind {
            MessageType::Sticker => tally.stickers += 1,
            MessageType::Image => tally.images += 1,
            MessageType::Video => tally.videos += 1,
            MessageType::File => tally.files += 1,
            _ => {}
        }
    }

    stats.days_count = days.len();
    stats.participants = tallies.iter().map(|t| t.name.clone()).collect();

    stats.ranking = ranked(&tallies, |t| t.messages);
    stats.sticker_ranking = ranked(&tallies, |t| t.stickers);

    let mut media: Vec<MediaCount> = tallies
        .iter()
        .filter(|t| t.media() > 0)
        .map(|t| MediaCount {
            name: t.name.clone(),
            images: t.images,
            videos: t.videos,
            files: t.files,
            total: t.media(),
        })
        .collect();
    media.sort_by(|a, b| b.total.cmp(&a.total));
    stats.media_ranking = media;

    stats
}

fn ranked(tallies: &[Tally], count: impl Fn(&Tally) -> usize) -> Vec<SenderCount> {
    let mut ranking: Vec<SenderCount> = tallies
        .iter()
        .filter(|t| count(t) > 0)
        .map(|t| SenderCount {
            name: t.name.clone(),
            count: count(t),
        })
        .collect();
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(sender: &str, kind: MessageType, ts: &str) -> Message {
        let timestamp = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M").unwrap();
        Message::new(1, timestamp, sender, "x", kind)
    }

    #[test]
    fn test_empty_input() {
        let stats = compute_stats(&Vec::<Message>::new());
        assert!(stats.is_empty());
        assert_eq!(stats.days_count, 0);
        assert!(stats.ranking.is_empty());
        assert_eq!(stats.busiest_hour(), None);
        assert_eq!(stats.first_message, None);
    }

    #[test]
    fn test_ranking_descending_with_stable_ties() {
        let messages = vec![
            msg("Carol", MessageType::Text, "2024-05-20 10:00"),
            msg("Alice", MessageType::Text, "2024-05-20 10:01"),
            msg("Bob", MessageType::Text, "2024-05-20 10:02"),
            msg("Bob", MessageType::Text, "2024-05-20 10:03"),
        ];

        let stats = compute_stats(&messages);
        let names: Vec<_> = stats.ranking.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Carol", "Alice"]);
        assert_eq!(stats.count_for("Bob"), 2);
        assert_eq!(stats.count_for("Nobody"), 0);
    }

    #[test]
    fn test_system_messages_excluded_everywhere() {
        let messages = vec![
            msg("Alice", MessageType::Text, "2024-05-20 10:00"),
            msg("System", MessageType::System, "2024-05-21 03:00"),
            msg("Bob joined the chat", MessageType::System, "2024-05-22 04:00"),
        ];

        let stats = compute_stats(&messages);
        assert_eq!(stats.total_messages, 1);
        assert_eq!(stats.days_count, 1);
        assert_eq!(stats.ranking.len(), 1);
        assert_eq!(stats.participants, vec!["Alice"]);
        assert_eq!(stats.hourly_activity[3], 0);
        assert_eq!(stats.hourly_activity.iter().sum::<usize>(), 1);
        assert_eq!(stats.weekday_activity.iter().sum::<usize>(), 1);
    }

    #[test]
    fn test_sticker_and_media_rankings() {
        let messages = vec![
            msg("Alice", MessageType::Image, "2024-05-20 10:00"),
            msg("Bob", MessageType::Sticker, "2024-05-20 10:01"),
            msg("Bob", MessageType::Video, "2024-05-20 10:02"),
            msg("Bob", MessageType::File, "2024-05-20 10:03"),
            msg("Carol", MessageType::Text, "2024-05-20 10:04"),
        ];

        let stats = compute_stats(&messages);

        assert_eq!(stats.sticker_ranking.len(), 1);
        assert_eq!(stats.sticker_ranking[0].name, "Bob");

        assert_eq!(stats.media_ranking.len(), 2);
        assert_eq!(stats.media_ranking[0].name, "Bob");
        assert_eq!(stats.media_ranking[0].total, 2);
        assert_eq!(stats.media_ranking[0].videos, 1);
        assert_eq!(stats.media_ranking[0].files, 1);
        assert_eq!(stats.media_ranking[1].images, 1);
    }

    #[test]
    fn test_histograms_and_days() {
        // 2024-05-19 is a Sunday
        let messages = vec![
            msg("A", MessageType::Text, "2024-05-19 00:10"),
            msg("A", MessageType::Text, "2024-05-19 23:50"),
            msg("B", MessageType::Text, "2024-05-25 23:00"),
        ];

        let stats = compute_stats(&messages);
        assert_eq!(stats.days_count, 2);
        assert_eq!(stats.hourly_activity[0], 1);
        assert_eq!(stats.hourly_activity[23], 2);
        assert_eq!(stats.weekday_activity[0], 2);
        assert_eq!(stats.weekday_activity[6], 1);
        assert_eq!(stats.busiest_hour(), Some(23));
        assert_eq!(stats.busiest_weekday(), Some(0));
    }

    #[test]
    fn test_first_and_last_ignore_input_order() {
        let messages = vec![
            msg("A", MessageType::Text, "2024-05-20 12:00"),
            msg("A", MessageType::Text, "2024-05-18 09:00"),
            msg("A", MessageType::Text, "2024-05-22 18:00"),
        ];

        let stats = compute_stats(&messages);
        assert_eq!(
            stats.first_message.unwrap().to_string(),
            "2024-05-18 09:00:00"
        );
        assert_eq!(stats.last_message.unwrap().to_string(), "2024-05-22 18:00:00");
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let messages = vec![
            msg("A", MessageType::Sticker, "2024-05-20 12:00"),
            msg("B", MessageType::Text, "2024-05-20 13:00"),
        ];
        assert_eq!(compute_stats(&messages), compute_stats(&messages));
    }
}
