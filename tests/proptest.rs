//! Property-based tests for linestats.
//!
//! These tests generate random exports and message lists to find edge cases.

use chrono::NaiveDate;
use proptest::prelude::*;

use linestats::core::{FilterConfig, HourRange, apply_filters, compute_stats};
use linestats::parser::{Parser, parse_line_chat};
use linestats::parsers::LineParser;
use linestats::{Message, MessageType};

/// One physical line of a synthetic export (fast: no regex strategies)
fn arb_line() -> impl Strategy<Value = String> {
    let senders = prop::sample::select(vec!["Alice", "Bob", "陳 美玲", "Mary Jane", "たなか"]);
    let bodies = prop::sample::select(vec![
        "Hello",
        "[Sticker]",
        "[Photo]",
        "[Video]",
        "[File]",
        "☎ Call time 1:02",
        "left the chat",
        "see you at 10:30",
        "",
    ]);

    prop_oneof![
        // tab form, sometimes with an impossible time
        (0u32..26, 0u32..60, senders.clone(), bodies.clone())
            .prop_map(|(h, m, s, b)| format!("{h:02}:{m:02}\t{s}\t{b}")),
        // space form
        (0u32..24, 0u32..60, bodies.clone())
            .prop_map(|(h, m, b)| format!("{h}:{m:02} Bob {b}")),
        // date header, with the occasional impossible day
        (2020i32..2026, 1u32..13, 1u32..32, prop::sample::select(vec!["/", "-", "."]))
            .prop_map(|(y, mo, d, sep)| format!("{y}{sep}{mo:02}{sep}{d:02}(Mon)")),
        // continuation or noise
        bodies.prop_map(str::to_string),
        Just(String::new()),
        Just("[LINE] Chat history".to_string()),
    ]
}

fn arb_export(max_lines: usize) -> impl Strategy<Value = String> {
    (
        prop::collection::vec(arb_line(), 0..max_lines),
        prop::bool::ANY,
    )
        .prop_map(|(lines, crlf)| lines.join(if crlf { "\r\n" } else { "\n" }))
}

/// A message with a random timestamp in May 2024
fn arb_message() -> impl Strategy<Value = Message> {
    (
        1u32..32,
        0u32..24,
        0u32..60,
        prop::sample::select(vec!["Alice", "Bob", "Charlie", "王小明"]),
        prop::sample::select(vec![
            MessageType::Text,
            MessageType::Sticker,
            MessageType::Image,
            MessageType::Video,
            MessageType::File,
            MessageType::Call,
            MessageType::System,
        ]),
    )
        .prop_map(|(day, hour, minute, sender, kind)| {
            let timestamp = NaiveDate::from_ymd_opt(2024, 5, day)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap();
            Message::new(0, timestamp, sender, "content", kind)
        })
}

fn arb_messages(max_len: usize) -> impl Strategy<Value = Vec<Message>> {
    prop::collection::vec(arb_message(), 0..max_len).prop_map(|mut messages| {
        for (i, msg) in messages.iter_mut().enumerate() {
            msg.id = i as u64 + 1;
        }
        messages
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // PARSER PROPERTIES
    // ============================================

    /// Arbitrary text never panics
    #[test]
    fn parse_never_panics(text in any::<String>()) {
        let _ = parse_line_chat(&text);
    }

    /// The parsed counter always agrees with the message list
    #[test]
    fn parsed_count_matches_messages(text in arb_export(40)) {
        let result = parse_line_chat(&text);
        prop_assert_eq!(result.report.stats.parsed_messages, result.messages.len());
    }

    /// Ids are 1..=n in order
    #[test]
    fn ids_are_consecutive(text in arb_export(40)) {
        let result = parse_line_chat(&text);
        for (i, msg) in result.messages.iter().enumerate() {
            prop_assert_eq!(msg.id, i as u64 + 1);
        }
    }

    /// Every line is counted at most once
    #[test]
    fn line_counters_bounded_by_total(text in arb_export(40)) {
        let stats = parse_line_chat(&text).report.stats;
        let accounted = stats.empty_lines
            + stats.date_headers
            + stats.parsed_messages
            + stats.continuation_lines
            + stats.skipped_lines;
        prop_assert!(accounted <= stats.total_lines);
        prop_assert!(stats.failed_lines.len() <= stats.skipped_lines.min(20));
    }

    /// Without a date header nothing can be timestamped
    #[test]
    fn timestamps_only_come_from_headers(text in arb_export(40)) {
        let result = parse_line_chat(&text);
        if result.report.stats.date_headers == 0 {
            prop_assert!(result.messages.is_empty());
        }
    }

    /// Parsing the same text twice gives the same result
    #[test]
    fn parse_is_deterministic(text in arb_export(40)) {
        let parser = LineParser::new();
        prop_assert_eq!(parser.parse_str(&text), parser.parse_str(&text));
    }

    /// CRLF and LF endings parse identically
    #[test]
    fn line_endings_do_not_matter(lines in prop::collection::vec(arb_line(), 0..30)) {
        let lf = parse_line_chat(&lines.join("\n"));
        let crlf = parse_line_chat(&lines.join("\r\n"));
        prop_assert_eq!(lf, crlf);
    }

    // ============================================
    // STATS PROPERTIES
    // ============================================

    /// Rankings sum to the non-system total and are sorted descending
    #[test]
    fn ranking_sums_to_total(messages in arb_messages(50)) {
        let stats = compute_stats(&messages);
        let non_system = messages.iter().filter(|m| !m.is_system()).count();

        prop_assert_eq!(stats.total_messages, non_system);
        prop_assert_eq!(stats.ranking.iter().map(|r| r.count).sum::<usize>(), non_system);
        prop_assert!(stats.ranking.windows(2).all(|w| w[0].count >= w[1].count));
        prop_assert!(stats.sticker_ranking.iter().all(|r| r.count > 0));
        prop_assert!(stats.media_ranking.iter().all(|r| r.total > 0));
    }

    /// Histograms cover every counted message exactly once
    #[test]
    fn histograms_sum_to_total(messages in arb_messages(50)) {
        let stats = compute_stats(&messages);
        prop_assert_eq!(stats.hourly_activity.iter().sum::<usize>(), stats.total_messages);
        prop_assert_eq!(stats.weekday_activity.iter().sum::<usize>(), stats.total_messages);
    }

    /// Equal counts keep first-appearance order
    #[test]
    fn ranking_ties_keep_first_appearance(messages in arb_messages(50)) {
        let stats = compute_stats(&messages);
        let first_seen = |name: &str| {
            messages
                .iter()
                .filter(|m| !m.is_system())
                .position(|m| m.sender == name)
        };
        for pair in stats.ranking.windows(2) {
            if pair[0].count == pair[1].count {
                prop_assert!(first_seen(&pair[0].name) < first_seen(&pair[1].name));
            }
        }
    }

    // ============================================
    // FILTER PROPERTIES
    // ============================================

    /// No filter means passthrough
    #[test]
    fn no_filter_is_passthrough(messages in arb_messages(30)) {
        let original = messages.clone();
        let filtered = apply_filters(messages, &FilterConfig::new());
        prop_assert_eq!(filtered, original);
    }

    /// Hour filter keeps exactly the hours in [start, end)
    #[test]
    fn hour_filter_is_half_open(
        messages in arb_messages(30),
        start in 0u32..24,
        len in 1u32..24,
    ) {
        let end = (start + len).min(24);
        let range = HourRange::new(start, end).unwrap();
        let expected = messages.iter().filter(|m| (start..end).contains(&m.hour())).count();

        let filtered = apply_filters(messages, &FilterConfig::new().with_hour_range(range));
        prop_assert_eq!(filtered.len(), expected);
        prop_assert!(filtered.iter().all(|m| m.hour() >= start && m.hour() < end));
    }

    /// Date bounds are inclusive whole days
    #[test]
    fn date_filter_within_bounds(messages in arb_messages(30), a in 1u32..32, b in 1u32..32) {
        let (first, last) = (a.min(b), a.max(b));
        let first = NaiveDate::from_ymd_opt(2024, 5, first).unwrap();
        let last = NaiveDate::from_ymd_opt(2024, 5, last).unwrap();

        let expected = messages.iter().filter(|m| m.date() >= first && m.date() <= last).count();
        let filtered = apply_filters(messages, &FilterConfig::new().with_days(first, last));

        prop_assert_eq!(filtered.len(), expected);
    }

    /// Sender filter ignores ASCII case
    #[test]
    fn sender_filter_only_keeps_matching(messages in arb_messages(30)) {
        let filtered = apply_filters(messages, &FilterConfig::new().with_sender("ALICE"));
        prop_assert!(filtered.iter().all(|m| m.sender == "Alice"));
    }
}
