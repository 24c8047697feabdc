//! Message-type detection from content and sender text.
//!
//! Detection is table driven: [`TYPE_RULES`] is an ordered list of
//! `(matcher, type)` pairs and the first matching rule wins. Adding a locale
//! means adding strings to the tables, not touching control flow.
//!
//! Vocabularies cover the English, Traditional Chinese and Japanese variants
//! seen in LINE exports. Matching is case-sensitive.

use crate::message::MessageType;

/// How a rule inspects the trimmed content.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Content equals one of the strings.
    Exact(&'static [&'static str]),
    /// Content contains one of `any` and one of `with`.
    CoOccurs {
        any: &'static [&'static str],
        with: &'static [&'static str],
    },
    /// Content contains one of the strings.
    Contains(&'static [&'static str]),
}

impl Matcher {
    pub fn matches(&self, content: &str) -> bool {
        match *self {
            Matcher::Exact(words) => words.contains(&content),
            Matcher::CoOccurs { any, with } => {
                any.iter().any(|k| content.contains(k)) && with.iter().any(|k| content.contains(k))
            }
            Matcher::Contains(words) => words.iter().any(|k| content.contains(k)),
        }
    }
}

/// One row of the detection table.
#[derive(Debug, Clone, Copy)]
pub struct TypeRule {
    pub kind: MessageType,
    pub matcher: Matcher,
}

const STICKER: &[&str] = &["[Sticker]", "[貼圖]", "貼圖", "Sticker", "[スタンプ]"];

const IMAGE: &[&str] = &[
    "[Photo]", "[照片]", "[圖片]", "照片", "圖片", "Photo", "Image", "[画像]",
];

const VIDEO: &[&str] = &["[Video]", "[影片]", "影片", "Video", "[動画]"];

const FILE: &[&str] = &["[File]", "[檔案]", "檔案", "File", "[ファイル]"];

const UNSENT: &[&str] = &[
    "收回了訊息",
    "已收回訊息",
    "unsent a message",
    "unsent message",
];

/// Ordered detection table. Anything unmatched is [`MessageType::Text`].
pub const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        kind: MessageType::Sticker,
        matcher: Matcher::Exact(STICKER),
    },
    TypeRule {
        kind: MessageType::Image,
        matcher: Matcher::Exact(IMAGE),
    },
    TypeRule {
        kind: MessageType::Video,
        matcher: Matcher::Exact(VIDEO),
    },
    TypeRule {
        kind: MessageType::File,
        matcher: Matcher::Exact(FILE),
    },
    TypeRule {
        kind: MessageType::Call,
        matcher: Matcher::CoOccurs {
            any: &["Call"],
            with: &["Duration", "started", "Missed"],
        },
    },
    TypeRule {
        kind: MessageType::Call,
        matcher: Matcher::CoOccurs {
            any: &["通話"],
            with: &["通話時間", "開始", "未接"],
        },
    },
    TypeRule {
        kind: MessageType::Call,
        matcher: Matcher::Contains(&["☎"]),
    },
    TypeRule {
        kind: MessageType::System,
        matcher: Matcher::Contains(UNSENT),
    },
];

/// Membership and administrative event fragments.
pub const SYSTEM_PHRASES: &[&str] = &[
    "已加入聊天",
    "已離開聊天",
    "已邀請",
    "已移除",
    "更改了群組名稱",
    "更改了群組圖片",
    "joined the chat",
    "left the chat",
    "invited",
    "removed",
    "changed the group name",
    "changed the group photo",
    "收回了訊息",
    "已收回訊息",
    "unsent a message",
    "unsent message",
    "已建立記事本",
    "已建立相簿",
];

/// Detects the type of a message from its content alone.
///
/// ```
/// use linestats::parsing::detect_message_type;
/// use linestats::MessageType;
///
/// assert_eq!(detect_message_type(" [Sticker] "), MessageType::Sticker);
/// assert_eq!(detect_message_type("☎ Call time 0:42"), MessageType::Call);
/// assert_eq!(detect_message_type("Sticker shock!"), MessageType::Text);
/// ```
pub fn detect_message_type(content: &str) -> MessageType {
    let content = content.trim();
    TYPE_RULES
        .iter()
        .find(|rule| rule.matcher.matches(content))
        .map_or(MessageType::Text, |rule| rule.kind)
}

/// Returns `true` if the text contains a system-event phrase.
pub fn is_system_phrase(text: &str) -> bool {
    SYSTEM_PHRASES.iter().any(|phrase| text.contains(phrase))
}

/// Final type of a message: a system-phrase sender overrides the content.
pub fn classify_message(sender: &str, content: &str) -> MessageType {
    if is_system_phrase(sender) {
        MessageType::System
    } else {
        detect_message_type(content)
    }
}
