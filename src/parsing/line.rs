//! Line grammar of a LINE chat-history export.
//!
//! ```text
//! 2024/05/20(Mon)                 <- date header
//! 13:30<TAB>Alice Wu<TAB>Hello    <- message, tab form
//! 13:31 Bob See you               <- message, space form (sender without spaces)
//! second paragraph                <- continuation of the previous message
//! ```
//!
//! The system event form (`HH:MM <event phrase>`, sender `System`) is tried
//! last, after the space form has had its chance at the same line.
//!
//! Every function here is stateless; the caller supplies the active date.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use super::classify::is_system_phrase;

/// `YYYY{sep}M{M}{sep}D{D}` at the start of a line, `sep` one of `/ - .`.
static DATE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4}[/\-.][0-9]{1,2}[/\-.][0-9]{1,2})").unwrap());

static TIME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}:[0-9]{2}$").unwrap());

static TIME_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}:[0-9]{2}").unwrap());

// HH:MM, one sender token, remainder
static SPACE_FORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2}:[0-9]{2})\s+(\S+)\s*(.*)").unwrap());

static SYSTEM_FORM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2}:[0-9]{2})\s+(.+)$").unwrap());

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Returns the normalized date of a header line, with `-` and `.` replaced by `/`.
///
/// Trailing text such as a `(Mon)` weekday annotation is ignored.
///
/// ```
/// use linestats::parsing::match_date_header;
///
/// assert_eq!(match_date_header("2024-05-20(Mon)").as_deref(), Some("2024/05/20"));
/// assert_eq!(match_date_header("2024.5.7 Tuesday").as_deref(), Some("2024/5/7"));
/// assert_eq!(match_date_header("13:30\tAlice\tHi"), None);
/// ```
pub fn match_date_header(line: &str) -> Option<String> {
    DATE_HEADER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace(['-', '.'], "/"))
}

/// Returns `true` if the line begins with an `H:MM` / `HH:MM` shaped token.
pub fn starts_with_time(line: &str) -> bool {
    TIME_PREFIX.is_match(line)
}

/// Returns `true` if `token` is exactly `H:MM` or `HH:MM`.
pub fn is_time_token(token: &str) -> bool {
    TIME_TOKEN.is_match(token)
}

/// Combines a normalized header date with a time token.
///
/// Returns `None` when the pair is not a real calendar time, e.g. month 13,
/// February 30th or `25:00`.
pub fn build_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), TIMESTAMP_FORMAT).ok()
}

/// Which line shape produced a [`MessageCandidate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageForm {
    /// `HH:MM<TAB>Sender<TAB>Content`; the sender may contain spaces.
    Tab,
    /// `HH:MM Sender Content`; the sender is a single token.
    Space,
    /// `HH:MM <system event phrase>`; synthesized sender.
    SystemEvent,
}

/// A line that has the shape of a message start.
///
/// The candidate only becomes a message once its time combines with the
/// active date into a valid timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageCandidate<'a> {
    pub form: MessageForm,
    pub time: &'a str,
    pub sender: &'a str,
    pub content: &'a str,
}

/// Tab form. Fields after the sender keep their tabs.
fn tab_form(line: &str) -> Option<MessageCandidate<'_>> {
    let mut fields = line.splitn(3, '\t');
    let time = fields.next()?;
    let sender = fields.next()?;
    if !is_time_token(time) || sender.is_empty() {
        return None;
    }

    Some(MessageCandidate {
        form: MessageForm::Tab,
        time,
        sender,
        content: fields.next().unwrap_or_default(),
    })
}

fn space_form(line: &str) -> Option<MessageCandidate<'_>> {
    let caps = SPACE_FORM.captures(line)?;
    Some(MessageCandidate {
        form: MessageForm::Space,
        time: caps.get(1)?.as_str(),
        sender: caps.get(2)?.as_str(),
        content: caps.get(3).map_or("", |m| m.as_str()),
    })
}

fn system_event_form(line: &str) -> Option<MessageCandidate<'_>> {
    let caps = SYSTEM_FORM.captures(line)?;
    let rest = caps.get(2)?.as_str();
    if rest.contains('\t') || !is_system_phrase(rest) {
        return None;
    }

    Some(MessageCandidate {
        form: MessageForm::SystemEvent,
        time: caps.get(1)?.as_str(),
        sender: crate::message::SYSTEM_SENDER,
        content: rest,
    })
}

type FormFn = fn(&str) -> Option<MessageCandidate<'_>>;

/// Message forms in priority order.
const MESSAGE_FORMS: [FormFn; 3] = [tab_form, space_form, system_event_form];

/// Yields every message form the trimmed line satisfies, preferred form first.
///
/// The caller takes the first candidate whose timestamp is valid.
///
/// ```
/// use linestats::parsing::{MessageForm, message_candidates};
///
/// let first = message_candidates("13:30\tAlice Wu\tHello there").next().unwrap();
/// assert_eq!(first.form, MessageForm::Tab);
/// assert_eq!(first.sender, "Alice Wu");
/// assert_eq!(first.content, "Hello there");
/// ```
pub fn message_candidates(line: &str) -> impl Iterator<Item = MessageCandidate<'_>> {
    MESSAGE_FORMS.into_iter().filter_map(move |form| form(line))
}
