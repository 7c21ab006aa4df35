//! Journal entries — the fields a template reads off a Notion page.

use chrono::NaiveDate;
use serde::Serialize;

use crate::notion::properties::{date_property, multi_select_property, text_property, Page};
use crate::notion::DATE_PROPERTY;
use crate::reflection::prompts::PromptTemplate;

pub const PAST_SELF: &str = "Past Self";
pub const PRESENT_SELF: &str = "Present Self";
pub const FUTURE_SELF: &str = "Future Self";
pub const TEMPORAL_OFFERING: &str = "Temporal Offering";
pub const NOTES: &str = "Notes";
pub const TAGS: &str = "Tags";

/// The latest journal row, reduced to what the prompt needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    pub id: String,
    pub date: Option<NaiveDate>,
    pub body: EntryBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryBody {
    /// Four-part temporal "Echo" entry.
    Echo {
        past_self: String,
        present_self: String,
        future_self: String,
        temporal_offering: String,
    },
    /// Free-form notes with tag labels.
    Notes { notes: String, tags: Vec<String> },
}

impl JournalEntry {
    /// Reads the fields `template` needs. Missing or malformed fields become empty.
    pub fn from_page(page: &Page, template: PromptTemplate) -> Self {
        let text = |name: &str| text_property(page, name).unwrap_or_default();

        let body = match template {
            PromptTemplate::Echo => EntryBody::Echo {
                past_self: text(PAST_SELF),
                present_self: text(PRESENT_SELF),
                future_self: text(FUTURE_SELF),
                temporal_offering: text(TEMPORAL_OFFERING),
            },
            PromptTemplate::Notes => EntryBody::Notes {
                notes: text(NOTES),
                tags: multi_select_property(page, TAGS).unwrap_or_default(),
            },
        };

        JournalEntry {
            id: page.id.clone(),
            date: date_property(page, DATE_PROPERTY),
            body,
        }
    }
}
