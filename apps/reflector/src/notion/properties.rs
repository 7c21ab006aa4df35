//! Typed view over Notion page properties.
//!
//! Properties are kept as raw JSON on the page and decoded one at a time, so a
//! malformed or renamed property resolves to `None` instead of failing the page.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

/// A database row as returned by the query endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
}

/// A single property value, discriminated by Notion's `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    RichText {
        #[serde(default)]
        rich_text: Vec<RichTextSegment>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Date {
        date: Option<DateValue>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichTextSegment {
    #[serde(default)]
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateValue {
    pub start: String,
}

impl Page {
    /// Decodes the named property, or `None` if it is absent or malformed.
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        let raw = self.properties.get(name)?;
        serde_json::from_value(raw.clone()).ok()
    }
}

/// First segment's content of a rich-text property, when non-empty.
pub fn text_property(page: &Page, name: &str) -> Option<String> {
    match page.property(name)? {
        PropertyValue::RichText { rich_text } => rich_text
            .into_iter()
            .next()
            .and_then(|segment| segment.text)
            .map(|text| text.content)
            .filter(|content| !content.is_empty()),
        _ => None,
    }
}

/// Option names of a multi-select property, in the order Notion returns them.
pub fn multi_select_property(page: &Page, name: &str) -> Option<Vec<String>> {
    match page.property(name)? {
        PropertyValue::MultiSelect { multi_select } => Some(
            multi_select
                .into_iter()
                .map(|option| option.name)
                .filter(|name| !name.is_empty())
                .collect(),
        ),
        _ => None,
    }
}

/// Calendar date of a date property's `start`. Datetimes are cut to their date.
pub fn date_property(page: &Page, name: &str) -> Option<NaiveDate> {
    match page.property(name)? {
        PropertyValue::Date { date: Some(date) } => {
            let day = date.start.get(..10)?;
            NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(properties: Value) -> Page {
        serde_json::from_value(json!({ "id": "page-1", "properties": properties })).unwrap()
    }

    #[test]
    fn test_text_property_returns_first_segment_content() {
        let page = page(json!({
            "Past Self": {
                "id": "a1",
                "type": "rich_text",
                "rich_text": [
                    { "type": "text", "text": { "content": "left my job", "link": null }, "plain_text": "left my job" },
                    { "type": "text", "text": { "content": " and moved" }, "plain_text": " and moved" }
                ]
            }
        }));
        assert_eq!(text_property(&page, "Past Self").as_deref(), Some("left my job"));
    }

    #[test]
    fn test_text_property_absent_is_none() {
        let page = page(json!({}));
        assert_eq!(text_property(&page, "Past Self"), None);
    }

    #[test]
    fn test_text_property_wrong_type_is_none() {
        let page = page(json!({
            "Past Self": { "type": "number", "number": 4 },
            "Present Self": { "type": "multi_select", "multi_select": [{ "name": "rest" }] }
        }));
        assert_eq!(text_property(&page, "Past Self"), None);
        assert_eq!(text_property(&page, "Present Self"), None);
    }

    #[test]
    fn test_text_property_empty_segments_or_content_is_none() {
        let page = page(json!({
            "Past Self": { "type": "rich_text", "rich_text": [] },
            "Present Self": { "type": "rich_text", "rich_text": [{ "text": { "content": "" } }] },
            "Future Self": { "type": "rich_text", "rich_text": [{ "type": "mention", "mention": {} }] }
        }));
        assert_eq!(text_property(&page, "Past Self"), None);
        assert_eq!(text_property(&page, "Present Self"), None);
        assert_eq!(text_property(&page, "Future Self"), None);
    }

    #[test]
    fn test_malformed_property_does_not_poison_others() {
        let page = page(json!({
            "Past Self": { "type": "rich_text", "rich_text": null },
            "Present Self": { "type": "rich_text", "rich_text": "not a list" },
            "Future Self": { "type": "rich_text", "rich_text": [{ "text": { "content": "trust the pause" } }] }
        }));
        assert_eq!(text_property(&page, "Past Self"), None);
        assert_eq!(text_property(&page, "Present Self"), None);
        assert_eq!(
            text_property(&page, "Future Self").as_deref(),
            Some("trust the pause")
        );
    }

    #[test]
    fn test_multi_select_property_keeps_order() {
        let page = page(json!({
            "Tags": {
                "type": "multi_select",
                "multi_select": [
                    { "id": "1", "name": "grief", "color": "blue" },
                    { "id": "2", "name": "", "color": "red" },
                    { "id": "3", "name": "rest", "color": "green" }
                ]
            }
        }));
        assert_eq!(
            multi_select_property(&page, "Tags"),
            Some(vec!["grief".to_string(), "rest".to_string()])
        );
    }

    #[test]
    fn test_multi_select_property_wrong_type_is_none() {
        let page = page(json!({
            "Tags": { "type": "rich_text", "rich_text": [{ "text": { "content": "grief" } }] }
        }));
        assert_eq!(multi_select_property(&page, "Tags"), None);
    }

    #[test]
    fn test_date_property_accepts_date_and_datetime() {
        let page = page(json!({
            "Date": { "type": "date", "date": { "start": "2025-03-09", "end": null } },
            "Created": { "type": "date", "date": { "start": "2025-03-09T21:15:00.000-05:00" } },
            "Empty": { "type": "date", "date": null }
        }));
        let expected = NaiveDate::from_ymd_opt(2025, 3, 9);
        assert_eq!(date_property(&page, "Date"), expected);
        assert_eq!(date_property(&page, "Created"), expected);
        assert_eq!(date_property(&page, "Empty"), None);
    }
}
