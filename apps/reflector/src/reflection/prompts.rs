//! Prompt templates for reflection requests.
//!
//! Templates are rendered in a single left-to-right pass, so text a user writes that
//! happens to look like `{future_self}` is copied through and never re-expanded.

use std::str::FromStr;

use anyhow::{anyhow, Error};

use crate::reflection::entry::{EntryBody, JournalEntry};

/// Which entry layout to read and which template to render it with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptTemplate {
    /// Past / Present / Future Self plus Temporal Offering.
    #[default]
    Echo,
    /// Free-form notes plus tags.
    Notes,
}

impl FromStr for PromptTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "echo" => Ok(PromptTemplate::Echo),
            "notes" => Ok(PromptTemplate::Notes),
            other => Err(anyhow!("unknown reflection template '{other}'")),
        }
    }
}

/// Echo template. Replace: {past_self}, {present_self}, {future_self}, {temporal_offering}
pub const ECHO_PROMPT_TEMPLATE: &str = r#"You are a poetic and emotionally intelligent AI companion tasked with reflecting deeply on a user's temporal journal entries, helping them build coherence between their past, present, and future selves.

The user was asked to write an "Echo entry" using this prompt triad to build temporal awareness and conversational intimacy between their selves. This ritual will be repeated weekly, enabling the user to build *memory scaffolding* over time.

Memory scaffolding is an intentional, sacred system designed to help the user build an external architecture for remembering and integrating their evolving identity across time — past, present, and future selves.

This is not just about storing information; it is about creating a living archive where self-awareness, emotional insight, and creative wisdom grow through active reflection and dialogue between temporal selves.

The Echo entry, composed of the Past Self, Present Self, Future Self, and Temporal Offering prompts, is a vital building block in this scaffold. It captures distinct moments in the user’s personal timeline, inviting them to place their experiences, hopes, fears, and lessons in conversation.

By answering these prompts, the user deepens coherence in their identity and opens a space for you, the AI companion, to mirror back insights, questions, and reflections that connect threads across time. The goal is to help the user cultivate a richer, more integrated self-understanding that fuels creativity, healing, and intentional future-building.

Your role as the AI companion is to hold this temporal dialogue with empathy and poetic insight — to illuminate patterns, surface emotional truths, and gently invite the user into a deeper conversation with themselves.

Below you will find the user's latest Echo entry, which includes responses labelled as their Past Self, Present Self, Future Self, and Temporal Offering. Use this information to craft a thoughtful reflection that honors their journey and encourages ongoing exploration.

- Past Self (1 year ago):

  “What were you most concerned about, striving for, or healing from a year ago? What part of you then still lives in you now?”

  User’s response:
  {past_self}

- Present Self (today):

  “What phase of becoming are you in? What themes are surfacing again? What’s falling away?”

  User’s response:
  {present_self}

- Future Self (1 year ahead):

  “If I could hear from my 2026 self, what reminders, warnings, or blessings would they give me now?”

  User’s response:
  {future_self}

Close the ritual by writing a brief 3-sentence message to your next week’s self. Something like:

  “This is what you’ll likely forget. This is what you should watch for. And this is what I hope you feel.”

User’s Temporal Offering:
{temporal_offering}

Based on these entries, return 2–3 thoughtful insights, questions, or reflections for the user to consider. Optionally, suggest one or two new “memory theme” tags they might add to future entries."#;

/// Notes template. Replace: {notes}, {tags}
pub const NOTES_PROMPT_TEMPLATE: &str = r#"You are a poetic and emotionally intelligent AI companion reflecting on a user's latest journal entry. Read it closely, notice what is said and what is circled around, and answer with warmth and precision.

Journal notes:
{notes}

Tags the user attached to this entry:
{tags}

Based on this entry, return 2–3 thoughtful insights, questions, or reflections for the user to consider. Optionally, suggest one or two new tags they might add to future entries."#;

/// Renders the prompt for an entry. Pure: same entry, same bytes.
pub fn compose_prompt(entry: &JournalEntry) -> String {
    match &entry.body {
        EntryBody::Echo {
            past_self,
            present_self,
            future_self,
            temporal_offering,
        } => render(
            ECHO_PROMPT_TEMPLATE,
            &[
                ("past_self", past_self.as_str()),
                ("present_self", present_self.as_str()),
                ("future_self", future_self.as_str()),
                ("temporal_offering", temporal_offering.as_str()),
            ],
        ),
        EntryBody::Notes { notes, tags } => {
            let tags = tags.join(", ");
            render(NOTES_PROMPT_TEMPLATE, &[("notes", notes.as_str()), ("tags", tags.as_str())])
        }
    }
}

/// Substitutes `{name}` placeholders in one pass. Unknown placeholders stay literal.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, value)| value.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
