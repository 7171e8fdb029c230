use chrono::{DateTime, Duration, Local};

use crate::app_state::{QueryEntry, ResponseState};

/// A saved conversation shown in the history panel. Seed data only in this
/// build; nothing in the live query flow creates, updates or deletes these.
#[derive(Debug, Clone)]
pub struct Chat {
    pub id: String,
    pub title: String,
    pub responses: Vec<QueryEntry>,
    pub created_at: DateTime<Local>,
}

pub fn seed_chats() -> Vec<Chat> {
    vec![
        Chat {
            id: "chat-news-up".to_string(),
            title: "News from Uttar Pradesh".to_string(),
            responses: vec![seeded_entry(
                "What are the latest news for Uttar Pradesh?",
                "Recent headlines cover infrastructure projects and the monsoon outlook.",
            )],
            created_at: Local::now() - Duration::days(2),
        },
        Chat {
            id: "chat-capitals".to_string(),
            title: "Indian capitals".to_string(),
            responses: vec![
                seeded_entry("What is the capital of India?", "New Delhi."),
                seeded_entry("What is the capital of Uttar Pradesh?", "Lucknow."),
            ],
            created_at: Local::now() - Duration::days(1),
        },
        Chat {
            id: "chat-population".to_string(),
            title: "Population questions".to_string(),
            responses: vec![seeded_entry(
                "What is the most populated state in India?",
                "Uttar Pradesh, with over 200 million residents.",
            )],
            created_at: Local::now(),
        },
    ]
}

fn seeded_entry(query: &str, answer: &str) -> QueryEntry {
    let mut entry = QueryEntry::new(query.to_string());
    entry.response = ResponseState::Received(answer.to_string());
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_chats_are_well_formed() {
        let chats = seed_chats();
        assert_eq!(chats.len(), 3);
        for chat in &chats {
            assert!(!chat.id.is_empty());
            assert!(!chat.title.is_empty());
            assert!(!chat.responses.is_empty());
            for entry in &chat.responses {
                assert!(!entry.query.trim().is_empty());
                assert!(matches!(entry.response, ResponseState::Received(_)));
            }
        }
    }
}
