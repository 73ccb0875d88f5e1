use std::fmt::Write;

use crate::models::SanitizedRecord;

/// Default number of records placed in the prompt context
pub const MAX_CONTEXT_RECORDS: usize = 5;

/// Answer returned when there is nothing to ground a response on
pub const NO_RESULTS_SENTINEL: &str = "No relevant articles found to process.";

pub const PREAMBLE: &str = "\
You are a legal assistant helping marginalized communities in India understand legal information.
Based on the following articles and the user's query, provide a concise, easy-to-understand response in simple language.
Avoid legal jargon and focus on clarity. Act as an agent by directly addressing the user's query, summarizing key points, and guiding the user on practical next steps they can take to address their situation.
If the articles don't fully answer the query, provide a general explanation and suggest actionable steps, such as contacting a local lawyer, visiting a police station, or seeking help from a legal aid organization.";

/// Builds the synthesis prompt from the first `max_records` records.
pub fn build_prompt(query: &str, records: &[SanitizedRecord], max_records: usize) -> String {
    let mut prompt = String::with_capacity(PREAMBLE.len() + query.len() + 256);
    prompt.push_str(PREAMBLE);
    prompt.push_str("\n\nUser Query: ");
    prompt.push_str(query);
    prompt.push_str("\n\nArticles:\n");

    for record in records.iter().take(max_records) {
        // Writing to a String cannot fail.
        let _ = write!(
            prompt,
            "Title: {}\nContent: {}\n\n",
            record.title, record.content
        );
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<SanitizedRecord> {
        (0..n)
            .map(|i| SanitizedRecord {
                title: format!("Title {i}"),
                content: format!("Body {i}"),
            })
            .collect()
    }

    #[test]
    fn test_prompt_contains_preamble_query_and_records() {
        let prompt = build_prompt("Can police detain me overnight?", &records(2), 5);
        assert!(prompt.starts_with("You are a legal assistant"));
        assert!(prompt.contains("User Query: Can police detain me overnight?"));
        assert!(prompt.contains("Title: Title 0\nContent: Body 0"));
        assert!(prompt.contains("Title: Title 1\nContent: Body 1"));
    }

    #[test]
    fn test_preamble_instructs_agent_style_answer() {
        let prompt = build_prompt("q", &records(1), 5);
        assert!(prompt.contains(
            "Act as an agent by directly addressing the user's query, summarizing key points, \
             and guiding the user on practical next steps"
        ));
    }

    #[test]
    fn test_prompt_caps_context_records() {
        let prompt = build_prompt("q", &records(20), MAX_CONTEXT_RECORDS);
        assert_eq!(prompt.matches("Title: ").count(), MAX_CONTEXT_RECORDS);
        assert!(prompt.contains("Title 4"));
        assert!(!prompt.contains("Title 5"));
    }

    #[test]
    fn test_prompt_keeps_input_order() {
        let prompt = build_prompt("q", &records(3), 5);
        let first = prompt.find("Title 0").unwrap();
        let last = prompt.find("Title 2").unwrap();
        assert!(first < last);
    }
}
