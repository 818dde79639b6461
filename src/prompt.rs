//! Regeneration-prompt assembly for the generation collaborator.
//!
//! When upstream content fails validation, the collaborator gets one
//! amended instruction for its retry attempt: the original instruction,
//! the exact problems found, and the payload that produced them. This is
//! the only interface the core exposes back toward the producer.

/// Longest previous-payload excerpt included in a prompt.
const MAX_PAYLOAD_EXCERPT: usize = 2000;

/// Build an amended instruction for a regeneration attempt.
pub fn regeneration_prompt(instruction: &str, errors: &[String], previous_payload: &str) -> String {
    let mut out = String::new();
    out.push_str(instruction.trim());
    out.push_str("\n\nYour previous response was rejected for these problems:\n");
    for (i, error) in errors.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, error));
    }

    out.push_str("\nThe rejected response was:\n");
    let excerpt: String = previous_payload.chars().take(MAX_PAYLOAD_EXCERPT).collect();
    out.push_str(&excerpt);
    if previous_payload.chars().count() > MAX_PAYLOAD_EXCERPT {
        out.push_str("\n[truncated]");
    }

    out.push_str(
        "\n\nReturn a corrected response that fixes every problem listed above. \
         Respond with the content only, in the same format as originally requested.",
    );
    out
}
