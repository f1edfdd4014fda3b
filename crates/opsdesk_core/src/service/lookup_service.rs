//! Free-text lookup service.
//!
//! # Responsibility
//! - Answer one question with at most one store round-trip.
//! - Map every repository outcome onto a fixed reply string.
//!
//! # Invariants
//! - Blank input never reaches the store.
//! - Raw store errors go to the operator log, never into the reply.
//! - Replies are always one of the fixed strings or the two-line match
//!   rendering; there is no other output shape.
//!
//! # See also
//! - docs/architecture/lookup-flow.md

use crate::model::process::ProcessMatch;
use crate::repo::process_repo::{ProcessRepository, RepoError};
use log::{error, info};

/// Reply for blank input.
pub const PROMPT_REPLY: &str = "Please enter a question.";

/// Reply when the store cannot be reached.
pub const NO_CONNECTION_REPLY: &str = "Sorry, I couldn't connect to the database.";

/// Reply when no record matches the question.
pub const NO_MATCH_REPLY: &str = "Sorry, I couldn't find any relevant information.";

/// Reply when the match query fails after connecting.
pub const QUERY_FAILURE_REPLY: &str =
    "Sorry, I encountered an error while processing your request.";

/// Free-text lookup facade over a process repository.
pub struct LookupService<R: ProcessRepository> {
    repo: R,
}

impl<R: ProcessRepository> LookupService<R> {
    /// Creates a service over the given repository backend.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Answers one free-text question.
    ///
    /// Input is trimmed first; blank input returns [`PROMPT_REPLY`] without
    /// touching the store. A match renders as
    /// `"Title: <title>\nContent: <content>"`. Store failures map to
    /// [`NO_CONNECTION_REPLY`] or [`QUERY_FAILURE_REPLY`]; the repository is
    /// asked exactly once, with no retry.
    pub async fn answer(&self, user_input: &str) -> String {
        let question = user_input.trim();
        if question.is_empty() {
            return PROMPT_REPLY.to_string();
        }

        info!(
            "event=lookup_answer module=service status=start input_chars={}",
            question.chars().count()
        );

        match self.repo.find_first_match(question).await {
            Ok(Some(found)) => {
                info!("event=lookup_answer module=service status=ok matched=true");
                format_match(&found)
            }
            Ok(None) => {
                info!("event=lookup_answer module=service status=ok matched=false");
                NO_MATCH_REPLY.to_string()
            }
            Err(RepoError::Connection(err)) => {
                error!(
                    "event=lookup_answer module=service status=error \
                     error_code=no_connection error={err}"
                );
                NO_CONNECTION_REPLY.to_string()
            }
            Err(err) => {
                error!(
                    "event=lookup_answer module=service status=error \
                     error_code=query_failed error={err}"
                );
                QUERY_FAILURE_REPLY.to_string()
            }
        }
    }
}

/// Renders a match in the fixed two-line reply shape.
pub fn format_match(found: &ProcessMatch) -> String {
    format!("Title: {}\nContent: {}", found.title, found.content)
}

#[cfg(test)]
mod tests {
    use super::format_match;
    use crate::model::process::ProcessMatch;

    #[test]
    fn match_renders_as_two_labeled_lines() {
        let found = ProcessMatch {
            title: "Login Issues".to_string(),
            content: "Reset the password from the admin panel.".to_string(),
        };
        assert_eq!(
            format_match(&found),
            "Title: Login Issues\nContent: Reset the password from the admin panel."
        );
    }

    #[test]
    fn rendering_preserves_newlines_inside_content() {
        let found = ProcessMatch {
            title: "Backups".to_string(),
            content: "Step one.\nStep two.".to_string(),
        };
        assert_eq!(
            format_match(&found),
            "Title: Backups\nContent: Step one.\nStep two."
        );
    }
}
