//! The submit path, kept free of both the terminal and the real network so
//! it can run against fake transports in tests.

use crate::api::{AskTransport, Query};
use crate::app::App;
use crate::config::Config;
use crate::error::AskError;

/// Validation gate and entry into the loading state. Returns the query to
/// send, or `None` when the trimmed question is empty (no state change, no
/// request). Split from [`perform`] so the caller can draw the loading
/// frame before awaiting the round-trip.
pub fn prepare(app: &mut App, config: &Config) -> Option<Query> {
    let question = app.input.trim().to_string();
    if question.is_empty() {
        app.set_notice(&AskError::EmptyQuestion.user_message());
        return None;
    }

    let query = Query::new(
        config,
        app.selected_subject(),
        app.selected_chapter(),
        &question,
    );
    app.push_question(&query.question);
    app.set_loading();
    Some(query)
}

/// Exactly one transport call, then cleanup on every path.
pub async fn perform(app: &mut App, transport: &dyn AskTransport, query: &Query) {
    match transport.send(query).await {
        Ok(answer) => app.push_answer(answer),
        Err(err) => {
            tracing::warn!("ask failed: {}", err);
            app.push_error(&err);
        }
    }
    app.finish_submit();
}
