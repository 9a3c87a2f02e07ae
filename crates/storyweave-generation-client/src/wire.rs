//! JSON bodies exchanged with the generation backend.

use serde::{Deserialize, Serialize};
use storyweave_core::generation::{GenerationReply, GenerationRequest};

/// Body of `POST /story/start` and `POST /story/continue`.
#[derive(Debug, Serialize)]
pub struct StoryRequestBody<'a> {
    /// The trimmed user contribution.
    pub user_input: &'a str,
    /// Continuity token, omitted when the backend never issued one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

impl<'a> From<&'a GenerationRequest> for StoryRequestBody<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            user_input: &request.user_input,
            session_id: request.session_token.as_deref(),
        }
    }
}

/// Body returned by both endpoints.
#[derive(Debug, Deserialize)]
pub struct StoryResponseBody {
    /// The authoritative transcript so far.
    pub story_so_far: String,
    /// The newly generated continuation.
    pub ai_part: String,
    /// Continuity token, if the backend tracks stories per session.
    #[serde(default)]
    pub session_id: Option<String>,
}

impl From<StoryResponseBody> for GenerationReply {
    fn from(body: StoryResponseBody) -> Self {
        Self {
            narrative_so_far: body.story_so_far,
            ai_continuation: body.ai_part,
            session_token: body.session_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_omits_missing_session_id() {
        let request = GenerationRequest::new("a castle");

        let json = serde_json::to_value(StoryRequestBody::from(&request)).unwrap();

        assert_eq!(json, serde_json::json!({ "user_input": "a castle" }));
    }

    #[test]
    fn test_request_body_includes_session_id_when_present() {
        let request = GenerationRequest::new("next").with_session_token(Some("abc".to_owned()));

        let json = serde_json::to_value(StoryRequestBody::from(&request)).unwrap();

        assert_eq!(json["session_id"], "abc");
    }

    #[test]
    fn test_response_body_without_session_id_parses() {
        let body: StoryResponseBody =
            serde_json::from_str(r#"{"story_so_far":"s","ai_part":"a"}"#).unwrap();

        let reply = GenerationReply::from(body);

        assert_eq!(reply.narrative_so_far, "s");
        assert_eq!(reply.ai_continuation, "a");
        assert_eq!(reply.session_token, None);
    }

    #[test]
    fn test_response_body_missing_ai_part_is_rejected() {
        let result = serde_json::from_str::<StoryResponseBody>(r#"{"story_so_far":"s"}"#);

        assert!(result.is_err());
    }
}
