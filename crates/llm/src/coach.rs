use coach_core::{CoachMessage, SuggestedAction};
use serde::Serialize;

use crate::ai_types::{ChatRequest, Message};
use crate::client::LlmClient;
use crate::error::LlmError;
use crate::prompt::{CoachContext, build_system_prompt, extract_suggested_actions, next_step_label};

/// Coach answer plus the follow-ups derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachReply {
    pub reply: String,
    pub suggested_actions: Vec<SuggestedAction>,
    pub next_step: String,
}

impl LlmClient {
    /// Assemble the message list for one exchange: system prompt, prior
    /// history (oldest first), then the new user message.
    #[must_use]
    pub fn coach_request(
        &self,
        ctx: &CoachContext,
        user_message: &str,
        history: &[CoachMessage],
    ) -> ChatRequest {
        let mut messages = Vec::with_capacity(history.len().saturating_add(2));
        messages.push(Message::new("system", build_system_prompt(ctx)));
        messages.extend(history.iter().map(|m| Message::new(m.role.as_str(), m.content.clone())));
        messages.push(Message::new("user", user_message));
        ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// One coaching exchange against the upstream model.
    ///
    /// # Errors
    /// Any transport, status, parse or empty-choice failure from
    /// [`LlmClient::chat_completion`]. Not retried.
    pub async fn coach_chat(
        &self,
        ctx: &CoachContext,
        user_message: &str,
        history: &[CoachMessage],
    ) -> Result<CoachReply, LlmError> {
        let request = self.coach_request(ctx, user_message, history);
        tracing::debug!(
            mode = %ctx.mode,
            history_len = history.len(),
            model = %self.model,
            "sending coach request"
        );
        let reply = self.chat_completion(&request).await?;
        Ok(CoachReply {
            suggested_actions: extract_suggested_actions(&reply, ctx.mode),
            next_step: next_step_label(ctx.mode).to_owned(),
            reply,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use coach_core::{InteractionMode, LlmSettings, MessageRole};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> LlmClient {
        let settings = LlmSettings {
            api_key: Some("test-key".to_owned()),
            base_url: server.uri(),
            model: "test-model".to_owned(),
            ..LlmSettings::default()
        };
        LlmClient::new("test-key".to_owned(), &settings).unwrap()
    }

    fn completion(content: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{
                "message": { "content": content, "role": "assistant" }
            }]
        }))
    }

    #[test]
    fn test_request_orders_system_history_user() {
        let settings = LlmSettings { api_key: Some("k".to_owned()), ..LlmSettings::default() };
        let client = LlmClient::new("k".to_owned(), &settings).unwrap();
        let now = Utc::now();
        let history = vec![
            CoachMessage::new(MessageRole::User, "Ahoj", now),
            CoachMessage::new(MessageRole::Assistant, "Ahoj, jak se máš?", now),
        ];
        let ctx = CoachContext::new("Jana", 1, InteractionMode::Onboarding);
        let request = client.coach_request(&ctx, "Mám toho moc", &history);

        let roles: Vec<_> = request.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(request.messages[3].content, "Mám toho moc");
        assert_eq!(request.max_tokens, 1000);
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_coach_chat_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({ "model": "test-model", "max_tokens": 1000 })))
            .respond_with(completion("Naplánujme focus bloky na úterý."))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let ctx = CoachContext::new("Jana", 2, InteractionMode::WeeklyPlanning);
        let reply = client.coach_chat(&ctx, "Co mám dělat?", &[]).await.unwrap();

        assert_eq!(reply.reply, "Naplánujme focus bloky na úterý.");
        assert_eq!(reply.suggested_actions.len(), 1);
        assert_eq!(reply.suggested_actions[0].action, "save_weekly_plan");
        assert_eq!(reply.next_step, "Ulož týdenní plán a začni sledovat focus bloky");
    }

    #[tokio::test]
    async fn test_error_status_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let ctx = CoachContext::new("Jana", 1, InteractionMode::AdHoc);
        let err = client.coach_chat(&ctx, "Ahoj", &[]).await.unwrap_err();
        assert!(matches!(err, LlmError::HttpStatus { code: 503, .. }));
    }

    #[tokio::test]
    async fn test_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let ctx = CoachContext::new("Jana", 1, InteractionMode::AdHoc);
        let err = client.coach_chat(&ctx, "Ahoj", &[]).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_unparsable_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let ctx = CoachContext::new("Jana", 1, InteractionMode::AdHoc);
        let err = client.coach_chat(&ctx, "Ahoj", &[]).await.unwrap_err();
        assert!(matches!(err, LlmError::JsonParse { .. }));
    }
}
