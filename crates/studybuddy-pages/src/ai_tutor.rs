//! AI tutor page
//!
//! Conversations with the tutor plus the generated study material
//! (flashcards, practice tests, summaries). Generation requests are sent
//! either a block of text or the id of an uploaded document.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use studybuddy_session::models::{
    Conversation, ConversationType, Flashcard, Message, MessageExchange, PracticeTest,
};
use studybuddy_session::{RequestOptions, SessionManager};

use crate::error::PageError;
use crate::loadable::Loadable;
use crate::{surface, Result};

/// Upper bound on flashcards or questions per generation request
pub const MAX_GENERATED_ITEMS: u32 = 20;

/// Material a generation request works from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudySource {
    Text(String),
    Document(i64),
}

impl StudySource {
    fn to_body(&self) -> Result<Map<String, Value>> {
        let mut body = Map::new();
        match self {
            StudySource::Text(text) if text.trim().is_empty() => {
                return Err(PageError::InvalidInput(
                    "Text content or document ID required".to_string(),
                ));
            }
            StudySource::Text(text) => {
                body.insert("text".to_string(), json!(text));
            }
            StudySource::Document(id) => {
                body.insert("document_id".to_string(), json!(id));
            }
        }
        Ok(body)
    }
}

fn clamp_count(count: u32) -> u32 {
    count.clamp(1, MAX_GENERATED_ITEMS)
}

async fn fetch_list<T: DeserializeOwned>(
    session: &SessionManager,
    list: &mut Loadable<Vec<T>>,
    endpoint: &str,
    field: &str,
) -> Result<()> {
    list.begin();

    let result = session
        .request_field::<Vec<T>>(endpoint, RequestOptions::get(), field)
        .await;

    match surface(session, result) {
        Ok(items) => {
            tracing::debug!(endpoint = %endpoint, count = items.len(), "Loaded list");
            list.finish(items);
            Ok(())
        }
        Err(e) => {
            list.fail();
            Err(e)
        }
    }
}

pub struct AiTutorPage {
    session: SessionManager,
    conversations: Loadable<Vec<Conversation>>,
    active: Option<i64>,
    messages: Vec<Message>,
    flashcards: Loadable<Vec<Flashcard>>,
    practice_tests: Loadable<Vec<PracticeTest>>,
}

impl AiTutorPage {
    pub fn new(session: SessionManager) -> Self {
        Self {
            session,
            conversations: Loadable::new(),
            active: None,
            messages: Vec::new(),
            flashcards: Loadable::new(),
            practice_tests: Loadable::new(),
        }
    }

    pub async fn load(&mut self) -> Result<&[Conversation]> {
        fetch_list(
            &self.session,
            &mut self.conversations,
            "/ai/conversations",
            "conversations",
        )
        .await?;
        Ok(self.conversations.data().as_slice())
    }

    /// Start a conversation and make it the active one. The backend picks a
    /// title when none is given.
    pub async fn create_conversation(
        &mut self,
        conversation_type: ConversationType,
        title: Option<&str>,
        room_id: Option<i64>,
    ) -> Result<Conversation> {
        let mut body = json!({ "type": conversation_type });
        if let Some(title) = title {
            body["title"] = json!(title);
        }
        if let Some(room_id) = room_id {
            body["room_id"] = json!(room_id);
        }

        let result = self
            .session
            .request_field::<Conversation>(
                "/ai/conversations",
                RequestOptions::post(body),
                "conversation",
            )
            .await;
        let conversation = surface(&self.session, result)?;

        tracing::info!(
            conversation_id = conversation.id,
            conversation_type = %conversation.conversation_type,
            "Created conversation"
        );

        self.conversations.data_mut().push(conversation.clone());
        self.active = Some(conversation.id);
        self.messages.clear();

        Ok(conversation)
    }

    /// Make `conversation_id` active and fetch its history
    pub async fn open(&mut self, conversation_id: i64) -> Result<&[Message]> {
        let result = self
            .session
            .request_field::<Vec<Message>>(
                &format!("/ai/conversations/{conversation_id}/messages"),
                RequestOptions::get(),
                "messages",
            )
            .await;
        let messages = surface(&self.session, result)?;

        self.active = Some(conversation_id);
        self.messages = messages;
        Ok(&self.messages)
    }

    pub async fn send_message(&mut self, content: &str) -> Result<MessageExchange> {
        if content.trim().is_empty() {
            return surface(
                &self.session,
                Err(PageError::InvalidInput(
                    "Message content is required".to_string(),
                )),
            );
        }
        let Some(conversation_id) = self.active else {
            return surface(&self.session, Err(PageError::NoActiveConversation));
        };

        let result = self
            .session
            .request_as::<MessageExchange>(
                &format!("/ai/conversations/{conversation_id}/messages"),
                RequestOptions::post(json!({ "content": content })),
            )
            .await;
        let exchange = surface(&self.session, result)?;

        tracing::debug!(conversation_id, "Message exchanged");
        self.messages.push(exchange.user_message.clone());
        self.messages.push(exchange.ai_message.clone());

        Ok(exchange)
    }

    pub async fn load_flashcards(&mut self) -> Result<&[Flashcard]> {
        fetch_list(
            &self.session,
            &mut self.flashcards,
            "/ai/flashcards",
            "flashcards",
        )
        .await?;
        Ok(self.flashcards.data().as_slice())
    }

    pub async fn generate_flashcards(
        &mut self,
        source: &StudySource,
        count: u32,
        category: Option<&str>,
    ) -> Result<Vec<Flashcard>> {
        let mut body = surface(&self.session, source.to_body())?;
        body.insert("count".to_string(), json!(clamp_count(count)));
        if let Some(category) = category {
            body.insert("category".to_string(), json!(category));
        }

        let result = self
            .session
            .request_field::<Vec<Flashcard>>(
                "/ai/generate-flashcards",
                RequestOptions::post(Value::Object(body)),
                "flashcards",
            )
            .await;
        let generated = surface(&self.session, result)?;

        tracing::info!(count = generated.len(), "Generated flashcards");
        self.session
            .notifier()
            .success(format!("Generated {} flashcards", generated.len()));

        self.flashcards.data_mut().extend(generated.iter().cloned());
        Ok(generated)
    }

    pub async fn review_flashcard(&mut self, flashcard_id: i64, correct: bool) -> Result<Flashcard> {
        let result = self
            .session
            .request_field::<Flashcard>(
                &format!("/ai/flashcards/{flashcard_id}/review"),
                RequestOptions::post(json!({ "correct": correct })),
                "flashcard",
            )
            .await;
        let reviewed = surface(&self.session, result)?;

        if let Some(card) = self
            .flashcards
            .data_mut()
            .iter_mut()
            .find(|card| card.id == reviewed.id)
        {
            *card = reviewed.clone();
        }

        Ok(reviewed)
    }

    pub async fn load_practice_tests(&mut self) -> Result<&[PracticeTest]> {
        fetch_list(
            &self.session,
            &mut self.practice_tests,
            "/ai/practice-tests",
            "practice_tests",
        )
        .await?;
        Ok(self.practice_tests.data().as_slice())
    }

    pub async fn generate_practice_test(
        &mut self,
        source: &StudySource,
        question_count: u32,
        title: Option<&str>,
    ) -> Result<PracticeTest> {
        let mut body = surface(&self.session, source.to_body())?;
        body.insert(
            "question_count".to_string(),
            json!(clamp_count(question_count)),
        );
        if let Some(title) = title {
            body.insert("title".to_string(), json!(title));
        }

        let result = self
            .session
            .request_field::<PracticeTest>(
                "/ai/generate-practice-test",
                RequestOptions::post(Value::Object(body)),
                "practice_test",
            )
            .await;
        let test = surface(&self.session, result)?;

        tracing::info!(practice_test_id = test.id, "Generated practice test");
        self.session
            .notifier()
            .success("Practice test generated");

        self.practice_tests.data_mut().push(test.clone());
        Ok(test)
    }

    pub async fn summarize(&self, source: &StudySource) -> Result<String> {
        let body = surface(&self.session, source.to_body())?;

        let result = self
            .session
            .request_field::<String>(
                "/ai/generate-summary",
                RequestOptions::post(Value::Object(body)),
                "summary",
            )
            .await;
        surface(&self.session, result)
    }

    pub fn conversations(&self) -> &[Conversation] {
        self.conversations.data()
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        let id = self.active?;
        self.conversations.data().iter().find(|c| c.id == id)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn flashcards(&self) -> &[Flashcard] {
        self.flashcards.data()
    }

    pub fn practice_tests(&self) -> &[PracticeTest] {
        self.practice_tests.data()
    }

    pub fn is_loading(&self) -> bool {
        self.conversations.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::signed_in;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn message(id: i64, role: &str, content: &str) -> Value {
        json!({"id": id, "conversation_id": 5, "role": role, "content": content})
    }

    fn flashcard(id: i64, times_reviewed: u32) -> Value {
        json!({
            "id": id,
            "question": format!("Q{id}"),
            "answer": format!("A{id}"),
            "difficulty": "medium",
            "category": "General",
            "times_reviewed": times_reviewed,
            "correct_count": 0
        })
    }

    #[test]
    fn test_source_body() {
        assert_eq!(
            StudySource::Document(3).to_body().unwrap(),
            json!({"document_id": 3}).as_object().unwrap().clone()
        );
        assert!(matches!(
            StudySource::Text("  ".to_string()).to_body(),
            Err(PageError::InvalidInput(_))
        ));
        assert_eq!(clamp_count(0), 1);
        assert_eq!(clamp_count(50), MAX_GENERATED_ITEMS);
    }

    #[tokio::test]
    async fn test_conversation_flow() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ai/conversations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "conversations": [{"id": 2, "title": "Old chat", "conversation_type": "qa"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/ai/conversations"))
            .and(body_json(json!({"type": "summary", "title": "Biology"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Conversation created",
                "conversation": {"id": 5, "title": "Biology", "conversation_type": "summary"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/ai/conversations/5/messages"))
            .and(body_json(json!({"content": "  What is mitosis?\n"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "user_message": message(10, "user", "What is mitosis?"),
                "ai_message": message(11, "assistant", "Cell division.")
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut page = AiTutorPage::new(signed_in(&server).await);
        assert_eq!(page.load().await.unwrap().len(), 1);

        let created = page
            .create_conversation(ConversationType::Summary, Some("Biology"), None)
            .await
            .unwrap();
        assert_eq!(created.conversation_type, ConversationType::Summary);
        assert_eq!(page.conversations().len(), 2);
        assert_eq!(page.active_conversation().unwrap().id, 5);

        page.send_message("  What is mitosis?\n").await.unwrap();
        let roles: Vec<_> = page.messages().iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["user", "assistant"]);
    }

    #[tokio::test]
    async fn test_send_message_validation() {
        let server = MockServer::start().await;
        let session = signed_in(&server).await;
        let mut page = AiTutorPage::new(session.clone());

        assert!(matches!(
            page.send_message("hello").await,
            Err(PageError::NoActiveConversation)
        ));
        assert!(matches!(
            page.send_message("   ").await,
            Err(PageError::InvalidInput(_))
        ));
        assert_eq!(
            session.notifier().drain().last().unwrap().message,
            "Message content is required"
        );
    }

    #[tokio::test]
    async fn test_open_loads_history() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ai/conversations/5/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "messages": [message(1, "user", "hi"), message(2, "assistant", "hello")]
            })))
            .mount(&server)
            .await;

        let mut page = AiTutorPage::new(signed_in(&server).await);
        let messages = page.open(5).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].content, "hello");
    }

    #[tokio::test]
    async fn test_generate_flashcards_clamps_and_appends() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ai/flashcards"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"flashcards": [flashcard(1, 0)]})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/ai/generate-flashcards"))
            .and(body_json(json!({"text": "Photosynthesis", "count": 20, "category": "Biology"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "flashcards": [flashcard(2, 0), flashcard(3, 0)]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut page = AiTutorPage::new(signed_in(&server).await);
        page.load_flashcards().await.unwrap();

        let generated = page
            .generate_flashcards(
                &StudySource::Text("Photosynthesis".to_string()),
                100,
                Some("Biology"),
            )
            .await
            .unwrap();
        assert_eq!(generated.len(), 2);
        assert_eq!(page.flashcards().len(), 3);
    }

    #[tokio::test]
    async fn test_review_replaces_listed_card() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ai/flashcards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "flashcards": [flashcard(1, 0), flashcard(2, 0)]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/ai/flashcards/2/review"))
            .and(body_json(json!({"correct": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Flashcard reviewed",
                "flashcard": flashcard(2, 1)
            })))
            .mount(&server)
            .await;

        let mut page = AiTutorPage::new(signed_in(&server).await);
        page.load_flashcards().await.unwrap();
        page.review_flashcard(2, true).await.unwrap();

        assert_eq!(page.flashcards()[0].times_reviewed, 0);
        assert_eq!(page.flashcards()[1].times_reviewed, 1);
    }

    #[tokio::test]
    async fn test_practice_tests_and_summary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ai/practice-tests"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"practice_tests": []})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/ai/generate-practice-test"))
            .and(body_json(json!({"document_id": 4, "question_count": 1})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "practice_test": {
                    "id": 8,
                    "title": "Generated Practice Test",
                    "questions": [{"question": "2+2?", "answer": "4"}],
                    "total_questions": 1
                }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/ai/generate-summary"))
            .and(body_json(json!({"text": "Long chapter"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"summary": "Short"})))
            .mount(&server)
            .await;

        let mut page = AiTutorPage::new(signed_in(&server).await);
        assert!(page.load_practice_tests().await.unwrap().is_empty());

        let test = page
            .generate_practice_test(&StudySource::Document(4), 0, None)
            .await
            .unwrap();
        assert_eq!(test.total_questions, 1);
        assert_eq!(page.practice_tests().len(), 1);

        let summary = page
            .summarize(&StudySource::Text("Long chapter".to_string()))
            .await
            .unwrap();
        assert_eq!(summary, "Short");
    }

    #[tokio::test]
    async fn test_empty_source_is_rejected_locally() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/ai/generate-flashcards"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"flashcards": []})))
            .expect(0)
            .mount(&server)
            .await;

        let session = signed_in(&server).await;
        let mut page = AiTutorPage::new(session.clone());

        let err = page
            .generate_flashcards(&StudySource::Text(String::new()), 5, None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Text content or document ID required");
    }
}
