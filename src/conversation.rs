use crate::api::{ChatPayload, Generator};
use crate::i18n::Strings;
use chrono::{DateTime, Local};
use log::warn;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

/// One transcript entry. Append-only: never edited or removed after
/// creation.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub timestamp: DateTime<Local>,
    pub role: ChatRole,
    pub text: String,
    pub image_url: Option<String>,
}

impl ChatTurn {
    fn user(text: &str) -> Self {
        Self {
            timestamp: Local::now(),
            role: ChatRole::User,
            text: text.to_string(),
            image_url: None,
        }
    }

    fn model(text: &str, image_url: Option<String>) -> Self {
        Self {
            timestamp: Local::now(),
            role: ChatRole::Model,
            text: text.to_string(),
            image_url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    Text,
    Image,
}

/// What the spawned generation worker reports back.
#[derive(Debug)]
enum Outcome {
    Reply(String),
    Image(String),
    Failed(String),
}

/// Ordered transcript plus the in-flight request slot.
///
/// Loading is true exactly while the receiver half of a dispatched
/// request is held; because `submit` refuses input while loading,
/// requests are strictly serialized. The transcript persists across
/// panel close/reopen.
pub struct Conversation {
    pub turns: Vec<ChatTurn>,
    pub mode: ChatMode,
    reply_rx: Option<mpsc::UnboundedReceiver<Outcome>>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            turns: Vec::new(),
            mode: ChatMode::Text,
            reply_rx: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.reply_rx.is_some()
    }

    /// Dispatches a prompt to the generation backend. Blank input and
    /// input arriving while a request is in flight are silently
    /// ignored. Returns whether the prompt was accepted, so the shell
    /// knows to clear its input buffer.
    pub fn submit<G: Generator>(&mut self, text: &str, generator: &G) -> bool {
        let prompt = text.trim();
        if prompt.is_empty() || self.is_loading() {
            return false;
        }

        // Text mode sends the prior transcript; the new prompt rides
        // separately. Image mode sends only the prompt.
        let history: Vec<ChatPayload> = self
            .turns
            .iter()
            .map(|turn| ChatPayload {
                role: match turn.role {
                    ChatRole::User => "user".to_string(),
                    ChatRole::Model => "assistant".to_string(),
                },
                content: turn.text.clone(),
            })
            .collect();

        self.turns.push(ChatTurn::user(prompt));

        let (tx, rx) = mpsc::unbounded_channel();
        self.reply_rx = Some(rx);

        let generator = generator.clone();
        let prompt = prompt.to_string();
        let mode = self.mode;
        tokio::spawn(async move {
            let outcome = match mode {
                ChatMode::Text => match generator.generate_reply(&prompt, history).await {
                    Ok(reply) => Outcome::Reply(reply),
                    Err(e) => Outcome::Failed(e.to_string()),
                },
                ChatMode::Image => match generator.generate_image(&prompt).await {
                    Ok(url) => Outcome::Image(url),
                    Err(e) => Outcome::Failed(e.to_string()),
                },
            };
            let _ = tx.send(outcome);
        });

        true
    }

    /// Drains a finished request, if any. Called from the shell's tick
    /// loop. Every outcome, including a vanished worker, appends a
    /// model turn and releases the in-flight slot, so loading can
    /// never stick.
    pub fn poll(&mut self, strings: &Strings) -> Option<&ChatTurn> {
        let rx = self.reply_rx.as_mut()?;
        let turn = match rx.try_recv() {
            Ok(Outcome::Reply(text)) => ChatTurn::model(&text, None),
            Ok(Outcome::Image(url)) => ChatTurn::model(strings.image_ready, Some(url)),
            Ok(Outcome::Failed(reason)) => {
                warn!("generation failed: {reason}");
                ChatTurn::model(strings.generation_failed, None)
            }
            Err(mpsc::error::TryRecvError::Empty) => return None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                warn!("generation worker vanished");
                ChatTurn::model(strings.generation_failed, None)
            }
        };
        self.reply_rx = None;
        self.turns.push(turn);
        self.turns.last()
    }

    /// Latest model turn, for the listen/copy/save actions.
    pub fn last_model_turn(&self) -> Option<&ChatTurn> {
        self.turns.iter().rev().find(|t| t.role == ChatRole::Model)
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::i18n::{strings, Language};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct StubGenerator {
        reply: Result<String, String>,
        image: Result<String, String>,
        seen_history: Arc<Mutex<Option<usize>>>,
    }

    impl StubGenerator {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                image: Ok("https://img.test/a.png".to_string()),
                seen_history: Arc::new(Mutex::new(None)),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err("boom".to_string()),
                image: Err("boom".to_string()),
                seen_history: Arc::new(Mutex::new(None)),
            }
        }
    }

    #[async_trait]
    impl Generator for StubGenerator {
        async fn generate_reply(
            &self,
            _prompt: &str,
            history: Vec<ChatPayload>,
        ) -> Result<String, GenerationError> {
            *self.seen_history.lock().unwrap() = Some(history.len());
            self.reply
                .clone()
                .map_err(GenerationError::Malformed)
        }

        async fn generate_image(&self, _prompt: &str) -> Result<String, GenerationError> {
            self.image.clone().map_err(GenerationError::Malformed)
        }
    }

    /// A generator whose request never completes.
    #[derive(Clone)]
    struct HungGenerator;

    #[async_trait]
    impl Generator for HungGenerator {
        async fn generate_reply(
            &self,
            _prompt: &str,
            _history: Vec<ChatPayload>,
        ) -> Result<String, GenerationError> {
            std::future::pending().await
        }

        async fn generate_image(&self, _prompt: &str) -> Result<String, GenerationError> {
            std::future::pending().await
        }
    }

    async fn drain(conversation: &mut Conversation) {
        let table = strings(Language::En);
        for _ in 0..200 {
            if conversation.poll(table).is_some() {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        panic!("generation outcome never arrived");
    }

    #[tokio::test]
    async fn blank_input_is_a_silent_noop() {
        let mut conversation = Conversation::new();
        let stub = StubGenerator::replying("hi");
        assert!(!conversation.submit("", &stub));
        assert!(!conversation.submit("   ", &stub));
        assert!(conversation.turns.is_empty());
        assert!(!conversation.is_loading());
    }

    #[tokio::test]
    async fn submit_while_loading_is_a_noop() {
        let mut conversation = Conversation::new();
        assert!(conversation.submit("hello", &HungGenerator));
        assert!(conversation.is_loading());

        assert!(!conversation.submit("again", &HungGenerator));
        assert_eq!(conversation.turns.len(), 1);
    }

    #[tokio::test]
    async fn success_appends_the_reply_and_clears_loading() {
        let mut conversation = Conversation::new();
        let stub = StubGenerator::replying("salut");
        assert!(conversation.submit("hello", &stub));
        drain(&mut conversation).await;

        assert_eq!(conversation.turns.len(), 2);
        assert_eq!(conversation.turns[1].role, ChatRole::Model);
        assert_eq!(conversation.turns[1].text, "salut");
        assert!(!conversation.is_loading());
    }

    #[tokio::test]
    async fn failure_is_absorbed_as_a_localized_turn() {
        let mut conversation = Conversation::new();
        conversation.submit("hello", &StubGenerator::failing());
        drain(&mut conversation).await;

        assert_eq!(conversation.turns.len(), 2);
        assert_eq!(
            conversation.turns[1].text,
            strings(Language::En).generation_failed
        );
        assert!(!conversation.is_loading());
    }

    #[tokio::test]
    async fn image_mode_carries_the_reference_and_caption() {
        let mut conversation = Conversation::new();
        conversation.mode = ChatMode::Image;
        conversation.submit("a wolf", &StubGenerator::replying("unused"));
        drain(&mut conversation).await;

        let turn = conversation.turns.last().unwrap();
        assert_eq!(turn.image_url.as_deref(), Some("https://img.test/a.png"));
        assert_eq!(turn.text, strings(Language::En).image_ready);
    }

    #[tokio::test]
    async fn history_excludes_the_new_prompt() {
        let mut conversation = Conversation::new();
        let stub = StubGenerator::replying("one");
        conversation.submit("first", &stub);
        drain(&mut conversation).await;

        conversation.submit("second", &stub);
        drain(&mut conversation).await;

        // Second request saw the two earlier turns, not itself.
        assert_eq!(*stub.seen_history.lock().unwrap(), Some(2));
    }

    #[tokio::test]
    async fn transcript_survives_and_keeps_order() {
        let mut conversation = Conversation::new();
        let stub = StubGenerator::replying("pong");
        conversation.submit("ping", &stub);
        drain(&mut conversation).await;

        let roles: Vec<_> = conversation.turns.iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![ChatRole::User, ChatRole::Model]);
        assert_eq!(conversation.last_model_turn().unwrap().text, "pong");
    }
}
