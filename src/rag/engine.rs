//! The answer engine: prompt assembly and generation.

use crate::config::Prompts;
use crate::conversation::Query;
use crate::error::Result;
use crate::generation::Generator;
use crate::rag::ContextSource;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Per-request answer pipeline.
///
/// Immutable after construction; requests share one engine behind an `Arc`.
pub struct AnswerEngine {
    context: Box<dyn ContextSource>,
    generator: Arc<dyn Generator>,
    prompts: Prompts,
}

impl AnswerEngine {
    /// Create a new answer engine.
    pub fn new(
        context: Box<dyn ContextSource>,
        generator: Arc<dyn Generator>,
        prompts: Prompts,
    ) -> Self {
        Self {
            context,
            generator,
            prompts,
        }
    }

    /// Answer a query: select context, assemble the prompt, call the model.
    #[instrument(skip(self, query), fields(question = %query.question()))]
    pub async fn answer(&self, query: &Query) -> Result<String> {
        info!("Processing question");

        let knowledge = self.context.context_for(query.question()).await?;
        let prompt = self.assemble_prompt(&knowledge, query);

        self.generator.generate(&prompt).await
    }

    /// Fill the template slots.
    ///
    /// The knowledge and history slots are filled unconditionally; whether
    /// they get consulted for a given input is the model's decision, steered
    /// by the template policy.
    fn assemble_prompt(&self, knowledge: &str, query: &Query) -> String {
        let transcript = query.transcript();

        let history_section = if transcript.is_empty() {
            String::new()
        } else {
            let mut vars = HashMap::new();
            vars.insert("history".to_string(), transcript);
            self.prompts
                .render_with_custom(&self.prompts.answer.history_section, &vars)
        };

        let mut vars = HashMap::new();
        vars.insert("history_section".to_string(), history_section);
        vars.insert("knowledge".to_string(), knowledge.to_string());
        vars.insert("question".to_string(), query.question().to_string());

        self.prompts
            .render_with_custom(&self.prompts.answer.template, &vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::REFUSAL_SENTENCE;
    use crate::conversation::{ConversationHistory, ConversationTurn};
    use crate::knowledge::KnowledgeDocument;
    use crate::rag::FullDocumentContext;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Generator that records the prompt it was given.
    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
        reply: String,
    }

    impl RecordingGenerator {
        fn new(reply: &str) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                reply: reply.to_string(),
            }
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl Generator for RecordingGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    fn engine_with(generator: Arc<RecordingGenerator>) -> AnswerEngine {
        let doc = Arc::new(KnowledgeDocument::from_text(
            "Paket A, temel pakettir ve aylık 100 TL'dir.",
        ));
        AnswerEngine::new(
            Box::new(FullDocumentContext::new(doc)),
            generator,
            Prompts::default(),
        )
    }

    #[tokio::test]
    async fn test_prompt_contains_knowledge_question_and_policy() {
        let generator = Arc::new(RecordingGenerator::new("Aylık 100 TL'dir."));
        let engine = engine_with(generator.clone());

        let answer = engine
            .answer(&Query::Question("Paket A ne kadar?".to_string()))
            .await
            .unwrap();

        assert_eq!(answer, "Aylık 100 TL'dir.");

        let prompt = generator.last_prompt();
        assert!(prompt.contains("Paket A, temel pakettir ve aylık 100 TL'dir."));
        assert!(prompt.contains("Kullanıcının Sorusu: Paket A ne kadar?"));
        assert!(prompt.contains(REFUSAL_SENTENCE));
        // No history: the section slot renders away entirely
        assert!(!prompt.contains("Konuşma Geçmişi"));
        assert!(!prompt.contains("{{"));
    }

    #[tokio::test]
    async fn test_history_is_flattened_into_the_prompt() {
        let generator = Arc::new(RecordingGenerator::new("Aylık 100 TL'dir."));
        let engine = engine_with(generator.clone());

        let history = ConversationHistory::new(vec![
            ConversationTurn::user("Paket A nedir?"),
            ConversationTurn::assistant("Paket A, temel pakettir."),
            ConversationTurn::user("fiyatı ne kadar?"),
        ])
        .unwrap();

        engine.answer(&Query::History(history)).await.unwrap();

        let prompt = generator.last_prompt();
        assert!(prompt.contains("Konuşma Geçmişi:"));
        assert!(prompt.contains("Kullanıcı: Paket A nedir?"));
        assert!(prompt.contains("Asistan: Paket A, temel pakettir."));
        assert!(prompt.contains("Kullanıcının Sorusu: fiyatı ne kadar?"));
        // The active question must not leak into the transcript block
        assert!(!prompt.contains("Kullanıcı: fiyatı ne kadar?"));
    }

    #[tokio::test]
    async fn test_courtesy_phrase_still_gets_the_knowledge_slot() {
        // Policy lives in the prompt, not in code: even "teşekkürler" is sent
        // with the full knowledge slot and the model decides to ignore it.
        let generator = Arc::new(RecordingGenerator::new("Rica ederim!"));
        let engine = engine_with(generator.clone());

        engine
            .answer(&Query::Question("teşekkürler".to_string()))
            .await
            .unwrap();

        let prompt = generator.last_prompt();
        assert!(prompt.contains("Paket A, temel pakettir ve aylık 100 TL'dir."));
        assert!(prompt.contains("Kullanıcının Sorusu: teşekkürler"));
    }
}
