//! Language model gateway.
//!
//! Builds the persona and classification prompts and sends each as a single
//! user-role message through the configured `AIProvider`.

use std::sync::Arc;

use crate::ports::{AIError, AIProvider, CompletionRequest, PromptRole};

/// Returned when the provider produces nothing but whitespace.
pub const EMPTY_GENERATION_FALLBACK: &str = "No response generated.";

const PERSONA_INSTRUCTIONS: &str = "\
You are Clare, a compassionate and highly skilled CBT specialist.
Your role is to guide the user through their challenges with empathy and evidence-based cognitive-behavioral techniques.
Engage with the user thoughtfully and provide actionable advice.";

const CLASSIFICATION_INSTRUCTIONS: &str = "\
Classify the following message into one of these categories: General, FAQ, Suicide Risk.
Only output \"General\", \"FAQ\" or \"Suicide Risk\".
It is FAQ if it is a question about one of these:";

const FAQ_TOPICS: &[&str] = &[
    "How do I get started with the product?",
    "Can Clare help me with emotional problems, such as anxiety?",
    "Is this anonymous?",
    "Can I call anytime?",
    "It's my first time with a virtual assistant, how should I behave?",
    "Does Clare offer psychotherapy?",
    "Is Clare the right solution for me?",
    "Can talking to Clare replace my traditional therapy?",
    "Where can I leave a review?",
    "What is clare&me?",
    "Is Clare a human?",
    "How does it work?",
    "What can Clare do?",
    "Can I speak to Clare as I would with a human being?",
    "Are there any useful commands Clare understands, that will improve our communication?",
    "What are the costs of talking to Clare?",
    "How can I cancel my subscription?",
    "How can I edit my payment details? I used a PayPal account.",
    "How can I edit my payment details? I don't have a PayPal account.",
];

/// Prompt wrapping the formatted transcript for reply generation.
pub fn persona_prompt(transcript: &str) -> String {
    format!("{PERSONA_INSTRUCTIONS}\nHere is the user's input: \"{transcript}\"")
}

/// Prompt asking for the category of one message.
pub fn classification_prompt(message: &str) -> String {
    let topics: String = FAQ_TOPICS
        .iter()
        .map(|topic| format!("    * {topic}\n"))
        .collect();
    format!("{CLASSIFICATION_INSTRUCTIONS}\n{topics}Message: \"{message}\"\nCategory:")
}

/// Gateway to the external language model.
#[derive(Clone)]
pub struct LanguageModelGateway {
    provider: Arc<dyn AIProvider>,
}

impl LanguageModelGateway {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }

    /// Generates a reply to a formatted transcript.
    pub async fn generate(&self, transcript: &str) -> Result<String, AIError> {
        let reply = self.complete(persona_prompt(transcript)).await?;
        if reply.is_empty() {
            return Ok(EMPTY_GENERATION_FALLBACK.to_string());
        }
        Ok(reply)
    }

    /// Returns the model's category label for a message.
    pub async fn classify(&self, message: &str) -> Result<String, AIError> {
        let label = self.complete(classification_prompt(message)).await?;
        if label.is_empty() {
            return Ok(EMPTY_GENERATION_FALLBACK.to_string());
        }
        Ok(label)
    }

    async fn complete(&self, prompt: String) -> Result<String, AIError> {
        let request = CompletionRequest::new().with_message(PromptRole::User, prompt);
        let response = self.provider.complete(request).await?;
        tracing::debug!(
            provider = %self.provider.provider_info().name,
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            "Completion received"
        );
        Ok(response.content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;

    #[test]
    fn persona_prompt_embeds_transcript() {
        let prompt = persona_prompt("user: Hello");
        assert!(prompt.starts_with("You are Clare"));
        assert!(prompt.ends_with("Here is the user's input: \"user: Hello\""));
    }

    #[test]
    fn classification_prompt_lists_categories_and_topics() {
        let prompt = classification_prompt("Is Clare a human?");
        assert!(prompt.contains("General, FAQ, Suicide Risk"));
        assert!(prompt.contains("    * How can I cancel my subscription?\n"));
        assert!(prompt.ends_with("Message: \"Is Clare a human?\"\nCategory:"));
    }

    #[tokio::test]
    async fn generate_sends_single_user_message() {
        let provider = MockAIProvider::new().with_response("  Take a breath.  ");
        let gateway = LanguageModelGateway::new(Arc::new(provider.clone()));

        let reply = gateway.generate("user: I'm anxious").await.unwrap();

        assert_eq!(reply, "Take a breath.");
        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].messages.len(), 1);
        assert_eq!(calls[0].messages[0].role, PromptRole::User);
        assert!(calls[0].messages[0].content.contains("user: I'm anxious"));
    }

    #[tokio::test]
    async fn empty_generation_falls_back() {
        let provider = MockAIProvider::new().with_response("   ");
        let gateway = LanguageModelGateway::new(Arc::new(provider));

        assert_eq!(
            gateway.generate("user: hi").await.unwrap(),
            EMPTY_GENERATION_FALLBACK
        );
    }

    #[tokio::test]
    async fn classify_returns_trimmed_label() {
        let provider = MockAIProvider::new().with_response("FAQ\n");
        let gateway = LanguageModelGateway::new(Arc::new(provider.clone()));

        assert_eq!(gateway.classify("Is this anonymous?").await.unwrap(), "FAQ");
        assert!(provider.get_calls()[0].messages[0]
            .content
            .contains("Message: \"Is this anonymous?\""));
    }

    #[tokio::test]
    async fn provider_errors_propagate() {
        let provider = MockAIProvider::new().with_error(AIError::AuthenticationFailed);
        let gateway = LanguageModelGateway::new(Arc::new(provider));

        assert!(matches!(
            gateway.classify("hi").await,
            Err(AIError::AuthenticationFailed)
        ));
    }
}
