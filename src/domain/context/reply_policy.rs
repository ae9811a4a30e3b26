//! Reply policy: which kind of reply a classified message gets.

/// Sent when the classification points at suicide risk.
pub const CRISIS_MESSAGE: &str = "I'm really sorry you're feeling this way. Please talk to a mental health professional or contact a crisis hotline right away. Your safety is very important.";

/// Sent when the message is a product FAQ.
pub const FAQ_REDIRECT_MESSAGE: &str = "Please refer to https://www.clareandme.com/faq.";

/// Sole initial message of every check-in conversation.
pub const CHECK_IN_GREETING: &str = "Hi! How are you doing today?";

/// Reply branch selected from a category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyPolicy {
    /// Fixed crisis-resource message, no generation.
    Crisis,
    /// Fixed FAQ redirect, no generation.
    FaqRedirect,
    /// Generate a reply from the transcript.
    Generate,
}

impl ReplyPolicy {
    /// Selects the branch by case-insensitive substring match.
    ///
    /// First match wins: a label mentioning both "suicide" and "faq" is a
    /// crisis.
    pub fn for_category(category: &str) -> Self {
        let category = category.to_lowercase();
        if category.contains("suicide") {
            ReplyPolicy::Crisis
        } else if category.contains("faq") {
            ReplyPolicy::FaqRedirect
        } else {
            ReplyPolicy::Generate
        }
    }

    /// The fixed reply for non-generating branches.
    pub fn fixed_reply(&self) -> Option<&'static str> {
        match self {
            ReplyPolicy::Crisis => Some(CRISIS_MESSAGE),
            ReplyPolicy::FaqRedirect => Some(FAQ_REDIRECT_MESSAGE),
            ReplyPolicy::Generate => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suicide_risk_label_is_crisis() {
        assert_eq!(ReplyPolicy::for_category("Suicide Risk"), ReplyPolicy::Crisis);
        assert_eq!(ReplyPolicy::for_category("SUICIDE"), ReplyPolicy::Crisis);
    }

    #[test]
    fn faq_label_is_redirect() {
        assert_eq!(ReplyPolicy::for_category("FAQ"), ReplyPolicy::FaqRedirect);
        assert_eq!(ReplyPolicy::for_category("faq question"), ReplyPolicy::FaqRedirect);
    }

    #[test]
    fn anything_else_generates() {
        assert_eq!(ReplyPolicy::for_category("General"), ReplyPolicy::Generate);
        assert_eq!(ReplyPolicy::for_category(""), ReplyPolicy::Generate);
    }

    #[test]
    fn crisis_takes_precedence_over_faq() {
        assert_eq!(
            ReplyPolicy::for_category("FAQ about suicide"),
            ReplyPolicy::Crisis
        );
    }

    #[test]
    fn fixed_replies_match_branches() {
        assert_eq!(ReplyPolicy::Crisis.fixed_reply(), Some(CRISIS_MESSAGE));
        assert_eq!(ReplyPolicy::FaqRedirect.fixed_reply(), Some(FAQ_REDIRECT_MESSAGE));
        assert_eq!(ReplyPolicy::Generate.fixed_reply(), None);
    }
}
