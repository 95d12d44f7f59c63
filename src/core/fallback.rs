//! Offline replies used when the webhook is not configured or unreachable.

use chrono::Local;

use crate::core::repair::repair;
use crate::core::response::{NormalizedResponse, PlainReply};

/// Confidence reported for canned replies.
const OFFLINE_CONFIDENCE: f64 = 0.8;

/// Build the offline reply for a user message. Deterministic for a given message
/// (the time/date reply aside, which reports the current local time).
pub fn offline_reply(user_message: &str) -> NormalizedResponse {
    NormalizedResponse::Plain(PlainReply {
        text: repair(&offline_text(user_message)),
        timestamp: Some(chrono::Utc::now().to_rfc3339()),
        confidence: Some(OFFLINE_CONFIDENCE),
        metadata: None,
    })
}

fn offline_text(user_message: &str) -> String {
    let lower = user_message.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if has(&["hello", "hi", "hey"]) {
        "Hello! I'm currently running in offline mode. Configure the webhook URL to connect to \
         the AllSmart assistant. In the meantime, I can provide basic responses!"
            .to_string()
    } else if has(&["help"]) {
        "I'm here to help! Currently in offline mode. To get full assistant capabilities:\n\n\
         1. Configure the webhook URL (F2, or `allsmart-chat config set-webhook <url>`)\n\
         2. Make sure the workflow is active\n\
         3. Or enable the CORS relay option if the webhook is only reachable that way\n\n\
         For now, I can chat with you using basic responses!"
            .to_string()
    } else if has(&["configure", "setup", "cors"]) {
        "🔧 To connect this chat to your assistant:\n\n\
         1. Create a webhook trigger in your workflow\n\
         2. Add the AI processing nodes\n\
         3. Add a \"Respond to Webhook\" node returning the reply\n\
         4. Save the webhook URL here with F2 or `allsmart-chat config set-webhook <url>`"
            .to_string()
    } else if has(&["weather"]) {
        "🌤️ I'd love to help with weather information! Once the assistant is connected I'll be \
         able to answer that. For now, I hope you're having a great day!"
            .to_string()
    } else if has(&["time", "date"]) {
        let now = Local::now();
        format!(
            "🕐 The current time is {} and today is {}. Once connected to the assistant, I can \
             provide much more!",
            now.format("%H:%M:%S"),
            now.format("%d/%m/%Y")
        )
    } else if has(&["thank"]) {
        "You're very welcome! Once the assistant is connected I'll be even more helpful. Is \
         there anything else you'd like to know?"
            .to_string()
    } else if has(&["test", "demo"]) {
        "✅ Offline mode is working. When the webhook is connected you'll get real assistant \
         replies instead of these canned messages."
            .to_string()
    } else {
        generic_text(user_message)
    }
}

/// One of four acknowledgements, picked by message length.
fn generic_text(user_message: &str) -> String {
    let m = user_message.trim();
    match m.chars().count() % 4 {
        0 => format!(
            "Interesting question about \"{}\"! In offline mode I can only acknowledge your \
             message. Connect the assistant for real answers! 🤖",
            m
        ),
        1 => format!(
            "I received your message: \"{}\". This is an offline reply - configure the webhook \
             to get real assistant replies! 🚀",
            m
        ),
        2 => format!(
            "Thanks for saying \"{}\"! I'm running in offline mode. Set up the workflow to unlock \
             the full assistant! ⚡",
            m
        ),
        _ => format!(
            "You asked about \"{}\". Offline mode active - connect the assistant for smart \
             replies! 🎯",
            m
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(message: &str) -> String {
        match offline_reply(message) {
            NormalizedResponse::Plain(p) => p.text,
            other => panic!("expected plain reply, got {:?}", other),
        }
    }

    #[test]
    fn greeting_reply() {
        assert!(text("Hello there").starts_with("Hello!"));
    }

    #[test]
    fn help_reply_keeps_numbered_steps() {
        let t = text("I need help");
        assert!(t.contains("\n\n1. Configure the webhook URL"));
    }

    #[test]
    fn time_reply_mentions_time() {
        assert!(text("what date is it").starts_with("🕐 The current time is"));
    }

    #[test]
    fn generic_reply_is_deterministic() {
        let a = text("Καρέκλες γραφείου");
        let b = text("Καρέκλες γραφείου");
        assert_eq!(a, b);
        assert!(a.contains("\"Καρέκλες γραφείου\""));
    }

    #[test]
    fn generic_reply_depends_on_length() {
        assert!(text("abcd").starts_with("Interesting question"));
        assert!(text("abcde").starts_with("I received your message"));
        assert!(text("abcdef").starts_with("Thanks for saying"));
        assert!(text("abcdefg").starts_with("You asked about"));
    }

    #[test]
    fn carries_confidence() {
        match offline_reply("x") {
            NormalizedResponse::Plain(p) => assert_eq!(p.confidence, Some(0.8)),
            other => panic!("expected plain reply, got {:?}", other),
        }
    }
}
