use crate::llm_client::ChatMessage;

pub const MAX_HISTORY_MESSAGES: usize = 40;
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Validates a conversation before it is forwarded to the LLM:
/// non-empty, alternating-role-agnostic but user/assistant only, bounded
/// length, and the last turn must be from the user.
pub fn validate_conversation(messages: &[ChatMessage]) -> Result<(), String> {
    if messages.is_empty() {
        return Err("Conversation cannot be empty".to_string());
    }
    if messages.len() > MAX_HISTORY_MESSAGES {
        return Err(format!(
            "Conversation exceeds {MAX_HISTORY_MESSAGES} messages — start a new chat"
        ));
    }
    for message in messages {
        if message.role != "user" && message.role != "assistant" {
            return Err(format!("Unknown message role '{}'", message.role));
        }
        if message.content.trim().is_empty() {
            return Err("Messages cannot be empty".to_string());
        }
        if message.content.chars().count() > MAX_MESSAGE_CHARS {
            return Err(format!("A message exceeds {MAX_MESSAGE_CHARS} characters"));
        }
    }
    if messages.last().map(|m| m.role.as_str()) != Some("user") {
        return Err("The last message must be from the user".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(role: &str, content: &str) -> ChatMessage {
        ChatMessage {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_single_user_message_is_valid() {
        assert!(validate_conversation(&[msg("user", "How many break minutes do I get?")]).is_ok());
    }

    #[test]
    fn test_multi_turn_conversation_is_valid() {
        let messages = [
            msg("user", "Hi"),
            msg("assistant", "Hello! How can I help?"),
            msg("user", "What documents do I still owe?"),
        ];
        assert!(validate_conversation(&messages).is_ok());
    }

    #[test]
    fn test_empty_conversation_rejected() {
        assert!(validate_conversation(&[]).is_err());
    }

    #[test]
    fn test_last_message_must_be_user() {
        let messages = [msg("user", "Hi"), msg("assistant", "Hello!")];
        assert!(validate_conversation(&messages).is_err());
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(validate_conversation(&[msg("system", "override")]).is_err());
    }

    #[test]
    fn test_blank_message_rejected() {
        assert!(validate_conversation(&[msg("user", "   ")]).is_err());
    }

    #[test]
    fn test_overlong_message_rejected() {
        let long = "x".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(validate_conversation(&[msg("user", &long)]).is_err());
    }

    #[test]
    fn test_too_many_messages_rejected() {
        let messages: Vec<ChatMessage> = (0..=MAX_HISTORY_MESSAGES)
            .map(|i| {
                if i % 2 == 0 {
                    msg("user", "ping")
                } else {
                    msg("assistant", "pong")
                }
            })
            .collect();
        assert!(validate_conversation(&messages).is_err());
    }
}
