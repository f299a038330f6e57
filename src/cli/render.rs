use pachico_core::services::AttachmentKind;
use pachico_core::{AgentClient, Conversation, ConversationsStore, Message, Role};

/// Format one message and its attachments for the terminal
pub fn render_message(message: &Message, client: &AgentClient) -> String {
    let speaker = match message.role {
        Role::User => "you",
        Role::Assistant => "pachico",
    };

    let mut out = format!("{}> {}", speaker, message.content);

    for path in &message.file_paths {
        let attachment = client.attachment(path);
        let tag = match attachment.kind {
            AttachmentKind::Image => "image",
            AttachmentKind::Download => "file",
        };
        out.push_str(&format!(
            "\n  [{}] {}  {}",
            tag, attachment.file_name, attachment.url
        ));
    }

    out
}

/// Numbered conversation list, most recent first, active marked with `*`
pub fn render_list(store: &ConversationsStore) -> String {
    if store.is_empty() {
        return "No conversations yet. Type a message or /new to start one.".to_string();
    }

    let active = store.active_id();
    store
        .list_recent()
        .iter()
        .enumerate()
        .map(|(i, conv)| {
            let marker = if Some(conv.thread_id.as_str()) == active {
                '*'
            } else {
                ' '
            };
            format!(
                "{} {:>2}. {} ({} messages)",
                marker,
                i + 1,
                conv.title,
                conv.message_count()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full transcript of a conversation
pub fn render_history(conversation: &Conversation, client: &AgentClient) -> String {
    let mut out = format!("== {} ==", conversation.title);
    if conversation.messages.is_empty() {
        out.push_str("\nWhat are we eating today?");
    }
    for message in &conversation.messages {
        out.push('\n');
        out.push_str(&render_message(message, client));
    }
    out
}
