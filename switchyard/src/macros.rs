/// Creates a single [`ChatMessage`](crate::ChatMessage) from a role shorthand.
///
/// ```rust
/// use switchyard::{Role, sy_msg};
///
/// let message = sy_msg!(assistant => "Done.");
/// assert_eq!(message.role(), Role::Assistant);
/// assert_eq!(message.content(), "Done.");
/// ```
#[macro_export]
macro_rules! sy_msg {
    (system => $content:expr $(,)?) => {
        $crate::ChatMessage::new($crate::Role::System, $content)
    };
    (user => $content:expr $(,)?) => {
        $crate::ChatMessage::new($crate::Role::User, $content)
    };
    (assistant => $content:expr $(,)?) => {
        $crate::ChatMessage::new($crate::Role::Assistant, $content)
    };
    ($role:ident => $content:expr $(,)?) => {
        compile_error!("unsupported role: use system, user, or assistant");
    };
}

/// Creates a `Vec<MessageInput>` ready to hand to a provider or gateway.
///
/// ```rust
/// use switchyard::{MessageInput, sy_messages};
///
/// let messages = sy_messages![
///     system => "You are concise.",
///     user => "Give me five API ideas.",
/// ];
///
/// assert_eq!(messages.len(), 2);
/// assert!(matches!(messages[0], MessageInput::Message(_)));
/// ```
#[macro_export]
macro_rules! sy_messages {
    () => {
        Vec::<$crate::MessageInput>::new()
    };
    ($($role:ident => $content:expr),+ $(,)?) => {
        vec![$($crate::MessageInput::from($crate::sy_msg!($role => $content))),+]
    };
}
