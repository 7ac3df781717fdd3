pub mod intent;
pub mod reply;
pub mod state;

pub use intent::ButtonIntent;
pub use reply::{ReplyKind, UserReply};
pub use state::ConversationState;
