//! Application services orchestrating the domain through the ports.

mod completion;
mod contact;
mod engine;
mod matching;
mod sweeper;

pub use completion::{CompletionOutcome, DialogCompletionHandler};
pub use contact::ContactRequestWorkflow;
pub use engine::{AnswerInput, ConversationEngine, EngineReply};
pub use matching::MatchingEngine;
pub use sweeper::SessionSweeper;
