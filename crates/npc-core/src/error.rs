use thiserror::Error;

/// Construction-time contract violations in `npc-core`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("agent id must not be empty")]
    EmptyId,
}

pub type Result<T> = std::result::Result<T, AgentError>;
