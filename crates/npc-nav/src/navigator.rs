use npc_core::Vec2;

/// Path query backend shared by planning agents.
///
/// Implementations must be safe to query from several agents at once; an empty result means "no
/// path" without distinguishing blocked endpoints from unreachable goals.
pub trait Navigator: Send + Sync {
    fn find_path(&self, start: Vec2, goal: Vec2) -> Vec<Vec2>;
}
