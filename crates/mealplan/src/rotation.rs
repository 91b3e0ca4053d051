use std::collections::{HashSet, VecDeque};

/// RotationState tracks which recipes have already been placed in the week.
///
/// Under the no-repeat policy each recipe is used at most once. Once every
/// recipe in the catalog has been used, the rotation hands recipes out again
/// least-recently-used first, in the order they were first placed.
#[derive(Debug, Clone, Default)]
pub struct RotationState {
    used_recipe_ids: HashSet<String>,
    order: VecDeque<String>,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a recipe as used. Re-marking an already used recipe moves it to
    /// the back of the reuse queue.
    pub fn mark_recipe_used(&mut self, recipe_id: &str) {
        if self.used_recipe_ids.insert(recipe_id.to_owned()) {
            self.order.push_back(recipe_id.to_owned());
            return;
        }

        if let Some(pos) = self.order.iter().position(|id| id == recipe_id)
            && let Some(id) = self.order.remove(pos)
        {
            self.order.push_back(id);
        }
    }

    pub fn is_recipe_used(&self, recipe_id: &str) -> bool {
        self.used_recipe_ids.contains(recipe_id)
    }

    pub fn used_count(&self) -> usize {
        self.used_recipe_ids.len()
    }

    /// Takes the least recently used recipe and moves it to the back.
    pub fn reuse_least_recent(&mut self) -> Option<String> {
        let id = self.order.pop_front()?;
        self.order.push_back(id.to_owned());

        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_check_used() {
        let mut state = RotationState::new();
        state.mark_recipe_used("a");

        assert!(state.is_recipe_used("a"));
        assert!(!state.is_recipe_used("b"));
        assert_eq!(state.used_count(), 1);
    }

    #[test]
    fn test_reuse_follows_first_use_order() {
        let mut state = RotationState::new();
        state.mark_recipe_used("b");
        state.mark_recipe_used("a");
        state.mark_recipe_used("c");

        let reused: Vec<_> = (0..4).filter_map(|_| state.reuse_least_recent()).collect();
        assert_eq!(reused, vec!["b", "a", "c", "b"]);
    }

    #[test]
    fn test_remark_moves_to_back() {
        let mut state = RotationState::new();
        state.mark_recipe_used("a");
        state.mark_recipe_used("b");
        state.mark_recipe_used("a");

        assert_eq!(state.used_count(), 2);
        assert_eq!(state.reuse_least_recent().as_deref(), Some("b"));
    }

    #[test]
    fn test_empty_rotation_has_nothing_to_reuse() {
        assert_eq!(RotationState::new().reuse_least_recent(), None);
    }
}
