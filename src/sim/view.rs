//! Read-only snapshot for the presentation layer
//!
//! The simulation never draws. Renderers take a [`FrameView`] each frame and
//! match on entity kinds to pick sprites and colors.

use serde::Serialize;

use super::state::{GamePhase, GameState, Particle, Platform, Player, Snowflake};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub platforms: &'a [Platform],
    /// All flakes; inactive ones should not be drawn
    pub snowflakes: &'a [Snowflake],
    pub particles: &'a [Particle],
    pub score: u64,
    pub high_score: u64,
    pub double_jump_ready: bool,
}

impl GameState {
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            phase: self.phase,
            player: &self.player,
            platforms: &self.platforms.platforms,
            snowflakes: &self.snowflakes,
            particles: &self.particles,
            score: self.score,
            high_score: self.high_score,
            double_jump_ready: self.player.has_double_jump,
        }
    }
}

impl FrameView<'_> {
    /// Flakes that should be drawn this frame
    pub fn visible_snowflakes(&self) -> impl Iterator<Item = &Snowflake> {
        self.snowflakes.iter().filter(|s| s.active)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::state::{GameState, SnowflakeKind};

    #[test]
    fn test_view_reflects_state() {
        let mut state = GameState::new(8).with_high_score(40);
        state.score = 12;
        state.player.has_double_jump = true;
        state.snowflakes[0].active = false;

        let view = state.view();
        assert_eq!(view.score, 12);
        assert_eq!(view.high_score, 40);
        assert!(view.double_jump_ready);
        assert_eq!(view.platforms.len(), state.platforms.len());
        assert_eq!(view.visible_snowflakes().count(), state.snowflakes.len() - 1);
    }

    #[test]
    fn test_view_serializes_kinds_as_tags() {
        let mut state = GameState::new(8);
        state.snowflakes.truncate(1);
        state.snowflakes[0].kind = SnowflakeKind::Golden;

        let json = state.view().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["snowflakes"][0]["kind"], "Golden");
        assert_eq!(value["phase"], "Running");
        assert!(value["player"]["facing"].is_string());
        assert!(value["player"]["pos"].is_array());
    }
}
