//! Collision detection and response
//!
//! Platforms are resolved against the player's movement this tick: we look at
//! where the player was before integration and where it ended up, and snap to
//! any platform edge the trajectory crossed. Checking the crossing rather than
//! the overlap keeps fast falls from tunneling through thin platforms.

use glam::Vec2;

use super::state::{Platform, Player, Snowflake};
use crate::tuning::Tuning;

/// Outcome of resolving the player against the platform set
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlatformContact {
    /// Platform the player landed on this tick, if any
    pub landed_on: Option<u32>,
    /// Platform whose underside the player bumped into, if any
    pub bumped: Option<u32>,
}

/// Resolve vertical collisions after the player has been integrated
///
/// `prev_y` is the player's top edge before this tick's integration.
pub fn resolve_platforms(player: &mut Player, prev_y: f32, platforms: &[Platform]) -> PlatformContact {
    let mut contact = PlatformContact::default();
    let height = player.size.y;

    for platform in platforms {
        if !platform.overlaps_x(player.pos.x, player.size.x) {
            continue;
        }

        let y = player.pos.y;
        if y > prev_y {
            // Falling: feet crossed the platform top
            let crossed = prev_y + height <= platform.top() && y + height >= platform.top();
            if crossed {
                player.pos.y = platform.top() - height;
                player.vel.y = 0.0;
                if contact.landed_on.is_none() {
                    contact.landed_on = Some(platform.id);
                }
            }
        } else if y < prev_y {
            // Rising: head crossed the platform underside
            let crossed = prev_y >= platform.bottom() && y <= platform.bottom();
            if crossed {
                player.pos.y = platform.bottom();
                player.vel.y = 0.0;
                if contact.bumped.is_none() {
                    contact.bumped = Some(platform.id);
                }
            }
        }
    }

    if contact.landed_on.is_some() {
        player.is_jumping = false;
    }
    contact
}

/// Keep the player inside the horizontal canvas bounds
#[inline]
pub fn clamp_to_canvas(player: &mut Player, tuning: &Tuning) {
    player.pos.x = player.pos.x.clamp(0.0, tuning.max_player_x().max(0.0));
}

/// Feet at or past the bottom edge
#[inline]
pub fn touches_bottom(player: &Player, tuning: &Tuning) -> bool {
    player.bottom() >= tuning.canvas_height
}

/// Distance below which a snowflake counts as caught
#[inline]
pub fn pickup_radius(player: &Player, tuning: &Tuning) -> f32 {
    player.size.x / 2.0 + tuning.snowflake_size / 2.0
}

/// Circle test between a snowflake and the player's center (strict)
pub fn snowflake_hit(flake: &Snowflake, player: &Player, tuning: &Tuning) -> bool {
    if !flake.active {
        return false;
    }
    point_within(flake.pos, player.center(), pickup_radius(player, tuning))
}

#[inline]
fn point_within(a: Vec2, b: Vec2, radius: f32) -> bool {
    (a - b).length() < radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SnowflakeKind;

    fn platform(id: u32, x: f32, y: f32, width: f32) -> Platform {
        Platform {
            id,
            pos: Vec2::new(x, y),
            width,
            height: 20.0,
        }
    }

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), &Tuning::default())
    }

    fn flake_at(pos: Vec2) -> Snowflake {
        Snowflake {
            id: 1,
            pos,
            speed: 1.0,
            active: true,
            kind: SnowflakeKind::Normal,
            size: 8.0,
            time_offset: 0.0,
            generation: 1,
        }
    }

    #[test]
    fn test_landing_snaps_to_top() {
        let platforms = [platform(7, 100.0, 300.0, 150.0)];
        // Feet 2px above the top, moving down 5.5px this tick
        let mut player = player_at(120.0, 258.0);
        player.is_jumping = true;
        player.vel.y = 5.5;
        let prev_y = player.pos.y;
        player.integrate();

        let contact = resolve_platforms(&mut player, prev_y, &platforms);
        assert_eq!(contact.landed_on, Some(7));
        assert_eq!(player.bottom(), 300.0);
        assert_eq!(player.vel.y, 0.0);
        assert!(!player.is_jumping);
    }

    #[test]
    fn test_resting_feet_keep_landing() {
        let platforms = [platform(1, 100.0, 300.0, 150.0)];
        let mut player = player_at(120.0, 260.0);
        player.vel.y = 0.5;
        let prev_y = player.pos.y;
        player.integrate();

        let contact = resolve_platforms(&mut player, prev_y, &platforms);
        assert_eq!(contact.landed_on, Some(1));
        assert_eq!(player.pos.y, 260.0);
    }

    #[test]
    fn test_bump_from_below() {
        let platforms = [platform(3, 100.0, 300.0, 150.0)];
        // Head 4px under the platform, rising 10px
        let mut player = player_at(120.0, 324.0);
        player.vel.y = -10.0;
        let prev_y = player.pos.y;
        player.integrate();

        let contact = resolve_platforms(&mut player, prev_y, &platforms);
        assert_eq!(contact.bumped, Some(3));
        assert_eq!(contact.landed_on, None);
        assert_eq!(player.pos.y, 320.0);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_no_horizontal_overlap_no_contact() {
        let platforms = [platform(1, 100.0, 300.0, 150.0)];
        // Player's right edge exactly touches the platform's left edge
        let mut player = player_at(60.0, 258.0);
        player.vel.y = 5.0;
        let prev_y = player.pos.y;
        player.integrate();

        let contact = resolve_platforms(&mut player, prev_y, &platforms);
        assert_eq!(contact, PlatformContact::default());
        assert_eq!(player.pos.y, 263.0);
    }

    #[test]
    fn test_already_below_top_falls_through() {
        let platforms = [platform(1, 100.0, 300.0, 150.0)];
        // Feet already inside the platform before the step: no snap back up
        let mut player = player_at(120.0, 265.0);
        player.vel.y = 3.0;
        let prev_y = player.pos.y;
        player.integrate();

        let contact = resolve_platforms(&mut player, prev_y, &platforms);
        assert!(contact.landed_on.is_none());
        assert_eq!(player.pos.y, 268.0);
    }

    #[test]
    fn test_clamp_to_canvas() {
        let tuning = Tuning::default();
        let mut player = player_at(-30.0, 0.0);
        clamp_to_canvas(&mut player, &tuning);
        assert_eq!(player.pos.x, 0.0);

        player.pos.x = 900.0;
        clamp_to_canvas(&mut player, &tuning);
        assert_eq!(player.pos.x, tuning.canvas_width - tuning.player_width);
    }

    #[test]
    fn test_touches_bottom_inclusive() {
        let tuning = Tuning::default();
        let player = player_at(0.0, tuning.canvas_height - tuning.player_height);
        assert!(touches_bottom(&player, &tuning));
        let player = player_at(0.0, tuning.canvas_height - tuning.player_height - 0.5);
        assert!(!touches_bottom(&player, &tuning));
    }

    #[test]
    fn test_snowflake_threshold_is_strict() {
        let tuning = Tuning::default();
        let player = player_at(100.0, 200.0);
        let center = player.center();
        let radius = pickup_radius(&player, &tuning);
        assert_eq!(radius, 24.0);

        let on_boundary = flake_at(center + Vec2::new(radius, 0.0));
        assert!(!snowflake_hit(&on_boundary, &player, &tuning));

        let inside = flake_at(center + Vec2::new(radius - 1e-3, 0.0));
        assert!(snowflake_hit(&inside, &player, &tuning));
    }

    #[test]
    fn test_inactive_snowflake_never_hits() {
        let tuning = Tuning::default();
        let player = player_at(100.0, 200.0);
        let mut flake = flake_at(player.center());
        assert!(snowflake_hit(&flake, &player, &tuning));
        flake.active = false;
        assert!(!snowflake_hit(&flake, &player, &tuning));
    }
}
