//! Platform generation, sinking and recycling

use glam::Vec2;
use rand::Rng;

use super::state::Platform;
use crate::tuning::Tuning;

/// Owns the live platform set
#[derive(Debug, Clone, Default)]
pub struct PlatformManager {
    pub platforms: Vec<Platform>,
    next_id: u32,
}

impl PlatformManager {
    /// Hand-placed opening screen: a staircase the player can climb right away
    pub fn with_initial_layout(tuning: &Tuning) -> Self {
        let w = tuning.canvas_width;
        let h = tuning.canvas_height;
        let layout = [
            (w / 4.0 - 50.0, h * 0.75, 200.0),
            (w / 2.0 + 100.0, h * 0.6, 150.0),
            (w / 8.0, h * 0.45, 120.0),
            (w / 2.0 - 50.0, h * 0.3, 180.0),
            (w * 0.75, h * 0.4, 160.0),
            (w * 0.1, h * 0.85, 140.0),
        ];

        let mut manager = Self::default();
        for (x, y, width) in layout {
            let width = f32::min(width, w);
            let x = x.clamp(0.0, w - width);
            manager.add(Vec2::new(x, y), width, tuning.platform_height);
        }
        manager
    }

    /// Insert a platform at an explicit spot
    pub fn add(&mut self, pos: Vec2, width: f32, height: f32) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        self.platforms.push(Platform {
            id,
            pos,
            width,
            height,
        });
        id
    }

    /// Spawn a random platform just above the visible top edge
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, tuning: &Tuning) -> u32 {
        let span = tuning.max_platform_width - tuning.min_platform_width;
        let width = tuning.min_platform_width + rng.random::<f32>() * span;
        let x = rng.random::<f32>() * (tuning.canvas_width - width).max(0.0);
        let id = self.add(
            Vec2::new(x, -tuning.platform_height),
            width,
            tuning.platform_height,
        );
        log::trace!("Platform {} spawned at x={:.1} w={:.1}", id, x, width);
        id
    }

    /// Smallest y among live platforms, or the canvas height when there are none
    pub fn highest_y(&self, tuning: &Tuning) -> f32 {
        self.platforms
            .iter()
            .map(|p| p.pos.y)
            .fold(tuning.canvas_height, f32::min)
    }

    /// True when the top of the screen has opened a gap wide enough to fill
    pub fn needs_platform(&self, tuning: &Tuning) -> bool {
        self.highest_y(tuning) > tuning.min_platform_spacing
    }

    /// Sink, prune and top up. At most one platform is added per call.
    ///
    /// Returns the id of the spawned platform, if any.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R, tuning: &Tuning) -> Option<u32> {
        for platform in &mut self.platforms {
            platform.pos.y += tuning.platform_sink_speed;
        }

        let floor = tuning.canvas_height + tuning.platform_height;
        self.platforms.retain(|p| p.pos.y < floor);

        self.needs_platform(tuning).then(|| self.spawn(rng, tuning))
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }
}
