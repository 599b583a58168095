//! Patrol configuration structures and loaders.
use std::env;

use crate::agent::Point;

/// Configuration for a patrol session.
#[derive(Clone, Debug)]
pub struct PatrolConfig {
    /// Number of frames (ticks) to simulate.
    pub frames: u32,
    /// Distance covered per frame.
    pub speed: f32,
    /// Distance at which a waypoint counts as reached.
    pub arrive_radius: f32,
    /// Frames to rest at each waypoint before turning around.
    pub rest_frames: u32,
    pub waypoint_a: Point,
    pub waypoint_b: Point,
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            frames: 60,
            speed: 1.0,
            arrive_radius: 0.5,
            rest_frames: 2,
            waypoint_a: Point::new(0.0, 0.0),
            waypoint_b: Point::new(6.0, 8.0),
        }
    }
}

impl PatrolConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PATROL_FRAMES` - Frames to simulate (default: 60)
    /// - `PATROL_SPEED` - Distance per frame (default: 1.0)
    /// - `PATROL_ARRIVE_RADIUS` - Arrival tolerance (default: 0.5)
    /// - `PATROL_REST_FRAMES` - Frames spent resting at a waypoint (default: 2)
    /// - `PATROL_WAYPOINT_A` / `PATROL_WAYPOINT_B` - `x,y` coordinates
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(frames) = read_env::<u32>("PATROL_FRAMES") {
            config.frames = frames;
        }

        // Non-positive values would never reach a waypoint
        if let Some(speed) = read_env::<f32>("PATROL_SPEED").filter(|s| *s > 0.0) {
            config.speed = speed;
        }
        if let Some(radius) = read_env::<f32>("PATROL_ARRIVE_RADIUS").filter(|r| *r > 0.0) {
            config.arrive_radius = radius;
        }

        if let Some(rest) = read_env::<u32>("PATROL_REST_FRAMES") {
            config.rest_frames = rest;
        }

        if let Some(point) = read_env::<Point>("PATROL_WAYPOINT_A") {
            config.waypoint_a = point;
        }
        if let Some(point) = read_env::<Point>("PATROL_WAYPOINT_B") {
            config.waypoint_b = point;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
