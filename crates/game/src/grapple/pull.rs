//! Per-weight-class pull resolution.

use glam::Vec3;

use crate::entities::WeightClass;

/// Positions of both rope ends after one pull step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullStep {
    pub character: Vec3,
    pub target: Vec3,
}

impl WeightClass {
    /// Advance a pull by one step of `speed * delta_time`.
    ///
    /// - Light: the target is reeled in; the character stays put.
    /// - Medium: both ends close in at half speed each.
    /// - Heavy: the character is hauled to the target.
    ///
    /// No end ever passes the point where the two would meet.
    pub fn pull_step(self, character: Vec3, target: Vec3, speed: f32, delta_time: f32) -> PullStep {
        let reach = speed * delta_time;
        match self {
            Self::Light => PullStep {
                character,
                target: move_towards(target, character, reach),
            },
            Self::Medium => {
                let offset = target - character;
                let half = (reach * 0.5).min(offset.length() * 0.5);
                let step = offset.normalize_or_zero() * half;
                PullStep {
                    character: character + step,
                    target: target - step,
                }
            }
            Self::Heavy => PullStep {
                character: move_towards(character, target, reach),
                target,
            },
        }
    }
}

/// Move `from` toward `to` by at most `max_delta`.
fn move_towards(from: Vec3, to: Vec3, max_delta: f32) -> Vec3 {
    let offset = to - from;
    let distance = offset.length();
    if distance <= max_delta || distance == 0.0 {
        return to;
    }
    from + offset / distance * max_delta
}
