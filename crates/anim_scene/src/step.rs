//! Units of a scene script.

use anim_math::PendingTransform;
use anim_object::ObjectId;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// One animation inside a `play` step. Every animation targets exactly one
/// object, and [`Transform`](Self::Transform) also brings in its
/// replacement. A `play` step runs its animations together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Animation {
    /// Draw text or TeX stroke by stroke.
    Write { target: ObjectId },
    /// Trace an outline.
    Create { target: ObjectId },
    /// Grow an arrow out of its start point.
    GrowArrow { target: ObjectId },
    FadeIn { target: ObjectId },
    FadeOut { target: ObjectId },
    /// Briefly emphasise an object already on screen.
    Indicate { target: ObjectId },
    /// Slide the target so its centre lands on `point`.
    MoveTo { target: ObjectId, point: DVec3 },
    /// Move every control point of the target through a linear map.
    ApplyPointwise { transform: PendingTransform },
    /// Morph the target into `into`. The target leaves the screen and `into`
    /// takes its place.
    Transform { target: ObjectId, into: ObjectId },
}

impl Animation {
    #[must_use]
    pub fn target(&self) -> ObjectId {
        match self {
            Self::Write { target }
            | Self::Create { target }
            | Self::GrowArrow { target }
            | Self::FadeIn { target }
            | Self::FadeOut { target }
            | Self::Indicate { target }
            | Self::MoveTo { target, .. }
            | Self::Transform { target, .. } => *target,
            Self::ApplyPointwise { transform } => transform.target,
        }
    }

    /// Whether the target is on screen after this animation.
    #[must_use]
    pub fn shows_target(&self) -> bool {
        !matches!(self, Self::FadeOut { .. } | Self::Transform { .. })
    }

    /// The object that replaces the target, if any.
    #[must_use]
    pub fn replacement(&self) -> Option<ObjectId> {
        match self {
            Self::Transform { into, .. } => Some(*into),
            _ => None,
        }
    }

    /// One `ApplyPointwise` per pending transform, in order.
    pub fn pointwise(pending: impl IntoIterator<Item = PendingTransform>) -> Vec<Self> {
        pending
            .into_iter()
            .map(|transform| Self::ApplyPointwise { transform })
            .collect()
    }
}

/// One entry of a scene script. Steps run strictly in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Put objects on screen without animation.
    Add { targets: Vec<ObjectId> },
    /// Take objects off screen without animation.
    Remove { targets: Vec<ObjectId> },
    Play {
        animations: Vec<Animation>,
        run_time: f64,
    },
    Wait { seconds: f64 },
    /// Fade out everything on screen.
    Clear { run_time: f64 },
}

impl Step {
    /// Seconds of scene time the step takes.
    #[must_use]
    pub fn duration(&self) -> f64 {
        match self {
            Self::Add { .. } | Self::Remove { .. } => 0.0,
            Self::Play { run_time, .. } | Self::Clear { run_time } => *run_time,
            Self::Wait { seconds } => *seconds,
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::Play { .. } => "play",
            Self::Wait { .. } => "wait",
            Self::Clear { .. } => "clear",
        }
    }
}

#[cfg(test)]
mod tests {
    use anim_math::AffineMap;

    use super::*;

    #[test]
    fn test_target() {
        let id = ObjectId::from_raw(3);
        assert_eq!(Animation::GrowArrow { target: id }.target(), id);
        let pending = PendingTransform {
            target: id,
            map: AffineMap::identity(DVec3::ZERO),
        };
        assert_eq!(Animation::pointwise([pending])[0].target(), id);
    }

    #[test]
    fn test_transform_hands_over_to_replacement() {
        let from = ObjectId::from_raw(1);
        let into = ObjectId::from_raw(2);
        let morph = Animation::Transform { target: from, into };
        assert_eq!(morph.target(), from);
        assert_eq!(morph.replacement(), Some(into));
        assert!(!morph.shows_target());
        assert_eq!(Animation::FadeIn { target: from }.replacement(), None);
    }

    #[test]
    fn test_durations() {
        assert_eq!(Step::Add { targets: vec![] }.duration(), 0.0);
        assert_eq!(Step::Wait { seconds: 2.0 }.duration(), 2.0);
        assert_eq!(Step::Clear { run_time: 0.5 }.duration(), 0.5);
    }

    #[test]
    fn test_step_serializes_tagged() {
        let step = Step::Play {
            animations: vec![Animation::FadeIn {
                target: ObjectId::from_raw(1),
            }],
            run_time: 1.0,
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["step"], "play");
        assert_eq!(json["animations"][0]["kind"], "fade_in");
        assert_eq!(json["animations"][0]["target"], 1);
    }
}
