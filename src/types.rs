use serde::{Deserialize, Serialize};

/// Keypoints below this score are not drawn by the renderer.
/// The optimizers themselves never gate on score.
pub const RENDER_SCORE_THRESHOLD: f64 = 0.2;

/// 2D position in image pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Body part names as emitted by the pose estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Landmark {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub part: Landmark,
    pub position: Point,
    #[serde(default)]
    pub score: f64,
}

/// One detected pose for a frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    #[serde(default)]
    pub score: f64,
    pub keypoints: Vec<Keypoint>,
}

impl Pose {
    /// First keypoint with the given part, if detected.
    pub fn keypoint(&self, part: Landmark) -> Option<&Keypoint> {
        self.keypoints.iter().find(|k| k.part == part)
    }

    pub fn position(&self, part: Landmark) -> Option<Point> {
        self.keypoint(part).map(|k| k.position)
    }

    pub fn confident_keypoints(&self, min_score: f64) -> impl Iterator<Item = &Keypoint> + '_ {
        self.keypoints.iter().filter(move |k| k.score > min_score)
    }
}

/// Observation for the placement optimizer: both detected eyes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyePair {
    pub left: Point,
    pub right: Point,
}

impl EyePair {
    pub fn new(left: Point, right: Point) -> Self {
        Self { left, right }
    }

    /// `None` unless both eyes are present in the pose.
    pub fn from_pose(pose: &Pose) -> Option<Self> {
        let left = pose.position(Landmark::LeftEye)?;
        let right = pose.position(Landmark::RightEye)?;
        Some(Self { left, right })
    }
}

/// Observation for the correction optimizer: a raw signed error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionSignal {
    pub error: f64,
}

impl CorrectionSignal {
    pub fn new(error: f64) -> Self {
        Self { error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_parses_collaborator_json() {
        let json = r#"{
            "score": 0.8,
            "keypoints": [
                {"part": "leftEye", "position": {"x": 100.0, "y": 90.0}, "score": 0.95},
                {"part": "rightEye", "position": {"x": 150.0, "y": 91.0}, "score": 0.1},
                {"part": "somethingNew", "position": {"x": 0.0, "y": 0.0}, "score": 0.5}
            ]
        }"#;
        let pose: Pose = serde_json::from_str(json).unwrap();

        assert_eq!(pose.keypoints.len(), 3);
        assert_eq!(pose.keypoints[2].part, Landmark::Unknown);
        assert_eq!(pose.position(Landmark::LeftEye), Some(Point::new(100.0, 90.0)));
        assert_eq!(pose.confident_keypoints(RENDER_SCORE_THRESHOLD).count(), 2);

        // Low score does not hide the eye from the optimizer
        let eyes = EyePair::from_pose(&pose).unwrap();
        assert_eq!(eyes.right, Point::new(150.0, 91.0));
    }

    #[test]
    fn test_eye_pair_requires_both_eyes() {
        let pose = Pose {
            score: 1.0,
            keypoints: vec![Keypoint {
                part: Landmark::LeftEye,
                position: Point::new(1.0, 2.0),
                score: 1.0,
            }],
        };
        assert!(EyePair::from_pose(&pose).is_none());
    }

    #[test]
    fn test_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(&Point::new(3.0, 4.0)), 5.0);
    }
}
