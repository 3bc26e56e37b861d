//! Named anatomical landmarks and their positions in the pose model's joint array.
//!
//! The upstream pose service emits a fixed 44-joint topology. Measurement code
//! never indexes that array directly; it resolves names through a versioned
//! [`LandmarkTable`]. If the upstream topology changes, add a new table
//! version instead of editing an existing one.

use serde::{Deserialize, Serialize};

/// Number of joints in the supported pose topology
pub const LANDMARK_COUNT: usize = 44;

/// Anatomical landmarks used for anthropometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Landmark {
    HeadTop = 0,
    Neck = 1,
    Pelvis = 2,
    LeftShoulder = 3,
    RightShoulder = 4,
    LeftElbow = 5,
    RightElbow = 6,
    LeftWrist = 7,
    RightWrist = 8,
    LeftHip = 9,
    RightHip = 10,
    LeftKnee = 11,
    RightKnee = 12,
    LeftHeel = 13,
    RightHeel = 14,
}

impl Landmark {
    pub const COUNT: usize = 15;

    pub const ALL: [Landmark; Landmark::COUNT] = [
        Landmark::HeadTop,
        Landmark::Neck,
        Landmark::Pelvis,
        Landmark::LeftShoulder,
        Landmark::RightShoulder,
        Landmark::LeftElbow,
        Landmark::RightElbow,
        Landmark::LeftWrist,
        Landmark::RightWrist,
        Landmark::LeftHip,
        Landmark::RightHip,
        Landmark::LeftKnee,
        Landmark::RightKnee,
        Landmark::LeftHeel,
        Landmark::RightHeel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Landmark::HeadTop => "HeadTop",
            Landmark::Neck => "Neck",
            Landmark::Pelvis => "Pelvis",
            Landmark::LeftShoulder => "LeftShoulder",
            Landmark::RightShoulder => "RightShoulder",
            Landmark::LeftElbow => "LeftElbow",
            Landmark::RightElbow => "RightElbow",
            Landmark::LeftWrist => "LeftWrist",
            Landmark::RightWrist => "RightWrist",
            Landmark::LeftHip => "LeftHip",
            Landmark::RightHip => "RightHip",
            Landmark::LeftKnee => "LeftKnee",
            Landmark::RightKnee => "RightKnee",
            Landmark::LeftHeel => "LeftHeel",
            Landmark::RightHeel => "RightHeel",
        }
    }
}

/// Versioned mapping from [`Landmark`] to joint-array index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandmarkTable {
    version: u32,
    topology: &'static str,
    /// Joint index per landmark, in [`Landmark`] discriminant order
    indices: [usize; Landmark::COUNT],
}

/// 44-joint SMPL-style topology (body joints followed by extra keypoints)
pub const LANDMARK_TABLE_V1: LandmarkTable = LandmarkTable {
    version: 1,
    topology: "smpl-44",
    indices: [
        38, // HeadTop
        1,  // Neck
        8,  // Pelvis
        5,  // LeftShoulder
        2,  // RightShoulder
        6,  // LeftElbow
        3,  // RightElbow
        36, // LeftWrist
        31, // RightWrist
        12, // LeftHip
        9,  // RightHip
        13, // LeftKnee
        10, // RightKnee
        21, // LeftHeel
        24, // RightHeel
    ],
};

impl LandmarkTable {
    /// Latest table version
    pub fn current() -> &'static LandmarkTable {
        &LANDMARK_TABLE_V1
    }

    /// Look up a table by version number.
    pub fn by_version(version: u32) -> Option<&'static LandmarkTable> {
        match version {
            1 => Some(&LANDMARK_TABLE_V1),
            _ => None,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn topology(&self) -> &'static str {
        self.topology
    }

    pub fn index(&self, landmark: Landmark) -> usize {
        self.indices[landmark as usize]
    }

    /// Iterate over every (landmark, index) pair
    pub fn entries(&self) -> impl Iterator<Item = (Landmark, usize)> + '_ {
        Landmark::ALL.iter().map(move |&lm| (lm, self.index(lm)))
    }
}

impl Default for LandmarkTable {
    fn default() -> Self {
        LANDMARK_TABLE_V1
    }
}
