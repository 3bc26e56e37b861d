//! Dimensionless body-shape ratios.
//!
//! Every ratio is a quotient of two [`Measurement`]s listed in [`Ratio::operands`].
//! A ratio whose denominator is exactly zero is left undefined (`None`); the
//! remaining ratios are still computed.

use serde::{Deserialize, Serialize};

use crate::measurements::{Measurement, Measurements};

/// Named proportion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ratio {
    LegToHeight,
    TorsoToHeight,
    ArmToHeight,
    UpperToLowerLeg,
    UpperToLowerArm,
    ArmToLeg,
    ShoulderToHipRatio,
    ShoulderToHeight,
    ArmSpanRatio,
    ChestToWaist,
    ThighToCalf,
    ChestToHeight,
    WaistToHeight,
    ThighToHeight,
    CalfToHeight,
    ShoulderToWaist,
    HipToWaist,
    ArmToTorso,
    LegToTorso,
    ChestToArm,
    WaistToLeg,
}

impl Ratio {
    pub const COUNT: usize = 21;

    pub const ALL: [Ratio; Ratio::COUNT] = [
        Ratio::LegToHeight,
        Ratio::TorsoToHeight,
        Ratio::ArmToHeight,
        Ratio::UpperToLowerLeg,
        Ratio::UpperToLowerArm,
        Ratio::ArmToLeg,
        Ratio::ShoulderToHipRatio,
        Ratio::ShoulderToHeight,
        Ratio::ArmSpanRatio,
        Ratio::ChestToWaist,
        Ratio::ThighToCalf,
        Ratio::ChestToHeight,
        Ratio::WaistToHeight,
        Ratio::ThighToHeight,
        Ratio::CalfToHeight,
        Ratio::ShoulderToWaist,
        Ratio::HipToWaist,
        Ratio::ArmToTorso,
        Ratio::LegToTorso,
        Ratio::ChestToArm,
        Ratio::WaistToLeg,
    ];

    /// (numerator, denominator)
    pub fn operands(&self) -> (Measurement, Measurement) {
        use Measurement::*;
        match self {
            Ratio::LegToHeight => (Leg, Height),
            Ratio::TorsoToHeight => (Torso, Height),
            Ratio::ArmToHeight => (Arm, Height),
            Ratio::UpperToLowerLeg => (UpperLeg, LowerLeg),
            Ratio::UpperToLowerArm => (UpperArm, Forearm),
            Ratio::ArmToLeg => (Arm, Leg),
            Ratio::ShoulderToHipRatio => (ShoulderWidth, HipWidth),
            Ratio::ShoulderToHeight => (ShoulderWidth, Height),
            Ratio::ArmSpanRatio => (ArmSpan, Height),
            Ratio::ChestToWaist => (Chest, Waist),
            Ratio::ThighToCalf => (Thigh, Calf),
            Ratio::ChestToHeight => (Chest, Height),
            Ratio::WaistToHeight => (Waist, Height),
            Ratio::ThighToHeight => (Thigh, Height),
            Ratio::CalfToHeight => (Calf, Height),
            Ratio::ShoulderToWaist => (ShoulderWidth, Waist),
            Ratio::HipToWaist => (HipWidth, Waist),
            Ratio::ArmToTorso => (Arm, Torso),
            Ratio::LegToTorso => (Leg, Torso),
            Ratio::ChestToArm => (Chest, Arm),
            Ratio::WaistToLeg => (Waist, Leg),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ratio::LegToHeight => "legToHeight",
            Ratio::TorsoToHeight => "torsoToHeight",
            Ratio::ArmToHeight => "armToHeight",
            Ratio::UpperToLowerLeg => "upperToLowerLeg",
            Ratio::UpperToLowerArm => "upperToLowerArm",
            Ratio::ArmToLeg => "armToLeg",
            Ratio::ShoulderToHipRatio => "shoulderToHipRatio",
            Ratio::ShoulderToHeight => "shoulderToHeight",
            Ratio::ArmSpanRatio => "armSpanRatio",
            Ratio::ChestToWaist => "chestToWaist",
            Ratio::ThighToCalf => "thighToCalf",
            Ratio::ChestToHeight => "chestToHeight",
            Ratio::WaistToHeight => "waistToHeight",
            Ratio::ThighToHeight => "thighToHeight",
            Ratio::CalfToHeight => "calfToHeight",
            Ratio::ShoulderToWaist => "shoulderToWaist",
            Ratio::HipToWaist => "hipToWaist",
            Ratio::ArmToTorso => "armToTorso",
            Ratio::LegToTorso => "legToTorso",
            Ratio::ChestToArm => "chestToArm",
            Ratio::WaistToLeg => "waistToLeg",
        }
    }

    /// Evaluate against a measurement record; `None` when the denominator is zero.
    pub fn evaluate(&self, m: &Measurements) -> Option<f64> {
        let (num, den) = self.operands();
        let den = m.get(den);
        if den == 0.0 {
            None
        } else {
            Some(m.get(num) / den)
        }
    }
}

/// Proportion record; undefined ratios are `None` and omitted when serialized
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Proportions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_to_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub torso_to_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arm_to_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_to_lower_leg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_to_lower_arm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arm_to_leg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoulder_to_hip_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoulder_to_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arm_span_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chest_to_waist: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thigh_to_calf: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chest_to_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist_to_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thigh_to_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calf_to_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoulder_to_waist: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hip_to_waist: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arm_to_torso: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_to_torso: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chest_to_arm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist_to_leg: Option<f64>,
}

impl Proportions {
    pub fn get(&self, ratio: Ratio) -> Option<f64> {
        *self.slot(ratio)
    }

    pub fn set(&mut self, ratio: Ratio, value: Option<f64>) {
        *self.slot_mut(ratio) = value;
    }

    /// Builder-style setter, handy for hand-written profiles
    pub fn with(mut self, ratio: Ratio, value: f64) -> Self {
        self.set(ratio, Some(value));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ratio, Option<f64>)> + '_ {
        Ratio::ALL.iter().map(move |&r| (r, self.get(r)))
    }

    pub fn defined_count(&self) -> usize {
        self.iter().filter(|(_, v)| v.is_some()).count()
    }

    fn slot(&self, ratio: Ratio) -> &Option<f64> {
        match ratio {
            Ratio::LegToHeight => &self.leg_to_height,
            Ratio::TorsoToHeight => &self.torso_to_height,
            Ratio::ArmToHeight => &self.arm_to_height,
            Ratio::UpperToLowerLeg => &self.upper_to_lower_leg,
            Ratio::UpperToLowerArm => &self.upper_to_lower_arm,
            Ratio::ArmToLeg => &self.arm_to_leg,
            Ratio::ShoulderToHipRatio => &self.shoulder_to_hip_ratio,
            Ratio::ShoulderToHeight => &self.shoulder_to_height,
            Ratio::ArmSpanRatio => &self.arm_span_ratio,
            Ratio::ChestToWaist => &self.chest_to_waist,
            Ratio::ThighToCalf => &self.thigh_to_calf,
            Ratio::ChestToHeight => &self.chest_to_height,
            Ratio::WaistToHeight => &self.waist_to_height,
            Ratio::ThighToHeight => &self.thigh_to_height,
            Ratio::CalfToHeight => &self.calf_to_height,
            Ratio::ShoulderToWaist => &self.shoulder_to_waist,
            Ratio::HipToWaist => &self.hip_to_waist,
            Ratio::ArmToTorso => &self.arm_to_torso,
            Ratio::LegToTorso => &self.leg_to_torso,
            Ratio::ChestToArm => &self.chest_to_arm,
            Ratio::WaistToLeg => &self.waist_to_leg,
        }
    }

    fn slot_mut(&mut self, ratio: Ratio) -> &mut Option<f64> {
        match ratio {
            Ratio::LegToHeight => &mut self.leg_to_height,
            Ratio::TorsoToHeight => &mut self.torso_to_height,
            Ratio::ArmToHeight => &mut self.arm_to_height,
            Ratio::UpperToLowerLeg => &mut self.upper_to_lower_leg,
            Ratio::UpperToLowerArm => &mut self.upper_to_lower_arm,
            Ratio::ArmToLeg => &mut self.arm_to_leg,
            Ratio::ShoulderToHipRatio => &mut self.shoulder_to_hip_ratio,
            Ratio::ShoulderToHeight => &mut self.shoulder_to_height,
            Ratio::ArmSpanRatio => &mut self.arm_span_ratio,
            Ratio::ChestToWaist => &mut self.chest_to_waist,
            Ratio::ThighToCalf => &mut self.thigh_to_calf,
            Ratio::ChestToHeight => &mut self.chest_to_height,
            Ratio::WaistToHeight => &mut self.waist_to_height,
            Ratio::ThighToHeight => &mut self.thigh_to_height,
            Ratio::CalfToHeight => &mut self.calf_to_height,
            Ratio::ShoulderToWaist => &mut self.shoulder_to_waist,
            Ratio::HipToWaist => &mut self.hip_to_waist,
            Ratio::ArmToTorso => &mut self.arm_to_torso,
            Ratio::LegToTorso => &mut self.leg_to_torso,
            Ratio::ChestToArm => &mut self.chest_to_arm,
            Ratio::WaistToLeg => &mut self.waist_to_leg,
        }
    }
}

/// Derives the full ratio table from a measurement record
#[derive(Debug, Clone, Copy, Default)]
pub struct ProportionCalculator;

impl ProportionCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn derive(&self, measurements: &Measurements) -> Proportions {
        let mut out = Proportions::default();
        for ratio in Ratio::ALL {
            out.set(ratio, ratio.evaluate(measurements));
        }
        out
    }
}

pub fn derive_proportions(measurements: &Measurements) -> Proportions {
    ProportionCalculator::new().derive(measurements)
}
