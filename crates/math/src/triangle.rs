use std::str::FromStr;

use serde::Deserialize;

use crate::{MathError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum AngleUnit {
    Degrees,
    Radians,
}

impl FromStr for AngleUnit {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "DEGREES" => Ok(Self::Degrees),
            "RADIANS" => Ok(Self::Radians),
            _ => Err(MathError::InvalidInput(format!("unknown angle unit '{s}'"))),
        }
    }
}

impl TryFrom<String> for AngleUnit {
    type Error = MathError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Angle in radians. Without a unit the value is taken as radians already.
fn radians(angle: f64, unit: Option<AngleUnit>) -> f64 {
    match unit {
        Some(AngleUnit::Degrees) => angle.to_radians(),
        _ => angle,
    }
}

fn positive(name: &str, value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => {
            Err(MathError::InvalidInput(format!("{name} must be a positive number, got {v}")))
        }
        other => Ok(other),
    }
}

fn finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MathError::InvalidInput("the angle leaves the triangle undefined".to_string()))
    }
}

/// Two known sides of a right triangle; the third is solved for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RightTriangle {
    pub cathetus_a: Option<f64>,
    pub cathetus_b: Option<f64>,
    pub hypotenuse: Option<f64>,
}

impl RightTriangle {
    /// The hypotenuse when both legs are known, otherwise the missing leg.
    pub fn solve(&self) -> Result<f64> {
        let a = positive("cathetusA", self.cathetus_a)?;
        let b = positive("cathetusB", self.cathetus_b)?;
        let h = positive("hypotenuse", self.hypotenuse)?;

        match (a, b, h) {
            (Some(a), Some(b), _) => Ok(a.hypot(b)),
            (Some(leg), None, Some(h)) | (None, Some(leg), Some(h)) => {
                if h <= leg {
                    return Err(MathError::InvalidInput(format!(
                        "hypotenuse {h} must be longer than the cathetus {leg}"
                    )));
                }
                Ok((h * h - leg * leg).sqrt())
            }
            _ => Err(MathError::MissingInput("two of cathetusA, cathetusB and hypotenuse".to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HypotenuseMethod {
    SideAndOppositeAngle,
    SideAndAdjacentAngle,
    AreaAndSide,
}

impl FromStr for HypotenuseMethod {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "side_and_opposite_angle" => Ok(Self::SideAndOppositeAngle),
            "side_and_adjacent_angle" => Ok(Self::SideAndAdjacentAngle),
            "area_and_side" => Ok(Self::AreaAndSide),
            _ => Err(MathError::UnsupportedOperation(s.to_string())),
        }
    }
}

/// Angle alpha lies opposite cathetus a, beta opposite cathetus b.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HypotenuseInput {
    pub cathetus_a: Option<f64>,
    pub cathetus_b: Option<f64>,
    pub angle_alpha: Option<f64>,
    pub alpha_angle_unit: Option<AngleUnit>,
    pub angle_beta: Option<f64>,
    pub beta_angle_unit: Option<AngleUnit>,
    pub area: Option<f64>,
}

impl HypotenuseInput {
    fn alpha(&self) -> Result<f64> {
        let angle = self.angle_alpha.ok_or_else(|| MathError::MissingInput("angleAlpha".to_string()))?;
        Ok(radians(angle, self.alpha_angle_unit))
    }

    fn beta(&self) -> Result<f64> {
        let angle = self.angle_beta.ok_or_else(|| MathError::MissingInput("angleBeta".to_string()))?;
        Ok(radians(angle, self.beta_angle_unit))
    }
}

pub fn hypotenuse(method: HypotenuseMethod, input: &HypotenuseInput) -> Result<f64> {
    let a = positive("cathetusA", input.cathetus_a)?;
    let b = positive("cathetusB", input.cathetus_b)?;
    let missing_side = || MathError::MissingInput("cathetusA or cathetusB".to_string());

    let result = match method {
        HypotenuseMethod::SideAndOppositeAngle => match (a, b) {
            (Some(a), _) => a / input.alpha()?.sin(),
            (None, Some(b)) => b / input.beta()?.sin(),
            (None, None) => return Err(missing_side()),
        },
        HypotenuseMethod::SideAndAdjacentAngle => match (a, b) {
            (Some(a), _) => a / input.beta()?.cos(),
            (None, Some(b)) => b / input.alpha()?.cos(),
            (None, None) => return Err(missing_side()),
        },
        HypotenuseMethod::AreaAndSide => {
            let side = a.or(b).ok_or_else(missing_side)?;
            let area = positive("area", input.area)?.ok_or_else(|| MathError::MissingInput("area".to_string()))?;
            side.hypot(2.0 * area / side)
        }
    };

    // sin/cos of zero or a right angle leaves no triangle; a negative ratio
    // means the angle lies outside (0, 90) degrees.
    if result <= 0.0 {
        return Err(MathError::InvalidInput("the angle must lie strictly between 0 and 90 degrees".to_string()));
    }
    finite(result)
}
