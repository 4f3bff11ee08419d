//! The rotate filter.
//!
//! Rotates an image by an arbitrary angle and gets rid of the transparent
//! corners one of two ways:
//!
//! - **expand**: keep the whole enlarged canvas and paint the corners with
//!   the background color.
//! - **crop** (default): cut the image down to the opaque rectangle found by
//!   [`find_inscribed_rect`].
//!
//! A failed crop is never an error. The filter logs it and returns the
//! expand result instead, and [`RotateOutcome::crop`] says which path
//! produced the pixels.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::color::{parse_color, ColorError, Rgb};
use crate::decode::Raster;
use crate::inscribed::{find_inscribed_rect, InscribeError, Rect};
use crate::opacity::OpacityMask;
use crate::transform::{crop, flatten, rotate, CropError, Interpolation, RotateOptions};

/// Invalid filter parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("rotation angle must be a finite number, got {0}")]
    InvalidAngle(f64),

    #[error("invalid background color: {0}")]
    InvalidColor(#[from] ColorError),

    #[error("invalid filter arguments: {0}")]
    InvalidArguments(String),
}

/// Why the crop path fell back to the expanded image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CropFallback {
    #[error("no inscribed rectangle: {0}")]
    NotFound(#[from] InscribeError),

    #[error("inscribed rectangle {0:?} covers transparent pixels")]
    NotOpaque(Rect),

    #[error("crop failed: {0}")]
    Crop(#[from] CropError),
}

/// Which path produced the filter output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CropOutcome {
    /// Expand mode was requested.
    Expanded,
    /// The rotated image was cropped to this rectangle of the rotated
    /// canvas.
    Cropped(Rect),
    /// Crop mode was requested but no usable rectangle was found.
    Fallback(CropFallback),
}

/// Filter output.
#[derive(Debug, Clone)]
pub struct RotateOutcome {
    /// Rotated image. Always fully opaque when the source was.
    pub image: Raster,
    pub crop: CropOutcome,
}

/// Parameters of the rotate filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotateParams {
    /// Degrees, positive = counter-clockwise.
    pub angle: f64,
    /// Keep the enlarged canvas instead of cropping.
    pub expand: bool,
    /// Hex or named color for the exposed corners. Used by expand mode and
    /// by the crop fallback.
    pub background: String,
    pub interpolation: Interpolation,
}

impl Default for RotateParams {
    fn default() -> Self {
        Self {
            angle: 0.0,
            expand: false,
            background: "white".to_string(),
            interpolation: Interpolation::default(),
        }
    }
}

impl RotateParams {
    pub fn new(angle: f64) -> Self {
        Self {
            angle,
            ..Self::default()
        }
    }

    /// Check the parameters and resolve the background color.
    pub fn validate(&self) -> Result<Rgb, FilterError> {
        if !self.angle.is_finite() {
            return Err(FilterError::InvalidAngle(self.angle));
        }
        Ok(parse_color(&self.background)?)
    }

    fn rotate_options(&self) -> RotateOptions {
        RotateOptions {
            expand: true,
            interpolation: self.interpolation,
        }
    }
}

/// Parses filter arguments of the form `angle[,expand[,background]]`,
/// e.g. `45`, `30,true` or `-15,1,#336699`.
impl FromStr for RotateParams {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let args: Vec<&str> = s.split(',').map(str::trim).collect();
        if args.len() > 3 {
            return Err(FilterError::InvalidArguments(format!(
                "expected at most 3 arguments, got {}",
                args.len()
            )));
        }

        let angle = args[0]
            .parse::<f64>()
            .map_err(|_| FilterError::InvalidArguments(format!("bad angle {:?}", args[0])))?;

        let mut params = RotateParams::new(angle);
        if let Some(flag) = args.get(1) {
            params.expand = parse_flag(flag)?;
        }
        if let Some(background) = args.get(2) {
            params.background = background.to_string();
        }
        Ok(params)
    }
}

fn parse_flag(value: &str) -> Result<bool, FilterError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(FilterError::InvalidArguments(format!(
            "bad expand flag {:?}",
            value
        ))),
    }
}

/// Apply the rotate filter.
///
/// # Errors
///
/// Only parameter validation fails. Crop problems are reported through
/// [`CropOutcome::Fallback`].
pub fn rotate_filter(image: &Raster, params: &RotateParams) -> Result<RotateOutcome, FilterError> {
    let background = params.validate()?;
    debug!(
        width = image.width,
        height = image.height,
        angle = params.angle,
        expand = params.expand,
        "Applying rotate filter"
    );

    let outcome = if params.expand {
        RotateOutcome {
            image: expand_rotate(image, params, background),
            crop: CropOutcome::Expanded,
        }
    } else {
        crop_rotate(image, params, background)
    };
    Ok(outcome)
}

fn expand_rotate(image: &Raster, params: &RotateParams, background: Rgb) -> Raster {
    let rotated = rotate(image, params.angle, params.rotate_options());
    flatten(&rotated, background)
}

fn crop_rotate(image: &Raster, params: &RotateParams, background: Rgb) -> RotateOutcome {
    let rotated = rotate(image, params.angle, params.rotate_options());
    let mask = OpacityMask::from_raster(&rotated);

    match crop_to_inscribed(&rotated, &mask) {
        Ok((rect, cropped)) => RotateOutcome {
            image: cropped,
            crop: CropOutcome::Cropped(rect),
        },
        Err(reason) => {
            warn!(%reason, angle = params.angle, "Keeping uncropped rotation");
            RotateOutcome {
                image: flatten(&rotated, background),
                crop: CropOutcome::Fallback(reason),
            }
        }
    }
}

fn crop_to_inscribed(rotated: &Raster, mask: &OpacityMask) -> Result<(Rect, Raster), CropFallback> {
    let rect = find_inscribed_rect(mask)?;
    if !mask.is_fully_opaque(&rect) {
        return Err(CropFallback::NotOpaque(rect));
    }
    let cropped = crop(rotated, &rect)?;
    Ok((rect, cropped))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
