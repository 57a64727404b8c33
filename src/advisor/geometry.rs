//! Camber and toe sanity checks.
//!
//! Conventions: negative camber is top-in, positive toe is toe-in. All angles
//! are degrees.

use crate::domain::{Axle, Diagnostic, ExpectedRange, Layout, SetupField};

/// Beyond this magnitude camber is aggressive for the street.
pub const CAMBER_AGGRESSIVE_DEG: f64 = 4.0;
/// Beyond this magnitude camber is not a plausible setup at all.
pub const CAMBER_LIMIT_DEG: f64 = 10.0;

pub const TOE_AGGRESSIVE_DEG: f64 = 0.5;
pub const TOE_LIMIT_DEG: f64 = 3.0;
/// Rear toe-out below this is flagged.
const REAR_TOE_OUT_DEG: f64 = -0.05;

/// Typical street camber envelope for a layout and axle.
pub fn typical_camber(layout: Layout, axle: Axle) -> ExpectedRange {
    let (min, max) = match (axle, layout) {
        (Axle::Front, l) if l.is_front_driven() => (-2.5, 0.0),
        (Axle::Front, Layout::Rr) => (-2.0, 0.0),
        (Axle::Front, _) => (-3.0, 0.0),
        (Axle::Rear, l) if l.is_front_driven() => (-2.0, 0.5),
        (Axle::Rear, l) if l.is_rear_engined() => (-3.0, 0.0),
        (Axle::Rear, Layout::FourWd) => (-1.0, 0.5),
        (Axle::Rear, _) => (-2.5, 0.0),
    };
    ExpectedRange { min, max }
}

/// Flag camber outside the typical envelope for `layout` / `axle`.
///
/// Only the most severe finding is returned.
pub fn camber_sanity(camber_deg: f64, layout: Layout, axle: Axle) -> Option<Diagnostic> {
    let field = SetupField::camber(axle).as_str();
    let envelope = typical_camber(layout, axle);

    if camber_deg.abs() > CAMBER_LIMIT_DEG {
        return Some(
            Diagnostic::error(field, "camber_out_of_range", camber_deg)
                .with_range(-CAMBER_LIMIT_DEG, CAMBER_LIMIT_DEG),
        );
    }
    if axle == Axle::Front && camber_deg > 0.0 {
        return Some(
            Diagnostic::warning(field, "positive_front_camber", camber_deg).with_range(envelope.min, envelope.max),
        );
    }
    if camber_deg.abs() > CAMBER_AGGRESSIVE_DEG {
        return Some(
            Diagnostic::warning(field, "camber_aggressive", camber_deg)
                .with_range(-CAMBER_AGGRESSIVE_DEG, CAMBER_AGGRESSIVE_DEG),
        );
    }
    if !envelope.contains(camber_deg) {
        return Some(
            Diagnostic::info(field, "camber_outside_typical", camber_deg).with_range(envelope.min, envelope.max),
        );
    }
    None
}

pub fn toe_sanity(toe_deg: f64, axle: Axle) -> Option<Diagnostic> {
    let field = SetupField::toe(axle).as_str();

    if toe_deg.abs() > TOE_LIMIT_DEG {
        return Some(Diagnostic::error(field, "toe_out_of_range", toe_deg).with_range(-TOE_LIMIT_DEG, TOE_LIMIT_DEG));
    }
    if axle == Axle::Rear && toe_deg < REAR_TOE_OUT_DEG {
        return Some(Diagnostic::warning(field, "rear_toe_out", toe_deg).with_range(0.0, TOE_AGGRESSIVE_DEG));
    }
    if toe_deg.abs() > TOE_AGGRESSIVE_DEG {
        return Some(
            Diagnostic::warning(field, "toe_aggressive", toe_deg).with_range(-TOE_AGGRESSIVE_DEG, TOE_AGGRESSIVE_DEG),
        );
    }
    None
}
