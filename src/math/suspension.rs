//! Suspension rate math.
//!
//! All functions here are pure and assume inputs already validated by the
//! resolver (motion ratio > 0, spring rate > 0, positive track and mass).
//! Nothing is re-checked.
//!
//! Units at the boundary follow the catalog: spring and wheel rates in N/mm,
//! ARB rates and roll stiffness in Nm/deg, lengths in mm, masses in kg.

use std::f64::consts::PI;

/// Track width at which a catalog ARB rate is quoted.
///
/// A bar acting on a wider track sees a proportionally smaller rate at the
/// wheel.
pub const ARB_REFERENCE_TRACK_MM: f64 = 1500.0;

const DEG_PER_RAD: f64 = 180.0 / PI;

/// Wheel rate from spring rate and motion ratio: `k_wheel = k_spring · MR²`.
pub fn wheel_rate(spring_rate_n_per_mm: f64, motion_ratio: f64) -> f64 {
    spring_rate_n_per_mm * motion_ratio * motion_ratio
}

/// Natural ride frequency (Hz) of one corner.
///
/// `f = (1 / 2π) · sqrt(k / m)` with `k` in N/m and `m` the sprung corner mass.
pub fn ride_frequency(wheel_rate_n_per_mm: f64, corner_mass_kg: f64) -> f64 {
    let k_n_per_m = wheel_rate_n_per_mm * 1000.0;
    (k_n_per_m / corner_mass_kg).sqrt() / (2.0 * PI)
}

/// Roll stiffness (Nm/deg) the springs of one axle provide.
///
/// A roll angle θ compresses each side by `θ · t/2`, so
/// `K = k_wheel · t² / 2` per radian.
pub fn spring_roll_stiffness(wheel_rate_n_per_mm: f64, track_mm: f64) -> f64 {
    let k_n_per_m = wheel_rate_n_per_mm * 1000.0;
    let track_m = track_mm / 1000.0;
    k_n_per_m * track_m * track_m / 2.0 / DEG_PER_RAD
}

/// Roll stiffness (Nm/deg) an anti-roll bar adds on an axle of the given track.
///
/// Zero for a car without a bar.
pub fn arb_roll_stiffness(arb_rate_nm_per_deg: f64, track_mm: f64) -> f64 {
    arb_rate_nm_per_deg * (ARB_REFERENCE_TRACK_MM / track_mm)
}

/// Total roll stiffness (Nm/deg) of one axle.
pub fn axle_roll_stiffness(wheel_rate_n_per_mm: f64, arb_rate_nm_per_deg: f64, track_mm: f64) -> f64 {
    spring_roll_stiffness(wheel_rate_n_per_mm, track_mm) + arb_roll_stiffness(arb_rate_nm_per_deg, track_mm)
}

/// Front share of total roll stiffness, in percent.
pub fn roll_stiffness_distribution(front_nm_per_deg: f64, rear_nm_per_deg: f64) -> f64 {
    front_nm_per_deg / (front_nm_per_deg + rear_nm_per_deg) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_motion_ratio_passes_spring_rate_through() {
        assert_eq!(wheel_rate(40.0, 1.0), 40.0);
    }

    #[test]
    fn wheel_rate_follows_motion_ratio_squared() {
        let wr = wheel_rate(50.0, 0.8);
        assert!((wr - 32.0).abs() < 1e-12, "got {wr}");
    }

    #[test]
    fn wheel_rate_is_bit_identical_across_calls() {
        for &(k, mr) in &[(40.0, 1.0), (37.3, 0.71), (120.5, 0.93), (8.2, 1.2)] {
            assert_eq!(wheel_rate(k, mr).to_bits(), wheel_rate(k, mr).to_bits());
        }
    }

    #[test]
    fn ride_frequency_matches_closed_form() {
        // 25 N/mm on 300 kg: sqrt(25000 / 300) / 2π ≈ 1.4529 Hz
        let f = ride_frequency(25.0, 300.0);
        assert!((f - 1.452_89).abs() < 1e-4, "got {f}");
    }

    #[test]
    fn softer_wheel_rate_lowers_frequency() {
        assert!(ride_frequency(20.0, 300.0) < ride_frequency(30.0, 300.0));
    }

    #[test]
    fn spring_roll_stiffness_closed_form() {
        // 30 N/mm, 1.5 m track: 30000 * 2.25 / 2 = 33750 Nm/rad
        let k = spring_roll_stiffness(30.0, 1500.0);
        let expected = 33_750.0 * PI / 180.0;
        assert!((k - expected).abs() < 1e-9, "got {k}");
    }

    #[test]
    fn wider_track_reduces_arb_contribution() {
        let narrow = arb_roll_stiffness(500.0, 1400.0);
        let wide = arb_roll_stiffness(500.0, 1600.0);
        assert!(wide < narrow);
        assert_eq!(arb_roll_stiffness(0.0, 1500.0), 0.0);
        assert_eq!(arb_roll_stiffness(500.0, ARB_REFERENCE_TRACK_MM), 500.0);
    }

    #[test]
    fn stiffer_bar_increases_axle_stiffness() {
        let soft = axle_roll_stiffness(30.0, 200.0, 1500.0);
        let stiff = axle_roll_stiffness(30.0, 800.0, 1500.0);
        assert!(stiff > soft);
    }

    #[test]
    fn distribution_is_front_share() {
        assert!((roll_stiffness_distribution(600.0, 400.0) - 60.0).abs() < 1e-12);
        assert!((roll_stiffness_distribution(500.0, 500.0) - 50.0).abs() < 1e-12);
    }
}
