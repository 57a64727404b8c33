//! Corner loads: static split and steady-state weight transfer.
//!
//! All arrays are `[FL, FR, RL, RR]` in kg.
//!
//! Transfer only moves load between corners, so the four loads always sum to
//! the vehicle's total weight. A negative corner load is returned as-is: it
//! means that wheel has lifted, which the report flags.

use crate::domain::{Corner, LoadCase, VehicleSetup};

/// Static corner loads: axle split by `weight_front_pct`, then 50/50 left/right.
///
/// No lateral bias at rest, so the tracks do not enter the split.
pub fn static_corner_loads(
    total_weight_kg: f64,
    weight_front_pct: f64,
    _front_track_mm: f64,
    _rear_track_mm: f64,
) -> [f64; 4] {
    let front = total_weight_kg * weight_front_pct / 100.0;
    let rear = total_weight_kg - front;
    let (fl, fr) = split_axle(front, 0.0);
    let (rl, rr) = split_axle(rear, 0.0);
    [fl, fr, rl, rr]
}

/// Corner loads under a steady lateral and longitudinal acceleration (g).
///
/// - Longitudinal: `ΔW = W · a_x · h / L`; positive `longitudinal_g`
///   (acceleration) moves load rearward, braking moves it forward.
/// - Lateral, per axle: `ΔW = W_axle · a_y · h / t_axle`, using the axle load
///   after longitudinal transfer. Positive `lateral_g` is a right-hand turn,
///   so the left wheels are outside and gain what the right wheels lose.
pub fn dynamic_transfer(setup: &VehicleSetup, lateral_g: f64, longitudinal_g: f64) -> [f64; 4] {
    let f = &setup.fixed;
    let [fl, fr, rl, rr] =
        static_corner_loads(f.total_weight_kg, f.weight_front_pct, f.front_track_mm, f.rear_track_mm);

    let dw_long = longitudinal_transfer(f.total_weight_kg, longitudinal_g, f.cg_height_mm, f.wheelbase_mm);
    let front_axle = (fl + fr) - dw_long;
    let rear_axle = (rl + rr) + dw_long;

    let (fl, fr) = split_axle(
        front_axle,
        lateral_transfer(front_axle, lateral_g, f.cg_height_mm, f.front_track_mm),
    );
    let (rl, rr) = split_axle(
        rear_axle,
        lateral_transfer(rear_axle, lateral_g, f.cg_height_mm, f.rear_track_mm),
    );
    [fl, fr, rl, rr]
}

/// `dynamic_transfer` for a `LoadCase`.
pub fn corner_loads_for(setup: &VehicleSetup, load_case: LoadCase) -> [f64; 4] {
    dynamic_transfer(setup, load_case.lateral_g, load_case.longitudinal_g)
}

/// Load (kg) moved from the front axle to the rear.
pub fn longitudinal_transfer(total_weight_kg: f64, longitudinal_g: f64, cg_height_mm: f64, wheelbase_mm: f64) -> f64 {
    total_weight_kg * longitudinal_g * (cg_height_mm / wheelbase_mm)
}

/// Load (kg) moved from the right wheel of an axle to the left.
pub fn lateral_transfer(axle_weight_kg: f64, lateral_g: f64, cg_height_mm: f64, track_mm: f64) -> f64 {
    axle_weight_kg * lateral_g * (cg_height_mm / track_mm)
}

/// `[front, rear]` axle totals of a corner array.
pub fn axle_loads(loads: &[f64; 4]) -> [f64; 2] {
    [loads[0] + loads[1], loads[2] + loads[3]]
}

/// Corners whose load has gone negative.
pub fn lifted_corners(loads: &[f64; 4]) -> Vec<Corner> {
    Corner::ALL
        .into_iter()
        .filter(|c| loads[c.index()] < 0.0)
        .collect()
}

/// Split an axle load between left and right, moving `to_left` kg leftward.
///
/// The right side is taken as the remainder so the pair always sums to `axle`.
fn split_axle(axle: f64, to_left: f64) -> (f64, f64) {
    let left = axle * 0.5 + to_left;
    (left, axle - left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Catalog;
    use crate::resolve::{UserOverrides, resolve};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn setup(id: &str) -> VehicleSetup {
        let preset = Catalog::embedded().unwrap().preset(id).unwrap();
        resolve(&preset, &UserOverrides::default()).unwrap()
    }

    #[test]
    fn static_split_for_rear_heavy_car() {
        let loads = static_corner_loads(1380.0, 38.0, 1465.0, 1480.0);
        let [front, rear] = axle_loads(&loads);
        assert!((front - 524.4).abs() < 1e-9, "front axle {front}");
        assert!((rear - 855.6).abs() < 1e-9, "rear axle {rear}");
        assert!((loads[0] - 262.2).abs() < 1e-9);
        assert!((loads[1] - 262.2).abs() < 1e-9);
        assert!((loads[2] - 427.8).abs() < 1e-9);
        assert!((loads[3] - 427.8).abs() < 1e-9);
    }

    #[test]
    fn zero_g_matches_static() {
        let s = setup("porsche_911_996");
        let f = &s.fixed;
        let expected = static_corner_loads(f.total_weight_kg, f.weight_front_pct, f.front_track_mm, f.rear_track_mm);
        assert_eq!(dynamic_transfer(&s, 0.0, 0.0), expected);
    }

    #[test]
    fn loads_sum_to_total_weight_across_g_range() {
        let catalog = Catalog::embedded().unwrap();
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for id in catalog.ids() {
            let s = setup(id);
            for _ in 0..500 {
                let lat = rng.gen_range(-2.0..=2.0);
                let lon = rng.gen_range(-2.0..=2.0);
                let loads = dynamic_transfer(&s, lat, lon);
                let sum: f64 = loads.iter().sum();
                assert!(
                    (sum - s.fixed.total_weight_kg).abs() < 1e-6,
                    "{id} lat={lat} lon={lon}: sum {sum}"
                );
            }
        }
    }

    #[test]
    fn lateral_g_shifts_equal_and_opposite_within_axle() {
        let s = setup("mazda_mx5_na");
        let base = dynamic_transfer(&s, 0.0, 0.0);
        let turned = dynamic_transfer(&s, 1.0, 0.0);

        let gain_fl = turned[0] - base[0];
        let loss_fr = base[1] - turned[1];
        assert!(gain_fl > 0.0);
        assert!((gain_fl - loss_fr).abs() < 1e-9);

        let base_axles = axle_loads(&base);
        let turned_axles = axle_loads(&turned);
        assert!((base_axles[0] - turned_axles[0]).abs() < 1e-9);
        assert!((base_axles[1] - turned_axles[1]).abs() < 1e-9);
    }

    #[test]
    fn lateral_transfer_matches_closed_form() {
        let s = setup("mazda_mx5_na");
        let f = &s.fixed;
        let loads = dynamic_transfer(&s, 1.0, 0.0);
        let front_axle = f.total_weight_kg * f.weight_front_pct / 100.0;
        let expected = front_axle * f.cg_height_mm / f.front_track_mm;
        assert!((loads[0] - (front_axle / 2.0 + expected)).abs() < 1e-9);
    }

    #[test]
    fn braking_moves_load_forward() {
        let s = setup("toyota_gr86_zn8");
        let base = axle_loads(&dynamic_transfer(&s, 0.0, 0.0));
        let braking = axle_loads(&dynamic_transfer(&s, 0.0, -1.0));
        let f = &s.fixed;
        let dw = f.total_weight_kg * f.cg_height_mm / f.wheelbase_mm;
        assert!((braking[0] - (base[0] + dw)).abs() < 1e-9);
        assert!((braking[1] - (base[1] - dw)).abs() < 1e-9);
    }

    #[test]
    fn wheel_lift_is_reported_not_clamped() {
        let s = setup("suzuki_jimny_jb64");
        let loads = dynamic_transfer(&s, 2.0, 0.0);
        let lifted = lifted_corners(&loads);
        assert!(lifted.contains(&Corner::FR), "{loads:?}");
        assert!(loads[Corner::FR.index()] < 0.0);
    }

    #[test]
    fn load_case_wrapper_matches() {
        let s = setup("honda_s2000_ap1");
        let lc = LoadCase { lateral_g: -0.8, longitudinal_g: 0.3 };
        assert_eq!(corner_loads_for(&s, lc), dynamic_transfer(&s, -0.8, 0.3));
    }
}
