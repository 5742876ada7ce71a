//! Temporal intensity model.
//!
//! Pure functions mapping a simulated hour to a traffic multiplier: a
//! diurnal day/night curve, shaped by the scenario overlay. Volume-only
//! effects (the payment-outage order cut) live in the order generator,
//! not here.

use crate::{scenario::ScenarioKind, types::Hour};
use std::f64::consts::PI;

/// Smooth day/night cycle in [0.3, 1.0], peaking at hour 12 and
/// troughing at hour 0.
pub fn diurnal_curve(hour: Hour) -> f64 {
    let h = (hour % 24) as f64;
    0.3 + 0.7 * (0.5 + 0.5 * (2.0 * PI * (h - 6.0) / 24.0).sin())
}

/// Traffic multiplier for one simulated hour under the given scenario.
/// Always > 0.
pub fn hourly_multiplier(hour: Hour, kind: &ScenarioKind) -> f64 {
    let base = diurnal_curve(hour);
    match kind {
        ScenarioKind::FlashSale { .. } => {
            // Doubling spike for the first four hours, then decay.
            if hour < 4 {
                base * 2.0_f64.powi(hour as i32)
            } else {
                base * 0.5
            }
        }
        ScenarioKind::ViralMoment { .. } => {
            if hour < 8 {
                base * (hour as f64 / 3.0).exp()
            } else {
                base
            }
        }
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diurnal_troughs_at_midnight() {
        let trough = diurnal_curve(0);
        for h in 0..24 {
            assert!(diurnal_curve(h) >= trough - 1e-9, "hour {h} below trough");
        }
        assert!((trough - 0.3).abs() < 1e-9);
    }

    #[test]
    fn diurnal_peaks_at_noon() {
        let peak = diurnal_curve(12);
        for h in 0..24 {
            assert!(diurnal_curve(h) <= peak + 1e-9, "hour {h} above peak");
        }
        assert!((peak - 1.0).abs() < 1e-9);
    }

    #[test]
    fn flash_sale_doubles_then_decays() {
        let kind = ScenarioKind::FlashSale {
            discount_percent: 70.0,
            category: crate::types::ProductCategory::Electronics,
        };
        for h in 0..4 {
            let expected = diurnal_curve(h) * 2.0_f64.powi(h as i32);
            assert!((hourly_multiplier(h, &kind) - expected).abs() < 1e-9);
        }
        assert!((hourly_multiplier(5, &kind) - diurnal_curve(5) * 0.5).abs() < 1e-9);
    }

    #[test]
    fn viral_moment_ramps_for_eight_hours() {
        let kind = ScenarioKind::ViralMoment {
            platform: "tiktok".into(),
        };
        let expected = diurnal_curve(7) * (7.0_f64 / 3.0).exp();
        assert!((hourly_multiplier(7, &kind) - expected).abs() < 1e-9);
        assert!((hourly_multiplier(8, &kind) - diurnal_curve(8)).abs() < 1e-9);
    }

    #[test]
    fn multiplier_is_always_positive() {
        let kinds = [
            ScenarioKind::Baseline,
            ScenarioKind::ViralMoment {
                platform: "tiktok".into(),
            },
        ];
        for kind in &kinds {
            for h in 0..200 {
                assert!(hourly_multiplier(h, kind) > 0.0);
            }
        }
    }
}
