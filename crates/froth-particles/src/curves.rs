//! Opacity and scale curves over a bubble's life

/// Piecewise fade multiplier for normalized age `t`:
/// linear ramp up over `fade_in`, flat at 1, linear ramp down over the final
/// `fade_out`. Clamped to [0, 1].
pub fn fade_factor(t: f32, fade_in: f32, fade_out: f32) -> f32 {
    let f = if t < fade_in {
        t / fade_in
    } else if t > 1.0 - fade_out {
        (1.0 - t) / fade_out
    } else {
        1.0
    };
    f.clamp(0.0, 1.0)
}

/// Rendered scale with a sinusoidal breathing wobble
pub fn breathing_scale(base_size: f32, phase: f32, amplitude: f32) -> f32 {
    base_size * (1.0 + amplitude * phase.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_endpoints() {
        assert_eq!(fade_factor(0.0, 0.08, 0.1), 0.0);
        assert!((fade_factor(0.04, 0.08, 0.1) - 0.5).abs() < 1e-6);
        assert_eq!(fade_factor(0.5, 0.08, 0.1), 1.0);
        assert!((fade_factor(0.95, 0.08, 0.1) - 0.5).abs() < 1e-5);
        assert_eq!(fade_factor(1.0, 0.08, 0.1), 0.0);
    }

    #[test]
    fn fade_clamps_outside_unit_range() {
        assert_eq!(fade_factor(-0.5, 0.08, 0.1), 0.0);
        assert_eq!(fade_factor(1.5, 0.08, 0.1), 0.0);
    }

    #[test]
    fn fade_is_continuous_at_knees() {
        let eps = 1e-4;
        assert!((fade_factor(0.08 - eps, 0.08, 0.1) - 1.0).abs() < 1e-2);
        assert!((fade_factor(0.9 + eps, 0.08, 0.1) - 1.0).abs() < 1e-2);
    }

    #[test]
    fn breathing_stays_within_amplitude() {
        for i in 0..100 {
            let s = breathing_scale(0.1, i as f32 * 0.1, 0.05);
            assert!(s >= 0.095 - 1e-6 && s <= 0.105 + 1e-6);
        }
        assert!((breathing_scale(0.1, 0.0, 0.05) - 0.1).abs() < 1e-7);
    }
}
