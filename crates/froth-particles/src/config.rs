//! Bubble configuration (parsed from TOML) and validation
//!
//! Every tunable of the simulation lives here so that the different looks
//! (slow drifting bubbles, fast crossing bubbles, sparse mobile layouts) are
//! parameter sets rather than separate code paths.

use froth_core::{FrothError, Result};
use serde::Serialize;
use std::path::Path;

/// Upper limit for any target count a config may request
pub const MAX_TARGET: usize = 1000;
/// Upper limit for `capacity_multiplier`
pub const MAX_CAPACITY_MULTIPLIER: usize = 16;
/// Largest pool a config may allocate
pub const MAX_CAPACITY: usize = 10_000;

/// Viewport-area based target scaling
#[derive(Debug, Clone, Serialize)]
pub struct DensityConfig {
    /// Scale the target with viewport area instead of using `target_active`
    pub scale_with_area: bool,
    /// Pixel area at which the scaled target equals `target_active`
    pub reference_area: f32,
    pub target_min: usize,
    pub target_max: usize,
    /// Multiplier applied to the target under a reduced-motion preference
    pub reduced_motion_factor: f32,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            scale_with_area: false,
            reference_area: 1920.0 * 1080.0,
            target_min: 4,
            target_max: 16,
            reduced_motion_factor: 0.5,
        }
    }
}

/// Pointer-driven popping
#[derive(Debug, Clone, Serialize)]
pub struct PopConfig {
    pub enabled: bool,
    /// Hit radius as a multiple of the bubble's rendered scale
    pub hit_scale: f32,
    /// Emit a burst effect for the renderer when a bubble pops
    pub burst: bool,
}

impl Default for PopConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            hit_scale: 1.0,
            burst: false,
        }
    }
}

/// Full configuration of the bubble layer
#[derive(Debug, Clone, Serialize)]
pub struct BubbleConfig {
    /// Id of the host container the layer attaches to
    pub mount_id: String,
    /// Bubbles kept alive at all times
    pub target_active: usize,
    pub capacity_multiplier: usize,
    pub min_capacity: usize,
    /// Distance beyond the viewport edge where bubbles appear
    pub spawn_pad: f32,
    /// Inward speed range (units/s)
    pub speed_min: f32,
    pub speed_max: f32,
    /// Full width of the lateral velocity range (units/s)
    pub lateral_spread: f32,
    /// Half-range of the random static depth
    pub depth_jitter: f32,
    pub size_min: f32,
    pub size_max: f32,
    pub lifetime_min: f32,
    pub lifetime_max: f32,
    /// Angular rate of the breathing oscillation (rad/s)
    pub breathing_rate: f32,
    pub breathing_amplitude: f32,
    pub opacity_max: f32,
    /// Fraction of the lifetime spent fading in
    pub fade_in: f32,
    /// Fraction of the lifetime spent fading out
    pub fade_out: f32,
    /// Distance beyond the viewport edge after which bubbles expire
    pub exit_margin: f32,
    /// Upper bound for a single simulation step (seconds)
    pub max_dt: f32,
    pub max_pixel_ratio: f32,
    /// Delay before re-reading the viewport after an orientation change
    pub orientation_settle: f32,
    pub density: DensityConfig,
    pub pop: PopConfig,
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            mount_id: "bg3d".to_string(),
            target_active: 10,
            capacity_multiplier: 4,
            min_capacity: 40,
            spawn_pad: 0.12,
            speed_min: 0.15,
            speed_max: 0.35,
            lateral_spread: 0.25,
            depth_jitter: 0.3,
            size_min: 0.06,
            size_max: 0.18,
            lifetime_min: 6.0,
            lifetime_max: 12.0,
            breathing_rate: 2.0,
            breathing_amplitude: 0.05,
            opacity_max: 0.3,
            fade_in: 0.08,
            fade_out: 0.1,
            exit_margin: 0.25,
            max_dt: 0.033,
            max_pixel_ratio: 2.0,
            orientation_settle: 0.25,
            density: DensityConfig::default(),
            pop: PopConfig::default(),
        }
    }
}

impl BubbleConfig {
    /// Parse a BubbleConfig from a TOML table. Missing keys keep defaults.
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut config = Self::default();

        if let Some(v) = table.get("mount_id").and_then(|v| v.as_str()) {
            config.mount_id = v.to_string();
        }
        if let Some(v) = table.get("target_active") {
            config.target_active = toml_usize(v, config.target_active);
        }
        if let Some(v) = table.get("capacity_multiplier") {
            config.capacity_multiplier = toml_usize(v, config.capacity_multiplier);
        }
        if let Some(v) = table.get("min_capacity") {
            config.min_capacity = toml_usize(v, config.min_capacity).min(MAX_CAPACITY);
        }

        let floats: [(&str, &mut f32); 18] = [
            ("spawn_pad", &mut config.spawn_pad),
            ("speed_min", &mut config.speed_min),
            ("speed_max", &mut config.speed_max),
            ("lateral_spread", &mut config.lateral_spread),
            ("depth_jitter", &mut config.depth_jitter),
            ("size_min", &mut config.size_min),
            ("size_max", &mut config.size_max),
            ("lifetime_min", &mut config.lifetime_min),
            ("lifetime_max", &mut config.lifetime_max),
            ("breathing_rate", &mut config.breathing_rate),
            ("breathing_amplitude", &mut config.breathing_amplitude),
            ("opacity_max", &mut config.opacity_max),
            ("fade_in", &mut config.fade_in),
            ("fade_out", &mut config.fade_out),
            ("exit_margin", &mut config.exit_margin),
            ("max_dt", &mut config.max_dt),
            ("max_pixel_ratio", &mut config.max_pixel_ratio),
            ("orientation_settle", &mut config.orientation_settle),
        ];
        for (key, slot) in floats {
            if let Some(v) = table.get(key) {
                *slot = toml_f32(v, *slot);
            }
        }

        if let Some(density) = table.get("density").and_then(|v| v.as_table()) {
            if let Some(v) = density.get("scale_with_area") {
                config.density.scale_with_area = v.as_bool().unwrap_or(false);
            }
            if let Some(v) = density.get("reference_area") {
                config.density.reference_area = toml_f32(v, config.density.reference_area);
            }
            if let Some(v) = density.get("target_min") {
                config.density.target_min = toml_usize(v, config.density.target_min);
            }
            if let Some(v) = density.get("target_max") {
                config.density.target_max = toml_usize(v, config.density.target_max);
            }
            if let Some(v) = density.get("reduced_motion_factor") {
                config.density.reduced_motion_factor =
                    toml_f32(v, config.density.reduced_motion_factor);
            }
        }

        if let Some(pop) = table.get("pop").and_then(|v| v.as_table()) {
            if let Some(v) = pop.get("enabled") {
                config.pop.enabled = v.as_bool().unwrap_or(false);
            }
            if let Some(v) = pop.get("hit_scale") {
                config.pop.hit_scale = toml_f32(v, config.pop.hit_scale);
            }
            if let Some(v) = pop.get("burst") {
                config.pop.burst = v.as_bool().unwrap_or(false);
            }
        }

        config
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let table: toml::value::Table = toml::from_str(source)?;
        let config = Self::from_toml(&table);
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Render as a TOML document `from_toml_str` accepts
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Largest target the layer can ever ask for
    pub fn target_ceiling(&self) -> usize {
        if self.density.scale_with_area {
            self.density.target_max
        } else {
            self.target_active
        }
    }

    /// Fixed pool capacity: `max(multiplier × target ceiling, floor)`.
    /// Saturates instead of overflowing; `validate` rejects such configs.
    pub fn capacity(&self) -> usize {
        self.capacity_multiplier
            .saturating_mul(self.target_ceiling())
            .max(self.min_capacity)
    }

    /// Pool capacity, or an error when it overflows or exceeds [`MAX_CAPACITY`]
    pub fn checked_capacity(&self) -> Result<usize> {
        let capacity = self
            .capacity_multiplier
            .checked_mul(self.target_ceiling())
            .map(|c| c.max(self.min_capacity))
            .filter(|c| *c <= MAX_CAPACITY);
        capacity.ok_or_else(|| FrothError::ValueOutOfRange {
            field: "capacity".into(),
            min: 1.0,
            max: MAX_CAPACITY as f64,
            value: self.capacity_multiplier as f64 * self.target_ceiling() as f64,
        })
    }

    /// Reject configurations the simulation cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.mount_id.is_empty() {
            return Err(FrothError::InvalidConfig("mount_id must not be empty".into()));
        }
        if self.target_active == 0 {
            return Err(FrothError::InvalidConfig("target_active must be at least 1".into()));
        }
        if self.capacity_multiplier == 0 {
            return Err(FrothError::InvalidConfig(
                "capacity_multiplier must be at least 1".into(),
            ));
        }
        count_within("target_active", self.target_active, MAX_TARGET)?;
        count_within(
            "capacity_multiplier",
            self.capacity_multiplier,
            MAX_CAPACITY_MULTIPLIER,
        )?;
        count_within("density.target_max", self.density.target_max, MAX_TARGET)?;

        ordered("speed", self.speed_min, self.speed_max)?;
        ordered("size", self.size_min, self.size_max)?;
        ordered("lifetime", self.lifetime_min, self.lifetime_max)?;

        positive("speed_min", self.speed_min)?;
        positive("speed_max", self.speed_max)?;
        positive("size_min", self.size_min)?;
        positive("size_max", self.size_max)?;
        positive("lifetime_min", self.lifetime_min)?;
        positive("lifetime_max", self.lifetime_max)?;
        positive("exit_margin", self.exit_margin)?;
        positive("max_dt", self.max_dt)?;
        positive("max_pixel_ratio", self.max_pixel_ratio)?;
        positive("pop.hit_scale", self.pop.hit_scale)?;
        positive("density.reference_area", self.density.reference_area)?;

        non_negative("spawn_pad", self.spawn_pad)?;
        non_negative("lateral_spread", self.lateral_spread)?;
        non_negative("depth_jitter", self.depth_jitter)?;
        non_negative("breathing_rate", self.breathing_rate)?;
        non_negative("orientation_settle", self.orientation_settle)?;

        within("opacity_max", self.opacity_max, 0.0, 1.0)?;
        within("breathing_amplitude", self.breathing_amplitude, 0.0, 1.0)?;
        within("fade_in", self.fade_in, f32::EPSILON, 1.0)?;
        within("fade_out", self.fade_out, f32::EPSILON, 1.0)?;
        within(
            "density.reduced_motion_factor",
            self.density.reduced_motion_factor,
            f32::EPSILON,
            1.0,
        )?;

        if self.fade_in + self.fade_out > 1.0 {
            return Err(FrothError::InvalidConfig(format!(
                "fade_in + fade_out must not exceed 1, got {}",
                self.fade_in + self.fade_out
            )));
        }
        if self.exit_margin <= self.spawn_pad {
            return Err(FrothError::InvalidConfig(format!(
                "exit_margin ({}) must exceed spawn_pad ({}) or bubbles expire on spawn",
                self.exit_margin, self.spawn_pad
            )));
        }
        if self.density.target_min == 0 {
            return Err(FrothError::InvalidConfig(
                "density.target_min must be at least 1".into(),
            ));
        }
        if self.density.target_min > self.density.target_max {
            return Err(FrothError::InvertedRange {
                field: "density.target".into(),
                min: self.density.target_min as f64,
                max: self.density.target_max as f64,
            });
        }
        self.checked_capacity()?;

        Ok(())
    }
}

fn count_within(field: &str, value: usize, max: usize) -> Result<()> {
    if value > max {
        return Err(FrothError::ValueOutOfRange {
            field: field.to_string(),
            min: 1.0,
            max: max as f64,
            value: value as f64,
        });
    }
    Ok(())
}

fn ordered(field: &str, min: f32, max: f32) -> Result<()> {
    if min > max {
        return Err(FrothError::InvertedRange {
            field: field.to_string(),
            min: min as f64,
            max: max as f64,
        });
    }
    Ok(())
}

fn positive(field: &str, value: f32) -> Result<()> {
    within(field, value, f32::MIN_POSITIVE, f32::MAX)
}

fn non_negative(field: &str, value: f32) -> Result<()> {
    within(field, value, 0.0, f32::MAX)
}

fn within(field: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(FrothError::ValueOutOfRange {
            field: field.to_string(),
            min: min as f64,
            max: max as f64,
            value: value as f64,
        });
    }
    Ok(())
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

fn toml_usize(v: &toml::Value, default: usize) -> usize {
    v.as_integer()
        .filter(|i| *i >= 0)
        .map(|i| i as usize)
        .unwrap_or(default)
}
