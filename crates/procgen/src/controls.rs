//! Tunable parameter table for the debug panel.
//!
//! Every knob exposed to the panel has a `{min, max, step}` range (or is a
//! color). Values written through `ParamId::set_number` are clamped and
//! snapped, so the generators only ever see in-range input from the panel.

use engine_core::Color;

use crate::family::Family;
use crate::params::{BurstSizing, GalaxyParameters};

/// Identifies one tunable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    Count,
    Size,
    Radius,
    Branches,
    Spin,
    Randomness,
    RandomnessPower,
    InsideColor,
    OutsideColor,
    BurstParticlesCount,
    BurstRadius,
    BurstHeight,
    BurstSpreadFactor,
    BurstRandomnessPower,
    BurstInsideColor,
    BurstOutsideColor,
    CoreSize,
    CoreParticles,
    CoreColor,
}

/// Value domain of a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    Number { min: f64, max: f64, step: f64 },
    Color,
}

/// A parameter as presented to the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamControl {
    pub id: ParamId,
    /// Panel folder; also the family regenerated on commit.
    pub folder: Family,
    pub label: &'static str,
    pub kind: ParamKind,
}

const fn number(id: ParamId, folder: Family, label: &'static str, min: f64, max: f64, step: f64) -> ParamControl {
    ParamControl { id, folder, label, kind: ParamKind::Number { min, max, step } }
}

const fn color(id: ParamId, folder: Family, label: &'static str) -> ParamControl {
    ParamControl { id, folder, label, kind: ParamKind::Color }
}

/// All panel controls, grouped by family in display order.
pub const CONTROLS: &[ParamControl] = &[
    number(ParamId::Count, Family::Spiral, "count", 100.0, 100_000.0, 100.0),
    number(ParamId::Size, Family::Spiral, "size", 0.001, 0.1, 0.001),
    number(ParamId::Radius, Family::Spiral, "radius", 0.01, 20.0, 0.01),
    number(ParamId::Branches, Family::Spiral, "branches", 3.0, 20.0, 1.0),
    number(ParamId::Spin, Family::Spiral, "spin", -5.0, 5.0, 0.001),
    number(ParamId::Randomness, Family::Spiral, "randomness", 0.0, 2.0, 0.01),
    number(ParamId::RandomnessPower, Family::Spiral, "randomnessPower", 1.0, 10.0, 0.001),
    color(ParamId::InsideColor, Family::Spiral, "insideColor"),
    color(ParamId::OutsideColor, Family::Spiral, "outsideColor"),
    number(ParamId::BurstParticlesCount, Family::Burst, "burstParticlesCount", 100.0, 100_000.0, 100.0),
    number(ParamId::BurstRadius, Family::Burst, "burstRadius", 1.0, 30.0, 1.0),
    number(ParamId::BurstHeight, Family::Burst, "burstHeight", 1.0, 30.0, 1.0),
    number(ParamId::BurstSpreadFactor, Family::Burst, "burstSpreadFactor", 0.0, 1.0, 0.01),
    number(ParamId::BurstRandomnessPower, Family::Burst, "burstRandomnessPower", 1.0, 10.0, 0.1),
    color(ParamId::BurstInsideColor, Family::Burst, "burstInsideColor"),
    color(ParamId::BurstOutsideColor, Family::Burst, "burstOutsideColor"),
    number(ParamId::CoreSize, Family::Core, "coreSize", 0.001, 0.1, 0.001),
    number(ParamId::CoreParticles, Family::Core, "coreParticles", 100.0, 20_000.0, 100.0),
    color(ParamId::CoreColor, Family::Core, "coreColor"),
];

/// A value written to a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Color(Color),
}

/// Colors offered by the panel's color pickers (sRGB hex).
pub const COLOR_PALETTE: &[&str] = &[
    "#fa7000", "#1b3984", "#f8d4c9", "#ff3366", "#ffd166", "#06d6a0", "#118ab2", "#8338ec",
    "#ffffff", "#ff006e",
];

/// Active controls belonging to one family, in display order.
pub fn controls_for(family: Family, params: &GalaxyParameters) -> impl Iterator<Item = &'static ParamControl> + '_ {
    CONTROLS
        .iter()
        .filter(move |c| c.folder == family && c.id.is_active(params))
}

/// Clamp `value` into `[min, max]` and snap it to the nearest multiple of `step` from `min`.
pub fn snap(value: f64, min: f64, max: f64, step: f64) -> f64 {
    let clamped = value.clamp(min, max);
    if step <= 0.0 {
        return clamped;
    }
    let steps = ((clamped - min) / step).round();
    // Re-round to the step's decimal precision to shed accumulated float error
    let snapped = (min + steps * step).clamp(min, max);
    let decimals = step_decimals(step);
    let scale = 10f64.powi(decimals);
    (snapped * scale).round() / scale
}

fn step_decimals(step: f64) -> i32 {
    let mut decimals = 0;
    let mut scaled = step;
    while decimals < 9 && (scaled - scaled.round()).abs() > 1e-9 {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

impl ParamId {
    /// The control describing this parameter.
    pub fn control(self) -> &'static ParamControl {
        &CONTROLS[self.row()]
    }

    /// Row of this parameter in `CONTROLS`.
    fn row(self) -> usize {
        match self {
            ParamId::Count => 0,
            ParamId::Size => 1,
            ParamId::Radius => 2,
            ParamId::Branches => 3,
            ParamId::Spin => 4,
            ParamId::Randomness => 5,
            ParamId::RandomnessPower => 6,
            ParamId::InsideColor => 7,
            ParamId::OutsideColor => 8,
            ParamId::BurstParticlesCount => 9,
            ParamId::BurstRadius => 10,
            ParamId::BurstHeight => 11,
            ParamId::BurstSpreadFactor => 12,
            ParamId::BurstRandomnessPower => 13,
            ParamId::BurstInsideColor => 14,
            ParamId::BurstOutsideColor => 15,
            ParamId::CoreSize => 16,
            ParamId::CoreParticles => 17,
            ParamId::CoreColor => 18,
        }
    }

    /// Whether the parameter currently affects generation. The burst's own
    /// count is ignored while its size is derived from the spiral count.
    pub fn is_active(self, params: &GalaxyParameters) -> bool {
        match self {
            ParamId::BurstParticlesCount => matches!(params.burst.sizing, BurstSizing::Fixed),
            _ => true,
        }
    }

    /// The family regenerated when this parameter changes.
    pub fn family(self) -> Family {
        self.control().folder
    }

    /// Current numeric value, or `None` for color parameters.
    pub fn number(self, params: &GalaxyParameters) -> Option<f64> {
        let (s, b, c) = (&params.spiral, &params.burst, &params.core);
        let value = match self {
            ParamId::Count => s.count as f64,
            ParamId::Size => s.size as f64,
            ParamId::Radius => s.radius as f64,
            ParamId::Branches => s.branches as f64,
            ParamId::Spin => s.spin as f64,
            ParamId::Randomness => s.randomness as f64,
            ParamId::RandomnessPower => s.randomness_power as f64,
            ParamId::BurstParticlesCount => b.particles_count as f64,
            ParamId::BurstRadius => b.radius as f64,
            ParamId::BurstHeight => b.height as f64,
            ParamId::BurstSpreadFactor => b.spread_factor as f64,
            ParamId::BurstRandomnessPower => b.randomness_power as f64,
            ParamId::CoreSize => c.size as f64,
            ParamId::CoreParticles => c.particles as f64,
            ParamId::InsideColor
            | ParamId::OutsideColor
            | ParamId::BurstInsideColor
            | ParamId::BurstOutsideColor
            | ParamId::CoreColor => return None,
        };
        Some(value)
    }

    /// Write a numeric value, clamped and snapped to the control's range.
    /// Returns the value actually stored, or `None` for color parameters.
    pub fn set_number(self, params: &mut GalaxyParameters, value: f64) -> Option<f64> {
        let ParamKind::Number { min, max, step } = self.control().kind else {
            return None;
        };
        let v = snap(value, min, max, step);
        let (s, b, c) = (&mut params.spiral, &mut params.burst, &mut params.core);
        match self {
            ParamId::Count => s.count = v as usize,
            ParamId::Size => s.size = v as f32,
            ParamId::Radius => s.radius = v as f32,
            ParamId::Branches => s.branches = v as usize,
            ParamId::Spin => s.spin = v as f32,
            ParamId::Randomness => s.randomness = v as f32,
            ParamId::RandomnessPower => s.randomness_power = v as f32,
            ParamId::BurstParticlesCount => b.particles_count = v as usize,
            ParamId::BurstRadius => b.radius = v as f32,
            ParamId::BurstHeight => b.height = v as f32,
            ParamId::BurstSpreadFactor => b.spread_factor = v as f32,
            ParamId::BurstRandomnessPower => b.randomness_power = v as f32,
            ParamId::CoreSize => c.size = v as f32,
            ParamId::CoreParticles => c.particles = v as usize,
            _ => return None,
        }
        Some(v)
    }

    /// Current color, or `None` for numeric parameters.
    pub fn color(self, params: &GalaxyParameters) -> Option<Color> {
        match self {
            ParamId::InsideColor => Some(params.spiral.inside_color),
            ParamId::OutsideColor => Some(params.spiral.outside_color),
            ParamId::BurstInsideColor => Some(params.burst.inside_color),
            ParamId::BurstOutsideColor => Some(params.burst.outside_color),
            ParamId::CoreColor => Some(params.core.color),
            _ => None,
        }
    }

    /// Write a color. Returns `false` for numeric parameters.
    pub fn set_color(self, params: &mut GalaxyParameters, color: Color) -> bool {
        let slot = match self {
            ParamId::InsideColor => &mut params.spiral.inside_color,
            ParamId::OutsideColor => &mut params.spiral.outside_color,
            ParamId::BurstInsideColor => &mut params.burst.inside_color,
            ParamId::BurstOutsideColor => &mut params.burst.outside_color,
            ParamId::CoreColor => &mut params.core.color,
            _ => return false,
        };
        *slot = color;
        true
    }

    /// Current value in whichever domain the parameter uses.
    pub fn value(self, params: &GalaxyParameters) -> Option<ParamValue> {
        self.number(params)
            .map(ParamValue::Number)
            .or_else(|| self.color(params).map(ParamValue::Color))
    }

    /// Write `value`, returning what was actually stored.
    /// `None` when the value's domain does not match the parameter's.
    pub fn apply(self, params: &mut GalaxyParameters, value: ParamValue) -> Option<ParamValue> {
        match value {
            ParamValue::Number(v) => self.set_number(params, v).map(ParamValue::Number),
            ParamValue::Color(c) => self.set_color(params, c).then_some(ParamValue::Color(c)),
        }
    }

    /// Human-readable current value.
    pub fn display(self, params: &GalaxyParameters) -> String {
        self.value(params)
            .map(|value| self.format_value(value))
            .unwrap_or_default()
    }

    /// Format `value` the way the panel shows this parameter: numbers to the
    /// step's precision, colors as sRGB hex.
    pub fn format_value(self, value: ParamValue) -> String {
        match (value, self.control().kind) {
            (ParamValue::Color(color), _) => color.to_hex(),
            (ParamValue::Number(v), ParamKind::Number { step, .. }) => {
                format!("{:.*}", step_decimals(step) as usize, v)
            }
            (ParamValue::Number(v), ParamKind::Color) => v.to_string(),
        }
    }
}
