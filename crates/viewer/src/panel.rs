//! Keyboard-driven debug panel.
//!
//! Tab cycles folders, Up/Down selects a parameter, Left/Right nudges it
//! (Shift for ten steps). Nudges accumulate in a pending value that is
//! committed only when the nudge key is released, so holding an arrow key
//! regenerates once rather than on every repeat.

use engine_core::Color;
use input::{ElementState, KeyCode};
use procgen::{
    controls_for, snap, Family, GalaxyParameters, ParamControl, ParamKind, ParamValue, COLOR_PALETTE,
};

use crate::controller::ParamEdit;

/// Steps per nudge while Shift is held.
const FAST_NUDGE: f64 = 10.0;

#[derive(Debug, Default)]
pub struct DebugPanel {
    folder: usize,
    selected: usize,
    pending: Option<ParamEdit>,
}

impl DebugPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn folder(&self) -> Family {
        Family::ALL[self.folder % Family::ALL.len()]
    }

    /// The highlighted control among those active under `params`.
    pub fn selected_control(&self, params: &GalaxyParameters) -> Option<&'static ParamControl> {
        controls_for(self.folder(), params).nth(self.selected)
    }

    /// Value being nudged but not yet committed.
    pub fn pending(&self) -> Option<ParamEdit> {
        self.pending
    }

    /// Take the pending value for commit, e.g. when focus is lost mid-nudge.
    pub fn take_pending(&mut self) -> Option<ParamEdit> {
        self.pending.take()
    }

    /// Feed a key event. Returns an edit when one is committed.
    pub fn handle_key(
        &mut self,
        key: KeyCode,
        state: ElementState,
        shift: bool,
        params: &GalaxyParameters,
    ) -> Option<ParamEdit> {
        match (state, key) {
            (ElementState::Pressed, KeyCode::Tab) => {
                let folders = Family::ALL.len();
                self.folder = if shift {
                    (self.folder + folders - 1) % folders
                } else {
                    (self.folder + 1) % folders
                };
                self.selected = 0;
                None
            }
            (ElementState::Pressed, KeyCode::ArrowUp) => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            (ElementState::Pressed, KeyCode::ArrowDown) => {
                let count = controls_for(self.folder(), params).count();
                self.selected = (self.selected + 1).min(count.saturating_sub(1));
                None
            }
            (ElementState::Pressed, KeyCode::ArrowLeft) => {
                self.nudge(-1.0, shift, params);
                None
            }
            (ElementState::Pressed, KeyCode::ArrowRight) => {
                self.nudge(1.0, shift, params);
                None
            }
            (ElementState::Released, KeyCode::ArrowLeft | KeyCode::ArrowRight) => self.take_pending(),
            _ => None,
        }
    }

    fn nudge(&mut self, direction: f64, shift: bool, params: &GalaxyParameters) {
        let Some(control) = self.selected_control(params) else {
            return;
        };
        // Keep nudging the pending value while it belongs to the same parameter
        let current = match self.pending {
            Some(edit) if edit.id == control.id => Some(edit.value),
            _ => control.id.value(params),
        };
        let Some(current) = current else {
            return;
        };

        let next = match (control.kind, current) {
            (ParamKind::Number { min, max, step }, ParamValue::Number(v)) => {
                let steps = if shift { FAST_NUDGE } else { 1.0 };
                ParamValue::Number(snap(v + direction * step * steps, min, max, step))
            }
            (ParamKind::Color, ParamValue::Color(color)) => match cycle_palette(color, direction) {
                Some(next) => ParamValue::Color(next),
                None => return,
            },
            _ => return,
        };
        self.pending = Some(ParamEdit { id: control.id, value: next });
    }

    /// One-line panel summary for the window title.
    pub fn status_line(&self, params: &GalaxyParameters) -> String {
        let Some(control) = self.selected_control(params) else {
            return format!("[{}]", self.folder().label());
        };
        let value = match self.pending {
            Some(edit) if edit.id == control.id => format!("{}*", control.id.format_value(edit.value)),
            _ => control.id.display(params),
        };
        let count = controls_for(self.folder(), params).count();
        format!(
            "[{}] {} = {}  ({}/{})",
            self.folder().label(),
            control.label,
            value,
            self.selected + 1,
            count
        )
    }
}

/// Next palette color after `color` in `direction`. Colors not in the
/// palette start from its first (or last) entry.
fn cycle_palette(color: Color, direction: f64) -> Option<Color> {
    let len = COLOR_PALETTE.len() as isize;
    let hex = color.to_hex();
    let step = if direction < 0.0 { -1 } else { 1 };
    let index = match COLOR_PALETTE.iter().position(|&p| p == hex) {
        Some(i) => (i as isize + step).rem_euclid(len),
        None if step > 0 => 0,
        None => len - 1,
    };
    Color::from_hex(COLOR_PALETTE[index as usize]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use procgen::ParamId;

    fn press(panel: &mut DebugPanel, key: KeyCode, params: &GalaxyParameters) -> Option<ParamEdit> {
        panel.handle_key(key, ElementState::Pressed, false, params)
    }

    fn release(panel: &mut DebugPanel, key: KeyCode, params: &GalaxyParameters) -> Option<ParamEdit> {
        panel.handle_key(key, ElementState::Released, false, params)
    }

    #[test]
    fn commit_happens_on_release_only() {
        let params = GalaxyParameters::default();
        let mut panel = DebugPanel::new();
        // Galaxy folder, first control: count (100000, already at max)
        assert_eq!(press(&mut panel, KeyCode::ArrowLeft, &params), None);
        assert_eq!(press(&mut panel, KeyCode::ArrowLeft, &params), None);
        assert!(panel.pending().is_some());

        let edit = release(&mut panel, KeyCode::ArrowLeft, &params).unwrap();
        assert_eq!(edit.id, ParamId::Count);
        assert_eq!(edit.value, ParamValue::Number(99_800.0));
        assert!(panel.pending().is_none());
        assert_eq!(release(&mut panel, KeyCode::ArrowLeft, &params), None);
    }

    #[test]
    fn nudges_clamp_and_shift_moves_ten_steps() {
        let params = GalaxyParameters::default();
        let mut panel = DebugPanel::new();
        press(&mut panel, KeyCode::ArrowRight, &params);
        assert_eq!(release(&mut panel, KeyCode::ArrowRight, &params).map(|e| e.value), Some(ParamValue::Number(100_000.0)));

        // branches: 5 -> 15 with Shift, then clamped at 20
        panel.handle_key(KeyCode::ArrowDown, ElementState::Pressed, false, &params);
        panel.handle_key(KeyCode::ArrowDown, ElementState::Pressed, false, &params);
        panel.handle_key(KeyCode::ArrowDown, ElementState::Pressed, false, &params);
        assert_eq!(panel.selected_control(&params).map(|c| c.id), Some(ParamId::Branches));
        panel.handle_key(KeyCode::ArrowRight, ElementState::Pressed, true, &params);
        assert_eq!(panel.pending().map(|e| e.value), Some(ParamValue::Number(15.0)));
        panel.handle_key(KeyCode::ArrowRight, ElementState::Pressed, true, &params);
        let edit = panel.handle_key(KeyCode::ArrowRight, ElementState::Released, true, &params);
        assert_eq!(edit.map(|e| e.value), Some(ParamValue::Number(20.0)));
    }

    #[test]
    fn tab_cycles_folders_and_resets_selection() {
        let params = GalaxyParameters::default();
        let mut panel = DebugPanel::new();
        press(&mut panel, KeyCode::ArrowDown, &params);
        press(&mut panel, KeyCode::Tab, &params);
        assert_eq!(panel.folder(), Family::Burst);
        assert_eq!(panel.selected_control(&params).map(|c| c.id), Some(ParamId::BurstParticlesCount));
        press(&mut panel, KeyCode::Tab, &params);
        press(&mut panel, KeyCode::Tab, &params);
        assert_eq!(panel.folder(), Family::Spiral);
        panel.handle_key(KeyCode::Tab, ElementState::Pressed, true, &params);
        assert_eq!(panel.folder(), Family::Core);
    }

    #[test]
    fn selection_stays_in_folder() {
        let params = GalaxyParameters::default();
        let mut panel = DebugPanel::new();
        press(&mut panel, KeyCode::Tab, &params);
        press(&mut panel, KeyCode::Tab, &params);
        for _ in 0..10 {
            press(&mut panel, KeyCode::ArrowDown, &params);
        }
        assert_eq!(panel.selected_control(&params).map(|c| c.id), Some(ParamId::CoreColor));
        press(&mut panel, KeyCode::ArrowUp, &params);
        assert_eq!(panel.selected_control(&params).map(|c| c.id), Some(ParamId::CoreParticles));
    }

    #[test]
    fn colors_cycle_through_palette() {
        let params = GalaxyParameters::default();
        let mut panel = DebugPanel::new();
        // Core folder, coreColor (#f8d4c9 is palette entry 2)
        press(&mut panel, KeyCode::Tab, &params);
        press(&mut panel, KeyCode::Tab, &params);
        press(&mut panel, KeyCode::ArrowDown, &params);
        press(&mut panel, KeyCode::ArrowDown, &params);
        press(&mut panel, KeyCode::ArrowRight, &params);
        let edit = release(&mut panel, KeyCode::ArrowRight, &params).unwrap();
        assert_eq!(edit.id, ParamId::CoreColor);
        assert_eq!(edit.value, ParamValue::Color(Color::from_hex(COLOR_PALETTE[3]).unwrap()));
    }

    #[test]
    fn palette_wraps_and_handles_unknown_colors() {
        let first = Color::from_hex(COLOR_PALETTE[0]).unwrap();
        let last = Color::from_hex(COLOR_PALETTE[COLOR_PALETTE.len() - 1]).unwrap();
        assert_eq!(cycle_palette(first, -1.0), Some(last));
        assert_eq!(cycle_palette(last, 1.0), Some(first));
        let odd = Color::from_hex("#123456").unwrap();
        assert_eq!(cycle_palette(odd, 1.0), Some(first));
        assert_eq!(cycle_palette(odd, -1.0), Some(last));
    }

    #[test]
    fn derived_burst_folder_skips_its_count() {
        let params = GalaxyParameters::with_policies(procgen::VariantPolicies::alternate());
        let mut panel = DebugPanel::new();
        press(&mut panel, KeyCode::Tab, &params);
        assert_eq!(panel.selected_control(&params).map(|c| c.id), Some(ParamId::BurstRadius));
        assert_eq!(panel.status_line(&params), "[Burst] burstRadius = 6  (1/6)");
    }

    #[test]
    fn status_line_marks_pending_value() {
        let params = GalaxyParameters::default();
        let mut panel = DebugPanel::new();
        assert_eq!(panel.status_line(&params), "[Galaxy] count = 100000  (1/9)");
        press(&mut panel, KeyCode::ArrowLeft, &params);
        assert_eq!(panel.status_line(&params), "[Galaxy] count = 99900*  (1/9)");
    }
}
