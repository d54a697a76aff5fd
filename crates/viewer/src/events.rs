//! Window and device event handling for ViewerState.

use winit::event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels of trackpad scroll that count as one wheel line.
const PIXELS_PER_LINE: f32 = 40.0;

impl crate::ViewerState {
    /// Handle a window event. Returns true if the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.running = false;
                true
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
                self.camera.set_aspect(size.width, size.height);
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return false;
                };
                self.input.process_keyboard(key, event.state);

                if key == KeyCode::Escape && event.state == ElementState::Pressed {
                    self.running = false;
                    return true;
                }

                let shift = self.input.is_shift_held();
                if let Some(edit) =
                    self.panel
                        .handle_key(key, event.state, shift, self.controller.params())
                {
                    self.controller.apply_edit(&mut self.scene, edit);
                }
                self.refresh_title();
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.process_mouse_button(button, state);
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
                self.input.process_scroll(lines);
                false
            }
            WindowEvent::Focused(false) => {
                // The arrow release may never arrive; commit what was nudged so far
                self.input.release_all();
                if let Some(edit) = self.panel.take_pending() {
                    self.controller.apply_edit(&mut self.scene, edit);
                }
                self.refresh_title();
                false
            }
            WindowEvent::RedrawRequested => {
                self.update();
                if let Err(e) = self.render() {
                    log::error!("Render error: {}", e);
                    self.running = false;
                    return true;
                }
                self.renderer.window.request_redraw();
                false
            }
            _ => false,
        }
    }

    /// Handle raw device input (mouse motion for orbiting).
    pub(crate) fn handle_device_event(&mut self, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.process_mouse_motion(delta);
        }
    }
}
