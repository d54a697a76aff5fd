//! Per-frame GPU sync and drawing.

use anyhow::Result;
use procgen::Family;
use renderer::GpuPointCloud;

use crate::{UploadedCloud, ViewerState};

/// Bring GPU clouds in line with the scene, then draw a frame.
pub fn run(state: &mut ViewerState) -> Result<()> {
    sync_point_clouds(state);
    state.renderer.update_camera(&state.camera);

    let (output, mut encoder) = match state.renderer.begin_frame() {
        Ok(frame) => frame,
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            state.renderer.reconfigure();
            return Ok(());
        }
        Err(wgpu::SurfaceError::Timeout) => {
            log::warn!("Surface timeout, skipping frame");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let clouds: Vec<&GpuPointCloud> = Family::ALL
        .iter()
        .filter_map(|family| state.uploaded.get(family).map(|u| &u.cloud))
        .collect();
    state.renderer.render_point_clouds(&mut encoder, &view, &clouds);
    state.renderer.end_frame(output, encoder);
    Ok(())
}

/// Upload families whose generation changed, release GPU buffers of
/// replaced or removed families, and refresh every transform.
fn sync_point_clouds(state: &mut ViewerState) {
    for family in Family::ALL {
        let Some(object) = state.scene.get(family) else {
            if let Some(stale) = state.uploaded.remove(&family) {
                stale.cloud.release();
            }
            continue;
        };
        let model = state
            .scene
            .transform(family)
            .map(|t| t.to_matrix())
            .unwrap_or_default();

        match state.uploaded.get_mut(&family) {
            Some(uploaded) if uploaded.generation == object.generation => {
                state
                    .renderer
                    .update_point_cloud(&mut uploaded.cloud, object.material, model);
            }
            _ => {
                let cloud = state.renderer.upload_point_cloud(
                    object.name,
                    &object.buffer.positions,
                    object.buffer.colors.as_deref(),
                    object.material,
                    model,
                );
                let fresh = UploadedCloud { generation: object.generation, cloud };
                if let Some(stale) = state.uploaded.insert(family, fresh) {
                    stale.cloud.release();
                }
            }
        }
    }
}
