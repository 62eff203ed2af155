//! Per-frame orchestration.
//!
//! One logical thread drives a frame: the depth pass runs first, light
//! culling consumes its output, and only then may the shading pass read
//! the packed layers. `prepare_frame` encodes that ordering on the host
//! side and applies the fail-soft policy: any missing or unusable input
//! skips the frame's draw work entirely, leaving all state for the next
//! tick to retry from scratch.

use crate::camera::{self, CameraData};
use crate::error::CullError;
use crate::renderer::{DepthBuffer, LightSet, TileLightCuller};
use crate::world::{ChunkManager, VisibleChunk};

/// External inputs a frame needs before its draw work can run.
pub struct FrameInputs<'a> {
    /// Output of the depth-only pass; `None` while upstream resources are
    /// still loading.
    pub depth: Option<DepthBuffer<'a>>,

    /// The frame's light array, maintained by application logic.
    pub lights: &'a LightSet,
}

/// Visibility results the draw passes consume.
#[derive(Debug)]
pub struct FrameVisibility {
    pub visible_chunks: Vec<VisibleChunk>,
}

/// Whether this frame's draw work may proceed.
#[derive(Debug)]
pub enum FrameOutcome {
    /// Culling ran; the chunk list and the culler's output layers are
    /// valid for this frame.
    Ready(FrameVisibility),

    /// Draw work is skipped this tick; camera/chunk/light state updates
    /// independently and the next tick retries.
    Skipped(CullError),
}

/// Run the frame's visibility work in its mandatory order: frustum check,
/// chunk culling, then tiled light culling against the depth buffer.
pub fn prepare_frame(
    camera: &CameraData,
    chunks: &ChunkManager,
    culler: &mut TileLightCuller,
    inputs: FrameInputs<'_>,
) -> FrameOutcome {
    if camera.frustum.is_none() {
        return skip(CullError::FrustumNotReady);
    }
    let depth = match inputs.depth {
        Some(depth) => depth,
        None => return skip(CullError::MissingDepth),
    };

    let visible_chunks = chunks.visible_chunks(camera);

    let view_projection = camera::view_projection(camera, true);
    if let Err(err) = culler.cull_lights(view_projection, &depth, inputs.lights) {
        return skip(err);
    }

    FrameOutcome::Ready(FrameVisibility { visible_chunks })
}

fn skip(reason: CullError) -> FrameOutcome {
    log::debug!("[Frame] Skipping draw work: {}", reason);
    FrameOutcome::Skipped(reason)
}
