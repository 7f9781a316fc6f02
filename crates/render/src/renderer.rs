use glam::DVec3;
use std::fmt::Write as _;
use tickworld_kernel::State;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: DVec3,
    /// Point the camera is looking at.
    pub target: DVec3,
    /// Objects further than this from the eye are culled.
    pub max_distance: f64,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: DVec3::new(0.0, 10.0, 10.0),
            target: DVec3::ZERO,
            max_distance: f64::INFINITY,
        }
    }
}

impl RenderView {
    pub fn is_visible(&self, point: DVec3) -> bool {
        self.eye.distance(point) <= self.max_distance
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the state and a view configuration, then produces
/// output. It never mutates the state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given state and view.
    fn render(&self, state: &State, view: &RenderView) -> Self::Output;
}

/// Produces a human-readable listing of every world and its visible objects,
/// nearest to the eye first. Used for logging and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, state: &State, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== State (worlds={}) ===", state.world_count());
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1})",
            view.eye.x, view.eye.y, view.eye.z, view.target.x, view.target.y, view.target.z
        );

        for world in state.worlds() {
            let _ = writeln!(
                out,
                "World {} (tick={}, gravity={:.2}, objects={})",
                world.name(),
                world.tick(),
                world.gravity(),
                world.object_count()
            );
            let mut visible: Vec<_> = world
                .objects()
                .map(|o| (view.eye.distance(o.location().position()), o))
                .filter(|(_, o)| view.is_visible(o.location().position()))
                .collect();
            visible.sort_by(|a, b| a.0.total_cmp(&b.0));
            for (_, object) in visible {
                let p = object.location().position();
                let v = object.vector();
                let _ = writeln!(
                    out,
                    "  [{}] {} pos=({:.2}, {:.2}, {:.2}) vel=({:.2}, {:.2}, {:.2})",
                    object.id().short(),
                    object.kind().name(),
                    p.x,
                    p.y,
                    p.z,
                    v.x(),
                    v.y(),
                    v.z()
                );
            }
        }

        out
    }
}
