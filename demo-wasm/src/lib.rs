use wasm_bindgen::prelude::*;
use wobbly::{
    Config, Engine, Mesh, Neighbor, NeighborKind, Rect, TextureTransform, Vec2, WindowId,
    WindowKind, Workspace,
};

// ---- Wobbly Window Demo ----

/// One draggable wobbly window on a fixed-size desktop, plus a static
/// sibling window to snap against.
#[wasm_bindgen]
pub struct WobblyDemo {
    engine: Engine<f32>,
    mesh: Mesh<f32>,
    id: WindowId,
    rect: Rect<f32>,
    desktop: Rect<f32>,
    sibling: Rect<f32>,
    grabbed: bool,
    animating: bool,
}

#[wasm_bindgen]
impl WobblyDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(desktop_width: f32, desktop_height: f32) -> Self {
        let desktop = Rect::new(0.0, 0.0, desktop_width, desktop_height);
        let rect = Rect::new(
            desktop_width * 0.25,
            desktop_height * 0.25,
            desktop_width * 0.3,
            desktop_height * 0.3,
        );
        let sibling = Rect::new(desktop_width * 0.7, 0.0, desktop_width * 0.3, desktop_height);

        let mut engine = Engine::new(Config::new());
        engine
            .reset(WindowId(1), rect, desktop, WindowKind::Normal, false)
            .expect("demo window should be eligible");
        engine.set_snapping(true);

        WobblyDemo {
            engine,
            mesh: Mesh::new(),
            id: WindowId(1),
            rect,
            desktop,
            sibling,
            grabbed: false,
            animating: true,
        }
    }

    pub fn grab(&mut self, x: f32, y: f32) {
        self.engine.grab_begin(self.id, Vec2::new(x, y));
        self.grabbed = true;
        self.animating = true;
    }

    pub fn drag(&mut self, dx: f32, dy: f32) {
        if self.grabbed {
            self.engine.moved(self.id, dx, dy, true);
            self.rect.x += dx;
            self.rect.y += dy;
        }
    }

    pub fn release(&mut self) {
        self.engine.grab_end(self.id);
        self.grabbed = false;
    }

    /// Advance by `dt_ms`; returns whether another frame is needed.
    pub fn update(&mut self, dt_ms: f32) -> bool {
        let neighbors = [Neighbor::new(self.sibling, NeighborKind::Normal)];
        let ws = Workspace::new(self.desktop, &neighbors);
        match self.engine.step(self.id, dt_ms, &ws) {
            Ok(result) => {
                self.animating = result.residual_force || result.residual_velocity;
                self.animating
            }
            Err(_) => false,
        }
    }

    /// Rebuild the render mesh. Returns false when the caller should fall
    /// back to drawing the window rigidly.
    pub fn tessellate(&mut self, cell_size: f32) -> bool {
        let layers = [TextureTransform::identity()];
        self.engine
            .tessellate(self.id, &[self.rect], &layers, cell_size, 8, &mut self.mesh)
            .is_ok()
    }

    /// Flat [x0, y0, x1, y1, ..] vertex positions of the current mesh.
    pub fn positions(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.mesh.vertex_count() * 2);
        for p in &self.mesh.positions {
            out.push(p.x);
            out.push(p.y);
        }
        out
    }

    /// Flat [u0, v0, u1, v1, ..] texture coordinates of the first layer.
    pub fn tex_coords(&self) -> Vec<f32> {
        let mut out = Vec::new();
        if let Some(layer) = self.mesh.tex_coords.first() {
            out.reserve(layer.len() * 2);
            for t in layer {
                out.push(t.x);
                out.push(t.y);
            }
        }
        out
    }

    /// Quad index list, four indices per cell.
    pub fn indices(&self) -> Vec<u32> {
        self.mesh.indices.clone()
    }

    /// The static sibling rectangle, as [x, y, w, h].
    pub fn sibling_rect(&self) -> Vec<f32> {
        vec![
            self.sibling.x,
            self.sibling.y,
            self.sibling.width,
            self.sibling.height,
        ]
    }

    pub fn snapped_edges(&self) -> u32 {
        self.engine
            .model(self.id)
            .map(|m| m.snapped_total())
            .unwrap_or(0)
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }
}
