//! Render mesh generation: sampling the deformed surface over clip
//! rectangles into vertices, texture coordinates, and quad indices.

use crate::error::EngineError;
use crate::float::Float;
use crate::geometry::Rect;
use crate::model::Model;
use crate::surface;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Affine texture-space transform of one texture layer.
///
/// Texture coordinates for a screen point `(x, y)` are
/// `(xx*x + xy*y + x0, yx*x + yy*y + y0)`. When the transform carries no
/// shear (`xy == yx == 0`) the tessellator uses the cheaper per-axis form.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextureTransform<F: Float> {
    pub xx: F,
    pub xy: F,
    pub yx: F,
    pub yy: F,
    pub x0: F,
    pub y0: F,
}

impl<F: Float> TextureTransform<F> {
    /// The identity transform: texture coordinates equal screen coordinates.
    pub fn identity() -> Self {
        TextureTransform {
            xx: F::one(),
            xy: F::zero(),
            yx: F::zero(),
            yy: F::one(),
            x0: F::zero(),
            y0: F::zero(),
        }
    }

    /// An axis-aligned transform scaling by `(sx, sy)` and translating by
    /// `(tx, ty)`, the common case of an unrotated window texture.
    pub fn axis_aligned(sx: F, sy: F, tx: F, ty: F) -> Self {
        TextureTransform {
            xx: sx,
            xy: F::zero(),
            yx: F::zero(),
            yy: sy,
            x0: tx,
            y0: ty,
        }
    }

    /// Whether the transform has no shear component.
    pub fn is_axis_aligned(&self) -> bool {
        self.xy == F::zero() && self.yx == F::zero()
    }

    /// Texture coordinates via the general affine formula.
    pub fn coord(&self, x: F, y: F) -> Vec2<F> {
        Vec2::new(
            self.xx * x + self.xy * y + self.x0,
            self.yx * x + self.yy * y + self.y0,
        )
    }

    /// Texture coordinates assuming no shear.
    pub fn coord_axis_aligned(&self, x: F, y: F) -> Vec2<F> {
        Vec2::new(self.xx * x + self.x0, self.yy * y + self.y0)
    }
}

/// Render-ready geometry for one window.
///
/// Buffers are reused across frames: `tessellate` clears them but keeps
/// their capacity, and grows them fallibly so an allocation failure
/// surfaces as [`EngineError::BufferAllocation`] instead of aborting.
#[derive(Clone, Debug, Default)]
pub struct Mesh<F: Float> {
    /// Deformed vertex positions in screen space.
    pub positions: AllocVec<Vec2<F>>,
    /// One texture-coordinate stream per texture layer, parallel to
    /// `positions`.
    pub tex_coords: AllocVec<AllocVec<Vec2<F>>>,
    /// Quad index list: four indices per cell, wound clockwise from the
    /// top-left vertex.
    pub indices: AllocVec<u32>,
}

impl<F: Float> Mesh<F> {
    pub fn new() -> Self {
        Mesh {
            positions: AllocVec::new(),
            tex_coords: AllocVec::new(),
            indices: AllocVec::new(),
        }
    }

    /// Drop all geometry but keep the allocations.
    pub fn clear(&mut self) {
        self.positions.clear();
        for layer in self.tex_coords.iter_mut() {
            layer.clear();
        }
        self.indices.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn quad_count(&self) -> usize {
        self.indices.len() / 4
    }
}

/// Generate the deformed mesh for `model` over the supplied clip
/// rectangles.
///
/// Each clip is sampled on a regular lattice: the cell edge is `cell_size`,
/// shrunk so the window still spans at least `min_cell_count` cells per
/// axis and very small windows deform visibly. Every lattice point maps to
/// window-local `(u, v)`, is pushed through the Bezier evaluator (plus the
/// model's scale transform when one is set), and gets texture coordinates
/// from each layer, via the cheap per-axis formula for shear-free layers.
///
/// `cell_size` must be positive; `min_cell_count` of zero is treated as
/// one.
pub fn tessellate<F: Float>(
    model: &Model<F>,
    clips: &[Rect<F>],
    layers: &[TextureTransform<F>],
    cell_size: F,
    min_cell_count: usize,
    mesh: &mut Mesh<F>,
) -> Result<(), EngineError> {
    if mesh.tex_coords.len() != layers.len() {
        mesh.tex_coords.clear();
        for _ in 0..layers.len() {
            mesh.tex_coords.push(AllocVec::new());
        }
    }
    mesh.clear();

    let rect = model.rect();
    let min_cells = F::from_f32(min_cell_count.max(1) as f32);
    let step_x = cell_size.min(rect.width / min_cells);
    let step_y = cell_size.min(rect.height / min_cells);

    for clip in clips {
        let clip = match clip.intersection(&rect) {
            Some(c) => c,
            None => continue,
        };

        let cols = (clip.width / step_x).ceil().to_f32() as usize + 1;
        let rows = (clip.height / step_y).ceil().to_f32() as usize + 1;
        let vertex_count = cols * rows;

        mesh.positions
            .try_reserve(vertex_count)
            .map_err(|_| EngineError::BufferAllocation)?;
        for layer in mesh.tex_coords.iter_mut() {
            layer
                .try_reserve(vertex_count)
                .map_err(|_| EngineError::BufferAllocation)?;
        }
        mesh.indices
            .try_reserve((cols - 1) * (rows - 1) * 4)
            .map_err(|_| EngineError::BufferAllocation)?;

        let base = mesh.positions.len() as u32;
        let scale = model.scale();
        let origin = model.scale_origin();

        for row in 0..rows {
            let y = (clip.y + step_y * F::from_f32(row as f32)).min(clip.bottom());
            let v = ((y - rect.y) / rect.height).clamp(F::zero(), F::one());

            for col in 0..cols {
                let x = (clip.x + step_x * F::from_f32(col as f32)).min(clip.right());
                let u = ((x - rect.x) / rect.width).clamp(F::zero(), F::one());

                let mut deformed = surface::eval(model, u, v);
                if model.transformed() {
                    deformed = Vec2::new(
                        origin.x + (deformed.x - origin.x) * scale.x,
                        origin.y + (deformed.y - origin.y) * scale.y,
                    );
                }
                mesh.positions.push(deformed);

                // Texture coordinates sample the undeformed lattice point,
                // so the texture stretches with the sheet.
                for (li, layer) in layers.iter().enumerate() {
                    let tc = if layer.is_axis_aligned() {
                        layer.coord_axis_aligned(x, y)
                    } else {
                        layer.coord(x, y)
                    };
                    mesh.tex_coords[li].push(tc);
                }
            }
        }

        for row in 0..rows - 1 {
            for col in 0..cols - 1 {
                let tl = base + (row * cols + col) as u32;
                let tr = tl + 1;
                let bl = tl + cols as u32;
                let br = bl + 1;
                mesh.indices.push(tl);
                mesh.indices.push(tr);
                mesh.indices.push(br);
                mesh.indices.push(bl);
            }
        }
    }

    Ok(())
}
