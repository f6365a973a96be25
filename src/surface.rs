//! Bicubic Bezier evaluation of the deformation grid.

use crate::float::Float;
use crate::model::{Model, GRID_WIDTH};
use crate::vec::Vec2;

/// The four cubic Bernstein basis values at parameter `t`.
fn bernstein<F: Float>(t: F) -> [F; 4] {
    let one = F::one();
    let three = F::from_f32(3.0);
    let s = one - t;
    [
        s * s * s,
        three * t * s * s,
        three * t * t * s,
        t * t * t,
    ]
}

/// Evaluate the deformed surface position at normalized window coordinates
/// `(u, v)` in `[0, 1]^2`.
///
/// The 4x4 node grid acts as the control net of a bicubic Bezier patch;
/// the result is the Bernstein-weighted sum of all sixteen node positions.
/// Pure function of the current grid state: corner parameters reproduce
/// the corner nodes exactly.
pub fn eval<F: Float>(model: &Model<F>, u: F, v: F) -> Vec2<F> {
    let bu = bernstein(u);
    let bv = bernstein(v);

    let mut out = Vec2::zero();
    for (j, &weight_v) in bv.iter().enumerate() {
        for (i, &weight_u) in bu.iter().enumerate() {
            let position = model.node(j * GRID_WIDTH + i).position;
            out = out + position.scale(weight_u * weight_v);
        }
    }
    out
}
