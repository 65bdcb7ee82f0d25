// src/mask.rs
//
// Dim layer painting shared by the preview and selection overlays.

use druid::{Color, PaintCtx, Rect, RenderContext, Scalable, Scale};

use crate::brightness::BrightnessLevel;
use crate::config::MaskDefaults;
use crate::selection_logic::{SelectionRect, SelectionState};

/// Primitives every overlay is painted with.
pub trait MaskCanvas {
    /// Erase the whole surface, the window background is transparent.
    fn clear_all(&mut self);
    /// Black at `alpha`, blended source-over across the whole surface.
    fn fill_all(&mut self, alpha: u8);
    /// 1px white border along the edges of `rect`.
    fn outline(&mut self, rect: SelectionRect);
    /// Erase `rect` to fully transparent. Never blends.
    fn clear_rect(&mut self, rect: SelectionRect);
}

/// Preview overlay: a flat dim layer at the snapshot taken when it opened.
pub fn paint_preview<C: MaskCanvas>(canvas: &mut C, alpha: u8) {
    canvas.clear_all();
    canvas.fill_all(alpha);
}

/// Selection overlay. `live` is read at paint time so Ctrl+wheel changes show
/// up immediately once the region is confirmed.
pub fn paint_selection<C: MaskCanvas>(canvas: &mut C, state: &SelectionState, live: BrightnessLevel) {
    canvas.clear_all();
    match *state {
        SelectionState::Idle => canvas.fill_all(MaskDefaults::SELECTING_ALPHA),
        SelectionState::Dragging { rect, .. } | SelectionState::PendingConfirm { rect } => {
            canvas.fill_all(MaskDefaults::SELECTING_ALPHA);
            if !rect.is_empty() {
                canvas.clear_rect(rect);
                canvas.outline(rect);
            }
        }
        SelectionState::Confirmed { rect } => {
            canvas.fill_all(live.get());
            if !rect.is_empty() {
                canvas.clear_rect(rect);
            }
        }
    }
}

fn to_druid_rect(rect: SelectionRect) -> Rect {
    Rect::new(
        rect.x as f64,
        rect.y as f64,
        rect.right() as f64,
        rect.bottom() as f64,
    )
}

/// `clear` skips the paint transform, so the hole is cut in device pixels.
fn device_rect(rect: SelectionRect, scale: Scale) -> Rect {
    to_druid_rect(rect).to_px(scale)
}

impl MaskCanvas for PaintCtx<'_, '_, '_> {
    fn clear_all(&mut self) {
        self.render_ctx.clear(None, Color::TRANSPARENT);
    }

    fn fill_all(&mut self, alpha: u8) {
        let full_rect = self.size().to_rect();
        self.fill(full_rect, &Color::rgba8(0, 0, 0, alpha));
    }

    fn outline(&mut self, rect: SelectionRect) {
        // stroke 落在像素中心，内缩半个像素保证边框在选区边缘上
        let r = to_druid_rect(rect).inset(-0.5);
        self.stroke(r, &Color::WHITE, 1.0);
    }

    fn clear_rect(&mut self, rect: SelectionRect) {
        let hole = device_rect(rect, self.scale());
        self.render_ctx.clear(hole, Color::TRANSPARENT);
    }
}
