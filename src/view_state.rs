use crate::domain::chart::Window;

/// Part of the brush the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushHandle {
    Start,
    End,
    /// The shaded selection itself; dragging pans the window.
    Selection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct BrushDrag {
    handle: BrushHandle,
    origin_px: f64,
    origin: Window,
}

/// Grab tolerance around a handle, in pixels
pub const HANDLE_HIT_PX: f64 = 6.0;

/// Brush strip geometry: maps pointer pixels to series indices.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushState {
    pub width_px: f64,
    pub len: usize,
    drag: Option<BrushDrag>,
}

impl BrushState {
    pub fn new(width_px: f64, len: usize) -> Self {
        Self { width_px, len, drag: None }
    }

    /// Pixels between two neighbouring indices.
    pub fn step_px(&self) -> f64 {
        if self.len <= 1 {
            self.width_px
        } else {
            self.width_px / (self.len - 1) as f64
        }
    }

    pub fn index_to_px(&self, index: usize) -> f64 {
        if self.len <= 1 {
            return 0.0;
        }
        index as f64 * self.step_px()
    }

    /// Nearest index, clamped onto the series.
    pub fn px_to_index(&self, px: f64) -> usize {
        if self.len <= 1 || !px.is_finite() {
            return 0;
        }
        (px / self.step_px()).round().clamp(0.0, (self.len - 1) as f64) as usize
    }

    /// Which part of the brush sits under `px`; handles win over the selection.
    pub fn hit_test(&self, px: f64, window: Window) -> Option<BrushHandle> {
        if !px.is_finite() {
            return None;
        }
        let start_px = self.index_to_px(window.start);
        let end_px = self.index_to_px(window.end);
        if (px - start_px).abs() <= HANDLE_HIT_PX && px <= end_px {
            Some(BrushHandle::Start)
        } else if (px - end_px).abs() <= HANDLE_HIT_PX {
            Some(BrushHandle::End)
        } else if px > start_px && px < end_px {
            Some(BrushHandle::Selection)
        } else {
            None
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn begin_drag(&mut self, handle: BrushHandle, px: f64, window: Window) {
        self.drag = Some(BrushDrag { handle, origin_px: px, origin: window });
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Window produced by moving the pointer to `px`; always inside `[0, len-1]`.
    pub fn drag_to(&self, px: f64) -> Option<(usize, usize)> {
        let drag = self.drag?;
        if self.len == 0 || !px.is_finite() {
            return None;
        }
        let last = (self.len - 1) as i64;
        let delta = ((px - drag.origin_px) / self.step_px()).round() as i64;
        let end = drag.origin.end.min(self.len - 1) as i64;
        let start = (drag.origin.start as i64).min(end);

        let (start, end) = match drag.handle {
            BrushHandle::Start => ((start + delta).clamp(0, end), end),
            BrushHandle::End => (start, (end + delta).clamp(start, last)),
            BrushHandle::Selection => {
                let shift = delta.clamp(-start, last - end);
                (start + shift, end + shift)
            }
        };
        Some((start as usize, end as usize))
    }
}
