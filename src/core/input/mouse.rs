//=========================================================================
// Mouse State
//=========================================================================
//
// Last absolute cursor position plus the relative delta accumulated
// since the last explicit reset. Motion events only ever add to the
// accumulator; `warp_to_origin` is the sole reset path.
//
//=========================================================================

//=== MouseState ==========================================================

/// Tracks the cursor position and the accumulated relative delta.
pub struct MouseState {
    position: (f32, f32),
    accum_delta: (f32, f32),
}

impl MouseState {
    pub fn new() -> Self {
        Self {
            position: (0.0, 0.0),
            accum_delta: (0.0, 0.0),
        }
    }

    //--- Updates ----------------------------------------------------------

    /// Records one motion event: absolute position and relative delta.
    pub fn record_motion(&mut self, x: f32, y: f32, dx: f32, dy: f32) {
        self.position = (x, y);
        self.accum_delta.0 += dx;
        self.accum_delta.1 += dy;
    }

    /// Resets the accumulated delta to `(0, 0)`.
    pub fn warp_to_origin(&mut self) {
        self.accum_delta = (0.0, 0.0);
    }

    //--- Queries ----------------------------------------------------------

    /// Last absolute cursor position in window coordinates.
    pub fn position(&self) -> (f32, f32) {
        self.position
    }

    /// Relative motion accumulated since the last `warp_to_origin`.
    pub fn delta(&self) -> (f32, f32) {
        self.accum_delta
    }
}

impl Default for MouseState {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
