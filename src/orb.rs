/// Rendered footprint of the orb in terminal cells.
pub const ORB_WIDTH: u16 = 9;
pub const ORB_HEIGHT: u16 = 3;

/// Pointer offset from the orb's top-left corner, captured at gesture
/// start. Exists only while a drag is active.
#[derive(Debug)]
struct DragSession {
    anchor_dx: i32,
    anchor_dy: i32,
    moved: bool,
}

/// Owns the screen coordinates of the floating orb and the active drag
/// session, if any.
///
/// Position is signed and unclamped: the orb may be dragged partially
/// off-screen; rendering clips to the frame. A press-move-release
/// gesture translates the orb by exactly the pointer delta, and a
/// release that follows any motion is never treated as a tap.
pub struct OrbController {
    x: i32,
    y: i32,
    drag: Option<DragSession>,
}

impl OrbController {
    pub fn new() -> Self {
        Self { x: 0, y: 0, drag: None }
    }

    /// Docks the orb near the bottom-right corner, mirroring the
    /// mobile layout's resting spot.
    pub fn place_default(&mut self, frame_width: u16, frame_height: u16) {
        self.x = i32::from(frame_width.saturating_sub(ORB_WIDTH + 2));
        self.y = i32::from(frame_height.saturating_sub(ORB_HEIGHT + 5));
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Whether a pointer location lands on the orb's footprint.
    pub fn hits(&self, px: u16, py: u16) -> bool {
        let (px, py) = (i32::from(px), i32::from(py));
        px >= self.x
            && px < self.x + i32::from(ORB_WIDTH)
            && py >= self.y
            && py < self.y + i32::from(ORB_HEIGHT)
    }

    pub fn on_drag_start(&mut self, px: u16, py: u16) {
        self.drag = Some(DragSession {
            anchor_dx: i32::from(px) - self.x,
            anchor_dy: i32::from(py) - self.y,
            moved: false,
        });
    }

    pub fn on_drag_move(&mut self, px: u16, py: u16) {
        let Some(session) = &mut self.drag else {
            return;
        };
        let nx = i32::from(px) - session.anchor_dx;
        let ny = i32::from(py) - session.anchor_dy;
        if (nx, ny) != (self.x, self.y) {
            session.moved = true;
        }
        self.x = nx;
        self.y = ny;
    }

    /// Ends the drag session wherever the release lands. Returns true
    /// when the gesture was a tap (no motion), which is the only case
    /// the shell honors as a toggle.
    pub fn on_drag_end(&mut self) -> bool {
        match self.drag.take() {
            Some(session) => !session.moved,
            None => false,
        }
    }
}

impl Default for OrbController {
    fn default() -> Self {
        Self::new()
    }
}
