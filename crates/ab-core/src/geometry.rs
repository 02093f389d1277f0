//! Geometry utilities: boxes, bounds, resize and transform math.
//!
//! Everything here is pure and works in canvas units. Rotation is expressed
//! in degrees, clockwise, around the centre of the box.

/// Default floor for width/height during resize gestures.
pub const DEFAULT_MIN_SIZE: f64 = 20.0;

// ─── Points & boxes ──────────────────────────────────────────────────────

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Position and size of an element (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geom {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Edges and centre lines of a box, used by guides and hit testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl Geom {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a box from two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn bounds(&self) -> Bounds {
        bounds(*self)
    }

    /// Same box moved by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// AABB overlap test.
    pub fn intersects(&self, other: &Geom) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Geom) -> Self {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Edges and centres of a box in the same space as the box.
pub fn bounds(geom: Geom) -> Bounds {
    Bounds {
        left: geom.x,
        top: geom.y,
        right: geom.x + geom.width,
        bottom: geom.y + geom.height,
        center_x: geom.x + geom.width / 2.0,
        center_y: geom.y + geom.height / 2.0,
    }
}

/// Resolve a group-relative box into canvas space by summing the ancestor
/// origins. `ancestors` may be in any order; only x/y are used.
pub fn to_absolute(geom: Geom, ancestors: &[Geom]) -> Geom {
    ancestors
        .iter()
        .fold(geom, |acc, a| acc.translate(a.x, a.y))
}

/// Smallest box containing every input box, `None` for an empty input.
pub fn union_all<I: IntoIterator<Item = Geom>>(geoms: I) -> Option<Geom> {
    geoms.into_iter().reduce(|acc, g| acc.union(&g))
}

pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

// ─── Guides ──────────────────────────────────────────────────────────────

/// Orientation of a guideline. A vertical guide is a line `x = position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Alignment line shown while dragging. Never part of the document.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Guideline {
    pub axis: Axis,
    pub position: f64,
}

// ─── Resize ──────────────────────────────────────────────────────────────

/// A resize grip on one edge or corner of the selection box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::Nw,
        Handle::N,
        Handle::Ne,
        Handle::E,
        Handle::Se,
        Handle::S,
        Handle::Sw,
        Handle::W,
    ];

    pub fn moves_left(self) -> bool {
        matches!(self, Handle::W | Handle::Nw | Handle::Sw)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Handle::E | Handle::Ne | Handle::Se)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, Handle::N | Handle::Ne | Handle::Nw)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Handle::S | Handle::Se | Handle::Sw)
    }

    pub fn is_corner(self) -> bool {
        matches!(self, Handle::Ne | Handle::Nw | Handle::Se | Handle::Sw)
    }

    /// Position of the grip as fractions of the box (0 = left/top, 1 = right/bottom).
    pub fn anchor_fraction(self) -> (f64, f64) {
        match self {
            Handle::Nw => (0.0, 0.0),
            Handle::N => (0.5, 0.0),
            Handle::Ne => (1.0, 0.0),
            Handle::E => (1.0, 0.5),
            Handle::Se => (1.0, 1.0),
            Handle::S => (0.5, 1.0),
            Handle::Sw => (0.0, 1.0),
            Handle::W => (0.0, 0.5),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Handle::N => "n",
            Handle::S => "s",
            Handle::E => "e",
            Handle::W => "w",
            Handle::Ne => "ne",
            Handle::Nw => "nw",
            Handle::Se => "se",
            Handle::Sw => "sw",
        }
    }
}

/// Resize `start` by dragging `handle` by `(dx, dy)`.
///
/// Edges the handle does not touch are unchanged and the edge opposite a
/// dragged edge stays fixed. Width/height never go below `min_size`: once the
/// floor is reached the moving edge stops, the anchor does not move.
pub fn apply_resize(start: Geom, handle: Handle, dx: f64, dy: f64, min_size: f64) -> Geom {
    let mut left = start.x;
    let mut right = start.right();
    let mut top = start.y;
    let mut bottom = start.bottom();

    if handle.moves_left() {
        left = (left + dx).min(right - min_size);
    }
    if handle.moves_right() {
        right = (right + dx).max(left + min_size);
    }
    if handle.moves_top() {
        top = (top + dy).min(bottom - min_size);
    }
    if handle.moves_bottom() {
        bottom = (bottom + dy).max(top + min_size);
    }

    Geom::new(left, top, right - left, bottom - top)
}

/// Result of a transform-handle resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleResult {
    pub geom: Geom,
    pub scale_x: f64,
    pub scale_y: f64,
}

/// Transform-style resize: the box is scaled instead of having its edges moved.
///
/// With `keep_ratio`, corner handles apply one uniform factor (the mean of
/// the per-axis factors) anchored at the opposite corner. The returned factors
/// are relative to `start` and feed [`scale_font_size`] and child rescaling.
pub fn apply_rotation_scale(
    start: Geom,
    handle: Handle,
    dx: f64,
    dy: f64,
    min_size: f64,
    keep_ratio: bool,
) -> ScaleResult {
    let free = apply_resize(start, handle, dx, dy, min_size);
    if start.width <= 0.0 || start.height <= 0.0 {
        return ScaleResult {
            geom: free,
            scale_x: 1.0,
            scale_y: 1.0,
        };
    }

    let mut scale_x = free.width / start.width;
    let mut scale_y = free.height / start.height;

    if keep_ratio && handle.is_corner() {
        let floor = (min_size / start.width).max(min_size / start.height);
        let uniform = ((scale_x + scale_y) / 2.0).max(floor);
        scale_x = uniform;
        scale_y = uniform;
    }

    let width = start.width * scale_x;
    let height = start.height * scale_y;
    let x = if handle.moves_left() {
        start.right() - width
    } else {
        start.x
    };
    let y = if handle.moves_top() {
        start.bottom() - height
    } else {
        start.y
    };

    ScaleResult {
        geom: Geom::new(x, y, width, height),
        scale_x,
        scale_y,
    }
}

/// Font size after a transform resize: proportional to the larger axis factor.
pub fn scale_font_size(size: f64, scale_x: f64, scale_y: f64) -> f64 {
    size * scale_x.max(scale_y)
}

/// Scale a box's position and size by per-axis factors (origin at 0,0).
pub fn rescale(geom: Geom, fx: f64, fy: f64) -> Geom {
    Geom::new(geom.x * fx, geom.y * fy, geom.width * fx, geom.height * fy)
}

/// Shrink `(width, height)` to fit inside a `max × max` square, keeping the
/// aspect ratio. Sizes already inside are returned as-is.
pub fn fit_within(width: f64, height: f64, max: f64) -> (f64, f64) {
    let longest = width.max(height);
    if longest <= max || longest <= 0.0 {
        return (width, height);
    }
    let k = max / longest;
    (width * k, height * k)
}

/// Clamp a box so it lies inside a `width × height` artboard. Boxes larger
/// than the artboard are pinned to the top-left.
pub fn clamp_into(geom: Geom, width: f64, height: f64) -> Geom {
    let max_x = (width - geom.width).max(0.0);
    let max_y = (height - geom.height).max(0.0);
    Geom {
        x: geom.x.clamp(0.0, max_x),
        y: geom.y.clamp(0.0, max_y),
        ..geom
    }
}

// ─── Rotation ────────────────────────────────────────────────────────────

/// Wrap an angle into `[0, 360)`.
pub fn normalize_rotation(degrees: f64) -> f64 {
    let r = degrees.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// Angle in degrees of `p` as seen from `center` (0° = +x axis, clockwise
/// because canvas y grows downward).
pub fn angle_between(center: Point, p: Point) -> f64 {
    (p.y - center.y).atan2(p.x - center.x).to_degrees()
}

/// Rotate `p` around `center` by `degrees`.
pub fn rotate_point(p: Point, center: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// Point-in-box test for a box rotated around its centre.
pub fn contains_rotated(geom: Geom, rotation: f64, p: Point) -> bool {
    if rotation == 0.0 {
        return geom.contains(p);
    }
    let local = rotate_point(p, geom.center(), -rotation);
    geom.contains(local)
}

/// Axis-aligned bounding box of a box rotated around its centre.
pub fn rotated_aabb(geom: Geom, rotation: f64) -> Geom {
    if rotation == 0.0 {
        return geom;
    }
    let c = geom.center();
    let corners = [
        Point::new(geom.x, geom.y),
        Point::new(geom.right(), geom.y),
        Point::new(geom.right(), geom.bottom()),
        Point::new(geom.x, geom.bottom()),
    ]
    .map(|p| rotate_point(p, c, rotation));

    let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    Geom::new(min_x, min_y, max_x - min_x, max_y - min_y)
}
