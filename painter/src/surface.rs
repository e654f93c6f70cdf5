//! Drawing surfaces and the integer geometry they are addressed with.
//!
//! A [`Surface`] is anything that can report its size and fill an
//! axis-aligned region with a solid color. The execution loop only ever
//! talks to surfaces through this trait; [`Framebuffer`] is the in-memory
//! implementation used by the server and the tests.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

/// A pixel position in surface coordinates. The origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels, or `None` if the product overflows `usize`.
    #[must_use]
    pub fn area(self) -> Option<usize> {
        let (Ok(w), Ok(h)) = (usize::try_from(self.width), usize::try_from(self.height)) else {
            return None;
        };
        w.checked_mul(h)
    }
}

/// Half-open rectangle: `min` is inclusive, `max` is exclusive.
///
/// [`Rect::new`] swaps coordinates as needed so that `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    #[must_use]
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            min: Point::new(x1.min(x2), y1.min(y2)),
            max: Point::new(x1.max(x2), y1.max(y2)),
        }
    }

    /// The rectangle covering a surface of `size`, anchored at the origin.
    #[must_use]
    pub fn from_size(size: Size) -> Self {
        let w = i32::try_from(size.width).unwrap_or(i32::MAX);
        let h = i32::try_from(size.height).unwrap_or(i32::MAX);
        Self::new(0, 0, w, h)
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.max.x.saturating_sub(self.min.x)
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.max.y.saturating_sub(self.min.y)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Overlap of two rectangles. Disjoint rectangles yield an empty rect.
    #[must_use]
    pub fn intersect(&self, other: &Rect) -> Rect {
        let min = Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        if min.x >= max.x || min.y >= max.y {
            return Rect::default();
        }
        Rect { min, max }
    }
}

/// Straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const GREEN: Color = Color::rgb(0, 0xff, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 0xff);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// =============================================================================
// SURFACE
// =============================================================================

/// A mutable 2-D pixel target.
pub trait Surface: Send {
    /// Dimensions in pixels.
    fn size(&self) -> Size;

    /// Fill `rect` with `color`, overwriting what was there. Parts of `rect`
    /// outside [`Surface::bounds`] are ignored.
    fn fill(&mut self, rect: Rect, color: Color);

    /// The full drawable area.
    fn bounds(&self) -> Rect {
        Rect::from_size(self.size())
    }
}

/// Surface allocation failures. Always fatal at startup.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("surface size {width}x{height} has no pixels")]
    Empty { width: u32, height: u32 },
    #[error("surface size {width}x{height} is too large to allocate")]
    TooLarge { width: u32, height: u32 },
}

/// Source of drawing surfaces, handed to the execution loop at startup.
pub trait SurfaceProvider {
    type Surface: Surface + 'static;

    /// Allocate a surface of `size`, cleared to black.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the surface cannot be allocated.
    fn new_surface(&self, size: Size) -> Result<Self::Surface, SurfaceError>;
}

// =============================================================================
// FRAMEBUFFER
// =============================================================================

/// Row-major in-memory RGBA buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    size: Size,
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// # Errors
    ///
    /// Returns [`SurfaceError::Empty`] for a zero-area size and
    /// [`SurfaceError::TooLarge`] if the pixel count does not fit in memory
    /// addressing or in `i32` coordinates.
    pub fn new(size: Size) -> Result<Self, SurfaceError> {
        let Size { width, height } = size;
        if width == 0 || height == 0 {
            return Err(SurfaceError::Empty { width, height });
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(SurfaceError::TooLarge { width, height });
        }
        let area = size.area().ok_or(SurfaceError::TooLarge { width, height })?;
        Ok(Self { size, pixels: vec![Color::BLACK; area] })
    }

    /// Color at `p`, or `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, p: Point) -> Option<Color> {
        if !contains(self.bounds(), p) {
            return None;
        }
        self.index(p.x, p.y).and_then(|i| self.pixels.get(i)).copied()
    }

    /// All pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (Ok(x), Ok(y), Ok(w)) = (usize::try_from(x), usize::try_from(y), usize::try_from(self.size.width)) else {
            return None;
        };
        Some(y * w + x)
    }
}

fn contains(rect: Rect, p: Point) -> bool {
    p.x >= rect.min.x && p.x < rect.max.x && p.y >= rect.min.y && p.y < rect.max.y
}

impl Surface for Framebuffer {
    fn size(&self) -> Size {
        self.size
    }

    fn fill(&mut self, rect: Rect, color: Color) {
        let clipped = rect.intersect(&self.bounds());
        if clipped.is_empty() {
            return;
        }
        for y in clipped.min.y..clipped.max.y {
            let (Some(start), Some(end)) = (self.index(clipped.min.x, y), self.index(clipped.max.x, y)) else {
                continue;
            };
            if let Some(row) = self.pixels.get_mut(start..end) {
                row.fill(color);
            }
        }
    }
}

/// Allocates [`Framebuffer`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct FramebufferProvider;

impl SurfaceProvider for FramebufferProvider {
    type Surface = Framebuffer;

    fn new_surface(&self, size: Size) -> Result<Framebuffer, SurfaceError> {
        Framebuffer::new(size)
    }
}
