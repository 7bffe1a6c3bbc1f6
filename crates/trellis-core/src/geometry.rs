#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    pub fn translated(&self, d: Vec2) -> Rect {
        Rect::new(self.x + d.x, self.y + d.y, self.w, self.h)
    }

    /// Intersection with `other`; degenerate (zero-size) when disjoint.
    pub fn clip(&self, other: &Rect) -> Rect {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.w).min(other.x + other.w);
        let y2 = (self.y + self.h).min(other.y + other.h);
        Rect::new(x1, y1, (x2 - x1).max(0.0), (y2 - y1).max(0.0))
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }
}

/// Which point of a widget's box sits at its (x, y) coordinate.
///
/// A plain pixel offset or a percentage of the widget's own extent on that
/// axis. `Anchor::parse` follows the stylesheet convention: `"12"` is pixels,
/// `"50%"` is a percentage, anything unparsable resolves to a zero offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    Px(f32),
    Percent(f32),
}

impl Default for Anchor {
    fn default() -> Self {
        Anchor::Px(0.0)
    }
}

impl Anchor {
    pub fn parse(value: &str) -> Anchor {
        let v = value.trim();
        if let Some(p) = v.strip_suffix('%') {
            match p.trim().parse::<f32>() {
                Ok(p) => Anchor::Percent(p),
                Err(_) => Anchor::Px(0.0),
            }
        } else {
            match v.parse::<f32>() {
                Ok(px) => Anchor::Px(px),
                Err(_) => Anchor::Px(0.0),
            }
        }
    }

    /// Offset in pixels for a widget of the given extent.
    pub fn resolve(&self, size: f32) -> f32 {
        match *self {
            Anchor::Px(v) => v,
            Anchor::Percent(p) => (p / 100.0 * size).floor(),
        }
    }
}

/// Bounding box for a widget: anchor offsets are subtracted from (x, y).
/// Pure function of its inputs; callers re-run it whenever any input changes.
pub fn resolve_rect(x: f32, y: f32, w: f32, h: f32, anchor_x: Anchor, anchor_y: Anchor) -> Rect {
    Rect::new(x - anchor_x.resolve(w), y - anchor_y.resolve(h), w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_parse_pixels_and_percent() {
        assert_eq!(Anchor::parse("12"), Anchor::Px(12.0));
        assert_eq!(Anchor::parse("50%"), Anchor::Percent(50.0));
        assert_eq!(Anchor::parse(" 25 % "), Anchor::Percent(25.0));
    }

    #[test]
    fn anchor_parse_malformed_is_zero() {
        assert_eq!(Anchor::parse(""), Anchor::Px(0.0));
        assert_eq!(Anchor::parse("abc"), Anchor::Px(0.0));
        assert_eq!(Anchor::parse("x%"), Anchor::Px(0.0));
        assert_eq!(Anchor::parse("%"), Anchor::Px(0.0));
    }

    #[test]
    fn anchor_percent_resolves_floored() {
        assert_eq!(Anchor::Percent(50.0).resolve(33.0), 16.0);
        assert_eq!(Anchor::Percent(100.0).resolve(33.0), 33.0);
        assert_eq!(Anchor::Percent(0.0).resolve(33.0), 0.0);
        assert_eq!(Anchor::parse("bogus").resolve(200.0), 0.0);
    }

    #[test]
    fn rect_from_centered_anchor() {
        let r = resolve_rect(100.0, 80.0, 40.0, 20.0, Anchor::Percent(50.0), Anchor::Percent(50.0));
        assert_eq!(r, Rect::new(80.0, 70.0, 40.0, 20.0));
    }

    #[test]
    fn rect_contains_and_clip() {
        let r = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(r.contains(Vec2::new(50.0, 30.0)));
        assert!(!r.contains(Vec2::new(5.0, 30.0)));
        let clipped = r.clip(&Rect::new(0.0, 0.0, 40.0, 40.0));
        assert_eq!(clipped, Rect::new(10.0, 10.0, 30.0, 30.0));
        assert!(r.clip(&Rect::new(500.0, 500.0, 10.0, 10.0)).is_empty());
    }
}
