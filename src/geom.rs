// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

use float_cmp::ApproxEq;

/// An absolute tolerance used by all fuzzy comparisons.
const EPSILON: f64 = 1e-9;

/// Transforms with a smaller determinant are treated as non-invertible.
const DET_EPSILON: f64 = 1e-12;


/// A fuzzy comparison trait.
pub trait FuzzyEq<Rhs: ?Sized = Self> {
    /// Returns `true` if values are approximately equal.
    fn fuzzy_eq(&self, other: &Rhs) -> bool;
}

impl FuzzyEq for f64 {
    #[inline]
    fn fuzzy_eq(&self, other: &f64) -> bool {
        self.approx_eq(*other, (EPSILON, 4))
    }
}

/// A fuzzy zero check.
pub trait FuzzyZero: FuzzyEq {
    /// Returns `true` if the number is approximately zero.
    fn is_fuzzy_zero(&self) -> bool;
}

impl FuzzyZero for f64 {
    #[inline]
    fn is_fuzzy_zero(&self) -> bool {
        self.fuzzy_eq(&0.0)
    }
}


/// A 2D point representation.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new `Point` from values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from(v: (f64, f64)) -> Self {
        Point::new(v.0, v.1)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Point({} {})", self.x, self.y)
    }
}

impl FuzzyEq for Point {
    fn fuzzy_eq(&self, other: &Self) -> bool {
           self.x.fuzzy_eq(&other.x)
        && self.y.fuzzy_eq(&other.y)
    }
}


/// A rect representation.
///
/// Width and height are guaranteed to be finite and non-negative.
#[derive(Clone, Copy, PartialEq)]
pub struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    /// Creates a new `Rect` from values.
    ///
    /// Returns `None` when the size is negative or any value is not finite.
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Option<Self> {
        let is_finite = x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite();
        if is_finite && width >= 0.0 && height >= 0.0 {
            Some(Rect { x, y, width, height })
        } else {
            None
        }
    }

    /// Creates a new `Rect` from bounding values.
    #[inline]
    pub fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Option<Self> {
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Returns the smallest `Rect` that contains all points.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut left = first.x;
        let mut top = first.y;
        let mut right = first.x;
        let mut bottom = first.y;
        for p in &points[1..] {
            left = left.min(p.x);
            top = top.min(p.y);
            right = right.max(p.x);
            bottom = bottom.max(p.y);
        }

        Rect::from_ltrb(left, top, right, bottom)
    }

    /// Returns rect's X position.
    #[inline]
    pub fn x(&self) -> f64 { self.x }

    /// Returns rect's Y position.
    #[inline]
    pub fn y(&self) -> f64 { self.y }

    /// Returns rect's width.
    #[inline]
    pub fn width(&self) -> f64 { self.width }

    /// Returns rect's height.
    #[inline]
    pub fn height(&self) -> f64 { self.height }

    /// Returns rect's left edge position.
    #[inline]
    pub fn left(&self) -> f64 { self.x }

    /// Returns rect's right edge position.
    #[inline]
    pub fn right(&self) -> f64 { self.x + self.width }

    /// Returns rect's top edge position.
    #[inline]
    pub fn top(&self) -> f64 { self.y }

    /// Returns rect's bottom edge position.
    #[inline]
    pub fn bottom(&self) -> f64 { self.y + self.height }

    /// Returns rect's corners in clockwise order starting at the top-left one.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left(), self.bottom()),
        ]
    }

    /// Checks that `other` lies inside the current rect.
    ///
    /// Touching edges are considered to be inside.
    pub fn contains_rect(&self, other: &Rect) -> bool {
           (other.left() > self.left() || other.left().fuzzy_eq(&self.left()))
        && (other.top() > self.top() || other.top().fuzzy_eq(&self.top()))
        && (other.right() < self.right() || other.right().fuzzy_eq(&self.right()))
        && (other.bottom() < self.bottom() || other.bottom().fuzzy_eq(&self.bottom()))
    }

    /// Transforms the rect and returns a bounding box of the result.
    pub fn bbox_transform(&self, ts: &Transform) -> Option<Self> {
        let corners = self.corners();
        let mapped = [
            ts.apply_to_point(corners[0]),
            ts.apply_to_point(corners[1]),
            ts.apply_to_point(corners[2]),
            ts.apply_to_point(corners[3]),
        ];
        Rect::from_points(&mapped)
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Rect({} {} {} {})", self.x, self.y, self.width, self.height)
    }
}

impl FuzzyEq for Rect {
    fn fuzzy_eq(&self, other: &Self) -> bool {
           self.x.fuzzy_eq(&other.x)
        && self.y.fuzzy_eq(&other.y)
        && self.width.fuzzy_eq(&other.width)
        && self.height.fuzzy_eq(&other.height)
    }
}


/// Representation of the [`<transform>`] type.
///
/// An affine matrix with an implicit `[0 0 1]` bottom row:
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
///
/// [`<transform>`]: https://www.w3.org/TR/SVG2/coords.html#InterfaceSVGTransform
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl From<svgtypes::Transform> for Transform {
    fn from(ts: svgtypes::Transform) -> Self {
        Transform::new(ts.a, ts.b, ts.c, ts.d, ts.e, ts.f)
    }
}

impl Transform {
    /// Constructs a new transform.
    #[inline]
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Transform { a, b, c, d, e, f, }
    }

    /// Constructs a new translate transform.
    #[inline]
    pub fn new_translate(x: f64, y: f64) -> Self {
        Transform::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Constructs a new scale transform.
    #[inline]
    pub fn new_scale(sx: f64, sy: f64) -> Self {
        Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Constructs a new rotate transform.
    #[inline]
    pub fn new_rotate(angle: f64) -> Self {
        let v = angle.to_radians();
        let a =  v.cos();
        let b =  v.sin();
        let c = -b;
        let d =  a;
        Transform::new(a, b, c, d, 0.0, 0.0)
    }

    /// Returns `self · other`.
    ///
    /// The result maps a point through `other` first and through `self` second.
    #[inline]
    pub fn compose(&self, other: &Transform) -> Transform {
        multiply(self, other)
    }

    /// Returns the matrix determinant.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Checks that the transform can be inverted.
    #[inline]
    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det.is_finite() && det.abs() >= DET_EPSILON
    }

    /// Returns an inverted transform.
    ///
    /// Returns `None` for degenerate transforms, like a zero scale.
    pub fn invert(&self) -> Option<Transform> {
        if !self.is_invertible() {
            return None;
        }

        let det = self.determinant();
        let a =  self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d =  self.a / det;
        let e = -(a * self.e + c * self.f);
        let f = -(b * self.e + d * self.f);
        Some(Transform::new(a, b, c, d, e, f))
    }

    /// Returns `true` if the transform is default, aka `(1 0 0 1 0 0)`.
    pub fn is_default(&self) -> bool {
           self.a.fuzzy_eq(&1.0)
        && self.b.is_fuzzy_zero()
        && self.c.is_fuzzy_zero()
        && self.d.fuzzy_eq(&1.0)
        && self.e.is_fuzzy_zero()
        && self.f.is_fuzzy_zero()
    }

    /// Returns `true` if the transform contains only translate part, aka `(1 0 0 1 x y)`.
    pub fn is_translate(&self) -> bool {
           self.a.fuzzy_eq(&1.0)
        && self.b.is_fuzzy_zero()
        && self.c.is_fuzzy_zero()
        && self.d.fuzzy_eq(&1.0)
    }

    /// Returns `true` if the transform contains only scale part, aka `(sx 0 0 sy 0 0)`.
    pub fn is_scale(&self) -> bool {
           self.b.is_fuzzy_zero()
        && self.c.is_fuzzy_zero()
        && self.e.is_fuzzy_zero()
        && self.f.is_fuzzy_zero()
    }

    /// Applies transform to selected coordinates.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let new_x = self.a * x + self.c * y + self.e;
        let new_y = self.b * x + self.d * y + self.f;
        (new_x, new_y)
    }

    /// Applies transform to a point.
    #[inline]
    pub fn apply_to_point(&self, p: Point) -> Point {
        self.apply(p.x, p.y).into()
    }
}

#[inline(never)]
fn multiply(ts1: &Transform, ts2: &Transform) -> Transform {
    Transform {
        a: ts1.a * ts2.a + ts1.c * ts2.b,
        b: ts1.b * ts2.a + ts1.d * ts2.b,
        c: ts1.a * ts2.c + ts1.c * ts2.d,
        d: ts1.b * ts2.c + ts1.d * ts2.d,
        e: ts1.a * ts2.e + ts1.c * ts2.f + ts1.e,
        f: ts1.b * ts2.e + ts1.d * ts2.f + ts1.f,
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Transform {
        Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}

impl FuzzyEq for Transform {
    fn fuzzy_eq(&self, other: &Self) -> bool {
           self.a.fuzzy_eq(&other.a)
        && self.b.fuzzy_eq(&other.b)
        && self.c.fuzzy_eq(&other.c)
        && self.d.fuzzy_eq(&other.d)
        && self.e.fuzzy_eq(&other.e)
        && self.f.fuzzy_eq(&other.f)
    }
}

/// Writes the transform in the SVG notation.
///
/// Pure translations and scales are written using the short forms.
impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_translate() {
            write!(f, "translate({} {})", Num(self.e), Num(self.f))
        } else if self.is_scale() {
            write!(f, "scale({} {})", Num(self.a), Num(self.d))
        } else {
            write!(
                f, "matrix({} {} {} {} {} {})",
                Num(self.a), Num(self.b), Num(self.c), Num(self.d), Num(self.e), Num(self.f)
            )
        }
    }
}


/// A number formatter that never writes negative zero.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 == 0.0 {
            write!(f, "0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    fn random_transform(rng: &mut StdRng) -> Transform {
        Transform::new(
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-100.0..100.0),
            rng.gen_range(-100.0..100.0),
        )
    }

    fn assert_close(ts1: &Transform, ts2: &Transform, tolerance: f64) {
        let pairs = [
            (ts1.a, ts2.a), (ts1.b, ts2.b), (ts1.c, ts2.c),
            (ts1.d, ts2.d), (ts1.e, ts2.e), (ts1.f, ts2.f),
        ];
        for (v1, v2) in pairs.iter() {
            assert!((v1 - v2).abs() <= tolerance, "{:?} != {:?}", ts1, ts2);
        }
    }

    #[test]
    fn identity_is_neutral() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let ts = random_transform(&mut rng);
            assert_eq!(ts.compose(&Transform::default()), ts);
            assert_eq!(Transform::default().compose(&ts), ts);
        }
    }

    #[test]
    fn compose_is_associative() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let ts1 = random_transform(&mut rng);
            let ts2 = random_transform(&mut rng);
            let ts3 = random_transform(&mut rng);
            let left = ts1.compose(&ts2).compose(&ts3);
            let right = ts1.compose(&ts2.compose(&ts3));
            assert_close(&left, &right, 1e-6);
        }
    }

    #[test]
    fn compose_applies_right_operand_first() {
        let ts = Transform::new_translate(10.0, 0.0).compose(&Transform::new_scale(2.0, 2.0));
        assert_eq!(ts.apply(1.0, 1.0), (12.0, 2.0));

        let ts = Transform::new_scale(2.0, 2.0).compose(&Transform::new_translate(10.0, 0.0));
        assert_eq!(ts.apply(1.0, 1.0), (22.0, 2.0));
    }

    #[test]
    fn invert_round_trip() {
        let ts = Transform::new_rotate(30.0)
            .compose(&Transform::new_scale(2.0, 0.5))
            .compose(&Transform::new_translate(15.0, -7.0));
        let inv = ts.invert().unwrap();
        assert!(ts.compose(&inv).is_default());
        assert!(inv.compose(&ts).is_default());
    }

    #[test]
    fn invert_degenerate() {
        assert!(Transform::new_scale(0.0, 1.0).invert().is_none());
        assert!(Transform::new_scale(1.0, 0.0).invert().is_none());
        assert!(Transform::new(1.0, 2.0, 2.0, 4.0, 0.0, 0.0).invert().is_none());
        assert!(Transform::new_scale(1e-7, 1e-7).invert().is_none());
    }

    #[test]
    fn apply_point() {
        let ts = Transform::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(ts.apply(1.0, 1.0), (9.0, 12.0));
    }

    #[test]
    fn fuzzy_default() {
        let ts = Transform::new_rotate(30.0).compose(&Transform::new_rotate(-30.0));
        assert!(ts.is_default());
        assert!(!Transform::new_translate(0.001, 0.0).is_default());
    }

    macro_rules! test_display {
        ($name:ident, $ts:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!($ts.to_string(), $result);
            }
        )
    }

    test_display!(display_translate,
        Transform::new_translate(5.0, 3.0),
        "translate(5 3)"
    );

    test_display!(display_negative_zero,
        Transform::new_translate(-0.0, 2.5),
        "translate(0 2.5)"
    );

    test_display!(display_scale,
        Transform::new_scale(2.0, 3.0),
        "scale(2 3)"
    );

    test_display!(display_matrix,
        Transform::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0),
        "matrix(1 2 3 4 5 6)"
    );

    #[test]
    fn rect_validation() {
        assert!(Rect::new(0.0, 0.0, -1.0, 1.0).is_none());
        assert!(Rect::new(0.0, 0.0, 1.0, f64::NAN).is_none());
        assert!(Rect::new(0.0, 0.0, 0.0, 0.0).is_some());
    }

    #[test]
    fn rect_contains_rect() {
        let page = Rect::new(0.0, 0.0, 100.0, 50.0).unwrap();
        assert!(page.contains_rect(&page));
        assert!(page.contains_rect(&Rect::new(10.0, 10.0, 10.0, 10.0).unwrap()));
        assert!(!page.contains_rect(&Rect::new(95.0, 10.0, 10.0, 10.0).unwrap()));
        assert!(!page.contains_rect(&Rect::new(-1.0, 10.0, 10.0, 10.0).unwrap()));
    }

    #[test]
    fn rect_bbox_transform() {
        let r = Rect::new(0.0, 0.0, 10.0, 20.0).unwrap();
        let bbox = r.bbox_transform(&Transform::new_rotate(90.0)).unwrap();
        assert!(bbox.fuzzy_eq(&Rect::new(-20.0, 0.0, 20.0, 10.0).unwrap()));
    }
}
