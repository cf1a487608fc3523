// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Projecting a rectangle into a node coordinate system.

use std::fmt;

use crate::geom::Num;
use crate::{ClipMode, Point, Rect, TransformChain};


/// A closed polygon that defines a clip region.
///
/// The last point is implicitly connected to the first one.
#[derive(Clone, PartialEq, Debug)]
pub struct ClipPolygon {
    points: Vec<Point>,
}

impl ClipPolygon {
    /// Creates a new polygon.
    ///
    /// Returns `None` when there are less than 3 points.
    pub fn new(points: Vec<Point>) -> Option<Self> {
        if points.len() >= 3 {
            Some(ClipPolygon { points })
        } else {
            None
        }
    }

    /// Returns polygon points.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Writes points in the `polygon/@points` notation.
impl fmt::Display for ClipPolygon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, p) in self.points.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }

            write!(f, "{},{}", Num(p.x), Num(p.y))?;
        }

        Ok(())
    }
}


/// How a clip polygon was computed.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ProjectionKind {
    /// Through the inverted cumulative transform.
    Exact,
    /// By the translation sum only. Rotation, scale and skew are lost.
    Approximate,
}


/// A reference rectangle expressed in a node's local coordinates.
#[derive(Clone, PartialEq, Debug)]
pub struct Projection {
    /// Local clip region.
    pub polygon: ClipPolygon,
    /// Computation method.
    pub kind: ProjectionKind,
}

impl Projection {
    /// Checks that the projection is approximate.
    #[inline]
    pub fn is_approximate(&self) -> bool {
        self.kind == ProjectionKind::Approximate
    }
}


/// Projects `rect`, defined in the root coordinates, into the coordinates
/// of the node described by `chain`.
///
/// Corners are produced in clockwise order starting at the top-left one.
pub fn project_rect(rect: Rect, chain: &TransformChain, mode: ClipMode) -> Projection {
    if mode == ClipMode::Inverse {
        if let Some(inv) = chain.cumulative().invert() {
            let corners = rect.corners();
            let points = corners.iter().map(|p| inv.apply_to_point(*p)).collect();
            return Projection {
                // A rect always has 4 corners.
                polygon: ClipPolygon { points },
                kind: ProjectionKind::Exact,
            };
        }
    }

    project_by_translation(rect, chain)
}

fn project_by_translation(rect: Rect, chain: &TransformChain) -> Projection {
    let (tx, ty) = chain.translation_sum();
    let corners = rect.corners();
    let points = corners.iter().map(|p| Point::new(p.x - tx, p.y - ty)).collect();
    Projection {
        polygon: ClipPolygon { points },
        kind: ProjectionKind::Approximate,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FuzzyEq, Transform};
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    fn page() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 50.0).unwrap()
    }

    fn points(list: &[(f64, f64)]) -> Vec<Point> {
        list.iter().map(|&p| p.into()).collect()
    }

    fn chain(list: &[Transform]) -> TransformChain {
        TransformChain::from_transforms(list.to_vec())
    }

    #[test]
    fn identity_chain() {
        let chain = chain(&[Transform::default(), Transform::default()]);
        let proj = project_rect(page(), &chain, ClipMode::Inverse);
        assert_eq!(proj.kind, ProjectionKind::Exact);
        assert_eq!(proj.polygon.points(), &points(&[(0.0, 0.0), (100.0, 0.0), (100.0, 50.0), (0.0, 50.0)])[..]);
    }

    #[test]
    fn translated_ancestor() {
        let chain = chain(&[Transform::new_translate(10.0, 20.0), Transform::default()]);
        let proj = project_rect(page(), &chain, ClipMode::Inverse);
        assert_eq!(proj.kind, ProjectionKind::Exact);
        assert_eq!(
            proj.polygon.points(),
            &points(&[(-10.0, -20.0), (90.0, -20.0), (90.0, 30.0), (-10.0, 30.0)])[..]
        );
    }

    #[test]
    fn scaled_ancestor() {
        let chain = chain(&[Transform::new_scale(2.0, 2.0), Transform::default()]);
        let proj = project_rect(page(), &chain, ClipMode::Inverse);
        assert_eq!(proj.kind, ProjectionKind::Exact);
        assert_eq!(proj.polygon.points(), &points(&[(0.0, 0.0), (50.0, 0.0), (50.0, 25.0), (0.0, 25.0)])[..]);
    }

    #[test]
    fn degenerate_ancestor() {
        let chain = chain(&[
            Transform::new_translate(5.0, 7.0),
            Transform::new_scale(0.0, 1.0),
            Transform::default(),
        ]);
        let proj = project_rect(page(), &chain, ClipMode::Inverse);
        assert!(proj.is_approximate());
        assert_eq!(
            proj.polygon.points(),
            &points(&[(-5.0, -7.0), (95.0, -7.0), (95.0, 43.0), (-5.0, 43.0)])[..]
        );
    }

    #[test]
    fn degenerate_fallback_is_axis_aligned() {
        let chain = chain(&[
            Transform::new_rotate(30.0),
            Transform::new(0.0, 0.0, 0.0, 0.0, 3.0, 4.0),
            Transform::new_rotate(45.0).compose(&Transform::new_translate(1.0, 2.0)),
        ]);
        let proj = project_rect(page(), &chain, ClipMode::Inverse);
        assert!(proj.is_approximate());

        let p = proj.polygon.points();
        assert_eq!(p.len(), 4);
        assert_eq!(p[0].y, p[1].y);
        assert_eq!(p[1].x, p[2].x);
        assert_eq!(p[2].y, p[3].y);
        assert_eq!(p[3].x, p[0].x);
        assert!((p[1].x - p[0].x).fuzzy_eq(&100.0));
        assert!((p[3].y - p[0].y).fuzzy_eq(&50.0));
    }

    #[test]
    fn fallback_includes_own_translation() {
        let chain = chain(&[Transform::new_scale(0.0, 1.0), Transform::new_translate(3.0, 4.0)]);
        let proj = project_rect(page(), &chain, ClipMode::Inverse);
        assert!(proj.is_approximate());
        assert_eq!(proj.polygon.points()[0], Point::new(-3.0, -4.0));
    }

    #[test]
    fn translation_only_mode() {
        let chain = chain(&[Transform::new_scale(2.0, 2.0), Transform::new_translate(1.0, 1.0)]);
        let proj = project_rect(page(), &chain, ClipMode::TranslationOnly);
        assert!(proj.is_approximate());
        assert_eq!(proj.polygon.points()[0], Point::new(-1.0, -1.0));
    }

    #[test]
    fn round_trip() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let mut transforms = Vec::new();
            for _ in 0..rng.gen_range(1..5) {
                let ts = Transform::new_translate(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0))
                    .compose(&Transform::new_rotate(rng.gen_range(-180.0..180.0)))
                    .compose(&Transform::new_scale(rng.gen_range(0.5..2.0), rng.gen_range(0.5..2.0)));
                transforms.push(ts);
            }

            let chain = TransformChain::from_transforms(transforms);
            let rect = Rect::new(
                rng.gen_range(-100.0..100.0),
                rng.gen_range(-100.0..100.0),
                rng.gen_range(0.0..300.0),
                rng.gen_range(0.0..300.0),
            ).unwrap();

            let proj = project_rect(rect, &chain, ClipMode::Inverse);
            assert_eq!(proj.kind, ProjectionKind::Exact);

            let ts = chain.cumulative();
            for (local, global) in proj.polygon.points().iter().zip(rect.corners().iter()) {
                let p = ts.apply_to_point(*local);
                assert!((p.x - global.x).abs() < 1e-9, "{:?} != {:?}", p, global);
                assert!((p.y - global.y).abs() < 1e-9, "{:?} != {:?}", p, global);
            }
        }
    }

    #[test]
    fn polygon_requires_three_points() {
        assert!(ClipPolygon::new(points(&[(0.0, 0.0), (1.0, 1.0)])).is_none());
        assert!(ClipPolygon::new(points(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0)])).is_some());
    }

    #[test]
    fn polygon_to_string() {
        let polygon = ClipPolygon::new(points(&[(-10.0, -20.0), (90.5, -20.0), (90.5, 30.0)])).unwrap();
        assert_eq!(polygon.to_string(), "-10,-20 90.5,-20 90.5,30");
    }
}
