// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Storing clip regions in a document.

use crate::svgtree::{AId, Document, EId, NodeId};
use crate::{ClipPolygon, ClipSink, Error, Point, Projection, Rect, TransformTree};


/// A clip region stored in a document.
///
/// Coordinates are always in `userSpaceOnUse` units.
#[derive(Clone, PartialEq, Debug)]
pub struct ClipDefinition {
    /// Unique ID.
    pub id: String,
    /// Clip region in the referencing element coordinates.
    pub polygon: ClipPolygon,
}


/// Stores a projected clip region and links it to the node.
///
/// Returns the new definition ID.
pub fn emit_clip<T: ClipSink>(
    sink: &mut T,
    node: T::Node,
    projection: &Projection,
    id_prefix: &str,
) -> Result<String, Error> {
    let def = ClipDefinition {
        id: sink.unique_id(id_prefix),
        polygon: projection.polygon.clone(),
    };

    sink.set_clip_region(node, &def)?;

    if projection.is_approximate() {
        log::warn!(
            "{} was clipped using translation only. Rotation, scale and skew are ignored.",
            sink.node_name(node)
        );
    } else {
        log::debug!("{} was clipped by '{}'.", sink.node_name(node), def.id);
    }

    Ok(def.id)
}


impl Document {
    /// Returns the `defs` element of the root `svg` element.
    ///
    /// Creates one when missing.
    pub fn defs_element(&mut self) -> Result<NodeId, Error> {
        let svg = self.root_element();
        if let Some(defs) = svg.children().find(|n| n.has_tag_name(EId::Defs)) {
            return Ok(defs.id());
        }

        let svg = svg.id();
        let defs = self.create_element(EId::Defs);
        self.insert_at(svg, 0, defs)?;
        Ok(defs)
    }

    /// Appends a `clipPath` element with a single `polygon` to `defs`.
    pub fn append_clip_path(&mut self, def: &ClipDefinition) -> Result<NodeId, Error> {
        let defs = self.defs_element()?;

        let clip_path = self.create_element(EId::ClipPath);
        self.set_attribute(clip_path, AId::Id, &def.id);
        self.set_attribute(clip_path, AId::ClipPathUnits, "userSpaceOnUse");
        self.append(defs, clip_path)?;

        let polygon = self.create_element(EId::Polygon);
        self.set_attribute(polygon, AId::Points, &def.polygon.to_string());
        self.append(clip_path, polygon)?;

        Ok(clip_path)
    }
}

impl ClipSink for Document {
    fn local_bbox(&self, node: NodeId) -> Option<Rect> {
        let node = self.get(node);
        if !node.has_tag_name(EId::Path) {
            return None;
        }

        path_bbox(node.attribute(AId::D)?)
    }

    fn unique_id(&self, prefix: &str) -> String {
        self.gen_unique_id(prefix)
    }

    fn set_clip_region(&mut self, node: NodeId, def: &ClipDefinition) -> Result<(), Error> {
        self.append_clip_path(def)?;

        if let Some(prev) = self.get(node).attribute(AId::ClipPath) {
            log::warn!("Replacing clip-path '{}' of {}.", prev, self.node_name(node));
        }

        self.set_attribute(node, AId::ClipPath, &format!("url(#{})", def.id));
        Ok(())
    }
}

// A bounding box of all control points.
//
// Returns `None` on empty or malformed path data.
fn path_bbox(text: &str) -> Option<Rect> {
    use svgtypes::SimplePathSegment as Segment;

    let mut points = Vec::new();
    for segment in svgtypes::SimplifyingPathParser::from(text) {
        match segment.ok()? {
            Segment::MoveTo { x, y } | Segment::LineTo { x, y } => {
                points.push(Point::new(x, y));
            }
            Segment::Quadratic { x1, y1, x, y } => {
                points.push(Point::new(x1, y1));
                points.push(Point::new(x, y));
            }
            Segment::CurveTo { x1, y1, x2, y2, x, y } => {
                points.push(Point::new(x1, y1));
                points.push(Point::new(x2, y2));
                points.push(Point::new(x, y));
            }
            Segment::ClosePath => {}
        }
    }

    Rect::from_points(&points)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::FuzzyEq;

    #[test]
    fn path_bbox_with_curves() {
        let rect = path_bbox("M 10 20 C 0 0 50 0 40 20 Z").unwrap();
        assert!(rect.fuzzy_eq(&Rect::new(0.0, 0.0, 50.0, 20.0).unwrap()));
    }

    #[test]
    fn path_bbox_relative() {
        let rect = path_bbox("m 10 10 h 20 v 5").unwrap();
        assert!(rect.fuzzy_eq(&Rect::new(10.0, 10.0, 20.0, 5.0).unwrap()));
    }

    #[test]
    fn path_bbox_invalid() {
        assert_eq!(path_bbox(""), None);
        assert_eq!(path_bbox("M 10 qwe"), None);
    }
}
