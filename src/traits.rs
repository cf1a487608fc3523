// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seams between the transform engine and the document that owns the nodes.

use std::fmt::Debug;
use std::hash::Hash;

use crate::emit::ClipDefinition;
use crate::{Error, Rect, Transform};


/// Read access to a hierarchy of transformed nodes.
pub trait TransformTree {
    /// A node handle.
    ///
    /// Handles are compared by identity.
    type Node: Copy + Eq + Hash + Debug;

    /// Returns the node's own transform.
    ///
    /// A node without a declared transform must return the default one.
    fn local_transform(&self, node: Self::Node) -> Result<Transform, Error>;

    /// Returns the node's parent.
    ///
    /// Returns `None` for the root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Returns a human readable node name used in logs.
    fn node_name(&self, node: Self::Node) -> String {
        format!("{:?}", node)
    }
}


/// A document that can store clip regions.
pub trait ClipSink: TransformTree {
    /// Returns the node's bounding box in its own coordinate system.
    ///
    /// Used only to skip nodes that are already inside the reference rectangle.
    fn local_bbox(&self, _node: Self::Node) -> Option<Rect> {
        None
    }

    /// Returns an ID that is not used by the document yet.
    fn unique_id(&self, prefix: &str) -> String;

    /// Stores a clip definition and links it to the node.
    ///
    /// The definition polygon is in the node's local coordinates.
    fn set_clip_region(&mut self, node: Self::Node, def: &ClipDefinition) -> Result<(), Error>;
}


/// A document that allows moving nodes between containers.
pub trait Reparent: TransformTree {
    /// Checks that the node is a group or a layer.
    fn is_container(&self, node: Self::Node) -> bool;

    /// Returns the node's direct children that are groups or layers.
    fn container_children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Returns the node's position among its siblings.
    fn child_index(&self, node: Self::Node) -> Option<usize>;

    /// Sets the node's own transform.
    ///
    /// `None` removes the transform.
    fn set_local_transform(&mut self, node: Self::Node, ts: Option<Transform>);

    /// Moves `node` into `new_parent` at the specified children position.
    fn relocate(
        &mut self,
        node: Self::Node,
        new_parent: Self::Node,
        position: usize,
    ) -> Result<(), Error>;
}
