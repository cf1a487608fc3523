// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Transform chains from the root element to a node.

use std::str::FromStr;

use crate::svgtree::{AId, Document, NodeId};
use crate::{Error, Transform, TransformTree};


/// Local transforms of a node and all its ancestors.
///
/// Ordered from the root to the node itself.
#[derive(Clone, PartialEq, Debug)]
pub struct TransformChain {
    transforms: Vec<Transform>,
}

impl TransformChain {
    /// Collects local transforms of `node` and its ancestors.
    ///
    /// Nodes without a transform contribute the default one.
    pub fn resolve<T: TransformTree>(tree: &T, node: T::Node) -> Result<Self, Error> {
        let mut transforms = Vec::new();
        let mut curr = Some(node);
        while let Some(n) = curr {
            transforms.push(tree.local_transform(n)?);
            curr = tree.parent(n);
        }

        transforms.reverse();
        Ok(TransformChain { transforms })
    }

    /// Creates a chain from transforms ordered from the root.
    pub fn from_transforms(transforms: Vec<Transform>) -> Self {
        TransformChain { transforms }
    }

    /// Returns local transforms ordered from the root.
    #[inline]
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Returns a transform from the node's coordinate system to the root one.
    ///
    /// Ancestor transforms are applied after descendant ones.
    pub fn cumulative(&self) -> Transform {
        let mut ts = Transform::default();
        for local in &self.transforms {
            ts = ts.compose(local);
        }

        ts
    }

    /// Returns the sum of translate parts of all transforms in the chain.
    ///
    /// The node's own transform is included, because `userSpaceOnUse`
    /// coordinates of the node already have it applied.
    pub fn translation_sum(&self) -> (f64, f64) {
        self.transforms.iter().fold((0.0, 0.0), |(tx, ty), ts| (tx + ts.e, ty + ts.f))
    }
}


/// Returns a transform from the node's coordinate system to the root one.
pub fn cumulative_transform<T: TransformTree>(tree: &T, node: T::Node) -> Result<Transform, Error> {
    TransformChain::resolve(tree, node).map(|chain| chain.cumulative())
}


impl TransformTree for Document {
    type Node = NodeId;

    fn local_transform(&self, node: NodeId) -> Result<Transform, Error> {
        let node = self.get(node);
        match node.attribute(AId::Transform) {
            Some(value) => {
                svgtypes::Transform::from_str(value)
                    .map(Transform::from)
                    .map_err(|_| Error::InvalidTransform {
                        id: node.element_id().to_string(),
                        value: value.to_string(),
                    })
            }
            None => Ok(Transform::default()),
        }
    }

    // The root `svg` element doesn't have a parent.
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).parent().filter(|n| n.is_element()).map(|n| n.id())
    }

    fn node_name(&self, node: NodeId) -> String {
        let node = self.get(node);
        if !node.element_id().is_empty() {
            format!("'{}'", node.element_id())
        } else if let Some(label) = node.attribute(AId::Label) {
            format!("'{}'", label)
        } else {
            format!("<{}>", node.name())
        }
    }
}
