// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Moving nested containers up while keeping their rendering.

use std::collections::HashSet;

use crate::svgtree::{AId, Document, EId, NodeId};
use crate::{Error, Outcome, Report, Reparent, Transform};


/// Returns a transform for a child that is moved out of its container.
///
/// Returns `None` when the result is the default transform,
/// which means that the attribute should be removed.
pub fn absorb_transform(container: &Transform, child: &Transform) -> Option<Transform> {
    let ts = container.compose(child);
    if ts.is_default() {
        None
    } else {
        Some(ts)
    }
}


/// A flattening result.
#[derive(Clone, Debug)]
pub struct FlattenReport<N> {
    /// Results for the selected and all moved containers.
    pub report: Report<N>,
    /// Number of moved containers.
    pub moved: usize,
}


/// Moves nested groups and layers of the selected ones to be their siblings.
///
/// Moved containers are processed the same way, so after the pass
/// no selected container holds another container.
/// Rendering is not affected, because a container transform is folded
/// into each moved child.
pub fn flatten<T: Reparent>(tree: &mut T, selection: &[T::Node]) -> FlattenReport<T::Node> {
    let mut report = Report::new();
    let mut moved = 0;

    let mut queue = Vec::with_capacity(selection.len());
    for &node in selection {
        if tree.is_container(node) {
            queue.push(node);
        } else {
            log::warn!("Skipping {} - not a group or a layer.", tree.node_name(node));
            report.push(node, Outcome::Skipped(Error::NotAContainer(tree.node_name(node))));
        }
    }

    let mut processed = HashSet::new();

    // The queue grows while we iterate it.
    let mut idx = 0;
    while idx < queue.len() {
        let node = queue[idx];
        idx += 1;

        if !processed.insert(node) {
            log::debug!("{} was already processed.", tree.node_name(node));
            report.push(node, Outcome::Skipped(Error::CycleDetected));
            continue;
        }

        let outcome = match flatten_node(tree, node, &mut queue, &mut report) {
            Ok(0) => Outcome::Unchanged,
            Ok(count) => {
                moved += count;
                Outcome::Done
            }
            Err(e) => {
                log::warn!("Failed to flatten {} cause {}.", tree.node_name(node), e);
                Outcome::Skipped(e)
            }
        };

        report.push(node, outcome);
    }

    log::info!("Flattening complete. Moved {} groups/layers.", moved);
    FlattenReport { report, moved }
}

fn flatten_node<T: Reparent>(
    tree: &mut T,
    node: T::Node,
    queue: &mut Vec<T::Node>,
    report: &mut Report<T::Node>,
) -> Result<usize, Error> {
    let parent = match tree.parent(node) {
        Some(parent) => parent,
        None => return Ok(0),
    };

    let children = tree.container_children(node);
    if children.is_empty() {
        return Ok(0);
    }

    let ts = tree.local_transform(node)?;
    let position = match tree.child_index(node) {
        Some(idx) => idx + 1,
        None => return Ok(0),
    };

    // Children are inserted right after the node in reverse order,
    // so they will keep their original order.
    let mut moved = Vec::with_capacity(children.len());
    for &child in children.iter().rev() {
        match move_child(tree, child, &ts, parent, position) {
            Ok(()) => {
                log::debug!("Moved {} out of {}.", tree.node_name(child), tree.node_name(node));
                moved.push(child);
            }
            Err(e) => {
                log::warn!("Failed to move {} cause {}.", tree.node_name(child), e);
                report.push(child, Outcome::Skipped(e));
            }
        }
    }

    let count = moved.len();
    queue.extend(moved.into_iter().rev());
    Ok(count)
}

fn move_child<T: Reparent>(
    tree: &mut T,
    child: T::Node,
    container_ts: &Transform,
    new_parent: T::Node,
    position: usize,
) -> Result<(), Error> {
    let child_ts = tree.local_transform(child)?;
    let ts = absorb_transform(container_ts, &child_ts);
    tree.relocate(child, new_parent, position)?;
    tree.set_local_transform(child, ts);
    Ok(())
}


impl Reparent for Document {
    fn is_container(&self, node: NodeId) -> bool {
        self.get(node).has_tag_name(EId::G)
    }

    fn container_children(&self, node: NodeId) -> Vec<NodeId> {
        self.get(node).children().filter(|n| n.has_tag_name(EId::G)).map(|n| n.id()).collect()
    }

    fn child_index(&self, node: NodeId) -> Option<usize> {
        self.get(node).index()
    }

    fn set_local_transform(&mut self, node: NodeId, ts: Option<Transform>) {
        match ts {
            Some(ts) => self.set_attribute(node, AId::Transform, &ts.to_string()),
            None => {
                self.remove_attribute(node, AId::Transform);
            }
        }
    }

    fn relocate(&mut self, node: NodeId, new_parent: NodeId, position: usize) -> Result<(), Error> {
        self.insert_at(new_parent, position, node)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_transforms_are_omitted() {
        let ts = Transform::new_rotate(30.0).compose(&Transform::new_translate(5.0, 7.0));
        let inv = ts.invert().unwrap();
        assert_eq!(absorb_transform(&ts, &inv), None);
        assert_eq!(absorb_transform(&Transform::default(), &Transform::default()), None);
    }

    #[test]
    fn translations_are_combined() {
        let ts = absorb_transform(&Transform::new_translate(5.0, 0.0), &Transform::new_translate(0.0, 3.0));
        assert_eq!(ts, Some(Transform::new_translate(5.0, 3.0)));
    }

    #[test]
    fn container_is_applied_last() {
        let ts = absorb_transform(&Transform::new_scale(2.0, 2.0), &Transform::new_translate(1.0, 1.0));
        assert_eq!(ts, Some(Transform::new(2.0, 0.0, 0.0, 2.0, 2.0, 2.0)));
    }
}
