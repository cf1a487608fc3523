// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Converting child layers into plain groups.

use crate::svgtree::{AId, Document, NodeId};
use crate::{Error, Outcome, Report, TransformTree};


/// Converts direct child layers of `layer` into plain groups.
///
/// Nested layers of those children are not affected.
pub fn demote_child_layers(doc: &mut Document, layer: NodeId) -> Result<Report<NodeId>, Error> {
    if !doc.get(layer).is_layer() {
        return Err(Error::NotALayer(doc.node_name(layer)));
    }

    let children: Vec<NodeId> = doc.get(layer)
        .children()
        .filter(|n| n.is_element())
        .map(|n| n.id())
        .collect();

    let mut report = Report::new();
    for child in children {
        if doc.get(child).is_layer() {
            doc.remove_attribute(child, AId::GroupMode);
            log::debug!("{} was converted to a group.", doc.node_name(child));
            report.push(child, Outcome::Done);
        } else {
            report.push(child, Outcome::Unchanged);
        }
    }

    log::info!(
        "Converted {} layers of {} to groups.",
        report.summary().done, doc.node_name(layer)
    );

    Ok(report)
}
