// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Clipping elements to the page.

use crate::svgtree::{Document, EId, NodeId};
use crate::{emit, ClipSink, Error, Options, Outcome, Rect, Report, TransformChain};


/// Clips each target to `rect`, which is defined in the root coordinates.
///
/// A failure on one target doesn't affect others.
pub fn clip_to_rect<T: ClipSink>(
    tree: &mut T,
    targets: &[T::Node],
    rect: Rect,
    opt: &Options,
) -> Report<T::Node> {
    let mut report = Report::new();
    for &node in targets {
        let outcome = match clip_node(tree, node, rect, opt) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("Failed to clip {} cause {}.", tree.node_name(node), e);
                Outcome::Skipped(e)
            }
        };

        report.push(node, outcome);
    }

    log::info!("Cropping complete: {}.", report.summary());
    report
}

fn clip_node<T: ClipSink>(
    tree: &mut T,
    node: T::Node,
    rect: Rect,
    opt: &Options,
) -> Result<Outcome, Error> {
    let chain = TransformChain::resolve(tree, node)?;

    if opt.skip_contained && is_contained(tree, node, &chain, &rect) {
        log::debug!("{} is already inside the page.", tree.node_name(node));
        return Ok(Outcome::Unchanged);
    }

    let projection = crate::clip::project_rect(rect, &chain, opt.clip_mode);
    emit::emit_clip(tree, node, &projection, &opt.id_prefix)?;

    if projection.is_approximate() {
        Ok(Outcome::Degraded)
    } else {
        Ok(Outcome::Done)
    }
}

fn is_contained<T: ClipSink>(tree: &T, node: T::Node, chain: &TransformChain, rect: &Rect) -> bool {
    let bbox = match tree.local_bbox(node) {
        Some(bbox) => bbox,
        None => return false,
    };

    match bbox.bbox_transform(&chain.cumulative()) {
        Some(bbox) => rect.contains_rect(&bbox),
        None => false,
    }
}


/// Clips all renderable paths of the document to the page.
///
/// Fails only when the page size cannot be determined.
pub fn crop_to_page(doc: &mut Document, opt: &Options) -> Result<Report<NodeId>, Error> {
    let page = doc.page_rect(opt.dpi)?;
    let targets = crop_targets(doc);
    Ok(clip_to_rect(doc, &targets, page, opt))
}

/// Returns all `path` elements that are not a part of a definition.
pub fn crop_targets(doc: &Document) -> Vec<NodeId> {
    doc.descendants()
        .filter(|n| n.has_tag_name(EId::Path))
        .filter(|n| !n.ancestors().skip(1).any(|p| is_definition(p.tag_name())))
        .map(|n| n.id())
        .collect()
}

fn is_definition(tag_name: Option<EId>) -> bool {
    matches!(
        tag_name,
        Some(EId::Defs) | Some(EId::ClipPath) | Some(EId::Mask) | Some(EId::Pattern) | Some(EId::Symbol)
    )
}
