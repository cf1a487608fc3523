// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use super::{Attribute, Document, EId, NodeData, NodeId, NodeKind, SVG_NS, XMLNS_NS};
use crate::Error;

const XML_NAMESPACE_NS: &str = "http://www.w3.org/XML/1998/namespace";


pub(crate) fn parse(text: &str) -> Result<Document, Error> {
    let opt = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let xml = roxmltree::Document::parse_with_options(text, opt)?;

    let svg = xml.root_element();
    if svg.tag_name().namespace() != Some(SVG_NS) || svg.tag_name().name() != "svg" {
        return Err(Error::MissingSvgNode);
    }

    let mut doc = Document {
        nodes: Vec::new(),
        links: HashMap::new(),
        svg_prefix: svg.lookup_prefix(SVG_NS).map(|s| s.to_string()),
    };

    // Add a root node.
    doc.nodes.push(NodeData {
        parent: None,
        prev_sibling: None,
        next_sibling: None,
        children: None,
        kind: NodeKind::Root,
    });

    parse_xml_element(svg, doc.root().id(), false, &mut doc)?;

    // Collect all elements with `id` attribute.
    let mut links = HashMap::new();
    for node in doc.descendants() {
        if node.is_element() && !node.element_id().is_empty() {
            links.insert(node.element_id().to_string(), node.id());
        }
    }
    doc.links = links;

    Ok(doc)
}

fn parse_xml_element(
    node: roxmltree::Node,
    parent_id: NodeId,
    keep_spaces: bool,
    doc: &mut Document,
) -> Result<(), Error> {
    let mut attributes = Vec::new();
    append_namespaces(node, &mut attributes);

    for attr in node.attributes() {
        attributes.push(Attribute {
            name: qualified_name(node, attr.namespace(), attr.name()),
            namespace: attr.namespace().map(|s| s.to_string()),
            value: attr.value().to_string(),
        });
    }

    let tag = node.tag_name();
    let tag_name = if tag.namespace() == Some(SVG_NS) {
        EId::from_str(tag.name())
    } else {
        None
    };

    let id = doc.push_node(NodeKind::Element {
        tag_name,
        name: qualified_name(node, tag.namespace(), tag.name()),
        attributes,
    });
    doc.append(parent_id, id)?;

    let keep_spaces = keeps_whitespace(node, keep_spaces);
    for child in node.children() {
        if child.is_element() {
            parse_xml_element(child, id, keep_spaces, doc)?;
        } else if child.is_text() {
            let text = child.text().unwrap_or_default();
            // Indentation between elements.
            if !keep_spaces && text.trim().is_empty() {
                continue;
            }

            let text_id = doc.push_node(NodeKind::Text(text.to_string()));
            doc.append(id, text_id)?;
        }
    }

    Ok(())
}

// Whitespace is significant inside text content and under `xml:space="preserve"`.
fn keeps_whitespace(node: roxmltree::Node, inherited: bool) -> bool {
    let tag = node.tag_name();
    if tag.namespace() == Some(SVG_NS) && is_text_content(tag.name()) {
        return true;
    }

    match node.attribute((XML_NAMESPACE_NS, "space")) {
        Some("preserve") => true,
        Some(_) => false,
        None => inherited,
    }
}

fn is_text_content(name: &str) -> bool {
    matches!(name, "text" | "tspan" | "textPath")
}

fn qualified_name(node: roxmltree::Node, namespace: Option<&str>, local: &str) -> String {
    let prefix = match namespace {
        Some(XML_NAMESPACE_NS) => Some("xml"),
        Some(uri) => node.lookup_prefix(uri),
        None => None,
    };

    match prefix {
        Some(prefix) => format!("{}:{}", prefix, local),
        None => local.to_string(),
    }
}

// Stores namespaces declared on the element itself as `xmlns` attributes.
fn append_namespaces(node: roxmltree::Node, attributes: &mut Vec<Attribute>) {
    let parent = node.parent_element();
    for ns in node.namespaces() {
        if ns.name() == Some("xml") {
            continue;
        }

        let is_inherited = parent.map_or(false, |p| {
            p.namespaces().any(|pns| pns.name() == ns.name() && pns.uri() == ns.uri())
        });

        if is_inherited {
            continue;
        }

        let name = match ns.name() {
            Some(prefix) => format!("xmlns:{}", prefix),
            None => "xmlns".to_string(),
        };

        attributes.push(Attribute {
            name,
            namespace: Some(XMLNS_NS.to_string()),
            value: ns.uri().to_string(),
        });
    }
}
