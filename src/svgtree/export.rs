// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use xmlwriter::XmlWriter;

use super::{Document, EId, Node};


pub(crate) fn convert(doc: &Document, opt: xmlwriter::Options) -> String {
    let mut xml = XmlWriter::new(opt);
    write_element(doc.root_element(), false, &mut xml);
    xml.end_document()
}

fn write_element(node: Node, is_preserving: bool, xml: &mut XmlWriter) {
    xml.start_element(node.name());

    for attr in node.attributes() {
        xml.write_attribute(&attr.name, &escape(&attr.value));
    }

    // Indentation would alter text content.
    let preserve = !is_preserving && keeps_whitespace(node);
    if preserve {
        xml.set_preserve_whitespaces(true);
    }

    for child in node.children() {
        if child.is_element() {
            write_element(child, is_preserving || preserve, xml);
        } else {
            xml.write_text(&escape(child.text()));
        }
    }

    xml.end_element();

    if preserve {
        xml.set_preserve_whitespaces(false);
    }
}

fn keeps_whitespace(node: Node) -> bool {
    node.has_tag_name(EId::Text)
        || node.attributes().iter().any(|a| a.name == "xml:space" && a.value == "preserve")
        || node.children().any(|n| !n.is_element())
}

// Quotes are escaped by `xmlwriter`.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;")
}
