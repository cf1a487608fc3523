use svgclip::svgtree::{AId, Document, NodeId};
use svgclip::{Error, Outcome};

fn node(doc: &Document, id: &str) -> NodeId {
    doc.element_by_id(id).unwrap().id()
}

#[test]
fn child_layers() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'
         xmlns:inkscape='http://www.inkscape.org/namespaces/inkscape'>
        <g id='root' inkscape:groupmode='layer' inkscape:label='Root'>
            <g id='layer1' inkscape:groupmode='layer' inkscape:label='Layer 1'>
                <g id='layer2' inkscape:groupmode='layer'/>
            </g>
            <g id='g1'/>
            <path id='path1'/>
        </g>
    </svg>
    ";

    let mut doc = Document::parse_str(svg).unwrap();
    let root = node(&doc, "root");
    let report = svgclip::demote_child_layers(&mut doc, root).unwrap();

    assert_eq!(report.outcome(node(&doc, "layer1")), Some(&Outcome::Done));
    assert_eq!(report.outcome(node(&doc, "g1")), Some(&Outcome::Unchanged));
    assert_eq!(report.outcome(node(&doc, "path1")), Some(&Outcome::Unchanged));
    assert_eq!(report.summary().done, 1);

    let layer1 = doc.element_by_id("layer1").unwrap();
    assert!(!layer1.is_layer());
    assert!(!layer1.has_attribute(AId::GroupMode));
    assert_eq!(layer1.attribute(AId::Label), Some("Layer 1"));
    assert!(doc.element_by_id("layer2").unwrap().is_layer());
    assert!(doc.element_by_id("root").unwrap().is_layer());

    // Survives a round trip.
    let doc = Document::parse_str(&doc.to_string(xmlwriter::Options::default())).unwrap();
    assert!(!doc.element_by_id("layer1").unwrap().is_layer());
    assert!(doc.element_by_id("layer2").unwrap().is_layer());
}

#[test]
fn custom_prefix() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'
         xmlns:ink='http://www.inkscape.org/namespaces/inkscape'>
        <g id='root' ink:groupmode='layer'>
            <g id='layer1' ink:groupmode='layer'/>
        </g>
    </svg>
    ";

    let mut doc = Document::parse_str(svg).unwrap();
    let root = node(&doc, "root");
    svgclip::demote_child_layers(&mut doc, root).unwrap();
    assert!(!doc.element_by_id("layer1").unwrap().is_layer());
}

#[test]
fn foreign_groupmode_is_ignored() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'
         xmlns:inkscape='http://www.inkscape.org/namespaces/inkscape'
         xmlns:other='http://example.com/other'>
        <g id='root' inkscape:groupmode='layer'>
            <g id='g1' other:groupmode='layer'/>
        </g>
    </svg>
    ";

    let mut doc = Document::parse_str(svg).unwrap();
    let root = node(&doc, "root");
    let report = svgclip::demote_child_layers(&mut doc, root).unwrap();
    assert_eq!(report.outcome(node(&doc, "g1")), Some(&Outcome::Unchanged));
}

#[test]
fn not_a_layer() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g id='g1'>
            <g id='g2'/>
        </g>
    </svg>
    ";

    let mut doc = Document::parse_str(svg).unwrap();
    let g1 = node(&doc, "g1");
    let res = svgclip::demote_child_layers(&mut doc, g1);
    assert_eq!(res.unwrap_err(), Error::NotALayer("'g1'".to_string()));
}
