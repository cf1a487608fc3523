use pretty_assertions::assert_eq;

use svgclip::svgtree::{AId, Document, EId, NodeId};
use svgclip::{Error, Outcome, Transform, TransformTree};

static SVG: &str = "
<svg xmlns='http://www.w3.org/2000/svg'
     xmlns:inkscape='http://www.inkscape.org/namespaces/inkscape'>
    <g id='layer1' inkscape:groupmode='layer' transform='translate(5 0)'>
        <g id='g1' transform='translate(0 3)'>
            <g id='g2'>
                <path id='path2'/>
            </g>
        </g>
        <path id='path1'/>
        <g id='g3' transform='translate(-5 0)'/>
    </g>
    <g id='after'/>
</svg>
";

fn node(doc: &Document, id: &str) -> NodeId {
    doc.element_by_id(id).unwrap().id()
}

fn children_ids(doc: &Document, id: NodeId) -> Vec<&str> {
    doc.get(id).children().filter(|n| n.is_element()).map(|n| n.element_id()).collect()
}

#[test]
fn nested_groups() {
    let mut doc = Document::parse_str(SVG).unwrap();
    let layer1 = node(&doc, "layer1");
    let res = svgclip::flatten(&mut doc, &[layer1]);
    assert_eq!(res.moved, 3);

    let svg = doc.root_element().id();
    assert_eq!(children_ids(&doc, svg), vec!["layer1", "g1", "g2", "g3", "after"]);
    assert_eq!(children_ids(&doc, layer1), vec!["path1"]);
    assert_eq!(children_ids(&doc, node(&doc, "g2")), vec!["path2"]);

    assert_eq!(doc.element_by_id("g1").unwrap().attribute(AId::Transform), Some("translate(5 3)"));
    assert_eq!(doc.local_transform(node(&doc, "g2")).unwrap(), Transform::new_translate(5.0, 3.0));
    assert!(!doc.element_by_id("g3").unwrap().has_attribute(AId::Transform));
    assert_eq!(doc.local_transform(layer1).unwrap(), Transform::new_translate(5.0, 0.0));

    let report = &res.report;
    assert_eq!(report.outcome(layer1), Some(&Outcome::Done));
    assert_eq!(report.outcome(node(&doc, "g1")), Some(&Outcome::Done));
    assert_eq!(report.outcome(node(&doc, "g2")), Some(&Outcome::Unchanged));
    assert_eq!(report.outcome(node(&doc, "g3")), Some(&Outcome::Unchanged));
}

#[test]
fn rendering_is_preserved() {
    let mut doc = Document::parse_str(SVG).unwrap();
    let path2 = node(&doc, "path2");
    let before = svgclip::cumulative_transform(&doc, path2).unwrap();

    let layer1 = node(&doc, "layer1");
    svgclip::flatten(&mut doc, &[layer1]);

    let after = svgclip::cumulative_transform(&doc, path2).unwrap();
    assert_eq!(before, after);
}

#[test]
fn non_container_is_skipped() {
    let mut doc = Document::parse_str(SVG).unwrap();
    let path1 = node(&doc, "path1");
    let res = svgclip::flatten(&mut doc, &[path1]);
    assert_eq!(res.moved, 0);
    assert_eq!(
        res.report.outcome(path1),
        Some(&Outcome::Skipped(Error::NotAContainer("'path1'".to_string())))
    );
}

#[test]
fn duplicated_selection() {
    let mut doc = Document::parse_str(SVG).unwrap();
    let layer1 = node(&doc, "layer1");
    let g1 = node(&doc, "g1");
    let res = svgclip::flatten(&mut doc, &[layer1, g1, layer1]);

    // `g1` is moved only once.
    assert_eq!(res.moved, 3);
    assert_eq!(doc.local_transform(g1).unwrap(), Transform::new_translate(5.0, 3.0));

    let skipped: Vec<_> = res.report.entries().iter()
        .filter(|(_, o)| *o == Outcome::Skipped(Error::CycleDetected))
        .map(|(n, _)| *n)
        .collect();
    assert_eq!(skipped, vec![layer1, g1]);
}

#[test]
fn detached_group() {
    let mut doc = Document::parse_str(SVG).unwrap();
    let group = doc.create_element(EId::G);
    let child = doc.create_element(EId::G);
    doc.append(group, child).unwrap();

    let res = svgclip::flatten(&mut doc, &[group]);
    assert_eq!(res.moved, 0);
    assert_eq!(res.report.outcome(group), Some(&Outcome::Unchanged));
    assert_eq!(doc.get(child).parent().map(|n| n.id()), Some(group));
}

#[test]
fn invalid_child_transform() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g id='g1'>
            <g id='g2' transform='qwe'/>
            <g id='g3'/>
        </g>
    </svg>
    ";

    let mut doc = Document::parse_str(svg).unwrap();
    let g1 = node(&doc, "g1");
    let g2 = node(&doc, "g2");
    let res = svgclip::flatten(&mut doc, &[g1]);
    assert_eq!(res.moved, 1);
    assert!(matches!(res.report.outcome(g2), Some(&Outcome::Skipped(Error::InvalidTransform { .. }))));
    assert_eq!(children_ids(&doc, g1), vec!["g2"]);
    assert_eq!(children_ids(&doc, doc.root_element().id()), vec!["g1", "g3"]);
}

#[test]
fn inverse_transforms() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <g id='g1' transform='matrix(2 0 0 4 10 20)'>
            <g id='g2' transform='matrix(0.5 0 0 0.25 -5 -5)'/>
        </g>
    </svg>
    ";

    let mut doc = Document::parse_str(svg).unwrap();
    let g1 = node(&doc, "g1");
    svgclip::flatten(&mut doc, &[g1]);
    assert!(!doc.element_by_id("g2").unwrap().has_attribute(AId::Transform));
}
