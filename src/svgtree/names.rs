// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// SVG elements the crate cares about.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EId {
    A,
    Circle,
    ClipPath,
    Defs,
    Ellipse,
    G,
    Image,
    Line,
    Mask,
    Path,
    Pattern,
    Polygon,
    Polyline,
    Rect,
    Svg,
    Switch,
    Symbol,
    Text,
    Use,
}

impl EId {
    /// Parses an element name.
    pub fn from_str(text: &str) -> Option<EId> {
        Some(match text {
            "a" => EId::A,
            "circle" => EId::Circle,
            "clipPath" => EId::ClipPath,
            "defs" => EId::Defs,
            "ellipse" => EId::Ellipse,
            "g" => EId::G,
            "image" => EId::Image,
            "line" => EId::Line,
            "mask" => EId::Mask,
            "path" => EId::Path,
            "pattern" => EId::Pattern,
            "polygon" => EId::Polygon,
            "polyline" => EId::Polyline,
            "rect" => EId::Rect,
            "svg" => EId::Svg,
            "switch" => EId::Switch,
            "symbol" => EId::Symbol,
            "text" => EId::Text,
            "use" => EId::Use,
            _ => return None,
        })
    }

    /// Returns the element's local name.
    pub fn to_str(&self) -> &'static str {
        match *self {
            EId::A => "a",
            EId::Circle => "circle",
            EId::ClipPath => "clipPath",
            EId::Defs => "defs",
            EId::Ellipse => "ellipse",
            EId::G => "g",
            EId::Image => "image",
            EId::Line => "line",
            EId::Mask => "mask",
            EId::Path => "path",
            EId::Pattern => "pattern",
            EId::Polygon => "polygon",
            EId::Polyline => "polyline",
            EId::Rect => "rect",
            EId::Svg => "svg",
            EId::Switch => "switch",
            EId::Symbol => "symbol",
            EId::Text => "text",
            EId::Use => "use",
        }
    }
}


/// The Inkscape extensions namespace.
pub const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";


/// Attributes the crate cares about.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AId {
    ClipPath,
    ClipPathUnits,
    D,
    /// `inkscape:groupmode`
    GroupMode,
    Height,
    Id,
    /// `inkscape:label`
    Label,
    Points,
    Transform,
    ViewBox,
    Width,
}

impl AId {
    /// Returns the attribute's local name.
    pub fn local_name(&self) -> &'static str {
        match *self {
            AId::ClipPath => "clip-path",
            AId::ClipPathUnits => "clipPathUnits",
            AId::D => "d",
            AId::GroupMode => "groupmode",
            AId::Height => "height",
            AId::Id => "id",
            AId::Label => "label",
            AId::Points => "points",
            AId::Transform => "transform",
            AId::ViewBox => "viewBox",
            AId::Width => "width",
        }
    }

    /// Returns the attribute's namespace URI.
    pub fn namespace(&self) -> Option<&'static str> {
        match *self {
            AId::GroupMode | AId::Label => Some(INKSCAPE_NS),
            _ => None,
        }
    }

    /// Returns the qualified name used for newly created attributes.
    pub fn to_str(&self) -> &'static str {
        match *self {
            AId::GroupMode => "inkscape:groupmode",
            AId::Label => "inkscape:label",
            _ => self.local_name(),
        }
    }
}
