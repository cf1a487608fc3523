// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgclip` restructures SVG documents without changing how they render.

- Clips elements to a page rectangle defined in the root coordinates,
  by projecting it into each element's own coordinates.
- Moves nested groups and layers one level up, folding the container
  transform into each moved child.
- Converts child layers into plain groups.

The transform engine works on any hierarchy that implements
[`TransformTree`], [`ClipSink`] or [`Reparent`].
[`svgtree::Document`] is the SVG implementation.
*/

#![doc(html_root_url = "https://docs.rs/svgclip/0.1.0")]

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod absorb;
pub mod chain;
pub mod clip;
pub mod crop;
pub mod emit;
mod error;
mod geom;
pub mod layers;
mod options;
mod report;
pub mod svgtree;
mod traits;

pub use crate::absorb::{absorb_transform, flatten, FlattenReport};
pub use crate::chain::{cumulative_transform, TransformChain};
pub use crate::clip::{project_rect, ClipPolygon, Projection, ProjectionKind};
pub use crate::crop::{clip_to_rect, crop_to_page};
pub use crate::emit::{emit_clip, ClipDefinition};
pub use crate::error::Error;
pub use crate::geom::{FuzzyEq, FuzzyZero, Point, Rect, Transform};
pub use crate::layers::demote_child_layers;
pub use crate::options::{ClipMode, Options};
pub use crate::report::{Outcome, Report, Summary};
pub use crate::traits::{ClipSink, Reparent, TransformTree};
