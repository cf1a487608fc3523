// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// List of all errors.
#[derive(Clone, PartialEq, Debug)]
pub enum Error {
    /// Only UTF-8 content are supported.
    NotAnUtf8Str,

    /// Failed to parse an SVG data.
    ParsingFailed(String),

    /// The root element is not `svg`.
    MissingSvgNode,

    /// The page size cannot be determined.
    ///
    /// Occurs when `viewBox` is missing and `width`/`height` are not set,
    /// are relative or are negative.
    InvalidPageSize,

    /// An element has a `transform` attribute that cannot be parsed.
    InvalidTransform {
        /// Element ID.
        id: String,
        /// Raw attribute value.
        value: String,
    },

    /// A node was already processed or would become its own ancestor.
    CycleDetected,

    /// An element with the specified ID was not found.
    ElementNotFound(String),

    /// An element is not a group or a layer.
    NotAContainer(String),

    /// An element is not a layer.
    NotALayer(String),
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::ParsingFailed(e.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::NotAnUtf8Str => {
                write!(f, "provided data has not an UTF-8 encoding")
            }
            Error::ParsingFailed(ref e) => {
                write!(f, "SVG data parsing failed cause {}", e)
            }
            Error::MissingSvgNode => {
                write!(f, "the root element is not 'svg'")
            }
            Error::InvalidPageSize => {
                write!(f, "SVG has an invalid page size")
            }
            Error::InvalidTransform { ref id, ref value } => {
                write!(f, "element '{}' has an invalid transform '{}'", id, value)
            }
            Error::CycleDetected => {
                write!(f, "node was already processed")
            }
            Error::ElementNotFound(ref id) => {
                write!(f, "SVG doesn't have '{}' ID", id)
            }
            Error::NotAContainer(ref id) => {
                write!(f, "'{}' is not a group or a layer", id)
            }
            Error::NotALayer(ref id) => {
                write!(f, "'{}' is not a layer", id)
            }
        }
    }
}

impl std::error::Error for Error {}
