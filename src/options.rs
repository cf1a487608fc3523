// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;


/// A clip region computation method.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ClipMode {
    /// Projects the reference rectangle through the inverted cumulative transform.
    ///
    /// Falls back to `TranslationOnly` when the transform is not invertible.
    Inverse,

    /// Offsets the reference rectangle by the sum of all translations in the chain.
    ///
    /// Rotation, scale and skew are ignored, so the result is always approximate.
    TranslationOnly,
}

impl Default for ClipMode {
    #[inline]
    fn default() -> Self {
        ClipMode::Inverse
    }
}

impl FromStr for ClipMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inverse" => Ok(ClipMode::Inverse),
            "translate" => Ok(ClipMode::TranslationOnly),
            _ => Err("invalid clip mode"),
        }
    }
}


/// Processing options.
#[derive(Clone, Debug)]
pub struct Options {
    /// Clip region computation method.
    ///
    /// Default: `Inverse`
    pub clip_mode: ClipMode,

    /// Leave elements that are already inside the reference rectangle unclipped.
    ///
    /// Default: true
    pub skip_contained: bool,

    /// A prefix for generated clip path IDs.
    ///
    /// Default: `clip_`
    pub id_prefix: String,

    /// Target DPI.
    ///
    /// Impacts units conversion of the page size.
    ///
    /// Default: 96.0
    pub dpi: f64,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            clip_mode: ClipMode::default(),
            skip_contained: true,
            id_prefix: "clip_".to_string(),
            dpi: 96.0,
        }
    }
}
