// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delivery URL transformations for hosted images.

const CLOUDINARY_HOST: &str = "res.cloudinary.com";
const UPLOAD_SEGMENT: &str = "/upload/";

/// How the image is fitted into the requested box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crop {
    Fill,
    Fit,
    Scale,
    Thumb,
}

impl Crop {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Fit => "fit",
            Self::Scale => "scale",
            Self::Thumb => "thumb",
        }
    }
}

/// A set of image transformations rendered into a delivery URL.
///
/// Parameters are emitted in a fixed order (`w`, `h`, `c`, `q`, `f`) so the
/// same transform always yields the same URL and hits the same CDN cache
/// entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaTransform {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub crop: Option<Crop>,
    /// `None` leaves quality untouched; `Some(None)` requests `q_auto`.
    pub quality: Option<Option<u8>>,
    pub auto_format: bool,
}

impl MediaTransform {
    /// Creates an empty transform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target width in pixels.
    #[must_use]
    pub const fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the target height in pixels.
    #[must_use]
    pub const fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Sets the crop mode.
    #[must_use]
    pub const fn crop(mut self, crop: Crop) -> Self {
        self.crop = Some(crop);
        self
    }

    /// Requests automatic quality selection.
    #[must_use]
    pub const fn auto_quality(mut self) -> Self {
        self.quality = Some(None);
        self
    }

    /// Requests a fixed quality between 1 and 100.
    #[must_use]
    pub const fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(Some(quality));
        self
    }

    /// Requests automatic format negotiation.
    #[must_use]
    pub const fn auto_format(mut self) -> Self {
        self.auto_format = true;
        self
    }

    /// Preset used for room cards and gallery thumbnails.
    #[must_use]
    pub const fn card(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            crop: Some(Crop::Fill),
            quality: Some(None),
            auto_format: true,
        }
    }

    /// Renders the transformation segment, e.g. `w_800,h_600,c_fill,q_auto,f_auto`.
    ///
    /// Returns an empty string when no parameter is set.
    #[must_use]
    pub fn to_segment(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(5);
        if let Some(width) = self.width {
            parts.push(format!("w_{width}"));
        }
        if let Some(height) = self.height {
            parts.push(format!("h_{height}"));
        }
        if let Some(crop) = self.crop {
            parts.push(format!("c_{}", crop.as_str()));
        }
        match self.quality {
            Some(Some(quality)) => parts.push(format!("q_{}", quality.clamp(1, 100))),
            Some(None) => parts.push(String::from("q_auto")),
            None => {}
        }
        if self.auto_format {
            parts.push(String::from("f_auto"));
        }
        parts.join(",")
    }

    /// Applies this transform to a hosted image URL.
    ///
    /// The segment is inserted right after `/upload/`. URLs that are not on
    /// the image host, that carry no `/upload/` segment, or an empty
    /// transform leave the input unchanged.
    #[must_use]
    pub fn apply(&self, url: &str) -> String {
        let segment: String = self.to_segment();
        if segment.is_empty() || !url.contains(CLOUDINARY_HOST) {
            return url.to_string();
        }
        match url.find(UPLOAD_SEGMENT) {
            Some(index) => {
                let split: usize = index + UPLOAD_SEGMENT.len();
                format!("{}{segment}/{}", &url[..split], &url[split..])
            }
            None => url.to_string(),
        }
    }
}

/// Applies [`MediaTransform::card`] to `url`.
#[must_use]
pub fn card_image_url(url: &str, width: u32, height: u32) -> String {
    MediaTransform::card(width, height).apply(url)
}
