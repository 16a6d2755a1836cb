// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Content-managed page sections.
//!
//! The content API tags every section with a `sectionId`. Each tag carries
//! its own set of fields, so sections are decoded into one enum variant per
//! tag instead of a single record with every field optional. Code that
//! renders a section matches on the variant and only sees the fields that
//! exist for it.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// One entry of the amenities list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An image shown in the gallery grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

/// A guest quote with a star rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub author: String,
    pub quote: String,
    pub rating: u8,
}

/// A page section, discriminated by its `sectionId` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "sectionId",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum Section {
    Hero {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        background_image: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cta_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cta_href: Option<String>,
    },
    About {
        title: String,
        body: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<String>,
    },
    Amenities {
        title: String,
        items: Vec<Amenity>,
    },
    Gallery {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        images: Vec<GalleryImage>,
    },
    Testimonials {
        title: String,
        entries: Vec<Testimonial>,
    },
    Contact {
        address: String,
        phone: String,
        email: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        map_embed_url: Option<String>,
    },
}

impl Section {
    /// Returns the wire tag of this section.
    #[must_use]
    pub const fn section_id(&self) -> &'static str {
        match self {
            Self::Hero { .. } => "hero",
            Self::About { .. } => "about",
            Self::Amenities { .. } => "amenities",
            Self::Gallery { .. } => "gallery",
            Self::Testimonials { .. } => "testimonials",
            Self::Contact { .. } => "contact",
        }
    }

    /// Returns the heading rendered above the section, if it has one.
    #[must_use]
    pub fn headline(&self) -> Option<&str> {
        match self {
            Self::Hero { title, .. }
            | Self::About { title, .. }
            | Self::Amenities { title, .. }
            | Self::Testimonials { title, .. } => Some(title.as_str()),
            Self::Gallery { title, .. } => title.as_deref(),
            Self::Contact { .. } => None,
        }
    }

    /// Returns every image URL referenced by the section, in render order.
    #[must_use]
    pub fn image_urls(&self) -> Vec<&str> {
        match self {
            Self::Hero {
                background_image, ..
            } => vec![background_image.as_str()],
            Self::About { image, .. } => image.as_deref().into_iter().collect(),
            Self::Gallery { images, .. } => images.iter().map(|i| i.url.as_str()).collect(),
            Self::Amenities { .. } | Self::Testimonials { .. } | Self::Contact { .. } => {
                Vec::new()
            }
        }
    }

    /// Checks the per-tag constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSection` if a required text field is
    /// blank or a testimonial rating falls outside 1..=5.
    pub fn validate(&self) -> Result<(), DomainError> {
        let blank = |field: &str| DomainError::InvalidSection {
            reason: format!("{} section has an empty {field}", self.section_id()),
        };

        match self {
            Self::Hero {
                title,
                background_image,
                ..
            } => {
                if title.trim().is_empty() {
                    return Err(blank("title"));
                }
                if background_image.trim().is_empty() {
                    return Err(blank("backgroundImage"));
                }
            }
            Self::About { title, body, .. } => {
                if title.trim().is_empty() {
                    return Err(blank("title"));
                }
                if body.trim().is_empty() {
                    return Err(blank("body"));
                }
            }
            Self::Amenities { title, items } => {
                if title.trim().is_empty() {
                    return Err(blank("title"));
                }
                if items.iter().any(|item| item.name.trim().is_empty()) {
                    return Err(blank("amenity name"));
                }
            }
            Self::Gallery { images, .. } => {
                if images.iter().any(|image| image.url.trim().is_empty()) {
                    return Err(blank("image url"));
                }
            }
            Self::Testimonials { title, entries } => {
                if title.trim().is_empty() {
                    return Err(blank("title"));
                }
                if let Some(entry) = entries.iter().find(|e| !(1..=5).contains(&e.rating)) {
                    return Err(DomainError::InvalidSection {
                        reason: format!(
                            "testimonial by '{}' has rating {}, expected 1 to 5",
                            entry.author, entry.rating
                        ),
                    });
                }
            }
            Self::Contact {
                address,
                phone,
                email,
                ..
            } => {
                if address.trim().is_empty() {
                    return Err(blank("address"));
                }
                if phone.trim().is_empty() {
                    return Err(blank("phone"));
                }
                if email.trim().is_empty() {
                    return Err(blank("email"));
                }
            }
        }

        Ok(())
    }
}

/// A content page: its slug and sections in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub slug: String,
    pub sections: Vec<Section>,
}

impl Page {
    /// Returns the first section with the given tag.
    #[must_use]
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.section_id() == section_id)
    }
}

/// Decodes and validates a single section from its JSON form.
///
/// # Errors
///
/// Returns `DomainError::InvalidSection` for an unknown `sectionId`, a
/// missing field, or a failed per-tag check.
pub fn parse_section(json: &str) -> Result<Section, DomainError> {
    let section: Section =
        serde_json::from_str(json).map_err(|e| DomainError::InvalidSection {
            reason: e.to_string(),
        })?;
    section.validate()?;
    Ok(section)
}

/// Decodes and validates a whole page from its JSON form.
///
/// # Errors
///
/// Returns `DomainError::InvalidSection` if the page or any of its sections
/// fails to decode or validate.
pub fn parse_page(json: &str) -> Result<Page, DomainError> {
    let page: Page = serde_json::from_str(json).map_err(|e| DomainError::InvalidSection {
        reason: e.to_string(),
    })?;
    for section in &page.sections {
        section.validate()?;
    }
    Ok(page)
}
