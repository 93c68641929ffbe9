use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CurioError;

pub type PostId = i64;
pub type CommentId = i64;

// -- Shapes matching the backend responses --

/// Answer of the identity probe.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
}

/// A post as it appears in a collection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PostSummary {
    pub id: PostId,
    pub title: String,
    #[serde(default)]
    pub creator: String,
    #[serde(rename = "image_url", default)]
    pub image_ref: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub interest_count: u32,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Tag {
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "wikidata_url", default)]
    pub external_reference_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CommentAuthor {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Comment {
    pub id: CommentId,
    #[serde(rename = "user")]
    pub author: CommentAuthor,
    pub content: String,
    #[serde(default)]
    pub score: i64,
}

/// A post with every descriptive attribute plus its tags and comments.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PostDetail {
    pub id: PostId,
    pub title: String,
    #[serde(default)]
    pub creator: String,
    #[serde(rename = "image_url", default)]
    pub image_ref: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub interest_count: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub smell: Option<String>,
    #[serde(default)]
    pub taste: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct InterestAck {
    #[serde(deserialize_with = "null_as_zero")]
    pub interest_count: u32,
}

/// A tag suggestion from `/tags/search`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TagCandidate {
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
}

// -- Request bodies --

#[derive(Debug, Serialize)]
pub(crate) struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewComment<'a> {
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct Vote {
    pub is_upvote: bool,
}

/// An image picked in the creation form, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Text inputs of the creation form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    Material,
    Length,
    Width,
    Height,
    Color,
    Shape,
    Weight,
    Location,
    Smell,
    Taste,
    Origin,
}

impl DraftField {
    pub const ALL: [DraftField; 13] = [
        DraftField::Title,
        DraftField::Description,
        DraftField::Material,
        DraftField::Length,
        DraftField::Width,
        DraftField::Height,
        DraftField::Color,
        DraftField::Shape,
        DraftField::Weight,
        DraftField::Location,
        DraftField::Smell,
        DraftField::Taste,
        DraftField::Origin,
    ];

    /// Multipart field name.
    pub fn name(self) -> &'static str {
        match self {
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::Material => "material",
            DraftField::Length => "length",
            DraftField::Width => "width",
            DraftField::Height => "height",
            DraftField::Color => "color",
            DraftField::Shape => "shape",
            DraftField::Weight => "weight",
            DraftField::Location => "location",
            DraftField::Smell => "smell",
            DraftField::Taste => "taste",
            DraftField::Origin => "origin",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Title => "Title (required)",
            DraftField::Description => "Description",
            DraftField::Material => "Material",
            DraftField::Length => "Length (cm)",
            DraftField::Width => "Width (cm)",
            DraftField::Height => "Height (cm)",
            DraftField::Color => "Color",
            DraftField::Shape => "Shape",
            DraftField::Weight => "Weight (kg)",
            DraftField::Location => "Location",
            DraftField::Smell => "Smell",
            DraftField::Taste => "Taste",
            DraftField::Origin => "Origin",
        }
    }
}

/// Everything the creation form submits. Attribute values stay as typed
/// text; the backend parses the numeric ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub material: String,
    pub length: String,
    pub width: String,
    pub height: String,
    pub color: String,
    pub shape: String,
    pub weight: String,
    pub location: String,
    pub smell: String,
    pub taste: String,
    pub origin: String,
    pub image: Option<ImageUpload>,
    pub tags: Vec<String>,
}

impl PostDraft {
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Description => &self.description,
            DraftField::Material => &self.material,
            DraftField::Length => &self.length,
            DraftField::Width => &self.width,
            DraftField::Height => &self.height,
            DraftField::Color => &self.color,
            DraftField::Shape => &self.shape,
            DraftField::Weight => &self.weight,
            DraftField::Location => &self.location,
            DraftField::Smell => &self.smell,
            DraftField::Taste => &self.taste,
            DraftField::Origin => &self.origin,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Title => &mut self.title,
            DraftField::Description => &mut self.description,
            DraftField::Material => &mut self.material,
            DraftField::Length => &mut self.length,
            DraftField::Width => &mut self.width,
            DraftField::Height => &mut self.height,
            DraftField::Color => &mut self.color,
            DraftField::Shape => &mut self.shape,
            DraftField::Weight => &mut self.weight,
            DraftField::Location => &mut self.location,
            DraftField::Smell => &mut self.smell,
            DraftField::Taste => &mut self.taste,
            DraftField::Origin => &mut self.origin,
        }
    }

    pub fn validate(&self) -> Result<(), CurioError> {
        if self.title.trim().is_empty() {
            return Err(CurioError::Validation("Title is required".to_string()));
        }
        Ok(())
    }

    /// Scalar multipart fields in submission order. Blank optional
    /// attributes are omitted and each tag becomes its own `tags` field.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        for field in DraftField::ALL {
            let value = self.field(field).trim();
            if field == DraftField::Title || !value.is_empty() {
                fields.push((field.name(), value.to_string()));
            }
        }
        for tag in &self.tags {
            fields.push(("tags", tag.clone()));
        }
        fields
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_default())
}
