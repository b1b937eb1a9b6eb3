use serde::{Deserialize, Serialize};

use crate::script::model::AssetDescriptorDef;

/// Descriptor type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorKind {
    /// Main video clip.
    Video,
    /// Still image(s).
    Image,
    /// Meme image(s).
    Meme,
}

impl DescriptorKind {
    /// Parse a type tag, case-insensitively. Unknown tags yield `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "video" => Some(Self::Video),
            "image" => Some(Self::Image),
            "meme" => Some(Self::Meme),
            _ => None,
        }
    }

    /// Path fields consulted for this kind, highest precedence first.
    pub fn precedence(self) -> &'static [PathField] {
        match self {
            Self::Video => VIDEO_PRECEDENCE,
            Self::Image => IMAGE_PRECEDENCE,
            Self::Meme => MEME_PRECEDENCE,
        }
    }
}

/// A path-carrying field of [`AssetDescriptorDef`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathField {
    /// `generated_video_path`
    GeneratedVideoPath,
    /// `generated_image_path`
    GeneratedImagePath,
    /// `generated_image_paths`
    GeneratedImagePaths,
    /// `generated_meme_path`
    GeneratedMemePath,
    /// `generated_meme_paths`
    GeneratedMemePaths,
    /// `path`
    Path,
    /// `paths`
    Paths,
    /// `description`, only ever used when it already looks like a path.
    Description,
}

const VIDEO_PRECEDENCE: &[PathField] = &[
    PathField::GeneratedVideoPath,
    PathField::Path,
    PathField::Paths,
    PathField::Description,
];

const IMAGE_PRECEDENCE: &[PathField] = &[
    PathField::GeneratedImagePaths,
    PathField::GeneratedImagePath,
    PathField::Paths,
    PathField::Path,
    PathField::Description,
];

const MEME_PRECEDENCE: &[PathField] = &[
    PathField::GeneratedMemePaths,
    PathField::GeneratedMemePath,
    PathField::Paths,
    PathField::Path,
    PathField::Description,
];

/// Normalized descriptor: exactly one payload shape per tag.
///
/// Path strings are carried unresolved; [`crate::AssetPathResolver`] turns them into sources.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssetDescriptor {
    /// A single video.
    Video {
        /// Raw path.
        path: String,
    },
    /// One or more images.
    Image {
        /// Raw paths in order.
        paths: Vec<String>,
    },
    /// One or more memes.
    Meme {
        /// Raw paths in order.
        paths: Vec<String>,
    },
}

impl AssetDescriptor {
    /// Descriptor tag.
    pub fn kind(&self) -> DescriptorKind {
        match self {
            Self::Video { .. } => DescriptorKind::Video,
            Self::Image { .. } => DescriptorKind::Image,
            Self::Meme { .. } => DescriptorKind::Meme,
        }
    }

    /// Raw path strings in order (one for video).
    pub fn raw_paths(&self) -> Vec<&str> {
        match self {
            Self::Video { path } => vec![path.as_str()],
            Self::Image { paths } | Self::Meme { paths } => {
                paths.iter().map(String::as_str).collect()
            }
        }
    }
}

impl AssetDescriptorDef {
    /// Parsed type tag; `None` when missing or unknown.
    pub fn descriptor_kind(&self) -> Option<DescriptorKind> {
        self.kind.as_deref().and_then(DescriptorKind::parse)
    }

    /// Non-empty values of one field, in order.
    pub fn field_values(&self, field: PathField) -> Vec<&str> {
        fn one(v: &Option<String>) -> Vec<&str> {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .into_iter()
                .collect()
        }
        fn many(v: &[String]) -> Vec<&str> {
            v.iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect()
        }

        match field {
            PathField::GeneratedVideoPath => one(&self.generated_video_path),
            PathField::GeneratedImagePath => one(&self.generated_image_path),
            PathField::GeneratedImagePaths => many(&self.generated_image_paths),
            PathField::GeneratedMemePath => one(&self.generated_meme_path),
            PathField::GeneratedMemePaths => many(&self.generated_meme_paths),
            PathField::Path => one(&self.path),
            PathField::Paths => many(&self.paths),
            PathField::Description => one(&self.description),
        }
    }

    /// Apply the precedence table for the descriptor's tag.
    ///
    /// The first populated field wins. A video keeps only the first value of that field.
    pub fn normalize(&self) -> Option<AssetDescriptor> {
        let kind = self.descriptor_kind()?;
        let values = kind
            .precedence()
            .iter()
            .map(|&f| self.field_values(f))
            .find(|v| !v.is_empty())?;

        let mut owned = values.into_iter().map(str::to_owned);
        Some(match kind {
            DescriptorKind::Video => AssetDescriptor::Video {
                path: owned.next().unwrap_or_default(),
            },
            DescriptorKind::Image => AssetDescriptor::Image {
                paths: owned.collect(),
            },
            DescriptorKind::Meme => AssetDescriptor::Meme {
                paths: owned.collect(),
            },
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/descriptor.rs"]
mod tests;
