// src/image_validator.rs
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{error, info};

const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Upper bound for a bundled profile image
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ImageValidationError {
    pub source_name: String,
    pub error_type: ImageErrorType,
    pub message: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageErrorType {
    FileNotFound,
    CorruptedFile,
    WrongFormat,
    EmptyFile,
    TooLarge,
    UnreadableFile,
    InvalidDataUrl,
}

impl ImageErrorType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::FileNotFound => "IMAGE_NOT_FOUND",
            Self::CorruptedFile => "IMAGE_CORRUPTED",
            Self::WrongFormat => "IMAGE_WRONG_FORMAT",
            Self::EmptyFile => "IMAGE_EMPTY",
            Self::TooLarge => "IMAGE_TOO_LARGE",
            Self::UnreadableFile => "IMAGE_UNREADABLE",
            Self::InvalidDataUrl => "IMAGE_INVALID_DATA_URL",
        }
    }
}

impl ImageValidationError {
    fn new(
        source_name: &str,
        error_type: ImageErrorType,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.to_string(),
            error_type,
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageFormat {
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PNG_SIGNATURE) {
            Some(Self::Png)
        } else if bytes.starts_with(JPEG_SIGNATURE) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }
}

pub struct ImageValidator;

impl ImageValidator {
    /// Validate raw image bytes and detect their format
    pub fn validate_bytes(
        bytes: &[u8],
        source_name: &str,
    ) -> Result<ImageFormat, ImageValidationError> {
        if bytes.is_empty() {
            return Err(ImageValidationError::new(
                source_name,
                ImageErrorType::EmptyFile,
                "Profile image is empty",
                "Please provide a valid image file",
            ));
        }

        if bytes.len() > MAX_IMAGE_SIZE {
            return Err(ImageValidationError::new(
                source_name,
                ImageErrorType::TooLarge,
                format!(
                    "Image too large: {:.1}MB (max 5MB)",
                    bytes.len() as f64 / 1024.0 / 1024.0
                ),
                "Please resize or compress your image and try again",
            ));
        }

        if bytes.len() < 8 {
            return Err(ImageValidationError::new(
                source_name,
                ImageErrorType::CorruptedFile,
                "Image too small or corrupted",
                "Please provide a valid image file",
            ));
        }

        ImageFormat::detect(bytes).ok_or_else(|| {
            ImageValidationError::new(
                source_name,
                ImageErrorType::WrongFormat,
                "Unsupported image format",
                "Please use PNG, JPEG, GIF or WebP",
            )
        })
    }

    /// Validate a profile image on disk
    pub async fn validate_file(path: &Path) -> Result<(ImageFormat, Vec<u8>), ImageValidationError> {
        let source_name = path.display().to_string();

        if !path.exists() {
            return Err(ImageValidationError::new(
                &source_name,
                ImageErrorType::FileNotFound,
                format!("Profile image not found: {}", source_name),
                "Check the profileImage path in your profile",
            ));
        }

        let bytes = fs::read(path).await.map_err(|e| {
            ImageValidationError::new(
                &source_name,
                ImageErrorType::UnreadableFile,
                format!("Cannot read image file: {}", e),
                "Check file permissions",
            )
        })?;

        match Self::validate_bytes(&bytes, &source_name) {
            Ok(format) => {
                info!("Profile image validation passed: {}", source_name);
                Ok((format, bytes))
            }
            Err(e) => {
                error!("Image validation failed: {}", e.message);
                Err(e)
            }
        }
    }
}

// ===== Profile Image Sources =====

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileImage {
    /// Decoded bytes, bundled with the export
    Embedded { format: ImageFormat, bytes: Vec<u8> },
    /// Remote image, referenced as-is
    External(String),
}

impl ProfileImage {
    /// Resolve a `profileImage` value: data URL, http(s) URL or file path
    pub async fn resolve(
        source: &str,
        base_dir: Option<&Path>,
    ) -> Result<Self, ImageValidationError> {
        let source = source.trim();

        if source.starts_with("data:") {
            let bytes = decode_data_url(source)?;
            let format = ImageValidator::validate_bytes(&bytes, "data URL")?;
            return Ok(Self::Embedded { format, bytes });
        }

        if source.starts_with("http://") || source.starts_with("https://") {
            return Ok(Self::External(source.to_string()));
        }

        let path = PathBuf::from(source);
        let path = match base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        };
        let (format, bytes) = ImageValidator::validate_file(&path).await?;
        Ok(Self::Embedded { format, bytes })
    }

    pub fn to_data_url(&self) -> String {
        match self {
            Self::Embedded { format, bytes } => {
                format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes))
            }
            Self::External(url) => url.clone(),
        }
    }

    /// Archive path for bundled images
    pub fn archive_path(&self) -> Option<String> {
        match self {
            Self::Embedded { format, .. } => Some(format!("assets/profile.{}", format.extension())),
            Self::External(_) => None,
        }
    }
}

fn decode_data_url(source: &str) -> Result<Vec<u8>, ImageValidationError> {
    let invalid = |message: &str| {
        ImageValidationError::new(
            "data URL",
            ImageErrorType::InvalidDataUrl,
            message,
            "Re-upload the profile photo",
        )
    };

    let (header, payload) = source
        .split_once(',')
        .ok_or_else(|| invalid("Data URL has no payload"))?;

    if !header.ends_with(";base64") {
        return Err(invalid("Only base64 data URLs are supported"));
    }

    STANDARD
        .decode(payload.trim())
        .map_err(|_| invalid("Data URL payload is not valid base64"))
}
