use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys::Uint8Array;
use web_sys::File;

use crate::chat::history::ImageRef;

pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AttachmentError {
    #[error("Please select a valid image file")]
    NotAnImage,
    #[error("Image size must be less than 5MB")]
    TooLarge { size: u64 },
    #[error("Could not read the selected image")]
    Read(String),
}

/// An image picked by the visitor and waiting to be sent.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageAttachment {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub data_url: String,
}

impl ImageAttachment {
    pub fn image_ref(&self) -> ImageRef {
        ImageRef {
            name: self.name.clone(),
            data_url: self.data_url.clone(),
        }
    }
}

/// Checks content type and size. Runs before any bytes are read.
pub fn validate_image(mime: &str, size: u64) -> Result<(), AttachmentError> {
    if !mime.starts_with("image/") {
        return Err(AttachmentError::NotAnImage);
    }
    if size > MAX_IMAGE_BYTES {
        return Err(AttachmentError::TooLarge { size });
    }
    Ok(())
}

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Validates and loads a picked file into an attachment.
pub async fn read_image(file: File) -> Result<ImageAttachment, AttachmentError> {
    let mime = file.type_();
    let size = file.size() as u64;
    validate_image(&mime, size)?;

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| AttachmentError::Read(format!("{:?}", e)))?;
    let bytes = Uint8Array::new(&buffer).to_vec();

    Ok(ImageAttachment {
        name: file.name(),
        data_url: to_data_url(&mime, &bytes),
        mime,
        size,
    })
}
