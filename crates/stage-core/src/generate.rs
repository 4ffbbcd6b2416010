//! Contract with the external image-generation collaborator and the
//! serial batch driver.
//!
//! The core never touches the network; the viewer supplies an
//! [`ImageGenerator`] and this module only sequences the calls.

use crate::prompt::AspectRatio;
use smallvec::SmallVec;
use thiserror::Error;

/// Opaque encoded reference image as uploaded by the user. `data` is
/// the base64 payload without the data-URL prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceImage {
    pub mime_type: String,
    pub data: String,
}

/// Most sessions stage a handful of reference images at most.
pub type ReferenceImages = SmallVec<[ReferenceImage; 4]>;

/// Encoded image returned by the generation service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: String,
}

impl GeneratedImage {
    /// Data URL suitable for an `<img src>` attribute.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

#[derive(Debug, Error)]
pub enum GenerateError {
    /// Rejected locally before any service call; the pose and staged
    /// images are untouched.
    #[error("add at least one reference image before generating")]
    NoReferenceImages,
    /// The service answered but returned no usable image. The message
    /// is surfaced to the user verbatim.
    #[error("{0}")]
    Service(String),
    /// The request itself failed.
    #[error("image request failed: {0}")]
    Transport(String),
}

/// One call to the external generation service.
pub trait ImageGenerator {
    async fn generate(
        &self,
        images: &[ReferenceImage],
        prompt: &str,
        aspect: AspectRatio,
    ) -> Result<GeneratedImage, GenerateError>;
}

/// Run a batch of `count` generations strictly one at a time.
///
/// All-or-nothing: the first failure discards every result collected
/// earlier in the batch and no further request is issued. The serial
/// await doubles as backpressure and gives a stable per-item progress
/// count.
pub async fn generate_batch<G: ImageGenerator>(
    generator: &G,
    images: &[ReferenceImage],
    prompt: &str,
    aspect: AspectRatio,
    count: usize,
) -> Result<Vec<GeneratedImage>, GenerateError> {
    if images.is_empty() {
        return Err(GenerateError::NoReferenceImages);
    }
    let mut results = Vec::with_capacity(count);
    for i in 0..count {
        log::info!("[generate] request {}/{}", i + 1, count);
        match generator.generate(images, prompt, aspect).await {
            Ok(img) => results.push(img),
            Err(e) => {
                log::error!("[generate] request {}/{} failed: {}", i + 1, count, e);
                return Err(e);
            }
        }
    }
    Ok(results)
}
