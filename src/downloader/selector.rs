// StreamSelector - quality-tier selection logic
//
// Walks the preferred resolution labels in order and takes the first
// stream that matches. When no preferred tier exists the lowest available
// resolution is used instead, so an odd format list never blocks a
// download. Only an empty stream list is a hard error.

use super::errors::DownloadError;
use super::models::StreamDescriptor;

/// Default quality-tier preference
pub const DEFAULT_QUALITY_ORDER: [&str; 2] = ["480p", "360p"];

pub struct StreamSelector;

impl StreamSelector {
    /// Pick a stream for download given an ordered list of resolution labels
    pub fn select<'a>(
        streams: &'a [StreamDescriptor],
        quality_order: &[String],
    ) -> Result<&'a StreamDescriptor, DownloadError> {
        if streams.is_empty() {
            return Err(DownloadError::NoStreams(
                "video offers no progressive stream".to_string(),
            ));
        }

        for label in quality_order {
            if let Some(stream) = Self::find_by_label(streams, label) {
                return Ok(stream);
            }
        }

        Self::lowest_resolution(streams).ok_or_else(|| {
            DownloadError::NoStreams("no stream carries a resolution".to_string())
        })
    }

    /// Find a stream whose resolution label matches exactly (e.g., "480p")
    fn find_by_label<'a>(
        streams: &'a [StreamDescriptor],
        label: &str,
    ) -> Option<&'a StreamDescriptor> {
        streams
            .iter()
            .find(|s| s.resolution_label().as_deref() == Some(label))
    }

    /// Lowest-resolution fallback; streams without a height lose ties
    fn lowest_resolution(streams: &[StreamDescriptor]) -> Option<&StreamDescriptor> {
        streams
            .iter()
            .filter(|s| s.height.is_some())
            .min_by_key(|s| s.height.unwrap_or(u32::MAX))
            .or_else(|| streams.first())
    }
}
