use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Opaque handle to a playable audio asset.
///
/// The encoded bytes are preloaded into memory so playback never blocks on
/// file I/O; decoding happens inside the output backend at play time. Clones
/// share the same buffer.
#[derive(Debug, Clone)]
pub struct Clip {
    label: String,
    data: Arc<Vec<u8>>,
}

impl Clip {
    /// Create a clip from raw encoded bytes
    pub fn from_bytes(label: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            data: Arc::new(data),
        }
    }

    /// Preload a clip from a file. The label is the file stem.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        tracing::debug!("Preloaded clip '{}' ({} bytes)", label, data.len());
        Ok(Self::from_bytes(label, data))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn data(&self) -> &Arc<Vec<u8>> {
        &self.data
    }
}

impl PartialEq for Clip {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && Arc::ptr_eq(&self.data, &other.data)
    }
}

impl Eq for Clip {}

impl fmt::Display for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_from_bytes() {
        let clip = Clip::from_bytes("hit", vec![1, 2, 3]);
        assert_eq!(clip.label(), "hit");
        assert_eq!(clip.data().len(), 3);
    }

    #[test]
    fn test_clip_from_missing_file() {
        let result = Clip::from_file("nonexistent.mp3");
        assert!(result.is_err());
    }

    #[test]
    fn test_clip_equality_is_shared_buffer() {
        let clip = Clip::from_bytes("hit", vec![1, 2, 3]);
        let same = clip.clone();
        let other = Clip::from_bytes("hit", vec![1, 2, 3]);

        assert_eq!(clip, same);
        // Same label but a different buffer is a different asset
        assert_ne!(clip, other);
    }

    #[test]
    fn test_clip_display() {
        let clip = Clip::from_bytes("coin", Vec::new());
        assert_eq!(clip.to_string(), "coin");
    }
}
