//! Uploaded file types

use bytes::Bytes;

/// An audio file picked by the user, held in memory.
#[derive(Debug, Clone)]
pub struct TrackFile {
    /// Original file name, including extension
    pub name: String,

    /// MIME type reported by the host, if any
    pub content_type: Option<String>,

    /// File contents
    pub bytes: Bytes,
}

impl TrackFile {
    /// Create a file from its name and contents
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Attach the host-reported MIME type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Text after the last `.` of the name, if there is one
    pub fn extension(&self) -> Option<&str> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }

    /// File name with its final extension stripped, or the placeholder title
    pub fn default_title(&self) -> String {
        crate::format::default_track_title(&self.name)
    }

    /// MIME type to upload with: host-reported, else guessed from extension
    pub fn mime_type(&self) -> &str {
        if let Some(content_type) = self.content_type.as_deref().filter(|t| !t.is_empty()) {
            return content_type;
        }
        match self.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("mp3") => "audio/mpeg",
            Some("flac") => "audio/flac",
            Some("ogg") => "audio/ogg",
            Some("opus") => "audio/opus",
            Some("wav") => "audio/wav",
            Some("m4a" | "aac") => "audio/mp4",
            _ => "audio/mpeg",
        }
    }
}

/// Result of storing a binary in the remote bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Bucket key, `{profileId}/{projectId}/{filename}`
    pub storage_path: String,

    /// Durable public URL of the stored object
    pub public_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_types() {
        assert_eq!(TrackFile::new("song.mp3", vec![]).mime_type(), "audio/mpeg");
        assert_eq!(TrackFile::new("song.FLAC", vec![]).mime_type(), "audio/flac");
        assert_eq!(TrackFile::new("song.m4a", vec![]).mime_type(), "audio/mp4");
        assert_eq!(TrackFile::new("song", vec![]).mime_type(), "audio/mpeg");
        assert_eq!(
            TrackFile::new("song.mp3", vec![])
                .with_content_type("audio/x-custom")
                .mime_type(),
            "audio/x-custom"
        );
    }

    #[test]
    fn extension_requires_a_dot() {
        assert_eq!(TrackFile::new("song.mp3", vec![]).extension(), Some("mp3"));
        assert_eq!(TrackFile::new("song", vec![]).extension(), None);
        assert_eq!(TrackFile::new("song.", vec![]).extension(), None);
    }

    #[test]
    fn size_counts_bytes() {
        assert_eq!(TrackFile::new("a.wav", vec![0u8; 42]).size(), 42);
    }
}
