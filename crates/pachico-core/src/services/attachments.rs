/// Extensions rendered inline as images
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// How a file returned by the agent should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Download,
}

impl AttachmentKind {
    /// Classify a path by its extension (case-insensitive)
    pub fn from_path(path: &str) -> Self {
        let is_image = path
            .rsplit_once('.')
            .map(|(_, ext)| {
                IMAGE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false);

        if is_image {
            AttachmentKind::Image
        } else {
            AttachmentKind::Download
        }
    }
}

/// A file produced by the agent, resolved against the service base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub path: String,
    pub file_name: String,
    pub url: String,
    pub kind: AttachmentKind,
}

impl Attachment {
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            file_name: file_name(&path).to_string(),
            kind: AttachmentKind::from_path(&path),
            url: url.into(),
            path,
        }
    }

    pub fn is_image(&self) -> bool {
        self.kind == AttachmentKind::Image
    }
}

/// Last `/`-separated segment of a path, or the whole path if that is empty
pub fn file_name(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => path,
    }
}
