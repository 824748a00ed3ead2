use std::borrow::Cow;

/// File suffix identifying profile payloads
pub const PROFILE_SUFFIX: &str = ".profile";
/// File suffix identifying custom object definitions
pub const OBJECT_SUFFIX: &str = ".object";
/// File name identifying the environment manifest, at any archive depth
pub const MANIFEST_FILENAME: &str = "package.xml";

/// A named payload, as listed by an archive.
///
/// Payloads are classified by name alone; contents are only parsed once a
/// consumer knows what it is looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedPayload {
    /// Full archive path, e.g. `unpackaged/profiles/Admin.profile`
    pub name: String,

    /// Raw payload bytes
    pub bytes: Vec<u8>,
}

/// Payload classification by name suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// A permission profile document
    Profile,
    /// A custom object definition
    ObjectDefinition,
    /// The environment manifest
    Manifest,
}

impl NamedPayload {
    /// Create a payload
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Classify this payload by its name, if it is one of the kinds the
    /// pipeline consumes
    #[must_use]
    pub fn kind(&self) -> Option<PayloadKind> {
        if self.name.ends_with(PROFILE_SUFFIX) {
            Some(PayloadKind::Profile)
        } else if self.name.ends_with(OBJECT_SUFFIX) {
            Some(PayloadKind::ObjectDefinition)
        } else if self.name.ends_with(MANIFEST_FILENAME) {
            Some(PayloadKind::Manifest)
        } else {
            None
        }
    }

    /// Component name: the last path segment with its extension stripped.
    ///
    /// Only the final extension is removed, so a profile named
    /// `Sales 2.0.profile` keeps its full `Sales 2.0` name.
    #[must_use]
    pub fn stem(&self) -> &str {
        let file = self.name.rsplit('/').next().unwrap_or(&self.name);
        match file.rsplit_once('.') {
            Some((stem, _)) => stem,
            None => file,
        }
    }

    /// Payload bytes as text, tolerating a UTF-8 byte order mark
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        let bytes = self.bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(&self.bytes);
        String::from_utf8_lossy(bytes)
    }
}
