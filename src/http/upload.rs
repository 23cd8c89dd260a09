//! Uploaded file descriptors.
//!
//! The library does not parse multipart bodies. Whatever ingests the
//! request hands over one [`UploadedFile`] per part and the metadata is passed
//! through untouched.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::http::body::Body;

/// Outcome of the upload as reported by the ingesting layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Ok,
    IniSize,
    FormSize,
    Partial,
    NoFile,
    NoTmpDir,
    CantWrite,
    Extension,
}

impl UploadStatus {
    /// Maps the conventional numeric upload error codes.
    pub fn from_code(code: u8) -> Option<UploadStatus> {
        match code {
            0 => Some(UploadStatus::Ok),
            1 => Some(UploadStatus::IniSize),
            2 => Some(UploadStatus::FormSize),
            3 => Some(UploadStatus::Partial),
            4 => Some(UploadStatus::NoFile),
            6 => Some(UploadStatus::NoTmpDir),
            7 => Some(UploadStatus::CantWrite),
            8 => Some(UploadStatus::Extension),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct UploadedFile {
    // taken by move_to
    stream: Option<Body>,
    size: Option<u64>,
    status: UploadStatus,
    client_filename: Option<String>,
    client_media_type: Option<String>,
}

impl UploadedFile {
    pub fn new(
        stream: Body,
        size: Option<u64>,
        status: UploadStatus,
        client_filename: Option<String>,
        client_media_type: Option<String>,
    ) -> Self {
        Self {
            stream: Some(stream),
            size,
            status,
            client_filename,
            client_media_type,
        }
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    pub fn client_filename(&self) -> Option<&str> {
        self.client_filename.as_deref()
    }

    pub fn client_media_type(&self) -> Option<&str> {
        self.client_media_type.as_deref()
    }

    pub fn stream_mut(&mut self) -> Result<&mut Body> {
        self.stream
            .as_mut()
            .ok_or_else(|| Error::NotFound("uploaded file stream already moved".to_string()))
    }

    /// Copies the stream to `target`. Only allowed once and only for a
    /// successful upload.
    pub fn move_to(&mut self, target: impl AsRef<Path>) -> Result<()> {
        if self.status != UploadStatus::Ok {
            return Err(Error::invalid(
                "upload",
                format!("cannot move upload with status {:?}", self.status),
            ));
        }

        let mut stream = self
            .stream
            .take()
            .ok_or_else(|| Error::NotFound("uploaded file stream already moved".to_string()))?;
        let bytes = stream.read_all()?;

        let mut file = File::create(target.as_ref())?;
        io::Write::write_all(&mut file, &bytes)?;
        tracing::debug!(path = %target.as_ref().display(), bytes = bytes.len(), "moved uploaded file");
        Ok(())
    }
}
