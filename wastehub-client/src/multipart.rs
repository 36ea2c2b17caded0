use bytes::Bytes;

/// One file destined for a `multipart/form-data` upload.
///
/// The server side of `/pickups/scan` reads a single part named `file`, so
/// that is all the encoder supports. Content type is guessed from the file
/// extension and can be overridden with [`content_type`](Self::content_type).
#[derive(Clone, Debug)]
pub struct FilePart {
    file_name: String,
    content_type: String,
    data: Bytes,
}

impl FilePart {
    pub fn new<S: Into<String>, B: Into<Bytes>>(file_name: S, data: B) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            data: data.into(),
        }
    }

    /// Overrides the guessed content type.
    pub fn content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name.rsplit('.').next().map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

/// Fresh 128-bit boundary for one upload.
pub(crate) fn random_boundary() -> String {
    format!("{:032x}", rand::random::<u128>())
}

/// Lays the part out as a `multipart/form-data` body.
pub(crate) fn encode_form(part: &FilePart, boundary: &str) -> Bytes {
    let mut body = Vec::with_capacity(part.data.len() + boundary.len() * 2 + 128);
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            part.file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", part.content_type).as_bytes());
    body.extend_from_slice(&part.data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    Bytes::from(body)
}
