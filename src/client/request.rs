//! Outgoing search requests

use reqwest::multipart::{Form, Part};

use super::ClientError;
use crate::upload::UploadedImage;

/// Form fields specific to each backend.
///
/// The pass-through API and the mock catalog use different field names;
/// one request only ever carries one convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFields {
    /// `file` plus an optional edited `caption`
    Passthrough { caption: Option<String> },
    /// `image` plus the requested `page`
    Catalog { page: u32 },
}

/// A search request produced by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Identifies the image selection this request belongs to
    pub ticket: u64,
    pub image: UploadedImage,
    pub fields: SearchFields,
}

impl SearchRequest {
    /// Name of the form field carrying the image
    pub fn image_field(&self) -> &'static str {
        match self.fields {
            SearchFields::Passthrough { .. } => "file",
            SearchFields::Catalog { .. } => "image",
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match &self.fields {
            SearchFields::Passthrough { caption } => caption.as_deref(),
            SearchFields::Catalog { .. } => None,
        }
    }

    pub fn page(&self) -> Option<u32> {
        match self.fields {
            SearchFields::Catalog { page } => Some(page),
            SearchFields::Passthrough { .. } => None,
        }
    }

    /// Build the multipart body
    pub fn to_form(&self) -> Result<Form, ClientError> {
        let part = Part::bytes(self.image.bytes.to_vec())
            .file_name(self.image.file_name.clone())
            .mime_str(&self.image.mime)
            .map_err(|e| ClientError::Request(format!("invalid MIME type: {}", e)))?;

        let form = Form::new().part(self.image_field(), part);
        let form = match &self.fields {
            SearchFields::Passthrough { caption: Some(caption) } => form.text("caption", caption.clone()),
            SearchFields::Passthrough { caption: None } => form,
            SearchFields::Catalog { page } => form.text("page", page.to_string()),
        };
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(fields: SearchFields) -> SearchRequest {
        SearchRequest {
            ticket: 1,
            image: UploadedImage::new(b"img".to_vec(), "image/png", "a.png"),
            fields,
        }
    }

    #[test]
    fn field_names_follow_backend() {
        let pass = request(SearchFields::Passthrough { caption: Some("red".into()) });
        assert_eq!(pass.image_field(), "file");
        assert_eq!(pass.caption(), Some("red"));
        assert_eq!(pass.page(), None);

        let cat = request(SearchFields::Catalog { page: 3 });
        assert_eq!(cat.image_field(), "image");
        assert_eq!(cat.caption(), None);
        assert_eq!(cat.page(), Some(3));
    }

    #[test]
    fn form_builds_for_valid_mime() {
        let form = request(SearchFields::Catalog { page: 2 }).to_form().unwrap();
        assert!(!form.boundary().is_empty());
    }

    #[test]
    fn form_rejects_malformed_mime() {
        let mut req = request(SearchFields::Passthrough { caption: None });
        req.image.mime = "not a mime".to_string();
        assert!(matches!(req.to_form(), Err(ClientError::Request(_))));
    }
}
