//! Decorated search results.

use crate::descriptor::ResourceDescriptor;
use karia_api_client::Record;
use serde::Serialize;

/// A store record plus the metadata needed to display and contact it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultItem {
    /// Dedup key, `"{source}-{id}"`
    pub key: String,
    /// Record id, if the record has one
    pub id: Option<String>,
    /// Resource the record came from
    pub source: String,
    /// Label of that resource
    pub source_display: String,
    /// Icon of that resource
    pub source_icon: String,
    /// Colour tag of that resource
    pub source_color: String,
    /// Resolved display name
    pub name: Option<String>,
    /// Resolved expertise/specialisation/category
    pub offer: Option<String>,
    /// Resolved contact number
    pub phone: Option<String>,
    /// Resolved image URL or storage path
    pub image: Option<String>,
    /// Record as returned by the store
    pub record: Record,
}

impl SearchResultItem {
    /// Resolve display and contact fields through the descriptor's mapping.
    #[must_use]
    pub fn decorate(descriptor: &ResourceDescriptor, record: Record) -> Self {
        let fields = &descriptor.fields;
        let id = fields.id(&record);
        Self {
            key: dedup_key(descriptor, id.as_deref(), &record),
            id,
            source: descriptor.name.clone(),
            source_display: descriptor.display_label.clone(),
            source_icon: descriptor.icon.clone(),
            source_color: descriptor.color_tag.clone(),
            name: fields.name(&record),
            offer: fields.offer(&record),
            phone: fields.phone(&record),
            image: fields.image(&record),
            record,
        }
    }

    /// Record id, when the record has one.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Name for display, falling back to the resource label.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.source_display)
    }
}

/// `"{resource}-{id}"`; records without an id are keyed by their content.
fn dedup_key(descriptor: &ResourceDescriptor, id: Option<&str>, record: &Record) -> String {
    match id {
        Some(id) => format!("{}-{id}", descriptor.name),
        None => format!("{}-{}", descriptor.name, serde_json::Value::Object(record.clone())),
    }
}
