//! Resource descriptors and field mappings.
//!
//! Schema drift between deployments means one logical field ("name",
//! "phone", "specialisation") can live under several column names. A
//! [`FieldGroup`] lists those alternates for matching; a [`FieldMapping`]
//! lists them for display and contact, resolved once per descriptor.

use karia_api_client::store::{first_text, Record};
use once_cell::sync::Lazy;
use serde::Serialize;

/// Ordered alternate column names holding one logical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldGroup(Vec<String>);

impl FieldGroup {
    /// Build a group from column names, most likely first.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(columns.into_iter().map(Into::into).collect())
    }

    /// Column names in try order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.0
    }
}

/// Candidate columns for the fields every result needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMapping {
    /// Record identifier.
    pub id: Vec<String>,
    /// Display name of the professional, shop or item.
    pub name: Vec<String>,
    /// Contact number.
    pub phone: Vec<String>,
    /// Picture URL or storage path.
    pub image: Vec<String>,
    /// What is on offer: expertise, specialisation, category.
    pub offer: Vec<String>,
}

fn owned(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| (*c).to_string()).collect()
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            id: owned(&["id"]),
            name: owned(&["name", "Name", "full_name"]),
            phone: owned(&["phone", "Phone", "number", "mobile", "phone_number", "contact"]),
            image: owned(&["image", "image_url", "Image", "photo", "photo_url", "profile_image"]),
            offer: owned(&[
                "offer",
                "expertise",
                "Specialization",
                "specialization",
                "services",
                "work_type",
                "category",
            ]),
        }
    }
}

impl FieldMapping {
    /// Record id as text.
    #[must_use]
    pub fn id(&self, record: &Record) -> Option<String> {
        first_text(record, &self.id)
    }

    /// First non-empty name candidate.
    #[must_use]
    pub fn name(&self, record: &Record) -> Option<String> {
        first_text(record, &self.name)
    }

    /// First non-empty phone candidate.
    #[must_use]
    pub fn phone(&self, record: &Record) -> Option<String> {
        first_text(record, &self.phone)
    }

    /// First non-empty image candidate.
    #[must_use]
    pub fn image(&self, record: &Record) -> Option<String> {
        first_text(record, &self.image)
    }

    /// First non-empty offer candidate.
    #[must_use]
    pub fn offer(&self, record: &Record) -> Option<String> {
        first_text(record, &self.offer)
    }
}

/// Static description of one searchable resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDescriptor {
    /// Resource (table) name in the store.
    pub name: String,
    /// Label shown to users.
    pub display_label: String,
    /// Icon identifier.
    pub icon: String,
    /// Colour tag for badges.
    pub color_tag: String,
    /// Field groups matched by keyword search, in try order.
    pub field_groups: Vec<FieldGroup>,
    /// Display/contact field candidates.
    pub fields: FieldMapping,
}

impl ResourceDescriptor {
    /// Describe a resource with default field mapping and no field groups.
    pub fn new(name: impl Into<String>, display_label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_label: display_label.into(),
            icon: String::new(),
            color_tag: String::new(),
            field_groups: Vec::new(),
            fields: FieldMapping::default(),
        }
    }

    /// Set the icon identifier.
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Set the colour tag.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color_tag = color.into();
        self
    }

    /// Append a field group.
    #[must_use]
    pub fn group<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_groups.push(FieldGroup::new(columns));
        self
    }

    /// Put extra name candidates ahead of the defaults.
    #[must_use]
    pub fn name_fields(mut self, columns: &[&str]) -> Self {
        prepend(&mut self.fields.name, columns);
        self
    }

    /// Put extra offer candidates ahead of the defaults.
    #[must_use]
    pub fn offer_fields(mut self, columns: &[&str]) -> Self {
        prepend(&mut self.fields.offer, columns);
        self
    }

    /// Put extra image candidates ahead of the defaults.
    #[must_use]
    pub fn image_fields(mut self, columns: &[&str]) -> Self {
        prepend(&mut self.fields.image, columns);
        self
    }
}

fn prepend(target: &mut Vec<String>, columns: &[&str]) {
    let mut merged = owned(columns);
    merged.extend(target.drain(..).filter(|c| !columns.contains(&c.as_str())));
    *target = merged;
}

static DEFAULT_CATALOG: Lazy<Vec<ResourceDescriptor>> = Lazy::new(|| {
    vec![
        ResourceDescriptor::new("builders", "Builders")
            .icon("building")
            .color("#F59E0B")
            .group(["name", "Name", "builder_name"])
            .group(["company", "company_name"])
            .group(["services", "specialization", "expertise"])
            .group(["location", "city", "address"])
            .name_fields(&["builder_name", "company"])
            .offer_fields(&["services"]),
        ResourceDescriptor::new("contractors", "Contractors")
            .icon("hard-hat")
            .color("#EF4444")
            .group(["name", "Name", "contractor_name"])
            .group(["work_type", "specialization", "expertise"])
            .group(["location", "city", "address"])
            .name_fields(&["contractor_name"])
            .offer_fields(&["work_type"]),
        ResourceDescriptor::new("Engineer", "Engineers")
            .icon("ruler")
            .color("#3B82F6")
            .group(["name", "Name"])
            .group(["Specialization", "specialization", "expertise"])
            .group(["location", "Location", "city"]),
        ResourceDescriptor::new("engineers", "Engineers")
            .icon("ruler")
            .color("#3B82F6")
            .group(["name", "Name"])
            .group(["specialization", "Specialization", "expertise"])
            .group(["location", "city"]),
        ResourceDescriptor::new("architects", "Architects")
            .icon("compass")
            .color("#8B5CF6")
            .group(["name", "Name"])
            .group(["specialization", "style", "expertise"])
            .group(["location", "city"]),
        ResourceDescriptor::new("labours", "Labour")
            .icon("hammer")
            .color("#10B981")
            .group(["name", "Name"])
            .group(["expertise", "skill", "work_type"])
            .group(["location", "city", "area"])
            .offer_fields(&["expertise", "skill"]),
        ResourceDescriptor::new("labourers", "Labour")
            .icon("hammer")
            .color("#10B981")
            .group(["name", "Name"])
            .group(["skill", "expertise"])
            .group(["area", "location", "city"])
            .offer_fields(&["skill"]),
        ResourceDescriptor::new("shops", "Shops")
            .icon("store")
            .color("#EC4899")
            .group(["shop_name", "name"])
            .group(["category", "type"])
            .group(["address", "location", "city"])
            .name_fields(&["shop_name"])
            .image_fields(&["shop_image", "logo"]),
        ResourceDescriptor::new("items", "Equipment & Materials")
            .icon("package")
            .color("#6366F1")
            .group(["name", "item_name", "title"])
            .group(["category", "type"])
            .group(["description"])
            .name_fields(&["item_name", "title"])
            .offer_fields(&["price", "rent_price"]),
    ]
});

/// Built-in resource catalog.
///
/// `engineers` and `labourers` are legacy aliases of `Engineer` and
/// `labours`; the availability probe decides which ones a deployment has.
#[must_use]
pub fn default_catalog() -> Vec<ResourceDescriptor> {
    DEFAULT_CATALOG.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_names_are_unique() {
        let catalog = default_catalog();
        let mut names: Vec<&str> = catalog.iter().map(|d| d.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), catalog.len());
        assert!(catalog.iter().all(|d| !d.field_groups.is_empty()));
    }

    #[test]
    fn test_prepend_keeps_order_without_duplicates() {
        let descriptor = ResourceDescriptor::new("shops", "Shops").name_fields(&["shop_name", "name"]);
        assert_eq!(descriptor.fields.name[0], "shop_name");
        assert_eq!(descriptor.fields.name[1], "name");
        assert_eq!(
            descriptor.fields.name.iter().filter(|c| *c == "name").count(),
            1
        );
    }

    #[test]
    fn test_mapping_fallbacks() {
        let record = json!({
            "id": 7,
            "Name": "Kiran Jadhav",
            "phone": "",
            "Phone": "98220 12345",
            "Specialization": "Structural"
        })
        .as_object()
        .cloned()
        .unwrap();

        let mapping = FieldMapping::default();
        assert_eq!(mapping.id(&record).as_deref(), Some("7"));
        assert_eq!(mapping.name(&record).as_deref(), Some("Kiran Jadhav"));
        assert_eq!(mapping.phone(&record).as_deref(), Some("98220 12345"));
        assert_eq!(mapping.offer(&record).as_deref(), Some("Structural"));
        assert_eq!(mapping.image(&record), None);
    }
}
