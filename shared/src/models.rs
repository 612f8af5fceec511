//! Data models for the Progress Tracker application

use crate::validation::{normalize_custom_field, validate_weight, MAX_CUSTOM_FIELDS, MAX_IMAGES};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Profile snapshot shown on the dashboard
///
/// Owned by the backend under `users/{user_id}`; the dashboard only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "weight")]
    pub current_weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
    #[serde(default, rename = "progressPicture", skip_serializing_if = "Option::is_none")]
    pub progress_photo_url: Option<String>,
}

/// Reference to an image on the device, as returned by the picker
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalImage(String);

impl LocalImage {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn uri(&self) -> &str {
        &self.0
    }
}

/// Report being composed on the report screen
///
/// The caps on images and custom fields are enforced here, so no sequence
/// of add operations can push the draft past them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDraft {
    images: Vec<LocalImage>,
    weight_input: String,
    custom_fields: Vec<String>,
}

impl ReportDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[LocalImage] {
        &self.images
    }

    pub fn weight_input(&self) -> &str {
        &self.weight_input
    }

    pub fn custom_fields(&self) -> &[String] {
        &self.custom_fields
    }

    /// Append an image; returns `false` when the draft is already full
    pub fn add_image(&mut self, image: LocalImage) -> bool {
        if self.images.len() >= MAX_IMAGES {
            return false;
        }
        self.images.push(image);
        true
    }

    pub fn set_weight(&mut self, text: impl Into<String>) {
        self.weight_input = text.into();
    }

    /// Append a trimmed custom field; blank text and a full list are ignored
    pub fn add_custom_field(&mut self, text: &str) -> bool {
        if self.custom_fields.len() >= MAX_CUSTOM_FIELDS {
            return false;
        }
        match normalize_custom_field(text) {
            Some(field) => {
                self.custom_fields.push(field);
                true
            }
            None => false,
        }
    }

    /// Remove the field at `index`; out-of-range indices are a no-op
    pub fn remove_custom_field(&mut self, index: usize) -> bool {
        if index < self.custom_fields.len() {
            self.custom_fields.remove(index);
            true
        } else {
            false
        }
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.weight_input.is_empty() && self.custom_fields.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Drop what `submitted` carried, keeping edits made since it was taken
    ///
    /// Each submitted image or field removes one equal entry. The weight is
    /// cleared only if it still holds the submitted text.
    pub fn discard_submitted(&mut self, submitted: &ReportDraft) {
        for image in &submitted.images {
            if let Some(pos) = self.images.iter().position(|i| i == image) {
                self.images.remove(pos);
            }
        }
        for field in &submitted.custom_fields {
            if let Some(pos) = self.custom_fields.iter().position(|f| f == field) {
                self.custom_fields.remove(pos);
            }
        }
        if self.weight_input == submitted.weight_input {
            self.weight_input.clear();
        }
    }
}

/// Report as stored in the structured database under `reports/{user_id}/{id}`
///
/// Empty lists may be omitted by the database, so they default on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    #[serde(default)]
    #[validate(length(max = 5, message = "A report holds at most 5 images"))]
    pub images: Vec<String>,

    #[validate(range(min = 0.0, message = "Weight cannot be negative"))]
    pub weight: f64,

    #[serde(default)]
    #[validate(length(max = 10, message = "A report holds at most 10 custom fields"))]
    pub custom_fields: Vec<String>,

    pub date: DateTime<Utc>,
}

impl ReportRecord {
    /// Check the record invariants before it is written or after it is read
    pub fn check(&self) -> Result<(), String> {
        validate_weight(self.weight)?;
        self.validate().map_err(|e| e.to_string())
    }
}

/// Persisted weigh-in report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub images: Vec<String>,
    pub weight: f64,
    pub custom_fields: Vec<String>,
    pub date: DateTime<Utc>,
}

impl Report {
    /// Build a report from a stored record, rejecting records that break
    /// the image/field caps or carry an invalid weight
    pub fn from_record(id: impl Into<String>, record: ReportRecord) -> Result<Self, String> {
        record.check()?;
        Ok(Self {
            id: id.into(),
            images: record.images,
            weight: record.weight,
            custom_fields: record.custom_fields,
            date: record.date,
        })
    }
}

/// Order in which history is handed to the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Report paired with metrics derived from its chronological predecessor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHistoryEntry {
    #[serde(flatten)]
    pub report: Report,
    pub last_weight: Option<f64>,
    pub percentage_change: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[derive(Debug, Clone)]
    enum DraftOp {
        AddImage(String),
        AddField(String),
        Remove(usize),
    }

    fn draft_op() -> impl Strategy<Value = DraftOp> {
        prop_oneof![
            "[a-z]{1,8}".prop_map(DraftOp::AddImage),
            ".{0,10}".prop_map(DraftOp::AddField),
            (0usize..15).prop_map(DraftOp::Remove),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_draft_never_exceeds_caps(ops in prop::collection::vec(draft_op(), 0..60)) {
            let mut draft = ReportDraft::new();
            for op in ops {
                match op {
                    DraftOp::AddImage(uri) => { draft.add_image(LocalImage::new(uri)); }
                    DraftOp::AddField(text) => { draft.add_custom_field(&text); }
                    DraftOp::Remove(index) => { draft.remove_custom_field(index); }
                }
                prop_assert!(draft.images().len() <= MAX_IMAGES);
                prop_assert!(draft.custom_fields().len() <= MAX_CUSTOM_FIELDS);
            }
        }

        #[test]
        fn prop_remove_in_range_preserves_order(
            fields in prop::collection::vec("[a-z]{1,6}", 1..10),
            pick in any::<prop::sample::Index>()
        ) {
            let mut draft = ReportDraft::new();
            for field in &fields {
                draft.add_custom_field(field);
            }
            let index = pick.index(fields.len());
            let mut expected = fields.clone();
            expected.remove(index);

            prop_assert!(draft.remove_custom_field(index));
            prop_assert_eq!(draft.custom_fields(), expected.as_slice());
        }

        #[test]
        fn prop_remove_out_of_range_is_noop(
            fields in prop::collection::vec("[a-z]{1,6}", 0..10),
            extra in 0usize..5
        ) {
            let mut draft = ReportDraft::new();
            for field in &fields {
                draft.add_custom_field(field);
            }
            let before = draft.clone();
            prop_assert!(!draft.remove_custom_field(fields.len() + extra));
            prop_assert_eq!(draft, before);
        }
    }

    #[test]
    fn test_sixth_image_is_ignored() {
        let mut draft = ReportDraft::new();
        for i in 0..MAX_IMAGES {
            assert!(draft.add_image(LocalImage::new(format!("file:///img{i}.jpg"))));
        }
        assert!(!draft.add_image(LocalImage::new("file:///img5.jpg")));
        assert_eq!(draft.images().len(), MAX_IMAGES);
    }

    #[test]
    fn test_blank_custom_field_rejected() {
        let mut draft = ReportDraft::new();
        assert!(!draft.add_custom_field("   "));
        assert!(draft.add_custom_field("  waist 32in "));
        assert_eq!(draft.custom_fields(), ["waist 32in".to_string()]);
    }

    #[test]
    fn test_discard_submitted_keeps_later_edits() {
        let mut draft = ReportDraft::new();
        draft.add_image(LocalImage::new("file:///a.jpg"));
        draft.set_weight("80");
        draft.add_custom_field("same");
        let submitted = draft.clone();

        draft.add_custom_field("same");
        draft.add_image(LocalImage::new("file:///b.jpg"));
        draft.discard_submitted(&submitted);

        assert_eq!(draft.images(), [LocalImage::new("file:///b.jpg")]);
        assert_eq!(draft.custom_fields(), ["same".to_string()]);
        assert_eq!(draft.weight_input(), "");

        // Unchanged draft ends up empty
        let mut untouched = submitted.clone();
        untouched.discard_submitted(&submitted);
        assert!(untouched.is_empty());
    }

    #[test]
    fn test_discard_submitted_keeps_edited_weight() {
        let mut draft = ReportDraft::new();
        draft.set_weight("80");
        let submitted = draft.clone();

        draft.set_weight("81");
        draft.discard_submitted(&submitted);
        assert_eq!(draft.weight_input(), "81");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut draft = ReportDraft::new();
        draft.add_custom_field("same");
        draft.add_custom_field("same");
        assert_eq!(draft.custom_fields().len(), 2);
    }

    #[test]
    fn test_clear_resets_draft() {
        let mut draft = ReportDraft::new();
        draft.set_weight("180");
        draft.add_image(LocalImage::new("a"));
        draft.add_custom_field("b");
        draft.clear();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_record_wire_format() {
        let record = ReportRecord {
            images: vec!["https://cdn/1".to_string()],
            weight: 190.0,
            custom_fields: vec!["slept 8h".to_string()],
            date: "2024-02-01T00:00:00Z".parse().unwrap(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "images": ["https://cdn/1"],
                "weight": 190.0,
                "customFields": ["slept 8h"],
                "date": "2024-02-01T00:00:00Z"
            })
        );
    }

    #[test]
    fn test_record_missing_lists_default_empty() {
        let record: ReportRecord =
            serde_json::from_value(json!({"weight": 80, "date": "2024-01-01T00:00:00Z"})).unwrap();
        assert!(record.images.is_empty());
        assert!(record.custom_fields.is_empty());
    }

    #[test]
    fn test_from_record_rejects_oversized_lists() {
        let record = ReportRecord {
            images: (0..6).map(|i| format!("https://cdn/{i}")).collect(),
            weight: 80.0,
            custom_fields: vec![],
            date: Utc::now(),
        };
        assert!(Report::from_record("k", record).is_err());
    }

    #[test]
    fn test_from_record_rejects_negative_weight() {
        let record = ReportRecord {
            images: vec![],
            weight: -1.0,
            custom_fields: vec![],
            date: Utc::now(),
        };
        assert!(Report::from_record("k", record).is_err());
    }

    #[test]
    fn test_profile_field_names() {
        let profile: UserProfile = serde_json::from_value(json!({
            "weight": 185,
            "targetWeight": 170,
            "progressPicture": "https://cdn/me.jpg"
        }))
        .unwrap();
        assert_eq!(profile.current_weight, 185.0);
        assert_eq!(profile.target_weight, Some(170.0));
        assert_eq!(profile.progress_photo_url.as_deref(), Some("https://cdn/me.jpg"));

        let bare: UserProfile = serde_json::from_value(json!({"weight": 185})).unwrap();
        assert!(bare.target_weight.is_none());
        assert!(bare.progress_photo_url.is_none());
    }

    #[test]
    fn test_history_entry_serializes_flat() {
        let entry = ReportHistoryEntry {
            report: Report {
                id: "k1".to_string(),
                images: vec![],
                weight: 190.0,
                custom_fields: vec![],
                date: "2024-02-01T00:00:00Z".parse().unwrap(),
            },
            last_weight: Some(200.0),
            percentage_change: Some(-5.0),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], "k1");
        assert_eq!(value["lastWeight"], 200.0);
        assert_eq!(value["percentageChange"], -5.0);
    }
}
