use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::raster::Thumbnail;

/// Extension of the files holding stroke data
pub const DRAWING_EXTENSION: &str = "drawing";

/// One entry of the gallery. Only `id`, `name`, `fileName` and `date`
/// are written to the metadata file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDrawing {
    id: Uuid,
    pub name: String,
    file_name: String,
    #[serde(with = "iso8601")]
    date: DateTime<Utc>,
    #[serde(skip)]
    pub thumbnail: Option<Thumbnail>,
}

impl SavedDrawing {
    /// A new record with a fresh id and a file name derived from it
    pub fn new(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            name: name.into(),
            file_name: format!("{}.{}", id.as_hyphenated(), DRAWING_EXTENSION),
            date,
            thumbnail: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// File name a record with this id must use
    pub fn expected_file_name(&self) -> String {
        format!("{}.{}", self.id.as_hyphenated(), DRAWING_EXTENSION)
    }

    /// The stored file name is the one derived from the id, so it cannot
    /// point outside the storage folder
    pub fn has_valid_file_name(&self) -> bool {
        self.file_name.eq_ignore_ascii_case(&self.expected_file_name())
    }
}

/// Second-precision UTC timestamps, e.g. `2025-12-17T09:30:00Z`.
/// Reading accepts any RFC 3339 timestamp.
mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|date| date.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 17, 9, 30, 0).single().unwrap()
    }

    #[test]
    fn test_file_name_is_derived_from_id() {
        let record = SavedDrawing::new("Sketch", fixed_date());
        assert_eq!(record.file_name(), format!("{}.drawing", record.id()));
    }

    #[test]
    fn test_metadata_json_shape() {
        let record = SavedDrawing::new("Sketch", fixed_date());
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert_eq!(object["name"], "Sketch");
        assert_eq!(object["fileName"], record.file_name());
        assert_eq!(object["date"], "2025-12-17T09:30:00Z");
        assert_eq!(object["id"], record.id().to_string());
    }

    #[test]
    fn test_dates_with_offsets_and_fractions_are_accepted() {
        let json = r#"{
            "id": "8d0f5a44-2f53-4d0f-9d0c-1f7f1c5e9a10",
            "name": "Imported",
            "fileName": "8d0f5a44-2f53-4d0f-9d0c-1f7f1c5e9a10.drawing",
            "date": "2025-12-17T10:30:00.250+01:00"
        }"#;
        let record: SavedDrawing = serde_json::from_str(json).unwrap();
        assert_eq!(record.date().timestamp(), fixed_date().timestamp());
        assert!(record.thumbnail.is_none());
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        let json = r#"{"id":"8d0f5a44-2f53-4d0f-9d0c-1f7f1c5e9a10","name":"x","fileName":"x.drawing","date":"yesterday"}"#;
        assert!(serde_json::from_str::<SavedDrawing>(json).is_err());
    }

    #[test]
    fn test_file_name_must_match_id() {
        let record = |file_name: &str| -> SavedDrawing {
            let json = format!(
                r#"{{"id":"8d0f5a44-2f53-4d0f-9d0c-1f7f1c5e9a10","name":"x","fileName":{:?},"date":"2025-12-17T09:30:00Z"}}"#,
                file_name
            );
            serde_json::from_str(&json).unwrap()
        };

        assert!(record("8d0f5a44-2f53-4d0f-9d0c-1f7f1c5e9a10.drawing").has_valid_file_name());
        assert!(record("8D0F5A44-2F53-4D0F-9D0C-1F7F1C5E9A10.drawing").has_valid_file_name());
        assert!(!record("../8d0f5a44-2f53-4d0f-9d0c-1f7f1c5e9a10.drawing").has_valid_file_name());
        assert!(!record("/tmp/victim.txt").has_valid_file_name());
        assert!(!record("other.drawing").has_valid_file_name());
        assert!(SavedDrawing::new("Fresh", fixed_date()).has_valid_file_name());
    }
}
