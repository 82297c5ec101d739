//! Data structures for video information

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Decoded payload of the metadata API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoResponse {
    #[serde(default, deserialize_with = "truthy")]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub duration: Option<Number>, // Seconds
    #[serde(default, deserialize_with = "null_as_empty")]
    pub medias: Vec<MediaVariant>,
}

/// One downloadable encoding of the video
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaVariant {
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub extension: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ext: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub bitrate: Option<Number>,
    #[serde(default, rename = "mimeType", deserialize_with = "lenient_string")]
    pub mime_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
}

impl MediaVariant {
    /// Ranking key for best-quality selection; missing bitrates rank as zero
    pub fn bitrate_value(&self) -> f64 {
        self.bitrate.as_ref().and_then(Number::as_f64).unwrap_or(0.0)
    }

    /// Extension used for the output file name
    pub fn file_extension(&self) -> &str {
        self.ext
            .as_deref()
            .filter(|e| !e.is_empty())
            .or(self.extension.as_deref())
            .unwrap_or("")
    }
}

/// Normalized view returned by `get_metadata`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoMetadata {
    pub url: String,
    pub title: String,
    pub author: String,
    pub thumbnail: String,
    pub duration: Number,
    pub available_formats: Vec<FormatSummary>,
}

/// Per-variant entry of [`VideoMetadata::available_formats`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatSummary {
    pub label: String,
    pub extension: String,
    pub bitrate: Number,
    pub mime: String,
}

/// Outcome of a completed download
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadReport {
    pub downloaded: bool,
    pub file: String,
    pub size_mb: f64,
    pub format: String,
}

impl From<&VideoResponse> for VideoMetadata {
    fn from(response: &VideoResponse) -> Self {
        Self {
            url: response.url.clone().unwrap_or_default(),
            title: response.title.clone().unwrap_or_default(),
            author: response.author.clone().unwrap_or_default(),
            thumbnail: response.thumbnail.clone().unwrap_or_default(),
            duration: response.duration.clone().unwrap_or_else(|| Number::from(0)),
            available_formats: response.medias.iter().map(FormatSummary::from).collect(),
        }
    }
}

impl From<&MediaVariant> for FormatSummary {
    fn from(media: &MediaVariant) -> Self {
        Self {
            label: media.label.clone().unwrap_or_default(),
            extension: media.extension.clone().unwrap_or_default(),
            bitrate: media.bitrate.clone().unwrap_or_else(|| Number::from(0)),
            mime: media.mime_type.clone().unwrap_or_default(),
        }
    }
}

/// Bytes to mebibytes, rounded to two decimals
pub fn size_in_mb(bytes: u64) -> f64 {
    (bytes as f64 / 1_048_576.0 * 100.0).round() / 100.0
}

/// Strings pass through, numbers and booleans become their text; anything else is `None`
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Loose truthiness: `false`, `0`, `""`, `"0"`, `null`, `[]` and `{}` are false
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty() && s != "0",
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    })
}

/// `null` decodes as an empty list
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<MediaVariant>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<MediaVariant>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a JSON number or a numeric string; anything else becomes `None`
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => Some(n),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .map(Number::from)
                .or_else(|| s.parse::<f64>().ok().and_then(Number::from_f64))
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_payload() {
        let payload = json!({
            "success": true,
            "url": "https://youtu.be/abc",
            "title": "Demo",
            "author": "Someone",
            "thumbnail": "https://img/abc.jpg",
            "duration": 212,
            "medias": [
                {"label": "720p", "extension": "mp4", "ext": "mp4", "bitrate": 1500,
                 "mimeType": "video/mp4", "url": "https://cdn/720.mp4"}
            ]
        });
        let response: VideoResponse = serde_json::from_value(payload).unwrap();
        assert!(response.success);
        assert_eq!(response.medias.len(), 1);
        assert_eq!(response.medias[0].mime_type.as_deref(), Some("video/mp4"));
        assert_eq!(response.medias[0].bitrate_value(), 1500.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let response: VideoResponse =
            serde_json::from_value(json!({"success": true, "medias": [{}]})).unwrap();
        let meta = VideoMetadata::from(&response);
        assert_eq!(meta.title, "");
        assert_eq!(meta.duration, Number::from(0));
        assert_eq!(
            meta.available_formats[0],
            FormatSummary {
                label: String::new(),
                extension: String::new(),
                bitrate: Number::from(0),
                mime: String::new(),
            }
        );
    }

    #[test]
    fn test_string_bitrate_is_ranked() {
        let media: MediaVariant =
            serde_json::from_value(json!({"bitrate": "320", "duration": null})).unwrap();
        assert_eq!(media.bitrate_value(), 320.0);

        let junk: MediaVariant = serde_json::from_value(json!({"bitrate": "fast"})).unwrap();
        assert_eq!(junk.bitrate_value(), 0.0);
    }

    #[test]
    fn test_null_medias_is_empty() {
        let response: VideoResponse =
            serde_json::from_value(json!({"success": true, "medias": null})).unwrap();
        assert!(response.medias.is_empty());
    }

    #[test]
    fn test_non_string_text_fields_are_tolerated() {
        let response: VideoResponse = serde_json::from_value(json!({
            "success": true,
            "title": 2024,
            "author": null,
            "thumbnail": ["x"],
            "medias": [{"label": 720, "mimeType": {"type": "video"}}]
        }))
        .unwrap();
        assert_eq!(response.title.as_deref(), Some("2024"));
        assert_eq!(response.author, None);
        assert_eq!(response.thumbnail, None);
        assert_eq!(response.medias[0].label.as_deref(), Some("720"));
        assert_eq!(response.medias[0].mime_type, None);
    }

    #[test]
    fn test_success_flag_truthiness() {
        for (flag, expected) in [
            (json!(true), true),
            (json!(1), true),
            (json!("yes"), true),
            (json!(false), false),
            (json!(0), false),
            (json!("0"), false),
            (json!(""), false),
            (json!(null), false),
        ] {
            let response: VideoResponse =
                serde_json::from_value(json!({ "success": flag.clone() })).unwrap();
            assert_eq!(response.success, expected, "success = {}", flag);
        }

        let response: VideoResponse = serde_json::from_value(json!({})).unwrap();
        assert!(!response.success);
    }

    #[test]
    fn test_file_extension_prefers_ext() {
        let media = MediaVariant {
            ext: Some("m4a".to_string()),
            extension: Some("mp4".to_string()),
            ..Default::default()
        };
        assert_eq!(media.file_extension(), "m4a");

        let media = MediaVariant {
            extension: Some("webm".to_string()),
            ..Default::default()
        };
        assert_eq!(media.file_extension(), "webm");
    }

    #[test]
    fn test_size_in_mb_rounding() {
        assert_eq!(size_in_mb(0), 0.0);
        assert_eq!(size_in_mb(1_048_576), 1.0);
        assert_eq!(size_in_mb(1_572_864), 1.5);
        assert_eq!(size_in_mb(5_000_000), 4.77);
    }
}
