use serde::{Deserialize, Serialize};

/// A numeric setting as it arrives from a configuration source.
///
/// Settings written by form-based editors store numbers as strings (`"800"`), hand-written
/// files usually store real JSON numbers; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Number(serde_json::Number),
    Text(String),
}

impl NumericValue {
    /// Parse as a base-10 integer. Fractional values are truncated toward zero, and text
    /// is read up to the first character that is not a digit (`"800.9"` and `"800px"` are 800).
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            NumericValue::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
            NumericValue::Text(s) => leading_integer(s),
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        let value = match self {
            NumericValue::Number(n) => n.as_f64().map(|f| f as f32),
            NumericValue::Text(s) => s.trim().parse::<f32>().ok(),
        };
        value.filter(|f| f.is_finite())
    }
}

/// Optional sign followed by at least one digit, after leading whitespace
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let digits_start = usize::from(text.starts_with(['+', '-']));
    let digits_len = text[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    text[..digits_start + digits_len].parse().ok()
}

impl From<u32> for NumericValue {
    fn from(value: u32) -> Self {
        NumericValue::Number(value.into())
    }
}

impl From<f32> for NumericValue {
    fn from(value: f32) -> Self {
        serde_json::Number::from_f64(f64::from(value))
            .map(NumericValue::Number)
            .unwrap_or_else(|| NumericValue::Text(value.to_string()))
    }
}

impl std::fmt::Display for NumericValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericValue::Number(n) => write!(f, "{}", n),
            NumericValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

/// Order in which directory entries are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingOrder {
    /// Whatever order the platform's directory listing yields (not guaranteed sorted)
    #[default]
    Filesystem,
    /// Sorted by file name, byte-wise
    Lexicographic,
}

/// Image size section of the settings document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageSettings {
    #[serde(alias = "canvasSize", skip_serializing_if = "Option::is_none")]
    pub resize_size: Option<NumericValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_size: Option<NumericValue>,
}

/// Watermark section of the settings document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WatermarkSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<NumericValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<NumericValue>,
}

/// Raw settings document, every field optional.
///
/// Defaults are not applied here; see [`crate::BatchConfig::from_settings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark_logo_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<ImageSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<WatermarkSettings>,

    // Flat spellings; these win over the nested sections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas_size: Option<NumericValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_size: Option<NumericValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark_opacity: Option<NumericValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark_width: Option<NumericValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_order: Option<ListingOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<NumericValue>,
}

impl Settings {
    /// Parse from a JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON (two-space indent)
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Layer `other` on top of `self`: every field set in `other` replaces the one here.
    pub fn overlay(self, other: Settings) -> Settings {
        let images = match (self.images, other.images) {
            (Some(base), Some(top)) => Some(ImageSettings {
                resize_size: top.resize_size.or(base.resize_size),
                output_size: top.output_size.or(base.output_size),
            }),
            (base, top) => top.or(base),
        };
        let watermark = match (self.watermark, other.watermark) {
            (Some(base), Some(top)) => Some(WatermarkSettings {
                opacity: top.opacity.or(base.opacity),
                width: top.width.or(base.width),
            }),
            (base, top) => top.or(base),
        };

        Settings {
            input_path: other.input_path.or(self.input_path),
            output_path: other.output_path.or(self.output_path),
            watermark_logo_file: other.watermark_logo_file.or(self.watermark_logo_file),
            images,
            watermark,
            canvas_size: other.canvas_size.or(self.canvas_size),
            output_size: other.output_size.or(self.output_size),
            watermark_opacity: other.watermark_opacity.or(self.watermark_opacity),
            watermark_width: other.watermark_width.or(self.watermark_width),
            listing_order: other.listing_order.or(self.listing_order),
            max_concurrency: other.max_concurrency.or(self.max_concurrency),
        }
    }

    pub(crate) fn canvas_size_value(&self) -> Option<&NumericValue> {
        self.canvas_size
            .as_ref()
            .or_else(|| self.images.as_ref()?.resize_size.as_ref())
    }

    pub(crate) fn output_size_value(&self) -> Option<&NumericValue> {
        self.output_size
            .as_ref()
            .or_else(|| self.images.as_ref()?.output_size.as_ref())
    }

    pub(crate) fn opacity_value(&self) -> Option<&NumericValue> {
        self.watermark_opacity
            .as_ref()
            .or_else(|| self.watermark.as_ref()?.opacity.as_ref())
    }

    pub(crate) fn logo_width_value(&self) -> Option<&NumericValue> {
        self.watermark_width
            .as_ref()
            .or_else(|| self.watermark.as_ref()?.width.as_ref())
    }
}
