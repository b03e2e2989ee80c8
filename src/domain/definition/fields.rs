//! PassKit dictionary types: fields, barcodes, beacons, locations, NFC.
//!
//! Serialized key names and enum values follow the PassKit Package Format;
//! everything optional is skipped when unset so the emitted pass.json stays
//! minimal.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Barcode format constants from the PassKit Package Format.
///
/// `Code128` is only valid inside the `barcodes` array, not the legacy
/// top-level `barcode` dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarcodeFormat {
    #[serde(rename = "PKBarcodeFormatQR")]
    Qr,
    #[serde(rename = "PKBarcodeFormatPDF417")]
    Pdf417,
    #[serde(rename = "PKBarcodeFormatAztec")]
    Aztec,
    #[serde(rename = "PKBarcodeFormatCode128")]
    Code128,
}

/// Barcode displayed on the pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barcode {
    pub format: BarcodeFormat,
    pub message: String,
    pub message_encoding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl Barcode {
    /// Create a barcode with the default `iso-8859-1` message encoding
    pub fn new(message: impl Into<String>, format: BarcodeFormat) -> Self {
        Self {
            format,
            message: message.into(),
            message_encoding: "iso-8859-1".to_string(),
            alt_text: None,
        }
    }

    /// Human-readable text displayed near the barcode
    #[must_use]
    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }
}

/// Text alignment for field values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlignment {
    #[serde(rename = "PKTextAlignmentLeft")]
    Left,
    #[serde(rename = "PKTextAlignmentCenter")]
    Center,
    #[serde(rename = "PKTextAlignmentRight")]
    Right,
    #[serde(rename = "PKTextAlignmentNatural")]
    Natural,
}

/// Date/time display style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateStyle {
    #[serde(rename = "PKDateStyleNone")]
    None,
    #[serde(rename = "PKDateStyleShort")]
    Short,
    #[serde(rename = "PKDateStyleMedium")]
    Medium,
    #[serde(rename = "PKDateStyleLong")]
    Long,
    #[serde(rename = "PKDateStyleFull")]
    Full,
}

/// Number display style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberStyle {
    #[serde(rename = "PKNumberStyleDecimal")]
    Decimal,
    #[serde(rename = "PKNumberStylePercent")]
    Percent,
    #[serde(rename = "PKNumberStyleScientific")]
    Scientific,
    #[serde(rename = "PKNumberStyleSpellOut")]
    SpellOut,
}

/// Data detectors applied to a field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataDetectorType {
    #[serde(rename = "PKDataDetectorTypePhoneNumber")]
    PhoneNumber,
    #[serde(rename = "PKDataDetectorTypeLink")]
    Link,
    #[serde(rename = "PKDataDetectorTypeAddress")]
    Address,
    #[serde(rename = "PKDataDetectorTypeCalendarEvent")]
    CalendarEvent,
}

/// A single field on the pass front or back
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub key: String,
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributed_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub data_detector_types: Vec<DataDetectorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_alignment: Option<TextAlignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_style: Option<DateStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_style: Option<DateStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignores_time_zone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_relative: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_style: Option<NumberStyle>,
}

impl Field {
    /// Create a field with a key and a value
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            label: None,
            attributed_value: None,
            change_message: None,
            data_detector_types: Vec::new(),
            text_alignment: None,
            date_style: None,
            time_style: None,
            ignores_time_zone: None,
            is_relative: None,
            currency_code: None,
            number_style: None,
        }
    }

    /// Label text displayed next to the value
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Format string shown when the field's value changes. Must contain `%@`.
    #[must_use]
    pub fn with_change_message(mut self, message: impl Into<String>) -> Self {
        self.change_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_text_alignment(mut self, alignment: TextAlignment) -> Self {
        self.text_alignment = Some(alignment);
        self
    }

    /// Currency code for a numeric value; mutually exclusive with number style
    #[must_use]
    pub fn with_currency_code(mut self, code: impl Into<String>) -> Self {
        self.currency_code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_date_style(mut self, date_style: DateStyle, time_style: DateStyle) -> Self {
        self.date_style = Some(date_style);
        self.time_style = Some(time_style);
        self
    }
}

/// iBeacon region that brings the pass to the lock screen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beacon {
    #[serde(rename = "proximityUUID")]
    pub proximity_uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevant_text: Option<String>,
}

impl Beacon {
    pub fn new(proximity_uuid: impl Into<String>) -> Self {
        Self {
            proximity_uuid: proximity_uuid.into(),
            major: None,
            minor: None,
            relevant_text: None,
        }
    }

    #[must_use]
    pub fn with_region(mut self, major: u16, minor: u16) -> Self {
        self.major = Some(major);
        self.minor = Some(minor);
        self
    }

    /// Text displayed on the lock screen when the beacon is in range
    #[must_use]
    pub fn with_relevant_text(mut self, text: impl Into<String>) -> Self {
        self.relevant_text = Some(text.into());
        self
    }
}

/// Geographic location where the pass is relevant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevant_text: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
            relevant_text: None,
        }
    }

    #[must_use]
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    #[must_use]
    pub fn with_relevant_text(mut self, text: impl Into<String>) -> Self {
        self.relevant_text = Some(text.into());
        self
    }
}

/// NFC payload for Value Added Services
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nfc {
    /// Payload transmitted to the terminal; truncated by the system past 64 bytes
    pub message: String,
    /// Base64 X.509 SubjectPublicKeyInfo with a P-256 ECDH public key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_public_key: Option<String>,
}

impl Nfc {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            encryption_public_key: None,
        }
    }

    #[must_use]
    pub fn with_encryption_public_key(mut self, key: impl Into<String>) -> Self {
        self.encryption_public_key = Some(key.into());
        self
    }
}
