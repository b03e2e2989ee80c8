//! Typed pass definition.
//!
//! The upstream package modeled pass.json as a dynamic attribute bag with
//! magic setters. Here each pass style is an explicit variant carrying its
//! field groups, and the whole definition serializes straight into the
//! PassKit Package Format. Validation is a discrete step the build pipeline
//! runs before hashing anything; serialization itself never validates.

pub mod fields;

pub use fields::{
    Barcode, BarcodeFormat, Beacon, DataDetectorType, DateStyle, Field, Location, Nfc,
    NumberStyle, TextAlignment,
};

use crate::infra::error::{PassError, PassResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Transit type for boarding passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitType {
    #[serde(rename = "PKTransitTypeAir")]
    Air,
    #[serde(rename = "PKTransitTypeBoat")]
    Boat,
    #[serde(rename = "PKTransitTypeBus")]
    Bus,
    #[serde(rename = "PKTransitTypeGeneric")]
    Generic,
    #[serde(rename = "PKTransitTypeTrain")]
    Train,
}

/// Field groups shared by every pass style
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleFields {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub header_fields: Vec<Field>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub primary_fields: Vec<Field>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub secondary_fields: Vec<Field>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub auxiliary_fields: Vec<Field>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub back_fields: Vec<Field>,
}

/// Boarding pass structure: the shared field groups plus a transit type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardingPassFields {
    #[serde(flatten)]
    pub fields: StyleFields,
    pub transit_type: TransitType,
}

/// Pass style. The variant selects which style-specific key the field group
/// is serialized under, exactly one of which must be present in pass.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassStyle {
    BoardingPass(BoardingPassFields),
    Coupon(StyleFields),
    EventTicket(StyleFields),
    Generic(StyleFields),
    StoreCard(StyleFields),
}

impl PassStyle {
    /// Boarding pass with the given transit type and empty field groups
    #[must_use]
    pub fn boarding_pass(transit_type: TransitType) -> Self {
        PassStyle::BoardingPass(BoardingPassFields {
            fields: StyleFields::default(),
            transit_type,
        })
    }

    /// Mutable access to the style's field groups
    pub fn fields_mut(&mut self) -> &mut StyleFields {
        match self {
            PassStyle::BoardingPass(bp) => &mut bp.fields,
            PassStyle::Coupon(f)
            | PassStyle::EventTicket(f)
            | PassStyle::Generic(f)
            | PassStyle::StoreCard(f) => f,
        }
    }
}

/// The complete pass definition, serialized as pass.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassDefinition {
    pub format_version: u32,
    pub description: String,
    pub organization_name: String,
    pub pass_type_identifier: String,
    pub serial_number: String,
    pub team_identifier: String,

    #[serde(flatten)]
    pub style: PassStyle,

    // Expiration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voided: Option<bool>,

    // Relevance
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub beacons: Vec<Beacon>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub locations: Vec<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevant_date: Option<String>,

    // Visual appearance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<Barcode>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub barcodes: Vec<Barcode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppress_strip_shine: Option<bool>,

    // Associated app
    #[serde(rename = "appLaunchURL", skip_serializing_if = "Option::is_none")]
    pub app_launch_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub associated_store_identifiers: Vec<u64>,

    // Web service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_token: Option<String>,
    #[serde(rename = "webServiceURL", skip_serializing_if = "Option::is_none")]
    pub web_service_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nfc: Option<Nfc>,
}

impl PassDefinition {
    /// Create a definition with the mandatory top-level keys and a style
    pub fn new(
        description: impl Into<String>,
        organization_name: impl Into<String>,
        pass_type_identifier: impl Into<String>,
        serial_number: impl Into<String>,
        team_identifier: impl Into<String>,
        style: PassStyle,
    ) -> Self {
        Self {
            format_version: 1,
            description: description.into(),
            organization_name: organization_name.into(),
            pass_type_identifier: pass_type_identifier.into(),
            serial_number: serial_number.into(),
            team_identifier: team_identifier.into(),
            style,
            expiration_date: None,
            voided: None,
            beacons: Vec::new(),
            locations: Vec::new(),
            max_distance: None,
            relevant_date: None,
            barcode: None,
            barcodes: Vec::new(),
            background_color: None,
            foreground_color: None,
            label_color: None,
            logo_text: None,
            suppress_strip_shine: None,
            app_launch_url: None,
            associated_store_identifiers: Vec::new(),
            authentication_token: None,
            web_service_url: None,
            user_info: None,
            nfc: None,
        }
    }

    /// Check the required keys before the definition is handed to a build.
    ///
    /// Matches the upstream rules: the six mandatory top-level keys must be
    /// present and non-empty, and `appLaunchURL` requires at least one
    /// associated store identifier.
    pub fn validate(&self) -> PassResult<()> {
        let required = [
            ("description", &self.description),
            ("organizationName", &self.organization_name),
            ("passTypeIdentifier", &self.pass_type_identifier),
            ("serialNumber", &self.serial_number),
            ("teamIdentifier", &self.team_identifier),
        ];

        for (key, value) in required {
            if value.is_empty() {
                return Err(PassError::ValidationError(format!(
                    "Pass definition is missing required key '{key}'"
                )));
            }
        }

        if self.format_version != 1 {
            return Err(PassError::ValidationError(format!(
                "Unsupported formatVersion {}",
                self.format_version
            )));
        }

        if self.app_launch_url.is_some() && self.associated_store_identifiers.is_empty() {
            return Err(PassError::ValidationError(
                "appLaunchURL requires associatedStoreIdentifiers".to_string(),
            ));
        }

        Ok(())
    }

    /// Serialize the definition to pass.json bytes
    pub fn to_json(&self) -> PassResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
