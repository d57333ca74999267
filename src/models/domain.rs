use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::core::vocabulary::amount_from_text;

/// Property listing as delivered by the listings service
///
/// Records arrive loosely shaped: the display name may live in any of
/// `title`, `name`, `projectName` or `propertyTitle`, the address may be
/// structured or free text, and the price may be a number, a range or a
/// formatted string. Every text attribute is optional except the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Property {
    #[validate(length(min = 1))]
    #[serde(rename = "propertyId", deserialize_with = "id_text")]
    pub property_id: String,
    #[serde(rename = "listingType", default, deserialize_with = "lenient_text")]
    pub listing_type: Option<String>,
    #[serde(rename = "propertyType", default, deserialize_with = "lenient_text")]
    pub property_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(rename = "projectName", default, deserialize_with = "lenient_text")]
    pub project_name: Option<String>,
    #[serde(rename = "propertyTitle", default, deserialize_with = "lenient_text")]
    pub property_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<Address>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<Price>,
    #[serde(alias = "furnishingType", default, deserialize_with = "lenient_text")]
    pub furnishing: Option<String>,
    #[serde(alias = "sharingType", default, deserialize_with = "lenient_text")]
    pub sharing: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
}

impl Property {
    /// Create a bare record with only an identifier set
    pub fn new(property_id: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            listing_type: None,
            property_type: None,
            title: None,
            name: None,
            project_name: None,
            property_title: None,
            location: None,
            address: None,
            price: None,
            furnishing: None,
            sharing: None,
            category: None,
        }
    }

    /// First non-empty display name, in title → name → projectName → propertyTitle order
    pub fn display_title(&self) -> Option<&str> {
        self.title_fields().into_iter().flatten().find(|t| !t.trim().is_empty())
    }

    fn title_fields(&self) -> [Option<&str>; 4] {
        [
            self.title.as_deref(),
            self.name.as_deref(),
            self.project_name.as_deref(),
            self.property_title.as_deref(),
        ]
    }

    /// Address slots in city, state, locality, landmark order
    ///
    /// A free-text address occupies the city slot.
    fn address_fields(&self) -> [Option<&str>; 4] {
        match &self.address {
            Some(Address::Structured(parts)) => [
                parts.city.as_deref(),
                parts.state.as_deref(),
                parts.locality.as_deref(),
                parts.landmark.as_deref(),
            ],
            Some(Address::Text(text)) => [Some(text.as_str()), None, None, None],
            None => [None; 4],
        }
    }

    /// Text fields searched by the substring fallback, in fixed order
    pub fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(13);
        fields.push(Some(self.property_id.as_str()));
        fields.push(self.property_type.as_deref());
        fields.push(self.listing_type.as_deref());
        fields.extend(self.title_fields());
        fields.push(self.location.as_deref());
        fields.extend(self.address_fields());
        fields.push(self.category.as_deref());

        fields
            .into_iter()
            .flatten()
            .filter(|f| !f.is_empty())
            .collect()
    }

    /// Names and place fields that location hints are matched against
    pub fn place_fields(&self) -> Vec<&str> {
        self.title_fields()
            .into_iter()
            .chain(std::iter::once(self.location.as_deref()))
            .chain(self.address_fields())
            .flatten()
            .filter(|f| !f.is_empty())
            .collect()
    }

    /// Price as a closed interval, if the record carries a usable price
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        self.price.as_ref().and_then(Price::bounds)
    }
}

/// Structured or free-text address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Address {
    Structured(AddressParts),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressParts {
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub locality: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub landmark: Option<String>,
}

/// Listing price: a single amount, a range, or formatted text such as "₹ 45 lakh"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Range {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    Text(String),
}

impl Price {
    /// Closed interval covered by this price
    ///
    /// Open-ended ranges extend to zero or infinity.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self {
            Price::Amount(amount) if amount.is_finite() => Some((*amount, *amount)),
            Price::Amount(_) => None,
            Price::Range { min: None, max: None } => None,
            Price::Range { min, max } => {
                let lo = min.unwrap_or(0.0);
                let hi = max.unwrap_or(f64::INFINITY);
                Some((lo.min(hi), lo.max(hi)))
            }
            Price::Text(text) => amount_from_text(text).map(|amount| (amount, amount)),
        }
    }
}

/// Text attribute that tolerates numbers and drops any other non-string
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Identifier given either as a string or a number
fn id_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(de::Error::custom(format!("unusable propertyId: {}", other))),
    }
}

/// Optional attribute whose unreadable shapes become `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
