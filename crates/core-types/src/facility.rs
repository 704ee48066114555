use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::postgres::PgRow;
use sqlx::FromRow;
use std::ops::Deref;

/// The wire and storage shape of a facility record, adapted from the MEI
/// facilities export.
///
/// A payload is unchecked: it is what a client sends, or what the bulk loader
/// builds from a CSV row. It only becomes a [`Facility`] after passing
/// validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FacilityPayload {
    pub uid: String,
    pub segment: String,
    pub company: String,
    pub technology: String,
    pub subcategory: String,
    pub investment_status: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Estimated investment in currency units. `None` means unknown, which is
    /// not the same as zero.
    #[serde(default)]
    pub estimated_investment: Option<i64>,
    pub announcement_date: NaiveDate,
}

/// A facility record that has passed schema validation.
///
/// The only ways to obtain one are `TryFrom<FacilityPayload>` (which
/// deserialization goes through) and reading a row back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility(FacilityPayload);

impl Facility {
    pub fn into_payload(self) -> FacilityPayload {
        self.0
    }
}

impl Deref for Facility {
    type Target = FacilityPayload;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<FacilityPayload> for Facility {
    type Error = CoreError;

    fn try_from(payload: FacilityPayload) -> Result<Self, Self::Error> {
        if payload.uid.trim().is_empty() {
            return Err(CoreError::invalid("uid", "must not be blank"));
        }
        // Written as positive range checks so NaN is rejected too.
        if !(payload.latitude > -90.0 && payload.latitude < 90.0) {
            return Err(CoreError::invalid(
                "latitude",
                format!("{} is not strictly between -90 and 90", payload.latitude),
            ));
        }
        if !(payload.longitude > -180.0 && payload.longitude < 180.0) {
            return Err(CoreError::invalid(
                "longitude",
                format!("{} is not strictly between -180 and 180", payload.longitude),
            ));
        }
        Ok(Facility(payload))
    }
}

impl Serialize for Facility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Facility {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let payload = FacilityPayload::deserialize(deserializer)?;
        Facility::try_from(payload).map_err(serde::de::Error::custom)
    }
}

// Rows are trusted: the table carries the same range constraints as CHECKs.
impl<'r> FromRow<'r, PgRow> for Facility {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        FacilityPayload::from_row(row).map(Facility)
    }
}
