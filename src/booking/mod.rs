//! Booking data model
//!
//! Mirrors the JSON documents served by the clinic backend. Field names on
//! the wire follow the backend (`_id`, `apptDate`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// A scheduled appointment linking a user and a dentist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: UserRef,
    #[serde(default)]
    pub dentist: Option<DentistRef>,
    #[serde(rename = "apptDate")]
    pub appt_date: DateTime<Utc>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Booking owner as populated by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// Dentist as populated by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DentistRef {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

impl Booking {
    /// Name of the assigned dentist, if the backend populated one
    pub fn dentist_name(&self) -> Option<&str> {
        self.dentist.as_ref().map(|d| d.name.as_str())
    }
}

/// Body of `PUT /bookings/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingUpdate {
    #[serde(rename = "apptDate", serialize_with = "serialize_iso_millis")]
    pub appt_date: DateTime<Utc>,
}

impl BookingUpdate {
    pub fn reschedule(appt_date: DateTime<Utc>) -> Self {
        Self { appt_date }
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-03-02T10:30:00.000Z`
fn serialize_iso_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Response of `GET /bookings`.
///
/// The backend wraps lists in a `{ success, count, data }` envelope; a bare
/// array is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum BookingList {
    Envelope { data: Vec<Booking> },
    Bare(Vec<Booking>),
}

impl BookingList {
    pub(crate) fn into_bookings(self) -> Vec<Booking> {
        match self {
            BookingList::Envelope { data, .. } => data,
            BookingList::Bare(bookings) => bookings,
        }
    }
}
