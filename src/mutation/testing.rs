//! Test doubles for the mutation flows

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

use crate::api::{BookingApi, ClientError, ClientResult};
use crate::booking::{Booking, BookingUpdate, DentistRef, UserRef};

pub fn booking_at(id: &str, rfc3339: &str) -> Booking {
    Booking {
        id: id.to_string(),
        user: UserRef {
            id: Some("u1".to_string()),
            name: "Ann Smith".to_string(),
        },
        dentist: Some(DentistRef {
            id: Some("d7".to_string()),
            name: "Dr. Lee".to_string(),
        }),
        appt_date: DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc),
        created_at: None,
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    List,
    Update(String, DateTime<Utc>),
    Delete(String),
}

/// In-memory [`BookingApi`] that records calls
#[derive(Default)]
pub struct FakeApi {
    fail: bool,
    bookings: Vec<Booking>,
    calls: Mutex<Vec<Call>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every write answers 500
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Default::default()
        })
    }

    pub fn with_bookings(bookings: Vec<Booking>) -> Arc<Self> {
        Arc::new(Self {
            bookings,
            ..Default::default()
        })
    }

    /// Number of writes sent
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| !matches!(c, Call::List))
            .count()
    }

    pub fn list_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, Call::List))
            .count()
    }

    pub fn updates(&self) -> Vec<(String, DateTime<Utc>)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                Call::Update(id, at) => Some((id.clone(), *at)),
                _ => None,
            })
            .collect()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                Call::Delete(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    fn outcome(&self) -> ClientResult<()> {
        if self.fail {
            Err(ClientError::Status {
                status: 500,
                message: "boom".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BookingApi for FakeApi {
    async fn list_bookings(&self, _token: &str) -> ClientResult<Vec<Booking>> {
        self.calls.lock().unwrap().push(Call::List);
        Ok(self.bookings.clone())
    }

    async fn update_booking(
        &self,
        _token: &str,
        id: &str,
        update: &BookingUpdate,
    ) -> ClientResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Update(id.to_string(), update.appt_date));
        self.outcome()
    }

    async fn delete_booking(&self, _token: &str, id: &str) -> ClientResult<()> {
        self.calls.lock().unwrap().push(Call::Delete(id.to_string()));
        self.outcome()
    }
}
