//! Entity models, form inputs and their validation rules

pub mod enums;
pub mod validation;

pub use enums::{EventStatus, Gender, Shift, StaffRole, TicketStatus, VenueType};
pub use validation::Validate;

use crate::{Error, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validation::{email, in_range, non_negative, optional, optional_email, positive, required};

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub status: EventStatus,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub budget: f64,
    pub venue_id: i64,
}

/// Event form
#[derive(Debug, Clone, Deserialize)]
pub struct EventInput {
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: EventStatus,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub budget: f64,
    pub venue_id: i64,
}

impl Validate for EventInput {
    fn validated(self) -> Result<Self> {
        if self.end_time <= self.start_time {
            return Err(Error::InvalidInput(
                "End time must be after start time".to_string(),
            ));
        }
        Ok(Self {
            name: required("Name", self.name)?,
            budget: positive("Budget", self.budget)?,
            ..self
        })
    }
}

/// Event row as shown in the admin events list
#[derive(Debug, Clone, Serialize)]
pub struct EventListing {
    pub event_id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub status: EventStatus,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub budget: f64,
    pub venue_name: String,
}

/// Upcoming event, as shown on the dashboard and in the portal browser
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingEvent {
    pub event_id: i64,
    pub name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub venue_name: String,
    pub status: EventStatus,
}

// ============================================================================
// Venues
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub venue_id: i64,
    pub name: String,
    pub venue_type: VenueType,
    pub address: String,
    pub country: Option<String>,
    pub pincode: String,
    pub capacity: i64,
    pub cost: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VenueInput {
    pub name: String,
    pub venue_type: VenueType,
    pub address: String,
    #[serde(default)]
    pub country: Option<String>,
    pub pincode: String,
    pub capacity: i64,
    pub cost: f64,
}

impl Validate for VenueInput {
    fn validated(self) -> Result<Self> {
        if self.capacity <= 0 {
            return Err(Error::InvalidInput("Capacity must be > 0".to_string()));
        }
        Ok(Self {
            name: required("Name", self.name)?,
            venue_type: self.venue_type,
            address: required("Address", self.address)?,
            country: optional(self.country),
            pincode: required("Pincode", self.pincode)?,
            capacity: self.capacity,
            cost: non_negative("Cost", self.cost)?,
        })
    }
}

// ============================================================================
// Artists
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub artist_id: i64,
    pub name: String,
    pub genre: String,
    pub country: Option<String>,
    pub phone_no: String,
    pub email: String,
    pub fee: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistInput {
    pub name: String,
    pub genre: String,
    #[serde(default)]
    pub country: Option<String>,
    pub phone_no: String,
    pub email: String,
    pub fee: f64,
}

impl Validate for ArtistInput {
    fn validated(self) -> Result<Self> {
        Ok(Self {
            name: required("Name", self.name)?,
            genre: required("Genre", self.genre)?,
            country: optional(self.country),
            phone_no: required("Phone", self.phone_no)?,
            email: email("Email", self.email)?,
            fee: non_negative("Fee", self.fee)?,
        })
    }
}

// ============================================================================
// Sponsors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sponsor {
    pub sponsor_id: i64,
    pub name: String,
    pub industry: Option<String>,
    pub contact_person: Option<String>,
    pub phone_no: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SponsorInput {
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub phone_no: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Validate for SponsorInput {
    fn validated(self) -> Result<Self> {
        Ok(Self {
            name: required("Name", self.name)?,
            industry: optional(self.industry),
            contact_person: optional(self.contact_person),
            phone_no: optional(self.phone_no),
            email: optional_email("Email", self.email)?,
        })
    }
}

// ============================================================================
// Staff
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub staff_id: i64,
    pub name: String,
    pub role: StaffRole,
    pub phone_no: Option<String>,
    pub email: Option<String>,
    pub salary: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaffInput {
    pub name: String,
    pub role: StaffRole,
    #[serde(default)]
    pub phone_no: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
}

impl Validate for StaffInput {
    fn validated(self) -> Result<Self> {
        Ok(Self {
            name: required("Name", self.name)?,
            role: self.role,
            phone_no: optional(self.phone_no),
            email: optional_email("Email", self.email)?,
            salary: self
                .salary
                .map(|s| non_negative("Salary", s))
                .transpose()?,
        })
    }
}

// ============================================================================
// Attendees
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    pub attendee_id: i64,
    pub name: String,
    pub phone_no: String,
    pub email: String,
    pub gender: Option<Gender>,
    pub age: Option<i64>,
}

/// Customer registration form
#[derive(Debug, Clone, Deserialize)]
pub struct AttendeeInput {
    pub name: String,
    pub phone_no: String,
    pub email: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub age: Option<i64>,
}

impl Validate for AttendeeInput {
    fn validated(self) -> Result<Self> {
        Ok(Self {
            name: required("Full name", self.name)?,
            phone_no: required("Phone number", self.phone_no)?,
            email: email("Email", self.email)?,
            gender: self.gender,
            age: self.age.map(|a| in_range("Age", a, 1, 120)).transpose()?,
        })
    }
}

// ============================================================================
// Tickets
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub ticket_id: i64,
    pub event_id: i64,
    pub ticket_type: String,
    pub seat_no: String,
    pub price: f64,
    pub status: TicketStatus,
}

/// Maximum tickets created by one batch request
pub const MAX_TICKET_BATCH: i64 = 1000;

/// Request to issue a block of seats for an event
#[derive(Debug, Clone, Deserialize)]
pub struct TicketBatch {
    pub ticket_type: String,
    pub price: f64,
    pub count: i64,
    #[serde(default)]
    pub seat_prefix: Option<String>,
}

impl TicketBatch {
    /// Seat prefix, defaulting to the first three letters of the type
    pub fn prefix(&self) -> String {
        match &self.seat_prefix {
            Some(prefix) => prefix.clone(),
            None => self
                .ticket_type
                .chars()
                .filter(|c| c.is_alphanumeric())
                .take(3)
                .collect::<String>()
                .to_uppercase(),
        }
    }
}

impl Validate for TicketBatch {
    fn validated(self) -> Result<Self> {
        let seat_prefix = optional(self.seat_prefix);
        if let Some(prefix) = &seat_prefix {
            if !prefix.chars().all(|c| c.is_alphanumeric()) {
                return Err(Error::InvalidInput(
                    "Seat prefix must be alphanumeric".to_string(),
                ));
            }
        }
        Ok(Self {
            ticket_type: required("Ticket type", self.ticket_type)?,
            price: non_negative("Price", self.price)?,
            count: in_range("Count", self.count, 1, MAX_TICKET_BATCH)?,
            seat_prefix,
        })
    }
}

/// Ticket purchased by an attendee
#[derive(Debug, Clone, Serialize)]
pub struct PurchasedTicket {
    pub ticket_id: i64,
    pub event_id: i64,
    pub event_name: String,
    pub date: NaiveDate,
    pub ticket_type: String,
    pub seat_no: String,
    pub price: f64,
    pub purchased_at: String,
}

// ============================================================================
// Event assignments
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistAssignment {
    pub artist_id: i64,
    pub no_of_songs: i64,
}

impl Validate for ArtistAssignment {
    fn validated(self) -> Result<Self> {
        if self.no_of_songs <= 0 {
            return Err(Error::InvalidInput("No. of songs must be > 0".to_string()));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SponsorAssignment {
    pub sponsor_id: i64,
    pub amount: f64,
}

impl Validate for SponsorAssignment {
    fn validated(self) -> Result<Self> {
        Ok(Self {
            amount: positive("Amount", self.amount)?,
            ..self
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StaffAssignment {
    pub staff_id: i64,
    pub shift: Shift,
}

/// Artist performing at an event
#[derive(Debug, Clone, Serialize)]
pub struct EventArtist {
    pub artist_id: i64,
    pub name: String,
    pub genre: String,
    pub no_of_songs: i64,
    pub fee: f64,
}

/// Sponsor contributing to an event
#[derive(Debug, Clone, Serialize)]
pub struct EventSponsor {
    pub sponsor_id: i64,
    pub name: String,
    pub industry: Option<String>,
    pub amount: f64,
}

/// Staff member working an event
#[derive(Debug, Clone, Serialize)]
pub struct EventStaff {
    pub staff_id: i64,
    pub name: String,
    pub role: StaffRole,
    pub shift: Shift,
    pub salary: Option<f64>,
}
