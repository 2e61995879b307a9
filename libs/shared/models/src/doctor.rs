use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: String,
}

/// Stored doctor document. Carries the password hash, so it is never
/// serialized into a response; use [`DoctorListing`] or [`DoctorProfile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    #[serde(default)]
    pub image: Option<String>,
    pub speciality: String,
    pub degree: String,
    pub experience: String,
    #[serde(default)]
    pub about: String,
    pub available: bool,
    pub fees: f64,
    #[serde(default)]
    pub address: Address,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Doctor {
    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }
}

/// Public directory entry: no password, no email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorListing {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub speciality: String,
    pub degree: String,
    pub experience: String,
    pub about: String,
    pub available: bool,
    pub fees: f64,
    pub address: Address,
}

impl From<&Doctor> for DoctorListing {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.clone(),
            name: doctor.name.clone(),
            image: doctor.image.clone(),
            speciality: doctor.speciality.clone(),
            degree: doctor.degree.clone(),
            experience: doctor.experience.clone(),
            about: doctor.about.clone(),
            available: doctor.available,
            fees: doctor.fees,
            address: doctor.address.clone(),
        }
    }
}

/// Profile as seen by the doctor or an administrator: everything but the password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub speciality: String,
    pub degree: String,
    pub experience: String,
    pub about: String,
    pub available: bool,
    pub fees: f64,
    pub address: Address,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl From<&Doctor> for DoctorProfile {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.clone(),
            name: doctor.name.clone(),
            email: doctor.email.clone(),
            image: doctor.image.clone(),
            speciality: doctor.speciality.clone(),
            degree: doctor.degree.clone(),
            experience: doctor.experience.clone(),
            about: doctor.about.clone(),
            available: doctor.available,
            fees: doctor.fees,
            address: doctor.address.clone(),
            created_at: doctor.created_at,
        }
    }
}

/// Fields a doctor may change on their own profile. An absent address
/// leaves the stored one untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub fees: f64,
    pub address: Option<Address>,
    pub available: bool,
}
