use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    options::ReturnDocument,
    Collection, Database,
};
use tracing::debug;

use shared_models::{Appointment, AppointmentStatus, Doctor, ProfileUpdate};

use crate::error::StoreError;
use crate::repository::{AppointmentRepository, DoctorRepository};

pub const DOCTORS_COLLECTION: &str = "doctors";
pub const APPOINTMENTS_COLLECTION: &str = "appointments";

pub struct MongoDoctorRepository {
    collection: Collection<Doctor>,
    max_time: Duration,
}

impl MongoDoctorRepository {
    pub fn new(database: &Database, max_time: Duration) -> Self {
        Self {
            collection: database.collection(DOCTORS_COLLECTION),
            max_time,
        }
    }
}

#[async_trait]
impl DoctorRepository for MongoDoctorRepository {
    async fn insert(&self, doctor: &Doctor) -> Result<(), StoreError> {
        self.collection.insert_one(doctor).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Doctor>, StoreError> {
        let doctor = self
            .collection
            .find_one(doc! { "_id": id })
            .max_time(self.max_time)
            .await?;
        Ok(doctor)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>, StoreError> {
        let doctor = self
            .collection
            .find_one(doc! { "email": email })
            .max_time(self.max_time)
            .await?;
        Ok(doctor)
    }

    async fn list(&self) -> Result<Vec<Doctor>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": 1 })
            .max_time(self.max_time)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn toggle_availability(&self, id: &str) -> Result<Option<bool>, StoreError> {
        // Pipeline update so the read and the flip happen in one server-side step.
        let flip = vec![doc! { "$set": { "available": { "$not": ["$available"] } } }];

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, flip)
            .return_document(ReturnDocument::After)
            .max_time(self.max_time)
            .await?;

        debug!("Toggled availability for doctor {}: {:?}", id, updated.as_ref().map(|d| d.available));
        Ok(updated.map(|doctor| doctor.available))
    }

    async fn update_profile(&self, id: &str, update: &ProfileUpdate) -> Result<bool, StoreError> {
        let mut fields = doc! {
            "fees": update.fees,
            "available": update.available,
        };
        if let Some(address) = &update.address {
            fields.insert("address", to_bson(address)?);
        }

        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await?;
        Ok(result.matched_count > 0)
    }
}

pub struct MongoAppointmentRepository {
    collection: Collection<Appointment>,
    max_time: Duration,
}

impl MongoAppointmentRepository {
    pub fn new(database: &Database, max_time: Duration) -> Self {
        Self {
            collection: database.collection(APPOINTMENTS_COLLECTION),
            max_time,
        }
    }
}

#[async_trait]
impl AppointmentRepository for MongoAppointmentRepository {
    async fn insert(&self, appointment: &Appointment) -> Result<(), StoreError> {
        self.collection.insert_one(appointment).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>, StoreError> {
        let appointment = self
            .collection
            .find_one(doc! { "_id": id })
            .max_time(self.max_time)
            .await?;
        Ok(appointment)
    }

    async fn list_by_doctor(&self, doctor_id: &str) -> Result<Vec<Appointment>, StoreError> {
        let cursor = self
            .collection
            .find(doc! { "doctor_id": doctor_id })
            .sort(doc! { "created_at": 1 })
            .max_time(self.max_time)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn list(&self) -> Result<Vec<Appointment>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": 1 })
            .max_time(self.max_time)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn transition(
        &self,
        id: &str,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> Result<bool, StoreError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id, "status": from.as_str() },
                doc! { "$set": { "status": to.as_str() } },
            )
            .await?;
        Ok(result.modified_count > 0)
    }
}
