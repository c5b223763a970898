//! Appointment entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use carelink_core::types::{DbId, Timestamp};

use crate::models::doctor::Doctor;
use crate::models::patient::Patient;

/// An appointment row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appointment {
    pub id: DbId,
    pub doctor_id: DbId,
    pub patient_id: DbId,
    pub doctor_name: String,
    pub patient_name: String,
    pub mobile_number: String,
    pub appointment_date: Timestamp,
    pub serial_number: Option<i32>,
    pub weight: Option<f64>,
    pub age: Option<i32>,
    pub blood_group: Option<String>,
    pub consultation_fee: Option<f64>,
    pub vat: Option<f64>,
    pub promo_code: Option<String>,
    pub consultation_type: Option<String>,
    pub payment_method: Option<String>,
    pub director_reference: Option<String>,
    pub reason: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An appointment together with its doctor and patient rows, as returned
/// by the admin list/detail endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentDetail {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub doctor: Option<Doctor>,
    pub patient: Option<Patient>,
}

/// Values written on appointment insert. Enum-valued fields are already
/// canonicalized by the handler.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub doctor_id: DbId,
    pub patient_id: DbId,
    pub doctor_name: String,
    pub patient_name: String,
    pub mobile_number: String,
    pub appointment_date: Timestamp,
    pub serial_number: Option<i32>,
    pub weight: Option<f64>,
    pub age: Option<i32>,
    pub blood_group: Option<String>,
    pub consultation_fee: Option<f64>,
    pub vat: Option<f64>,
    pub promo_code: Option<String>,
    pub consultation_type: Option<String>,
    pub payment_method: Option<String>,
    pub director_reference: Option<String>,
    pub reason: Option<String>,
    pub address: Option<String>,
}

/// Values applied on appointment update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct AppointmentChanges {
    pub doctor_name: Option<String>,
    pub patient_name: Option<String>,
    pub mobile_number: Option<String>,
    pub appointment_date: Option<Timestamp>,
    pub serial_number: Option<i32>,
    pub weight: Option<f64>,
    pub age: Option<i32>,
    pub blood_group: Option<String>,
    pub consultation_fee: Option<f64>,
    pub vat: Option<f64>,
    pub promo_code: Option<String>,
    pub consultation_type: Option<String>,
    pub payment_method: Option<String>,
    pub director_reference: Option<String>,
    pub reason: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
}

/// Request body for the admin create endpoint. Loosely typed where the
/// original clients send loose values; the handler normalizes.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppointmentRequest {
    pub doctor_id: DbId,
    pub doctor_name: String,
    pub patient_id: Option<DbId>,
    pub patient_name: String,
    pub mobile_number: String,
    pub appointment_date: Timestamp,
    #[serde(default)]
    pub is_new_patient: bool,
    pub serial_number: Option<i32>,
    pub weight: Option<f64>,
    pub age: Option<i32>,
    pub blood_group: Option<String>,
    pub consultation_fee: Option<f64>,
    pub vat: Option<f64>,
    pub promo_code: Option<String>,
    pub consultation_type: Option<String>,
    pub payment_method: Option<String>,
    pub director_reference: Option<String>,
    pub reason: Option<String>,
    pub address: Option<String>,
}

/// Request body for the admin update endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub doctor_name: Option<String>,
    pub patient_name: Option<String>,
    pub mobile_number: Option<String>,
    pub appointment_date: Option<Timestamp>,
    pub serial_number: Option<i32>,
    pub weight: Option<f64>,
    pub age: Option<i32>,
    pub blood_group: Option<String>,
    pub consultation_fee: Option<f64>,
    pub vat: Option<f64>,
    pub promo_code: Option<String>,
    pub consultation_type: Option<String>,
    pub payment_method: Option<String>,
    pub director_reference: Option<String>,
    pub reason: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
}

/// Request body for a patient booking their own appointment.
#[derive(Debug, Clone, Deserialize)]
pub struct BookAppointmentRequest {
    pub doctor_id: DbId,
    pub appointment_date: Timestamp,
    pub patient_name: Option<String>,
    pub consultation_type: Option<String>,
    pub payment_method: Option<String>,
    pub reason: Option<String>,
    pub address: Option<String>,
}
