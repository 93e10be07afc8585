//! Declared upstream endpoints and their response schemas.
//!
//! Each endpoint fixes the request it sends and the shape it expects back.
//! A body that does not deserialize into that shape is treated as no data.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;

use crate::upstream::request::ProxyRequest;

/// An upstream call with a declared response schema.
pub trait Endpoint {
    type Response: DeserializeOwned + Serialize + Send;

    fn request(&self) -> ProxyRequest;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub debit: f64,
    #[serde(default)]
    pub credit: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResult {
    pub course_code: String,
    pub course_title: String,
    pub credit: f64,
    pub grade: String,
    pub grade_point: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub code: String,
    pub title: String,
    pub credit: f64,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub body: String,
    pub published_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub student_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
}

/// Fields a student may change on their own profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Semesters that have a payment ledger.
#[derive(Debug, Clone, Copy)]
pub struct SemesterList;

impl Endpoint for SemesterList {
    type Response = Vec<Semester>;

    fn request(&self) -> ProxyRequest {
        ProxyRequest::get("/paymentLedger/semesterList")
    }
}

#[derive(Debug, Clone)]
pub struct PaymentLedger {
    pub semester: String,
}

impl Endpoint for PaymentLedger {
    type Response = Vec<LedgerEntry>;

    fn request(&self) -> ProxyRequest {
        ProxyRequest::get("/paymentLedger").query([("semester", self.semester.as_str())])
    }
}

#[derive(Debug, Clone)]
pub struct SemesterResults {
    pub semester: String,
}

impl Endpoint for SemesterResults {
    type Response = Vec<CourseResult>;

    fn request(&self) -> ProxyRequest {
        ProxyRequest::get("/result").query([("semester", self.semester.as_str())])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RegisteredCourses;

impl Endpoint for RegisteredCourses {
    type Response = Vec<Course>;

    fn request(&self) -> ProxyRequest {
        ProxyRequest::get("/courses")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Notices;

impl Endpoint for Notices {
    type Response = Vec<Notice>;

    fn request(&self) -> ProxyRequest {
        ProxyRequest::get("/notices")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StudentProfile;

impl Endpoint for StudentProfile {
    type Response = Profile;

    fn request(&self) -> ProxyRequest {
        ProxyRequest::get("/profile")
    }
}

#[derive(Debug, Clone)]
pub struct UpdateProfile(pub ProfileUpdate);

impl Endpoint for UpdateProfile {
    type Response = Profile;

    fn request(&self) -> ProxyRequest {
        ProxyRequest::put("/profile").json(json!(self.0))
    }
}
