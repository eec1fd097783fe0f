// src/server/types.rs
// Request types for the MCP tools

use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchCoursesRequest {
    #[schemars(
        description = "Keyword matched against course titles, case-insensitively. Empty or omitted lists the whole catalog"
    )]
    pub keyword: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetCourseDetailsRequest {
    #[schemars(description = "Course id, e.g. 'CS201' (case-insensitive)")]
    pub course_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CheckPrerequisitesRequest {
    #[schemars(description = "Student id")]
    pub student_id: String,
    #[schemars(description = "Course id to check against the student's completed courses")]
    pub course_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RegisterStudentRequest {
    #[schemars(description = "Student id. Unknown students get a new record")]
    pub student_id: String,
    #[schemars(description = "Course id to enroll in")]
    pub course_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DropCourseRequest {
    #[schemars(description = "Student id")]
    pub student_id: String,
    #[schemars(description = "Course id to drop")]
    pub course_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetStudentProfileRequest {
    #[schemars(description = "Student id")]
    pub student_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExplainEligibilityRequest {
    #[schemars(description = "Student id")]
    pub student_id: String,
    #[schemars(description = "Course id whose prerequisites should be explained")]
    pub course_id: String,
}
