//! Registrar MCP Server - tool surface over the academic-records core

pub mod types;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::catalog::Catalog;
use crate::eligibility::EligibilityEngine;
use crate::enrollment::EnrollmentManager;
use crate::query::QueryLayer;
use crate::registry::EnrollmentRegistry;
use self::types::*;

/// MCP server state. The catalog is immutable shared state; every
/// mutation goes through the enrollment manager.
#[derive(Clone)]
pub struct RegistrarServer {
    pub catalog: Arc<Catalog>,
    pub registry: Arc<EnrollmentRegistry>,
    eligibility: Arc<EligibilityEngine>,
    enrollment: Arc<EnrollmentManager>,
    query: Arc<QueryLayer>,
    tool_router: ToolRouter<Self>,
}

impl RegistrarServer {
    pub fn new(catalog: Arc<Catalog>, registry: Arc<EnrollmentRegistry>) -> Self {
        Self {
            eligibility: Arc::new(EligibilityEngine::new(catalog.clone(), registry.clone())),
            enrollment: Arc::new(EnrollmentManager::new(registry.clone())),
            query: Arc::new(QueryLayer::new(catalog.clone(), registry.clone())),
            catalog,
            registry,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl RegistrarServer {
    // === Query Layer (catalog reads, no invariants) ===

    #[tool(description = "Search the course catalog by title keyword. Empty keyword lists every course.")]
    async fn search_courses(
        &self,
        Parameters(req): Parameters<SearchCoursesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let keyword = req.keyword.unwrap_or_default();
        let result = self.catalog.search(&keyword);
        Ok(vec_response(result, format!("No courses match '{}'", keyword)))
    }

    #[tool(description = "Get details for a single course by id (case-insensitive).")]
    async fn get_course_details(
        &self,
        Parameters(req): Parameters<GetCourseDetailsRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(option_response(
            self.catalog.get(&req.course_id),
            format!("Course '{}' not found", req.course_id),
        ))
    }

    #[tool(description = "Snapshot of a student's record: standing, completed courses, current enrollments.")]
    async fn get_student_profile(
        &self,
        Parameters(req): Parameters<GetStudentProfileRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(option_response(
            self.query.student_snapshot(&req.student_id).await,
            format!("No record for student '{}'", req.student_id),
        ))
    }

    // === Eligibility ===

    #[tool(description = "Check whether a student meets the direct prerequisites for a course. Returns {\"eligible\": bool}.")]
    async fn check_prerequisites(
        &self,
        Parameters(req): Parameters<CheckPrerequisitesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.eligibility.check(&req.student_id, &req.course_id).await;
        debug!(student = %req.student_id, course = %req.course_id, ?result, "prerequisite check");
        Ok(json_response(serde_json::json!({ "eligible": result.is_eligible() })))
    }

    #[tool(description = "Explain in plain text why a student is or is not eligible for a course, including any missing prerequisites.")]
    async fn explain_eligibility(
        &self,
        Parameters(req): Parameters<ExplainEligibilityRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.eligibility.check(&req.student_id, &req.course_id).await;
        Ok(text_response(self.query.explain_eligibility(
            &req.student_id,
            &req.course_id,
            &result,
        )))
    }

    // === Enrollment ===

    #[tool(description = "Register a student for a course. Unknown students get a new record; repeat registration is a no-op. Eligibility is not enforced here - check it separately.")]
    async fn register_student(
        &self,
        Parameters(req): Parameters<RegisterStudentRequest>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self.enrollment.register(&req.student_id, &req.course_id).await;
        debug!(student = %req.student_id, course = %req.course_id, ?outcome, "register");
        Ok(json_response(serde_json::json!({ "status": outcome })))
    }

    #[tool(description = "Drop a course from a student's current enrollments.")]
    async fn drop_course(
        &self,
        Parameters(req): Parameters<DropCourseRequest>,
    ) -> Result<CallToolResult, McpError> {
        let outcome =
            EnrollmentManager::drop(&self.enrollment, &req.student_id, &req.course_id).await;
        debug!(student = %req.student_id, course = %req.course_id, ?outcome, "drop");
        Ok(json_response(serde_json::json!({ "status": outcome })))
    }
}

#[tool_handler]
impl ServerHandler for RegistrarServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "registrar".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Academic records server: search the course catalog, check prerequisite \
                 eligibility, and manage enrollments. Registration never blocks on \
                 eligibility; call check_prerequisites or explain_eligibility first when \
                 advising a student."
                    .to_string(),
            ),
        }
    }
}

// === Response helpers ===

/// Success response with pretty-printed JSON content
fn json_response<T: Serialize>(result: T) -> CallToolResult {
    CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&result).unwrap(),
    )])
}

/// Success response with plain text
fn text_response(message: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(message.into())])
}

/// Response for a Vec result - message if empty, JSON otherwise
fn vec_response<T: Serialize>(result: Vec<T>, empty_msg: impl Into<String>) -> CallToolResult {
    if result.is_empty() {
        text_response(empty_msg)
    } else {
        json_response(result)
    }
}

/// Response for an Option result - message if None, JSON otherwise
fn option_response<T: Serialize>(result: Option<T>, none_msg: impl Into<String>) -> CallToolResult {
    match result {
        Some(r) => json_response(r),
        None => text_response(none_msg),
    }
}
