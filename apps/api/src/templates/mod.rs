//! Built-in job description templates for common roles.

use axum::{extract::Path, Json};
use serde::Serialize;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct JobTemplate {
    pub name: &'static str,
    pub slug: &'static str,
    pub content: &'static str,
}

pub const JOB_TEMPLATES: &[JobTemplate] = &[
    JobTemplate {
        name: "Software Engineer",
        slug: "software_engineer",
        content: include_str!("../../job_templates/software_engineer.md"),
    },
    JobTemplate {
        name: "Data Scientist",
        slug: "data_scientist",
        content: include_str!("../../job_templates/data_scientist.md"),
    },
    JobTemplate {
        name: "Marketing Manager",
        slug: "marketing_manager",
        content: include_str!("../../job_templates/marketing_manager.md"),
    },
    JobTemplate {
        name: "Product Manager",
        slug: "product_manager",
        content: include_str!("../../job_templates/product_manager.md"),
    },
    JobTemplate {
        name: "UX/UI Designer",
        slug: "ux_ui_designer",
        content: include_str!("../../job_templates/ux_ui_designer.md"),
    },
    JobTemplate {
        name: "Project Manager",
        slug: "project_manager",
        content: include_str!("../../job_templates/project_manager.md"),
    },
];

/// Looks a template up by display name or slug, ignoring case.
pub fn find_template(name: &str) -> Option<&'static JobTemplate> {
    let name = name.trim();
    JOB_TEMPLATES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name) || t.slug.eq_ignore_ascii_case(name))
}

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub name: &'static str,
    pub slug: &'static str,
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateSummary>> {
    Json(
        JOB_TEMPLATES
            .iter()
            .map(|t| TemplateSummary {
                name: t.name,
                slug: t.slug,
            })
            .collect(),
    )
}

/// GET /api/v1/templates/:name
pub async fn handle_get_template(Path(name): Path<String>) -> Result<Json<JobTemplate>, AppError> {
    find_template(&name)
        .copied()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No job template named '{name}'")))
}
