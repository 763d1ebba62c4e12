//! Project loading, saving, validation, and catalog listing.

use hs_components::CatalogItem;
use hs_project::schema::Project;
use std::path::Path;

use crate::error::AppResult;
use crate::runtime_compile::SweepRuntime;

/// Summary of a project for listing.
#[derive(Debug, Clone)]
pub struct ProjectSummary {
    pub name: String,
    pub section_count: usize,
    pub heat_exchanger_count: usize,
    pub pump_count: usize,
    pub candidate_count: usize,
}

/// Load a YAML or JSON project file. Validation runs as part of loading.
pub fn load_project(path: &Path) -> AppResult<Project> {
    Ok(hs_project::load(path)?)
}

/// Save a project, as JSON when the extension says so and YAML otherwise.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => hs_project::save_json(path, project)?,
        _ => hs_project::save_yaml(path, project)?,
    }
    Ok(())
}

pub fn validate_project(project: &Project) -> AppResult<()> {
    hs_project::validate_project(project)?;
    Ok(())
}

pub fn summarize_project(project: &Project) -> ProjectSummary {
    ProjectSummary {
        name: project.name.clone(),
        section_count: project.sections.len(),
        heat_exchanger_count: project.heat_exchangers.len(),
        pump_count: project.pumps.len(),
        candidate_count: project.candidate_count(),
    }
}

/// Catalog entries as display lines.
#[derive(Debug, Clone, Default)]
pub struct CatalogListing {
    pub heat_exchangers: Vec<String>,
    pub pumps: Vec<String>,
}

pub fn list_catalog(runtime: &SweepRuntime) -> CatalogListing {
    CatalogListing {
        heat_exchangers: runtime
            .heat_exchangers
            .iter()
            .map(CatalogItem::describe)
            .collect(),
        pumps: runtime.pumps.iter().map(CatalogItem::describe).collect(),
    }
}
