//! Generation Request
//!
//! The wizard's payload for a generation run: target recipe and client, the
//! site map collected in the wizard (with per-page variable-task selections),
//! the function-to-user roster, and project-level metadata.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::generator::GenerationError;

pub const MAX_PROJECT_NAME_LEN: usize = 255;

/// A wizard-entered site page and the variable template tasks it selected.
///
/// Page name is the page's identity within one run: it keys per-page
/// dependency matching and feeds `{page}` title substitution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSelection {
    pub name: String,
    pub page_type: Option<String>,
    /// Template task ids this page opted into. A variable template task
    /// produces a concrete task only for pages that selected it.
    pub selected_variable_tasks: Vec<Uuid>,
}

/// One roster entry: the user who performs a function on this project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAssignment {
    pub function_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub recipe_id: Uuid,
    pub client_id: Uuid,
    pub site_id: Option<Uuid>,
    pub name: String,
    pub pages: Vec<PageSelection>,
    pub team_assignments: Vec<TeamAssignment>,
    pub start_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl GenerationRequest {
    pub fn new(recipe_id: Uuid, client_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            recipe_id,
            client_id,
            site_id: None,
            name: name.into(),
            pages: Vec::new(),
            team_assignments: Vec::new(),
            start_date: None,
            target_date: None,
            notes: None,
        }
    }

    pub fn with_site(mut self, site_id: Uuid) -> Self {
        self.site_id = Some(site_id);
        self
    }

    pub fn with_pages(mut self, pages: Vec<PageSelection>) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_team_assignments(mut self, team_assignments: Vec<TeamAssignment>) -> Self {
        self.team_assignments = team_assignments;
        self
    }

    pub fn with_dates(mut self, start_date: Option<NaiveDate>, target_date: Option<NaiveDate>) -> Self {
        self.start_date = start_date;
        self.target_date = target_date;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Structural validation, run before any database work.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.name.trim().is_empty() {
            return Err(GenerationError::InvalidRequest(
                "project name must not be empty".to_string(),
            ));
        }
        if self.name.len() > MAX_PROJECT_NAME_LEN {
            return Err(GenerationError::InvalidRequest(format!(
                "project name exceeds {MAX_PROJECT_NAME_LEN} characters"
            )));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for page in &self.pages {
            if page.name.trim().is_empty() {
                return Err(GenerationError::InvalidRequest(
                    "page name must not be empty".to_string(),
                ));
            }
            if !seen.insert(page.name.as_str()) {
                return Err(GenerationError::InvalidRequest(format!(
                    "duplicate page name: {}",
                    page.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> GenerationRequest {
        GenerationRequest::new(Uuid::new_v4(), Uuid::new_v4(), "Acme relaunch")
    }

    #[test]
    fn test_valid_request_passes() {
        let request = base_request().with_pages(vec![
            PageSelection {
                name: "Home".to_string(),
                page_type: None,
                selected_variable_tasks: vec![],
            },
            PageSelection {
                name: "About".to_string(),
                page_type: Some("content".to_string()),
                selected_variable_tasks: vec![],
            },
        ]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut request = base_request();
        request.name = "   ".to_string();
        assert!(matches!(
            request.validate(),
            Err(GenerationError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_overlong_name_rejected() {
        let mut request = base_request();
        request.name = "x".repeat(MAX_PROJECT_NAME_LEN + 1);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_duplicate_page_names_rejected() {
        let request = base_request().with_pages(vec![
            PageSelection {
                name: "Home".to_string(),
                page_type: None,
                selected_variable_tasks: vec![],
            },
            PageSelection {
                name: "Home".to_string(),
                page_type: None,
                selected_variable_tasks: vec![],
            },
        ]);
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate page name"));
    }
}
