//! The core inventory action surface guarded by the gate.
//!
//! `search` is an unmarked (read-tier) action with a validated form,
//! `update` requires update authority, and `status` is public. The
//! handlers are the trusted action bodies: by the time one runs, the gate
//! has already authorized the caller and validated the form.

use actiongate_core::{EventId, InputForm, ValidationErrors};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use super::ApiResponse;

/// Owning surface of the inventory actions.
pub const FUNCTION_ID: &str = "INVENTORY";

const DEFAULT_MAX_RESULTS: u32 = 50;
const MAX_KEYWORD_LEN: usize = 64;
const MAX_RESULTS_CAP: u32 = 500;
const MAX_QUANTITY: i64 = 1_000_000;

// ── Forms ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub keyword: Option<String>,
    pub max_results: Option<u32>,
    #[serde(skip)]
    errors: ValidationErrors,
}

impl InputForm for SearchForm {
    fn validate(&mut self) {
        match &self.keyword {
            None => self.errors.push("keyword", "is required"),
            Some(k) if k.trim().is_empty() => self.errors.push("keyword", "must not be blank"),
            _ => {}
        }
    }

    fn verify_strictly(&mut self) {
        if let Some(k) = &self.keyword {
            if k.len() > MAX_KEYWORD_LEN {
                self.errors
                    .push("keyword", format!("must not exceed {MAX_KEYWORD_LEN} characters"));
            }
        }
        if let Some(max) = self.max_results {
            if max == 0 || max > MAX_RESULTS_CAP {
                self.errors
                    .push("max_results", format!("must be between 1 and {MAX_RESULTS_CAP}"));
            }
        }
    }

    fn errors(&self) -> &ValidationErrors {
        &self.errors
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    pub item_code: Option<String>,
    pub quantity: Option<i64>,
    #[serde(skip)]
    errors: ValidationErrors,
}

impl InputForm for UpdateForm {
    fn validate(&mut self) {
        match &self.item_code {
            None => self.errors.push("item_code", "is required"),
            Some(code) if code.trim().is_empty() => {
                self.errors.push("item_code", "must not be blank")
            }
            _ => {}
        }
        if self.quantity.is_none() {
            self.errors.push("quantity", "is required");
        }
    }

    fn verify_strictly(&mut self) {
        if let Some(code) = &self.item_code {
            if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                self.errors
                    .push("item_code", "must be alphanumeric with dashes");
            }
        }
        if let Some(quantity) = self.quantity {
            if !(0..=MAX_QUANTITY).contains(&quantity) {
                self.errors
                    .push("quantity", format!("must be between 0 and {MAX_QUANTITY}"));
            }
        }
    }

    fn errors(&self) -> &ValidationErrors {
        &self.errors
    }
}

// ── Handlers ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub keyword: String,
    pub max_results: u32,
    pub event_id: Option<String>,
    pub items: Vec<String>,
}

pub async fn search(
    event_id: Option<Extension<EventId>>,
    Json(form): Json<SearchForm>,
) -> Json<ApiResponse<SearchResult>> {
    Json(ApiResponse::ok(SearchResult {
        keyword: form.keyword.unwrap_or_default(),
        max_results: form.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
        event_id: event_id.map(|Extension(id)| id.to_string()),
        items: Vec::new(),
    }))
}

#[derive(Debug, Serialize)]
pub struct UpdateResult {
    pub item_code: String,
    pub quantity: i64,
    pub event_id: Option<String>,
}

pub async fn update(
    event_id: Option<Extension<EventId>>,
    Json(form): Json<UpdateForm>,
) -> Json<ApiResponse<UpdateResult>> {
    Json(ApiResponse::ok(UpdateResult {
        item_code: form.item_code.unwrap_or_default(),
        quantity: form.quantity.unwrap_or_default(),
        event_id: event_id.map(|Extension(id)| id.to_string()),
    }))
}

#[derive(Debug, Serialize)]
pub struct StatusResult {
    pub function_id: String,
    pub operational: bool,
    pub event_id: Option<String>,
}

pub async fn status(event_id: Option<Extension<EventId>>) -> Json<ApiResponse<StatusResult>> {
    Json(ApiResponse::ok(StatusResult {
        function_id: FUNCTION_ID.to_string(),
        operational: true,
        event_id: event_id.map(|Extension(id)| id.to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_hooks(form: &mut dyn InputForm) {
        form.validate();
        form.verify_strictly();
    }

    #[test]
    fn search_form_requires_keyword() {
        let mut form = SearchForm {
            keyword: None,
            max_results: None,
            errors: ValidationErrors::new(),
        };
        run_hooks(&mut form);
        assert!(form.has_errors());
    }

    #[test]
    fn search_form_rejects_blank_keyword() {
        let mut form = SearchForm {
            keyword: Some("   ".into()),
            max_results: None,
            errors: ValidationErrors::new(),
        };
        run_hooks(&mut form);
        assert!(form.has_errors());
    }

    #[test]
    fn search_form_caps_max_results() {
        let mut form = SearchForm {
            keyword: Some("widget".into()),
            max_results: Some(9999),
            errors: ValidationErrors::new(),
        };
        run_hooks(&mut form);
        assert_eq!(form.errors().len(), 1);
    }

    #[test]
    fn search_form_accepts_sensible_input() {
        let mut form = SearchForm {
            keyword: Some("widget".into()),
            max_results: Some(20),
            errors: ValidationErrors::new(),
        };
        run_hooks(&mut form);
        assert!(!form.has_errors());
    }

    #[test]
    fn update_form_accumulates_all_errors() {
        let mut form = UpdateForm {
            item_code: Some("bad code!".into()),
            quantity: Some(-5),
            errors: ValidationErrors::new(),
        };
        run_hooks(&mut form);
        // One strict error per field, nothing from validate.
        assert_eq!(form.errors().len(), 2);
    }

    #[test]
    fn update_form_accepts_sensible_input() {
        let mut form = UpdateForm {
            item_code: Some("SKU-1234".into()),
            quantity: Some(12),
            errors: ValidationErrors::new(),
        };
        run_hooks(&mut form);
        assert!(!form.has_errors());
    }
}
