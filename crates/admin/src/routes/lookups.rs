//! Features, categories and house types.
//!
//! The three tables share these handlers; the router layers the table's
//! [`LookupKind`] onto each nested group as an extension.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use validator::Validate;

use rentdesk_core::LookupId;

use super::{Layout, non_blank, run_mutation};
use crate::api::{Lookup, LookupKind};
use crate::components::data_table::matches_search;
use crate::error::AppError;
use crate::filters;
use crate::forms::{FieldErrors, LookupForm};
use crate::services::InFlight;
use crate::state::AppState;

/// Local search over a lookup table.
#[derive(Debug, Default, Deserialize)]
pub struct LookupsQuery {
    pub q: Option<String>,
}

/// One record with its inline edit form.
#[derive(Debug, Clone)]
pub struct LookupRow {
    pub id: LookupId,
    pub form: LookupForm,
    /// Validation message from a rejected inline edit.
    pub error: Option<String>,
}

/// Lookup table page template.
#[derive(Template, WebTemplate)]
#[template(path = "lookups/index.html")]
pub struct LookupsIndexTemplate {
    pub layout: Layout,
    pub kind: LookupKind,
    pub rows: Vec<LookupRow>,
    pub q: String,
    pub total: usize,
    pub create: LookupForm,
    pub create_errors: FieldErrors,
    pub load_error: Option<String>,
}

impl LookupsIndexTemplate {
    /// Base path for this table's forms.
    #[must_use]
    pub const fn base_path(&self) -> &'static str {
        self.kind.segment()
    }
}

/// Records whose name, icon or description match `query`.
#[must_use]
pub fn filter_lookups<'a>(lookups: &'a [Lookup], query: Option<&str>) -> Vec<&'a Lookup> {
    lookups
        .iter()
        .filter(|l| {
            query.is_none_or(|q| {
                matches_search(
                    q,
                    &[
                        l.name.as_str(),
                        l.icon.as_deref().unwrap_or_default(),
                        l.description.as_deref().unwrap_or_default(),
                    ],
                )
            })
        })
        .collect()
}

/// Fetch the table and build the page; a failed fetch renders an empty table.
async fn render(
    state: &AppState,
    session: &Session,
    kind: LookupKind,
    q: Option<String>,
) -> LookupsIndexTemplate {
    let (lookups, load_error) = match state.api().list_lookups(kind).await {
        Ok(lookups) => (lookups, None),
        Err(e) => {
            tracing::error!(kind = %kind, "Failed to fetch lookups: {e}");
            (vec![], Some(e.user_message()))
        }
    };

    let rows = filter_lookups(&lookups, q.as_deref())
        .into_iter()
        .map(|l| LookupRow {
            id: l.id,
            form: LookupForm::from_lookup(l),
            error: None,
        })
        .collect();

    LookupsIndexTemplate {
        layout: Layout::new(session, kind.title(), &format!("/{}", kind.segment())).await,
        kind,
        rows,
        q: q.unwrap_or_default(),
        total: lookups.len(),
        create: LookupForm::default(),
        create_errors: FieldErrors::default(),
        load_error,
    }
}

/// Lookup table page handler.
#[instrument(skip(state, session), fields(kind = %kind))]
pub async fn index(
    State(state): State<AppState>,
    Extension(kind): Extension<LookupKind>,
    session: Session,
    Query(query): Query<LookupsQuery>,
) -> LookupsIndexTemplate {
    render(&state, &session, kind, non_blank(query.q.as_ref())).await
}

/// Create a record.
#[instrument(skip(state, session, form), fields(kind = %kind))]
pub async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<LookupKind>,
    session: Session,
    Form(form): Form<LookupForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        let mut page = render(&state, &session, kind, None).await;
        page.create = form;
        page.create_errors = FieldErrors::from(&errors);
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    run_mutation(
        &state,
        &session,
        InFlight::key(kind.segment(), "new", "create"),
        &format!("{} created.", kind.singular()),
        state.api().create_lookup(kind, &form.to_payload()),
    )
    .await?;

    Ok(Redirect::to(&format!("/{}", kind.segment())).into_response())
}

/// Rename or re-describe a record.
#[instrument(skip(state, session, form), fields(kind = %kind, lookup_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<LookupKind>,
    session: Session,
    Path(id): Path<LookupId>,
    Form(form): Form<LookupForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        let mut page = render(&state, &session, kind, None).await;
        let summary = FieldErrors::from(&errors).summary();
        if let Some(row) = page.rows.iter_mut().find(|r| r.id == id) {
            row.form = form;
            row.error = Some(summary);
        } else {
            page.load_error = Some(summary);
        }
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    run_mutation(
        &state,
        &session,
        InFlight::key(kind.segment(), id, "update"),
        &format!("{} saved.", kind.singular()),
        state.api().update_lookup(kind, id, &form.to_payload()),
    )
    .await?;

    Ok(Redirect::to(&format!("/{}", kind.segment())).into_response())
}

/// Delete a record.
#[instrument(skip(state, session), fields(kind = %kind, lookup_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    Extension(kind): Extension<LookupKind>,
    session: Session,
    Path(id): Path<LookupId>,
) -> Result<Redirect, AppError> {
    run_mutation(
        &state,
        &session,
        InFlight::key(kind.segment(), id, "delete"),
        &format!("{} deleted.", kind.singular()),
        state.api().delete_lookup(kind, id),
    )
    .await?;

    Ok(Redirect::to(&format!("/{}", kind.segment())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_lookups() {
        let lookups: Vec<Lookup> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Wifi", "icon": "wifi"},
                {"id": 2, "name": "Pool", "description": "Outdoor, heated"},
                {"id": 3, "name": "Parking"}
            ]"#,
        )
        .unwrap();

        assert_eq!(filter_lookups(&lookups, None).len(), 3);

        let names: Vec<_> = filter_lookups(&lookups, Some("heated"))
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["Pool"]);

        let names: Vec<_> = filter_lookups(&lookups, Some("P"))
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["Pool", "Parking"]);
    }
}
