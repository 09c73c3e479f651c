//! Listing list, create/edit, house rules and moderation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use validator::Validate;

use rentdesk_core::{CategoryId, FeatureId, ListingId, ListingStatus, Pagination};

use super::{Layout, non_blank, page_params, parse_param, run_mutation};
use crate::api::{Listing, ListingFilter, Lookup, LookupKind};
use crate::components::data_table::{
    DataTableConfig, FilterOption, PagerView, listings_table_config, preserve_params,
};
use crate::error::AppError;
use crate::filters;
use crate::forms::{FieldErrors, ListingForm, ListingRulesForm, StatusForm};
use crate::middleware::{Flash, push_flash};
use crate::services::InFlight;
use crate::state::AppState;

/// Query parameters for the listings list.
#[derive(Debug, Default, Deserialize)]
pub struct ListingsQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub status: Option<String>,
    pub q: Option<String>,
    pub category_id: Option<String>,
}

impl ListingsQuery {
    fn filter(&self) -> ListingFilter {
        ListingFilter {
            status: parse_param(self.status.as_ref()),
            q: non_blank(self.q.as_ref()),
            category_id: parse_param::<CategoryId>(self.category_id.as_ref()),
        }
    }

    fn value(&self, key: &str) -> Option<String> {
        match key {
            "status" => self.status.clone(),
            "q" => self.q.clone(),
            "category_id" => self.category_id.clone(),
            _ => None,
        }
    }

    fn preserved(&self) -> String {
        preserve_params(&[
            ("status", self.status.clone()),
            ("q", self.q.clone()),
            ("category_id", self.category_id.clone()),
        ])
    }
}

/// A legal next moderation state, rendered as a button.
#[derive(Debug, Clone)]
pub struct ListingAction {
    pub status: ListingStatus,
    pub label: &'static str,
    pub destructive: bool,
}

/// Moderation actions offered for a listing in `status`.
#[must_use]
pub fn listing_actions(status: ListingStatus) -> Vec<ListingAction> {
    status
        .next_statuses()
        .iter()
        .map(|next| ListingAction {
            status: *next,
            label: next.action_label(),
            destructive: matches!(next, ListingStatus::Rejected | ListingStatus::Inactive),
        })
        .collect()
}

/// Listing row for templates.
#[derive(Debug, Clone)]
pub struct ListingRow {
    pub id: ListingId,
    pub title: String,
    pub city: String,
    pub host: String,
    pub price: String,
    pub max_guests: u32,
    pub status: ListingStatus,
    pub actions: Vec<ListingAction>,
}

impl From<&Listing> for ListingRow {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id,
            title: listing.title.clone(),
            city: listing.city.clone().unwrap_or_else(|| "-".to_string()),
            host: listing
                .host
                .as_ref()
                .map_or_else(|| "-".to_string(), |h| h.display_name()),
            price: listing.nightly().display(),
            max_guests: listing.max_guests,
            status: listing.status,
            actions: listing_actions(listing.status),
        }
    }
}

/// Feature checkbox on the listing form.
#[derive(Debug, Clone)]
pub struct FeatureChoice {
    pub id: FeatureId,
    pub name: String,
    pub checked: bool,
}

/// Listings list page template.
#[derive(Template, WebTemplate)]
#[template(path = "listings/index.html")]
pub struct ListingsIndexTemplate {
    pub layout: Layout,
    pub table: DataTableConfig,
    pub listings: Vec<ListingRow>,
    pub pager: PagerView,
    pub load_error: Option<String>,
}

/// Create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "listings/form.html")]
pub struct ListingFormTemplate {
    pub layout: Layout,
    /// Form target.
    pub action: String,
    pub listing_id: Option<ListingId>,
    pub form: ListingForm,
    pub errors: FieldErrors,
    pub categories: Vec<FilterOption>,
    pub house_types: Vec<FilterOption>,
    pub features: Vec<FeatureChoice>,
}

/// House rules form template.
#[derive(Template, WebTemplate)]
#[template(path = "listings/rules.html")]
pub struct ListingRulesTemplate {
    pub layout: Layout,
    pub listing_id: ListingId,
    pub form: ListingRulesForm,
    pub errors: FieldErrors,
}

/// Lookup records rendered as `<select>` options.
fn lookup_options(lookups: &[Lookup], selected: Option<i64>) -> Vec<FilterOption> {
    lookups
        .iter()
        .map(|l| FilterOption {
            value: l.id.to_string(),
            label: l.name.clone(),
            selected: selected == Some(l.id.as_i64()),
        })
        .collect()
}

/// Fetch a lookup table for a form; failures render an empty choice list.
async fn lookups_or_empty(state: &AppState, kind: LookupKind) -> Vec<Lookup> {
    state.api().list_lookups(kind).await.unwrap_or_else(|e| {
        tracing::error!(kind = %kind, "Failed to fetch lookups: {e}");
        vec![]
    })
}

/// Render the create/edit form with the lookup tables it needs.
async fn render_form(
    state: &AppState,
    layout: Layout,
    action: String,
    listing_id: Option<ListingId>,
    form: ListingForm,
    errors: FieldErrors,
) -> ListingFormTemplate {
    let (categories, house_types, features) = tokio::join!(
        lookups_or_empty(state, LookupKind::Categories),
        lookups_or_empty(state, LookupKind::HouseTypes),
        lookups_or_empty(state, LookupKind::Features),
    );

    ListingFormTemplate {
        layout,
        action,
        listing_id,
        categories: lookup_options(&categories, form.category_id.map(|id| id.as_i64())),
        house_types: lookup_options(&house_types, form.house_type_id.map(|id| id.as_i64())),
        features: features
            .iter()
            .map(|f| {
                let id = FeatureId::new(f.id.as_i64());
                FeatureChoice {
                    id,
                    name: f.name.clone(),
                    checked: form.has_feature(&id),
                }
            })
            .collect(),
        form,
        errors,
    }
}

/// Listings list page handler.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListingsQuery>,
) -> ListingsIndexTemplate {
    let params = page_params(query.page.as_ref(), query.per_page.as_ref(), state.per_page());
    let filter = query.filter();
    let (result, categories) = tokio::join!(
        state.api().list_listings(params, &filter),
        lookups_or_empty(&state, LookupKind::Categories),
    );

    let (listings, pagination, load_error) = match result {
        Ok(page) => (
            page.items.iter().map(ListingRow::from).collect(),
            page.pagination,
            None,
        ),
        Err(e) => {
            tracing::error!("Failed to fetch listings: {e}");
            (
                vec![],
                Pagination::new(params.page(), params.per_page(), 0),
                Some(e.user_message()),
            )
        }
    };

    ListingsIndexTemplate {
        layout: Layout::new(&session, "Listings", "/listings").await,
        table: listings_table_config(lookup_options(&categories, None))
            .with_values(|k| query.value(k)),
        listings,
        pager: PagerView::new(&pagination, "/listings", &query.preserved()),
        load_error,
    }
}

/// New listing form.
#[instrument(skip(state, session))]
pub async fn new_form(State(state): State<AppState>, session: Session) -> ListingFormTemplate {
    let layout = Layout::new(&session, "New listing", "/listings/new").await;
    render_form(
        &state,
        layout,
        "/listings".to_string(),
        None,
        ListingForm::default(),
        FieldErrors::default(),
    )
    .await
}

/// Create a listing.
#[instrument(skip(state, session, pairs))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = ListingForm::from_pairs(&pairs).map_err(|e| AppError::BadRequest(e.to_string()))?;

    if let Err(errors) = form.validate() {
        let layout = Layout::new(&session, "New listing", "/listings/new").await;
        let page = render_form(
            &state,
            layout,
            "/listings".to_string(),
            None,
            form,
            FieldErrors::from(&errors),
        )
        .await;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    let payload = form.to_payload();
    let created = run_mutation(
        &state,
        &session,
        InFlight::key("listings", "new", "create"),
        "Listing created.",
        state.api().create_listing(&payload),
    )
    .await?;

    if created {
        return Ok(Redirect::to("/listings").into_response());
    }

    let layout = Layout::new(&session, "New listing", "/listings/new").await;
    let page = render_form(
        &state,
        layout,
        "/listings".to_string(),
        None,
        form,
        FieldErrors::default(),
    )
    .await;
    Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
}

async fn fetch_listing(state: &AppState, id: ListingId) -> Result<Listing, AppError> {
    state
        .api()
        .get_listing(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("listing {id}")))
}

/// Edit form, pre-filled from the backend record.
#[instrument(skip(state, session), fields(listing_id = %id))]
pub async fn edit_form(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ListingId>,
) -> Result<ListingFormTemplate, AppError> {
    let listing = fetch_listing(&state, id).await?;
    let layout = Layout::new(
        &session,
        format!("Edit {}", listing.title),
        &format!("/listings/{id}/edit"),
    )
    .await;
    Ok(render_form(
        &state,
        layout,
        format!("/listings/{id}"),
        Some(id),
        ListingForm::from_listing(&listing),
        FieldErrors::default(),
    )
    .await)
}

/// Save the edit form.
#[instrument(skip(state, session, pairs), fields(listing_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ListingId>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = ListingForm::from_pairs(&pairs).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let edit_path = format!("/listings/{id}/edit");

    let errors = match form.validate() {
        Ok(()) => {
            let payload = form.to_payload();
            let saved = run_mutation(
                &state,
                &session,
                InFlight::key("listings", id, "update"),
                "Listing saved.",
                state.api().update_listing(id, &payload),
            )
            .await?;
            if saved {
                return Ok(Redirect::to(&edit_path).into_response());
            }
            FieldErrors::default()
        }
        Err(errors) => FieldErrors::from(&errors),
    };

    let layout = Layout::new(&session, format!("Edit {}", form.title), &edit_path).await;
    let page = render_form(&state, layout, format!("/listings/{id}"), Some(id), form, errors).await;
    Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
}

/// House rules form.
#[instrument(skip(state, session), fields(listing_id = %id))]
pub async fn rules_form(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ListingId>,
) -> Result<ListingRulesTemplate, AppError> {
    let listing = fetch_listing(&state, id).await?;
    let form = listing
        .rules
        .as_ref()
        .map(ListingRulesForm::from_rules)
        .unwrap_or_default();

    Ok(ListingRulesTemplate {
        layout: Layout::new(
            &session,
            format!("House rules: {}", listing.title),
            &format!("/listings/{id}/rules"),
        )
        .await,
        listing_id: id,
        form,
        errors: FieldErrors::default(),
    })
}

/// Save house rules.
#[instrument(skip(state, session, form), fields(listing_id = %id))]
pub async fn update_rules(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ListingId>,
    Form(form): Form<ListingRulesForm>,
) -> Result<Response, AppError> {
    let rules_path = format!("/listings/{id}/rules");

    if let Err(errors) = form.validate() {
        let page = ListingRulesTemplate {
            layout: Layout::new(&session, "House rules", &rules_path).await,
            listing_id: id,
            form,
            errors: FieldErrors::from(&errors),
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    run_mutation(
        &state,
        &session,
        InFlight::key("listings", id, "rules"),
        "House rules saved.",
        state.api().update_listing_rules(id, &form.to_rules()),
    )
    .await?;

    Ok(Redirect::to(&rules_path).into_response())
}

/// Approve, deactivate, reactivate or reject a listing.
#[instrument(skip(state, session, form), fields(listing_id = %id, target = %form.status))]
pub async fn update_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ListingId>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, AppError> {
    if let Err(errors) = form.validate() {
        push_flash(&session, Flash::error(FieldErrors::from(&errors).summary())).await;
        return Ok(Redirect::to("/listings"));
    }

    let Ok(target) = form.target::<ListingStatus>() else {
        return Err(AppError::BadRequest(format!(
            "unknown listing status: {}",
            form.status
        )));
    };

    let current = fetch_listing(&state, id).await?;
    if !current.status.can_transition_to(target) {
        tracing::warn!(from = %current.status, to = %target, "Illegal listing transition refused");
        push_flash(
            &session,
            Flash::error(format!("A {} listing cannot be moved to {target}.", current.status)),
        )
        .await;
        return Ok(Redirect::to("/listings"));
    }

    run_mutation(
        &state,
        &session,
        InFlight::key("listings", id, "status"),
        &format!("Listing is now {target}."),
        state.api().update_listing_status(id, target),
    )
    .await?;

    Ok(Redirect::to("/listings"))
}

/// Delete a listing.
#[instrument(skip(state, session), fields(listing_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ListingId>,
) -> Result<Redirect, AppError> {
    run_mutation(
        &state,
        &session,
        InFlight::key("listings", id, "delete"),
        "Listing deleted.",
        state.api().delete_listing(id),
    )
    .await?;

    Ok(Redirect::to("/listings"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentdesk_core::LookupId;

    #[test]
    fn test_listing_actions() {
        let pending: Vec<_> = listing_actions(ListingStatus::Pending)
            .into_iter()
            .map(|a| (a.status, a.destructive))
            .collect();
        assert_eq!(
            pending,
            vec![
                (ListingStatus::Active, false),
                (ListingStatus::Rejected, true)
            ]
        );
        assert_eq!(listing_actions(ListingStatus::Active).len(), 1);
    }

    #[test]
    fn test_lookup_options_mark_selected() {
        let lookups = vec![
            Lookup {
                id: LookupId::new(1),
                name: "Apartment".to_string(),
                icon: None,
                description: None,
            },
            Lookup {
                id: LookupId::new(2),
                name: "Villa".to_string(),
                icon: None,
                description: None,
            },
        ];
        let options = lookup_options(&lookups, Some(2));
        assert!(!options[0].selected);
        assert!(options[1].selected);
        assert_eq!(options[1].value, "2");
    }

    #[test]
    fn test_query_filter() {
        let query = ListingsQuery {
            status: Some("active".to_string()),
            category_id: Some("4".to_string()),
            ..ListingsQuery::default()
        };
        let filter = query.filter();
        assert_eq!(filter.status, Some(ListingStatus::Active));
        assert_eq!(filter.category_id, Some(CategoryId::new(4)));
        assert_eq!(query.preserved(), "status=active&category_id=4");
    }
}
