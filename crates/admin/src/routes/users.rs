//! User list, detail and account status.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use validator::Validate;

use rentdesk_core::{Pagination, UserId, UserRole, UserStatus};

use super::bookings::BookingRow;
use super::{Layout, non_blank, page_params, parse_param, run_mutation};
use crate::api::{PageParams, User, UserFilter, format_timestamp};
use crate::components::data_table::{
    DataTableConfig, PagerView, preserve_params, users_table_config,
};
use crate::error::AppError;
use crate::filters;
use crate::forms::{FieldErrors, StatusForm};
use crate::middleware::{Flash, push_flash};
use crate::services::InFlight;
use crate::state::AppState;

/// Bookings shown on a user's detail page.
const USER_BOOKINGS_LIMIT: u32 = 10;

/// Query parameters for the users list.
#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub q: Option<String>,
}

impl UsersQuery {
    fn filter(&self) -> UserFilter {
        UserFilter {
            role: parse_param::<UserRole>(self.role.as_ref()),
            status: parse_param::<UserStatus>(self.status.as_ref()),
            q: non_blank(self.q.as_ref()),
        }
    }

    fn value(&self, key: &str) -> Option<String> {
        match key {
            "role" => self.role.clone(),
            "status" => self.status.clone(),
            "q" => self.q.clone(),
            _ => None,
        }
    }

    fn preserved(&self) -> String {
        preserve_params(&[
            ("role", self.role.clone()),
            ("status", self.status.clone()),
            ("q", self.q.clone()),
        ])
    }
}

/// User row for templates.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub verified: bool,
    pub joined: String,
    /// Status the toggle button moves to.
    pub toggle_to: UserStatus,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: if user.name.trim().is_empty() {
                "-".to_string()
            } else {
                user.name.clone()
            },
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_else(|| "-".to_string()),
            role: user.role,
            status: user.status,
            verified: user.verified,
            joined: format_timestamp(user.created_at.as_ref()),
            toggle_to: user.status.toggled(),
        }
    }
}

impl UserRow {
    /// Label for the activate/suspend button.
    #[must_use]
    pub const fn toggle_label(&self) -> &'static str {
        match self.toggle_to {
            UserStatus::Active => "Activate",
            UserStatus::Suspended => "Suspend",
        }
    }

    /// Whether the toggle button suspends the account.
    #[must_use]
    pub fn suspends(&self) -> bool {
        self.toggle_to == UserStatus::Suspended
    }
}

/// Users list page template.
#[derive(Template, WebTemplate)]
#[template(path = "users/index.html")]
pub struct UsersIndexTemplate {
    pub layout: Layout,
    pub table: DataTableConfig,
    pub users: Vec<UserRow>,
    pub pager: PagerView,
    pub load_error: Option<String>,
}

/// User detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "users/show.html")]
pub struct UserShowTemplate {
    pub layout: Layout,
    pub user: UserRow,
    pub bookings: Vec<BookingRow>,
    pub bookings_total: u64,
    pub has_more_bookings: bool,
    pub bookings_error: Option<String>,
}

/// Users list page handler.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<UsersQuery>,
) -> UsersIndexTemplate {
    let params = page_params(query.page.as_ref(), query.per_page.as_ref(), state.per_page());

    let (users, pagination, load_error) =
        match state.api().list_users(params, &query.filter()).await {
            Ok(page) => (
                page.items.iter().map(UserRow::from).collect(),
                page.pagination,
                None,
            ),
            Err(e) => {
                tracing::error!("Failed to fetch users: {e}");
                (
                    vec![],
                    Pagination::new(params.page(), params.per_page(), 0),
                    Some(e.user_message()),
                )
            }
        };

    UsersIndexTemplate {
        layout: Layout::new(&session, "Users", "/users").await,
        table: users_table_config().with_values(|k| query.value(k)),
        users,
        pager: PagerView::new(&pagination, "/users", &query.preserved()),
        load_error,
    }
}

/// User detail page handler.
#[instrument(skip(state, session), fields(user_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<UserId>,
) -> Result<UserShowTemplate, AppError> {
    let (user, bookings) = tokio::join!(
        state.api().get_user(id),
        state
            .api()
            .bookings_for_user(id, PageParams::new(1, USER_BOOKINGS_LIMIT)),
    );
    let user = user?.ok_or_else(|| AppError::NotFound(format!("user {id}")))?;

    let (rows, total, bookings_error) = match bookings {
        Ok(page) => (
            page.items.iter().map(BookingRow::from).collect(),
            page.pagination.total,
            None,
        ),
        Err(e) => {
            tracing::error!("Failed to fetch bookings for user: {e}");
            (vec![], 0, Some(e.user_message()))
        }
    };

    let has_more_bookings = total > rows.len() as u64;

    Ok(UserShowTemplate {
        layout: Layout::new(&session, user.email.clone(), &format!("/users/{id}")).await,
        user: UserRow::from(&user),
        bookings: rows,
        bookings_total: total,
        has_more_bookings,
        bookings_error,
    })
}

/// Activate or suspend an account.
#[instrument(skip(state, session, form), fields(user_id = %id, target = %form.status))]
pub async fn update_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<UserId>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, AppError> {
    let detail = format!("/users/{id}");

    if let Err(errors) = form.validate() {
        push_flash(&session, Flash::error(FieldErrors::from(&errors).summary())).await;
        return Ok(Redirect::to(&detail));
    }

    let Ok(target) = form.target::<UserStatus>() else {
        return Err(AppError::BadRequest(format!(
            "unknown user status: {}",
            form.status
        )));
    };

    let current = state
        .api()
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;

    if current.status == target {
        tracing::info!(status = %target, "User status unchanged, skipping update");
        push_flash(&session, Flash::info(format!("This user is already {target}."))).await;
        return Ok(Redirect::to(&detail));
    }

    let message = match target {
        UserStatus::Active => "User activated.",
        UserStatus::Suspended => "User suspended.",
    };

    run_mutation(
        &state,
        &session,
        InFlight::key("users", id, "status"),
        message,
        state.api().update_user_status(id, target),
    )
    .await?;

    Ok(Redirect::to(&detail))
}
