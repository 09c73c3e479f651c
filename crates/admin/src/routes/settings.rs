//! Typed key/value settings editor.

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

use rentdesk_core::{SettingId, SettingType};

use super::{Layout, non_blank, run_mutation};
use crate::api::Setting;
use crate::components::data_table::{FilterOption, matches_search};
use crate::error::AppError;
use crate::filters;
use crate::forms::{FieldErrors, SettingForm};
use crate::services::InFlight;
use crate::state::AppState;

/// Local search over the settings list.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsQuery {
    pub q: Option<String>,
}

/// Setting row for templates.
#[derive(Debug, Clone)]
pub struct SettingRow {
    pub id: SettingId,
    pub key: String,
    pub title: String,
    pub kind: SettingType,
    pub value: String,
    pub description: Option<String>,
}

impl From<&Setting> for SettingRow {
    fn from(setting: &Setting) -> Self {
        let mut value = setting.display_value();
        if value.chars().count() > 80 {
            value = value.chars().take(77).collect::<String>() + "...";
        }
        Self {
            id: setting.id,
            key: setting.key.clone(),
            title: setting.title().to_string(),
            kind: setting.kind,
            value,
            description: setting.description.clone(),
        }
    }
}

/// Settings sharing a group name.
#[derive(Debug, Clone)]
pub struct SettingGroup {
    pub name: String,
    pub settings: Vec<SettingRow>,
}

/// Group settings by section, keeping the backend's order within a group.
///
/// Groups appear in order of first occurrence.
#[must_use]
pub fn group_settings(settings: &[Setting], query: Option<&str>) -> Vec<SettingGroup> {
    let mut groups: Vec<SettingGroup> = Vec::new();
    for setting in settings {
        let haystack = [
            setting.key.as_str(),
            setting.title(),
            setting.group_name(),
            setting.description.as_deref().unwrap_or_default(),
        ];
        if !query.is_none_or(|q| matches_search(q, &haystack)) {
            continue;
        }
        let row = SettingRow::from(setting);
        match groups.iter_mut().find(|g| g.name == setting.group_name()) {
            Some(group) => group.settings.push(row),
            None => groups.push(SettingGroup {
                name: setting.group_name().to_string(),
                settings: vec![row],
            }),
        }
    }
    groups
}

/// Editor widget for one setting.
#[derive(Debug, Clone)]
pub struct SettingEditor {
    pub id: SettingId,
    pub key: String,
    pub title: String,
    pub kind: SettingType,
    pub description: Option<String>,
    pub options: Vec<FilterOption>,
    /// Current (or just submitted) value as text.
    pub value: String,
}

impl SettingEditor {
    fn new(setting: &Setting, value: String) -> Self {
        Self {
            id: setting.id,
            key: setting.key.clone(),
            title: setting.title().to_string(),
            kind: setting.kind,
            description: setting.description.clone(),
            options: setting
                .options
                .iter()
                .map(|o| FilterOption {
                    value: o.clone(),
                    label: o.clone(),
                    selected: *o == value,
                })
                .collect(),
            value,
        }
    }

    #[must_use]
    pub fn is_bool(&self) -> bool {
        self.kind == SettingType::Bool
    }

    #[must_use]
    pub fn is_select(&self) -> bool {
        self.kind == SettingType::Select && !self.options.is_empty()
    }

    #[must_use]
    pub const fn is_multiline(&self) -> bool {
        self.kind.is_multiline()
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.kind == SettingType::Json
    }

    /// Whether the checkbox should render checked.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.value == "true"
    }

    /// `type` attribute for single-line inputs.
    #[must_use]
    pub const fn input_type(&self) -> &'static str {
        match self.kind {
            SettingType::Number => "number",
            SettingType::Email => "email",
            SettingType::Url => "url",
            _ => "text",
        }
    }

    /// `step` attribute so decimals are accepted by number inputs.
    #[must_use]
    pub const fn step(&self) -> Option<&'static str> {
        match self.kind {
            SettingType::Number => Some("any"),
            _ => None,
        }
    }
}

/// Settings list page template.
#[derive(Template, WebTemplate)]
#[template(path = "settings/index.html")]
pub struct SettingsIndexTemplate {
    pub layout: Layout,
    pub groups: Vec<SettingGroup>,
    pub q: String,
    pub total: usize,
    pub load_error: Option<String>,
}

/// Setting editor page template.
#[derive(Template, WebTemplate)]
#[template(path = "settings/edit.html")]
pub struct SettingEditTemplate {
    pub layout: Layout,
    pub editor: SettingEditor,
    pub errors: FieldErrors,
}

/// Settings list page handler.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SettingsQuery>,
) -> SettingsIndexTemplate {
    let q = non_blank(query.q.as_ref());

    let (settings, load_error) = match state.api().list_settings().await {
        Ok(settings) => (settings, None),
        Err(e) => {
            tracing::error!("Failed to fetch settings: {e}");
            (vec![], Some(e.user_message()))
        }
    };

    SettingsIndexTemplate {
        layout: Layout::new(&session, "Settings", "/settings").await,
        groups: group_settings(&settings, q.as_deref()),
        q: q.unwrap_or_default(),
        total: settings.len(),
        load_error,
    }
}

async fn fetch_setting(state: &AppState, id: SettingId) -> Result<Setting, AppError> {
    state
        .api()
        .get_setting(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("setting {id}")))
}

/// Setting editor page handler.
#[instrument(skip(state, session), fields(setting_id = %id))]
pub async fn edit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<SettingId>,
) -> Result<SettingEditTemplate, AppError> {
    let setting = fetch_setting(&state, id).await?;

    Ok(SettingEditTemplate {
        layout: Layout::new(&session, setting.title().to_string(), &format!("/settings/{id}"))
            .await,
        editor: SettingEditor::new(&setting, setting.display_value()),
        errors: FieldErrors::default(),
    })
}

/// Save a setting value, converted to the setting's declared type.
#[instrument(skip(state, session, form), fields(setting_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<SettingId>,
    Form(form): Form<SettingForm>,
) -> Result<Response, AppError> {
    let setting = fetch_setting(&state, id).await?;
    let edit_path = format!("/settings/{id}");

    let typed = match form.validate() {
        Ok(()) => form
            .typed_value(setting.kind, &setting.options)
            .map_err(|e| {
                let mut errors = FieldErrors::default();
                errors.insert("value", e.to_string());
                errors
            }),
        Err(errors) => Err(FieldErrors::from(&errors)),
    };

    let value = match typed {
        Ok(value) => value,
        Err(errors) => {
            let page = SettingEditTemplate {
                layout: Layout::new(&session, setting.title().to_string(), &edit_path).await,
                editor: SettingEditor::new(&setting, form.value),
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let saved = run_mutation(
        &state,
        &session,
        InFlight::key("settings", id, "update"),
        &format!("{} saved.", setting.title()),
        state.api().update_setting(id, value),
    )
    .await?;

    let target = if saved { "/settings" } else { edit_path.as_str() };
    Ok(Redirect::to(target).into_response())
}
