//! Transaction list (read only).

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use rentdesk_core::{
    BookingId, Pagination, TransactionId, TransactionKind, TransactionStatus,
};

use super::{Layout, non_blank, page_params, parse_param};
use crate::api::{Transaction, TransactionFilter, format_timestamp};
use crate::components::data_table::{
    DataTableConfig, PagerView, preserve_params, transactions_table_config,
};
use crate::filters;
use crate::state::AppState;

/// Query parameters for the transactions list.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub kind: Option<String>,
    pub status: Option<String>,
    pub q: Option<String>,
}

impl TransactionsQuery {
    fn filter(&self) -> TransactionFilter {
        TransactionFilter {
            kind: parse_param::<TransactionKind>(self.kind.as_ref()),
            status: parse_param::<TransactionStatus>(self.status.as_ref()),
            q: non_blank(self.q.as_ref()),
        }
    }

    fn value(&self, key: &str) -> Option<String> {
        match key {
            "kind" => self.kind.clone(),
            "status" => self.status.clone(),
            "q" => self.q.clone(),
            _ => None,
        }
    }

    fn preserved(&self) -> String {
        preserve_params(&[
            ("kind", self.kind.clone()),
            ("status", self.status.clone()),
            ("q", self.q.clone()),
        ])
    }
}

/// Transaction row for templates.
#[derive(Debug, Clone)]
pub struct TransactionRow {
    pub id: TransactionId,
    pub reference: String,
    pub booking_id: Option<BookingId>,
    pub user: String,
    pub kind: TransactionKind,
    pub amount: String,
    pub status: TransactionStatus,
    pub created_at: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id,
            reference: tx
                .reference
                .clone()
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| format!("#{}", tx.id)),
            booking_id: tx.booking_id,
            user: tx
                .user
                .as_ref()
                .map_or_else(|| "-".to_string(), |u| u.display_name()),
            kind: tx.kind,
            amount: tx.total().display(),
            status: tx.status,
            created_at: format_timestamp(tx.created_at.as_ref()),
        }
    }
}

/// Transactions list page template.
#[derive(Template, WebTemplate)]
#[template(path = "transactions/index.html")]
pub struct TransactionsIndexTemplate {
    pub layout: Layout,
    pub table: DataTableConfig,
    pub transactions: Vec<TransactionRow>,
    pub pager: PagerView,
    pub load_error: Option<String>,
}

/// Transactions list page handler.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<TransactionsQuery>,
) -> TransactionsIndexTemplate {
    let params = page_params(query.page.as_ref(), query.per_page.as_ref(), state.per_page());

    let (transactions, pagination, load_error) = match state
        .api()
        .list_transactions(params, &query.filter())
        .await
    {
        Ok(page) => (
            page.items.iter().map(TransactionRow::from).collect(),
            page.pagination,
            None,
        ),
        Err(e) => {
            tracing::error!("Failed to fetch transactions: {e}");
            (
                vec![],
                Pagination::new(params.page(), params.per_page(), 0),
                Some(e.user_message()),
            )
        }
    };

    TransactionsIndexTemplate {
        layout: Layout::new(&session, "Transactions", "/transactions").await,
        table: transactions_table_config().with_values(|k| query.value(k)),
        transactions,
        pager: PagerView::new(&pagination, "/transactions", &query.preserved()),
        load_error,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_row_fallbacks() {
        let tx: Transaction =
            serde_json::from_str(r#"{"id": 8, "amount": "12.5", "kind": "fee"}"#).unwrap();
        let row = TransactionRow::from(&tx);
        assert_eq!(row.reference, "#8");
        assert_eq!(row.user, "-");
        assert_eq!(row.kind, TransactionKind::Fee);
        assert!(row.booking_id.is_none());
    }

    #[test]
    fn test_query_maps_kind_to_filter() {
        let query = TransactionsQuery {
            kind: Some("payout".to_string()),
            q: Some("  ".to_string()),
            ..TransactionsQuery::default()
        };
        let filter = query.filter();
        assert_eq!(filter.kind, Some(TransactionKind::Payout));
        assert!(filter.q.is_none());
        assert_eq!(query.preserved(), "kind=payout");
    }
}
