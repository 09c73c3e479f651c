//! Transaction endpoints (read only).

use serde::Serialize;
use tracing::instrument;

use rentdesk_core::{TransactionId, TransactionKind, TransactionStatus};

use super::client::{PageParams, is_blank};
use super::types::{Page, Transaction};
use super::{ApiClient, ApiError};

/// Filters accepted by `GET /admin/transactions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransactionFilter {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    #[serde(skip_serializing_if = "is_blank")]
    pub q: Option<String>,
}

impl ApiClient {
    /// List transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` on transport or backend failure.
    #[instrument(skip(self, filter), fields(page = page.page(), kind = ?filter.kind))]
    pub async fn list_transactions(
        &self,
        page: PageParams,
        filter: &TransactionFilter,
    ) -> Result<Page<Transaction>, ApiError> {
        self.list("admin/transactions", page, filter).await
    }

    /// Get a transaction by id, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns the mapped `ApiError` on transport or backend failure.
    #[instrument(skip(self), fields(transaction_id = %id))]
    pub async fn get_transaction(
        &self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, ApiError> {
        self.find(&format!("admin/transactions/{id}")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_sent_as_type() {
        let filter = TransactionFilter {
            kind: Some(TransactionKind::Payout),
            ..TransactionFilter::default()
        };
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            serde_json::json!({"type": "payout"})
        );
    }
}
