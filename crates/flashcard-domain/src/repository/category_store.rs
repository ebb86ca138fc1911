//! Category Store - Read access to the `categories` collection

use super::StoreError;
use crate::model::category::Category;

/// Categories are read-only from the study app's point of view.
pub trait CategoryStore {
    /// Fetch every category
    fn select_categories(
        &self,
    ) -> impl core::future::Future<Output = Result<Vec<Category>, StoreError>> + Send;
}
