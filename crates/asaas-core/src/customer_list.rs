//! Paged customer listing.

use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::error::Result;
use crate::serde_util::{from_object, null_as_default};

/// Default page size used by Asaas list endpoints.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// One page of customers returned by `GET /v3/customers`.
///
/// Items are decoded as-is; they are not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerList {
    /// Whether another page follows this one.
    pub has_more: bool,

    /// Total number of customers matching the filter.
    pub total_count: u64,

    /// Page size; stays at [`DEFAULT_PAGE_LIMIT`] when the server omits it.
    pub limit: u32,

    /// Offset of the first item.
    pub offset: u64,

    /// Customers on this page, in server order.
    #[serde(rename = "data", deserialize_with = "null_as_default")]
    pub items: Vec<Customer>,
}

impl Default for CustomerList {
    fn default() -> Self {
        Self {
            has_more: false,
            total_count: 0,
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
            items: Vec::new(),
        }
    }
}

impl CustomerList {
    /// Create an empty first page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a page from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the list envelope.
    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        Ok(from_object(raw)?)
    }

    /// Number of customers on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page has no customers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelError;

    #[test]
    fn new_list_uses_default_page_size() {
        let list = CustomerList::new();
        assert_eq!(list.limit, 10);
        assert!(list.is_empty());
        assert!(!list.has_more);
    }

    #[test]
    fn list_unmarshal() {
        let raw = br#"{"object":"list","hasMore":true,"totalCount":2,"limit":1,"offset":0,"data":[{"object":"customer","id":"cus_1","name":"John Doe","cpfCnpj":"00000000191","mobilePhone":null,"email":null}]}"#;
        let list = CustomerList::from_bytes(raw).unwrap();
        assert!(list.has_more);
        assert_eq!(list.total_count, 2);
        assert_eq!(list.limit, 1);
        assert_eq!(list.len(), 1);
        assert_eq!(list.items[0].id, "cus_1");
        assert_eq!(list.items[0].name, "John Doe");
    }

    #[test]
    fn list_items_are_not_validated() {
        let raw = br#"{"hasMore":false,"totalCount":1,"limit":10,"offset":0,"data":[{"id":"cus_2"}]}"#;
        let list = CustomerList::from_bytes(raw).unwrap();
        assert_eq!(list.items[0].id, "cus_2");
        assert!(list.items[0].validate().is_err());
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let list = CustomerList::from_bytes(br#"{"totalCount":0}"#).unwrap();
        assert_eq!(list.limit, DEFAULT_PAGE_LIMIT);
        assert!(list.is_empty());
    }

    #[test]
    fn null_data_is_an_empty_page() {
        let list =
            CustomerList::from_bytes(br#"{"hasMore":false,"limit":10,"data":null}"#).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn list_rejects_array_body() {
        let err = CustomerList::from_bytes(b"[]").unwrap_err();
        assert!(matches!(err, ModelError::Json(_)));
    }

    #[test]
    fn list_rejects_malformed_json() {
        let err = CustomerList::from_bytes(b"{\"data\":").unwrap_err();
        assert!(matches!(err, ModelError::Json(_)));
    }
}
