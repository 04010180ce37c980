/// A product for sale, stored in the `products` table as typed columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Generated identity (UUIDv4, no dashes).
    pub id: String,

    /// Merchant-assigned product code.
    pub code: String,

    /// Unit price in the smallest currency unit.
    pub price: u64,

    /// RFC 3339, set on insert.
    pub created_at: String,

    /// RFC 3339, set on insert and on every update.
    pub updated_at: String,
}
