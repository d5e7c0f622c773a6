use serde::Serialize;

/// Body of a book-creation request. Serializes to the REST JSON shape
/// `{"name": ..., "author_id": [...]}` and maps field-for-field onto the
/// gRPC `AddBookRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookPayload {
    pub name: String,
    pub author_id: Vec<String>,
}
