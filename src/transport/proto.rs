//! Protobuf messages for `library.Library/AddBook`.
//!
//! Written by hand in the shape `prost-build` would generate, so the crate
//! needs no `protoc` at build time. Timestamps on `Book` are not needed for
//! checks and are skipped as unknown fields on decode.

use crate::domain::BookPayload;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddBookRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "2")]
    pub author_id: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Book {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "3")]
    pub author_id: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddBookResponse {
    #[prost(message, optional, tag = "1")]
    pub book: ::core::option::Option<Book>,
}

impl From<&BookPayload> for AddBookRequest {
    fn from(payload: &BookPayload) -> Self {
        Self {
            name: payload.name.clone(),
            author_id: payload.author_id.clone(),
        }
    }
}
