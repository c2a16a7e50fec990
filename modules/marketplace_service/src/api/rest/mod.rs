//! REST API layer

pub mod auth;
pub mod dto;
pub mod error;
pub mod form;
pub mod handlers;
pub mod mapper;
pub mod routes;
