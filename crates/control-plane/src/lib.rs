// EventHub Control Plane Library
// Decision: Shared library for binaries (API server, CLI tools) and integration tests

// API routes and types (shared for OpenAPI generation)
pub mod api;

// Router assembly
pub mod app;

// Authentication module
pub mod auth;

// Environment configuration
pub mod config;

// Services layer
pub mod services;
pub use services::{CategoryService, EventService};

// Storage layer
pub mod storage;

// OpenAPI spec generation
pub mod openapi;
