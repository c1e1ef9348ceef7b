//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services: request
//! parsing, DTO mapping and error translation.

pub mod rest;
