//! Mealsmith - Constraint-Driven AI Recipe Generation
//!
//! This crate turns a validated set of dietary constraints into a
//! schema-valid recipe by driving an external generative model through a
//! bounded retry protocol. Only artifacts that pass full schema validation
//! are ever returned or persisted.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
