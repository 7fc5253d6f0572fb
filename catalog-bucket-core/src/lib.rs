#![doc = "catalog-bucket-core: core logic library for catalog-bucket."]

//! This crate contains the data model, collaborator traits and pipelines for catalog-bucket.
//! The S3 implementation of [`contract::ObjectStore`] lives in the CLI crate.
//!
//! # Usage
//! Build an [`extract::ExtractConfig`], pick a [`contract::CatalogClient`] (usually
//! [`catalog::RapidApiCatalog`]) and an [`contract::ObjectStore`], then call
//! [`extract::extract_and_upload`].

pub mod buckets;
pub mod catalog;
pub mod config;
pub mod contract;
pub mod error;
pub mod extract;
pub mod object_key;
pub mod pacing;
pub mod page;
pub mod retry;
