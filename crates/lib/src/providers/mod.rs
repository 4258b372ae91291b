//! # External Providers
//!
//! This module contains the abstractions and implementations for external
//! services the generation pipeline depends on.

pub mod ai;
