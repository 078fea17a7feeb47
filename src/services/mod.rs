//! Services layer - business operations.
//!
//! This module contains the text transformation engine:
//! - Bionic reading apply/restore

pub mod bionic;
