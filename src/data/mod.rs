// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Test data readers
//!
//! Turn CSV and JSON files into ordered rows of string maps. Consumers
//! drive scenarios from the rows and stay agnostic of the source format.

mod csv;
mod json;

pub use csv::read_csv_rows;
pub use json::read_json_rows;

/// One data row: column/field name -> string value
pub type Row = std::collections::HashMap<String, String>;
