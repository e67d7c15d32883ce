//! Public types for the records API
use serde::Deserialize;

#[derive(Deserialize)]
pub struct RecordsParams {
    pub sheet_name: String,
}
