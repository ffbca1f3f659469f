use serde::Serialize;

/// Body returned by the delete endpoints.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub message: String,
}

impl Deleted {
    pub fn new(what: &str, id: i64) -> Self {
        Self {
            message: format!("{what} {id} deleted"),
        }
    }
}
