use uuid::Uuid;

/// Generate an opaque identifier, unique within a table.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
