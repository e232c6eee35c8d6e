use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Blog as seen from the posts layer.
///
/// Blogs are owned by a separate access layer; here they are an external
/// collaborator consulted only for existence and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub name: String,
}
