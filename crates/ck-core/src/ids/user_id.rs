use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifier of the authenticated user, as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl_id!(UserId);
