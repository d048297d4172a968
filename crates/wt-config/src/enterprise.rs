//! Enterprise plan restrictions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EnterpriseConfig {
    /// Whether non-inline highlighting modes are locked behind the plan.
    /// When set, stored highlight configuration reads back as disabled.
    #[serde(default)]
    pub restrict_highlighting: bool,
}
