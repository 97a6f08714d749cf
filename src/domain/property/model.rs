//! Property domain entity
//!
//! Properties are owned by a tenant and act as the aggregate root for
//! peak-season rates and rate settings. Full property CRUD lives outside
//! this service; only lookup and ownership data is modeled here.

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Property {
    pub id: i32,
    /// Owning tenant identity, issued by the external account service
    pub tenant_id: Uuid,
    pub name: String,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Property {
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Check that `tenant_id` owns this property
    pub fn is_owned_by(&self, tenant_id: Uuid) -> bool {
        self.tenant_id == tenant_id
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_check() {
        let owner = Uuid::new_v4();
        let p = Property {
            id: 1,
            tenant_id: owner,
            name: "Seaside Villa".into(),
            deleted_at: None,
        };
        assert!(p.is_owned_by(owner));
        assert!(!p.is_owned_by(Uuid::new_v4()));
        assert!(p.is_live());
    }
}
