//! One controller per mount point

use froth_core::{FrothError, Result};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Tracks which mount points have a live controller attached.
///
/// Clones share the same set; hand one registry to every controller that may
/// target the same page.
#[derive(Clone, Default)]
pub struct MountRegistry {
    claimed: Rc<RefCell<HashSet<String>>>,
}

impl MountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `id`. Fails with `MountPointBusy` while another guard holds it.
    pub fn claim(&self, id: &str) -> Result<MountGuard> {
        if !self.claimed.borrow_mut().insert(id.to_string()) {
            return Err(FrothError::MountPointBusy(id.to_string()));
        }
        Ok(MountGuard {
            id: id.to_string(),
            claimed: Rc::clone(&self.claimed),
        })
    }

    pub fn is_claimed(&self, id: &str) -> bool {
        self.claimed.borrow().contains(id)
    }
}

/// Releases its mount point when dropped
pub struct MountGuard {
    id: String,
    claimed: Rc<RefCell<HashSet<String>>>,
}

impl MountGuard {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        self.claimed.borrow_mut().remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_rejected() {
        let registry = MountRegistry::new();
        let guard = registry.claim("bg3d").unwrap();
        assert_eq!(guard.id(), "bg3d");
        assert!(matches!(
            registry.claim("bg3d"),
            Err(FrothError::MountPointBusy(_))
        ));
    }

    #[test]
    fn drop_releases_claim() {
        let registry = MountRegistry::new();
        {
            let _guard = registry.claim("bg3d").unwrap();
            assert!(registry.is_claimed("bg3d"));
        }
        assert!(!registry.is_claimed("bg3d"));
        assert!(registry.claim("bg3d").is_ok());
    }

    #[test]
    fn clones_share_claims() {
        let a = MountRegistry::new();
        let b = a.clone();
        let _guard = a.claim("hero").unwrap();
        assert!(b.claim("hero").is_err());
        assert!(b.claim("footer").is_ok());
    }
}
