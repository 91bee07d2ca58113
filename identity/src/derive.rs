//! SHA-256 fingerprint derivation.

use sha2::{Digest, Sha256};

use campustalk_types::Fingerprint;

use crate::context::ActorContext;
use crate::pepper::Pepper;

/// Derive the stable pseudonymous fingerprint for an actor.
///
/// `SHA-256(context || pepper)` — deterministic, collision-resistant and
/// non-invertible. No side effects and no failure path: any context yields
/// a fingerprint.
pub fn fingerprint(context: &ActorContext, pepper: &Pepper) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(context.digest_input());
    hasher.update(pepper.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    Fingerprint::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use campustalk_types::AccountId;
    use proptest::prelude::*;

    fn pepper() -> Pepper {
        Pepper::new("test-pepper")
    }

    #[test]
    fn same_context_same_fingerprint() {
        let ctx = ActorContext::Account(AccountId::new("user-42"));
        assert_eq!(fingerprint(&ctx, &pepper()), fingerprint(&ctx, &pepper()));
    }

    #[test]
    fn different_accounts_different_fingerprints() {
        let a = ActorContext::Account(AccountId::new("user-1"));
        let b = ActorContext::Account(AccountId::new("user-2"));
        assert_ne!(fingerprint(&a, &pepper()), fingerprint(&b, &pepper()));
    }

    #[test]
    fn pepper_changes_every_fingerprint() {
        let ctx = ActorContext::Account(AccountId::new("user-42"));
        let old = fingerprint(&ctx, &Pepper::new("pepper-v1"));
        let new = fingerprint(&ctx, &Pepper::new("pepper-v2"));
        assert_ne!(old, new, "rotation must invalidate prior comparisons");
    }

    #[test]
    fn anonymous_pair_is_stable() {
        let ctx = ActorContext::Anonymous {
            addr: "192.0.2.7".into(),
            user_agent: "Mozilla/5.0".into(),
        };
        assert_eq!(fingerprint(&ctx, &pepper()), fingerprint(&ctx, &pepper()));
    }

    #[test]
    fn output_does_not_echo_input() {
        let ctx = ActorContext::Account(AccountId::new("aaaaaaaaaaaaaaaa"));
        let fp = fingerprint(&ctx, &pepper());
        assert!(!fp.to_string().contains("aaaaaaaaaaaaaaaa"));
    }

    proptest! {
        /// Determinism over arbitrary anonymous contexts.
        #[test]
        fn derivation_is_deterministic(addr in ".{0,40}", ua in ".{0,80}") {
            let ctx = ActorContext::Anonymous { addr, user_agent: ua };
            prop_assert_eq!(fingerprint(&ctx, &pepper()), fingerprint(&ctx, &pepper()));
        }

        /// Distinct account ids never collide in practice.
        #[test]
        fn distinct_accounts_distinct_outputs(a in "[a-z0-9]{1,24}", b in "[a-z0-9]{1,24}") {
            prop_assume!(a != b);
            let fa = fingerprint(&ActorContext::Account(AccountId::new(a)), &pepper());
            let fb = fingerprint(&ActorContext::Account(AccountId::new(b)), &pepper());
            prop_assert_ne!(fa, fb);
        }
    }
}
