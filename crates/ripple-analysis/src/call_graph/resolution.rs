//! Invocation resolution: Qualified, ReceiverType, SameOwner, UniqueName.
//! First match wins. Anything left is an external or ambiguous call and is dropped.
//! Unique-name matching applies to unqualified calls only; a call through a
//! receiver that names no type of the unit is external.

use ripple_core::types::collections::{FxHashMap, FxHashSet};
use ripple_core::MethodRef;

use super::types::Resolution;

/// Lookup tables over the declared (non-synthetic) methods of one unit.
#[derive(Debug, Default)]
pub struct ResolutionIndex {
    by_owner: FxHashMap<String, FxHashSet<String>>,
    by_simple_owner: FxHashMap<String, Vec<String>>,
    by_name: FxHashMap<String, Vec<MethodRef>>,
}

impl ResolutionIndex {
    pub fn insert(&mut self, method: &MethodRef) {
        let methods = self.by_owner.entry(method.owner().to_string()).or_default();
        if !methods.insert(method.method().to_string()) {
            // Overload of an already indexed method.
            return;
        }
        if methods.len() == 1 {
            self.by_simple_owner
                .entry(method.owner_simple_name().to_lowercase())
                .or_default()
                .push(method.owner().to_string());
        }
        self.by_name
            .entry(method.method().to_string())
            .or_default()
            .push(method.clone());
    }

    fn declares(&self, owner: &str, method: &str) -> bool {
        self.by_owner
            .get(owner)
            .is_some_and(|methods| methods.contains(method))
    }

    /// Resolve `name` or `receiver.name` as seen from a method of `caller_owner`.
    pub fn resolve(&self, target: &str, caller_owner: &str) -> Option<(MethodRef, Resolution)> {
        let (receiver, name) = match target.rfind('.') {
            Some(idx) => (Some(&target[..idx]), &target[idx + 1..]),
            None => (None, target),
        };
        if name.is_empty() {
            return None;
        }

        match receiver {
            Some(receiver) => {
                // Strategy 1: receiver is a declared owner's qualified name.
                if self.declares(receiver, name) {
                    return Some((MethodRef::new(receiver, name), Resolution::Qualified));
                }

                // Strategy 2: receiver names a declared type, or a variable
                // named after one (`orderService` → `OrderService`).
                let simple = receiver.rsplit('.').next().unwrap_or(receiver);
                self.unique_owner(simple, name)
                    .map(|owner| (MethodRef::new(owner, name), Resolution::ReceiverType))
            }
            None => {
                // Strategy 3: own type, then enclosing types outward.
                let mut owner = caller_owner;
                loop {
                    if self.declares(owner, name) {
                        return Some((MethodRef::new(owner, name), Resolution::SameOwner));
                    }
                    match owner.rfind('$') {
                        Some(idx) => owner = &owner[..idx],
                        None => break,
                    }
                }

                // Strategy 4: static imports, inherited methods.
                self.unique_name(name)
            }
        }
    }

    fn unique_owner(&self, simple_receiver: &str, name: &str) -> Option<&str> {
        let owners = self.by_simple_owner.get(&simple_receiver.to_lowercase())?;
        let mut matching = owners.iter().filter(|owner| self.declares(owner, name));
        let first = matching.next()?;
        match matching.next() {
            Some(_) => None,
            None => Some(first.as_str()),
        }
    }

    fn unique_name(&self, name: &str) -> Option<(MethodRef, Resolution)> {
        match self.by_name.get(name).map(Vec::as_slice) {
            Some([only]) => Some((only.clone(), Resolution::UniqueName)),
            _ => None,
        }
    }
}
