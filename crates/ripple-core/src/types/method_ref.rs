//! MethodRef — canonical identity of a method in the call graph.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Owner used when a signature carries no owner segment.
pub const UNKNOWN_OWNER: &str = "UnknownClass";

/// A method identified by its owner's qualified name and its simple name.
///
/// Parameter types are not part of the identity, so overloads share one
/// vertex. Serializes as the single string `owner.method`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct MethodRef {
    owner: String,
    method: String,
}

impl MethodRef {
    pub fn new(owner: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            method: method.into(),
        }
    }

    /// Parse `owner.method`, splitting on the last `.`.
    pub fn from_signature(signature: &str) -> Self {
        match signature.rfind('.') {
            Some(idx) => Self::new(&signature[..idx], &signature[idx + 1..]),
            None => Self::new(UNKNOWN_OWNER, signature),
        }
    }

    /// Qualified owner name, e.g. `com.acme.service.OrderService`.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Simple method name, e.g. `save`.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Owner name without package or enclosing types.
    pub fn owner_simple_name(&self) -> &str {
        let tail = self.owner.rsplit('.').next().unwrap_or(&self.owner);
        tail.rsplit('$').next().unwrap_or(tail)
    }

    pub fn signature(&self) -> String {
        format!("{}.{}", self.owner, self.method)
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.method)
    }
}

impl From<String> for MethodRef {
    fn from(signature: String) -> Self {
        Self::from_signature(&signature)
    }
}

impl From<MethodRef> for String {
    fn from(method: MethodRef) -> Self {
        method.signature()
    }
}

impl FromStr for MethodRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_signature(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_last_dot() {
        let m = MethodRef::from_signature("com.acme.service.OrderService.save");
        assert_eq!(m.owner(), "com.acme.service.OrderService");
        assert_eq!(m.method(), "save");
    }

    #[test]
    fn bare_name_gets_unknown_owner() {
        let m = MethodRef::from_signature("main");
        assert_eq!(m.owner(), UNKNOWN_OWNER);
        assert_eq!(m.method(), "main");
    }

    #[test]
    fn simple_name_strips_package_and_enclosing_types() {
        assert_eq!(MethodRef::new("a.b.Outer$Inner", "m").owner_simple_name(), "Inner");
        assert_eq!(MethodRef::new("Plain", "m").owner_simple_name(), "Plain");
    }

    #[test]
    fn serializes_as_single_string() {
        let m = MethodRef::new("com.acme.Svc", "run");
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"com.acme.Svc.run\"");
        let back: MethodRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn anonymous_owner_keeps_dollar_segment() {
        let m = MethodRef::from_signature("com.acme.Svc$Anonymous2.run");
        assert_eq!(m.owner(), "com.acme.Svc$Anonymous2");
        assert_eq!(m.owner_simple_name(), "Anonymous2");
    }
}
