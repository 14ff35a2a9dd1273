//! Mapping of verified token claims to an [`Identity`]

use crate::models::Identity;
use serde_json::Value;

/// Builds the identity of a caller from verified token claims and the
/// (possibly empty) userinfo document.
///
/// Never fails. Userinfo values win over token claims for the profile fields;
/// permissions are the union of the realm roles and the roles granted to
/// `client_id`. Malformed or missing claims are treated as absent.
pub fn map_claims(claims: &Value, userinfo: &Value, client_id: &str) -> Identity {
    let subject = string_claim(claims, "sub").unwrap_or_default();
    let username = string_claim(userinfo, "preferred_username")
        .or_else(|| string_claim(claims, "preferred_username"));
    let email = string_claim(userinfo, "email").or_else(|| string_claim(claims, "email"));

    let realm_roles = roles(claims.get("realm_access"));
    let client_roles = roles(
        claims
            .get("resource_access")
            .and_then(|access| access.get(client_id)),
    );

    Identity {
        subject,
        username,
        email,
        permissions: realm_roles.chain(client_roles).collect(),
    }
}

/// A non-empty string claim
fn string_claim(document: &Value, name: &str) -> Option<String> {
    document
        .get(name)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// The string entries of the `roles` array under `node`
fn roles(node: Option<&Value>) -> impl Iterator<Item = String> + '_ {
    node.and_then(|node| node.get("roles"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::to_owned)
}
