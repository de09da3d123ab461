//! Proptest generators for property-based testing.

use proptest::prelude::*;

use reelgate_core::{AccessToken, ActionRequest, ActionTag, ContentRef, OwnerId};

/// Generate an owner id.
pub fn owner_id() -> impl Strategy<Value = OwnerId> {
    any::<i64>().prop_map(OwnerId)
}

/// Generate a random AccessToken.
pub fn access_token() -> impl Strategy<Value = AccessToken> {
    any::<[u8; 32]>().prop_map(AccessToken::from_bytes)
}

/// Generate an ActionTag.
pub fn action_tag() -> impl Strategy<Value = ActionTag> {
    prop_oneof![Just(ActionTag::Download), Just(ActionTag::Stream)]
}

/// Generate a content reference in the shape ingest produces.
pub fn content_ref() -> impl Strategy<Value = ContentRef> {
    any::<[u8; 8]>().prop_map(|b| ContentRef::from_digest(&b))
}

/// Generate a well-formed action request.
pub fn action_request() -> impl Strategy<Value = ActionRequest> {
    (action_tag(), access_token()).prop_map(|(tag, token)| ActionRequest::new(tag, token))
}

/// Generate an action string with no tag separator.
pub fn unseparated_action() -> impl Strategy<Value = String> {
    "[A-Za-z0-9-]{0,80}".prop_map(String::from)
}

/// Generate an action string with an unknown tag.
pub fn unknown_tag_action() -> impl Strategy<Value = String> {
    ("[a-z]{1,6}", access_token())
        .prop_filter("tag must be unknown", |(tag, _)| tag != "dl" && tag != "str")
        .prop_map(|(tag, token)| format!("{tag}_{}", token.encode()))
}

/// Generate a grant lifetime in seconds and an offset from issuance.
pub fn ttl_and_offset() -> impl Strategy<Value = (u64, i64)> {
    (1u64..=7_200).prop_flat_map(|ttl| {
        let ttl_ms = ttl as i64 * 1000;
        (Just(ttl), 0i64..=ttl_ms * 2)
    })
}
