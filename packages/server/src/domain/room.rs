//! Room Resolver.
//!
//! A room is not stored anywhere: it is a pure function of the two
//! participants. The identifier is the concatenation of both user ids, the
//! smaller one first under byte-wise lexical order (`Ord for str`), so both
//! participants compute the same id regardless of who opens the conversation.

use super::value_object::{RoomId, UserId};

/// Resolve the canonical room for a pair of users.
///
/// `resolve_room(a, b) == resolve_room(b, a)` for every pair.
pub fn resolve_room(a: &UserId, b: &UserId) -> RoomId {
    let (first, second) = if a.as_str() <= b.as_str() {
        (a, b)
    } else {
        (b, a)
    };
    RoomId::concat(first, second)
}
