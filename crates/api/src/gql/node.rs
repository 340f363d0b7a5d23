//! The Relay `Node` interface and global-ID object lookup.

use std::fmt;
use std::str::FromStr;

use async_graphql::{Context, Interface, Result, ID};

use super::complexity;
use super::error::GqlError;
use super::global_id::GlobalId;
use super::types::{Business, Person, Post};
use crate::state::AppState;

/// An object with a globally unique ID.
#[derive(Interface)]
#[graphql(field(name = "id", ty = "ID", desc = "The ID of an object"))]
pub enum Node {
    Person(Person),
    Business(Business),
    Post(Post),
}

/// Type names that may appear in a global ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Person,
    Business,
    Post,
}

impl NodeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Person => "Person",
            NodeKind::Business => "Business",
            NodeKind::Post => "Post",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = GqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Person" => Ok(NodeKind::Person),
            "Business" => Ok(NodeKind::Business),
            "Post" => Ok(NodeKind::Post),
            other => Err(GqlError::new(format!("Unknown node type: {other}"))),
        }
    }
}

/// Fetch the object behind a global ID.
///
/// A well-formed ID for a known type that matches no row resolves to `None`;
/// anything unparseable is an error.
pub fn resolve_node(state: &AppState, id: &ID) -> Result<Option<Node>, GqlError> {
    let gid = GlobalId::decode(id)?;
    let kind: NodeKind = gid.type_name.parse()?;
    let uuid = gid.to_uuid()?;

    let node = match kind {
        NodeKind::Person => state.people().get(uuid).map(|r| Node::Person(r.into())),
        NodeKind::Business => state
            .businesses()
            .get(uuid)
            .map(|r| Node::Business(r.into())),
        NodeKind::Post => state.posts().get(uuid).map(|r| Node::Post(r.into())),
    };
    Ok(node)
}

/// Root fields for refetching any object by global ID.
#[derive(Default)]
pub struct NodeQuery;

#[async_graphql::Object]
impl NodeQuery {
    /// Fetches an object given its ID
    async fn node(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Node>> {
        let state = ctx.data::<AppState>()?;
        Ok(resolve_node(state, &id)?)
    }

    /// Fetches objects given their IDs, in the same order. Unknown IDs yield `null`.
    #[graphql(complexity = "complexity::batch(ids.len(), child_complexity)")]
    async fn nodes(&self, ctx: &Context<'_>, ids: Vec<ID>) -> Result<Vec<Option<Node>>> {
        let state = ctx.data::<AppState>()?;
        ids.iter()
            .map(|id| resolve_node(state, id).map_err(Into::into))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gql::global_id::to_global_id;
    use infra::db::Db;
    use infra::repos::CreatePerson;
    use uuid::Uuid;

    #[test]
    fn kind_names_round_trip() {
        for kind in [NodeKind::Person, NodeKind::Business, NodeKind::Post] {
            assert_eq!(kind.as_str().parse::<NodeKind>().unwrap(), kind);
        }
        assert!("Planet".parse::<NodeKind>().is_err());
    }

    #[test]
    fn resolves_existing_person() {
        let state = AppState::new(Db::new());
        let row = state
            .people()
            .create(CreatePerson {
                name: "Ada".into(),
                age: None,
            })
            .unwrap();

        let id = to_global_id("Person", row.id);
        let node = resolve_node(&state, &id).unwrap();
        assert!(matches!(node, Some(Node::Person(p)) if p.uuid() == row.id));
    }

    #[test]
    fn unknown_row_is_none_and_unknown_type_is_error() {
        let state = AppState::new(Db::new());
        let missing = to_global_id("Business", Uuid::new_v4());
        assert!(resolve_node(&state, &missing).unwrap().is_none());

        let planet = to_global_id("Planet", Uuid::new_v4());
        assert!(resolve_node(&state, &planet).is_err());
    }
}
