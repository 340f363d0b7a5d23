use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::{Context, Result, Subscription, ID};
use futures_util::Stream;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use uuid::Uuid;

use super::error::GqlError;
use super::global_id::uuid_from_global_id;
use super::node::NodeKind;
use super::types::Post;
use crate::state::AppState;

const CHANNEL_CAPACITY: usize = 100;

/// All subscription channels
struct PostChannels {
    /// Every created post
    created: broadcast::Sender<Post>,
    /// Every published post
    published: broadcast::Sender<Post>,
    /// Per-author created posts
    by_author: HashMap<Uuid, broadcast::Sender<Post>>,
}

impl PostChannels {
    fn new() -> Self {
        Self {
            created: broadcast::channel(CHANNEL_CAPACITY).0,
            published: broadcast::channel(CHANNEL_CAPACITY).0,
            by_author: HashMap::new(),
        }
    }

    fn get_or_create_author(&mut self, author_id: Uuid) -> &broadcast::Sender<Post> {
        self.by_author
            .entry(author_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
    }

    /// Drop author channels nobody listens to any more.
    fn prune(&mut self) {
        self.by_author.retain(|_, tx| tx.receiver_count() > 0);
    }
}

/// Post events for one store. Cloned handles share the same channels.
#[derive(Clone)]
pub struct PostEvents {
    channels: Arc<Mutex<PostChannels>>,
}

impl Default for PostEvents {
    fn default() -> Self {
        Self {
            channels: Arc::new(Mutex::new(PostChannels::new())),
        }
    }
}

impl PostEvents {
    /// Receiver for created posts, optionally only one author's.
    pub fn subscribe_created(&self, author_id: Option<Uuid>) -> broadcast::Receiver<Post> {
        let mut channels = self.channels.lock();
        match author_id {
            Some(author) => channels.get_or_create_author(author).subscribe(),
            None => channels.created.subscribe(),
        }
    }

    pub fn subscribe_published(&self) -> broadcast::Receiver<Post> {
        self.channels.lock().published.subscribe()
    }

    /// Publish a new post to the global channel and its author's channel
    pub fn publish_post_created(&self, post: Post) {
        let mut channels = self.channels.lock();
        channels.prune();
        if let Some(tx) = channels.by_author.get(&post.author_uuid()) {
            let _ = tx.send(post.clone());
        }
        let _ = channels.created.send(post);
    }

    /// Publish a post whose publication time was set
    pub fn publish_post_published(&self, post: Post) {
        let _ = self.channels.lock().published.send(post);
    }

    #[cfg(test)]
    fn has_author_channel(&self, author_id: Uuid) -> bool {
        self.channels.lock().by_author.contains_key(&author_id)
    }
}

#[derive(Default)]
pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Posts as they are created, optionally only those by one author.
    async fn post_created(
        &self,
        ctx: &Context<'_>,
        author_id: Option<ID>,
    ) -> Result<impl Stream<Item = Result<Post, BroadcastStreamRecvError>>> {
        let author = author_id
            .map(|id| uuid_from_global_id(&id, NodeKind::Person.as_str()))
            .transpose()
            .map_err(GqlError::from)?;
        let receiver = ctx.data::<AppState>()?.events.subscribe_created(author);

        Ok(BroadcastStream::new(receiver))
    }

    /// Posts as they are published.
    async fn post_published(
        &self,
        ctx: &Context<'_>,
    ) -> Result<impl Stream<Item = Result<Post, BroadcastStreamRecvError>>> {
        let receiver = ctx.data::<AppState>()?.events.subscribe_published();
        Ok(BroadcastStream::new(receiver))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use infra::models::PostRow;

    fn post_by(author_id: Uuid) -> Post {
        Post::from(PostRow {
            id: Uuid::new_v4(),
            author_id,
            title: "Hello".into(),
            body: String::new(),
            published_at: None,
            created_at: Utc::now(),
        })
    }

    #[test]
    fn author_channel_is_pruned_after_last_receiver_drops() {
        let events = PostEvents::default();
        let author = Uuid::new_v4();

        let receiver = events.subscribe_created(Some(author));
        assert!(events.has_author_channel(author));

        drop(receiver);
        events.publish_post_created(post_by(author));
        assert!(!events.has_author_channel(author));
    }

    #[test]
    fn live_author_channel_survives_and_receives() {
        let events = PostEvents::default();
        let author = Uuid::new_v4();
        let mut receiver = events.subscribe_created(Some(author));

        events.publish_post_created(post_by(Uuid::new_v4()));
        events.publish_post_created(post_by(author));

        assert!(events.has_author_channel(author));
        assert_eq!(receiver.try_recv().unwrap().author_uuid(), author);
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn separate_handles_do_not_share_events() {
        let ours = PostEvents::default();
        let theirs = PostEvents::default();
        let mut receiver = ours.subscribe_created(None);

        theirs.publish_post_created(post_by(Uuid::new_v4()));
        assert!(receiver.try_recv().is_err());

        ours.clone().publish_post_created(post_by(Uuid::new_v4()));
        assert!(receiver.try_recv().is_ok());
    }
}
