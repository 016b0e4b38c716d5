//! Fork engine tests over the in-memory backend.

use std::sync::Arc;

use branching::{ForkEngine, ForkError, ForkSource};
use chat_core::Message;
use chat_store::ChatStore;
use entity_store::MemoryBackend;

async fn setup() -> (ChatStore, ForkEngine) {
    let store = ChatStore::open(Arc::new(MemoryBackend::new())).await.unwrap();
    let engine = ForkEngine::new(store.clone());
    (store, engine)
}

fn source_from(branch_id: &str, message_id: &str, text: &str) -> ForkSource {
    ForkSource {
        source_branch_id: branch_id.to_string(),
        source_message_id: message_id.to_string(),
        selected_text: text.to_string(),
    }
}

#[tokio::test]
async fn test_fork_to_new_branch_never_copies_messages() {
    let (store, engine) = setup().await;
    let (conversation, branch) = store.create_conversation("m").await.unwrap();

    let message = Message::assistant(&branch.id, "a long explanation");
    store.messages.create(&message).await.unwrap();
    store
        .messages
        .create(&Message::user(&branch.id, "follow-up"))
        .await
        .unwrap();

    let forked = engine
        .fork_to_new_branch(
            &conversation.id,
            source_from(&branch.id, &message.id, "long explanation"),
        )
        .await
        .unwrap();

    assert!(forked.messages.is_empty());
    assert!(store
        .messages
        .list_by_branch(&forked.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_fork_to_new_branch_seeds_reference_and_position() {
    let (store, engine) = setup().await;
    let (conversation, branch) = store.create_conversation("model-a").await.unwrap();
    let message = Message::assistant(&branch.id, "text");
    store.messages.create(&message).await.unwrap();

    let forked = engine
        .fork_to_new_branch(
            &conversation.id,
            source_from(&branch.id, &message.id, "selected span"),
        )
        .await
        .unwrap();

    assert_eq!(forked.position, 1);
    assert_eq!(forked.mentioned_texts, vec!["selected span".to_string()]);
    assert_eq!(forked.model, "model-a");

    let origin = forked.fork_origin.unwrap();
    assert_eq!(origin.source_branch_id, branch.id);
    assert_eq!(origin.source_message_id, message.id);
    assert_eq!(origin.selected_text, "selected span");

    let conversation = store.conversations.get(&conversation.id).await.unwrap().unwrap();
    assert_eq!(conversation.branch_ids, vec![branch.id, forked.id]);
}

#[tokio::test]
async fn test_fork_rejects_whitespace_selection() {
    let (store, engine) = setup().await;
    let (conversation, branch) = store.create_conversation("m").await.unwrap();

    let result = engine
        .fork_to_new_branch(&conversation.id, source_from(&branch.id, "msg", "  \n\t "))
        .await;
    assert!(matches!(result, Err(ForkError::EmptySelection)));

    let result = engine.fork_to_existing_branch(&branch.id, "").await;
    assert!(matches!(result, Err(ForkError::EmptySelection)));
}

#[tokio::test]
async fn test_fork_to_unknown_conversation_fails() {
    let (_, engine) = setup().await;

    let result = engine
        .fork_to_new_branch("missing", source_from("b", "m", "text"))
        .await;
    assert!(matches!(result, Err(ForkError::UnknownConversation(_))));
}

#[tokio::test]
async fn test_fork_to_existing_branch_is_additive() {
    let (store, engine) = setup().await;
    let (_, branch) = store.create_conversation("m").await.unwrap();

    engine.fork_to_existing_branch(&branch.id, "a").await.unwrap();
    engine.fork_to_existing_branch(&branch.id, "b").await.unwrap();

    let stored = store.branches.get(&branch.id).await.unwrap().unwrap();
    assert_eq!(stored.mentioned_texts, vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn test_remove_middle_branch_repacks_positions() {
    let (store, engine) = setup().await;
    let (conversation, first) = store.create_conversation("m").await.unwrap();
    let msg = Message::assistant(&first.id, "seed");
    store.messages.create(&msg).await.unwrap();

    let second = engine
        .fork_to_new_branch(&conversation.id, source_from(&first.id, &msg.id, "s1"))
        .await
        .unwrap();
    let third = engine
        .fork_to_new_branch(&conversation.id, source_from(&first.id, &msg.id, "s2"))
        .await
        .unwrap();
    store
        .messages
        .create(&Message::user(&second.id, "doomed"))
        .await
        .unwrap();

    engine.remove_branch(&second.id).await.unwrap();

    let siblings = store
        .branches
        .list_by_conversation(&conversation.id)
        .await
        .unwrap();
    let order: Vec<(&str, u32)> = siblings
        .iter()
        .map(|b| (b.id.as_str(), b.position))
        .collect();
    assert_eq!(order, vec![(first.id.as_str(), 0), (third.id.as_str(), 1)]);

    let conversation = store.conversations.get(&conversation.id).await.unwrap().unwrap();
    assert_eq!(conversation.branch_ids, vec![first.id.clone(), third.id.clone()]);

    // Cascade removed the deleted branch's messages.
    assert!(store
        .messages
        .list_by_branch(&second.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_primary_branch_cannot_be_removed() {
    let (store, engine) = setup().await;
    let (conversation, first) = store.create_conversation("m").await.unwrap();
    let msg = Message::assistant(&first.id, "seed");
    store.messages.create(&msg).await.unwrap();
    engine
        .fork_to_new_branch(&conversation.id, source_from(&first.id, &msg.id, "s"))
        .await
        .unwrap();

    let result = engine.remove_branch(&first.id).await;
    assert!(matches!(result, Err(ForkError::FirstBranchProtected)));
}

#[tokio::test]
async fn test_last_branch_cannot_be_removed() {
    let (store, engine) = setup().await;
    let (_, only) = store.create_conversation("m").await.unwrap();

    let result = engine.remove_branch(&only.id).await;
    assert!(matches!(result, Err(ForkError::LastBranch)));
}
