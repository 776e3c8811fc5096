//! Integration tests for channel flows: JOIN, PART, KICK, TOPIC and MODE.

mod common;

use common::TestServer;

#[tokio::test]
async fn test_join_creates_channel_with_op() {
    let server = TestServer::spawn().await.expect("Failed to spawn server");
    let mut alice = server.login("alice").await.expect("alice login failed");

    let replies = alice.join("#team").await.expect("JOIN failed");

    let join = &replies[0];
    assert_eq!(join.command, "JOIN");
    assert_eq!(join.source_nickname(), Some("alice"));
    assert_eq!(join.params, vec!["#team"]);

    let names = replies
        .iter()
        .find(|m| m.command == "353")
        .expect("No RPL_NAMREPLY");
    assert_eq!(names.params, vec!["alice", "=", "#team", "@alice"]);
}

#[tokio::test]
async fn test_second_member_is_announced() {
    let server = TestServer::spawn().await.expect("Failed to spawn server");
    let mut alice = server.login("alice").await.expect("alice login failed");
    let mut bob = server.login("bob").await.expect("bob login failed");

    alice.join("#team").await.expect("alice JOIN failed");
    let replies = bob.join("#team").await.expect("bob JOIN failed");
    let names = replies.iter().find(|m| m.command == "353").unwrap();
    let mut listed: Vec<&str> = names.params[3].split(' ').collect();
    listed.sort_unstable();
    assert_eq!(listed, vec!["@alice", "bob"]);

    let seen = alice.expect("JOIN").await.expect("alice saw no JOIN");
    assert_eq!(seen.source_nickname(), Some("bob"));
    assert_eq!(seen.arg(0), Some("#team"));
}

#[tokio::test]
async fn test_part_is_broadcast() {
    let server = TestServer::spawn().await.expect("Failed to spawn server");
    let mut alice = server.login("alice").await.expect("alice login failed");
    let mut bob = server.login("bob").await.expect("bob login failed");
    alice.join("#team").await.unwrap();
    bob.join("#team").await.unwrap();
    alice.expect("JOIN").await.unwrap();

    bob.send_raw("PART #team :lunch time").await.unwrap();
    let part = alice.expect("PART").await.expect("alice saw no PART");
    assert_eq!(part.source_nickname(), Some("bob"));
    assert_eq!(part.params, vec!["#team", "lunch time"]);

    let echo = bob.expect("PART").await.expect("bob saw no PART echo");
    assert_eq!(echo.params, part.params);
}

#[tokio::test]
async fn test_kick_by_operator() {
    let server = TestServer::spawn().await.expect("Failed to spawn server");
    let mut alice = server.login("alice").await.expect("alice login failed");
    let mut bob = server.login("bob").await.expect("bob login failed");
    alice.join("#team").await.unwrap();
    bob.join("#team").await.unwrap();

    bob.send_raw("KICK #team alice").await.unwrap();
    let refused = bob.expect("482").await.expect("No ERR_CHANOPRIVSNEEDED");
    assert_eq!(refused.arg(1), Some("#team"));

    alice.send_raw("KICK #team bob :behave").await.unwrap();
    let kick = bob.expect("KICK").await.expect("bob saw no KICK");
    assert_eq!(kick.source_nickname(), Some("alice"));
    assert_eq!(kick.params, vec!["#team", "bob", "behave"]);

    bob.privmsg("#team", "still here?").await.unwrap();
    let blocked = bob.expect("404").await.expect("No ERR_CANNOTSENDTOCHAN");
    assert_eq!(blocked.arg(1), Some("#team"));
}

#[tokio::test]
async fn test_topic_set_and_query() {
    let server = TestServer::spawn().await.expect("Failed to spawn server");
    let mut alice = server.login("alice").await.expect("alice login failed");
    let mut bob = server.login("bob").await.expect("bob login failed");
    alice.join("#team").await.unwrap();
    bob.join("#team").await.unwrap();

    alice.send_raw("TOPIC #team :Release day").await.unwrap();
    let topic = bob.expect("TOPIC").await.expect("bob saw no TOPIC");
    assert_eq!(topic.params, vec!["#team", "Release day"]);

    bob.send_raw("TOPIC #team :mine now").await.unwrap();
    bob.expect("482").await.expect("topic lock not enforced");

    bob.send_raw("TOPIC #team").await.unwrap();
    let current = bob.expect("332").await.expect("No RPL_TOPIC");
    assert_eq!(current.params, vec!["bob", "#team", "Release day"]);
    let setter = bob.expect("333").await.expect("No RPL_TOPICWHOTIME");
    assert_eq!(setter.arg(2), Some("alice"));
}

#[tokio::test]
async fn test_limit_follows_current_membership() {
    let server = TestServer::spawn().await.expect("Failed to spawn server");
    let mut alice = server.login("alice").await.expect("alice login failed");
    let mut bob = server.login("bob").await.expect("bob login failed");
    let mut carol = server.login("carol").await.expect("carol login failed");
    let mut dave = server.login("dave").await.expect("dave login failed");

    alice.join("#team").await.unwrap();
    bob.join("#team").await.unwrap();
    alice.send_raw("MODE #team +l 1").await.unwrap();
    let mode = bob.expect("MODE").await.expect("bob saw no MODE");
    assert_eq!(mode.params, vec!["#team", "+l", "1"]);

    bob.send_raw("PART #team").await.unwrap();
    alice.expect("PART").await.unwrap();
    carol.join("#team").await.expect("carol should fit");

    dave.send_raw("JOIN #team").await.unwrap();
    let full = dave.expect("471").await.expect("No ERR_CHANNELISFULL");
    assert_eq!(full.params, vec!["dave", "#team", "Cannot join channel (+l)"]);
}

#[tokio::test]
async fn test_key_and_invite_only() {
    let server = TestServer::spawn().await.expect("Failed to spawn server");
    let mut alice = server.login("alice").await.expect("alice login failed");
    let mut bob = server.login("bob").await.expect("bob login failed");

    alice.join("#vault").await.unwrap();
    alice.send_raw("MODE #vault +k s3cret").await.unwrap();
    alice.expect("MODE").await.unwrap();

    bob.send_raw("JOIN #vault wrong").await.unwrap();
    bob.expect("475").await.expect("No ERR_BADCHANNELKEY");
    bob.join("#vault s3cret").await.expect("key should admit bob");
    bob.send_raw("PART #vault").await.unwrap();
    bob.expect("PART").await.unwrap();

    alice.send_raw("MODE #vault +i").await.unwrap();
    alice.expect("MODE").await.unwrap();
    bob.send_raw("JOIN #vault s3cret").await.unwrap();
    bob.expect("473").await.expect("No ERR_INVITEONLYCHAN");

    alice.send_raw("INVITE bob #vault").await.unwrap();
    alice.expect("341").await.expect("No RPL_INVITING");
    let invite = bob.expect("INVITE").await.expect("bob saw no INVITE");
    assert_eq!(invite.params, vec!["bob", "#vault"]);
    bob.join("#vault s3cret").await.expect("invite should admit bob");
}
