//! End-to-end behaviour of the users resource against a mock Redmine server.

use mockito::{Matcher, Server};
use redmine_cli::{
    Pagination, RedmineClient, RedmineError, StatusUpdate, UserStatus, UsersFilter,
    UserStatusFilter,
};

const SINGLE_PAGE: &str = r#"{"users":[{"id":1,"login":"admin","firstname":"Redmine","lastname":"Admin","mail":"admin@r.example","created_on":"2006-07-19T17:12:21Z","last_login_on":"2024-03-01T08:00:00Z","memberships":[]}],"total_count":1,"offset":0,"limit":100}"#;

fn client(server: &Server) -> RedmineClient {
    RedmineClient::new(&server.url(), "k1").unwrap()
}

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn single_user_server_agrees_across_reads() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/users.json")
        .match_query(Matcher::UrlEncoded("key".into(), "k1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SINGLE_PAGE)
        .expect(2)
        .create_async()
        .await;
    let get = server
        .mock("GET", "/users/1.json")
        .match_query(Matcher::Exact("key=k1".into()))
        .with_status(200)
        .with_body(r#"{"user":{"id":1,"login":"admin","memberships":[]}}"#)
        .create_async()
        .await;

    let client = client(&server);

    let user = client.get_user(1).await.unwrap();
    assert_eq!(user.id, 1);

    let page = client.list_users(Pagination::default()).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, 1);

    let all = client.list_all_users().await.unwrap();
    assert_eq!(all, page);

    // one request for list_users, exactly one for list_all_users
    list.assert_async().await;
    get.assert_async().await;
}

#[tokio::test]
async fn empty_directory_costs_one_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/users.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"users":[],"total_count":0,"offset":0,"limit":100}"#)
        .expect(1)
        .create_async()
        .await;

    let users = client(&server).list_all_users().await.unwrap();
    assert!(users.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn exact_multiple_of_page_size() {
    let mut server = Server::new_async().await;
    let page = |start: u32| {
        let users: Vec<String> = (start..start + 100)
            .map(|id| format!(r#"{{"id":{id}}}"#))
            .collect();
        format!(r#"{{"users":[{}],"total_count":200}}"#, users.join(","))
    };
    let first = server
        .mock("GET", "/users.json")
        .match_query(Matcher::Exact("key=k1&limit=100".into()))
        .with_status(200)
        .with_body(page(1))
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/users.json")
        .match_query(Matcher::Exact("key=k1&offset=100&limit=100".into()))
        .with_status(200)
        .with_body(page(101))
        .expect(1)
        .create_async()
        .await;

    let users = client(&server).list_all_users().await.unwrap();
    assert_eq!(users.len(), 200);
    assert_eq!(users.first().map(|u| u.id), Some(1));
    assert_eq!(users.last().map(|u| u.id), Some(200));
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn aggregations_share_one_client_concurrently() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/users.json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(SINGLE_PAGE)
        .create_async()
        .await;

    let client = client(&server);
    let (a, b) = tokio::join!(client.list_all_users(), client.list_all_users());
    assert_eq!(a.unwrap().len(), 1);
    assert_eq!(b.unwrap().len(), 1);
}

#[tokio::test]
async fn filtered_list_never_puts_key_in_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/users.json")
        .match_header("x-redmine-api-key", "k1")
        .match_query(Matcher::Exact("status=".into()))
        .with_status(200)
        .with_body(SINGLE_PAGE)
        .create_async()
        .await;

    let filter = UsersFilter::new().status(UserStatusFilter::All);
    let users = client(&server).list_users_filtered(&filter).await.unwrap();
    assert_eq!(users.len(), 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn error_envelope_preserves_order() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/users/404.json")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"errors":["first","second","third"]}"#)
        .create_async()
        .await;

    let err = client(&server).get_user(404).await.unwrap_err();
    match &err {
        RedmineError::Server { status, messages } => {
            assert_eq!(*status, 404);
            assert_eq!(messages, &["first", "second", "third"]);
        }
        other => panic!("expected server error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "first\nsecond\nthird");
}

// =============================================================================
// Status updates
// =============================================================================

#[tokio::test]
async fn set_status_no_content_succeeds() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/users/5.json")
        .match_query(Matcher::Exact("key=k1".into()))
        .match_body(Matcher::JsonString(r#"{"user":{"status":1}}"#.into()))
        .with_status(204)
        .create_async()
        .await;

    client(&server)
        .set_user_status(StatusUpdate::from(UserStatus::Active), 5)
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn set_status_unprocessable_reports_server_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("PUT", "/users/5.json")
        .match_query(Matcher::Any)
        .with_status(422)
        .with_body(r#"{"errors":["Status is invalid"]}"#)
        .create_async()
        .await;

    let err = client(&server)
        .set_user_status(StatusUpdate::new(99), 5)
        .await
        .unwrap_err();
    assert!(matches!(err, RedmineError::Server { status: 422, .. }));
    assert_eq!(err.to_string(), "Status is invalid");
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Nothing listens on port 1.
    let client = RedmineClient::new("http://127.0.0.1:1", "k1").unwrap();
    let err = client.get_user(1).await.unwrap_err();
    assert!(matches!(err, RedmineError::Http(_)));
}
