use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use todo_server::todo::{TodoPayload, TodoRepository, TodoService};

mod common;

use common::{send, setup};

fn page_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn can_display_todo_list_page() {
    let state = setup().await.expect("Failed to setup test context");
    let service = TodoService::new(state.db.clone());
    service
        .create_todo(TodoPayload::new("TestTodo1", "first", false))
        .await
        .unwrap();
    service
        .create_todo(TodoPayload::new("TestTodo2", "second", true))
        .await
        .unwrap();

    let response = send(&state.app, page_request("/todo")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response.headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    assert!(response.body.contains("<h1>Todo List</h1>"));
    assert!(response.body.contains("TestTodo1"));
    assert!(response.body.contains("TestTodo2"));
}

#[tokio::test]
async fn can_display_empty_todo_list_page() {
    let state = setup().await.expect("Failed to setup test context");

    let response = send(&state.app, page_request("/todo")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body.contains("id=\"item-"));
}

#[tokio::test]
async fn can_display_item_page() {
    let state = setup().await.expect("Failed to setup test context");
    let service = TodoService::new(state.db.clone());
    let item = service
        .create_todo(TodoPayload::new("Detail", "A detailed description", false))
        .await
        .unwrap();

    let response = send(&state.app, page_request(&format!("/todo/{}", item.id))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("A detailed description"));
}

#[tokio::test]
async fn can_answer_not_found_for_missing_item_page() {
    let state = setup().await.expect("Failed to setup test context");

    let response = send(&state.app, page_request("/todo/12")).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn can_display_add_form() {
    let state = setup().await.expect("Failed to setup test context");

    let response = send(&state.app, page_request("/todo/new")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Add item to list"));
    assert!(response.body.contains("action=\"/todo\""));
}

#[tokio::test]
async fn can_display_edit_form() {
    let state = setup().await.expect("Failed to setup test context");
    let service = TodoService::new(state.db.clone());
    let item = service
        .create_todo(TodoPayload::new("EditMe", "before", false))
        .await
        .unwrap();

    let response = send(
        &state.app,
        page_request(&format!("/todo/edit/{}", item.id)),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("value=\"EditMe\""));
    assert!(
        response
            .body
            .contains(&format!("action=\"/todo/{}\"", item.id))
    );
}

#[tokio::test]
async fn can_add_todo_from_form_and_redirect() {
    let state = setup().await.expect("Failed to setup test context");

    let response = send(
        &state.app,
        form_request("/todo", "title=Groceries&description=Milk+and+bread"),
    )
    .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.headers[header::LOCATION], "/todo");

    let todos = TodoService::new(state.db.clone())
        .get_all_todos()
        .await
        .unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "Groceries");
    assert_eq!(todos[0].description, "Milk and bread");
    assert!(!todos[0].done);
}

#[tokio::test]
async fn can_reject_form_with_empty_title() {
    let state = setup().await.expect("Failed to setup test context");

    let response = send(&state.app, form_request("/todo", "title=&description=x")).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let todos = TodoService::new(state.db.clone())
        .get_all_todos()
        .await
        .unwrap();
    assert!(todos.is_empty());
}

#[tokio::test]
async fn can_update_todo_from_form_and_redirect() {
    let state = setup().await.expect("Failed to setup test context");
    let service = TodoService::new(state.db.clone());
    let item = service
        .create_todo(TodoPayload::new("Old", "old description", false))
        .await
        .unwrap();

    let response = send(
        &state.app,
        form_request(
            &format!("/todo/{}", item.id),
            "title=New&description=new+description&done=on",
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.headers[header::LOCATION], "/todo");

    let updated = service.get_todo_by_id(item.id).await.unwrap();
    assert_eq!(updated.title, "New");
    assert_eq!(updated.description, "new description");
    assert!(updated.done);
}

#[tokio::test]
async fn can_redirect_root_to_todo_list() {
    let state = setup().await.expect("Failed to setup test context");

    let response = send(&state.app, page_request("/")).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.headers[header::LOCATION], "/todo");
}

#[tokio::test]
async fn can_serve_static_files() {
    let state = setup().await.expect("Failed to setup test context");

    let response = send(&state.app, page_request("/static/js/home.js")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("function deleteItem(id)"));

    let missing = send(&state.app, page_request("/static/js/missing.js")).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
