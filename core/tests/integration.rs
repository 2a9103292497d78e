//! Full CRUD lifecycle test against the live server.
//!
//! # Design
//! Starts the server on a random port with an in-memory store, then
//! exercises every client operation over real HTTP using ureq. Validates
//! that the core's request building and response parsing work end-to-end.

use todo_core::{ApiError, CreateTodo, HttpMethod, HttpResponse, TodoClient, UpdateTodo};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: todo_core::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Patch, Some(body)) => {
            agent.patch(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn spawn_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener, todo_server::AppState::in_memory()).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn crud_lifecycle() {
    let addr = spawn_server();
    let client = TodoClient::new(&format!("http://{addr}"));

    // Step 1: list should be empty.
    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // Step 2: create a todo; the server trims the text.
    let req = client
        .build_create_todo(&CreateTodo {
            text: "  Integration test ".to_string(),
        })
        .unwrap();
    let created = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(created.text, "Integration test");
    assert!(!created.done);
    let id = created.id;

    // Step 3: list should contain exactly the created todo.
    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert_eq!(todos, vec![created.clone()]);

    // Step 4: mark done.
    let req = client.build_update_todo(id, &UpdateTodo { done: true }).unwrap();
    let updated = client.parse_update_todo(execute(req)).unwrap();
    assert_eq!(updated.text, "Integration test");
    assert!(updated.done);

    // Step 5: an object without `text` is rejected.
    let req = todo_core::HttpRequest {
        body: Some("{}".to_string()),
        ..client.build_create_todo(&CreateTodo { text: String::new() }).unwrap()
    };
    let err = client.parse_create_todo(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest));

    // Step 6: delete.
    client.parse_delete_todo(execute(client.build_delete_todo(id))).unwrap();

    // Step 7: update after delete should be NotFound.
    let req = client.build_update_todo(id, &UpdateTodo { done: false }).unwrap();
    let err = client.parse_update_todo(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 8: delete again should be NotFound.
    let err = client
        .parse_delete_todo(execute(client.build_delete_todo(id)))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 9: list should be empty again.
    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert!(todos.is_empty(), "expected empty list after delete");
}
