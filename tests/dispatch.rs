#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode, Uri};
    use std::sync::Arc;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use todomvc::api::handlers;
    use todomvc::api::request::{CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT};
    use todomvc::api::{AppContext, Reply, Request, Router};
    use todomvc::db::todos::TodoStore;
    use todomvc::libs::todo::TodoStatus;

    struct DispatchTestContext {
        _temp_dir: TempDir,
        router: Router,
    }

    impl TestContext for DispatchTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let store = TodoStore::open(temp_dir.path().join("todo.json")).unwrap();
            let router = handlers::router(AppContext::new(Arc::new(store)));
            DispatchTestContext { _temp_dir: temp_dir, router }
        }
    }

    impl DispatchTestContext {
        fn send(&self, request: Request) -> Reply {
            self.router.dispatch(&request)
        }

        fn post(&self, body: &str) -> Reply {
            self.send(Request::new(Method::POST, "/todo").with_body(body.to_string()))
        }

        fn put(&self, body: &str) -> Reply {
            self.send(Request::new(Method::PUT, "/todo").with_body(body.to_string()))
        }

        fn list(&self) -> Reply {
            self.send(Request::new(Method::GET, "/todo/list"))
        }
    }

    #[test_context(DispatchTestContext)]
    #[test]
    fn test_greeting(ctx: &mut DispatchTestContext) {
        let reply = ctx.send(Request::new(Method::GET, "/"));
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, "Todo MVC Service");
    }

    #[test_context(DispatchTestContext)]
    #[test]
    fn test_unknown_route_is_404(ctx: &mut DispatchTestContext) {
        for request in [
            Request::new(Method::GET, "/nonexistent"),
            Request::new(Method::POST, "/todo/list"),
            Request::new(Method::GET, "/todo"),
            Request::new(Method::GET, "/todo/list/"),
            Request::new(Method::PATCH, "/todo"),
        ] {
            let reply = ctx.send(request);
            assert_eq!(reply.status, StatusCode::NOT_FOUND);
            assert_eq!(reply.body, "404 Not Found");
        }
    }

    #[test_context(DispatchTestContext)]
    #[test]
    fn test_full_lifecycle(ctx: &mut DispatchTestContext) {
        let reply = ctx.post(r#"{"content":"buy milk"}"#);
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.content_type, CONTENT_TYPE_JSON);
        assert_eq!(reply.body, r#"{"id":1,"content":"buy milk","status":"active"}"#);

        let reply = ctx.put(r#"{"id":1,"content":"buy milk","status":"completed"}"#);
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, "");

        let reply = ctx.send(Request::new(Method::GET, "/todo/list").with_query("status", "completed"));
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, r#"[{"id":1,"content":"buy milk","status":"completed"}]"#);

        let reply = ctx.send(Request::new(Method::DELETE, "/todo").with_query("id", "1"));
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, "");

        let reply = ctx.list();
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, "[]");
    }

    #[test_context(DispatchTestContext)]
    #[test]
    fn test_add_ignores_id_and_status_in_body(ctx: &mut DispatchTestContext) {
        let reply = ctx.post(r#"{"id":77,"content":"x","status":"completed"}"#);
        assert_eq!(reply.body, r#"{"id":1,"content":"x","status":"active"}"#);
    }

    #[test_context(DispatchTestContext)]
    #[test]
    fn test_add_rejects_blank_or_missing_content(ctx: &mut DispatchTestContext) {
        for body in [r#"{"content":"  "}"#, r#"{"content":""}"#, "{}"] {
            let reply = ctx.post(body);
            assert_eq!(reply.status, StatusCode::BAD_REQUEST);
            assert_eq!(reply.content_type, CONTENT_TYPE_TEXT);
            assert_eq!(reply.body, "Todo content must be not empty");
        }
        assert_eq!(ctx.list().body, "[]");
    }

    #[test_context(DispatchTestContext)]
    #[test]
    fn test_malformed_body_is_client_error(ctx: &mut DispatchTestContext) {
        for reply in [ctx.post("not json"), ctx.post(""), ctx.put(r#"{"id":"one"}"#)] {
            assert_eq!(reply.status, StatusCode::BAD_REQUEST);
            assert!(!reply.body.is_empty());
        }
    }

    #[test_context(DispatchTestContext)]
    #[test]
    fn test_update_validation_order(ctx: &mut DispatchTestContext) {
        ctx.post(r#"{"content":"a"}"#);

        let cases = [
            (r#"{"content":"","status":"bogus"}"#, "Todo ID is missing"),
            (r#"{"id":1,"content":"","status":"bogus"}"#, "Illegal todo status"),
            (r#"{"id":1,"content":"b"}"#, "Illegal todo status"),
            (r#"{"id":1,"content":"b","status":"Completed"}"#, "Illegal todo status"),
            (r#"{"id":1,"content":" ","status":"completed"}"#, "Todo content must be not empty"),
            (r#"{"id":1,"status":"completed"}"#, "Todo content must be not empty"),
        ];
        for (body, message) in cases {
            let reply = ctx.put(body);
            assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{}", body);
            assert_eq!(reply.body, message, "{}", body);
        }

        assert_eq!(ctx.list().body, r#"[{"id":1,"content":"a","status":"active"}]"#);
    }

    #[test_context(DispatchTestContext)]
    #[test]
    fn test_update_unknown_id_is_client_error(ctx: &mut DispatchTestContext) {
        let reply = ctx.put(r#"{"id":42,"content":"x","status":"active"}"#);
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(reply.body, "Todo with ID 42 not found");
    }

    #[test_context(DispatchTestContext)]
    #[test]
    fn test_list_filters_by_legal_status_only(ctx: &mut DispatchTestContext) {
        for content in ["a", "b", "c"] {
            ctx.post(&format!(r#"{{"content":"{}"}}"#, content));
        }
        ctx.put(r#"{"id":2,"content":"b","status":"completed"}"#);

        let store = &ctx.router.context().store;
        let expect = |status: Option<TodoStatus>| serde_json::to_string(&store.read_filtered(status)).unwrap();

        let active = ctx.send(Request::new(Method::GET, "/todo/list").with_query("status", "active"));
        assert_eq!(active.body, expect(Some(TodoStatus::Active)));

        let completed = ctx.send(Request::new(Method::GET, "/todo/list").with_query("status", "completed"));
        assert_eq!(completed.body, expect(Some(TodoStatus::Completed)));

        let unknown = ctx.send(Request::new(Method::GET, "/todo/list").with_query("status", "archived"));
        assert_eq!(unknown.body, expect(None));

        // Only the first status value counts
        let first_wins = ctx.send(
            Request::new(Method::GET, "/todo/list")
                .with_query("status", "completed")
                .with_query("status", "active"),
        );
        assert_eq!(first_wins.body, expect(Some(TodoStatus::Completed)));
    }

    #[test_context(DispatchTestContext)]
    #[test]
    fn test_bulk_delete_skips_non_numeric_ids(ctx: &mut DispatchTestContext) {
        for content in ["a", "b", "c", "d"] {
            ctx.post(&format!(r#"{{"content":"{}"}}"#, content));
        }

        let reply = ctx.send(
            Request::new(Method::DELETE, "/todo")
                .with_query("id", "1")
                .with_query("id", "abc")
                .with_query("id", "3")
                .with_query("id", "99")
                .with_query("ids", "4"),
        );
        assert_eq!(reply.status, StatusCode::OK);

        let remaining: Vec<i64> = ctx.router.context().store.read_all().iter().map(|t| t.id).collect();
        assert_eq!(remaining, vec![2, 4]);

        // No ids at all is still a success
        let reply = ctx.send(Request::new(Method::DELETE, "/todo"));
        assert_eq!(reply.status, StatusCode::OK);
    }

    #[test]
    fn test_request_from_uri_decodes_query() {
        let uri: Uri = "/todo?id=1&id=2&id=x&note=a%20b+c&empty=".parse().unwrap();
        let request = Request::from_parts(Method::DELETE, &uri, Default::default());

        assert_eq!(request.path, "/todo");
        assert_eq!(request.query_values("id").collect::<Vec<_>>(), vec!["1", "2", "x"]);
        assert_eq!(request.query_first("note"), Some("a b c"));
        assert_eq!(request.query_first("empty"), Some(""));
        assert_eq!(request.query_first("missing"), None);

        let bare: Uri = "/todo/list".parse().unwrap();
        assert!(Request::from_parts(Method::GET, &bare, Default::default()).query.is_empty());
    }

    #[test_context(DispatchTestContext)]
    #[test]
    fn test_encoded_path_is_matched_verbatim(ctx: &mut DispatchTestContext) {
        let uri: Uri = "/todo%2Flist".parse().unwrap();
        let request = Request::from_parts(Method::GET, &uri, Default::default());
        assert_eq!(request.path, "/todo%2Flist");

        let reply = ctx.send(request);
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.body, "404 Not Found");
    }
}
