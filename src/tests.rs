#[cfg(test)]
mod integration_tests {
    use crate::schemas::{CachedData, ErrorResponse};
    use crate::test_utils::test_utils::{
        insert_default, setup_test_app_state, setup_test_app_with_state, setup_test_server,
    };
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    async fn credit_salary(server: &TestServer, amount: i64) -> Value {
        let response = server
            .post("/api/salary")
            .json(&json!({ "salaryAmount": amount }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    async fn add_expense(server: &TestServer, category: &str, amount: i64) -> Value {
        let response = server
            .post("/api/expenses")
            .json(&json!({ "amount": amount, "category": category, "note": "test" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    fn number(value: &Value) -> f64 {
        value.as_f64().expect("expected a number")
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = setup_test_server().await;

        let response = server.get("/api/health").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_create_salary_seeds_active_defaults() {
        let state = setup_test_app_state().await;
        insert_default(&state, "Rent", 15000, true).await;
        insert_default(&state, "Gym", 1200, false).await;
        let server = TestServer::new(setup_test_app_with_state(state)).unwrap();

        let cycle = credit_salary(&server, 50000).await;

        assert_eq!(cycle["status"], "ACTIVE");
        assert_eq!(number(&cycle["salaryAmount"]), 50000.0);
        assert!(cycle["closedAt"].is_null());
        assert!(cycle["savings"].is_null());

        let expenses = cycle["expenses"].as_array().unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0]["category"], "Default");
        assert_eq!(expenses[0]["note"], "Rent");
        assert_eq!(expenses[0]["isDefault"], true);
        assert_eq!(number(&expenses[0]["amount"]), 15000.0);
    }

    #[tokio::test]
    async fn test_create_salary_validation() {
        let server = setup_test_server().await;

        let response = server
            .post("/api/salary")
            .json(&json!({ "salaryAmount": 0 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "Salary must be positive");
        assert_eq!(body.code, "VALIDATION_ERROR");
        assert!(!body.success);

        let response = server.post("/api/salary").json(&json!({})).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .post("/api/salary")
            .text("{\"salaryAmount\": ")
            .content_type("application/json")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
    }

    #[tokio::test]
    async fn test_new_salary_closes_previous_cycle() {
        let server = setup_test_server().await;

        let first = credit_salary(&server, 50000).await;
        add_expense(&server, "Food", 12000).await;
        add_expense(&server, "Bills", 3000).await;
        let second = credit_salary(&server, 60000).await;

        assert_ne!(first["id"], second["id"]);
        assert_eq!(second["expenses"].as_array().unwrap().len(), 0);

        let current: Value = server.get("/api/salary/current").await.json();
        assert_eq!(current["id"], second["id"]);

        let response = server.get("/api/salary/history").await;
        response.assert_status(StatusCode::OK);
        let history: Value = response.json();
        assert_eq!(history["total"], 1);
        assert_eq!(history["page"], 1);
        assert_eq!(history["limit"], 10);
        assert_eq!(history["totalPages"], 1);

        let closed = &history["cycles"][0];
        assert_eq!(closed["id"], first["id"]);
        assert_eq!(closed["status"], "CLOSED");
        assert!(!closed["closedAt"].is_null());
        assert_eq!(number(&closed["totalExpenses"]), 15000.0);
        assert_eq!(number(&closed["totalSaved"]), 35000.0);
        assert_eq!(closed["expenses"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_history_paging() {
        let server = setup_test_server().await;
        for salary in [10000, 20000, 30000, 40000] {
            credit_salary(&server, salary).await;
        }

        let history: Value = server
            .get("/api/salary/history")
            .add_query_param("page", 2)
            .add_query_param("limit", 2)
            .await
            .json();
        assert_eq!(history["total"], 3);
        assert_eq!(history["totalPages"], 2);
        let cycles = history["cycles"].as_array().unwrap();
        assert_eq!(cycles.len(), 1);
        assert_eq!(number(&cycles[0]["salaryAmount"]), 10000.0);

        server
            .get("/api/salary/history")
            .add_query_param("limit", 0)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get("/api/salary/history")
            .add_query_param("limit", 101)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_history_page_beyond_u64_offset() {
        let server = setup_test_server().await;
        credit_salary(&server, 10000).await;
        credit_salary(&server, 20000).await;

        let response = server
            .get("/api/salary/history")
            .add_query_param("page", u64::MAX)
            .add_query_param("limit", 100)
            .await;

        response.assert_status(StatusCode::OK);
        let history: Value = response.json();
        assert_eq!(history["total"], 1);
        assert_eq!(history["page"], u64::MAX);
        assert!(history["cycles"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_amounts_above_limit_are_rejected() {
        let server = setup_test_server().await;

        let response = server
            .post("/api/salary")
            .json(&json!({ "salaryAmount": 1e27 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response.json();
        assert_eq!(error.error, "Amount must not exceed 1000000000000000");

        credit_salary(&server, 50000).await;
        server
            .post("/api/expenses")
            .json(&json!({ "amount": 1e20, "category": "Food" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .post("/api/ai/recommendation")
            .json(&json!({ "savedAmount": 1e27, "expenseBreakdown": {}, "totalSalary": 1 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response.json();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_current_salary_requires_active_cycle() {
        let server = setup_test_server().await;

        let response = server.get("/api/salary/current").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "No active salary cycle found");

        server
            .patch("/api/salary/current")
            .json(&json!({ "salaryAmount": 1000 }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete("/api/salary/current")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_and_delete_current_salary() {
        let server = setup_test_server().await;
        credit_salary(&server, 50000).await;
        let expense = add_expense(&server, "Food", 500).await;

        let response = server
            .patch("/api/salary/current")
            .json(&json!({ "salaryAmount": 55000 }))
            .await;
        response.assert_status(StatusCode::OK);
        let updated: Value = response.json();
        assert_eq!(number(&updated["salaryAmount"]), 55000.0);
        assert_eq!(updated["status"], "ACTIVE");

        server
            .post("/api/ai/recommendation")
            .json(&json!({
                "savedAmount": 8000,
                "expenseBreakdown": {},
                "totalSalary": 55000,
                "salaryCycleId": updated["id"],
            }))
            .await
            .assert_status(StatusCode::OK);

        server
            .delete("/api/salary/current")
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get("/api/salary/current")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete(&format!("/api/expenses/{}", expense["id"]))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        let expenses: Vec<Value> = server.get("/api/expenses/current").await.json();
        assert!(expenses.is_empty());
    }

    #[tokio::test]
    async fn test_add_expense_without_cycle_is_bad_request() {
        let server = setup_test_server().await;

        let response = server
            .post("/api/expenses")
            .json(&json!({ "amount": 100, "category": "Food" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "No active salary cycle found");
        assert_eq!(body.code, "NO_ACTIVE_CYCLE");
    }

    #[tokio::test]
    async fn test_expense_crud() {
        let server = setup_test_server().await;
        let cycle = credit_salary(&server, 40000).await;

        let first = add_expense(&server, "Food", 250).await;
        let second = add_expense(&server, "Transport", 80).await;
        assert_eq!(first["salaryCycleId"], cycle["id"]);
        assert_eq!(first["isDefault"], false);

        let listed: Vec<Value> = server.get("/api/expenses/current").await.json();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["id"], second["id"]);

        let response = server
            .patch(&format!("/api/expenses/{}", first["id"]))
            .json(&json!({ "amount": 300, "category": "Entertainment" }))
            .await;
        response.assert_status(StatusCode::OK);
        let updated: Value = response.json();
        assert_eq!(number(&updated["amount"]), 300.0);
        assert_eq!(updated["category"], "Entertainment");
        assert_eq!(updated["note"], "test");

        server
            .patch(&format!("/api/expenses/{}", first["id"]))
            .json(&json!({ "amount": -5 }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .patch("/api/expenses/9999")
            .json(&json!({ "note": "missing" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server
            .delete(&format!("/api/expenses/{}", first["id"]))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .delete(&format!("/api/expenses/{}", first["id"]))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_expense_validation_reports_first_field() {
        let server = setup_test_server().await;
        credit_salary(&server, 40000).await;

        let response = server
            .post("/api/expenses")
            .json(&json!({ "amount": -1, "category": "" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "Amount must be positive");

        let response = server
            .post("/api/expenses")
            .json(&json!({ "amount": 10, "category": "" }))
            .await;
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "Category is required");
    }

    #[tokio::test]
    async fn test_categories() {
        let server = setup_test_server().await;

        let categories: Vec<String> = server.get("/api/expenses/categories").await.json();

        assert_eq!(categories.len(), 9);
        assert_eq!(categories[0], "Food");
        assert!(categories.contains(&"Default".to_string()));
    }

    #[tokio::test]
    async fn test_defaults_crud() {
        let server = setup_test_server().await;

        let response = server
            .post("/api/defaults")
            .json(&json!({ "name": "", "amount": 100 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "Name is required");

        let response = server
            .post("/api/defaults")
            .json(&json!({ "name": "Rent", "amount": 15000 }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let rent: Value = response.json();
        assert_eq!(rent["isActive"], true);
        server
            .post("/api/defaults")
            .json(&json!({ "name": "Internet", "amount": 999 }))
            .await
            .assert_status(StatusCode::CREATED);

        let listed: Vec<Value> = server.get("/api/defaults").await.json();
        let names: Vec<&str> = listed.iter().map(|d| d["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Internet", "Rent"]);

        let response = server
            .patch(&format!("/api/defaults/{}", rent["id"]))
            .json(&json!({ "isActive": false }))
            .await;
        response.assert_status(StatusCode::OK);
        let paused: Value = response.json();
        assert_eq!(paused["isActive"], false);
        assert_eq!(paused["name"], "Rent");

        // Paused templates are not applied to new cycles.
        let cycle = credit_salary(&server, 30000).await;
        let seeded = cycle["expenses"].as_array().unwrap();
        assert_eq!(seeded.len(), 1);
        assert_eq!(seeded[0]["note"], "Internet");

        server
            .delete(&format!("/api/defaults/{}", rent["id"]))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .delete(&format!("/api/defaults/{}", rent["id"]))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .patch("/api/defaults/9999")
            .json(&json!({ "amount": 5 }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_current_analytics() {
        let server = setup_test_server().await;
        server
            .get("/api/analytics/current")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let cycle = credit_salary(&server, 40000).await;
        add_expense(&server, "Food", 1000).await;
        add_expense(&server, "Food", 500).await;
        add_expense(&server, "Transport", 300).await;

        let response = server.get("/api/analytics/current").await;
        response.assert_status(StatusCode::OK);
        let analytics: Value = response.json();

        assert_eq!(analytics["cycleId"], cycle["id"]);
        assert_eq!(number(&analytics["totalExpenses"]), 1800.0);
        assert_eq!(number(&analytics["remaining"]), 38200.0);
        assert_eq!(number(&analytics["spentPercent"]), 4.5);
        assert_eq!(number(&analytics["categoryBreakdown"]["Food"]), 1500.0);
        assert_eq!(analytics["expenseCount"], 3);
        let daily = analytics["dailySpending"].as_object().unwrap();
        assert_eq!(daily.values().map(number).sum::<f64>(), 1800.0);
    }

    #[tokio::test]
    async fn test_history_analytics_and_cache_invalidation() {
        let server = setup_test_server().await;

        let empty: Vec<Value> = server.get("/api/analytics/history").await.json();
        assert!(empty.is_empty());

        let first = credit_salary(&server, 30000).await;
        add_expense(&server, "Food", 20000).await;
        credit_salary(&server, 40000).await;

        let history: Vec<Value> = server.get("/api/analytics/history").await.json();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["cycleId"], first["id"]);
        assert_eq!(number(&history[0]["totalSaved"]), 10000.0);
        assert_eq!(number(&history[0]["savingsRate"]), 33.33);
        assert_eq!(number(&history[0]["categoryBreakdown"]["Food"]), 20000.0);

        // A new salary closes another cycle; the cached history must not be served.
        credit_salary(&server, 50000).await;
        let history: Vec<Value> = server.get("/api/analytics/history").await.json();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0]["cycleId"], first["id"]);
        assert_eq!(number(&history[1]["savingsRate"]), 100.0);
    }

    #[tokio::test]
    async fn test_history_computed_before_mutation_is_not_served() {
        let state = setup_test_app_state().await;
        let server = TestServer::new(setup_test_app_with_state(state.clone())).unwrap();
        credit_salary(&server, 30000).await;

        // A history read that started before the next salary and stored its
        // result only after the mutation invalidated the cache.
        let in_flight_key = state.history_cache_key();
        credit_salary(&server, 40000).await;
        state
            .cache
            .insert(in_flight_key, CachedData::History(Vec::new()))
            .await;

        let history: Vec<Value> = server.get("/api/analytics/history").await.json();
        assert_eq!(history.len(), 1);
        assert_eq!(number(&history[0]["salaryAmount"]), 30000.0);
    }

    #[tokio::test]
    async fn test_recommendation_tiers() {
        let server = setup_test_server().await;

        let response = server
            .post("/api/ai/recommendation")
            .json(&json!({ "savedAmount": 8000, "expenseBreakdown": {}, "totalSalary": 100000 }))
            .await;
        response.assert_status(StatusCode::OK);
        let rec: Value = response.json();
        assert_eq!(number(&rec["emergencyFund"]), 4000.0);
        assert_eq!(number(&rec["investment"]), 2400.0);
        assert_eq!(number(&rec["guiltFreeSpend"]), 1600.0);
        assert_eq!(number(&rec["sipIncrease"]), 0.0);

        let rec: Value = server
            .post("/api/ai/recommendation")
            .json(&json!({
                "savedAmount": -200,
                "expenseBreakdown": { "Food": 40000 },
                "totalSalary": 50000,
            }))
            .await
            .json();
        assert_eq!(rec["reasoning"].as_array().unwrap().len(), 1);
        assert_eq!(number(&rec["emergencyFund"]), 0.0);
    }

    #[tokio::test]
    async fn test_recommendation_validation_and_unknown_cycle() {
        let server = setup_test_server().await;

        let response = server
            .post("/api/ai/recommendation")
            .json(&json!({ "savedAmount": 100, "expenseBreakdown": {}, "totalSalary": 0 }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "Total salary must be positive");

        server
            .post("/api/ai/recommendation")
            .json(&json!({
                "savedAmount": 100,
                "expenseBreakdown": {},
                "totalSalary": 1000,
                "salaryCycleId": 9999,
            }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_recommendation_upserts_single_decision() {
        let server = setup_test_server().await;
        let cycle = credit_salary(&server, 60000).await;

        for saved in [8000, 15000] {
            server
                .post("/api/ai/recommendation")
                .json(&json!({
                    "savedAmount": saved,
                    "expenseBreakdown": { "Food": 5000 },
                    "totalSalary": 60000,
                    "salaryCycleId": cycle["id"],
                }))
                .await
                .assert_status(StatusCode::OK);
        }

        let current: Value = server.get("/api/salary/current").await.json();
        let savings = &current["savings"];
        assert_eq!(savings["salaryCycleId"], cycle["id"]);
        assert_eq!(number(&savings["savedAmount"]), 15000.0);
        assert_eq!(number(&savings["aiSuggestions"]["investment"]), 6000.0);
        assert!(savings["userChoice"].is_null());
    }

    #[tokio::test]
    async fn test_swagger_document_is_served() {
        let server = setup_test_server().await;

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status(StatusCode::OK);
        let doc: Value = response.json();
        assert!(doc["paths"]["/api/salary"].is_object());
    }
}
