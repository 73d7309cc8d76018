#[macro_export]
macro_rules! log_err {
    // Usage: log_err!(&pool, data);
    ($pool:expr, $params:expr) => {{
        let pool_clone = $pool.clone();
        let location = format!("{}:{}", file!(), line!());

        let params_json = ::serde_json::to_value($params)
            .unwrap_or(::serde_json::Value::Null);

        ::tokio::spawn(async move {
            if let Err(e) = ::sqlx::query(
                r#"
                    INSERT INTO error_logs (location, parameters)
                    VALUES ($1, $2)
                    "#,
            )
            .bind(&location)
            .bind(params_json)
            .execute(&pool_clone)
            .await
            {
                ::log::warn!("Failed to record error log for {}: {}", location, e);
            }
        });
    }};
}
