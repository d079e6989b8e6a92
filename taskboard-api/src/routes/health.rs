/// Liveness endpoint
///
/// ```text
/// GET /health-check  ->  200 OK, body "OK"
/// ```
///
/// Does not touch the database.

pub async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(health_check().await, "OK");
    }
}
