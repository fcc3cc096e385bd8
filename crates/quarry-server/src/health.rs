/// Liveness probe; answers as long as the process serves requests
pub async fn health() -> &'static str {
    "ok"
}
